//! # BadgeChain Permission Engine Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Rule and rectangle builders shared with benches
//! └── integration/      # Cross-crate permission scenarios
//!     ├── flows.rs      # Update and check flows over typed projections
//!     └── properties.rs # Algebraic properties over generated rule sets
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p bc-tests
//!
//! # With engine logs
//! RUST_LOG=bc_permissions=debug cargo test -p bc-tests -- --nocapture
//!
//! # Benchmarks
//! cargo bench -p bc-tests
//! ```

pub mod fixtures;
pub mod integration;

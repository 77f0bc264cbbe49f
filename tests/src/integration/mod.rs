//! # Integration Tests
//!
//! Cross-crate permission scenarios driven through `bc-permissions` and
//! `shared-types` public APIs.

pub mod flows;
pub mod properties;

//! # Domain Module
//!
//! Universal permission representation: axis values, rules, rectangles,
//! concrete check points, payloads, errors and invariants.

pub mod axes;
pub mod check;
pub mod errors;
pub mod invariants;
pub mod payload;
pub mod universal;

pub use axes::*;
pub use check::PermissionCheck;
pub use errors::*;
pub use invariants::*;
pub use payload::PermissionPayload;
pub use universal::*;

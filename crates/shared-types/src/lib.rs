//! # Shared Types Crate
//!
//! Value algebras consumed by the permission engine and the rest of the SDK.
//!
//! ## Contents
//!
//! - **Ranges**: [`UintRange`] closed intervals over `1..=u64::MAX` with merge,
//!   invert, subtract and search.
//! - **Address lists**: [`AddressList`] whitelist/blacklist sets of addresses or
//!   tracker ids, exposing the same remainder/overlap shape as ranges.
//! - **Numeric**: conversion between `U256` wire values and the 64-bit domain.
//!
//! All types here are plain values. Nothing holds state across calls.

pub mod address_lists;
pub mod errors;
pub mod numeric;
pub mod ranges;

pub use address_lists::AddressList;
pub use errors::*;
pub use numeric::{parse_uint, u64_from_u256, Timestamp, MAX_UINT};
pub use ranges::*;

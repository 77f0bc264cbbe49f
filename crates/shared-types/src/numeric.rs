//! # Numeric Conversion
//!
//! Chain values travel as `U256` (or decimal strings) but the permission
//! domain is 64-bit. Conversion is explicit and rejects anything that does
//! not fit rather than truncating.

use crate::errors::NumericError;
pub use primitive_types::U256;

/// Unix timestamp in milliseconds.
pub type Timestamp = u64;

/// Domain ceiling. Doubles as the "unbounded" end of an open range.
pub const MAX_UINT: u64 = u64::MAX;

/// Convert a `U256` into the 64-bit domain.
pub fn u64_from_u256(value: U256) -> Result<u64, NumericError> {
    if value > U256::from(MAX_UINT) {
        return Err(NumericError::Overflow(value.to_string()));
    }
    Ok(value.low_u64())
}

/// Parse a decimal string into the 64-bit domain.
pub fn parse_uint(value: &str) -> Result<u64, NumericError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(NumericError::Parse(value.to_string()));
    }
    let parsed =
        U256::from_dec_str(trimmed).map_err(|_| NumericError::Parse(value.to_string()))?;
    u64_from_u256(parsed)
}

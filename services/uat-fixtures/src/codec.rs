//! Hex text codec for raw frame bytes
//!
//! Fixtures carry frames as lowercase hex so they survive as plain string
//! literals in the generated C source.

use thiserror::Error;

/// Hex decoding failure
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HexError {
    /// Odd length or a non-hex character
    #[error("malformed hex: {0}")]
    MalformedHex(#[from] hex::FromHexError),
}

/// Encode bytes as lowercase hex, high nibble first, no separators
pub fn encode(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode a hex string back into bytes
///
/// Accepts either case. Exact inverse of [`encode`].
pub fn decode(text: &str) -> Result<Vec<u8>, HexError> {
    Ok(hex::decode(text)?)
}

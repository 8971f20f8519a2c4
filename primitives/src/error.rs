//! Error types for the Mintledger primitives.
//!
//! Two families live here: codec failures raised while decoding transaction
//! bytes, and cryptographic subsystem failures. A signature that simply does
//! not verify is NOT an error; it is reported as `Ok(false)` by verifiers.

use thiserror::Error;

/// Failure while decoding the canonical transaction encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Input ended before a complete field could be read.
    #[error("unexpected end of data: needed {needed} bytes at offset {offset}")]
    UnexpectedEnd { offset: usize, needed: usize },

    /// Unknown transaction kind tag.
    #[error("unknown transaction kind: 0x{0:02x}")]
    UnknownKind(u8),

    /// An optional-field flag was neither 0 nor 1.
    #[error("invalid presence flag: 0x{0:02x}")]
    InvalidFlag(u8),

    /// Bytes remained after the transaction was fully decoded.
    #[error("{0} trailing bytes after transaction")]
    TrailingBytes(usize),
}

/// Failure of the signature subsystem itself.
///
/// Unlike a signature mismatch, this means the verifier cannot produce a
/// trustworthy answer at all; callers must stop validating.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// The configured signature mechanism is unavailable or misconfigured.
    #[error("signature mechanism unavailable: {0}")]
    Unavailable(String),

    /// A key supplied as configuration is not a usable public key.
    #[error("malformed configured key: {0}")]
    MalformedKey(String),
}

/// Convenience result type for codec operations.
pub type CodecResult<T> = core::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_error_display() {
        let err = CodecError::UnexpectedEnd { offset: 12, needed: 32 };
        let s = format!("{}", err);
        assert!(s.contains("12"));
        assert!(s.contains("32"));

        assert_eq!(
            CodecError::UnknownKind(0xff).to_string(),
            "unknown transaction kind: 0xff"
        );
    }

    #[test]
    fn test_crypto_error_display() {
        let err = CryptoError::Unavailable("hsm offline".into());
        assert!(err.to_string().contains("hsm offline"));
    }
}

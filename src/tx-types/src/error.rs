use rlp::DecoderError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SigningError>;

/// Failures of the signing core.
///
/// Every error is a deterministic function of the input: none of them is
/// worth retrying without changing the transaction, the key or the scheme.
#[derive(Debug, Clone, Error, Serialize, Deserialize, Eq, PartialEq)]
pub enum SigningError {
    /// Malformed or out-of-range V/R/S, or a raw signature of the wrong length.
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    /// The EC primitive rejected the private key or the digest.
    #[error("signing failed: {0}")]
    SigningFailure(String),

    /// The EC primitive could not recover a public key.
    #[error("public key recovery failed: {0}")]
    RecoveryFailure(String),

    /// The canonical encoder rejected the input.
    #[error("encoding failed: {0}")]
    EncodingFailure(String),
}

impl SigningError {
    pub fn is_invalid_signature(&self) -> bool {
        matches!(self, Self::InvalidSignature(_))
    }

    pub fn is_recovery_failure(&self) -> bool {
        matches!(self, Self::RecoveryFailure(_))
    }
}

impl From<DecoderError> for SigningError {
    fn from(decode_error: DecoderError) -> Self {
        Self::EncodingFailure(format!("rlp err: {decode_error}"))
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_rlp_decoder_error_is_encoding_failure() {
        let err = SigningError::from(DecoderError::RlpIsTooShort);
        assert!(matches!(err, SigningError::EncodingFailure(_)));
        assert!(err.to_string().starts_with("encoding failed: rlp err"));
    }

    #[test]
    fn test_error_kind_helpers() {
        assert!(SigningError::InvalidSignature("v".into()).is_invalid_signature());
        assert!(!SigningError::SigningFailure("key".into()).is_invalid_signature());
        assert!(SigningError::RecoveryFailure("point".into()).is_recovery_failure());
    }
}

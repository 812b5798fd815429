//! Error types for PQ Ledger core operations

use crate::rlp::RlpError;
use crate::transaction::TransactionType;
use pqledger_crypto::CryptoError;
use primitive_types::U256;
use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Transaction decoding failures. Decoding is all-or-nothing: any of these
/// means no transaction was produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Truncated, overrun or otherwise ill-formed byte stream
    #[error("Malformed encoding: {0}")]
    Malformed(#[from] RlpError),

    /// Recipient or access-list address of the wrong width
    #[error("Invalid address length: {0} bytes")]
    InvalidAddressLength(usize),

    #[error("Invalid storage key length: {0} bytes")]
    InvalidStorageKeyLength(usize),

    /// Signature `v` does not fit the recovery byte
    #[error("Signature v value out of range: {0}")]
    InvalidRecoveryValue(U256),

    /// Classical signature factory rejected r, s or the recovery id
    #[error("Invalid classical signature: {0}")]
    ClassicalSignature(CryptoError),

    #[error("Transaction build failed: {0}")]
    Build(#[from] BuildError),
}

/// Transaction builder failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Hybrid transactions need algorithm id, public key and PQ signature
    #[error("Hybrid transaction missing post-quantum field: {0}")]
    MissingPqMaterial(&'static str),
}

/// Post-decode validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Not a hybrid transaction: {0:?}")]
    NotHybrid(TransactionType),

    #[error("Hybrid transaction missing post-quantum field: {0}")]
    MissingPqMaterial(&'static str),

    /// Unknown algorithm or key/signature length mismatch
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Algorithm is registered but disabled by configuration
    #[error("PQ algorithm {0:#04x} not accepted by configuration")]
    AlgorithmNotAccepted(u8),
}

/// Configuration loading failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Unknown PQ algorithm id in config: {0}")]
    UnknownAlgorithm(u8),

    #[error("Unsupported log format: {0}")]
    InvalidLogFormat(String),
}

/// Umbrella error for ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl LedgerError {
    /// Stable numeric code for API responses
    pub fn code(&self) -> u32 {
        match self {
            Self::Decode(DecodeError::Malformed(_)) => 2001,
            Self::Decode(DecodeError::InvalidAddressLength(_))
            | Self::Decode(DecodeError::InvalidStorageKeyLength(_)) => 2002,
            Self::Decode(DecodeError::InvalidRecoveryValue(_))
            | Self::Decode(DecodeError::ClassicalSignature(_)) => 2003,
            Self::Decode(DecodeError::Build(_)) => 2004,
            Self::Validation(ValidationError::Crypto(CryptoError::UnknownAlgorithm(_))) => 3001,
            Self::Validation(ValidationError::Crypto(CryptoError::InvalidKeyLength { .. })) => 3002,
            Self::Validation(ValidationError::Crypto(CryptoError::InvalidSignatureLength {
                ..
            })) => 3003,
            Self::Validation(ValidationError::AlgorithmNotAccepted(_)) => 3004,
            Self::Validation(_) => 3000,
            Self::Config(_) => 4000,
        }
    }

    /// True for byte-stream level failures (truncation, overrun, ill-formed items)
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Decode(DecodeError::Malformed(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err: LedgerError = DecodeError::Malformed(RlpError::LeadingZeros).into();
        assert_eq!(err.code(), 2001);
        assert!(err.is_malformed());

        let err: LedgerError = ValidationError::Crypto(CryptoError::UnknownAlgorithm(2)).into();
        assert_eq!(err.code(), 3001);
        assert!(!err.is_malformed());

        let err: LedgerError = ValidationError::AlgorithmNotAccepted(1).into();
        assert_eq!(err.code(), 3004);
    }

    #[test]
    fn test_error_display() {
        let err = DecodeError::Malformed(RlpError::TrailingBytes { remaining: 3 });
        assert_eq!(
            err.to_string(),
            "Malformed encoding: 3 trailing bytes after last item"
        );

        let err = ValidationError::AlgorithmNotAccepted(1);
        assert_eq!(err.to_string(), "PQ algorithm 0x01 not accepted by configuration");
    }
}

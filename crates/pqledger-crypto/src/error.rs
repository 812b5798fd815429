//! Cryptographic error types

use thiserror::Error;

/// Result type for cryptographic operations
pub type Result<T> = std::result::Result<T, CryptoError>;

/// Errors in cryptographic operations
///
/// Verification failure is deliberately absent: `verify` reports it as
/// `false`, never as an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// No post-quantum algorithm is registered under this id
    #[error("Unknown PQ algorithm id: {0}")]
    UnknownAlgorithm(u8),

    /// Public key length does not match the algorithm
    #[error("Invalid {algorithm} public key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        algorithm: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Signature length does not match the algorithm
    #[error("Invalid {algorithm} signature length: expected {expected}, got {actual}")]
    InvalidSignatureLength {
        algorithm: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Classical signature components out of range
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),
}

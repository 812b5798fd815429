//! # PQ Ledger Cryptography
//!
//! Cryptographic primitives for hybrid (classical + post-quantum) ledger
//! transactions:
//! - Post-quantum key and signature value objects
//! - A closed registry of post-quantum signature algorithms keyed by a one-byte id
//! - ML-DSA-44 (FIPS 204) verification behind a fault-isolating boundary
//! - secp256k1 signature values for the classical half
//!
//! ## Security Model
//!
//! A hybrid transaction carries both an ECDSA signature and a post-quantum
//! signature, so it stays verifiable if the classical scheme is broken.
//!
//! | Function | Algorithm | Security Level |
//! |----------|-----------|----------------|
//! | Classical signature | ECDSA secp256k1 | 128-bit |
//! | PQ signature | ML-DSA-44 | NIST category 2 |

pub mod error;
pub mod pqc;
pub mod secp;

pub use error::*;
pub use pqc::*;
pub use secp::*;

/// Cryptographic prelude
pub mod prelude {
    pub use crate::error::{CryptoError, Result};
    pub use crate::pqc::{
        get_instance, PqAlgorithmId, PqPublicKey, PqSignature, PqSignatureAlgorithm, ML_DSA_44,
    };
    pub use crate::secp::{ClassicalSignatureFactory, SecpSignature, SECP256K1};
}

//! Post-quantum signature algorithms
//!
//! Every scheme implements [`PqSignatureAlgorithm`] and is reachable through
//! the closed [`PqAlgorithmId`] registry. Adding a scheme means adding a
//! variant, which forces every `match` on the id to be revisited.
//!
//! ## Registered Algorithms
//!
//! | Id | Algorithm | Public Key | Signature |
//! |----|-----------|------------|-----------|
//! | `0x01` | ML-DSA-44 (FIPS 204, category 2) | 1312 bytes | 2420 bytes |
//!
//! Once an id is assigned its lengths are part of the wire format and must
//! never change: persisted transactions are decoded against them.

pub mod mldsa44;
pub mod types;

pub use mldsa44::{
    MlDsa44, ML_DSA_44, ML_DSA_44_ALGORITHM_ID, ML_DSA_44_PUBLIC_KEY_LEN, ML_DSA_44_SIGNATURE_LEN,
};
pub use types::{PqPublicKey, PqSignature};

use crate::error::{CryptoError, Result};
use std::fmt;

/// Capability set of a post-quantum signature scheme.
///
/// Implementations are stateless process-wide singletons; only verification
/// is supported.
pub trait PqSignatureAlgorithm: Send + Sync + 'static {
    /// Wire identifier
    fn algorithm_id(&self) -> u8;

    /// Human-readable algorithm name
    fn name(&self) -> &'static str;

    /// Public key length in bytes
    fn public_key_length(&self) -> usize;

    /// Signature length in bytes
    fn signature_length(&self) -> usize;

    /// Wrap `encoded` as a public key of this algorithm.
    fn create_public_key(&self, encoded: &[u8]) -> Result<PqPublicKey> {
        if encoded.len() != self.public_key_length() {
            return Err(CryptoError::InvalidKeyLength {
                algorithm: self.name(),
                expected: self.public_key_length(),
                actual: encoded.len(),
            });
        }
        Ok(PqPublicKey::new(encoded))
    }

    /// Wrap `encoded` as a signature of this algorithm.
    fn create_signature(&self, encoded: &[u8]) -> Result<PqSignature> {
        if encoded.len() != self.signature_length() {
            return Err(CryptoError::InvalidSignatureLength {
                algorithm: self.name(),
                expected: self.signature_length(),
                actual: encoded.len(),
            });
        }
        Ok(PqSignature::new(encoded))
    }

    /// Verify `signature` over the full `message` bytes.
    ///
    /// Never panics and never errors: malformed input of any kind yields `false`.
    fn verify(&self, message: &[u8], signature: &PqSignature, public_key: &PqPublicKey) -> bool;
}

impl fmt::Debug for dyn PqSignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:02x})", self.name(), self.algorithm_id())
    }
}

/// Registered post-quantum algorithm ids
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PqAlgorithmId {
    /// FIPS 204 ML-DSA-44
    MlDsa44 = ML_DSA_44_ALGORITHM_ID,
}

impl PqAlgorithmId {
    /// Every registered id, in ascending order
    pub const ALL: [PqAlgorithmId; 1] = [PqAlgorithmId::MlDsa44];

    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// The singleton implementation for this id
    pub fn algorithm(self) -> &'static dyn PqSignatureAlgorithm {
        match self {
            PqAlgorithmId::MlDsa44 => &ML_DSA_44,
        }
    }
}

impl TryFrom<u8> for PqAlgorithmId {
    type Error = CryptoError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            ML_DSA_44_ALGORITHM_ID => Ok(PqAlgorithmId::MlDsa44),
            other => Err(CryptoError::UnknownAlgorithm(other)),
        }
    }
}

impl From<PqAlgorithmId> for u8 {
    fn from(id: PqAlgorithmId) -> u8 {
        id.as_u8()
    }
}

/// Look up the algorithm registered under `alg_id`.
pub fn get_instance(alg_id: u8) -> Result<&'static dyn PqSignatureAlgorithm> {
    PqAlgorithmId::try_from(alg_id).map(PqAlgorithmId::algorithm)
}

/// All registered algorithms, in id order
pub fn registered_algorithms() -> impl Iterator<Item = &'static dyn PqSignatureAlgorithm> {
    PqAlgorithmId::ALL.into_iter().map(PqAlgorithmId::algorithm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_mldsa44_registered() {
        let alg = get_instance(0x01).unwrap();

        assert_eq!(alg.algorithm_id(), 0x01);
        assert_eq!(alg.name(), "ML-DSA-44");
        assert_eq!(alg.public_key_length(), 1312);
        assert_eq!(alg.signature_length(), 2420);
    }

    #[test]
    fn test_ids_match_implementations() {
        for id in PqAlgorithmId::ALL {
            assert_eq!(id.algorithm().algorithm_id(), id.as_u8());
            assert_eq!(PqAlgorithmId::try_from(id.as_u8()), Ok(id));
        }
    }

    #[test]
    fn test_registry_returns_singleton() {
        let a = get_instance(0x01).unwrap() as *const dyn PqSignatureAlgorithm as *const ();
        let b = get_instance(0x01).unwrap() as *const dyn PqSignatureAlgorithm as *const ();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_algorithm() {
        assert_eq!(get_instance(0x00).unwrap_err(), CryptoError::UnknownAlgorithm(0));
        assert_eq!(get_instance(0x02).unwrap_err(), CryptoError::UnknownAlgorithm(2));
        assert_eq!(get_instance(0xff).unwrap_err(), CryptoError::UnknownAlgorithm(0xff));
    }

    #[test]
    fn test_registered_algorithms_listing() {
        let names: Vec<_> = registered_algorithms().map(|a| a.name()).collect();
        assert_eq!(names, vec!["ML-DSA-44"]);
    }

    #[test]
    fn test_debug_for_trait_object() {
        let alg = get_instance(0x01).unwrap();
        assert_eq!(format!("{:?}", alg), "ML-DSA-44(0x01)");
    }

    proptest! {
        #[test]
        fn prop_unregistered_ids_fail(id in any::<u8>()) {
            let registered = PqAlgorithmId::ALL.iter().any(|known| known.as_u8() == id);
            match get_instance(id) {
                Ok(alg) => {
                    prop_assert!(registered);
                    prop_assert_eq!(alg.algorithm_id(), id);
                }
                Err(err) => {
                    prop_assert!(!registered);
                    prop_assert_eq!(err, CryptoError::UnknownAlgorithm(id));
                }
            }
        }
    }
}

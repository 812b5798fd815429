//! Post-quantum key and signature value objects
//!
//! Both types carry raw bytes without interpretation. Length is only
//! meaningful relative to an algorithm, so it is checked by
//! [`PqSignatureAlgorithm`](super::PqSignatureAlgorithm) constructors and not here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Post-quantum public key
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PqPublicKey {
    #[serde(with = "serde_bytes")]
    encoded: Vec<u8>,
}

impl PqPublicKey {
    /// Wrap raw key bytes
    pub fn new(encoded: impl Into<Vec<u8>>) -> Self {
        Self {
            encoded: encoded.into(),
        }
    }

    /// Raw binary representation of the key
    pub fn raw_bytes(&self) -> &[u8] {
        &self.encoded
    }

    pub fn size(&self) -> usize {
        self.encoded.len()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.encoded
    }
}

impl fmt::Debug for PqPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PqPublicKey = 0x{}", hex::encode(&self.encoded))
    }
}

impl fmt::Display for PqPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Post-quantum signature
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PqSignature {
    #[serde(with = "serde_bytes")]
    encoded: Vec<u8>,
}

impl PqSignature {
    /// Wrap raw signature bytes
    pub fn new(encoded: impl Into<Vec<u8>>) -> Self {
        Self {
            encoded: encoded.into(),
        }
    }

    /// Raw binary representation of the signature
    pub fn raw_bytes(&self) -> &[u8] {
        &self.encoded
    }

    pub fn size(&self) -> usize {
        self.encoded.len()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.encoded
    }
}

impl fmt::Debug for PqSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PqSignature = 0x{}", hex::encode(&self.encoded))
    }
}

impl fmt::Display for PqSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_bytes_preserved() {
        let bytes = vec![0xde, 0xad, 0xbe, 0xef];
        let key = PqPublicKey::new(bytes.clone());

        assert_eq!(key.raw_bytes(), bytes.as_slice());
        assert_eq!(key.size(), 4);
        assert_eq!(key.into_bytes(), bytes);
    }

    #[test]
    fn test_no_length_check_on_construction() {
        assert_eq!(PqSignature::new(Vec::new()).size(), 0);
        assert_eq!(PqSignature::new(vec![7u8; 5000]).size(), 5000);
    }

    #[test]
    fn test_hex_debug_format() {
        let key = PqPublicKey::new([0x01u8, 0xab]);
        assert_eq!(format!("{:?}", key), "PqPublicKey = 0x01ab");

        let sig = PqSignature::new([0x00u8, 0xff]);
        assert_eq!(format!("{:?}", sig), "PqSignature = 0x00ff");
        assert_eq!(sig.to_string(), "PqSignature = 0x00ff");
    }

    #[test]
    fn test_empty_debug_format() {
        assert_eq!(format!("{:?}", PqSignature::new(Vec::new())), "PqSignature = 0x");
    }
}

//! Classical secp256k1 signature values
//!
//! Only construction with range checks is provided here; recovery and
//! verification belong to the classical signature stack.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CryptoError, Result};

/// Order `n` of the secp256k1 group
pub const SECP256K1_CURVE_ORDER: U256 = U256([
    0xBFD2_5E8C_D036_4141,
    0xBAAE_DCE6_AF48_A03B,
    0xFFFF_FFFF_FFFF_FFFE,
    0xFFFF_FFFF_FFFF_FFFF,
]);

/// ECDSA signature over secp256k1 with its recovery id
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SecpSignature {
    r: U256,
    s: U256,
    rec_id: u8,
}

impl SecpSignature {
    pub fn r(&self) -> U256 {
        self.r
    }

    pub fn s(&self) -> U256 {
        self.s
    }

    /// Recovery id (0 or 1)
    pub fn rec_id(&self) -> u8 {
        self.rec_id
    }
}

impl fmt::Debug for SecpSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SecpSignature {{ r: {:#x}, s: {:#x}, rec_id: {} }}",
            self.r, self.s, self.rec_id
        )
    }
}

/// Builds classical signatures from their wire components.
pub trait ClassicalSignatureFactory: Send + Sync {
    fn create_signature(&self, r: U256, s: U256, rec_id: u8) -> Result<SecpSignature>;
}

/// Factory enforcing secp256k1 component ranges
#[derive(Clone, Copy, Debug, Default)]
pub struct Secp256k1SignatureFactory;

/// Default classical signature factory
pub static SECP256K1: Secp256k1SignatureFactory = Secp256k1SignatureFactory;

impl ClassicalSignatureFactory for Secp256k1SignatureFactory {
    fn create_signature(&self, r: U256, s: U256, rec_id: u8) -> Result<SecpSignature> {
        check_component("r", r)?;
        check_component("s", s)?;
        if rec_id > 1 {
            return Err(CryptoError::InvalidSignature(format!(
                "recovery id must be 0 or 1, got {}",
                rec_id
            )));
        }
        Ok(SecpSignature { r, s, rec_id })
    }
}

fn check_component(name: &str, value: U256) -> Result<()> {
    if value.is_zero() {
        return Err(CryptoError::InvalidSignature(format!("{} must be positive", name)));
    }
    if value >= SECP256K1_CURVE_ORDER {
        return Err(CryptoError::InvalidSignature(format!(
            "{} must be less than the curve order",
            name
        )));
    }
    Ok(())
}

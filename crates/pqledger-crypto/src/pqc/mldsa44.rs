//! ML-DSA-44 (FIPS 204, security category 2)
//!
//! Verification wraps `pqcrypto-mldsa` behind a fault-isolating boundary:
//! key and signature bytes come straight from chain data, so nothing the
//! backend does with them may escape as an error or a panic.

use pqcrypto_mldsa::mldsa44;
use pqcrypto_traits::sign::{DetachedSignature as _, PublicKey as _};
use std::panic::{self, AssertUnwindSafe};

use super::{PqPublicKey, PqSignature, PqSignatureAlgorithm};

/// Wire identifier of ML-DSA-44
pub const ML_DSA_44_ALGORITHM_ID: u8 = 0x01;

/// ML-DSA-44 public key size (FIPS 204)
pub const ML_DSA_44_PUBLIC_KEY_LEN: usize = 1312;

/// ML-DSA-44 signature size (FIPS 204)
pub const ML_DSA_44_SIGNATURE_LEN: usize = 2420;

// Wire lengths are frozen; a backend that disagrees must not compile.
const _: () = assert!(ML_DSA_44_PUBLIC_KEY_LEN == mldsa44::public_key_bytes());
const _: () = assert!(ML_DSA_44_SIGNATURE_LEN == mldsa44::signature_bytes());

/// The ML-DSA-44 algorithm. Use the [`ML_DSA_44`] singleton.
pub struct MlDsa44 {
    _private: (),
}

/// Process-wide ML-DSA-44 instance
pub static ML_DSA_44: MlDsa44 = MlDsa44 { _private: () };

impl PqSignatureAlgorithm for MlDsa44 {
    fn algorithm_id(&self) -> u8 {
        ML_DSA_44_ALGORITHM_ID
    }

    fn name(&self) -> &'static str {
        "ML-DSA-44"
    }

    fn public_key_length(&self) -> usize {
        ML_DSA_44_PUBLIC_KEY_LEN
    }

    fn signature_length(&self) -> usize {
        ML_DSA_44_SIGNATURE_LEN
    }

    fn verify(&self, message: &[u8], signature: &PqSignature, public_key: &PqPublicKey) -> bool {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            verify_detached(message, signature.raw_bytes(), public_key.raw_bytes())
        }));

        match outcome {
            Ok(valid) => valid,
            Err(panic_payload) => {
                tracing::error!(
                    algorithm = self.name(),
                    "PQ verification aborted by backend fault: {}",
                    panic_message(panic_payload.as_ref())
                );
                false
            }
        }
    }
}

fn verify_detached(message: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
    let pk = match mldsa44::PublicKey::from_bytes(public_key) {
        Ok(pk) => pk,
        Err(e) => {
            tracing::warn!(len = public_key.len(), "Rejected ML-DSA-44 public key: {:?}", e);
            return false;
        }
    };

    let sig = match mldsa44::DetachedSignature::from_bytes(signature) {
        Ok(sig) => sig,
        Err(e) => {
            tracing::warn!(len = signature.len(), "Rejected ML-DSA-44 signature: {:?}", e);
            return false;
        }
    };

    match mldsa44::verify_detached_signature(&sig, message, &pk) {
        Ok(()) => true,
        Err(_) => {
            tracing::trace!("ML-DSA-44 signature did not verify");
            false
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "unknown panic payload"
    }
}

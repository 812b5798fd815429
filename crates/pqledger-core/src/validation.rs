//! Post-decode validation of hybrid transactions
//!
//! The decoder accepts any algorithm id and PQ material of any length. This
//! stage resolves the id against the registry, applies the configured
//! allow-list and re-creates the key and signature through the algorithm's
//! length-checked constructors. A hybrid transaction must pass here before it
//! is treated as valid.

use pqledger_crypto::{get_instance, PqPublicKey, PqSignature, PqSignatureAlgorithm};
use tracing::debug;

use crate::config::ValidationConfig;
use crate::error::ValidationError;
use crate::transaction::{Transaction, TransactionType};

/// PQ material checked against its algorithm, ready for verification
#[derive(Clone, Debug)]
pub struct ValidatedPq {
    pub algorithm: &'static dyn PqSignatureAlgorithm,
    pub public_key: PqPublicKey,
    pub signature: PqSignature,
}

impl ValidatedPq {
    /// Verify the PQ signature over `message`.
    pub fn verify(&self, message: &[u8]) -> bool {
        self.algorithm
            .verify(message, &self.signature, &self.public_key)
    }
}

/// Mandatory validation step between decode and acceptance
#[derive(Clone, Debug, Default)]
pub struct PqValidator {
    config: ValidationConfig,
}

impl PqValidator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    pub fn validate(&self, tx: &Transaction) -> Result<ValidatedPq, ValidationError> {
        let result = self.check(tx);
        if let Err(e) = &result {
            debug!(error = %e, "hybrid transaction rejected");
        }
        result
    }

    /// Validate `tx` and verify its PQ signature over `message`.
    pub fn verify_pq_signature(
        &self,
        tx: &Transaction,
        message: &[u8],
    ) -> Result<bool, ValidationError> {
        Ok(self.validate(tx)?.verify(message))
    }

    fn check(&self, tx: &Transaction) -> Result<ValidatedPq, ValidationError> {
        if tx.transaction_type() != TransactionType::Hybrid {
            return Err(ValidationError::NotHybrid(tx.transaction_type()));
        }

        let algorithm_id = tx
            .pq_algorithm_id()
            .ok_or(ValidationError::MissingPqMaterial("pq_algorithm_id"))?;
        let algorithm = get_instance(algorithm_id)?;
        if !self.config.accepts(algorithm_id) {
            return Err(ValidationError::AlgorithmNotAccepted(algorithm_id));
        }

        let public_key = tx
            .pq_public_key()
            .ok_or(ValidationError::MissingPqMaterial("pq_public_key"))?;
        let signature = tx
            .pq_signature()
            .ok_or(ValidationError::MissingPqMaterial("pq_signature"))?;

        Ok(ValidatedPq {
            algorithm,
            public_key: algorithm.create_public_key(public_key)?,
            signature: algorithm.create_signature(signature)?,
        })
    }
}

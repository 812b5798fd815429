//! Transaction model
//!
//! A [`Transaction`] is immutable once built. Hybrid transactions carry a
//! post-quantum algorithm id, public key and signature next to the classical
//! ECDSA signature; the PQ material is kept as raw bytes here and only
//! interpreted by the validation stage.

use pqledger_crypto::SecpSignature;
use serde::{Deserialize, Serialize};

use crate::access_list::AccessListEntry;
use crate::error::BuildError;
use crate::types::{Address, Wei, U256};

/// Transaction type discriminator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Untyped legacy transaction
    Frontier,

    /// Typed transaction with access list
    AccessList,

    /// Typed transaction with priority fee market
    Eip1559,

    /// Fee-market transaction with both classical and post-quantum signatures
    Hybrid,
}

impl TransactionType {
    pub fn supports_pq_signature(&self) -> bool {
        matches!(self, TransactionType::Hybrid)
    }
}

/// A signed transaction
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    transaction_type: TransactionType,
    chain_id: U256,
    nonce: u64,
    max_priority_fee_per_gas: Wei,
    max_fee_per_gas: Wei,
    gas_limit: u64,
    to: Option<Address>,
    value: Wei,
    #[serde(with = "serde_bytes")]
    payload: Vec<u8>,
    access_list: Vec<AccessListEntry>,
    pq_algorithm_id: Option<u8>,
    #[serde(with = "serde_bytes")]
    pq_public_key: Option<Vec<u8>>,
    signature: SecpSignature,
    #[serde(with = "serde_bytes")]
    pq_signature: Option<Vec<u8>>,
}

impl Transaction {
    pub fn builder() -> TransactionBuilder {
        TransactionBuilder::default()
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn chain_id(&self) -> U256 {
        self.chain_id
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn max_priority_fee_per_gas(&self) -> Wei {
        self.max_priority_fee_per_gas
    }

    pub fn max_fee_per_gas(&self) -> Wei {
        self.max_fee_per_gas
    }

    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    /// Recipient; `None` for contract creation
    pub fn to(&self) -> Option<Address> {
        self.to
    }

    pub fn is_contract_creation(&self) -> bool {
        self.to.is_none()
    }

    pub fn value(&self) -> Wei {
        self.value
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn access_list(&self) -> &[AccessListEntry] {
        &self.access_list
    }

    pub fn pq_algorithm_id(&self) -> Option<u8> {
        self.pq_algorithm_id
    }

    pub fn pq_public_key(&self) -> Option<&[u8]> {
        self.pq_public_key.as_deref()
    }

    pub fn signature(&self) -> &SecpSignature {
        &self.signature
    }

    pub fn pq_signature(&self) -> Option<&[u8]> {
        self.pq_signature.as_deref()
    }
}

/// Builder for [`Transaction`]
#[derive(Clone, Debug, Default)]
pub struct TransactionBuilder {
    transaction_type: Option<TransactionType>,
    chain_id: Option<U256>,
    nonce: Option<u64>,
    max_priority_fee_per_gas: Option<Wei>,
    max_fee_per_gas: Option<Wei>,
    gas_limit: Option<u64>,
    to: Option<Address>,
    value: Option<Wei>,
    payload: Vec<u8>,
    access_list: Vec<AccessListEntry>,
    pq_algorithm_id: Option<u8>,
    pq_public_key: Option<Vec<u8>>,
    signature: Option<SecpSignature>,
    pq_signature: Option<Vec<u8>>,
}

impl TransactionBuilder {
    pub fn transaction_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = Some(transaction_type);
        self
    }

    pub fn chain_id(mut self, chain_id: U256) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }

    pub fn max_priority_fee_per_gas(mut self, fee: Wei) -> Self {
        self.max_priority_fee_per_gas = Some(fee);
        self
    }

    pub fn max_fee_per_gas(mut self, fee: Wei) -> Self {
        self.max_fee_per_gas = Some(fee);
        self
    }

    pub fn gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    pub fn to(mut self, to: Option<Address>) -> Self {
        self.to = to;
        self
    }

    pub fn value(mut self, value: Wei) -> Self {
        self.value = Some(value);
        self
    }

    pub fn payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = payload.into();
        self
    }

    pub fn access_list(mut self, access_list: Vec<AccessListEntry>) -> Self {
        self.access_list = access_list;
        self
    }

    pub fn pq_algorithm_id(mut self, id: u8) -> Self {
        self.pq_algorithm_id = Some(id);
        self
    }

    pub fn pq_public_key(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.pq_public_key = Some(key.into());
        self
    }

    pub fn signature(mut self, signature: SecpSignature) -> Self {
        self.signature = Some(signature);
        self
    }

    pub fn pq_signature(mut self, signature: impl Into<Vec<u8>>) -> Self {
        self.pq_signature = Some(signature.into());
        self
    }

    pub fn build(self) -> Result<Transaction, BuildError> {
        let transaction_type = self
            .transaction_type
            .ok_or(BuildError::MissingField("type"))?;

        if transaction_type.supports_pq_signature() {
            if self.pq_algorithm_id.is_none() {
                return Err(BuildError::MissingPqMaterial("pq_algorithm_id"));
            }
            if self.pq_public_key.is_none() {
                return Err(BuildError::MissingPqMaterial("pq_public_key"));
            }
            if self.pq_signature.is_none() {
                return Err(BuildError::MissingPqMaterial("pq_signature"));
            }
        }

        Ok(Transaction {
            transaction_type,
            chain_id: self.chain_id.ok_or(BuildError::MissingField("chain_id"))?,
            nonce: self.nonce.ok_or(BuildError::MissingField("nonce"))?,
            max_priority_fee_per_gas: self
                .max_priority_fee_per_gas
                .ok_or(BuildError::MissingField("max_priority_fee_per_gas"))?,
            max_fee_per_gas: self
                .max_fee_per_gas
                .ok_or(BuildError::MissingField("max_fee_per_gas"))?,
            gas_limit: self.gas_limit.ok_or(BuildError::MissingField("gas_limit"))?,
            to: self.to,
            value: self.value.ok_or(BuildError::MissingField("value"))?,
            payload: self.payload,
            access_list: self.access_list,
            pq_algorithm_id: self.pq_algorithm_id,
            pq_public_key: self.pq_public_key,
            signature: self.signature.ok_or(BuildError::MissingField("signature"))?,
            pq_signature: self.pq_signature,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pqledger_crypto::{ClassicalSignatureFactory, SECP256K1};

    fn hybrid_builder() -> TransactionBuilder {
        Transaction::builder()
            .transaction_type(TransactionType::Hybrid)
            .chain_id(U256::one())
            .nonce(0)
            .max_priority_fee_per_gas(U256::one())
            .max_fee_per_gas(U256::one())
            .gas_limit(21_000)
            .to(Some(Address::repeat_byte(0x42)))
            .value(U256::zero())
            .pq_algorithm_id(1)
            .pq_public_key(vec![1u8; 1312])
            .signature(
                SECP256K1
                    .create_signature(U256::from(5u64), U256::from(6u64), 0)
                    .unwrap(),
            )
            .pq_signature(vec![2u8; 2420])
    }

    #[test]
    fn test_build_hybrid() {
        let tx = hybrid_builder().build().unwrap();

        assert_eq!(tx.transaction_type(), TransactionType::Hybrid);
        assert_eq!(tx.gas_limit(), 21_000);
        assert_eq!(tx.to(), Some(Address::repeat_byte(0x42)));
        assert!(!tx.is_contract_creation());
        assert!(tx.payload().is_empty());
        assert!(tx.access_list().is_empty());
        assert_eq!(tx.pq_algorithm_id(), Some(1));
        assert_eq!(tx.pq_public_key().map(<[u8]>::len), Some(1312));
        assert_eq!(tx.pq_signature().map(<[u8]>::len), Some(2420));
    }

    #[test]
    fn test_missing_fields() {
        let err = TransactionBuilder::default().build().unwrap_err();
        assert_eq!(err, BuildError::MissingField("type"));

        let mut builder = hybrid_builder();
        builder.gas_limit = None;
        assert_eq!(builder.build().unwrap_err(), BuildError::MissingField("gas_limit"));
    }

    #[test]
    fn test_hybrid_requires_pq_material() {
        let mut builder = hybrid_builder();
        builder.pq_signature = None;
        assert_eq!(
            builder.build().unwrap_err(),
            BuildError::MissingPqMaterial("pq_signature")
        );

        let mut builder = hybrid_builder();
        builder.pq_algorithm_id = None;
        assert_eq!(
            builder.build().unwrap_err(),
            BuildError::MissingPqMaterial("pq_algorithm_id")
        );
    }

    #[test]
    fn test_non_hybrid_without_pq_material() {
        let mut builder = hybrid_builder().transaction_type(TransactionType::Eip1559);
        builder.pq_algorithm_id = None;
        builder.pq_public_key = None;
        builder.pq_signature = None;

        let tx = builder.build().unwrap();
        assert_eq!(tx.pq_public_key(), None);
    }
}

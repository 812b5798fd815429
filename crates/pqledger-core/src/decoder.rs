//! Hybrid transaction decoder
//!
//! Wire layout of a hybrid transaction (one outer list, fixed field order):
//!
//! ```text
//! [ chainId, nonce, maxPriorityFeePerGas, maxFeePerGas, gasLimit, to, value,
//!   payload, accessList, pqAlgorithmId, pqPublicKey, v, r, s, pqSignature ]
//! ```
//!
//! The order is a permanent wire contract. The decoder only reconstructs
//! structure: the algorithm id is not looked up and PQ key/signature lengths
//! are not checked here. Callers must run [`crate::validation::PqValidator`]
//! before treating the transaction as valid.

use pqledger_crypto::{ClassicalSignatureFactory, SecpSignature, SECP256K1};
use tracing::{debug, trace};

use crate::access_list::read_access_list;
use crate::error::DecodeError;
use crate::rlp::RlpReader;
use crate::transaction::{Transaction, TransactionType};
use crate::types::{address_from_slice, Address};

/// Decode a hybrid transaction using the secp256k1 signature factory.
pub fn decode_hybrid(input: &[u8]) -> Result<Transaction, DecodeError> {
    decode_hybrid_with(input, &SECP256K1)
}

/// Decode a hybrid transaction, assembling the classical signature with `factory`.
pub fn decode_hybrid_with(
    input: &[u8],
    factory: &dyn ClassicalSignatureFactory,
) -> Result<Transaction, DecodeError> {
    match read_hybrid(input, factory) {
        Ok(tx) => {
            trace!(
                len = input.len(),
                pq_algorithm_id = ?tx.pq_algorithm_id(),
                "decoded hybrid transaction"
            );
            Ok(tx)
        }
        Err(e) => {
            debug!(len = input.len(), error = %e, "hybrid transaction decode failed");
            Err(e)
        }
    }
}

fn read_hybrid(
    input: &[u8],
    factory: &dyn ClassicalSignatureFactory,
) -> Result<Transaction, DecodeError> {
    let mut reader = RlpReader::new(input);
    reader.enter_list()?;

    let chain_id = reader.read_u256_scalar()?;
    let nonce = reader.read_u64_scalar()?;
    let max_priority_fee_per_gas = reader.read_u256_scalar()?;
    let max_fee_per_gas = reader.read_u256_scalar()?;
    let gas_limit = reader.read_u64_scalar()?;
    let to = read_recipient(&mut reader)?;
    let value = reader.read_u256_scalar()?;
    let payload = reader.read_bytes()?.to_vec();
    let access_list = read_access_list(&mut reader)?;
    let pq_algorithm_id = reader.read_byte()?;
    let pq_public_key = reader.read_bytes()?.to_vec();
    let signature = read_classical_signature(&mut reader, factory)?;
    let pq_signature = reader.read_bytes()?.to_vec();

    reader.leave_list()?;
    reader.finish()?;

    let tx = Transaction::builder()
        .transaction_type(TransactionType::Hybrid)
        .chain_id(chain_id)
        .nonce(nonce)
        .max_priority_fee_per_gas(max_priority_fee_per_gas)
        .max_fee_per_gas(max_fee_per_gas)
        .gas_limit(gas_limit)
        .to(to)
        .value(value)
        .payload(payload)
        .access_list(access_list)
        .pq_algorithm_id(pq_algorithm_id)
        .pq_public_key(pq_public_key)
        .signature(signature)
        .pq_signature(pq_signature)
        .build()?;

    Ok(tx)
}

/// Empty string means contract creation.
fn read_recipient(reader: &mut RlpReader<'_>) -> Result<Option<Address>, DecodeError> {
    let raw = reader.read_bytes()?;
    if raw.is_empty() {
        return Ok(None);
    }
    address_from_slice(raw)
        .map(Some)
        .ok_or(DecodeError::InvalidAddressLength(raw.len()))
}

fn read_classical_signature(
    reader: &mut RlpReader<'_>,
    factory: &dyn ClassicalSignatureFactory,
) -> Result<SecpSignature, DecodeError> {
    let v = reader.read_u256_scalar()?;
    let r = reader.read_u256_scalar()?;
    let s = reader.read_u256_scalar()?;

    let rec_id = u8::try_from(v).map_err(|_| DecodeError::InvalidRecoveryValue(v))?;
    factory
        .create_signature(r, s, rec_id)
        .map_err(DecodeError::ClassicalSignature)
}

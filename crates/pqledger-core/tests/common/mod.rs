//! Test-only RLP encoder and hybrid transaction fixtures

#![allow(dead_code)]

use pqcrypto_mldsa::mldsa44;
use pqcrypto_traits::sign::{DetachedSignature as _, PublicKey as _};
use pqledger_core::types::{Address, StorageKey, U256};

pub fn encode_bytes(bytes: &[u8]) -> Vec<u8> {
    if bytes.len() == 1 && bytes[0] < 0x80 {
        return bytes.to_vec();
    }
    let mut out = length_prefix(0x80, bytes.len());
    out.extend_from_slice(bytes);
    out
}

pub fn encode_u64(value: u64) -> Vec<u8> {
    let be = value.to_be_bytes();
    let first = be.iter().position(|&b| b != 0).unwrap_or(be.len());
    encode_bytes(&be[first..])
}

pub fn encode_u256(value: U256) -> Vec<u8> {
    let mut be = [0u8; 32];
    value.to_big_endian(&mut be);
    let first = be.iter().position(|&b| b != 0).unwrap_or(be.len());
    encode_bytes(&be[first..])
}

pub fn encode_list(items: &[Vec<u8>]) -> Vec<u8> {
    let payload = items.concat();
    let mut out = length_prefix(0xc0, payload.len());
    out.extend(payload);
    out
}

fn length_prefix(offset: u8, len: usize) -> Vec<u8> {
    if len <= 55 {
        return vec![offset + len as u8];
    }
    let be = len.to_be_bytes();
    let first = be.iter().position(|&b| b != 0).unwrap_or(be.len());
    let mut out = vec![offset + 55 + (be.len() - first) as u8];
    out.extend_from_slice(&be[first..]);
    out
}

/// Every wire field of a hybrid transaction, in encoding order
#[derive(Clone, Debug)]
pub struct HybridFields {
    pub chain_id: U256,
    pub nonce: u64,
    pub max_priority_fee_per_gas: U256,
    pub max_fee_per_gas: U256,
    pub gas_limit: u64,
    pub to: Vec<u8>,
    pub value: U256,
    pub payload: Vec<u8>,
    pub access_list: Vec<(Address, Vec<StorageKey>)>,
    pub pq_algorithm_id: u8,
    pub pq_public_key: Vec<u8>,
    pub v: U256,
    pub r: U256,
    pub s: U256,
    pub pq_signature: Vec<u8>,
}

impl HybridFields {
    /// chainId=1, nonce=0, fees=1, gasLimit=21000, 20-byte recipient, value=0,
    /// empty payload and access list, ML-DSA-44 sized PQ material
    pub fn sample() -> Self {
        Self {
            chain_id: U256::one(),
            nonce: 0,
            max_priority_fee_per_gas: U256::one(),
            max_fee_per_gas: U256::one(),
            gas_limit: 21_000,
            to: vec![0x42; 20],
            value: U256::zero(),
            payload: Vec::new(),
            access_list: Vec::new(),
            pq_algorithm_id: 0x01,
            pq_public_key: vec![0x11; 1312],
            v: U256::one(),
            r: U256::from(0x1234u64),
            s: U256::from(0x5678u64),
            pq_signature: vec![0x22; 2420],
        }
    }

    /// Same as [`HybridFields::sample`] with PQ material from a real ML-DSA-44 signature over `message`.
    pub fn signed(message: &[u8]) -> Self {
        let (pk, sk) = mldsa44::keypair();
        let sig = mldsa44::detached_sign(message, &sk);
        Self {
            pq_public_key: pk.as_bytes().to_vec(),
            pq_signature: sig.as_bytes().to_vec(),
            ..Self::sample()
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let access_list: Vec<Vec<u8>> = self
            .access_list
            .iter()
            .map(|(address, keys)| {
                let keys: Vec<Vec<u8>> = keys.iter().map(|k| encode_bytes(k.as_bytes())).collect();
                encode_list(&[encode_bytes(address.as_bytes()), encode_list(&keys)])
            })
            .collect();

        encode_list(&[
            encode_u256(self.chain_id),
            encode_u64(self.nonce),
            encode_u256(self.max_priority_fee_per_gas),
            encode_u256(self.max_fee_per_gas),
            encode_u64(self.gas_limit),
            encode_bytes(&self.to),
            encode_u256(self.value),
            encode_bytes(&self.payload),
            encode_list(&access_list),
            encode_bytes(&[self.pq_algorithm_id]),
            encode_bytes(&self.pq_public_key),
            encode_u256(self.v),
            encode_u256(self.r),
            encode_u256(self.s),
            encode_bytes(&self.pq_signature),
        ])
    }
}

//! Core type definitions for PQ Ledger

pub use primitive_types::{H160, H256, U256};

/// 20-byte account address
pub type Address = H160;

/// Amount of the native token, in its smallest unit
pub type Wei = U256;

/// 32-byte storage slot key
pub type StorageKey = H256;

/// Wire-level size constants
pub mod constants {
    /// Address width in bytes
    pub const ADDRESS_LEN: usize = 20;

    /// Storage key width in bytes
    pub const STORAGE_KEY_LEN: usize = 32;
}

/// Interpret `bytes` as an address if it has exactly the address width.
pub fn address_from_slice(bytes: &[u8]) -> Option<Address> {
    (bytes.len() == constants::ADDRESS_LEN).then(|| Address::from_slice(bytes))
}

/// Interpret `bytes` as a storage key if it has exactly the key width.
pub fn storage_key_from_slice(bytes: &[u8]) -> Option<StorageKey> {
    (bytes.len() == constants::STORAGE_KEY_LEN).then(|| StorageKey::from_slice(bytes))
}

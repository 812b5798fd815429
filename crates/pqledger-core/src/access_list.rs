//! Access list decoding
//!
//! Wire form: `[[address, [storageKey, ...]], ...]` with 20-byte addresses
//! and 32-byte storage keys.

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::rlp::RlpReader;
use crate::types::{address_from_slice, storage_key_from_slice, Address, StorageKey};

/// Address and storage slots a transaction pre-declares it will touch
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessListEntry {
    pub address: Address,
    pub storage_keys: Vec<StorageKey>,
}

impl AccessListEntry {
    pub fn new(address: Address, storage_keys: Vec<StorageKey>) -> Self {
        Self {
            address,
            storage_keys,
        }
    }
}

/// Read an access list at the reader's current position.
pub fn read_access_list(reader: &mut RlpReader<'_>) -> Result<Vec<AccessListEntry>, DecodeError> {
    reader.read_list(read_entry)
}

fn read_entry(reader: &mut RlpReader<'_>) -> Result<AccessListEntry, DecodeError> {
    reader.enter_list()?;

    let raw_address = reader.read_bytes()?;
    let address = address_from_slice(raw_address)
        .ok_or(DecodeError::InvalidAddressLength(raw_address.len()))?;

    let storage_keys = reader.read_list(|keys| {
        let raw_key = keys.read_bytes()?;
        storage_key_from_slice(raw_key).ok_or(DecodeError::InvalidStorageKeyLength(raw_key.len()))
    })?;

    reader.leave_list()?;
    Ok(AccessListEntry::new(address, storage_keys))
}

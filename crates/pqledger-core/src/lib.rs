//! # PQ Ledger Core
//!
//! Hybrid transaction model and wire decoding for the PQ Ledger.
//!
//! This crate provides:
//! - `RlpReader` - Canonical RLP stream reader with list-bound accounting
//! - `Transaction` - Immutable transaction value and its builder
//! - `decode_hybrid` - Decoder for transactions carrying classical and PQ signatures
//! - `PqValidator` - Mandatory post-decode check of the PQ material
//!
//! ## Pipeline
//!
//! Decoding only reconstructs structure. Algorithm lookup, the configured
//! allow-list and key/signature lengths are enforced by the validation stage:
//!
//! ```text
//!   raw bytes ──► decode_hybrid ──► Transaction ──► PqValidator ──► ValidatedPq
//!                     │                                   │              │
//!                 RlpReader                         registry lookup   verify(msg)
//!                 access list                       length checks
//!                 secp factory
//! ```

pub mod access_list;
pub mod config;
pub mod decoder;
pub mod error;
pub mod rlp;
pub mod transaction;
pub mod types;
pub mod validation;

pub use access_list::*;
pub use config::*;
pub use decoder::*;
pub use error::*;
pub use rlp::{RlpError, RlpReader};
pub use transaction::*;
pub use types::*;
pub use validation::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{LedgerConfig, ValidationConfig};
    pub use crate::decoder::{decode_hybrid, decode_hybrid_with};
    pub use crate::error::{DecodeError, LedgerError, Result, ValidationError};
    pub use crate::transaction::{Transaction, TransactionBuilder, TransactionType};
    pub use crate::types::{Address, Wei};
    pub use crate::validation::{PqValidator, ValidatedPq};
}

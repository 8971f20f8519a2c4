//! `mintledger-primitives` — foundational types for the Mintledger ledger.
//!
//! This crate provides the value records (outputs, inputs, transactions,
//! hash pointers, UTXOs), their canonical byte encoding, SHA-256 hashing,
//! and Ed25519 signing helpers shared by the admission engine and by
//! clients that build transactions.

pub mod types;
pub mod error;
pub mod crypto;
pub mod codec;
pub mod transaction;

// Re-export commonly used types at the crate root for convenience.
pub use types::{
    Hash, LedgerPosition, OutputIndex, PublicKey, Signature, Value, VALUE_TOLERANCE, ZERO_HASH,
};
pub use error::{CodecError, CodecResult, CryptoError};
pub use codec::{decode_transaction, encode_transaction};
pub use transaction::{HashPointer, Input, Output, Transaction, TxKind, Utxo};

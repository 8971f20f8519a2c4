//! `mintledger-engine` — transaction validation and epoch admission.
//!
//! This crate decides which transactions enter a single-authority UTXO
//! ledger. Only the authority may mint (`Create`); anyone holding value may
//! transfer it (`Pay`). Batches arrive unordered once per epoch and may
//! depend on each other; the engine admits what it can by re-evaluating
//! the batch until no further progress is possible.
//!
//! ## Architecture
//!
//! - [`ledger::LedgerStore`] — append-only transaction sequence
//! - [`utxo`] — unspent-output set derived by replaying the ledger
//! - [`oracle::SignatureVerifier`] — seam to the signature scheme
//! - [`validation::TransactionValidator`] — per-transaction rules
//! - [`admission::EpochAdmission`] — fixed-point batch loop
//! - [`service::LedgerService`] — lock-guarded entry point

pub mod error;
pub mod config;
pub mod oracle;
pub mod ledger;
pub mod utxo;
pub mod validation;
pub mod admission;
pub mod service;

// Re-export key types for convenience
pub use admission::{EpochAdmission, EpochReport};
pub use config::LedgerConfig;
pub use error::{EngineError, EngineResult};
pub use ledger::LedgerStore;
pub use oracle::{Ed25519Verifier, SignatureVerifier};
pub use service::LedgerService;
pub use utxo::{compute_unspent, UtxoSet};
pub use validation::{Rejection, TransactionValidator, Verdict};

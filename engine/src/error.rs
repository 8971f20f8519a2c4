//! Engine error types.
//!
//! Only conditions that make further validation untrustworthy are errors.
//! A transaction that breaks a ledger rule is reported through
//! [`Verdict::Invalid`](crate::validation::Verdict), never through
//! [`EngineError`].

use mintledger_primitives::CryptoError;
use thiserror::Error;

/// Fatal engine error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The signature oracle failed. No verdict produced under this
    /// condition can be trusted.
    #[error("signature oracle failure: {0}")]
    Crypto(#[from] CryptoError),

    /// An operation that needs the authority key ran before `init`.
    #[error("authority key not initialized")]
    AuthorityNotInitialized,

    /// `init` was called after the first epoch was processed.
    #[error("authority key is locked once an epoch has been processed")]
    AuthorityLocked,

    /// Configuration rejected at construction.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience result type for the engine.
pub type EngineResult<T> = core::result::Result<T, EngineError>;

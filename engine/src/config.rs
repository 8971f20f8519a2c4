//! Ledger configuration.

use mintledger_primitives::{PublicKey, Value, VALUE_TOLERANCE};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::oracle::SignatureVerifier;

/// Configuration for a ledger instance.
///
/// The authority key is mandatory, so there is no `Default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Public key of the only party allowed to mint.
    pub authority: PublicKey,

    /// Maximum difference between input and output sums of a Pay.
    /// Default: 1e-6.
    #[serde(default = "default_value_tolerance")]
    pub value_tolerance: Value,
}

fn default_value_tolerance() -> Value {
    VALUE_TOLERANCE
}

impl LedgerConfig {
    pub fn new(authority: PublicKey) -> Self {
        Self {
            authority,
            value_tolerance: VALUE_TOLERANCE,
        }
    }

    pub fn with_value_tolerance(mut self, tolerance: Value) -> Self {
        self.value_tolerance = tolerance;
        self
    }

    /// Reject settings the engine cannot run with.
    ///
    /// A malformed authority key surfaces as [`EngineError::Crypto`]: it is
    /// a fatal oracle-side condition, not a bad transaction.
    pub fn validate(&self, verifier: &dyn SignatureVerifier) -> EngineResult<()> {
        if !self.value_tolerance.is_finite() || self.value_tolerance <= 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "value_tolerance must be finite and > 0, got {}",
                self.value_tolerance
            )));
        }
        verifier.check_key(&self.authority)?;
        Ok(())
    }
}

//! Transaction admissibility rules.
//!
//! [`TransactionValidator::validate`] checks one candidate against the
//! current ledger without mutating it. A broken ledger rule yields
//! [`Verdict::Invalid`] with the first [`Rejection`] found; only a failure
//! of the signature oracle is returned as an error.
//!
//! Create:
//! 1. no inputs
//! 2. every output owned by the authority
//! 3. every output value finite and > 0
//! 4. authority signature over `raw_bytes()`
//!
//! Pay:
//! 1. every input claims a currently unspent output
//! 2. no output is claimed twice by the same transaction
//! 3. every input signature verifies against the claimed output's owner
//! 4. every output value finite and > 0
//! 5. input sum equals output sum within tolerance

use std::collections::HashSet;
use std::fmt;

use mintledger_primitives::{
    types::{short_hex, values_balance},
    PublicKey, Transaction, TxKind, Utxo, Value,
};

use crate::config::LedgerConfig;
use crate::error::EngineResult;
use crate::ledger::LedgerStore;
use crate::oracle::SignatureVerifier;
use crate::utxo::{compute_unspent, UtxoSet};

/// The rule a transaction broke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    /// Stored hash does not match the transaction content.
    HashMismatch,
    /// A Create listed inputs.
    CreateHasInputs,
    /// A Create output is owned by someone other than the authority.
    NotAuthorityOwned { output: usize },
    /// An output value is zero, negative, infinite, or NaN.
    NonPositiveValue { output: usize },
    /// Required signature absent. `input` is `None` for the Create signature.
    MissingSignature { input: Option<usize> },
    /// Signature present but does not verify.
    BadSignature { input: Option<usize> },
    /// Input claims an output that does not exist or is already spent.
    UnknownOrSpentInput { input: usize },
    /// Input claims an output an earlier input of the same transaction claimed.
    DuplicateInput { input: usize },
    /// Input and output sums differ by at least the tolerance.
    ValueMismatch { inputs: Value, outputs: Value },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HashMismatch => write!(f, "hash does not match content"),
            Self::CreateHasInputs => write!(f, "create transaction has inputs"),
            Self::NotAuthorityOwned { output } => {
                write!(f, "output {} not owned by authority", output)
            }
            Self::NonPositiveValue { output } => {
                write!(f, "output {} value is not a positive finite amount", output)
            }
            Self::MissingSignature { input: None } => write!(f, "missing authority signature"),
            Self::MissingSignature { input: Some(i) } => {
                write!(f, "input {} missing signature", i)
            }
            Self::BadSignature { input: None } => write!(f, "invalid authority signature"),
            Self::BadSignature { input: Some(i) } => write!(f, "input {} signature invalid", i),
            Self::UnknownOrSpentInput { input } => {
                write!(f, "input {} claims unknown or spent output", input)
            }
            Self::DuplicateInput { input } => {
                write!(f, "input {} claims an output already claimed by this transaction", input)
            }
            Self::ValueMismatch { inputs, outputs } => {
                write!(f, "value mismatch: inputs={}, outputs={}", inputs, outputs)
            }
        }
    }
}

/// Outcome of validating one transaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    Valid,
    Invalid(Rejection),
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The rejection, if invalid.
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Valid => None,
            Self::Invalid(r) => Some(*r),
        }
    }
}

impl From<Rejection> for Verdict {
    fn from(r: Rejection) -> Self {
        Self::Invalid(r)
    }
}

/// Stateless validator bound to an authority key and a signature oracle.
pub struct TransactionValidator<'a> {
    authority: PublicKey,
    tolerance: Value,
    verifier: &'a dyn SignatureVerifier,
}

impl<'a> TransactionValidator<'a> {
    pub fn new(config: &LedgerConfig, verifier: &'a dyn SignatureVerifier) -> Self {
        Self {
            authority: config.authority,
            tolerance: config.value_tolerance,
            verifier,
        }
    }

    /// Boolean projection of [`TransactionValidator::validate`].
    pub fn is_valid(&self, tx: &Transaction, ledger: &LedgerStore) -> EngineResult<bool> {
        Ok(self.validate(tx, ledger)?.is_valid())
    }

    /// Decide whether `tx` is admissible against `ledger`.
    pub fn validate(&self, tx: &Transaction, ledger: &LedgerStore) -> EngineResult<Verdict> {
        if tx.hash != tx.compute_hash() {
            return Ok(Rejection::HashMismatch.into());
        }

        let verdict = match tx.kind {
            TxKind::Create => self.validate_create(tx)?,
            TxKind::Pay => self.validate_pay(tx, ledger, &compute_unspent(ledger))?,
        };

        if let Verdict::Invalid(reason) = &verdict {
            tracing::debug!(
                tx = %short_hex(&tx.hash),
                kind = %tx.kind,
                %reason,
                "transaction rejected"
            );
        }
        Ok(verdict)
    }

    fn validate_create(&self, tx: &Transaction) -> EngineResult<Verdict> {
        if !tx.inputs.is_empty() {
            return Ok(Rejection::CreateHasInputs.into());
        }

        for (index, output) in tx.outputs.iter().enumerate() {
            if output.owner != self.authority {
                return Ok(Rejection::NotAuthorityOwned { output: index }.into());
            }
            if !(output.value.is_finite() && output.value > 0.0) {
                return Ok(Rejection::NonPositiveValue { output: index }.into());
            }
        }

        let Some(signature) = tx.signature.as_ref() else {
            return Ok(Rejection::MissingSignature { input: None }.into());
        };
        if !self.verifier.verify(&self.authority, &tx.raw_bytes(), signature)? {
            return Ok(Rejection::BadSignature { input: None }.into());
        }

        Ok(Verdict::Valid)
    }

    fn validate_pay(
        &self,
        tx: &Transaction,
        ledger: &LedgerStore,
        unspent: &UtxoSet,
    ) -> EngineResult<Verdict> {
        // The unspent set does not shrink while we walk the inputs, so
        // claims made by this transaction are tracked separately.
        let mut claimed: HashSet<Utxo> = HashSet::with_capacity(tx.inputs.len());
        let mut input_total: Value = 0.0;
        let end = ledger.len();

        for (index, input) in tx.inputs.iter().enumerate() {
            let Some(utxo) = unspent.resolve_where(ledger, input, end, |u| !claimed.contains(u))
            else {
                let reason = if unspent.resolve(ledger, input, end).is_some() {
                    Rejection::DuplicateInput { input: index }
                } else {
                    Rejection::UnknownOrSpentInput { input: index }
                };
                return Ok(reason.into());
            };

            let Some(source) = UtxoSet::output(ledger, &utxo) else {
                return Ok(Rejection::UnknownOrSpentInput { input: index }.into());
            };

            let (Some(signature), Some(payload)) = (input.signature.as_ref(), tx.signing_payload(index))
            else {
                return Ok(Rejection::MissingSignature { input: Some(index) }.into());
            };
            if !self.verifier.verify(&source.owner, &payload, signature)? {
                return Ok(Rejection::BadSignature { input: Some(index) }.into());
            }

            claimed.insert(utxo);
            input_total += source.value;
        }

        let mut output_total: Value = 0.0;
        for (index, output) in tx.outputs.iter().enumerate() {
            if !(output.value.is_finite() && output.value > 0.0) {
                return Ok(Rejection::NonPositiveValue { output: index }.into());
            }
            output_total += output.value;
        }

        if !values_balance(input_total, output_total, self.tolerance) {
            return Ok(Rejection::ValueMismatch {
                inputs: input_total,
                outputs: output_total,
            }
            .into());
        }

        Ok(Verdict::Valid)
    }
}

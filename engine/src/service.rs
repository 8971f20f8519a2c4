//! `LedgerService` — the lock-guarded entry point to the ledger.
//!
//! Every operation that reads or writes ledger state takes the same
//! `parking_lot::Mutex` for its full duration. An epoch's whole fixed-point
//! loop runs under one acquisition, so no query can observe a half-admitted
//! batch and no two epochs interleave their appends.

use mintledger_primitives::{HashPointer, PublicKey, Transaction, Value};
use parking_lot::Mutex;

use crate::admission::{EpochAdmission, EpochReport};
use crate::config::LedgerConfig;
use crate::error::{EngineError, EngineResult};
use crate::ledger::LedgerStore;
use crate::oracle::{Ed25519Verifier, SignatureVerifier};
use crate::utxo::{compute_unspent, UtxoSet};
use crate::validation::{TransactionValidator, Verdict};

struct LedgerState {
    config: Option<LedgerConfig>,
    ledger: LedgerStore,
    epochs: u64,
}

/// Thread-safe ledger with a single authority.
pub struct LedgerService {
    verifier: Box<dyn SignatureVerifier>,
    state: Mutex<LedgerState>,
}

impl LedgerService {
    /// Build a service with its authority configured.
    pub fn new(
        config: LedgerConfig,
        verifier: impl SignatureVerifier + 'static,
    ) -> EngineResult<Self> {
        let service = Self::unconfigured(verifier);
        service.init(config)?;
        Ok(service)
    }

    /// Build a service using Ed25519 signatures.
    pub fn with_ed25519(config: LedgerConfig) -> EngineResult<Self> {
        Self::new(config, Ed25519Verifier)
    }

    /// Build a service with no authority yet. Call [`LedgerService::init`]
    /// before the first epoch.
    pub fn unconfigured(verifier: impl SignatureVerifier + 'static) -> Self {
        Self {
            verifier: Box::new(verifier),
            state: Mutex::new(LedgerState {
                config: None,
                ledger: LedgerStore::new(),
                epochs: 0,
            }),
        }
    }

    /// Set the authority. Allowed until the first epoch has been processed.
    pub fn init(&self, config: LedgerConfig) -> EngineResult<()> {
        let mut state = self.state.lock();
        if state.epochs > 0 {
            return Err(EngineError::AuthorityLocked);
        }
        config.validate(self.verifier.as_ref())?;
        tracing::info!(
            scheme = self.verifier.scheme(),
            tolerance = config.value_tolerance,
            "ledger authority configured"
        );
        state.config = Some(config);
        Ok(())
    }

    /// Admit a batch; returns pointers to appended transactions in order.
    pub fn admit_epoch(&self, candidates: Vec<Transaction>) -> EngineResult<Vec<HashPointer>> {
        Ok(self.admit_epoch_with_report(candidates)?.accepted)
    }

    /// Admit a batch and return the full [`EpochReport`].
    pub fn admit_epoch_with_report(&self, candidates: Vec<Transaction>) -> EngineResult<EpochReport> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let config = state
            .config
            .as_ref()
            .ok_or(EngineError::AuthorityNotInitialized)?;
        let validator = TransactionValidator::new(config, self.verifier.as_ref());

        state.epochs += 1;
        let _span = tracing::debug_span!("epoch", number = state.epochs).entered();
        EpochAdmission::admit(candidates, &mut state.ledger, &validator)
    }

    /// Validate `tx` against the current ledger without admitting it.
    pub fn validate(&self, tx: &Transaction) -> EngineResult<Verdict> {
        let state = self.state.lock();
        let config = state
            .config
            .as_ref()
            .ok_or(EngineError::AuthorityNotInitialized)?;
        TransactionValidator::new(config, self.verifier.as_ref()).validate(tx, &state.ledger)
    }

    /// Boolean form of [`LedgerService::validate`].
    pub fn is_valid(&self, tx: &Transaction) -> EngineResult<bool> {
        Ok(self.validate(tx)?.is_valid())
    }

    /// Current unspent outputs, recomputed from the ledger.
    pub fn utxos(&self) -> UtxoSet {
        compute_unspent(&self.state.lock().ledger)
    }

    /// Total unspent value owned by `owner`.
    pub fn balance_of(&self, owner: &PublicKey) -> Value {
        let state = self.state.lock();
        compute_unspent(&state.ledger).total_value_for(&state.ledger, owner)
    }

    pub fn ledger_len(&self) -> usize {
        self.state.lock().ledger.len()
    }

    /// Copy of the transaction at `position`.
    pub fn transaction_at(&self, position: usize) -> Option<Transaction> {
        self.state.lock().ledger.get(position).cloned()
    }

    /// Copy of the whole ledger.
    pub fn ledger_snapshot(&self) -> LedgerStore {
        self.state.lock().ledger.clone()
    }

    /// Number of epochs processed so far.
    pub fn epochs_processed(&self) -> u64 {
        self.state.lock().epochs
    }

    /// The active configuration, if initialized.
    pub fn config(&self) -> Option<LedgerConfig> {
        self.state.lock().config.clone()
    }
}

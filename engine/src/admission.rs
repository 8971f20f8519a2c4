//! Epoch admission — the fixed-point loop that admits a batch.
//!
//! `EpochAdmission::admit` runs the batch lifecycle:
//!
//! 1. `pending` = candidates, in submission order
//! 2. For each pending transaction, validate it against the current ledger.
//!    Valid ones are appended immediately, so later items in the same pass
//!    already see their outputs. Invalid ones are carried to the next pass.
//! 3. Stop when a pass admits nothing; otherwise repeat with the carry-over.
//!
//! This resolves producer/consumer ordering inside a batch without a
//! dependency graph. It is best-effort, not maximum-cardinality: when two
//! transactions contend for one output, the one earlier in the list wins.
//! Worst case is O(n²) validations for a batch of n.
//!
//! Admission is atomic per transaction only. An oracle failure aborts the
//! loop; transactions appended before the failure stay on the ledger.

use mintledger_primitives::{types::short_hex, HashPointer, Transaction};

use crate::error::EngineResult;
use crate::ledger::LedgerStore;
use crate::validation::{TransactionValidator, Verdict};

/// Summary of one epoch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpochReport {
    /// Pointers to admitted transactions, in append order.
    pub accepted: Vec<HashPointer>,
    /// Validation passes run, including the final pass that made no progress.
    pub passes: usize,
    /// Candidates left unadmitted when the loop stopped.
    pub rejected_count: usize,
}

/// The epoch admission controller.
///
/// Holds no state of its own; the ledger is passed in by the caller, who
/// is responsible for exclusive access.
pub struct EpochAdmission;

impl EpochAdmission {
    /// Admit as many `candidates` as the fixed-point loop allows.
    pub fn admit(
        candidates: Vec<Transaction>,
        ledger: &mut LedgerStore,
        validator: &TransactionValidator<'_>,
    ) -> EngineResult<EpochReport> {
        let submitted = candidates.len();
        let mut pending = candidates;
        let mut report = EpochReport::default();

        while !pending.is_empty() {
            report.passes += 1;
            let entering = pending.len();
            let mut retry: Vec<Transaction> = Vec::with_capacity(entering);

            for tx in pending {
                match validator.validate(&tx, ledger) {
                    Ok(Verdict::Valid) => {
                        let pointer = ledger.append(tx);
                        tracing::debug!(
                            tx = %short_hex(&pointer.tx_hash),
                            position = pointer.position,
                            pass = report.passes,
                            "transaction admitted"
                        );
                        report.accepted.push(pointer);
                    }
                    Ok(Verdict::Invalid(reason)) => {
                        tracing::debug!(
                            tx = %short_hex(&tx.hash),
                            pass = report.passes,
                            %reason,
                            "transaction deferred"
                        );
                        retry.push(tx);
                    }
                    Err(err) => {
                        tracing::warn!(
                            tx = %short_hex(&tx.hash),
                            admitted = report.accepted.len(),
                            error = %err,
                            "epoch aborted by signature oracle failure"
                        );
                        return Err(err);
                    }
                }
            }

            let progressed = retry.len() < entering;
            pending = retry;
            if !progressed {
                break;
            }
        }

        report.rejected_count = pending.len();
        tracing::info!(
            submitted,
            accepted = report.accepted.len(),
            rejected = report.rejected_count,
            passes = report.passes,
            ledger_len = ledger.len(),
            "epoch processed"
        );
        Ok(report)
    }
}

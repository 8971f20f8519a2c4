//! Ledger store — the append-only sequence of accepted transactions.
//!
//! Positions are permanent: index 0 is the first transaction ever accepted
//! and nothing is renumbered or removed. A hash → positions map is kept in
//! step with appends so resolving an input does not scan the sequence.

use std::collections::HashMap;

use mintledger_primitives::{Hash, HashPointer, LedgerPosition, Transaction};

/// Append-only ordered store of admitted transactions.
#[derive(Debug, Clone, Default)]
pub struct LedgerStore {
    entries: Vec<Transaction>,
    /// Every position holding a transaction with a given hash, ascending.
    /// Identical transactions (e.g. a replayed Create) share a hash.
    positions: HashMap<Hash, Vec<LedgerPosition>>,
}

impl LedgerStore {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transaction and return its pointer.
    ///
    /// The caller is responsible for having validated it.
    pub fn append(&mut self, tx: Transaction) -> HashPointer {
        let position = self.entries.len();
        let pointer = HashPointer::new(tx.hash, position);
        self.positions.entry(tx.hash).or_default().push(position);
        self.entries.push(tx);
        pointer
    }

    /// Transaction at `position`, if any.
    pub fn get(&self, position: LedgerPosition) -> Option<&Transaction> {
        self.entries.get(position)
    }

    /// Transaction a pointer refers to, if the pointer's hash matches the
    /// transaction at its position.
    pub fn resolve(&self, pointer: &HashPointer) -> Option<&Transaction> {
        self.get(pointer.position).filter(|tx| tx.hash == pointer.tx_hash)
    }

    /// Positions holding a transaction with `hash`, in ascending order.
    pub fn positions_of(&self, hash: &Hash) -> &[LedgerPosition] {
        self.positions.get(hash).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate `(position, transaction)` in ledger order.
    pub fn iter(&self) -> impl Iterator<Item = (LedgerPosition, &Transaction)> {
        self.entries.iter().enumerate()
    }

    /// All transactions in ledger order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

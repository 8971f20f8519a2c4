//! UTXO index — the unspent-output set derived from ledger history.
//!
//! The set is a pure function of the ledger: replay every transaction in
//! order, adding each output and removing each output an input consumes.
//! Nothing is cached between calls.

use std::collections::HashSet;

use mintledger_primitives::{HashPointer, Input, LedgerPosition, Output, PublicKey, TxKind, Utxo, Value};

use crate::ledger::LedgerStore;

/// A snapshot of unspent outputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UtxoSet {
    unspent: HashSet<Utxo>,
}

impl UtxoSet {
    pub fn contains(&self, utxo: &Utxo) -> bool {
        self.unspent.contains(utxo)
    }

    pub fn len(&self) -> usize {
        self.unspent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unspent.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Utxo> {
        self.unspent.iter()
    }

    /// Unspent outputs ordered by ledger position, then output index.
    pub fn sorted(&self) -> Vec<Utxo> {
        let mut all: Vec<Utxo> = self.unspent.iter().copied().collect();
        all.sort_by_key(|u| (u.pointer.position, u.output_index));
        all
    }

    /// Find the UTXO an input claims, among ledger entries before `before`.
    ///
    /// Several positions may hold the same hash; the first whose claimed
    /// output is still unspent wins.
    pub fn resolve(
        &self,
        ledger: &LedgerStore,
        input: &Input,
        before: LedgerPosition,
    ) -> Option<Utxo> {
        self.resolve_where(ledger, input, before, |_| true)
    }

    /// Like [`UtxoSet::resolve`], skipping candidates `accept` rejects.
    pub fn resolve_where(
        &self,
        ledger: &LedgerStore,
        input: &Input,
        before: LedgerPosition,
        mut accept: impl FnMut(&Utxo) -> bool,
    ) -> Option<Utxo> {
        ledger
            .positions_of(&input.source_hash)
            .iter()
            .take_while(|&&pos| pos < before)
            .map(|&pos| Utxo::new(HashPointer::new(input.source_hash, pos), input.output_index))
            .find(|utxo| self.contains(utxo) && accept(utxo))
    }

    /// Output a UTXO refers to, read from the ledger.
    pub fn output<'a>(ledger: &'a LedgerStore, utxo: &Utxo) -> Option<&'a Output> {
        ledger.resolve(&utxo.pointer)?.output(utxo.output_index)
    }

    /// Total unspent value owned by `owner`, summed in ledger order.
    pub fn total_value_for(&self, ledger: &LedgerStore, owner: &PublicKey) -> Value {
        self.sorted()
            .iter()
            .filter_map(|utxo| Self::output(ledger, utxo))
            .filter(|output| &output.owner == owner)
            .map(|output| output.value)
            .sum()
    }

    fn insert(&mut self, utxo: Utxo) {
        self.unspent.insert(utxo);
    }

    fn remove(&mut self, utxo: &Utxo) {
        self.unspent.remove(utxo);
    }
}

/// Replay the ledger and return the current unspent set.
pub fn compute_unspent(ledger: &LedgerStore) -> UtxoSet {
    let mut set = UtxoSet::default();

    for (position, tx) in ledger.iter() {
        if tx.kind == TxKind::Pay {
            for input in &tx.inputs {
                if let Some(spent) = set.resolve(ledger, input, position) {
                    set.remove(&spent);
                }
            }
        }

        let pointer = HashPointer::new(tx.hash, position);
        for index in 0..tx.outputs.len() {
            set.insert(Utxo::new(pointer, index as u32));
        }
    }

    set
}

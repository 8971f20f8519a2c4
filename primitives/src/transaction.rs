//! Value records: outputs, inputs, transactions, and the pointers that
//! identify unspent outputs on the ledger.
//!
//! A [`Transaction`] is built by a client, signed, and then `finalize`d,
//! which fixes its content hash. Once admitted to the ledger it is never
//! mutated.

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::crypto::{hash_sha256, sign_ed25519};
use crate::types::{Hash, LedgerPosition, OutputIndex, PublicKey, Signature, Value, ZERO_HASH};

/// Transaction kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TxKind {
    /// Mints new value to the authority. Signed once at transaction level.
    Create = 0x01,
    /// Transfers existing value. Each input carries its own signature.
    Pay = 0x02,
}

impl TxKind {
    /// Convert from the wire tag.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0x01 => Some(Self::Create),
            0x02 => Some(Self::Pay),
            _ => None,
        }
    }
}

impl core::fmt::Display for TxKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Pay => write!(f, "pay"),
        }
    }
}

/// An amount of value locked to an owner key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Output {
    /// Key that must sign to spend this output.
    pub owner: PublicKey,
    /// Amount carried.
    pub value: Value,
}

impl Output {
    pub fn new(owner: PublicKey, value: Value) -> Self {
        Self { owner, value }
    }
}

/// A claim on one output of an earlier transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Input {
    /// Hash of the transaction that created the claimed output.
    pub source_hash: Hash,
    /// Index of the claimed output within that transaction.
    pub output_index: OutputIndex,
    /// Owner's signature over [`Transaction::signing_payload`] for this input.
    pub signature: Option<Signature>,
}

impl Input {
    /// Unsigned input claiming `source_hash[output_index]`.
    pub fn new(source_hash: Hash, output_index: OutputIndex) -> Self {
        Self {
            source_hash,
            output_index,
            signature: None,
        }
    }
}

/// A ledger transaction.
///
/// Not serde-serializable: signatures are 64-byte arrays and the transport
/// form is the canonical encoding in [`crate::codec`].
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub kind: TxKind,
    pub inputs: Vec<Input>,
    pub outputs: Vec<Output>,
    /// Authority signature over [`Transaction::raw_bytes`]. Create only.
    pub signature: Option<Signature>,
    /// Content hash; valid after [`Transaction::finalize`].
    pub hash: Hash,
}

impl Transaction {
    /// Empty Create transaction.
    pub fn create() -> Self {
        Self::empty(TxKind::Create)
    }

    /// Empty Pay transaction.
    pub fn pay() -> Self {
        Self::empty(TxKind::Pay)
    }

    fn empty(kind: TxKind) -> Self {
        Self {
            kind,
            inputs: Vec::new(),
            outputs: Vec::new(),
            signature: None,
            hash: ZERO_HASH,
        }
    }

    /// Append an unsigned input.
    pub fn add_input(&mut self, source_hash: Hash, output_index: OutputIndex) -> &mut Self {
        self.inputs.push(Input::new(source_hash, output_index));
        self
    }

    /// Append an output.
    pub fn add_output(&mut self, owner: PublicKey, value: Value) -> &mut Self {
        self.outputs.push(Output::new(owner, value));
        self
    }

    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    pub fn output(&self, index: OutputIndex) -> Option<&Output> {
        self.outputs.get(index as usize)
    }

    /// Sum of all output values.
    pub fn output_total(&self) -> Value {
        self.outputs.iter().map(|o| o.value).sum()
    }

    /// Bytes covered by the authority signature of a Create.
    ///
    /// Everything except the transaction-level signature itself.
    pub fn raw_bytes(&self) -> Vec<u8> {
        codec::encode_raw(self)
    }

    /// Bytes the owner of the output claimed by input `index` signs.
    ///
    /// Binds the claimed outpoint to the full list of outputs. Returns `None`
    /// if `index` is out of range.
    pub fn signing_payload(&self, index: usize) -> Option<Vec<u8>> {
        let input = self.inputs.get(index)?;
        Some(codec::encode_signing_payload(input, &self.outputs))
    }

    /// Recompute the content hash over the full canonical encoding.
    pub fn compute_hash(&self) -> Hash {
        hash_sha256(&codec::encode_transaction(self))
    }

    /// Fix the content hash. Call after all signatures are attached.
    pub fn finalize(&mut self) -> &mut Self {
        self.hash = self.compute_hash();
        self
    }

    /// Sign the Create with the authority key.
    pub fn sign_create(&mut self, authority: &ed25519_dalek::SigningKey) -> &mut Self {
        let sig = sign_ed25519(&self.raw_bytes(), authority);
        self.signature = Some(sig);
        self
    }

    /// Sign input `index` with the key owning the claimed output.
    ///
    /// No-op if `index` is out of range.
    pub fn sign_input(&mut self, index: usize, owner: &ed25519_dalek::SigningKey) -> &mut Self {
        if let Some(payload) = self.signing_payload(index) {
            let sig = sign_ed25519(&payload, owner);
            self.inputs[index].signature = Some(sig);
        }
        self
    }
}

/// Content hash paired with the ledger position holding that transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HashPointer {
    pub tx_hash: Hash,
    pub position: LedgerPosition,
}

impl HashPointer {
    pub fn new(tx_hash: Hash, position: LedgerPosition) -> Self {
        Self { tx_hash, position }
    }
}

/// An unspent output: the defining transaction plus the output's index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Utxo {
    pub pointer: HashPointer,
    pub output_index: OutputIndex,
}

impl Utxo {
    pub fn new(pointer: HashPointer, output_index: OutputIndex) -> Self {
        Self {
            pointer,
            output_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{deterministic_keypair, verify_ed25519};

    fn signed_create(value: Value) -> Transaction {
        let (vk, sk) = deterministic_keypair(1);
        let mut tx = Transaction::create();
        tx.add_output(*vk.as_bytes(), value);
        tx.sign_create(&sk).finalize();
        tx
    }

    #[test]
    fn test_kind_tag_roundtrip() {
        assert_eq!(TxKind::from_u8(TxKind::Create as u8), Some(TxKind::Create));
        assert_eq!(TxKind::from_u8(TxKind::Pay as u8), Some(TxKind::Pay));
        assert_eq!(TxKind::from_u8(0), None);
    }

    #[test]
    fn test_finalize_sets_hash() {
        let tx = signed_create(10.0);
        assert_ne!(tx.hash, ZERO_HASH);
        assert_eq!(tx.hash, tx.compute_hash());
    }

    #[test]
    fn test_hash_covers_signature() {
        let mut tx = signed_create(10.0);
        let before = tx.hash;
        tx.signature = Some([9u8; 64]);
        assert_ne!(tx.compute_hash(), before);
    }

    #[test]
    fn test_raw_bytes_exclude_create_signature() {
        let mut tx = signed_create(10.0);
        let raw = tx.raw_bytes();
        tx.signature = None;
        assert_eq!(tx.raw_bytes(), raw);
    }

    #[test]
    fn test_create_signature_verifies_over_raw_bytes() {
        let (vk, _) = deterministic_keypair(1);
        let tx = signed_create(5.0);
        let sig = tx.signature.unwrap();
        assert!(verify_ed25519(&tx.raw_bytes(), &sig, vk.as_bytes()));
    }

    #[test]
    fn test_signing_payload_differs_per_input() {
        let mut tx = Transaction::pay();
        tx.add_input([1u8; 32], 0).add_input([1u8; 32], 1);
        tx.add_output([2u8; 32], 3.0);
        assert_ne!(tx.signing_payload(0), tx.signing_payload(1));
        assert!(tx.signing_payload(2).is_none());
    }

    #[test]
    fn test_sign_input_verifies() {
        let (vk, sk) = deterministic_keypair(4);
        let mut tx = Transaction::pay();
        tx.add_input([1u8; 32], 0).add_output([2u8; 32], 3.0);
        tx.sign_input(0, &sk).finalize();

        let payload = tx.signing_payload(0).unwrap();
        let sig = tx.inputs[0].signature.unwrap();
        assert!(verify_ed25519(&payload, &sig, vk.as_bytes()));
    }

    #[test]
    fn test_sign_input_out_of_range_is_noop() {
        let (_, sk) = deterministic_keypair(4);
        let mut tx = Transaction::pay();
        tx.add_output([2u8; 32], 3.0);
        let before = tx.clone();
        tx.sign_input(3, &sk);
        assert_eq!(tx, before);
    }

    #[test]
    fn test_output_total() {
        let mut tx = Transaction::pay();
        tx.add_output([2u8; 32], 3.5).add_output([3u8; 32], 1.5);
        assert_eq!(tx.output_total(), 5.0);
        assert_eq!(tx.output(1).map(|o| o.value), Some(1.5));
        assert!(tx.output(2).is_none());
    }

    #[test]
    fn test_utxo_equality_uses_both_fields() {
        let p = HashPointer::new([1u8; 32], 0);
        assert_eq!(Utxo::new(p, 0), Utxo::new(p, 0));
        assert_ne!(Utxo::new(p, 0), Utxo::new(p, 1));
        assert_ne!(Utxo::new(p, 0), Utxo::new(HashPointer::new([1u8; 32], 1), 0));
    }
}

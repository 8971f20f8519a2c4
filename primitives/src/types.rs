//! Core type aliases and constants for the Mintledger ledger.
//!
//! These types are shared by the value records, the canonical codec, and
//! the admission engine.

/// 32-byte SHA-256 digest identifying a transaction.
pub type Hash = [u8; 32];

/// 32-byte Ed25519 public key identifying the owner of an output.
pub type PublicKey = [u8; 32];

/// 64-byte Ed25519 signature.
pub type Signature = [u8; 64];

/// Amount carried by an output. Values are positive reals.
pub type Value = f64;

/// Position of a transaction in the ledger sequence. Index 0 is the first
/// transaction ever accepted.
pub type LedgerPosition = usize;

/// Index of an output inside its defining transaction.
pub type OutputIndex = u32;

/// Maximum allowed difference between the input and output sums of a Pay.
pub const VALUE_TOLERANCE: Value = 1e-6;

/// A zero-valued hash (32 zero bytes).
pub const ZERO_HASH: Hash = [0u8; 32];

/// Convert a `Hash` to a hex string for display purposes.
pub fn hash_to_hex(hash: &Hash) -> String {
    let mut s = String::with_capacity(66);
    s.push_str("0x");
    for byte in hash {
        use core::fmt::Write;
        let _ = write!(s, "{:02x}", byte);
    }
    s
}

/// Short hex prefix of a hash, used in log fields.
pub fn short_hex(hash: &Hash) -> String {
    let full = hash_to_hex(hash);
    full[..14].to_string()
}

/// Returns true if two values differ by less than `tolerance`.
///
/// NaN on either side never balances.
pub fn values_balance(a: Value, b: Value, tolerance: Value) -> bool {
    (a - b).abs() < tolerance
}

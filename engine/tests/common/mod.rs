//! Shared test helpers for integration tests.
//!
//! Provides deterministic keypairs and transaction builders used across
//! all integration test files.

#![allow(dead_code)]

use ed25519_dalek::SigningKey;
use mintledger_engine::{LedgerConfig, LedgerService};
use mintledger_primitives::{crypto::deterministic_keypair, PublicKey, Transaction};

// ── Deterministic Keypairs ──

/// The minting authority: seed=1.
pub fn scrooge() -> SigningKey {
    deterministic_keypair(1).1
}

/// Alice: seed=2.
pub fn alice() -> SigningKey {
    deterministic_keypair(2).1
}

/// Bob: seed=3.
pub fn bob() -> SigningKey {
    deterministic_keypair(3).1
}

/// Charlie: seed=4.
pub fn charlie() -> SigningKey {
    deterministic_keypair(4).1
}

pub fn pk(sk: &SigningKey) -> PublicKey {
    *sk.verifying_key().as_bytes()
}

// ── Transaction Builders ──

/// Create minting one output per value to the authority, signed by `signer`.
pub fn mint_signed_by(signer: &SigningKey, owners: &[(PublicKey, f64)]) -> Transaction {
    let mut tx = Transaction::create();
    for (owner, value) in owners {
        tx.add_output(*owner, *value);
    }
    tx.sign_create(signer).finalize();
    tx
}

/// Properly signed Create minting `values` to the authority.
pub fn mint(values: &[f64]) -> Transaction {
    let authority = pk(&scrooge());
    let owners: Vec<_> = values.iter().map(|v| (authority, *v)).collect();
    mint_signed_by(&scrooge(), &owners)
}

/// Pay spending `claims` (source tx, output index, owner key) to `outputs`.
pub fn pay(claims: &[(&Transaction, u32, &SigningKey)], outputs: &[(PublicKey, f64)]) -> Transaction {
    let mut tx = Transaction::pay();
    for (source, index, _) in claims {
        tx.add_input(source.hash, *index);
    }
    for (to, value) in outputs {
        tx.add_output(*to, *value);
    }
    for (i, (_, _, owner)) in claims.iter().enumerate() {
        tx.sign_input(i, owner);
    }
    tx.finalize();
    tx
}

// ── Service Factory ──

pub fn authority_config() -> LedgerConfig {
    LedgerConfig::new(pk(&scrooge()))
}

pub fn service() -> LedgerService {
    LedgerService::with_ed25519(authority_config()).expect("valid config")
}

//! Cryptographic operations for the Mintledger ledger.
//!
//! - Ed25519 for output ownership and authority signatures
//! - SHA-256 for transaction hashing
//!
//! Verification is deterministic with no randomization.

use crate::error::CryptoError;
use crate::types::{Hash, PublicKey, Signature};

/// Compute SHA-256 hash of the input data.
pub fn hash_sha256(data: &[u8]) -> Hash {
    use sha2::Digest;
    let result = sha2::Sha256::digest(data);
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// Verify an Ed25519 signature.
///
/// Returns `true` if the signature is valid for the given message and
/// public key, `false` otherwise. A public key that does not decode to a
/// curve point also yields `false`.
pub fn verify_ed25519(message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
    use ed25519_dalek::{Verifier, VerifyingKey};

    let Ok(verifying_key) = VerifyingKey::from_bytes(public_key) else {
        return false;
    };
    let sig = ed25519_dalek::Signature::from_bytes(signature);
    verifying_key.verify(message, &sig).is_ok()
}

/// Check that `public_key` decodes to a usable Ed25519 verifying key.
///
/// Used when a key arrives as configuration rather than as transaction data.
pub fn check_public_key(public_key: &PublicKey) -> Result<(), CryptoError> {
    ed25519_dalek::VerifyingKey::from_bytes(public_key)
        .map(|_| ())
        .map_err(|e| CryptoError::MalformedKey(e.to_string()))
}

/// Sign a message with an Ed25519 private key.
pub fn sign_ed25519(message: &[u8], secret_key: &ed25519_dalek::SigningKey) -> Signature {
    use ed25519_dalek::Signer;
    let sig = secret_key.sign(message);
    sig.to_bytes()
}

/// Generate an Ed25519 keypair from OS randomness.
pub fn generate_keypair() -> (ed25519_dalek::VerifyingKey, ed25519_dalek::SigningKey) {
    use ed25519_dalek::SigningKey;
    let mut rng = rand::rngs::OsRng;
    let signing_key = SigningKey::generate(&mut rng);
    let verifying_key = signing_key.verifying_key();
    (verifying_key, signing_key)
}

/// Derive a reproducible keypair from a single seed byte.
///
/// The secret key is `[seed; 32]`. Intended for tests and fixtures only.
pub fn deterministic_keypair(seed: u8) -> (ed25519_dalek::VerifyingKey, ed25519_dalek::SigningKey) {
    let signing_key = ed25519_dalek::SigningKey::from_bytes(&[seed; 32]);
    let verifying_key = signing_key.verifying_key();
    (verifying_key, signing_key)
}

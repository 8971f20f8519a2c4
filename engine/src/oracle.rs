//! Signature oracle — the seam between the engine and the signature scheme.
//!
//! The engine never calls a signature library directly. It asks a
//! [`SignatureVerifier`], which answers `Ok(true)` / `Ok(false)` for a
//! signature check, or `Err` when the mechanism itself is broken.
//!
//! - In production: [`Ed25519Verifier`]
//! - In tests: any stub implementing the trait

use mintledger_primitives::{crypto, CryptoError, PublicKey, Signature};

/// Verifies signatures on behalf of the validator.
///
/// Implementations must be deterministic and side-effect free.
pub trait SignatureVerifier: Send + Sync {
    /// Check `signature` over `message` against `public_key`.
    ///
    /// Returns `Ok(false)` for any signature or key that simply does not
    /// verify, including a key that does not decode. `Err` is reserved for
    /// failures of the mechanism itself.
    fn verify(
        &self,
        public_key: &PublicKey,
        message: &[u8],
        signature: &Signature,
    ) -> Result<bool, CryptoError>;

    /// Check that a key supplied as configuration is usable by this scheme.
    fn check_key(&self, public_key: &PublicKey) -> Result<(), CryptoError>;

    /// Scheme name, for logs.
    fn scheme(&self) -> &'static str;
}

/// Ed25519 verification backed by `ed25519-dalek`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(
        &self,
        public_key: &PublicKey,
        message: &[u8],
        signature: &Signature,
    ) -> Result<bool, CryptoError> {
        Ok(crypto::verify_ed25519(message, signature, public_key))
    }

    fn check_key(&self, public_key: &PublicKey) -> Result<(), CryptoError> {
        crypto::check_public_key(public_key)
    }

    fn scheme(&self) -> &'static str {
        "ed25519"
    }
}

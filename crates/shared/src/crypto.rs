//! Cryptographic utilities for secret generation and content hashing.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Number of random bytes behind a generated secret (hex encoded to 64 chars).
pub const SECRET_BYTES: usize = 32;

/// Computes SHA-256 of the input and returns it as a hex string.
pub fn sha256_hex(input: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input);
    hex::encode(hasher.finalize())
}

/// Generates a random hex-encoded secret for `JWT_SECRET_KEY` or `ENCRYPTION_KEY`.
pub fn generate_secret() -> String {
    let mut bytes = [0u8; SECRET_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

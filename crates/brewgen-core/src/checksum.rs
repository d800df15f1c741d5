//! SHA-256 digest of a downloaded archive.

use sha2::{Digest, Sha256};

/// Compute SHA-256 of `bytes` and return the digest as lowercase hex.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

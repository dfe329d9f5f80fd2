//! Hash utilities

use sha2::{Digest, Sha256};

/// SHA-256 digest of `data` as lowercase hex.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Compare a plaintext credential against a stored SHA-256 digest.
///
/// The comparison is done as lowercase hex; the stored side is normalized so
/// an upper-cased digest in the configuration still matches.
pub fn credential_matches(credential: &str, stored_hex: &str) -> bool {
    sha256_hex(credential.as_bytes()) == stored_hex.to_ascii_lowercase()
}

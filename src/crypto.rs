use sha2::{Digest, Sha256};

/// Compute SHA-256 hash of byte data as lowercase hex
pub fn compute_sha256_from_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

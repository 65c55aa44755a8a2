pub mod direct;
pub mod github;
pub mod http;

use crate::crypto::compute_sha256_from_bytes;
use crate::models::FinalFile;

/// Binary resolved by a provider, ready to be written to disk
#[derive(Debug)]
pub struct Fetched {
    pub file: FinalFile,
    /// File name with platform and version decoration removed
    pub clean_name: String,
    pub version: String,
    pub sha256: String,
}

impl Fetched {
    pub fn new(file: FinalFile, clean_name: String, version: String) -> Self {
        let sha256 = compute_sha256_from_bytes(&file.source);
        Self {
            file,
            clean_name,
            version,
            sha256,
        }
    }
}

use crate::archive::{ArchiveKind, size_mismatch};
use crate::error::ResolveError;
use std::collections::BTreeMap;
use std::io::Read;
use tar::Archive;

/// Read every regular file of a TAR archive into memory, keyed by entry path
pub fn read_entries(data: &[u8]) -> Result<BTreeMap<String, Vec<u8>>, ResolveError> {
    let archive_err = |source: std::io::Error| ResolveError::Archive {
        kind: ArchiveKind::Tar,
        source,
    };

    let mut archive = Archive::new(data);
    let mut files = BTreeMap::new();

    for entry in archive.entries().map_err(archive_err)? {
        let mut entry = entry.map_err(archive_err)?;

        // Directories, links and special files are never the binary
        if !entry.header().entry_type().is_file() {
            continue;
        }

        let path = entry
            .path()
            .map_err(archive_err)?
            .to_string_lossy()
            .into_owned();

        // Header sizes are untrusted, never preallocate from them
        let declared = entry.size();
        let mut contents = Vec::new();
        entry.read_to_end(&mut contents).map_err(archive_err)?;
        if contents.len() as u64 != declared {
            return Err(archive_err(size_mismatch(&path, declared, contents.len())));
        }
        files.insert(path, contents);
    }

    Ok(files)
}

use crate::archive::{ArchiveKind, size_mismatch};
use crate::error::ResolveError;
use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Read every file of a ZIP archive into memory, keyed by entry path
pub fn read_entries(data: &[u8]) -> Result<BTreeMap<String, Vec<u8>>, ResolveError> {
    let mut archive = ZipArchive::new(Cursor::new(data))?;
    let mut files = BTreeMap::new();

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if file.is_dir() {
            continue;
        }

        let name = file.name().to_string();
        // Central directory sizes are untrusted, never preallocate from them
        let declared = file.size();
        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;
        if contents.len() as u64 != declared {
            return Err(ResolveError::Archive {
                kind: ArchiveKind::Zip,
                source: size_mismatch(&name, declared, contents.len()),
            });
        }
        files.insert(name, contents);
    }

    Ok(files)
}

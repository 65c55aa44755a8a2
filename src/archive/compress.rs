use crate::archive::ArchiveKind;
use crate::error::ResolveError;
use bzip2::read::BzDecoder;
use flate2::read::MultiGzDecoder;
use std::io::Read;
use xz2::read::XzDecoder;

/// Decompressed payload of a single-stream container
#[derive(Debug)]
pub struct Decompressed {
    pub data: Vec<u8>,
    /// File name stored in the container header, if any
    pub embedded_name: Option<String>,
}

/// Decompress a gzip stream (all members), keeping the original file name from its header
pub fn gunzip(data: &[u8]) -> Result<Decompressed, ResolveError> {
    let mut decoder = MultiGzDecoder::new(data);
    let out = read_all(&mut decoder, ArchiveKind::Gzip)?;

    let embedded_name = decoder
        .header()
        .and_then(|h| h.filename())
        .map(|f| String::from_utf8_lossy(f).into_owned())
        .filter(|f| !f.is_empty());

    Ok(Decompressed {
        data: out,
        embedded_name,
    })
}

pub fn bunzip2(data: &[u8]) -> Result<Decompressed, ResolveError> {
    let mut decoder = BzDecoder::new(data);
    Ok(Decompressed {
        data: read_all(&mut decoder, ArchiveKind::Bzip2)?,
        embedded_name: None,
    })
}

pub fn unxz(data: &[u8]) -> Result<Decompressed, ResolveError> {
    let mut decoder = XzDecoder::new(data);
    Ok(Decompressed {
        data: read_all(&mut decoder, ArchiveKind::Xz)?,
        embedded_name: None,
    })
}

fn read_all<R: Read>(reader: &mut R, kind: ArchiveKind) -> Result<Vec<u8>, ResolveError> {
    let mut out = Vec::new();
    reader
        .read_to_end(&mut out)
        .map_err(|source| ResolveError::Archive { kind, source })?;
    Ok(out)
}

/// Name a decompressed file inherits from its compressed one
///
/// e.g. "tool.tar.gz" -> "tool.tar", "tool.tgz" -> "tool.tar", "tool.xz" -> "tool"
pub fn strip_compression_suffix(name: &str, kind: ArchiveKind) -> String {
    let suffixes: &[(&str, &str)] = match kind {
        ArchiveKind::Gzip => &[(".tgz", ".tar"), (".gz", "")],
        ArchiveKind::Bzip2 => &[(".tbz2", ".tar"), (".tbz", ".tar"), (".bz2", "")],
        ArchiveKind::Xz => &[(".txz", ".tar"), (".xz", "")],
        ArchiveKind::Tar | ArchiveKind::Zip => &[],
    };

    let lower = name.to_lowercase();
    for (suffix, replacement) in suffixes {
        if lower.ends_with(suffix) {
            return format!("{}{replacement}", &name[..name.len() - suffix.len()]);
        }
    }
    name.to_string()
}

pub mod compress;
pub mod tar;
pub mod zip;

use std::{fmt, io};

/// Container formats that can be peeled off a download
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    Gzip,
    Tar,
    Zip,
    Bzip2,
    Xz,
}

impl fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArchiveKind::Gzip => "gzip",
            ArchiveKind::Tar => "tar",
            ArchiveKind::Zip => "zip",
            ArchiveKind::Bzip2 => "bzip2",
            ArchiveKind::Xz => "xz",
        };
        f.write_str(name)
    }
}

/// Error for an entry whose body is shorter or longer than its header claims
pub(crate) fn size_mismatch(path: &str, declared: u64, read: usize) -> io::Error {
    io::Error::new(
        io::ErrorKind::UnexpectedEof,
        format!("{path}: header declares {declared} bytes but {read} were read"),
    )
}

const TAR_MAGIC_OFFSET: usize = 257;

/// Identify a container format from its leading bytes, `None` for anything else
pub fn sniff(data: &[u8]) -> Option<ArchiveKind> {
    if data.starts_with(&[0x1f, 0x8b, 0x08]) {
        Some(ArchiveKind::Gzip)
    } else if data.starts_with(b"BZh") {
        Some(ArchiveKind::Bzip2)
    } else if data.starts_with(&[0xfd, b'7', b'z', b'X', b'Z', 0x00]) {
        Some(ArchiveKind::Xz)
    } else if is_zip(data) {
        Some(ArchiveKind::Zip)
    } else if data.get(TAR_MAGIC_OFFSET..TAR_MAGIC_OFFSET + 5) == Some(&b"ustar"[..]) {
        Some(ArchiveKind::Tar)
    } else {
        None
    }
}

// Local file header, empty archive and spanned archive signatures
fn is_zip(data: &[u8]) -> bool {
    matches!(
        data,
        [b'P', b'K', 0x03, 0x04, ..] | [b'P', b'K', 0x05, 0x06, ..] | [b'P', b'K', 0x07, 0x08, ..]
    )
}

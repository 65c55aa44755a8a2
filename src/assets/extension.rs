use std::path::Path;

/// Extensions of file types with a known signature, grouped by what we do with them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KnownType {
    /// Installers and signatures, never the binary itself
    Rejected,
    /// Containers we can peel and plain executables
    Accepted,
    /// Anything else with a recognisable signature (images, documents, media...)
    Other,
}

const REJECTED: &[&str] = &["msi", "deb", "rpm", "asc"];

const ACCEPTED: &[&str] = &["gz", "zip", "xz", "tar", "bz2", "exe"];

const OTHER: &[&str] = &[
    // images
    "jpg", "jpx", "png", "apng", "gif", "webp", "cr2", "tif", "bmp", "jxr", "psd", "ico", "heif",
    "dwg", "avif",
    // video
    "mp4", "m4v", "mkv", "webm", "mov", "avi", "wmv", "mpg", "flv", "3gp",
    // audio
    "mid", "mp3", "m4a", "ogg", "flac", "wav", "amr", "aac", "aiff",
    // archives and binaries we do not unpack
    "epub", "rar", "7z", "zst", "pdf", "swf", "rtf", "iso", "eot", "ps", "sqlite", "nes", "crx",
    "cab", "ar", "z", "lz", "elf", "dcm",
    // documents
    "doc", "docx", "xls", "xlsx", "ppt", "pptx",
    // fonts
    "woff", "woff2", "ttf", "otf",
    // application
    "wasm", "dex", "dey",
];

fn known_type(ext: &str) -> Option<KnownType> {
    let ext = ext.to_lowercase();
    let ext = ext.as_str();
    if REJECTED.contains(&ext) {
        Some(KnownType::Rejected)
    } else if ACCEPTED.contains(&ext) {
        Some(KnownType::Accepted)
    } else if OTHER.contains(&ext) {
        Some(KnownType::Other)
    } else {
        None
    }
}

/// Check whether a release file with this name is worth downloading
///
/// Names without an extension and names whose extension is not a known file type
/// (`AppImage`, version fragments such as `1_Linux_x86_64`) are always supported.
pub fn is_supported_extension(filename: &str) -> bool {
    let Some(ext) = Path::new(filename).extension().and_then(|e| e.to_str()) else {
        return true;
    };

    match known_type(ext) {
        None | Some(KnownType::Accepted) => true,
        Some(KnownType::Rejected) | Some(KnownType::Other) => false,
    }
}

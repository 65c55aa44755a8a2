use crate::archive::ArchiveKind;
use thiserror::Error;

/// Failures while prompting the user for a choice
#[derive(Debug, Error)]
pub enum SelectError {
    #[error("no more input while waiting for a selection")]
    EndOfInput,
    #[error("failed to read selection")]
    Io(#[from] std::io::Error),
}

/// Failures while resolving a release down to a single binary
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("could not find any compatible files")]
    NoCompatibleFiles,

    #[error(
        "no files found in {kind} archive, use --package-path to pick a file (package path: {package_path:?})"
    )]
    EmptyArchive {
        kind: ArchiveKind,
        package_path: String,
    },

    #[error("{status} response when downloading {url}")]
    HttpStatus { status: u16, url: String },

    #[error("failed to download {url}")]
    Transport {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("failed to read {kind} archive")]
    Archive {
        kind: ArchiveKind,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read zip archive")]
    Zip(#[from] zip::result::ZipError),

    #[error(transparent)]
    Select(#[from] SelectError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

use super::Filter;
use crate::archive::compress::{self, strip_compression_suffix};
use crate::archive::{self, ArchiveKind};
use crate::error::ResolveError;
use crate::models::{Asset, FinalFile};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::path::Path;

/// Outcome of unwrapping one container level
enum Layer {
    /// Not a container, nothing left to unwrap
    Terminal,
    Peeled {
        data: Vec<u8>,
        name: String,
        /// Entry path when the layer was a multi-file archive
        package_path: Option<String>,
    },
}

impl Filter {
    /// Unwrap `data` layer by layer until it is no longer a known container
    pub fn process_bytes(
        &mut self,
        context_name: &str,
        name: &str,
        data: Vec<u8>,
    ) -> Result<FinalFile, ResolveError> {
        let mut data = data;
        let mut name = name.to_string();
        let mut package_path = String::new();

        loop {
            match self.peel_layer(context_name, &name, &data)? {
                Layer::Terminal => {
                    return Ok(FinalFile {
                        source: data,
                        name,
                        package_path,
                    });
                }
                Layer::Peeled {
                    data: inner,
                    name: inner_name,
                    package_path: entry,
                } => {
                    data = inner;
                    name = inner_name;
                    if let Some(entry) = entry {
                        package_path = entry;
                    }
                }
            }
        }
    }

    fn peel_layer(
        &mut self,
        context_name: &str,
        name: &str,
        data: &[u8],
    ) -> Result<Layer, ResolveError> {
        let Some(kind) = archive::sniff(data) else {
            return Ok(Layer::Terminal);
        };
        debug!("Processing {name} as {kind} ({} bytes)", data.len());

        let decompressed = match kind {
            ArchiveKind::Gzip => compress::gunzip(data)?,
            ArchiveKind::Bzip2 => compress::bunzip2(data)?,
            ArchiveKind::Xz => compress::unxz(data)?,
            ArchiveKind::Tar => {
                let files = archive::tar::read_entries(data)?;
                return self.select_entry(context_name, kind, files);
            }
            ArchiveKind::Zip => {
                let files = archive::zip::read_entries(data)?;
                return self.select_entry(context_name, kind, files);
            }
        };

        // Embedded names come from the download, only their last component is kept
        let name = decompressed
            .embedded_name
            .as_deref()
            .and_then(base_name)
            .unwrap_or_else(|| strip_compression_suffix(name, kind));
        Ok(Layer::Peeled {
            data: decompressed.data,
            name,
            package_path: None,
        })
    }

    fn select_entry(
        &mut self,
        context_name: &str,
        kind: ArchiveKind,
        mut files: BTreeMap<String, Vec<u8>>,
    ) -> Result<Layer, ResolveError> {
        let pinned = self.opts.package_path.clone();
        if files.is_empty() {
            return Err(ResolveError::EmptyArchive {
                kind,
                package_path: pinned,
            });
        }

        let use_pinned = !pinned.is_empty() && !self.opts.skip_path_check;
        let candidates: Vec<Asset> = if use_pinned && files.contains_key(&pinned) {
            debug!("Using package path {pinned} from {kind} archive");
            vec![Asset::new(pinned, "")]
        } else {
            if use_pinned {
                warn!("{pinned} not found in {kind} archive, choosing among all files");
            }
            files.keys().map(|path| Asset::new(path.as_str(), "")).collect()
        };

        let choice = self.filter_assets(context_name, &candidates)?;
        let data = files
            .remove(&choice.name)
            .ok_or(ResolveError::NoCompatibleFiles)?;

        // Archives usually nest files in folders, the binary only keeps its own name
        let name = base_name(&choice.name).unwrap_or_else(|| context_name.to_string());

        Ok(Layer::Peeled {
            data,
            name,
            package_path: Some(choice.name),
        })
    }
}

/// Final normal component of an untrusted path, `None` for `..`, `/` and empty names
fn base_name(path: &str) -> Option<String> {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
}

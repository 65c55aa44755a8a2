use crate::assets::Filter;
use crate::download::Fetched;
use crate::models::Asset;
use crate::utils::get_filename_from_url;
use anyhow::{Context, Result};

const PACKAGE_EXTENSIONS: &[&str] = &["gz", "tgz", "bz2", "tbz2", "xz", "txz", "tar", "zip", "exe"];

/// Project name guessed from a download file name, e.g. "tool-linux-amd64.tar.gz" -> "tool"
pub fn context_name(filter: &Filter, filename: &str, version: &str) -> String {
    let mut stem = filename;
    while let Some((rest, ext)) = stem.rsplit_once('.') {
        if !PACKAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()) {
            break;
        }
        stem = rest;
    }
    filter.sanitize_name(stem, version)
}

/// Resolve the binary behind a direct download URL
pub fn fetch(filter: &mut Filter, url: &str, version: Option<&str>) -> Result<Fetched> {
    let filename = get_filename_from_url(url);
    let version = version.unwrap_or_default();
    let context = context_name(filter, &filename, version);

    let selected = filter.filter_assets(&context, &[Asset::new(filename, url)])?;
    let file = filter
        .process_url(&selected)
        .with_context(|| format!("Failed to resolve {url}"))?;
    let clean_name = filter.sanitize_name(&file.name, version);

    Ok(Fetched::new(file, clean_name, version.to_string()))
}

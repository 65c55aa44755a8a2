use crate::assets::Filter;
use crate::download::Fetched;
use crate::models::{Asset, GitHubRelease};
use anyhow::{Context, Result};

/// Release endpoint for a repository, latest release unless a tag is given
pub fn release_api_url(repo: &str, tag: Option<&str>) -> String {
    if let Some(tag) = tag {
        format!("https://api.github.com/repos/{repo}/releases/tags/{tag}")
    } else {
        format!("https://api.github.com/repos/{repo}/releases/latest")
    }
}

/// Fetch release metadata from the GitHub API
pub fn fetch_release(repo: &str, tag: Option<&str>, user_agent: &str) -> Result<GitHubRelease> {
    let api_url = release_api_url(repo, tag);
    log::info!("Fetching release info from: {api_url}");

    let response = ureq::get(&api_url)
        .set("User-Agent", user_agent)
        .set("Accept", "application/vnd.github+json")
        .call()
        .with_context(|| format!("Failed to fetch release info for {repo}"))?;

    if response.status() != 200 {
        return Err(anyhow::anyhow!(
            "GitHub API request failed with status: {}",
            response.status()
        ));
    }

    response
        .into_json()
        .with_context(|| "Failed to parse GitHub release JSON")
}

/// Turn release assets into download candidates, using labels as display names
pub fn release_assets(release: &GitHubRelease) -> Vec<Asset> {
    release
        .assets
        .iter()
        .map(|a| Asset {
            name: a.name.clone(),
            display_name: a.label.clone().filter(|l| !l.trim().is_empty()),
            url: a.browser_download_url.clone(),
        })
        .collect()
}

/// Size the release reports for the asset behind `url`
pub fn asset_size(release: &GitHubRelease, url: &str) -> Option<u64> {
    release
        .assets
        .iter()
        .find(|a| a.browser_download_url == url)
        .map(|a| a.size)
}

/// Repository name used to score candidates, e.g. "owner/tool" -> "tool"
pub fn repo_name(repo: &str) -> &str {
    repo.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(repo)
}

/// Resolve the binary for this platform from a GitHub release
pub fn fetch(filter: &mut Filter, repo: &str, tag: Option<&str>, user_agent: &str) -> Result<Fetched> {
    let release = fetch_release(repo, tag, user_agent)?;
    println!(
        "Found release: {} ({})",
        release.name.as_deref().unwrap_or(&release.tag_name),
        release.tag_name
    );

    let assets = release_assets(&release);
    if assets.is_empty() {
        return Err(anyhow::anyhow!(
            "Release {} of {repo} has no assets",
            release.tag_name
        ));
    }

    let selected = filter
        .filter_assets(repo_name(repo), &assets)
        .with_context(|| format!("Failed to pick an asset from {repo} {}", release.tag_name))?;
    println!("Selected asset: {}", selected.name);
    if let Some(size) = asset_size(&release, &selected.url) {
        log::info!("Downloading {} ({size} bytes)", selected.name);
    }

    let file = filter
        .process_url(&selected)
        .with_context(|| format!("Failed to resolve {}", selected.name))?;
    let clean_name = filter.sanitize_name(&file.name, &release.tag_name);

    Ok(Fetched::new(file, clean_name, release.tag_name))
}

use clap::{Args as ClapArgs, Parser, Subcommand};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Candidate file offered by a release
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Asset {
    pub name: String,
    /// Overrides `name` in prompts only
    pub display_name: Option<String>,
    pub url: String,
}

impl Asset {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            url: url.into(),
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name.as_deref().unwrap_or(&self.name))
    }
}

/// Candidate that survived scoring
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredAsset {
    /// Project name the candidates were scored against
    pub context_name: String,
    pub name: String,
    pub display_name: Option<String>,
    pub url: String,
    /// Only comparable with other candidates of the same filtering call
    pub score: i32,
    /// Headers needed to fetch `url`, filled in by the provider
    pub extra_headers: HashMap<String, String>,
}

impl fmt::Display for FilteredAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name.as_deref().unwrap_or(&self.name))
    }
}

/// Selection policy supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Offer every candidate instead of ranking them
    pub skip_scoring: bool,
    /// Ignore `package_path` and look at every archive entry again
    pub skip_path_check: bool,
    /// Archive entry picked on a previous run
    pub package_path: String,
}

/// Fully unwrapped artifact
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinalFile {
    pub source: Vec<u8>,
    pub name: String,
    /// Path of the file inside the archive it came from, empty when it was not archived
    pub package_path: String,
}

/// Command line arguments
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
    /// Configuration file (defaults to <config dir>/binpick/config.toml)
    #[arg(long, global = true, env = "BINPICK_CONFIG")]
    pub config: Option<PathBuf>,
    /// Show scoring and unpacking decisions
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Download the binary for this platform from a GitHub release
    Github {
        /// GitHub repository in format "owner/repo"
        repo: String,
        /// Release tag to download (defaults to latest)
        #[arg(short, long)]
        tag: Option<String>,
        #[command(flatten)]
        selection: SelectionArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Download a binary from a direct URL
    Fetch {
        /// Direct URL to download
        url: String,
        /// Version string stripped from the saved file name
        #[arg(long = "version-name")]
        version: Option<String>,
        #[command(flatten)]
        selection: SelectionArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show which of the given file names would be picked for this platform
    Pick {
        /// Candidate file names
        #[arg(required = true)]
        names: Vec<String>,
        /// Project name, gives a small bonus to names containing it
        #[arg(short, long, default_value = "")]
        context: String,
        /// Offer every name instead of ranking them
        #[arg(short, long)]
        all: bool,
    },
}

/// Flags controlling how candidates and archive entries are chosen
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Show all possible download options (skip scoring & filtering)
    #[arg(short, long)]
    pub all: bool,
    /// Path of the file to take from inside the downloaded archive
    #[arg(short, long = "package-path")]
    pub package_path: Option<String>,
    /// Re-evaluate every archive entry even when --package-path is set
    #[arg(long)]
    pub skip_path_check: bool,
}

/// Flags controlling where the resolved binary is written
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Directory to save the binary in (defaults to config default_dir or ".")
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Choose the saved file name interactively
    #[arg(long)]
    pub pick_name: bool,
    /// Overwrite an existing file without asking
    #[arg(short, long)]
    pub force: bool,
}

/// GitHub release information
#[derive(Debug, Deserialize)]
pub struct GitHubRelease {
    pub tag_name: String,
    pub name: Option<String>,
    pub assets: Vec<GitHubAsset>,
}

/// GitHub release asset information
#[derive(Debug, Deserialize)]
pub struct GitHubAsset {
    pub name: String,
    pub label: Option<String>,
    pub browser_download_url: String,
    pub size: u64,
}

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings read from `config.toml`
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory binaries are saved to when --output is not given
    pub default_dir: Option<PathBuf>,
    /// User-Agent sent to GitHub and download hosts
    pub user_agent: Option<String>,
    /// Skip scoring by default, as if --all was always given
    pub all: bool,
}

impl Config {
    /// Default location: <config dir>/binpick/config.toml
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("binpick").join("config.toml"))
    }

    /// Load from `path`, or from the default location when `path` is None
    ///
    /// A missing file at the default location yields the defaults; a missing
    /// file given explicitly is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("binpick/{}", env!("CARGO_PKG_VERSION")))
    }

    pub fn output_dir(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.default_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

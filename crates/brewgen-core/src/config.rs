use crate::fetch::FetchOptions;
use crate::release::{DEFAULT_URL_PATTERN, VERSION_PLACEHOLDER};
use crate::template::DEFAULT_TEMPLATE_PATH;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration loaded from `~/.config/brewgen/config.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrewgenConfig {
    /// Download URL pattern; `{version}` is replaced with the requested version.
    pub url_pattern: String,
    /// Formula template, relative paths resolve against the current directory.
    pub template_path: PathBuf,
    /// Fail on a non-2xx response instead of hashing the error body.
    pub fail_on_http_error: bool,
    /// Connect timeout in seconds (None = libcurl default).
    pub connect_timeout_secs: Option<u64>,
    /// Whole-transfer timeout in seconds (None = no limit).
    pub timeout_secs: Option<u64>,
    /// Custom User-Agent header.
    pub user_agent: Option<String>,
}

impl Default for BrewgenConfig {
    fn default() -> Self {
        Self {
            url_pattern: DEFAULT_URL_PATTERN.to_string(),
            template_path: PathBuf::from(DEFAULT_TEMPLATE_PATH),
            fail_on_http_error: false,
            connect_timeout_secs: None,
            timeout_secs: None,
            user_agent: None,
        }
    }
}

impl BrewgenConfig {
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            timeout: self.timeout_secs.map(Duration::from_secs),
            user_agent: self.user_agent.clone(),
            fail_on_http_error: self.fail_on_http_error,
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.url_pattern.contains(VERSION_PLACEHOLDER) {
            anyhow::bail!(
                "url_pattern {:?} does not contain {}",
                self.url_pattern,
                VERSION_PLACEHOLDER
            );
        }
        Ok(())
    }
}

/// Existing config file under the XDG config home, if any. Never creates directories.
pub fn config_path() -> Result<Option<PathBuf>> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("brewgen")?;
    Ok(xdg_dirs.find_config_file("config.toml"))
}

/// Load the XDG config file, or defaults when there is none.
pub fn load() -> Result<BrewgenConfig> {
    match config_path()? {
        Some(path) => load_from(&path),
        None => {
            tracing::debug!("no config file found, using defaults");
            Ok(BrewgenConfig::default())
        }
    }
}

/// Load configuration from an explicit path. A missing file is an error.
pub fn load_from(path: &Path) -> Result<BrewgenConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: BrewgenConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    cfg.validate()?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(cfg)
}

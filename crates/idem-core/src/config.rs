//! User configuration for the `idem` CLI, loaded from `~/.config/idem/config.toml`.
//!
//! The library entry points never read this implicitly; callers pass the
//! resolved values in.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::checksum::HashAlgorithm;
use crate::encoding::TextEncoding;
use crate::http::CurlTransport;
use crate::retry::RetryOverrides;
use crate::write::WriteOptions;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdemConfig {
    /// Digest used to detect unchanged files.
    #[serde(default)]
    pub algorithm: HashAlgorithm,
    /// Encoding for text passed to `idem write`.
    #[serde(default)]
    pub encoding: TextEncoding,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Per-attempt request timeout.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Optional retry overrides; missing fields use the built-in defaults.
    #[serde(default)]
    pub retry: Option<RetryOverrides>,
}

fn default_connect_timeout_secs() -> u64 {
    15
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for IdemConfig {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::default(),
            encoding: TextEncoding::default(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            retry: None,
        }
    }
}

impl IdemConfig {
    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            algorithm: self.algorithm,
            encoding: self.encoding,
        }
    }

    pub fn transport(&self) -> CurlTransport {
        CurlTransport::new(
            Duration::from_secs(self.connect_timeout_secs),
            Duration::from_secs(self.request_timeout_secs),
        )
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("idem")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<IdemConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<IdemConfig> {
    if !path.exists() {
        let default_cfg = IdemConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: IdemConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

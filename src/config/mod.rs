//! Configuration loading and management
//!
//! Configuration is read from YAML and then overlaid with environment
//! variables. Cipher key material only ever comes from one of these two
//! sources.
//!
//! ```yaml
//! cipher:
//!   key: "<32 bytes of key material>"
//!   mode: gcm
//! paging:
//!   default_page_size: 10
//!   max_page_size: 100
//!   default_sort_by: id
//! log_filter: "gettogether=debug"
//! ```

use crate::core::error::ConfigError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Overrides `cipher.key`
pub const CIPHER_KEY_ENV: &str = "GETTOGETHER_CIPHER_KEY";
/// Overrides `cipher.mode`
pub const CIPHER_MODE_ENV: &str = "GETTOGETHER_CIPHER_MODE";
/// Overrides `log_filter`
pub const LOG_FILTER_ENV: &str = "GETTOGETHER_LOG";

/// Block cipher mode used for credential fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CipherMode {
    /// AES-256-ECB with PKCS#7 padding; deterministic, readable by existing records
    #[default]
    Ecb,
    /// AES-256-GCM with a random nonce per call
    Gcm,
}

impl CipherMode {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ecb" => Ok(CipherMode::Ecb),
            "gcm" => Ok(CipherMode::Gcm),
            _ => Err(ConfigError::InvalidValue {
                field: "cipher.mode".to_string(),
                value: value.to_string(),
            }),
        }
    }
}

/// Configuration of the credential field cipher
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CipherConfig {
    /// Raw key material, 32 bytes once UTF-8 encoded
    #[serde(default)]
    pub key: Option<String>,

    #[serde(default)]
    pub mode: CipherMode,
}

impl std::fmt::Debug for CipherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherConfig")
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("mode", &self.mode)
            .finish()
    }
}

/// Defaults applied to raw paging tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagingConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,

    #[serde(default = "default_sort_by")]
    pub default_sort_by: String,
}

fn default_page_size() -> u32 {
    10
}

fn default_max_page_size() -> u32 {
    100
}

fn default_sort_by() -> String {
    "id".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            default_sort_by: default_sort_by(),
        }
    }
}

/// Complete configuration of the core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    #[serde(default)]
    pub cipher: CipherConfig,

    #[serde(default)]
    pub paging: PagingConfig,

    /// `tracing_subscriber::EnvFilter` directive
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            cipher: CipherConfig::default(),
            paging: PagingConfig::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl CoreConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path))?;
        let config = Self::from_yaml_str(&content)
            .with_context(|| format!("failed to parse config file {}", path))?;
        tracing::info!(path = %path, mode = ?config.cipher.mode, "configuration loaded");
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Overlay values from the process environment
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Overlay values from an arbitrary variable source
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(CIPHER_KEY_ENV).filter(|key| !key.is_empty()) {
            self.cipher.key = Some(key);
        }
        if let Some(mode) = lookup(CIPHER_MODE_ENV) {
            self.cipher.mode = CipherMode::parse(&mode)?;
        }
        if let Some(filter) = lookup(LOG_FILTER_ENV).filter(|filter| !filter.is_empty()) {
            self.log_filter = filter;
        }
        Ok(self)
    }
}

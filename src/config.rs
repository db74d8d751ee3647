//! Configuration loading.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag; must exist)
//! 2. `~/.trollguard/config.toml` (user)
//! 3. `/etc/trollguard/config.toml` (system)
//!
//! No file at all means built-in defaults.
//!
//! The API key is loaded separately with mandatory permission checks:
//! 1. `~/.trollguard/secrets.toml` (user, must be 0600)
//! 2. `/etc/trollguard/secrets.toml` (system, must be 0600)
//! 3. the `HF_API_KEY` environment variable

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::analyzer::{ModelConfig, ToneAnalyzerBuilder};
use crate::cache::CacheConfig;
use crate::providers::RetryConfig;
use crate::{Result, TrollGuardError};

/// Environment variable consulted when no secrets file provides a key.
pub const API_KEY_ENV_VAR: &str = "HF_API_KEY";

/// Analyzer configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub huggingface: HuggingFaceConfig,
    #[serde(default)]
    pub models: ModelConfig,
    #[serde(default)]
    pub retry: RetrySection,
    #[serde(default)]
    pub cache: CacheSection,
}

/// Inference API connection settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HuggingFaceConfig {
    /// Base URL override (default: the public serverless endpoint).
    #[serde(default)]
    pub base_url: Option<String>,
    /// Request timeout in seconds (default: 60).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    60
}

/// Retry settings for the classifier calls.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RetrySection {
    /// Attempts per call, including the first (default: 3).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay before the first retry in milliseconds (default: 500).
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    /// Upper bound on the delay in milliseconds (default: 30000).
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for RetrySection {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    30_000
}

impl From<&RetrySection> for RetryConfig {
    fn from(section: &RetrySection) -> Self {
        RetryConfig::new()
            .max_attempts(section.max_attempts)
            .initial_delay(Duration::from_millis(section.initial_delay_ms))
            .max_delay(Duration::from_millis(section.max_delay_ms))
    }
}

/// Signal cache settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CacheSection {
    /// Whether repeated texts reuse earlier signals (default: false).
    #[serde(default)]
    pub enabled: bool,
    /// Maximum cached texts (default: 1000).
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
    /// Entry lifetime in seconds (default: 3600).
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            enabled: false,
            max_entries: default_max_entries(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

fn default_max_entries() -> u64 {
    1_000
}

fn default_ttl_secs() -> u64 {
    3_600
}

impl CacheSection {
    /// The cache configuration, or `None` when caching is off.
    pub fn cache_config(&self) -> Option<CacheConfig> {
        self.enabled.then(|| {
            CacheConfig::new()
                .max_entries(self.max_entries)
                .ttl(Duration::from_secs(self.ttl_secs))
        })
    }
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided; an error if missing)
    /// 2. `~/.trollguard/config.toml`
    /// 3. `/etc/trollguard/config.toml`
    /// 4. Built-in defaults
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path),
            None => {
                debug!("no config file found, using defaults");
                Ok(Config::default())
            }
        }
    }

    /// Parse a configuration file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            TrollGuardError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            TrollGuardError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    /// Resolve the config file path.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(TrollGuardError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".trollguard").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/trollguard/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }

    /// Start an analyzer builder from this configuration.
    ///
    /// Without an API key the inference API is called anonymously, which
    /// HuggingFace rate-limits heavily.
    pub fn analyzer_builder(&self, api_key: Option<String>) -> ToneAnalyzerBuilder {
        let mut builder = ToneAnalyzerBuilder::new()
            .models(self.models.clone())
            .timeout(Duration::from_secs(self.huggingface.timeout_secs))
            .retry(RetryConfig::from(&self.retry));

        if let Some(url) = &self.huggingface.base_url {
            builder = builder.base_url(url);
        }

        if let Some(cache) = self.cache.cache_config() {
            builder = builder.signal_cache(cache);
        }

        #[cfg(feature = "huggingface")]
        {
            let key = api_key.unwrap_or_else(|| {
                warn!("no HuggingFace API key configured, sending anonymous requests");
                String::new()
            });
            builder = builder.huggingface(key);
        }
        #[cfg(not(feature = "huggingface"))]
        let _ = api_key;

        builder
    }
}

/// Secrets configuration (API keys).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Secrets {
    #[serde(default)]
    pub huggingface: Option<ApiKeySecret>,
}

/// A single API key secret.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeySecret {
    pub api_key: String,
}

impl Secrets {
    /// Load secrets from the standard locations with permission checks.
    ///
    /// Resolution order:
    /// 1. `~/.trollguard/secrets.toml` (if exists, must be 0600)
    /// 2. `/etc/trollguard/secrets.toml` (if exists, must be 0600)
    ///
    /// Returns empty secrets if no file exists (the key may come from the
    /// environment).
    pub fn load() -> Result<Self> {
        // Try user secrets first
        if let Some(home) = dirs::home_dir() {
            let user_secrets = home.join(".trollguard").join("secrets.toml");
            if user_secrets.exists() {
                return Self::load_from_file(&user_secrets);
            }
        }

        // Try system secrets
        let system_secrets = PathBuf::from("/etc/trollguard/secrets.toml");
        if system_secrets.exists() {
            return Self::load_from_file(&system_secrets);
        }

        Ok(Secrets::default())
    }

    /// Load a secrets file after checking its permissions.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        Self::check_permissions(path)?;
        let content = fs::read_to_string(path).map_err(|e| {
            TrollGuardError::Configuration(format!("Failed to read secrets file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            TrollGuardError::Configuration(format!("Failed to parse secrets file {path:?}: {e}"))
        })
    }

    /// Check that the secrets file has secure permissions (0600 or 0400).
    #[cfg(unix)]
    fn check_permissions(path: &Path) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let metadata = fs::metadata(path).map_err(|e| {
            TrollGuardError::Configuration(format!("Failed to stat secrets file {path:?}: {e}"))
        })?;

        let mode = metadata.permissions().mode();
        // Reject if group or other bits are set
        if mode & 0o077 != 0 {
            return Err(TrollGuardError::Configuration(format!(
                "Secrets file {path:?} has insecure permissions {:o}. Must be 0600 or 0400.",
                mode & 0o777
            )));
        }

        Ok(())
    }

    #[cfg(not(unix))]
    fn check_permissions(_path: &Path) -> Result<()> {
        Ok(())
    }

    /// The HuggingFace API key, falling back to `HF_API_KEY`.
    pub fn api_key(&self) -> Option<String> {
        self.huggingface
            .as_ref()
            .map(|s| s.api_key.clone())
            .filter(|key| !key.is_empty())
            .or_else(|| std::env::var(API_KEY_ENV_VAR).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.huggingface.timeout_secs, 60);
        assert_eq!(config.huggingface.base_url, None);
        assert_eq!(config.models, ModelConfig::default());
        assert_eq!(config.retry.max_attempts, 3);
        assert!(!config.cache.enabled);
    }

    #[test]
    fn parse_empty_config_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
            [huggingface]
            base_url = "http://localhost:8080"
            timeout_secs = 10

            [models]
            toxicity = "martin-ha/toxic-comment-model"

            [retry]
            max_attempts = 5
            initial_delay_ms = 100

            [cache]
            enabled = true
            ttl_secs = 60
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.huggingface.base_url.as_deref(),
            Some("http://localhost:8080")
        );
        assert_eq!(config.huggingface.timeout_secs, 10);
        assert_eq!(config.models.toxicity, "martin-ha/toxic-comment-model");
        // Unset models keep their defaults
        assert_eq!(config.models.emotion, ModelConfig::default().emotion);
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.max_delay_ms, 30_000);

        let cache = config.cache.cache_config().unwrap();
        assert_eq!(cache.ttl, Duration::from_secs(60));
        assert_eq!(cache.max_entries, 1_000);
    }

    #[test]
    fn retry_section_converts() {
        let section = RetrySection {
            max_attempts: 2,
            initial_delay_ms: 250,
            max_delay_ms: 1_000,
        };
        let retry = RetryConfig::from(&section);
        assert_eq!(retry.max_attempts, 2);
        assert_eq!(retry.initial_delay, Duration::from_millis(250));
        assert_eq!(retry.max_delay, Duration::from_secs(1));
    }

    #[test]
    fn disabled_cache_has_no_config() {
        assert!(CacheSection::default().cache_config().is_none());
    }

    #[test]
    fn parse_secrets() {
        let toml = r#"
            [huggingface]
            api_key = "hf_test_key"
        "#;
        let secrets: Secrets = toml::from_str(toml).unwrap();
        assert_eq!(secrets.api_key(), Some("hf_test_key".to_string()));
    }

    #[test]
    fn config_not_found_returns_error() {
        let result = Config::load(Some(Path::new("/nonexistent/config.toml")));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Config file not found"));
    }
}

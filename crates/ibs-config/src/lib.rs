//! Configuration management for the IBS site.
//!
//! Parses `ibs.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! The built-in defaults use the second form, so a site runs locally without
//! any file or environment while deployments override through the environment:
//!
//! | Field                 | Default                                 |
//! |-----------------------|-----------------------------------------|
//! | `content.project_id`  | `${SANITY_PROJECT_ID:-dm1tq9mh}`        |
//! | `content.dataset`     | `${SANITY_DATASET:-ibsdemo}`            |
//! | `content.api_version` | `${SANITY_API_VERSION:-2023-05-03}`     |
//! | `revalidate.secret`   | `${SANITY_REVALIDATE_SECRET:-}`         |
//!
//! `content.use_cdn` is a boolean and is overridden by `SANITY_USE_CDN`.

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

use expand::Lookup;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override render cache enabled flag.
    pub cache_enabled: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "ibs.toml";

/// Environment variable overriding `content.use_cdn`.
const USE_CDN_VAR: &str = "SANITY_USE_CDN";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Content repository configuration.
    pub content: ContentConfig,
    /// Revalidation webhook configuration.
    pub revalidate: RevalidateConfig,
    /// Render cache configuration.
    pub cache: CacheConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        }
    }
}

/// Content repository (Sanity) configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Project identifier.
    pub project_id: String,
    /// Dataset name.
    pub dataset: String,
    /// Pinned API version (`YYYY-MM-DD`).
    pub api_version: String,
    /// Query the CDN-backed API host instead of the live one.
    pub use_cdn: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            project_id: "${SANITY_PROJECT_ID:-dm1tq9mh}".to_owned(),
            dataset: "${SANITY_DATASET:-ibsdemo}".to_owned(),
            api_version: "${SANITY_API_VERSION:-2023-05-03}".to_owned(),
            use_cdn: true,
        }
    }
}

/// Revalidation webhook configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RevalidateConfig {
    /// Shared secret expected in the `x-sanity-secret` header.
    ///
    /// An empty secret rejects every webhook call.
    pub secret: String,
}

impl Default for RevalidateConfig {
    fn default() -> Self {
        Self {
            secret: "${SANITY_REVALIDATE_SECRET:-}".to_owned(),
        }
    }
}

/// Render cache configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether rendered pages are cached until revalidated.
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`revalidate.secret`").
        field: String,
        /// Error message (e.g., "${`SANITY_REVALIDATE_SECRET`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require an API version pin of the form `YYYY-MM-DD` (or the legacy `1` / `X`).
fn require_api_version(value: &str, field: &str) -> Result<(), ConfigError> {
    if value == "1" || value == "X" {
        return Ok(());
    }
    let parts: Vec<&str> = value.split('-').collect();
    let well_formed = matches!(parts.as_slice(), [y, m, d]
        if y.len() == 4 && m.len() == 2 && d.len() == 2
            && parts.iter().all(|p| p.bytes().all(|b| b.is_ascii_digit())));
    if !well_formed {
        return Err(ConfigError::Validation(format!(
            "{field} must be a date like 2023-05-03, got {value:?}"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `ibs.toml` in current directory and parents,
    /// falling back to the built-in defaults.
    ///
    /// Environment variables are expanded after parsing, then CLI settings
    /// are applied, allowing CLI arguments to take precedence over both.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// a referenced variable is unset, or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        config.expand_env_vars(&expand::process_env)?;

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(cache_enabled) = settings.cache_enabled {
            self.cache.enabled = cache_enabled;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Parse a specific file without expanding or validating it.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically by [`Config::load`] after expansion.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 is technically valid (OS assigns a random port), but it's
        // unlikely to be intentional in a config file
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        require_non_empty(&self.content.project_id, "content.project_id")?;
        require_non_empty(&self.content.dataset, "content.dataset")?;
        require_api_version(&self.content.api_version, "content.api_version")?;
        Ok(())
    }

    /// Whether the revalidation webhook can ever authenticate.
    #[must_use]
    pub fn revalidation_enabled(&self) -> bool {
        !self.revalidate.secret.is_empty()
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self, lookup: Lookup<'_>) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host", lookup)?;

        let content = &mut self.content;
        content.project_id =
            expand::expand_env(&content.project_id, "content.project_id", lookup)?;
        content.dataset = expand::expand_env(&content.dataset, "content.dataset", lookup)?;
        content.api_version =
            expand::expand_env(&content.api_version, "content.api_version", lookup)?;
        if let Some(flag) = lookup(USE_CDN_VAR) {
            content.use_cdn = expand::parse_flag(&flag, "content.use_cdn")?;
        }

        self.revalidate.secret =
            expand::expand_env(&self.revalidate.secret, "revalidate.secret", lookup)?;

        Ok(())
    }
}

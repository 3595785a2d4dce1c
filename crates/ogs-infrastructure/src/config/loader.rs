//! Configuration loader
//!
//! Handles loading configuration from various sources including
//! TOML files, environment variables, and default values.

use crate::config::AppConfig;
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::log_config_loaded;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use ogs_domain::error::{Error, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (explicit path, or the first default location found)
    /// 3. Environment variables with prefix and `__` nesting (e.g. `OGS_LOCK__TTL_SECS`)
    ///
    /// An explicit path that does not exist is an error.
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if !config_path.exists() {
                log_config_loaded(config_path, false);
                return Err(Error::configuration(format!(
                    "Configuration file not found: {}",
                    config_path.display()
                )));
            }
            figment = figment.merge(Toml::file(config_path));
            log_config_loaded(config_path, true);
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        figment = figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix)).split(CONFIG_ENV_SEPARATOR),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).io_context("Failed to write config file")?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Find the first existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(current_dir.join("config").join(DEFAULT_CONFIG_FILENAME)),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
        ];

        candidates
            .into_iter()
            .flatten()
            .find(|path| path.exists())
    }
}

/// Validate application configuration
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_redis_config(config)?;
    validate_lock_config(config)?;
    validate_cache_config(config)?;
    validate_job_config(config)?;
    crate::logging::parse_log_level(&config.logging.level)?;
    Ok(())
}

fn validate_redis_config(config: &AppConfig) -> Result<()> {
    if !config.redis.enabled {
        return Ok(());
    }
    if config.redis.host.trim().is_empty() {
        return Err(Error::configuration("Redis host cannot be empty"));
    }
    if config.redis.port == 0 {
        return Err(Error::configuration("Redis port cannot be 0"));
    }
    if config.redis.timeout_secs == 0 {
        return Err(Error::configuration("Redis timeout cannot be 0"));
    }
    Ok(())
}

fn validate_lock_config(config: &AppConfig) -> Result<()> {
    let name = &config.lock.name;
    if name.trim().is_empty() {
        return Err(Error::configuration("Lock name cannot be empty"));
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(Error::configuration(format!(
            "Lock name cannot contain path separators: {name}"
        )));
    }
    if config.lock.ttl_secs == 0 {
        return Err(Error::configuration("Lock TTL cannot be 0"));
    }
    if config.lock.ttl_secs.saturating_mul(1_000) <= config.job.work_duration_ms {
        return Err(Error::configuration(format!(
            "Lock TTL ({}s) must exceed the job duration ({}ms)",
            config.lock.ttl_secs, config.job.work_duration_ms
        )));
    }
    Ok(())
}

fn validate_cache_config(config: &AppConfig) -> Result<()> {
    if config.cache.enabled {
        if config.cache.ttl_secs == 0 {
            return Err(Error::configuration(
                "Cache TTL cannot be 0 when cache is enabled",
            ));
        }
        if config.cache.key.trim().is_empty() {
            return Err(Error::configuration(
                "Cache key cannot be empty when cache is enabled",
            ));
        }
    }
    Ok(())
}

fn validate_job_config(config: &AppConfig) -> Result<()> {
    if config.job.max_fan_out == 0 {
        return Err(Error::configuration("Maximum fan-out cannot be 0"));
    }
    if config.job.statistics_window == 0 {
        return Err(Error::configuration("Statistics window cannot be 0"));
    }
    Ok(())
}

//! Configuration loading and representation.
//!
//! Sources, lowest precedence first: built-in defaults, an optional
//! `orgguard.toml` in the working directory, then `ORGGUARD__*` environment
//! variables (after `.env` has been loaded, if present).

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

use orgguard_observability::LogConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub audit: AuditConfig,

    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuditConfig {
    /// Maximum number of entries returned by an audit-log read.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

fn default_recent_limit() -> usize {
    100
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            recent_limit: default_recent_limit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedConfig {
    #[serde(default = "default_seed_enabled")]
    pub enabled: bool,
}

fn default_seed_enabled() -> bool {
    true
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: default_seed_enabled(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_sources(
            Config::builder()
                .add_source(File::with_name("orgguard").required(false))
                .add_source(Environment::with_prefix("ORGGUARD").separator("__")),
        )
    }

    /// Build from an explicit TOML document (tests, embedded defaults).
    pub fn from_toml(document: &str) -> Result<Self, ConfigError> {
        Self::from_sources(
            Config::builder().add_source(File::from_str(document, config::FileFormat::Toml)),
        )
    }

    fn from_sources(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.audit.recent_limit == 0 {
            return Err(ConfigError::Invalid(
                "audit.recent_limit must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

// src/core/config_manager.rs
//! Unified configuration - config.yaml profile, then environment, then command line

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::utils::normalize_base_url;

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";
pub const DEFAULT_PORT: u16 = 3000;
const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigManager {
    pub environment: String,
    pub service: ServiceConfig,
    pub web: WebConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub service_url: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WebConfig {
    pub port: u16,
}

/// One profile section of config.yaml. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileConfig {
    pub service_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub port: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: ProfileConfig,
    #[serde(default)]
    production: ProfileConfig,
}

/// Values given on the command line; they win over everything else
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub service_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub port: Option<u16>,
}

impl ConfigManager {
    /// Load configuration from `config_path` (or ./config.yaml when present) and the process environment
    pub fn load(config_path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let lookup = |key: &str| std::env::var(key).ok();
        let environment = Self::get_environment(&lookup);
        info!("Loading configuration for environment: {}", environment);

        let profile = match config_path {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                Self::load_profile(path, &environment)?
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load_profile(&default_path, &environment)?
                } else {
                    ProfileConfig::default()
                }
            }
        };

        Self::from_sources(environment, profile, lookup, overrides)
    }

    /// Merge a file profile, environment variables and command-line overrides
    pub fn from_sources<F>(
        environment: String,
        profile: ProfileConfig,
        lookup: F,
        overrides: &Overrides,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut service_url = profile
            .service_url
            .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string());
        let mut timeout_seconds = profile.timeout_seconds;
        let mut port = profile.port.unwrap_or(DEFAULT_PORT);

        if let Some(url) = lookup("INSIGHTIFY_SERVICE_URL") {
            service_url = url;
        }
        if let Some(secs) = lookup("INSIGHTIFY_TIMEOUT_SECS") {
            timeout_seconds = Some(
                secs.trim()
                    .parse::<u64>()
                    .context("INSIGHTIFY_TIMEOUT_SECS must be a whole number of seconds")?,
            );
        }
        if let Some(p) = lookup("INSIGHTIFY_PORT") {
            port = p
                .trim()
                .parse::<u16>()
                .context("INSIGHTIFY_PORT must be a valid port number")?;
        }

        if let Some(url) = &overrides.service_url {
            service_url = url.clone();
        }
        if overrides.timeout_seconds.is_some() {
            timeout_seconds = overrides.timeout_seconds;
        }
        if let Some(p) = overrides.port {
            port = p;
        }

        let service_url = normalize_base_url(&service_url);
        if !(service_url.starts_with("http://") || service_url.starts_with("https://")) {
            anyhow::bail!(
                "Service URL must start with http:// or https://, got: {}",
                service_url
            );
        }

        Ok(Self {
            environment,
            service: ServiceConfig {
                service_url,
                timeout_seconds,
            },
            web: WebConfig { port },
        })
    }

    fn get_environment<F>(lookup: &F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup("INSIGHTIFY_ENV")
            .or_else(|| lookup("ENVIRONMENT"))
            .unwrap_or_else(|| "local".to_string())
    }

    fn load_profile(path: &Path, environment: &str) -> Result<ProfileConfig> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse_profile(&content, environment)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn parse_profile(content: &str, environment: &str) -> Result<ProfileConfig> {
        let config_file: ConfigFile = serde_yaml::from_str(content)?;
        Ok(match environment {
            "production" => config_file.production,
            _ => config_file.local,
        })
    }
}

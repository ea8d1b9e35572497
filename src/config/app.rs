//! Main application configuration
//!
//! This module defines the primary configuration structures for surface-elo,
//! including environment variable loading, TOML files and validation.

use crate::config::rating::RatingConfig;
use crate::ingest::PartitionMode;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingConfig,
    pub sources: SourceSettings,
}

/// Process-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Default number of leaderboard rows
    pub leaderboard_limit: usize,
}

/// Where match records come from and how they are normalized
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Static record files, replayed first
    pub historical: Vec<PathBuf>,
    /// Incrementally updated record files, appended after the historical set
    pub live: Vec<PathBuf>,
    pub partition_mode: PartitionMode,
    /// Drop exact duplicate records before replay
    pub deduplicate: bool,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            leaderboard_limit: 20,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file; environment variables still override it
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Apply `SURFACE_ELO_*` overrides read through `lookup`
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(log_level) = lookup("SURFACE_ELO_LOG_LEVEL") {
            self.service.log_level = log_level;
        }
        if let Some(limit) = lookup("SURFACE_ELO_LEADERBOARD_LIMIT") {
            self.service.leaderboard_limit = limit
                .parse()
                .map_err(|_| anyhow!("Invalid SURFACE_ELO_LEADERBOARD_LIMIT value: {}", limit))?;
        }

        if let Some(k) = lookup("SURFACE_ELO_K_FACTOR") {
            self.rating.k_factor = k
                .parse()
                .map_err(|_| anyhow!("Invalid SURFACE_ELO_K_FACTOR value: {}", k))?;
        }
        if let Some(baseline) = lookup("SURFACE_ELO_BASELINE") {
            self.rating.baseline = baseline
                .parse()
                .map_err(|_| anyhow!("Invalid SURFACE_ELO_BASELINE value: {}", baseline))?;
        }
        if let Some(partitions) = lookup("SURFACE_ELO_PARTITIONS") {
            self.rating.partitions = split_list(&partitions)
                .into_iter()
                .map(|p| p.to_lowercase())
                .collect();
        }

        if let Some(paths) = lookup("SURFACE_ELO_HISTORICAL") {
            self.sources.historical = split_list(&paths).into_iter().map(PathBuf::from).collect();
        }
        if let Some(paths) = lookup("SURFACE_ELO_LIVE") {
            self.sources.live = split_list(&paths).into_iter().map(PathBuf::from).collect();
        }
        if let Some(combined) = lookup("SURFACE_ELO_COMBINED") {
            let combined: bool = combined
                .parse()
                .map_err(|_| anyhow!("Invalid SURFACE_ELO_COMBINED value: {}", combined))?;
            self.sources.partition_mode = if combined {
                PartitionMode::Combined
            } else {
                PartitionMode::Surface
            };
        }
        if let Some(dedup) = lookup("SURFACE_ELO_DEDUP") {
            self.sources.deduplicate = dedup
                .parse()
                .map_err(|_| anyhow!("Invalid SURFACE_ELO_DEDUP value: {}", dedup))?;
        }

        Ok(())
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.leaderboard_limit == 0 {
        return Err(anyhow!("Leaderboard limit must be greater than 0"));
    }

    config.rating.validate()?;

    Ok(())
}

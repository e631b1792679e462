//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `WORKSHOP_<SECTION>__<KEY>`, e.g.
//!    `WORKSHOP_STRATEGIES__DISCOUNT=bulk`
//! 3. Config file (`--config`, else the platform config dir)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use workshop_adapters::BuiltinOptions;
use workshop_core::application::{ResolutionPolicy, StrategySelection};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default strategy key per pipeline step.
    pub strategies: StrategySelection,
    /// How unknown strategy keys are handled.
    pub resolution: ResolutionConfig,
    /// Knobs for the built-in strategies.
    pub workshop: WorkshopConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionConfig {
    /// Reject unknown keys instead of falling back.
    pub strict: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkshopConfig {
    pub capacity_minutes: u64,
    pub bulk_min_items: usize,
    pub bulk_percent: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `human`, `plain` or `json`; used when `--output-format` is `auto`.
    pub format: String,
}

impl Default for WorkshopConfig {
    fn default() -> Self {
        let builtin = BuiltinOptions::default();
        Self {
            capacity_minutes: builtin.capacity_minutes,
            bulk_min_items: builtin.bulk_min_items,
            bulk_percent: builtin.bulk_percent,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "human".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, file and environment.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to build default configuration")?;

        let file = match config_file {
            Some(path) => File::from(path.as_path()).required(true),
            None => File::from(Self::config_path()).required(false),
        };

        let config = Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(
                Environment::with_prefix("WORKSHOP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;

        let config: Self = config
            .try_deserialize()
            .context("Invalid configuration values")?;

        debug!(?config.strategies, strict = config.resolution.strict, "Configuration loaded");
        Ok(config)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `workshop.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "workshop", "workshop")
            .map(|d| d.config_dir().join("workshop.toml"))
            .unwrap_or_else(|| Self::local_path().to_path_buf())
    }

    /// `workshop.toml` in the current directory.
    pub fn local_path() -> &'static Path {
        Path::new("workshop.toml")
    }

    /// The configured resolution policy, optionally forced strict.
    pub fn policy(&self, strict_flag: bool) -> ResolutionPolicy {
        if strict_flag || self.resolution.strict {
            ResolutionPolicy::Strict
        } else {
            ResolutionPolicy::Fallback
        }
    }

    /// Options for the built-in registries.
    pub fn builtin_options(&self, strict_flag: bool, capacity: Option<u64>) -> BuiltinOptions {
        BuiltinOptions {
            capacity_minutes: capacity.unwrap_or(self.workshop.capacity_minutes),
            bulk_min_items: self.workshop.bulk_min_items,
            bulk_percent: self.workshop.bulk_percent,
            policy: self.policy(strict_flag),
        }
    }
}

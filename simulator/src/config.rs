//! Simulator configuration with TOML file support.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use soulcheck_utils::LogFormat;
use soulcheck_verification::LivenessConfig;

/// Everything one simulator run needs.
///
/// Loaded from a TOML file via [`SimulatorConfig::from_toml_file`]; CLI flags
/// override individual fields afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Make the simulated camera refuse permission.
    #[serde(default)]
    pub deny_camera: bool,

    /// Sleep through every delay instead of jumping virtual time.
    #[serde(default)]
    pub realtime: bool,

    /// Capture attempts the wizard makes before giving up.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default)]
    pub liveness: LivenessConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_attempts() -> u32 {
    3
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            deny_camera: false,
            realtime: false,
            max_attempts: default_max_attempts(),
            liveness: LivenessConfig::default(),
        }
    }
}

impl SimulatorConfig {
    pub fn from_toml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.liveness.validate()?;
        if config.max_attempts == 0 {
            anyhow::bail!("max_attempts must be at least 1");
        }
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

//! Liveness configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use soulcheck_types::{LivenessParams, PhasePlan};

use crate::VerificationError;

/// Configuration for a liveness session.
///
/// Can be loaded from a TOML file via [`LivenessConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Missing fields take their defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LivenessConfig {
    /// Ordered poses; must not be empty.
    #[serde(default)]
    pub phases: PhasePlan,

    /// Timing constants.
    #[serde(default)]
    pub timing: LivenessParams,
}

impl LivenessConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, VerificationError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| VerificationError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, VerificationError> {
        let config: Self = toml::from_str(s).map_err(|e| VerificationError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, VerificationError> {
        toml::to_string_pretty(self).map_err(|e| VerificationError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), VerificationError> {
        self.timing.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soulcheck_types::Pose;
    use std::io::Write;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = LivenessConfig::default();
        let toml_str = config.to_toml_string().expect("should serialize");
        let parsed = LivenessConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config = LivenessConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.timing.warmup_ms, 1500);
        assert_eq!(config.timing.tick_interval_ms, 150);
        assert_eq!(config.phases.len(), 3);
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            phases = ["smile", "blink_thrice"]

            [timing]
            tick_interval_ms = 50
            progress_step = 10
        "#;
        let config = LivenessConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.timing.tick_interval_ms, 50);
        assert_eq!(config.timing.progress_step, 10);
        assert_eq!(config.timing.settle_delay_ms, 500); // default
        assert_eq!(config.phases.get(0), Some(&Pose::Smile));
        assert_eq!(config.phases.len(), 2);
    }

    #[test]
    fn empty_phase_list_is_config_error() {
        let result = LivenessConfig::from_toml_str("phases = []");
        assert!(matches!(result, Err(VerificationError::Config(_))));
    }

    #[test]
    fn invalid_timing_is_rejected() {
        let result = LivenessConfig::from_toml_str("[timing]\nprogress_step = 0");
        assert!(matches!(result, Err(VerificationError::InvalidParams(_))));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[timing]\nanalysis_ms = 1000").unwrap();
        let config = LivenessConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.timing.analysis_ms, 1000);
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = LivenessConfig::from_toml_file("/nonexistent/soulcheck.toml");
        assert!(matches!(result, Err(VerificationError::Config(_))));
    }
}

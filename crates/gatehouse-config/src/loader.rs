//! Loading and validating `GateConfig`.

use std::path::Path;

use chrono::Duration;
use tracing::debug;

use gatehouse_contracts::error::{GateError, GateResult};
use gatehouse_core::resolver::ResolverSettings;

use crate::config::GateConfig;

impl GateConfig {
    /// Parse `s` as TOML and validate it.
    ///
    /// Returns `GateError::ConfigError` if the TOML is malformed, contains
    /// unknown keys, or fails validation.
    pub fn from_toml_str(s: &str) -> GateResult<Self> {
        let config: GateConfig = toml::from_str(s).map_err(|e| GateError::ConfigError {
            reason: format!("failed to parse gate TOML: {}", e),
        })?;
        config.validate()?;
        debug!(
            gate = %config.gate.name,
            method = %config.gate.method,
            success_secs = config.cooldown.success_secs,
            error_secs = config.cooldown.error_secs,
            "gate configuration loaded"
        );
        Ok(config)
    }

    /// Read the file at `path` and parse it as gate configuration.
    pub fn from_file(path: &Path) -> GateResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| GateError::ConfigError {
            reason: format!("failed to read gate config '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Reject blank gate metadata and zero-length cooldowns.
    pub fn validate(&self) -> GateResult<()> {
        let invalid = |reason: &str| GateError::ConfigError {
            reason: reason.to_string(),
        };

        if self.gate.name.trim().is_empty() {
            return Err(invalid("gate.name must not be blank"));
        }
        if self.gate.method.trim().is_empty() {
            return Err(invalid("gate.method must not be blank"));
        }
        if self.cooldown.success_secs == 0 {
            return Err(invalid("cooldown.success_secs must be greater than zero"));
        }
        if self.cooldown.error_secs == 0 {
            return Err(invalid("cooldown.error_secs must be greater than zero"));
        }
        Ok(())
    }

    /// The resolver settings this configuration describes.
    pub fn resolver_settings(&self) -> ResolverSettings {
        ResolverSettings {
            gate_name: self.gate.name.trim().to_string(),
            method: self.gate.method.trim().to_string(),
            success_cooldown: Duration::seconds(i64::from(self.cooldown.success_secs)),
            error_cooldown: Duration::seconds(i64::from(self.cooldown.error_secs)),
        }
    }
}

//! Gate configuration schema.
//!
//! Every key is optional; an empty document yields the stock Main Gate
//! settings.
//!
//! ```toml
//! [gate]
//! name = "Main Gate"
//! method = "QR Code"
//!
//! [cooldown]
//! success_secs = 10
//! error_secs = 5
//! ```

use serde::{Deserialize, Serialize};

use gatehouse_core::resolver::{
    DEFAULT_ERROR_COOLDOWN_SECS, DEFAULT_GATE_NAME, DEFAULT_METHOD, DEFAULT_SUCCESS_COOLDOWN_SECS,
};

/// Identity of the gate stamped onto every record it produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateSection {
    pub name: String,
    pub method: String,
}

impl Default for GateSection {
    fn default() -> Self {
        Self {
            name: DEFAULT_GATE_NAME.to_string(),
            method: DEFAULT_METHOD.to_string(),
        }
    }
}

/// How long the scan guard stays shut after each kind of outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CooldownSection {
    pub success_secs: u32,
    pub error_secs: u32,
}

impl Default for CooldownSection {
    fn default() -> Self {
        Self {
            success_secs: DEFAULT_SUCCESS_COOLDOWN_SECS as u32,
            error_secs: DEFAULT_ERROR_COOLDOWN_SECS as u32,
        }
    }
}

/// The top-level structure deserialized from a gate TOML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateConfig {
    pub gate: GateSection,
    pub cooldown: CooldownSection,
}

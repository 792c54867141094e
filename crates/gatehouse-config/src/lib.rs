//! # gatehouse-config
//!
//! TOML configuration for a gate console: the gate name and method stamped
//! onto records, and the scan guard's cooldowns.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use gatehouse_config::GateConfig;
//!
//! let config = GateConfig::from_file(Path::new("config/gate.toml"))?;
//! let settings = config.resolver_settings();
//! ```

pub mod config;
pub mod loader;

pub use config::{CooldownSection, GateConfig, GateSection};

// ── Tests ─────────────────────────────────────────────────────────────────────

//! # gatehouse-core
//!
//! The gate scan resolver and its debounce guard.
//!
//! This crate provides:
//! - The collaborator traits (`GateLogStore`, `Notifier`, `Clock`)
//! - `ScanGuard`, the lock that keeps one physical scan from being recorded twice
//! - `GateScanResolver`, which turns QR payloads into Entry/Exit records
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use gatehouse_core::{GateScanResolver, ResolverSettings, clock::SystemClock};
//!
//! let resolver = GateScanResolver::new(store, notifier, Arc::new(SystemClock), ResolverSettings::default());
//! let outcome = resolver.resolve(scanned_text)?;
//! ```

pub mod clock;
pub mod guard;
pub mod resolver;
pub mod traits;

pub use guard::{GuardPhase, ScanGuard};
pub use resolver::{GateScanResolver, ResolverSettings};

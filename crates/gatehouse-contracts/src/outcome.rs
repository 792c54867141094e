//! Per-scan outcomes and operator notifications.
//!
//! `ScanOutcome` is what the resolver returns for every payload it is handed.
//! `Notification` is what it pushes to the operator-facing notifier; silent
//! outcomes (`Ignored`) produce no notification at all.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{entry::GateLogEntry, error::ScanError};

/// Why a scan was dropped without being processed.
///
/// Neither case is an error: both are normal under rapid rescanning of the
/// same card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// A previous scan is still being processed or cooling down.
    Locked,
    /// The payload is byte-identical to the last accepted one.
    Duplicate,
}

/// The result of handing one payload to the resolver.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// The scan was dropped by the guard. Nothing was parsed or recorded.
    Ignored { reason: IgnoreReason },

    /// The scan was processed and refused. Nothing was recorded.
    Rejected {
        error: ScanError,
        /// When the guard reopens.
        locked_until: DateTime<Utc>,
    },

    /// The crossing was appended to the gate log.
    Recorded {
        entry: GateLogEntry,
        /// When the guard reopens.
        locked_until: DateTime<Utc>,
    },
}

impl ScanOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, ScanOutcome::Recorded { .. })
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, ScanOutcome::Ignored { .. })
    }

    pub fn entry(&self) -> Option<&GateLogEntry> {
        match self {
            ScanOutcome::Recorded { entry, .. } => Some(entry),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A transient, operator-facing message (a toast in the gate console).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    /// The success message for a recorded crossing.
    pub fn recorded(entry: &GateLogEntry) -> Self {
        Self::success(format!(
            "{} recorded for {} ({})",
            entry.direction, entry.person_name, entry.apartment_ref
        ))
    }

    /// The error message for a rejected scan.
    pub fn rejected(error: &ScanError) -> Self {
        Self::error(error.to_string())
    }
}

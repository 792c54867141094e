//! Collaborator traits for the gate scan resolver.
//!
//! - `GateLogStore`: the append-only record of gate crossings
//! - `Notifier`: the operator-facing message sink
//! - `Clock`: the source of "now" for timestamps, pass validity and cooldowns
//!
//! The resolver owns none of these; the hosting application constructs one
//! instance of each and injects it.

use std::fmt;

use chrono::{DateTime, Utc};

use gatehouse_contracts::{
    entry::{GateLogEntry, IdentityKey},
    error::GateResult,
    outcome::Notification,
};

/// The gate log: an append-only list of crossings.
///
/// There is one owning store per process. Implementations must never modify
/// or remove an appended record.
pub trait GateLogStore: Send + Sync {
    /// Append one crossing to the log.
    fn append(&self, entry: GateLogEntry) -> GateResult<()>;

    /// Return the most recent crossing matching `key`, if any.
    ///
    /// "Most recent" is the greatest `timestamp`; among equal timestamps the
    /// record appended last wins.
    fn query_latest_by_key(&self, key: &IdentityKey) -> GateResult<Option<GateLogEntry>>;

    /// Return every crossing in append order.
    fn entries(&self) -> GateResult<Vec<GateLogEntry>>;
}

/// Receives the transient messages the gate operator sees.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// A source of wall-clock time.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

//! Chained log records and the sealed export.
//!
//! `ChainedEntry` wraps a `GateLogEntry` with its position in the log and the
//! SHA-256 hashes linking it to its predecessor. `GateLogExport` is the
//! snapshot handed out by `InMemoryGateLog::export_log()`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gatehouse_contracts::entry::GateLogEntry;

/// One crossing as stored in the hash chain.
///
/// Altering any field of `entry` invalidates `this_hash` and every later
/// `prev_hash`, which `verify_chain` detects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainedEntry {
    /// Position in the log, starting at 0. Also the recency tie-breaker.
    pub sequence: u64,

    pub entry: GateLogEntry,

    /// Hash of the previous record, or `GENESIS_HASH` for the first one.
    pub prev_hash: String,

    /// Hash over (sequence, prev_hash, canonical JSON of entry).
    pub this_hash: String,
}

impl ChainedEntry {
    /// `prev_hash` of the first record in every log: 64 hex zeros.
    pub const GENESIS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}

/// A snapshot of the whole gate log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateLogExport {
    pub gate_name: String,

    /// All records in append order.
    pub entries: Vec<ChainedEntry>,

    pub exported_at: DateTime<Utc>,

    /// `this_hash` of the last record; empty when the log is empty.
    pub terminal_hash: String,
}

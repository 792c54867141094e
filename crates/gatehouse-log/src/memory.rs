//! In-memory implementation of `GateLogStore`.
//!
//! `InMemoryGateLog` keeps every crossing in a `Vec` behind a `Mutex`, so the
//! resolver and any read-side views (statistics, filtered listings, export)
//! can share one instance across threads.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use gatehouse_contracts::{
    entry::{GateLogEntry, IdentityKey},
    error::{GateError, GateResult},
};
use gatehouse_core::{
    clock::SystemClock,
    traits::{Clock, GateLogStore},
};

use crate::{
    chain::{hash_entry, verify_chain},
    record::{ChainedEntry, GateLogExport},
};

// ── Internal mutable state ────────────────────────────────────────────────────

pub(crate) struct InMemoryState {
    /// All records, in append order.
    pub(crate) entries: Vec<ChainedEntry>,

    /// The next sequence number to assign.
    pub(crate) sequence: u64,

    /// `this_hash` of the last record, or `GENESIS_HASH` when empty.
    pub(crate) last_hash: String,
}

// ── Public store ──────────────────────────────────────────────────────────────

/// The process's single gate log: append-only and hash-chained.
pub struct InMemoryGateLog {
    gate_name: String,
    /// Stamps `exported_at` on snapshots.
    clock: Arc<dyn Clock>,
    pub(crate) state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryGateLog {
    pub fn new(gate_name: impl Into<String>) -> Self {
        Self::with_clock(gate_name, Arc::new(SystemClock))
    }

    /// A log whose exports are stamped by `clock`, normally the same clock the
    /// resolver timestamps crossings with.
    pub fn with_clock(gate_name: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        let state = InMemoryState {
            entries: Vec::new(),
            sequence: 0,
            last_hash: ChainedEntry::GENESIS_HASH.to_string(),
        };
        Self {
            gate_name: gate_name.into(),
            clock,
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Number of stored records. A poisoned lock still reports what was
    /// appended before the panic.
    pub fn len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot every record with its chain metadata.
    pub fn export_log(&self) -> GateResult<GateLogExport> {
        let state = self.lock_read()?;
        let terminal_hash = state
            .entries
            .last()
            .map(|e| e.this_hash.clone())
            .unwrap_or_default();

        Ok(GateLogExport {
            gate_name: self.gate_name.clone(),
            entries: state.entries.clone(),
            exported_at: self.clock.now(),
            terminal_hash,
        })
    }

    /// True when no stored record has been altered since it was appended.
    pub fn verify_integrity(&self) -> bool {
        match self.lock_read() {
            Ok(state) => verify_chain(&state.entries),
            Err(_) => false,
        }
    }

    fn lock_read(&self) -> GateResult<MutexGuard<'_, InMemoryState>> {
        self.state.lock().map_err(|e| GateError::StoreReadFailed {
            reason: format!("gate log lock poisoned: {}", e),
        })
    }
}

// ── GateLogStore impl ─────────────────────────────────────────────────────────

impl GateLogStore for InMemoryGateLog {
    fn append(&self, entry: GateLogEntry) -> GateResult<()> {
        let mut state = self.state.lock().map_err(|e| GateError::StoreWriteFailed {
            reason: format!("gate log lock poisoned: {}", e),
        })?;

        let prev_hash = state.last_hash.clone();
        let sequence = state.sequence;
        let this_hash = hash_entry(sequence, &entry, &prev_hash);

        debug!(sequence, entry_id = %entry.id, "appending gate log record");

        state.entries.push(ChainedEntry {
            sequence,
            entry,
            prev_hash,
            this_hash: this_hash.clone(),
        });
        state.sequence += 1;
        state.last_hash = this_hash;

        Ok(())
    }

    fn query_latest_by_key(&self, key: &IdentityKey) -> GateResult<Option<GateLogEntry>> {
        let state = self.lock_read()?;
        Ok(state
            .entries
            .iter()
            .filter(|c| key.matches(&c.entry))
            .max_by_key(|c| (c.entry.timestamp, c.sequence))
            .map(|c| c.entry.clone()))
    }

    fn entries(&self) -> GateResult<Vec<GateLogEntry>> {
        let state = self.lock_read()?;
        Ok(state.entries.iter().map(|c| c.entry.clone()).collect())
    }
}

//! Hash-chain primitives for the gate log.
//!
//! Hash input layout (bytes, in order):
//!   1. sequence as 8-byte little-endian
//!   2. prev_hash as UTF-8 bytes (64 ASCII hex chars)
//!   3. compact JSON of the entry

use sha2::{Digest, Sha256};

use gatehouse_contracts::entry::GateLogEntry;

use crate::record::ChainedEntry;

/// Compute the SHA-256 hash of one log record as lowercase hex.
///
/// # Panics
///
/// Panics if `entry` cannot be serialized to JSON, which cannot happen for
/// `GateLogEntry`: every field is a string, enum, UUID or timestamp.
pub fn hash_entry(sequence: u64, entry: &GateLogEntry, prev_hash: &str) -> String {
    let entry_json =
        serde_json::to_vec(entry).expect("GateLogEntry must always be serializable to JSON");

    let mut hasher = Sha256::new();
    hasher.update(sequence.to_le_bytes());
    hasher.update(prev_hash.as_bytes());
    hasher.update(&entry_json);

    hex::encode(hasher.finalize())
}

/// Check linkage and hash correctness of every record, in order.
///
/// Sequences must run 0, 1, 2, … without gaps. An empty chain is valid.
pub fn verify_chain(entries: &[ChainedEntry]) -> bool {
    let mut expected_prev = ChainedEntry::GENESIS_HASH.to_string();

    for (position, chained) in entries.iter().enumerate() {
        if chained.sequence != position as u64 || chained.prev_hash != expected_prev {
            return false;
        }

        let recomputed = hash_entry(chained.sequence, &chained.entry, &chained.prev_hash);
        if chained.this_hash != recomputed {
            return false;
        }

        expected_prev = chained.this_hash.clone();
    }

    true
}

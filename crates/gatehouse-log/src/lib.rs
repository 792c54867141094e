//! # gatehouse-log
//!
//! The gate log: an append-only, SHA-256 hash-chained record of every
//! crossing, plus the read-side views the gate console shows.
//!
//! ## Overview
//!
//! `InMemoryGateLog` implements [`GateLogStore`](gatehouse_core::traits::GateLogStore).
//! Each appended `GateLogEntry` is wrapped in a `ChainedEntry` that links to
//! its predecessor, so any in-memory edit to a stored record is caught by
//! `verify_integrity`. `GateStats` and `LogFilter` derive dashboard figures
//! and filtered listings from the records on demand.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use gatehouse_log::InMemoryGateLog;
//!
//! let log = Arc::new(InMemoryGateLog::new("Main Gate"));
//! // hand `log.clone()` to GateScanResolver::new(...)
//! assert!(log.verify_integrity());
//! ```

pub mod chain;
pub mod filter;
pub mod memory;
pub mod record;
pub mod stats;

pub use chain::{hash_entry, verify_chain};
pub use filter::LogFilter;
pub use memory::InMemoryGateLog;
pub use record::{ChainedEntry, GateLogExport};
pub use stats::GateStats;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use chrono::{DateTime, Duration, TimeZone, Utc};

    use gatehouse_contracts::entry::{
        Direction, EntryId, GateLogEntry, SubjectCategory, NO_VEHICLE,
    };
    use gatehouse_core::{clock::ManualClock, traits::GateLogStore};

    use super::{ChainedEntry, GateStats, InMemoryGateLog, LogFilter};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, hour, minute, 0).unwrap()
    }

    fn record(
        name: &str,
        apartment: &str,
        category: SubjectCategory,
        direction: Direction,
        timestamp: DateTime<Utc>,
    ) -> GateLogEntry {
        GateLogEntry {
            id: EntryId::new(),
            direction,
            person_name: name.to_string(),
            apartment_ref: apartment.to_string(),
            subject_category: category,
            vehicle_descriptor: NO_VEHICLE.to_string(),
            timestamp,
            gate_name: "Main Gate".to_string(),
            method: "QR Code".to_string(),
        }
    }

    fn resident(name: &str, direction: Direction, timestamp: DateTime<Utc>) -> GateLogEntry {
        record(name, "A-101", SubjectCategory::Resident, direction, timestamp)
    }

    // ── Chain ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_chain_integrity_after_appends() {
        let log = InMemoryGateLog::new("Main Gate");
        log.append(resident("John", Direction::Entry, at(9, 0))).unwrap();
        log.append(resident("John", Direction::Exit, at(10, 0))).unwrap();
        log.append(resident("Priya", Direction::Entry, at(10, 5))).unwrap();

        assert!(log.verify_integrity());
        assert_eq!(log.len(), 3);

        let export = log.export_log().unwrap();
        assert_eq!(export.gate_name, "Main Gate");
        assert_eq!(export.entries[0].prev_hash, ChainedEntry::GENESIS_HASH);
        assert_eq!(export.terminal_hash, export.entries[2].this_hash);
        for (idx, chained) in export.entries.iter().enumerate() {
            assert_eq!(chained.sequence, idx as u64);
        }
        assert!(super::verify_chain(&export.entries));
    }

    /// Rewriting a stored direction must break the chain.
    #[test]
    fn test_tamper_detection() {
        let log = InMemoryGateLog::new("Main Gate");
        log.append(resident("John", Direction::Entry, at(9, 0))).unwrap();
        log.append(resident("John", Direction::Exit, at(10, 0))).unwrap();

        {
            let mut state = log.state.lock().unwrap();
            state.entries[1].entry.direction = Direction::Entry;
        }

        assert!(!log.verify_integrity(), "edited record must fail verification");
    }

    #[test]
    fn test_empty_log() {
        let log = InMemoryGateLog::new("Main Gate");
        assert!(log.is_empty());
        assert!(log.verify_integrity());
        assert_eq!(log.export_log().unwrap().terminal_hash, "");
        assert!(super::verify_chain(&[]));
    }

    #[test]
    fn test_export_is_stamped_by_injected_clock() {
        let clock = ManualClock::new(at(9, 0));
        let log = InMemoryGateLog::with_clock("Main Gate", Arc::new(clock.clone()));
        log.append(resident("John", Direction::Entry, at(9, 0))).unwrap();

        clock.set(at(17, 30));
        assert_eq!(log.export_log().unwrap().exported_at, at(17, 30));
    }

    #[test]
    fn test_len_survives_poisoned_lock() {
        let log = InMemoryGateLog::new("Main Gate");
        log.append(resident("John", Direction::Entry, at(9, 0))).unwrap();

        let state = Arc::clone(&log.state);
        let _ = thread::spawn(move || {
            let _held = state.lock().unwrap();
            panic!("writer died while holding the gate log");
        })
        .join();

        assert!(log.state.is_poisoned());
        assert_eq!(log.len(), 1);
        assert!(!log.is_empty());
    }

    // ── Latest-by-key lookup ──────────────────────────────────────────────────

    #[test]
    fn test_latest_is_by_timestamp_not_append_order() {
        let log = InMemoryGateLog::new("Main Gate");
        log.append(resident("John", Direction::Entry, at(11, 0))).unwrap();
        log.append(resident("John", Direction::Exit, at(9, 0))).unwrap();

        let key = resident("John", Direction::Entry, at(0, 0)).identity_key();
        let latest = log.query_latest_by_key(&key).unwrap().unwrap();
        assert_eq!(latest.direction, Direction::Entry);
        assert_eq!(latest.timestamp, at(11, 0));
    }

    #[test]
    fn test_equal_timestamps_prefer_later_append() {
        let log = InMemoryGateLog::new("Main Gate");
        log.append(resident("John", Direction::Entry, at(9, 0))).unwrap();
        log.append(resident("John", Direction::Exit, at(9, 0))).unwrap();

        let key = resident("John", Direction::Entry, at(0, 0)).identity_key();
        let latest = log.query_latest_by_key(&key).unwrap().unwrap();
        assert_eq!(latest.direction, Direction::Exit);
    }

    #[test]
    fn test_latest_for_unknown_key_is_none() {
        let log = InMemoryGateLog::new("Main Gate");
        log.append(resident("John", Direction::Entry, at(9, 0))).unwrap();

        let key = resident("Priya", Direction::Entry, at(0, 0)).identity_key();
        assert!(log.query_latest_by_key(&key).unwrap().is_none());
    }

    // ── Stats ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_stats_counts_and_inside() {
        let records = vec![
            resident("John", Direction::Entry, at(8, 0)),
            resident("John", Direction::Exit, at(9, 0)),
            resident("Priya", Direction::Entry, at(9, 30)),
            record("Meera", "A-101", SubjectCategory::Guest, Direction::Entry, at(10, 0)),
            record("Ravi", "C-303", SubjectCategory::Delivery, Direction::Entry, at(10, 15)),
            record("Ravi", "C-303", SubjectCategory::Delivery, Direction::Exit, at(10, 25)),
            resident("John", Direction::Entry, at(8, 0) - Duration::days(1)),
        ];

        let stats = GateStats::compute(&records, at(0, 0).date_naive());

        assert_eq!(stats.total, 7);
        assert_eq!(stats.entries, 5);
        assert_eq!(stats.exits, 2);
        assert_eq!(stats.on_day, 6);
        assert_eq!(stats.count_for(SubjectCategory::Resident), 4);
        assert_eq!(stats.count_for(SubjectCategory::Delivery), 2);
        assert_eq!(stats.count_for(SubjectCategory::ResidentVehicle), 0);

        let inside: Vec<&str> = stats.inside.iter().map(|k| k.person_name.as_str()).collect();
        assert_eq!(inside, vec!["Meera", "Priya"]);
        assert_eq!(stats.inside_count(), 2);
    }

    // ── Filter ────────────────────────────────────────────────────────────────

    #[test]
    fn test_filter_newest_first_with_criteria() {
        let records = vec![
            resident("John", Direction::Entry, at(8, 0)),
            resident("John", Direction::Exit, at(9, 0)),
            record("Meera", "B-202", SubjectCategory::Guest, Direction::Entry, at(10, 0)),
        ];

        let all = LogFilter::default().apply(&records);
        let times: Vec<_> = all.iter().map(|r| r.timestamp).collect();
        assert_eq!(times, vec![at(10, 0), at(9, 0), at(8, 0)]);

        let exits = LogFilter { direction: Some(Direction::Exit), ..LogFilter::default() };
        assert_eq!(exits.apply(&records).len(), 1);

        let guests = LogFilter { category: Some(SubjectCategory::Guest), ..LogFilter::default() };
        assert_eq!(guests.apply(&records)[0].person_name, "Meera");

        let search = LogFilter { search: Some("b-20".to_string()), ..LogFilter::default() };
        assert_eq!(search.apply(&records).len(), 1);

        let other_day = LogFilter {
            day: Some((at(0, 0) + Duration::days(1)).date_naive()),
            ..LogFilter::default()
        };
        assert!(other_day.apply(&records).is_empty());
    }
}

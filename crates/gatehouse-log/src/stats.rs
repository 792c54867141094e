//! Dashboard figures derived from the gate log.
//!
//! Nothing here is stored: `GateStats::compute` walks the records every time
//! it is called, so the figures can never drift from the log itself.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use gatehouse_contracts::entry::{Direction, GateLogEntry, IdentityKey, SubjectCategory};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GateStats {
    pub total: usize,
    pub entries: usize,
    pub exits: usize,
    /// Records whose timestamp falls on the requested (UTC) day.
    pub on_day: usize,
    pub by_category: BTreeMap<SubjectCategory, usize>,
    /// Identities whose latest crossing is an Entry, ordered by name.
    pub inside: Vec<IdentityKey>,
}

impl GateStats {
    /// Compute statistics over `records` (in append order) for `day`.
    pub fn compute(records: &[GateLogEntry], day: NaiveDate) -> Self {
        let mut stats = GateStats {
            total: records.len(),
            ..GateStats::default()
        };
        let mut latest: HashMap<IdentityKey, (&GateLogEntry, usize)> = HashMap::new();

        for (position, record) in records.iter().enumerate() {
            match record.direction {
                Direction::Entry => stats.entries += 1,
                Direction::Exit => stats.exits += 1,
            }
            if record.timestamp.date_naive() == day {
                stats.on_day += 1;
            }
            *stats.by_category.entry(record.subject_category).or_insert(0) += 1;

            let slot = latest.entry(record.identity_key()).or_insert((record, position));
            if (record.timestamp, position) >= (slot.0.timestamp, slot.1) {
                *slot = (record, position);
            }
        }

        stats.inside = latest
            .into_iter()
            .filter(|(_, (record, _))| record.direction == Direction::Entry)
            .map(|(key, _)| key)
            .collect();
        stats.inside.sort_by(|a, b| {
            (&a.person_name, &a.apartment_ref, a.category).cmp(&(&b.person_name, &b.apartment_ref, b.category))
        });

        stats
    }

    pub fn inside_count(&self) -> usize {
        self.inside.len()
    }

    pub fn count_for(&self, category: SubjectCategory) -> usize {
        self.by_category.get(&category).copied().unwrap_or(0)
    }
}

//! Filtered, newest-first listings of the gate log.

use chrono::NaiveDate;

use gatehouse_contracts::entry::{Direction, GateLogEntry, SubjectCategory};

/// Criteria for the gate log listing. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    pub direction: Option<Direction>,
    pub category: Option<SubjectCategory>,
    /// Only records on this (UTC) day.
    pub day: Option<NaiveDate>,
    /// Case-insensitive substring of the person, apartment or vehicle.
    pub search: Option<String>,
}

impl LogFilter {
    pub fn matches(&self, record: &GateLogEntry) -> bool {
        if self.direction.is_some_and(|d| d != record.direction) {
            return false;
        }
        if self.category.is_some_and(|c| c != record.subject_category) {
            return false;
        }
        if self.day.is_some_and(|d| d != record.timestamp.date_naive()) {
            return false;
        }
        match self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(term) => {
                let term = term.to_lowercase();
                [&record.person_name, &record.apartment_ref, &record.vehicle_descriptor]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&term))
            }
            None => true,
        }
    }

    /// Matching records, newest first. Equal timestamps list the later
    /// append first.
    pub fn apply(&self, records: &[GateLogEntry]) -> Vec<GateLogEntry> {
        let mut matched: Vec<(usize, &GateLogEntry)> = records
            .iter()
            .enumerate()
            .filter(|(_, record)| self.matches(record))
            .collect();
        matched.sort_by(|(ia, a), (ib, b)| (b.timestamp, ib).cmp(&(a.timestamp, ia)));
        matched.into_iter().map(|(_, record)| record.clone()).collect()
    }
}

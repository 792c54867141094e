//! Gate log records and the identity key a crossing toggles on.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Vehicle descriptor recorded when no vehicle is involved in a crossing.
pub const NO_VEHICLE: &str = "None";

/// Unique identifier for one gate log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub uuid::Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Which way a subject crossed the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Entry,
    Exit,
}

impl Direction {
    /// The direction a new crossing takes given the latest recorded one.
    ///
    /// No history, or a latest Exit, means the subject is outside and the
    /// new crossing is an Entry. A latest Entry means the subject is inside.
    pub fn following(latest: Option<Direction>) -> Direction {
        match latest {
            None | Some(Direction::Exit) => Direction::Entry,
            Some(Direction::Entry) => Direction::Exit,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Entry => "Entry",
            Direction::Exit => "Exit",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of subject a crossing belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SubjectCategory {
    Resident,
    ResidentVehicle,
    Guest,
    Delivery,
}

impl SubjectCategory {
    pub const ALL: [SubjectCategory; 4] = [
        SubjectCategory::Resident,
        SubjectCategory::ResidentVehicle,
        SubjectCategory::Guest,
        SubjectCategory::Delivery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectCategory::Resident => "Resident",
            SubjectCategory::ResidentVehicle => "Resident Vehicle",
            SubjectCategory::Guest => "Guest",
            SubjectCategory::Delivery => "Delivery",
        }
    }
}

impl fmt::Display for SubjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded gate crossing.
///
/// Records are append-only: once written to a store they are never modified
/// or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateLogEntry {
    pub id: EntryId,
    pub direction: Direction,
    pub person_name: String,
    pub apartment_ref: String,
    pub subject_category: SubjectCategory,
    /// `"None"` without a vehicle, otherwise `"{type} ({plate})"`.
    pub vehicle_descriptor: String,
    /// The instant of the crossing. Recency comparisons use this directly.
    pub timestamp: DateTime<Utc>,
    pub gate_name: String,
    pub method: String,
}

impl GateLogEntry {
    /// The identity key this record belongs to.
    pub fn identity_key(&self) -> IdentityKey {
        let vehicle = match self.subject_category {
            SubjectCategory::ResidentVehicle => Some(self.vehicle_descriptor.clone()),
            _ => None,
        };
        IdentityKey {
            person_name: self.person_name.clone(),
            apartment_ref: self.apartment_ref.clone(),
            category: self.subject_category,
            vehicle,
        }
    }

    pub fn has_vehicle(&self) -> bool {
        self.vehicle_descriptor != NO_VEHICLE
    }

    pub fn display_date(&self) -> String {
        self.timestamp.format("%Y-%m-%d").to_string()
    }

    pub fn display_time(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

/// The identity a crossing's direction alternates on.
///
/// `vehicle` only participates for `ResidentVehicle` crossings; a resident on
/// foot and the same resident's car are tracked independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentityKey {
    pub person_name: String,
    pub apartment_ref: String,
    pub category: SubjectCategory,
    pub vehicle: Option<String>,
}

impl IdentityKey {
    pub fn matches(&self, entry: &GateLogEntry) -> bool {
        self.person_name == entry.person_name
            && self.apartment_ref == entry.apartment_ref
            && self.category == entry.subject_category
            && self
                .vehicle
                .as_ref()
                .map_or(true, |v| *v == entry.vehicle_descriptor)
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} / {}", self.person_name, self.apartment_ref, self.category)?;
        if let Some(vehicle) = &self.vehicle {
            write!(f, " / {}", vehicle)?;
        }
        Ok(())
    }
}

//! QR scan payloads.
//!
//! A scanned QR code carries a JSON object whose `type` field selects one of
//! four pass kinds. `ScanPayload::decode` is the only way raw text becomes a
//! payload, and it fails closed: malformed JSON, an unknown `type`, missing
//! or unexpected fields, wrongly typed values and blank required strings are
//! all rejected with a `ScanError`.
//!
//! The same types render the QR text issued at registration time, via
//! `ScanPayload::to_qr_string`.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::{
    entry::{IdentityKey, SubjectCategory, NO_VEHICLE},
    error::{GateError, GateResult, ScanError},
};

pub const GUEST_ENTRY: &str = "guest_entry";
pub const RESIDENT_ENTRY: &str = "resident_entry";
pub const VEHICLE_ENTRY: &str = "vehicle_entry";
pub const DELIVERY_ENTRY: &str = "delivery_entry";

/// Placeholder used in rejections when the `type` field is absent.
pub const UNKNOWN_KIND: &str = "unknown";

/// A decoded QR payload, one variant per pass kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScanPayload {
    GuestEntry(GuestPass),
    ResidentEntry(ResidentPass),
    VehicleEntry(VehiclePass),
    DeliveryEntry(DeliveryPass),
}

/// A time-boxed pass issued by a resident to a visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GuestPass {
    pub guest_name: String,
    pub host_apartment: String,
    pub host_name: String,
    #[serde(deserialize_with = "flexible_instant::deserialize")]
    pub valid_from: DateTime<Utc>,
    #[serde(deserialize_with = "flexible_instant::deserialize")]
    pub valid_until: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,
}

impl GuestPass {
    /// Build a walk-in guest pass valid over `[valid_from, valid_until)`.
    pub fn for_window(
        guest_name: impl Into<String>,
        host_apartment: impl Into<String>,
        host_name: impl Into<String>,
        valid_from: DateTime<Utc>,
        valid_until: DateTime<Utc>,
    ) -> Self {
        Self {
            guest_name: guest_name.into(),
            host_apartment: host_apartment.into(),
            host_name: host_name.into(),
            valid_from,
            valid_until,
            vehicle_type: None,
            license_plate: None,
        }
    }

    /// Build a pass valid for `hours` from `valid_from`.
    ///
    /// Returns `GateError::ConfigError` when the window end falls outside the
    /// representable date range.
    pub fn for_hours(
        guest_name: impl Into<String>,
        host_apartment: impl Into<String>,
        host_name: impl Into<String>,
        valid_from: DateTime<Utc>,
        hours: u32,
    ) -> GateResult<Self> {
        let valid_until = Duration::try_hours(i64::from(hours))
            .and_then(|span| valid_from.checked_add_signed(span))
            .ok_or_else(|| GateError::ConfigError {
                reason: format!("a {}-hour guest pass from {} ends out of range", hours, valid_from),
            })?;
        Ok(Self::for_window(guest_name, host_apartment, host_name, valid_from, valid_until))
    }

    /// Attach the vehicle the guest arrives in.
    pub fn with_vehicle(mut self, vehicle_type: impl Into<String>, license_plate: impl Into<String>) -> Self {
        self.vehicle_type = Some(vehicle_type.into());
        self.license_plate = Some(license_plate.into());
        self
    }

    /// True when `now` falls within `[valid_from, valid_until)`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.valid_from <= now && now < self.valid_until
    }
}

/// A resident's personal gate pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResidentPass {
    pub resident_name: String,
    pub apartment: String,
    /// Free-text vehicle description; `"None"` or absent when on foot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<String>,
}

/// A registered resident vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VehiclePass {
    pub resident_name: String,
    pub apartment: String,
    pub make: String,
    pub model: String,
    pub license_plate: String,
}

/// A delivery rider's drop-off pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeliveryPass {
    pub rider_name: String,
    pub apartment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

impl ScanPayload {
    /// Decode raw QR text into a payload.
    pub fn decode(raw: &str) -> Result<Self, ScanError> {
        let value: Value = serde_json::from_str(raw).map_err(|_| ScanError::InvalidFormat)?;
        let Value::Object(mut fields) = value else {
            return Err(ScanError::InvalidFormat);
        };

        let kind = match fields.remove("type") {
            Some(Value::String(kind)) => kind,
            Some(other) => return Err(ScanError::UnknownType { kind: other.to_string() }),
            None => {
                return Err(ScanError::UnknownType {
                    kind: UNKNOWN_KIND.to_string(),
                })
            }
        };

        let rest = Value::Object(fields);
        let payload = match kind.as_str() {
            GUEST_ENTRY => ScanPayload::GuestEntry(decode_fields(GUEST_ENTRY, rest)?),
            RESIDENT_ENTRY => ScanPayload::ResidentEntry(decode_fields(RESIDENT_ENTRY, rest)?),
            VEHICLE_ENTRY => ScanPayload::VehicleEntry(decode_fields(VEHICLE_ENTRY, rest)?),
            DELIVERY_ENTRY => ScanPayload::DeliveryEntry(decode_fields(DELIVERY_ENTRY, rest)?),
            _ => return Err(ScanError::UnknownType { kind }),
        };

        payload.check_required()?;
        Ok(payload)
    }

    /// Render the payload as the compact JSON text encoded into a QR code.
    pub fn to_qr_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// The `type` discriminator of this payload.
    pub fn kind(&self) -> &'static str {
        match self {
            ScanPayload::GuestEntry(_) => GUEST_ENTRY,
            ScanPayload::ResidentEntry(_) => RESIDENT_ENTRY,
            ScanPayload::VehicleEntry(_) => VEHICLE_ENTRY,
            ScanPayload::DeliveryEntry(_) => DELIVERY_ENTRY,
        }
    }

    pub fn category(&self) -> SubjectCategory {
        match self {
            ScanPayload::GuestEntry(_) => SubjectCategory::Guest,
            ScanPayload::ResidentEntry(_) => SubjectCategory::Resident,
            ScanPayload::VehicleEntry(_) => SubjectCategory::ResidentVehicle,
            ScanPayload::DeliveryEntry(_) => SubjectCategory::Delivery,
        }
    }

    /// The person recorded as crossing the gate.
    pub fn person_name(&self) -> &str {
        match self {
            ScanPayload::GuestEntry(p) => &p.guest_name,
            ScanPayload::ResidentEntry(p) => &p.resident_name,
            ScanPayload::VehicleEntry(p) => &p.resident_name,
            ScanPayload::DeliveryEntry(p) => &p.rider_name,
        }
    }

    /// The apartment the crossing is associated with (the host's, for guests).
    pub fn apartment_ref(&self) -> &str {
        match self {
            ScanPayload::GuestEntry(p) => &p.host_apartment,
            ScanPayload::ResidentEntry(p) => &p.apartment,
            ScanPayload::VehicleEntry(p) => &p.apartment,
            ScanPayload::DeliveryEntry(p) => &p.apartment,
        }
    }

    /// The vehicle descriptor written to the log record.
    pub fn vehicle_descriptor(&self) -> String {
        match self {
            ScanPayload::GuestEntry(p) => match non_blank(&p.license_plate) {
                Some(plate) => {
                    let kind = non_blank(&p.vehicle_type).unwrap_or("Vehicle");
                    format!("{} ({})", kind, plate)
                }
                None => NO_VEHICLE.to_string(),
            },
            ScanPayload::ResidentEntry(p) => match non_blank(&p.vehicle) {
                Some(vehicle) if vehicle != NO_VEHICLE => vehicle.to_string(),
                _ => NO_VEHICLE.to_string(),
            },
            ScanPayload::VehicleEntry(p) => {
                format!("{} {} ({})", p.make.trim(), p.model.trim(), p.license_plate.trim())
            }
            ScanPayload::DeliveryEntry(_) => NO_VEHICLE.to_string(),
        }
    }

    /// The identity key whose latest crossing decides this scan's direction.
    pub fn identity_key(&self) -> IdentityKey {
        let vehicle = match self {
            ScanPayload::VehicleEntry(_) => Some(self.vehicle_descriptor()),
            _ => None,
        };
        IdentityKey {
            person_name: self.person_name().to_string(),
            apartment_ref: self.apartment_ref().to_string(),
            category: self.category(),
            vehicle,
        }
    }

    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        match self {
            ScanPayload::GuestEntry(p) => vec![
                ("guestName", p.guest_name.as_str()),
                ("hostApartment", p.host_apartment.as_str()),
                ("hostName", p.host_name.as_str()),
            ],
            ScanPayload::ResidentEntry(p) => {
                vec![("residentName", p.resident_name.as_str()), ("apartment", p.apartment.as_str())]
            }
            ScanPayload::VehicleEntry(p) => vec![
                ("residentName", p.resident_name.as_str()),
                ("apartment", p.apartment.as_str()),
                ("make", p.make.as_str()),
                ("model", p.model.as_str()),
                ("licensePlate", p.license_plate.as_str()),
            ],
            ScanPayload::DeliveryEntry(p) => {
                vec![("riderName", p.rider_name.as_str()), ("apartment", p.apartment.as_str())]
            }
        }
    }

    fn check_required(&self) -> Result<(), ScanError> {
        match self.required_fields().into_iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(ScanError::MissingField {
                kind: self.kind().to_string(),
                field: field.to_string(),
            }),
            None => Ok(()),
        }
    }
}

fn decode_fields<T: DeserializeOwned>(kind: &str, fields: Value) -> Result<T, ScanError> {
    serde_json::from_value(fields).map_err(|e| ScanError::MalformedPayload {
        kind: kind.to_string(),
        reason: e.to_string(),
    })
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Parse a pass validity timestamp.
///
/// Accepts RFC 3339 (`2026-10-18T09:00:00+05:30`) and the naive
/// `YYYY-MM-DDTHH:MM[:SS]` form produced by browser date-time pickers, which
/// is read as UTC.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ]
    .iter()
    .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
    .map(|naive| naive.and_utc())
}

mod flexible_instant {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_instant(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid date-time '{}'", raw)))
    }
}

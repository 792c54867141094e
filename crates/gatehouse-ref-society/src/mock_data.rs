//! Simulated society registry for the Gatehouse reference runtime.
//!
//! Every person, flat and vehicle here is fictional. The functions build the
//! same QR payloads the society's registration screens would issue.

use chrono::{DateTime, Duration, TimeZone, Utc};

use gatehouse_contracts::{
    error::{GateError, GateResult},
    payload::{DeliveryPass, GuestPass, ResidentPass, ScanPayload, VehiclePass},
};

/// 08:00 UTC on the reference gate day.
pub fn gate_day_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

// ── Residents ────────────────────────────────────────────────────────────────

pub fn john_mathew() -> ScanPayload {
    ScanPayload::ResidentEntry(ResidentPass {
        resident_name: "John Mathew".to_string(),
        apartment: "A-101".to_string(),
        vehicle: Some("None".to_string()),
    })
}

pub fn priya_sharma() -> ScanPayload {
    ScanPayload::ResidentEntry(ResidentPass {
        resident_name: "Priya Sharma".to_string(),
        apartment: "B-202".to_string(),
        vehicle: None,
    })
}

pub fn arjun_rao() -> ScanPayload {
    ScanPayload::ResidentEntry(ResidentPass {
        resident_name: "Arjun Rao".to_string(),
        apartment: "C-303".to_string(),
        vehicle: None,
    })
}

// ── Resident vehicles ────────────────────────────────────────────────────────

pub fn priya_city() -> ScanPayload {
    ScanPayload::VehicleEntry(VehiclePass {
        resident_name: "Priya Sharma".to_string(),
        apartment: "B-202".to_string(),
        make: "Honda".to_string(),
        model: "City".to_string(),
        license_plate: "MH01AB1234".to_string(),
    })
}

pub fn arjun_classic() -> ScanPayload {
    ScanPayload::VehicleEntry(VehiclePass {
        resident_name: "Arjun Rao".to_string(),
        apartment: "C-303".to_string(),
        make: "Royal Enfield".to_string(),
        model: "Classic 350".to_string(),
        license_plate: "MH02CD5678".to_string(),
    })
}

// ── Guests ───────────────────────────────────────────────────────────────────

/// Meera visits John at A-101 on foot.
pub fn meera_iyer(valid_from: DateTime<Utc>, valid_for: Duration) -> ScanPayload {
    ScanPayload::GuestEntry(GuestPass::for_window(
        "Meera Iyer",
        "A-101",
        "John Mathew",
        valid_from,
        valid_from + valid_for,
    ))
}

/// Karan drives in to see Priya at B-202.
pub fn karan_mehta(valid_from: DateTime<Utc>, valid_for: Duration) -> ScanPayload {
    ScanPayload::GuestEntry(
        GuestPass::for_window(
            "Karan Mehta",
            "B-202",
            "Priya Sharma",
            valid_from,
            valid_from + valid_for,
        )
        .with_vehicle("Car", "KA05XY9876"),
    )
}

// ── Delivery riders ──────────────────────────────────────────────────────────

pub fn ravi_kumar() -> ScanPayload {
    ScanPayload::DeliveryEntry(DeliveryPass {
        rider_name: "Ravi Kumar".to_string(),
        apartment: "C-303".to_string(),
        company_name: Some("QuickBasket".to_string()),
    })
}

pub fn sana_khan() -> ScanPayload {
    ScanPayload::DeliveryEntry(DeliveryPass {
        rider_name: "Sana Khan".to_string(),
        apartment: "B-202".to_string(),
        company_name: None,
    })
}

// ── Encoding ─────────────────────────────────────────────────────────────────

/// Render a payload as the text a scanner would read off its QR code.
pub fn qr(payload: &ScanPayload) -> GateResult<String> {
    payload.to_qr_string().map_err(|e| GateError::PayloadEncoding {
        reason: format!("failed to encode {} payload: {}", payload.kind(), e),
    })
}

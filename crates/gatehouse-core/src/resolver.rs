//! The gate scan resolver.
//!
//! Every scan runs the same pipeline:
//!
//!   Guard → Decode → Pass window → Latest crossing → Toggle → Append → Cooldown
//!
//! The guard is acquired before the payload is even parsed, so a slow decode
//! can never let a second scan through. Whatever happens afterwards, the
//! guard is re-armed with a cooldown: the long one after a recorded
//! crossing, the short one after a rejection.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Duration;
use tracing::{debug, info, warn};

use gatehouse_contracts::{
    entry::{Direction, EntryId, GateLogEntry},
    error::{GateError, GateResult, ScanError},
    outcome::{Notification, ScanOutcome},
    payload::ScanPayload,
};

use crate::{
    guard::{GuardPhase, ScanGuard},
    traits::{Clock, GateLogStore, Notifier},
};

pub const DEFAULT_GATE_NAME: &str = "Main Gate";
pub const DEFAULT_METHOD: &str = "QR Code";
pub const DEFAULT_SUCCESS_COOLDOWN_SECS: i64 = 10;
pub const DEFAULT_ERROR_COOLDOWN_SECS: i64 = 5;

/// Per-gate settings stamped onto records and used to arm the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    pub gate_name: String,
    pub method: String,
    /// Lock held after a recorded crossing. Longer than `error_cooldown` to
    /// absorb the scanner re-triggering on the same physical card.
    pub success_cooldown: Duration,
    /// Lock held after a rejected scan.
    pub error_cooldown: Duration,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            gate_name: DEFAULT_GATE_NAME.to_string(),
            method: DEFAULT_METHOD.to_string(),
            success_cooldown: Duration::seconds(DEFAULT_SUCCESS_COOLDOWN_SECS),
            error_cooldown: Duration::seconds(DEFAULT_ERROR_COOLDOWN_SECS),
        }
    }
}

/// Turns scanned QR payloads into Entry/Exit records.
///
/// One resolver per gate console. The log store is shared; the guard belongs
/// to this resolver alone.
pub struct GateScanResolver {
    store: Arc<dyn GateLogStore>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    settings: ResolverSettings,
    guard: Mutex<ScanGuard>,
}

impl GateScanResolver {
    pub fn new(
        store: Arc<dyn GateLogStore>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        settings: ResolverSettings,
    ) -> Self {
        Self {
            store,
            notifier,
            clock,
            settings,
            guard: Mutex::new(ScanGuard::new()),
        }
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Resolve one scanned payload.
    ///
    /// # Pipeline
    ///
    /// 1. Ask the guard to admit the payload. A locked guard or a repeat of
    ///    the last admitted payload returns `ScanOutcome::Ignored` with no
    ///    notification.
    /// 2. Decode the payload, failing closed.
    /// 3. For guest passes, check the validity window against the clock.
    /// 4. Look up the latest crossing for the payload's identity key and
    ///    toggle its direction (no history or Exit → Entry, Entry → Exit).
    /// 5. Append the new record.
    /// 6. Arm the guard's cooldown, notify the operator, return the outcome.
    ///
    /// # Errors
    ///
    /// Only infrastructure faults are returned as `Err` (a poisoned guard
    /// lock). Every scan-level failure is a `ScanOutcome::Rejected`.
    pub fn resolve(&self, payload: &str) -> GateResult<ScanOutcome> {
        // ── Step 1: Guard ────────────────────────────────────────────────────
        {
            let now = self.clock.now();
            let mut guard = self.lock_guard()?;
            if let Err(reason) = guard.try_acquire(payload, now) {
                return Ok(ScanOutcome::Ignored { reason });
            }
        }

        // ── Steps 2–5: Resolve and record ────────────────────────────────────
        let result = self.record_crossing(payload);

        // ── Step 6: Cooldown and notification ────────────────────────────────
        let finished_at = self.clock.now();
        match result {
            Ok(entry) => {
                let locked_until = self
                    .lock_guard()?
                    .arm_cooldown(finished_at, self.settings.success_cooldown);

                info!(
                    entry_id = %entry.id,
                    direction = %entry.direction,
                    person = %entry.person_name,
                    apartment = %entry.apartment_ref,
                    category = %entry.subject_category,
                    "gate crossing recorded"
                );
                self.notifier.notify(&Notification::recorded(&entry));

                Ok(ScanOutcome::Recorded { entry, locked_until })
            }
            Err(error) => {
                let locked_until = self
                    .lock_guard()?
                    .arm_cooldown(finished_at, self.settings.error_cooldown);

                warn!(error = %error, %locked_until, "scan rejected");
                self.notifier.notify(&Notification::rejected(&error));

                Ok(ScanOutcome::Rejected { error, locked_until })
            }
        }
    }

    /// The guard's phase as of now.
    pub fn guard_phase(&self) -> GateResult<GuardPhase> {
        let now = self.clock.now();
        Ok(self.lock_guard()?.phase(now))
    }

    /// Reset the guard when the hosting screen goes away.
    pub fn teardown(&self) -> GateResult<()> {
        self.lock_guard()?.reset();
        debug!("scan guard reset on teardown");
        Ok(())
    }

    fn record_crossing(&self, payload: &str) -> Result<GateLogEntry, ScanError> {
        let scan = ScanPayload::decode(payload)?;
        let now = self.clock.now();

        if let ScanPayload::GuestEntry(pass) = &scan {
            if !pass.is_valid_at(now) {
                debug!(
                    guest = %pass.guest_name,
                    valid_from = %pass.valid_from,
                    valid_until = %pass.valid_until,
                    %now,
                    "guest pass outside validity window"
                );
                return Err(ScanError::PassNotValid {
                    guest_name: pass.guest_name.clone(),
                });
            }
        }

        let key = scan.identity_key();
        let latest = self
            .store
            .query_latest_by_key(&key)
            .map_err(|e| ScanError::RecordFailed { reason: e.to_string() })?;

        let direction = Direction::following(latest.as_ref().map(|e| e.direction));
        debug!(
            key = %key,
            latest = ?latest.as_ref().map(|e| e.direction),
            %direction,
            "direction resolved"
        );

        let entry = GateLogEntry {
            id: EntryId::new(),
            direction,
            person_name: scan.person_name().to_string(),
            apartment_ref: scan.apartment_ref().to_string(),
            subject_category: scan.category(),
            vehicle_descriptor: scan.vehicle_descriptor(),
            timestamp: now,
            gate_name: self.settings.gate_name.clone(),
            method: self.settings.method.clone(),
        };

        self.store
            .append(entry.clone())
            .map_err(|e| ScanError::RecordFailed { reason: e.to_string() })?;

        Ok(entry)
    }

    fn lock_guard(&self) -> GateResult<MutexGuard<'_, ScanGuard>> {
        self.guard.lock().map_err(|e| GateError::GuardPoisoned {
            reason: format!("scan guard lock poisoned: {}", e),
        })
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

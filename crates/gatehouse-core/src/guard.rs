//! The scan guard: a debounce lock in front of the resolver.
//!
//! A camera pointed at a QR card fires the same payload many times a second.
//! The guard admits one scan, holds the gate shut while it is processed, and
//! keeps it shut for a cooldown afterwards:
//!
//! ```text
//! Idle --acquire--> Processing --arm_cooldown--> Cooldown { until } --deadline--> Idle
//! ```
//!
//! Cooldowns are deadlines rather than timers. Arming a cooldown replaces any
//! earlier deadline, and acquiring for a new cycle discards it, so a stale
//! deadline can never reopen the gate on a newer cycle.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use gatehouse_contracts::outcome::IgnoreReason;

/// Where the guard is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardPhase {
    /// Open: the next distinct payload will be admitted.
    Idle,
    /// A scan has been admitted and is being resolved.
    Processing,
    /// A scan finished; the gate stays shut until `until`.
    Cooldown { until: DateTime<Utc> },
}

/// Process-local debounce state. Never persisted.
#[derive(Debug, Clone)]
pub struct ScanGuard {
    phase: GuardPhase,
    last_signature: Option<String>,
}

impl Default for ScanGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanGuard {
    pub fn new() -> Self {
        Self {
            phase: GuardPhase::Idle,
            last_signature: None,
        }
    }

    /// The phase as of `now`, with an elapsed cooldown reported as `Idle`.
    pub fn phase(&self, now: DateTime<Utc>) -> GuardPhase {
        match self.phase {
            GuardPhase::Cooldown { until } if now >= until => GuardPhase::Idle,
            phase => phase,
        }
    }

    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        self.phase(now) != GuardPhase::Idle
    }

    /// The raw text of the last admitted payload, while the guard remembers it.
    pub fn last_signature(&self) -> Option<&str> {
        self.last_signature.as_deref()
    }

    /// Try to admit `payload` for processing.
    ///
    /// Checks run in order: a locked guard rejects first, then a payload equal
    /// to the last admitted one. On success the guard moves to `Processing`
    /// and remembers `payload` before the caller has parsed anything.
    pub fn try_acquire(&mut self, payload: &str, now: DateTime<Utc>) -> Result<(), IgnoreReason> {
        self.expire(now);

        if self.phase != GuardPhase::Idle {
            debug!(phase = ?self.phase, "scan ignored: guard locked");
            return Err(IgnoreReason::Locked);
        }

        if self.last_signature.as_deref() == Some(payload) {
            debug!("scan ignored: duplicate of last accepted payload");
            return Err(IgnoreReason::Duplicate);
        }

        self.phase = GuardPhase::Processing;
        self.last_signature = Some(payload.to_string());
        Ok(())
    }

    /// Hold the gate shut for `cooldown` from `now`, replacing any earlier
    /// deadline. Returns the new deadline.
    pub fn arm_cooldown(&mut self, now: DateTime<Utc>, cooldown: Duration) -> DateTime<Utc> {
        let until = now + cooldown;
        if let GuardPhase::Cooldown { until: previous } = self.phase {
            debug!(%previous, %until, "replacing pending cooldown");
        }
        self.phase = GuardPhase::Cooldown { until };
        until
    }

    /// Return to `Idle` and forget the last payload (screen teardown).
    pub fn reset(&mut self) {
        self.phase = GuardPhase::Idle;
        self.last_signature = None;
    }

    /// An elapsed cooldown reopens the gate and clears the remembered payload.
    fn expire(&mut self, now: DateTime<Utc>) {
        if let GuardPhase::Cooldown { until } = self.phase {
            if now >= until {
                self.reset();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use gatehouse_contracts::outcome::IgnoreReason;

    use super::{GuardPhase, ScanGuard};

    fn t0() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0).unwrap()
    }

    #[test]
    fn acquire_from_idle_moves_to_processing() {
        let mut guard = ScanGuard::new();
        assert_eq!(guard.phase(t0()), GuardPhase::Idle);

        guard.try_acquire("a", t0()).unwrap();
        assert_eq!(guard.phase(t0()), GuardPhase::Processing);
        assert_eq!(guard.last_signature(), Some("a"));
    }

    #[test]
    fn processing_rejects_any_payload_as_locked() {
        let mut guard = ScanGuard::new();
        guard.try_acquire("a", t0()).unwrap();

        assert_eq!(guard.try_acquire("a", t0()), Err(IgnoreReason::Locked));
        assert_eq!(guard.try_acquire("b", t0()), Err(IgnoreReason::Locked));
    }

    #[test]
    fn cooldown_holds_until_deadline() {
        let mut guard = ScanGuard::new();
        guard.try_acquire("a", t0()).unwrap();
        let until = guard.arm_cooldown(t0(), Duration::seconds(5));

        assert_eq!(until, t0() + Duration::seconds(5));
        assert!(guard.is_locked(t0() + Duration::seconds(4)));
        assert_eq!(
            guard.try_acquire("b", t0() + Duration::seconds(4)),
            Err(IgnoreReason::Locked)
        );

        assert!(!guard.is_locked(until));
        guard.try_acquire("b", until).unwrap();
    }

    #[test]
    fn elapsed_cooldown_forgets_signature() {
        let mut guard = ScanGuard::new();
        guard.try_acquire("a", t0()).unwrap();
        guard.arm_cooldown(t0(), Duration::seconds(10));

        let later = t0() + Duration::seconds(10);
        guard.try_acquire("a", later).unwrap();
        assert_eq!(guard.phase(later), GuardPhase::Processing);
    }

    #[test]
    fn duplicate_is_rejected_when_gate_reopened_without_expiry() {
        // Reopened without an elapsed cooldown: the signature is still held.
        let mut guard = ScanGuard::new();
        guard.try_acquire("a", t0()).unwrap();
        guard.phase = GuardPhase::Idle;

        assert_eq!(guard.try_acquire("a", t0()), Err(IgnoreReason::Duplicate));
        guard.try_acquire("b", t0()).unwrap();
    }

    #[test]
    fn rearming_replaces_previous_deadline() {
        let mut guard = ScanGuard::new();
        guard.try_acquire("a", t0()).unwrap();
        guard.arm_cooldown(t0(), Duration::seconds(10));
        let until = guard.arm_cooldown(t0(), Duration::seconds(5));

        assert_eq!(guard.phase(t0()), GuardPhase::Cooldown { until });
        assert!(!guard.is_locked(t0() + Duration::seconds(6)));
    }

    #[test]
    fn reset_reopens_immediately() {
        let mut guard = ScanGuard::new();
        guard.try_acquire("a", t0()).unwrap();
        guard.arm_cooldown(t0(), Duration::seconds(10));

        guard.reset();
        assert!(!guard.is_locked(t0()));
        assert_eq!(guard.last_signature(), None);
        guard.try_acquire("a", t0()).unwrap();
    }
}

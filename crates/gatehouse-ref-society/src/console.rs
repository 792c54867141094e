//! A wired-up gate console for scenarios and replays.
//!
//! `GateConsole` owns one of each collaborator the resolver needs: the
//! in-memory gate log, a manual clock, and a notifier that keeps every
//! message so scenarios can show what the operator would have seen.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};

use gatehouse_config::GateConfig;
use gatehouse_contracts::{
    error::GateResult,
    outcome::{IgnoreReason, Notification, NotificationLevel, ScanOutcome},
};
use gatehouse_core::{
    clock::ManualClock,
    traits::{Clock, GateLogStore, Notifier},
    GateScanResolver,
};
use gatehouse_log::{GateStats, InMemoryGateLog};

/// The reference society's gate configuration.
pub const SOCIETY_GATE_CONFIG: &str = include_str!("../config/gate.toml");

/// A notifier that keeps every notification in order.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl CollectingNotifier {
    pub fn all(&self) -> Vec<Notification> {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn errors(&self) -> usize {
        self.all()
            .iter()
            .filter(|n| n.level == NotificationLevel::Error)
            .count()
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, notification: &Notification) {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification.clone());
    }
}

pub struct GateConsole {
    pub log: Arc<InMemoryGateLog>,
    pub clock: ManualClock,
    pub notifier: Arc<CollectingNotifier>,
    pub resolver: GateScanResolver,
}

impl GateConsole {
    pub fn new(config: &GateConfig, start: DateTime<Utc>) -> Self {
        let settings = config.resolver_settings();
        let clock = ManualClock::new(start);
        let log = Arc::new(InMemoryGateLog::with_clock(
            settings.gate_name.clone(),
            Arc::new(clock.clone()),
        ));
        let notifier = Arc::new(CollectingNotifier::default());
        let resolver = GateScanResolver::new(
            log.clone(),
            notifier.clone(),
            Arc::new(clock.clone()),
            settings,
        );
        Self { log, clock, notifier, resolver }
    }

    /// A console configured as the reference society's main gate.
    pub fn society(start: DateTime<Utc>) -> GateResult<Self> {
        let config = GateConfig::from_toml_str(SOCIETY_GATE_CONFIG)?;
        Ok(Self::new(&config, start))
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn advance_secs(&self, secs: i64) {
        self.clock.advance(Duration::seconds(secs));
    }

    /// Hand `payload` to the resolver and print a one-line summary.
    pub fn scan(&self, label: &str, payload: &str) -> GateResult<ScanOutcome> {
        let outcome = self.resolver.resolve(payload)?;
        println!(
            "  [{}] {:<28} {}",
            self.now().format("%H:%M:%S"),
            label,
            describe(&outcome)
        );
        Ok(outcome)
    }

    pub fn stats(&self) -> GateResult<GateStats> {
        let records = self.log.entries()?;
        Ok(GateStats::compute(&records, self.now().date_naive()))
    }
}

/// One-line description of a scan outcome.
pub fn describe(outcome: &ScanOutcome) -> String {
    match outcome {
        ScanOutcome::Ignored { reason: IgnoreReason::Locked } => {
            "ignored (guard locked)".to_string()
        }
        ScanOutcome::Ignored { reason: IgnoreReason::Duplicate } => {
            "ignored (duplicate scan)".to_string()
        }
        ScanOutcome::Rejected { error, locked_until } => {
            format!("REJECTED: {} (locked until {})", error, locked_until.format("%H:%M:%S"))
        }
        ScanOutcome::Recorded { entry, .. } => format!(
            "{} · {} · {} · {}",
            entry.direction.as_str().to_uppercase(),
            entry.person_name,
            entry.apartment_ref,
            entry.subject_category
        ),
    }
}

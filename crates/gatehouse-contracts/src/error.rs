//! Error types for the Gatehouse resolver.
//!
//! Two families live here. `GateError` covers infrastructure faults (store,
//! configuration, guard state) and is what fallible library calls return.
//! `ScanError` is the rejection taxonomy for a single scan: it is never
//! propagated to callers as an `Err`, it travels inside
//! `ScanOutcome::Rejected` and is rendered as a user-facing notification.

use thiserror::Error;

/// Infrastructure error for the Gatehouse runtime.
#[derive(Debug, Error)]
pub enum GateError {
    /// The log store could not append a record.
    #[error("gate log write failed: {reason}")]
    StoreWriteFailed { reason: String },

    /// The log store could not be queried.
    #[error("gate log read failed: {reason}")]
    StoreReadFailed { reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A payload could not be rendered as QR text, or replay input could not
    /// be read.
    #[error("payload encoding failed: {reason}")]
    PayloadEncoding { reason: String },

    /// The scan guard's lock was poisoned by a panicking holder.
    #[error("scan guard unavailable: {reason}")]
    GuardPoisoned { reason: String },
}

/// Convenience alias used throughout the Gatehouse crates.
pub type GateResult<T> = Result<T, GateError>;

/// Why a scan was rejected.
///
/// The `Display` text is the message shown to the gate operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// The payload is not valid JSON (or not a JSON object).
    #[error("Invalid QR code format")]
    InvalidFormat,

    /// The `type` discriminator is absent or not one of the known scan kinds.
    #[error("Unknown QR code type: {kind}")]
    UnknownType { kind: String },

    /// The fields for a known scan kind do not decode: missing, unknown, or
    /// of the wrong JSON type.
    #[error("Invalid {kind} QR code: {reason}")]
    MalformedPayload { kind: String, reason: String },

    /// A required field is present but blank.
    #[error("Invalid {kind} QR code: field '{field}' must not be blank")]
    MissingField { kind: String, field: String },

    /// A guest pass scanned outside its validity window.
    #[error("Guest pass for {guest_name} is expired or not yet valid")]
    PassNotValid { guest_name: String },

    /// The crossing was valid but could not be written to the log.
    #[error("Failed to record gate crossing: {reason}")]
    RecordFailed { reason: String },
}

//! Scripted scan replays.
//!
//! A replay script is JSON lines, one scan per line:
//!
//! ```text
//! # offsets are seconds from the start of the replay
//! {"at_secs": 0,  "payload": {"type": "resident_entry", "residentName": "John", "apartment": "A-101"}}
//! {"at_secs": 1,  "payload": "{not json", "label": "smudged card"}
//! ```
//!
//! `payload` may be a JSON object (re-serialized compactly) or a string
//! (passed through verbatim, which is how malformed codes are scripted).

use chrono::Duration;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use gatehouse_contracts::{
    error::{GateError, GateResult},
    outcome::ScanOutcome,
};

use crate::console::GateConsole;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplayLine {
    pub at_secs: i64,
    pub payload: Value,
    #[serde(default)]
    pub label: Option<String>,
}

impl ReplayLine {
    /// The exact text handed to the resolver.
    pub fn payload_text(&self) -> String {
        match &self.payload {
            Value::String(raw) => raw.clone(),
            other => other.to_string(),
        }
    }
}

/// Largest accepted `at_secs`: one year.
pub const MAX_OFFSET_SECS: i64 = 366 * 24 * 60 * 60;

/// Totals for one replay run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub recorded: usize,
    pub rejected: usize,
    pub ignored: usize,
}

/// Parse a replay script. Blank lines and `#` comments are skipped; offsets
/// must lie in `0..=MAX_OFFSET_SECS` and must not go backwards.
pub fn parse_script(text: &str) -> GateResult<Vec<ReplayLine>> {
    let mut lines = Vec::new();
    let mut last_offset = 0;

    for (idx, raw) in text.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let line: ReplayLine =
            serde_json::from_str(trimmed).map_err(|e| GateError::PayloadEncoding {
                reason: format!("replay line {}: {}", idx + 1, e),
            })?;

        if !(0..=MAX_OFFSET_SECS).contains(&line.at_secs) {
            return Err(GateError::PayloadEncoding {
                reason: format!(
                    "replay line {}: at_secs {} is outside 0..={}",
                    idx + 1,
                    line.at_secs,
                    MAX_OFFSET_SECS
                ),
            });
        }
        if line.at_secs < last_offset {
            return Err(GateError::PayloadEncoding {
                reason: format!(
                    "replay line {}: at_secs {} is earlier than the previous scan ({})",
                    idx + 1,
                    line.at_secs,
                    last_offset
                ),
            });
        }
        last_offset = line.at_secs;
        lines.push(line);
    }

    Ok(lines)
}

/// Feed `script` to `console`, moving its clock to each line's offset.
pub fn replay(console: &GateConsole, script: &[ReplayLine]) -> GateResult<ReplayReport> {
    let start = console.now();
    let mut report = ReplayReport::default();

    for (idx, line) in script.iter().enumerate() {
        let at = Duration::try_seconds(line.at_secs)
            .and_then(|offset| start.checked_add_signed(offset))
            .ok_or_else(|| GateError::PayloadEncoding {
                reason: format!(
                    "replay scan {}: at_secs {} from {} is out of range",
                    idx + 1,
                    line.at_secs,
                    start
                ),
            })?;
        console.clock.set(at);
        let label = line.label.clone().unwrap_or_else(|| format!("+{}s", line.at_secs));
        let text = line.payload_text();
        debug!(at_secs = line.at_secs, payload_len = text.len(), "replaying scan");

        match console.scan(&label, &text)? {
            ScanOutcome::Recorded { .. } => report.recorded += 1,
            ScanOutcome::Rejected { .. } => report.rejected += 1,
            ScanOutcome::Ignored { .. } => report.ignored += 1,
        }
    }

    Ok(report)
}

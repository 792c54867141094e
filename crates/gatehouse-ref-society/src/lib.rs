//! # gatehouse-ref-society
//!
//! Residential society reference runtime for the Gatehouse gate scanner.
//!
//! Demonstrates four gate scenarios using mock residents, guests, vehicles
//! and delivery riders:
//!
//! 1. **Resident Round Trip**: first scan is an Entry, the re-read is
//!    dropped, the next scan is an Exit.
//! 2. **Guest Pass Validity**: scans outside the pass window are refused.
//! 3. **Burst Scanning**: the scan guard's cooldowns under a continuously
//!    firing camera.
//! 4. **A Morning at the Main Gate**: every pass kind, then dashboard
//!    figures, filtered listings and chain integrity.
//!
//! `replay` feeds a JSON-lines script of timed scans through the same
//! console. All data is hardcoded and fictional.

pub mod console;
pub mod mock_data;
pub mod replay;
pub mod scenarios;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use gatehouse_contracts::{entry::Direction, error::GateError};
    use gatehouse_core::traits::GateLogStore;

    use crate::{
        console::GateConsole,
        mock_data::gate_day_start,
        replay::{parse_script, replay, ReplayLine, ReplayReport, MAX_OFFSET_SECS},
    };

    const SCRIPT: &str = r#"
# John at the gate, then a smudged card
{"at_secs": 0, "payload": {"type": "resident_entry", "residentName": "John Mathew", "apartment": "A-101"}}
{"at_secs": 1, "payload": {"type": "resident_entry", "residentName": "John Mathew", "apartment": "A-101"}}

{"at_secs": 12, "payload": "{not json", "label": "smudged card"}
{"at_secs": 20, "payload": {"type": "resident_entry", "residentName": "John Mathew", "apartment": "A-101"}}
"#;

    #[test]
    fn parse_script_skips_blanks_and_comments() {
        let lines = parse_script(SCRIPT).unwrap();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2].label.as_deref(), Some("smudged card"));
        assert_eq!(lines[2].payload_text(), "{not json");
        assert!(lines[0].payload_text().starts_with('{'));
    }

    #[test]
    fn parse_script_rejects_offsets_going_backwards() {
        let script = r#"
{"at_secs": 10, "payload": "a"}
{"at_secs": 5, "payload": "b"}
"#;
        let err = parse_script(script).unwrap_err();
        assert!(matches!(err, GateError::PayloadEncoding { .. }));
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn parse_script_rejects_offsets_out_of_range() {
        for script in [
            r#"{"at_secs": 9223372036854775, "payload": "x"}"#,
            r#"{"at_secs": -1, "payload": "x"}"#,
        ] {
            let err = parse_script(script).unwrap_err();
            assert!(matches!(err, GateError::PayloadEncoding { .. }));
            assert!(err.to_string().contains("outside"), "unexpected error: {err}");
        }

        let last = format!(r#"{{"at_secs": {}, "payload": "x"}}"#, MAX_OFFSET_SECS);
        assert_eq!(parse_script(&last).unwrap().len(), 1);
    }

    #[test]
    fn replay_reports_unrepresentable_offset_as_error() {
        let console = GateConsole::society(gate_day_start()).unwrap();
        let lines = vec![ReplayLine {
            at_secs: 9_223_372_036_854_775,
            payload: Value::String("x".to_string()),
            label: None,
        }];

        let err = replay(&console, &lines).unwrap_err();
        assert!(matches!(err, GateError::PayloadEncoding { .. }));
        assert!(console.log.is_empty());
        assert_eq!(console.now(), gate_day_start());
    }

    #[test]
    fn parse_script_rejects_unknown_keys() {
        let err = parse_script(r#"{"at_secs": 0, "payload": "a", "when": 3}"#).unwrap_err();
        assert!(matches!(err, GateError::PayloadEncoding { .. }));
    }

    #[test]
    fn replay_counts_each_outcome() {
        let console = GateConsole::society(gate_day_start()).unwrap();
        let lines = parse_script(SCRIPT).unwrap();

        let report = replay(&console, &lines).unwrap();
        assert_eq!(
            report,
            ReplayReport { recorded: 2, rejected: 1, ignored: 1 }
        );

        let directions: Vec<Direction> = console
            .log
            .entries()
            .unwrap()
            .into_iter()
            .map(|r| r.direction)
            .collect();
        assert_eq!(directions, vec![Direction::Entry, Direction::Exit]);
    }
}

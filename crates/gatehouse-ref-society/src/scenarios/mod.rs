//! Gate scenarios for the reference society.
//!
//! Each scenario builds a `GateConsole` over the society's gate config, scans
//! mock passes at scripted times, and prints what the guard would have seen.
//! `play()` returns the console so tests can inspect the log afterwards.

pub mod burst_scans;
pub mod gate_day;
pub mod guest_pass;
pub mod resident_round_trip;

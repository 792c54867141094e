//! Scenario 2: Guest Pass Validity
//!
//! John issues Meera a pass for 09:00–13:00. She turns up an hour early and
//! is turned away, comes in at 10:00, and leaves at 12:30. Karan's pass
//! expired at 10:00, so his 10:30 arrival is refused.

use chrono::Duration;

use gatehouse_contracts::error::GateResult;

use crate::{
    console::GateConsole,
    mock_data::{gate_day_start, karan_mehta, meera_iyer, qr},
};

pub fn play() -> GateResult<GateConsole> {
    let start = gate_day_start();
    let console = GateConsole::society(start)?;

    let meera = qr(&meera_iyer(start + Duration::hours(1), Duration::hours(4)))?;
    let karan = qr(&karan_mehta(start, Duration::hours(2)))?;

    console.scan("Meera arrives early", &meera)?;

    console.advance_secs(2 * 3600);
    console.scan("Meera arrives on time", &meera)?;

    console.advance_secs(30 * 60);
    console.scan("Karan arrives late", &karan)?;

    console.advance_secs(2 * 3600);
    console.scan("Meera leaves", &meera)?;

    Ok(console)
}

pub fn run_scenario() -> GateResult<()> {
    println!("=== Scenario 2: Guest Pass Validity ===");
    println!();

    let console = play()?;

    println!();
    println!(
        "  Recorded crossings: {}   Refused scans: {}",
        console.log.len(),
        console.notifier.errors()
    );
    println!();
    println!("  Scenario 2 complete.");
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use gatehouse_contracts::entry::{Direction, SubjectCategory};
    use gatehouse_core::traits::GateLogStore;

    use super::play;

    #[test]
    fn only_in_window_scans_are_recorded() {
        let console = play().unwrap();
        let records = console.log.entries().unwrap();

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.person_name == "Meera Iyer"));
        assert!(records.iter().all(|r| r.subject_category == SubjectCategory::Guest));
        assert_eq!(records[0].direction, Direction::Entry);
        assert_eq!(records[1].direction, Direction::Exit);

        assert_eq!(console.notifier.errors(), 2);
    }
}

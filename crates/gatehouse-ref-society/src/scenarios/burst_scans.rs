//! Scenario 3: Burst Scanning
//!
//! Shows the scan guard under a camera that fires continuously:
//!
//! - John holds his card in front of the scanner for two seconds: one record.
//! - Priya presents hers three seconds later, inside John's cooldown: dropped.
//! - A smudged card is read after the cooldown: refused, 5 s lock.
//! - Priya tries again 4 s after the smudge (still locked), then at 6 s.

use chrono::Duration;

use gatehouse_contracts::error::GateResult;

use crate::{
    console::GateConsole,
    mock_data::{gate_day_start, john_mathew, priya_sharma, qr},
};

/// Text a damaged QR sticker decodes to.
const SMUDGED_CARD: &str = r#"{"type":"resident_entry","residentNa"#;

pub fn play() -> GateResult<GateConsole> {
    let console = GateConsole::society(gate_day_start())?;
    let john = qr(&john_mathew())?;
    let priya = qr(&priya_sharma())?;

    for _ in 0..5 {
        console.scan("John's card held up", &john)?;
        console.clock.advance(Duration::milliseconds(400));
    }

    console.advance_secs(1);
    console.scan("Priya during cooldown", &priya)?;

    console.advance_secs(10);
    console.scan("smudged card", SMUDGED_CARD)?;

    console.advance_secs(4);
    console.scan("Priya at +4s", &priya)?;

    console.advance_secs(2);
    console.scan("Priya at +6s", &priya)?;

    Ok(console)
}

pub fn run_scenario() -> GateResult<()> {
    println!("=== Scenario 3: Burst Scanning ===");
    println!();

    let console = play()?;

    println!();
    println!(
        "  Scans presented: 9   Recorded: {}   Refused: {}",
        console.log.len(),
        console.notifier.errors()
    );
    println!();
    println!("  Scenario 3 complete.");
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use gatehouse_core::traits::GateLogStore;

    use super::play;

    #[test]
    fn burst_records_one_crossing_per_person() {
        let console = play().unwrap();
        let names: Vec<String> = console
            .log
            .entries()
            .unwrap()
            .into_iter()
            .map(|r| r.person_name)
            .collect();

        assert_eq!(names, vec!["John Mathew".to_string(), "Priya Sharma".to_string()]);
        assert_eq!(console.notifier.errors(), 1);
    }
}

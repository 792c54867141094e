//! Gatehouse: Residential Gate Scanner Reference CLI
//!
//! Runs the reference society's gate scenarios, replays scripted scans
//! against a gate configuration, and issues guest pass QR payloads.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- burst-scans
//!   cargo run -p demo -- replay scans.jsonl --config gate.toml
//!   cargo run -p demo -- issue-guest-pass "Meera Iyer" A-101 "John Mathew" --hours 4

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gatehouse_config::GateConfig;
use gatehouse_contracts::{
    error::{GateError, GateResult},
    payload::{parse_instant, GuestPass, ScanPayload},
};
use gatehouse_ref_society::{
    console::GateConsole,
    mock_data::{gate_day_start, qr},
    replay::{parse_script, replay},
    scenarios::{burst_scans, gate_day, guest_pass, resident_round_trip},
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Gatehouse: QR gate scanner for a residential society.
///
/// Each subcommand runs one or all of the reference gate scenarios, replays a
/// scan script, or prints a guest pass payload ready to be rendered as a QR.
#[derive(Parser)]
#[command(
    name = "gatehouse",
    about = "Gatehouse residential gate scanner reference CLI",
    long_about = "Runs Gatehouse gate scenarios showing entry/exit alternation,\n\
                  guest pass windows, scan cooldowns, and gate log integrity."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all four gate scenarios in sequence.
    RunAll,
    /// Scenario 1: Resident Round Trip (Entry, duplicate dropped, Exit).
    ResidentRoundTrip,
    /// Scenario 2: Guest Pass Validity (early, on time, expired).
    GuestPass,
    /// Scenario 3: Burst Scanning (lock exclusivity and cooldowns).
    BurstScans,
    /// Scenario 4: A Morning at the Main Gate (stats, filters, integrity).
    GateDay,
    /// Replay a JSON-lines scan script against a manual clock.
    Replay {
        /// Script file: one {"at_secs": n, "payload": ...} object per line.
        file: PathBuf,
        /// Gate configuration TOML. Defaults to the reference society's gate.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Instant the script's offsets count from (RFC 3339). Defaults to
        /// 08:00 UTC on the reference gate day.
        #[arg(long)]
        start: Option<String>,
        /// Print the sealed gate log as JSON after the replay.
        #[arg(long)]
        export: bool,
    },
    /// Print a guest pass QR payload.
    IssueGuestPass {
        guest: String,
        apartment: String,
        host: String,
        /// Hours the pass stays valid.
        #[arg(long, default_value_t = 4)]
        hours: u32,
        /// Start of the validity window (RFC 3339). Defaults to now.
        #[arg(long)]
        from: Option<String>,
        #[arg(long, requires = "plate")]
        vehicle_type: Option<String>,
        #[arg(long)]
        plate: Option<String>,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::RunAll => {
            print_banner();
            run_all()
        }
        Command::ResidentRoundTrip => {
            print_banner();
            resident_round_trip::run_scenario()
        }
        Command::GuestPass => {
            print_banner();
            guest_pass::run_scenario()
        }
        Command::BurstScans => {
            print_banner();
            burst_scans::run_scenario()
        }
        Command::GateDay => {
            print_banner();
            gate_day::run_scenario()
        }
        Command::Replay { file, config, start, export } => {
            run_replay(&file, config.as_deref(), start.as_deref(), export)
        }
        Command::IssueGuestPass {
            guest,
            apartment,
            host,
            hours,
            from,
            vehicle_type,
            plate,
        } => issue_guest_pass(
            guest,
            apartment,
            host,
            hours,
            from.as_deref(),
            vehicle_type,
            plate,
        ),
    };

    if let Err(e) = result {
        eprintln!("gatehouse error: {}", e);
        std::process::exit(1);
    }
}

// ── Scenario dispatch ─────────────────────────────────────────────────────────

fn run_all() -> GateResult<()> {
    resident_round_trip::run_scenario()?;
    guest_pass::run_scenario()?;
    burst_scans::run_scenario()?;
    gate_day::run_scenario()?;
    println!("All scenarios completed successfully.");
    Ok(())
}

// ── Replay ────────────────────────────────────────────────────────────────────

fn run_replay(
    file: &Path,
    config: Option<&Path>,
    start: Option<&str>,
    export: bool,
) -> GateResult<()> {
    let config = match config {
        Some(path) => GateConfig::from_file(path)?,
        None => GateConfig::from_toml_str(gatehouse_ref_society::console::SOCIETY_GATE_CONFIG)?,
    };
    let start = match start {
        Some(raw) => instant_arg("--start", raw)?,
        None => gate_day_start(),
    };

    let text = std::fs::read_to_string(file).map_err(|e| GateError::PayloadEncoding {
        reason: format!("failed to read replay script '{}': {}", file.display(), e),
    })?;
    let script = parse_script(&text)?;
    info!(
        file = %file.display(),
        scans = script.len(),
        gate = %config.gate.name,
        "replaying scan script"
    );

    println!("Replaying {} scan(s) at {} from {}", script.len(), config.gate.name, start);
    println!();

    let console = GateConsole::new(&config, start);
    let report = replay(&console, &script)?;
    let stats = console.stats()?;

    println!();
    println!(
        "  Recorded: {}   Rejected: {}   Ignored: {}",
        report.recorded, report.rejected, report.ignored
    );
    println!(
        "  Entries / exits: {} / {}   Inside now: {}",
        stats.entries,
        stats.exits,
        stats.inside_count()
    );
    println!(
        "  Gate log integrity: {}",
        if console.log.verify_integrity() { "VERIFIED" } else { "FAILED" }
    );

    if export {
        let sealed = console.log.export_log()?;
        let json = serde_json::to_string_pretty(&sealed).map_err(|e| {
            GateError::PayloadEncoding {
                reason: format!("failed to serialize gate log export: {}", e),
            }
        })?;
        println!();
        println!("{}", json);
    }

    Ok(())
}

// ── Guest pass issuance ───────────────────────────────────────────────────────

fn issue_guest_pass(
    guest: String,
    apartment: String,
    host: String,
    hours: u32,
    from: Option<&str>,
    vehicle_type: Option<String>,
    plate: Option<String>,
) -> GateResult<()> {
    if hours == 0 {
        return Err(GateError::ConfigError {
            reason: "--hours must be at least 1".to_string(),
        });
    }
    let valid_from = match from {
        Some(raw) => instant_arg("--from", raw)?,
        None => Utc::now(),
    };

    let mut pass = GuestPass::for_hours(guest, apartment, host, valid_from, hours)?;
    if let Some(plate) = plate {
        pass = pass.with_vehicle(vehicle_type.unwrap_or_else(|| "Vehicle".to_string()), plate);
    }

    info!(
        guest = %pass.guest_name,
        apartment = %pass.host_apartment,
        valid_from = %pass.valid_from,
        valid_until = %pass.valid_until,
        "issuing guest pass"
    );
    println!("{}", qr(&ScanPayload::GuestEntry(pass))?);
    Ok(())
}

fn instant_arg(flag: &str, raw: &str) -> GateResult<DateTime<Utc>> {
    parse_instant(raw).ok_or_else(|| GateError::ConfigError {
        reason: format!("{} '{}' is not a recognised date-time", flag, raw),
    })
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("Gatehouse: Residential Gate Scanner");
    println!("Reference Society Demo");
    println!("===================================");
    println!();
    println!("Per scan:");
    println!("  [1] Scan guard: dropped if a cooldown is running or the payload repeats");
    println!("  [2] Payload decoded by its \"type\" (guest / resident / vehicle / delivery)");
    println!("  [3] Guest passes checked against their validity window");
    println!("  [4] Direction follows the identity's latest crossing (Entry ⇄ Exit)");
    println!("  [5] Record appended to the SHA-256 gate log; 10 s cooldown (5 s on error)");
    println!();
}

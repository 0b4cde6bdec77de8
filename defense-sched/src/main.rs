/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info};

use defense_sched::config::RunConfigManager;
use defense_sched::report::LogReporter;
use defense_sched::runner::{RunOutcome, SessionRunner, DEFAULT_MAX_ATTEMPTS};
use defense_sched::scheduler::DefenseScheduler;
use defense_sched::store::InMemoryStore;

// ── CLI argument definition ───────────────────────────────────────────────────

/// Defense timetable scheduler.
///
/// Example:
///   defense-sched --config run.yaml --data data.yaml
#[derive(Debug, Parser)]
#[command(
    name = "defense-sched",
    about = "Defense timetable scheduler – greedy date/slot/room assignment",
    long_about = None,
)]
struct Cli {
    /// Path to the YAML run configuration (working hours, rooms, exclusions).
    #[arg(short = 'c', long = "config")]
    config: PathBuf,

    /// Path to the YAML data file (periods, units, existing rooms).
    #[arg(short = 'd', long = "data")]
    data: PathBuf,

    /// Maximum attempts when the store fails transiently.
    #[arg(short = 'r', long = "max-attempts", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    info!(
        config = %cli.config.display(),
        data = %cli.data.display(),
        max_attempts = cli.max_attempts,
        "Configuration"
    );

    let mut config_manager = RunConfigManager::new();
    if let Err(e) = config_manager.load_from_file(&cli.config) {
        error!("Failed to load run configuration: {:#}", e);
        process::exit(1);
    }
    let Some(config) = config_manager.get_config() else {
        error!("Run configuration is empty");
        process::exit(1);
    };

    let store = match InMemoryStore::load_from_file(&cli.data) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to load scheduling data: {:#}", e);
            process::exit(1);
        }
    };

    let mut scheduler = DefenseScheduler::new(store);
    let runner = SessionRunner::new().with_max_attempts(cli.max_attempts);

    let outcome = match runner.run(&mut scheduler, config, &mut LogReporter) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    match outcome {
        RunOutcome::Completed { result, .. } => {
            let store = scheduler.store();
            for a in &result.assignments {
                let room = store
                    .room(a.room_id)
                    .map(|r| r.name.as_str())
                    .unwrap_or("?");
                println!("{}  {}  {:<16}  {}", a.date, a.window, room, a.unit_id);
            }
            for id in &result.unassigned_unit_ids {
                println!("UNASSIGNED  {id}");
            }
        }
        RunOutcome::Failed { error, attempts } => {
            error!(attempts, "Scheduling failed: {error}");
            process::exit(1);
        }
    }
}

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use freeroam_core::commands::MissionCommand;
use freeroam_core::config::MissionConfig;
use freeroam_core::constants::TICK_RATE;
use freeroam_core::enums::MissionPhase;
use freeroam_runner::error::RunnerError;
use freeroam_runner::game_loop::{self, LoopConfig, TICK_DURATION};
use freeroam_runner::state::RunnerState;

/// Play the assassination mission headlessly with a scripted player.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Mission config as JSON. Defaults apply when omitted.
    config: Option<PathBuf>,
    /// Frames between the scripted player's kills.
    #[arg(long, default_value_t = u64::from(TICK_RATE))]
    kill_interval: u64,
    /// Kill the player at this frame to play out a failure.
    #[arg(long)]
    die_at_frame: Option<u64>,
    /// Run frames back to back instead of at the fixed tick rate.
    #[arg(long)]
    fast: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "runner failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn run(cli: Cli) -> Result<(), RunnerError> {
    let mission = match &cli.config {
        Some(path) => MissionConfig::from_path(path)?,
        None => MissionConfig::default(),
    };
    info!(seed = mission.seed, "mission config loaded");

    let config = LoopConfig {
        mission,
        kill_interval: cli.kill_interval,
        die_at_frame: cli.die_at_frame,
        tick_duration: if cli.fast { Duration::ZERO } else { TICK_DURATION },
        ..Default::default()
    };

    let state = RunnerState::new();
    let handle = game_loop::spawn_game_loop(config, &state)?;
    state.send(MissionCommand::Start);

    while !handle.is_finished() {
        let stopped = state
            .latest()
            .is_some_and(|report| matches!(report.mission.phase, MissionPhase::Stopped(_)));
        if stopped {
            state.shutdown();
            break;
        }
        std::thread::sleep(TICK_DURATION);
    }

    let report = handle.join().map_err(|_| RunnerError::LoopPanicked)??;
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(err) => error!(error = %err, "failed to serialize report"),
    }
    Ok(())
}

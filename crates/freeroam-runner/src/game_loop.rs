//! Game loop thread: runs the sim world and the mission at 30Hz.
//!
//! The world and the mission are created inside this thread. Commands
//! arrive via `mpsc` channel. Reports are stored in shared state for
//! polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use freeroam_core::commands::MissionCommand;
use freeroam_core::config::MissionConfig;
use freeroam_core::constants::TICK_RATE;
use freeroam_core::enums::MissionPhase;
use freeroam_core::world::PlayerState;
use freeroam_mission::Assassination;
use freeroam_sim::{SimConfig, SimWorld};

use crate::controller::MissionController;
use crate::error::RunnerError;
use crate::script::PlayerScript;
use crate::state::{GameLoopCommand, LoopReport, RunnerState};

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub mission: MissionConfig,
    pub sim: SimConfig,
    /// Frames between scripted kills.
    pub kill_interval: u64,
    pub die_at_frame: Option<u64>,
    /// Zero runs as fast as possible.
    pub tick_duration: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            mission: MissionConfig::default(),
            sim: SimConfig::default(),
            kill_interval: u64::from(TICK_RATE),
            die_at_frame: None,
            tick_duration: TICK_DURATION,
        }
    }
}

/// Spawns the game loop in a new thread and registers its command sender
/// in `state`.
pub fn spawn_game_loop(
    config: LoopConfig,
    state: &RunnerState,
) -> Result<JoinHandle<Result<LoopReport, RunnerError>>, RunnerError> {
    // Actor creation suspends, so `start` needs an executor. One
    // current-thread runtime is enough; the loop blocks on it.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(RunnerError::Runtime)?;

    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let latest_report = Arc::clone(&state.latest_report);
    let cancel = state.start_cancel.clone();

    let handle = std::thread::Builder::new()
        .name("freeroam-game-loop".into())
        .spawn(move || run_game_loop(&runtime, config, cmd_rx, &latest_report, &cancel))
        .map_err(RunnerError::Thread)?;

    if let Ok(mut lock) = state.command_tx.lock() {
        *lock = Some(cmd_tx);
    }
    Ok(handle)
}

/// The game loop. Runs until Shutdown command, channel disconnect, or a
/// failed start.
fn run_game_loop(
    runtime: &Runtime,
    config: LoopConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_report: &Mutex<Option<LoopReport>>,
    cancel: &CancellationToken,
) -> Result<LoopReport, RunnerError> {
    let mut world = SimWorld::new(config.sim.clone());
    let mut controller: MissionController<SimWorld> =
        MissionController::new(Box::new(Assassination::new(config.mission.clone())));
    let mut script = PlayerScript::new(config.kill_interval, config.die_at_frame);
    let mut report = LoopReport::default();
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Mission(MissionCommand::Start)) => {
                    info!(frame = world.frame(), "starting mission");
                    if let Err(err) = runtime.block_on(controller.start(&mut world, cancel)) {
                        warn!(error = %err, "mission start failed");
                        publish(latest_report, snapshot_report(&controller, &world));
                        return Err(err.into());
                    }
                }
                Ok(GameLoopCommand::Mission(command)) => controller.apply(&mut world, command),
                Ok(GameLoopCommand::Shutdown) => return Ok(report),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return Ok(report),
            }
        }

        // 2. Let the scripted player act, then evaluate the mission
        if controller.phase() == MissionPhase::Active {
            script.act(&mut world);
        }
        controller.tick(&mut world);
        world.advance_frame();

        // 3. Store latest report for polling
        report = snapshot_report(&controller, &world);
        publish(latest_report, report.clone());

        // 4. Sleep until next tick
        next_tick_time += config.tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > config.tick_duration * 2 {
            // Too far behind; reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}

fn snapshot_report(controller: &MissionController<SimWorld>, world: &SimWorld) -> LoopReport {
    LoopReport {
        frame: world.frame(),
        mission: controller.snapshot(),
        rewards: controller.rewards(),
        wanted_level: world.wanted_level(),
    }
}

fn publish(latest_report: &Mutex<Option<LoopReport>>, report: LoopReport) {
    if let Ok(mut lock) = latest_report.lock() {
        *lock = Some(report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Rewards;
    use freeroam_core::enums::MissionOutcome;
    use freeroam_core::error::MissionError;

    fn fast_config() -> LoopConfig {
        LoopConfig {
            kill_interval: 1,
            tick_duration: Duration::ZERO,
            ..Default::default()
        }
    }

    /// Poll until the loop reports a stopped mission or the thread exits.
    fn wait_for_stop(state: &RunnerState, handle: &JoinHandle<Result<LoopReport, RunnerError>>) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while Instant::now() < deadline && !handle.is_finished() {
            let stopped = state
                .latest()
                .is_some_and(|r| matches!(r.mission.phase, MissionPhase::Stopped(_)));
            if stopped {
                return;
            }
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::Mission(MissionCommand::Start))
            .unwrap();
        tx.send(GameLoopCommand::Mission(MissionCommand::Stop { success: false }))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::Mission(MissionCommand::Start)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::Mission(MissionCommand::Stop { success: false })
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_scripted_run_succeeds() {
        let state = RunnerState::new();
        let handle = spawn_game_loop(fast_config(), &state).unwrap();
        assert!(state.send(MissionCommand::Start));

        wait_for_stop(&state, &handle);
        state.shutdown();
        let report = handle.join().unwrap().unwrap();

        assert_eq!(
            report.mission.phase,
            MissionPhase::Stopped(MissionOutcome::Success)
        );
        assert_eq!(report.rewards, Rewards { money: 5000, xp: 30 });
        assert!(report.wanted_level >= 3);
    }

    #[test]
    fn test_scripted_death_fails() {
        let state = RunnerState::new();
        let config = LoopConfig {
            kill_interval: 1_000,
            die_at_frame: Some(1),
            ..fast_config()
        };
        let handle = spawn_game_loop(config, &state).unwrap();
        assert!(state.send(MissionCommand::Start));

        wait_for_stop(&state, &handle);
        state.shutdown();
        let report = handle.join().unwrap().unwrap();

        assert_eq!(
            report.mission.phase,
            MissionPhase::Stopped(MissionOutcome::Failure)
        );
        assert_eq!(report.rewards, Rewards::default());
        assert_eq!(report.mission.living_targets, 0);
    }

    #[test]
    fn test_cancelled_start_ends_loop() {
        let state = RunnerState::new();
        state.start_cancel.cancel();
        let handle = spawn_game_loop(fast_config(), &state).unwrap();
        assert!(state.send(MissionCommand::Start));

        let result = handle.join().unwrap();
        assert!(matches!(
            result,
            Err(RunnerError::Mission(MissionError::Cancelled { ready_slots: 0 }))
        ));
    }

    #[test]
    fn test_tick_duration_constant() {
        // 30Hz = 33.333ms per tick
        let expected_nanos = 1_000_000_000u64 / 30;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }
}

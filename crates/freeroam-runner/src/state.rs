//! State shared between the command side and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use freeroam_core::commands::MissionCommand;
use freeroam_core::state::MissionSnapshot;

use crate::controller::Rewards;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A mission command to forward to the controller.
    Mission(MissionCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// What the game loop publishes after every tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoopReport {
    pub frame: u64,
    pub mission: MissionSnapshot,
    pub rewards: Rewards,
    pub wanted_level: u8,
}

/// Handle to a running game loop.
///
/// `mpsc::Sender` is not `Sync`, so it sits behind a `Mutex` like the rest
/// of the shared state.
pub struct RunnerState {
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest report, updated by the game loop thread after each tick.
    pub latest_report: Arc<Mutex<Option<LoopReport>>>,
    /// Fires to abort a start that is still creating actors. A start runs
    /// to completion inside one loop iteration, so the command channel
    /// cannot reach it.
    pub start_cancel: CancellationToken,
}

impl Default for RunnerState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_report: Arc::new(Mutex::new(None)),
            start_cancel: CancellationToken::new(),
        }
    }
}

impl RunnerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward a mission command. `Cancel` also fires the start token
    /// directly. Returns false if no loop is listening.
    pub fn send(&self, command: MissionCommand) -> bool {
        if command == MissionCommand::Cancel {
            self.start_cancel.cancel();
        }
        self.send_raw(GameLoopCommand::Mission(command))
    }

    pub fn shutdown(&self) -> bool {
        self.send_raw(GameLoopCommand::Shutdown)
    }

    pub fn latest(&self) -> Option<LoopReport> {
        self.latest_report.lock().ok().and_then(|lock| lock.clone())
    }

    fn send_raw(&self, command: GameLoopCommand) -> bool {
        match self.command_tx.lock() {
            Ok(lock) => lock.as_ref().is_some_and(|tx| tx.send(command).is_ok()),
            Err(_) => false,
        }
    }
}

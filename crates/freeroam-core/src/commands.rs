//! Commands an outer mission controller sends to a running mission.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible controller actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MissionCommand {
    /// Begin spawning targets.
    Start,
    /// Abort an in-flight start; already created slots are rolled back.
    Cancel,
    /// Stop the mission with the given outcome.
    Stop { success: bool },
}

//! Signals the mission broadcasts and HUD messages it shows.

use serde::{Deserialize, Serialize};

/// One-shot broadcasts on the outward signal bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MissionSignal {
    /// Ask the owning controller to stop the mission.
    MissionStop { success: bool },
    /// Grant money to the player.
    MoneyAdd { amount: i32 },
    /// Grant experience to the player.
    XpAdd { amount: i32 },
}

/// Information conveyed to the player. Rendering and localization belong
/// to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HudMessage {
    /// Persistent help explaining the objective.
    AssassinationInfo,
    /// Subtitle announcing the mission start.
    AssassinationStart,
    /// One target was eliminated.
    TargetKilled,
    /// Every target was eliminated.
    AllTargetsKilled,
}

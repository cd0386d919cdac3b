//! Enumeration types used throughout the mission and the host world.

use serde::{Deserialize, Serialize};

/// Actor models the mission asks the entity factory for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorModel {
    /// Business-attire civilian used as the assassination target.
    TargetCivilian,
    /// Suited federal agent used as a bodyguard.
    GuardAgent,
    /// The player's ped.
    Player,
}

/// Ambient behaviour scenarios an actor can be told to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scenario {
    /// Stand in place and smoke.
    Smoking,
}

/// Weapons that can be granted to an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    CarbineRifle,
}

/// Built-in factions the host world already knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    /// Law enforcement.
    Police,
    /// Private security.
    SecurityGuard,
}

/// Attitude of one relationship group toward another.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relationship {
    Companion,
    Respect,
    Like,
    #[default]
    Neutral,
    Dislike,
    Hate,
}

/// Squad formation layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormationType {
    #[default]
    Default,
    Circle,
    Line,
}

/// Blip icon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlipSprite {
    #[default]
    Standard,
    Enemy,
}

/// Blip colour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlipColor {
    #[default]
    White,
    Red,
}

/// How a stopped mission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionOutcome {
    Success,
    Failure,
}

impl MissionOutcome {
    pub fn from_success(success: bool) -> Self {
        if success {
            Self::Success
        } else {
            Self::Failure
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

/// Mission lifecycle (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionPhase {
    #[default]
    NotStarted,
    /// Targets and squads are being created.
    Starting,
    /// Every target exists; per-tick evaluation runs.
    Active,
    Stopped(MissionOutcome),
}

/// Initialization state of one target slot, as reported in snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotStatus {
    #[default]
    Empty,
    Creating,
    Ready,
    /// Target eliminated and its squad released. Terminal for this run.
    Cleared,
}

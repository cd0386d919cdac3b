//! Handles into the host world and small value types.
//!
//! Handles are opaque, non-owning references. The host world decides what
//! the numbers mean; the mission only compares and passes them back.

use serde::{Deserialize, Serialize};

use crate::enums::{BlipColor, BlipSprite};

/// Handle to a world-simulated actor (ped).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u64);

/// Handle to a map marker attached to an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlipId(pub u64);

/// Handle to a coordination group (leader plus followers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SquadId(pub u64);

/// Handle to a relationship group (faction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationshipGroupId(pub u64);

/// Visual configuration for a blip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlipStyle {
    pub sprite: BlipSprite,
    pub color: BlipColor,
    pub name: String,
    pub scale: f32,
}

impl BlipStyle {
    /// Red enemy marker used for assassination targets.
    pub fn enemy(name: impl Into<String>, scale: f32) -> Self {
        Self {
            sprite: BlipSprite::Enemy,
            color: BlipColor::Red,
            name: name.into(),
            scale,
        }
    }
}

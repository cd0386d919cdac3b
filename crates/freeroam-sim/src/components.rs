//! ECS components for hecs actor entities.
//!
//! Components are plain data structs with no methods.
//! Behaviour lives in `SimWorld`, not components.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use freeroam_core::enums::*;
use freeroam_core::types::*;

/// Which model the actor was created from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Actor {
    pub model: ActorModel,
}

/// World placement. Heading is radians around +z, 0 = facing +y.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub heading: f32,
}

/// Life state and protection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vitals {
    pub dead: bool,
    /// Recorded killer, if the death had an attributable source.
    pub killer: Option<ActorId>,
    pub armor: u32,
}

/// Weapons carried, with remaining ammo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Loadout {
    pub weapons: Vec<(WeaponKind, u32)>,
    pub equipped: Option<WeaponKind>,
}

/// Ambient behaviour the actor was told to play.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Activity {
    pub scenario: Scenario,
    pub anchor: Vec3,
}

/// Relationship group and squad membership.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Membership {
    pub relationship_group: Option<RelationshipGroupId>,
    pub squad: Option<SquadId>,
}

/// Marks an actor handed back to the ambient pool, with the frame it
/// happened on. The world reaps it after `SimConfig::release_after_frames`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NoLongerNeeded {
    pub since_frame: u64,
}

/// Marks the local player's actor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

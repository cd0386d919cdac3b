//! The surfaces the mission consumes from (and produces into) the host.
//!
//! The mission holds no authority over the world's physics or AI. It can
//! only observe actors and issue commands through these traits. Any host
//! (the live game, or the headless sim used in tests) implements them.

use std::time::Duration;

use async_trait::async_trait;
use glam::Vec3;

use crate::enums::*;
use crate::error::WorldError;
use crate::events::{HudMessage, MissionSignal};
use crate::types::*;

/// Creates actors. Creation may span several host frames.
#[async_trait]
pub trait EntityFactory: Send {
    /// Resolves once the world confirms the actor exists.
    async fn create_actor(&mut self, model: ActorModel, position: Vec3)
        -> Result<ActorId, WorldError>;
}

/// Actor queries and commands.
pub trait ActorWorld {
    fn is_dead(&self, actor: ActorId) -> Result<bool, WorldError>;

    /// The actor recorded as having killed `actor`, if any.
    fn killer_of(&self, actor: ActorId) -> Option<ActorId>;

    fn position(&self, actor: ActorId) -> Result<Vec3, WorldError>;

    /// World position of `offset` expressed in the actor's local frame.
    fn offset_position(&self, actor: ActorId, offset: Vec3) -> Result<Vec3, WorldError>;

    fn set_armor(&mut self, actor: ActorId, armor: u32) -> Result<(), WorldError>;

    fn give_weapon(
        &mut self,
        actor: ActorId,
        weapon: WeaponKind,
        ammo: u32,
        equip: bool,
    ) -> Result<(), WorldError>;

    fn start_scenario(
        &mut self,
        actor: ActorId,
        scenario: Scenario,
        position: Vec3,
    ) -> Result<(), WorldError>;

    /// Create (or look up) a named relationship group.
    fn add_relationship_group(&mut self, name: &str) -> RelationshipGroupId;

    /// Group of one of the host's built-in factions.
    fn faction_group(&self, faction: Faction) -> RelationshipGroupId;

    fn set_relationship(
        &mut self,
        from: RelationshipGroupId,
        to: RelationshipGroupId,
        relationship: Relationship,
        bidirectional: bool,
    );

    fn set_relationship_group(
        &mut self,
        actor: ActorId,
        group: RelationshipGroupId,
    ) -> Result<(), WorldError>;

    fn create_squad(&mut self) -> SquadId;

    fn add_to_squad(
        &mut self,
        squad: SquadId,
        actor: ActorId,
        leader: bool,
    ) -> Result<(), WorldError>;

    fn configure_squad(&mut self, squad: SquadId, formation: FormationType, separation: f32);

    /// Hand the actor back to the world's ambient pool. The world may keep
    /// it around for a while; this is not immediate deletion.
    fn mark_no_longer_needed(&mut self, actor: ActorId);

    fn attach_blip(&mut self, actor: ActorId, style: BlipStyle) -> Result<BlipId, WorldError>;

    fn remove_blip(&mut self, blip: BlipId);
}

/// Fire-and-forget HUD output.
pub trait Hud {
    fn show_notification(&mut self, message: HudMessage);

    fn show_subtitle(&mut self, message: HudMessage, duration: Duration);

    fn display_help(&mut self, message: HudMessage);

    fn flash_minimap(&mut self);
}

/// The local player.
pub trait PlayerState {
    fn player_actor(&self) -> ActorId;

    fn is_player_dead(&self) -> bool;

    fn wanted_level(&self) -> u8;

    fn set_wanted_level(&mut self, level: u8);
}

/// Everything the mission needs from its host world.
pub trait MissionWorld: EntityFactory + ActorWorld + Hud + PlayerState {}

impl<T> MissionWorld for T where T: EntityFactory + ActorWorld + Hud + PlayerState {}

/// Outward broadcast bus. Delivery is best-effort with no acknowledgement.
pub trait SignalBus {
    fn emit(&mut self, signal: MissionSignal);
}

impl SignalBus for Vec<MissionSignal> {
    fn emit(&mut self, signal: MissionSignal) {
        self.push(signal);
    }
}

//! `SimWorld`: an in-memory host for the mission.
//!
//! Actors are hecs entities; their `ActorId` is the entity's bit pattern.
//! Everything outside the ECS (blips, squads, relationship tables, HUD log)
//! lives in plain maps owned by the world.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use glam::{Quat, Vec3};
use hecs::{Entity, World};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use freeroam_core::enums::*;
use freeroam_core::error::WorldError;
use freeroam_core::events::HudMessage;
use freeroam_core::types::*;
use freeroam_core::world::{ActorWorld, EntityFactory, Hud, PlayerState};

use crate::components::*;
use crate::hud::HudEvent;

/// Configuration for a new sim world.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Frames between a creation request and the actor existing.
    pub creation_latency_frames: u32,
    /// Frames a creation may wait before it is reported as timed out.
    pub creation_timeout_frames: u32,
    /// Frames a no-longer-needed actor lingers before the world reaps it.
    pub release_after_frames: u32,
    pub player_spawn: Vec3,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            creation_latency_frames: 2,
            creation_timeout_frames: 300,
            release_after_frames: 60,
            player_spawn: Vec3::new(-500.0, -800.0, 20.0),
        }
    }
}

/// A coordination group.
#[derive(Debug, Clone, Default)]
pub struct Squad {
    pub leader: Option<ActorId>,
    pub followers: Vec<ActorId>,
    pub formation: FormationType,
    pub separation: f32,
}

struct PendingCreation {
    model: ActorModel,
    position: Vec3,
    ready_at_frame: u64,
    spawned: Option<ActorId>,
}

/// Hands a creation ticket back to the world if its waiting future is
/// dropped before it returns.
struct TicketGuard {
    ticket: u64,
    abandoned: Arc<Mutex<Vec<u64>>>,
    armed: bool,
}

impl Drop for TicketGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Ok(mut abandoned) = self.abandoned.lock() {
            abandoned.push(self.ticket);
        }
    }
}

/// The headless world. Owns the ECS and all host-side state.
pub struct SimWorld {
    world: World,
    config: SimConfig,
    frame: u64,
    player: Entity,
    wanted_level: u8,

    pending: HashMap<u64, PendingCreation>,
    /// Tickets whose waiter went away. Drained every frame.
    abandoned: Arc<Mutex<Vec<u64>>>,
    next_ticket: u64,
    /// Creations left before the next one fails. `None` = never fail.
    fail_creation_in: Option<u32>,
    stalled: bool,

    blips: HashMap<BlipId, (ActorId, BlipStyle)>,
    next_blip: u64,
    squads: HashMap<SquadId, Squad>,
    next_squad: u64,
    group_names: Vec<String>,
    relationships: HashMap<(RelationshipGroupId, RelationshipGroupId), Relationship>,

    hud_log: Vec<HudEvent>,
    despawn_buffer: Vec<Entity>,
}

impl SimWorld {
    pub fn new(config: SimConfig) -> Self {
        let mut world = World::new();
        let player = world.spawn((
            Player,
            Actor {
                model: ActorModel::Player,
            },
            Transform {
                position: config.player_spawn,
                heading: 0.0,
            },
            Vitals::default(),
            Membership::default(),
        ));

        // Built-in factions occupy the first group ids.
        let group_names = vec!["COP".to_string(), "SECURITY_GUARD".to_string()];

        Self {
            world,
            config,
            frame: 0,
            player,
            wanted_level: 0,
            pending: HashMap::new(),
            abandoned: Arc::new(Mutex::new(Vec::new())),
            next_ticket: 0,
            fail_creation_in: None,
            stalled: false,
            blips: HashMap::new(),
            next_blip: 0,
            squads: HashMap::new(),
            next_squad: 0,
            group_names,
            relationships: HashMap::new(),
            hud_log: Vec::new(),
            despawn_buffer: Vec::new(),
        }
    }

    /// Advance the host by one frame: materialize due creations and reap
    /// actors released long enough ago.
    pub fn advance_frame(&mut self) {
        self.frame += 1;
        self.drop_abandoned();

        let frame = self.frame;
        let due: Vec<u64> = self
            .pending
            .iter()
            .filter(|(_, p)| p.spawned.is_none() && p.ready_at_frame <= frame)
            .map(|(ticket, _)| *ticket)
            .collect();
        for ticket in due {
            if let Some(pending) = self.pending.get(&ticket) {
                let (model, position) = (pending.model, pending.position);
                let actor = self.spawn_actor(model, position);
                if let Some(pending) = self.pending.get_mut(&ticket) {
                    pending.spawned = Some(actor);
                }
            }
        }

        self.despawn_buffer.clear();
        let linger = u64::from(self.config.release_after_frames);
        for (entity, released) in self.world.query_mut::<&NoLongerNeeded>() {
            if frame.saturating_sub(released.since_frame) >= linger {
                self.despawn_buffer.push(entity);
            }
        }
        for entity in self.despawn_buffer.drain(..) {
            trace!(?entity, "reaping released actor");
            let _ = self.world.despawn(entity);
        }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Creation requests still waiting on the world.
    pub fn pending_creations(&self) -> usize {
        self.pending.len()
    }

    /// Spawn an actor immediately, bypassing creation latency.
    pub fn spawn_actor(&mut self, model: ActorModel, position: Vec3) -> ActorId {
        let entity = self.world.spawn((
            Actor { model },
            Transform {
                position,
                heading: 0.0,
            },
            Vitals::default(),
            Loadout::default(),
            Membership::default(),
        ));
        debug!(?model, actor = ?to_actor(entity), frame = self.frame, "actor spawned");
        to_actor(entity)
    }

    // --- Scripting hooks ---

    /// Kill an actor, recording `killer` as the cause.
    pub fn kill_actor(&mut self, victim: ActorId, killer: Option<ActorId>) {
        match self.component_mut::<Vitals>(victim) {
            Ok(mut vitals) => {
                vitals.dead = true;
                vitals.killer = killer;
            }
            Err(err) => warn!(error = %err, "kill_actor on missing actor"),
        }
    }

    /// Remove an actor outright, as if the host deleted it.
    pub fn delete_actor(&mut self, actor: ActorId) {
        match self.entity(actor) {
            Ok(entity) if self.world.despawn(entity).is_ok() => {
                debug!(?actor, "actor deleted by host");
            }
            _ => warn!(?actor, "delete_actor on missing actor"),
        }
    }

    pub fn kill_player(&mut self) {
        let player = to_actor(self.player);
        self.kill_actor(player, None);
    }

    /// Make the next `successes` creations succeed and the one after fail.
    pub fn fail_creation_after(&mut self, successes: u32) {
        self.fail_creation_in = Some(successes);
    }

    /// Stop materializing new actors, so creations wait until they time out.
    pub fn stall_creations(&mut self, stalled: bool) {
        self.stalled = stalled;
    }

    pub fn set_heading(&mut self, actor: ActorId, heading: f32) {
        if let Ok(mut transform) = self.component_mut::<Transform>(actor) {
            transform.heading = heading;
        }
    }

    // --- Inspection ---

    pub fn hud_log(&self) -> &[HudEvent] {
        &self.hud_log
    }

    pub fn count_hud(&self, message: HudMessage) -> usize {
        self.hud_log
            .iter()
            .filter(|event| event.message() == Some(message))
            .count()
    }

    pub fn minimap_flashes(&self) -> usize {
        self.hud_log
            .iter()
            .filter(|event| matches!(event, HudEvent::MinimapFlash))
            .count()
    }

    /// All live actors of a model, ordered by id.
    pub fn actors_with_model(&self, model: ActorModel) -> Vec<ActorId> {
        let mut actors: Vec<ActorId> = self
            .world
            .query::<&Actor>()
            .iter()
            .filter(|(_, actor)| actor.model == model)
            .map(|(entity, _)| to_actor(entity))
            .collect();
        actors.sort();
        actors
    }

    pub fn actor_exists(&self, actor: ActorId) -> bool {
        self.entity(actor).is_ok_and(|e| self.world.contains(e))
    }

    pub fn is_no_longer_needed(&self, actor: ActorId) -> bool {
        self.component::<NoLongerNeeded>(actor).is_some()
    }

    pub fn armor(&self, actor: ActorId) -> Option<u32> {
        self.component::<Vitals>(actor).map(|v| v.armor)
    }

    pub fn loadout(&self, actor: ActorId) -> Option<Loadout> {
        self.component::<Loadout>(actor)
    }

    pub fn activity(&self, actor: ActorId) -> Option<Activity> {
        self.component::<Activity>(actor)
    }

    pub fn membership(&self, actor: ActorId) -> Option<Membership> {
        self.component::<Membership>(actor)
    }

    pub fn squad(&self, squad: SquadId) -> Option<&Squad> {
        self.squads.get(&squad)
    }

    pub fn squad_count(&self) -> usize {
        self.squads.len()
    }

    pub fn blip_count(&self) -> usize {
        self.blips.len()
    }

    pub fn blip_on(&self, actor: ActorId) -> Option<&BlipStyle> {
        self.blips
            .values()
            .find(|(owner, _)| *owner == actor)
            .map(|(_, style)| style)
    }

    pub fn relationship(
        &self,
        from: RelationshipGroupId,
        to: RelationshipGroupId,
    ) -> Relationship {
        self.relationships
            .get(&(from, to))
            .copied()
            .unwrap_or_default()
    }

    pub fn group_name(&self, group: RelationshipGroupId) -> Option<&str> {
        self.group_names.get(group.0 as usize).map(String::as_str)
    }

    /// Number of relationship groups, built-in factions included.
    pub fn group_count(&self) -> usize {
        self.group_names.len()
    }

    // --- Internals ---

    fn entity(&self, actor: ActorId) -> Result<Entity, WorldError> {
        Entity::from_bits(actor.0).ok_or(WorldError::UnknownActor(actor))
    }

    fn component<T: hecs::Component + Clone>(&self, actor: ActorId) -> Option<T> {
        let entity = self.entity(actor).ok()?;
        self.world.get::<&T>(entity).ok().map(|c| (*c).clone())
    }

    fn component_mut<T: hecs::Component>(
        &self,
        actor: ActorId,
    ) -> Result<hecs::RefMut<'_, T>, WorldError> {
        let entity = self.entity(actor)?;
        self.world
            .get::<&mut T>(entity)
            .map_err(|_| WorldError::UnknownActor(actor))
    }

    /// Forget creations nobody is waiting for. An actor that already
    /// materialized for one was never handed out, so it is removed.
    fn drop_abandoned(&mut self) {
        let tickets = match self.abandoned.lock() {
            Ok(mut abandoned) => std::mem::take(&mut *abandoned),
            Err(_) => return,
        };
        for ticket in tickets {
            let Some(pending) = self.pending.remove(&ticket) else {
                continue;
            };
            debug!(ticket, model = ?pending.model, "dropping abandoned creation");
            if let Some(actor) = pending.spawned {
                if let Ok(entity) = self.entity(actor) {
                    let _ = self.world.despawn(entity);
                }
            }
        }
    }

    fn take_creation_failure(&mut self) -> bool {
        match self.fail_creation_in {
            Some(0) => {
                self.fail_creation_in = None;
                true
            }
            Some(ref mut remaining) => {
                *remaining -= 1;
                false
            }
            None => false,
        }
    }
}

impl Default for SimWorld {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

fn to_actor(entity: Entity) -> ActorId {
    ActorId(entity.to_bits().get())
}

#[async_trait]
impl EntityFactory for SimWorld {
    async fn create_actor(
        &mut self,
        model: ActorModel,
        position: Vec3,
    ) -> Result<ActorId, WorldError> {
        if self.take_creation_failure() {
            return Err(WorldError::CreationFailed {
                model,
                reason: "model request rejected".into(),
            });
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        let ready_at_frame = if self.stalled {
            u64::MAX
        } else {
            self.frame + u64::from(self.config.creation_latency_frames)
        };
        self.pending.insert(
            ticket,
            PendingCreation {
                model,
                position,
                ready_at_frame,
                spawned: None,
            },
        );

        let mut guard = TicketGuard {
            ticket,
            abandoned: Arc::clone(&self.abandoned),
            armed: true,
        };
        let mut waited = 0;
        loop {
            if let Some(actor) = self.pending.get(&ticket).and_then(|p| p.spawned) {
                self.pending.remove(&ticket);
                guard.armed = false;
                return Ok(actor);
            }
            if waited >= self.config.creation_timeout_frames {
                self.pending.remove(&ticket);
                guard.armed = false;
                return Err(WorldError::CreationTimedOut {
                    model,
                    frames: waited,
                });
            }
            waited += 1;
            self.advance_frame();
            tokio::task::yield_now().await;
        }
    }
}

impl ActorWorld for SimWorld {
    fn is_dead(&self, actor: ActorId) -> Result<bool, WorldError> {
        let entity = self.entity(actor)?;
        self.world
            .get::<&Vitals>(entity)
            .map(|v| v.dead)
            .map_err(|_| WorldError::UnknownActor(actor))
    }

    fn killer_of(&self, actor: ActorId) -> Option<ActorId> {
        self.component::<Vitals>(actor).and_then(|v| v.killer)
    }

    fn position(&self, actor: ActorId) -> Result<Vec3, WorldError> {
        self.component::<Transform>(actor)
            .map(|t| t.position)
            .ok_or(WorldError::UnknownActor(actor))
    }

    fn offset_position(&self, actor: ActorId, offset: Vec3) -> Result<Vec3, WorldError> {
        let transform = self
            .component::<Transform>(actor)
            .ok_or(WorldError::UnknownActor(actor))?;
        let rotation = Quat::from_rotation_z(transform.heading);
        Ok(transform.position + rotation * offset)
    }

    fn set_armor(&mut self, actor: ActorId, armor: u32) -> Result<(), WorldError> {
        self.component_mut::<Vitals>(actor)?.armor = armor;
        Ok(())
    }

    fn give_weapon(
        &mut self,
        actor: ActorId,
        weapon: WeaponKind,
        ammo: u32,
        equip: bool,
    ) -> Result<(), WorldError> {
        let mut loadout = self.component_mut::<Loadout>(actor)?;
        match loadout.weapons.iter_mut().find(|(kind, _)| *kind == weapon) {
            Some((_, carried)) => *carried = carried.saturating_add(ammo),
            None => loadout.weapons.push((weapon, ammo)),
        }
        if equip {
            loadout.equipped = Some(weapon);
        }
        Ok(())
    }

    fn start_scenario(
        &mut self,
        actor: ActorId,
        scenario: Scenario,
        position: Vec3,
    ) -> Result<(), WorldError> {
        let entity = self.entity(actor)?;
        self.world
            .insert_one(
                entity,
                Activity {
                    scenario,
                    anchor: position,
                },
            )
            .map_err(|_| WorldError::UnknownActor(actor))
    }

    fn add_relationship_group(&mut self, name: &str) -> RelationshipGroupId {
        if let Some(index) = self.group_names.iter().position(|n| n == name) {
            return RelationshipGroupId(index as u64);
        }
        self.group_names.push(name.to_string());
        RelationshipGroupId(self.group_names.len() as u64 - 1)
    }

    fn faction_group(&self, faction: Faction) -> RelationshipGroupId {
        match faction {
            Faction::Police => RelationshipGroupId(0),
            Faction::SecurityGuard => RelationshipGroupId(1),
        }
    }

    fn set_relationship(
        &mut self,
        from: RelationshipGroupId,
        to: RelationshipGroupId,
        relationship: Relationship,
        bidirectional: bool,
    ) {
        self.relationships.insert((from, to), relationship);
        if bidirectional {
            self.relationships.insert((to, from), relationship);
        }
    }

    fn set_relationship_group(
        &mut self,
        actor: ActorId,
        group: RelationshipGroupId,
    ) -> Result<(), WorldError> {
        self.component_mut::<Membership>(actor)?.relationship_group = Some(group);
        Ok(())
    }

    fn create_squad(&mut self) -> SquadId {
        let id = SquadId(self.next_squad);
        self.next_squad += 1;
        self.squads.insert(id, Squad::default());
        id
    }

    fn add_to_squad(
        &mut self,
        squad: SquadId,
        actor: ActorId,
        leader: bool,
    ) -> Result<(), WorldError> {
        self.component_mut::<Membership>(actor)?.squad = Some(squad);
        let entry = self.squads.entry(squad).or_default();
        if leader {
            entry.leader = Some(actor);
        } else {
            entry.followers.push(actor);
        }
        Ok(())
    }

    fn configure_squad(&mut self, squad: SquadId, formation: FormationType, separation: f32) {
        let entry = self.squads.entry(squad).or_default();
        entry.formation = formation;
        entry.separation = separation;
    }

    fn mark_no_longer_needed(&mut self, actor: ActorId) {
        let since_frame = self.frame;
        match self.entity(actor) {
            Ok(entity) if self.world.contains(entity) => {
                let _ = self
                    .world
                    .insert_one(entity, NoLongerNeeded { since_frame });
            }
            _ => warn!(?actor, "mark_no_longer_needed on missing actor"),
        }
    }

    fn attach_blip(&mut self, actor: ActorId, style: BlipStyle) -> Result<BlipId, WorldError> {
        if !self.actor_exists(actor) {
            return Err(WorldError::UnknownActor(actor));
        }
        let id = BlipId(self.next_blip);
        self.next_blip += 1;
        self.blips.insert(id, (actor, style));
        Ok(id)
    }

    fn remove_blip(&mut self, blip: BlipId) {
        if self.blips.remove(&blip).is_none() {
            warn!(?blip, "remove_blip on unknown blip");
        }
    }
}

impl Hud for SimWorld {
    fn show_notification(&mut self, message: HudMessage) {
        self.hud_log.push(HudEvent::Notification { message });
    }

    fn show_subtitle(&mut self, message: HudMessage, duration: Duration) {
        self.hud_log.push(HudEvent::Subtitle { message, duration });
    }

    fn display_help(&mut self, message: HudMessage) {
        self.hud_log.push(HudEvent::Help { message });
    }

    fn flash_minimap(&mut self) {
        self.hud_log.push(HudEvent::MinimapFlash);
    }
}

impl PlayerState for SimWorld {
    fn player_actor(&self) -> ActorId {
        to_actor(self.player)
    }

    fn is_player_dead(&self) -> bool {
        self.world
            .get::<&Vitals>(self.player)
            .map(|v| v.dead)
            .unwrap_or(true)
    }

    fn wanted_level(&self) -> u8 {
        self.wanted_level
    }

    fn set_wanted_level(&mut self, level: u8) {
        self.wanted_level = level.min(5);
    }
}

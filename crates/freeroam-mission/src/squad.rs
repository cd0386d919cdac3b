//! Squad builder: bodyguards around a target.
//!
//! Relationship setup is written once per mission start through
//! `setup_relationships`; the builder only assigns the resulting group.

use glam::Vec3;
use rand::Rng;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use freeroam_core::config::MissionConfig;
use freeroam_core::constants::*;
use freeroam_core::enums::*;
use freeroam_core::error::{MissionError, WorldError};
use freeroam_core::types::{ActorId, RelationshipGroupId, SquadId};
use freeroam_core::world::{ActorWorld, EntityFactory};

use crate::factory::{self, SpawnError};

/// Guard placement and equipment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquadSettings {
    pub spread: f32,
    pub armor: u32,
    pub ammo: u32,
    pub separation: f32,
    pub formation: FormationType,
}

impl Default for SquadSettings {
    fn default() -> Self {
        Self {
            spread: GUARD_SPREAD,
            armor: GUARD_ARMOR,
            ammo: GUARD_AMMO,
            separation: SQUAD_SEPARATION,
            formation: FormationType::Default,
        }
    }
}

impl From<&MissionConfig> for SquadSettings {
    fn from(config: &MissionConfig) -> Self {
        Self {
            spread: config.guard_spread,
            armor: config.guard_armor,
            ..Self::default()
        }
    }
}

/// Why a squad could not be completed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("guard count must be at least 1, got {0}")]
    InvalidGuardCount(u32),
    #[error(transparent)]
    Spawn(#[from] SpawnError),
}

impl From<WorldError> for BuildError {
    fn from(err: WorldError) -> Self {
        Self::Spawn(SpawnError::World(err))
    }
}

impl BuildError {
    pub fn into_mission_error(self, ready_slots: usize) -> MissionError {
        match self {
            Self::InvalidGuardCount(count) => MissionError::InvalidGuardCount(count),
            Self::Spawn(err) => err.into_mission_error(ready_slots),
        }
    }
}

/// A squad build that stopped part way. Holds the guards already created
/// so the caller can release them.
#[derive(Debug, Clone, PartialEq)]
pub struct SquadError {
    pub guards: Vec<ActorId>,
    pub cause: BuildError,
}

impl SquadError {
    pub fn new(guards: Vec<ActorId>, cause: impl Into<BuildError>) -> Self {
        Self {
            guards,
            cause: cause.into(),
        }
    }
}

/// Create the target relationship group and make it respect law
/// enforcement and private security, both ways.
pub fn setup_relationships<W: ActorWorld + ?Sized>(world: &mut W) -> RelationshipGroupId {
    let targets = world.add_relationship_group(TARGET_RELATIONSHIP_GROUP);
    for faction in [Faction::Police, Faction::SecurityGuard] {
        let group = world.faction_group(faction);
        world.set_relationship(targets, group, Relationship::Respect, true);
    }
    debug!(group = ?targets, "target relationships configured");
    targets
}

/// Uniform offset within +/- `spread` on x and y, independent per axis.
pub fn random_guard_offset<R: Rng>(rng: &mut R, spread: f32) -> Vec3 {
    let x = rng.gen_range(-spread..=spread);
    let y = rng.gen_range(-spread..=spread);
    Vec3::new(x, y, 0.0)
}

pub struct SquadBuilder {
    settings: SquadSettings,
    target_group: RelationshipGroupId,
}

impl SquadBuilder {
    pub fn new(settings: SquadSettings, target_group: RelationshipGroupId) -> Self {
        Self {
            settings,
            target_group,
        }
    }

    pub fn settings(&self) -> &SquadSettings {
        &self.settings
    }

    /// Put `target` at the head of a new squad and surround it with
    /// `guard_count` armed guards. Guards are returned in creation order.
    pub async fn build<W, R>(
        &self,
        world: &mut W,
        rng: &mut R,
        target: ActorId,
        guard_count: u32,
        cancel: &CancellationToken,
    ) -> Result<Vec<ActorId>, SquadError>
    where
        W: EntityFactory + ActorWorld + ?Sized,
        R: Rng + Send,
    {
        if guard_count == 0 {
            return Err(SquadError::new(
                Vec::new(),
                BuildError::InvalidGuardCount(guard_count),
            ));
        }

        let squad = world.create_squad();
        world
            .add_to_squad(squad, target, true)
            .map_err(|err| SquadError::new(Vec::new(), err))?;
        world.configure_squad(squad, self.settings.formation, self.settings.separation);
        world
            .set_relationship_group(target, self.target_group)
            .map_err(|err| SquadError::new(Vec::new(), err))?;

        let guard_group = world.faction_group(Faction::SecurityGuard);
        let mut guards = Vec::with_capacity(guard_count as usize);
        for _ in 0..guard_count {
            let offset = random_guard_offset(rng, self.settings.spread);
            let position = match world.offset_position(target, offset) {
                Ok(position) => position,
                Err(err) => return Err(SquadError::new(guards, err)),
            };

            let guard =
                match factory::create_actor(world, ActorModel::GuardAgent, position, cancel).await {
                    Ok(guard) => guard,
                    Err(cause) => return Err(SquadError::new(guards, cause)),
                };
            // Owned from here on, even if arming fails.
            guards.push(guard);

            if let Err(err) = self.arm_guard(world, squad, guard, guard_group) {
                return Err(SquadError::new(guards, err));
            }
            debug!(?guard, target_actor = ?target, ?offset, "guard spawned");
        }

        Ok(guards)
    }

    fn arm_guard<W: ActorWorld + ?Sized>(
        &self,
        world: &mut W,
        squad: SquadId,
        guard: ActorId,
        guard_group: RelationshipGroupId,
    ) -> Result<(), WorldError> {
        world.set_armor(guard, self.settings.armor)?;
        world.give_weapon(guard, WeaponKind::CarbineRifle, self.settings.ammo, true)?;
        world.set_relationship_group(guard, guard_group)?;
        world.add_to_squad(squad, guard, false)?;
        Ok(())
    }
}

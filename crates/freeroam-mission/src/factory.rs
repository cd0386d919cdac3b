//! Entity factory adapter: actor creation that can be cancelled.

use glam::Vec3;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use freeroam_core::enums::ActorModel;
use freeroam_core::error::{MissionError, WorldError};
use freeroam_core::types::ActorId;
use freeroam_core::world::EntityFactory;

/// Why a creation step did not produce an actor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpawnError {
    #[error("creation cancelled")]
    Cancelled,
    #[error(transparent)]
    World(#[from] WorldError),
}

impl SpawnError {
    /// Convert into the mission-level error, given how many slots were
    /// fully ready when the failure happened.
    pub fn into_mission_error(self, ready_slots: usize) -> MissionError {
        match self {
            Self::Cancelled => MissionError::Cancelled { ready_slots },
            Self::World(err) => MissionError::World(err),
        }
    }
}

/// Create an actor, giving up as soon as `cancel` fires.
///
/// A creation abandoned mid-flight is the host's to clean up; the mission
/// never sees its handle.
pub async fn create_actor<W>(
    world: &mut W,
    model: ActorModel,
    position: Vec3,
    cancel: &CancellationToken,
) -> Result<ActorId, SpawnError>
where
    W: EntityFactory + ?Sized,
{
    if cancel.is_cancelled() {
        return Err(SpawnError::Cancelled);
    }

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(SpawnError::Cancelled),
        created = world.create_actor(model, position) => created.map_err(SpawnError::from),
    }
}

//! Despawn: hand a slot's actors back to the world.

use tracing::debug;

use freeroam_core::types::ActorId;
use freeroam_core::world::ActorWorld;

use crate::registry::TargetSlot;

/// Remove the target's blip and release the target and every guard.
///
/// Takes the slot by value, so a slot cannot be released twice.
pub fn despawn<W: ActorWorld + ?Sized>(world: &mut W, slot: TargetSlot) {
    debug!(
        target_actor = ?slot.target,
        guards = slot.guards.len(),
        "despawning target squad"
    );
    world.remove_blip(slot.blip);
    world.mark_no_longer_needed(slot.target);
    for guard in slot.guards {
        world.mark_no_longer_needed(guard);
    }
}

/// Release the actors of a slot that never became ready.
pub fn release_partial<W: ActorWorld + ?Sized>(
    world: &mut W,
    target: Option<ActorId>,
    guards: &[ActorId],
) {
    debug!(
        target_actor = ?target,
        guards = guards.len(),
        "releasing partially built squad"
    );
    if let Some(target) = target {
        world.mark_no_longer_needed(target);
    }
    for &guard in guards {
        world.mark_no_longer_needed(guard);
    }
}

//! Scripted player for the headless runner.
//!
//! Stands in for a human: every `kill_interval` frames it shoots the
//! lowest-id target still standing, and optionally dies at a fixed frame.

use tracing::info;

use freeroam_core::enums::ActorModel;
use freeroam_core::world::{ActorWorld, PlayerState};
use freeroam_sim::SimWorld;

#[derive(Debug, Clone)]
pub struct PlayerScript {
    kill_interval: u64,
    die_at_frame: Option<u64>,
    next_kill: u64,
}

impl PlayerScript {
    pub fn new(kill_interval: u64, die_at_frame: Option<u64>) -> Self {
        let kill_interval = kill_interval.max(1);
        Self {
            kill_interval,
            die_at_frame,
            next_kill: kill_interval,
        }
    }

    /// Act on the current frame.
    pub fn act(&mut self, world: &mut SimWorld) {
        let frame = world.frame();
        if world.is_player_dead() {
            return;
        }
        if self.die_at_frame.is_some_and(|at| frame >= at) {
            info!(frame, "scripted player dies");
            world.kill_player();
            return;
        }
        if frame < self.next_kill {
            return;
        }
        self.next_kill = frame + self.kill_interval;

        let player = world.player_actor();
        let victim = world
            .actors_with_model(ActorModel::TargetCivilian)
            .into_iter()
            .find(|&actor| world.is_dead(actor) == Ok(false) && !world.is_no_longer_needed(actor));
        if let Some(victim) = victim {
            info!(frame, ?victim, "scripted player shoots target");
            world.kill_actor(victim, Some(player));
        }
    }
}

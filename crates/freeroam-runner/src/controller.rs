//! Minimal mission controller.
//!
//! Owns the signal bus a mission emits into and reacts to what comes out of
//! it: a `MissionStop` is answered with `stop`, rewards are credited to the
//! player's ledger.

use std::mem;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use freeroam_core::commands::MissionCommand;
use freeroam_core::enums::MissionPhase;
use freeroam_core::error::MissionError;
use freeroam_core::events::MissionSignal;
use freeroam_core::state::MissionSnapshot;
use freeroam_core::world::MissionWorld;
use freeroam_mission::{Mission, TickOutcome};

/// Money and experience credited by finished missions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Rewards {
    pub money: i64,
    pub xp: i64,
}

pub struct MissionController<W: MissionWorld + 'static> {
    mission: Box<dyn Mission<W>>,
    bus: Vec<MissionSignal>,
    rewards: Rewards,
}

impl<W: MissionWorld + 'static> MissionController<W> {
    pub fn new(mission: Box<dyn Mission<W>>) -> Self {
        Self {
            mission,
            bus: Vec::new(),
            rewards: Rewards::default(),
        }
    }

    pub fn rewards(&self) -> Rewards {
        self.rewards
    }

    pub fn phase(&self) -> MissionPhase {
        self.mission.phase()
    }

    pub fn snapshot(&self) -> MissionSnapshot {
        self.mission.snapshot()
    }

    pub async fn start(
        &mut self,
        world: &mut W,
        cancel: &CancellationToken,
    ) -> Result<(), MissionError> {
        self.mission.start(world, cancel).await
    }

    /// Apply a command that does not need the async runtime. `Start` is
    /// handled by the caller through [`MissionController::start`].
    pub fn apply(&mut self, world: &mut W, command: MissionCommand) {
        match command {
            MissionCommand::Stop { success } => {
                self.mission.stop(world, &mut self.bus, success);
                self.dispatch(world);
            }
            MissionCommand::Start | MissionCommand::Cancel => {
                warn!(?command, "command ignored by controller");
            }
        }
    }

    /// Run one mission tick and answer whatever it signalled.
    pub fn tick(&mut self, world: &mut W) -> TickOutcome {
        let outcome = self.mission.tick(world, &mut self.bus);
        self.dispatch(world);
        outcome
    }

    fn dispatch(&mut self, world: &mut W) {
        // Stopping can emit rewards, so drain until quiet.
        while !self.bus.is_empty() {
            for signal in mem::take(&mut self.bus) {
                match signal {
                    MissionSignal::MissionStop { success } => {
                        info!(success, "controller stopping mission");
                        self.mission.stop(world, &mut self.bus, success);
                    }
                    MissionSignal::MoneyAdd { amount } => {
                        self.rewards.money += i64::from(amount);
                    }
                    MissionSignal::XpAdd { amount } => {
                        self.rewards.xp += i64::from(amount);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use freeroam_core::config::MissionConfig;
    use freeroam_core::enums::{ActorModel, MissionOutcome};
    use freeroam_core::world::PlayerState;
    use freeroam_mission::Assassination;
    use freeroam_sim::SimWorld;

    fn controller() -> MissionController<SimWorld> {
        MissionController::new(Box::new(Assassination::new(MissionConfig::default())))
    }

    #[tokio::test]
    async fn test_success_credits_rewards_once() {
        let mut world = SimWorld::default();
        let mut controller = controller();
        controller
            .start(&mut world, &CancellationToken::new())
            .await
            .unwrap();

        let player = world.player_actor();
        for target in world.actors_with_model(ActorModel::TargetCivilian) {
            world.kill_actor(target, Some(player));
        }
        assert_eq!(controller.tick(&mut world), TickOutcome::AllTargetsEliminated);
        controller.tick(&mut world);

        assert_eq!(
            controller.phase(),
            MissionPhase::Stopped(MissionOutcome::Success)
        );
        assert_eq!(controller.rewards(), Rewards { money: 5000, xp: 30 });
    }

    #[tokio::test]
    async fn test_player_death_releases_targets() {
        let mut world = SimWorld::default();
        let mut controller = controller();
        controller
            .start(&mut world, &CancellationToken::new())
            .await
            .unwrap();

        world.kill_player();
        assert_eq!(controller.tick(&mut world), TickOutcome::PlayerDied);

        assert_eq!(
            controller.phase(),
            MissionPhase::Stopped(MissionOutcome::Failure)
        );
        assert_eq!(controller.rewards(), Rewards::default());
        assert_eq!(world.blip_count(), 0);
    }

    #[tokio::test]
    async fn test_stop_command_fails_mission() {
        let mut world = SimWorld::default();
        let mut controller = controller();
        controller
            .start(&mut world, &CancellationToken::new())
            .await
            .unwrap();

        controller.apply(&mut world, MissionCommand::Stop { success: false });
        assert_eq!(controller.snapshot().living_targets, 0);
        assert_eq!(controller.tick(&mut world), TickOutcome::Idle);
    }
}

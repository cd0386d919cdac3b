//! Assassination mission state machine.
//!
//! `start` creates the six target squads one after another, `tick` polls
//! them once per host frame, and `stop` settles rewards or releases
//! whatever is still spawned.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use freeroam_core::config::MissionConfig;
use freeroam_core::constants::*;
use freeroam_core::enums::*;
use freeroam_core::error::{MissionError, WorldError};
use freeroam_core::events::{HudMessage, MissionSignal};
use freeroam_core::state::MissionSnapshot;
use freeroam_core::types::{ActorId, BlipStyle};
use freeroam_core::world::{MissionWorld, SignalBus};

use crate::cleanup;
use crate::factory;
use crate::registry::{TargetRegistry, TargetSlot};
use crate::squad::{self, BuildError, SquadBuilder, SquadError, SquadSettings};

/// What a single tick observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Evaluation is not running.
    Idle,
    /// Targets remain; no signal was emitted.
    Running { living_targets: u32 },
    /// The player died; `MissionStop(false)` was emitted.
    PlayerDied,
    /// The last target was cleared; `MissionStop(true)` was emitted.
    AllTargetsEliminated,
}

pub struct Assassination {
    config: MissionConfig,
    rng: ChaCha8Rng,
    phase: MissionPhase,
    /// Gate for per-tick evaluation. Closes as soon as a stop is requested.
    evaluating: bool,
    registry: TargetRegistry,
}

impl Assassination {
    pub fn new(config: MissionConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            phase: MissionPhase::NotStarted,
            evaluating: false,
            registry: TargetRegistry::new(),
        }
    }

    pub fn phase(&self) -> MissionPhase {
        self.phase
    }

    pub fn is_evaluating(&self) -> bool {
        self.evaluating
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    pub fn config(&self) -> &MissionConfig {
        &self.config
    }

    pub fn snapshot(&self) -> MissionSnapshot {
        MissionSnapshot {
            phase: self.phase,
            slots: self.registry.views(),
            living_targets: self.registry.ready_count() as u32,
        }
    }

    /// Create every target squad in slot order, then announce the mission.
    ///
    /// If `cancel` fires or a creation fails, every slot created so far is
    /// released and the mission ends in `Stopped(Failure)`. An invalid
    /// config is rejected before anything is created.
    pub async fn start<W>(
        &mut self,
        world: &mut W,
        cancel: &CancellationToken,
    ) -> Result<(), MissionError>
    where
        W: MissionWorld + ?Sized,
    {
        if self.phase != MissionPhase::NotStarted {
            warn!(phase = ?self.phase, "start called twice");
            return Err(MissionError::AlreadyStarted);
        }
        if let Err(err) = self.config.validate() {
            warn!(error = %err, "refusing to start with invalid config");
            return Err(MissionError::InvalidConfig(err.to_string()));
        }
        self.phase = MissionPhase::Starting;
        info!(targets = TARGET_COUNT, seed = self.config.seed, "assassination starting");

        let target_group = squad::setup_relationships(world);
        let builder = SquadBuilder::new(SquadSettings::from(&self.config), target_group);

        for index in 0..TARGET_COUNT {
            if let Err(cause) = self.create_slot(world, &builder, index, cancel).await {
                let ready_slots = self.registry.ready_count();
                warn!(index, ready_slots, error = %cause, "assassination start aborted");
                for slot in self.registry.take_all_ready() {
                    cleanup::despawn(world, slot);
                }
                self.phase = MissionPhase::Stopped(MissionOutcome::Failure);
                return Err(cause.into_mission_error(ready_slots));
            }
        }

        world.flash_minimap();
        world.display_help(HudMessage::AssassinationInfo);
        world.show_subtitle(
            HudMessage::AssassinationStart,
            self.config.start_subtitle_duration(),
        );
        self.phase = MissionPhase::Active;
        self.evaluating = true;
        info!("assassination active");
        Ok(())
    }

    /// Evaluate the world once. No-op unless evaluation is running.
    pub fn tick<W>(&mut self, world: &mut W, bus: &mut dyn SignalBus) -> TickOutcome
    where
        W: MissionWorld + ?Sized,
    {
        if !self.evaluating {
            return TickOutcome::Idle;
        }

        if world.is_player_dead() {
            info!("player died, failing assassination");
            self.evaluating = false;
            bus.emit(MissionSignal::MissionStop { success: false });
            return TickOutcome::PlayerDied;
        }

        let player = world.player_actor();
        let mut living_targets = 0;
        // Highest index first; clearing a slot never disturbs the ones
        // still to visit.
        let ready: Vec<(usize, ActorId)> = self
            .registry
            .iter_ready_rev()
            .map(|(index, slot)| (index, slot.target))
            .collect();
        for (index, target) in ready {
            match world.is_dead(target) {
                Ok(false) => living_targets += 1,
                Ok(true) => self.eliminate(world, index, target, player),
                Err(WorldError::UnknownActor(_)) => self.forget(world, index, target),
                Err(err) => {
                    warn!(index, error = %err, "target lookup failed, counting as alive");
                    living_targets += 1;
                }
            }
        }

        if living_targets == 0 {
            info!("all assassination targets eliminated");
            self.evaluating = false;
            bus.emit(MissionSignal::MissionStop { success: true });
            return TickOutcome::AllTargetsEliminated;
        }

        TickOutcome::Running { living_targets }
    }

    /// Settle the mission. Failure releases every populated slot; success
    /// shows the completion notice and grants the rewards.
    pub fn stop<W>(&mut self, world: &mut W, bus: &mut dyn SignalBus, success: bool)
    where
        W: MissionWorld + ?Sized,
    {
        if let MissionPhase::Stopped(outcome) = self.phase {
            warn!(?outcome, success, "stop called on a stopped mission");
            return;
        }
        self.evaluating = false;

        let outcome = MissionOutcome::from_success(success);
        match outcome {
            MissionOutcome::Failure => {
                let slots = self.registry.take_all_ready();
                info!(released = slots.len(), "assassination failed");
                for slot in slots {
                    cleanup::despawn(world, slot);
                }
            }
            MissionOutcome::Success => {
                let remaining = self.registry.ready_count();
                if remaining > 0 {
                    warn!(remaining, "assassination succeeded with targets still spawned");
                }
                world.show_notification(HudMessage::AllTargetsKilled);
                bus.emit(MissionSignal::MoneyAdd {
                    amount: self.config.money_reward,
                });
                bus.emit(MissionSignal::XpAdd {
                    amount: self.config.xp_reward,
                });
                info!(
                    money = self.config.money_reward,
                    xp = self.config.xp_reward,
                    "assassination complete"
                );
            }
        }
        self.phase = MissionPhase::Stopped(outcome);
    }

    async fn create_slot<W>(
        &mut self,
        world: &mut W,
        builder: &SquadBuilder,
        index: usize,
        cancel: &CancellationToken,
    ) -> Result<(), BuildError>
    where
        W: MissionWorld + ?Sized,
    {
        let spawn = self.config.target_spawns[index];
        self.registry.begin_creating(index);

        let target =
            match factory::create_actor(world, ActorModel::TargetCivilian, spawn, cancel).await {
                Ok(target) => target,
                Err(cause) => {
                    self.registry.abandon(index);
                    return Err(cause.into());
                }
            };

        let slot = match self.populate_slot(world, builder, target, cancel).await {
            Ok(slot) => slot,
            Err(SquadError { guards, cause }) => {
                cleanup::release_partial(world, Some(target), &guards);
                self.registry.abandon(index);
                return Err(cause);
            }
        };

        debug!(index, target_actor = ?target, guards = slot.guards.len(), "target slot ready");
        if let Err(slot) = self.registry.fill(index, slot) {
            cleanup::despawn(world, slot);
        }
        Ok(())
    }

    async fn populate_slot<W>(
        &mut self,
        world: &mut W,
        builder: &SquadBuilder,
        target: ActorId,
        cancel: &CancellationToken,
    ) -> Result<TargetSlot, SquadError>
    where
        W: MissionWorld + ?Sized,
    {
        let position = world
            .position(target)
            .map_err(|err| SquadError::new(Vec::new(), err))?;
        world
            .start_scenario(target, Scenario::Smoking, position)
            .map_err(|err| SquadError::new(Vec::new(), err))?;

        let guard_count = self
            .rng
            .gen_range(self.config.guard_count_min..=self.config.guard_count_max);
        let guards = builder
            .build(world, &mut self.rng, target, guard_count, cancel)
            .await?;

        let style = BlipStyle::enemy(TARGET_BLIP_NAME, self.config.blip_scale);
        match world.attach_blip(target, style) {
            Ok(blip) => Ok(TargetSlot {
                target,
                guards,
                blip,
            }),
            Err(err) => Err(SquadError::new(guards, err)),
        }
    }

    fn eliminate<W>(&mut self, world: &mut W, index: usize, target: ActorId, player: ActorId)
    where
        W: MissionWorld + ?Sized,
    {
        world.show_notification(HudMessage::TargetKilled);

        let killer = world.killer_of(target);
        if killer == Some(player) && world.wanted_level() < self.config.wanted_floor {
            world.set_wanted_level(self.config.wanted_floor);
        }
        info!(index, target_actor = ?target, ?killer, "assassination target eliminated");

        if let Some(slot) = self.registry.clear(index) {
            cleanup::despawn(world, slot);
        }
    }

    /// The host deleted the target. Nobody killed it, so there is no
    /// notice and no escalation, but the slot is settled and the guards
    /// and blip are released.
    fn forget<W>(&mut self, world: &mut W, index: usize, target: ActorId)
    where
        W: MissionWorld + ?Sized,
    {
        warn!(index, target_actor = ?target, "target vanished from the world");
        if let Some(slot) = self.registry.clear(index) {
            cleanup::despawn(world, slot);
        }
    }
}

//! Contract between a mission and the controller that runs it.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use freeroam_core::enums::MissionPhase;
use freeroam_core::error::MissionError;
use freeroam_core::state::MissionSnapshot;
use freeroam_core::world::{MissionWorld, SignalBus};

use crate::assassination::{Assassination, TickOutcome};

/// A scripted mission. The controller calls `start` once, `tick` every
/// frame, and `stop` when it observes a `MissionStop` signal.
#[async_trait]
pub trait Mission<W: MissionWorld + 'static>: Send {
    async fn start(&mut self, world: &mut W, cancel: &CancellationToken)
        -> Result<(), MissionError>;

    fn tick(&mut self, world: &mut W, bus: &mut dyn SignalBus) -> TickOutcome;

    fn stop(&mut self, world: &mut W, bus: &mut dyn SignalBus, success: bool);

    fn phase(&self) -> MissionPhase;

    fn snapshot(&self) -> MissionSnapshot;
}

#[async_trait]
impl<W: MissionWorld + 'static> Mission<W> for Assassination {
    async fn start(
        &mut self,
        world: &mut W,
        cancel: &CancellationToken,
    ) -> Result<(), MissionError> {
        Assassination::start(self, world, cancel).await
    }

    fn tick(&mut self, world: &mut W, bus: &mut dyn SignalBus) -> TickOutcome {
        Assassination::tick(self, world, bus)
    }

    fn stop(&mut self, world: &mut W, bus: &mut dyn SignalBus, success: bool) {
        Assassination::stop(self, world, bus, success)
    }

    fn phase(&self) -> MissionPhase {
        Assassination::phase(self)
    }

    fn snapshot(&self) -> MissionSnapshot {
        Assassination::snapshot(self)
    }
}

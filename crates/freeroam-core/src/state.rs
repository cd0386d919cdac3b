//! Mission snapshot: the externally visible state after a tick.

use serde::{Deserialize, Serialize};

use crate::enums::{MissionPhase, SlotStatus};
use crate::types::ActorId;

/// Complete mission state, suitable for logging or a debug overlay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissionSnapshot {
    pub phase: MissionPhase,
    pub slots: Vec<SlotView>,
    /// Ready slots whose target has not been cleared.
    pub living_targets: u32,
}

/// One target slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotView {
    pub index: usize,
    pub status: SlotStatus,
    pub target: Option<ActorId>,
    pub guard_count: u32,
}

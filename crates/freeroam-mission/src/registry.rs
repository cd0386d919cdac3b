//! Target registry: one slot per spawn location.
//!
//! A slot moves `Empty -> Creating -> Ready -> Cleared`. `Cleared` is
//! terminal for the run. An aborted start or a failed mission resets
//! populated slots to `Empty` after releasing them.

use std::mem;

use tracing::warn;

use freeroam_core::constants::TARGET_COUNT;
use freeroam_core::enums::SlotStatus;
use freeroam_core::state::SlotView;
use freeroam_core::types::{ActorId, BlipId};

/// A live target and the squad protecting it.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetSlot {
    pub target: ActorId,
    pub guards: Vec<ActorId>,
    /// Marker the mission owns and must remove.
    pub blip: BlipId,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SlotState {
    #[default]
    Empty,
    Creating,
    Ready(TargetSlot),
    Cleared,
}

impl SlotState {
    pub fn status(&self) -> SlotStatus {
        match self {
            Self::Empty => SlotStatus::Empty,
            Self::Creating => SlotStatus::Creating,
            Self::Ready(_) => SlotStatus::Ready,
            Self::Cleared => SlotStatus::Cleared,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TargetRegistry {
    slots: [SlotState; TARGET_COUNT],
}

impl Default for TargetRegistry {
    fn default() -> Self {
        Self {
            slots: std::array::from_fn(|_| SlotState::Empty),
        }
    }
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn state(&self, index: usize) -> Option<&SlotState> {
        self.slots.get(index)
    }

    pub fn states(&self) -> &[SlotState] {
        &self.slots
    }

    pub fn ready(&self, index: usize) -> Option<&TargetSlot> {
        match self.slots.get(index) {
            Some(SlotState::Ready(slot)) => Some(slot),
            _ => None,
        }
    }

    /// Ready slots, highest index first.
    pub fn iter_ready_rev(&self) -> impl Iterator<Item = (usize, &TargetSlot)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .rev()
            .filter_map(|(index, state)| match state {
                SlotState::Ready(slot) => Some((index, slot)),
                _ => None,
            })
    }

    pub fn ready_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s, SlotState::Ready(_)))
            .count()
    }

    /// Mark an empty slot as being created.
    pub fn begin_creating(&mut self, index: usize) -> bool {
        match self.slots.get_mut(index) {
            Some(state @ SlotState::Empty) => {
                *state = SlotState::Creating;
                true
            }
            other => {
                warn!(index, state = ?other.map(|s| s.status()), "begin_creating on non-empty slot");
                false
            }
        }
    }

    /// Return a slot whose creation failed to `Empty`.
    pub fn abandon(&mut self, index: usize) {
        if let Some(state @ SlotState::Creating) = self.slots.get_mut(index) {
            *state = SlotState::Empty;
        }
    }

    /// Store a freshly built slot. Hands the slot back if `index` was not
    /// being created, so the caller can release it.
    pub fn fill(&mut self, index: usize, slot: TargetSlot) -> Result<(), TargetSlot> {
        match self.slots.get_mut(index) {
            Some(state @ SlotState::Creating) => {
                *state = SlotState::Ready(slot);
                Ok(())
            }
            other => {
                warn!(index, state = ?other.map(|s| s.status()), "fill on slot that is not creating");
                Err(slot)
            }
        }
    }

    /// Clear a ready slot after its target died, returning what it held.
    pub fn clear(&mut self, index: usize) -> Option<TargetSlot> {
        let Some(state) = self.slots.get_mut(index) else {
            warn!(index, "clear on out-of-range slot");
            return None;
        };
        match mem::replace(state, SlotState::Cleared) {
            SlotState::Ready(slot) => Some(slot),
            previous => {
                warn!(index, state = ?previous.status(), "clear on slot that is not ready");
                *state = previous;
                None
            }
        }
    }

    /// Take every ready slot, leaving them empty.
    pub fn take_all_ready(&mut self) -> Vec<TargetSlot> {
        let mut taken = Vec::new();
        for state in &mut self.slots {
            if matches!(state, SlotState::Ready(_)) {
                if let SlotState::Ready(slot) = mem::take(state) {
                    taken.push(slot);
                }
            }
        }
        taken
    }

    pub fn views(&self) -> Vec<SlotView> {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, state)| {
                let (target, guard_count) = match state {
                    SlotState::Ready(slot) => (Some(slot.target), slot.guards.len() as u32),
                    _ => (None, 0),
                };
                SlotView {
                    index,
                    status: state.status(),
                    target,
                    guard_count,
                }
            })
            .collect()
    }
}

//! Recorded HUD output.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use freeroam_core::events::HudMessage;

/// One HUD call, in the order it was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HudEvent {
    Notification { message: HudMessage },
    Subtitle { message: HudMessage, duration: Duration },
    Help { message: HudMessage },
    MinimapFlash,
}

impl HudEvent {
    pub fn message(&self) -> Option<HudMessage> {
        match self {
            Self::Notification { message }
            | Self::Subtitle { message, .. }
            | Self::Help { message } => Some(*message),
            Self::MinimapFlash => None,
        }
    }
}

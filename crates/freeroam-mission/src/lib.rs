//! The Freeroam assassination mission.
//!
//! Spawns six targets, each with a randomly sized bodyguard squad, then
//! watches the world every tick until every target is dead (success) or
//! the player is (failure). All world access goes through the collaborator
//! traits in `freeroam_core::world`.

pub mod assassination;
pub mod cleanup;
pub mod factory;
pub mod mission;
pub mod registry;
pub mod squad;

pub use assassination::{Assassination, TickOutcome};
pub use freeroam_core as core;
pub use mission::Mission;

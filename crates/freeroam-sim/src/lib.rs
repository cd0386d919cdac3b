//! Headless host world for the Freeroam mission.
//!
//! Owns a hecs ECS world of actors and implements every collaborator trait
//! the mission consumes. Actor creation completes after a configurable
//! number of frames, deaths and kills are scripted, and all HUD output is
//! recorded, enabling deterministic testing without a game client.

pub mod components;
pub mod hud;
pub mod world;

pub use freeroam_core as core;
pub use world::{SimConfig, SimWorld};

#[cfg(test)]
mod tests;

//! Headless runner for the assassination mission.
//!
//! Wires the sim world, the mission, a minimal controller, and a scripted
//! player into a fixed-rate game loop thread.

pub mod controller;
pub mod error;
pub mod game_loop;
pub mod script;
pub mod state;

pub use freeroam_core as core;

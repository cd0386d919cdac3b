//! Core types and definitions for the Freeroam assassination mission.
//!
//! This crate defines the vocabulary shared across all other crates:
//! handles, enums, signals, HUD messages, configuration, errors, and the
//! traits through which the mission talks to the host world.
//! It has no dependency on any runtime or simulation backend.

pub mod commands;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
pub mod world;

#[cfg(test)]
mod tests;

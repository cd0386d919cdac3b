//! Error types shared by the mission and the host world.

use std::path::PathBuf;

use thiserror::Error;

use crate::enums::ActorModel;
use crate::types::ActorId;

/// Failures reported by the host world.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorldError {
    #[error("failed to create {model:?} actor: {reason}")]
    CreationFailed { model: ActorModel, reason: String },
    #[error("{model:?} actor was not confirmed after {frames} frames")]
    CreationTimedOut { model: ActorModel, frames: u32 },
    #[error("unknown actor {0:?}")]
    UnknownActor(ActorId),
}

/// Failures surfaced by the mission lifecycle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MissionError {
    #[error("mission was already started")]
    AlreadyStarted,
    #[error("invalid mission config: {0}")]
    InvalidConfig(String),
    #[error("mission start was cancelled after {ready_slots} ready slots")]
    Cancelled { ready_slots: usize },
    #[error("guard count must be at least 1, got {0}")]
    InvalidGuardCount(u32),
    #[error(transparent)]
    World(#[from] WorldError),
}

/// Failures loading a mission configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config at '{path}': {message}")]
    Parse { path: String, message: String },
    #[error("invalid config: {0}")]
    Invalid(String),
}

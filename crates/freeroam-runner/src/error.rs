//! Runner errors.

use thiserror::Error;

use freeroam_core::error::{ConfigError, MissionError};

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Mission(#[from] MissionError),
    #[error("failed to build async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("failed to spawn game loop thread: {0}")]
    Thread(#[source] std::io::Error),
    #[error("game loop thread panicked")]
    LoopPanicked,
}

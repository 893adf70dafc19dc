//! Error types for the engine.

use loom_core::ConfigurationError;
use thiserror::Error;

use crate::view::Handle;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors returned by the command entry points.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The story itself is broken.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// A command was issued before [`Engine::start`](crate::Engine::start).
    #[error("the story has not been started")]
    NotStarted,

    /// [`Engine::start`](crate::Engine::start) was called twice.
    #[error("the story has already been started")]
    AlreadyStarted,

    /// The handle belongs to a view that has since been replaced.
    #[error("handle {handle} is stale, current view is generation {current}")]
    StaleHandle {
        /// The rejected handle.
        handle: Handle,
        /// Generation of the view currently on display.
        current: u64,
    },

    /// [`Engine::navigate`](crate::Engine::navigate) was given an action handle.
    #[error("\"{0}\" is not an exit")]
    NotAnExit(String),
}

//! Core data types for Loom: identifiers, placements, variables, the output
//! log and the persisted snapshot.
//!
//! Everything in this crate is plain serializable data. It is what rendering
//! and persistence collaborators exchange with the engine; the engine itself
//! lives in `loom-engine`.

/// Identifiers and entity placement.
pub mod entity;
/// Error types used throughout the workspace.
pub mod error;
/// Append-only narrated output.
pub mod output;
/// Serializable subset of mutable engine state.
pub mod snapshot;
/// Variable maps attached to locations, entities and the story.
pub mod vars;

/// Re-export identifier types.
pub use entity::{EntityId, INVENTORY, LocationId, Placement};
/// Re-export error types.
pub use error::{ConfigResult, ConfigurationError};
/// Re-export output log types.
pub use output::{OutputEntry, OutputKind, OutputLog};
/// Re-export snapshot type.
pub use snapshot::Snapshot;
/// Re-export variable types.
pub use vars::{Value, Vars};

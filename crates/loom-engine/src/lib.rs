//! Narrative-state engine for Loom.
//!
//! Given a declarative story (locations, entities, actions, exits) the
//! [`Engine`] tracks where the player is, what they carry and every variable
//! the story keeps, and produces a fresh [`ViewState`] after each command.
//! Generic behaviours such as taking, combining, talking or cycling through
//! states are attached to entities through named properties, see
//! [`property`].
//!
//! Rendering and storage are left to collaborators: they read the view
//! state, invoke the handles it contains, and keep the [`Snapshot`]s that
//! [`Engine::save`] produces.

/// Engine configuration: locale, property registry and formatters.
pub mod config;
/// The engine and its command entry points.
pub mod engine;
/// Error types for the engine.
pub mod error;
/// Per-kind output formatting for rendering collaborators.
pub mod format;
/// Localized text tables.
pub mod locale;
/// Modal interaction lock.
pub mod lock;
/// Insertion-ordered name maps.
pub mod named;
/// Property extension protocol and the standard handlers.
pub mod property;
/// Authoring-time story description.
pub mod story;
/// Lazy texts, hooks and availability predicates.
pub mod text;
/// Renderable view state.
pub mod view;
/// The prepared world model.
pub mod world;

mod persist;
mod resolver;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use locale::Locale;
pub use lock::{InteractionLock, Modal, ModalAction};
pub use property::{Overridable, PropertyHandler, PropertyOptions, PropertyRegistry};
pub use story::{EntityDef, KeySet, LocationDef, StoryDef};
pub use text::{Availability, Hook, Text};
pub use view::{Handle, ViewState};
pub use world::{ActionSpec, ExitSpec, World};

pub use loom_core::{
    ConfigResult, ConfigurationError, EntityId, INVENTORY, LocationId, OutputEntry, OutputKind,
    OutputLog, Placement, Snapshot, Value, Vars,
};

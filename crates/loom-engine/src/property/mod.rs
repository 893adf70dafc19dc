//! Property extension protocol and the standard handlers.
//!
//! A property is a named, reusable behaviour attached to an entity or a
//! location. When the engine is built, the handler registered under that name
//! runs once per (owner, property) pair and inserts generated actions into
//! the owner's action map. Generated actions never replace authored actions
//! with the same name. Availability of generated actions is expressed as
//! predicates over live engine state, evaluated on every recompute.

mod changeable_state;
mod movable;
mod talkable;
mod usable_with;

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use loom_core::{ConfigResult, ConfigurationError, EntityId, LocationId};
use tracing::debug;

use crate::engine::Engine;
use crate::locale::Locale;
use crate::named::NamedMap;
use crate::text::Hook;
use crate::world::{ActionSpec, World};

pub use changeable_state::{ChangeableState, ChangeableStateOptions, StateChangeHook, StateDef};
pub use movable::{Movable, MovableOptions};
pub use talkable::{Talkable, TalkableOptions, Topic};
pub use usable_with::{Interaction, UsableWith, UsableWithOptions};

/// Registry name of the take/drop behaviour.
pub const MOVABLE: &str = "movable";
/// Registry name of the combine-with behaviour.
pub const USABLE_WITH: &str = "usableWith";
/// Registry name of the conversation behaviour.
pub const TALKABLE: &str = "talkable";
/// Registry name of the state-cycle behaviour.
pub const CHANGEABLE_STATE: &str = "changeableState";

/// Who a property is attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyOwner {
    /// An object or character.
    Entity(EntityId),
    /// A location.
    Location(LocationId),
}

impl fmt::Display for PropertyOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity(id) => write!(f, "{id}"),
            Self::Location(id) => write!(f, "{id}"),
        }
    }
}

/// What a handler may touch while preparing an owner.
pub struct PropertyTarget<'a> {
    /// The owner being prepared.
    pub owner: PropertyOwner,
    /// Display name of the owner.
    pub name: &'a str,
    /// The owner's action map.
    pub actions: &'a mut NamedMap<Rc<ActionSpec>>,
}

impl PropertyTarget<'_> {
    /// Insert a generated action unless the author already defined one with that name.
    pub fn add_action(&mut self, name: impl Into<String>, action: ActionSpec) {
        let name = name.into();
        if !self.actions.insert_if_absent(name.clone(), Rc::new(action)) {
            debug!(owner = %self.owner, action = %name, "authored action shadows generated one");
        }
    }

    /// The owning entity, or an error for properties that only make sense on entities.
    pub fn entity(&self, property: &str) -> ConfigResult<EntityId> {
        match &self.owner {
            PropertyOwner::Entity(id) => Ok(id.clone()),
            PropertyOwner::Location(_) => Err(self.invalid(property, "only entities can carry it")),
        }
    }

    /// Build an [`ConfigurationError::InvalidPropertyOptions`] for this owner.
    pub fn invalid(&self, property: &str, reason: impl Into<String>) -> ConfigurationError {
        ConfigurationError::InvalidPropertyOptions {
            owner: self.owner.to_string(),
            property: property.to_string(),
            reason: reason.into(),
        }
    }
}

/// A named behaviour that generates actions at preparation time.
pub trait PropertyHandler {
    /// Insert this property's actions into `target`.
    fn apply(
        &self,
        target: &mut PropertyTarget<'_>,
        options: &PropertyOptions,
        locale: &Locale,
    ) -> ConfigResult<()>;
}

/// Overrides shared by every standard handler.
#[derive(Debug, Clone, Default)]
pub struct ActionOverrides {
    /// Name used to build the command echo, e.g. "take the coin".
    pub object_name: Option<String>,
    /// Explicit command echo; wins over everything else.
    pub command: Option<String>,
    /// Runs before the generated text.
    pub before: Option<Hook>,
    /// Runs after the generated text.
    pub after: Option<Hook>,
}

impl ActionOverrides {
    /// Resolve a command echo: explicit command, then the object-name template,
    /// then the fallback.
    pub fn command_or(&self, template: impl FnOnce(&str) -> String, fallback: String) -> String {
        if let Some(command) = &self.command {
            return command.clone();
        }
        match &self.object_name {
            Some(name) => template(name),
            None => fallback,
        }
    }

    /// Attach the before/after hooks to a generated action.
    pub fn decorate(&self, mut action: ActionSpec) -> ActionSpec {
        action.before = self.before.clone();
        action.after = self.after.clone();
        action
    }
}

/// Builder methods for the shared overrides.
pub trait Overridable: Sized {
    /// The options' shared overrides.
    fn overrides_mut(&mut self) -> &mut ActionOverrides;

    /// Set the object name used in generated commands.
    fn with_object_name(mut self, name: impl Into<String>) -> Self {
        self.overrides_mut().object_name = Some(name.into());
        self
    }

    /// Set an explicit command echo.
    fn with_command(mut self, command: impl Into<String>) -> Self {
        self.overrides_mut().command = Some(command.into());
        self
    }

    /// Run a hook before the generated text.
    fn with_before(mut self, f: impl Fn(&mut Engine) + 'static) -> Self {
        self.overrides_mut().before = Some(Hook::new(f));
        self
    }

    /// Run a hook after the generated text.
    fn with_after(mut self, f: impl Fn(&mut Engine) + 'static) -> Self {
        self.overrides_mut().after = Some(Hook::new(f));
        self
    }
}

/// Options attached to a property, typed per handler.
#[derive(Clone)]
pub enum PropertyOptions {
    /// Options for [`Movable`].
    Movable(MovableOptions),
    /// Options for [`UsableWith`].
    UsableWith(UsableWithOptions),
    /// Options for [`Talkable`].
    Talkable(TalkableOptions),
    /// Options for [`ChangeableState`].
    ChangeableState(ChangeableStateOptions),
    /// Options for a story-defined handler, downcast by that handler.
    Custom(Rc<dyn Any>),
}

impl PropertyOptions {
    /// Wrap options for a custom handler.
    pub fn custom<T: Any>(options: T) -> Self {
        Self::Custom(Rc::new(options))
    }

    /// Downcast custom options.
    pub fn downcast<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Custom(any) => any.downcast_ref(),
            _ => None,
        }
    }
}

impl fmt::Debug for PropertyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movable(o) => f.debug_tuple("Movable").field(o).finish(),
            Self::UsableWith(o) => f.debug_tuple("UsableWith").field(o).finish(),
            Self::Talkable(o) => f.debug_tuple("Talkable").field(o).finish(),
            Self::ChangeableState(o) => f.debug_tuple("ChangeableState").field(o).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<MovableOptions> for PropertyOptions {
    fn from(value: MovableOptions) -> Self {
        Self::Movable(value)
    }
}

impl From<UsableWithOptions> for PropertyOptions {
    fn from(value: UsableWithOptions) -> Self {
        Self::UsableWith(value)
    }
}

impl From<TalkableOptions> for PropertyOptions {
    fn from(value: TalkableOptions) -> Self {
        Self::Talkable(value)
    }
}

impl From<ChangeableStateOptions> for PropertyOptions {
    fn from(value: ChangeableStateOptions) -> Self {
        Self::ChangeableState(value)
    }
}

/// Maps property names to handlers.
#[derive(Clone)]
pub struct PropertyRegistry {
    handlers: HashMap<String, Rc<dyn PropertyHandler>>,
}

impl Default for PropertyRegistry {
    /// A registry holding the four standard handlers.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(MOVABLE, Movable);
        registry.register(USABLE_WITH, UsableWith);
        registry.register(TALKABLE, Talkable);
        registry.register(CHANGEABLE_STATE, ChangeableState);
        registry
    }
}

impl fmt::Debug for PropertyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.handlers.keys().collect();
        names.sort();
        f.debug_struct("PropertyRegistry")
            .field("handlers", &names)
            .finish()
    }
}

impl PropertyRegistry {
    /// A registry without any handlers.
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register (or replace) a handler.
    pub fn register(&mut self, name: impl Into<String>, handler: impl PropertyHandler + 'static) {
        self.handlers.insert(name.into(), Rc::new(handler));
    }

    /// Whether a handler is registered under that name.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Run every attached property's handler over the world.
    pub(crate) fn prepare(&self, world: &mut World, locale: &Locale) -> ConfigResult<()> {
        for location in world.locations_mut() {
            let owner = PropertyOwner::Location(location.id.clone());
            let mut target = PropertyTarget {
                owner,
                name: &location.name,
                actions: &mut location.actions,
            };
            self.apply_all(&mut target, &location.properties, locale)?;
        }
        for entity in world.entities_mut() {
            let owner = PropertyOwner::Entity(entity.id.clone());
            let mut target = PropertyTarget {
                owner,
                name: &entity.name,
                actions: &mut entity.actions,
            };
            self.apply_all(&mut target, &entity.properties, locale)?;
        }
        Ok(())
    }

    fn apply_all(
        &self,
        target: &mut PropertyTarget<'_>,
        properties: &NamedMap<PropertyOptions>,
        locale: &Locale,
    ) -> ConfigResult<()> {
        for (name, options) in properties.iter() {
            let handler =
                self.handlers
                    .get(name)
                    .ok_or_else(|| ConfigurationError::UnknownProperty {
                        owner: target.owner.to_string(),
                        property: name.to_string(),
                    })?;
            handler.apply(target, options, locale)?;
        }
        Ok(())
    }
}

//! Authoring-time story description.
//!
//! A [`StoryDef`] is what a story author (or a loader for some authoring
//! format) hands to [`Engine::new`](crate::Engine::new). Missing pieces take
//! documented defaults: empty description, no exits, no actions, no variables,
//! no properties, placed nowhere.

use std::fmt;
use std::rc::Rc;

use loom_core::{ConfigResult, ConfigurationError, EntityId, Placement, Value, Vars};

use crate::engine::Engine;
use crate::named::NamedMap;
use crate::property::PropertyOptions;
use crate::text::Hook;
use crate::world::{ActionSpec, ExitSpec};

/// Signature of a computed key set.
pub type KeysFn<T> = dyn Fn() -> Vec<(String, T)>;

/// An action or exit collection as supplied by the author.
///
/// Only [`KeySet::Static`] is accepted. A computed set would produce its keys
/// anew on every access, which breaks stable rendering order and the
/// identity of bound actions, so it is rejected when the engine is built.
pub enum KeySet<T> {
    /// Ordered name/value pairs fixed at authoring time.
    Static(Vec<(String, T)>),
    /// Keys produced by a closure.
    Computed(Rc<KeysFn<T>>),
}

impl<T> Default for KeySet<T> {
    fn default() -> Self {
        Self::Static(Vec::new())
    }
}

impl<T> KeySet<T> {
    /// Append an entry. Computed sets are left untouched.
    pub fn push(&mut self, name: impl Into<String>, value: T) {
        if let Self::Static(entries) = self {
            entries.push((name.into(), value));
        }
    }

    /// Whether the set is computed.
    pub fn is_computed(&self) -> bool {
        matches!(self, Self::Computed(_))
    }

    pub(crate) fn into_named(
        self,
        owner: &str,
        collection: &'static str,
    ) -> ConfigResult<NamedMap<Rc<T>>> {
        match self {
            Self::Static(entries) => Ok(entries
                .into_iter()
                .map(|(name, value)| (name, Rc::new(value)))
                .collect()),
            Self::Computed(_) => Err(ConfigurationError::ComputedKeySet {
                owner: owner.to_string(),
                collection,
            }),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for KeySet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(entries) => f.debug_tuple("Static").field(entries).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// A location as authored.
#[derive(Debug, Default)]
pub struct LocationDef {
    /// Unique, stable id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Description shown with the location.
    pub description: String,
    /// Whether the story starts here. Exactly one location must be initial.
    pub initial: bool,
    /// Ways out, in display order.
    pub exits: KeySet<ExitSpec>,
    /// Location-specific actions, in display order.
    pub actions: KeySet<ActionSpec>,
    /// Initial variables.
    pub vars: Vars,
    /// Attached properties with their options.
    pub properties: Vec<(String, PropertyOptions)>,
    /// Runs when the player arrives.
    pub on_enter: Option<Hook>,
    /// Runs when the player leaves.
    pub on_exit: Option<Hook>,
}

impl LocationDef {
    /// A location with the given id and display name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Mark this location as the starting point.
    pub fn initial(mut self) -> Self {
        self.initial = true;
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add an exit.
    pub fn with_exit(mut self, name: impl Into<String>, exit: impl Into<ExitSpec>) -> Self {
        self.exits.push(name, exit.into());
        self
    }

    /// Add an action.
    pub fn with_action(mut self, name: impl Into<String>, action: impl Into<ActionSpec>) -> Self {
        self.actions.push(name, action.into());
        self
    }

    /// Replace the exits with a computed set.
    pub fn with_computed_exits(
        mut self,
        f: impl Fn() -> Vec<(String, ExitSpec)> + 'static,
    ) -> Self {
        self.exits = KeySet::Computed(Rc::new(f));
        self
    }

    /// Replace the actions with a computed set.
    pub fn with_computed_actions(
        mut self,
        f: impl Fn() -> Vec<(String, ActionSpec)> + 'static,
    ) -> Self {
        self.actions = KeySet::Computed(Rc::new(f));
        self
    }

    /// Set an initial variable.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Attach a property.
    pub fn with_property(
        mut self,
        name: impl Into<String>,
        options: impl Into<PropertyOptions>,
    ) -> Self {
        self.properties.push((name.into(), options.into()));
        self
    }

    /// Run a hook whenever the player arrives.
    pub fn on_enter(mut self, f: impl Fn(&mut Engine) + 'static) -> Self {
        self.on_enter = Some(Hook::new(f));
        self
    }

    /// Run a hook whenever the player leaves.
    pub fn on_exit(mut self, f: impl Fn(&mut Engine) + 'static) -> Self {
        self.on_exit = Some(Hook::new(f));
        self
    }
}

/// An object or character as authored.
#[derive(Debug, Default)]
pub struct EntityDef {
    /// Unique, stable id shared by objects and characters.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Where the entity starts.
    pub placement: Placement,
    /// Entity actions, in display order.
    pub actions: KeySet<ActionSpec>,
    /// Initial variables.
    pub vars: Vars,
    /// Attached properties with their options.
    pub properties: Vec<(String, PropertyOptions)>,
}

impl EntityDef {
    /// An entity with the given id and display name, placed nowhere.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Place the entity at a location.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.placement = Placement::at(location);
        self
    }

    /// Start the entity in the player's inventory.
    pub fn in_inventory(mut self) -> Self {
        self.placement = Placement::Inventory;
        self
    }

    /// Add an action.
    pub fn with_action(mut self, name: impl Into<String>, action: impl Into<ActionSpec>) -> Self {
        self.actions.push(name, action.into());
        self
    }

    /// Replace the actions with a computed set.
    pub fn with_computed_actions(
        mut self,
        f: impl Fn() -> Vec<(String, ActionSpec)> + 'static,
    ) -> Self {
        self.actions = KeySet::Computed(Rc::new(f));
        self
    }

    /// Set an initial variable.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Attach a property.
    pub fn with_property(
        mut self,
        name: impl Into<String>,
        options: impl Into<PropertyOptions>,
    ) -> Self {
        self.properties.push((name.into(), options.into()));
        self
    }
}

/// The whole story handed to the engine.
#[derive(Debug, Default)]
pub struct StoryDef {
    /// Shown in the header.
    pub title: String,
    /// Narrated when the story starts. When empty, the initial location's
    /// description is narrated instead.
    pub initial_text: String,
    /// All locations.
    pub locations: Vec<LocationDef>,
    /// All objects.
    pub entities: Vec<EntityDef>,
    /// All characters; merged into the entity namespace after `entities`.
    pub characters: Vec<EntityDef>,
    /// Actions offered everywhere unless a location overrides them by name.
    pub actions: KeySet<ActionSpec>,
    /// Story-wide variables.
    pub vars: Vars,
    /// Starting score, if the story keeps one.
    pub score: Option<i64>,
    /// Entities moved to the inventory at construction.
    pub inventory: Vec<EntityId>,
    /// Runs once after every command echo.
    pub every_turn: Option<Hook>,
}

impl StoryDef {
    /// An empty story with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the opening narration.
    pub fn with_initial_text(mut self, text: impl Into<String>) -> Self {
        self.initial_text = text.into();
        self
    }

    /// Add a location.
    pub fn with_location(mut self, location: LocationDef) -> Self {
        self.locations.push(location);
        self
    }

    /// Add an object.
    pub fn with_entity(mut self, entity: EntityDef) -> Self {
        self.entities.push(entity);
        self
    }

    /// Add a character.
    pub fn with_character(mut self, character: EntityDef) -> Self {
        self.characters.push(character);
        self
    }

    /// Add a global action.
    pub fn with_action(mut self, name: impl Into<String>, action: impl Into<ActionSpec>) -> Self {
        self.actions.push(name, action.into());
        self
    }

    /// Set a story-wide variable.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Keep a score, starting at the given value.
    pub fn with_score(mut self, score: i64) -> Self {
        self.score = Some(score);
        self
    }

    /// Put an entity in the inventory at construction.
    pub fn with_inventory(mut self, entity: impl Into<String>) -> Self {
        self.inventory.push(EntityId::new(entity));
        self
    }

    /// Run a hook after every command echo.
    pub fn every_turn(mut self, f: impl Fn(&mut Engine) + 'static) -> Self {
        self.every_turn = Some(Hook::new(f));
        self
    }
}

//! The engine and its command entry points.

use std::rc::Rc;

use loom_core::{
    ConfigResult, EntityId, LocationId, OutputEntry, OutputKind, OutputLog, Placement, Value, Vars,
};
use tracing::{debug, trace, warn};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::locale::Locale;
use crate::lock::{InteractionLock, Modal};
use crate::named::NamedMap;
use crate::resolver::{self, Binding, Resolution};
use crate::story::StoryDef;
use crate::text::Hook;
use crate::view::{Handle, ViewState};
use crate::world::{ActionSpec, Entity, ExitSpec, World};

/// Nesting depth of reentrant commands past which debug builds panic.
const MAX_NESTING: usize = 64;

/// A running story.
///
/// Owns the prepared world and all mutable story state. Every mutation made
/// through the public methods recomputes the [`ViewState`], so a renderer can
/// always show [`Engine::view`] as is.
pub struct Engine {
    pub(crate) config: EngineConfig,
    pub(crate) world: World,
    title: String,
    initial_text: String,
    global_actions: NamedMap<Rc<ActionSpec>>,
    pub(crate) vars: Vars,
    pub(crate) score: Option<i64>,
    every_turn: Option<Hook>,
    pub(crate) current: Option<LocationId>,
    pub(crate) lock: InteractionLock,
    pub(crate) log: OutputLog,
    view: ViewState,
    bindings: Vec<Binding>,
    generation: u64,
    started: bool,
    depth: usize,
}

impl Engine {
    /// Prepare a story.
    ///
    /// Merges characters into the entity namespace, applies the inventory
    /// list and runs every attached property handler. The initial location
    /// is checked by [`Engine::start`].
    pub fn new(story: StoryDef, config: EngineConfig) -> ConfigResult<Self> {
        let StoryDef {
            title,
            initial_text,
            locations,
            mut entities,
            characters,
            actions,
            vars,
            score,
            inventory,
            every_turn,
        } = story;
        entities.extend(characters);

        let mut world = World::build(locations, entities, &inventory)?;
        let global_actions = actions.into_named("story", "actions")?;
        config.properties.prepare(&mut world, &config.locale)?;

        debug!(
            title = %title,
            locations = world.locations().len(),
            entities = world.entities().len(),
            "story prepared"
        );

        Ok(Self {
            config,
            world,
            title,
            initial_text,
            global_actions,
            vars,
            score,
            every_turn,
            current: None,
            lock: InteractionLock::Free,
            log: OutputLog::new(),
            view: ViewState::default(),
            bindings: Vec::new(),
            generation: 0,
            started: false,
            depth: 0,
        })
    }

    /// Prepare a story with the default configuration.
    pub fn with_defaults(story: StoryDef) -> ConfigResult<Self> {
        Self::new(story, EngineConfig::default())
    }

    /// Place the player at the initial location and narrate the opening.
    ///
    /// The opening is the story's initial text, or the initial location's
    /// description when there is none. Fails unless exactly one location is
    /// flagged initial.
    pub fn start(&mut self) -> EngineResult<()> {
        if self.started {
            return Err(EngineError::AlreadyStarted);
        }
        let initial = self.world.initial_location()?;
        let id = initial.id.clone();
        let opening = if self.initial_text.is_empty() {
            initial.description.clone()
        } else {
            self.initial_text.clone()
        };

        debug!(location = %id, "story started");
        self.current = Some(id);
        self.started = true;
        if !opening.is_empty() {
            self.log.append(OutputEntry::normal(opening));
        }
        self.refresh();
        Ok(())
    }

    /// Whether [`Engine::start`] has succeeded.
    pub fn is_started(&self) -> bool {
        self.started
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Run the action or exit behind a handle of the current view.
    pub fn invoke(&mut self, handle: Handle) -> EngineResult<()> {
        let binding = self.binding(handle)?.clone();
        match binding {
            Binding::Exit { name, spec } => self.nested(|engine| engine.run_exit(&name, &spec)),
            Binding::Action { name, spec } => self.nested(|engine| engine.run_action(&name, &spec)),
        }
        Ok(())
    }

    /// Like [`Engine::invoke`], but only accepts exit handles.
    pub fn navigate(&mut self, handle: Handle) -> EngineResult<()> {
        let binding = self.binding(handle)?.clone();
        match binding {
            Binding::Exit { name, spec } => {
                self.nested(|engine| engine.run_exit(&name, &spec));
                Ok(())
            }
            Binding::Action { name, .. } => Err(EngineError::NotAnExit(name)),
        }
    }

    fn binding(&self, handle: Handle) -> EngineResult<&Binding> {
        if !self.started {
            return Err(EngineError::NotStarted);
        }
        let stale = EngineError::StaleHandle {
            handle,
            current: self.generation,
        };
        if handle.generation != self.generation {
            return Err(stale);
        }
        self.bindings.get(handle.slot).ok_or(stale)
    }

    /// Track reentrant command nesting. Unbounded in release builds.
    fn nested<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.depth += 1;
        debug_assert!(
            self.depth <= MAX_NESTING,
            "commands nested more than {MAX_NESTING} deep"
        );
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn run_action(&mut self, name: &str, spec: &ActionSpec) {
        debug!(action = name, "invoking action");
        let command = spec.command.clone().unwrap_or_else(|| name.to_lowercase());
        self.print_command(command);
        if let Some(before) = &spec.before {
            before.call(self);
        }
        if let Some(text) = &spec.text {
            let text = text.evaluate(self);
            self.print_as(text, spec.kind.clone());
        }
        if let Some(after) = &spec.after {
            after.call(self);
        }
        self.refresh();
    }

    fn run_exit(&mut self, name: &str, spec: &ExitSpec) {
        debug!(exit = name, "taking exit");
        let command = spec.command.clone().unwrap_or_else(|| name.to_lowercase());
        self.print_command(command);
        let destination = spec.destination.evaluate(self);
        self.go_to(&destination);
        self.refresh();
    }

    /// Move the player to a location, running its leave/enter hooks.
    ///
    /// A target that is not a location id is narrated instead and the player
    /// stays put. Returns whether the player moved.
    pub fn go_to(&mut self, target: &str) -> bool {
        self.nested(|engine| engine.move_player(target))
    }

    fn move_player(&mut self, target: &str) -> bool {
        let Some(arrival) = self.world.location_by_id(target) else {
            debug!(target, "not a location, narrating");
            self.print(target);
            return false;
        };
        let arrival_id = arrival.id.clone();
        let on_enter = arrival.on_enter.clone();
        let on_exit = self
            .current
            .as_ref()
            .and_then(|id| self.world.location_by_id(id.as_str()))
            .and_then(|l| l.on_exit.clone());

        if let Some(on_exit) = on_exit {
            on_exit.call(self);
        }
        debug!(from = ?self.current, to = %arrival_id, "player moved");
        self.current = Some(arrival_id);
        if let Some(on_enter) = on_enter {
            on_enter.call(self);
        }
        self.refresh();
        true
    }

    // -----------------------------------------------------------------------
    // Output
    // -----------------------------------------------------------------------

    /// Narrate plain text.
    pub fn print(&mut self, text: impl Into<String>) {
        self.print_as(text, OutputKind::Normal);
    }

    /// Narrate text with a specific tag.
    pub fn print_as(&mut self, text: impl Into<String>, kind: OutputKind) {
        self.log.append(OutputEntry::new(text, kind));
        self.refresh();
    }

    /// Echo a player command and run the per-turn hook.
    pub fn print_command(&mut self, command: impl Into<String>) {
        self.log.append(OutputEntry::command(command));
        if let Some(every_turn) = self.every_turn.clone() {
            every_turn.call(self);
        }
        self.refresh();
    }

    /// The output log.
    pub fn log(&self) -> &OutputLog {
        &self.log
    }

    /// The log rendered through the configured formatters.
    pub fn formatted_log(&self) -> Vec<String> {
        self.log
            .entries()
            .iter()
            .map(|entry| self.config.formatters.format(entry))
            .collect()
    }

    // -----------------------------------------------------------------------
    // Score
    // -----------------------------------------------------------------------

    /// The current score.
    pub fn score(&self) -> Option<i64> {
        self.score
    }

    /// Set the score and narrate it with the `score` tag.
    pub fn set_score(&mut self, score: i64) {
        debug!(score, "score changed");
        self.score = Some(score);
        self.print_as(score.to_string(), OutputKind::Score);
    }

    // -----------------------------------------------------------------------
    // Interaction lock
    // -----------------------------------------------------------------------

    /// Suppress regular actions and exits. Returns whether the state changed.
    pub fn lock_interaction(&mut self) -> bool {
        self.transition("lock", InteractionLock::lock)
    }

    /// Release the lock and close any modal. Returns whether the state changed.
    pub fn unlock_interaction(&mut self) -> bool {
        self.transition("unlock", InteractionLock::unlock)
    }

    /// Offer only the modal's actions until unlocked.
    pub fn open_modal(&mut self, modal: Modal) -> bool {
        self.transition("open modal", |lock| lock.open(modal))
    }

    /// End the story. Nothing is offered afterwards.
    pub fn end(&mut self) -> bool {
        debug!("story ended");
        self.transition("end", InteractionLock::end)
    }

    /// Whether regular interaction is suppressed.
    pub fn is_locked(&self) -> bool {
        self.lock.is_locked()
    }

    /// Whether the story has ended.
    pub fn is_ended(&self) -> bool {
        self.lock.is_ended()
    }

    /// The lock state.
    pub fn lock(&self) -> &InteractionLock {
        &self.lock
    }

    fn transition(&mut self, what: &str, f: impl FnOnce(&mut InteractionLock) -> bool) -> bool {
        let changed = f(&mut self.lock);
        if !changed && self.lock.is_ended() {
            warn!(transition = what, "ignored, the story has ended");
        }
        self.refresh();
        changed
    }

    // -----------------------------------------------------------------------
    // Placement
    // -----------------------------------------------------------------------

    /// Where the player is. `None` before [`Engine::start`].
    pub fn current_location(&self) -> Option<&LocationId> {
        self.current.as_ref()
    }

    /// Whether the player is at the given location.
    pub fn current_location_is(&self, id: &str) -> bool {
        self.current.as_ref().is_some_and(|c| c.as_str() == id)
    }

    /// Place an entity. Returns false for unknown entities or locations.
    pub fn move_entity(&mut self, id: &str, placement: Placement) -> bool {
        if let Placement::At(location) = &placement
            && self.world.location_by_id(location.as_str()).is_none()
        {
            warn!(entity = id, location = %location, "move to unknown location ignored");
            return false;
        }
        let Some(entity) = self.world.entity_mut(id) else {
            warn!(entity = id, "move of unknown entity ignored");
            return false;
        };
        trace!(entity = id, to = %placement, "entity moved");
        entity.placement = placement;
        self.refresh();
        true
    }

    /// Put an entity in the player's inventory.
    pub fn move_to_inventory(&mut self, id: &str) -> bool {
        self.move_entity(id, Placement::Inventory)
    }

    /// Whether the player carries the entity.
    pub fn is_in_inventory(&self, id: &str) -> bool {
        self.world.is_in_inventory(id)
    }

    /// Where an entity is.
    pub fn entity_placement(&self, id: &str) -> Option<&Placement> {
        self.world.entity(id).map(|e| &e.placement)
    }

    /// Entities with the given placement, in authoring order.
    pub fn entities_at(&self, placement: &Placement) -> Vec<&Entity> {
        self.world.entities_at(placement)
    }

    // -----------------------------------------------------------------------
    // Variables
    // -----------------------------------------------------------------------

    /// A story-wide variable.
    pub fn var(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Set a story-wide variable.
    pub fn set_var(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.vars.insert(name.into(), value.into());
        self.refresh();
    }

    /// An entity variable.
    pub fn entity_var(&self, entity: &str, name: &str) -> Option<&Value> {
        self.world.entity(entity).and_then(|e| e.vars.get(name))
    }

    /// Set an entity variable. Returns false for unknown entities.
    pub fn set_entity_var(
        &mut self,
        entity: &str,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> bool {
        let Some(target) = self.world.entity_mut(entity) else {
            warn!(entity, "variable on unknown entity ignored");
            return false;
        };
        target.vars.insert(name.into(), value.into());
        self.refresh();
        true
    }

    /// A location variable.
    pub fn location_var(&self, location: &str, name: &str) -> Option<&Value> {
        self.world
            .location_by_id(location)
            .and_then(|l| l.vars.get(name))
    }

    /// Set a location variable. Returns false for unknown locations.
    pub fn set_location_var(
        &mut self,
        location: &str,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> bool {
        let Some(target) = self.world.location_mut(location) else {
            warn!(location, "variable on unknown location ignored");
            return false;
        };
        target.vars.insert(name.into(), value.into());
        self.refresh();
        true
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The prepared world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The story title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The active text table.
    pub fn locale(&self) -> &Locale {
        &self.config.locale
    }

    /// The configuration the engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The view computed after the last mutation.
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Ids of the entities the player carries.
    pub fn inventory(&self) -> Vec<EntityId> {
        self.world
            .entities_at(&Placement::Inventory)
            .into_iter()
            .map(|e| e.id.clone())
            .collect()
    }

    pub(crate) fn global_actions(&self) -> &NamedMap<Rc<ActionSpec>> {
        &self.global_actions
    }

    /// Recompute the view. Every mutating method does this already; call it
    /// after changing state that availability predicates read from outside
    /// the engine.
    pub fn refresh(&mut self) {
        if !self.started {
            return;
        }
        self.generation += 1;
        let Resolution { view, bindings } = resolver::resolve(self, self.generation);
        trace!(
            generation = self.generation,
            bindings = bindings.len(),
            "view recomputed"
        );
        self.view = view;
        self.bindings = bindings;
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("title", &self.title)
            .field("current", &self.current)
            .field("lock", &self.lock)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

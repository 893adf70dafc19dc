use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use loom_core::ConfigResult;
use serde_json::json;
use tracing::warn;

use crate::engine::Engine;
use crate::locale::Locale;
use crate::text::Text;
use crate::world::ActionSpec;

use super::{
    ActionOverrides, CHANGEABLE_STATE, Overridable, PropertyHandler, PropertyOptions,
    PropertyTarget,
};

/// Signature of a state-change hook: `(engine, next, previous)`. Returning
/// `Some(index)` replaces the next state.
pub type StateChangeFn = dyn Fn(&mut Engine, usize, usize) -> Option<usize>;

/// Runs before the state index is written.
#[derive(Clone)]
pub struct StateChangeHook(Rc<StateChangeFn>);

impl StateChangeHook {
    /// Wrap a closure.
    pub fn new(f: impl Fn(&mut Engine, usize, usize) -> Option<usize> + 'static) -> Self {
        Self(Rc::new(f))
    }

    fn call(&self, engine: &mut Engine, next: usize, previous: usize) -> Option<usize> {
        (self.0)(engine, next, previous)
    }
}

impl fmt::Debug for StateChangeHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StateChangeHook(..)")
    }
}

/// One state of the cycle.
#[derive(Debug, Clone)]
pub struct StateDef {
    /// Action name while the entity is in this state.
    pub name: String,
    /// Command echo while in this state.
    pub command: Option<String>,
    /// Narration when this state is entered.
    pub text: Option<Text>,
}

impl StateDef {
    /// A state with the given action name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: None,
            text: None,
        }
    }

    /// Set the command echo.
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Narrate something when entering this state.
    pub fn with_text(mut self, text: impl Into<Text>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// Options of the `changeableState` property.
///
/// Action names come from the states, so an object name is rejected.
#[derive(Debug, Clone)]
pub struct ChangeableStateOptions {
    /// Generic command and hooks.
    pub overrides: ActionOverrides,
    /// States in cycle order.
    pub states: Vec<StateDef>,
    /// Narration for states without their own.
    pub text: Option<Text>,
    /// Entity variable holding the current state index.
    pub state_var: String,
    /// Runs before each transition.
    pub before_state_change: Option<StateChangeHook>,
}

impl Default for ChangeableStateOptions {
    fn default() -> Self {
        Self {
            overrides: ActionOverrides::default(),
            states: Vec::new(),
            text: None,
            state_var: "state".to_string(),
            before_state_change: None,
        }
    }
}

impl ChangeableStateOptions {
    /// Options cycling through the given states.
    pub fn new(states: impl IntoIterator<Item = StateDef>) -> Self {
        Self {
            states: states.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Narration for states without their own.
    pub fn with_text(mut self, text: impl Into<Text>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Keep the state index in a differently named entity variable.
    pub fn with_state_var(mut self, name: impl Into<String>) -> Self {
        self.state_var = name.into();
        self
    }

    /// Run a hook before each transition.
    pub fn before_state_change(
        mut self,
        f: impl Fn(&mut Engine, usize, usize) -> Option<usize> + 'static,
    ) -> Self {
        self.before_state_change = Some(StateChangeHook::new(f));
        self
    }
}

impl Overridable for ChangeableStateOptions {
    fn overrides_mut(&mut self) -> &mut ActionOverrides {
        &mut self.overrides
    }
}

/// State-cycle behaviour.
///
/// Generates one action per state, offered only while the entity is in that
/// state. Invoking it advances to the next state, wrapping around. The
/// current index lives in an entity variable so it is saved and restored
/// with the rest of the story.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangeableState;

impl PropertyHandler for ChangeableState {
    fn apply(
        &self,
        target: &mut PropertyTarget<'_>,
        options: &PropertyOptions,
        _locale: &Locale,
    ) -> ConfigResult<()> {
        let id = target.entity(CHANGEABLE_STATE)?;
        let options = match options {
            PropertyOptions::ChangeableState(options) => Rc::new(options.clone()),
            _ => return Err(target.invalid(CHANGEABLE_STATE, "expected changeableState options")),
        };
        if options.overrides.object_name.is_some() {
            return Err(target.invalid(CHANGEABLE_STATE, "object name is not supported"));
        }
        if options.states.is_empty() {
            return Err(target.invalid(CHANGEABLE_STATE, "no states"));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = options.states.iter().find(|s| !seen.insert(s.name.as_str())) {
            return Err(target.invalid(
                CHANGEABLE_STATE,
                format!("duplicate state \"{}\"", dup.name),
            ));
        }

        for (index, state) in options.states.iter().enumerate() {
            let command = state
                .command
                .clone()
                .or_else(|| options.overrides.command.clone())
                .unwrap_or_else(|| state.name.to_lowercase());

            let text = {
                let id = id.clone();
                let options = Rc::clone(&options);
                Text::computed(move |engine| advance(engine, id.as_str(), &options, index))
            };
            let current = {
                let id = id.clone();
                let state_var = options.state_var.clone();
                let count = options.states.len();
                move |engine: &Engine| {
                    current_state(engine, id.as_str(), &state_var, count) == index
                }
            };
            let action = ActionSpec::new(text)
                .with_command(command)
                .available_when(current);
            target.add_action(state.name.clone(), options.overrides.decorate(action));
        }
        Ok(())
    }
}

/// The stored index, wrapped into `0..count`.
fn current_state(engine: &Engine, entity: &str, state_var: &str, count: usize) -> usize {
    engine
        .entity_var(entity, state_var)
        .and_then(|v| v.as_u64())
        .map_or(0, |v| (v % count as u64) as usize)
}

fn advance(
    engine: &mut Engine,
    entity: &str,
    options: &ChangeableStateOptions,
    from: usize,
) -> String {
    let count = options.states.len();
    let mut next = (from + 1) % count;
    if let Some(hook) = &options.before_state_change
        && let Some(requested) = hook.call(engine, next, from)
    {
        if requested < count {
            next = requested;
        } else {
            warn!(entity, requested, count, "ignoring out-of-range state");
        }
    }
    engine.set_entity_var(entity, options.state_var.clone(), json!(next));

    let text = options.states[next]
        .text
        .clone()
        .or_else(|| options.text.clone());
    match text {
        Some(text) => text.evaluate(engine),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::named::NamedMap;
    use crate::property::PropertyOwner;
    use loom_core::{ConfigurationError, EntityId};

    fn apply(options: ChangeableStateOptions) -> ConfigResult<NamedMap<Rc<ActionSpec>>> {
        let mut actions = NamedMap::new();
        let mut target = PropertyTarget {
            owner: PropertyOwner::Entity(EntityId::new("lamp")),
            name: "Lamp",
            actions: &mut actions,
        };
        ChangeableState.apply(&mut target, &options.into(), &Locale::english())?;
        Ok(actions)
    }

    #[test]
    fn one_action_per_state() {
        let actions = apply(
            ChangeableStateOptions::new([
                StateDef::new("Switch on").with_command("flip"),
                StateDef::new("Switch off"),
            ])
            .with_command("toggle"),
        )
        .unwrap();
        assert_eq!(actions.names().collect::<Vec<_>>(), ["Switch on", "Switch off"]);
        assert_eq!(
            actions.get("Switch on").and_then(|a| a.command.as_deref()),
            Some("flip")
        );
        assert_eq!(
            actions.get("Switch off").and_then(|a| a.command.as_deref()),
            Some("toggle")
        );
    }

    #[test]
    fn command_falls_back_to_state_name() {
        let actions = apply(ChangeableStateOptions::new([StateDef::new("Open")])).unwrap();
        assert_eq!(
            actions.get("Open").and_then(|a| a.command.as_deref()),
            Some("open")
        );
    }

    #[test]
    fn empty_or_duplicate_states_are_rejected() {
        let err = apply(ChangeableStateOptions::new([])).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidPropertyOptions { .. }));

        let err = apply(ChangeableStateOptions::new([
            StateDef::new("On"),
            StateDef::new("On"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::InvalidPropertyOptions { reason, .. } if reason.contains("duplicate")
        ));
    }

    #[test]
    fn object_name_is_rejected() {
        let err = apply(
            ChangeableStateOptions::new([StateDef::new("On")]).with_object_name("the lamp"),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::InvalidPropertyOptions { reason, .. } if reason.contains("object name")
        ));
    }
}

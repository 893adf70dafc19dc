use std::rc::Rc;

use loom_core::{ConfigResult, EntityId, Placement};

use crate::engine::Engine;
use crate::locale::{Locale, UsableWithTexts, translate};
use crate::lock::{Modal, ModalAction};
use crate::text::Text;
use crate::world::ActionSpec;

use super::{
    ActionOverrides, Overridable, PropertyHandler, PropertyOptions, PropertyTarget, USABLE_WITH,
};

/// What happens when the entity is used with a specific target.
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    /// Command echo replacing the generated "use X with Y".
    pub command: Option<String>,
    /// Narration replacing "Nothing happens".
    pub text: Option<Text>,
}

impl Interaction {
    /// An interaction narrating the given text.
    pub fn new(text: impl Into<Text>) -> Self {
        Self {
            command: None,
            text: Some(text.into()),
        }
    }

    /// An interaction whose narration is computed at invocation time.
    pub fn computed(f: impl Fn(&mut Engine) -> String + 'static) -> Self {
        Self::new(Text::computed(f))
    }

    /// Set the command echo.
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }
}

/// Options of the `usableWith` property.
#[derive(Debug, Clone, Default)]
pub struct UsableWithOptions {
    /// Object name, explicit command and hooks of the opening action.
    pub overrides: ActionOverrides,
    /// Modal title.
    pub title: Option<String>,
    /// Narration when the modal opens.
    pub using_text: Option<String>,
    /// Per-target interactions.
    pub interactions: Vec<(EntityId, Interaction)>,
    /// Narration for targets without an interaction.
    pub default_text: Option<Text>,
}

impl UsableWithOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the modal title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the narration when the modal opens.
    pub fn with_using_text(mut self, text: impl Into<String>) -> Self {
        self.using_text = Some(text.into());
        self
    }

    /// Define what happens with a specific target.
    pub fn with_interaction(
        mut self,
        target: impl Into<String>,
        interaction: impl Into<Interaction>,
    ) -> Self {
        self.interactions
            .push((EntityId::new(target), interaction.into()));
        self
    }

    /// Narration for targets without an interaction.
    pub fn with_default_text(mut self, text: impl Into<Text>) -> Self {
        self.default_text = Some(text.into());
        self
    }

    fn interaction(&self, target: &EntityId) -> Option<&Interaction> {
        self.interactions
            .iter()
            .find(|(id, _)| id == target)
            .map(|(_, interaction)| interaction)
    }
}

impl Overridable for UsableWithOptions {
    fn overrides_mut(&mut self) -> &mut ActionOverrides {
        &mut self.overrides
    }
}

impl From<&str> for Interaction {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Interaction {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<Text> for Interaction {
    fn from(value: Text) -> Self {
        Self::new(value)
    }
}

/// Combine-with behaviour.
///
/// Generates one action, offered while the entity is carried. Invoking it
/// opens a modal listing every other entity at the current location and in
/// the inventory. Choosing a target narrates its interaction (or the default
/// text) and closes the modal. With nothing else in reach no modal opens.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsableWith;

impl PropertyHandler for UsableWith {
    fn apply(
        &self,
        target: &mut PropertyTarget<'_>,
        options: &PropertyOptions,
        locale: &Locale,
    ) -> ConfigResult<()> {
        let id = target.entity(USABLE_WITH)?;
        let options = match options {
            PropertyOptions::UsableWith(options) => Rc::new(options.clone()),
            _ => return Err(target.invalid(USABLE_WITH, "expected usableWith options")),
        };
        let texts = locale.usable_with.clone();
        let own_name = target.name.to_string();

        let command = options.overrides.command_or(
            |name| translate(&texts.use_object, &[name]),
            texts.use_verb.clone(),
        );

        let carried = id.clone();
        let text = {
            let texts = texts.clone();
            let options = Rc::clone(&options);
            Text::computed(move |engine| {
                let modal = combinations(engine, &id, &own_name, &options, &texts);
                if modal.actions.is_empty() {
                    return texts.nothing.clone();
                }
                engine.open_modal(modal);
                options
                    .using_text
                    .clone()
                    .unwrap_or_else(|| texts.using.clone())
            })
        };
        let action = ActionSpec::new(text)
            .with_command(command)
            .available_when(move |engine| engine.is_in_inventory(carried.as_str()));

        target.add_action(texts.use_with.clone(), options.overrides.decorate(action));
        Ok(())
    }
}

/// Build the target modal from the entities currently in reach.
fn combinations(
    engine: &Engine,
    own_id: &EntityId,
    own_name: &str,
    options: &UsableWithOptions,
    texts: &UsableWithTexts,
) -> Modal {
    let here = engine
        .current_location()
        .cloned()
        .map_or(Placement::Nowhere, Placement::At);
    let world = engine.world();
    let candidates = world
        .entities_at(&here)
        .into_iter()
        .chain(world.entities_at(&Placement::Inventory))
        .filter(|e| e.id != *own_id);

    let mut modal = Modal::new().with_title(
        options
            .title
            .clone()
            .unwrap_or_else(|| texts.use_with.clone()),
    );
    for candidate in candidates {
        let interaction = options.interaction(&candidate.id);
        let command = interaction
            .and_then(|i| i.command.clone())
            .unwrap_or_else(|| {
                translate(&texts.use_with_object, &[own_name, candidate.name.as_str()])
            });
        let text = match interaction {
            Some(interaction) => interaction.text.clone(),
            None => options.default_text.clone(),
        }
        .unwrap_or_else(|| Text::from(texts.nothing.as_str()));
        let action = ActionSpec::new(text)
            .with_command(command)
            .with_after(|engine| {
                engine.unlock_interaction();
            });
        modal.push(ModalAction::new(candidate.name.clone(), action));
    }
    modal
}

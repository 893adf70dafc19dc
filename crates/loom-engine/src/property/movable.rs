use loom_core::{ConfigResult, Placement};

use crate::locale::Locale;
use crate::text::Text;
use crate::world::ActionSpec;

use super::{
    ActionOverrides, MOVABLE, Overridable, PropertyHandler, PropertyOptions, PropertyTarget,
};

/// Options of the `movable` property.
#[derive(Debug, Clone, Default)]
pub struct MovableOptions {
    /// Object name, explicit command and hooks shared by both actions.
    pub overrides: ActionOverrides,
    /// Command echo of the take action when no object name is set.
    pub take_command: Option<String>,
    /// Command echo of the drop action when no object name is set.
    pub drop_command: Option<String>,
    /// Narration after taking.
    pub take_text: Option<String>,
    /// Narration after dropping.
    pub drop_text: Option<String>,
}

impl MovableOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the take command fallback.
    pub fn with_take_command(mut self, command: impl Into<String>) -> Self {
        self.take_command = Some(command.into());
        self
    }

    /// Set the drop command fallback.
    pub fn with_drop_command(mut self, command: impl Into<String>) -> Self {
        self.drop_command = Some(command.into());
        self
    }

    /// Set the take narration.
    pub fn with_take_text(mut self, text: impl Into<String>) -> Self {
        self.take_text = Some(text.into());
        self
    }

    /// Set the drop narration.
    pub fn with_drop_text(mut self, text: impl Into<String>) -> Self {
        self.drop_text = Some(text.into());
        self
    }
}

impl Overridable for MovableOptions {
    fn overrides_mut(&mut self) -> &mut ActionOverrides {
        &mut self.overrides
    }
}

/// Take/drop behaviour.
///
/// Generates two actions under stable names: the take action is offered
/// while the entity is outside the inventory, the drop action while it is
/// carried. Dropping puts the entity at the player's current location.
#[derive(Debug, Clone, Copy, Default)]
pub struct Movable;

impl PropertyHandler for Movable {
    fn apply(
        &self,
        target: &mut PropertyTarget<'_>,
        options: &PropertyOptions,
        locale: &Locale,
    ) -> ConfigResult<()> {
        let id = target.entity(MOVABLE)?;
        let options = match options {
            PropertyOptions::Movable(options) => options.clone(),
            _ => return Err(target.invalid(MOVABLE, "expected movable options")),
        };
        let texts = &locale.movable;

        let take_command = options.overrides.command_or(
            |name| format!("{} {name}", texts.take.to_lowercase()),
            options
                .take_command
                .clone()
                .unwrap_or_else(|| texts.take.to_lowercase()),
        );
        let drop_command = options.overrides.command_or(
            |name| format!("{} {name}", texts.drop.to_lowercase()),
            options
                .drop_command
                .clone()
                .unwrap_or_else(|| texts.drop.to_lowercase()),
        );

        let taken = options.take_text.clone().unwrap_or_else(|| texts.taken.clone());
        let take_id = id.clone();
        let take = ActionSpec::new(Text::computed(move |engine| {
            engine.move_entity(take_id.as_str(), Placement::Inventory);
            taken.clone()
        }))
        .with_command(take_command);
        let carried = id.clone();
        let take = take.available_when(move |engine| !engine.is_in_inventory(carried.as_str()));

        let dropped = options.drop_text.clone().unwrap_or_else(|| texts.dropped.clone());
        let drop_id = id.clone();
        let drop = ActionSpec::new(Text::computed(move |engine| {
            let here = engine
                .current_location()
                .cloned()
                .map_or(Placement::Nowhere, Placement::At);
            engine.move_entity(drop_id.as_str(), here);
            dropped.clone()
        }))
        .with_command(drop_command)
        .available_when(move |engine| engine.is_in_inventory(id.as_str()));

        target.add_action(texts.take.clone(), options.overrides.decorate(take));
        target.add_action(texts.drop.clone(), options.overrides.decorate(drop));
        Ok(())
    }
}

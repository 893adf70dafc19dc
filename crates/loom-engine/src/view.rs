//! Renderable view state.
//!
//! A [`ViewState`] is a plain snapshot of what the player can see and do.
//! Every offered action and exit carries a [`Handle`] that the renderer
//! passes back to [`Engine::invoke`](crate::Engine::invoke). Handles belong
//! to one generation of the view; once the view is recomputed they are
//! stale and rejected.

use std::fmt;

use loom_core::{EntityId, OutputEntry};

/// Opaque reference to an offered action or exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    pub(crate) generation: u64,
    pub(crate) slot: usize,
}

impl Handle {
    /// The view generation this handle belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.generation, self.slot)
    }
}

/// An offered action or exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedAction {
    /// Display name.
    pub name: String,
    /// What to pass back to invoke it.
    pub handle: Handle,
}

/// An entity in view with its offered actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEntity {
    /// Entity id.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Offered actions, in authoring order.
    pub actions: Vec<RenderedAction>,
}

/// Story title and score.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    /// Story title.
    pub title: String,
    /// Current score, if the story keeps one.
    pub score: Option<i64>,
}

/// The current location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MainPanel {
    /// Location name.
    pub location_name: String,
    /// Location description.
    pub description: String,
    /// Offered exits.
    pub exits: Vec<RenderedAction>,
    /// Offered location and global actions.
    pub actions: Vec<RenderedAction>,
    /// Entities at the location.
    pub entities: Vec<RenderedEntity>,
}

/// What the player carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryPanel {
    /// Carried entities.
    pub entities: Vec<RenderedEntity>,
}

/// The open modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalPanel {
    /// Heading.
    pub title: Option<String>,
    /// Offered modal actions.
    pub actions: Vec<RenderedAction>,
}

/// Everything a renderer needs after a command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Generation of this view. Handles from other generations are stale.
    pub generation: u64,
    /// Title and score.
    pub header: Header,
    /// Current location.
    pub main: MainPanel,
    /// Carried entities.
    pub inventory: InventoryPanel,
    /// Open modal, if any.
    pub modal: Option<ModalPanel>,
    /// The whole output log.
    pub log: Vec<OutputEntry>,
    /// Whether regular interaction is suppressed.
    pub locked: bool,
    /// Whether the story has ended.
    pub ended: bool,
}

fn find(actions: &[RenderedAction], name: &str) -> Option<Handle> {
    actions.iter().find(|a| a.name == name).map(|a| a.handle)
}

impl ViewState {
    /// Handle of an offered exit.
    pub fn exit(&self, name: &str) -> Option<Handle> {
        find(&self.main.exits, name)
    }

    /// Handle of an offered location or global action.
    pub fn action(&self, name: &str) -> Option<Handle> {
        find(&self.main.actions, name)
    }

    /// An entity in view, at the location or in the inventory.
    pub fn entity(&self, id: &str) -> Option<&RenderedEntity> {
        self.main
            .entities
            .iter()
            .chain(&self.inventory.entities)
            .find(|e| e.id.as_str() == id)
    }

    /// Handle of an offered entity action.
    pub fn entity_action(&self, entity: &str, action: &str) -> Option<Handle> {
        self.entity(entity).and_then(|e| find(&e.actions, action))
    }

    /// Handle of an offered modal action.
    pub fn modal_action(&self, name: &str) -> Option<Handle> {
        self.modal.as_ref().and_then(|m| find(&m.actions, name))
    }

    /// Names of the offered exits.
    pub fn exit_names(&self) -> Vec<&str> {
        self.main.exits.iter().map(|a| a.name.as_str()).collect()
    }

    /// Names of the offered location and global actions.
    pub fn action_names(&self) -> Vec<&str> {
        self.main.actions.iter().map(|a| a.name.as_str()).collect()
    }

    /// Names of the offered modal actions.
    pub fn modal_action_names(&self) -> Vec<&str> {
        self.modal
            .iter()
            .flat_map(|m| &m.actions)
            .map(|a| a.name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(name: &str, slot: usize) -> RenderedAction {
        RenderedAction {
            name: name.to_string(),
            handle: Handle {
                generation: 3,
                slot,
            },
        }
    }

    #[test]
    fn lookups_by_name() {
        let view = ViewState {
            generation: 3,
            main: MainPanel {
                exits: vec![action("North", 0)],
                actions: vec![action("Wait", 1)],
                entities: vec![RenderedEntity {
                    id: EntityId::new("coin"),
                    name: "Coin".to_string(),
                    actions: vec![action("Take", 2)],
                }],
                ..MainPanel::default()
            },
            ..ViewState::default()
        };
        assert_eq!(view.exit("North").map(|h| h.slot), Some(0));
        assert_eq!(view.action("Wait").map(|h| h.slot), Some(1));
        assert_eq!(view.entity_action("coin", "Take").map(|h| h.slot), Some(2));
        assert!(view.exit("South").is_none());
        assert!(view.modal_action("Done").is_none());
        assert_eq!(view.exit_names(), ["North"]);
    }

    #[test]
    fn handle_display() {
        let handle = Handle {
            generation: 7,
            slot: 2,
        };
        assert_eq!(handle.to_string(), "7#2");
    }
}

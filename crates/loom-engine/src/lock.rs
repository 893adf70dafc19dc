//! Modal interaction lock.
//!
//! While a modal is open the regular actions and exits are suppressed and
//! only the modal's actions are offered. Once the story has ended no action
//! is offered at all and no transition leaves that state.

use std::rc::Rc;

use crate::world::ActionSpec;

/// An action offered inside a modal.
#[derive(Debug, Clone)]
pub struct ModalAction {
    /// Display name.
    pub name: String,
    /// What invoking it does.
    pub spec: Rc<ActionSpec>,
}

impl ModalAction {
    /// A named modal action.
    pub fn new(name: impl Into<String>, spec: impl Into<ActionSpec>) -> Self {
        Self {
            name: name.into(),
            spec: Rc::new(spec.into()),
        }
    }
}

/// A titled list of actions replacing the regular ones.
#[derive(Debug, Clone, Default)]
pub struct Modal {
    /// Heading shown above the actions.
    pub title: Option<String>,
    /// Actions in display order.
    pub actions: Vec<ModalAction>,
}

impl Modal {
    /// An empty, untitled modal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add an action.
    pub fn with_action(mut self, name: impl Into<String>, spec: impl Into<ActionSpec>) -> Self {
        self.push(ModalAction::new(name, spec));
        self
    }

    /// Add an action in place.
    pub fn push(&mut self, action: ModalAction) {
        self.actions.push(action);
    }
}

/// Lock state of the interaction surface.
///
/// `Free -> Locked` on lock or modal open, `Locked -> Free` on unlock, and
/// any state `-> Ended` on end. `Ended` is terminal.
#[derive(Debug, Clone, Default)]
pub enum InteractionLock {
    /// Regular actions and exits are offered.
    #[default]
    Free,
    /// Only the modal's actions are offered.
    Locked(Modal),
    /// Nothing is offered.
    Ended,
}

impl InteractionLock {
    /// Suppress regular interaction without offering modal actions.
    ///
    /// Returns whether the state changed.
    pub fn lock(&mut self) -> bool {
        match self {
            Self::Free => {
                *self = Self::Locked(Modal::default());
                true
            }
            Self::Locked(_) | Self::Ended => false,
        }
    }

    /// Open a modal, replacing any modal already open.
    ///
    /// Returns false once ended.
    pub fn open(&mut self, modal: Modal) -> bool {
        if self.is_ended() {
            return false;
        }
        *self = Self::Locked(modal);
        true
    }

    /// Release the lock, discarding any modal.
    ///
    /// Returns whether the state changed.
    pub fn unlock(&mut self) -> bool {
        match self {
            Self::Locked(_) => {
                *self = Self::Free;
                true
            }
            Self::Free | Self::Ended => false,
        }
    }

    /// Enter the terminal state. Returns whether the state changed.
    pub fn end(&mut self) -> bool {
        if self.is_ended() {
            return false;
        }
        *self = Self::Ended;
        true
    }

    /// Whether regular interaction is suppressed. True once ended.
    pub fn is_locked(&self) -> bool {
        !matches!(self, Self::Free)
    }

    /// Whether the story has ended.
    pub fn is_ended(&self) -> bool {
        matches!(self, Self::Ended)
    }

    /// The open modal, if any.
    pub fn modal(&self) -> Option<&Modal> {
        match self {
            Self::Locked(modal) => Some(modal),
            Self::Free | Self::Ended => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_and_unlock() {
        let mut lock = InteractionLock::default();
        assert!(!lock.is_locked());
        assert!(lock.lock());
        assert!(lock.is_locked());
        assert!(lock.modal().is_some_and(|m| m.actions.is_empty()));
        assert!(!lock.lock());
        assert!(lock.unlock());
        assert!(!lock.is_locked());
        assert!(!lock.unlock());
    }

    #[test]
    fn open_replaces_modal() {
        let mut lock = InteractionLock::default();
        lock.open(Modal::new().with_title("First").with_action("A", "a"));
        lock.open(Modal::new().with_title("Second"));
        assert_eq!(
            lock.modal().and_then(|m| m.title.as_deref()),
            Some("Second")
        );
    }

    #[test]
    fn ended_is_terminal() {
        let mut lock = InteractionLock::default();
        lock.open(Modal::new().with_action("Done", "bye"));
        assert!(lock.end());
        assert!(lock.is_ended());
        assert!(lock.is_locked());
        assert!(lock.modal().is_none());

        assert!(!lock.unlock());
        assert!(!lock.lock());
        assert!(!lock.open(Modal::new()));
        assert!(!lock.end());
        assert!(lock.is_ended());
    }
}

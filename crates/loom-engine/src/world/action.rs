use loom_core::OutputKind;

use crate::engine::Engine;
use crate::text::{Availability, Hook, Text};

/// Something the player can do: a location, global, entity or modal action.
#[derive(Debug, Clone, Default)]
pub struct ActionSpec {
    /// Echo written to the log as the player's command. Defaults to the
    /// lower-cased action name.
    pub command: Option<String>,
    /// Result text. `None` narrates nothing.
    pub text: Option<Text>,
    /// Tag of the result entry.
    pub kind: OutputKind,
    /// Whether the action is offered.
    pub available: Availability,
    /// Runs after the command echo, before the text is evaluated.
    pub before: Option<Hook>,
    /// Runs after the text has been narrated.
    pub after: Option<Hook>,
}

impl ActionSpec {
    /// An action narrating the given text.
    pub fn new(text: impl Into<Text>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// An action whose text is computed at invocation time.
    pub fn computed(f: impl Fn(&mut Engine) -> String + 'static) -> Self {
        Self::new(Text::computed(f))
    }

    /// An action that narrates nothing beyond its command echo.
    pub fn silent() -> Self {
        Self::default()
    }

    /// Set the command echo.
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Set the tag of the result entry.
    pub fn with_kind(mut self, kind: OutputKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the availability.
    pub fn with_available(mut self, available: impl Into<Availability>) -> Self {
        self.available = available.into();
        self
    }

    /// Offer the action only while the predicate holds.
    pub fn available_when(self, f: impl Fn(&Engine) -> bool + 'static) -> Self {
        self.with_available(Availability::when(f))
    }

    /// Run a hook before the text.
    pub fn with_before(mut self, f: impl Fn(&mut Engine) + 'static) -> Self {
        self.before = Some(Hook::new(f));
        self
    }

    /// Run a hook after the text.
    pub fn with_after(mut self, f: impl Fn(&mut Engine) + 'static) -> Self {
        self.after = Some(Hook::new(f));
        self
    }
}

impl From<&str> for ActionSpec {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ActionSpec {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<Text> for ActionSpec {
    fn from(value: Text) -> Self {
        Self::new(value)
    }
}

/// A way out of a location.
///
/// When the destination text names a known location the player moves there;
/// otherwise the text is narrated and the player stays put.
#[derive(Debug, Clone)]
pub struct ExitSpec {
    /// Location id to move to, or the narration refusing the move.
    pub destination: Text,
    /// Echo written to the log. Defaults to the lower-cased exit name.
    pub command: Option<String>,
    /// Whether the exit is offered.
    pub available: Availability,
}

impl ExitSpec {
    /// An exit leading to a location id, or narrating a refusal.
    pub fn new(destination: impl Into<Text>) -> Self {
        Self {
            destination: destination.into(),
            command: None,
            available: Availability::Always,
        }
    }

    /// An exit whose destination is decided at invocation time.
    pub fn computed(f: impl Fn(&mut Engine) -> String + 'static) -> Self {
        Self::new(Text::computed(f))
    }

    /// Set the command echo.
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Set the availability.
    pub fn with_available(mut self, available: impl Into<Availability>) -> Self {
        self.available = available.into();
        self
    }

    /// Offer the exit only while the predicate holds.
    pub fn available_when(self, f: impl Fn(&Engine) -> bool + 'static) -> Self {
        self.with_available(Availability::when(f))
    }
}

impl From<&str> for ExitSpec {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ExitSpec {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<Text> for ExitSpec {
    fn from(value: Text) -> Self {
        Self::new(value)
    }
}

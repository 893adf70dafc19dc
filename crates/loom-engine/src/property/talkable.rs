use std::rc::Rc;

use loom_core::{ConfigResult, OutputKind};

use crate::engine::Engine;
use crate::locale::{Locale, TalkableTexts, translate};
use crate::lock::{Modal, ModalAction};
use crate::text::{Availability, Text};
use crate::world::ActionSpec;

use super::{
    ActionOverrides, Overridable, PropertyHandler, PropertyOptions, PropertyTarget, TALKABLE,
};

/// A conversation topic.
#[derive(Debug, Clone)]
pub struct Topic {
    /// Narration when the topic is chosen.
    pub text: Text,
    /// Command echo replacing "talk about {topic}".
    pub command: Option<String>,
    /// Whether the topic is offered when the conversation opens.
    pub available: Availability,
    /// Tag of the narration entry.
    pub kind: OutputKind,
}

impl Topic {
    /// A topic narrating the given text.
    pub fn new(text: impl Into<Text>) -> Self {
        Self {
            text: text.into(),
            command: None,
            available: Availability::Always,
            kind: OutputKind::Normal,
        }
    }

    /// A topic whose narration is computed when chosen.
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

    /// Offer the topic only while the predicate holds.
    pub fn available_when(self, f: impl Fn(&Engine) -> bool + 'static) -> Self {
        self.with_available(Availability::when(f))
    }

    /// Set the tag of the narration entry.
    pub fn with_kind(mut self, kind: OutputKind) -> Self {
        self.kind = kind;
        self
    }
}

impl From<&str> for Topic {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Topic {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Options of the `talkable` property.
#[derive(Debug, Clone, Default)]
pub struct TalkableOptions {
    /// Object name, explicit command and hooks of the opening action.
    pub overrides: ActionOverrides,
    /// Modal title.
    pub title: Option<String>,
    /// Narration when the conversation opens.
    pub talking_text: Option<String>,
    /// Topics in display order.
    pub topics: Vec<(String, Topic)>,
    /// Name of the closing action.
    pub done_name: Option<String>,
    /// Command echo of the closing action.
    pub done_command: Option<String>,
    /// Narration of the closing action.
    pub done_text: Option<Text>,
}

impl TalkableOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the modal title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the narration when the conversation opens.
    pub fn with_talking_text(mut self, text: impl Into<String>) -> Self {
        self.talking_text = Some(text.into());
        self
    }

    /// Add a topic.
    pub fn with_topic(mut self, name: impl Into<String>, topic: impl Into<Topic>) -> Self {
        self.topics.push((name.into(), topic.into()));
        self
    }

    /// Rename the closing action.
    pub fn with_done_name(mut self, name: impl Into<String>) -> Self {
        self.done_name = Some(name.into());
        self
    }

    /// Set the closing command echo.
    pub fn with_done_command(mut self, command: impl Into<String>) -> Self {
        self.done_command = Some(command.into());
        self
    }

    /// Narrate something when the conversation closes.
    pub fn with_done_text(mut self, text: impl Into<Text>) -> Self {
        self.done_text = Some(text.into());
        self
    }
}

impl Overridable for TalkableOptions {
    fn overrides_mut(&mut self) -> &mut ActionOverrides {
        &mut self.overrides
    }
}

/// Conversation behaviour.
///
/// Generates one action that opens a modal listing the available topics
/// followed by a closing action. Topics keep the modal open; the closing
/// action releases it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Talkable;

impl PropertyHandler for Talkable {
    fn apply(
        &self,
        target: &mut PropertyTarget<'_>,
        options: &PropertyOptions,
        locale: &Locale,
    ) -> ConfigResult<()> {
        let options = match options {
            PropertyOptions::Talkable(options) => Rc::new(options.clone()),
            _ => return Err(target.invalid(TALKABLE, "expected talkable options")),
        };
        let texts = locale.talkable.clone();

        let command = options.overrides.command_or(
            |name| translate(&texts.talk_to, &[name]),
            texts.talk.to_lowercase(),
        );

        let text = {
            let texts = texts.clone();
            let options = Rc::clone(&options);
            Text::computed(move |engine| {
                let modal = conversation(engine, &options, &texts);
                engine.open_modal(modal);
                options
                    .talking_text
                    .clone()
                    .unwrap_or_else(|| texts.talking.clone())
            })
        };
        let action = options
            .overrides
            .decorate(ActionSpec::new(text).with_command(command));
        target.add_action(texts.talk.clone(), action);
        Ok(())
    }
}

fn conversation(engine: &Engine, options: &TalkableOptions, texts: &TalkableTexts) -> Modal {
    let mut modal = Modal::new().with_title(
        options
            .title
            .clone()
            .unwrap_or_else(|| texts.talk_about.clone()),
    );

    for (name, topic) in &options.topics {
        if !topic.available.evaluate(engine) {
            continue;
        }
        let command = topic
            .command
            .clone()
            .unwrap_or_else(|| translate(&texts.talk_about_topic, &[name.as_str()]));
        let action = ActionSpec::new(topic.text.clone())
            .with_command(command)
            .with_kind(topic.kind.clone());
        modal.push(ModalAction::new(name.clone(), action));
    }

    let mut done = ActionSpec::silent()
        .with_command(
            options
                .done_command
                .clone()
                .unwrap_or_else(|| texts.end.clone()),
        )
        .with_after(|engine| {
            engine.unlock_interaction();
        });
    done.text = options.done_text.clone();
    modal.push(ModalAction::new(
        options
            .done_name
            .clone()
            .unwrap_or_else(|| texts.done.clone()),
        done,
    ));
    modal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topics_keep_authoring_order() {
        let options = TalkableOptions::new()
            .with_topic("Weather", "Wow, it rains!")
            .with_topic("Name", Topic::new("Bob.").with_kind(OutputKind::Dialogue));
        let names: Vec<_> = options.topics.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["Weather", "Name"]);
        assert_eq!(options.topics[0].1.kind, OutputKind::Normal);
        assert_eq!(options.topics[1].1.kind, OutputKind::Dialogue);
    }
}

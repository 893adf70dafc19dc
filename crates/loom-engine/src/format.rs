//! Per-kind output formatting for rendering collaborators.
//!
//! The engine only tags output entries. A renderer may register a `{0}`
//! template per [`OutputKind`]; [`FormatterRegistry::format`] applies it.

use std::collections::HashMap;

use loom_core::{OutputEntry, OutputKind};

use crate::locale::translate;

/// Templates keyed by output kind.
#[derive(Debug, Clone, Default)]
pub struct FormatterRegistry {
    templates: HashMap<OutputKind, String>,
}

impl FormatterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the template for a kind.
    pub fn register(&mut self, kind: OutputKind, template: impl Into<String>) {
        self.templates.insert(kind, template.into());
    }

    /// The template registered for a kind.
    pub fn get(&self, kind: &OutputKind) -> Option<&str> {
        self.templates.get(kind).map(String::as_str)
    }

    /// Render an entry, falling back to its bare text.
    pub fn format(&self, entry: &OutputEntry) -> String {
        match self.get(&entry.kind) {
            Some(template) => translate(template, &[&entry.text]),
            None => entry.text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_registered_template() {
        let mut formatters = FormatterRegistry::new();
        formatters.register(OutputKind::Command, "> {0}");

        assert_eq!(formatters.format(&OutputEntry::command("north")), "> north");
        assert_eq!(formatters.format(&OutputEntry::normal("A room.")), "A room.");
    }

    #[test]
    fn custom_kinds_can_be_formatted() {
        let mut formatters = FormatterRegistry::new();
        formatters.register(OutputKind::from("whisper"), "({0})");
        let entry = OutputEntry::new("psst", OutputKind::from("whisper"));
        assert_eq!(formatters.format(&entry), "(psst)");
    }
}

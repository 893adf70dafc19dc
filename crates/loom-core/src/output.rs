//! Append-only narrated output.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tag attached to every output entry. The engine never interprets it beyond tagging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OutputKind {
    /// Plain narration.
    #[default]
    Normal,
    /// Echo of the command the player chose.
    Command,
    /// A score change.
    Score,
    /// Spoken lines.
    Dialogue,
    /// Anything a story or handler defines for itself.
    Custom(String),
}

impl OutputKind {
    /// The tag as written in the log.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Normal => "normal",
            Self::Command => "command",
            Self::Score => "score",
            Self::Dialogue => "dialogue",
            Self::Custom(s) => s,
        }
    }
}

impl From<String> for OutputKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "normal" => Self::Normal,
            "command" => Self::Command,
            "score" => Self::Score,
            "dialogue" => Self::Dialogue,
            _ => Self::Custom(value),
        }
    }
}

impl From<&str> for OutputKind {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<OutputKind> for String {
    fn from(value: OutputKind) -> Self {
        match value {
            OutputKind::Custom(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One narrated line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputEntry {
    /// The text to show.
    pub text: String,
    /// How a renderer should treat it.
    #[serde(rename = "type")]
    pub kind: OutputKind,
}

impl OutputEntry {
    /// Create an entry of the given kind.
    pub fn new(text: impl Into<String>, kind: OutputKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    /// Create a plain narration entry.
    pub fn normal(text: impl Into<String>) -> Self {
        Self::new(text, OutputKind::Normal)
    }

    /// Create a command echo entry.
    pub fn command(text: impl Into<String>) -> Self {
        Self::new(text, OutputKind::Command)
    }
}

/// Chronological record of everything the engine narrated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputLog {
    entries: Vec<OutputEntry>,
}

impl OutputLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn append(&mut self, entry: OutputEntry) {
        self.entries.push(entry);
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[OutputEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been narrated yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<&OutputEntry> {
        self.entries.last()
    }

    /// Replace the whole log, as restoring a snapshot does.
    pub fn replace(&mut self, entries: Vec<OutputEntry>) {
        self.entries = entries;
    }
}

impl From<Vec<OutputEntry>> for OutputLog {
    fn from(entries: Vec<OutputEntry>) -> Self {
        Self { entries }
    }
}

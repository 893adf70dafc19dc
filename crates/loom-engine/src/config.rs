//! Engine configuration.

use loom_core::{ConfigResult, OutputKind};

use crate::format::FormatterRegistry;
use crate::locale::Locale;
use crate::property::{PropertyHandler, PropertyRegistry};

/// Configuration for an [`Engine`](crate::Engine).
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Text table used by the standard handlers and by save/restore.
    pub locale: Locale,
    /// Property handlers by name.
    pub properties: PropertyRegistry,
    /// Per-kind output templates.
    pub formatters: FormatterRegistry,
}

impl EngineConfig {
    /// Default configuration with a built-in locale.
    pub fn for_language(code: &str) -> ConfigResult<Self> {
        Ok(Self::default().with_locale(Locale::for_language(code)?))
    }

    /// Use a custom text table.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Register (or replace) a property handler.
    pub fn with_property(
        mut self,
        name: impl Into<String>,
        handler: impl PropertyHandler + 'static,
    ) -> Self {
        self.properties.register(name, handler);
        self
    }

    /// Register a `{0}` template for an output kind.
    pub fn with_formatter(mut self, kind: OutputKind, template: impl Into<String>) -> Self {
        self.formatters.register(kind, template);
        self
    }
}

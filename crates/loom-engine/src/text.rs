//! Lazy texts, hooks and availability predicates.
//!
//! Story code reaches back into the engine from these closures: a text may
//! move an entity, change a variable or even navigate before it returns. That
//! reentrancy is intentional. Every closure runs synchronously and to
//! completion while the engine is borrowed mutably for the invocation.

use std::fmt;
use std::rc::Rc;

use crate::engine::Engine;

/// Signature of a computed text.
pub type TextFn = dyn Fn(&mut Engine) -> String;
/// Signature of a side-effecting hook.
pub type HookFn = dyn Fn(&mut Engine);
/// Signature of an availability predicate.
pub type PredicateFn = dyn Fn(&Engine) -> bool;

/// Result text of an action or target of an exit.
///
/// Evaluated exactly once, when the action is invoked.
#[derive(Clone)]
pub enum Text {
    /// A fixed string.
    Literal(String),
    /// A computation that may mutate the engine before producing its text.
    Computed(Rc<TextFn>),
}

impl Text {
    /// Wrap a closure as a computed text.
    pub fn computed(f: impl Fn(&mut Engine) -> String + 'static) -> Self {
        Self::Computed(Rc::new(f))
    }

    /// Produce the text, running any side effects.
    pub fn evaluate(&self, engine: &mut Engine) -> String {
        match self {
            Self::Literal(s) => s.clone(),
            Self::Computed(f) => f(engine),
        }
    }

    /// The literal value, if this text is not computed.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(s) => Some(s),
            Self::Computed(_) => None,
        }
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) => f.debug_tuple("Literal").field(s).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_string())
    }
}

impl From<String> for Text {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

/// A side effect run around an action or on entering/leaving a location.
#[derive(Clone)]
pub struct Hook(Rc<HookFn>);

impl Hook {
    /// Wrap a closure as a hook.
    pub fn new(f: impl Fn(&mut Engine) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Run the hook.
    pub fn call(&self, engine: &mut Engine) {
        (self.0)(engine)
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Hook(..)")
    }
}

/// Whether an action or exit is offered in the current render.
///
/// Predicates are evaluated afresh on every recompute and never cached
/// across recomputes.
#[derive(Clone, Default)]
pub enum Availability {
    /// Always offered.
    #[default]
    Always,
    /// Never offered.
    Never,
    /// Offered while the predicate holds.
    When(Rc<PredicateFn>),
}

impl Availability {
    /// Wrap a predicate.
    pub fn when(f: impl Fn(&Engine) -> bool + 'static) -> Self {
        Self::When(Rc::new(f))
    }

    /// Evaluate against the current engine state.
    pub fn evaluate(&self, engine: &Engine) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::When(f) => f(engine),
        }
    }
}

impl From<bool> for Availability {
    fn from(value: bool) -> Self {
        if value { Self::Always } else { Self::Never }
    }
}

impl fmt::Debug for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => f.write_str("Always"),
            Self::Never => f.write_str("Never"),
            Self::When(_) => f.write_str("When(..)"),
        }
    }
}

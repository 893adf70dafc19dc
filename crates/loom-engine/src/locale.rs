//! Localized text tables.
//!
//! Templates use positional placeholders: `{0}`, `{1}`, ...

use loom_core::{ConfigResult, ConfigurationError};

/// Replace `{0}`, `{1}`, ... in `template` with the given arguments.
pub fn translate(template: &str, args: &[&str]) -> String {
    let mut out = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        out = out.replace(&format!("{{{i}}}"), arg);
    }
    out
}

/// Texts of the `movable` property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovableTexts {
    /// Action name for picking up.
    pub take: String,
    /// Action name for putting down.
    pub drop: String,
    /// Narrated after picking up.
    pub taken: String,
    /// Narrated after putting down.
    pub dropped: String,
}

/// Texts of the `usableWith` property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsableWithTexts {
    /// Action name and default modal title.
    pub use_with: String,
    /// Default command echo.
    pub use_verb: String,
    /// Command echo when an object name is configured. `{0}`: object name.
    pub use_object: String,
    /// Command echo for a combination. `{0}`: used entity, `{1}`: target.
    pub use_with_object: String,
    /// Narrated when the modal opens.
    pub using: String,
    /// Narrated when a combination has no effect.
    pub nothing: String,
}

/// Texts of the `talkable` property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TalkableTexts {
    /// Action name.
    pub talk: String,
    /// Command echo when an object name is configured. `{0}`: object name.
    pub talk_to: String,
    /// Command echo for a topic. `{0}`: topic name.
    pub talk_about_topic: String,
    /// Default modal title.
    pub talk_about: String,
    /// Default name of the closing action.
    pub done: String,
    /// Default command echo of the closing action.
    pub end: String,
    /// Narrated when the conversation opens.
    pub talking: String,
}

/// A complete text table for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    /// Language code.
    pub code: String,
    /// Command echo of a save.
    pub save: String,
    /// Command echo of a restore.
    pub restore: String,
    /// Narrated after a save.
    pub saved: String,
    /// Narrated after a restore.
    pub restored: String,
    /// `movable` texts.
    pub movable: MovableTexts,
    /// `usableWith` texts.
    pub usable_with: UsableWithTexts,
    /// `talkable` texts.
    pub talkable: TalkableTexts,
}

impl Default for Locale {
    fn default() -> Self {
        Self::english()
    }
}

impl Locale {
    /// Look up a built-in table by language code.
    pub fn for_language(code: &str) -> ConfigResult<Self> {
        match code {
            "en" => Ok(Self::english()),
            "it" => Ok(Self::italian()),
            other => Err(ConfigurationError::UnknownLanguage(other.to_string())),
        }
    }

    /// The English table.
    pub fn english() -> Self {
        Self {
            code: "en".to_string(),
            save: "save".to_string(),
            restore: "restore".to_string(),
            saved: "Saved".to_string(),
            restored: "Restored".to_string(),
            movable: MovableTexts {
                take: "Take".to_string(),
                drop: "Drop".to_string(),
                taken: "Taken".to_string(),
                dropped: "Dropped".to_string(),
            },
            usable_with: UsableWithTexts {
                use_with: "Use with".to_string(),
                use_verb: "use".to_string(),
                use_object: "use {0}".to_string(),
                use_with_object: "use {0} with {1}".to_string(),
                using: "using".to_string(),
                nothing: "Nothing happens".to_string(),
            },
            talkable: TalkableTexts {
                talk: "Talk".to_string(),
                talk_to: "talk to {0}".to_string(),
                talk_about_topic: "talk about {0}".to_string(),
                talk_about: "Talk about".to_string(),
                done: "Done".to_string(),
                end: "end conversation".to_string(),
                talking: "talking".to_string(),
            },
        }
    }

    /// The Italian table.
    pub fn italian() -> Self {
        Self {
            code: "it".to_string(),
            save: "salva".to_string(),
            restore: "ricarica".to_string(),
            saved: "Salvato".to_string(),
            restored: "Ricaricato".to_string(),
            movable: MovableTexts {
                take: "Prendi".to_string(),
                drop: "Lascia".to_string(),
                taken: "Preso".to_string(),
                dropped: "Lasciato".to_string(),
            },
            usable_with: UsableWithTexts {
                use_with: "Usa con".to_string(),
                use_verb: "usa".to_string(),
                use_object: "usa {0}".to_string(),
                use_with_object: "usa {0} con {1}".to_string(),
                using: "usando...".to_string(),
                nothing: "Non succede nulla".to_string(),
            },
            talkable: TalkableTexts {
                talk: "Parla".to_string(),
                talk_to: "parla con {0}".to_string(),
                talk_about_topic: "parla di {0}".to_string(),
                talk_about: "Parla di".to_string(),
                done: "Fatto".to_string(),
                end: "termina conversazione".to_string(),
                talking: "parlando...".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_fills_positions() {
        assert_eq!(
            translate("use {0} with {1}", &["Object 1", "Object 2"]),
            "use Object 1 with Object 2"
        );
        assert_eq!(translate("talk about {0}", &["Weather"]), "talk about Weather");
        assert_eq!(translate("no placeholders", &["ignored"]), "no placeholders");
    }

    #[test]
    fn language_lookup() {
        assert_eq!(Locale::for_language("it").unwrap().movable.take, "Prendi");
        assert_eq!(Locale::default().code, "en");
        assert_eq!(
            Locale::for_language("xx").unwrap_err(),
            ConfigurationError::UnknownLanguage("xx".to_string())
        );
    }
}

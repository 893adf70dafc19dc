/// Alias for `Result<T, ConfigurationError>`.
pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// Fatal problems with an authored story, surfaced immediately and never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// No location carries the `initial` flag.
    #[error("no initial location")]
    NoInitialLocation,

    /// More than one location carries the `initial` flag.
    #[error("more than one initial location: {}", .0.join(", "))]
    MultipleInitialLocations(Vec<String>),

    /// An action or exit collection was supplied as a computed key set.
    #[error("{owner}: {collection} must be a static collection, not a computed one")]
    ComputedKeySet {
        /// Location or entity that owns the collection.
        owner: String,
        /// Which collection (`actions` or `exits`).
        collection: &'static str,
    },

    /// A property name is not present in the registry.
    #[error("{owner}: unknown property \"{property}\"")]
    UnknownProperty {
        /// Location or entity referencing the property.
        owner: String,
        /// The unregistered property name.
        property: String,
    },

    /// A registered handler rejected the options it was given.
    #[error("{owner}: invalid options for property \"{property}\": {reason}")]
    InvalidPropertyOptions {
        /// Location or entity carrying the property.
        owner: String,
        /// Property name.
        property: String,
        /// What the handler objected to.
        reason: String,
    },

    /// An entity is placed at a location that does not exist.
    #[error("entity \"{entity}\" is placed at unknown location \"{location}\"")]
    UnknownLocation {
        /// The misplaced entity.
        entity: String,
        /// The unresolved location id.
        location: String,
    },

    /// The starting inventory references an unknown entity.
    #[error("inventory references unknown entity \"{0}\"")]
    UnknownInventoryEntity(String),

    /// Two locations share an id.
    #[error("duplicate location id \"{0}\"")]
    DuplicateLocation(String),

    /// Two entities (objects or characters) share an id.
    #[error("duplicate entity id \"{0}\"")]
    DuplicateEntity(String),

    /// No text table exists for the requested language.
    #[error("no text table for language \"{0}\"")]
    UnknownLanguage(String),
}

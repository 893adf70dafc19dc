use std::fmt;

use serde::{Deserialize, Serialize};

/// Reserved placement name meaning "carried by the player".
pub const INVENTORY: &str = "__inventory__";

/// Stable identifier of a location, as written by the story author.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(pub String);

impl LocationId {
    /// Create a location ID from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LocationId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Stable identifier of an entity (object or character).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    /// Create an entity ID from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Where an entity currently is.
///
/// Serialized as the location id, the [`INVENTORY`] sentinel, or `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Placement {
    /// Lying in a location.
    At(LocationId),
    /// Carried by the player.
    Inventory,
    /// Not placed anywhere.
    #[default]
    Nowhere,
}

impl Placement {
    /// Placement at the given location.
    pub fn at(location: impl Into<String>) -> Self {
        Self::At(LocationId::new(location))
    }

    /// The location, if this placement is a location.
    pub fn location(&self) -> Option<&LocationId> {
        match self {
            Self::At(id) => Some(id),
            _ => None,
        }
    }

    /// Whether this is the inventory.
    pub fn is_inventory(&self) -> bool {
        matches!(self, Self::Inventory)
    }
}

impl From<Option<String>> for Placement {
    fn from(value: Option<String>) -> Self {
        match value {
            None => Self::Nowhere,
            Some(s) if s == INVENTORY => Self::Inventory,
            Some(s) => Self::At(LocationId(s)),
        }
    }
}

impl From<Placement> for Option<String> {
    fn from(value: Placement) -> Self {
        match value {
            Placement::At(id) => Some(id.0),
            Placement::Inventory => Some(INVENTORY.to_string()),
            Placement::Nowhere => None,
        }
    }
}

impl From<LocationId> for Placement {
    fn from(value: LocationId) -> Self {
        Self::At(value)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::At(id) => write!(f, "{id}"),
            Self::Inventory => write!(f, "{INVENTORY}"),
            Self::Nowhere => write!(f, "nowhere"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_serializes_as_nullable_string() {
        let placed = serde_json::to_value(Placement::at("hall")).unwrap();
        assert_eq!(placed, serde_json::json!("hall"));

        let carried = serde_json::to_value(Placement::Inventory).unwrap();
        assert_eq!(carried, serde_json::json!("__inventory__"));

        let nowhere = serde_json::to_value(Placement::Nowhere).unwrap();
        assert!(nowhere.is_null());
    }

    #[test]
    fn placement_parses_sentinel() {
        let p: Placement = serde_json::from_str("\"__inventory__\"").unwrap();
        assert!(p.is_inventory());

        let p: Placement = serde_json::from_str("null").unwrap();
        assert_eq!(p, Placement::Nowhere);

        let p: Placement = serde_json::from_str("\"cellar\"").unwrap();
        assert_eq!(p.location(), Some(&LocationId::new("cellar")));
    }

    #[test]
    fn ids_are_transparent() {
        let id = EntityId::new("coin");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"coin\"");
        assert_eq!(id.to_string(), "coin");
    }
}

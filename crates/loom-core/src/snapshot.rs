//! Serializable subset of mutable engine state.
//!
//! A [`Snapshot`] holds exactly what a story can change at runtime: variables,
//! entity placements, the current location, the score and the output log. The
//! static world structure, the interaction lock and any open modal are not
//! part of it. Validating a snapshot read from storage is the persistence
//! collaborator's job; the engine overwrites its state structurally.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::{EntityId, LocationId, Placement};
use crate::output::OutputEntry;
use crate::vars::Vars;

/// Everything `save` captures and `restore` overwrites.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Variables of every location.
    pub location_vars: BTreeMap<LocationId, Vars>,
    /// Variables of every entity.
    pub entity_vars: BTreeMap<EntityId, Vars>,
    /// Placement of every entity.
    pub entity_locations: BTreeMap<EntityId, Placement>,
    /// Story-wide variables.
    pub vars: Vars,
    /// Where the player stands.
    pub current_location: Option<LocationId>,
    /// Current score, if the story keeps one.
    pub score: Option<i64>,
    /// Full output log at the time of saving.
    pub output_log: Vec<OutputEntry>,
}

impl Snapshot {
    /// Serialize to a compact JSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse a snapshot from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

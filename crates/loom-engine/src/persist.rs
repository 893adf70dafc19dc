//! Save and restore.
//!
//! A [`Snapshot`] holds exactly the mutable story state: variables,
//! placements, current location, score and the output log. The world
//! structure, the lock and any open modal are not part of it.

use std::collections::BTreeMap;

use loom_core::Snapshot;
use tracing::{debug, warn};

use crate::engine::Engine;
use crate::error::{EngineError, EngineResult};

impl Engine {
    /// Capture the serializable state without narrating anything.
    pub fn snapshot(&self) -> Snapshot {
        let world = self.world();
        Snapshot {
            location_vars: world
                .locations()
                .iter()
                .map(|l| (l.id.clone(), l.vars.clone()))
                .collect(),
            entity_vars: world
                .entities()
                .iter()
                .map(|e| (e.id.clone(), e.vars.clone()))
                .collect(),
            entity_locations: world
                .entities()
                .iter()
                .map(|e| (e.id.clone(), e.placement.clone()))
                .collect(),
            vars: self.vars.clone(),
            current_location: self.current.clone(),
            score: self.score,
            output_log: self.log.entries().to_vec(),
        }
    }

    /// Echo the save command, capture the state, then narrate the
    /// confirmation. The snapshot's log ends with the echo.
    pub fn save(&mut self) -> EngineResult<Snapshot> {
        if !self.is_started() {
            return Err(EngineError::NotStarted);
        }
        let locale = self.locale();
        let (command, saved) = (locale.save.clone(), locale.saved.clone());

        self.print_command(command);
        let snapshot = self.snapshot();
        debug!(entries = snapshot.output_log.len(), "story saved");
        self.print(saved);
        Ok(snapshot)
    }

    /// Echo the restore command, overwrite the saved state, release any
    /// lock and narrate the confirmation.
    ///
    /// The snapshot is trusted to come from [`Engine::save`] on the same
    /// story. Locations and entities it does not mention keep no variables
    /// and are placed nowhere.
    pub fn restore(&mut self, snapshot: Snapshot) -> EngineResult<()> {
        if !self.is_started() {
            return Err(EngineError::NotStarted);
        }
        let locale = self.locale();
        let (command, restored) = (locale.restore.clone(), locale.restored.clone());
        self.print_command(command);

        let Snapshot {
            mut location_vars,
            mut entity_vars,
            mut entity_locations,
            vars,
            current_location,
            score,
            output_log,
        } = snapshot;

        for location in self.world.locations_mut() {
            location.vars = location_vars.remove(&location.id).unwrap_or_default();
        }
        for entity in self.world.entities_mut() {
            entity.vars = entity_vars.remove(&entity.id).unwrap_or_default();
            entity.placement = entity_locations.remove(&entity.id).unwrap_or_default();
        }
        warn_leftovers("location vars", location_vars);
        warn_leftovers("entity vars", entity_vars);
        warn_leftovers("entity locations", entity_locations);

        self.vars = vars;
        match current_location {
            Some(id) if self.world.location_by_id(id.as_str()).is_some() => {
                self.current = Some(id);
            }
            Some(id) => warn!(location = %id, "snapshot names an unknown location"),
            None => warn!("snapshot has no current location"),
        }
        self.score = score;
        self.log.replace(output_log);
        self.lock.unlock();

        debug!(entries = self.log.len(), "story restored");
        self.refresh();
        self.print(restored);
        Ok(())
    }
}

fn warn_leftovers<K: std::fmt::Display, V>(what: &str, leftovers: BTreeMap<K, V>) {
    for key in leftovers.keys() {
        warn!(collection = what, key = %key, "snapshot entry without a counterpart ignored");
    }
}

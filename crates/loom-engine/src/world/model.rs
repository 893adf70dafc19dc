use std::collections::HashMap;
use std::rc::Rc;

use loom_core::{ConfigResult, ConfigurationError, EntityId, LocationId, Placement, Vars};

use crate::named::NamedMap;
use crate::property::PropertyOptions;
use crate::story::{EntityDef, LocationDef};
use crate::text::Hook;

use super::action::{ActionSpec, ExitSpec};

/// A prepared location.
#[derive(Debug)]
pub struct Location {
    /// Unique, stable id.
    pub id: LocationId,
    /// Display name.
    pub name: String,
    /// Description shown with the location.
    pub description: String,
    /// Whether the story starts here.
    pub initial: bool,
    /// Ways out, in display order.
    pub exits: NamedMap<Rc<ExitSpec>>,
    /// Location-specific actions, including those generated by properties.
    pub actions: NamedMap<Rc<ActionSpec>>,
    /// Mutable variables.
    pub vars: Vars,
    /// Attached properties with their options.
    pub properties: NamedMap<PropertyOptions>,
    /// Runs when the player arrives.
    pub on_enter: Option<Hook>,
    /// Runs when the player leaves.
    pub on_exit: Option<Hook>,
}

/// A prepared object or character.
#[derive(Debug)]
pub struct Entity {
    /// Unique, stable id.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Where the entity currently is.
    pub placement: Placement,
    /// Entity actions, including those generated by properties.
    pub actions: NamedMap<Rc<ActionSpec>>,
    /// Mutable variables.
    pub vars: Vars,
    /// Attached properties with their options.
    pub properties: NamedMap<PropertyOptions>,
}

/// The authored graph of locations and entities.
///
/// Built once from the story description; entities and locations are never
/// removed afterwards. Iteration follows authoring order.
#[derive(Debug, Default)]
pub struct World {
    locations: Vec<Location>,
    entities: Vec<Entity>,

    // Indexes
    location_index: HashMap<String, usize>,
    entity_index: HashMap<String, usize>,
}

impl World {
    /// Build the world, applying structural defaults and validating references.
    ///
    /// Fails on computed action/exit sets, duplicate ids, entities placed at
    /// unknown locations and inventory entries naming unknown entities. The
    /// initial location is checked later, when the story starts.
    pub fn build(
        locations: Vec<LocationDef>,
        entities: Vec<EntityDef>,
        inventory: &[EntityId],
    ) -> ConfigResult<Self> {
        let mut world = Self::default();

        for def in locations {
            if world.location_index.contains_key(&def.id) {
                return Err(ConfigurationError::DuplicateLocation(def.id));
            }
            let location = Location {
                exits: def.exits.into_named(&def.id, "exits")?,
                actions: def.actions.into_named(&def.id, "actions")?,
                properties: def.properties.into_iter().collect(),
                id: LocationId::new(def.id),
                name: def.name,
                description: def.description,
                initial: def.initial,
                vars: def.vars,
                on_enter: def.on_enter,
                on_exit: def.on_exit,
            };
            world
                .location_index
                .insert(location.id.0.clone(), world.locations.len());
            world.locations.push(location);
        }

        for def in entities {
            if world.entity_index.contains_key(&def.id) {
                return Err(ConfigurationError::DuplicateEntity(def.id));
            }
            if let Placement::At(location) = &def.placement
                && !world.location_index.contains_key(location.as_str())
            {
                return Err(ConfigurationError::UnknownLocation {
                    entity: def.id,
                    location: location.0.clone(),
                });
            }
            let entity = Entity {
                actions: def.actions.into_named(&def.id, "actions")?,
                properties: def.properties.into_iter().collect(),
                id: EntityId::new(def.id),
                name: def.name,
                placement: def.placement,
                vars: def.vars,
            };
            world
                .entity_index
                .insert(entity.id.0.clone(), world.entities.len());
            world.entities.push(entity);
        }

        for id in inventory {
            let entity = world
                .entity_mut(id.as_str())
                .ok_or_else(|| ConfigurationError::UnknownInventoryEntity(id.0.clone()))?;
            entity.placement = Placement::Inventory;
        }

        Ok(world)
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    /// Look up a location by id.
    pub fn location_by_id(&self, id: &str) -> Option<&Location> {
        self.location_index.get(id).map(|&i| &self.locations[i])
    }

    /// Look up a location by id, mutably.
    pub fn location_mut(&mut self, id: &str) -> Option<&mut Location> {
        self.location_index
            .get(id)
            .copied()
            .map(move |i| &mut self.locations[i])
    }

    /// Look up an entity by id.
    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.entity_index.get(id).map(|&i| &self.entities[i])
    }

    /// Look up an entity by id, mutably.
    pub fn entity_mut(&mut self, id: &str) -> Option<&mut Entity> {
        self.entity_index
            .get(id)
            .copied()
            .map(move |i| &mut self.entities[i])
    }

    /// All locations in authoring order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// All entities in authoring order (objects first, then characters).
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub(crate) fn locations_mut(&mut self) -> &mut [Location] {
        &mut self.locations
    }

    pub(crate) fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Entities whose placement equals the argument, in authoring order.
    pub fn entities_at(&self, placement: &Placement) -> Vec<&Entity> {
        self.entities
            .iter()
            .filter(|e| e.placement == *placement)
            .collect()
    }

    /// Whether the entity is carried by the player. Unknown ids are not.
    pub fn is_in_inventory(&self, id: &str) -> bool {
        self.entity(id).is_some_and(|e| e.placement.is_inventory())
    }

    /// The single location flagged `initial`.
    pub fn initial_location(&self) -> ConfigResult<&Location> {
        let mut initial = self.locations.iter().filter(|l| l.initial);
        match (initial.next(), initial.next()) {
            (Some(location), None) => Ok(location),
            (None, _) => Err(ConfigurationError::NoInitialLocation),
            (Some(_), Some(_)) => Err(ConfigurationError::MultipleInitialLocations(
                self.locations
                    .iter()
                    .filter(|l| l.initial)
                    .map(|l| l.id.0.clone())
                    .collect(),
            )),
        }
    }
}

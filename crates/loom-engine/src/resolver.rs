//! Command resolver: turns engine state into a view and its bindings.

use std::rc::Rc;

use loom_core::Placement;

use crate::engine::Engine;
use crate::lock::InteractionLock;
use crate::named::NamedMap;
use crate::view::{
    Handle, Header, InventoryPanel, MainPanel, ModalPanel, RenderedAction, RenderedEntity,
    ViewState,
};
use crate::world::{ActionSpec, Entity, ExitSpec};

/// What a handle of the current view points at.
#[derive(Debug, Clone)]
pub(crate) enum Binding {
    Exit { name: String, spec: Rc<ExitSpec> },
    Action { name: String, spec: Rc<ActionSpec> },
}

impl Binding {
    pub(crate) fn name(&self) -> &str {
        match self {
            Self::Exit { name, .. } | Self::Action { name, .. } => name,
        }
    }
}

/// A freshly resolved view with the targets of its handles.
pub(crate) struct Resolution {
    pub(crate) view: ViewState,
    pub(crate) bindings: Vec<Binding>,
}

struct Binder {
    generation: u64,
    bindings: Vec<Binding>,
}

impl Binder {
    fn bind(&mut self, binding: Binding) -> RenderedAction {
        let handle = Handle {
            generation: self.generation,
            slot: self.bindings.len(),
        };
        let name = binding.name().to_string();
        self.bindings.push(binding);
        RenderedAction { name, handle }
    }

    fn actions<'a>(
        &mut self,
        engine: &Engine,
        actions: impl IntoIterator<Item = (&'a str, &'a Rc<ActionSpec>)>,
    ) -> Vec<RenderedAction> {
        actions
            .into_iter()
            .filter(|(_, spec)| spec.available.evaluate(engine))
            .map(|(name, spec)| {
                self.bind(Binding::Action {
                    name: name.to_string(),
                    spec: Rc::clone(spec),
                })
            })
            .collect()
    }

    fn entity(&mut self, engine: &Engine, entity: &Entity, interactive: bool) -> RenderedEntity {
        let actions = if interactive {
            self.actions(engine, entity.actions.iter())
        } else {
            Vec::new()
        };
        RenderedEntity {
            id: entity.id.clone(),
            name: entity.name.clone(),
            actions,
        }
    }
}

/// Location actions followed by global actions the location does not override.
fn merged<'a>(
    local: &'a NamedMap<Rc<ActionSpec>>,
    global: &'a NamedMap<Rc<ActionSpec>>,
) -> impl Iterator<Item = (&'a str, &'a Rc<ActionSpec>)> {
    local
        .iter()
        .chain(global.iter().filter(move |(name, _)| !local.contains(name)))
}

/// Compute the view for the current state.
///
/// Availability predicates are evaluated here, once per recompute.
pub(crate) fn resolve(engine: &Engine, generation: u64) -> Resolution {
    let mut binder = Binder {
        generation,
        bindings: Vec::new(),
    };
    let lock = engine.lock();
    let world = engine.world();
    let free = matches!(lock, InteractionLock::Free);

    let mut main = MainPanel::default();
    let mut inventory = InventoryPanel::default();

    let location = engine
        .current_location()
        .and_then(|id| world.location_by_id(id.as_str()));
    if let Some(location) = location {
        main.location_name = location.name.clone();
        main.description = location.description.clone();

        if free {
            main.exits = location
                .exits
                .iter()
                .filter(|(_, spec)| spec.available.evaluate(engine))
                .map(|(name, spec)| {
                    binder.bind(Binding::Exit {
                        name: name.to_string(),
                        spec: Rc::clone(spec),
                    })
                })
                .collect();
            let actions = merged(&location.actions, engine.global_actions());
            main.actions = binder.actions(engine, actions);
        }

        if !lock.is_ended() {
            main.entities = world
                .entities_at(&Placement::At(location.id.clone()))
                .into_iter()
                .map(|e| binder.entity(engine, e, free))
                .collect();
        }
    }

    if !lock.is_ended() {
        inventory.entities = world
            .entities_at(&Placement::Inventory)
            .into_iter()
            .map(|e| binder.entity(engine, e, free))
            .collect();
    }

    let modal = lock.modal().map(|modal| ModalPanel {
        title: modal.title.clone(),
        actions: modal
            .actions
            .iter()
            .map(|action| {
                binder.bind(Binding::Action {
                    name: action.name.clone(),
                    spec: Rc::clone(&action.spec),
                })
            })
            .collect(),
    });

    let view = ViewState {
        generation,
        header: Header {
            title: engine.title().to_string(),
            score: engine.score(),
        },
        main,
        inventory,
        modal,
        log: engine.log().entries().to_vec(),
        locked: lock.is_locked(),
        ended: lock.is_ended(),
    };
    Resolution {
        view,
        bindings: binder.bindings,
    }
}

//! The prepared world model: locations, entities, actions and exits.

mod action;
mod model;

pub use action::{ActionSpec, ExitSpec};
pub use model::{Entity, Location, World};

//! Controller: the player-side driver owning the photo collection, the
//! held-photo pose and the rewind history.

mod input_gate;
mod viewfinder_controller;

pub use input_gate::{InputGate, NoOpInputGate};
pub use viewfinder_controller::ViewfinderController;

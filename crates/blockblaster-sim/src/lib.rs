//! Simulation engine for BLOCK BLASTER.
//!
//! Owns the hecs ECS world and all session state, advances one tick per
//! host frame, and produces `GameSnapshot`s for the renderer and audio
//! collaborators.

pub mod boss;
pub mod effects;
pub mod engine;
pub mod player;
pub mod session;
pub mod systems;

pub use blockblaster_core as core;
pub use engine::{GameEngine, SimConfig};

#[cfg(test)]
mod tests;

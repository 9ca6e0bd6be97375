//! Core types and definitions for the BLOCK BLASTER simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, constants, events, input, snapshot views, and the
//! leaderboard rules. It has no dependency on any runtime or rendering
//! framework.

pub mod components;
pub mod constants;
pub mod effects;
pub mod enums;
pub mod events;
pub mod input;
pub mod leaderboard;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;

//! Ephemeral visual-effect records.
//!
//! These carry no gameplay logic, but their existence and timing are part
//! of the simulation's observable output: score feedback, combo counters,
//! and impact flashes are all driven from here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::{ExplosionTint, ParticleShape, ParticleTint, TextStyle};

/// An expanding explosion visual.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    /// Peak visual size.
    pub size: f32,
    pub duration_ms: f64,
    /// Time since the explosion started.
    pub elapsed_ms: f64,
    pub tint: ExplosionTint,
    pub debris: bool,
    pub shockwave: bool,
}

/// Rising combat text ("+300", "COMBO x4", "PERFECT!").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatingText {
    pub text: String,
    pub pos: Vec2,
    /// Spawn y; the render offset is derived from remaining life.
    pub initial_y: f32,
    pub life_ms: f64,
    pub style: TextStyle,
    pub large: bool,
    pub huge: bool,
}

/// Brief flash at a weapon's muzzle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MuzzleFlash {
    pub pos: Vec2,
    pub size: f32,
    /// Rotation in degrees; directional weapons angle their flash.
    pub rotation: f32,
    pub from_player: bool,
    pub life_ms: f64,
}

/// A generic particle: debris, sparks, teleport motes, pickup bursts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Velocity in pixels per nominal frame.
    pub vel: Vec2,
    pub size: f32,
    pub life_ms: f64,
    pub opacity: f32,
    pub tint: ParticleTint,
    /// Downward acceleration per nominal frame, for debris arcs.
    pub gravity: Option<f32>,
    pub shape: ParticleShape,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub spark: bool,
    pub debris: bool,
}

/// One star of the parallax background.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    /// Per-star speed multiplier on the layer's base scroll speed.
    pub speed_factor: f32,
    pub opacity: f32,
    /// Index into the layer table this star belongs to.
    pub layer: usize,
}

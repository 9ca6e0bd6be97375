//! Fundamental geometric and simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in playfield space.
/// Anchored at the top-left corner; y grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner.
    pub pos: Vec2,
    /// Width and height.
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size * 0.5,
            size,
        }
    }

    /// Geometric center.
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// AABB overlap test. Touching edges do not count as overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }
}

/// Simulation clock. One tick per `advance` call; elapsed time accumulates
/// the (clamped) per-frame delta in milliseconds.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed game time in milliseconds.
    pub elapsed_ms: f64,
}

impl SimTime {
    /// Advance by one tick covering `dt_ms` milliseconds.
    pub fn advance(&mut self, dt_ms: f64) {
        self.tick += 1;
        self.elapsed_ms += dt_ms;
    }

    /// Current game time in milliseconds.
    pub fn now(&self) -> f64 {
        self.elapsed_ms
    }
}

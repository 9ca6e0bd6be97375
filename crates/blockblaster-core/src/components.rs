//! ECS components for hecs entities.
//!
//! Components are plain data structs with no behavior attached.
//! All behavior lives in the sim crate's systems.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::{EnemyKind, PartSlot, PowerUpKind, TeleportState};
use crate::types::Rect;

/// Spatial extent of an entity: top-left anchored position plus size.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// Common enemy state shared by all kinds, boss parts included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// Remaining health. At or below zero the enemy is dead (modulo the
    /// Splitter Drone's split animation).
    pub health: i32,
    /// Points awarded on kill, before multipliers.
    pub points: u32,
    /// Spawn grace period; while positive the enemy absorbs hits without
    /// taking health damage.
    pub spawn_timer_ms: f64,
    /// Hit-flash visual countdown.
    pub hit_flash_ms: f64,
    /// Set once this enemy has been counted toward an active challenge
    /// wave's remaining total. Guards the several removal paths against
    /// double-decrementing the wave counter.
    pub counted_for_wave: bool,
}

impl Enemy {
    pub fn new(kind: EnemyKind, health: i32, points: u32) -> Self {
        Self {
            kind,
            health,
            points,
            spawn_timer_ms: crate::constants::SPAWN_ANIMATION_MS,
            hit_flash_ms: 0.0,
            counted_for_wave: false,
        }
    }

    /// Whether the spawn grace period has elapsed.
    pub fn spawn_done(&self) -> bool {
        self.spawn_timer_ms <= 0.0
    }
}

/// Fire-rate bookkeeping for shooting enemies. Timestamps are game-time
/// milliseconds of the last shot; randomized at spawn so groups do not
/// volley in sync.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FireControl {
    pub last_shot_ms: f64,
    /// Last special attack (Mid-Tier spread).
    pub last_special_ms: f64,
}

/// Swarm Minion sinusoidal drift state.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SwarmMotion {
    /// Accumulated oscillation phase (radians).
    pub oscillation: f32,
}

/// Teleporter Elite state machine data.
///
/// `timer_ms` counts down through the active states. After phase-out it is
/// set to `-TELEPORTER_COOLDOWN_MS` and counts *up* toward zero while the
/// unit sits parked far off-playfield.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TeleporterRig {
    pub state: TeleportState,
    pub timer_ms: f64,
    /// Where the next phase-in materializes.
    pub target: Vec2,
    /// Angle of the aimed shot, latched when telegraphing begins.
    pub aim_angle: f32,
}

/// Splitter Drone death-split state.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SplitterRig {
    /// True once the drone has died and the split animation is running.
    pub splitting: bool,
    pub anim_timer_ms: f64,
}

/// Marks an enemy entity as a rigidly-attached part of the boss body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BossPart {
    /// Id of the owning `BossState`. A mismatch means the part is orphaned;
    /// updates against it no-op.
    pub parent_id: u32,
    pub slot: PartSlot,
    /// Destroyed weapon pods stop firing and are removed; the core stays at
    /// zero health instead.
    pub destroyed: bool,
    /// Health at creation, for aggregate damage accounting.
    pub initial_health: i32,
}

/// A projectile in flight. Carries either a full velocity override or falls
/// back to the straight-line speed for its side.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub damage: i32,
    /// Velocity in pixels per nominal frame; `None` means straight vertical
    /// at the side's standard speed.
    pub vel: Option<Vec2>,
    /// Fast variant (elite / boss fire).
    pub fast: bool,
    /// Distinct visual treatment for elite/boss shots.
    pub elite_visual: bool,
    /// Enemy kind that fired this, for bullet visuals. `None` for player
    /// shots.
    pub fired_by: Option<EnemyKind>,
}

/// Marker: projectile fired by the player.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerShot;

/// Marker: projectile fired by an enemy or the boss.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyShot;

/// A collectible power-up drifting down the playfield.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    /// Delay before magnetic attraction engages.
    pub attraction_timer_ms: f64,
    /// Set on pickup; the effect applies when the collect animation ends.
    pub collected: bool,
    pub collect_anim_ms: f64,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind) -> Self {
        Self {
            kind,
            attraction_timer_ms: crate::constants::POWERUP_ATTRACT_DELAY_MS,
            collected: false,
            collect_anim_ms: 0.0,
        }
    }
}

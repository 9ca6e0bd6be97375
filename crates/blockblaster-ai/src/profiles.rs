//! Kind-specific behavioral profiles.
//!
//! Consolidates per-kind tuning so movement, spawning, and drop logic all
//! dispatch through one table.

use glam::Vec2;

use blockblaster_core::constants::*;
use blockblaster_core::enums::EnemyKind;

/// Behavioral profile for an enemy kind.
pub struct EnemyProfile {
    pub size: Vec2,
    /// Health at stage 1, before per-stage scaling.
    pub base_health: i32,
    pub points: u32,
    /// Descent speed in pixels per nominal frame (zero for kinds that do
    /// not descend on their own).
    pub speed: f32,
    /// Straight-shot cooldown, before per-stage scaling. `None` for kinds
    /// that do not fire on a simple cooldown.
    pub fire_cooldown_ms: Option<f64>,
    /// Mid-Tier spread attack cooldown.
    pub special_cooldown_ms: Option<f64>,
    /// Probability of dropping a power-up on death.
    pub drop_chance: f64,
}

/// Get the behavioral profile for a given kind.
pub fn get_profile(kind: EnemyKind) -> EnemyProfile {
    match kind {
        EnemyKind::Grunt => EnemyProfile {
            size: Vec2::new(GRUNT_WIDTH, GRUNT_HEIGHT),
            base_health: GRUNT_HEALTH,
            points: GRUNT_POINTS,
            speed: GRUNT_SPEED,
            fire_cooldown_ms: Some(GRUNT_FIRE_COOLDOWN_MS),
            special_cooldown_ms: None,
            drop_chance: DROP_CHANCE_GRUNT,
        },
        EnemyKind::MidTier => EnemyProfile {
            size: Vec2::new(MID_TIER_WIDTH, MID_TIER_HEIGHT),
            base_health: MID_TIER_HEALTH,
            points: MID_TIER_POINTS,
            speed: MID_TIER_SPEED,
            fire_cooldown_ms: Some(MID_TIER_FIRE_COOLDOWN_MS),
            special_cooldown_ms: Some(MID_TIER_SPECIAL_COOLDOWN_MS),
            drop_chance: DROP_CHANCE_MID_TIER,
        },
        EnemyKind::SwarmMinion => EnemyProfile {
            size: Vec2::new(SWARM_MINION_WIDTH, SWARM_MINION_HEIGHT),
            base_health: SWARM_MINION_HEALTH,
            points: SWARM_MINION_POINTS,
            speed: SWARM_MINION_SPEED,
            fire_cooldown_ms: None,
            special_cooldown_ms: None,
            drop_chance: DROP_CHANCE_SWARM,
        },
        EnemyKind::TeleporterElite => EnemyProfile {
            size: Vec2::new(TELEPORTER_WIDTH, TELEPORTER_HEIGHT),
            base_health: TELEPORTER_HEALTH,
            points: TELEPORTER_POINTS,
            speed: 0.0, // moves only by teleporting
            fire_cooldown_ms: None,
            special_cooldown_ms: None,
            drop_chance: DROP_CHANCE_ELITE,
        },
        EnemyKind::SplitterDrone => EnemyProfile {
            size: Vec2::new(SPLITTER_WIDTH, SPLITTER_HEIGHT),
            base_health: SPLITTER_HEALTH,
            points: SPLITTER_POINTS,
            speed: SPLITTER_SPEED,
            fire_cooldown_ms: None,
            special_cooldown_ms: None,
            drop_chance: DROP_CHANCE_SPLITTER,
        },
        EnemyKind::MiniSplitter => EnemyProfile {
            size: Vec2::new(MINI_SPLITTER_WIDTH, MINI_SPLITTER_HEIGHT),
            base_health: MINI_SPLITTER_HEALTH,
            points: MINI_SPLITTER_POINTS,
            speed: MINI_SPLITTER_SPEED,
            fire_cooldown_ms: Some(MINI_SPLITTER_FIRE_COOLDOWN_MS),
            special_cooldown_ms: None,
            drop_chance: DROP_CHANCE_MINI_SPLITTER,
        },
        EnemyKind::BossCore => EnemyProfile {
            size: Vec2::new(BOSS_CORE_WIDTH, BOSS_CORE_HEIGHT),
            base_health: BOSS_CORE_HEALTH,
            points: 0, // the core is not destroyed separately
            speed: 0.0,
            fire_cooldown_ms: None, // core attacks run on the boss FSM
            special_cooldown_ms: None,
            drop_chance: 0.0,
        },
        EnemyKind::BossWeaponPod => EnemyProfile {
            size: Vec2::new(BOSS_POD_WIDTH, BOSS_POD_HEIGHT),
            base_health: BOSS_POD_HEALTH,
            points: BOSS_POD_BONUS,
            speed: 0.0,
            fire_cooldown_ms: Some(BOSS_POD_FIRE_COOLDOWN_MS),
            special_cooldown_ms: None,
            drop_chance: 0.0,
        },
    }
}

/// Health for a kind at a given stage. Tougher kinds gain flat health per
/// stage; boss parts and splitter products do not scale.
pub fn health_for_stage(kind: EnemyKind, stage: u32) -> i32 {
    let base = get_profile(kind).base_health;
    match kind {
        EnemyKind::Grunt => base + (stage / 2) as i32,
        EnemyKind::MidTier => base + stage as i32,
        EnemyKind::TeleporterElite => base + (stage * 2) as i32,
        _ => base,
    }
}

/// Fire cooldown for a kind at a given stage. Enemies shoot faster on
/// later stages; the scaling divisor differs per kind.
pub fn fire_cooldown_for_stage(kind: EnemyKind, stage: u32) -> Option<f64> {
    let base = get_profile(kind).fire_cooldown_ms?;
    let divisor = match kind {
        EnemyKind::Grunt => 1.0 + stage as f64 * 0.1,
        EnemyKind::MidTier => 1.0 + stage as f64 * 0.15,
        EnemyKind::MiniSplitter => 1.0 + stage as f64 * 0.05,
        _ => 1.0,
    };
    Some(base / divisor)
}

/// Mid-Tier spread attack cooldown at a given stage.
pub fn special_cooldown_for_stage(kind: EnemyKind, stage: u32) -> Option<f64> {
    let base = get_profile(kind).special_cooldown_ms?;
    Some(base / (1.0 + stage as f64 * 0.1))
}

/// Descent speed multiplier applied to every enemy at a given stage.
pub fn descent_speed_factor(stage: u32) -> f32 {
    1.0 + stage as f32 * 0.05
}

//! Game snapshot — the complete visible state produced each tick.
//!
//! The renderer consumes this read-only; the audio collaborator drains
//! `audio_events`. The snapshot is an owned value, safe to hand to another
//! thread while the engine computes the next tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::effects::{Explosion, FloatingText, MuzzleFlash, Particle, Star};
use crate::enums::*;
use crate::events::AudioEvent;
use crate::types::SimTime;

/// Complete per-tick state for presentation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub stage: u32,

    pub score: u64,
    /// HUD score, ticking up toward `score`.
    pub displayed_score: u64,
    pub score_multiplier: u32,
    pub multiplier_remaining_ms: f64,
    pub chain_kill_count: u32,
    pub chain_remaining_ms: f64,

    pub kills_this_stage: u32,
    pub target_kills: u32,
    pub wave_remaining: u32,

    /// Interstitial banner state for the timed phases.
    pub stage_title: String,
    pub stage_subtitle: String,
    pub transition_remaining_ms: f64,

    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub player_bullets: Vec<BulletView>,
    pub enemy_bullets: Vec<BulletView>,
    pub power_ups: Vec<PowerUpView>,
    pub boss: Option<BossView>,

    pub explosions: Vec<Explosion>,
    pub floating_texts: Vec<FloatingText>,
    pub muzzle_flashes: Vec<MuzzleFlash>,
    pub particles: Vec<Particle>,
    pub stars: Vec<Star>,

    pub screen_shake: ShakeView,
    /// Full-screen damage flash countdown.
    pub damage_flash_ms: f64,

    pub audio_events: Vec<AudioEvent>,
    pub game_over: bool,
}

/// Player state for the renderer and HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
    pub lives: u32,
    pub bombs: u32,
    pub weapon_level: u32,
    pub invincible: bool,
    pub invincibility_remaining_ms: f64,
    pub laser_active: bool,
    pub rolling: bool,
    pub roll_direction: RollDirection,
    pub roll_cooldown_ms: f64,
    /// Accumulated time for the idle bob animation.
    pub idle_bob_ms: f64,
    /// True on the last life; the renderer emits damage sparks.
    pub low_health: bool,
}

/// One enemy (boss parts included) for the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub health: i32,
    pub spawn_timer_ms: f64,
    pub hit_flash_ms: f64,
    /// Teleporter Elite state, if this is one.
    pub teleport_state: Option<TeleportState>,
    /// Splitter Drone mid-split.
    pub splitting: bool,
    /// Boss part slot, if this is one.
    pub part_slot: Option<PartSlot>,
    pub part_destroyed: bool,
}

/// A projectile for the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletView {
    pub pos: Vec2,
    pub size: Vec2,
    pub fast: bool,
    pub elite_visual: bool,
    pub fired_by: Option<EnemyKind>,
}

/// A power-up for the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpView {
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub collected: bool,
    pub collect_anim_ms: f64,
}

/// The boss aggregate for the renderer and the HUD health bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossView {
    pub pos: Vec2,
    pub size: Vec2,
    pub max_health: i32,
    pub current_health: i32,
    pub phase: BossPhase,
    /// False during the entry fly-in; the boss is not attackable yet.
    pub visible: bool,
    pub hit_flash_ms: f64,
    pub laser_telegraph_ms: f64,
    pub laser_sweeping: bool,
    pub laser_angle: f32,
}

/// Screen shake state for the renderer.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ShakeView {
    pub active: bool,
    pub intensity: f32,
    pub remaining_ms: f64,
}

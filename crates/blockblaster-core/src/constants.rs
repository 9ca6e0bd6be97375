//! Simulation constants and tuning parameters.

use crate::enums::EnemyKind;

// --- Frame timing ---

/// Nominal frame duration in milliseconds (60 Hz).
pub const NOMINAL_FRAME_MS: f64 = 16.66;

/// Elapsed times above this are replaced by the nominal step. A backgrounded
/// host delivering one huge delta must not fast-forward the simulation.
pub const MAX_FRAME_DELTA_MS: f64 = 100.0;

// --- Playfield ---

/// Playfield width in pixels.
pub const GAME_WIDTH: f32 = 600.0;

/// Playfield height in pixels.
pub const GAME_HEIGHT: f32 = 800.0;

// --- Player ---

pub const PLAYER_WIDTH: f32 = 32.0;
pub const PLAYER_HEIGHT: f32 = 32.0;
pub const PLAYER_START_X: f32 = GAME_WIDTH / 2.0 - PLAYER_WIDTH / 2.0;
pub const PLAYER_START_Y: f32 = GAME_HEIGHT - 80.0;

/// Base player speed in pixels per nominal frame.
pub const PLAYER_SPEED: f32 = 6.0;

pub const PLAYER_INITIAL_LIVES: u32 = 3;
pub const PLAYER_INITIAL_BOMBS: u32 = 2;

/// Maximum bombs the player can hold (initial plus pickups).
pub const PLAYER_MAX_BOMBS: u32 = PLAYER_INITIAL_BOMBS + 3;

/// Cooldown between player shots (ms).
pub const PLAYER_FIRE_COOLDOWN_MS: f64 = 110.0;

/// Invincibility after taking a hit (ms).
pub const PLAYER_INVINCIBILITY_MS: f64 = 2000.0;

/// Invincibility granted while a bomb detonates (ms).
pub const PLAYER_BOMB_INVINCIBILITY_MS: f64 = 1500.0;

/// Duration of the dodge roll (ms).
pub const PLAYER_ROLL_DURATION_MS: f64 = 350.0;

/// Cooldown before the next roll (ms).
pub const PLAYER_ROLL_COOLDOWN_MS: f64 = 2000.0;

/// Speed multiplier while rolling.
pub const PLAYER_ROLL_SPEED_FACTOR: f32 = 1.8;

/// Interval between low-health damage spark emissions (ms).
pub const PLAYER_LOW_HEALTH_SPARK_INTERVAL_MS: f64 = 200.0;

/// Duration of the full-screen damage flash (ms).
pub const PLAYER_DAMAGE_FLASH_MS: f64 = 300.0;

// --- Bullets ---

pub const BULLET_WIDTH: f32 = 6.0;
pub const BULLET_HEIGHT: f32 = 18.0;
pub const ENEMY_BULLET_WIDTH: f32 = 8.0;
pub const ENEMY_BULLET_HEIGHT: f32 = 8.0;

/// Player bullet speed in pixels per nominal frame.
pub const PLAYER_BULLET_SPEED: f32 = 13.0;

/// Standard enemy bullet speed in pixels per nominal frame.
pub const ENEMY_BULLET_SPEED: f32 = 4.5;

/// Fast enemy bullet speed (elites, boss) in pixels per nominal frame.
pub const ENEMY_ELITE_BULLET_SPEED: f32 = 7.0;

pub const PLAYER_BULLET_DAMAGE: i32 = 1;

pub const BULLET_IMPACT_SPARK_COUNT: u32 = 5;
pub const BULLET_IMPACT_SPARK_LIFE_MS: f64 = 150.0;
pub const BULLET_IMPACT_SPARK_SIZE: f32 = 2.0;

// --- Enemy: Grunt ---

pub const GRUNT_WIDTH: f32 = 30.0;
pub const GRUNT_HEIGHT: f32 = 30.0;
pub const GRUNT_HEALTH: i32 = 1;
pub const GRUNT_POINTS: u32 = 100;
pub const GRUNT_SPEED: f32 = 2.2;
pub const GRUNT_FIRE_COOLDOWN_MS: f64 = 1700.0;

// --- Enemy: Mid-Tier ---

pub const MID_TIER_WIDTH: f32 = 45.0;
pub const MID_TIER_HEIGHT: f32 = 45.0;
pub const MID_TIER_HEALTH: i32 = 10;
pub const MID_TIER_POINTS: u32 = 500;
pub const MID_TIER_SPEED: f32 = 1.5;
pub const MID_TIER_FIRE_COOLDOWN_MS: f64 = 1400.0;
pub const MID_TIER_SPECIAL_COOLDOWN_MS: f64 = 4500.0;

/// Grunt spawns required before a Mid-Tier becomes eligible.
pub const MID_TIER_SPAWN_THRESHOLD: u32 = 4;

// --- Enemy: Swarm Minion ---

pub const SWARM_MINION_WIDTH: f32 = 18.0;
pub const SWARM_MINION_HEIGHT: f32 = 18.0;
pub const SWARM_MINION_HEALTH: i32 = 1;
pub const SWARM_MINION_POINTS: u32 = 50;
pub const SWARM_MINION_SPEED: f32 = 3.8;

/// Swarm Minions always spawn this many at once.
pub const SWARM_MINION_CLUSTER_SIZE: u32 = 5;

/// Oscillation phase advance per nominal frame (radians).
pub const SWARM_MINION_OSCILLATION_SPEED: f32 = 0.055;

// --- Enemy: Teleporter Elite ---

pub const TELEPORTER_WIDTH: f32 = 40.0;
pub const TELEPORTER_HEIGHT: f32 = 40.0;
pub const TELEPORTER_HEALTH: i32 = 15;
pub const TELEPORTER_POINTS: u32 = 1200;
pub const TELEPORTER_PHASE_IN_MS: f64 = 500.0;
pub const TELEPORTER_IDLE_MS: f64 = 750.0;
pub const TELEPORTER_TELEGRAPH_MS: f64 = 600.0;
pub const TELEPORTER_PHASE_OUT_MS: f64 = 400.0;

/// Off-screen cooldown between teleports (ms). Stored on the rig as a
/// negative timer counting up toward zero.
pub const TELEPORTER_COOLDOWN_MS: f64 = 1500.0;

/// Interval between Teleporter Elite spawns (ms).
pub const TELEPORTER_SPAWN_INTERVAL_MS: f64 = 25_000.0;

/// Minimum distance (per axis) a retarget keeps from the player.
pub const TELEPORTER_PLAYER_CLEARANCE: f32 = 100.0;

// --- Enemy: Splitter Drone ---

pub const SPLITTER_WIDTH: f32 = 40.0;
pub const SPLITTER_HEIGHT: f32 = 40.0;
pub const SPLITTER_HEALTH: i32 = 8;
pub const SPLITTER_POINTS: u32 = 300;
pub const SPLITTER_SPEED: f32 = 1.2;

/// Mini-Splitters spawned when a Splitter Drone dies.
pub const SPLITTER_SPLIT_COUNT: u32 = 3;

/// Duration of the splitting animation (ms).
pub const SPLITTER_ANIM_MS: f64 = 300.0;

/// Health sentinel marking a split-complete drone for removal.
pub const SPLITTER_REMOVED_HEALTH: i32 = -100;

// --- Enemy: Mini-Splitter ---

pub const MINI_SPLITTER_WIDTH: f32 = 20.0;
pub const MINI_SPLITTER_HEIGHT: f32 = 20.0;
pub const MINI_SPLITTER_HEALTH: i32 = 2;
pub const MINI_SPLITTER_POINTS: u32 = 75;
pub const MINI_SPLITTER_SPEED: f32 = 2.8;
pub const MINI_SPLITTER_FIRE_COOLDOWN_MS: f64 = 2200.0;

/// Horizontal jitter amplitude per frame.
pub const MINI_SPLITTER_MOVE_VARIANCE: f32 = 0.5;

// --- Spawning ---

/// Regular spawn cooldown at stage 1 (ms).
pub const INITIAL_SPAWN_COOLDOWN_MS: f64 = 1700.0;

/// Floor for the regular spawn cooldown (ms).
pub const MIN_SPAWN_COOLDOWN_MS: f64 = 300.0;

/// Per-stage reduction of the regular spawn cooldown (ms).
pub const SPAWN_COOLDOWN_DECREMENT_MS: f64 = 100.0;

/// Regular spawning is suppressed at this many live non-boss-part enemies.
pub const MAX_LIVE_ENEMIES: usize = 15;

/// Grace period after spawn during which an enemy absorbs hits without
/// taking health damage.
pub const SPAWN_ANIMATION_MS: f64 = 250.0;

/// Duration of the hit-flash visual on a damaged enemy (ms).
pub const HIT_FLASH_MS: f64 = 100.0;

// --- Power-ups ---

pub const POWERUP_WIDTH: f32 = 28.0;
pub const POWERUP_HEIGHT: f32 = 28.0;

/// Power-up fall speed in pixels per nominal frame.
pub const POWERUP_SPEED: f32 = 2.2;

/// Drop chance by enemy kind.
pub const DROP_CHANCE_GRUNT: f64 = 0.10;
pub const DROP_CHANCE_MID_TIER: f64 = 0.33;
pub const DROP_CHANCE_SWARM: f64 = 0.02;
pub const DROP_CHANCE_ELITE: f64 = 0.60;
pub const DROP_CHANCE_SPLITTER: f64 = 0.25;
pub const DROP_CHANCE_MINI_SPLITTER: f64 = 0.05;

pub const WEAPON_MAX_LEVEL: u32 = 4;

/// Laser Beam power-up duration (ms).
pub const LASER_BEAM_DURATION_MS: f64 = 6000.0;

/// Interval between laser damage applications (ms).
pub const LASER_DAMAGE_TICK_MS: f64 = 100.0;

/// Radius within which power-ups begin drifting toward the player.
pub const POWERUP_ATTRACT_RADIUS: f32 = 120.0;

/// Attraction strength factor.
pub const POWERUP_ATTRACT_SPEED: f32 = 0.15;

/// Delay after spawn before attraction engages (ms).
pub const POWERUP_ATTRACT_DELAY_MS: f64 = 300.0;

/// Shield power-up invincibility duration (ms).
pub const SHIELD_DURATION_MS: f64 = 5000.0;

pub const SCORE_MULTIPLIER_DURATION_MS: f64 = 8000.0;
pub const SCORE_MULTIPLIER_VALUE: u32 = 2;

/// Collect animation duration (ms); the effect applies when it completes.
pub const POWERUP_COLLECT_ANIM_MS: f64 = 300.0;

// --- Explosions & effects ---

pub const EXPLOSION_MAX_SIZE: f32 = 75.0;
pub const EXPLOSION_DURATION_MS: f64 = 400.0;
pub const EXPLOSION_DEBRIS_GRAVITY: f32 = 0.1;

pub const MUZZLE_FLASH_DURATION_MS: f64 = 80.0;
pub const MUZZLE_FLASH_SIZE_PLAYER: f32 = 18.0;
pub const MUZZLE_FLASH_SIZE_ENEMY: f32 = 15.0;
pub const MUZZLE_FLASH_SIZE_ELITE: f32 = 22.0;

pub const FLOATING_TEXT_DURATION_MS: f64 = 1000.0;
pub const FLOATING_TEXT_COMBO_DURATION_MS: f64 = 1200.0;

/// Pixels a floating text rises over its lifetime.
pub const FLOATING_TEXT_RISE: f32 = 30.0;

// --- Screen shake ---

pub const SHAKE_DEFAULT_INTENSITY: f32 = 5.0;
pub const SHAKE_BOMB_INTENSITY: f32 = 12.0;
pub const SHAKE_HIT_INTENSITY: f32 = 10.0;
pub const SHAKE_BOSS_HIT_INTENSITY: f32 = 3.0;
pub const SHAKE_DURATION_SHORT_MS: f64 = 150.0;
pub const SHAKE_DURATION_MEDIUM_MS: f64 = 300.0;
pub const SHAKE_BOSS_HIT_DURATION_MS: f64 = 100.0;

// --- Scoring ---

/// Window within which consecutive kills chain (ms).
pub const CHAIN_KILL_WINDOW_MS: f64 = 1600.0;

/// Bonus per kill in a chain, before the score multiplier.
pub const CHAIN_KILL_BONUS_PER_KILL: u32 = 30;

/// Bonus for clearing a stage without taking damage.
pub const PERFECT_STAGE_BONUS: u32 = 1000;

/// Displayed score approaches the real score by this fraction of the gap
/// per frame, at least SCORE_TICK_MIN_INCREMENT.
pub const SCORE_TICK_SPEED_FACTOR: f64 = 0.15;
pub const SCORE_TICK_MIN_INCREMENT: u64 = 1;

// --- Stage flow ---

/// Kills required to clear each stage; clamps to the last entry beyond the
/// table. The boss stage needs fewer kills before the encounter triggers.
pub const KILLS_PER_STAGE: [u32; 3] = [20, 35, 10];

/// Stage whose kill target routes into the boss encounter instead of a
/// challenge wave.
pub const BOSS_STAGE_TRIGGER: u32 = 3;

pub const STAGE_TRANSITION_MS: f64 = 2500.0;
pub const STAGE_WARNING_MS: f64 = 2000.0;
pub const STAGE_VICTORY_MS: f64 = 3500.0;

/// Challenge wave rosters per stage. Swarm Minion entries expand into full
/// clusters at spawn time. Stage 3 is the boss stage; the trailing roster
/// covers stages beyond it (the lookup clamps).
pub const CHALLENGE_WAVES: [&[EnemyKind]; 3] = [
    &[
        EnemyKind::SwarmMinion,
        EnemyKind::SwarmMinion,
        EnemyKind::SwarmMinion,
        EnemyKind::SwarmMinion,
        EnemyKind::MidTier,
        EnemyKind::MidTier,
        EnemyKind::MidTier,
        EnemyKind::Grunt,
        EnemyKind::Grunt,
        EnemyKind::Grunt,
        EnemyKind::Grunt,
        EnemyKind::Grunt,
    ],
    &[
        EnemyKind::TeleporterElite,
        EnemyKind::SplitterDrone,
        EnemyKind::SplitterDrone,
        EnemyKind::MidTier,
        EnemyKind::MidTier,
        EnemyKind::SwarmMinion,
        EnemyKind::SwarmMinion,
        EnemyKind::SwarmMinion,
        EnemyKind::SwarmMinion,
        EnemyKind::MidTier,
        EnemyKind::Grunt,
        EnemyKind::Grunt,
        EnemyKind::Grunt,
    ],
    &[
        EnemyKind::TeleporterElite,
        EnemyKind::TeleporterElite,
        EnemyKind::TeleporterElite,
        EnemyKind::SplitterDrone,
        EnemyKind::SplitterDrone,
        EnemyKind::SplitterDrone,
        EnemyKind::MidTier,
        EnemyKind::MidTier,
        EnemyKind::MidTier,
        EnemyKind::MidTier,
        EnemyKind::MidTier,
        EnemyKind::SwarmMinion,
        EnemyKind::SwarmMinion,
    ],
];

// --- Boss: Hive Overlord ---

pub const BOSS_WIDTH: f32 = 180.0;
pub const BOSS_HEIGHT: f32 = 100.0;
pub const BOSS_START_X: f32 = GAME_WIDTH / 2.0 - BOSS_WIDTH / 2.0;

/// Resting y after the entry fly-in.
pub const BOSS_TARGET_Y: f32 = 80.0;

pub const BOSS_MAX_HEALTH: i32 = 300;
pub const BOSS_POINTS: u32 = 20_000;

/// Patrol speed in pixels per nominal frame. Entry fly-in moves at twice
/// this.
pub const BOSS_MOVE_SPEED: f32 = 0.8;

/// Interval between patrol direction reversals (ms).
pub const BOSS_MOVE_INTERVAL_MS: f64 = 3000.0;

pub const BOSS_CORE_WIDTH: f32 = 50.0;
pub const BOSS_CORE_HEIGHT: f32 = 50.0;
pub const BOSS_CORE_HEALTH: i32 = 100;

pub const BOSS_POD_WIDTH: f32 = 40.0;
pub const BOSS_POD_HEIGHT: f32 = 60.0;
pub const BOSS_POD_HEALTH: i32 = 75;

/// Horizontal inset of the weapon pods from the body edges.
pub const BOSS_POD_INSET: f32 = 20.0;

/// Bonus awarded for destroying a weapon pod.
pub const BOSS_POD_BONUS: u32 = 1500;

pub const BOSS_POD_FIRE_COOLDOWN_MS: f64 = 2000.0;
pub const BOSS_SPREAD_COOLDOWN_MS: f64 = 3500.0;
pub const BOSS_LASER_COOLDOWN_MS: f64 = 7000.0;
pub const BOSS_LASER_TELEGRAPH_MS: f64 = 1000.0;
pub const BOSS_LASER_SWEEP_MS: f64 = 1500.0;

/// Angular range the laser sweeps through, centered straight down.
pub const BOSS_LASER_SWEEP_RANGE: f32 = std::f32::consts::PI / 1.5;

/// Angular tolerance within which the beam contacts the player.
pub const BOSS_LASER_HIT_TOLERANCE: f32 = std::f32::consts::PI / 16.0;

/// Bomb damage to regular enemies and boss parts.
pub const BOMB_DAMAGE: i32 = 10;

/// Bomb damage to an exposed boss body.
pub const BOMB_DAMAGE_BOSS_BODY: i32 = 50;

/// Laser beam damage per tick to an exposed boss body.
pub const LASER_DAMAGE_BOSS_BODY: i32 = 2;

// --- Starfield ---

/// Parallax star layers: (count, base speed, min size, max size,
/// min opacity, max opacity).
pub const STAR_LAYERS: [(u32, f32, f32, f32, f32, f32); 3] = [
    (60, 0.15, 1.0, 2.0, 0.2, 0.4),
    (40, 0.4, 1.0, 3.0, 0.3, 0.6),
    (25, 0.7, 2.0, 4.0, 0.5, 0.9),
];

// --- Leaderboard ---

/// Maximum number of stored leaderboard entries.
pub const MAX_LEADERBOARD_ENTRIES: usize = 10;

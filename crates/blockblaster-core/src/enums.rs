//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy kind. Drives movement, attack, scoring, and drop behavior through
/// a single dispatch point per behavior phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Straight descent, fires straight down.
    Grunt,
    /// Tougher descent unit with a single shot and a 3-bullet spread.
    MidTier,
    /// Small, fast, oscillating; always spawns in clusters of five.
    SwarmMinion,
    /// Teleporting elite cycling through a phase-in/fire/phase-out loop.
    TeleporterElite,
    /// Splits into three Mini-Splitters on death.
    SplitterDrone,
    /// Child of a Splitter Drone; jittery descent.
    MiniSplitter,
    /// The boss's vulnerable core (boss part).
    BossCore,
    /// One of the boss's two weapon pods (boss part).
    BossWeaponPod,
}

impl EnemyKind {
    /// Whether this kind is a part of the boss aggregate.
    pub fn is_boss_part(&self) -> bool {
        matches!(self, EnemyKind::BossCore | EnemyKind::BossWeaponPod)
    }
}

/// Power-up kind, determining the effect applied on collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    WeaponUpgrade,
    BombCharge,
    Shield,
    LaserBeam,
    ScoreMultiplier,
}

/// Macro phase of the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Normal gameplay: player control, regular spawns.
    Playing,
    /// Interstitial between stages ("STAGE N").
    StageTransition,
    /// Warning shown before a challenge wave starts.
    ChallengeWavePending,
    /// Scripted wave active; regular spawns paused.
    ChallengeWaveActive,
    /// Warning shown before the boss battle begins.
    BossBattleIncoming,
    /// Boss active; regular spawns paused.
    BossBattle,
    /// Boss destroyed; victory message and scoring.
    BossDefeated,
}

impl Default for GamePhase {
    /// A session opens on the "STAGE 1 / GET READY!" interstitial.
    fn default() -> Self {
        GamePhase::StageTransition
    }
}

impl GamePhase {
    /// Phases that are pure countdown timers: player input and spawning are
    /// suspended until the timer expires and the exit action fires.
    pub fn is_timed_interstitial(&self) -> bool {
        matches!(
            self,
            GamePhase::StageTransition
                | GamePhase::ChallengeWavePending
                | GamePhase::BossBattleIncoming
                | GamePhase::BossDefeated
        )
    }
}

/// Teleporter Elite behavior state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeleportState {
    /// Materializing at the target point; untargetable.
    PhasingIn,
    /// Holding position before telegraphing.
    Idle,
    /// Winding up an aimed shot at the player.
    Telegraphing,
    /// Releasing the aimed shot (single-tick state).
    Firing,
    /// Dematerializing; untargetable. Followed by an off-screen cooldown
    /// stored as a negative timer counting up toward zero.
    PhasingOut,
}

/// Which slot of the boss body a part occupies. Parts are rigidly attached;
/// their positions are re-derived from the body every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartSlot {
    Core,
    PodLeft,
    PodRight,
}

impl PartSlot {
    pub fn is_pod(&self) -> bool {
        matches!(self, PartSlot::PodLeft | PartSlot::PodRight)
    }
}

/// Boss encounter phase. The boss enrages at half health.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossPhase {
    #[default]
    Opening,
    Enraged,
}

/// Horizontal patrol direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveDirection {
    Left,
    Right,
}

impl MoveDirection {
    pub fn flipped(&self) -> Self {
        match self {
            MoveDirection::Left => MoveDirection::Right,
            MoveDirection::Right => MoveDirection::Left,
        }
    }
}

/// Direction of a player dodge roll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollDirection {
    Left,
    Right,
    #[default]
    Forward,
}

/// Visual tint class for explosion effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionTint {
    Enemy,
    Player,
    BossPart,
    BossDeath,
}

/// Style class for floating combat text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextStyle {
    Score,
    Combo,
    Multiplier,
    Perfect,
    Warning,
    Victory,
}

/// Render shape of a particle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleShape {
    #[default]
    Circle,
    Square,
}

/// Color class of a particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleTint {
    /// Bullet impact sparks.
    Impact,
    /// Teleporter materialization motes.
    Teleport,
    /// Boss hit feedback.
    BossHit,
    /// Player low-health damage sparks.
    Spark,
    /// Power-up collection burst, colored by kind.
    Pickup(PowerUpKind),
}

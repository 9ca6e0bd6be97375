//! Events emitted by the simulation for the audio collaborator.
//!
//! The engine signals sounds; it never plays them. Events are
//! fire-and-forget and may be dropped by a host with sound disabled.

use serde::{Deserialize, Serialize};

use crate::enums::EnemyKind;

/// Sound requests, one per discrete audible moment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    PlayerShoot,
    PlayerRoll,
    PlayerHit,
    BombExplode,
    EnemyShoot { kind: EnemyKind },
    EnemyHit,
    WarningSiren,
    BossWarning,
    BossSpawn,
    BossShoot,
    BossCoreShoot,
    BossLaserCharge,
    BossLaserFire,
    BossPhaseChange,
    BossExplode,
    PowerUpPickup,
    PowerUpCollected,
    LaserPowerUp,
    ScoreMultiplierPickup,
    PerfectStage,
    GameOver { score: u64 },
}

impl AudioEvent {
    /// Stable string identifier for hosts that key sounds by name.
    pub fn id(&self) -> &'static str {
        match self {
            AudioEvent::PlayerShoot => "player_shoot",
            AudioEvent::PlayerRoll => "player_roll",
            AudioEvent::PlayerHit => "player_hit",
            AudioEvent::BombExplode => "bomb_explode",
            AudioEvent::EnemyShoot { kind } => match kind {
                EnemyKind::MidTier => "enemy_shoot_mid",
                EnemyKind::TeleporterElite => "enemy_shoot_elite",
                EnemyKind::MiniSplitter => "enemy_shoot_mini",
                _ => "enemy_shoot",
            },
            AudioEvent::EnemyHit => "enemy_hit",
            AudioEvent::WarningSiren => "warning_siren",
            AudioEvent::BossWarning => "boss_warning",
            AudioEvent::BossSpawn => "boss_spawn",
            AudioEvent::BossShoot => "boss_shoot",
            AudioEvent::BossCoreShoot => "boss_shoot_core",
            AudioEvent::BossLaserCharge => "boss_laser_charge",
            AudioEvent::BossLaserFire => "boss_laser_fire",
            AudioEvent::BossPhaseChange => "boss_phase_change",
            AudioEvent::BossExplode => "boss_explode_final",
            AudioEvent::PowerUpPickup => "powerup_pickup",
            AudioEvent::PowerUpCollected => "powerup_collect_final",
            AudioEvent::LaserPowerUp => "laser_powerup",
            AudioEvent::ScoreMultiplierPickup => "score_multiplier_pickup",
            AudioEvent::PerfectStage => "perfect_stage",
            AudioEvent::GameOver { .. } => "game_over",
        }
    }
}

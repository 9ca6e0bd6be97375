//! Session-level state: score, stage flow, counters, screen shake.
//!
//! Everything here is owned by the engine beside the ECS world; systems
//! receive it by mutable reference.

use blockblaster_core::constants::*;
use blockblaster_core::enums::GamePhase;

/// Screen shake currently applied to the playfield.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScreenShake {
    pub active: bool,
    pub intensity: f32,
    pub duration_ms: f64,
    /// Game time the shake started.
    pub started_ms: f64,
}

/// Result of scoring one kill.
#[derive(Debug, Clone, Copy)]
pub struct KillScore {
    /// Total points awarded, multiplier and chain bonus included.
    pub total: u64,
    /// Chain bonus portion, zero outside a chain.
    pub chain_bonus: u64,
    /// Chain length after this kill.
    pub chain: u32,
}

/// Aggregate session state beside the entity world.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub score: u64,
    /// HUD score, ticking up toward `score`.
    pub displayed_score: u64,
    pub multiplier: u32,
    pub multiplier_timer_ms: f64,

    pub stage: u32,
    pub phase: GamePhase,
    /// Countdown for the timed interstitial phases.
    pub transition_timer_ms: f64,
    pub stage_title: String,
    pub stage_subtitle: String,

    pub took_damage_this_stage: bool,
    pub kills_this_stage: u32,
    pub target_kills: u32,
    pub wave_remaining: u32,
    /// Grunt spawns since the last Mid-Tier, gating Mid-Tier eligibility.
    pub grunt_spawn_counter: u32,

    pub chain_kills: u32,
    pub chain_timer_ms: f64,
    /// Game time of the most recent kill.
    pub last_kill_ms: f64,

    pub last_enemy_spawn_ms: f64,
    pub last_elite_spawn_ms: f64,
    /// Game time of the last laser-beam damage application.
    pub last_laser_tick_ms: f64,

    pub damage_flash_ms: f64,
    pub shake: ScreenShake,
    pub game_over: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            score: 0,
            displayed_score: 0,
            multiplier: 1,
            multiplier_timer_ms: 0.0,
            stage: 1,
            phase: GamePhase::StageTransition,
            transition_timer_ms: STAGE_TRANSITION_MS,
            stage_title: "STAGE 1".to_string(),
            stage_subtitle: "GET READY!".to_string(),
            took_damage_this_stage: false,
            kills_this_stage: 0,
            target_kills: KILLS_PER_STAGE[0],
            wave_remaining: 0,
            grunt_spawn_counter: 0,
            chain_kills: 0,
            chain_timer_ms: 0.0,
            last_kill_ms: 0.0,
            last_enemy_spawn_ms: 0.0,
            // Negative so the first elite is eligible as soon as stage 2
            // begins.
            last_elite_spawn_ms: -TELEPORTER_SPAWN_INTERVAL_MS,
            last_laser_tick_ms: 0.0,
            damage_flash_ms: 0.0,
            shake: ScreenShake::default(),
            game_over: false,
        }
    }

    /// Kill target for a stage, clamping past the end of the table.
    pub fn kill_target_for_stage(stage: u32) -> u32 {
        let index = (stage.saturating_sub(1) as usize).min(KILLS_PER_STAGE.len() - 1);
        KILLS_PER_STAGE[index]
    }

    /// Score a chained kill: base points times the multiplier, plus a chain
    /// bonus when the previous kill landed inside the chain window. The
    /// chain resets to 1 otherwise.
    pub fn register_kill(&mut self, now_ms: f64, base_points: u32) -> KillScore {
        if now_ms - self.last_kill_ms < CHAIN_KILL_WINDOW_MS {
            self.chain_kills += 1;
        } else {
            self.chain_kills = 1;
        }
        self.last_kill_ms = now_ms;
        self.chain_timer_ms = CHAIN_KILL_WINDOW_MS;

        let mut total = base_points as u64 * self.multiplier as u64;
        let mut chain_bonus = 0;
        if self.chain_kills > 1 {
            chain_bonus = self.chain_kills as u64
                * CHAIN_KILL_BONUS_PER_KILL as u64
                * self.multiplier as u64;
            total += chain_bonus;
        }
        self.score += total;

        KillScore {
            total,
            chain_bonus,
            chain: self.chain_kills,
        }
    }

    /// Award points without chain bookkeeping (bomb kills, boss bonuses).
    pub fn award(&mut self, base_points: u32) {
        self.score += base_points as u64 * self.multiplier as u64;
    }

    /// Begin one of the timed interstitial phases.
    pub fn enter_interstitial(
        &mut self,
        phase: GamePhase,
        title: &str,
        subtitle: &str,
        duration_ms: f64,
    ) {
        self.phase = phase;
        self.stage_title = title.to_string();
        self.stage_subtitle = subtitle.to_string();
        self.transition_timer_ms = duration_ms;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

//! Hive Overlord core attack state machine.
//!
//! Drives the spread shot cooldown and the phase-2 laser telegraph→sweep
//! sequence as a pure function. The sim owns the boss aggregate; this
//! module decides what the core does each tick and emits events for the
//! sim to materialize (bullets, sounds, player damage).

use glam::Vec2;

use blockblaster_core::constants::*;
use blockblaster_core::enums::BossPhase;

/// Laser sweep sub-state carried on the boss aggregate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LaserState {
    /// Telegraph countdown; the sweep begins when it expires.
    pub telegraph_ms: f64,
    pub sweeping: bool,
    pub remaining_ms: f64,
    /// Current beam angle in radians (y down; straight down is π/2).
    pub angle: f32,
}

/// Input to the core FSM for one tick.
pub struct BossCoreContext {
    pub phase: BossPhase,
    pub spread_cooldown_ms: f64,
    pub laser_cooldown_ms: f64,
    pub laser: LaserState,
    /// Core rect center — beam origin and spread-shot muzzle.
    pub core_center: Vec2,
    pub player_center: Vec2,
    /// False while the player is invincible or rolling.
    pub player_vulnerable: bool,
    pub dt_ms: f64,
}

/// Events emitted by one core FSM evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum BossCoreEvent {
    /// Fire a fan of bullets from the core.
    SpreadShot {
        origin: Vec2,
        count: u32,
        /// Total angular arc of the fan.
        arc: f32,
    },
    /// Laser telegraph started.
    LaserCharge,
    /// Telegraph expired; the sweep begins.
    LaserFire,
    /// The beam contacted the player this tick.
    LaserHitPlayer,
}

/// Output of one core FSM evaluation.
pub struct BossCoreUpdate {
    pub spread_cooldown_ms: f64,
    pub laser_cooldown_ms: f64,
    pub laser: LaserState,
    pub events: Vec<BossCoreEvent>,
}

/// Evaluate the core's attacks for one tick. Only called while the core is
/// alive and its spawn animation has finished.
pub fn evaluate_core(ctx: &BossCoreContext) -> BossCoreUpdate {
    let enraged = ctx.phase == BossPhase::Enraged;
    let mut up = BossCoreUpdate {
        spread_cooldown_ms: (ctx.spread_cooldown_ms - ctx.dt_ms).max(0.0),
        laser_cooldown_ms: (ctx.laser_cooldown_ms - ctx.dt_ms).max(0.0),
        laser: ctx.laser,
        events: Vec::new(),
    };

    if up.spread_cooldown_ms <= 0.0 {
        up.spread_cooldown_ms = BOSS_SPREAD_COOLDOWN_MS / if enraged { 1.5 } else { 1.0 };
        let (count, arc) = if enraged {
            (7, std::f32::consts::PI / 2.5)
        } else {
            (5, std::f32::consts::PI / 3.0)
        };
        up.events.push(BossCoreEvent::SpreadShot {
            origin: ctx.core_center,
            count,
            arc,
        });
    }

    // Laser sweep is an enraged-only attack.
    if enraged && !up.laser.sweeping && up.laser.telegraph_ms <= 0.0 && up.laser_cooldown_ms <= 0.0
    {
        up.laser.telegraph_ms = BOSS_LASER_TELEGRAPH_MS;
        up.laser_cooldown_ms = BOSS_LASER_COOLDOWN_MS;
        up.events.push(BossCoreEvent::LaserCharge);
    }

    if up.laser.telegraph_ms > 0.0 {
        up.laser.telegraph_ms = (up.laser.telegraph_ms - ctx.dt_ms).max(0.0);
        if up.laser.telegraph_ms <= 0.0 {
            up.laser.sweeping = true;
            up.laser.remaining_ms = BOSS_LASER_SWEEP_MS;
            up.laser.angle = std::f32::consts::FRAC_PI_2;
            up.events.push(BossCoreEvent::LaserFire);
        }
    }

    if up.laser.sweeping && up.laser.remaining_ms > 0.0 {
        up.laser.remaining_ms = (up.laser.remaining_ms - ctx.dt_ms).max(0.0);
        let progress = 1.0 - (up.laser.remaining_ms / BOSS_LASER_SWEEP_MS) as f32;
        up.laser.angle = std::f32::consts::FRAC_PI_2 - BOSS_LASER_SWEEP_RANGE / 2.0
            + progress * BOSS_LASER_SWEEP_RANGE;

        if ctx.player_vulnerable {
            let delta = ctx.player_center - ctx.core_center;
            let player_angle = delta.y.atan2(delta.x);
            if (player_angle - up.laser.angle).abs() < BOSS_LASER_HIT_TOLERANCE
                && delta.length() < GAME_HEIGHT
            {
                up.events.push(BossCoreEvent::LaserHitPlayer);
            }
        }

        if up.laser.remaining_ms <= 0.0 {
            up.laser.sweeping = false;
        }
    }

    up
}

/// Phase transition rule: the boss enrages at or below half health, and
/// never calms back down.
pub fn next_phase(current: BossPhase, current_health: i32, max_health: i32) -> BossPhase {
    if current == BossPhase::Opening && current_health <= max_health / 2 {
        BossPhase::Enraged
    } else {
        current
    }
}

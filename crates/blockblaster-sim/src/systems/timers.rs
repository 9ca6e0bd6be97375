//! Global timer advancement, run first every tick.
//!
//! Covers the timers that keep running regardless of the macro phase:
//! score multiplier, invincibility, damage flash, screen-shake expiry,
//! chain-window display, particle lifetimes, starfield scroll, the HUD
//! score tick, and the player's idle/low-health visuals.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use blockblaster_core::constants::*;
use blockblaster_core::enums::ParticleTint;
use blockblaster_core::types::SimTime;
use glam::Vec2;

use crate::effects::{EffectBuffers, ParticleSpec, StarField};
use crate::player::Player;
use crate::session::SessionState;

pub fn run(
    session: &mut SessionState,
    player: &mut Player,
    effects: &mut EffectBuffers,
    stars: &mut StarField,
    rng: &mut ChaCha8Rng,
    time: &SimTime,
    dt: f64,
) {
    let now = time.now();

    player.idle_bob_ms += dt;

    // Sputtering sparks while on the last life.
    if player.lives == 1 && now - player.last_spark_ms > PLAYER_LOW_HEALTH_SPARK_INTERVAL_MS {
        player.last_spark_ms = now;
        let at = player.pos
            + Vec2::new(
                rng.gen::<f32>() * player.size.x,
                rng.gen::<f32>() * player.size.y,
            );
        effects.particles(
            rng,
            at,
            ParticleSpec {
                count: 1,
                tint: ParticleTint::Spark,
                base_size: 2.0,
                size_variance: 1.0,
                life_min_ms: 100.0,
                life_variance_ms: 50.0,
                speed_min: 0.1,
                speed_variance: 0.2,
                spark: true,
                ..Default::default()
            },
        );
    }

    if session.damage_flash_ms > 0.0 {
        session.damage_flash_ms = (session.damage_flash_ms - dt).max(0.0);
    }

    if session.multiplier_timer_ms > 0.0 {
        session.multiplier_timer_ms = (session.multiplier_timer_ms - dt).max(0.0);
        if session.multiplier_timer_ms <= 0.0 {
            session.multiplier = 1;
        }
    }

    if session.chain_timer_ms > 0.0 {
        session.chain_timer_ms = (session.chain_timer_ms - dt).max(0.0);
    }

    if player.invincible {
        player.invincibility_timer_ms = (player.invincibility_timer_ms - dt).max(0.0);
        if player.invincibility_timer_ms <= 0.0 {
            player.invincible = false;
        }
    }

    effects.tick_particles(dt);

    let shake = &mut session.shake;
    if shake.active && now - shake.started_ms > shake.duration_ms {
        shake.active = false;
        shake.intensity = 0.0;
    }

    stars.tick(rng, dt);

    // HUD score rolls up toward the real score.
    if session.displayed_score < session.score {
        let diff = session.score - session.displayed_score;
        let increment = ((diff as f64 * SCORE_TICK_SPEED_FACTOR).ceil() as u64)
            .max(SCORE_TICK_MIN_INCREMENT);
        session.displayed_score = (session.displayed_score + increment).min(session.score);
    } else {
        session.displayed_score = session.score;
    }
}

//! Power-up drift, magnetic attraction, and effect application.
//!
//! Uncollected power-ups fall and, once their delay expires, drift toward
//! a nearby player. Collected ones play a short collect animation; the
//! effect applies when it completes.

use glam::Vec2;
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use blockblaster_core::components::{Body, PowerUp};
use blockblaster_core::constants::*;
use blockblaster_core::enums::{ParticleTint, PowerUpKind, TextStyle};
use blockblaster_core::events::AudioEvent;

use crate::effects::{EffectBuffers, ParticleSpec};
use crate::player::Player;
use crate::session::SessionState;

#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    session: &mut SessionState,
    player: &mut Player,
    effects: &mut EffectBuffers,
    audio_events: &mut Vec<AudioEvent>,
    rng: &mut ChaCha8Rng,
    despawn_buffer: &mut Vec<Entity>,
    dt: f64,
) {
    despawn_buffer.clear();
    let frames = (dt / NOMINAL_FRAME_MS) as f32;
    let player_center = player.center();

    let mut applied: Vec<PowerUpKind> = Vec::new();

    for (entity, (body, powerup)) in world.query_mut::<(&mut Body, &mut PowerUp)>() {
        if powerup.collected {
            powerup.collect_anim_ms = (powerup.collect_anim_ms - dt).max(0.0);
            if powerup.collect_anim_ms <= 0.0 {
                applied.push(powerup.kind);
                despawn_buffer.push(entity);
            }
            continue;
        }

        body.pos.y += POWERUP_SPEED * frames;

        if powerup.attraction_timer_ms > 0.0 {
            powerup.attraction_timer_ms = (powerup.attraction_timer_ms - dt).max(0.0);
        }

        let to_player = player_center - body.center();
        let dist = to_player.length();
        if powerup.attraction_timer_ms <= 0.0 && dist < POWERUP_ATTRACT_RADIUS {
            let pull = ((POWERUP_ATTRACT_RADIUS - dist) / POWERUP_ATTRACT_RADIUS).min(1.0)
                * POWERUP_ATTRACT_SPEED;
            body.pos += to_player * pull;
        }

        if body.pos.y >= GAME_HEIGHT {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    for kind in applied {
        apply_effect(kind, session, player, effects, audio_events, rng);
    }
}

/// Apply a collected power-up's effect and its feedback text/particles.
fn apply_effect(
    kind: PowerUpKind,
    session: &mut SessionState,
    player: &mut Player,
    effects: &mut EffectBuffers,
    audio_events: &mut Vec<AudioEvent>,
    rng: &mut ChaCha8Rng,
) {
    audio_events.push(AudioEvent::PowerUpCollected);
    let player_center = player.center();
    let text_pos = Vec2::new(player_center.x - 20.0, player.pos.y - 20.0);

    match kind {
        PowerUpKind::WeaponUpgrade => {
            player.weapon_level = (player.weapon_level + 1).min(WEAPON_MAX_LEVEL);
            effects.text(
                format!("+WPN LVL {}", player.weapon_level),
                text_pos,
                TextStyle::Score,
                false,
                false,
                None,
            );
        }
        PowerUpKind::BombCharge => {
            player.bombs = (player.bombs + 1).min(PLAYER_MAX_BOMBS);
            effects.text("+BOMB", text_pos, TextStyle::Score, false, false, None);
        }
        PowerUpKind::Shield => {
            player.grant_invincibility(SHIELD_DURATION_MS);
            effects.text("+SHIELD", text_pos, TextStyle::Score, false, false, None);
        }
        PowerUpKind::LaserBeam => {
            player.laser_active = true;
            player.laser_timer_ms = LASER_BEAM_DURATION_MS;
            audio_events.push(AudioEvent::LaserPowerUp);
            effects.text("LASER BEAM!", text_pos, TextStyle::Score, true, false, None);
        }
        PowerUpKind::ScoreMultiplier => {
            session.multiplier = SCORE_MULTIPLIER_VALUE;
            session.multiplier_timer_ms = SCORE_MULTIPLIER_DURATION_MS;
            audio_events.push(AudioEvent::ScoreMultiplierPickup);
            effects.text(
                format!("x{SCORE_MULTIPLIER_VALUE} SCORE!"),
                Vec2::new(player_center.x - 40.0, player.pos.y - 30.0),
                TextStyle::Multiplier,
                true,
                false,
                Some(1500.0),
            );
        }
    }

    effects.particles(
        rng,
        player_center,
        ParticleSpec {
            count: 25,
            tint: ParticleTint::Pickup(kind),
            base_size: 2.0,
            size_variance: 4.0,
            life_min_ms: 300.0,
            life_variance_ms: 250.0,
            speed_min: 1.5,
            speed_variance: 3.0,
            ..Default::default()
        },
    );
}

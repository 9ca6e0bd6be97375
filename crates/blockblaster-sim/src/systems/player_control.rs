//! Player input processing: movement, dodge roll, firing, bomb use, and
//! the laser-beam timer.

use glam::Vec2;
use hecs::World;
use rand_chacha::ChaCha8Rng;

use blockblaster_core::components::{Body, PlayerShot, Projectile};
use blockblaster_core::constants::*;
use blockblaster_core::enums::RollDirection;
use blockblaster_core::events::AudioEvent;
use blockblaster_core::input::{Control, ControlSet};
use blockblaster_core::types::SimTime;

use crate::boss::BossState;
use crate::effects::EffectBuffers;
use crate::player::Player;
use crate::session::SessionState;
use crate::systems::collision;

#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    session: &mut SessionState,
    player: &mut Player,
    boss: Option<&mut BossState>,
    effects: &mut EffectBuffers,
    audio_events: &mut Vec<AudioEvent>,
    rng: &mut ChaCha8Rng,
    time: &SimTime,
    dt: f64,
    controls: &ControlSet,
    bomb_edge: bool,
    roll_edge: bool,
) {
    let now = time.now();
    let frames = (dt / NOMINAL_FRAME_MS) as f32;
    let speed = PLAYER_SPEED * frames;

    let dx = controls.horizontal();
    if dx != 0 {
        player.last_horizontal = dx;
    }

    if player.rolling {
        player.roll_timer_ms = (player.roll_timer_ms - dt).max(0.0);
        let roll_speed = speed * PLAYER_ROLL_SPEED_FACTOR;
        let (roll_dx, roll_dy) = match player.roll_direction {
            RollDirection::Left => (-roll_speed, 0.0),
            RollDirection::Right => (roll_speed, 0.0),
            RollDirection::Forward => (0.0, -roll_speed * 0.7),
        };
        player.pos.x = (player.pos.x + roll_dx).clamp(0.0, GAME_WIDTH - player.size.x);
        player.pos.y = (player.pos.y + roll_dy).clamp(0.0, GAME_HEIGHT - player.size.y);
        if player.roll_timer_ms <= 0.0 {
            player.rolling = false;
        }
    } else {
        player.pos.x =
            (player.pos.x + dx as f32 * speed).clamp(0.0, GAME_WIDTH - player.size.x);
        player.pos.y = (player.pos.y + controls.vertical() as f32 * speed)
            .clamp(0.0, GAME_HEIGHT - player.size.y);

        player.roll_cooldown_ms = (player.roll_cooldown_ms - dt).max(0.0);
        if roll_edge && player.roll_cooldown_ms <= 0.0 {
            player.rolling = true;
            player.roll_timer_ms = PLAYER_ROLL_DURATION_MS;
            player.roll_cooldown_ms = PLAYER_ROLL_COOLDOWN_MS;
            player.grant_invincibility(PLAYER_ROLL_DURATION_MS);
            player.roll_direction = match dx {
                d if d < 0 => RollDirection::Left,
                d if d > 0 => RollDirection::Right,
                _ => RollDirection::Forward,
            };
            audio_events.push(AudioEvent::PlayerRoll);
        }
    }

    if controls.is_held(Control::Fire)
        && !player.laser_active
        && !player.rolling
        && now - player.last_shot_ms > PLAYER_FIRE_COOLDOWN_MS
    {
        player.last_shot_ms = now;
        fire_weapon(world, player, effects);
        audio_events.push(AudioEvent::PlayerShoot);
    }

    if player.laser_active {
        player.laser_timer_ms = (player.laser_timer_ms - dt).max(0.0);
        if player.laser_timer_ms <= 0.0 {
            player.laser_active = false;
        }
    }

    if bomb_edge && player.bombs > 0 && !player.rolling {
        player.bombs -= 1;
        player.grant_invincibility(PLAYER_BOMB_INVINCIBILITY_MS);
        audio_events.push(AudioEvent::BombExplode);
        collision::detonate_bomb(world, session, player, boss, effects, audio_events, rng, now);
    }
}

/// Spawn the bullet fan for the current weapon level:
/// level 1 fires a single center shot, levels 2 and 3 add straight side
/// pairs, level 4 adds an angled pair — seven bullets total.
fn fire_weapon(world: &mut World, player: &Player, effects: &mut EffectBuffers) {
    let center = player.center();
    let size = Vec2::new(BULLET_WIDTH, BULLET_HEIGHT);
    let base = Vec2::new(center.x - BULLET_WIDTH / 2.0, player.pos.y);

    effects.muzzle_flash(
        Vec2::new(center.x, player.pos.y),
        MUZZLE_FLASH_SIZE_PLAYER,
        -90.0,
        true,
    );

    let mut spawn = |offset: Vec2, vel: Option<Vec2>| {
        world.spawn((
            Body::new(base + offset, size),
            Projectile {
                damage: PLAYER_BULLET_DAMAGE,
                vel,
                fast: false,
                elite_visual: false,
                fired_by: None,
            },
            PlayerShot,
        ));
    };

    spawn(Vec2::ZERO, None);
    if player.weapon_level >= 2 {
        spawn(Vec2::new(-10.0, 5.0), None);
        spawn(Vec2::new(10.0, 5.0), None);
    }
    if player.weapon_level >= 3 {
        spawn(Vec2::new(-20.0, 10.0), None);
        spawn(Vec2::new(20.0, 10.0), None);
    }
    if player.weapon_level >= 4 {
        let vy = -PLAYER_BULLET_SPEED * 0.98;
        let vx = PLAYER_BULLET_SPEED * 0.1;
        spawn(Vec2::new(-7.0, -5.0), Some(Vec2::new(-vx, vy)));
        spawn(Vec2::new(7.0, -5.0), Some(Vec2::new(vx, vy)));
    }
}

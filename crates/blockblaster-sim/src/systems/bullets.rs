//! Projectile integration and off-screen pruning.

use glam::Vec2;
use hecs::{Entity, World};

use blockblaster_core::components::{Body, EnemyShot, PlayerShot, Projectile};
use blockblaster_core::constants::*;

/// Advance every bullet one tick and despawn those that left the
/// playfield.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>, dt: f64) {
    despawn_buffer.clear();
    let frames = (dt / NOMINAL_FRAME_MS) as f32;

    for (entity, (body, shot, _)) in
        world.query_mut::<(&mut Body, &Projectile, &PlayerShot)>()
    {
        let vel = shot
            .vel
            .unwrap_or(Vec2::new(0.0, -PLAYER_BULLET_SPEED));
        body.pos += vel * frames;

        let off_top = body.pos.y <= -body.size.y;
        let off_side = body.pos.x <= -body.size.x || body.pos.x >= GAME_WIDTH;
        if off_top || off_side {
            despawn_buffer.push(entity);
        }
    }

    for (entity, (body, shot, _)) in world.query_mut::<(&mut Body, &Projectile, &EnemyShot)>() {
        let vel = shot.vel.unwrap_or_else(|| {
            let speed = if shot.fast {
                ENEMY_ELITE_BULLET_SPEED
            } else {
                ENEMY_BULLET_SPEED
            };
            Vec2::new(0.0, speed)
        });
        body.pos += vel * frames;

        let off_bottom = body.pos.y >= GAME_HEIGHT;
        let off_top = body.pos.y <= -body.size.y;
        let off_side =
            body.pos.x <= -body.size.x || body.pos.x >= GAME_WIDTH + body.size.x;
        if off_bottom || off_top || off_side {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

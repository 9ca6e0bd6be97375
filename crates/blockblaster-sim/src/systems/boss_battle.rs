//! Hive Overlord battle: entry fly-in, horizontal patrol, part
//! re-anchoring, core attacks, and the phase-2 enrage transition.
//!
//! Weapon-pod fire runs with the other enemies in `enemy_ai`; this system
//! owns the body and the core's attack state machine.

use glam::Vec2;
use hecs::World;

use blockblaster_core::components::{Body, BossPart, Enemy, EnemyShot, Projectile};
use blockblaster_core::constants::*;
use blockblaster_core::enums::{BossPhase, EnemyKind, GamePhase, MoveDirection, PartSlot, TextStyle};
use blockblaster_core::events::AudioEvent;
use blockblaster_core::types::SimTime;

use blockblaster_ai::boss::{evaluate_core, next_phase, BossCoreContext, BossCoreEvent};

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
    time: &SimTime,
    dt: f64,
) {
    if session.phase != GamePhase::BossBattle {
        return;
    }
    let Some(boss) = boss else {
        return;
    };

    let now = time.now();
    let frames = (dt / NOMINAL_FRAME_MS) as f32;
    let speed = BOSS_MOVE_SPEED * frames;

    boss.hit_flash_ms = (boss.hit_flash_ms - dt).max(0.0);

    if !boss.visible {
        // Entry fly-in from off-screen top, at double patrol speed. The
        // boss is untargetable until it reaches its resting position.
        boss.pos.y += speed * 2.0;
        if boss.pos.y >= BOSS_TARGET_Y {
            boss.pos.y = BOSS_TARGET_Y;
            boss.visible = true;
            boss.last_move_change_ms = now;
        }
    } else {
        patrol(boss, now, speed);
        run_core(world, session, player, boss, effects, audio_events, dt);

        let phase_before = boss.phase;
        boss.phase = next_phase(boss.phase, boss.current_health(), boss.max_health);
        if phase_before == BossPhase::Opening && boss.phase == BossPhase::Enraged {
            audio_events.push(AudioEvent::BossPhaseChange);
            effects.text(
                "BOSS ENRAGED!",
                Vec2::new(GAME_WIDTH / 2.0 - 80.0, boss.pos.y - 30.0),
                TextStyle::Warning,
                true,
                true,
                Some(2000.0),
            );
        }
    }

    // Parts are rigidly attached: re-derive their positions from the body
    // every tick.
    for (_, (body, part)) in world.query_mut::<(&mut Body, &BossPart)>() {
        if part.parent_id == boss.id {
            body.pos = boss.part_anchor(part.slot);
        }
    }
}

/// Horizontal patrol, reversing on a fixed interval or at playfield edges.
fn patrol(boss: &mut BossState, now: f64, speed: f32) {
    if now - boss.last_move_change_ms > BOSS_MOVE_INTERVAL_MS {
        boss.move_direction = boss.move_direction.flipped();
        boss.last_move_change_ms = now;
    }
    match boss.move_direction {
        MoveDirection::Left => boss.pos.x -= speed,
        MoveDirection::Right => boss.pos.x += speed,
    }
    if boss.pos.x < 0.0 {
        boss.pos.x = 0.0;
        boss.move_direction = MoveDirection::Right;
        boss.last_move_change_ms = now;
    }
    if boss.pos.x + boss.size.x > GAME_WIDTH {
        boss.pos.x = GAME_WIDTH - boss.size.x;
        boss.move_direction = MoveDirection::Left;
        boss.last_move_change_ms = now;
    }
}

/// Evaluate the core's attack FSM and materialize its events. The core
/// only acts while it is alive and its spawn-in has finished.
fn run_core(
    world: &mut World,
    session: &mut SessionState,
    player: &mut Player,
    boss: &mut BossState,
    effects: &mut EffectBuffers,
    audio_events: &mut Vec<AudioEvent>,
    dt: f64,
) {
    let core = world
        .query::<(&Body, &Enemy, &BossPart)>()
        .iter()
        .find(|(_, (_, _, part))| {
            part.parent_id == boss.id && part.slot == PartSlot::Core && !part.destroyed
        })
        .map(|(_, (body, enemy, _))| (body.center(), enemy.health, enemy.spawn_done()));

    let Some((core_center, core_health, spawn_done)) = core else {
        return;
    };
    if core_health <= 0 || !spawn_done {
        return;
    }

    let update = evaluate_core(&BossCoreContext {
        phase: boss.phase,
        spread_cooldown_ms: boss.spread_cooldown_ms,
        laser_cooldown_ms: boss.laser_cooldown_ms,
        laser: boss.laser,
        core_center,
        player_center: player.center(),
        player_vulnerable: player.vulnerable(),
        dt_ms: dt,
    });

    boss.spread_cooldown_ms = update.spread_cooldown_ms;
    boss.laser_cooldown_ms = update.laser_cooldown_ms;
    boss.laser = update.laser;

    for event in update.events {
        match event {
            BossCoreEvent::SpreadShot { origin, count, arc } => {
                audio_events.push(AudioEvent::BossCoreShoot);
                effects.muzzle_flash(origin, MUZZLE_FLASH_SIZE_ELITE, 0.0, false);
                for i in 0..count {
                    let angle = (i as f32 / (count - 1) as f32 - 0.5) * arc;
                    let vel = Vec2::new(angle.sin(), angle.cos())
                        * ENEMY_ELITE_BULLET_SPEED
                        * 0.8;
                    world.spawn((
                        Body::new(
                            Vec2::new(origin.x - ENEMY_BULLET_WIDTH / 2.0, origin.y),
                            Vec2::new(ENEMY_BULLET_WIDTH * 1.2, ENEMY_BULLET_HEIGHT * 1.2),
                        ),
                        Projectile {
                            damage: 2,
                            vel: Some(vel),
                            fast: true,
                            elite_visual: true,
                            fired_by: Some(EnemyKind::BossCore),
                        },
                        EnemyShot,
                    ));
                }
            }
            BossCoreEvent::LaserCharge => audio_events.push(AudioEvent::BossLaserCharge),
            BossCoreEvent::LaserFire => audio_events.push(AudioEvent::BossLaserFire),
            BossCoreEvent::LaserHitPlayer => {
                collision::damage_player(
                    session,
                    player,
                    effects,
                    audio_events,
                    SHAKE_DURATION_SHORT_MS,
                );
            }
        }
    }
}

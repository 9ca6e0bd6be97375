//! Per-kind enemy behavior: movement, attack timers, the splitter death
//! sequence, and the Teleporter Elite state machine.
//!
//! Updates are gated on the spawn grace period, the splitter's split
//! animation, and (for boss parts) the boss being present and visible.
//! Emitted bullets are buffered and materialized after the world passes.

use glam::Vec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use blockblaster_core::components::*;
use blockblaster_core::constants::*;
use blockblaster_core::enums::{BossPhase, EnemyKind, GamePhase, ParticleTint};
use blockblaster_core::events::AudioEvent;
use blockblaster_core::types::SimTime;

use blockblaster_ai::profiles;
use blockblaster_ai::teleport::{self, TeleportContext, TeleportEvent};

use crate::boss::BossState;
use crate::effects::{EffectBuffers, ParticleSpec};
use crate::player::Player;
use crate::session::SessionState;

/// A buffered enemy shot, spawned into the world after the query passes.
struct Shot {
    pos: Vec2,
    size: Vec2,
    damage: i32,
    vel: Option<Vec2>,
    fast: bool,
    elite_visual: bool,
    kind: EnemyKind,
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    session: &mut SessionState,
    player: &Player,
    boss: Option<&BossState>,
    effects: &mut EffectBuffers,
    audio_events: &mut Vec<AudioEvent>,
    rng: &mut ChaCha8Rng,
    time: &SimTime,
    dt: f64,
) {
    let now = time.now();
    let stage = session.stage;
    let frames = (dt / NOMINAL_FRAME_MS) as f32;
    let descent = profiles::descent_speed_factor(stage) * frames;

    // Spawn grace and hit-flash countdowns apply to every enemy.
    for (_, enemy) in world.query_mut::<&mut Enemy>() {
        if enemy.spawn_timer_ms > 0.0 {
            enemy.spawn_timer_ms = (enemy.spawn_timer_ms - dt).max(0.0);
        }
        if enemy.hit_flash_ms > 0.0 {
            enemy.hit_flash_ms = (enemy.hit_flash_ms - dt).max(0.0);
        }
    }

    run_splitter_anims(world, rng, stage, now, dt);

    let mut shots: Vec<Shot> = Vec::new();

    // Simple movers and shooters. Teleporters run their own pass below.
    for (_, (body, enemy, fire, swarm, splitter, part)) in world.query_mut::<(
        &mut Body,
        &Enemy,
        Option<&mut FireControl>,
        Option<&mut SwarmMotion>,
        Option<&SplitterRig>,
        Option<&BossPart>,
    )>() {
        if enemy.kind == EnemyKind::TeleporterElite {
            continue;
        }
        if !enemy.spawn_done() || enemy.health <= 0 {
            continue;
        }
        if splitter.is_some_and(|rig| rig.splitting) {
            continue;
        }
        if part.is_some() && !boss.is_some_and(|b| b.visible) {
            continue;
        }

        let center = body.center();
        match enemy.kind {
            EnemyKind::Grunt => {
                body.pos.y += GRUNT_SPEED * descent;
                if let Some(fire) = fire {
                    let cooldown = profiles::fire_cooldown_for_stage(EnemyKind::Grunt, stage)
                        .unwrap_or(GRUNT_FIRE_COOLDOWN_MS);
                    if now - fire.last_shot_ms > cooldown {
                        fire.last_shot_ms = now;
                        audio_events.push(AudioEvent::EnemyShoot {
                            kind: EnemyKind::Grunt,
                        });
                        effects.muzzle_flash(
                            Vec2::new(center.x, body.pos.y + body.size.y),
                            MUZZLE_FLASH_SIZE_ENEMY,
                            90.0,
                            false,
                        );
                        shots.push(straight_shot(body, 1, EnemyKind::Grunt));
                    }
                }
            }
            EnemyKind::MidTier => {
                body.pos.y += MID_TIER_SPEED * descent;
                if let Some(fire) = fire {
                    let cooldown = profiles::fire_cooldown_for_stage(EnemyKind::MidTier, stage)
                        .unwrap_or(MID_TIER_FIRE_COOLDOWN_MS);
                    if now - fire.last_shot_ms > cooldown {
                        fire.last_shot_ms = now;
                        audio_events.push(AudioEvent::EnemyShoot {
                            kind: EnemyKind::MidTier,
                        });
                        effects.muzzle_flash(
                            Vec2::new(center.x, body.pos.y + body.size.y),
                            MUZZLE_FLASH_SIZE_ENEMY * 1.2,
                            90.0,
                            false,
                        );
                        shots.push(straight_shot(body, 2, EnemyKind::MidTier));
                    }

                    let special =
                        profiles::special_cooldown_for_stage(EnemyKind::MidTier, stage)
                            .unwrap_or(MID_TIER_SPECIAL_COOLDOWN_MS);
                    if now - fire.last_special_ms > special {
                        fire.last_special_ms = now;
                        // Three-bullet spread fanning out horizontally.
                        for k in -1..=1 {
                            shots.push(Shot {
                                pos: Vec2::new(
                                    center.x - ENEMY_BULLET_WIDTH / 2.0,
                                    body.pos.y + body.size.y,
                                ),
                                size: Vec2::new(ENEMY_BULLET_WIDTH, ENEMY_BULLET_HEIGHT),
                                damage: 1,
                                vel: Some(Vec2::new(
                                    k as f32 * 1.5 * (1.0 + stage as f32 * 0.1),
                                    ENEMY_BULLET_SPEED * 0.9,
                                )),
                                fast: false,
                                elite_visual: false,
                                kind: EnemyKind::MidTier,
                            });
                        }
                    }
                }
            }
            EnemyKind::SwarmMinion => {
                body.pos.y += SWARM_MINION_SPEED * descent;
                if let Some(swarm) = swarm {
                    swarm.oscillation += SWARM_MINION_OSCILLATION_SPEED * frames;
                    body.pos.x +=
                        swarm.oscillation.sin() * 1.5 * (1.0 + stage as f32 * 0.05);
                    body.pos.x = body.pos.x.clamp(0.0, GAME_WIDTH - body.size.x);
                }
            }
            EnemyKind::SplitterDrone => {
                body.pos.y += SPLITTER_SPEED * descent;
            }
            EnemyKind::MiniSplitter => {
                body.pos.y += MINI_SPLITTER_SPEED * descent;
                body.pos.x += (rng.gen::<f32>() - 0.5) * MINI_SPLITTER_MOVE_VARIANCE * descent;
                body.pos.x = body.pos.x.clamp(0.0, GAME_WIDTH - body.size.x);
                if let Some(fire) = fire {
                    let cooldown =
                        profiles::fire_cooldown_for_stage(EnemyKind::MiniSplitter, stage)
                            .unwrap_or(MINI_SPLITTER_FIRE_COOLDOWN_MS);
                    if now - fire.last_shot_ms > cooldown {
                        fire.last_shot_ms = now;
                        audio_events.push(AudioEvent::EnemyShoot {
                            kind: EnemyKind::MiniSplitter,
                        });
                        effects.muzzle_flash(
                            Vec2::new(center.x, body.pos.y + body.size.y),
                            MUZZLE_FLASH_SIZE_ENEMY * 0.8,
                            90.0,
                            false,
                        );
                        shots.push(Shot {
                            pos: Vec2::new(
                                center.x - ENEMY_BULLET_WIDTH / 2.0,
                                body.pos.y + body.size.y,
                            ),
                            size: Vec2::new(
                                ENEMY_BULLET_WIDTH * 0.8,
                                ENEMY_BULLET_HEIGHT * 0.8,
                            ),
                            damage: 1,
                            vel: None,
                            fast: false,
                            elite_visual: false,
                            kind: EnemyKind::MiniSplitter,
                        });
                    }
                }
            }
            EnemyKind::BossWeaponPod => {
                // Pods fire straight down on their own cooldown, faster
                // once the boss is enraged. They do not move on their own;
                // the boss battle system re-anchors them.
                let destroyed = part.is_some_and(|p| p.destroyed);
                if destroyed {
                    continue;
                }
                if let (Some(fire), Some(boss)) = (fire, boss) {
                    let divisor = match boss.phase {
                        BossPhase::Enraged => 1.5,
                        BossPhase::Opening => 1.0,
                    };
                    if now - fire.last_shot_ms > BOSS_POD_FIRE_COOLDOWN_MS / divisor {
                        fire.last_shot_ms = now;
                        audio_events.push(AudioEvent::BossShoot);
                        effects.muzzle_flash(
                            Vec2::new(center.x, center.y + body.size.y / 2.0),
                            MUZZLE_FLASH_SIZE_ENEMY * 1.5,
                            90.0,
                            false,
                        );
                        shots.push(Shot {
                            pos: Vec2::new(
                                center.x - ENEMY_BULLET_WIDTH / 2.0,
                                center.y + body.size.y / 2.0,
                            ),
                            size: Vec2::new(ENEMY_BULLET_WIDTH, ENEMY_BULLET_HEIGHT * 1.2),
                            damage: 2,
                            vel: None,
                            fast: true,
                            elite_visual: true,
                            kind: EnemyKind::BossWeaponPod,
                        });
                    }
                }
            }
            EnemyKind::TeleporterElite | EnemyKind::BossCore => {}
        }
    }

    run_teleporters(
        world,
        session,
        player,
        effects,
        audio_events,
        rng,
        &mut shots,
        dt,
    );

    for shot in shots {
        world.spawn((
            Body::new(shot.pos, shot.size),
            Projectile {
                damage: shot.damage,
                vel: shot.vel,
                fast: shot.fast,
                elite_visual: shot.elite_visual,
                fired_by: Some(shot.kind),
            },
            EnemyShot,
        ));
    }
}

fn straight_shot(body: &Body, damage: i32, kind: EnemyKind) -> Shot {
    let center = body.center();
    Shot {
        pos: Vec2::new(center.x - ENEMY_BULLET_WIDTH / 2.0, body.pos.y + body.size.y),
        size: Vec2::new(ENEMY_BULLET_WIDTH, ENEMY_BULLET_HEIGHT),
        damage,
        vel: None,
        fast: false,
        elite_visual: false,
        kind,
    }
}

/// Advance split animations; a drone whose animation completes is replaced
/// by three Mini-Splitters arranged radially around its death point.
fn run_splitter_anims(world: &mut World, rng: &mut ChaCha8Rng, stage: u32, now: f64, dt: f64) {
    let mut split_centers: Vec<Vec2> = Vec::new();

    for (_, (body, enemy, rig)) in
        world.query_mut::<(&Body, &mut Enemy, &mut SplitterRig)>()
    {
        if rig.splitting && rig.anim_timer_ms > 0.0 {
            rig.anim_timer_ms = (rig.anim_timer_ms - dt).max(0.0);
            if rig.anim_timer_ms <= 0.0 {
                split_centers.push(body.center());
                enemy.health = SPLITTER_REMOVED_HEALTH;
            }
        }
    }

    for center in split_centers {
        for k in 0..SPLITTER_SPLIT_COUNT {
            let angle = k as f32 / SPLITTER_SPLIT_COUNT as f32 * std::f32::consts::TAU;
            let pos = center + Vec2::new(angle.cos(), angle.sin()) * 10.0
                - Vec2::new(MINI_SPLITTER_WIDTH, MINI_SPLITTER_HEIGHT) * 0.5;
            super::spawn_director::spawn_mini_splitter(world, rng, pos, stage, now);
        }
    }
}

/// Run the teleporter FSM for every elite and materialize its events.
#[allow(clippy::too_many_arguments)]
fn run_teleporters(
    world: &mut World,
    session: &mut SessionState,
    player: &Player,
    effects: &mut EffectBuffers,
    audio_events: &mut Vec<AudioEvent>,
    rng: &mut ChaCha8Rng,
    shots: &mut Vec<Shot>,
    dt: f64,
) {
    for (_, (body, enemy, rig)) in
        world.query_mut::<(&mut Body, &mut Enemy, &mut TeleporterRig)>()
    {
        if !enemy.spawn_done() || enemy.health <= 0 {
            continue;
        }

        let ctx = TeleportContext {
            state: rig.state,
            timer_ms: rig.timer_ms,
            pos: body.pos,
            size: body.size,
            target: rig.target,
            aim_angle: rig.aim_angle,
            player_center: player.center(),
            dt_ms: dt,
        };
        let update = teleport::evaluate(&ctx, rng);

        for event in &update.events {
            match event {
                TeleportEvent::Fired { origin, angle } => {
                    audio_events.push(AudioEvent::EnemyShoot {
                        kind: EnemyKind::TeleporterElite,
                    });
                    effects.muzzle_flash(
                        *origin,
                        MUZZLE_FLASH_SIZE_ELITE,
                        angle.to_degrees() + 90.0,
                        false,
                    );
                    effects.particles(
                        rng,
                        *origin,
                        ParticleSpec {
                            count: 20,
                            tint: ParticleTint::Teleport,
                            base_size: 2.0,
                            size_variance: 4.0,
                            life_min_ms: 300.0,
                            life_variance_ms: 150.0,
                            ..Default::default()
                        },
                    );
                    shots.push(Shot {
                        pos: Vec2::new(
                            origin.x - ENEMY_BULLET_WIDTH / 2.0,
                            origin.y - ENEMY_BULLET_HEIGHT / 2.0,
                        ),
                        size: Vec2::new(ENEMY_BULLET_WIDTH, ENEMY_BULLET_HEIGHT),
                        damage: 2,
                        vel: Some(
                            Vec2::new(angle.cos(), angle.sin()) * ENEMY_ELITE_BULLET_SPEED,
                        ),
                        fast: true,
                        elite_visual: true,
                        kind: EnemyKind::TeleporterElite,
                    });
                }
                TeleportEvent::PhasedOut => {
                    // The elite cycles forever; during a challenge wave the
                    // instant it completes phase-out is when it counts as
                    // cleared, or the wave could never finish.
                    if session.phase == GamePhase::ChallengeWaveActive
                        && !enemy.counted_for_wave
                    {
                        session.wave_remaining = session.wave_remaining.saturating_sub(1);
                        enemy.counted_for_wave = true;
                    }
                }
                TeleportEvent::Reappeared { at } => {
                    enemy.counted_for_wave = false;
                    effects.particles(
                        rng,
                        *at + body.size * 0.5,
                        ParticleSpec {
                            count: 20,
                            tint: ParticleTint::Teleport,
                            base_size: 3.0,
                            size_variance: 5.0,
                            life_min_ms: 400.0,
                            life_variance_ms: 200.0,
                            ..Default::default()
                        },
                    );
                    // A wave elite does not come back: it already counted
                    // as cleared when it phased out.
                    if session.phase == GamePhase::ChallengeWaveActive {
                        enemy.health = 0;
                    }
                }
            }
        }

        rig.state = update.state;
        rig.timer_ms = update.timer_ms;
        rig.target = update.target;
        rig.aim_angle = update.aim_angle;
        body.pos = update.pos;
    }
}

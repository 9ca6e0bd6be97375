//! Collision and damage resolution.
//!
//! AABB overlap between player bullets × enemies (boss parts and the
//! exposed boss body included), the laser beam's band × enemies, enemy
//! bullets × player, direct enemy contact, and player × power-ups. Owns
//! the kill bookkeeping: chain/combo scoring, power-up drops, the splitter
//! death sequence, weapon-pod destruction, and the bomb AOE.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use blockblaster_core::components::*;
use blockblaster_core::constants::*;
use blockblaster_core::enums::{
    EnemyKind, ExplosionTint, GamePhase, ParticleShape, ParticleTint, PartSlot, PowerUpKind,
    TeleportState, TextStyle,
};
use blockblaster_core::events::AudioEvent;
use blockblaster_core::types::{Rect, SimTime};

use crate::boss::BossState;
use crate::effects::{EffectBuffers, ParticleSpec};
use crate::player::Player;
use crate::session::SessionState;

/// How a kill is scored: bullets and the laser extend chains, the bomb
/// awards base points only.
#[derive(Debug, Clone, Copy, PartialEq)]
enum KillStyle {
    Chained,
    Bomb,
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    session: &mut SessionState,
    player: &mut Player,
    mut boss: Option<&mut BossState>,
    effects: &mut EffectBuffers,
    audio_events: &mut Vec<AudioEvent>,
    rng: &mut ChaCha8Rng,
    despawn_buffer: &mut Vec<Entity>,
    time: &SimTime,
) {
    let now = time.now();

    player_bullets(
        world,
        session,
        player,
        boss.as_deref_mut(),
        effects,
        audio_events,
        rng,
        despawn_buffer,
        now,
    );
    laser_beam(
        world,
        session,
        player,
        boss.as_deref_mut(),
        effects,
        audio_events,
        rng,
        now,
    );
    enemy_bullets_vs_player(world, session, player, effects, audio_events);
    contact_damage(world, session, player, effects, audio_events);
    collect_powerups(world, player, audio_events);
}

/// Whether an enemy can currently be hit by bullets or contact.
fn targetable(
    enemy: &Enemy,
    rig: Option<&TeleporterRig>,
    split: Option<&SplitterRig>,
    part: Option<&BossPart>,
) -> bool {
    if enemy.health <= 0 {
        return false;
    }
    if split.is_some_and(|s| s.splitting) {
        return false;
    }
    if part.is_some_and(|p| p.destroyed) {
        return false;
    }
    if rig.is_some_and(|r| {
        matches!(r.state, TeleportState::PhasingIn | TeleportState::PhasingOut)
    }) {
        return false;
    }
    true
}

/// Whether the boss body itself can take damage: only once both weapon
/// pods are destroyed and the core's health is exhausted.
fn boss_body_exposed(world: &World, boss: &BossState) -> bool {
    let mut pods_destroyed = true;
    let mut core_dead = true;
    for (_, (enemy, part)) in world.query::<(&Enemy, &BossPart)>().iter() {
        if part.parent_id != boss.id {
            continue;
        }
        match part.slot {
            PartSlot::Core => core_dead = enemy.health <= 0,
            PartSlot::PodLeft | PartSlot::PodRight => {
                if !part.destroyed {
                    pods_destroyed = false;
                }
            }
        }
    }
    pods_destroyed && core_dead
}

#[allow(clippy::too_many_arguments)]
fn player_bullets(
    world: &mut World,
    session: &mut SessionState,
    player: &Player,
    mut boss: Option<&mut BossState>,
    effects: &mut EffectBuffers,
    audio_events: &mut Vec<AudioEvent>,
    rng: &mut ChaCha8Rng,
    despawn_buffer: &mut Vec<Entity>,
    now: f64,
) {
    despawn_buffer.clear();

    let bullets: Vec<(Entity, Rect, i32)> = world
        .query::<(&Body, &Projectile, &PlayerShot)>()
        .iter()
        .map(|(e, (body, shot, _))| (e, body.rect(), shot.damage))
        .collect();

    for (bullet_entity, bullet_rect, damage) in bullets {
        let mut target = None;
        for (e, (body, enemy, rig, split, part)) in world
            .query::<(
                &Body,
                &Enemy,
                Option<&TeleporterRig>,
                Option<&SplitterRig>,
                Option<&BossPart>,
            )>()
            .iter()
        {
            if targetable(enemy, rig, split, part) && bullet_rect.overlaps(&body.rect()) {
                target = Some(e);
                break;
            }
        }

        let mut hit = false;
        if let Some(enemy_entity) = target {
            hit = true;
            audio_events.push(AudioEvent::EnemyHit);
            effects.particles(
                rng,
                bullet_rect.center(),
                ParticleSpec {
                    count: BULLET_IMPACT_SPARK_COUNT,
                    tint: ParticleTint::Impact,
                    base_size: BULLET_IMPACT_SPARK_SIZE,
                    size_variance: 1.0,
                    life_min_ms: BULLET_IMPACT_SPARK_LIFE_MS,
                    life_variance_ms: 50.0,
                    speed_min: 0.5,
                    speed_variance: 1.0,
                    shape: ParticleShape::Square,
                    spark: true,
                    ..Default::default()
                },
            );
            damage_enemy(
                world,
                enemy_entity,
                damage,
                KillStyle::Chained,
                session,
                player,
                boss.as_deref_mut(),
                effects,
                audio_events,
                rng,
                now,
            );
        } else if let Some(boss) = boss.as_deref_mut() {
            // Bullets that missed every part may still strike the exposed
            // boss body.
            if boss.visible
                && boss_body_exposed(world, boss)
                && bullet_rect.overlaps(&boss.rect())
            {
                hit = true;
                boss.record_body_damage(damage);
                boss.hit_flash_ms = HIT_FLASH_MS;
                audio_events.push(AudioEvent::EnemyHit);
                effects.particles(
                    rng,
                    bullet_rect.center(),
                    ParticleSpec {
                        count: 5,
                        tint: ParticleTint::BossHit,
                        base_size: 3.0,
                        size_variance: 3.0,
                        life_min_ms: 200.0,
                        life_variance_ms: 150.0,
                        ..Default::default()
                    },
                );
                effects.request_shake(
                    SHAKE_BOSS_HIT_INTENSITY * 1.2,
                    SHAKE_BOSS_HIT_DURATION_MS,
                );
            }
        }

        if hit {
            despawn_buffer.push(bullet_entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Continuous damage from the laser-beam power-up: a fixed band above the
/// player, applied on a rate-limited tick.
#[allow(clippy::too_many_arguments)]
fn laser_beam(
    world: &mut World,
    session: &mut SessionState,
    player: &Player,
    mut boss: Option<&mut BossState>,
    effects: &mut EffectBuffers,
    audio_events: &mut Vec<AudioEvent>,
    rng: &mut ChaCha8Rng,
    now: f64,
) {
    if !player.laser_active || player.laser_timer_ms <= 0.0 {
        return;
    }
    if now - session.last_laser_tick_ms <= LASER_DAMAGE_TICK_MS {
        return;
    }
    session.last_laser_tick_ms = now;

    let center_x = player.center().x;
    let half_band = PLAYER_WIDTH * 0.8 / 2.0;
    let (left, right) = (center_x - half_band, center_x + half_band);

    let targets: Vec<Entity> = world
        .query::<(&Body, &Enemy, Option<&SplitterRig>, Option<&BossPart>)>()
        .iter()
        .filter(|(_, (body, enemy, split, part))| {
            enemy.health > 0
                && !split.is_some_and(|s| s.splitting)
                && !part.is_some_and(|p| p.destroyed)
                && body.pos.x + body.size.x > left
                && body.pos.x < right
                && body.pos.y < player.pos.y
        })
        .map(|(e, _)| e)
        .collect();

    for entity in targets {
        damage_enemy(
            world,
            entity,
            1,
            KillStyle::Chained,
            session,
            player,
            boss.as_deref_mut(),
            effects,
            audio_events,
            rng,
            now,
        );
    }

    if let Some(boss) = boss {
        if boss.visible
            && boss_body_exposed(world, boss)
            && boss.pos.x + boss.size.x > left
            && boss.pos.x < right
            && boss.pos.y < player.pos.y
        {
            boss.record_body_damage(LASER_DAMAGE_BOSS_BODY);
            boss.hit_flash_ms = HIT_FLASH_MS;
            let particle_x = boss.pos.x + rng.gen::<f32>() * boss.size.x;
            effects.particles(
                rng,
                Vec2::new(
                    particle_x,
                    boss.pos.y + boss.size.y / 2.0,
                ),
                ParticleSpec {
                    count: 3,
                    tint: ParticleTint::BossHit,
                    base_size: 2.0,
                    size_variance: 2.0,
                    life_min_ms: 80.0,
                    life_variance_ms: 50.0,
                    ..Default::default()
                },
            );
        }
    }
}

fn enemy_bullets_vs_player(
    world: &mut World,
    session: &mut SessionState,
    player: &mut Player,
    effects: &mut EffectBuffers,
    audio_events: &mut Vec<AudioEvent>,
) {
    if !player.vulnerable() {
        return;
    }

    let player_rect = player.rect();
    let mut hit_by = None;
    for (e, (body, _, _)) in world
        .query::<(&Body, &Projectile, &EnemyShot)>()
        .iter()
    {
        if body.rect().overlaps(&player_rect) {
            hit_by = Some(e);
            break;
        }
    }

    if let Some(bullet) = hit_by {
        let _ = world.despawn(bullet);
        damage_player(session, player, effects, audio_events, SHAKE_DURATION_SHORT_MS);
    }
}

/// Ramming an enemy costs a life and destroys the enemy (boss parts and
/// the boss body excepted).
fn contact_damage(
    world: &mut World,
    session: &mut SessionState,
    player: &mut Player,
    effects: &mut EffectBuffers,
    audio_events: &mut Vec<AudioEvent>,
) {
    if !player.vulnerable() || player.lives == 0 {
        return;
    }

    let player_rect = player.rect();
    let mut rammed = None;
    for (e, (body, enemy, rig, split, part)) in world
        .query::<(
            &Body,
            &Enemy,
            Option<&TeleporterRig>,
            Option<&SplitterRig>,
            Option<&BossPart>,
        )>()
        .iter()
    {
        if !targetable(enemy, rig, split, part) || !enemy.spawn_done() {
            continue;
        }
        if body.rect().overlaps(&player_rect) {
            rammed = Some((e, part.is_some(), body.center(), body.size.x));
            break;
        }
    }

    if let Some((entity, is_part, center, width)) = rammed {
        damage_player(session, player, effects, audio_events, SHAKE_DURATION_MEDIUM_MS);
        if !is_part {
            if let Ok(mut enemy) = world.get::<&mut Enemy>(entity) {
                enemy.health = 0;
                // Contact kills still count toward clearing a wave.
                if session.phase == GamePhase::ChallengeWaveActive && !enemy.counted_for_wave {
                    session.wave_remaining = session.wave_remaining.saturating_sub(1);
                    enemy.counted_for_wave = true;
                }
            }
            effects.explosion(
                center,
                width * 1.2,
                EXPLOSION_DURATION_MS,
                ExplosionTint::Enemy,
                true,
                false,
            );
        }
    }
}

fn collect_powerups(world: &mut World, player: &Player, audio_events: &mut Vec<AudioEvent>) {
    let player_rect = player.rect();
    for (_, (body, powerup)) in world.query_mut::<(&Body, &mut PowerUp)>() {
        if !powerup.collected && body.rect().overlaps(&player_rect) {
            powerup.collected = true;
            powerup.collect_anim_ms = POWERUP_COLLECT_ANIM_MS;
            audio_events.push(AudioEvent::PowerUpPickup);
        }
    }
}

/// Apply one hit's worth of damage to the player: exactly one life,
/// invincibility restart, damage flash, explosion, and screen shake. Sets
/// the game-over latch when the last life goes.
pub fn damage_player(
    session: &mut SessionState,
    player: &mut Player,
    effects: &mut EffectBuffers,
    audio_events: &mut Vec<AudioEvent>,
    shake_duration_ms: f64,
) {
    player.lives = player.lives.saturating_sub(1);
    player.grant_invincibility(PLAYER_INVINCIBILITY_MS);
    session.took_damage_this_stage = true;
    session.damage_flash_ms = PLAYER_DAMAGE_FLASH_MS;
    audio_events.push(AudioEvent::PlayerHit);
    effects.explosion(
        player.center(),
        PLAYER_WIDTH * 1.5,
        EXPLOSION_DURATION_MS,
        ExplosionTint::Player,
        false,
        false,
    );
    effects.request_shake(SHAKE_HIT_INTENSITY, shake_duration_ms);
    if player.lives == 0 {
        session.game_over = true;
    }
}

/// Player bomb: full-screen damage to every eligible enemy, clears all
/// enemy bullets, and damages an exposed boss body. Bomb kills award base
/// points but do not extend chains.
#[allow(clippy::too_many_arguments)]
pub fn detonate_bomb(
    world: &mut World,
    session: &mut SessionState,
    player: &Player,
    mut boss: Option<&mut BossState>,
    effects: &mut EffectBuffers,
    audio_events: &mut Vec<AudioEvent>,
    rng: &mut ChaCha8Rng,
    now: f64,
) {
    effects.explosion(
        player.center(),
        GAME_WIDTH * 0.8,
        EXPLOSION_DURATION_MS,
        ExplosionTint::Player,
        true,
        true,
    );
    effects.request_shake(SHAKE_BOMB_INTENSITY, SHAKE_DURATION_MEDIUM_MS);

    let enemy_bullets: Vec<Entity> = world
        .query::<(&Projectile, &EnemyShot)>()
        .iter()
        .map(|(e, _)| e)
        .collect();
    for bullet in enemy_bullets {
        let _ = world.despawn(bullet);
    }

    let targets: Vec<Entity> = world
        .query::<(&Enemy, Option<&SplitterRig>, Option<&BossPart>)>()
        .iter()
        .filter(|(_, (enemy, split, part))| {
            enemy.health > 0
                && !split.is_some_and(|s| s.splitting)
                && !part.is_some_and(|p| p.destroyed)
        })
        .map(|(e, _)| e)
        .collect();

    for entity in targets {
        damage_enemy(
            world,
            entity,
            BOMB_DAMAGE,
            KillStyle::Bomb,
            session,
            player,
            boss.as_deref_mut(),
            effects,
            audio_events,
            rng,
            now,
        );
    }

    if let Some(boss) = boss {
        if boss.visible && boss_body_exposed(world, boss) {
            boss.record_body_damage(BOMB_DAMAGE_BOSS_BODY);
            boss.hit_flash_ms = HIT_FLASH_MS * 2.0;
            effects.particles(
                rng,
                boss.center(),
                ParticleSpec {
                    count: 15,
                    tint: ParticleTint::BossHit,
                    base_size: 3.0,
                    size_variance: 3.0,
                    life_min_ms: 200.0,
                    life_variance_ms: 150.0,
                    ..Default::default()
                },
            );
            effects.request_shake(
                SHAKE_BOSS_HIT_INTENSITY * 1.5,
                SHAKE_BOSS_HIT_DURATION_MS * 1.5,
            );
        }
    }
}

/// Apply damage to one enemy, honoring the spawn grace period, mirroring
/// part damage into the boss aggregate, and running kill bookkeeping when
/// health is exhausted.
#[allow(clippy::too_many_arguments)]
fn damage_enemy(
    world: &mut World,
    entity: Entity,
    amount: i32,
    style: KillStyle,
    session: &mut SessionState,
    player: &Player,
    mut boss: Option<&mut BossState>,
    effects: &mut EffectBuffers,
    audio_events: &mut Vec<AudioEvent>,
    rng: &mut ChaCha8Rng,
    now: f64,
) {
    let part = world.get::<&BossPart>(entity).ok().map(|p| *p);
    let center = match world.get::<&Body>(entity) {
        Ok(body) => body.center(),
        Err(_) => return,
    };

    let died;
    let kind;
    let points;
    {
        let mut enemy = match world.get::<&mut Enemy>(entity) {
            Ok(enemy) => enemy,
            Err(_) => return,
        };
        enemy.hit_flash_ms = HIT_FLASH_MS;
        kind = enemy.kind;
        points = enemy.points;

        if !enemy.spawn_done() {
            // Spawn-animation grace: the hit lands visually but deals no
            // health damage.
            if part.is_some() {
                boss_hit_feedback(effects, rng, center);
            }
            return;
        }

        let before = enemy.health;
        enemy.health -= amount;
        if let Some(part) = part {
            // Part health clamps at zero so the aggregate records only
            // damage actually absorbed.
            enemy.health = enemy.health.max(0);
            let absorbed = before - enemy.health;
            match boss.as_deref_mut() {
                Some(boss) if boss.id == part.parent_id => {
                    boss.record_part_damage(absorbed)
                }
                _ => log::warn!("boss part hit with no matching boss aggregate; ignoring"),
            }
            boss_hit_feedback(effects, rng, center);
            effects.request_shake(SHAKE_BOSS_HIT_INTENSITY, SHAKE_BOSS_HIT_DURATION_MS);
        }
        died = before > 0 && enemy.health <= 0;
    }

    if died {
        process_kill(
            world, entity, kind, points, center, part, style, session, player, effects, rng,
            now,
        );
    }
}

fn boss_hit_feedback(effects: &mut EffectBuffers, rng: &mut ChaCha8Rng, at: Vec2) {
    effects.particles(
        rng,
        at,
        ParticleSpec {
            count: 5,
            tint: ParticleTint::BossHit,
            base_size: 2.0,
            size_variance: 2.0,
            life_min_ms: 150.0,
            life_variance_ms: 100.0,
            ..Default::default()
        },
    );
}

/// Kill bookkeeping for an enemy whose health just reached zero: scoring
/// (with combo feedback for chained kills), kill/wave counters, death
/// explosion, power-up drop, the splitter's split trigger, and weapon-pod
/// destruction.
#[allow(clippy::too_many_arguments)]
fn process_kill(
    world: &mut World,
    entity: Entity,
    kind: EnemyKind,
    points: u32,
    center: Vec2,
    part: Option<BossPart>,
    style: KillStyle,
    session: &mut SessionState,
    player: &Player,
    effects: &mut EffectBuffers,
    rng: &mut ChaCha8Rng,
    now: f64,
) {
    match style {
        KillStyle::Chained => {
            let kill = session.register_kill(now, points);
            if kill.chain > 1 {
                effects.text(
                    format!("COMBO x{}", kill.chain),
                    center + Vec2::new(-40.0, -30.0),
                    TextStyle::Combo,
                    true,
                    false,
                    Some(FLOATING_TEXT_COMBO_DURATION_MS),
                );
                if kill.chain_bonus > 0 {
                    effects.text(
                        format!("+{}", kill.chain_bonus),
                        center + Vec2::new(-30.0, -5.0),
                        TextStyle::Combo,
                        false,
                        false,
                        Some(FLOATING_TEXT_COMBO_DURATION_MS * 0.8),
                    );
                }
            }
        }
        KillStyle::Bomb => session.award(points),
    }

    let major = part.is_some()
        || matches!(
            kind,
            EnemyKind::MidTier | EnemyKind::TeleporterElite | EnemyKind::SplitterDrone
        );
    let size = match style {
        KillStyle::Bomb => EXPLOSION_MAX_SIZE * 0.8,
        KillStyle::Chained if major => EXPLOSION_MAX_SIZE * 1.2,
        KillStyle::Chained
            if matches!(kind, EnemyKind::SwarmMinion | EnemyKind::MiniSplitter) =>
        {
            EXPLOSION_MAX_SIZE * 0.6
        }
        KillStyle::Chained => EXPLOSION_MAX_SIZE,
    };
    let tint = if part.is_some() {
        ExplosionTint::BossPart
    } else {
        ExplosionTint::Enemy
    };
    effects.explosion(
        center,
        size,
        EXPLOSION_DURATION_MS,
        tint,
        true,
        style == KillStyle::Chained && major,
    );
    if style == KillStyle::Chained && major {
        effects.request_shake(SHAKE_DEFAULT_INTENSITY * 1.5, SHAKE_DURATION_SHORT_MS);
    }

    if part.is_none() {
        session.kills_this_stage += 1;

        if session.phase == GamePhase::ChallengeWaveActive {
            if let Ok(mut enemy) = world.get::<&mut Enemy>(entity) {
                if !enemy.counted_for_wave {
                    session.wave_remaining = session.wave_remaining.saturating_sub(1);
                    enemy.counted_for_wave = true;
                }
            }
        }

        if rng.gen_bool(blockblaster_ai::profiles::get_profile(kind).drop_chance) {
            let drop = roll_drop_kind(rng, player.weapon_level);
            world.spawn((
                Body::new(
                    center - Vec2::new(POWERUP_WIDTH, POWERUP_HEIGHT) * 0.5,
                    Vec2::new(POWERUP_WIDTH, POWERUP_HEIGHT),
                ),
                PowerUp::new(drop),
            ));
        }
    }

    if kind == EnemyKind::SplitterDrone {
        // The drone lingers through a short split animation before being
        // replaced by its children.
        if let Ok(mut rig) = world.get::<&mut SplitterRig>(entity) {
            if !rig.splitting {
                rig.splitting = true;
                rig.anim_timer_ms = SPLITTER_ANIM_MS;
            }
        }
    } else if kind == EnemyKind::BossWeaponPod {
        if let Ok(mut part) = world.get::<&mut BossPart>(entity) {
            if !part.destroyed {
                part.destroyed = true;
                session.award(BOSS_POD_BONUS);
            }
        }
    }
}

/// Weighted drop-kind roll, favoring weapon upgrades while below max
/// level.
fn roll_drop_kind(rng: &mut ChaCha8Rng, weapon_level: u32) -> PowerUpKind {
    let roll = rng.gen::<f64>();
    if roll < 0.35 || (weapon_level < WEAPON_MAX_LEVEL && roll < 0.55) {
        PowerUpKind::WeaponUpgrade
    } else if roll < 0.60 {
        PowerUpKind::BombCharge
    } else if roll < 0.80 {
        PowerUpKind::Shield
    } else if roll < 0.90 {
        PowerUpKind::LaserBeam
    } else {
        PowerUpKind::ScoreMultiplier
    }
}

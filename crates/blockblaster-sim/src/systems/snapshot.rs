//! Snapshot system: walks the world and builds a complete `GameSnapshot`.
//!
//! Read-only — it never modifies the world. Entity views are sorted by
//! entity id so output order is stable across runs.

use hecs::World;

use blockblaster_core::components::*;
use blockblaster_core::events::AudioEvent;
use blockblaster_core::state::*;
use blockblaster_core::types::SimTime;

use crate::boss::BossState;
use crate::effects::{EffectBuffers, StarField};
use crate::player::Player;
use crate::session::SessionState;

#[allow(clippy::too_many_arguments)]
pub fn build(
    world: &World,
    time: &SimTime,
    session: &SessionState,
    player: &Player,
    boss: Option<&BossState>,
    effects: &EffectBuffers,
    stars: &StarField,
    audio_events: Vec<AudioEvent>,
) -> GameSnapshot {
    GameSnapshot {
        time: *time,
        phase: session.phase,
        stage: session.stage,
        score: session.score,
        displayed_score: session.displayed_score,
        score_multiplier: session.multiplier,
        multiplier_remaining_ms: session.multiplier_timer_ms,
        chain_kill_count: session.chain_kills,
        chain_remaining_ms: session.chain_timer_ms,
        kills_this_stage: session.kills_this_stage,
        target_kills: session.target_kills,
        wave_remaining: session.wave_remaining,
        stage_title: session.stage_title.clone(),
        stage_subtitle: session.stage_subtitle.clone(),
        transition_remaining_ms: session.transition_timer_ms,
        player: build_player(player),
        enemies: build_enemies(world),
        player_bullets: build_bullets::<PlayerShot>(world),
        enemy_bullets: build_bullets::<EnemyShot>(world),
        power_ups: build_powerups(world),
        boss: boss.map(build_boss),
        explosions: effects.explosions.clone(),
        floating_texts: effects.floating_texts.clone(),
        muzzle_flashes: effects.muzzle_flashes.clone(),
        particles: effects.particles.clone(),
        stars: stars.stars.clone(),
        screen_shake: ShakeView {
            active: session.shake.active,
            intensity: session.shake.intensity,
            remaining_ms: if session.shake.active {
                (session.shake.duration_ms - (time.now() - session.shake.started_ms)).max(0.0)
            } else {
                0.0
            },
        },
        damage_flash_ms: session.damage_flash_ms,
        audio_events,
        game_over: session.game_over,
    }
}

fn build_player(player: &Player) -> PlayerView {
    PlayerView {
        pos: player.pos,
        size: player.size,
        lives: player.lives,
        bombs: player.bombs,
        weapon_level: player.weapon_level,
        invincible: player.invincible,
        invincibility_remaining_ms: player.invincibility_timer_ms,
        laser_active: player.laser_active,
        rolling: player.rolling,
        roll_direction: player.roll_direction,
        roll_cooldown_ms: player.roll_cooldown_ms,
        idle_bob_ms: player.idle_bob_ms,
        low_health: player.lives == 1,
    }
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut views: Vec<(u32, EnemyView)> = world
        .query::<(
            &Body,
            &Enemy,
            Option<&TeleporterRig>,
            Option<&SplitterRig>,
            Option<&BossPart>,
        )>()
        .iter()
        .map(|(entity, (body, enemy, rig, split, part))| {
            (
                entity.id(),
                EnemyView {
                    kind: enemy.kind,
                    pos: body.pos,
                    size: body.size,
                    health: enemy.health,
                    spawn_timer_ms: enemy.spawn_timer_ms,
                    hit_flash_ms: enemy.hit_flash_ms,
                    teleport_state: rig.map(|r| r.state),
                    splitting: split.is_some_and(|s| s.splitting),
                    part_slot: part.map(|p| p.slot),
                    part_destroyed: part.is_some_and(|p| p.destroyed),
                },
            )
        })
        .collect();
    views.sort_by_key(|(id, _)| *id);
    views.into_iter().map(|(_, view)| view).collect()
}

fn build_bullets<M: hecs::Component>(world: &World) -> Vec<BulletView> {
    let mut views: Vec<(u32, BulletView)> = world
        .query::<(&Body, &Projectile, &M)>()
        .iter()
        .map(|(entity, (body, shot, _))| {
            (
                entity.id(),
                BulletView {
                    pos: body.pos,
                    size: body.size,
                    fast: shot.fast,
                    elite_visual: shot.elite_visual,
                    fired_by: shot.fired_by,
                },
            )
        })
        .collect();
    views.sort_by_key(|(id, _)| *id);
    views.into_iter().map(|(_, view)| view).collect()
}

fn build_powerups(world: &World) -> Vec<PowerUpView> {
    let mut views: Vec<(u32, PowerUpView)> = world
        .query::<(&Body, &PowerUp)>()
        .iter()
        .map(|(entity, (body, powerup))| {
            (
                entity.id(),
                PowerUpView {
                    kind: powerup.kind,
                    pos: body.pos,
                    size: body.size,
                    collected: powerup.collected,
                    collect_anim_ms: powerup.collect_anim_ms,
                },
            )
        })
        .collect();
    views.sort_by_key(|(id, _)| *id);
    views.into_iter().map(|(_, view)| view).collect()
}

fn build_boss(boss: &BossState) -> BossView {
    BossView {
        pos: boss.pos,
        size: boss.size,
        max_health: boss.max_health,
        current_health: boss.current_health(),
        phase: boss.phase,
        visible: boss.visible,
        hit_flash_ms: boss.hit_flash_ms,
        laser_telegraph_ms: boss.laser.telegraph_ms,
        laser_sweeping: boss.laser.sweeping,
        laser_angle: boss.laser.angle,
    }
}

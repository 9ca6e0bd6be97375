//! Spawn director — decides when and what enemies enter the playfield.
//!
//! Regular enemies stream in on a stage-scaled cooldown while the phase is
//! `Playing`; a single Teleporter Elite cycles on its own interval from
//! stage 2 on; challenge waves and the boss are instantiated in full by the
//! stage-flow exit actions.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use blockblaster_core::components::*;
use blockblaster_core::constants::*;
use blockblaster_core::enums::{EnemyKind, GamePhase, ParticleTint, PartSlot, TeleportState};
use blockblaster_core::events::AudioEvent;
use blockblaster_core::types::SimTime;

use blockblaster_ai::profiles;

use crate::boss::BossState;
use crate::effects::{EffectBuffers, ParticleSpec};
use crate::session::SessionState;

/// Regular and elite spawn scheduling. Only the `Playing` phase streams
/// enemies; waves and boss battles suspend it.
pub fn run(
    world: &mut World,
    session: &mut SessionState,
    rng: &mut ChaCha8Rng,
    effects: &mut EffectBuffers,
    time: &SimTime,
) {
    if session.phase != GamePhase::Playing {
        return;
    }
    let now = time.now();

    let cooldown = (INITIAL_SPAWN_COOLDOWN_MS
        - (session.stage.saturating_sub(1)) as f64 * SPAWN_COOLDOWN_DECREMENT_MS)
        .max(MIN_SPAWN_COOLDOWN_MS);

    if now - session.last_enemy_spawn_ms > cooldown && live_enemy_count(world) < MAX_LIVE_ENEMIES
    {
        session.last_enemy_spawn_ms = now;
        let stage = session.stage;
        let roll = rng.gen::<f64>();

        if stage > 1
            && session.grunt_spawn_counter >= MID_TIER_SPAWN_THRESHOLD
            && roll < 0.3 + stage as f64 * 0.02
        {
            session.grunt_spawn_counter = 0;
            let x = rng.gen::<f32>() * (GAME_WIDTH - MID_TIER_WIDTH);
            spawn_mid_tier(world, rng, Vec2::new(x, -MID_TIER_HEIGHT), stage, now);
        } else if roll < 0.2 + stage as f64 * 0.03 {
            let base_x = rng.gen::<f32>() * (GAME_WIDTH - SWARM_MINION_WIDTH * 3.0);
            spawn_swarm_cluster(world, rng, base_x, stage);
        } else if stage > 1 && roll < 0.4 + stage as f64 * 0.02 {
            let x = rng.gen::<f32>() * (GAME_WIDTH - SPLITTER_WIDTH);
            spawn_splitter(world, Vec2::new(x, -SPLITTER_HEIGHT), stage);
        } else {
            session.grunt_spawn_counter += 1;
            let x = rng.gen::<f32>() * (GAME_WIDTH - GRUNT_WIDTH);
            spawn_grunt(world, rng, Vec2::new(x, -GRUNT_HEIGHT), stage, now);
        }
    }

    // One Teleporter Elite at a time, from stage 2 on.
    if session.stage > 1
        && now - session.last_elite_spawn_ms > TELEPORTER_SPAWN_INTERVAL_MS
        && !elite_alive(world)
    {
        session.last_elite_spawn_ms = now;
        let x = rng.gen::<f32>() * (GAME_WIDTH - TELEPORTER_WIDTH);
        let pos = Vec2::new(x, -TELEPORTER_HEIGHT);
        let target = Vec2::new(x, rng.gen::<f32>() * (GAME_HEIGHT * 0.3) + 20.0);
        spawn_elite(world, pos, target, session.stage);
        effects.particles(
            rng,
            pos + Vec2::new(TELEPORTER_WIDTH, TELEPORTER_HEIGHT) * 0.5,
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
    }
}

/// Instantiate the challenge wave roster for a stage, staggered vertically
/// by roster slot. Returns the number of units spawned (clusters counted
/// per-unit). An empty or missing roster spawns nothing.
pub fn spawn_challenge_wave(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    stage: u32,
    audio_events: &mut Vec<AudioEvent>,
    now: f64,
) -> u32 {
    let index = (stage.saturating_sub(1) as usize).min(CHALLENGE_WAVES.len() - 1);
    let roster = CHALLENGE_WAVES[index];
    if roster.is_empty() {
        log::warn!("no challenge wave roster for stage {stage}; spawning nothing");
        return 0;
    }

    let base_y = -40.0;
    let stagger = 20.0;
    let mut spawned = 0u32;

    for (slot, &kind) in roster.iter().enumerate() {
        let base_x = GAME_WIDTH / (roster.len() as f32 + 1.0) * (slot as f32 + 1.0);
        let y = base_y - slot as f32 * stagger;

        match kind {
            EnemyKind::Grunt => {
                let x = rng.gen::<f32>() * (GAME_WIDTH - GRUNT_WIDTH);
                let y_jitter = rng.gen::<f32>() * 20.0;
                spawn_grunt(
                    world,
                    rng,
                    Vec2::new(x, y - y_jitter),
                    stage,
                    now,
                );
                spawned += 1;
            }
            EnemyKind::MidTier => {
                let x = (base_x - MID_TIER_WIDTH / 2.0).clamp(0.0, GAME_WIDTH - MID_TIER_WIDTH);
                spawn_mid_tier(world, rng, Vec2::new(x, y), stage, now);
                spawned += 1;
            }
            EnemyKind::SplitterDrone => {
                let x = (base_x - SPLITTER_WIDTH / 2.0).clamp(0.0, GAME_WIDTH - SPLITTER_WIDTH);
                spawn_splitter(world, Vec2::new(x, y), stage);
                spawned += 1;
            }
            EnemyKind::TeleporterElite => {
                let x = (base_x - TELEPORTER_WIDTH / 2.0)
                    .clamp(0.0, GAME_WIDTH - TELEPORTER_WIDTH);
                let target = Vec2::new(x, rng.gen::<f32>() * (GAME_HEIGHT * 0.3) + 30.0);
                spawn_elite(world, Vec2::new(x, y), target, stage);
                spawned += 1;
            }
            EnemyKind::SwarmMinion => {
                let cluster_x = (base_x - SWARM_MINION_WIDTH * 1.5).clamp(
                    SWARM_MINION_WIDTH,
                    GAME_WIDTH - SWARM_MINION_WIDTH * 3.0,
                );
                for k in 0..SWARM_MINION_CLUSTER_SIZE {
                    let col = (k % 3) as f32 - 1.0;
                    let row = (k / 3) as f32;
                    let pos = Vec2::new(
                        cluster_x
                            + col * (SWARM_MINION_WIDTH + 5.0)
                            + (rng.gen::<f32>() - 0.5) * 10.0,
                        y - row * (SWARM_MINION_HEIGHT + 10.0),
                    );
                    spawn_swarm_minion(world, rng, pos, stage);
                    spawned += 1;
                }
            }
            EnemyKind::MiniSplitter | EnemyKind::BossCore | EnemyKind::BossWeaponPod => {
                log::warn!("{kind:?} is not a valid challenge wave entry; skipping");
            }
        }
    }

    audio_events.push(AudioEvent::WarningSiren);
    spawned
}

/// Create the boss aggregate and its three part entities. The boss enters
/// from off-screen top and is untargetable until the fly-in completes.
pub fn spawn_boss(world: &mut World, boss_id: u32) -> BossState {
    let boss = BossState::new(boss_id);

    let core_pos = boss.part_anchor(PartSlot::Core);
    let mut core = Enemy::new(EnemyKind::BossCore, BOSS_CORE_HEALTH, 0);
    core.spawn_timer_ms = SPAWN_ANIMATION_MS;
    world.spawn((
        Body::new(core_pos, Vec2::new(BOSS_CORE_WIDTH, BOSS_CORE_HEIGHT)),
        core,
        BossPart {
            parent_id: boss.id,
            slot: PartSlot::Core,
            destroyed: false,
            initial_health: BOSS_CORE_HEALTH,
        },
    ));

    for slot in [PartSlot::PodLeft, PartSlot::PodRight] {
        let pod_pos = boss.part_anchor(slot);
        world.spawn((
            Body::new(pod_pos, Vec2::new(BOSS_POD_WIDTH, BOSS_POD_HEIGHT)),
            Enemy::new(EnemyKind::BossWeaponPod, BOSS_POD_HEALTH, BOSS_POD_BONUS),
            BossPart {
                parent_id: boss.id,
                slot,
                destroyed: false,
                initial_health: BOSS_POD_HEALTH,
            },
            FireControl::default(),
        ));
    }

    boss
}

// --- Entity assembly ---

pub fn spawn_grunt(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    pos: Vec2,
    stage: u32,
    now: f64,
) -> Entity {
    let profile = profiles::get_profile(EnemyKind::Grunt);
    world.spawn((
        Body::new(pos, profile.size),
        Enemy::new(
            EnemyKind::Grunt,
            profiles::health_for_stage(EnemyKind::Grunt, stage),
            profile.points,
        ),
        FireControl {
            last_shot_ms: now + rng.gen::<f64>() * GRUNT_FIRE_COOLDOWN_MS,
            last_special_ms: 0.0,
        },
    ))
}

pub fn spawn_mid_tier(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    pos: Vec2,
    stage: u32,
    now: f64,
) -> Entity {
    let profile = profiles::get_profile(EnemyKind::MidTier);
    world.spawn((
        Body::new(pos, profile.size),
        Enemy::new(
            EnemyKind::MidTier,
            profiles::health_for_stage(EnemyKind::MidTier, stage),
            profile.points,
        ),
        FireControl {
            last_shot_ms: now + rng.gen::<f64>() * MID_TIER_FIRE_COOLDOWN_MS,
            last_special_ms: now + rng.gen::<f64>() * MID_TIER_SPECIAL_COOLDOWN_MS,
        },
    ))
}

pub fn spawn_swarm_minion(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    pos: Vec2,
    stage: u32,
) -> Entity {
    let profile = profiles::get_profile(EnemyKind::SwarmMinion);
    world.spawn((
        Body::new(pos, profile.size),
        Enemy::new(
            EnemyKind::SwarmMinion,
            profiles::health_for_stage(EnemyKind::SwarmMinion, stage),
            profile.points,
        ),
        SwarmMotion {
            oscillation: rng.gen::<f32>() * std::f32::consts::TAU,
        },
    ))
}

/// Spawn a full swarm cluster in a 3-column grid descending from the top.
pub fn spawn_swarm_cluster(world: &mut World, rng: &mut ChaCha8Rng, base_x: f32, stage: u32) {
    for k in 0..SWARM_MINION_CLUSTER_SIZE {
        let col = (k % 3) as f32;
        let row = (k / 3) as f32;
        let pos = Vec2::new(
            base_x + col * (SWARM_MINION_WIDTH + 5.0) - row * 10.0,
            -SWARM_MINION_HEIGHT - row * (SWARM_MINION_HEIGHT + 5.0),
        );
        spawn_swarm_minion(world, rng, pos, stage);
    }
}

pub fn spawn_splitter(world: &mut World, pos: Vec2, stage: u32) -> Entity {
    let profile = profiles::get_profile(EnemyKind::SplitterDrone);
    world.spawn((
        Body::new(pos, profile.size),
        Enemy::new(
            EnemyKind::SplitterDrone,
            profiles::health_for_stage(EnemyKind::SplitterDrone, stage),
            profile.points,
        ),
        SplitterRig::default(),
    ))
}

pub fn spawn_mini_splitter(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    pos: Vec2,
    stage: u32,
    now: f64,
) -> Entity {
    let profile = profiles::get_profile(EnemyKind::MiniSplitter);
    world.spawn((
        Body::new(pos, profile.size),
        Enemy::new(
            EnemyKind::MiniSplitter,
            profiles::health_for_stage(EnemyKind::MiniSplitter, stage),
            profile.points,
        ),
        FireControl {
            last_shot_ms: now + rng.gen::<f64>() * MINI_SPLITTER_FIRE_COOLDOWN_MS,
            last_special_ms: 0.0,
        },
    ))
}

pub fn spawn_elite(world: &mut World, pos: Vec2, target: Vec2, stage: u32) -> Entity {
    let profile = profiles::get_profile(EnemyKind::TeleporterElite);
    world.spawn((
        Body::new(pos, profile.size),
        Enemy::new(
            EnemyKind::TeleporterElite,
            profiles::health_for_stage(EnemyKind::TeleporterElite, stage),
            profile.points,
        ),
        TeleporterRig {
            state: TeleportState::PhasingIn,
            timer_ms: TELEPORTER_PHASE_IN_MS,
            target,
            aim_angle: 0.0,
        },
    ))
}

/// Live enemies that count against the regular-spawn cap (boss parts are
/// exempt).
fn live_enemy_count(world: &World) -> usize {
    world
        .query::<(&Enemy, Option<&BossPart>)>()
        .iter()
        .filter(|(_, (_, part))| part.is_none())
        .count()
}

fn elite_alive(world: &World) -> bool {
    world
        .query::<&Enemy>()
        .iter()
        .any(|(_, enemy)| enemy.kind == EnemyKind::TeleporterElite)
}

//! Stage and phase progression.
//!
//! The timed interstitial phases count down and fire their exit action on
//! expiry; the progress checks route kill targets into challenge waves or
//! the boss encounter, close out cleared waves, and end the boss battle.

use glam::Vec2;
use hecs::World;
use rand_chacha::ChaCha8Rng;

use blockblaster_core::components::BossPart;
use blockblaster_core::constants::*;
use blockblaster_core::enums::{ExplosionTint, GamePhase, TextStyle};
use blockblaster_core::events::AudioEvent;
use blockblaster_core::types::SimTime;

use crate::boss::BossState;
use crate::effects::EffectBuffers;
use crate::session::SessionState;
use crate::systems::spawn_director;

/// Count down the current interstitial; on expiry perform its exit action
/// and begin the next phase.
#[allow(clippy::too_many_arguments)]
pub fn run_pending(
    world: &mut World,
    session: &mut SessionState,
    boss: &mut Option<BossState>,
    rng: &mut ChaCha8Rng,
    audio_events: &mut Vec<AudioEvent>,
    next_boss_id: &mut u32,
    time: &SimTime,
    dt: f64,
) {
    session.transition_timer_ms = (session.transition_timer_ms - dt).max(0.0);
    if session.transition_timer_ms > 0.0 {
        return;
    }
    let now = time.now();

    match session.phase {
        GamePhase::StageTransition => {
            session.phase = GamePhase::Playing;
            session.last_enemy_spawn_ms = now;
        }
        GamePhase::ChallengeWavePending => {
            session.phase = GamePhase::ChallengeWaveActive;
            let count =
                spawn_director::spawn_challenge_wave(world, rng, session.stage, audio_events, now);
            session.wave_remaining = count;
        }
        GamePhase::BossBattleIncoming => {
            session.phase = GamePhase::BossBattle;
            *next_boss_id += 1;
            *boss = Some(spawn_director::spawn_boss(world, *next_boss_id));
            audio_events.push(AudioEvent::BossSpawn);
        }
        GamePhase::BossDefeated => {
            // Clear the boss and its parts, reset per-stage counters, and
            // roll into the next stage.
            let parts: Vec<hecs::Entity> = world
                .query::<&BossPart>()
                .iter()
                .map(|(e, _)| e)
                .collect();
            for part in parts {
                let _ = world.despawn(part);
            }
            *boss = None;

            session.stage += 1;
            session.took_damage_this_stage = false;
            session.kills_this_stage = 0;
            session.grunt_spawn_counter = 0;
            session.target_kills = SessionState::kill_target_for_stage(session.stage);
            let title = format!("STAGE {}", session.stage);
            session.enter_interstitial(
                GamePhase::StageTransition,
                &title,
                "GET READY!",
                STAGE_TRANSITION_MS,
            );
            session.last_enemy_spawn_ms = now;
        }
        _ => {}
    }
}

/// End-of-tick progression checks for the active phases.
pub fn run_progress(
    session: &mut SessionState,
    boss: &mut Option<BossState>,
    effects: &mut EffectBuffers,
    audio_events: &mut Vec<AudioEvent>,
) {
    if session.phase == GamePhase::BossBattle {
        if let Some(boss) = boss.as_ref() {
            if boss.defeated() {
                let awarded = BOSS_POINTS as u64 * session.multiplier as u64;
                session.score += awarded;
                effects.explosion(
                    boss.center(),
                    boss.size.x * 1.5,
                    EXPLOSION_DURATION_MS * 2.5,
                    ExplosionTint::BossDeath,
                    true,
                    true,
                );
                effects.text(
                    "OVERLORD ANNIHILATED!",
                    Vec2::new(GAME_WIDTH / 2.0 - 200.0, GAME_HEIGHT / 2.0 - 60.0),
                    TextStyle::Victory,
                    false,
                    true,
                    Some(STAGE_VICTORY_MS - 300.0),
                );
                effects.request_shake(
                    SHAKE_BOMB_INTENSITY * 2.0,
                    SHAKE_DURATION_MEDIUM_MS * 2.5,
                );
                audio_events.push(AudioEvent::BossExplode);
                let subtitle = format!("+{awarded} PTS");
                session.enter_interstitial(
                    GamePhase::BossDefeated,
                    "VICTORY!",
                    &subtitle,
                    STAGE_VICTORY_MS,
                );
                return;
            }
        }
    }

    if session.phase == GamePhase::Playing
        && session.target_kills > 0
        && session.kills_this_stage >= session.target_kills
    {
        if session.stage == BOSS_STAGE_TRIGGER {
            session.enter_interstitial(
                GamePhase::BossBattleIncoming,
                "WARNING!",
                "HIVE OVERLORD APPROACHING",
                STAGE_WARNING_MS,
            );
            audio_events.push(AudioEvent::BossWarning);
        } else {
            session.enter_interstitial(
                GamePhase::ChallengeWavePending,
                "WARNING!",
                "CHALLENGE WAVE INCOMING!",
                STAGE_WARNING_MS,
            );
            audio_events.push(AudioEvent::WarningSiren);
        }
    } else if session.phase == GamePhase::ChallengeWaveActive && session.wave_remaining == 0 {
        session.stage += 1;
        session.kills_this_stage = 0;
        session.grunt_spawn_counter = 0;

        if !session.took_damage_this_stage {
            session.score += PERFECT_STAGE_BONUS as u64 * session.multiplier as u64;
            effects.text(
                "PERFECT!",
                Vec2::new(GAME_WIDTH / 2.0 - 100.0, GAME_HEIGHT / 2.0 - 50.0),
                TextStyle::Perfect,
                false,
                true,
                Some(STAGE_TRANSITION_MS - 300.0),
            );
            audio_events.push(AudioEvent::PerfectStage);
        }
        session.took_damage_this_stage = false;
        session.target_kills = SessionState::kill_target_for_stage(session.stage);

        let subtitle = if session.stage == BOSS_STAGE_TRIGGER + 1 {
            "AREA CLEAR!"
        } else {
            "GET READY!"
        };
        let title = format!("STAGE {}", session.stage);
        session.enter_interstitial(
            GamePhase::StageTransition,
            &title,
            subtitle,
            STAGE_TRANSITION_MS,
        );
    }
}

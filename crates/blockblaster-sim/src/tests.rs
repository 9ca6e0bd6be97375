#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use blockblaster_core::components::*;
    use blockblaster_core::constants::*;
    use blockblaster_core::enums::*;
    use blockblaster_core::events::AudioEvent;
    use blockblaster_core::input::{Control, ControlSet};

    use crate::boss::BossState;
    use crate::engine::{GameEngine, SimConfig};
    use crate::session::SessionState;
    use crate::systems::spawn_director;

    const DT: f64 = 16.66;

    fn engine_with_seed(seed: u64) -> GameEngine {
        GameEngine::new(SimConfig { seed })
    }

    fn playing_engine() -> GameEngine {
        let mut engine = engine_with_seed(7);
        engine.session_mut().phase = GamePhase::Playing;
        engine
    }

    fn no_input() -> ControlSet {
        ControlSet::new()
    }

    fn held(controls: &[Control]) -> ControlSet {
        controls.iter().copied().collect()
    }

    fn count_kind(engine: &GameEngine, kind: EnemyKind) -> usize {
        engine
            .world()
            .query::<&Enemy>()
            .iter()
            .filter(|(_, enemy)| enemy.kind == kind)
            .count()
    }

    fn count_player_bullets(engine: &GameEngine) -> usize {
        engine.world().query::<&PlayerShot>().iter().count()
    }

    fn count_enemy_bullets(engine: &GameEngine) -> usize {
        engine.world().query::<&EnemyShot>().iter().count()
    }

    /// Parked enemy bullet that stays where it is spawned.
    fn spawn_static_enemy_bullet(engine: &mut GameEngine, pos: Vec2) {
        engine.world_mut().spawn((
            Body::new(pos, Vec2::new(ENEMY_BULLET_WIDTH, ENEMY_BULLET_HEIGHT)),
            Projectile {
                damage: 1,
                vel: Some(Vec2::ZERO),
                fast: false,
                elite_visual: false,
                fired_by: Some(EnemyKind::Grunt),
            },
            EnemyShot,
        ));
    }

    /// Parked player bullet with a custom damage payload.
    fn spawn_static_player_bullet(engine: &mut GameEngine, pos: Vec2, damage: i32) {
        engine.world_mut().spawn((
            Body::new(pos, Vec2::new(BULLET_WIDTH, BULLET_HEIGHT)),
            Projectile {
                damage,
                vel: Some(Vec2::ZERO),
                fast: false,
                elite_visual: false,
                fired_by: None,
            },
            PlayerShot,
        ));
    }

    // ---- Determinism ----

    fn scripted_controls(tick: u32) -> ControlSet {
        let mut controls = held(&[Control::Fire]);
        if tick < 150 {
            controls.press(Control::Left);
        } else if tick < 300 {
            controls.press(Control::Right);
        }
        controls
    }

    #[test]
    fn test_determinism_same_seed() {
        let mut engine_a = engine_with_seed(12345);
        let mut engine_b = engine_with_seed(12345);

        for tick in 0..600 {
            let controls = scripted_controls(tick);
            let snap_a = engine_a.advance(DT, &controls);
            let snap_b = engine_b.advance(DT, &controls);

            let json_a = serde_json::to_string(&snap_a).unwrap();
            let json_b = serde_json::to_string(&snap_b).unwrap();
            assert_eq!(json_a, json_b, "snapshots diverged at tick {tick}");
        }
    }

    #[test]
    fn test_determinism_different_seeds() {
        let mut engine_a = engine_with_seed(111);
        let mut engine_b = engine_with_seed(222);

        // The starfield alone is seeded, so the very first snapshots
        // already differ; run a while to be sure gameplay diverges too.
        let mut diverged = false;
        for tick in 0..600 {
            let controls = scripted_controls(tick);
            let json_a = serde_json::to_string(&engine_a.advance(DT, &controls)).unwrap();
            let json_b = serde_json::to_string(&engine_b.advance(DT, &controls)).unwrap();
            if json_a != json_b {
                diverged = true;
                break;
            }
        }
        assert!(diverged, "different seeds should produce divergent output");
    }

    // ---- Frame clamp & totality ----

    #[test]
    fn test_huge_elapsed_time_clamped_to_nominal_step() {
        let mut engine = engine_with_seed(1);
        engine.advance(5000.0, &no_input());
        assert!((engine.time().elapsed_ms - NOMINAL_FRAME_MS).abs() < 1e-9);
    }

    #[test]
    fn test_negative_and_zero_elapsed_are_safe() {
        let mut engine = engine_with_seed(1);
        engine.advance(0.0, &no_input());
        engine.advance(-50.0, &no_input());
        assert_eq!(engine.time().tick, 2);
        assert_eq!(engine.time().elapsed_ms, 0.0);
    }

    // ---- Stage flow ----

    #[test]
    fn test_session_opens_on_stage_transition_then_plays() {
        let mut engine = engine_with_seed(3);
        assert_eq!(engine.session().phase, GamePhase::StageTransition);

        let ticks = (STAGE_TRANSITION_MS / DT).ceil() as u32 + 1;
        for _ in 0..ticks {
            engine.advance(DT, &no_input());
        }
        assert_eq!(engine.session().phase, GamePhase::Playing);
    }

    #[test]
    fn test_kill_target_routes_to_challenge_wave_pending() {
        // Scenario: stage 1 kill target reached during normal play.
        let mut engine = playing_engine();
        engine.session_mut().kills_this_stage = engine.session().target_kills;
        engine.advance(DT, &no_input());

        assert_eq!(engine.session().phase, GamePhase::ChallengeWavePending);
        assert!(engine.session().transition_timer_ms > 0.0);
    }

    #[test]
    fn test_kill_target_on_boss_stage_routes_to_boss_incoming() {
        let mut engine = playing_engine();
        engine.session_mut().stage = BOSS_STAGE_TRIGGER;
        engine.session_mut().target_kills = 10;
        engine.session_mut().kills_this_stage = 10;
        engine.advance(DT, &no_input());

        assert_eq!(engine.session().phase, GamePhase::BossBattleIncoming);
    }

    #[test]
    fn test_challenge_wave_spawns_on_pending_expiry() {
        let mut engine = playing_engine();
        engine.session_mut().kills_this_stage = engine.session().target_kills;
        engine.advance(DT, &no_input());
        assert_eq!(engine.session().phase, GamePhase::ChallengeWavePending);

        let ticks = (STAGE_WARNING_MS / DT).ceil() as u32 + 1;
        for _ in 0..ticks {
            engine.advance(DT, &no_input());
        }
        assert_eq!(engine.session().phase, GamePhase::ChallengeWaveActive);
        // Stage 1 roster: 4 swarm entries expand to clusters of 5, plus 3
        // mid-tiers and 5 grunts.
        assert_eq!(engine.session().wave_remaining, 28);
        assert_eq!(count_kind(&engine, EnemyKind::SwarmMinion), 20);
        assert_eq!(count_kind(&engine, EnemyKind::MidTier), 3);
        assert_eq!(count_kind(&engine, EnemyKind::Grunt), 5);
    }

    #[test]
    fn test_wave_clear_grants_perfect_bonus_when_untouched() {
        let mut engine = playing_engine();
        engine.session_mut().phase = GamePhase::ChallengeWaveActive;
        engine.session_mut().wave_remaining = 0;
        engine.advance(DT, &no_input());

        assert_eq!(engine.session().phase, GamePhase::StageTransition);
        assert_eq!(engine.session().stage, 2);
        assert_eq!(engine.session().score, PERFECT_STAGE_BONUS as u64);
    }

    #[test]
    fn test_wave_clear_withholds_perfect_bonus_after_damage() {
        let mut engine = playing_engine();
        engine.session_mut().phase = GamePhase::ChallengeWaveActive;
        engine.session_mut().wave_remaining = 0;
        engine.session_mut().took_damage_this_stage = true;
        engine.advance(DT, &no_input());

        assert_eq!(engine.session().phase, GamePhase::StageTransition);
        assert_eq!(engine.session().score, 0);
    }

    #[test]
    fn test_interstitial_freezes_entities() {
        let mut engine = engine_with_seed(5);
        engine.session_mut().transition_timer_ms = 10_000.0;
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let grunt = spawn_director::spawn_grunt(
            engine.world_mut(),
            &mut rng,
            Vec2::new(300.0, 300.0),
            1,
            0.0,
        );
        engine
            .world_mut()
            .get::<&mut Enemy>(grunt)
            .unwrap()
            .spawn_timer_ms = 0.0;

        for _ in 0..5 {
            engine.advance(DT, &no_input());
        }
        let body = *engine.world().get::<&Body>(grunt).unwrap();
        assert_eq!(body.pos, Vec2::new(300.0, 300.0));
    }

    #[test]
    fn test_regular_spawning_streams_enemies() {
        let mut engine = engine_with_seed(9);
        let ticks = ((STAGE_TRANSITION_MS + INITIAL_SPAWN_COOLDOWN_MS) / DT).ceil() as u32 + 20;
        for _ in 0..ticks {
            engine.advance(DT, &no_input());
        }
        let enemies = engine.world().query::<&Enemy>().iter().count();
        assert!(enemies > 0, "regular spawning should have produced enemies");
    }

    // ---- Player weapon (Scenario C) ----

    #[test]
    fn test_weapon_level_1_fires_single_bullet() {
        let mut engine = playing_engine();
        engine.player_mut().last_shot_ms = -1000.0;
        engine.advance(DT, &held(&[Control::Fire]));
        assert_eq!(count_player_bullets(&engine), 1);
    }

    #[test]
    fn test_weapon_level_4_fires_seven_bullets() {
        let mut engine = playing_engine();
        engine.player_mut().weapon_level = 4;
        engine.player_mut().last_shot_ms = -1000.0;
        engine.advance(DT, &held(&[Control::Fire]));
        assert_eq!(count_player_bullets(&engine), 7);

        // The angled pair carries a velocity override; the rest fly
        // straight.
        let angled = engine
            .world()
            .query::<(&Projectile, &PlayerShot)>()
            .iter()
            .filter(|(_, (shot, _))| shot.vel.is_some())
            .count();
        assert_eq!(angled, 2);
    }

    // ---- Splitter Drone (Scenario B) ----

    #[test]
    fn test_splitter_drone_splits_into_three_minis() {
        let mut engine = playing_engine();
        let drone =
            spawn_director::spawn_splitter(engine.world_mut(), Vec2::new(300.0, 300.0), 1);
        engine
            .world_mut()
            .get::<&mut Enemy>(drone)
            .unwrap()
            .spawn_timer_ms = 0.0;

        spawn_static_player_bullet(&mut engine, Vec2::new(310.0, 305.0), SPLITTER_HEALTH);

        engine.advance(DT, &no_input());
        {
            let rig = engine.world().get::<&SplitterRig>(drone).unwrap();
            assert!(rig.splitting, "lethal hit should start the split");
        }
        let death_center = engine.world().get::<&Body>(drone).unwrap().center();

        let ticks = (SPLITTER_ANIM_MS / DT).ceil() as u32 + 1;
        for _ in 0..ticks {
            engine.advance(DT, &no_input());
        }

        assert_eq!(count_kind(&engine, EnemyKind::SplitterDrone), 0);
        assert_eq!(count_kind(&engine, EnemyKind::MiniSplitter), 3);
        for (_, (body, enemy)) in engine.world().query::<(&Body, &Enemy)>().iter() {
            if enemy.kind == EnemyKind::MiniSplitter {
                assert!(
                    body.center().distance(death_center) < 40.0,
                    "minis should appear around the drone's death point"
                );
            }
        }
    }

    // ---- Boss (Scenario D and health bookkeeping) ----

    fn boss_battle_engine() -> GameEngine {
        let mut engine = engine_with_seed(11);
        engine.spawn_test_boss();
        {
            let boss = engine.boss_mut().unwrap();
            boss.visible = true;
            boss.pos.y = BOSS_TARGET_Y;
        }
        let parts: Vec<hecs::Entity> = engine
            .world()
            .query::<&BossPart>()
            .iter()
            .map(|(e, _)| e)
            .collect();
        for part in parts {
            engine
                .world_mut()
                .get::<&mut Enemy>(part)
                .unwrap()
                .spawn_timer_ms = 0.0;
        }
        engine
    }

    /// A spot inside the boss body rect but clear of all three parts.
    fn body_gap_position(engine: &GameEngine) -> Vec2 {
        let boss = engine.boss().unwrap();
        Vec2::new(boss.pos.x + boss.size.x - 12.0, boss.pos.y + 40.0)
    }

    #[test]
    fn test_boss_body_immune_while_pods_live() {
        let mut engine = boss_battle_engine();
        let gap = body_gap_position(&engine);
        spawn_static_player_bullet(&mut engine, gap, 1);

        engine.advance(DT, &no_input());
        let boss = engine.boss().unwrap();
        assert_eq!(boss.current_health(), boss.max_health);
    }

    #[test]
    fn test_boss_body_takes_damage_once_parts_are_gone() {
        let mut engine = boss_battle_engine();

        let parts: Vec<(hecs::Entity, PartSlot)> = engine
            .world()
            .query::<&BossPart>()
            .iter()
            .map(|(e, part)| (e, part.slot))
            .collect();
        for (entity, slot) in parts {
            if slot.is_pod() {
                engine.world_mut().get::<&mut BossPart>(entity).unwrap().destroyed = true;
            } else {
                engine.world_mut().get::<&mut Enemy>(entity).unwrap().health = 0;
            }
        }

        let gap = body_gap_position(&engine);
        spawn_static_player_bullet(&mut engine, gap, 1);

        engine.advance(DT, &no_input());
        let boss = engine.boss().unwrap();
        assert_eq!(boss.current_health(), boss.max_health - 1);
    }

    #[test]
    fn test_boss_aggregate_health_never_negative_and_caps_damage() {
        let mut boss = BossState::new(1);
        // Full part pools absorbed.
        boss.record_part_damage(BOSS_CORE_HEALTH + 2 * BOSS_POD_HEALTH);
        assert_eq!(
            boss.current_health(),
            BOSS_MAX_HEALTH - BOSS_CORE_HEALTH - 2 * BOSS_POD_HEALTH
        );

        // Body damage past the remaining pool clamps at zero.
        boss.record_body_damage(10_000);
        assert_eq!(boss.current_health(), 0);
        assert!(boss.defeated());
        boss.record_body_damage(50);
        assert_eq!(boss.current_health(), 0);
    }

    #[test]
    fn test_boss_defeat_enters_victory_then_next_stage() {
        let mut engine = boss_battle_engine();
        engine.session_mut().stage = BOSS_STAGE_TRIGGER;
        engine
            .boss_mut()
            .unwrap()
            .record_body_damage(BOSS_MAX_HEALTH);

        engine.advance(DT, &no_input());
        assert_eq!(engine.session().phase, GamePhase::BossDefeated);
        assert_eq!(engine.session().score, BOSS_POINTS as u64);

        let ticks = (STAGE_VICTORY_MS / DT).ceil() as u32 + 1;
        for _ in 0..ticks {
            engine.advance(DT, &no_input());
        }
        assert_eq!(engine.session().phase, GamePhase::StageTransition);
        assert_eq!(engine.session().stage, BOSS_STAGE_TRIGGER + 1);
        assert!(engine.boss().is_none());
        assert_eq!(engine.world().query::<&BossPart>().iter().count(), 0);
    }

    // ---- Damage & invulnerability ----

    #[test]
    fn test_enemy_bullet_costs_exactly_one_life() {
        let mut engine = playing_engine();
        let player_pos = engine.player().pos;
        spawn_static_enemy_bullet(&mut engine, player_pos);

        engine.advance(DT, &no_input());
        assert_eq!(engine.player().lives, PLAYER_INITIAL_LIVES - 1);
        assert!(engine.player().invincible);
        assert!(engine.session().took_damage_this_stage);
    }

    #[test]
    fn test_invincible_player_ignores_overlapping_hits() {
        let mut engine = playing_engine();
        engine.player_mut().grant_invincibility(60_000.0);
        let player_pos = engine.player().pos;
        for _ in 0..3 {
            spawn_static_enemy_bullet(&mut engine, player_pos);
        }
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let rammer =
            spawn_director::spawn_grunt(engine.world_mut(), &mut rng, player_pos, 1, 0.0);
        engine
            .world_mut()
            .get::<&mut Enemy>(rammer)
            .unwrap()
            .spawn_timer_ms = 0.0;

        for _ in 0..3 {
            engine.advance(DT, &no_input());
        }
        assert_eq!(engine.player().lives, PLAYER_INITIAL_LIVES);
    }

    #[test]
    fn test_rolling_player_ignores_hits() {
        let mut engine = playing_engine();
        engine.player_mut().rolling = true;
        engine.player_mut().roll_timer_ms = 1000.0;
        let player_pos = engine.player().pos;
        spawn_static_enemy_bullet(&mut engine, player_pos);

        engine.advance(DT, &no_input());
        assert_eq!(engine.player().lives, PLAYER_INITIAL_LIVES);
    }

    #[test]
    fn test_contact_destroys_enemy_and_counts_for_wave() {
        let mut engine = playing_engine();
        engine.session_mut().phase = GamePhase::ChallengeWaveActive;
        engine.session_mut().wave_remaining = 5;
        let player_pos = engine.player().pos;
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let rammer =
            spawn_director::spawn_grunt(engine.world_mut(), &mut rng, player_pos, 1, 0.0);
        engine
            .world_mut()
            .get::<&mut Enemy>(rammer)
            .unwrap()
            .spawn_timer_ms = 0.0;

        engine.advance(DT, &no_input());
        assert_eq!(engine.player().lives, PLAYER_INITIAL_LIVES - 1);
        assert_eq!(engine.session().wave_remaining, 4);
        assert!(engine.world().get::<&Enemy>(rammer).map(|e| e.health <= 0).unwrap_or(true));
    }

    // ---- Game over ----

    #[test]
    fn test_game_over_fires_exactly_once() {
        let mut engine = engine_with_seed(13);
        let fired = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&fired);
        engine.set_game_over_handler(Box::new(move |score| sink.borrow_mut().push(score)));

        engine.session_mut().phase = GamePhase::Playing;
        engine.session_mut().score = 777;
        engine.player_mut().lives = 1;
        let player_pos = engine.player().pos;
        spawn_static_enemy_bullet(&mut engine, player_pos);

        let snap = engine.advance(DT, &no_input());
        assert!(snap.game_over);
        assert!(snap
            .audio_events
            .iter()
            .any(|e| matches!(e, AudioEvent::GameOver { score: 777 })));

        // Further ticks are inert and never re-fire the handler.
        let tick_at_death = engine.time().tick;
        for _ in 0..10 {
            let snap = engine.advance(DT, &no_input());
            assert!(snap.game_over);
        }
        assert_eq!(engine.time().tick, tick_at_death);
        assert_eq!(*fired.borrow(), vec![777]);
    }

    // ---- Bomb ----

    #[test]
    fn test_bomb_clears_bullets_and_damages_everything_once() {
        let mut engine = playing_engine();
        for i in 0..3 {
            spawn_static_enemy_bullet(&mut engine, Vec2::new(100.0 + i as f32 * 30.0, 100.0));
        }
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let grunt = spawn_director::spawn_grunt(
            engine.world_mut(),
            &mut rng,
            Vec2::new(300.0, 200.0),
            1,
            0.0,
        );
        engine
            .world_mut()
            .get::<&mut Enemy>(grunt)
            .unwrap()
            .spawn_timer_ms = 0.0;

        engine.advance(DT, &held(&[Control::Bomb]));
        assert_eq!(engine.player().bombs, PLAYER_INITIAL_BOMBS - 1);
        assert_eq!(count_enemy_bullets(&engine), 0);
        assert_eq!(engine.session().score, GRUNT_POINTS as u64);
        assert_eq!(engine.session().kills_this_stage, 1);

        // Held, not re-pressed: no second detonation.
        engine.advance(DT, &held(&[Control::Bomb]));
        assert_eq!(engine.player().bombs, PLAYER_INITIAL_BOMBS - 1);
    }

    // ---- Chain kills ----

    #[test]
    fn test_chain_kill_scoring() {
        let mut session = SessionState::new();
        let first = session.register_kill(1000.0, 100);
        assert_eq!(first.chain, 1);
        assert_eq!(first.total, 100);

        let second = session.register_kill(1500.0, 100);
        assert_eq!(second.chain, 2);
        assert_eq!(second.chain_bonus, 2 * CHAIN_KILL_BONUS_PER_KILL as u64);
        assert_eq!(second.total, 100 + second.chain_bonus);

        // Outside the window the chain resets.
        let late = session.register_kill(1500.0 + CHAIN_KILL_WINDOW_MS + 1.0, 100);
        assert_eq!(late.chain, 1);
        assert_eq!(session.score, first.total + second.total + late.total);
    }

    #[test]
    fn test_chain_kills_through_engine_award_combo_bonus() {
        let mut engine = playing_engine();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for i in 0..2 {
            let grunt = spawn_director::spawn_grunt(
                engine.world_mut(),
                &mut rng,
                Vec2::new(100.0 + i as f32 * 200.0, 300.0),
                1,
                0.0,
            );
            engine
                .world_mut()
                .get::<&mut Enemy>(grunt)
                .unwrap()
                .spawn_timer_ms = 0.0;
            spawn_static_player_bullet(
                &mut engine,
                Vec2::new(110.0 + i as f32 * 200.0, 305.0),
                1,
            );
        }

        engine.advance(DT, &no_input());
        // Both grunts die in one tick: 100 + (100 + chain bonus of 60).
        assert_eq!(
            engine.session().score,
            200 + 2 * CHAIN_KILL_BONUS_PER_KILL as u64
        );
        assert_eq!(engine.session().chain_kills, 2);
    }

    // ---- Wave accounting ----

    #[test]
    fn test_wave_kill_decrements_remaining_exactly_once() {
        let mut engine = playing_engine();
        engine.session_mut().phase = GamePhase::ChallengeWaveActive;
        engine.session_mut().wave_remaining = 3;
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let grunt = spawn_director::spawn_grunt(
            engine.world_mut(),
            &mut rng,
            Vec2::new(300.0, 300.0),
            1,
            0.0,
        );
        engine
            .world_mut()
            .get::<&mut Enemy>(grunt)
            .unwrap()
            .spawn_timer_ms = 0.0;
        spawn_static_player_bullet(&mut engine, Vec2::new(310.0, 305.0), 1);

        engine.advance(DT, &no_input());
        assert_eq!(engine.session().wave_remaining, 2);
        for _ in 0..5 {
            engine.advance(DT, &no_input());
        }
        assert_eq!(engine.session().wave_remaining, 2, "no double count");
    }

    #[test]
    fn test_wave_elite_counts_on_full_phase_out() {
        let mut engine = playing_engine();
        engine.session_mut().phase = GamePhase::ChallengeWaveActive;
        engine.session_mut().wave_remaining = 1;
        let elite = spawn_director::spawn_elite(
            engine.world_mut(),
            Vec2::new(200.0, 100.0),
            Vec2::new(200.0, 100.0),
            2,
        );
        {
            let mut enemy = engine.world_mut().get::<&mut Enemy>(elite).unwrap();
            enemy.spawn_timer_ms = 0.0;
        }
        {
            let mut rig = engine.world_mut().get::<&mut TeleporterRig>(elite).unwrap();
            rig.state = TeleportState::PhasingOut;
            rig.timer_ms = 10.0;
        }

        engine.advance(DT, &no_input());
        assert_eq!(engine.session().wave_remaining, 0);
        // An empty wave closes out the stage at the end of the same tick.
        assert_eq!(engine.session().phase, GamePhase::StageTransition);
    }

    // ---- HUD ----

    #[test]
    fn test_displayed_score_converges_to_score() {
        let mut engine = playing_engine();
        engine.session_mut().score = 10_000;
        for _ in 0..200 {
            engine.advance(DT, &no_input());
            if engine.session().displayed_score == 10_000 {
                break;
            }
        }
        assert_eq!(engine.session().displayed_score, 10_000);
    }

    #[test]
    fn test_multiplier_expires_back_to_one() {
        let mut engine = playing_engine();
        engine.session_mut().multiplier = 2;
        engine.session_mut().multiplier_timer_ms = 100.0;
        for _ in 0..10 {
            engine.advance(DT, &no_input());
        }
        assert_eq!(engine.session().multiplier, 1);
    }
}

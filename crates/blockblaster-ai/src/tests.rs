#[cfg(test)]
mod tests {
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use blockblaster_core::constants::*;
    use blockblaster_core::enums::{BossPhase, EnemyKind, TeleportState};

    use crate::boss::{evaluate_core, next_phase, BossCoreContext, BossCoreEvent, LaserState};
    use crate::profiles::{
        descent_speed_factor, fire_cooldown_for_stage, get_profile, health_for_stage,
    };
    use crate::teleport::{evaluate, TeleportContext, TeleportEvent};

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn make_teleport_ctx(state: TeleportState, timer_ms: f64) -> TeleportContext {
        TeleportContext {
            state,
            timer_ms,
            pos: Vec2::new(200.0, 100.0),
            size: Vec2::new(TELEPORTER_WIDTH, TELEPORTER_HEIGHT),
            target: Vec2::new(300.0, 80.0),
            aim_angle: 0.0,
            player_center: Vec2::new(300.0, 700.0),
            dt_ms: 16.66,
        }
    }

    // ---- Teleporter cycle ----

    #[test]
    fn test_phase_in_completes_into_idle_at_target() {
        let ctx = make_teleport_ctx(TeleportState::PhasingIn, 10.0);
        let up = evaluate(&ctx, &mut rng());
        assert_eq!(up.state, TeleportState::Idle);
        assert_eq!(up.timer_ms, TELEPORTER_IDLE_MS);
        assert_eq!(up.pos, ctx.target);
    }

    #[test]
    fn test_idle_expiry_latches_aim_at_player() {
        let ctx = make_teleport_ctx(TeleportState::Idle, 5.0);
        let up = evaluate(&ctx, &mut rng());
        assert_eq!(up.state, TeleportState::Telegraphing);
        assert_eq!(up.timer_ms, TELEPORTER_TELEGRAPH_MS);

        let center = ctx.pos + ctx.size * 0.5;
        let delta = ctx.player_center - center;
        let expected = delta.y.atan2(delta.x);
        assert!((up.aim_angle - expected).abs() < 1e-6);
    }

    #[test]
    fn test_telegraph_expiry_fires_and_phases_out_same_tick() {
        let mut ctx = make_teleport_ctx(TeleportState::Telegraphing, 5.0);
        ctx.aim_angle = 1.25;
        let up = evaluate(&ctx, &mut rng());
        assert_eq!(up.state, TeleportState::PhasingOut);
        assert_eq!(up.timer_ms, TELEPORTER_PHASE_OUT_MS);
        assert_eq!(
            up.events,
            vec![TeleportEvent::Fired {
                origin: ctx.pos + ctx.size * 0.5,
                angle: 1.25,
            }]
        );
    }

    #[test]
    fn test_phase_out_completion_parks_offscreen_with_negative_timer() {
        let ctx = make_teleport_ctx(TeleportState::PhasingOut, 10.0);
        let up = evaluate(&ctx, &mut rng());
        assert_eq!(up.state, TeleportState::PhasingOut);
        // Sign convention: cooldown is stored negative and counts up.
        assert_eq!(up.timer_ms, -TELEPORTER_COOLDOWN_MS);
        assert!(up.pos.x < 0.0 && up.pos.y < 0.0, "parked off-playfield");
        assert_eq!(up.events, vec![TeleportEvent::PhasedOut]);
    }

    #[test]
    fn test_cooldown_counts_up_and_stays_away_while_negative() {
        let ctx = make_teleport_ctx(TeleportState::PhasingOut, -TELEPORTER_COOLDOWN_MS);
        let up = evaluate(&ctx, &mut rng());
        assert_eq!(up.state, TeleportState::PhasingOut);
        assert_eq!(up.timer_ms, -TELEPORTER_COOLDOWN_MS + 16.66);
        assert!(up.events.is_empty());
    }

    #[test]
    fn test_cooldown_expiry_reappears_phasing_in() {
        let ctx = make_teleport_ctx(TeleportState::PhasingOut, -10.0);
        let up = evaluate(&ctx, &mut rng());
        assert_eq!(up.state, TeleportState::PhasingIn);
        assert_eq!(up.timer_ms, TELEPORTER_PHASE_IN_MS);
        assert_eq!(up.pos, up.target);
        assert!(matches!(up.events[..], [TeleportEvent::Reappeared { .. }]));
        // New target stays inside the upper playfield.
        assert!(up.target.x >= 0.0 && up.target.x <= GAME_WIDTH - TELEPORTER_WIDTH);
        assert!(up.target.y >= 0.0 && up.target.y <= GAME_HEIGHT * 0.4);
    }

    #[test]
    fn test_retarget_avoids_player_proximity() {
        let mut r = rng();
        for _ in 0..50 {
            let ctx = make_teleport_ctx(TeleportState::PhasingOut, -1.0);
            let up = evaluate(&ctx, &mut r);
            let player_topleft =
                ctx.player_center - Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT) * 0.5;
            let close_x = (up.target.x - player_topleft.x).abs() < TELEPORTER_PLAYER_CLEARANCE;
            let close_y = (up.target.y - player_topleft.y).abs() < TELEPORTER_PLAYER_CLEARANCE;
            assert!(!(close_x && close_y), "target landed on the player");
        }
    }

    #[test]
    fn test_full_cycle_returns_to_phasing_in() {
        let mut r = rng();
        let mut state = TeleportState::PhasingIn;
        let mut timer = TELEPORTER_PHASE_IN_MS;
        let mut pos = Vec2::new(100.0, 60.0);
        let mut target = pos;
        let mut aim = 0.0;
        let mut seen_fire = false;
        let mut seen_reappear = false;

        // Enough ticks to cover the whole cycle at 16.66 ms.
        for _ in 0..400 {
            let ctx = TeleportContext {
                state,
                timer_ms: timer,
                pos,
                size: Vec2::new(TELEPORTER_WIDTH, TELEPORTER_HEIGHT),
                target,
                aim_angle: aim,
                player_center: Vec2::new(300.0, 700.0),
                dt_ms: 16.66,
            };
            let up = evaluate(&ctx, &mut r);
            for event in &up.events {
                match event {
                    TeleportEvent::Fired { .. } => seen_fire = true,
                    TeleportEvent::Reappeared { .. } => seen_reappear = true,
                    TeleportEvent::PhasedOut => {}
                }
            }
            state = up.state;
            timer = up.timer_ms;
            pos = up.pos;
            target = up.target;
            aim = up.aim_angle;
        }

        assert!(seen_fire, "cycle should have fired");
        assert!(seen_reappear, "cycle should have reappeared");
    }

    // ---- Boss core ----

    fn make_boss_ctx(phase: BossPhase) -> BossCoreContext {
        BossCoreContext {
            phase,
            spread_cooldown_ms: BOSS_SPREAD_COOLDOWN_MS,
            laser_cooldown_ms: BOSS_LASER_COOLDOWN_MS,
            laser: LaserState::default(),
            core_center: Vec2::new(300.0, 130.0),
            player_center: Vec2::new(300.0, 700.0),
            player_vulnerable: true,
            dt_ms: 16.66,
        }
    }

    #[test]
    fn test_spread_shot_fires_on_cooldown_expiry() {
        let mut ctx = make_boss_ctx(BossPhase::Opening);
        ctx.spread_cooldown_ms = 10.0;
        let up = evaluate_core(&ctx);
        match &up.events[..] {
            [BossCoreEvent::SpreadShot { count, arc, .. }] => {
                assert_eq!(*count, 5);
                assert!((arc - std::f32::consts::PI / 3.0).abs() < 1e-6);
            }
            other => panic!("expected spread shot, got {other:?}"),
        }
        assert_eq!(up.spread_cooldown_ms, BOSS_SPREAD_COOLDOWN_MS);
    }

    #[test]
    fn test_enraged_spread_is_wider_and_faster() {
        let mut ctx = make_boss_ctx(BossPhase::Enraged);
        ctx.spread_cooldown_ms = 10.0;
        ctx.laser_cooldown_ms = 5000.0; // keep the laser quiet
        let up = evaluate_core(&ctx);
        match &up.events[..] {
            [BossCoreEvent::SpreadShot { count, arc, .. }] => {
                assert_eq!(*count, 7);
                assert!((arc - std::f32::consts::PI / 2.5).abs() < 1e-6);
            }
            other => panic!("expected spread shot, got {other:?}"),
        }
        assert_eq!(up.spread_cooldown_ms, BOSS_SPREAD_COOLDOWN_MS / 1.5);
    }

    #[test]
    fn test_laser_never_charges_in_opening_phase() {
        let mut ctx = make_boss_ctx(BossPhase::Opening);
        ctx.laser_cooldown_ms = 0.0;
        let up = evaluate_core(&ctx);
        assert_eq!(up.laser.telegraph_ms, 0.0);
        assert!(!up.laser.sweeping);
    }

    #[test]
    fn test_laser_telegraph_then_fire() {
        let mut ctx = make_boss_ctx(BossPhase::Enraged);
        ctx.laser_cooldown_ms = 10.0;
        let up = evaluate_core(&ctx);
        assert!(up.events.contains(&BossCoreEvent::LaserCharge));
        assert!(up.laser.telegraph_ms > 0.0);
        assert_eq!(up.laser_cooldown_ms, BOSS_LASER_COOLDOWN_MS);

        // Run the telegraph down; the sweep must start at the left edge of
        // the arc's origin (straight down).
        let mut ctx2 = make_boss_ctx(BossPhase::Enraged);
        ctx2.laser = up.laser;
        ctx2.laser.telegraph_ms = 10.0;
        ctx2.laser_cooldown_ms = up.laser_cooldown_ms;
        let up2 = evaluate_core(&ctx2);
        assert!(up2.events.contains(&BossCoreEvent::LaserFire));
        assert!(up2.laser.sweeping);
        // The sweep starts and advances within the same tick.
        assert!(up2.laser.remaining_ms > BOSS_LASER_SWEEP_MS - 2.0 * 16.66);
    }

    #[test]
    fn test_laser_sweep_advances_angle_across_the_arc() {
        let mut ctx = make_boss_ctx(BossPhase::Enraged);
        ctx.laser = LaserState {
            telegraph_ms: 0.0,
            sweeping: true,
            remaining_ms: BOSS_LASER_SWEEP_MS / 2.0,
            angle: std::f32::consts::FRAC_PI_2,
        };
        ctx.player_vulnerable = false;
        let up = evaluate_core(&ctx);
        // Halfway through the sweep the beam is just past center.
        let mid = std::f32::consts::FRAC_PI_2;
        assert!(up.laser.angle > mid - BOSS_LASER_SWEEP_RANGE / 2.0);
        assert!(up.laser.angle < mid + BOSS_LASER_SWEEP_RANGE / 2.0);
    }

    #[test]
    fn test_laser_hits_player_in_beam_path() {
        let mut ctx = make_boss_ctx(BossPhase::Enraged);
        // Player straight below the core; position the sweep mid-arc so the
        // beam points straight down this tick.
        ctx.laser = LaserState {
            telegraph_ms: 0.0,
            sweeping: true,
            remaining_ms: BOSS_LASER_SWEEP_MS / 2.0 + 16.66,
            angle: 0.0,
        };
        let up = evaluate_core(&ctx);
        assert!(up.events.contains(&BossCoreEvent::LaserHitPlayer));
    }

    #[test]
    fn test_laser_spares_invulnerable_player() {
        let mut ctx = make_boss_ctx(BossPhase::Enraged);
        ctx.laser = LaserState {
            telegraph_ms: 0.0,
            sweeping: true,
            remaining_ms: BOSS_LASER_SWEEP_MS / 2.0 + 16.66,
            angle: 0.0,
        };
        ctx.player_vulnerable = false;
        let up = evaluate_core(&ctx);
        assert!(!up.events.contains(&BossCoreEvent::LaserHitPlayer));
    }

    #[test]
    fn test_sweep_ends_when_timer_expires() {
        let mut ctx = make_boss_ctx(BossPhase::Enraged);
        ctx.laser = LaserState {
            telegraph_ms: 0.0,
            sweeping: true,
            remaining_ms: 10.0,
            angle: 1.0,
        };
        ctx.player_vulnerable = false;
        let up = evaluate_core(&ctx);
        assert!(!up.laser.sweeping);
    }

    #[test]
    fn test_phase_transition_at_half_health() {
        assert_eq!(
            next_phase(BossPhase::Opening, BOSS_MAX_HEALTH, BOSS_MAX_HEALTH),
            BossPhase::Opening
        );
        assert_eq!(
            next_phase(BossPhase::Opening, BOSS_MAX_HEALTH / 2, BOSS_MAX_HEALTH),
            BossPhase::Enraged
        );
        assert_eq!(
            next_phase(BossPhase::Enraged, BOSS_MAX_HEALTH, BOSS_MAX_HEALTH),
            BossPhase::Enraged,
            "enrage is one-way"
        );
    }

    // ---- Profiles ----

    #[test]
    fn test_health_scaling_per_stage() {
        assert_eq!(health_for_stage(EnemyKind::Grunt, 1), GRUNT_HEALTH);
        assert_eq!(health_for_stage(EnemyKind::Grunt, 4), GRUNT_HEALTH + 2);
        assert_eq!(health_for_stage(EnemyKind::MidTier, 3), MID_TIER_HEALTH + 3);
        assert_eq!(
            health_for_stage(EnemyKind::TeleporterElite, 2),
            TELEPORTER_HEALTH + 4
        );
        // Minis and boss parts never scale.
        assert_eq!(
            health_for_stage(EnemyKind::MiniSplitter, 9),
            MINI_SPLITTER_HEALTH
        );
        assert_eq!(health_for_stage(EnemyKind::BossCore, 9), BOSS_CORE_HEALTH);
    }

    #[test]
    fn test_fire_cooldowns_shrink_with_stage() {
        let stage1 = fire_cooldown_for_stage(EnemyKind::Grunt, 1).unwrap();
        let stage5 = fire_cooldown_for_stage(EnemyKind::Grunt, 5).unwrap();
        assert!(stage5 < stage1);
        assert!(fire_cooldown_for_stage(EnemyKind::SwarmMinion, 1).is_none());
    }

    #[test]
    fn test_descent_speeds_up_with_stage() {
        assert!(descent_speed_factor(5) > descent_speed_factor(1));
    }

    #[test]
    fn test_profiles_have_sane_sizes() {
        for kind in [
            EnemyKind::Grunt,
            EnemyKind::MidTier,
            EnemyKind::SwarmMinion,
            EnemyKind::TeleporterElite,
            EnemyKind::SplitterDrone,
            EnemyKind::MiniSplitter,
            EnemyKind::BossCore,
            EnemyKind::BossWeaponPod,
        ] {
            let profile = get_profile(kind);
            assert!(profile.size.x > 0.0 && profile.size.y > 0.0);
            assert!(profile.base_health > 0);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use crate::constants::MAX_LEADERBOARD_ENTRIES;
    use crate::enums::*;
    use crate::events::AudioEvent;
    use crate::input::{Control, ControlSet};
    use crate::leaderboard::{Leaderboard, MemoryStore, ScoreStore};
    use crate::state::GameSnapshot;
    use crate::types::{Rect, SimTime};

    /// Verify the behavior-driving enums round-trip through serde_json.
    #[test]
    fn test_enemy_kind_serde() {
        let variants = vec![
            EnemyKind::Grunt,
            EnemyKind::MidTier,
            EnemyKind::SwarmMinion,
            EnemyKind::TeleporterElite,
            EnemyKind::SplitterDrone,
            EnemyKind::MiniSplitter,
            EnemyKind::BossCore,
            EnemyKind::BossWeaponPod,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: EnemyKind = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_game_phase_serde() {
        let variants = vec![
            GamePhase::Playing,
            GamePhase::StageTransition,
            GamePhase::ChallengeWavePending,
            GamePhase::ChallengeWaveActive,
            GamePhase::BossBattleIncoming,
            GamePhase::BossBattle,
            GamePhase::BossDefeated,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: GamePhase = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_boss_part_kinds_flagged() {
        assert!(EnemyKind::BossCore.is_boss_part());
        assert!(EnemyKind::BossWeaponPod.is_boss_part());
        assert!(!EnemyKind::Grunt.is_boss_part());
        assert!(!EnemyKind::TeleporterElite.is_boss_part());
    }

    #[test]
    fn test_timed_interstitial_phases() {
        assert!(GamePhase::StageTransition.is_timed_interstitial());
        assert!(GamePhase::ChallengeWavePending.is_timed_interstitial());
        assert!(GamePhase::BossBattleIncoming.is_timed_interstitial());
        assert!(GamePhase::BossDefeated.is_timed_interstitial());
        assert!(!GamePhase::Playing.is_timed_interstitial());
        assert!(!GamePhase::ChallengeWaveActive.is_timed_interstitial());
        assert!(!GamePhase::BossBattle.is_timed_interstitial());
    }

    #[test]
    fn test_audio_event_ids() {
        assert_eq!(AudioEvent::PlayerShoot.id(), "player_shoot");
        assert_eq!(
            AudioEvent::EnemyShoot {
                kind: EnemyKind::MidTier
            }
            .id(),
            "enemy_shoot_mid"
        );
        assert_eq!(
            AudioEvent::EnemyShoot {
                kind: EnemyKind::Grunt
            }
            .id(),
            "enemy_shoot"
        );
        assert_eq!(AudioEvent::GameOver { score: 1 }.id(), "game_over");
    }

    // ---- Geometry ----

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(20.0, 20.0, 5.0, 5.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_rect_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_rect_center() {
        let r = Rect::new(10.0, 20.0, 4.0, 6.0);
        assert_eq!(r.center(), Vec2::new(12.0, 23.0));
    }

    #[test]
    fn test_sim_time_advance() {
        let mut t = SimTime::default();
        t.advance(16.66);
        t.advance(16.66);
        assert_eq!(t.tick, 2);
        assert!((t.elapsed_ms - 33.32).abs() < 1e-9);
    }

    // ---- Input ----

    #[test]
    fn test_control_set_axes() {
        let mut controls = ControlSet::new();
        controls.press(Control::Left);
        controls.press(Control::Up);
        assert_eq!(controls.horizontal(), -1);
        assert_eq!(controls.vertical(), -1);

        controls.press(Control::Right);
        assert_eq!(controls.horizontal(), 0, "opposed inputs cancel");

        controls.release(Control::Left);
        assert_eq!(controls.horizontal(), 1);
    }

    // ---- Leaderboard ----

    fn filled_board(count: usize) -> Leaderboard<MemoryStore> {
        let mut board = Leaderboard::new(MemoryStore::default());
        for i in 0..count {
            board.add_score(&format!("P{i}"), (i as u64 + 1) * 100, "2024-01-01");
        }
        board
    }

    #[test]
    fn test_high_score_while_board_has_room() {
        let board = filled_board(MAX_LEADERBOARD_ENTRIES - 1);
        assert!(board.is_high_score(1));
        assert!(board.is_high_score(50));
    }

    #[test]
    fn test_high_score_on_full_board_requires_beating_lowest() {
        let board = filled_board(MAX_LEADERBOARD_ENTRIES);
        // Lowest of ten stored entries is 100.
        assert!(!board.is_high_score(100));
        assert!(board.is_high_score(101));
    }

    #[test]
    fn test_zero_score_never_qualifies() {
        let board = Leaderboard::new(MemoryStore::default());
        assert!(!board.is_high_score(0));
    }

    #[test]
    fn test_board_stays_sorted_and_capped() {
        let mut board = filled_board(MAX_LEADERBOARD_ENTRIES);
        board.add_score("NEW", 5000, "2024-01-02");

        let entries = board.entries();
        assert_eq!(entries.len(), MAX_LEADERBOARD_ENTRIES);
        assert_eq!(entries[0].name, "NEW");
        assert!(entries.windows(2).all(|w| w[0].score >= w[1].score));
        // The previous lowest (100) fell off.
        assert!(entries.iter().all(|e| e.score > 100));
    }

    #[test]
    fn test_invalid_entries_ignored() {
        let mut board = Leaderboard::new(MemoryStore::default());
        board.add_score("", 500, "2024-01-01");
        board.add_score("GHOST", 0, "2024-01-01");
        assert!(board.entries().is_empty());
    }

    #[test]
    fn test_long_names_trimmed() {
        let mut board = Leaderboard::new(MemoryStore::default());
        board.add_score("ABCDEFGHIJKLMNOPQRSTUV", 500, "2024-01-01");
        assert_eq!(board.entries()[0].name.chars().count(), 15);
    }

    #[test]
    fn test_store_roundtrip_through_save() {
        let mut store = MemoryStore::default();
        store.save(&[]);
        let mut board = Leaderboard::new(store);
        board.add_score("AAA", 900, "2024-01-01");
        board.add_score("BBB", 1200, "2024-01-01");
        let entries = board.entries();
        assert_eq!(entries[0].score, 1200);
        assert_eq!(entries[1].score, 900);
    }

    // ---- Snapshot ----

    #[test]
    fn test_default_snapshot_serializes() {
        let snap = GameSnapshot::default();
        let json = serde_json::to_string(&snap).unwrap();
        let back: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.phase, GamePhase::StageTransition);
        assert_eq!(back.score, 0);
    }
}

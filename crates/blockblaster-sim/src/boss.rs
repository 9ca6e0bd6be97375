//! The Hive Overlord aggregate.
//!
//! The boss body is engine-owned state, not an enemy entity. Its three
//! parts (core and two weapon pods) live in the ECS world and carry the
//! authoritative health; the aggregate records only the damage actually
//! absorbed — part decrements plus direct body damage — and derives its
//! displayed health from that, so the two can never disagree.

use glam::Vec2;

use blockblaster_ai::boss::LaserState;
use blockblaster_core::constants::*;
use blockblaster_core::enums::{BossPhase, MoveDirection, PartSlot};
use blockblaster_core::types::Rect;

#[derive(Debug, Clone)]
pub struct BossState {
    /// Identity linking the part entities to this aggregate.
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub max_health: i32,
    /// Damage absorbed by parts (actual health decrements only).
    part_damage: i32,
    /// Direct damage to the exposed body.
    body_damage: i32,
    pub phase: BossPhase,
    /// False during the entry fly-in; the boss is untargetable until it
    /// reaches its resting position.
    pub visible: bool,
    pub move_direction: MoveDirection,
    /// Game time of the last patrol reversal.
    pub last_move_change_ms: f64,
    pub hit_flash_ms: f64,
    pub spread_cooldown_ms: f64,
    pub laser_cooldown_ms: f64,
    pub laser: LaserState,
}

impl BossState {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            pos: Vec2::new(BOSS_START_X, -BOSS_HEIGHT),
            size: Vec2::new(BOSS_WIDTH, BOSS_HEIGHT),
            max_health: BOSS_MAX_HEALTH,
            part_damage: 0,
            body_damage: 0,
            phase: BossPhase::Opening,
            visible: false,
            move_direction: MoveDirection::Right,
            last_move_change_ms: 0.0,
            hit_flash_ms: 0.0,
            spread_cooldown_ms: BOSS_SPREAD_COOLDOWN_MS,
            laser_cooldown_ms: BOSS_LASER_COOLDOWN_MS,
            laser: LaserState::default(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Displayed aggregate health, derived from absorbed damage and
    /// clamped at zero.
    pub fn current_health(&self) -> i32 {
        (self.max_health - self.part_damage - self.body_damage).max(0)
    }

    pub fn defeated(&self) -> bool {
        self.current_health() == 0
    }

    /// Record damage actually absorbed by a part. Callers pass the real
    /// health decrement (post-clamp), so the aggregate can never exceed
    /// the sum of part health pools.
    pub fn record_part_damage(&mut self, amount: i32) {
        self.part_damage += amount.max(0);
    }

    /// Record direct body damage, capped at the remaining aggregate.
    pub fn record_body_damage(&mut self, amount: i32) {
        self.body_damage += amount.max(0).min(self.current_health());
    }

    /// Where a part sits relative to the current body position. Parts are
    /// rigidly attached and re-derived every tick.
    pub fn part_anchor(&self, slot: PartSlot) -> Vec2 {
        match slot {
            PartSlot::Core => Vec2::new(
                self.pos.x + self.size.x / 2.0 - BOSS_CORE_WIDTH / 2.0,
                self.pos.y + self.size.y / 2.0 - BOSS_CORE_HEIGHT / 2.0,
            ),
            PartSlot::PodLeft => Vec2::new(
                self.pos.x + BOSS_POD_INSET,
                self.pos.y + self.size.y / 2.0 - BOSS_POD_HEIGHT / 2.0,
            ),
            PartSlot::PodRight => Vec2::new(
                self.pos.x + self.size.x - BOSS_POD_WIDTH - BOSS_POD_INSET,
                self.pos.y + self.size.y / 2.0 - BOSS_POD_HEIGHT / 2.0,
            ),
        }
    }
}

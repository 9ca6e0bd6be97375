//! The player's starfighter. Engine-owned plain record; there is exactly
//! one per session and it never enters the ECS world.

use glam::Vec2;

use blockblaster_core::constants::*;
use blockblaster_core::enums::RollDirection;
use blockblaster_core::types::Rect;

#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub lives: u32,
    pub bombs: u32,
    pub weapon_level: u32,
    pub invincible: bool,
    pub invincibility_timer_ms: f64,
    /// Game time of the last shot, for the fire-rate cooldown.
    pub last_shot_ms: f64,
    pub laser_active: bool,
    pub laser_timer_ms: f64,
    pub rolling: bool,
    pub roll_timer_ms: f64,
    pub roll_direction: RollDirection,
    pub roll_cooldown_ms: f64,
    /// Accumulated time driving the idle bob animation.
    pub idle_bob_ms: f64,
    /// Most recent horizontal input, for directional dodges.
    pub last_horizontal: i32,
    /// Game time of the last low-health spark emission.
    pub last_spark_ms: f64,
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            lives: PLAYER_INITIAL_LIVES,
            bombs: PLAYER_INITIAL_BOMBS,
            weapon_level: 1,
            invincible: false,
            invincibility_timer_ms: 0.0,
            last_shot_ms: 0.0,
            laser_active: false,
            laser_timer_ms: 0.0,
            rolling: false,
            roll_timer_ms: 0.0,
            roll_direction: RollDirection::Forward,
            roll_cooldown_ms: 0.0,
            idle_bob_ms: 0.0,
            last_horizontal: 0,
            last_spark_ms: 0.0,
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

    /// Whether the player can currently take damage.
    pub fn vulnerable(&self) -> bool {
        !self.invincible && !self.rolling
    }

    /// Grant invincibility, never shortening a longer remaining window.
    pub fn grant_invincibility(&mut self, duration_ms: f64) {
        self.invincible = true;
        self.invincibility_timer_ms = self.invincibility_timer_ms.max(duration_ms);
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

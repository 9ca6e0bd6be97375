//! Teleporter Elite finite state machine.
//!
//! One evaluation per tick: given the rig's current state and surroundings,
//! returns the next state plus any emitted events. The cycle is
//! `PhasingIn → Idle → Telegraphing → Firing → PhasingOut → (off-screen
//! cooldown) → PhasingIn → …`. `Firing` is instantaneous: the shot and the
//! transition to `PhasingOut` happen in the same tick.
//!
//! Sign convention for the timer, pinned by tests: positive while counting
//! down an active state; after phase-out it is set to minus the cooldown
//! duration and counts *up* toward zero while the unit is parked far
//! off-playfield. At zero the unit retargets and phases back in.

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use blockblaster_core::constants::*;
use blockblaster_core::enums::TeleportState;

/// Input to the teleporter FSM for a single elite.
pub struct TeleportContext {
    pub state: TeleportState,
    pub timer_ms: f64,
    pub pos: Vec2,
    pub size: Vec2,
    /// Point the current/next phase-in materializes at.
    pub target: Vec2,
    /// Aim latched at telegraph start.
    pub aim_angle: f32,
    /// Player rect center, for aiming.
    pub player_center: Vec2,
    pub dt_ms: f64,
}

/// Events emitted by one FSM evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum TeleportEvent {
    /// The aimed shot was released.
    Fired { origin: Vec2, angle: f32 },
    /// Phase-out completed; the unit is now fully off the playfield.
    /// During a challenge wave this is the moment the elite counts as
    /// cleared.
    PhasedOut,
    /// Cooldown expired; the unit rematerializes at `at`.
    Reappeared { at: Vec2 },
}

/// Output of one FSM evaluation.
pub struct TeleportUpdate {
    pub state: TeleportState,
    pub timer_ms: f64,
    pub pos: Vec2,
    pub target: Vec2,
    pub aim_angle: f32,
    pub events: Vec<TeleportEvent>,
}

/// Evaluate the FSM for one elite over one tick.
pub fn evaluate(ctx: &TeleportContext, rng: &mut ChaCha8Rng) -> TeleportUpdate {
    let mut up = TeleportUpdate {
        state: ctx.state,
        timer_ms: ctx.timer_ms,
        pos: ctx.pos,
        target: ctx.target,
        aim_angle: ctx.aim_angle,
        events: Vec::new(),
    };

    match ctx.state {
        TeleportState::PhasingIn => {
            up.timer_ms -= ctx.dt_ms;
            if up.timer_ms <= 0.0 {
                up.state = TeleportState::Idle;
                up.timer_ms = TELEPORTER_IDLE_MS;
                up.pos = ctx.target;
            }
        }
        TeleportState::Idle => {
            up.timer_ms -= ctx.dt_ms;
            if up.timer_ms <= 0.0 {
                up.state = TeleportState::Telegraphing;
                up.timer_ms = TELEPORTER_TELEGRAPH_MS;
                let center = ctx.pos + ctx.size * 0.5;
                let delta = ctx.player_center - center;
                up.aim_angle = delta.y.atan2(delta.x);
            }
        }
        TeleportState::Telegraphing => {
            up.timer_ms -= ctx.dt_ms;
            if up.timer_ms <= 0.0 {
                // Firing is a single instant: release the shot and begin
                // phasing out in the same tick.
                let center = ctx.pos + ctx.size * 0.5;
                up.events.push(TeleportEvent::Fired {
                    origin: center,
                    angle: up.aim_angle,
                });
                up.state = TeleportState::PhasingOut;
                up.timer_ms = TELEPORTER_PHASE_OUT_MS;
            }
        }
        // Never persisted; kept for completeness.
        TeleportState::Firing => {
            up.state = TeleportState::PhasingOut;
            up.timer_ms = TELEPORTER_PHASE_OUT_MS;
        }
        TeleportState::PhasingOut => {
            if ctx.timer_ms > 0.0 {
                // Still dematerializing.
                up.timer_ms -= ctx.dt_ms;
                if up.timer_ms <= 0.0 {
                    up.events.push(TeleportEvent::PhasedOut);
                    up.timer_ms = -TELEPORTER_COOLDOWN_MS;
                    up.pos = Vec2::new(-ctx.size.x * 2.0, -ctx.size.y * 2.0);
                }
            } else {
                // Parked off-playfield; cooldown counts up toward zero.
                up.timer_ms += ctx.dt_ms;
                if up.timer_ms >= 0.0 {
                    up.target = pick_target(ctx, rng);
                    up.pos = up.target;
                    up.state = TeleportState::PhasingIn;
                    up.timer_ms = TELEPORTER_PHASE_IN_MS;
                    up.events.push(TeleportEvent::Reappeared { at: up.target });
                }
            }
        }
    }

    up
}

/// Choose the next materialization point in the upper playfield, rerolling
/// while it lands too close to the player.
fn pick_target(ctx: &TeleportContext, rng: &mut ChaCha8Rng) -> Vec2 {
    loop {
        let x = rng.gen::<f32>() * (GAME_WIDTH - ctx.size.x);
        let y = rng.gen::<f32>() * (GAME_HEIGHT * 0.4);
        let player_topleft = ctx.player_center - Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT) * 0.5;
        if (x - player_topleft.x).abs() >= TELEPORTER_PLAYER_CLEARANCE
            || (y - player_topleft.y).abs() >= TELEPORTER_PLAYER_CLEARANCE
        {
            return Vec2::new(x, y);
        }
    }
}

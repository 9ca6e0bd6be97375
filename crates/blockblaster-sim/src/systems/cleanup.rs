//! Cleanup: removes dead and escaped enemies.
//!
//! Exceptions to plain "health ≤ 0 or off-screen" removal: a Splitter
//! Drone mid-split stays until its animation finishes, boss parts are only
//! removed when destroyed (the core stays at zero health), and a
//! Teleporter Elite parked off-playfield on its cooldown is never treated
//! as escaped. Escaping enemies still count toward clearing an active
//! challenge wave.

use hecs::{Entity, World};

use blockblaster_core::components::{Body, BossPart, Enemy, SplitterRig, TeleporterRig};
use blockblaster_core::constants::GAME_HEIGHT;
use blockblaster_core::enums::{GamePhase, TeleportState};

use crate::session::SessionState;

pub fn run(world: &mut World, session: &mut SessionState, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (body, enemy, rig, split, part)) in world
        .query::<(
            &Body,
            &Enemy,
            Option<&TeleporterRig>,
            Option<&SplitterRig>,
            Option<&BossPart>,
        )>()
        .iter()
    {
        // A dead drone lingers through its split animation.
        if split.is_some_and(|s| s.splitting && s.anim_timer_ms > 0.0) {
            continue;
        }

        if let Some(part) = part {
            if part.destroyed {
                despawn_buffer.push(entity);
            }
            continue;
        }

        // Off-playfield on teleport cooldown, not escaped.
        let away = rig.is_some_and(|r| r.state == TeleportState::PhasingOut && r.timer_ms < 0.0);
        if away {
            continue;
        }

        if enemy.health <= 0 {
            despawn_buffer.push(entity);
            continue;
        }

        if body.pos.y >= GAME_HEIGHT + body.size.y * 2.0 {
            if session.phase == GamePhase::ChallengeWaveActive && !enemy.counted_for_wave {
                session.wave_remaining = session.wave_remaining.saturating_sub(1);
            }
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

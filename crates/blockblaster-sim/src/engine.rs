//! Frame update engine — the core of the game.
//!
//! `GameEngine` owns the hecs ECS world and all session state, processes
//! one held-control snapshot per tick, runs all systems in a fixed order,
//! and produces `GameSnapshot`s. Completely headless, enabling
//! deterministic testing: all randomness flows through one seeded RNG.

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use blockblaster_core::constants::{MAX_FRAME_DELTA_MS, NOMINAL_FRAME_MS};
use blockblaster_core::events::AudioEvent;
use blockblaster_core::input::{Control, ControlSet};
use blockblaster_core::state::GameSnapshot;
use blockblaster_core::types::SimTime;

use crate::boss::BossState;
use crate::effects::{EffectBuffers, StarField};
use crate::player::Player;
use crate::session::{ScreenShake, SessionState};
use crate::systems;

/// Configuration for starting a new session.
pub struct SimConfig {
    /// RNG seed. Same seed + same inputs = same simulation.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// The frame update engine. Owns the ECS world and all session state; the
/// sole mutator of the canonical game state.
pub struct GameEngine {
    world: World,
    time: SimTime,
    session: SessionState,
    player: Player,
    boss: Option<BossState>,
    effects: EffectBuffers,
    stars: StarField,
    rng: ChaCha8Rng,
    audio_events: Vec<AudioEvent>,
    despawn_buffer: Vec<hecs::Entity>,
    next_boss_id: u32,
    /// Previous tick's held bomb/roll controls, for edge triggering.
    prev_bomb_held: bool,
    prev_roll_held: bool,
    game_over_reported: bool,
    on_game_over: Option<Box<dyn FnMut(u64)>>,
}

impl GameEngine {
    /// Create a new engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let stars = StarField::new(&mut rng);
        Self {
            world: World::new(),
            time: SimTime::default(),
            session: SessionState::new(),
            player: Player::new(),
            boss: None,
            effects: EffectBuffers::new(),
            stars,
            rng,
            audio_events: Vec::new(),
            despawn_buffer: Vec::new(),
            next_boss_id: 0,
            prev_bomb_held: false,
            prev_roll_held: false,
            game_over_reported: false,
            on_game_over: None,
        }
    }

    /// Register the handler invoked exactly once, at the tick the player's
    /// lives first reach zero, with the final score.
    pub fn set_game_over_handler(&mut self, handler: Box<dyn FnMut(u64)>) {
        self.on_game_over = Some(handler);
    }

    /// Advance the simulation by one tick and return the resulting
    /// snapshot. Total for any `elapsed_ms >= 0`; pathological deltas are
    /// clamped to the nominal frame so a backgrounded host cannot
    /// fast-forward the session. After game over the engine is inert.
    pub fn advance(&mut self, elapsed_ms: f64, controls: &ControlSet) -> GameSnapshot {
        if self.session.game_over {
            return self.build_snapshot(Vec::new());
        }

        let mut dt = elapsed_ms.max(0.0);
        if dt > MAX_FRAME_DELTA_MS {
            dt = NOMINAL_FRAME_MS;
        }

        self.time.advance(dt);
        self.run_systems(dt, controls);

        self.prev_bomb_held = controls.is_held(Control::Bomb);
        self.prev_roll_held = controls.is_held(Control::Roll);

        self.finish_tick(dt);

        let audio_events = std::mem::take(&mut self.audio_events);
        self.build_snapshot(audio_events)
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Read-only session state, for hosts and tests.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn boss(&self) -> Option<&BossState> {
        self.boss.as_ref()
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub(crate) fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    #[cfg(test)]
    pub(crate) fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    #[cfg(test)]
    pub(crate) fn boss_mut(&mut self) -> Option<&mut BossState> {
        self.boss.as_mut()
    }

    /// Drop a boss plus parts into the world and enter the battle phase
    /// directly (for tests).
    #[cfg(test)]
    pub(crate) fn spawn_test_boss(&mut self) {
        use blockblaster_core::enums::GamePhase;

        self.next_boss_id += 1;
        let boss = systems::spawn_director::spawn_boss(&mut self.world, self.next_boss_id);
        self.boss = Some(boss);
        self.session.phase = GamePhase::BossBattle;
    }

    /// Run all systems in order for one tick.
    fn run_systems(&mut self, dt: f64, controls: &ControlSet) {
        // 1. Global timers: multiplier, invincibility, damage flash, shake
        //    expiry, particles, starfield, displayed score.
        systems::timers::run(
            &mut self.session,
            &mut self.player,
            &mut self.effects,
            &mut self.stars,
            &mut self.rng,
            &self.time,
            dt,
        );

        if self.session.phase.is_timed_interstitial() {
            // 2. Interstitial phases are pure countdowns; on expiry the
            //    phase's exit action fires (spawn wave, spawn boss, next
            //    stage).
            systems::stage_flow::run_pending(
                &mut self.world,
                &mut self.session,
                &mut self.boss,
                &mut self.rng,
                &mut self.audio_events,
                &mut self.next_boss_id,
                &self.time,
                dt,
            );
        } else {
            // 3. Active play: input, projectiles, spawning, behavior,
            //    boss, power-ups, collisions, progression.
            let bomb_edge = controls.is_held(Control::Bomb) && !self.prev_bomb_held;
            let roll_edge = controls.is_held(Control::Roll) && !self.prev_roll_held;
            systems::player_control::run(
                &mut self.world,
                &mut self.session,
                &mut self.player,
                self.boss.as_mut(),
                &mut self.effects,
                &mut self.audio_events,
                &mut self.rng,
                &self.time,
                dt,
                controls,
                bomb_edge,
                roll_edge,
            );
            systems::bullets::run(&mut self.world, &mut self.despawn_buffer, dt);
            systems::spawn_director::run(
                &mut self.world,
                &mut self.session,
                &mut self.rng,
                &mut self.effects,
                &self.time,
            );
            systems::enemy_ai::run(
                &mut self.world,
                &mut self.session,
                &self.player,
                self.boss.as_ref(),
                &mut self.effects,
                &mut self.audio_events,
                &mut self.rng,
                &self.time,
                dt,
            );
            systems::cleanup::run(&mut self.world, &mut self.session, &mut self.despawn_buffer);
            systems::boss_battle::run(
                &mut self.world,
                &mut self.session,
                &mut self.player,
                self.boss.as_mut(),
                &mut self.effects,
                &mut self.audio_events,
                &self.time,
                dt,
            );
            systems::powerups::run(
                &mut self.world,
                &mut self.session,
                &mut self.player,
                &mut self.effects,
                &mut self.audio_events,
                &mut self.rng,
                &mut self.despawn_buffer,
                dt,
            );
            systems::collision::run(
                &mut self.world,
                &mut self.session,
                &mut self.player,
                self.boss.as_mut(),
                &mut self.effects,
                &mut self.audio_events,
                &mut self.rng,
                &mut self.despawn_buffer,
                &self.time,
            );
            systems::stage_flow::run_progress(
                &mut self.session,
                &mut self.boss,
                &mut self.effects,
                &mut self.audio_events,
            );
        }
    }

    /// Tick-end bookkeeping: age transient effects, apply the strongest
    /// shake request, latch game over exactly once.
    fn finish_tick(&mut self, dt: f64) {
        // 4. Materialized effects age and expire.
        self.effects.tick_transient(dt);

        // 5. Strongest shake request of the tick wins; a weaker request
        //    never interrupts a stronger active shake.
        if let Some(request) = self.effects.take_shake_request() {
            let shake = &mut self.session.shake;
            if !shake.active || request.intensity >= shake.intensity {
                *shake = ScreenShake {
                    active: true,
                    intensity: request.intensity,
                    duration_ms: request.duration_ms,
                    started_ms: self.time.now(),
                };
            }
        }

        if self.session.game_over && !self.game_over_reported {
            self.game_over_reported = true;
            self.audio_events.push(AudioEvent::GameOver {
                score: self.session.score,
            });
            if let Some(handler) = self.on_game_over.as_mut() {
                handler(self.session.score);
            }
        }
    }

    fn build_snapshot(&self, audio_events: Vec<AudioEvent>) -> GameSnapshot {
        systems::snapshot::build(
            &self.world,
            &self.time,
            &self.session,
            &self.player,
            self.boss.as_ref(),
            &self.effects,
            &self.stars,
            audio_events,
        )
    }
}

//! Engine-owned effect buffers and the parallax starfield.
//!
//! Systems push explosions, floating texts, muzzle flashes, particles, and
//! screen-shake requests here during a tick; the engine ages and prunes
//! them and copies the survivors into the snapshot. Shake requests compete
//! by intensity — only the strongest request of a tick is applied.

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use blockblaster_core::constants::*;
use blockblaster_core::effects::{Explosion, FloatingText, MuzzleFlash, Particle, Star};
use blockblaster_core::enums::{ExplosionTint, ParticleShape, ParticleTint, TextStyle};

/// Parameters for a particle burst. Defaults mirror the common spark case.
pub struct ParticleSpec {
    pub count: u32,
    pub tint: ParticleTint,
    pub base_size: f32,
    pub size_variance: f32,
    pub life_min_ms: f64,
    pub life_variance_ms: f64,
    pub speed_min: f32,
    pub speed_variance: f32,
    pub shape: ParticleShape,
    pub gravity: Option<f32>,
    pub spark: bool,
}

impl Default for ParticleSpec {
    fn default() -> Self {
        Self {
            count: 5,
            tint: ParticleTint::Impact,
            base_size: 2.0,
            size_variance: 3.0,
            life_min_ms: 300.0,
            life_variance_ms: 400.0,
            speed_min: 1.0,
            speed_variance: 2.0,
            shape: ParticleShape::Circle,
            gravity: None,
            spark: false,
        }
    }
}

/// A screen-shake request raised during the tick.
#[derive(Debug, Clone, Copy)]
pub struct ShakeRequest {
    pub intensity: f32,
    pub duration_ms: f64,
}

#[derive(Default)]
pub struct EffectBuffers {
    pub explosions: Vec<Explosion>,
    pub floating_texts: Vec<FloatingText>,
    pub muzzle_flashes: Vec<MuzzleFlash>,
    pub particles: Vec<Particle>,
    pending_shake: Option<ShakeRequest>,
}

impl EffectBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn explosion(
        &mut self,
        pos: Vec2,
        size: f32,
        duration_ms: f64,
        tint: ExplosionTint,
        debris: bool,
        shockwave: bool,
    ) {
        self.explosions.push(Explosion {
            pos,
            size,
            duration_ms,
            elapsed_ms: 0.0,
            tint,
            debris,
            shockwave,
        });
    }

    /// Push a floating text. `life_ms` of `None` picks the default for the
    /// size class.
    pub fn text(
        &mut self,
        text: impl Into<String>,
        pos: Vec2,
        style: TextStyle,
        large: bool,
        huge: bool,
        life_ms: Option<f64>,
    ) {
        let life_ms = life_ms.unwrap_or(if huge {
            FLOATING_TEXT_DURATION_MS * 1.5
        } else if large {
            FLOATING_TEXT_DURATION_MS * 1.2
        } else {
            FLOATING_TEXT_DURATION_MS
        });
        self.floating_texts.push(FloatingText {
            text: text.into(),
            pos,
            initial_y: pos.y,
            life_ms,
            style,
            large,
            huge,
        });
    }

    pub fn muzzle_flash(&mut self, pos: Vec2, size: f32, rotation: f32, from_player: bool) {
        self.muzzle_flashes.push(MuzzleFlash {
            pos,
            size,
            rotation,
            from_player,
            life_ms: MUZZLE_FLASH_DURATION_MS,
        });
    }

    /// Burst of particles scattered on random headings.
    pub fn particles(&mut self, rng: &mut ChaCha8Rng, pos: Vec2, spec: ParticleSpec) {
        for _ in 0..spec.count {
            let angle = rng.gen::<f32>() * std::f32::consts::TAU;
            let speed = spec.speed_min + rng.gen::<f32>() * spec.speed_variance;
            self.particles.push(Particle {
                pos,
                vel: Vec2::new(angle.cos() * speed, angle.sin() * speed),
                size: spec.base_size + rng.gen::<f32>() * spec.size_variance,
                life_ms: spec.life_min_ms + rng.gen::<f64>() * spec.life_variance_ms,
                opacity: 1.0,
                tint: spec.tint,
                gravity: spec.gravity,
                shape: spec.shape,
                rotation: rng.gen::<f32>() * 360.0,
                rotation_speed: (rng.gen::<f32>() - 0.5) * 5.0,
                spark: spec.spark,
                debris: spec.gravity.is_some(),
            });
        }
    }

    /// Raise a shake request; the strongest request of the tick wins.
    pub fn request_shake(&mut self, intensity: f32, duration_ms: f64) {
        let stronger = self
            .pending_shake
            .map_or(true, |prev| intensity > prev.intensity);
        if stronger {
            self.pending_shake = Some(ShakeRequest {
                intensity,
                duration_ms,
            });
        }
    }

    pub fn take_shake_request(&mut self) -> Option<ShakeRequest> {
        self.pending_shake.take()
    }

    /// Advance particle motion and fade; prune the dead. Runs with the
    /// global timers at the top of the tick.
    pub fn tick_particles(&mut self, dt_ms: f64) {
        let frames = (dt_ms / NOMINAL_FRAME_MS) as f32;
        for p in &mut self.particles {
            if let Some(g) = p.gravity {
                p.vel.y += g * frames;
            }
            p.pos += p.vel * frames;
            p.life_ms -= dt_ms;
            p.opacity = (p.opacity - (dt_ms / (p.life_ms + 0.1)) as f32 * 1.5).max(0.0);
            p.rotation += p.rotation_speed * frames;
        }
        self.particles.retain(|p| p.life_ms > 0.0);
    }

    /// Age explosions, floating texts, and muzzle flashes; prune expired
    /// ones. Runs at the end of the tick, after systems have pushed the
    /// frame's new effects.
    pub fn tick_transient(&mut self, dt_ms: f64) {
        for e in &mut self.explosions {
            e.elapsed_ms += dt_ms;
        }
        self.explosions.retain(|e| e.elapsed_ms < e.duration_ms);

        for t in &mut self.floating_texts {
            t.life_ms -= dt_ms;
        }
        self.floating_texts.retain(|t| t.life_ms > 0.0);

        for f in &mut self.muzzle_flashes {
            f.life_ms -= dt_ms;
        }
        self.muzzle_flashes.retain(|f| f.life_ms > 0.0);
    }
}

/// Scrolling parallax starfield. Three layers with different base speeds;
/// stars wrap to the top with re-rolled appearance.
pub struct StarField {
    pub stars: Vec<Star>,
}

impl StarField {
    pub fn new(rng: &mut ChaCha8Rng) -> Self {
        let mut stars = Vec::new();
        for (layer, &(count, _, min_size, max_size, min_op, max_op)) in
            STAR_LAYERS.iter().enumerate()
        {
            for _ in 0..count {
                stars.push(Star {
                    pos: Vec2::new(
                        rng.gen::<f32>() * GAME_WIDTH,
                        rng.gen::<f32>() * GAME_HEIGHT,
                    ),
                    size: min_size + rng.gen::<f32>() * (max_size - min_size),
                    speed_factor: 0.8 + rng.gen::<f32>() * 0.4,
                    opacity: min_op + rng.gen::<f32>() * (max_op - min_op),
                    layer,
                });
            }
        }
        Self { stars }
    }

    pub fn tick(&mut self, rng: &mut ChaCha8Rng, dt_ms: f64) {
        let frames = (dt_ms / NOMINAL_FRAME_MS) as f32;
        for star in &mut self.stars {
            let (_, base_speed, min_size, max_size, min_op, max_op) = STAR_LAYERS[star.layer];
            star.pos.y += base_speed * star.speed_factor * frames;
            if star.pos.y > GAME_HEIGHT {
                star.pos.y = -star.size;
                star.pos.x = rng.gen::<f32>() * GAME_WIDTH;
                star.size = min_size + rng.gen::<f32>() * (max_size - min_size);
                star.opacity = min_op + rng.gen::<f32>() * (max_op - min_op);
            }
        }
    }
}

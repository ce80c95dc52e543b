//! Visual layer state, kept free of any DOM or canvas types so the easing
//! and particle behavior can be tested on the host.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::{EASE_RATE, FRAME_STEP, PARTICLE_COUNT, VISIBILITY_THRESHOLD};
use crate::preset::{effect_config, VisualEffectId};

/// Per-effect fade state. Each layer eases its progress toward 0 or 1
/// depending on the activation flag; the renderer multiplies progress
/// into the effect's base opacity.
pub struct VisualMixer {
    progress: [f32; VisualEffectId::COUNT],
    target: [bool; VisualEffectId::COUNT],
    time: f32,
}

impl Default for VisualMixer {
    fn default() -> Self {
        Self::new()
    }
}

impl VisualMixer {
    pub fn new() -> Self {
        Self {
            progress: [0.0; VisualEffectId::COUNT],
            target: [false; VisualEffectId::COUNT],
            time: 0.0,
        }
    }

    pub fn set_active(&mut self, id: VisualEffectId, active: bool) {
        self.target[id.index()] = active;
    }

    pub fn is_active(&self, id: VisualEffectId) -> bool {
        self.target[id.index()]
    }

    pub fn deactivate_all(&mut self) {
        self.target = [false; VisualEffectId::COUNT];
    }

    pub fn progress(&self, id: VisualEffectId) -> f32 {
        self.progress[id.index()]
    }

    /// Animation clock in seconds, advanced a fixed step per frame.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// A layer is drawn once its fade has left the noise floor.
    pub fn visible(&self, id: VisualEffectId) -> bool {
        self.progress[id.index()] > VISIBILITY_THRESHOLD
    }

    pub fn any_visible(&self) -> bool {
        VisualEffectId::ALL.iter().any(|&id| self.visible(id))
    }

    /// Drawable layers in registry order with their effective opacity.
    pub fn visible_layers(&self) -> impl Iterator<Item = (VisualEffectId, f32)> + '_ {
        VisualEffectId::ALL.into_iter().filter_map(move |id| {
            let p = self.progress[id.index()];
            if p > VISIBILITY_THRESHOLD {
                Some((id, effect_config(id).base_opacity * p))
            } else {
                None
            }
        })
    }

    /// Advance every fade one frame. Exponential approach: each step
    /// closes a fixed fraction of the remaining distance, so progress
    /// never overshoots its target.
    pub fn step(&mut self) {
        for (p, &on) in self.progress.iter_mut().zip(self.target.iter()) {
            let goal = if on { 1.0 } else { 0.0 };
            *p += (goal - *p) * EASE_RATE;
        }
        self.time += FRAME_STEP;
    }
}

/// One background star, in canvas pixel coordinates.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
    pub opacity: f32,
    pub hue: f32,
    pub phase: f32,
}

/// Drifting starfield behind the nebula effect. Seeded so a given field
/// is reproducible in tests.
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f32,
    height: f32,
}

impl ParticleField {
    pub fn new(seed: u64, width: f32, height: f32) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let particles = (0..PARTICLE_COUNT)
            .map(|_| Particle {
                x: rng.gen::<f32>() * width,
                y: rng.gen::<f32>() * height,
                vx: (rng.gen::<f32>() - 0.5) * 0.5,
                vy: (rng.gen::<f32>() - 0.5) * 0.5,
                size: 1.0 + rng.gen::<f32>() * 3.0,
                opacity: 0.2 + rng.gen::<f32>() * 0.5,
                hue: rng.gen::<f32>() * 360.0,
                phase: rng.gen::<f32>() * std::f32::consts::TAU,
            })
            .collect();
        Self {
            particles,
            width,
            height,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Resize the wrap bounds; existing positions are scaled into the
    /// new viewport.
    pub fn resize(&mut self, width: f32, height: f32) {
        if self.width > 0.0 && self.height > 0.0 {
            let sx = width / self.width;
            let sy = height / self.height;
            for p in &mut self.particles {
                p.x *= sx;
                p.y *= sy;
            }
        }
        self.width = width;
        self.height = height;
    }

    /// Drift each star with a slow sinusoidal wobble, wrapping at the
    /// viewport edges.
    pub fn step(&mut self, time: f32) {
        let (w, h) = (self.width, self.height);
        for p in &mut self.particles {
            p.x += p.vx + (time + p.phase).sin() * 0.1;
            p.y += p.vy + (time * 0.7 + p.phase).cos() * 0.1;
            if p.x < 0.0 {
                p.x += w;
            } else if p.x > w {
                p.x -= w;
            }
            if p.y < 0.0 {
                p.y += h;
            } else if p.y > h {
                p.y -= h;
            }
        }
    }
}

// A single shrinking circle flying away from the center of its explosion.
// Position and scale change every step, everything else is fixed at spawn.

use crate::color::Color;
use crate::config::BurstConfig;
use crate::draw::{DrawTarget, SavedState};
use rand::Rng;
use std::ops::Range;
use vecmath::{vec2_add, vec2_scale, Vector2};

// Identifies a particle within the explosion that owns it
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParticleId(pub u32);

#[derive(Clone, Debug)]
pub struct Particle {
    id: ParticleId,
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub radius: f64,
    pub color: Color,
    pub scale: f64,
    pub scale_speed: f64,
}

// Summing 1/60 steps drifts a few ulps away from the exact product, so a
// scale this close to zero counts as gone
const DEATH_SCALE: f64 = 1e-9;

fn random_in<R: Rng>(rng: &mut R, range: &Range<f64>) -> f64 {
    rng.gen::<f64>() * (range.end - range.start) + range.start
}

impl Particle {
    pub fn new(
        id: ParticleId,
        origin: Vector2<f64>,
        vel: Vector2<f64>,
        radius: f64,
        scale_speed: f64,
        color: Color,
    ) -> Particle {
        Particle {
            id,
            pos: origin,
            vel,
            radius,
            color,
            scale: 1.0,
            scale_speed,
        }
    }

    // `angle` is in radians, everything else random is drawn from `config`
    pub fn spawn<R: Rng>(
        id: ParticleId,
        origin: Vector2<f64>,
        angle: f64,
        color: Color,
        max_radius: f64,
        config: &BurstConfig,
        rng: &mut R,
    ) -> Particle {
        let radius = if max_radius > config.min_radius {
            random_in(rng, &(config.min_radius..max_radius))
        } else {
            max_radius
        };
        let scale_speed = random_in(rng, &config.scale_speed);
        let speed = random_in(rng, &config.speed);
        let vel = [speed * angle.cos(), speed * angle.sin()];
        Particle::new(id, origin, vel, radius, scale_speed, color)
    }

    pub fn id(&self) -> ParticleId {
        self.id
    }

    pub(crate) fn with_id(self, id: ParticleId) -> Particle {
        Particle { id, ..self }
    }

    /// Returns false once the particle has shrunk away, its owner is then
    /// expected to remove it. A dying particle doesn't move on its last step.
    pub fn step(&mut self, dt: f64) -> bool {
        self.scale -= self.scale_speed * dt;
        if self.scale <= DEATH_SCALE {
            self.scale = 0.0;
            return false;
        }
        self.pos = vec2_add(self.pos, vec2_scale(self.vel, dt));
        true
    }

    pub fn is_alive(&self) -> bool {
        self.scale > 0.0
    }

    // Draws a filled circle in the particle's local space
    pub fn render<T: DrawTarget + ?Sized>(&self, target: &T) -> Result<(), T::Error> {
        let target = SavedState::new(target);
        target.translate(self.pos[0], self.pos[1])?;
        target.scale(self.scale)?;

        target.begin_path();
        target.circle(0.0, 0.0, self.radius)?;
        target.close_path();

        target.set_fill_color(&self.color);
        target.fill();
        Ok(())
    }
}

// An explosion owns a ring of particles per color, all spawned at once from
// the same point. It's done once every particle has shrunk away.

use crate::color::Color;
use crate::config::BurstConfig;
use crate::draw::DrawTarget;
use crate::particle::{Particle, ParticleId};
use rand::Rng;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepSummary {
    pub updated: usize,
    pub removed: usize,
}

pub struct Explosion<T: DrawTarget> {
    target: T,
    particles: Vec<Particle>,
    next_id: u32,
    completed: bool,
}

impl<T: DrawTarget> Explosion<T> {
    pub fn new<R: Rng>(
        origin: Vector2<f64>,
        colors: &[Color],
        max_radius: f64,
        target: T,
        config: &BurstConfig,
        rng: &mut R,
    ) -> Explosion<T> {
        let mut explosion = Explosion::empty(target);
        explosion.spawn_burst(origin, colors, max_radius, config, rng);
        explosion
    }

    pub fn empty(target: T) -> Explosion<T> {
        Explosion {
            target,
            particles: Vec::new(),
            next_id: 0,
            completed: false,
        }
    }

    pub fn spawn_burst<R: Rng>(
        &mut self,
        origin: Vector2<f64>,
        colors: &[Color],
        max_radius: f64,
        config: &BurstConfig,
        rng: &mut R,
    ) {
        let angles = config.burst_angles();
        self.particles.reserve(colors.len() * angles.len());
        for color in colors {
            for angle in &angles {
                let id = self.allocate_id();
                let particle =
                    Particle::spawn(id, origin, *angle, *color, max_radius, config, rng);
                self.particles.push(particle);
            }
        }
    }

    // The particle keeps its state but gets an id unique to this explosion
    pub fn add_particle(&mut self, particle: Particle) -> ParticleId {
        let id = self.allocate_id();
        self.particles.push(particle.with_id(id));
        id
    }

    fn allocate_id(&mut self) -> ParticleId {
        let id = ParticleId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Advances every particle by `dt` and drops the ones that died.
    /// An explosion found empty at the start of a step is marked completed.
    pub fn step(&mut self, dt: f64) -> StepSummary {
        if self.particles.is_empty() {
            self.completed = true;
            return StepSummary::default();
        }

        let mut dead = Vec::new();
        for particle in self.particles.iter_mut() {
            if !particle.step(dt) {
                dead.push(particle.id());
            }
        }
        let updated = self.particles.len();

        // Removal waits until the pass is over so every particle is visited once
        for id in &dead {
            self.remove_particle(*id);
        }

        StepSummary {
            updated,
            removed: dead.len(),
        }
    }

    pub fn render(&self) -> Result<(), T::Error> {
        for particle in &self.particles {
            particle.render(&self.target)?;
        }
        Ok(())
    }

    // False if it was already gone. Completion is only ever flagged in `step`
    pub fn remove_particle(&mut self, id: ParticleId) -> bool {
        match self.particles.iter().position(|p| p.id() == id) {
            Some(idx) => {
                self.particles.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AngleSpacing, FIXED_TIMESTEP};
    use crate::draw::recorder::{Call, Recorder};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f64::consts::PI;

    const RED: Color = Color::rgb(0xff, 0, 0);
    const GREEN: Color = Color::rgb(0, 0xff, 0);
    const BLUE: Color = Color::rgb(0, 0, 0xff);

    fn burst(colors: &[Color], seed: u64) -> Explosion<Recorder> {
        let mut rng = StdRng::seed_from_u64(seed);
        Explosion::new(
            [100.0, 100.0],
            colors,
            10.0,
            Recorder::new(),
            &BurstConfig::default(),
            &mut rng,
        )
    }

    fn with_speeds(speeds: &[f64]) -> Explosion<Recorder> {
        let mut explosion = Explosion::empty(Recorder::new());
        for speed in speeds {
            explosion.add_particle(Particle::new(
                ParticleId(0),
                [0.0, 0.0],
                [8.0, 0.0],
                2.0,
                *speed,
                RED,
            ));
        }
        explosion
    }

    #[test]
    fn spawns_seven_particles_per_color() {
        assert_eq!(burst(&[RED], 1).len(), 7);
        assert_eq!(burst(&[RED, GREEN, BLUE], 2).len(), 21);
    }

    #[test]
    fn one_color_is_evenly_spaced_from_zero() {
        let explosion = burst(&[RED], 3);
        let mut angles: Vec<f64> = explosion
            .particles()
            .iter()
            .map(|p| {
                let a = p.vel[1].atan2(p.vel[0]);
                if a < -1e-9 {
                    a + 2.0 * PI
                } else {
                    a.max(0.0)
                }
            })
            .collect();
        angles.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!(angles[0].abs() < 1e-9);
        for pair in angles.windows(2) {
            assert!((pair[1] - pair[0] - 2.0 * PI / 7.0).abs() < 1e-9);
        }
    }

    #[test]
    fn particle_ids_are_unique() {
        let explosion = burst(&[RED, GREEN], 4);
        let mut ids: Vec<u32> = explosion.particles().iter().map(|p| p.id().0).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 14);
    }

    #[test]
    fn rounded_degree_spacing_is_opt_in() {
        let config = BurstConfig {
            spacing: AngleSpacing::RoundedDegrees,
            ..BurstConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let explosion =
            Explosion::new([0.0, 0.0], &[RED], 10.0, Recorder::new(), &config, &mut rng);
        assert_eq!(explosion.len(), 8);
    }

    #[test]
    fn empty_palette_completes_on_first_step() {
        let mut explosion = burst(&[], 6);
        assert!(explosion.is_empty());
        assert!(!explosion.is_completed());
        assert_eq!(explosion.step(FIXED_TIMESTEP), StepSummary::default());
        assert!(explosion.is_completed());
    }

    #[test]
    fn completes_the_step_after_the_last_particle_dies() {
        let mut explosion = with_speeds(&[1.0, 1.0, 1.0]);
        for _ in 0..3 {
            let summary = explosion.step(0.25);
            assert_eq!(summary, StepSummary { updated: 3, removed: 0 });
            assert!(!explosion.is_completed());
        }
        assert_eq!(explosion.step(0.25), StepSummary { updated: 3, removed: 3 });
        assert!(explosion.is_empty());
        assert!(!explosion.is_completed());

        explosion.step(0.25);
        assert!(explosion.is_completed());
        explosion.step(0.25);
        assert!(explosion.is_completed());
    }

    #[test]
    fn removal_mid_pass_visits_every_particle() {
        // Particles at 4.0 die on the first quarter-second step
        let mut explosion = with_speeds(&[4.0, 1.0, 4.0, 4.0, 1.0, 2.0]);
        let survivors: Vec<ParticleId> = explosion
            .particles()
            .iter()
            .filter(|p| p.scale_speed < 4.0)
            .map(|p| p.id())
            .collect();

        let summary = explosion.step(0.25);
        assert_eq!(summary, StepSummary { updated: 6, removed: 3 });

        let remaining: Vec<ParticleId> =
            explosion.particles().iter().map(|p| p.id()).collect();
        assert_eq!(remaining, survivors);
        for p in explosion.particles() {
            assert_eq!(p.pos, [2.0, 0.0]);
            assert_eq!(p.scale, 1.0 - p.scale_speed * 0.25);
        }
    }

    #[test]
    fn completion_lands_the_step_after_death_at_sixty_hz() {
        for &(speed, completed_on) in &[(2.0, 31), (2.5, 25), (4.0, 16)] {
            let mut explosion = with_speeds(&[speed]);
            let mut steps = 0;
            while !explosion.is_completed() {
                steps += 1;
                explosion.step(FIXED_TIMESTEP);
                assert!(steps <= 100);
            }
            assert_eq!(steps, completed_on, "scale speed {}", speed);
        }
    }

    #[test]
    fn add_particle_keeps_scale_and_replaces_id() {
        let mut explosion = Explosion::empty(Recorder::new());
        let mut particle =
            Particle::new(ParticleId(42), [1.0, 2.0], [0.0, 0.0], 3.0, 1.0, RED);
        particle.scale = 0.5;
        let id = explosion.add_particle(particle);
        assert_eq!(id, ParticleId(0));
        assert_eq!(explosion.particles()[0].id(), id);
        assert_eq!(explosion.particles()[0].scale, 0.5);
        assert_eq!(explosion.particles()[0].pos, [1.0, 2.0]);
    }

    #[test]
    fn remove_particle_is_idempotent() {
        let mut explosion = with_speeds(&[1.0, 1.0]);
        let id = explosion.particles()[0].id();
        assert!(explosion.remove_particle(id));
        assert!(!explosion.remove_particle(id));
        assert_eq!(explosion.len(), 1);
        assert!(!explosion.is_completed());
    }

    #[test]
    fn dead_particles_are_never_drawn() {
        let mut explosion = with_speeds(&[4.0, 1.0]);
        explosion.render().unwrap();
        assert_eq!(explosion.target.fills(), 2);

        explosion.target.reset();
        explosion.step(0.25);
        explosion.render().unwrap();
        assert_eq!(explosion.target.fills(), 1);
        assert_eq!(explosion.target.count(&Call::Scale(0.75)), 1);
        assert_eq!(explosion.target.count(&Call::Scale(0.0)), 0);
    }

    #[test]
    fn render_propagates_target_errors() {
        let explosion = with_speeds(&[1.0]);
        explosion.target.fail_circles(true);
        assert!(explosion.render().is_err());
        assert_eq!(explosion.target.count(&Call::Restore), 1);
    }
}

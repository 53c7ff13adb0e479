// Owns every live explosion on one draw target and runs the frame tick:
// step everything, evict what finished, then draw what's left.

use crate::color::Color;
use crate::config::{BurstConfig, FIXED_TIMESTEP};
use crate::draw::DrawTarget;
use crate::explosion::Explosion;
use rand::Rng;
use vecmath::Vector2;

/// Counters for one frame tick, taken after eviction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub explosions: usize,
    pub particles: usize,
    pub evicted: usize,
}

pub struct Simulation<T: DrawTarget + Clone> {
    target: T,
    explosions: Vec<Explosion<T>>,
    config: BurstConfig,
    pub clear_each_frame: bool,
}

impl<T: DrawTarget + Clone> Simulation<T> {
    pub fn new(target: T) -> Simulation<T> {
        Simulation::with_config(target, BurstConfig::default())
    }

    pub fn with_config(target: T, config: BurstConfig) -> Simulation<T> {
        Simulation {
            target,
            explosions: Vec::new(),
            config,
            clear_each_frame: false,
        }
    }

    pub fn config(&self) -> &BurstConfig {
        &self.config
    }

    /// Starts a new explosion at `origin`. It's first stepped on the next tick.
    pub fn spawn<R: Rng>(
        &mut self,
        origin: Vector2<f64>,
        colors: &[Color],
        max_radius: f64,
        rng: &mut R,
    ) {
        let explosion = Explosion::new(
            origin,
            colors,
            max_radius,
            self.target.clone(),
            &self.config,
            rng,
        );
        self.explosions.push(explosion);
    }

    /// Runs one frame. The step is always `FIXED_TIMESTEP`, however late the
    /// tick was actually called.
    pub fn tick(&mut self) -> Result<FrameStats, T::Error> {
        let mut finished = Vec::new();
        for (idx, explosion) in self.explosions.iter_mut().enumerate() {
            explosion.step(FIXED_TIMESTEP);
            if explosion.is_completed() {
                finished.push(idx);
            }
        }

        // Evict back to front so earlier indices stay valid
        for idx in finished.iter().rev() {
            self.explosions.remove(*idx);
        }

        if self.clear_each_frame {
            self.target.clear();
        }
        for explosion in &self.explosions {
            explosion.render()?;
        }

        Ok(FrameStats {
            explosions: self.explosions.len(),
            particles: self.particle_count(),
            evicted: finished.len(),
        })
    }

    pub fn explosions(&self) -> &[Explosion<T>] {
        &self.explosions
    }

    pub fn explosion_count(&self) -> usize {
        self.explosions.len()
    }

    pub fn particle_count(&self) -> usize {
        self.explosions.iter().map(|e| e.len()).sum()
    }
}

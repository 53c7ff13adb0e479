// Burst tuning values and the fixed simulation timestep

use std::f64::consts::PI;
use std::ops::Range;

pub const FRAME_HZ: f64 = 60.0;

// The step is always the nominal frame duration, never the measured one
pub const FIXED_TIMESTEP: f64 = 1.0 / FRAME_HZ;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AngleSpacing {
    Exact,
    // Whole-degree steps of round(360 / n) while below 360, like the first
    // JS version of the effect. For 7 particles that's 8 of them, 0 to 357.
    RoundedDegrees,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BurstConfig {
    pub particles_per_color: u32,
    pub min_radius: f64,
    pub speed: Range<f64>,
    pub scale_speed: Range<f64>,
    pub spacing: AngleSpacing,
}

impl Default for BurstConfig {
    fn default() -> Self {
        BurstConfig {
            particles_per_color: 7,
            min_radius: 1.0,
            speed: 60.0..100.0,
            scale_speed: 1.0..4.0,
            spacing: AngleSpacing::Exact,
        }
    }
}

impl BurstConfig {
    // Radians, one per particle of a single color
    pub fn burst_angles(&self) -> Vec<f64> {
        let n = self.particles_per_color;
        if n == 0 {
            return Vec::new();
        }
        match self.spacing {
            AngleSpacing::Exact => (0..n)
                .map(|i| i as f64 * 2.0 * PI / n as f64)
                .collect(),
            AngleSpacing::RoundedDegrees => {
                let step = (360.0 / n as f64).round().max(1.0) as u32;
                (0..360)
                    .step_by(step as usize)
                    .map(|deg| deg as f64 * PI / 180.0)
                    .collect()
            }
        }
    }
}

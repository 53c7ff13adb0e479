#[macro_use]
mod utils;
pub mod color;
pub mod config;
pub mod draw;
pub mod explosion;
pub mod particle;
pub mod simulation;

use color::{Color, DEFAULT_PALETTE};
use simulation::Simulation;
use wasm_bindgen::prelude::*;
use web_sys::{console, CanvasRenderingContext2d};

// Use `wee_alloc` as the global allocator when the feature is on
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}

// Colors coming from JS are either hex strings or RRGGBBAA numbers
fn color_from_js(value: &JsValue) -> Result<Color, JsValue> {
    if let Some(hex) = value.as_string() {
        return Color::from_hex(&hex)
            .ok_or_else(|| JsValue::from_str(&format!("invalid color '{}'", hex)));
    }
    match value.as_f64() {
        Some(num) if num >= 0.0 && num <= u32::MAX as f64 && num.fract() == 0.0 => {
            Ok(Color::from_u32(num as u32))
        }
        _ => Err(JsValue::from_str(&format!("invalid color {:?}", value))),
    }
}

fn check_radius(max_radius: f64) -> Result<(), JsValue> {
    if max_radius.is_finite() && max_radius > 0.0 {
        Ok(())
    } else {
        Err(JsValue::from_str(&format!(
            "max_radius must be finite and > 0, got {}",
            max_radius
        )))
    }
}

/// Explosions drawn onto a canvas 2d context. The page owns the canvas,
/// forwards pointer events to `spawn` and calls `tick` 60 times a second.
#[wasm_bindgen]
pub struct ExplosionCanvas {
    sim: Simulation<CanvasRenderingContext2d>,
    profiling: bool,
}

#[wasm_bindgen]
impl ExplosionCanvas {
    pub fn new(context: CanvasRenderingContext2d) -> ExplosionCanvas {
        ExplosionCanvas {
            sim: Simulation::new(context),
            profiling: false,
        }
    }

    pub fn spawn(
        &mut self,
        x: f64,
        y: f64,
        colors: js_sys::Array,
        max_radius: f64,
    ) -> Result<(), JsValue> {
        check_radius(max_radius)?;
        let colors = colors
            .iter()
            .map(|value| color_from_js(&value))
            .collect::<Result<Vec<Color>, JsValue>>()?;
        self.spawn_colors(x, y, &colors, max_radius);
        Ok(())
    }

    pub fn spawn_default(&mut self, x: f64, y: f64, max_radius: f64) -> Result<(), JsValue> {
        check_radius(max_radius)?;
        self.spawn_colors(x, y, &DEFAULT_PALETTE, max_radius);
        Ok(())
    }

    pub fn tick(&mut self) -> Result<(), JsValue> {
        let _timer = if self.profiling {
            Some(Timer::new("ExplosionCanvas::tick"))
        } else {
            None
        };
        let stats = self.sim.tick()?;
        if self.profiling && stats.evicted > 0 {
            console_log!(
                "evicted {} explosion(s), {} left with {} particles",
                stats.evicted,
                stats.explosions,
                stats.particles
            );
        }
        Ok(())
    }

    pub fn set_clear_each_frame(&mut self, clear: bool) {
        self.sim.clear_each_frame = clear;
    }

    pub fn set_profiling(&mut self, profiling: bool) {
        self.profiling = profiling;
    }

    pub fn explosion_count(&self) -> u32 {
        self.sim.explosion_count() as u32
    }

    pub fn particle_count(&self) -> u32 {
        self.sim.particle_count() as u32
    }
}

impl ExplosionCanvas {
    fn spawn_colors(&mut self, x: f64, y: f64, colors: &[Color], max_radius: f64) {
        let mut rng = rand::thread_rng();
        self.sim.spawn([x, y], colors, max_radius, &mut rng);
        if self.profiling {
            console_log!(
                "spawned explosion at ({}, {}) with {} colors",
                x,
                y,
                colors.len()
            );
        }
    }
}

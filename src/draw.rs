// The drawing surface explosions render onto. In the browser this is the
// 2d context of a canvas, in tests it's a recorder.

use crate::color::Color;
use std::f64::consts::PI;
use std::ops::Deref;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

/// A handle to a 2d surface with a canvas-style transform stack.
///
/// Methods take `&self` since the handle is shared between every explosion
/// drawing onto the same surface.
pub trait DrawTarget {
    type Error;

    fn save(&self);
    fn restore(&self);
    fn translate(&self, x: f64, y: f64) -> Result<(), Self::Error>;
    fn scale(&self, s: f64) -> Result<(), Self::Error>;
    fn begin_path(&self);
    /// Full circle around `(x, y)`.
    fn circle(&self, x: f64, y: f64, radius: f64) -> Result<(), Self::Error>;
    fn close_path(&self);
    fn set_fill_color(&self, color: &Color);
    fn fill(&self);
    fn clear(&self);
}

// Saves the target's state on creation and restores it when dropped,
// so an early return through `?` still leaves the transform untouched
pub struct SavedState<'a, T: DrawTarget + ?Sized> {
    target: &'a T,
}

impl<'a, T: DrawTarget + ?Sized> SavedState<'a, T> {
    pub fn new(target: &'a T) -> SavedState<'a, T> {
        target.save();
        SavedState { target }
    }
}

impl<'a, T: DrawTarget + ?Sized> Deref for SavedState<'a, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.target
    }
}

impl<'a, T: DrawTarget + ?Sized> Drop for SavedState<'a, T> {
    fn drop(&mut self) {
        self.target.restore();
    }
}

impl DrawTarget for CanvasRenderingContext2d {
    type Error = JsValue;

    fn save(&self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn translate(&self, x: f64, y: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::translate(self, x, y)
    }

    fn scale(&self, s: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::scale(self, s, s)
    }

    fn begin_path(&self) {
        CanvasRenderingContext2d::begin_path(self);
    }

    fn circle(&self, x: f64, y: f64, radius: f64) -> Result<(), JsValue> {
        self.arc_with_anticlockwise(x, y, radius, 0.0, PI * 2.0, true)
    }

    fn close_path(&self) {
        CanvasRenderingContext2d::close_path(self);
    }

    #[allow(deprecated)]
    fn set_fill_color(&self, color: &Color) {
        self.set_fill_style(&JsValue::from_str(&color.to_css()));
    }

    fn fill(&self) {
        CanvasRenderingContext2d::fill(self);
    }

    fn clear(&self) {
        if let Some(canvas) = self.canvas() {
            self.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
        }
    }
}

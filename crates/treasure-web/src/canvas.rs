#![forbid(unsafe_code)]

//! [`Surface`] over a 2D canvas context.

use std::f64::consts::TAU;

use treasure_core::{Rgba, Surface};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::MountError;
use crate::wasm::report;

pub(crate) struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub(crate) fn new(canvas: HtmlCanvasElement) -> Result<Self, MountError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(MountError::NoContext2d)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| MountError::NoContext2d)?;
        Ok(Self { canvas, ctx })
    }

    /// Match the backing store to the viewport. Returns the new size.
    pub(crate) fn resize_to(&self, width: f64, height: f64) -> (f64, f64) {
        let w = width.max(0.0) as u32;
        let h = height.max(0.0) as u32;
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        (f64::from(w), f64::from(h))
    }

    pub(crate) fn size(&self) -> (f64, f64) {
        (
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        )
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba) {
        self.ctx.begin_path();
        if let Err(err) = self.ctx.arc(x, y, radius, 0.0, TAU) {
            report(&err);
            return;
        }
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Rgba) {
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width);
        self.ctx.move_to(from.0, from.1);
        self.ctx.line_to(to.0, to.1);
        self.ctx.stroke();
    }
}

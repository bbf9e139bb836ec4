//! `Surface` implementation backed by a 2D canvas.

use std::f64::consts::PI;

use fcst_core::particles::{Color, RadialGradient, Surface};
use fcst_core::{DashboardError, Result};
use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement};

use crate::js_error;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(js_error)?
            .ok_or_else(|| DashboardError::Browser("no 2d context".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| DashboardError::Browser("2d context cast failed".to_string()))?;
        Ok(Self { canvas, ctx })
    }

    /// Look up a `<canvas>` by id.
    pub fn from_element_id(id: &str) -> Result<Self> {
        let canvas = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|doc| doc.get_element_by_id(id))
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .ok_or_else(|| DashboardError::MissingElement(id.to_string()))?;
        Self::new(canvas)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn gradient(&self, g: &RadialGradient) -> Option<CanvasGradient> {
        let built = self
            .ctx
            .create_radial_gradient(g.x, g.y, 0.0, g.x, g.y, g.radius)
            .and_then(|grad| {
                grad.add_color_stop(0.0, &g.inner.to_string())?;
                grad.add_color_stop(1.0, &g.outer.to_string())?;
                Ok(grad)
            });
        match built {
            Ok(grad) => Some(grad),
            Err(e) => {
                warn!("radial gradient failed: {:?}", e);
                None
            }
        }
    }

    fn circle(&self, x: f64, y: f64, radius: f64) -> bool {
        self.ctx.begin_path();
        self.ctx.arc(x, y, radius.max(0.0), 0.0, PI * 2.0).is_ok()
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
    }

    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_rect_gradient(&mut self, x: f64, y: f64, width: f64, height: f64, gradient: &RadialGradient) {
        if let Some(grad) = self.gradient(gradient) {
            self.ctx.set_fill_style_canvas_gradient(&grad);
            self.ctx.fill_rect(x, y, width, height);
        }
    }

    fn fill_circle_gradient(&mut self, x: f64, y: f64, radius: f64, gradient: &RadialGradient) {
        if let Some(grad) = self.gradient(gradient) {
            self.ctx.set_fill_style_canvas_gradient(&grad);
            if self.circle(x, y, radius) {
                self.ctx.fill();
            }
        }
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
        self.ctx.set_fill_style_str(&color.to_string());
        if self.circle(x, y, radius) {
            self.ctx.fill();
        }
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64) {
        self.ctx.set_line_width(width);
        self.ctx.set_stroke_style_str(&color.to_string());
        self.ctx.begin_path();
        self.ctx.move_to(from.0, from.1);
        self.ctx.line_to(to.0, to.1);
        self.ctx.stroke();
    }
}

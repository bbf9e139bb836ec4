//! Drawing surface abstraction for the particle background.

use std::fmt;

/// A CSS color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    Rgba(u8, u8, u8, f64),
    /// Hue in degrees, saturation and lightness in percent.
    Hsla(f64, f64, f64, f64),
}

impl Color {
    pub const TRANSPARENT: Color = Color::Rgba(0, 0, 0, 0.0);

    pub fn alpha(&self) -> f64 {
        match *self {
            Color::Rgba(_, _, _, a) | Color::Hsla(_, _, _, a) => a,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Color::Rgba(r, g, b, a) => write!(f, "rgba({}, {}, {}, {})", r, g, b, a),
            Color::Hsla(h, s, l, a) => write!(f, "hsla({}, {}%, {}%, {})", h, s, l, a),
        }
    }
}

/// A two-stop radial gradient from `inner` at the center to `outer` at `radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGradient {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub inner: Color,
    pub outer: Color,
}

/// The 2D drawing operations the particle field needs.
///
/// Implemented by the browser canvas; tests use a recording surface.
pub trait Surface {
    /// Set the pixel dimensions of the surface.
    fn resize(&mut self, width: f64, height: f64);
    fn clear(&mut self, width: f64, height: f64);
    fn fill_rect_gradient(&mut self, x: f64, y: f64, width: f64, height: f64, gradient: &RadialGradient);
    fn fill_circle_gradient(&mut self, x: f64, y: f64, radius: f64, gradient: &RadialGradient);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color);
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64);
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_strings() {
        assert_eq!(Color::Rgba(0, 198, 255, 0.25).to_string(), "rgba(0, 198, 255, 0.25)");
        assert_eq!(Color::Hsla(200.5, 90.0, 60.0, 0.9).to_string(), "hsla(200.5, 90%, 60%, 0.9)");
        assert_eq!(Color::TRANSPARENT.to_string(), "rgba(0, 0, 0, 0)");
    }
}

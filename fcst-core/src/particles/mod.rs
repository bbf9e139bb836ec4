//! Decorative particle background.
//!
//! A fixed set of particles drifts across the viewport, wraps at the edges,
//! is gently pulled toward the pointer and is linked to close neighbours by
//! faint lines. Everything here is pure state and math; the browser side
//! provides a [`Surface`] and calls [`ParticleField::frame`] once per
//! animation frame.

mod field;
mod pulse;
mod surface;

pub use field::{Link, Particle, ParticleField};
pub use pulse::{ease_in_out_sine, PulseConfig, PulseTimeline};
pub use surface::{Color, RadialGradient, Surface};

#[cfg(test)]
pub(crate) use surface::recording;

use serde::{Deserialize, Serialize};

/// Tunables of the particle field. Defaults reproduce the dashboard's hero
/// background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of particles, constant for the life of the field.
    pub count: usize,
    pub min_radius: f64,
    /// Random extra radius added to `min_radius`.
    pub radius_span: f64,
    /// Initial velocity per axis is uniform in `[-max_speed / 2, max_speed / 2)`.
    pub max_speed: f64,
    pub hue_base: f64,
    pub hue_span: f64,
    /// Particles closer than this are linked.
    pub link_distance: f64,
    /// Opacity of a link between coincident particles.
    pub link_opacity: f64,
    pub link_width: f64,
    pub attraction_radius: f64,
    pub attraction_strength: f64,
    /// How far past an edge a particle may travel before wrapping.
    pub wrap_margin: f64,
    /// Glow radius as a multiple of the particle radius.
    pub glow_scale: f64,
    /// Opacity of the vignette at the surface edge.
    pub vignette_opacity: f64,
    pub pulse: PulseConfig,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: 90,
            min_radius: 0.6,
            radius_span: 3.2,
            max_speed: 0.6,
            hue_base: 195.0,
            hue_span: 40.0,
            link_distance: 140.0,
            link_opacity: 0.25,
            link_width: 1.0,
            attraction_radius: 180.0,
            attraction_strength: 0.02,
            wrap_margin: 10.0,
            glow_scale: 4.0,
            vignette_opacity: 0.35,
            pulse: PulseConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: FieldConfig =
            serde_json::from_str(r#"{"count": 12, "pulse": {"duration_ms": 500}}"#).unwrap();
        assert_eq!(config.count, 12);
        assert_eq!(config.link_distance, 140.0);
        assert_eq!(config.pulse.duration_ms, 500.0);
        assert_eq!(config.pulse.stagger_ms, 12.0);
    }
}

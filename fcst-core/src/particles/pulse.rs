//! Looping radius pulse applied when particles are drawn.
//!
//! Each particle swells from its base radius to `base * peak` over one
//! cycle, shrinks back over the next, and repeats forever. Particles start
//! one `stagger_ms` apart so the pulses are not synchronized.

use std::f64::consts::PI;

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    pub duration_ms: f64,
    pub min_factor: f64,
    pub factor_span: f64,
    pub stagger_ms: f64,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000.0,
            min_factor: 1.05,
            factor_span: 0.2,
            stagger_ms: 12.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PulseTrack {
    peak: f64,
    delay_ms: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PulseTimeline {
    duration_ms: f64,
    tracks: Vec<PulseTrack>,
}

/// `easeInOutSine` on `t` in `[0, 1]`.
pub fn ease_in_out_sine(t: f64) -> f64 {
    -((PI * t).cos() - 1.0) / 2.0
}

impl PulseTimeline {
    pub fn new<R: Rng + ?Sized>(count: usize, config: &PulseConfig, rng: &mut R) -> Self {
        let tracks = (0..count)
            .map(|i| PulseTrack {
                peak: config.min_factor + rng.gen::<f64>() * config.factor_span,
                delay_ms: i as f64 * config.stagger_ms,
            })
            .collect();
        Self {
            duration_ms: config.duration_ms,
            tracks,
        }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Peak factor of one particle.
    pub fn peak(&self, index: usize) -> Option<f64> {
        self.tracks.get(index).map(|t| t.peak)
    }

    /// Radius multiplier of particle `index` at `elapsed_ms` since the
    /// timeline started. Unknown indices are not pulsed.
    pub fn factor_at(&self, index: usize, elapsed_ms: f64) -> f64 {
        let Some(track) = self.tracks.get(index) else {
            return 1.0;
        };
        let local = elapsed_ms - track.delay_ms;
        if local <= 0.0 || self.duration_ms <= 0.0 {
            return 1.0;
        }

        let cycle = (local / self.duration_ms).floor() as u64;
        let phase = (local % self.duration_ms) / self.duration_ms;
        // alternate: even cycles run forward, odd cycles run backward
        let progress = if cycle % 2 == 0 { phase } else { 1.0 - phase };

        1.0 + (track.peak - 1.0) * ease_in_out_sine(progress)
    }

    /// Rendered radius for a particle with the given base radius.
    pub fn radius_at(&self, index: usize, base: f64, elapsed_ms: f64) -> f64 {
        base * self.factor_at(index, elapsed_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn timeline() -> PulseTimeline {
        let mut rng = StdRng::seed_from_u64(7);
        PulseTimeline::new(90, &PulseConfig::default(), &mut rng)
    }

    #[test]
    fn test_peaks_within_band() {
        let tl = timeline();
        assert_eq!(tl.len(), 90);
        for i in 0..tl.len() {
            let peak = tl.peak(i).unwrap();
            assert!((1.05..1.25).contains(&peak), "peak {} out of band", peak);
        }
    }

    #[test]
    fn test_stagger_delays_first_cycle() {
        let tl = timeline();
        // particle 10 starts 120ms in
        assert_eq!(tl.factor_at(10, 100.0), 1.0);
        assert!(tl.factor_at(10, 500.0) > 1.0);
        assert!(tl.factor_at(0, 500.0) > 1.0);
    }

    #[test]
    fn test_alternates_and_loops() {
        let tl = timeline();
        let peak = tl.peak(0).unwrap();
        assert!((tl.factor_at(0, 2000.0) - peak).abs() < 1e-9);
        assert!((tl.factor_at(0, 1000.0) - (1.0 + (peak - 1.0) / 2.0)).abs() < 1e-9);
        assert!((tl.factor_at(0, 4000.0) - 1.0).abs() < 1e-9);
        assert!((tl.factor_at(0, 6000.0) - peak).abs() < 1e-9);
        // backward half mirrors the forward half
        assert!((tl.factor_at(0, 2500.0) - tl.factor_at(0, 1500.0)).abs() < 1e-9);
    }

    #[test]
    fn test_factor_bounds_over_time() {
        let tl = timeline();
        let mut t = 0.0;
        while t < 10_000.0 {
            for i in 0..tl.len() {
                let f = tl.factor_at(i, t);
                assert!(f >= 1.0 && f <= 1.25);
            }
            t += 37.0;
        }
        assert_eq!(tl.factor_at(500, 1000.0), 1.0);
    }

    #[test]
    fn test_ease_endpoints() {
        assert!(ease_in_out_sine(0.0).abs() < 1e-12);
        assert!((ease_in_out_sine(0.5) - 0.5).abs() < 1e-12);
        assert!((ease_in_out_sine(1.0) - 1.0).abs() < 1e-12);
    }
}

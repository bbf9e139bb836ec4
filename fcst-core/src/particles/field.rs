use rand::Rng;

use super::{Color, FieldConfig, PulseTimeline, RadialGradient, Surface};

/// Link color; the alpha channel comes from the link distance.
const LINK_RGB: (u8, u8, u8) = (0, 198, 255);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Base radius, fixed at creation. The drawn radius is pulsed around it.
    pub radius: f64,
    pub hue: f64,
}

impl Particle {
    fn random<R: Rng + ?Sized>(config: &FieldConfig, width: f64, height: f64, rng: &mut R) -> Self {
        Self {
            x: rng.gen::<f64>() * width,
            y: rng.gen::<f64>() * height,
            vx: (rng.gen::<f64>() - 0.5) * config.max_speed,
            vy: (rng.gen::<f64>() - 0.5) * config.max_speed,
            radius: rng.gen::<f64>() * config.radius_span + config.min_radius,
            hue: config.hue_base + rng.gen::<f64>() * config.hue_span,
        }
    }

    pub fn distance_to(&self, other: &Particle) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Nudge the velocity toward `(px, py)` when within `radius`.
    fn attract(&mut self, px: f64, py: f64, radius: f64, strength: f64) {
        let dx = px - self.x;
        let dy = py - self.y;
        let d = dx.hypot(dy);
        if d < radius && d > 0.0 {
            self.vx += dx / d * strength;
            self.vy += dy / d * strength;
        }
    }

    fn advance(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
    }

    fn wrap(&mut self, width: f64, height: f64, margin: f64) {
        if self.x < -margin {
            self.x = width + margin;
        }
        if self.x > width + margin {
            self.x = -margin;
        }
        if self.y < -margin {
            self.y = height + margin;
        }
        if self.y > height + margin {
            self.y = -margin;
        }
    }
}

/// A line between two particles closer than the link distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
    pub alpha: f64,
}

/// The particle field and everything that drives it: viewport, pointer and
/// pulse timeline.
#[derive(Debug, Clone)]
pub struct ParticleField {
    config: FieldConfig,
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    pointer: Option<(f64, f64)>,
    pulse: PulseTimeline,
    frames: u64,
}

impl ParticleField {
    /// Scatter `config.count` particles uniformly over a `width` x `height`
    /// viewport.
    pub fn new<R: Rng + ?Sized>(config: FieldConfig, width: f64, height: f64, rng: &mut R) -> Self {
        let particles = (0..config.count)
            .map(|_| Particle::random(&config, width, height, rng))
            .collect();
        Self::with_particles(config, width, height, particles, rng)
    }

    /// Build a field from explicit particles. `config.count` is ignored.
    pub fn with_particles<R: Rng + ?Sized>(
        config: FieldConfig,
        width: f64,
        height: f64,
        particles: Vec<Particle>,
        rng: &mut R,
    ) -> Self {
        let pulse = PulseTimeline::new(particles.len(), &config.pulse, rng);
        Self {
            config,
            width,
            height,
            particles,
            pointer: None,
            pulse,
            frames: 0,
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
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

    pub fn viewport(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn pulse(&self) -> &PulseTimeline {
        &self.pulse
    }

    /// Frames drawn so far; zero until the loop is running.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Fit the field and its surface to a new viewport.
    ///
    /// Particle positions are left alone; anything now outside the viewport
    /// wraps back in on the next step.
    pub fn resize<S: Surface + ?Sized>(&mut self, surface: &mut S, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        surface.resize(width, height);
    }

    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer = Some((x, y));
    }

    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    pub fn pointer(&self) -> Option<(f64, f64)> {
        self.pointer
    }

    /// Advance the physics by one frame: pointer attraction, motion and
    /// wrap-around.
    pub fn step(&mut self) {
        let (width, height) = (self.width, self.height);
        let margin = self.config.wrap_margin;
        let radius = self.config.attraction_radius;
        let strength = self.config.attraction_strength;

        for p in &mut self.particles {
            if let Some((px, py)) = self.pointer {
                p.attract(px, py, radius, strength);
            }
            p.advance();
            p.wrap(width, height, margin);
        }
    }

    /// Opacity of a link at distance `d`, or `None` when too far apart.
    pub fn link_alpha(&self, d: f64) -> Option<f64> {
        let max = self.config.link_distance;
        (d < max).then(|| (1.0 - d / max) * self.config.link_opacity)
    }

    /// Every unique pair closer than the link distance.
    pub fn links(&self) -> Vec<Link> {
        let mut links = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            for (j, b) in self.particles.iter().enumerate().skip(i + 1) {
                let distance = a.distance_to(b);
                if let Some(alpha) = self.link_alpha(distance) {
                    links.push(Link {
                        a: i,
                        b: j,
                        distance,
                        alpha,
                    });
                }
            }
        }
        links
    }

    fn vignette(&self) -> RadialGradient {
        RadialGradient {
            x: self.width * 0.5,
            y: self.height * 0.5,
            radius: self.width.max(self.height) * 0.8,
            inner: Color::TRANSPARENT,
            outer: Color::Rgba(0, 0, 0, self.config.vignette_opacity),
        }
    }

    /// Update and draw one frame. `elapsed_ms` is the time since the loop
    /// started and drives the radius pulse.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S, elapsed_ms: f64) {
        let (width, height) = (self.width, self.height);
        surface.clear(width, height);
        surface.fill_rect_gradient(0.0, 0.0, width, height, &self.vignette());

        self.step();

        for (i, p) in self.particles.iter().enumerate() {
            let r = self.pulse.radius_at(i, p.radius, elapsed_ms);
            let glow_radius = r * self.config.glow_scale;
            let glow = RadialGradient {
                x: p.x,
                y: p.y,
                radius: glow_radius,
                inner: Color::Hsla(p.hue, 90.0, 60.0, 0.9),
                outer: Color::TRANSPARENT,
            };
            surface.fill_circle_gradient(p.x, p.y, glow_radius, &glow);
            surface.fill_circle(p.x, p.y, r, Color::Hsla(p.hue, 90.0, 70.0, 0.95));
        }

        let (r, g, b) = LINK_RGB;
        for link in self.links() {
            let a = &self.particles[link.a];
            let z = &self.particles[link.b];
            surface.stroke_line(
                (a.x, a.y),
                (z.x, z.y),
                Color::Rgba(r, g, b, link.alpha),
                self.config.link_width,
            );
        }

        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::recording::{DrawOp, RecordingSurface};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn still(x: f64, y: f64) -> Particle {
        Particle {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            radius: 2.0,
            hue: 200.0,
        }
    }

    fn field_of(particles: Vec<Particle>) -> ParticleField {
        ParticleField::with_particles(FieldConfig::default(), 800.0, 600.0, particles, &mut rng())
    }

    #[test]
    fn test_initial_particles() {
        let field = ParticleField::new(FieldConfig::default(), 1280.0, 720.0, &mut rng());
        assert_eq!(field.len(), 90);
        assert_eq!(field.frame_count(), 0);
        for p in field.particles() {
            assert!(p.x >= 0.0 && p.x < 1280.0);
            assert!(p.y >= 0.0 && p.y < 720.0);
            assert!(p.vx >= -0.3 && p.vx < 0.3);
            assert!(p.vy >= -0.3 && p.vy < 0.3);
            assert!(p.radius >= 0.6 && p.radius < 3.8);
            assert!(p.hue >= 195.0 && p.hue < 235.0);
        }
    }

    #[test]
    fn test_count_and_bounds_hold_over_many_frames() {
        let mut field = ParticleField::new(FieldConfig::default(), 640.0, 480.0, &mut rng());
        let mut surface = RecordingSurface::default();
        field.set_pointer(320.0, 240.0);

        for frame in 0..2000 {
            if frame == 700 {
                field.resize(&mut surface, 300.0, 200.0);
            }
            if frame == 1500 {
                field.clear_pointer();
            }
            field.frame(&mut surface, frame as f64 * 16.0);
            surface.ops.clear();

            let (w, h) = field.viewport();
            assert_eq!(field.len(), 90);
            for p in field.particles() {
                assert!(p.x >= -10.0 && p.x <= w + 10.0, "x {} outside", p.x);
                assert!(p.y >= -10.0 && p.y <= h + 10.0, "y {} outside", p.y);
            }
        }
        assert_eq!(field.frame_count(), 2000);
    }

    #[test]
    fn test_resize_sets_surface_dimensions() {
        let mut field = field_of(vec![still(700.0, 500.0)]);
        let mut surface = RecordingSurface::default();
        field.resize(&mut surface, 1024.0, 768.0);
        assert_eq!((surface.width, surface.height), (1024.0, 768.0));
        assert_eq!(field.viewport(), (1024.0, 768.0));

        // positions are not rescaled
        field.resize(&mut surface, 100.0, 100.0);
        assert_eq!(field.particles()[0].x, 700.0);
        field.step();
        assert_eq!(field.particles()[0].x, -10.0);
        assert_eq!(field.particles()[0].y, -10.0);
    }

    #[test]
    fn test_wrap_to_opposite_edge() {
        let mut p = still(-9.0, 300.0);
        p.vx = -1.5;
        let mut field = field_of(vec![p]);
        field.step();
        assert_eq!(field.particles()[0].x, 810.0);

        let mut p = still(400.0, 609.5);
        p.vy = 1.0;
        let mut field = field_of(vec![p]);
        field.step();
        assert_eq!(field.particles()[0].y, -10.0);
    }

    #[test]
    fn test_pointer_attraction() {
        let mut field = field_of(vec![still(100.0, 100.0), still(400.0, 100.0)]);
        field.set_pointer(200.0, 100.0);
        field.step();

        let near = field.particles()[0];
        assert!((near.vx - 0.02).abs() < 1e-12);
        assert_eq!(near.vy, 0.0);
        assert!((near.x - 100.02).abs() < 1e-12);

        // 200 units away: outside the attraction radius
        let far = field.particles()[1];
        assert_eq!(far.vx, 0.0);

        field.clear_pointer();
        field.step();
        assert!((field.particles()[0].vx - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_pointer_on_particle_does_not_nudge() {
        let mut field = field_of(vec![still(50.0, 50.0)]);
        field.set_pointer(50.0, 50.0);
        field.step();
        let p = field.particles()[0];
        assert_eq!((p.vx, p.vy), (0.0, 0.0));
        assert!(!p.x.is_nan());
    }

    #[test]
    fn test_link_alpha() {
        let field = field_of(Vec::new());
        assert_eq!(field.link_alpha(140.0), None);
        assert_eq!(field.link_alpha(200.0), None);
        assert_eq!(field.link_alpha(0.0), Some(0.25));
        assert!((field.link_alpha(70.0).unwrap() - 0.125).abs() < 1e-12);
    }

    #[test]
    fn test_links_between_close_pairs_only() {
        let field = field_of(vec![
            still(100.0, 100.0),
            still(170.0, 100.0),
            still(100.0, 240.0),
        ]);
        let links = field.links();
        // 0-1 at 70, 0-2 at exactly 140 (not linked), 1-2 at ~156.5
        assert_eq!(links.len(), 1);
        assert_eq!((links[0].a, links[0].b), (0, 1));
        assert!((links[0].alpha - 0.125).abs() < 1e-12);
    }

    #[test]
    fn test_frame_draw_order() {
        let mut field = field_of(vec![still(100.0, 100.0), still(130.0, 140.0)]);
        let mut surface = RecordingSurface::default();
        field.frame(&mut surface, 0.0);

        assert_eq!(surface.ops[0], DrawOp::Clear);
        match &surface.ops[1] {
            DrawOp::Vignette(g) => {
                assert_eq!((g.x, g.y), (400.0, 300.0));
                assert!((g.radius - 640.0).abs() < 1e-9);
                assert_eq!(g.outer, Color::Rgba(0, 0, 0, 0.35));
            }
            other => panic!("expected vignette, got {:?}", other),
        }
        assert_eq!(
            surface.ops[2],
            DrawOp::Glow {
                x: 100.0,
                y: 100.0,
                radius: 8.0
            }
        );
        assert_eq!(surface.dots().len(), 2);

        let lines = surface.lines();
        assert_eq!(lines.len(), 1);
        match lines[0] {
            DrawOp::Line { from, to, color } => {
                assert_eq!(*from, (100.0, 100.0));
                assert_eq!(*to, (130.0, 140.0));
                assert_eq!(*color, Color::Rgba(0, 198, 255, (1.0 - 50.0 / 140.0) * 0.25));
            }
            other => panic!("expected line, got {:?}", other),
        }
    }
}

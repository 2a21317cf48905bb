#![deny(unsafe_code)]
//! Ambient drifting-particle field.
//!
//! A few dozen small dots drift with constant velocity and bounce off the
//! surface edges. Reflection flips the velocity component without clamping
//! the position, so a particle may sit up to one step outside the surface for
//! a single frame before the flipped velocity carries it back in.
//!
//! The layer is transparent: each frame clears the surface and draws opaque
//! circles, letting the page show through between particles.

use backdrop_core::error::BackdropError;
use backdrop_core::params::{param_f64, param_palette, param_usize};
use backdrop_core::{Animation, Palette, Size, Srgb, Surface, Xorshift64};
use glam::{BVec2, DVec2};
use serde_json::{json, Value};

/// Default number of particles.
const DEFAULT_COUNT: usize = 30;
/// Largest count accepted from JSON params.
const MAX_COUNT: usize = 1000;
/// Default bound on each velocity component, in pixels per frame.
const DEFAULT_MAX_SPEED: f64 = 1.0;
/// Default smallest radius (inclusive).
const DEFAULT_MIN_RADIUS: f64 = 1.0;
/// Default largest radius (exclusive).
const DEFAULT_MAX_RADIUS: f64 = 3.0;
/// Default palette name.
const DEFAULT_PALETTE: &str = "particles";

/// Tunables for a [`ParticleField`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleParams {
    /// Particles created by `init` through [`ParticleField::new`].
    pub count: usize,
    /// Velocity components are drawn from [-max_speed, max_speed).
    pub max_speed: f64,
    /// Radii are drawn from [min_radius, max_radius).
    pub min_radius: f64,
    pub max_radius: f64,
}

impl Default for ParticleParams {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            max_speed: DEFAULT_MAX_SPEED,
            min_radius: DEFAULT_MIN_RADIUS,
            max_radius: DEFAULT_MAX_RADIUS,
        }
    }
}

impl ParticleParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            count: param_usize(params, "count", DEFAULT_COUNT).min(MAX_COUNT),
            max_speed: param_f64(params, "max_speed", DEFAULT_MAX_SPEED).abs(),
            min_radius: param_f64(params, "min_radius", DEFAULT_MIN_RADIUS).max(0.0),
            max_radius: param_f64(params, "max_radius", DEFAULT_MAX_RADIUS).max(0.0),
        }
    }
}

/// One drifting dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: DVec2,
    pub velocity: DVec2,
    pub radius: f64,
    pub color: Srgb,
}

impl Particle {
    pub fn new(position: DVec2, velocity: DVec2, radius: f64, color: Srgb) -> Self {
        Self {
            position,
            velocity,
            radius,
            color,
        }
    }

    /// Moves one step, then reflects each axis whose new coordinate left
    /// [0, extent]. Returns the axes that reflected.
    pub fn step(&mut self, size: Size) -> BVec2 {
        self.position += self.velocity;
        let outside = BVec2::new(
            self.position.x < 0.0 || self.position.x > size.width,
            self.position.y < 0.0 || self.position.y > size.height,
        );
        if outside.x {
            self.velocity.x = -self.velocity.x;
        }
        if outside.y {
            self.velocity.y = -self.velocity.y;
        }
        outside
    }
}

/// Ambient particle field.
pub struct ParticleField {
    particles: Vec<Particle>,
    params: ParticleParams,
    palette: Palette,
    rng: Xorshift64,
}

impl ParticleField {
    /// Creates a field of `params.count` particles with the default palette.
    pub fn new(size: Size, seed: u64, params: ParticleParams) -> Self {
        Self::with_palette(size, seed, params, Palette::particles())
    }

    /// Creates a field of `params.count` particles colored from `palette`.
    pub fn with_palette(size: Size, seed: u64, params: ParticleParams, palette: Palette) -> Self {
        let mut field = Self {
            particles: Vec::new(),
            params,
            palette,
            rng: Xorshift64::new(seed),
        };
        field.init(params.count, size);
        field
    }

    /// Creates a field from a JSON params object.
    ///
    /// Numeric keys fall back to defaults; a bad `palette` is an error.
    pub fn from_json(size: Size, seed: u64, json_params: &Value) -> Result<Self, BackdropError> {
        let palette = param_palette(json_params, "palette", DEFAULT_PALETTE)?;
        Ok(Self::with_palette(
            size,
            seed,
            ParticleParams::from_json(json_params),
            palette,
        ))
    }

    /// Wraps explicit particles; later `init` calls draw from `seed`.
    pub fn from_particles(particles: Vec<Particle>, seed: u64) -> Self {
        Self {
            params: ParticleParams {
                count: particles.len(),
                ..ParticleParams::default()
            },
            particles,
            palette: Palette::particles(),
            rng: Xorshift64::new(seed),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle_params(&self) -> ParticleParams {
        self.params
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}

impl Animation for ParticleField {
    fn init(&mut self, count: usize, size: Size) {
        let particles = (0..count)
            .map(|_| spawn_particle(&mut self.rng, &self.palette, &self.params, size))
            .collect();
        self.particles = particles;
        self.params.count = count;
        log::debug!(
            "particle field initialized: {count} particles over {}x{}",
            size.width,
            size.height
        );
    }

    fn update(&mut self, size: Size) {
        for particle in &mut self.particles {
            particle.step(size);
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.clear();
        for p in &self.particles {
            surface.fill_circle(p.position.x, p.position.y, p.radius, p.color.opaque());
        }
    }

    fn len(&self) -> usize {
        self.particles.len()
    }

    fn params(&self) -> Value {
        json!({
            "count": self.params.count,
            "max_speed": self.params.max_speed,
            "min_radius": self.params.min_radius,
            "max_radius": self.params.max_radius,
            "palette": self.palette.colors().iter().map(|c| c.to_hex()).collect::<Vec<_>>(),
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "count": {
                "type": "integer",
                "default": DEFAULT_COUNT,
                "min": 0,
                "max": MAX_COUNT,
                "description": "Number of particles"
            },
            "max_speed": {
                "type": "number",
                "default": DEFAULT_MAX_SPEED,
                "min": 0.0,
                "max": 10.0,
                "description": "Bound on each velocity component, pixels per frame"
            },
            "min_radius": {
                "type": "number",
                "default": DEFAULT_MIN_RADIUS,
                "min": 0.0,
                "max": 20.0,
                "description": "Smallest particle radius"
            },
            "max_radius": {
                "type": "number",
                "default": DEFAULT_MAX_RADIUS,
                "min": 0.0,
                "max": 20.0,
                "description": "Largest particle radius (exclusive)"
            },
            "palette": {
                "type": "string",
                "default": DEFAULT_PALETTE,
                "options": Palette::list_names(),
                "description": "Built-in palette name, or an array of hex colors"
            }
        })
    }
}

/// Draws one particle uniformly over `size`.
fn spawn_particle(
    rng: &mut Xorshift64,
    palette: &Palette,
    params: &ParticleParams,
    size: Size,
) -> Particle {
    let position = DVec2::new(
        rng.next_range(0.0, size.width),
        rng.next_range(0.0, size.height),
    );
    let velocity = DVec2::new(
        rng.next_range(-params.max_speed, params.max_speed),
        rng.next_range(-params.max_speed, params.max_speed),
    );
    let radius = rng.next_range(params.min_radius, params.max_radius);
    Particle::new(position, velocity, radius, palette.pick(rng))
}

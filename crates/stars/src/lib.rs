#![deny(unsafe_code)]
//! Perspective "star warp" field.
//!
//! Stars live in a box of surface width × surface height × depth, with depth
//! `z` in (0, width]. Every frame each star moves `speed` closer to the
//! viewer. Once `z <= 0` it has passed the camera and is recycled in place:
//! back to `z = width` at a fresh random position and color.
//!
//! Rendering is a pinhole projection centered on the surface midpoint with
//! focal length equal to the surface width:
//!
//! ```text
//!   scale   = width / z
//!   screen  = (p - center) * scale + center
//!   radius  = scale * 1.5
//!   opacity = (width - z) / width
//! ```
//!
//! Distant stars are small and nearly transparent; close ones are large and
//! nearly opaque. The background is repainted solid each frame, so there are
//! no trails.

use backdrop_core::error::BackdropError;
use backdrop_core::params::{param_color, param_f64, param_palette, param_usize};
use backdrop_core::{Animation, Palette, Size, Srgb, Surface, Xorshift64};
use serde_json::{json, Value};

/// Default number of stars.
const DEFAULT_COUNT: usize = 250;
/// Largest count accepted from JSON params.
const MAX_COUNT: usize = 5000;
/// Default depth travelled per frame.
const DEFAULT_SPEED: f64 = 7.0;
/// Default projected radius at `z == width`.
const DEFAULT_RADIUS_SCALE: f64 = 1.5;
/// Default background, a dark navy.
const DEFAULT_BACKGROUND: Srgb = Srgb {
    r: 0x1a as f64 / 255.0,
    g: 0x1a as f64 / 255.0,
    b: 0x2e as f64 / 255.0,
};
/// Default palette name.
const DEFAULT_PALETTE: &str = "stars";

/// Tunables for a [`StarField`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarParams {
    pub count: usize,
    /// Depth travelled per frame, shared by every star.
    pub speed: f64,
    /// Multiplier on `width / z` giving the drawn radius.
    pub radius_scale: f64,
    /// Solid color painted under the stars each frame.
    pub background: Srgb,
}

impl Default for StarParams {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            speed: DEFAULT_SPEED,
            radius_scale: DEFAULT_RADIUS_SCALE,
            background: DEFAULT_BACKGROUND,
        }
    }
}

impl StarParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    ///
    /// Returns `BackdropError::InvalidColor` if `background` is present but
    /// not a hex color.
    pub fn from_json(params: &Value) -> Result<Self, BackdropError> {
        Ok(Self {
            count: param_usize(params, "count", DEFAULT_COUNT).min(MAX_COUNT),
            speed: param_f64(params, "speed", DEFAULT_SPEED).max(0.0),
            radius_scale: param_f64(params, "radius_scale", DEFAULT_RADIUS_SCALE).max(0.0),
            background: param_color(params, "background", DEFAULT_BACKGROUND)?,
        })
    }
}

/// One star in depth space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    /// Distance from the viewer. Positive while the star is in front.
    pub z: f64,
    /// Depth travelled per frame. Every star in a field carries the field's
    /// speed; it is stored per star so a recycled star keeps its own.
    pub speed: f64,
    pub color: Srgb,
}

impl Star {
    pub fn new(x: f64, y: f64, z: f64, speed: f64, color: Srgb) -> Self {
        Self {
            x,
            y,
            z,
            speed,
            color,
        }
    }
}

/// Where and how a star appears on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// In [0, 1]; below 1 whenever `0 < z <= width`.
    pub opacity: f64,
}

/// Projects a star onto a surface of `size`.
///
/// Returns `None` when `z <= 0` (or NaN): the star is at or behind the
/// viewer and `width / z` is undefined. A zero-width surface with positive
/// `z` projects to radius 0 and opacity 0.
pub fn project(star: &Star, size: Size, radius_scale: f64) -> Option<Projection> {
    if !(star.z > 0.0) {
        return None;
    }
    let scale = size.width / star.z;
    let center = size.center();
    let opacity = if size.width > 0.0 {
        ((size.width - star.z) / size.width).clamp(0.0, 1.0)
    } else {
        0.0
    };
    Some(Projection {
        x: (star.x - center.x) * scale + center.x,
        y: (star.y - center.y) * scale + center.y,
        radius: scale * radius_scale,
        opacity,
    })
}

/// Star-warp field.
pub struct StarField {
    stars: Vec<Star>,
    params: StarParams,
    palette: Palette,
    rng: Xorshift64,
    /// Size seen by the last `update`, used only to log resizes.
    last_size: Option<Size>,
}

impl StarField {
    /// Creates a field of `params.count` stars with the default palette.
    pub fn new(size: Size, seed: u64, params: StarParams) -> Self {
        Self::with_palette(size, seed, params, Palette::stars())
    }

    /// Creates a field of `params.count` stars colored from `palette`.
    pub fn with_palette(size: Size, seed: u64, params: StarParams, palette: Palette) -> Self {
        let mut field = Self {
            stars: Vec::new(),
            params,
            palette,
            rng: Xorshift64::new(seed),
            last_size: None,
        };
        field.init(params.count, size);
        field
    }

    /// Creates a field from a JSON params object.
    pub fn from_json(size: Size, seed: u64, json_params: &Value) -> Result<Self, BackdropError> {
        let params = StarParams::from_json(json_params)?;
        let palette = param_palette(json_params, "palette", DEFAULT_PALETTE)?;
        Ok(Self::with_palette(size, seed, params, palette))
    }

    /// Wraps explicit stars; recycling draws from `seed`.
    pub fn from_stars(stars: Vec<Star>, seed: u64) -> Self {
        Self {
            params: StarParams {
                count: stars.len(),
                ..StarParams::default()
            },
            stars,
            palette: Palette::stars(),
            rng: Xorshift64::new(seed),
            last_size: None,
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn star_params(&self) -> StarParams {
        self.params
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Projection of every star in front of the viewer, paired with its color.
    pub fn projections(&self, size: Size) -> impl Iterator<Item = (Projection, Srgb)> + '_ {
        let radius_scale = self.params.radius_scale;
        self.stars
            .iter()
            .filter_map(move |s| project(s, size, radius_scale).map(|p| (p, s.color)))
    }
}

impl Animation for StarField {
    fn init(&mut self, count: usize, size: Size) {
        let stars = (0..count)
            .map(|_| {
                let z = self.rng.next_upper(size.width);
                let mut star = Star::new(0.0, 0.0, z, self.params.speed, Srgb::WHITE);
                scatter(&mut star, &mut self.rng, &self.palette, size);
                star
            })
            .collect();
        self.stars = stars;
        self.params.count = count;
        log::debug!(
            "star field initialized: {count} stars over {}x{}",
            size.width,
            size.height
        );
    }

    fn update(&mut self, size: Size) {
        if self.last_size.is_some_and(|last| last != size) {
            log::debug!("star field now {}x{}", size.width, size.height);
        }
        self.last_size = Some(size);

        let mut recycled = 0usize;
        for star in &mut self.stars {
            star.z -= star.speed;
            if star.z <= 0.0 {
                star.z = size.width;
                scatter(star, &mut self.rng, &self.palette, size);
                recycled += 1;
            }
        }
        log::trace!("recycled {recycled} of {} stars", self.stars.len());
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.fill(self.params.background.opaque());
        let size = surface.size();
        for (p, color) in self.projections(size) {
            surface.fill_circle(p.x, p.y, p.radius, color.with_alpha(p.opacity));
        }
    }

    fn len(&self) -> usize {
        self.stars.len()
    }

    fn params(&self) -> Value {
        json!({
            "count": self.params.count,
            "speed": self.params.speed,
            "radius_scale": self.params.radius_scale,
            "background": self.params.background.to_hex(),
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
                "description": "Number of stars"
            },
            "speed": {
                "type": "number",
                "default": DEFAULT_SPEED,
                "min": 0.0,
                "max": 50.0,
                "description": "Depth travelled per frame"
            },
            "radius_scale": {
                "type": "number",
                "default": DEFAULT_RADIUS_SCALE,
                "min": 0.0,
                "max": 10.0,
                "description": "Projected radius multiplier"
            },
            "background": {
                "type": "string",
                "default": DEFAULT_BACKGROUND.to_hex(),
                "description": "Hex color painted under the stars every frame"
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

/// Redraws a star's position uniformly over `size` and its color from `palette`.
fn scatter(star: &mut Star, rng: &mut Xorshift64, palette: &Palette, size: Size) {
    star.x = rng.next_range(0.0, size.width);
    star.y = rng.next_range(0.0, size.height);
    star.color = palette.pick(rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use backdrop_core::raster::PixelSurface;

    const SURFACE: Size = Size::new(800.0, 600.0);

    fn field(seed: u64) -> StarField {
        StarField::new(SURFACE, seed, StarParams::default())
    }

    fn star(x: f64, y: f64, z: f64) -> Star {
        Star::new(x, y, z, DEFAULT_SPEED, Srgb::WHITE)
    }

    // ---- Construction ----

    #[test]
    fn new_creates_default_count() {
        assert_eq!(field(42).len(), 250);
    }

    #[test]
    fn spawned_stars_respect_ranges() {
        let f = field(42);
        let palette = Palette::stars();
        for s in f.stars() {
            assert!((0.0..800.0).contains(&s.x), "x = {}", s.x);
            assert!((0.0..600.0).contains(&s.y), "y = {}", s.y);
            assert!(s.z > 0.0 && s.z <= 800.0, "z = {}", s.z);
            assert_eq!(s.speed, DEFAULT_SPEED);
            assert!(palette.contains(s.color));
        }
    }

    #[test]
    fn from_json_uses_defaults_for_empty_json() {
        let f = StarField::from_json(SURFACE, 1, &json!({})).unwrap();
        assert_eq!(f.star_params(), StarParams::default());
        assert_eq!(f.palette(), &Palette::stars());
    }

    #[test]
    fn from_json_extracts_custom_values() {
        let params = json!({
            "count": 10,
            "speed": 3,
            "radius_scale": 2.0,
            "background": "#000000",
            "palette": "monochrome",
        });
        let f = StarField::from_json(SURFACE, 1, &params).unwrap();
        assert_eq!(f.len(), 10);
        assert!(f.stars().iter().all(|s| s.speed == 3.0));
        assert_eq!(f.star_params().background, Srgb::BLACK);
        assert_eq!(f.params()["radius_scale"], 2.0);
        assert!(f.stars().iter().all(|s| Palette::monochrome().contains(s.color)));
    }

    #[test]
    fn from_json_rejects_bad_background() {
        let r = StarField::from_json(SURFACE, 1, &json!({"background": "midnight"}));
        assert!(matches!(r, Err(BackdropError::InvalidColor(_))));
    }

    #[test]
    fn from_json_clamps_oversized_count() {
        let params = json!({"count": u64::MAX});
        assert_eq!(StarParams::from_json(&params).unwrap().count, MAX_COUNT);
        let f = StarField::from_json(SURFACE, 1, &params).unwrap();
        assert_eq!(f.len(), MAX_COUNT);
        assert_eq!(f.param_schema()["count"]["max"], MAX_COUNT);
    }

    #[test]
    fn from_json_clamps_negative_speed() {
        let f = StarField::from_json(SURFACE, 1, &json!({"speed": -4.0})).unwrap();
        assert_eq!(f.star_params().speed, 0.0);
    }

    #[test]
    fn param_schema_lists_every_parameter() {
        let f = field(1);
        let schema = f.param_schema();
        for key in ["count", "speed", "radius_scale", "background", "palette"] {
            assert!(schema.get(key).is_some(), "schema missing parameter: {key}");
            assert!(schema[key].get("default").is_some(), "{key} missing 'default'");
            assert!(f.params().get(key).is_some(), "params missing {key}");
        }
        assert_eq!(schema["background"]["default"], "#1a1a2e");
    }

    #[test]
    fn init_twice_gives_independent_sets_of_the_same_size() {
        let mut f = field(42);
        f.init(250, SURFACE);
        let first = f.stars().to_vec();
        f.init(250, SURFACE);
        assert_eq!(f.len(), 250);
        assert_ne!(first, f.stars());
    }

    #[test]
    fn same_seed_same_stars() {
        assert_eq!(field(9).stars(), field(9).stars());
    }

    // ---- Projection ----

    #[test]
    fn centered_star_scenario() {
        let mut f = StarField::from_stars(vec![star(400.0, 300.0, 800.0)], 1);
        f.update(SURFACE);
        let s = f.stars()[0];
        assert_eq!(s.z, 793.0);

        let p = project(&s, SURFACE, DEFAULT_RADIUS_SCALE).unwrap();
        assert_eq!(p.x, 400.0);
        assert_eq!(p.y, 300.0);
        assert!((p.radius - 800.0 / 793.0 * 1.5).abs() < 1e-12);
        assert!((p.radius - 1.513).abs() < 1e-3);
        assert!((p.opacity - 0.00875).abs() < 1e-12);
    }

    #[test]
    fn off_center_star_moves_outward_as_it_approaches() {
        let far = project(&star(600.0, 300.0, 800.0), SURFACE, 1.5).unwrap();
        let near = project(&star(600.0, 300.0, 100.0), SURFACE, 1.5).unwrap();
        assert_eq!(far.x, 600.0);
        assert_eq!(near.x, 400.0 + 200.0 * 8.0);
        assert!(near.radius > far.radius);
        assert!(near.opacity > far.opacity);
    }

    #[test]
    fn project_refuses_non_positive_depth() {
        assert!(project(&star(1.0, 1.0, 0.0), SURFACE, 1.5).is_none());
        assert!(project(&star(1.0, 1.0, -2.0), SURFACE, 1.5).is_none());
        assert!(project(&star(1.0, 1.0, f64::NAN), SURFACE, 1.5).is_none());
    }

    #[test]
    fn zero_width_projects_to_zero_radius() {
        let p = project(&star(0.0, 0.0, 5.0), Size::new(0.0, 600.0), 1.5).unwrap();
        assert_eq!(p.radius, 0.0);
        assert_eq!(p.opacity, 0.0);
    }

    #[test]
    fn star_beyond_width_after_shrink_is_transparent() {
        let p = project(&star(10.0, 10.0, 900.0), SURFACE, 1.5).unwrap();
        assert_eq!(p.opacity, 0.0);
    }

    // ---- Update / recycle ----

    #[test]
    fn star_passing_viewer_is_recycled() {
        let mut f = StarField::from_stars(vec![star(10.0, 20.0, 5.0)], 3);
        f.update(SURFACE);
        let s = f.stars()[0];
        assert_eq!(s.z, 800.0);
        assert!((0.0..800.0).contains(&s.x));
        assert!((0.0..600.0).contains(&s.y));
        assert!(Palette::stars().contains(s.color));
        assert!(project(&s, SURFACE, 1.5).is_some());
    }

    #[test]
    fn star_reaching_exactly_zero_is_recycled() {
        let mut f = StarField::from_stars(vec![star(10.0, 20.0, 7.0)], 3);
        f.update(SURFACE);
        assert_eq!(f.stars()[0].z, 800.0);
    }

    #[test]
    fn recycle_uses_current_width() {
        let mut f = StarField::from_stars(vec![star(10.0, 20.0, 1.0)], 3);
        f.update(Size::new(1024.0, 768.0));
        let s = f.stars()[0];
        assert_eq!(s.z, 1024.0);
        assert!((0.0..768.0).contains(&s.y));
    }

    #[test]
    fn zero_width_surface_never_panics_or_draws_stars() {
        let size = Size::new(0.0, 0.0);
        let mut f = StarField::new(size, 5, StarParams::default());
        let mut surface = PixelSurface::new(0, 0).unwrap();
        for _ in 0..10 {
            f.update(size);
            f.render(&mut surface);
        }
        assert_eq!(f.projections(size).count(), 0);
    }

    // ---- Render ----

    #[test]
    fn render_paints_background_first() {
        let f = StarField::from_stars(Vec::new(), 1);
        let mut surface = PixelSurface::new(4, 4).unwrap();
        f.render(&mut surface);
        assert_eq!(surface.covered_pixels(), 16);
        assert_eq!(surface.pixel(0, 0), Some([0x1a, 0x1a, 0x2e, 255]));
    }

    #[test]
    fn distant_star_is_invisible_and_near_star_is_bright() {
        let size = Size::new(100.0, 100.0);
        let f = StarField::from_stars(
            vec![star(20.0, 50.0, 100.0), star(60.0, 50.0, 1.0)],
            1,
        );
        let mut surface = PixelSurface::new(100, 100).unwrap();
        f.render(&mut surface);
        // z == width: opacity 0, only background shows.
        assert_eq!(surface.pixel(20, 50), Some([0x1a, 0x1a, 0x2e, 255]));
        // z == 1: projected to 50 + 10 * 100 = off-screen to the right.
        let near = project(&f.stars()[1], size, 1.5).unwrap();
        assert!(near.x > 100.0);
        assert!(near.opacity > 0.98);
    }

    #[test]
    fn close_centered_star_covers_its_radius() {
        let f = StarField::from_stars(vec![star(50.0, 50.0, 10.0)], 1);
        let mut surface = PixelSurface::new(100, 100).unwrap();
        f.render(&mut surface);
        // radius = 100 / 10 * 1.5 = 15, opacity 0.9
        let [r, g, b, a] = surface.pixel(50, 50).unwrap();
        assert_eq!(a, 255);
        assert!(r > 0xe0 && g > 0xe0 && b > 0xe0, "got {r} {g} {b}");
        assert_eq!(surface.pixel(50, 70), Some([0x1a, 0x1a, 0x2e, 255]));
    }

    // ---- Properties ----

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn opacity_in_unit_interval_for_depth_in_range(
                width in 1.0_f64..4000.0,
                frac in 0.0_f64..0.999,
            ) {
                // z = width * (1 - frac) lies in (0, width]
                let z = width * (1.0 - frac);
                prop_assume!(z > 0.0);
                let p = project(&star(0.0, 0.0, z), Size::new(width, width), 1.5).unwrap();
                prop_assert!(p.opacity >= 0.0 && p.opacity < 1.0, "opacity {}", p.opacity);
            }

            #[test]
            fn recycle_happens_exactly_when_depth_runs_out(
                seed: u64,
                width in 1.0_f64..2000.0,
                height in 1.0_f64..2000.0,
                speed in 0.5_f64..50.0,
            ) {
                let size = Size::new(width, height);
                let params = StarParams { count: 50, speed, ..StarParams::default() };
                let mut f = StarField::new(size, seed, params);
                for _ in 0..100 {
                    let before = f.stars().to_vec();
                    f.update(size);
                    for (old, new) in before.iter().zip(f.stars()) {
                        let expected = old.z - old.speed;
                        if expected <= 0.0 {
                            prop_assert_eq!(new.z, width);
                        } else {
                            prop_assert_eq!(new.z, expected);
                        }
                        prop_assert!(new.z > 0.0);
                    }
                    prop_assert_eq!(f.projections(size).count(), f.len());
                }
            }
        }
    }
}

//! Discrete color palettes that entities draw their color from.
//!
//! Unlike a gradient, a backdrop palette is a small fixed set: every particle
//! or star picks one entry uniformly at creation (and stars again on recycle).

use crate::color::Srgb;
use crate::error::BackdropError;
use crate::prng::Xorshift64;

/// All built-in palette names, in the order [`Palette::from_name`] accepts them.
const PALETTE_NAMES: &[&str] = &["particles", "stars", "monochrome", "ember"];

/// A non-empty set of colors picked uniformly.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Srgb>,
}

impl Palette {
    /// Creates a palette from a vector of colors.
    ///
    /// Requires at least one color.
    pub fn new(colors: Vec<Srgb>) -> Result<Self, BackdropError> {
        if colors.is_empty() {
            return Err(BackdropError::InvalidPalette(
                "palette requires at least 1 color".to_string(),
            ));
        }
        Ok(Self { colors })
    }

    /// Creates a palette by parsing hex color strings.
    pub fn from_hex(hexes: &[&str]) -> Result<Self, BackdropError> {
        let colors = hexes
            .iter()
            .map(|h| Srgb::from_hex(h))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    /// Looks up a built-in palette by name.
    pub fn from_name(name: &str) -> Result<Self, BackdropError> {
        match name {
            "particles" => Ok(Self::particles()),
            "stars" => Ok(Self::stars()),
            "monochrome" => Ok(Self::monochrome()),
            "ember" => Ok(Self::ember()),
            _ => Err(BackdropError::UnknownPalette(name.to_string())),
        }
    }

    /// Names accepted by [`Palette::from_name`].
    pub fn list_names() -> &'static [&'static str] {
        PALETTE_NAMES
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a constructed palette.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Srgb] {
        &self.colors
    }

    /// Returns true if `color` is one of this palette's entries.
    pub fn contains(&self, color: Srgb) -> bool {
        self.colors.contains(&color)
    }

    /// Picks one color uniformly at random.
    pub fn pick(&self, rng: &mut Xorshift64) -> Srgb {
        self.colors[rng.next_usize(self.colors.len())]
    }

    // -- Built-in palettes --

    /// Light blue, pale blue, near-white blue.
    pub fn particles() -> Self {
        Self::from_hex(&["#99ccff", "#b3d1ff", "#d4e4ff"])
            .expect("particles palette hex values are valid")
    }

    /// White plus the three particle blues.
    pub fn stars() -> Self {
        Self::from_hex(&["#ffffff", "#99ccff", "#b3d1ff", "#d4e4ff"])
            .expect("stars palette hex values are valid")
    }

    /// Grays to white.
    pub fn monochrome() -> Self {
        Self::from_hex(&["#808080", "#c0c0c0", "#ffffff"])
            .expect("monochrome palette hex values are valid")
    }

    /// Warm oranges and golds.
    pub fn ember() -> Self {
        Self::from_hex(&["#ff4500", "#ff8c00", "#ffd700"])
            .expect("ember palette hex values are valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_with_empty_vec_returns_error() {
        assert!(Palette::new(vec![]).is_err());
    }

    #[test]
    fn from_hex_with_invalid_hex_returns_error() {
        assert!(Palette::from_hex(&["#ff0000", "#zzzzzz"]).is_err());
    }

    #[test]
    fn from_hex_with_empty_slice_returns_error() {
        assert!(Palette::from_hex(&[]).is_err());
    }

    #[test]
    fn particles_palette_has_three_blues() {
        let p = Palette::particles();
        assert_eq!(p.len(), 3);
        let hexes: Vec<String> = p.colors().iter().map(|c| c.to_hex()).collect();
        assert_eq!(hexes, ["#99ccff", "#b3d1ff", "#d4e4ff"]);
    }

    #[test]
    fn stars_palette_adds_white() {
        let p = Palette::stars();
        assert_eq!(p.len(), 4);
        assert!(p.contains(Srgb::WHITE));
        for c in Palette::particles().colors() {
            assert!(p.contains(*c), "stars palette missing {}", c.to_hex());
        }
    }

    #[test]
    fn every_listed_name_resolves() {
        for name in Palette::list_names() {
            assert!(Palette::from_name(name).is_ok(), "{name} did not resolve");
        }
    }

    #[test]
    fn unknown_name_returns_error() {
        assert!(matches!(
            Palette::from_name("sepia"),
            Err(BackdropError::UnknownPalette(_))
        ));
    }

    #[test]
    fn pick_returns_palette_members() {
        let p = Palette::stars();
        let mut rng = Xorshift64::new(7);
        for _ in 0..1000 {
            assert!(p.contains(p.pick(&mut rng)));
        }
    }

    #[test]
    fn pick_reaches_every_color() {
        let p = Palette::stars();
        let mut rng = Xorshift64::new(99);
        let mut seen = [false; 4];
        for _ in 0..1000 {
            let c = p.pick(&mut rng);
            let idx = p.colors().iter().position(|x| *x == c).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&s| s), "some colors never picked: {seen:?}");
    }

    #[test]
    fn single_color_palette_always_picks_it() {
        let p = Palette::from_hex(&["#123456"]).unwrap();
        let mut rng = Xorshift64::new(1);
        for _ in 0..10 {
            assert_eq!(p.pick(&mut rng).to_hex(), "#123456");
        }
    }
}

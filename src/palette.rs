use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        [color.r, color.g, color.b]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

pub const CLASSIC_COLORS: [Rgb; 10] = [
    Rgb::new(0, 72, 140),
    Rgb::new(30, 108, 11),
    Rgb::new(240, 180, 0),
    Rgb::new(179, 0, 35),
    Rgb::new(67, 76, 67),
    Rgb::new(216, 64, 0),
    Rgb::new(51, 38, 0),
    Rgb::new(79, 49, 79),
    Rgb::new(46, 139, 87),
    Rgb::new(79, 79, 49),
];

// Indigo, Malachite, Vermillion, Sapphire, Harlequin, Crimson,
// Cerulean, Lime Green, Fuchsia, Mulberry, Turquoise, Amber.
pub const VIVID_COLORS: [Rgb; 12] = [
    Rgb::new(63, 0, 255),
    Rgb::new(0, 255, 63),
    Rgb::new(255, 63, 0),
    Rgb::new(0, 63, 255),
    Rgb::new(63, 255, 0),
    Rgb::new(255, 0, 63),
    Rgb::new(0, 191, 255),
    Rgb::new(191, 255, 0),
    Rgb::new(255, 0, 191),
    Rgb::new(191, 0, 255),
    Rgb::new(0, 255, 191),
    Rgb::new(255, 191, 0),
];

/// Hands out palette colors in order, then random colors once the palette
/// is used up.
#[derive(Debug)]
pub struct ColorPalette {
    colors: Vec<Rgb>,
    cursor: usize,
    rng: StdRng,
}

/// Seed used for unseeded palettes when OS entropy is not compiled in.
pub const FALLBACK_COLOR_SEED: u64 = 0x63686f7264;

impl ColorPalette {
    /// Random colors are seeded from OS entropy with the `os-rng` feature,
    /// and from [`FALLBACK_COLOR_SEED`] without it.
    pub fn new(colors: &[Rgb]) -> Self {
        Self {
            colors: colors.to_vec(),
            cursor: 0,
            rng: unseeded_rng(),
        }
    }

    pub fn with_seed(colors: &[Rgb], seed: u64) -> Self {
        Self {
            colors: colors.to_vec(),
            cursor: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn next_color(&mut self) -> Rgb {
        if let Some(color) = self.colors.get(self.cursor) {
            self.cursor += 1;
            return *color;
        }
        Rgb::new(self.rng.random(), self.rng.random(), self.rng.random())
    }

    pub fn remaining(&self) -> usize {
        self.colors.len().saturating_sub(self.cursor)
    }
}

#[cfg(feature = "os-rng")]
fn unseeded_rng() -> StdRng {
    StdRng::from_os_rng()
}

#[cfg(not(feature = "os-rng"))]
fn unseeded_rng() -> StdRng {
    StdRng::seed_from_u64(FALLBACK_COLOR_SEED)
}

/// Never ends: random colors follow the configured ones.
impl Iterator for ColorPalette {
    type Item = Rgb;

    fn next(&mut self) -> Option<Rgb> {
        Some(self.next_color())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_palette_in_order_then_random() {
        let mut palette = ColorPalette::with_seed(&CLASSIC_COLORS, 7);
        for expected in CLASSIC_COLORS {
            assert_eq!(palette.next_color(), expected);
        }
        assert_eq!(palette.remaining(), 0);
        // Channels are u8, so any generated triple is a valid color.
        let extra: Vec<Rgb> = (0..32).map(|_| palette.next_color()).collect();
        assert_eq!(extra.len(), 32);
    }

    #[test]
    fn empty_palette_is_random_from_the_start() {
        let mut a = ColorPalette::with_seed(&[], 42);
        let mut b = ColorPalette::with_seed(&[], 42);
        assert_eq!(a.next_color(), b.next_color());
        assert_eq!(a.remaining(), 0);
    }

    #[test]
    fn unseeded_palette_still_yields_colors() {
        let mut palette = ColorPalette::new(&CLASSIC_COLORS[..1]);
        assert_eq!(palette.next_color(), CLASSIC_COLORS[0]);
        assert_eq!(palette.by_ref().take(4).count(), 4);
    }

    #[cfg(not(feature = "os-rng"))]
    #[test]
    fn unseeded_palette_uses_fallback_seed_without_os_entropy() {
        let mut unseeded = ColorPalette::new(&[]);
        let mut seeded = ColorPalette::with_seed(&[], FALLBACK_COLOR_SEED);
        for _ in 0..8 {
            assert_eq!(unseeded.next_color(), seeded.next_color());
        }
    }

    #[test]
    fn formats_as_css_rgb() {
        assert_eq!(Rgb::new(0, 72, 140).to_string(), "rgb(0,72,140)");
    }

    #[test]
    fn deserializes_from_triple() {
        let colors: Vec<Rgb> = serde_json::from_str("[[1,2,3],[255,0,9]]").unwrap();
        assert_eq!(colors, vec![Rgb::new(1, 2, 3), Rgb::new(255, 0, 9)]);
    }
}

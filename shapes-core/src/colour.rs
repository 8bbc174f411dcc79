//! RGBA colours, the named palettes, and the HSL ramp used by the
//! fractal renderers.

use rand::Rng;
use rand::seq::IndexedRandom;

/// An 8-bit-per-channel RGBA colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Default shape colour.
pub const BLACK: Colour = Colour::rgb(0, 0, 0);

impl Colour {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Converts an HSL triple to a colour. `hue` is in degrees;
    /// `saturation` and `lightness` are in [0, 1]. The fractal renderers
    /// colour pixels with `hsl(hue, 100%, escape_fraction)`.
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let hue_prime = hue.rem_euclid(360.0) / 60.0;
        let secondary = chroma * (1.0 - (hue_prime % 2.0 - 1.0).abs());
        let m = lightness - chroma / 2.0;

        let (r, g, b) = match hue_prime as u32 {
            0 => (chroma, secondary, 0.0),
            1 => (secondary, chroma, 0.0),
            2 => (0.0, chroma, secondary),
            3 => (0.0, secondary, chroma),
            4 => (secondary, 0.0, chroma),
            _ => (chroma, 0.0, secondary),
        };

        Self::rgb(channel(r + m), channel(g + m), channel(b + m))
    }

    /// A fully random colour: uniform channels and uniform alpha, the
    /// fallback used when a spawn has no palette.
    pub fn random_rgba(rng: &mut impl Rng) -> Self {
        Self {
            r: rng.random_range(0..=255),
            g: rng.random_range(0..=255),
            b: rng.random_range(0..=255),
            a: rng.random_range(0..=255),
        }
    }
}

/// Convert a [0, 1] colour component to its 8-bit channel value.
fn channel(v: f32) -> u8 {
    (v * 255.0).clamp(0.0, 255.0) as u8
}

// ── Named palettes ──────────────────────────────────────────────

pub const RARI_SEAT_ORANGE: [Colour; 5] = [
    Colour::rgb(0x03, 0x12, 0x26),
    Colour::rgb(0x2E, 0x41, 0x59),
    Colour::rgb(0x64, 0x75, 0x8C),
    Colour::rgb(0xB0, 0xC1, 0xD9),
    Colour::rgb(0xE3, 0x8F, 0x4C),
];

pub const COLORS_02: [Colour; 5] = [
    Colour::rgb(0x3F, 0x8E, 0xBF),
    Colour::rgb(0x04, 0x2F, 0x40),
    Colour::rgb(0x16, 0x73, 0x62),
    Colour::rgb(0xF2, 0xA2, 0x0C),
    Colour::rgb(0xD9, 0x04, 0x04),
];

pub const COLOR_THEME_SKY: [Colour; 5] = [
    Colour::rgb(0x00, 0x02, 0x0D),
    Colour::rgb(0x24, 0x2B, 0x40),
    Colour::rgb(0x10, 0x17, 0x26),
    Colour::rgb(0x4F, 0x5F, 0x73),
    Colour::rgb(0x81, 0x95, 0xA6),
];

pub const COLOURFUL: [Colour; 4] = [
    Colour::rgb(0x21, 0x85, 0xC5),
    Colour::rgb(0x7E, 0xCE, 0xFD),
    Colour::rgb(0xFF, 0xF6, 0xE5),
    Colour::rgb(0xFF, 0x7F, 0x66),
];

/// Picks a uniform colour from `palette`, or a fully random RGBA colour
/// when no palette is given.
pub fn random_colour(palette: Option<&[Colour]>, rng: &mut impl Rng) -> Colour {
    match palette {
        Some(colours) => colours
            .choose(rng)
            .copied()
            .unwrap_or_else(|| Colour::random_rgba(rng)),
        None => Colour::random_rgba(rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn hsl_black_white_and_primary_red() {
        assert_eq!(Colour::from_hsl(0.0, 1.0, 0.0), Colour::rgb(0, 0, 0));
        assert_eq!(Colour::from_hsl(0.0, 1.0, 1.0), Colour::rgb(255, 255, 255));
        assert_eq!(Colour::from_hsl(0.0, 1.0, 0.5), Colour::rgb(255, 0, 0));
    }

    #[test]
    fn hsl_hue_wraps_past_full_circle() {
        assert_eq!(
            Colour::from_hsl(480.0, 1.0, 0.5),
            Colour::from_hsl(120.0, 1.0, 0.5)
        );
    }

    #[test]
    fn random_colour_draws_from_the_palette_only() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let c = random_colour(Some(&COLOURFUL), &mut rng);
            assert!(COLOURFUL.contains(&c), "colour {c:?} not in palette");
        }
    }

    #[test]
    fn random_colour_without_palette_is_fully_random_rgba() {
        let mut rng = StdRng::seed_from_u64(7);
        // Just make sure it does not panic and produces varying values.
        let a = random_colour(None, &mut rng);
        let b = random_colour(None, &mut rng);
        let c = random_colour(None, &mut rng);
        assert!(a != b || b != c);
    }
}

//! Per-word style derivation.
//!
//! Every visual attribute except the text color is a pure function of the
//! word. Randomness comes from [`seeded_random`], a small string hash fed
//! through `sin`. It is not cryptographic and it never touches an RNG, so the
//! same word renders the same way on every run and every platform.

use crate::types::{Gradient, Rgb, TextColor, WordStyle};

/// Font families a word can be drawn in. Reordering or resizing this list
/// changes the font of every word.
pub const FONT_CATALOG: [&str; 20] = [
    "Roboto",
    "Open Sans",
    "Lato",
    "Montserrat",
    "Oswald",
    "Raleway",
    "Merriweather",
    "Playfair Display",
    "Lobster",
    "Pacifico",
    "Bebas Neue",
    "Abril Fatface",
    "Caveat",
    "Dancing Script",
    "Permanent Marker",
    "Righteous",
    "Shadows Into Light",
    "Space Mono",
    "Comfortaa",
    "Anton",
];

const FALLBACK_FONT: &str = "monospace";

// Largest f64 strictly below 1.0.
const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

/// 32-bit string hash: `hash * 31 + unit` over UTF-16 code units, wrapping.
pub fn seed_hash(seed: &str) -> i32 {
    seed.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    })
}

/// Deterministic pseudo-random value in `[0, 1)` keyed by `seed`.
///
/// Uses the software `libm::sin` so the result does not depend on the
/// platform's math library.
pub fn seeded_random(seed: &str) -> f64 {
    let x = libm::sin(f64::from(seed_hash(seed))) * 10_000.0;
    (x - x.floor()).min(BELOW_ONE)
}

fn scaled(seed: &str, range: usize) -> usize {
    let value = (seeded_random(seed) * range as f64).floor() as usize;
    value.min(range.saturating_sub(1))
}

fn channel_color(word: &str, label: &str) -> Rgb {
    let channel = |c: &str| scaled(&format!("{word}{label}{c}"), 256) as u8;
    Rgb::new(channel("r"), channel("g"), channel("b"))
}

pub fn gradient_for(word: &str) -> Gradient {
    Gradient {
        start: channel_color(word, "color1"),
        end: channel_color(word, "color2"),
        angle_deg: scaled(&format!("{word}angle"), 360) as u16,
    }
}

pub fn font_index(word: &str, catalog_len: usize) -> usize {
    scaled(word, catalog_len)
}

/// Rotation in degrees, in `[-5, 5]`.
pub fn rotation_for(word: &str) -> f64 {
    seeded_random(&format!("{word}rotation")) * 10.0 - 5.0
}

pub fn contrast_color(background: Rgb) -> TextColor {
    if background.luminance() > 0.5 {
        TextColor::Black
    } else {
        TextColor::White
    }
}

/// Resolves the flat color a gradient shows behind the text.
pub trait ColorSampler {
    fn sample(&self, gradient: &Gradient) -> Rgb;
}

/// Headless sampler: blends the two stops analytically at the midpoint.
///
/// This approximates what a renderer shows at the center of the screen; it
/// ignores any quantization the renderer applies.
#[derive(Clone, Copy, Debug, Default)]
pub struct MidpointSampler;

impl ColorSampler for MidpointSampler {
    fn sample(&self, gradient: &Gradient) -> Rgb {
        gradient.color_at(0.5)
    }
}

pub struct StyleDeriver<S> {
    catalog: &'static [&'static str],
    sampler: S,
}

impl<S: ColorSampler> StyleDeriver<S> {
    pub fn new(sampler: S) -> Self {
        Self::with_catalog(&FONT_CATALOG, sampler)
    }

    pub fn with_catalog(catalog: &'static [&'static str], sampler: S) -> Self {
        Self { catalog, sampler }
    }

    pub fn sampler_mut(&mut self) -> &mut S {
        &mut self.sampler
    }

    pub fn derive(&self, word: &str) -> WordStyle {
        let gradient = gradient_for(word);
        let font_index = font_index(word, self.catalog.len());
        let font = self
            .catalog
            .get(font_index)
            .copied()
            .unwrap_or(FALLBACK_FONT);

        WordStyle {
            gradient,
            font,
            font_index,
            text_color: contrast_color(self.sampler.sample(&gradient)),
            rotation_deg: rotation_for(word),
        }
    }
}

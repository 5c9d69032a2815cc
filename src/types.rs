use ratatui::style::Color;
use std::time::Instant;

/// 8-bit sRGB color, straight alpha, fully opaque.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise linear blend; `t == 0` is `self`, `t == 1` is `other`.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| {
            let a = f64::from(a);
            (a + (f64::from(b) - a) * t).round().clamp(0.0, 255.0) as u8
        };

        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// Perceived brightness in `[0, 1]` using Rec. 601 weights.
    pub fn luminance(self) -> f64 {
        (0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b)) / 255.0
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.r, rgb.g, rgb.b)
    }
}

/// Two-stop linear gradient with a CSS-style angle (0 points up, clockwise).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gradient {
    pub start: Rgb,
    pub end: Rgb,
    pub angle_deg: u16,
}

impl Gradient {
    pub fn color_at(&self, t: f64) -> Rgb {
        self.start.lerp(self.end, t)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextColor {
    Black,
    White,
}

impl TextColor {
    pub fn rgb(self) -> Rgb {
        match self {
            TextColor::Black => Rgb::BLACK,
            TextColor::White => Rgb::WHITE,
        }
    }
}

/// Everything needed to draw a word the way it is always drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct WordStyle {
    pub gradient: Gradient,
    pub font: &'static str,
    pub font_index: usize,
    pub text_color: TextColor,
    pub rotation_deg: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Visible,
    FadingOut { since: Instant },
    FadingIn { since: Instant },
}

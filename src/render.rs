use crate::{
    style::{ColorSampler, MidpointSampler},
    types::{Gradient, Rgb},
};

use ratatui::{layout::Position, prelude::*, text::Span};

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;

/// Position along the gradient line for cell `(x, y)` of `area`, following
/// CSS `linear-gradient` geometry: the line passes through the center of the
/// box and is just long enough for the corners to land on 0 and 1.
pub fn gradient_t(angle_deg: u16, area: Rect, x: u16, y: u16) -> f64 {
    let (sin, cos) = f64::from(angle_deg).to_radians().sin_cos();
    let width = f64::from(area.width);
    let height = f64::from(area.height) * CELL_ASPECT;

    let length = (width * sin).abs() + (height * cos).abs();
    if length <= f64::EPSILON {
        return 0.5;
    }

    let px = f64::from(x.saturating_sub(area.x)) + 0.5 - width / 2.0;
    let py = (f64::from(y.saturating_sub(area.y)) + 0.5) * CELL_ASPECT - height / 2.0;

    ((px * sin - py * cos) / length + 0.5).clamp(0.0, 1.0)
}

pub struct GradientBackground<'a> {
    gradient: &'a Gradient,
}

impl<'a> GradientBackground<'a> {
    pub fn new(gradient: &'a Gradient) -> Self {
        Self { gradient }
    }
}

impl Widget for GradientBackground<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let t = gradient_t(self.gradient.angle_deg, area, x, y);
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_bg(self.gradient.color_at(t).into());
                }
            }
        }
    }
}

/// Samples the center cell of a gradient rasterized at the viewport size.
#[derive(Clone, Copy, Debug)]
pub struct RenderedSampler {
    viewport: Rect,
}

impl RenderedSampler {
    pub fn new(viewport: Rect) -> Self {
        Self { viewport }
    }

    /// Returns true when the viewport actually changed.
    pub fn set_viewport(&mut self, viewport: Rect) -> bool {
        let changed = self.viewport != viewport;
        self.viewport = viewport;
        changed
    }
}

impl ColorSampler for RenderedSampler {
    fn sample(&self, gradient: &Gradient) -> Rgb {
        if self.viewport.is_empty() {
            return MidpointSampler.sample(gradient);
        }

        let mut probe = Buffer::empty(self.viewport);
        GradientBackground::new(gradient).render(self.viewport, &mut probe);

        let center = Position::new(
            self.viewport.x + self.viewport.width / 2,
            self.viewport.y + self.viewport.height / 2,
        );

        match probe.cell(center).map(|cell| cell.bg) {
            Some(Color::Rgb(r, g, b)) => Rgb::new(r, g, b),
            _ => MidpointSampler.sample(gradient),
        }
    }
}

/// The word, centered, with glyphs nudged up or down to suggest a tilt.
pub struct WordArt<'a> {
    word: &'a str,
    color: Color,
    rotation_deg: f64,
}

impl<'a> WordArt<'a> {
    pub fn new(word: &'a str, color: Color, rotation_deg: f64) -> Self {
        Self {
            word,
            color,
            rotation_deg,
        }
    }
}

/// Vertical offset in rows for a glyph `dx` columns right of the center.
pub fn tilt_offset(dx: f64, rotation_deg: f64) -> i32 {
    (dx * rotation_deg.to_radians().tan() / CELL_ASPECT).round() as i32
}

impl Widget for WordArt<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let style = Style::default().fg(self.color).add_modifier(Modifier::BOLD);
        let span = Span::styled(self.word, style);

        // Whole grapheme clusters, so combining marks stay on their base.
        let glyphs: Vec<(&str, u16)> = span
            .styled_graphemes(Style::default())
            .map(|grapheme| (grapheme.symbol, Span::raw(grapheme.symbol).width() as u16))
            .filter(|(_, width)| *width > 0)
            .collect();

        let total: u16 = glyphs.iter().map(|(_, w)| *w).sum();
        let left = area.x + area.width.saturating_sub(total) / 2;
        let middle_row = i32::from(area.y + area.height / 2);

        let mut col = 0u16;
        for (symbol, width) in glyphs {
            let x = left.saturating_add(col);
            col = col.saturating_add(width);
            if x.saturating_add(width) > area.right() {
                break;
            }

            let dx = f64::from(col) - f64::from(width) / 2.0 - f64::from(total) / 2.0;
            let row = (middle_row + tilt_offset(dx, self.rotation_deg))
                .clamp(i32::from(area.top()), i32::from(area.bottom()) - 1);

            buf.set_string(x, row as u16, symbol, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::gradient_for;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.left()..buf.area.right())
            .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
            .collect()
    }

    #[test]
    fn gradient_runs_bottom_to_top_at_zero_degrees() {
        let area = Rect::new(0, 0, 10, 10);
        assert!(gradient_t(0, area, 5, 9) < 0.1);
        assert!(gradient_t(0, area, 5, 0) > 0.9);
    }

    #[test]
    fn gradient_runs_left_to_right_at_ninety_degrees() {
        let area = Rect::new(0, 0, 20, 5);
        assert!(gradient_t(90, area, 0, 2) < 0.1);
        assert!(gradient_t(90, area, 19, 2) > 0.9);
    }

    #[test]
    fn gradient_fills_every_cell() {
        let gradient = Gradient {
            start: Rgb::BLACK,
            end: Rgb::WHITE,
            angle_deg: 90,
        };
        let area = Rect::new(0, 0, 8, 3);
        let mut buf = Buffer::empty(area);
        GradientBackground::new(&gradient).render(area, &mut buf);

        assert!(buf.content().iter().all(|c| matches!(c.bg, Color::Rgb(..))));
        let first = buf.cell((0, 1)).map(|c| c.bg);
        let last = buf.cell((7, 1)).map(|c| c.bg);
        assert_ne!(first, last);
    }

    #[test]
    fn rendered_sampler_matches_midpoint_on_odd_viewport() {
        let sampler = RenderedSampler::new(Rect::new(0, 0, 81, 25));
        for word in ["test", "hello", "", "Zebra"] {
            let gradient = gradient_for(word);
            assert_eq!(sampler.sample(&gradient), MidpointSampler.sample(&gradient));
        }
    }

    #[test]
    fn rendered_sampler_reads_flat_backgrounds() {
        let sampler = RenderedSampler::new(Rect::new(0, 0, 40, 12));
        let white = Gradient {
            start: Rgb::WHITE,
            end: Rgb::WHITE,
            angle_deg: 17,
        };
        assert_eq!(sampler.sample(&white), Rgb::WHITE);
    }

    #[test]
    fn empty_viewport_falls_back_to_midpoint() {
        let sampler = RenderedSampler::new(Rect::default());
        let gradient = gradient_for("test");
        assert_eq!(sampler.sample(&gradient), Rgb::new(182, 131, 80));
    }

    #[test]
    fn set_viewport_reports_changes() {
        let mut sampler = RenderedSampler::new(Rect::new(0, 0, 10, 10));
        assert!(!sampler.set_viewport(Rect::new(0, 0, 10, 10)));
        assert!(sampler.set_viewport(Rect::new(0, 0, 11, 10)));
    }

    #[test]
    fn word_is_centered_without_tilt() {
        let area = Rect::new(0, 0, 11, 3);
        let mut buf = Buffer::empty(area);
        WordArt::new("hello", Color::White, 0.0).render(area, &mut buf);

        assert_eq!(row_text(&buf, 1), "   hello   ");
        assert_eq!(buf.cell((3, 1)).map(|c| c.fg), Some(Color::White));
    }

    #[test]
    fn word_keeps_background() {
        let area = Rect::new(0, 0, 5, 1);
        let mut buf = Buffer::empty(area);
        buf.set_style(area, Style::default().bg(Color::Rgb(1, 2, 3)));
        WordArt::new("ab", Color::Black, 0.0).render(area, &mut buf);
        assert_eq!(buf.cell((1, 0)).map(|c| c.bg), Some(Color::Rgb(1, 2, 3)));
    }

    #[test]
    fn tilt_moves_right_side_down_for_clockwise_rotation() {
        assert_eq!(tilt_offset(0.0, 5.0), 0);
        assert!(tilt_offset(40.0, 5.0) > 0);
        assert!(tilt_offset(-40.0, 5.0) < 0);
        assert!(tilt_offset(40.0, -5.0) < 0);
    }

    #[test]
    fn combining_marks_stay_with_their_letter() {
        let area = Rect::new(0, 0, 5, 1);
        let mut buf = Buffer::empty(area);
        WordArt::new("e\u{301}", Color::White, 0.0).render(area, &mut buf);

        assert_eq!(buf.cell((2, 0)).map(|c| c.symbol()), Some("e\u{301}"));
        assert_eq!(row_text(&buf, 0), "  e\u{301}  ");
    }

    #[test]
    fn decomposed_word_is_centered_by_display_width() {
        let area = Rect::new(0, 0, 7, 1);
        let mut buf = Buffer::empty(area);
        WordArt::new("cafe\u{301}", Color::White, 0.0).render(area, &mut buf);
        assert_eq!(row_text(&buf, 0), " cafe\u{301}  ");
    }

    #[test]
    fn long_words_are_clipped() {
        let area = Rect::new(0, 0, 4, 1);
        let mut buf = Buffer::empty(area);
        WordArt::new("abcdefgh", Color::White, 0.0).render(area, &mut buf);
        assert_eq!(row_text(&buf, 0), "abcd");
    }
}

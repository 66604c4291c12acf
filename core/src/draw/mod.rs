//! Render sink for the puzzle boards.
//!
//! The engine only knows logical coordinates. Each game paints itself onto a [`Surface`], which
//! hosts implement on top of whatever 2D context they have. [`DrawState`] is the same picture as
//! plain data, for hosts that prefer to render it themselves.

use serde::{Deserialize, Serialize};

use crate::*;
pub use recorder::*;
pub use state::*;

mod grid_fill;
mod matrix_difference;
mod pair_matching;
mod recorder;
mod state;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// `#rrggbb`, or `rgba(...)` when translucent.
    pub fn to_css(self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {:.2})",
                self.r,
                self.g,
                self.b,
                f32::from(self.a) / 255.
            )
        }
    }

    pub const CINNABAR: Self = Self::rgb(0xC8, 0x25, 0x06);
    pub const CINNABAR_LIGHT: Self = Self::rgb(0xE6, 0x33, 0x22);
    pub const INK: Self = Self::rgb(0x23, 0x23, 0x23);
    pub const INDIGO: Self = Self::rgb(0x1E, 0x6F, 0x9F);
    pub const GOLD: Self = Self::rgb(0xD4, 0xA8, 0x4B);
    pub const WARM_GRAY: Self = Self::rgb(0xB8, 0xA4, 0x8C);
    pub const PAPER: Self = Self::rgb(0xFF, 0xFB, 0xF5);
    pub const CREAM: Self = Self::rgb(0xFF, 0xF8, 0xEE);
    pub const JADE: Self = Self::rgb(0x4C, 0xAF, 0x50);
    pub const JADE_MIST: Self = Self::rgb(0xF0, 0xF7, 0xF0);
    pub const MIST: Self = Self::rgb(0xCC, 0xCC, 0xCC);
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);
}

/// Stroke colors cycled through by pair-matching connections.
pub const CONNECTION_COLORS: [Color; 8] = [
    Color::CINNABAR,
    Color::INDIGO,
    Color::rgb(0x2E, 0x7D, 0x32),
    Color::rgb(0x6A, 0x1B, 0x9A),
    Color::rgb(0xF5, 0x7C, 0x00),
    Color::rgb(0x00, 0x83, 0x8F),
    Color::rgb(0xAD, 0x14, 0x57),
    Color::rgb(0x4E, 0x34, 0x2E),
];

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Paint {
    Solid(Color),
    /// Top to bottom over the filled shape.
    VerticalGradient(Color, Color),
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub color: Color,
    pub blur: f32,
    pub offset_y: f32,
}

impl Shadow {
    pub const CARD: Self = Self {
        color: Color::INK.with_alpha(20),
        blur: 4.,
        offset_y: 1.,
    };

    pub const RAISED: Self = Self {
        color: Color::INK.with_alpha(26),
        blur: 6.,
        offset_y: 2.,
    };
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontFamily {
    Serif,
    Sans,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub size: f32,
    pub bold: bool,
    pub family: FontFamily,
}

impl Font {
    pub const fn serif(size: f32) -> Self {
        Self {
            size,
            bold: false,
            family: FontFamily::Serif,
        }
    }

    pub const fn sans(size: f32) -> Self {
        Self {
            size,
            bold: false,
            family: FontFamily::Sans,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }
}

/// Cubic curve from `from` to `to`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bezier {
    pub from: Point,
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
}

/// 2D drawing target. Text is always centered on its anchor point, both ways.
pub trait Surface {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f32, dy: f32);

    fn fill_round_rect(&mut self, rect: Rect, radius: f32, paint: Paint, shadow: Option<Shadow>);
    fn stroke_round_rect(&mut self, rect: Rect, radius: f32, color: Color, line_width: f32);
    fn fill_circle(&mut self, center: Point, radius: f32, color: Color);
    fn stroke_bezier(&mut self, curve: Bezier, color: Color, line_width: f32);
    fn fill_text(&mut self, text: &str, at: Point, font: Font, color: Color);

    /// Advance width of `text`; the default treats every glyph as full width.
    fn measure_text(&self, text: &str, font: Font) -> f32 {
        text.chars().count() as f32 * font.size
    }
}

impl Game {
    /// Paints the board with its top-left corner at `(offset_x, offset_y)`.
    pub fn draw(&self, surface: &mut impl Surface, offset_x: f32, offset_y: f32) {
        match self {
            Self::GridFill(game) => game.draw(surface, offset_x, offset_y),
            Self::MatrixDifference(game) => game.draw(surface, offset_x, offset_y),
            Self::PairMatching(game) => game.draw(surface, offset_x, offset_y),
        }
    }

    pub fn draw_state(&self) -> DrawState {
        match self {
            Self::GridFill(game) => game.draw_state(),
            Self::MatrixDifference(game) => game.draw_state(),
            Self::PairMatching(game) => game.draw_state(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_colors() {
        assert_eq!(Color::CINNABAR.to_css(), "#C82506");
        assert_eq!(Color::INK.with_alpha(51).to_css(), "rgba(35, 35, 35, 0.20)");
    }

    #[test]
    fn game_draw_is_balanced() {
        let game = Game::from(GridFillGame::new(crate::fixtures::grid_fill_layout("国泰民安", 0)));
        let mut recorder = Recorder::new();

        game.draw(&mut recorder, 10., 20.);

        assert_eq!(recorder.depth(), 0);
        assert!(!recorder.commands().is_empty());
    }
}

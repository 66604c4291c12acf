use crate::*;

const CELL_RADIUS: f32 = 8.;

impl MatrixDifferenceGame {
    pub fn draw(&self, surface: &mut impl Surface, offset_x: f32, offset_y: f32) {
        let layout = self.layout();
        let geometry = layout.geometry();
        let cell_size = geometry.cell_size;
        let glyph_size = if cell_size > 70. {
            34.
        } else if cell_size > 60. {
            30.
        } else {
            26.
        };
        surface.save();
        surface.translate(offset_x, offset_y);

        surface.fill_text(
            "找出其中不同的一个字",
            Point::new(geometry.width() / 2., -14.),
            Font::sans(14.),
            Color::WARM_GRAY,
        );

        for coords in layout.iter_coords() {
            let rect = layout.cell_rect(coords);
            let found = self.is_complete() && coords == layout.answer();
            let wrong = self.is_wrong_cell(coords);

            let fill = if found {
                Color::CINNABAR.with_alpha(31)
            } else {
                Color::PAPER
            };
            surface.fill_round_rect(rect, CELL_RADIUS, Paint::Solid(fill), Some(Shadow::CARD));

            let (stroke, line_width, ink) = if found {
                (Color::CINNABAR, 2.5, Color::CINNABAR)
            } else if wrong {
                (Color::MIST, 1., Color::MIST)
            } else {
                (Color::GOLD, 0.8, Color::INK)
            };
            surface.stroke_round_rect(rect, CELL_RADIUS, stroke, line_width);
            surface.fill_text(
                layout.glyph_at(coords),
                rect.center(),
                Font::serif(glyph_size),
                ink,
            );

            if found {
                let badge = Point::new(rect.right() - 6., rect.y + 6.);
                surface.fill_circle(badge, 8., Color::CINNABAR);
                surface.fill_text("✓", badge, Font::sans(10.).bold(), Color::WHITE);
            }
        }

        surface.restore();
    }
}

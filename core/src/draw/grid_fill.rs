use crate::*;

const CELL_RADIUS: f32 = 10.;
const PREVIEW_Y: f32 = -42.;

fn glyph_size(cell_size: f32) -> f32 {
    if cell_size > 60. {
        32.
    } else if cell_size > 48. {
        26.
    } else {
        22.
    }
}

impl GridFillGame {
    pub fn draw(&self, surface: &mut impl Surface, offset_x: f32, offset_y: f32) {
        let layout = self.layout();
        let geometry = layout.geometry();
        let cell_size = geometry.cell_size;
        surface.save();
        surface.translate(offset_x, offset_y);

        if !self.selection().is_empty() {
            let width = geometry.width();
            surface.fill_round_rect(
                Rect::new(0., PREVIEW_Y - 16., width, 32.),
                6.,
                Paint::Solid(Color::CINNABAR.with_alpha(20)),
                None,
            );
            surface.fill_text(
                &format!("已选：{}", self.selected_word()),
                Point::new(width / 2., PREVIEW_Y),
                Font::serif(20.).bold(),
                Color::CINNABAR,
            );
        }

        for (coords, glyph) in layout.iter_cells() {
            let rect = layout.cell_rect(coords);
            let order = self.selection().iter().position(|&c| c == coords);

            match order {
                Some(_) => surface.fill_round_rect(
                    rect,
                    CELL_RADIUS,
                    Paint::VerticalGradient(Color::CINNABAR_LIGHT, Color::CINNABAR),
                    None,
                ),
                None => surface.fill_round_rect(
                    rect,
                    CELL_RADIUS,
                    Paint::Solid(Color::PAPER),
                    Some(Shadow::RAISED),
                ),
            }
            let (stroke, line_width) = match order {
                Some(_) => (Color::CINNABAR, 2.),
                None => (Color::GOLD, 1.),
            };
            surface.stroke_round_rect(rect, CELL_RADIUS, stroke, line_width);

            if let Some(index) = order {
                let badge = Point::new(rect.right() - 8., rect.y + 8.);
                surface.fill_circle(badge, 10., Color::CREAM);
                surface.fill_text(
                    &(index + 1).to_string(),
                    badge,
                    Font::sans(11.).bold(),
                    Color::CINNABAR,
                );
            }

            let size = glyph_size(cell_size);
            let (font, color) = match order {
                Some(_) => (Font::serif(size + 2.).bold(), Color::CREAM),
                None => (Font::serif(size), Color::INK),
            };
            surface.fill_text(&glyph.to_string(), rect.center(), font, color);
        }

        surface.restore();
    }
}

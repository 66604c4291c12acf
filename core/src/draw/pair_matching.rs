use crate::*;

const ITEM_RADIUS: f32 = 8.;
const TEXT_PADDING: f32 = 16.;

/// Base font size by item height, reduced for long lines.
fn item_font_size(item_height: f32, text: &str) -> f32 {
    let base: f32 = if item_height > 40. {
        15.
    } else if item_height > 34. {
        13.
    } else {
        11.
    };
    match text.chars().count() {
        len if len > 10 => (base - 3.).max(10.),
        len if len > 7 => (base - 2.).max(11.),
        len if len > 5 => (base - 1.).max(12.),
        _ => base,
    }
}

impl PairMatchingGame {
    pub fn draw(&self, surface: &mut impl Surface, offset_x: f32, offset_y: f32) {
        let layout = self.layout();
        let metrics = layout.metrics();
        surface.save();
        surface.translate(offset_x, offset_y);

        surface.fill_text(
            "点击上句再点击对应下句完成连线",
            Point::new(metrics.total_width() / 2., -14.),
            Font::sans(13.),
            Color::WARM_GRAY,
        );

        for (index, connection) in self.connections().iter().enumerate() {
            if let Some(curve) = self.connection_curve(connection) {
                let color = CONNECTION_COLORS[index % CONNECTION_COLORS.len()];
                surface.stroke_bezier(curve, color, 2.);
            }
        }

        for item in layout.items() {
            let selected = self.pending() == Some(item.id);
            let connected = self.is_connected(item.id);
            let (fill, stroke, line_width) = if selected {
                (Color::CINNABAR.with_alpha(26), Color::CINNABAR, 2.)
            } else if connected {
                (Color::JADE_MIST, Color::JADE, 1.)
            } else {
                (Color::PAPER, Color::GOLD, 1.)
            };
            surface.fill_round_rect(item.rect, ITEM_RADIUS, Paint::Solid(fill), Some(Shadow::CARD));
            surface.stroke_round_rect(item.rect, ITEM_RADIUS, stroke, line_width);

            let mut font = Font::serif(item_font_size(item.rect.height, &item.text));
            let max_width = item.rect.width - TEXT_PADDING;
            for _ in 0..5 {
                if font.size <= 9. || surface.measure_text(&item.text, font) <= max_width {
                    break;
                }
                font.size -= 1.;
            }
            let ink = if connected { Color::JADE } else { Color::INK };
            surface.fill_text(&item.text, item.rect.center(), font, ink);

            if connected {
                let mark_x = match item.role {
                    ItemRole::Upper => item.rect.right() - 10.,
                    ItemRole::Lower => item.rect.x + 10.,
                };
                let mark = Point::new(mark_x, item.rect.y + 10.);
                surface.fill_circle(mark, 7., Color::JADE);
                surface.fill_text("✓", mark, Font::sans(9.).bold(), Color::WHITE);
            }
        }

        surface.restore();
    }

    /// Curve from the upper item's right edge to the lower item's left edge.
    fn connection_curve(&self, connection: &Connection) -> Option<Bezier> {
        let a = self.layout().item(connection.from)?;
        let b = self.layout().item(connection.to)?;
        let (upper, lower) = match a.role {
            ItemRole::Upper => (a, b),
            ItemRole::Lower => (b, a),
        };
        let from = Point::new(upper.rect.right(), upper.rect.center().y);
        let to = Point::new(lower.rect.x, lower.rect.center().y);
        let pull = self.layout().metrics().column_gap * 0.6;
        Some(Bezier {
            from,
            ctrl1: Point::new(from.x + pull, from.y),
            ctrl2: Point::new(to.x - pull, to.y),
            to,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::pair_layout;

    #[test]
    fn font_shrinks_for_long_lines() {
        assert_eq!(item_font_size(48., "白日依山尽"), 15.);
        assert_eq!(item_font_size(48., "白日依山尽黄"), 14.);
        assert_eq!(item_font_size(40., "白日依山尽黄河入"), 11.);
        assert_eq!(item_font_size(34., "白日依山尽黄河入海流啊"), 10.);
    }

    #[test]
    fn connection_runs_between_columns() {
        let mut game = PairMatchingGame::new(pair_layout(2, 8));
        game.tap(2).unwrap();
        game.tap(1).unwrap();
        let mut recorder = Recorder::new();

        game.draw(&mut recorder, 0., 0.);

        let curves: Vec<_> = recorder
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::StrokeBezier { curve, color, .. } => Some((*curve, *color)),
                _ => None,
            })
            .collect();
        assert_eq!(curves.len(), 1);
        let (curve, color) = curves[0];
        assert_eq!(curve.from, Point::new(160., 24.));
        assert_eq!(curve.to.x, 184.);
        assert_eq!(color, Color::CINNABAR);
    }

    #[test]
    fn long_text_is_fitted_to_width() {
        let payload = PairMatchingPayload {
            items: vec![
                PairItem {
                    id: 1,
                    text: "一二三四五六七八九十一二三".into(),
                    role: ItemRole::Upper,
                },
                PairItem {
                    id: 2,
                    text: "下".into(),
                    role: ItemRole::Lower,
                },
            ],
            correct_pairs: vec![(1, 2)],
        };
        let layout = RandomPuzzleGenerator::new(0).pair_matching(&payload).unwrap();
        let game = PairMatchingGame::new(layout);
        let mut recorder = Recorder::new();

        game.draw(&mut recorder, 0., 0.);

        let size = recorder
            .commands()
            .iter()
            .find_map(|command| match command {
                DrawCommand::FillText { text, font, .. } if text.starts_with("一二") => {
                    Some(font.size)
                }
                _ => None,
            })
            .unwrap();
        // 13 glyphs at 12px → 156 > 144; shrinks to 11px
        assert_eq!(size, 11.);
    }
}

use serde::{Deserialize, Serialize};

use crate::*;

/// A single painted primitive, in absolute coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    FillRoundRect {
        rect: Rect,
        radius: f32,
        paint: Paint,
        shadow: Option<Shadow>,
    },
    StrokeRoundRect {
        rect: Rect,
        radius: f32,
        color: Color,
        line_width: f32,
    },
    FillCircle {
        center: Point,
        radius: f32,
        color: Color,
    },
    StrokeBezier {
        curve: Bezier,
        color: Color,
        line_width: f32,
    },
    FillText {
        text: String,
        at: Point,
        font: Font,
        color: Color,
    },
}

/// Surface that keeps every command instead of painting, with translations already applied.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    commands: Vec<DrawCommand>,
    offset: Point,
    saved: Vec<Point>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Unbalanced `save` calls.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, Point, Color)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::FillText {
                text, at, color, ..
            } => Some((text.as_str(), *at, *color)),
            _ => None,
        })
    }

    fn shift(&self, point: Point) -> Point {
        Point::new(point.x + self.offset.x, point.y + self.offset.y)
    }

    fn shift_rect(&self, rect: Rect) -> Rect {
        Rect::new(
            rect.x + self.offset.x,
            rect.y + self.offset.y,
            rect.width,
            rect.height,
        )
    }
}

impl Surface for Recorder {
    fn save(&mut self) {
        self.saved.push(self.offset);
    }

    fn restore(&mut self) {
        if let Some(offset) = self.saved.pop() {
            self.offset = offset;
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.offset.x += dx;
        self.offset.y += dy;
    }

    fn fill_round_rect(&mut self, rect: Rect, radius: f32, paint: Paint, shadow: Option<Shadow>) {
        self.commands.push(DrawCommand::FillRoundRect {
            rect: self.shift_rect(rect),
            radius,
            paint,
            shadow,
        });
    }

    fn stroke_round_rect(&mut self, rect: Rect, radius: f32, color: Color, line_width: f32) {
        self.commands.push(DrawCommand::StrokeRoundRect {
            rect: self.shift_rect(rect),
            radius,
            color,
            line_width,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center: self.shift(center),
            radius,
            color,
        });
    }

    fn stroke_bezier(&mut self, curve: Bezier, color: Color, line_width: f32) {
        let curve = Bezier {
            from: self.shift(curve.from),
            ctrl1: self.shift(curve.ctrl1),
            ctrl2: self.shift(curve.ctrl2),
            to: self.shift(curve.to),
        };
        self.commands.push(DrawCommand::StrokeBezier {
            curve,
            color,
            line_width,
        });
    }

    fn fill_text(&mut self, text: &str, at: Point, font: Font, color: Color) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_owned(),
            at: self.shift(at),
            font,
            color,
        });
    }
}

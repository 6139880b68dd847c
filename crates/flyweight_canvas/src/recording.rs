use crate::Canvas;
use flyweight_shared::color::Color;
use flyweight_shared::geo::{Bounds, Point};
use std::fmt::{Display, Formatter};

/// A single call made against a [`RecordingCanvas`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawCommand {
    SetColor(Color),
    DrawOval(Bounds),
    FillOval(Bounds),
    DrawLine(Point, Point),
    Clear(Color),
}

impl Display for DrawCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawCommand::SetColor(color) => write!(f, "set_color {color}"),
            DrawCommand::DrawOval(bounds) => write!(f, "draw_oval {bounds}"),
            DrawCommand::FillOval(bounds) => write!(f, "fill_oval {bounds}"),
            DrawCommand::DrawLine(from, to) => write!(f, "draw_line {from} -> {to}"),
            DrawCommand::Clear(color) => write!(f, "clear {color}"),
        }
    }
}

/// Canvas that renders nothing and remembers every call instead. Used for headless runs and
/// for asserting what a shape did.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    color: Color,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drains the recorded commands, leaving the canvas empty but keeping the current color
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Canvas for RecordingCanvas {
    fn set_color(&mut self, color: Color) {
        self.color = color;
        self.commands.push(DrawCommand::SetColor(color));
    }

    fn color(&self) -> Color {
        self.color
    }

    fn draw_oval(&mut self, bounds: Bounds) {
        self.commands.push(DrawCommand::DrawOval(bounds));
    }

    fn fill_oval(&mut self, bounds: Bounds) {
        self.commands.push(DrawCommand::FillOval(bounds));
    }

    fn draw_line(&mut self, from: Point, to: Point) {
        self.commands.push(DrawCommand::DrawLine(from, to));
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut canvas = RecordingCanvas::new();
        canvas.set_color(Color::RED);
        canvas.draw_oval(Bounds::new(1, 2, 3, 4));
        canvas.draw_line(Point::new(0, 0), Point::new(5, 5));

        assert_eq!(canvas.color(), Color::RED);
        assert_eq!(
            canvas.commands(),
            &[
                DrawCommand::SetColor(Color::RED),
                DrawCommand::DrawOval(Bounds::new(1, 2, 3, 4)),
                DrawCommand::DrawLine(Point::new(0, 0), Point::new(5, 5)),
            ]
        );
    }

    #[test]
    fn take_keeps_color() {
        let mut canvas = RecordingCanvas::new();
        canvas.set_color(Color::BLUE);
        canvas.clear(Color::WHITE);

        assert_eq!(canvas.take().len(), 2);
        assert!(canvas.is_empty());
        assert_eq!(canvas.color(), Color::BLUE);
    }

    #[test]
    fn display() {
        assert_eq!(
            DrawCommand::FillOval(Bounds::new(10, 10, 50, 50)).to_string(),
            "fill_oval (10, 10) 50x50"
        );
        assert_eq!(
            DrawCommand::SetColor(Color::RED).to_string(),
            "set_color #ff0000ff"
        );
    }
}

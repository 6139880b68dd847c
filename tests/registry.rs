use flyweight::canvas::{Canvas, DrawCommand, RasterCanvas, RecordingCanvas};
use flyweight::shapes::{Shape, ShapeKind, ShapeRegistry};
use flyweight::shared::color::Color;
use flyweight::shared::geo::{Bounds, Point};
use std::sync::Arc;
use test_case::test_case;

#[test_case(ShapeKind::OvalFilled ; "oval filled")]
#[test_case(ShapeKind::OvalUnfilled ; "oval unfilled")]
#[test_case(ShapeKind::Line ; "line")]
fn identity_is_stable(kind: ShapeKind) {
    let mut registry = ShapeRegistry::new();

    let a = registry.get_shape(kind);
    let b = registry.get_shape(kind);
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn filled_oval_scenario() {
    let mut registry = ShapeRegistry::new();
    let mut canvas = RecordingCanvas::new();

    registry
        .get_shape(ShapeKind::OvalFilled)
        .draw(&mut canvas, 10, 10, 50, 50, Color::RED);

    assert_eq!(
        canvas.commands(),
        &[
            DrawCommand::SetColor(Color::RED),
            DrawCommand::DrawOval(Bounds::new(10, 10, 50, 50)),
            DrawCommand::FillOval(Bounds::new(10, 10, 50, 50)),
        ]
    );
}

#[test]
fn unfilled_oval_scenario() {
    let mut registry = ShapeRegistry::new();
    let mut canvas = RecordingCanvas::new();

    registry
        .get_shape(ShapeKind::OvalUnfilled)
        .draw(&mut canvas, 0, 0, 20, 20, Color::BLUE);

    assert_eq!(
        canvas.commands(),
        &[
            DrawCommand::SetColor(Color::BLUE),
            DrawCommand::DrawOval(Bounds::new(0, 0, 20, 20)),
        ]
    );
}

#[test]
fn line_scenario() {
    let mut registry = ShapeRegistry::new();
    let mut canvas = RecordingCanvas::new();

    let line = registry.get_shape(ShapeKind::Line);
    assert!(Arc::ptr_eq(&line, &registry.get_shape(ShapeKind::Line)));

    line.draw(&mut canvas, 3, 4, 10, 10, Color::GREEN);
    assert_eq!(
        canvas.commands(),
        &[
            DrawCommand::SetColor(Color::GREEN),
            DrawCommand::DrawLine(Point::new(3, 4), Point::new(13, 14)),
        ]
    );
}

#[test]
fn population_is_monotonic() {
    let mut registry = ShapeRegistry::new();
    let requests = [
        ShapeKind::Line,
        ShapeKind::Line,
        ShapeKind::OvalFilled,
        ShapeKind::Line,
        ShapeKind::OvalFilled,
        ShapeKind::OvalUnfilled,
    ];

    let mut distinct = Vec::new();
    let mut previous = 0;
    for kind in requests {
        registry.get_shape(kind);
        if !distinct.contains(&kind) {
            distinct.push(kind);
        }

        assert!(registry.len() >= previous);
        assert!(registry.len() <= distinct.len());
        previous = registry.len();
    }
    assert_eq!(registry.len(), 3);
}

#[test]
fn one_shape_many_places_on_pixels() {
    let mut registry = ShapeRegistry::new();
    let mut canvas = RasterCanvas::new(100, 100).unwrap();
    canvas.clear(Color::WHITE);

    let oval = registry.get_shape(ShapeKind::OvalFilled);
    oval.draw(&mut canvas, 0, 0, 20, 20, Color::RED);
    oval.draw(&mut canvas, 50, 50, 20, 20, Color::BLUE);

    assert_eq!(canvas.pixel(10, 10), Some(Color::RED));
    assert_eq!(canvas.pixel(60, 60), Some(Color::BLUE));
    assert_eq!(canvas.pixel(35, 35), Some(Color::WHITE));
    assert_eq!(registry.len(), 1);
}

/// A canvas that only counts calls, to check shapes work against any `Canvas`
#[derive(Default)]
struct CountingCanvas {
    color: Color,
    outlines: usize,
    fills: usize,
}

impl Canvas for CountingCanvas {
    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn color(&self) -> Color {
        self.color
    }

    fn draw_oval(&mut self, _bounds: Bounds) {
        self.outlines += 1;
    }

    fn fill_oval(&mut self, _bounds: Bounds) {
        self.fills += 1;
    }

    fn draw_line(&mut self, _from: Point, _to: Point) {}

    fn clear(&mut self, _color: Color) {}
}

#[test_case(ShapeKind::OvalFilled, 1 ; "filled oval fills")]
#[test_case(ShapeKind::OvalUnfilled, 0 ; "unfilled oval does not")]
fn fill_only_when_filled(kind: ShapeKind, fills: usize) {
    let mut registry = ShapeRegistry::new();
    let mut canvas = CountingCanvas::default();

    registry
        .get_shape(kind)
        .draw(&mut canvas, 1, 2, 3, 4, Color::MAGENTA);

    assert_eq!(canvas.color, Color::MAGENTA);
    assert_eq!(canvas.outlines, 1);
    assert_eq!(canvas.fills, fills);
}

#[test]
fn shapes_usable_as_trait_objects() {
    let mut registry = ShapeRegistry::new();
    let shapes: Vec<Arc<dyn Shape>> = ShapeKind::ALL
        .into_iter()
        .map(|kind| registry.get_shape(kind))
        .collect();

    let mut canvas = RecordingCanvas::new();
    for shape in &shapes {
        shape.draw(&mut canvas, 0, 0, 1, 1, Color::BLACK);
    }

    // set_color + outline + fill, set_color + outline, set_color + line
    assert_eq!(canvas.len(), 7);
}

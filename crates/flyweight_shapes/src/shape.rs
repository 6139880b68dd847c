use flyweight_canvas::Canvas;
use flyweight_shared::color::Color;
use flyweight_shared::geo::{Bounds, Coord};
use log::info;
use std::fmt::Debug;

/// Anything that can render itself onto a canvas from extrinsic position, size and color.
/// Implementations are shared between all users, so they must not keep per-draw state.
pub trait Shape: Debug + Send + Sync {
    fn draw(
        &self,
        canvas: &mut dyn Canvas,
        x: Coord,
        y: Coord,
        width: Coord,
        height: Coord,
        color: Color,
    );
}

/// Ellipse bounded by the draw box. The fill flag is fixed at construction.
#[derive(Debug)]
pub struct Oval {
    fill: bool,
}

impl Oval {
    #[must_use]
    pub fn new(fill: bool) -> Self {
        info!("creating oval shape (fill: {fill})");
        Self { fill }
    }

    pub fn is_filled(&self) -> bool {
        self.fill
    }
}

impl Shape for Oval {
    fn draw(
        &self,
        canvas: &mut dyn Canvas,
        x: Coord,
        y: Coord,
        width: Coord,
        height: Coord,
        color: Color,
    ) {
        let bounds = Bounds::new(x, y, width, height);

        canvas.set_color(color);
        canvas.draw_oval(bounds);
        if self.fill {
            canvas.fill_oval(bounds);
        }
    }
}

/// Straight line from the top-left to the bottom-right corner of the draw box
#[derive(Debug)]
pub struct Line {}

impl Line {
    #[must_use]
    pub fn new() -> Self {
        info!("creating line shape");
        Self {}
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

impl Shape for Line {
    fn draw(
        &self,
        canvas: &mut dyn Canvas,
        x: Coord,
        y: Coord,
        width: Coord,
        height: Coord,
        color: Color,
    ) {
        let bounds = Bounds::new(x, y, width, height);

        canvas.set_color(color);
        canvas.draw_line(bounds.origin, bounds.end());
    }
}

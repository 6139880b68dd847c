//! Canvases
//!
//! A canvas is the caller-supplied surface a shape draws onto. Shapes only ever talk to the
//! [`Canvas`] trait, so any backend that can set a color, stroke or fill an ellipse and draw a
//! line can host them.

use flyweight_shared::color::Color;
use flyweight_shared::geo::{Bounds, Point};

pub use raster::{RasterCanvas, MAX_PIXELS};
pub use recording::{DrawCommand, RecordingCanvas};

mod raster;
mod recording;

pub trait Canvas {
    /// Sets the color used by all following draw operations
    fn set_color(&mut self, color: Color);

    /// Returns the current drawing color
    fn color(&self) -> Color;

    /// Strokes the outline of the ellipse inscribed in `bounds`
    fn draw_oval(&mut self, bounds: Bounds);

    /// Fills the ellipse inscribed in `bounds`
    fn fill_oval(&mut self, bounds: Bounds);

    /// Draws a one pixel wide line between both points (inclusive)
    fn draw_line(&mut self, from: Point, to: Point);

    /// Paints the whole canvas with the given color. Does not change the drawing color.
    fn clear(&mut self, color: Color);
}

use crate::Canvas;
use flyweight_shared::color::Color;
use flyweight_shared::geo::{Bounds, Point};
use flyweight_shared::types::{Error, Result};
use image::{ImageFormat, Rgba, RgbaImage};
use log::debug;
use std::ops::Range;
use std::path::Path;

/// Largest number of pixels a raster canvas may hold (256 MiB of RGBA data)
pub const MAX_PIXELS: u64 = 1 << 26;

/// Software canvas backed by an RGBA pixel buffer. Pixels are overwritten, not blended, and
/// anything outside the buffer is clipped.
pub struct RasterCanvas {
    image: RgbaImage,
    color: Color,
}

impl RasterCanvas {
    /// Creates a canvas of the given size. Fails when the size exceeds [`MAX_PIXELS`].
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixels = u64::from(width).checked_mul(u64::from(height));
        if !matches!(pixels, Some(pixels) if pixels <= MAX_PIXELS) {
            return Err(Error::Config(format!(
                "canvas of {width}x{height} exceeds the limit of {MAX_PIXELS} pixels"
            ))
            .into());
        }

        debug!("creating raster canvas of {width}x{height}");

        Ok(Self {
            image: RgbaImage::new(width, height),
            color: Color::default(),
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Returns the pixel at the given position, or None when it lies outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.image
            .get_pixel_checked(x, y)
            .map(|Rgba([r, g, b, a])| Color::rgba8(*r, *g, *b, *a))
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Writes the canvas as a PNG file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        debug!("saving raster canvas to {}", path.display());

        self.image.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }

    fn max_x(&self) -> i64 {
        i64::from(self.image.width())
    }

    fn max_y(&self) -> i64 {
        i64::from(self.image.height())
    }

    fn put(&mut self, x: i64, y: i64) {
        if x < 0 || y < 0 || x >= self.max_x() || y >= self.max_y() {
            return;
        }

        self.image
            .put_pixel(x as u32, y as u32, Rgba(self.color.to_array()));
    }

    /// Pixel columns of `bounds` that fall on the canvas
    fn visible_columns(&self, bounds: &Bounds) -> Range<i64> {
        let start = i64::from(bounds.x()).max(0);
        let end = (i64::from(bounds.x()) + i64::from(bounds.width())).min(self.max_x());
        start..end.max(start)
    }

    /// Pixel rows of `bounds` that fall on the canvas
    fn visible_rows(&self, bounds: &Bounds) -> Range<i64> {
        let start = i64::from(bounds.y()).max(0);
        let end = (i64::from(bounds.y()) + i64::from(bounds.height())).min(self.max_y());
        start..end.max(start)
    }

    /// Clips the segment to the canvas (Liang-Barsky). Returns None when no part of it is
    /// visible.
    fn clip_line(&self, from: Point, to: Point) -> Option<((i64, i64), (i64, i64))> {
        if self.max_x() == 0 || self.max_y() == 0 {
            return None;
        }

        let (x0, y0) = (f64::from(from.x), f64::from(from.y));
        let dx = f64::from(to.x) - x0;
        let dy = f64::from(to.y) - y0;
        let x_max = (self.max_x() - 1) as f64;
        let y_max = (self.max_y() - 1) as f64;

        let mut t0 = 0.0_f64;
        let mut t1 = 1.0_f64;
        for (p, q) in [(-dx, x0), (dx, x_max - x0), (-dy, y0), (dy, y_max - y0)] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }

            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
        }

        if t0 > t1 {
            return None;
        }

        let point = |t: f64| {
            (
                ((x0 + t * dx).round() as i64).clamp(0, self.max_x() - 1),
                ((y0 + t * dy).round() as i64).clamp(0, self.max_y() - 1),
            )
        };

        Some((point(t0), point(t1)))
    }
}

/// Ellipse inscribed in a bounding box, tested at pixel centers
struct Ellipse {
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
}

impl Ellipse {
    fn new(bounds: &Bounds) -> Self {
        let rx = f64::from(bounds.width()) / 2.0;
        let ry = f64::from(bounds.height()) / 2.0;

        Self {
            cx: f64::from(bounds.x()) + rx,
            cy: f64::from(bounds.y()) + ry,
            rx,
            ry,
        }
    }

    fn contains(&self, x: i64, y: i64) -> bool {
        let dx = (x as f64 + 0.5 - self.cx) / self.rx;
        let dy = (y as f64 + 0.5 - self.cy) / self.ry;
        dx * dx + dy * dy <= 1.0
    }

    /// A pixel is on the outline when it is inside and one of its 4-neighbours is not
    fn on_outline(&self, x: i64, y: i64) -> bool {
        self.contains(x, y)
            && !(self.contains(x - 1, y)
                && self.contains(x + 1, y)
                && self.contains(x, y - 1)
                && self.contains(x, y + 1))
    }
}

impl Canvas for RasterCanvas {
    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn color(&self) -> Color {
        self.color
    }

    fn draw_oval(&mut self, bounds: Bounds) {
        if bounds.size.is_empty() {
            return;
        }

        let ellipse = Ellipse::new(&bounds);
        for y in self.visible_rows(&bounds) {
            for x in self.visible_columns(&bounds) {
                if ellipse.on_outline(x, y) {
                    self.put(x, y);
                }
            }
        }
    }

    fn fill_oval(&mut self, bounds: Bounds) {
        if bounds.size.is_empty() {
            return;
        }

        let ellipse = Ellipse::new(&bounds);
        for y in self.visible_rows(&bounds) {
            for x in self.visible_columns(&bounds) {
                if ellipse.contains(x, y) {
                    self.put(x, y);
                }
            }
        }
    }

    fn draw_line(&mut self, from: Point, to: Point) {
        // Only the visible part is walked, so the work is bounded by the canvas size
        let Some(((mut x, mut y), (x1, y1))) = self.clip_line(from, to) else {
            return;
        };

        // Bresenham
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.put(x, y);
            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn clear(&mut self, color: Color) {
        let pixel = Rgba(color.to_array());
        for p in self.image.pixels_mut() {
            *p = pixel;
        }
    }
}

use derive_more::Display;

/// Coordinates are in canvas pixels and may be negative (partially off-canvas shapes).
pub type Coord = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
#[display("({x}, {y})")]
pub struct Point {
    pub x: Coord,
    pub y: Coord,
}

impl Point {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
#[display("{width}x{height}")]
pub struct Size {
    pub width: Coord,
    pub height: Coord,
}

impl Size {
    pub fn new(width: Coord, height: Coord) -> Self {
        Self { width, height }
    }

    pub fn uniform(size: Coord) -> Self {
        Self {
            width: size,
            height: size,
        }
    }

    /// A size with a zero or negative dimension covers no pixels
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// The box a shape is drawn into. This is the extrinsic state handed to a shape on every draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
#[display("{origin} {size}")]
pub struct Bounds {
    pub origin: Point,
    pub size: Size,
}

impl Bounds {
    pub fn new(x: Coord, y: Coord, width: Coord, height: Coord) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn x(&self) -> Coord {
        self.origin.x
    }

    pub fn y(&self) -> Coord {
        self.origin.y
    }

    pub fn width(&self) -> Coord {
        self.size.width
    }

    pub fn height(&self) -> Coord {
        self.size.height
    }

    /// Bottom-right corner (exclusive)
    pub fn end(&self) -> Point {
        Point::new(
            self.origin.x.saturating_add(self.size.width),
            self.origin.y.saturating_add(self.size.height),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bounds_accessors() {
        let b = Bounds::new(10, 20, 30, 40);
        assert_eq!(b.x(), 10);
        assert_eq!(b.y(), 20);
        assert_eq!(b.width(), 30);
        assert_eq!(b.height(), 40);
        assert_eq!(b.end(), Point::new(40, 60));
        assert_eq!(b.to_string(), "(10, 20) 30x40");
    }

    #[test]
    fn empty_sizes() {
        assert!(Size::new(0, 10).is_empty());
        assert!(Size::new(10, -1).is_empty());
        assert!(!Size::uniform(1).is_empty());
    }
}

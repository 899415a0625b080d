//! Layout primitives shared by containers, the pointer tracker and the canvas
//!
//! All coordinates are integer logical pixels. Positions may be negative
//! (a child scrolled above its viewport), sizes are never negative once
//! produced by the layout code.

/// Rectangle for layout calculations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at the origin
    pub fn sized(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Same rectangle moved by (dx, dy)
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Overlapping region of two rectangles (zero-sized when disjoint)
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        Rect::new(x0, y0, (x1 - x0).max(0), (y1 - y0).max(0))
    }
}

/// Axis a container lays its children along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Children arranged left-to-right
    Horizontal,
    /// Children arranged top-to-bottom
    Vertical,
}

impl Orientation {
    /// Extent of `(width, height)` along this axis
    pub fn main(&self, width: i32, height: i32) -> i32 {
        match self {
            Orientation::Horizontal => width,
            Orientation::Vertical => height,
        }
    }

    /// Extent of `(width, height)` across this axis
    pub fn cross(&self, width: i32, height: i32) -> i32 {
        match self {
            Orientation::Horizontal => height,
            Orientation::Vertical => width,
        }
    }

    /// Build a rectangle from main-axis and cross-axis spans
    pub fn rect(&self, main_start: i32, main_len: i32, cross_start: i32, cross_len: i32) -> Rect {
        match self {
            Orientation::Horizontal => Rect::new(main_start, cross_start, main_len, cross_len),
            Orientation::Vertical => Rect::new(cross_start, main_start, cross_len, main_len),
        }
    }

    /// Pick the component of a 2D vector along this axis
    pub fn pick(&self, x: i32, y: i32) -> i32 {
        match self {
            Orientation::Horizontal => x,
            Orientation::Vertical => y,
        }
    }
}

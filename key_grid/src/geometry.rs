//! Pixel-space points and rectangles.

/// A pixel coordinate.  May lie outside the canvas (landmarks are not
/// clamped by the detector).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    /// Scale a normalized (0.0–1.0) coordinate pair to pixels, truncating
    /// toward zero.
    pub fn from_normalized(nx: f32, ny: f32, width: u32, height: u32) -> Self {
        Point {
            x: (nx * width as f32) as i32,
            y: (ny * height as f32) as i32,
        }
    }
}

/// Euclidean distance between two pixel points.  Widened to `i64` so points
/// anywhere in the `i32` range never overflow.
pub fn distance(a: Point, b: Point) -> f32 {
    let dx = (a.x as i64 - b.x as i64) as f64;
    let dy = (a.y as i64 - b.y as i64) as f64;
    dx.hypot(dy) as f32
}

/// Axis-aligned rectangle, `left`/`top` inclusive edges, `right`/`bottom`
/// the far edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left:   i32,
    pub top:    i32,
    pub right:  i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Rect { left, top, right, bottom }
    }

    pub fn width(&self)  -> i32 { self.right - self.left }
    pub fn height(&self) -> i32 { self.bottom - self.top }

    pub fn center(&self) -> Point {
        Point::new((self.left + self.right) / 2, (self.top + self.bottom) / 2)
    }

    /// Strict containment: a point on any edge is outside.
    pub fn contains(&self, p: Point) -> bool {
        self.left < p.x && p.x < self.right && self.top < p.y && p.y < self.bottom
    }

    /// True if the interiors of the two rectangles intersect.  Rectangles
    /// that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// Clip to `[0, width] × [0, height]`.
    pub fn clamp_to(&self, width: i32, height: i32) -> Rect {
        Rect {
            left:   self.left.clamp(0, width),
            top:    self.top.clamp(0, height),
            right:  self.right.clamp(0, width),
            bottom: self.bottom.clamp(0, height),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

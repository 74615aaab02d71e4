//! Points, sizes, pixel rectangles, and padding.
//!
//! Layout geometry is kept in `f64` and never rounded; [`PixelRect`] is the
//! only integer type and is produced at the pixel-grid boundary.

use num_traits::Float;

/// A point in layout coordinates (y grows downwards).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f64 {
        Float::hypot(self.x - other.x, self.y - other.y)
    }

    /// Rotate this point by `degrees` about `pivot`.
    ///
    /// Positive angles turn clockwise on screen, since y points down.
    pub fn rotate_about(self, pivot: Point, degrees: f64) -> Point {
        let (sin, cos) = Float::sin_cos(Float::to_radians(degrees));
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        Point {
            x: pivot.x + dx * cos - dy * sin,
            y: pivot.y + dx * sin + dy * cos,
        }
    }

    /// Translate by `(dx, dy)`.
    pub fn offset(self, dx: f64, dy: f64) -> Point {
        Point {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Width × height dimensions in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Axis-aligned square in layout coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Square {
    pub left: f64,
    pub top: f64,
    pub side: f64,
}

impl Square {
    /// Square of side `2 * radius` centered at `center`.
    pub fn around(center: Point, radius: f64) -> Self {
        Self {
            left: center.x - radius,
            top: center.y - radius,
            side: radius * 2.0,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.side
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.side
    }

    pub fn center(&self) -> Point {
        let half = self.side * 0.5;
        Point::new(self.left + half, self.top + half)
    }
}

/// Integer rectangle on the pixel grid, edges exclusive on the right/bottom.
///
/// Coordinates may be negative: content bounds for [`FitType::Start`](crate::FitType::Start)
/// and [`FitType::End`](crate::FitType::End) overhang the circle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelRect {
    /// The empty rect at the origin.
    pub const EMPTY: Self = Self::new(0, 0, 0, 0);

    /// Create a rect from its edges.
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Whether the rect covers no pixels.
    pub const fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    /// Intersect with `(0, 0, width, height)`, or `None` if nothing remains.
    pub fn clip_to(self, width: u32, height: u32) -> Option<Self> {
        let clipped = Self {
            left: self.left.max(0),
            top: self.top.max(0),
            right: self.right.min(width.min(i32::MAX as u32) as i32),
            bottom: self.bottom.min(height.min(i32::MAX as u32) as i32),
        };
        if clipped.is_empty() {
            None
        } else {
            Some(clipped)
        }
    }
}

/// Insets around the content square, in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Padding {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Padding {
    /// Same inset on all four sides.
    pub const fn uniform(px: u32) -> Self {
        Self {
            top: px,
            right: px,
            bottom: px,
            left: px,
        }
    }

    /// Create padding in CSS order: top, right, bottom, left.
    pub const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Where the content square sits inside a padded surface.
///
/// The square side is the smaller of the padded width and height; the square
/// is centered along the longer axis.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ContentFrame {
    /// Top-left corner of the content square on the surface.
    pub origin: Point,
    /// Side of the content square. Zero or negative means nothing to draw.
    pub side: f64,
}

impl ContentFrame {
    /// Place the content square inside `surface` minus `padding`.
    pub fn new(surface: Size, padding: Padding) -> Self {
        let width = surface.width as i64 - padding.left as i64 - padding.right as i64;
        let height = surface.height as i64 - padding.top as i64 - padding.bottom as i64;
        let side = width.min(height);
        let (mut x, mut y) = (padding.left as f64, padding.top as f64);
        if width > height {
            x += (width - height) as f64 * 0.5;
        } else {
            y += (height - width) as f64 * 0.5;
        }
        Self {
            origin: Point::new(x, y),
            side: side as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        a.distance(b) < 1e-9
    }

    #[test]
    fn rotate_quarter_turn_is_clockwise_on_screen() {
        // Top-left quadrant center → top-right under +90°.
        let p = Point::new(25.0, 25.0).rotate_about(Point::new(50.0, 50.0), 90.0);
        assert!(close(p, Point::new(75.0, 25.0)), "{p:?}");
    }

    #[test]
    fn rotate_full_turn_returns_home() {
        let start = Point::new(3.0, -7.5);
        let p = start.rotate_about(Point::new(1.0, 2.0), 360.0);
        assert!(close(p, start));
    }

    #[test]
    fn square_around_center() {
        let s = Square::around(Point::new(10.0, 20.0), 5.0);
        assert_eq!(s.left, 5.0);
        assert_eq!(s.top, 15.0);
        assert_eq!(s.right(), 15.0);
        assert_eq!(s.bottom(), 25.0);
        assert_eq!(s.center(), Point::new(10.0, 20.0));
    }

    #[test]
    fn pixel_rect_clip() {
        let r = PixelRect::new(-5, -5, 10, 10);
        assert_eq!(r.clip_to(8, 20), Some(PixelRect::new(0, 0, 8, 10)));
        assert_eq!(PixelRect::new(10, 10, 20, 20).clip_to(5, 5), None);
    }

    #[test]
    fn frame_landscape_centers_horizontally() {
        let f = ContentFrame::new(Size::new(200, 100), Padding::default());
        assert_eq!(f.side, 100.0);
        assert_eq!(f.origin, Point::new(50.0, 0.0));
    }

    #[test]
    fn frame_portrait_with_padding() {
        let f = ContentFrame::new(Size::new(100, 150), Padding::new(10, 5, 0, 15));
        // padded: 80 × 140
        assert_eq!(f.side, 80.0);
        assert_eq!(f.origin, Point::new(15.0, 10.0 + 30.0));
    }

    #[test]
    fn frame_padding_larger_than_surface() {
        let f = ContentFrame::new(Size::new(10, 10), Padding::uniform(8));
        assert!(f.side <= 0.0);
    }
}

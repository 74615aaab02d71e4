//! Destination rectangles for content inside a circle.
//!
//! A circle of radius `r` always shows a `2r` square window. Content whose
//! intrinsic size is not square is either squeezed into that window
//! ([`FitType::Fit`]) or scaled so its short side spans the window and
//! positioned by the fit type.

use num_traits::Float;

use crate::geometry::{PixelRect, Point, Size};

/// How content with a non-square intrinsic size fills its circle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FitType {
    /// Stretch to the circle's bounding square, ignoring aspect ratio.
    Fit,
    /// Scale to cover the circle, centered.
    #[default]
    Center,
    /// Scale to cover the circle, aligned to the top-left.
    Start,
    /// Scale to cover the circle, aligned to the bottom-right.
    End,
}

impl FitType {
    /// Pixel bounds for content of `intrinsic` size in a circle at `center`.
    ///
    /// Unknown, degenerate, or square intrinsic sizes always get the circle's
    /// bounding square. A non-positive radius yields [`PixelRect::EMPTY`].
    /// Left and top truncate toward zero; right and bottom round.
    pub fn content_bounds(self, center: Point, radius: f64, intrinsic: Option<Size>) -> PixelRect {
        if radius <= 0.0 {
            return PixelRect::EMPTY;
        }

        let (half_w, half_h) = match intrinsic {
            Some(Size { width, height })
                if width > 0 && height > 0 && width != height && self != FitType::Fit =>
            {
                let (w, h) = (width as f64, height as f64);
                let scale = radius / w.min(h);
                (w * scale, h * scale)
            }
            _ => (radius, radius),
        };

        let (mut left, mut top) = (-half_w, -half_h);
        let (mut right, mut bottom) = (half_w, half_h);
        let dir = match self {
            FitType::Start => 1.0,
            FitType::End => -1.0,
            FitType::Fit | FitType::Center => 0.0,
        };
        if dir != 0.0 {
            let dx = (half_w - radius) * dir;
            let dy = (half_h - radius) * dir;
            left += dx;
            right += dx;
            top += dy;
            bottom += dy;
        }

        PixelRect::new(
            (left + center.x) as i32,
            (top + center.y) as i32,
            Float::round(right + center.x) as i32,
            Float::round(bottom + center.y) as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const C: Point = Point::new(50.0, 50.0);

    #[test]
    fn square_content_gets_bounding_square() {
        for fit in [FitType::Fit, FitType::Center, FitType::Start, FitType::End] {
            let r = fit.content_bounds(C, 20.0, Some(Size::new(64, 64)));
            assert_eq!(r, PixelRect::new(30, 30, 70, 70), "{fit:?}");
        }
    }

    #[test]
    fn unknown_size_gets_bounding_square() {
        let r = FitType::Center.content_bounds(C, 20.0, None);
        assert_eq!(r, PixelRect::new(30, 30, 70, 70));
        let r = FitType::Start.content_bounds(C, 20.0, Some(Size::new(0, 10)));
        assert_eq!(r, PixelRect::new(30, 30, 70, 70));
    }

    #[test]
    fn fit_ignores_aspect() {
        let r = FitType::Fit.content_bounds(C, 20.0, Some(Size::new(200, 100)));
        assert_eq!(r, PixelRect::new(30, 30, 70, 70));
    }

    #[test]
    fn center_covers_circle() {
        // 2:1 landscape → 80×40 around the center.
        let r = FitType::Center.content_bounds(C, 20.0, Some(Size::new(200, 100)));
        assert_eq!(r, PixelRect::new(10, 30, 90, 70));
        assert_eq!(r.height(), 40);
    }

    #[test]
    fn start_aligns_top_left() {
        let r = FitType::Start.content_bounds(C, 20.0, Some(Size::new(200, 100)));
        assert_eq!(r, PixelRect::new(30, 30, 110, 70));
    }

    #[test]
    fn end_aligns_bottom_right() {
        let r = FitType::End.content_bounds(C, 20.0, Some(Size::new(100, 200)));
        // Portrait 40×80: bottom edge on the circle's bottom.
        assert_eq!(r, PixelRect::new(30, -10, 70, 70));
    }

    #[test]
    fn zero_radius_is_empty() {
        assert_eq!(
            FitType::Center.content_bounds(C, 0.0, Some(Size::new(1, 1))),
            PixelRect::EMPTY
        );
    }

    #[test]
    fn fractional_edges_truncate_then_round() {
        let r = FitType::Center.content_bounds(Point::new(10.6, 10.6), 5.0, None);
        // left 5.6 → 5, right 15.6 → 16
        assert_eq!(r, PixelRect::new(5, 5, 16, 16));
    }
}

//! Steiner-circle ring layout for up to five equal circles.
//!
//! Computes the shared radius, every circle center, and the gap centers used
//! to separate neighbouring circles when compositing. Pure geometry, no
//! allocations, `no_std` compatible.
//!
//! # Example
//!
//! ```
//! use ringpack::{Point, RingLayout};
//!
//! let layout = RingLayout::compute(100.0, 4).unwrap();
//! assert_eq!(layout.radius(), 25.0);
//! assert_eq!(layout.slot(0).unwrap().center, Point::new(25.0, 25.0));
//! ```
//!
//! ```text
//!     N = 3                N = 4                N = 5
//!     ┌──────────┐         ┌──────────┐         ┌──────────┐
//!     │   (0)    │         │ (0)  (1) │         │   (0)    │
//!     │ (2)  (1) │         │ (3)  (2) │         │(4)    (1)│
//!     └──────────┘         └──────────┘         │ (3)  (2) │
//!                                               └──────────┘
//! ```

use core::f64::consts::PI;
use core::fmt;

use num_traits::Float;

use crate::geometry::{Point, Square};

/// Maximum number of circles in one ring.
pub const MAX_ITEMS: usize = 5;

/// Geometry for one circle of the ring.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Slot {
    /// Circle center, before the layout's vertical offset is applied.
    pub center: Point,
    /// Square of side `2r` centered at [`center`](Self::center).
    pub bounds: Square,
    /// Center of the hole this circle must punch against its ring neighbour.
    /// `None` when the circle has no gap.
    pub gap_center: Option<Point>,
}

impl Slot {
    /// Whether this circle punches a separating hole.
    pub fn has_gap(&self) -> bool {
        self.gap_center.is_some()
    }
}

/// Computed ring layout for a square content area.
///
/// Every circle shares one radius. Slot geometry is in content-square
/// coordinates; [`vertical_offset`](Self::vertical_offset) is added at paint
/// time to center rings that are not symmetric about the horizontal midline.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RingLayout {
    content_size: f64,
    radius: f64,
    vertical_offset: f64,
    slots: [Slot; MAX_ITEMS],
    len: usize,
}

impl RingLayout {
    /// Layout with no circles.
    pub const EMPTY: Self = Self {
        content_size: 0.0,
        radius: 0.0,
        vertical_offset: 0.0,
        slots: [Slot {
            center: Point::new(0.0, 0.0),
            bounds: Square {
                left: 0.0,
                top: 0.0,
                side: 0.0,
            },
            gap_center: None,
        }; MAX_ITEMS],
        len: 0,
    };

    /// Compute the ring layout for `count` circles packed into a square of
    /// side `content_size`.
    ///
    /// A zero count or a non-positive size yields an empty layout.
    ///
    /// Odd rings rotate about the circumscribing circle's center `(c, R)`
    /// rather than the reference widget's `(c, c + vertical_offset)`, so
    /// neighbours are exactly tangent; circles after the first land up to
    /// about 1% of the side away from that widget's positions.
    pub fn compute(content_size: f64, count: usize) -> Result<Self, LayoutError> {
        if count > MAX_ITEMS {
            return Err(LayoutError::TooManyItems { count });
        }
        if !content_size.is_finite() {
            return Err(LayoutError::NonFiniteSize);
        }
        let mut layout = Self {
            content_size: content_size.max(0.0),
            ..Self::EMPTY
        };
        if count == 0 || content_size <= 0.0 {
            return Ok(layout);
        }

        let size = content_size;
        let n = count as f64;
        let center = size * 0.5;

        // Step 1: Shared radius, vertical offset and rotation pivot.
        let mut pivot = Point::new(center, center);
        let radius = match count {
            1 => size * 0.5,
            2 => size / (2.0 + 2.0 * Float::sin(PI / 4.0)),
            4 => size / 4.0,
            _ => {
                let r = size / (2.0 * (2.0 * Float::sin((n - 2.0) * PI / (2.0 * n)) + 1.0));
                let sin_n = Float::sin(PI / n);
                // Radius of the circle every circle is inscribed in.
                let outer = r * ((sin_n + 1.0) / sin_n);
                layout.vertical_offset = (size - outer - r * (1.0 + 1.0 / Float::tan(PI / n))) / 2.0;
                // Top circle touches the top edge, so the ring center sits one
                // outer radius down.
                pivot = Point::new(center, outer);
                r
            }
        };
        layout.radius = radius;

        // Step 2: Walk the ring clockwise from the start point.
        let start = if count % 2 == 0 {
            Point::new(radius, radius)
        } else {
            Point::new(center, radius)
        };
        let step = 360.0 / n;
        let mut previous = start;
        for i in 0..count {
            let point = if i == 0 {
                start
            } else {
                start.rotate_about(pivot, step * i as f64)
            };
            layout.slots[i] = Slot {
                center: point,
                bounds: Square::around(point, radius),
                gap_center: if i > 0 { Some(previous) } else { None },
            };
            previous = point;
        }
        layout.len = count;

        // Step 3: Close the ring.
        if count > 2 {
            layout.slots[0].gap_center = Some(layout.slots[count - 1].center);
        }

        log::debug!(
            "ring layout: n={count} size={size} r={radius:.3} offset_y={:.3}",
            layout.vertical_offset
        );
        Ok(layout)
    }

    /// Side of the square the circles are packed into.
    pub fn content_size(&self) -> f64 {
        self.content_size
    }

    /// Shared circle radius. Zero for an empty layout.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Vertical shift applied at paint time. Nonzero only for 3 and 5 circles.
    pub fn vertical_offset(&self) -> f64 {
        self.vertical_offset
    }

    /// Diameter of one circle rounded to whole pixels.
    pub fn drawable_size(&self) -> u32 {
        Float::round(self.radius * 2.0) as u32
    }

    /// Number of circles.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.len == 0 || self.radius <= 0.0
    }

    /// Geometry of every circle, in ring order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots[..self.len]
    }

    /// Geometry of circle `index`, if present.
    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots().get(index)
    }

    /// Center of circle `index` with the vertical offset applied.
    pub fn placed_center(&self, index: usize) -> Option<Point> {
        self.slot(index)
            .map(|s| s.center.offset(0.0, self.vertical_offset))
    }
}

/// Radius of the hole punched at a gap center.
///
/// At `gap_fraction == 0` the hole exactly covers the neighbour's circle; at
/// `1.0` it is twice the circle radius.
pub fn gap_radius(radius: f64, gap_fraction: f32) -> f64 {
    radius * (1.0 + gap_fraction as f64)
}

/// Ring layout computation error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// More circles than [`MAX_ITEMS`].
    TooManyItems { count: usize },
    /// Content size is NaN or infinite.
    NonFiniteSize,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyItems { count } => {
                write!(f, "{count} items requested, a ring holds at most {MAX_ITEMS}")
            }
            Self::NonFiniteSize => f.write_str("content size is not finite"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LayoutError {}

//! Gap-masked compositing of a ring layout.
//!
//! Each circle is drawn into its own off-screen layer the size of the content
//! square, masked there, and only then merged onto the surface. Erasing the
//! gap hole inside the layer therefore never touches circles drawn earlier.
//!
//! ```text
//!   paint content ──► keep inside circle ──► erase gap hole ──► source-over
//!   (layer)           (× coverage)          (× 1 − coverage)    onto surface
//! ```

use num_traits::Float;

use crate::geometry::Point;
use crate::layout::{RingLayout, gap_radius};
use crate::pixmap::Pixmap;

/// Renders ring layouts, reusing one scratch layer across items and frames.
#[derive(Clone, Debug)]
pub struct Compositor {
    layer: Pixmap,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compositor {
    pub fn new() -> Self {
        Self {
            layer: Pixmap::new(0, 0),
        }
    }

    /// Draw every circle of `layout` onto `surface`.
    ///
    /// `origin` is the top-left corner of the content square on the surface;
    /// the layout's vertical offset is added to it. `paint(i, layer)` paints
    /// item `i` into a cleared layer whose coordinates match the layout's.
    /// `gap_fraction` is expected in `[0, 1]`; a gap is only punched when it
    /// is positive.
    pub fn render<F>(
        &mut self,
        surface: &mut Pixmap,
        origin: Point,
        layout: &RingLayout,
        gap_fraction: f32,
        mut paint: F,
    ) where
        F: FnMut(usize, &mut Pixmap),
    {
        if layout.is_empty() {
            return;
        }

        let side = Float::ceil(layout.content_size()) as u32;
        if self.layer.width() != side || self.layer.height() != side {
            self.layer.reset(side, side);
        }

        let radius = layout.radius();
        let hole = gap_radius(radius, gap_fraction);
        let dx = Float::round(origin.x) as i32;
        let dy = Float::round(origin.y + layout.vertical_offset()) as i32;

        for (i, slot) in layout.slots().iter().enumerate() {
            self.layer.clear();
            paint(i, &mut self.layer);
            self.layer.retain_circle(slot.center, radius);
            if let Some(gap_center) = slot.gap_center
                && gap_fraction > 0.0
            {
                self.layer.erase_circle(gap_center, hole);
            }
            log::trace!(
                "composite slot {i}: center=({:.2}, {:.2}) gap={:?}",
                slot.center.x,
                slot.center.y,
                slot.gap_center
            );
            surface.draw_layer(&self.layer, dx, dy);
        }
    }
}

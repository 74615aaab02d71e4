//! SVG diagram of a ring layout.
//!
//! Draws the content square, each circle with its index, the gap hole every
//! circle punches (dashed), and a caption with the radius and vertical
//! offset. Useful for eyeballing packings at different counts.
//!
//! # Example
//!
//! ```
//! use ringpack::{RingLayout, svg::render_ring_svg};
//!
//! let layout = RingLayout::compute(120.0, 5).unwrap();
//! let svg = render_ring_svg(&layout, 0.25);
//! assert!(svg.starts_with("<svg"));
//! ```

use std::fmt::Write;

use crate::layout::{RingLayout, gap_radius};

/// Maximum pixel side of the drawn content square.
const MAX_PANEL: f64 = 240.0;
/// Margin around the panel.
const MARGIN: f64 = 30.0;
/// Height of the caption area under the panel.
const CAPTION_H: f64 = 40.0;

/// Render `layout` as a complete SVG document.
///
/// Geometry is scaled so the content square is at most 240 px wide; an empty
/// layout renders just the (possibly zero-sized) square and caption.
pub fn render_ring_svg(layout: &RingLayout, gap_fraction: f32) -> String {
    let size = layout.content_size();
    let scale = if size > 0.0 { MAX_PANEL / size } else { 1.0 };
    let panel = size * scale;
    let total_w = panel + 2.0 * MARGIN;
    let total_h = panel + 2.0 * MARGIN + CAPTION_H;

    let mut svg = String::with_capacity(2048);
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {:.1} {:.1}">"#,
        total_w as u32, total_h as u32, total_w, total_h
    );

    svg.push_str(
        r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .caption { font-size: 12px; fill: #333; }
  .index { font-size: 13px; font-weight: bold; fill: #fff; }
  .square { fill: #e8e8e8; stroke: #999; stroke-width: 1; }
  .circle { fill: #6ba3d6; stroke: #2c6faa; stroke-width: 1.5; }
  .hole { fill: none; stroke: #c0504d; stroke-width: 1; stroke-dasharray: 4,2; }
  @media (prefers-color-scheme: dark) {
    .caption { fill: #e0e0e0; }
    .square { fill: #2d2d2d; stroke: #555; }
    .circle { fill: #3a72a4; stroke: #5a9fd4; }
    .hole { stroke: #e07b78; }
  }
</style>
"##,
    );

    let _ = writeln!(
        svg,
        r#"<rect x="{MARGIN:.1}" y="{MARGIN:.1}" width="{panel:.1}" height="{panel:.1}" class="square"/>"#
    );

    let r = layout.radius() * scale;
    let hole = gap_radius(layout.radius(), gap_fraction) * scale;
    let to_panel = |x: f64, y: f64| {
        (
            MARGIN + x * scale,
            MARGIN + (y + layout.vertical_offset()) * scale,
        )
    };

    for (i, slot) in layout.slots().iter().enumerate() {
        let (cx, cy) = to_panel(slot.center.x, slot.center.y);
        let _ = writeln!(
            svg,
            r#"<circle cx="{cx:.1}" cy="{cy:.1}" r="{r:.1}" class="circle"/>"#
        );
        let _ = writeln!(
            svg,
            r#"<text x="{cx:.1}" y="{:.1}" class="index" text-anchor="middle">{i}</text>"#,
            cy + 4.0
        );
    }

    // Holes go on top so they stay visible over neighbouring circles.
    if gap_fraction > 0.0 {
        for slot in layout.slots() {
            if let Some(gap) = slot.gap_center {
                let (gx, gy) = to_panel(gap.x, gap.y);
                let _ = writeln!(
                    svg,
                    r#"<circle cx="{gx:.1}" cy="{gy:.1}" r="{hole:.1}" class="hole"/>"#
                );
            }
        }
    }

    let caption = format!(
        "n={}  size={}  r={:.2}  offset_y={:.2}  gap={}",
        layout.len(),
        size,
        layout.radius(),
        layout.vertical_offset(),
        gap_fraction
    );
    let _ = writeln!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" class="caption" text-anchor="middle">{}</text>"#,
        total_w / 2.0,
        MARGIN + panel + 24.0,
        escape_xml(&caption)
    );

    svg.push_str("</svg>\n");
    svg
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

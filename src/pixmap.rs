//! Premultiplied RGBA8 pixel buffer with the few raster operations the
//! compositor needs: rect fills, scaled blits, circle keep/erase masks, and
//! source-over layer flattening.
//!
//! Circle edges are anti-aliased by sampling the signed distance at each
//! pixel center: coverage is `clamp(r - d + 0.5, 0, 1)`.

use alloc::vec;
use alloc::vec::Vec;

use num_traits::Float;

use crate::geometry::{PixelRect, Point, Size};

/// Straight (non-premultiplied) sRGB color with alpha.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Premultiplied `[r, g, b, a]`.
    pub fn premultiply(self) -> [u8; 4] {
        let a = self.a as u32;
        [
            mul_div_255(self.r as u32, a),
            mul_div_255(self.g as u32, a),
            mul_div_255(self.b as u32, a),
            self.a,
        ]
    }
}

/// Owned premultiplied RGBA8 image, row-major, no padding between rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Pixmap {
    /// Transparent pixmap of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 4]; width as usize * height as usize],
        }
    }

    /// Wrap straight-alpha RGBA8 bytes, premultiplying them.
    ///
    /// Returns `None` if `rgba.len() != width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, rgba: &[u8]) -> Option<Self> {
        if rgba.len() != width as usize * height as usize * 4 {
            return None;
        }
        let pixels = rgba
            .chunks_exact(4)
            .map(|p| Color::rgba(p[0], p[1], p[2], p[3]).premultiply())
            .collect();
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Premultiplied pixels, row-major.
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    /// Alpha at `(x, y)`; zero outside the buffer.
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        self.pixel(x, y).map_or(0, |p| p[3])
    }

    /// Resize to `width × height`, clearing every pixel.
    ///
    /// Reuses the allocation when it is large enough.
    pub fn reset(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels
            .resize(width as usize * height as usize, [0; 4]);
    }

    /// Set every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixels.fill([0; 4]);
    }

    /// Fill every pixel with `color`, replacing what was there.
    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color.premultiply());
    }

    /// Source-over fill of `rect` (clipped to the buffer).
    pub fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        let Some(clip) = rect.clip_to(self.width, self.height) else {
            return;
        };
        let src = color.premultiply();
        for y in clip.top..clip.bottom {
            for x in clip.left..clip.right {
                let i = self.index(x as u32, y as u32);
                self.pixels[i] = source_over(src, self.pixels[i]);
            }
        }
    }

    /// Source-over blit of `src` scaled (nearest neighbour) into `dst`.
    pub fn draw_pixmap_scaled(&mut self, src: &Pixmap, dst: PixelRect) {
        if src.width == 0 || src.height == 0 || dst.is_empty() {
            return;
        }
        let Some(clip) = dst.clip_to(self.width, self.height) else {
            return;
        };
        let sx = src.width as f64 / dst.width() as f64;
        let sy = src.height as f64 / dst.height() as f64;
        for y in clip.top..clip.bottom {
            let v = ((y - dst.top) as f64 + 0.5) * sy;
            let src_y = (Float::floor(v) as u32).min(src.height - 1);
            for x in clip.left..clip.right {
                let u = ((x - dst.left) as f64 + 0.5) * sx;
                let src_x = (Float::floor(u) as u32).min(src.width - 1);
                let s = src.pixels[src.index(src_x, src_y)];
                let i = self.index(x as u32, y as u32);
                self.pixels[i] = source_over(s, self.pixels[i]);
            }
        }
    }

    /// Keep only the inside of the circle: every pixel is scaled by its
    /// coverage, so the outside becomes fully transparent.
    pub fn retain_circle(&mut self, center: Point, radius: f64) {
        for y in 0..self.height {
            for x in 0..self.width {
                let cov = circle_coverage(center, radius, x, y);
                if cov < 1.0 {
                    let i = self.index(x, y);
                    self.pixels[i] = scale_pixel(self.pixels[i], cov);
                }
            }
        }
    }

    /// Destination-out erase of a circle: every pixel is scaled by one minus
    /// its coverage.
    pub fn erase_circle(&mut self, center: Point, radius: f64) {
        if radius <= 0.0 {
            return;
        }
        let Some(area) = circle_extent(center, radius).clip_to(self.width, self.height) else {
            return;
        };
        for y in area.top..area.bottom {
            for x in area.left..area.right {
                let cov = circle_coverage(center, radius, x as u32, y as u32);
                if cov > 0.0 {
                    let i = self.index(x as u32, y as u32);
                    self.pixels[i] = scale_pixel(self.pixels[i], 1.0 - cov);
                }
            }
        }
    }

    /// Source-over composite `layer` with its top-left corner at `(dx, dy)`.
    pub fn draw_layer(&mut self, layer: &Pixmap, dx: i32, dy: i32) {
        let target = PixelRect::new(
            dx,
            dy,
            dx.saturating_add(layer.width.min(i32::MAX as u32) as i32),
            dy.saturating_add(layer.height.min(i32::MAX as u32) as i32),
        );
        let Some(clip) = target.clip_to(self.width, self.height) else {
            return;
        };
        for y in clip.top..clip.bottom {
            for x in clip.left..clip.right {
                let s = layer.pixels[layer.index((x - dx) as u32, (y - dy) as u32)];
                if s[3] == 0 {
                    continue;
                }
                let i = self.index(x as u32, y as u32);
                self.pixels[i] = source_over(s, self.pixels[i]);
            }
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Fraction of pixel `(x, y)` inside the circle, sampled at the pixel center.
fn circle_coverage(center: Point, radius: f64, x: u32, y: u32) -> f64 {
    let d = Point::new(x as f64 + 0.5, y as f64 + 0.5).distance(center);
    (radius - d + 0.5).clamp(0.0, 1.0)
}

/// Pixel rect that contains every pixel with nonzero coverage.
fn circle_extent(center: Point, radius: f64) -> PixelRect {
    let reach = radius + 1.0;
    PixelRect::new(
        Float::floor(center.x - reach) as i32,
        Float::floor(center.y - reach) as i32,
        Float::ceil(center.x + reach) as i32,
        Float::ceil(center.y + reach) as i32,
    )
}

fn scale_pixel(p: [u8; 4], factor: f64) -> [u8; 4] {
    if factor <= 0.0 {
        return [0; 4];
    }
    p.map(|c| Float::round(c as f64 * factor) as u8)
}

/// Premultiplied source-over.
fn source_over(src: [u8; 4], dst: [u8; 4]) -> [u8; 4] {
    let inv = 255 - src[3] as u32;
    if inv == 0 {
        return src;
    }
    let mut out = [0u8; 4];
    for c in 0..4 {
        out[c] = (src[c] as u32 + mul_div_255(dst[c] as u32, inv) as u32).min(255) as u8;
    }
    out
}

/// `a * b / 255`, rounded.
fn mul_div_255(a: u32, b: u32) -> u8 {
    let t = a * b + 128;
    ((t + (t >> 8)) >> 8) as u8
}

//! Ring-packed composite avatars.
//!
//! Packs one to five equal circles into a square (a Steiner-circle ring) and
//! composites content into them with transparent gaps between neighbours.
//!
//! The layout half is pure geometry, no allocations, `no_std` compatible.
//! Compositing needs the `alloc` feature.
//!
//! # Modules
//!
//! - [`layout`] — Shared radius, circle centers, gap centers, vertical offset
//! - [`fit`] — Content destination rects for non-square content
//! - [`geometry`] — Points, pixel rects, padding, content-square placement
//! - [`pixmap`] — Premultiplied RGBA8 buffer with circle masks
//! - [`content`] — Paintable content trait, stateful capability, repaint callback
//! - [`compositor`] — Per-circle isolated layers with keep and gap-erase masks
//! - [`avatar`] — Owned list of up to five contents and its query/mutation surface
//! - `svg` — SVG diagram of a layout (feature `svg`)

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod fit;
pub mod geometry;
pub mod layout;

#[cfg(feature = "alloc")]
pub mod avatar;
#[cfg(feature = "alloc")]
pub mod compositor;
#[cfg(feature = "alloc")]
pub mod content;
#[cfg(feature = "alloc")]
pub mod pixmap;
#[cfg(feature = "svg")]
pub mod svg;

// Re-exports: geometry and layout
pub use fit::FitType;
pub use geometry::{ContentFrame, Padding, PixelRect, Point, Size, Square};
pub use layout::{LayoutError, MAX_ITEMS, RingLayout, Slot, gap_radius};

#[cfg(feature = "alloc")]
pub use avatar::{AvatarConfig, CompositionAvatar, DEFAULT_GAP};
#[cfg(feature = "alloc")]
pub use compositor::Compositor;
#[cfg(feature = "alloc")]
pub use content::{
    Content, ImageContent, Invalidator, SharedContent, SolidColor, StateColor, Stateful,
    ViewState, shared,
};
#[cfg(feature = "alloc")]
pub use pixmap::{Color, Pixmap};

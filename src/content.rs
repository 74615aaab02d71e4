//! Paintable content placed in a ring slot.
//!
//! The compositor only needs content to accept a destination rectangle and
//! paint itself into a layer. Content that reacts to view state (pressed,
//! selected, …) additionally exposes the [`Stateful`] capability through
//! [`Content::as_stateful`].
//!
//! Content asks for a repaint through the [`Invalidator`] it was handed when
//! attached. Detached content has its callback cleared, so late updates from
//! content that is no longer shown are dropped.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use bitflags::bitflags;

use crate::geometry::{PixelRect, Size};
use crate::pixmap::{Color, Pixmap};

bitflags! {
    /// Interaction state forwarded from the host to stateful content.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ViewState: u16 {
        const ENABLED = 1 << 0;
        const FOCUSED = 1 << 1;
        const PRESSED = 1 << 2;
        const SELECTED = 1 << 3;
        const HOVERED = 1 << 4;
        const ACTIVATED = 1 << 5;
    }
}

/// Shared "repaint me" flag between content and the avatar that shows it.
#[derive(Clone, Debug, Default)]
pub struct Invalidator(Rc<Cell<bool>>);

impl Invalidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a repaint.
    pub fn invalidate(&self) {
        self.0.set(true);
    }

    /// Whether a repaint has been requested and not yet taken.
    pub fn is_pending(&self) -> bool {
        self.0.get()
    }

    /// Consume the pending request.
    pub fn take(&self) -> bool {
        self.0.replace(false)
    }
}

/// Something that can paint itself into a circle slot.
pub trait Content {
    /// Natural size of the content, if it has one. Used by
    /// [`FitType`](crate::FitType) to keep the aspect ratio.
    fn intrinsic_size(&self) -> Option<Size> {
        None
    }

    /// Destination rectangle, in layer coordinates.
    fn set_bounds(&mut self, bounds: PixelRect);

    /// Current destination rectangle.
    fn bounds(&self) -> PixelRect;

    /// Paint into `layer` within [`bounds`](Self::bounds).
    fn paint(&self, layer: &mut Pixmap);

    /// Register (or with `None`, clear) the repaint callback.
    fn set_callback(&mut self, callback: Option<Invalidator>) {
        let _ = callback;
    }

    /// Visibility changed. Returns whether the content's appearance changed.
    fn set_visible(&mut self, visible: bool, restart: bool) -> bool {
        let _ = (visible, restart);
        false
    }

    /// State-aware view of this content, if it has internal visual state.
    fn as_stateful(&mut self) -> Option<&mut dyn Stateful> {
        None
    }
}

/// Content whose appearance depends on [`ViewState`].
pub trait Stateful {
    /// Apply `state`. Returns `true` if the content now looks different.
    fn set_state(&mut self, state: ViewState) -> bool;

    /// Finish any running state transition immediately.
    fn jump_to_current_state(&mut self) {}
}

/// Content shared between the host and the avatar.
pub type SharedContent = Rc<RefCell<dyn Content>>;

/// Wrap `content` for handing to an avatar.
pub fn shared<C: Content + 'static>(content: C) -> SharedContent {
    Rc::new(RefCell::new(content))
}

/// Identity comparison, ignoring vtables.
pub(crate) fn same_content(a: &SharedContent, b: &SharedContent) -> bool {
    core::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

/// Flat color filling its bounds.
#[derive(Clone, Debug, Default)]
pub struct SolidColor {
    color: Color,
    bounds: PixelRect,
    callback: Option<Invalidator>,
}

impl SolidColor {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Change the color and request a repaint.
    pub fn set_color(&mut self, color: Color) {
        if self.color != color {
            self.color = color;
            if let Some(cb) = &self.callback {
                cb.invalidate();
            }
        }
    }
}

impl Content for SolidColor {
    fn set_bounds(&mut self, bounds: PixelRect) {
        self.bounds = bounds;
    }

    fn bounds(&self) -> PixelRect {
        self.bounds
    }

    fn paint(&self, layer: &mut Pixmap) {
        layer.fill_rect(self.bounds, self.color);
    }

    fn set_callback(&mut self, callback: Option<Invalidator>) {
        self.callback = callback;
    }
}

/// Decoded image scaled into its bounds.
///
/// Starts out empty when the image is still loading; [`set_image`](Self::set_image)
/// delivers it later and requests a repaint.
#[derive(Clone, Debug, Default)]
pub struct ImageContent {
    image: Option<Pixmap>,
    bounds: PixelRect,
    callback: Option<Invalidator>,
}

impl ImageContent {
    pub fn new(image: Pixmap) -> Self {
        Self {
            image: Some(image),
            ..Self::default()
        }
    }

    /// Placeholder for an image that has not arrived yet.
    pub fn pending() -> Self {
        Self::default()
    }

    pub fn image(&self) -> Option<&Pixmap> {
        self.image.as_ref()
    }

    /// Deliver (or replace) the image.
    pub fn set_image(&mut self, image: Pixmap) {
        self.image = Some(image);
        if let Some(cb) = &self.callback {
            cb.invalidate();
        }
    }
}

impl Content for ImageContent {
    fn intrinsic_size(&self) -> Option<Size> {
        self.image.as_ref().map(Pixmap::size)
    }

    fn set_bounds(&mut self, bounds: PixelRect) {
        self.bounds = bounds;
    }

    fn bounds(&self) -> PixelRect {
        self.bounds
    }

    fn paint(&self, layer: &mut Pixmap) {
        if let Some(image) = &self.image {
            layer.draw_pixmap_scaled(image, self.bounds);
        }
    }

    fn set_callback(&mut self, callback: Option<Invalidator>) {
        self.callback = callback;
    }
}

/// Color picked from a state list: the first entry whose flags are all set
/// in the current state wins, otherwise the fallback.
#[derive(Clone, Debug, Default)]
pub struct StateColor {
    entries: Vec<(ViewState, Color)>,
    fallback: Color,
    current: Color,
    bounds: PixelRect,
    callback: Option<Invalidator>,
}

impl StateColor {
    pub fn new(fallback: Color) -> Self {
        Self {
            fallback,
            current: fallback,
            ..Self::default()
        }
    }

    /// Add an entry. Earlier entries take precedence.
    pub fn with(mut self, state: ViewState, color: Color) -> Self {
        self.entries.push((state, color));
        self
    }

    /// Color currently painted.
    pub fn current(&self) -> Color {
        self.current
    }

    fn resolve(&self, state: ViewState) -> Color {
        self.entries
            .iter()
            .find(|(flags, _)| state.contains(*flags))
            .map_or(self.fallback, |(_, color)| *color)
    }
}

impl Content for StateColor {
    fn set_bounds(&mut self, bounds: PixelRect) {
        self.bounds = bounds;
    }

    fn bounds(&self) -> PixelRect {
        self.bounds
    }

    fn paint(&self, layer: &mut Pixmap) {
        layer.fill_rect(self.bounds, self.current);
    }

    fn set_callback(&mut self, callback: Option<Invalidator>) {
        self.callback = callback;
    }

    fn as_stateful(&mut self) -> Option<&mut dyn Stateful> {
        Some(self)
    }
}

impl Stateful for StateColor {
    fn set_state(&mut self, state: ViewState) -> bool {
        let next = self.resolve(state);
        let changed = next != self.current;
        self.current = next;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalidator_take_resets() {
        let inv = Invalidator::new();
        assert!(!inv.is_pending());
        inv.clone().invalidate();
        assert!(inv.is_pending());
        assert!(inv.take());
        assert!(!inv.take());
    }

    #[test]
    fn solid_color_invalidates_only_on_change() {
        let inv = Invalidator::new();
        let mut c = SolidColor::new(Color::WHITE);
        c.set_callback(Some(inv.clone()));
        c.set_color(Color::WHITE);
        assert!(!inv.is_pending());
        c.set_color(Color::BLACK);
        assert!(inv.take());
    }

    #[test]
    fn detached_content_cannot_invalidate() {
        let inv = Invalidator::new();
        let mut c = ImageContent::pending();
        c.set_callback(Some(inv.clone()));
        c.set_callback(None);
        c.set_image(Pixmap::new(4, 4));
        assert!(!inv.is_pending());
        assert_eq!(c.intrinsic_size(), Some(Size::new(4, 4)));
    }

    #[test]
    fn state_color_resolves_first_match() {
        let mut c = StateColor::new(Color::BLACK)
            .with(ViewState::PRESSED, Color::rgb(255, 0, 0))
            .with(ViewState::SELECTED, Color::rgb(0, 255, 0));
        let s = c.as_stateful().unwrap();
        assert!(s.set_state(ViewState::PRESSED | ViewState::SELECTED));
        assert_eq!(c.current(), Color::rgb(255, 0, 0));
        let s = c.as_stateful().unwrap();
        assert!(!s.set_state(ViewState::PRESSED));
        assert!(s.set_state(ViewState::ENABLED));
        assert_eq!(c.current(), Color::BLACK);
    }

    #[test]
    fn stateless_content_has_no_state_capability() {
        assert!(SolidColor::new(Color::WHITE).as_stateful().is_none());
    }

    #[test]
    fn shared_identity() {
        let a = shared(SolidColor::new(Color::WHITE));
        let b = shared(SolidColor::new(Color::WHITE));
        assert!(same_content(&a, &a.clone()));
        assert!(!same_content(&a, &b));
    }
}

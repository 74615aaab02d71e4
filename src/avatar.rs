//! Composite avatar: an ordered list of up to five contents, laid out as a
//! ring and rendered with gaps between neighbours.
//!
//! # Example
//!
//! ```
//! use ringpack::{AvatarConfig, Color, CompositionAvatar, Pixmap, SolidColor, shared};
//!
//! let mut avatar = CompositionAvatar::with_config(AvatarConfig::new().gap(0.3));
//! avatar.set_size(96, 96);
//! avatar.add(shared(SolidColor::new(Color::rgb(200, 40, 40))));
//! avatar.add_with_id(7, shared(SolidColor::new(Color::rgb(40, 40, 200))));
//! assert_eq!(avatar.len(), 2);
//!
//! let mut surface = Pixmap::new(96, 96);
//! avatar.render(&mut surface);
//! assert!(avatar.find_by_id(7).is_some());
//! ```

use alloc::vec::Vec;

use crate::compositor::Compositor;
use crate::content::{Invalidator, SharedContent, ViewState, same_content};
use crate::fit::FitType;
use crate::geometry::{ContentFrame, Padding, PixelRect, Size};
use crate::layout::{MAX_ITEMS, RingLayout};
use crate::pixmap::Pixmap;

/// Gap fraction used when none is configured.
pub const DEFAULT_GAP: f32 = 0.25;

/// Avatar settings.
///
/// ```
/// use ringpack::{AvatarConfig, FitType, Padding};
///
/// let config = AvatarConfig::new()
///     .gap(2.0)
///     .fit_type(FitType::Start)
///     .padding(Padding::uniform(4));
/// assert_eq!(config.gap, 1.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AvatarConfig {
    /// Hole size relative to the circle radius, in `[0, 1]`.
    pub gap: f32,
    pub fit_type: FitType,
    pub padding: Padding,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            gap: DEFAULT_GAP,
            fit_type: FitType::default(),
            padding: Padding::default(),
        }
    }
}

impl AvatarConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gap fraction, clamped to `[0, 1]`. NaN becomes `0`.
    pub fn gap(mut self, gap: f32) -> Self {
        self.gap = clamp_gap(gap);
        self
    }

    pub fn fit_type(mut self, fit_type: FitType) -> Self {
        self.fit_type = fit_type;
        self
    }

    pub fn padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }
}

fn clamp_gap(gap: f32) -> f32 {
    if gap.is_nan() { 0.0 } else { gap.clamp(0.0, 1.0) }
}

struct Item {
    id: Option<u32>,
    content: SharedContent,
}

/// Ring of up to [`MAX_ITEMS`] circular contents.
///
/// Insertion order is the clockwise visual order, starting at the top-left
/// (even counts) or top-center (odd counts). Every mutation that changes the
/// number of items, the surface size, or the padding recomputes the layout
/// synchronously and requests a repaint; poll it with
/// [`take_repaint_request`](Self::take_repaint_request).
pub struct CompositionAvatar {
    items: Vec<Item>,
    config: AvatarConfig,
    size: Size,
    frame: ContentFrame,
    layout: RingLayout,
    state: ViewState,
    visible: bool,
    invalidator: Invalidator,
    compositor: Compositor,
}

impl Default for CompositionAvatar {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositionAvatar {
    /// Empty avatar with the default configuration and zero size.
    pub fn new() -> Self {
        Self::with_config(AvatarConfig::default())
    }

    pub fn with_config(config: AvatarConfig) -> Self {
        Self {
            items: Vec::with_capacity(MAX_ITEMS),
            config: AvatarConfig {
                gap: clamp_gap(config.gap),
                ..config
            },
            size: Size::default(),
            frame: ContentFrame::default(),
            layout: RingLayout::EMPTY,
            state: ViewState::ENABLED,
            visible: true,
            invalidator: Invalidator::new(),
            compositor: Compositor::new(),
        }
    }

    // ── queries ────────────────────────────────────────────────────────

    /// Number of contents.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Shared circle radius of the current layout.
    pub fn radius(&self) -> f64 {
        self.layout.radius()
    }

    /// Circle diameter rounded to whole pixels.
    pub fn drawable_size(&self) -> u32 {
        self.layout.drawable_size()
    }

    /// Side of the square the ring is packed into.
    pub fn content_size(&self) -> f64 {
        self.layout.content_size()
    }

    pub fn vertical_offset(&self) -> f64 {
        self.layout.vertical_offset()
    }

    pub fn layout(&self) -> &RingLayout {
        &self.layout
    }

    pub fn gap(&self) -> f32 {
        self.config.gap
    }

    pub fn fit_type(&self) -> FitType {
        self.config.fit_type
    }

    pub fn padding(&self) -> Padding {
        self.config.padding
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Content registered under `id`.
    pub fn find_by_id(&self, id: u32) -> Option<SharedContent> {
        self.items
            .iter()
            .find(|item| item.id == Some(id))
            .map(|item| item.content.clone())
    }

    /// Content at ring position `index`.
    pub fn content_at(&self, index: usize) -> Option<&SharedContent> {
        self.items.get(index).map(|item| &item.content)
    }

    /// Whether a repaint has been requested since the last
    /// [`take_repaint_request`](Self::take_repaint_request).
    pub fn needs_repaint(&self) -> bool {
        self.invalidator.is_pending()
    }

    /// Consume the pending repaint request.
    pub fn take_repaint_request(&self) -> bool {
        self.invalidator.take()
    }

    // ── configuration ──────────────────────────────────────────────────

    /// Set the gap fraction, clamped to `[0, 1]`. NaN becomes `0`.
    pub fn set_gap(&mut self, gap: f32) {
        let gap = clamp_gap(gap);
        if self.config.gap != gap {
            self.config.gap = gap;
            self.invalidator.invalidate();
        }
    }

    pub fn set_fit_type(&mut self, fit_type: FitType) {
        if self.config.fit_type != fit_type {
            self.config.fit_type = fit_type;
            for index in 0..self.items.len() {
                self.update_bounds(index);
            }
            self.invalidator.invalidate();
        }
    }

    pub fn set_padding(&mut self, padding: Padding) {
        if self.config.padding != padding {
            self.config.padding = padding;
            self.relayout();
        }
    }

    /// Surface size changed.
    pub fn set_size(&mut self, width: u32, height: u32) {
        let size = Size::new(width, height);
        if self.size != size {
            self.size = size;
            self.relayout();
        }
    }

    // ── mutation ───────────────────────────────────────────────────────

    /// Append unkeyed content. Returns `false` if the ring is full.
    pub fn add(&mut self, content: SharedContent) -> bool {
        self.insert(None, content)
    }

    /// Add content under `id`.
    ///
    /// If `id` is already present its content is replaced in place, keeping
    /// the ring position, and the layout is left alone. Otherwise the content
    /// is appended; returns `false` if the ring is full.
    pub fn add_with_id(&mut self, id: u32, content: SharedContent) -> bool {
        self.insert(Some(id), content)
    }

    fn insert(&mut self, id: Option<u32>, content: SharedContent) -> bool {
        let existing = id.and_then(|id| self.items.iter().position(|item| item.id == Some(id)));
        match existing {
            Some(index) => {
                let old = core::mem::replace(&mut self.items[index].content, content.clone());
                if !self.holds(&old) {
                    detach(&old);
                }
                self.update_bounds(index);
            }
            None => {
                if self.items.len() >= MAX_ITEMS {
                    log::debug!("ring full, ignoring content (id={id:?})");
                    return false;
                }
                self.items.push(Item {
                    id,
                    content: content.clone(),
                });
                self.relayout();
            }
        }

        let mut c = content.borrow_mut();
        c.set_callback(Some(self.invalidator.clone()));
        c.set_visible(self.visible, true);
        if let Some(stateful) = c.as_stateful() {
            stateful.set_state(self.state);
        }
        drop(c);
        self.invalidator.invalidate();
        true
    }

    /// Remove every slot holding `content`.
    pub fn remove(&mut self, content: &SharedContent) {
        for index in (0..self.items.len()).rev() {
            if same_content(&self.items[index].content, content) {
                self.remove_at(index);
            }
        }
    }

    /// Remove the content registered under `id`, returning it.
    pub fn remove_by_id(&mut self, id: u32) -> Option<SharedContent> {
        let index = self.items.iter().position(|item| item.id == Some(id))?;
        Some(self.remove_at(index))
    }

    /// Remove and return the content at `index`, shifting later items left.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn remove_at(&mut self, index: usize) -> SharedContent {
        let item = self.items.remove(index);
        if !self.holds(&item.content) {
            detach(&item.content);
        }
        self.relayout();
        item.content
    }

    /// Remove all contents.
    pub fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }
        for item in self.items.drain(..) {
            detach(&item.content);
        }
        self.relayout();
    }

    // ── host notifications ─────────────────────────────────────────────

    /// Forward a view state change to every stateful content.
    ///
    /// Requests a repaint if any content reports a visible change.
    pub fn set_state(&mut self, state: ViewState) {
        self.state = state;
        let mut changed = false;
        for item in &self.items {
            let mut c = item.content.borrow_mut();
            if let Some(stateful) = c.as_stateful() {
                changed |= stateful.set_state(state);
            }
        }
        if changed {
            self.invalidator.invalidate();
        }
    }

    /// Finish every running state transition.
    pub fn jump_to_current_state(&mut self) {
        for item in &self.items {
            if let Some(stateful) = item.content.borrow_mut().as_stateful() {
                stateful.jump_to_current_state();
            }
        }
    }

    /// The avatar was shown or hidden.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        for item in &self.items {
            item.content.borrow_mut().set_visible(visible, false);
        }
    }

    /// Composite every content onto `surface`.
    ///
    /// `surface` is expected to match [`size`](Self::size); anything outside
    /// it is clipped. Does not consume the repaint request.
    pub fn render(&mut self, surface: &mut Pixmap) {
        let items = &self.items;
        let layout = &self.layout;
        let fit_type = self.config.fit_type;
        self.compositor.render(
            surface,
            self.frame.origin,
            layout,
            self.config.gap,
            |i, layer| {
                // Per paint: one content may fill several slots.
                let mut content = items[i].content.borrow_mut();
                let bounds = slot_bounds(layout, fit_type, i, content.intrinsic_size());
                content.set_bounds(bounds);
                content.paint(layer);
            },
        );
    }

    // ── internals ──────────────────────────────────────────────────────

    fn relayout(&mut self) {
        self.frame = ContentFrame::new(self.size, self.config.padding);
        // Count never exceeds MAX_ITEMS and the side is an integer, so this
        // only falls back on a broken invariant.
        self.layout =
            RingLayout::compute(self.frame.side, self.items.len()).unwrap_or(RingLayout::EMPTY);
        for index in 0..self.items.len() {
            self.update_bounds(index);
        }
        self.invalidator.invalidate();
    }

    fn update_bounds(&self, index: usize) {
        let mut content = self.items[index].content.borrow_mut();
        let bounds = slot_bounds(
            &self.layout,
            self.config.fit_type,
            index,
            content.intrinsic_size(),
        );
        content.set_bounds(bounds);
    }

    fn holds(&self, content: &SharedContent) -> bool {
        self.items
            .iter()
            .any(|item| same_content(&item.content, content))
    }
}

/// Destination rect for the content in slot `index`, in layer coordinates.
fn slot_bounds(
    layout: &RingLayout,
    fit_type: FitType,
    index: usize,
    intrinsic: Option<Size>,
) -> PixelRect {
    match layout.slot(index) {
        Some(slot) => fit_type.content_bounds(slot.center, layout.radius(), intrinsic),
        None => PixelRect::EMPTY,
    }
}

/// Drop the avatar's registration on `content`.
fn detach(content: &SharedContent) {
    content.borrow_mut().set_callback(None);
}

impl core::fmt::Debug for CompositionAvatar {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CompositionAvatar")
            .field("len", &self.items.len())
            .field("ids", &self.items.iter().map(|i| i.id).collect::<Vec<_>>())
            .field("config", &self.config)
            .field("size", &self.size)
            .field("layout", &self.layout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::RefCell;

    use crate::content::{Content, ImageContent, SolidColor, StateColor, shared};
    use crate::pixmap::Color;

    fn solid() -> SharedContent {
        shared(SolidColor::new(Color::WHITE))
    }

    fn sized() -> CompositionAvatar {
        let mut avatar = CompositionAvatar::new();
        avatar.set_size(100, 100);
        avatar
    }

    #[test]
    fn defaults() {
        let avatar = CompositionAvatar::new();
        assert_eq!(avatar.gap(), DEFAULT_GAP);
        assert_eq!(avatar.fit_type(), FitType::Center);
        assert!(avatar.is_empty());
        assert_eq!(avatar.radius(), 0.0);
    }

    #[test]
    fn add_find_remove_by_id() {
        let mut avatar = sized();
        let c = solid();
        assert!(avatar.add_with_id(7, c.clone()));
        assert!(same_content(&avatar.find_by_id(7).unwrap(), &c));
        let removed = avatar.remove_by_id(7).unwrap();
        assert!(same_content(&removed, &c));
        assert!(avatar.find_by_id(7).is_none());
        assert!(avatar.remove_by_id(7).is_none());
    }

    #[test]
    fn sixth_add_is_ignored() {
        let mut avatar = sized();
        for _ in 0..MAX_ITEMS {
            assert!(avatar.add(solid()));
        }
        let radius = avatar.radius();
        assert!(!avatar.add(solid()));
        assert!(!avatar.add_with_id(3, solid()));
        assert_eq!(avatar.len(), MAX_ITEMS);
        assert_eq!(avatar.radius(), radius);
    }

    #[test]
    fn replace_by_id_keeps_position() {
        let mut avatar = sized();
        avatar.add(solid());
        avatar.add_with_id(1, solid());
        avatar.add(solid());
        let before = *avatar.layout();

        let replacement = solid();
        assert!(avatar.add_with_id(1, replacement.clone()));
        assert_eq!(avatar.len(), 3);
        assert_eq!(*avatar.layout(), before);
        assert!(same_content(avatar.content_at(1).unwrap(), &replacement));
        // Replacement content got the slot's bounds.
        let slot = avatar.layout().slot(1).unwrap();
        let bounds = replacement.borrow().bounds();
        assert_eq!(bounds.left, slot.bounds.left as i32);
    }

    #[test]
    fn replaced_content_is_detached() {
        let mut avatar = sized();
        let old = Rc::new(RefCell::new(SolidColor::new(Color::WHITE)));
        avatar.add_with_id(1, old.clone());
        avatar.add_with_id(1, solid());
        avatar.take_repaint_request();

        old.borrow_mut().set_color(Color::BLACK);
        assert!(!avatar.needs_repaint());
    }

    #[test]
    fn remove_at_shifts_left() {
        let mut avatar = sized();
        let items: Vec<_> = (0..4).map(|_| solid()).collect();
        for c in &items {
            avatar.add(c.clone());
        }
        let removed = avatar.remove_at(1);
        assert!(same_content(&removed, &items[1]));
        assert_eq!(avatar.len(), 3);
        assert!(same_content(avatar.content_at(1).unwrap(), &items[2]));
        assert!(same_content(avatar.content_at(2).unwrap(), &items[3]));
        // Three items → odd ring radius.
        assert!((avatar.radius() - 25.0).abs() < 1e-9);
    }

    #[test]
    #[should_panic]
    fn remove_at_out_of_range_panics() {
        let mut avatar = sized();
        avatar.remove_at(0);
    }

    #[test]
    fn remove_by_reference_removes_all_slots() {
        let mut avatar = sized();
        let twice = solid();
        avatar.add(twice.clone());
        avatar.add(solid());
        avatar.add(twice.clone());
        avatar.remove(&twice);
        assert_eq!(avatar.len(), 1);
        assert!(!same_content(avatar.content_at(0).unwrap(), &twice));
    }

    #[test]
    fn clear_empties_layout() {
        let mut avatar = sized();
        avatar.add(solid());
        avatar.add(solid());
        avatar.clear();
        assert!(avatar.is_empty());
        assert!(avatar.layout().is_empty());
        assert_eq!(avatar.radius(), 0.0);
    }

    #[test]
    fn gap_setter_clamps() {
        let mut avatar = CompositionAvatar::new();
        avatar.set_gap(-1.0);
        assert_eq!(avatar.gap(), 0.0);
        avatar.set_gap(3.0);
        assert_eq!(avatar.gap(), 1.0);
        avatar.set_gap(f32::NAN);
        assert_eq!(avatar.gap(), 0.0);
        let avatar = CompositionAvatar::with_config(AvatarConfig {
            gap: 7.0,
            ..AvatarConfig::default()
        });
        assert_eq!(avatar.gap(), 1.0);
    }

    #[test]
    fn gap_change_requests_repaint() {
        let mut avatar = sized();
        avatar.take_repaint_request();
        avatar.set_gap(DEFAULT_GAP);
        assert!(!avatar.needs_repaint());
        avatar.set_gap(0.5);
        assert!(avatar.take_repaint_request());
    }

    #[test]
    fn resize_relayouts() {
        let mut avatar = sized();
        avatar.add(solid());
        assert_eq!(avatar.radius(), 50.0);
        avatar.set_size(300, 60);
        assert_eq!(avatar.content_size(), 60.0);
        assert_eq!(avatar.radius(), 30.0);
        assert_eq!(avatar.drawable_size(), 60);
    }

    #[test]
    fn padding_shrinks_content() {
        let mut avatar = sized();
        avatar.add(solid());
        avatar.set_padding(Padding::uniform(10));
        assert_eq!(avatar.content_size(), 80.0);
        assert_eq!(avatar.radius(), 40.0);
    }

    #[test]
    fn zero_size_has_no_geometry() {
        let mut avatar = CompositionAvatar::new();
        let c = solid();
        avatar.add(c.clone());
        assert_eq!(avatar.radius(), 0.0);
        assert_eq!(c.borrow().bounds(), PixelRect::EMPTY);
        let mut surface = Pixmap::new(4, 4);
        avatar.render(&mut surface);
        assert!(surface.pixels().iter().all(|p| *p == [0; 4]));
    }

    #[test]
    fn content_invalidation_reaches_avatar() {
        let mut avatar = sized();
        let c = Rc::new(RefCell::new(SolidColor::new(Color::WHITE)));
        avatar.add(c.clone());
        avatar.take_repaint_request();
        c.borrow_mut().set_color(Color::BLACK);
        assert!(avatar.take_repaint_request());

        avatar.remove_at(0);
        avatar.take_repaint_request();
        c.borrow_mut().set_color(Color::WHITE);
        assert!(!avatar.needs_repaint(), "late update after removal is a no-op");
    }

    #[test]
    fn state_forwarded_to_stateful_content() {
        let mut avatar = sized();
        let c = Rc::new(RefCell::new(
            StateColor::new(Color::BLACK).with(ViewState::PRESSED, Color::WHITE),
        ));
        avatar.add(c.clone());
        avatar.add(solid());
        avatar.take_repaint_request();

        avatar.set_state(ViewState::ENABLED | ViewState::PRESSED);
        assert_eq!(c.borrow().current(), Color::WHITE);
        assert!(avatar.take_repaint_request());

        avatar.set_state(ViewState::PRESSED);
        assert!(!avatar.take_repaint_request(), "no visible change");
    }

    #[test]
    fn added_content_picks_up_current_state() {
        let mut avatar = sized();
        avatar.set_state(ViewState::SELECTED);
        let c = Rc::new(RefCell::new(
            StateColor::new(Color::BLACK).with(ViewState::SELECTED, Color::WHITE),
        ));
        avatar.add(c.clone());
        assert_eq!(c.borrow().current(), Color::WHITE);
    }

    #[test]
    fn fit_type_updates_bounds() {
        let mut avatar = sized();
        let image = Rc::new(RefCell::new(ImageContent::new(Pixmap::new(20, 10))));
        avatar.add(image.clone());
        // r = 50, 2:1 image covers 200×100 centered on (50, 50).
        assert_eq!(image.borrow().bounds(), PixelRect::new(-50, 0, 150, 100));
        avatar.set_fit_type(FitType::Fit);
        assert_eq!(image.borrow().bounds(), PixelRect::new(0, 0, 100, 100));
    }

    #[test]
    fn replacing_shared_content_keeps_other_slot_attached() {
        let mut avatar = sized();
        let both = Rc::new(RefCell::new(SolidColor::new(Color::WHITE)));
        avatar.add_with_id(1, both.clone());
        avatar.add(both.clone());
        avatar.add_with_id(1, solid());
        avatar.take_repaint_request();

        both.borrow_mut().set_color(Color::BLACK);
        assert!(avatar.needs_repaint());
    }
}

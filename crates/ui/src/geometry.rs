//! Screen rectangles
//!
//! Every rectangle the engine stores is clipped to the panel: `x`/`y` are
//! never negative and the far edges never pass `DISPLAY_WIDTH` /
//! `DISPLAY_HEIGHT`. Construction is the only way to get a [`Rect`], so the
//! invariant holds for every value in circulation.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

pub use platform::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// Axis-aligned rectangle in panel coordinates, clipped to the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl Rect {
    /// Zero-sized rectangle at the origin.
    pub const EMPTY: Self = Self { x: 0, y: 0, width: 0, height: 0 };

    /// Build a rectangle from unclipped coordinates, clipping it to the display.
    ///
    /// Negative sizes collapse to zero.
    #[must_use]
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        let (x, width) = clip_span(x, width, DISPLAY_WIDTH);
        let (y, height) = clip_span(y, height, DISPLAY_HEIGHT);
        Self { x, y, width, height }
    }

    /// The whole panel.
    #[must_use]
    pub const fn full_screen() -> Self {
        Self { x: 0, y: 0, width: DISPLAY_WIDTH, height: DISPLAY_HEIGHT }
    }

    /// Left edge
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Top edge
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Width in pixels
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Height in pixels
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// One past the right-most column.
    #[must_use]
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// One past the bottom-most row.
    #[must_use]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// `true` if the rectangle covers no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Inclusive-min / exclusive-max point test.
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Grow by `dx` on both sides horizontally, `top` above and `bottom`
    /// below, then clip again.
    #[must_use]
    pub fn expand(&self, dx: i32, top: i32, bottom: i32) -> Self {
        let x = self.x.saturating_sub(dx);
        let y = self.y.saturating_sub(top);
        let width = self.width.saturating_add(dx.saturating_mul(2));
        let height = self.height.saturating_add(top).saturating_add(bottom);
        Self::new(x, y, width, height)
    }
}

impl From<Rect> for Rectangle {
    #[allow(clippy::cast_sign_loss)] // clipped sizes are never negative
    fn from(r: Rect) -> Self {
        Rectangle::new(Point::new(r.x, r.y), Size::new(r.width as u32, r.height as u32))
    }
}

/// Clip the span `[start, start + len)` to `[0, limit)`.
///
/// An empty result is pinned inside the display so that `start < limit`
/// still holds.
fn clip_span(start: i32, len: i32, limit: i32) -> (i32, i32) {
    let end = start.saturating_add(len.max(0)).clamp(0, limit);
    let begin = start.clamp(0, limit);
    let len = end.saturating_sub(begin).max(0);
    if len == 0 {
        (begin.min(limit.saturating_sub(1)), 0)
    } else {
        (begin, len)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn inside_rect_is_unchanged() {
        let r = Rect::new(10, 20, 30, 40);
        assert_eq!((r.x(), r.y(), r.width(), r.height()), (10, 20, 30, 40));
    }

    #[test]
    fn negative_origin_is_clipped() {
        let r = Rect::new(-5, -10, 20, 20);
        assert_eq!((r.x(), r.y(), r.width(), r.height()), (0, 0, 15, 10));
    }

    #[test]
    fn far_edge_is_clipped() {
        let r = Rect::new(DISPLAY_WIDTH - 10, DISPLAY_HEIGHT - 5, 100, 100);
        assert_eq!(r.right(), DISPLAY_WIDTH);
        assert_eq!(r.bottom(), DISPLAY_HEIGHT);
        assert_eq!((r.width(), r.height()), (10, 5));
    }

    #[test]
    fn negative_size_collapses_to_zero() {
        let r = Rect::new(10, 10, -4, -4);
        assert!(r.is_empty());
        assert_eq!((r.width(), r.height()), (0, 0));
    }

    #[test]
    fn fully_offscreen_rect_is_empty_and_in_range() {
        let r = Rect::new(DISPLAY_WIDTH + 50, DISPLAY_HEIGHT + 50, 10, 10);
        assert!(r.is_empty());
        assert!(r.x() < DISPLAY_WIDTH);
        assert!(r.y() < DISPLAY_HEIGHT);
    }

    #[test]
    fn contains_is_inclusive_min_exclusive_max() {
        let r = Rect::new(10, 10, 5, 5);
        assert!(r.contains(10, 10));
        assert!(r.contains(14, 14));
        assert!(!r.contains(15, 10));
        assert!(!r.contains(10, 15));
        assert!(!r.contains(9, 12));
    }

    #[test]
    fn empty_rect_contains_nothing() {
        assert!(!Rect::EMPTY.contains(0, 0));
    }

    #[test]
    fn expand_grows_and_clips() {
        let r = Rect::new(4, 4, 10, 10).expand(8, 6, 9);
        assert_eq!((r.x(), r.y()), (0, 0));
        assert_eq!((r.width(), r.height()), (22, 23));
    }

    #[test]
    fn full_screen_matches_display() {
        let r = Rect::full_screen();
        assert_eq!((r.width(), r.height()), (DISPLAY_WIDTH, DISPLAY_HEIGHT));
    }

    #[test]
    fn converts_to_embedded_graphics_rectangle() {
        let rect: Rectangle = Rect::new(1, 2, 3, 4).into();
        assert_eq!(rect.top_left, Point::new(1, 2));
        assert_eq!(rect.size, Size::new(3, 4));
    }
}

//! Drawable elements
//!
//! An [`Element`] is one on-screen unit described by the layout server:
//! common identity and placement fields plus an [`ElementKind`] carrying
//! the fields of its variant. Equality ([`Element::is_equal`]) compares
//! only those inputs, never render state, so a freshly parsed description
//! can be compared against the element currently on screen.
//!
//! Render state (`bounds`, `active`, `touched`, `updated`, `changed`,
//! `refresh_tier`) is owned by the element store and the renderer.

mod anchor;
mod button;
mod image;
pub(crate) mod json;
mod text;

pub use anchor::Anchor;
pub use button::ButtonSpec;
pub use image::{ImageName, ImageSpec, NAME_CAPACITY};
pub use text::{has_descender, text_size, TextSpec, FONT};

use serde_json::Value;
use tracing::{debug, warn};

use platform::EpdPanel;

use crate::bitmap::{ImageError, ImageSource};
use crate::display_mode::DisplayMode;
use crate::framebuffer::Framebuffer;
use crate::geometry::Rect;
use crate::refresh::RefreshTier;
use crate::touch::CallbackDispatcher;
use json::{bounded, RawElement};

/// Longest label accepted.
pub const TEXT_CAPACITY: usize = 128;

/// Longest callback path accepted.
pub const CALLBACK_CAPACITY: usize = 96;

/// Element label.
pub type ElementText = heapless::String<TEXT_CAPACITY>;

/// Element callback identifier or path.
pub type Callback = heapless::String<CALLBACK_CAPACITY>;

/// Callback that flips the display palette.
pub const CALLBACK_TOGGLE_DARK: &str = "toggle-dark";
/// Callback that flips the display palette.
pub const CALLBACK_TOGGLE_LIGHT: &str = "toggle-light";
/// Callback that only asks for a refetch.
pub const CALLBACK_REFRESH: &str = "refresh";

// Clear padding around an element's bounds.
const TEXT_PAD_X: i32 = 8;
const TEXT_PAD_Y: i32 = 6;
const DESCENDER_PAD: i32 = 3;
const BUTTON_PAD_X: i32 = 8;
const BUTTON_PAD_Y: i32 = 6;
const IMAGE_PAD: i32 = 4;

/// Variant-specific fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// Plain label
    Text(TextSpec),
    /// Label in a rounded box
    Button(ButtonSpec),
    /// Server-rendered bitmap
    Image(ImageSpec),
}

impl ElementKind {
    /// JSON `type` value for this variant.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Button(_) => "button",
            Self::Image(_) => "image",
        }
    }

    fn from_raw(raw: &RawElement<'_>) -> Result<Self, ElementError> {
        match raw.kind {
            Some("text") => TextSpec::from_raw(raw).map(Self::Text),
            Some("button") => ButtonSpec::from_raw(raw).map(Self::Button),
            Some("image") => ImageSpec::from_raw(raw).map(Self::Image),
            _ => Err(ElementError::UnknownKind),
        }
    }

    /// Intrinsic content size before anchoring.
    fn size(&self) -> (i32, i32) {
        match self {
            Self::Text(text) => text_size(&text.text),
            Self::Button(button) => button.size(),
            Self::Image(image) => image.size(),
        }
    }
}

/// One on-screen element.
#[derive(Debug, Clone)]
pub struct Element {
    id: u16,
    x: i16,
    y: i16,
    anchor: Anchor,
    callback: Callback,
    kind: ElementKind,

    bounds: Rect,
    active: bool,
    touched: bool,
    updated: bool,
    changed: bool,
    refresh_tier: RefreshTier,
}

impl Element {
    /// Build an element from one JSON description.
    ///
    /// Fails on an unknown `type`, a zero or missing `id`, missing text on
    /// text and buttons, a non-positive image size, an over-long string or a
    /// field of the wrong JSON type.
    pub fn from_json(value: &Value) -> Result<Self, ElementError> {
        let raw = RawElement::from_value(value)?;
        let kind = ElementKind::from_raw(&raw)?;
        let mut element = Self {
            id: 0,
            x: 0,
            y: 0,
            anchor: Anchor::default(),
            callback: Callback::new(),
            kind,
            bounds: Rect::EMPTY,
            active: false,
            touched: false,
            updated: false,
            changed: false,
            refresh_tier: RefreshTier::Fast,
        };
        element.apply(&raw)?;
        Ok(element)
    }

    /// Repopulate every input field from `value`.
    ///
    /// The description must be of this element's own kind. On failure the
    /// element is left unchanged.
    pub fn update_from_json(&mut self, value: &Value) -> Result<(), ElementError> {
        let raw = RawElement::from_value(value)?;
        if raw.kind != Some(self.kind.name()) {
            return Err(ElementError::KindMismatch);
        }
        let kind = ElementKind::from_raw(&raw)?;
        let previous = self.kind.clone();
        self.kind = kind;
        if let Err(e) = self.apply(&raw) {
            self.kind = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Common fields; recomputes layout and marks the element fresh.
    fn apply(&mut self, raw: &RawElement<'_>) -> Result<(), ElementError> {
        let id = match raw.id {
            Some(id) if id != 0 => id,
            _ => return Err(ElementError::MissingId),
        };
        let callback = bounded(raw.callback.unwrap_or(""))?;
        self.id = id;
        self.x = raw.x.unwrap_or(0);
        self.y = raw.y.unwrap_or(0);
        self.anchor = raw.anchor.map_or(Anchor::default(), Anchor::parse);
        self.callback = callback;
        self.bounds = self.layout();
        self.changed = true;
        self.updated = true;
        Ok(())
    }

    /// Caller-assigned identity, never zero
    #[must_use]
    pub const fn id(&self) -> u16 {
        self.id
    }

    /// Variant fields
    #[must_use]
    pub const fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Anchor point `(x, y)`
    #[must_use]
    pub const fn position(&self) -> (i16, i16) {
        (self.x, self.y)
    }

    /// Placement rule
    #[must_use]
    pub const fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Callback identifier, possibly empty
    #[must_use]
    pub fn callback(&self) -> &str {
        &self.callback
    }

    /// Last computed screen bounds (clipped)
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// `true` once drawn at least once
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// `true` between a touch hit and the feedback release
    #[must_use]
    pub const fn is_touched(&self) -> bool {
        self.touched
    }

    /// Set or clear the touched marker.
    pub fn set_touched(&mut self, touched: bool) {
        self.touched = touched;
    }

    /// `true` if present in the snapshot being reconciled
    #[must_use]
    pub const fn is_updated(&self) -> bool {
        self.updated
    }

    /// Set or clear the reconcile marker.
    pub fn set_updated(&mut self, updated: bool) {
        self.updated = updated;
    }

    /// `true` between (re)construction and the next draw
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        self.changed
    }

    /// Tier used when this element's area is cleared
    #[must_use]
    pub const fn refresh_tier(&self) -> RefreshTier {
        self.refresh_tier
    }

    /// Set the tier used when this element's area is cleared.
    pub fn set_refresh_tier(&mut self, tier: RefreshTier) {
        self.refresh_tier = tier;
    }

    /// Value equality over inputs: id, position, anchor, callback and the
    /// variant fields. Render state is ignored.
    #[must_use]
    pub fn is_equal(&self, other: &Self) -> bool {
        self.id == other.id
            && self.x == other.x
            && self.y == other.y
            && self.anchor == other.anchor
            && self.callback == other.callback
            && self.kind == other.kind
    }

    /// Unclipped top-left corner after anchoring.
    fn origin(&self) -> (i32, i32) {
        let (w, h) = self.kind.size();
        self.anchor.top_left(i32::from(self.x), i32::from(self.y), w, h)
    }

    /// Screen bounds implied by the inputs, clipped to the display.
    #[must_use]
    pub fn layout(&self) -> Rect {
        let (w, h) = self.kind.size();
        let (left, top) = self.origin();
        Rect::new(left, top, w, h)
    }

    /// Area erased when this element is cleared: bounds plus padding,
    /// clipped to the display.
    #[must_use]
    pub fn clear_region(&self) -> Rect {
        match &self.kind {
            ElementKind::Text(text) => {
                let bottom = if has_descender(&text.text) {
                    TEXT_PAD_Y.saturating_add(DESCENDER_PAD)
                } else {
                    TEXT_PAD_Y
                };
                self.bounds.expand(TEXT_PAD_X, TEXT_PAD_Y, bottom)
            }
            ElementKind::Button(_) => self.bounds.expand(BUTTON_PAD_X, BUTTON_PAD_Y, BUTTON_PAD_Y),
            ElementKind::Image(_) => self.bounds.expand(IMAGE_PAD, IMAGE_PAD, IMAGE_PAD),
        }
    }

    /// Inclusive-min / exclusive-max hit test against `bounds`.
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.bounds.contains(x, y)
    }

    /// Render into `fb` and refresh `bounds`.
    ///
    /// Touched elements render inverted. Images are loaded from `images`;
    /// a failed load or an off-screen placement leaves the framebuffer
    /// untouched and returns the error.
    pub async fn draw<I: ImageSource>(
        &mut self,
        fb: &mut Framebuffer,
        mode: &DisplayMode,
        images: &mut I,
    ) -> Result<Rect, ElementError> {
        let (left, top) = self.origin();
        match &self.kind {
            ElementKind::Text(text) => {
                let props = mode.font(text.level);
                let props = if self.touched { props.inverted() } else { props };
                text::draw_label(fb, &text.text, left, top, props);
            }
            ElementKind::Button(button) => {
                button.draw(fb, left, top, mode.font(button.level), self.touched);
            }
            ElementKind::Image(image) => {
                let request = image.request();
                let bitmap = images.load(&request).await?;
                if (bitmap.width(), bitmap.height()) != (request.width, request.height) {
                    return Err(ElementError::Image(ImageError::DimensionMismatch));
                }
                let inverted = image.inverted ^ mode.is_dark() ^ self.touched;
                image.draw(fb, left, top, &bitmap, inverted)?;
            }
        }
        self.bounds = self.layout();
        self.active = true;
        self.changed = false;
        debug!(id = self.id, kind = self.kind.name(), touched = self.touched, "element drawn");
        Ok(self.bounds)
    }

    /// Erase this element's clear region.
    ///
    /// With `framebuffer_only` the region is only reset to the background
    /// in memory. Otherwise the panel is first driven through the flash
    /// cycles of the element's refresh tier.
    pub async fn clear_area<P: EpdPanel>(
        &self,
        fb: &mut Framebuffer,
        mode: &DisplayMode,
        panel: &mut P,
        framebuffer_only: bool,
    ) -> Result<Rect, P::Error> {
        let tier = if framebuffer_only { RefreshTier::NoRefresh } else { self.refresh_tier };
        let area = self.clear_region();
        if tier.cycles() == 0 {
            fb.fill_rect(area, mode.background());
            return Ok(area);
        }
        panel.power_on().await?;
        let cleared = execute_clear(fb, mode, panel, area, tier).await;
        panel.power_off().await?;
        cleared.map(|()| area)
    }

    /// Run the callback.
    ///
    /// Palette toggles flip `mode` and report a refresh; `"refresh"` only
    /// reports one; any other non-empty value is handed to `dispatcher`
    /// and its result returned. An empty callback does nothing.
    pub fn execute_callback<D: CallbackDispatcher>(&self, mode: &mut DisplayMode, dispatcher: &mut D) -> bool {
        match self.callback.as_str() {
            "" => false,
            CALLBACK_TOGGLE_DARK | CALLBACK_TOGGLE_LIGHT => {
                mode.toggle();
                true
            }
            CALLBACK_REFRESH => true,
            path => {
                let ok = dispatcher.dispatch(path);
                if !ok {
                    warn!(id = self.id, callback = path, "callback dispatch failed");
                }
                ok
            }
        }
    }
}

/// Flash `area` through the cycles of `tier`, then reset it to the
/// background in the framebuffer. The panel must already be powered.
pub(crate) async fn execute_clear<P: EpdPanel>(
    fb: &mut Framebuffer,
    mode: &DisplayMode,
    panel: &mut P,
    area: Rect,
    tier: RefreshTier,
) -> Result<(), P::Error> {
    if tier.cycles() > 0 && !area.is_empty() {
        panel.flash(area.into(), tier.cycles(), mode.background_polarity()).await?;
    }
    fb.fill_rect(area, mode.background());
    Ok(())
}

/// Reasons an element description is rejected or a draw fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ElementError {
    /// Not an object, or a field has the wrong JSON type
    Malformed,
    /// `type` missing or not text/button/image
    UnknownKind,
    /// `type` differs from the element being updated
    KindMismatch,
    /// `id` missing or zero
    MissingId,
    /// Text or button without a non-empty `text`
    MissingText,
    /// A string field exceeds its capacity
    FieldTooLong,
    /// Image width or height not positive
    InvalidSize,
    /// Image could not be loaded or placed
    Image(ImageError),
}

#[cfg(feature = "std")]
impl std::error::Error for ElementError {}

impl core::fmt::Display for ElementError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed element description"),
            Self::UnknownKind => write!(f, "unknown element type"),
            Self::KindMismatch => write!(f, "element type does not match"),
            Self::MissingId => write!(f, "element id missing or zero"),
            Self::MissingText => write!(f, "element text missing"),
            Self::FieldTooLong => write!(f, "element field too long"),
            Self::InvalidSize => write!(f, "image size must be positive"),
            Self::Image(e) => write!(f, "image: {e}"),
        }
    }
}

impl From<ImageError> for ElementError {
    fn from(e: ImageError) -> Self {
        Self::Image(e)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;
    use crate::bitmap::{Bitmap, ImageRequest};
    use alloc::string::String;
    use alloc::vec::Vec;
    use platform::mocks::{MockPanel, PanelOp};
    use serde_json::json;

    #[derive(Default)]
    struct Recorder {
        paths: Vec<String>,
        result: bool,
    }

    impl CallbackDispatcher for Recorder {
        fn dispatch(&mut self, callback: &str) -> bool {
            self.paths.push(callback.into());
            self.result
        }
    }

    struct Solid(u8);

    impl ImageSource for Solid {
        async fn load(&mut self, request: &ImageRequest<'_>) -> Result<Bitmap, ImageError> {
            let stride = request.width.div_ceil(2) as usize;
            let level = self.0 & 0x0F;
            let data = alloc::vec![(level << 4) | level; stride * request.height as usize];
            Bitmap::new(request.width, request.height, data)
        }
    }

    fn text(id: u16, label: &str, x: i16, y: i16, anchor: &str) -> Element {
        Element::from_json(&json!({
            "type": "text", "id": id, "text": label, "x": x, "y": y, "anchor": anchor, "level": 1
        }))
        .unwrap()
    }

    #[test]
    fn anchors_place_bounds() {
        assert_eq!(text(1, "Play", 100, 100, "br").bounds(), Rect::new(60, 80, 40, 20));
        assert_eq!(text(1, "Play", 100, 100, "m").bounds(), Rect::new(80, 90, 40, 20));
        assert_eq!(text(1, "Play", 100, 100, "tl").bounds(), Rect::new(100, 100, 40, 20));
    }

    #[test]
    fn anchor_defaults_to_bottom_left() {
        let e = Element::from_json(&json!({ "type": "text", "id": 3, "text": "Play", "x": 100, "y": 100 }))
            .unwrap();
        assert_eq!(e.anchor(), Anchor::BottomLeft);
        assert_eq!(e.bounds(), Rect::new(100, 80, 40, 20));
    }

    #[test]
    fn invalid_descriptions_are_rejected() {
        let cases = [
            (json!({ "type": "text", "text": "a" }), ElementError::MissingId),
            (json!({ "type": "text", "id": 0, "text": "a" }), ElementError::MissingId),
            (json!({ "type": "text", "id": 1 }), ElementError::MissingText),
            (json!({ "type": "button", "id": 1, "text": "" }), ElementError::MissingText),
            (json!({ "type": "slider", "id": 1 }), ElementError::UnknownKind),
            (json!({ "id": 1, "text": "a" }), ElementError::UnknownKind),
            (json!("text"), ElementError::Malformed),
        ];
        for (value, expected) in cases {
            assert_eq!(Element::from_json(&value).unwrap_err(), expected, "{value}");
        }
    }

    #[test]
    fn equality_ignores_json_whitespace() {
        let a: Value = serde_json::from_str(r#"{"type":"text","id":1,"text":"Hi","x":10,"y":10}"#).unwrap();
        let b: Value =
            serde_json::from_str("{ \"type\" : \"text\",\n \"id\": 1, \"text\": \"Hi\",\t\"x\": 10, \"y\": 10 }")
                .unwrap();
        assert!(Element::from_json(&a).unwrap().is_equal(&Element::from_json(&b).unwrap()));
    }

    #[test]
    fn equality_sees_every_input() {
        let base = text(1, "Hi", 10, 10, "tl");
        assert!(!base.is_equal(&text(1, "Ho", 10, 10, "tl")));
        assert!(!base.is_equal(&text(1, "Hi", 11, 10, "tl")));
        assert!(!base.is_equal(&text(1, "Hi", 10, 10, "tr")));
        assert!(!base.is_equal(&text(2, "Hi", 10, 10, "tl")));
        let button = Element::from_json(&json!({ "type": "button", "id": 1, "text": "Hi", "x": 10, "y": 10, "anchor": "tl" }))
            .unwrap();
        assert!(!base.is_equal(&button));
    }

    #[tokio::test]
    async fn draw_is_idempotent_and_keeps_equality() {
        let mode = DisplayMode::default();
        let mut element = text(1, "Spotify", 200, 200, "m");
        let before = element.clone();

        let mut fb = Framebuffer::new(mode.background());
        let first = element.draw(&mut fb, &mode, &mut crate::bitmap::NoImages).await.unwrap();
        let snapshot = fb.as_bytes().to_vec();
        let second = element.draw(&mut fb, &mode, &mut crate::bitmap::NoImages).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(fb.as_bytes(), snapshot.as_slice());
        assert!(element.is_active());
        assert!(!element.is_changed());
        assert!(element.is_equal(&before));
    }

    #[tokio::test]
    async fn draw_paints_inside_bounds() {
        let mode = DisplayMode::default();
        let mut element = text(1, "H", 0, 0, "tl");
        let mut fb = Framebuffer::new(mode.background());
        element.draw(&mut fb, &mode, &mut crate::bitmap::NoImages).await.unwrap();
        let inked = (0..20).flat_map(|y| (0..10).map(move |x| (x, y))).any(|(x, y)| fb.pixel(x, y) == Some(0));
        assert!(inked);
        assert_eq!(fb.pixel(15, 5), Some(mode.background()));
    }

    #[tokio::test]
    async fn failed_image_leaves_framebuffer_untouched() {
        let mode = DisplayMode::default();
        let mut element = Element::from_json(&json!({
            "type": "image", "id": 9, "name": "bell", "endpoint": "icon",
            "width": 16, "height": 16, "x": 10, "y": 10, "anchor": "tl"
        }))
        .unwrap();
        let mut fb = Framebuffer::new(mode.background());
        let err = element.draw(&mut fb, &mode, &mut crate::bitmap::NoImages).await.unwrap_err();
        assert_eq!(err, ElementError::Image(ImageError::Unavailable));
        assert!(fb.as_bytes().iter().all(|&b| b == 0xFF));
        assert!(!element.is_active());
    }

    #[tokio::test]
    async fn image_composites_and_inverts_when_dark() {
        let value = json!({
            "type": "image", "id": 9, "name": "bell", "endpoint": "icon",
            "width": 4, "height": 2, "x": 0, "y": 0, "anchor": "tl"
        });
        let mut light = DisplayMode::default();
        let mut element = Element::from_json(&value).unwrap();
        let mut fb = Framebuffer::new(7);
        element.draw(&mut fb, &light, &mut Solid(0)).await.unwrap();
        assert_eq!(fb.pixel(3, 1), Some(0));

        // In dark mode black is swapped to white and white becomes transparent.
        light.set_dark();
        let mut fb = Framebuffer::new(7);
        element.draw(&mut fb, &light, &mut Solid(0)).await.unwrap();
        assert_eq!(fb.pixel(3, 1), Some(15));
        let mut fb = Framebuffer::new(7);
        element.draw(&mut fb, &light, &mut Solid(15)).await.unwrap();
        assert_eq!(fb.pixel(3, 1), Some(7));
    }

    #[test]
    fn clear_region_pads_descenders() {
        let plain = text(1, "HI", 100, 100, "tl");
        assert_eq!(plain.clear_region(), Rect::new(92, 94, 36, 32));
        let low = text(1, "py", 100, 100, "tl");
        assert_eq!(low.clear_region(), Rect::new(92, 94, 36, 35));
    }

    #[test]
    fn clear_region_is_clipped() {
        let corner = text(1, "HI", 0, 0, "tl");
        assert_eq!(corner.clear_region(), Rect::new(0, 0, 28, 26));
    }

    #[tokio::test]
    async fn framebuffer_only_clear_never_touches_the_panel() {
        let mode = DisplayMode::default();
        let mut element = text(1, "HI", 100, 100, "tl");
        let mut fb = Framebuffer::new(mode.background());
        element.draw(&mut fb, &mode, &mut crate::bitmap::NoImages).await.unwrap();

        let mut panel = MockPanel::new();
        let area = element.clear_area(&mut fb, &mode, &mut panel, true).await.unwrap();
        assert!(panel.ops().is_empty());
        assert_eq!(area, element.clear_region());
        assert!(fb.as_bytes().iter().all(|&b| b == 0xFF));
    }

    #[tokio::test]
    async fn visible_clear_flashes_tier_cycles() {
        let mode = DisplayMode::default();
        let mut element = text(1, "HI", 100, 100, "tl");
        element.set_refresh_tier(RefreshTier::Partial);
        let mut fb = Framebuffer::new(mode.background());
        let mut panel = MockPanel::new();
        element.clear_area(&mut fb, &mode, &mut panel, false).await.unwrap();

        let cycles = usize::from(RefreshTier::Partial.cycles());
        let pushes = usize::from(platform::display::PUSHES_PER_PHASE);
        assert_eq!(panel.push_count(), cycles * pushes * 2);
        assert_eq!(panel.ops().first(), Some(&PanelOp::PowerOn));
        assert_eq!(panel.ops().last(), Some(&PanelOp::PowerOff));
    }

    #[test]
    fn contains_is_half_open() {
        let e = text(1, "Play", 100, 100, "tl");
        assert!(e.contains(100, 100));
        assert!(e.contains(139, 119));
        assert!(!e.contains(140, 110));
        assert!(!e.contains(110, 120));
        assert!(!e.contains(99, 110));
    }

    #[test]
    fn callbacks_dispatch_by_kind() {
        let mut mode = DisplayMode::default();
        let mut recorder = Recorder { result: true, ..Recorder::default() };

        let with = |callback: &str| {
            Element::from_json(&json!({ "type": "text", "id": 1, "text": "x", "callback": callback })).unwrap()
        };

        assert!(!with("").execute_callback(&mut mode, &mut recorder));
        assert!(with("toggle-dark").execute_callback(&mut mode, &mut recorder));
        assert!(mode.is_dark());
        assert!(with("toggle-light").execute_callback(&mut mode, &mut recorder));
        assert!(!mode.is_dark());
        assert!(with("refresh").execute_callback(&mut mode, &mut recorder));
        assert!(recorder.paths.is_empty());

        assert!(with("/actions/next").execute_callback(&mut mode, &mut recorder));
        recorder.result = false;
        assert!(!with("/actions/prev").execute_callback(&mut mode, &mut recorder));
        assert_eq!(recorder.paths, ["/actions/next", "/actions/prev"]);
    }

    #[test]
    fn update_requires_same_kind() {
        let mut e = text(1, "Hi", 10, 10, "tl");
        let err = e.update_from_json(&json!({ "type": "button", "id": 1, "text": "Hi" })).unwrap_err();
        assert_eq!(err, ElementError::KindMismatch);
        assert!(e.is_equal(&text(1, "Hi", 10, 10, "tl")));

        e.update_from_json(&json!({ "type": "text", "id": 1, "text": "Hello", "x": 10, "y": 10, "anchor": "tl" }))
            .unwrap();
        assert_eq!(e.bounds(), Rect::new(10, 10, 50, 20));
        assert!(e.is_changed());
    }

    #[test]
    fn failed_update_leaves_element_intact() {
        let mut e = text(1, "Hi", 10, 10, "tl");
        let err = e.update_from_json(&json!({ "type": "text", "id": 0, "text": "Hello" })).unwrap_err();
        assert_eq!(err, ElementError::MissingId);
        assert!(e.is_equal(&text(1, "Hi", 10, 10, "tl")));
    }
}

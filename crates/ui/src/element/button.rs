//! Button elements

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyleBuilder, Rectangle, RoundedRectangle};

use super::json::RawElement;
use super::text::{draw_label, required_text, text_size};
use super::{ElementError, ElementText};
use crate::display_mode::FontProperties;
use crate::framebuffer::Framebuffer;

/// Outline thickness of unfilled buttons.
const BORDER_WIDTH: u32 = 2;

/// Fields specific to a button element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonSpec {
    /// Label (never empty)
    pub text: ElementText,
    /// Font tier, 1-4
    pub level: u8,
    /// Space left and right of the label, 0-100
    pub padding_x: i16,
    /// Space above and below the label, 0-50
    pub padding_y: i16,
    /// Corner radius, 0-35
    pub radius: i16,
    /// Solid background instead of an outline
    pub filled: bool,
}

impl ButtonSpec {
    pub(super) fn from_raw(raw: &RawElement<'_>) -> Result<Self, ElementError> {
        Ok(Self {
            text: required_text(raw)?,
            level: raw.level.unwrap_or(1),
            padding_x: clamp_i16(raw.padding_x.unwrap_or(10), 0, 100),
            padding_y: clamp_i16(raw.padding_y.unwrap_or(5), 0, 50),
            radius: clamp_i16(raw.radius.unwrap_or(0), 0, 35),
            filled: raw.filled.unwrap_or(false),
        })
    }

    /// Outer size: label plus padding on both sides.
    #[must_use]
    pub fn size(&self) -> (i32, i32) {
        let (w, h) = text_size(&self.text);
        let px = i32::from(self.padding_x).saturating_mul(2);
        let py = i32::from(self.padding_y).saturating_mul(2);
        (w.saturating_add(px), h.saturating_add(py))
    }

    /// Render with the box's top-left corner at `(left, top)`.
    ///
    /// `inverted` swaps the fill: a filled button is drawn as an outline and
    /// an outlined one is filled, so a press is always visible.
    pub(super) fn draw(&self, fb: &mut Framebuffer, left: i32, top: i32, props: FontProperties, inverted: bool) {
        let (width, height) = self.size();
        let solid = self.filled != inverted;
        let radius = i32::from(self.radius).min(width / 2).min(height / 2).max(0);

        let frame = Rectangle::new(Point::new(left, top), to_size(width, height));
        let style = if solid {
            PrimitiveStyleBuilder::new().fill_color(props.fg_color()).build()
        } else {
            PrimitiveStyleBuilder::new()
                .stroke_color(props.fg_color())
                .stroke_width(BORDER_WIDTH)
                .fill_color(props.bg_color())
                .build()
        };
        let corner = to_size(radius, radius);
        let _ = RoundedRectangle::with_equal_corners(frame, corner).into_styled(style).draw(fb);

        let label = if solid { props.inverted() } else { props };
        draw_label(
            fb,
            &self.text,
            left.saturating_add(i32::from(self.padding_x)),
            top.saturating_add(i32::from(self.padding_y)),
            label,
        );
    }
}

#[allow(clippy::cast_possible_truncation)] // clamped into i16 range first
fn clamp_i16(value: i64, min: i16, max: i16) -> i16 {
    value.clamp(i64::from(min), i64::from(max)) as i16
}

#[allow(clippy::cast_sign_loss)]
fn to_size(width: i32, height: i32) -> Size {
    Size::new(width.max(0) as u32, height.max(0) as u32)
}

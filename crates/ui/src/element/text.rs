//! Text elements and the shared text renderer

use alloc::string::String;

use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyleBuilder};
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

use super::json::{bounded, RawElement};
use super::{ElementError, ElementText};
use crate::display_mode::FontProperties;
use crate::framebuffer::Framebuffer;

/// Font used for every element label.
pub const FONT: &MonoFont<'static> = &FONT_10X20;

/// Letters that reach below the baseline.
const DESCENDERS: [char; 5] = ['g', 'j', 'p', 'q', 'y'];

/// Fields specific to a text element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpec {
    /// Label (never empty)
    pub text: ElementText,
    /// Font tier, 1-4
    pub level: u8,
}

impl TextSpec {
    pub(super) fn from_raw(raw: &RawElement<'_>) -> Result<Self, ElementError> {
        Ok(Self { text: required_text(raw)?, level: raw.level.unwrap_or(1) })
    }
}

/// Non-empty `text` field, as required by text and button elements.
pub(super) fn required_text(raw: &RawElement<'_>) -> Result<ElementText, ElementError> {
    match raw.text {
        Some(text) if !text.is_empty() => bounded(text),
        _ => Err(ElementError::MissingText),
    }
}

/// Rendered size of `text` in pixels.
#[must_use]
pub fn text_size(text: &str) -> (i32, i32) {
    let advance = FONT.character_size.width.saturating_add(FONT.character_spacing);
    let advance = i32::try_from(advance).unwrap_or(i32::MAX);
    let chars = i32::try_from(text.chars().count()).unwrap_or(i32::MAX);
    let height = i32::try_from(FONT.character_size.height).unwrap_or(i32::MAX);
    (chars.saturating_mul(advance), height)
}

/// `true` if any glyph descends below the baseline.
#[must_use]
pub fn has_descender(text: &str) -> bool {
    text.contains(|c: char| DESCENDERS.contains(&c))
}

/// `text` with every character outside the font's ASCII range replaced by `fallback`.
#[must_use]
pub fn printable(text: &str, fallback: char) -> String {
    text.chars().map(|c| if c == ' ' || c.is_ascii_graphic() { c } else { fallback }).collect()
}

/// Render `text` with its top-left corner at `(left, top)`.
pub(super) fn draw_label(fb: &mut Framebuffer, text: &str, left: i32, top: i32, props: FontProperties) {
    let mut style = MonoTextStyleBuilder::new()
        .font(FONT)
        .text_color(props.fg_color())
        .background_color(props.bg_color());
    if props.underlined() {
        style = style.underline();
    }
    if props.struck_through() {
        style = style.strikethrough();
    }
    let label = printable(text, props.fallback_glyph);
    let _ = Text::with_baseline(&label, Point::new(left, top), style.build(), Baseline::Top).draw(fb);
}

//! Packed 4-bit grayscale framebuffer
//!
//! Layout matches what the panel driver consumes: row-major, two pixels per
//! byte, the even-x pixel in the high nibble. Palette index 0 is black and
//! 15 is white.
//!
//! The buffer implements [`DrawTarget`] with [`Gray4`] so text and shapes
//! can be rendered with embedded-graphics primitives. Pixels outside the
//! panel are dropped silently.

use alloc::vec;
use alloc::vec::Vec;

use embedded_graphics::pixelcolor::Gray4;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use platform::config::FRAMEBUFFER_LEN;

use crate::geometry::{Rect, DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// Largest palette index.
pub const MAX_LEVEL: u8 = 0x0F;

/// Full-screen packed framebuffer.
pub struct Framebuffer {
    bytes: Vec<u8>,
}

impl Framebuffer {
    /// Allocate a framebuffer with every pixel set to `level`.
    #[must_use]
    pub fn new(level: u8) -> Self {
        Self { bytes: vec![pack(level); FRAMEBUFFER_LEN] }
    }

    /// Raw packed bytes, ready for the panel.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Palette index at `(x, y)`, or `None` outside the panel.
    #[must_use]
    pub fn pixel(&self, x: i32, y: i32) -> Option<u8> {
        let (index, high) = locate(x, y)?;
        let byte = *self.bytes.get(index)?;
        Some(if high { byte >> 4 } else { byte & MAX_LEVEL })
    }

    /// Set the pixel at `(x, y)`. Out-of-panel writes are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, level: u8) {
        let Some((index, high)) = locate(x, y) else {
            return;
        };
        if let Some(byte) = self.bytes.get_mut(index) {
            let level = level & MAX_LEVEL;
            *byte = if high {
                (*byte & 0x0F) | (level << 4)
            } else {
                (*byte & 0xF0) | level
            };
        }
    }

    /// Set every pixel to `level`.
    pub fn fill(&mut self, level: u8) {
        self.bytes.fill(pack(level));
    }

    /// Set every pixel inside `area` to `level`.
    pub fn fill_rect(&mut self, area: Rect, level: u8) {
        for y in area.y()..area.bottom() {
            for x in area.x()..area.right() {
                self.set_pixel(x, y, level);
            }
        }
    }

    /// Copy a row-major pixel stream onto the buffer at `(x, y)`.
    ///
    /// `pixels` yields one palette index per pixel, `width` per row. Pixels
    /// equal to `transparent` are skipped so the destination shows through.
    pub fn composite<I>(&mut self, x: i32, y: i32, width: u32, pixels: I, transparent: u8)
    where
        I: IntoIterator<Item = u8>,
    {
        if width == 0 {
            return;
        }
        let width = i32::try_from(width).unwrap_or(i32::MAX);
        let (mut col, mut row) = (0i32, 0i32);
        for level in pixels {
            if level != transparent {
                self.set_pixel(x.saturating_add(col), y.saturating_add(row), level);
            }
            col = col.saturating_add(1);
            if col == width {
                col = 0;
                row = row.saturating_add(1);
            }
        }
    }
}

/// Both nibbles set to `level`.
const fn pack(level: u8) -> u8 {
    let level = level & MAX_LEVEL;
    (level << 4) | level
}

/// Byte index and nibble (true = high) for `(x, y)`.
#[allow(clippy::cast_sign_loss)] // both coordinates are checked non-negative first
fn locate(x: i32, y: i32) -> Option<(usize, bool)> {
    if x < 0 || y < 0 || x >= DISPLAY_WIDTH || y >= DISPLAY_HEIGHT {
        return None;
    }
    let (x, y) = (x as usize, y as usize);
    let row = y.checked_mul(DISPLAY_WIDTH as usize)?;
    let index = row.checked_add(x)? / 2;
    Some((index, x % 2 == 0))
}

impl OriginDimensions for Framebuffer {
    #[allow(clippy::cast_sign_loss)]
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH as u32, DISPLAY_HEIGHT as u32)
    }
}

impl DrawTarget for Framebuffer {
    type Color = Gray4;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.luma());
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let width = i32::try_from(area.size.width).unwrap_or(i32::MAX);
        let height = i32::try_from(area.size.height).unwrap_or(i32::MAX);
        self.fill_rect(Rect::new(area.top_left.x, area.top_left.y, width, height), color.luma());
        Ok(())
    }
}

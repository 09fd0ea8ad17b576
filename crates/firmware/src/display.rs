//! Headless e-paper panel
//!
//! Keeps what the glass would show in memory, one palette index per pixel.
//! Pushes paint their area solid black or white; blits copy the framebuffer
//! area across. Used by host tests and by the `replay` binary, which saves
//! the glass as a PNG after every pass (`emulator` feature).

use alloc::vec;
use alloc::vec::Vec;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use tracing::trace;

use platform::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FRAMEBUFFER_LEN};
use platform::{DisplayError, EpdPanel, PanelColor};

const WHITE: u8 = 0x0F;

/// In-memory [`EpdPanel`].
pub struct HeadlessPanel {
    glass: Vec<u8>,
    powered: bool,
    pushes: usize,
    blits: usize,
}

impl Default for HeadlessPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessPanel {
    /// Blank white panel, powered off.
    #[must_use]
    pub fn new() -> Self {
        let pixels = usize::try_from(DISPLAY_WIDTH.saturating_mul(DISPLAY_HEIGHT)).unwrap_or(0);
        Self { glass: vec![WHITE; pixels], powered: false, pushes: 0, blits: 0 }
    }

    /// Palette index shown at `(x, y)`
    #[must_use]
    pub fn level(&self, x: i32, y: i32) -> Option<u8> {
        index(Point::new(x, y)).and_then(|i| self.glass.get(i).copied())
    }

    /// `true` while the rails are on
    #[must_use]
    pub const fn is_powered(&self) -> bool {
        self.powered
    }

    /// Pushes since creation
    #[must_use]
    pub const fn pushes(&self) -> usize {
        self.pushes
    }

    /// Blits since creation
    #[must_use]
    pub const fn blits(&self) -> usize {
        self.blits
    }

    /// Save the glass as an 8-bit grayscale PNG.
    #[cfg(feature = "emulator")]
    #[allow(clippy::cast_sign_loss)] // display extents are positive
    pub fn save_png(&self, path: &std::path::Path) -> Result<(), image::ImageError> {
        let image = image::GrayImage::from_fn(DISPLAY_WIDTH as u32, DISPLAY_HEIGHT as u32, |x, y| {
            let level = self.level(x as i32, y as i32).unwrap_or(WHITE);
            image::Luma([level.saturating_mul(17)])
        });
        image.save(path)
    }

    fn visible(area: Rectangle) -> impl Iterator<Item = Point> {
        #[allow(clippy::cast_sign_loss)]
        let screen = Rectangle::new(Point::zero(), Size::new(DISPLAY_WIDTH as u32, DISPLAY_HEIGHT as u32));
        area.intersection(&screen).points()
    }
}

#[allow(clippy::cast_sign_loss)] // bounds checked first
fn index(p: Point) -> Option<usize> {
    if p.x < 0 || p.y < 0 || p.x >= DISPLAY_WIDTH || p.y >= DISPLAY_HEIGHT {
        return None;
    }
    (p.y as usize).checked_mul(DISPLAY_WIDTH as usize)?.checked_add(p.x as usize)
}

fn packed_level(framebuffer: &[u8], i: usize) -> Option<u8> {
    let byte = framebuffer.get(i / 2)?;
    Some(if i % 2 == 0 { byte >> 4 } else { byte & 0x0F })
}

impl EpdPanel for HeadlessPanel {
    type Error = DisplayError;

    async fn power_on(&mut self) -> Result<(), Self::Error> {
        self.powered = true;
        Ok(())
    }

    async fn power_off(&mut self) -> Result<(), Self::Error> {
        self.powered = false;
        Ok(())
    }

    async fn push_pixels(&mut self, area: Rectangle, _duration_ms: u16, color: PanelColor) -> Result<(), Self::Error> {
        if !self.powered {
            return Err(DisplayError::PoweredOff);
        }
        let level = match color {
            PanelColor::Black => 0,
            PanelColor::White => WHITE,
        };
        for p in Self::visible(area) {
            if let Some(px) = index(p).and_then(|i| self.glass.get_mut(i)) {
                *px = level;
            }
        }
        self.pushes = self.pushes.saturating_add(1);
        Ok(())
    }

    async fn draw_grayscale(&mut self, area: Rectangle, framebuffer: &[u8]) -> Result<(), Self::Error> {
        if !self.powered {
            return Err(DisplayError::PoweredOff);
        }
        if framebuffer.len() != FRAMEBUFFER_LEN {
            return Err(DisplayError::BufferSize);
        }
        for p in Self::visible(area) {
            let Some(i) = index(p) else { continue };
            if let (Some(level), Some(px)) = (packed_level(framebuffer, i), self.glass.get_mut(i)) {
                *px = level;
            }
        }
        self.blits = self.blits.saturating_add(1);
        trace!(blits = self.blits, "frame blitted");
        Ok(())
    }
}

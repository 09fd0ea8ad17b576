//! E-paper panel abstraction
//!
//! The panel is bistable: pixels keep their state without power, and every
//! change is made by pushing charge through an area for a fixed time. The
//! engine never talks to the waveform hardware directly; it asks for two
//! things only:
//!
//! - push a solid polarity through a rectangle (used for flash cycles that
//!   erase ghosting), and
//! - draw a packed 4-bit framebuffer onto the glass.
//!
//! Both the board driver and the headless emulator panel implement
//! [`EpdPanel`].

use embedded_graphics::primitives::Rectangle;

/// Number of pushes of each polarity within one flash cycle.
pub const PUSHES_PER_PHASE: u8 = 4;

/// Duration of a single push in milliseconds.
pub const PUSH_TIME_MS: u16 = 50;

/// Polarity pushed through an area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelColor {
    /// Drive pixels toward black
    Black,
    /// Drive pixels toward white
    White,
}

impl PanelColor {
    /// The opposite polarity.
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    /// Polarity that matches a 4-bit palette index (0 = black, 15 = white).
    #[must_use]
    pub const fn from_level(level: u8) -> Self {
        if level == 0 {
            Self::Black
        } else {
            Self::White
        }
    }
}

/// Driver for a grayscale e-paper panel.
pub trait EpdPanel {
    /// Error type for panel operations
    type Error: core::fmt::Debug;

    /// Power the panel high-voltage rails on.
    fn power_on(&mut self) -> impl core::future::Future<Output = Result<(), Self::Error>>;

    /// Power the panel high-voltage rails off.
    fn power_off(&mut self) -> impl core::future::Future<Output = Result<(), Self::Error>>;

    /// Push `color` through `area` for `duration_ms`.
    fn push_pixels(
        &mut self,
        area: Rectangle,
        duration_ms: u16,
        color: PanelColor,
    ) -> impl core::future::Future<Output = Result<(), Self::Error>>;

    /// Draw a packed 4bpp framebuffer (high nibble = even x) covering the
    /// whole panel, updating only `area` on the glass.
    fn draw_grayscale(
        &mut self,
        area: Rectangle,
        framebuffer: &[u8],
    ) -> impl core::future::Future<Output = Result<(), Self::Error>>;

    /// Drive `area` through `cycles` flash cycles, ending on `background`.
    ///
    /// Each cycle pushes the foreground polarity [`PUSHES_PER_PHASE`] times
    /// followed by the background polarity the same number of times.
    fn flash(
        &mut self,
        area: Rectangle,
        cycles: u8,
        background: PanelColor,
    ) -> impl core::future::Future<Output = Result<(), Self::Error>> {
        async move {
            let foreground = background.inverse();
            for _ in 0..cycles {
                for _ in 0..PUSHES_PER_PHASE {
                    self.push_pixels(area, PUSH_TIME_MS, foreground).await?;
                }
                for _ in 0..PUSHES_PER_PHASE {
                    self.push_pixels(area, PUSH_TIME_MS, background).await?;
                }
            }
            Ok(())
        }
    }
}

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error
    Communication,
    /// Rails not powered
    PoweredOff,
    /// Framebuffer length does not match the panel
    BufferSize,
}

#[cfg(feature = "std")]
impl std::error::Error for DisplayError {}

impl core::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Communication => write!(f, "Display communication error"),
            Self::PoweredOff => write!(f, "Display rails are powered off"),
            Self::BufferSize => write!(f, "Framebuffer size does not match the panel"),
        }
    }
}

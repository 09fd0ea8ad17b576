//! Light and dark palettes
//!
//! A [`DisplayMode`] fixes the screen background and foreground and four
//! text tiers ("levels"). Level 1 is the primary text colour; higher levels
//! fade toward the background.

use embedded_graphics::pixelcolor::Gray4;
use platform::PanelColor;

use crate::framebuffer::MAX_LEVEL;

/// Glyph substituted for characters the font cannot render.
pub const FALLBACK_GLYPH: char = '?';

/// [`FontProperties::flags`] bit: underline the label.
pub const FLAG_UNDERLINE: u8 = 1 << 0;

/// [`FontProperties::flags`] bit: strike the label through.
pub const FLAG_STRIKETHROUGH: u8 = 1 << 1;

/// How a text tier is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FontProperties {
    /// Glyph colour (palette index)
    pub fg: u8,
    /// Cell background colour (palette index)
    pub bg: u8,
    /// Drawn in place of characters missing from the font
    pub fallback_glyph: char,
    /// `FLAG_*` decoration bits
    pub flags: u8,
}

impl FontProperties {
    const fn new(fg: u8, bg: u8) -> Self {
        Self { fg, bg, fallback_glyph: FALLBACK_GLYPH, flags: 0 }
    }

    /// Same properties with the colours swapped.
    #[must_use]
    pub const fn inverted(self) -> Self {
        Self { fg: self.bg, bg: self.fg, ..self }
    }

    /// Same properties with `flags` replaced.
    #[must_use]
    pub const fn with_flags(self, flags: u8) -> Self {
        Self { flags, ..self }
    }

    /// `true` if the underline bit is set.
    #[must_use]
    pub const fn underlined(self) -> bool {
        self.flags & FLAG_UNDERLINE != 0
    }

    /// `true` if the strikethrough bit is set.
    #[must_use]
    pub const fn struck_through(self) -> bool {
        self.flags & FLAG_STRIKETHROUGH != 0
    }

    /// Glyph colour as an embedded-graphics colour.
    #[must_use]
    pub fn fg_color(self) -> Gray4 {
        Gray4::new(self.fg)
    }

    /// Background colour as an embedded-graphics colour.
    #[must_use]
    pub fn bg_color(self) -> Gray4 {
        Gray4::new(self.bg)
    }
}

/// Global screen palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayMode {
    background: u8,
    foreground: u8,
    levels: [FontProperties; 4],
}

impl DisplayMode {
    /// Black text on a white screen.
    pub const WHITE: Self = Self {
        background: MAX_LEVEL,
        foreground: 0,
        levels: [
            FontProperties::new(0, MAX_LEVEL),
            FontProperties::new(4, MAX_LEVEL),
            FontProperties::new(8, MAX_LEVEL),
            FontProperties::new(12, MAX_LEVEL),
        ],
    };

    /// White text on a black screen.
    pub const BLACK: Self = Self {
        background: 0,
        foreground: MAX_LEVEL,
        levels: [
            FontProperties::new(MAX_LEVEL, 0),
            FontProperties::new(12, 0),
            FontProperties::new(8, 0),
            FontProperties::new(4, 0),
        ],
    };

    /// Screen background palette index
    #[must_use]
    pub const fn background(&self) -> u8 {
        self.background
    }

    /// Screen foreground palette index
    #[must_use]
    pub const fn foreground(&self) -> u8 {
        self.foreground
    }

    /// `true` for the black palette.
    #[must_use]
    pub const fn is_dark(&self) -> bool {
        self.background == 0
    }

    /// Polarity a flash cycle must end on.
    #[must_use]
    pub const fn background_polarity(&self) -> PanelColor {
        PanelColor::from_level(self.background)
    }

    /// Text colours for `level` (1-4). Any other level maps to the primary tier.
    #[must_use]
    pub fn font(&self, level: u8) -> FontProperties {
        let [primary, secondary, tertiary, quaternary] = self.levels;
        match level {
            2 => secondary,
            3 => tertiary,
            4 => quaternary,
            _ => primary,
        }
    }

    /// Switch to the black palette.
    pub fn set_dark(&mut self) {
        *self = Self::BLACK;
    }

    /// Switch to the white palette.
    pub fn set_light(&mut self) {
        *self = Self::WHITE;
    }

    /// Flip between the two palettes.
    pub fn toggle(&mut self) {
        if self.is_dark() {
            self.set_light();
        } else {
            self.set_dark();
        }
    }
}

impl Default for DisplayMode {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn white_mode_levels() {
        let mode = DisplayMode::WHITE;
        assert_eq!(mode.background(), 15);
        assert_eq!(mode.foreground(), 0);
        let fgs: [u8; 4] = [1, 2, 3, 4].map(|l| mode.font(l).fg);
        assert_eq!(fgs, [0, 4, 8, 12]);
        assert!((1..=4).all(|l| mode.font(l).bg == 15));
    }

    #[test]
    fn black_mode_levels() {
        let mode = DisplayMode::BLACK;
        assert_eq!(mode.background(), 0);
        assert_eq!(mode.foreground(), 15);
        let fgs: [u8; 4] = [1, 2, 3, 4].map(|l| mode.font(l).fg);
        assert_eq!(fgs, [15, 12, 8, 4]);
        assert!((1..=4).all(|l| mode.font(l).bg == 0));
    }

    #[test]
    fn unknown_level_maps_to_primary() {
        let mode = DisplayMode::WHITE;
        assert_eq!(mode.font(0), mode.font(1));
        assert_eq!(mode.font(9), mode.font(1));
    }

    #[test]
    fn toggle_flips_palette() {
        let mut mode = DisplayMode::default();
        assert!(!mode.is_dark());
        mode.toggle();
        assert_eq!(mode, DisplayMode::BLACK);
        mode.toggle();
        assert_eq!(mode, DisplayMode::WHITE);
    }

    #[test]
    fn background_polarity_follows_mode() {
        assert_eq!(DisplayMode::WHITE.background_polarity(), PanelColor::White);
        assert_eq!(DisplayMode::BLACK.background_polarity(), PanelColor::Black);
    }

    #[test]
    fn inverted_swaps_colours() {
        let props = DisplayMode::WHITE.font(1).with_flags(FLAG_UNDERLINE).inverted();
        assert_eq!((props.fg, props.bg), (15, 0));
        assert_eq!(props.fallback_glyph, '?');
        assert!(props.underlined());
    }

    #[test]
    fn palettes_carry_no_decoration() {
        for mode in [DisplayMode::WHITE, DisplayMode::BLACK] {
            assert!((1..=4).all(|l| mode.font(l).flags == 0));
            assert!((1..=4).all(|l| mode.font(l).fallback_glyph == FALLBACK_GLYPH));
        }
        let props = DisplayMode::WHITE.font(1).with_flags(FLAG_STRIKETHROUGH);
        assert!(props.struck_through());
        assert!(!props.underlined());
    }
}

//! Anchor-based placement

/// Point of an element's box that sits on its `(x, y)` coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Anchor {
    /// Top-left corner
    TopLeft,
    /// Middle of the top edge
    TopMiddle,
    /// Top-right corner
    TopRight,
    /// Middle of the left edge
    MiddleLeft,
    /// Centre
    Middle,
    /// Middle of the right edge
    MiddleRight,
    /// Bottom-left corner (the default when no anchor is given)
    #[default]
    BottomLeft,
    /// Middle of the bottom edge
    BottomMiddle,
    /// Bottom-right corner
    BottomRight,
}

impl Anchor {
    /// Parse the short JSON form. Unknown strings fall back to top-left.
    #[must_use]
    pub fn parse(code: &str) -> Self {
        match code {
            "tm" => Self::TopMiddle,
            "tr" => Self::TopRight,
            "ml" => Self::MiddleLeft,
            "m" => Self::Middle,
            "mr" => Self::MiddleRight,
            "bl" => Self::BottomLeft,
            "bm" => Self::BottomMiddle,
            "br" => Self::BottomRight,
            _ => Self::TopLeft,
        }
    }

    /// Top-left corner of a `width` x `height` box anchored at `(x, y)`.
    #[must_use]
    pub fn top_left(self, x: i32, y: i32, width: i32, height: i32) -> (i32, i32) {
        let half_w = width / 2;
        let half_h = height / 2;
        let left = match self {
            Self::TopLeft | Self::MiddleLeft | Self::BottomLeft => x,
            Self::TopMiddle | Self::Middle | Self::BottomMiddle => x.saturating_sub(half_w),
            Self::TopRight | Self::MiddleRight | Self::BottomRight => x.saturating_sub(width),
        };
        let top = match self {
            Self::TopLeft | Self::TopMiddle | Self::TopRight => y,
            Self::MiddleLeft | Self::Middle | Self::MiddleRight => y.saturating_sub(half_h),
            Self::BottomLeft | Self::BottomMiddle | Self::BottomRight => y.saturating_sub(height),
        };
        (left, top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_nine_placements() {
        let cases = [
            (Anchor::TopLeft, (100, 100)),
            (Anchor::TopRight, (60, 100)),
            (Anchor::TopMiddle, (80, 100)),
            (Anchor::BottomLeft, (100, 80)),
            (Anchor::BottomRight, (60, 80)),
            (Anchor::BottomMiddle, (80, 80)),
            (Anchor::Middle, (80, 90)),
            (Anchor::MiddleLeft, (100, 90)),
            (Anchor::MiddleRight, (60, 90)),
        ];
        for (anchor, expected) in cases {
            assert_eq!(anchor.top_left(100, 100, 40, 20), expected, "{anchor:?}");
        }
    }

    #[test]
    fn odd_sizes_round_half_toward_zero() {
        assert_eq!(Anchor::Middle.top_left(10, 10, 5, 3), (8, 9));
    }

    #[test]
    fn parse_short_codes() {
        assert_eq!(Anchor::parse("tl"), Anchor::TopLeft);
        assert_eq!(Anchor::parse("m"), Anchor::Middle);
        assert_eq!(Anchor::parse("br"), Anchor::BottomRight);
        assert_eq!(Anchor::parse("ml"), Anchor::MiddleLeft);
    }

    #[test]
    fn unknown_code_is_top_left() {
        assert_eq!(Anchor::parse("center"), Anchor::TopLeft);
        assert_eq!(Anchor::parse(""), Anchor::TopLeft);
    }

    #[test]
    fn default_is_bottom_left() {
        assert_eq!(Anchor::default(), Anchor::BottomLeft);
    }
}

//! Image elements

use super::json::{bounded, RawElement};
use super::{ElementError, ElementText};
use crate::bitmap::{invert_extremes, Bitmap, ImageRequest, ImageType};
use crate::framebuffer::{Framebuffer, MAX_LEVEL};
use crate::geometry::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// Longest image name or endpoint accepted.
pub const NAME_CAPACITY: usize = 48;

/// Short fixed-capacity string for names and endpoints.
pub type ImageName = heapless::String<NAME_CAPACITY>;

/// Fields specific to an image element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSpec {
    /// Optional caption (not rendered)
    pub text: Option<ElementText>,
    /// Image name on the server
    pub name: ImageName,
    /// Server endpoint segment (`icon`, `album-art`, ...)
    pub endpoint: ImageName,
    /// Width in pixels
    pub width: i16,
    /// Height in pixels
    pub height: i16,
    /// Ask the server for the filled variant
    pub filled: bool,
    /// Treat black as transparent and swap black/white
    pub inverted: bool,
    /// Family derived from the endpoint
    pub image_type: ImageType,
}

impl ImageSpec {
    pub(super) fn from_raw(raw: &RawElement<'_>) -> Result<Self, ElementError> {
        let width = raw.width.unwrap_or(0);
        let height = raw.height.unwrap_or(0);
        if width <= 0 || height <= 0 {
            return Err(ElementError::InvalidSize);
        }
        let endpoint = raw.endpoint.or(raw.path).unwrap_or("");
        Ok(Self {
            text: raw.text.map(bounded).transpose()?,
            name: bounded(raw.name.unwrap_or(""))?,
            endpoint: bounded(endpoint)?,
            width,
            height,
            filled: raw.filled.unwrap_or(true),
            inverted: raw.inverted.unwrap_or(false),
            image_type: ImageType::from_endpoint(endpoint),
        })
    }

    /// Size in pixels.
    #[must_use]
    pub fn size(&self) -> (i32, i32) {
        (i32::from(self.width), i32::from(self.height))
    }

    /// Lookup key for the image source.
    #[allow(clippy::cast_sign_loss)] // construction rejects non-positive sizes
    #[must_use]
    pub fn request(&self) -> ImageRequest<'_> {
        ImageRequest {
            name: &self.name,
            endpoint: &self.endpoint,
            width: self.width as u32,
            height: self.height as u32,
            filled: self.filled,
            kind: self.image_type,
        }
    }

    /// Composite `bitmap` with its top-left corner at `(left, top)`.
    ///
    /// The background extreme is transparent: white normally, black when
    /// `inverted` (after swapping the two extremes).
    pub(super) fn draw(
        &self,
        fb: &mut Framebuffer,
        left: i32,
        top: i32,
        bitmap: &Bitmap,
        inverted: bool,
    ) -> Result<(), ElementError> {
        let (width, height) = self.size();
        let fits = left >= 0
            && top >= 0
            && left.saturating_add(width) <= DISPLAY_WIDTH
            && top.saturating_add(height) <= DISPLAY_HEIGHT;
        if !fits {
            return Err(ElementError::Image(crate::bitmap::ImageError::OutOfBounds));
        }
        if inverted {
            fb.composite(left, top, bitmap.width(), bitmap.pixels().map(invert_extremes), 0);
        } else {
            fb.composite(left, top, bitmap.width(), bitmap.pixels(), MAX_LEVEL);
        }
        Ok(())
    }
}

//! Packed grayscale bitmaps and their sources
//!
//! Wire and cache format:
//!
//! ```text
//! offset  size  field
//! 0       4     width  (u32, little-endian)
//! 4       4     height (u32, little-endian)
//! 8       ...   rows of packed 4bpp pixels, ceil(width / 2) bytes per row,
//!               high nibble = left pixel
//! ```

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::framebuffer::MAX_LEVEL;

/// Size of the width/height header.
pub const HEADER_LEN: usize = 8;

/// Decoded bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Bitmap {
    /// Wrap packed pixel rows. Fails if `data` is not exactly one image.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::InvalidSize);
        }
        if Some(data.len()) != packed_len(width, height) {
            return Err(ImageError::SizeMismatch);
        }
        Ok(Self { width, height, data })
    }

    /// Decode a server response or cache entry and check it has the
    /// requested dimensions.
    pub fn decode(bytes: &[u8], width: u32, height: u32) -> Result<Self, ImageError> {
        if bytes.len() < HEADER_LEN {
            return Err(ImageError::Truncated);
        }
        let (header, body) = bytes.split_at(HEADER_LEN);
        let (w, h) = header.split_at(4);
        let w = u32::from_le_bytes(w.try_into().map_err(|_| ImageError::Truncated)?);
        let h = u32::from_le_bytes(h.try_into().map_err(|_| ImageError::Truncated)?);
        if (w, h) != (width, height) {
            return Err(ImageError::DimensionMismatch);
        }
        Self::new(width, height, body.to_vec())
    }

    /// Header plus body, as written to the cache.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN.saturating_add(self.data.len()));
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.data);
        out
    }

    /// Width in pixels
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Row-major palette indices, one per pixel.
    pub fn pixels(&self) -> impl Iterator<Item = u8> + '_ {
        let stride = row_stride(self.width);
        let width = self.width as usize;
        self.data.chunks(stride).flat_map(move |row| {
            row.iter()
                .flat_map(|byte| [byte >> 4, byte & MAX_LEVEL])
                .take(width)
        })
    }
}

fn row_stride(width: u32) -> usize {
    (width as usize).div_ceil(2)
}

fn packed_len(width: u32, height: u32) -> Option<usize> {
    row_stride(width).checked_mul(height as usize)
}

/// Swap the two palette extremes; mid grays are unchanged.
#[must_use]
pub const fn invert_extremes(level: u8) -> u8 {
    match level {
        0 => MAX_LEVEL,
        MAX_LEVEL => 0,
        other => other,
    }
}

/// Server-side image family, derived from the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImageType {
    /// Named icon rendered by the server
    Icon,
    /// Cover art of the current track
    AlbumArt,
    /// Arbitrary named image
    Url,
}

impl ImageType {
    /// Classify an endpoint by prefix.
    #[must_use]
    pub fn from_endpoint(endpoint: &str) -> Self {
        if endpoint.starts_with("icon") {
            Self::Icon
        } else if endpoint.starts_with("album-art") {
            Self::AlbumArt
        } else {
            Self::Url
        }
    }
}

/// Everything needed to locate one bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageRequest<'a> {
    /// Image name (icon name, cover id, ...)
    pub name: &'a str,
    /// Server endpoint segment
    pub endpoint: &'a str,
    /// Requested width
    pub width: u32,
    /// Requested height
    pub height: u32,
    /// Ask the server for a filled variant
    pub filled: bool,
    /// Family derived from `endpoint`
    pub kind: ImageType,
}

impl ImageRequest<'_> {
    /// Cache entry name: `{name}_{width}x{height}.bin`.
    #[must_use]
    pub fn cache_file_name(&self) -> String {
        format!("{}_{}x{}.bin", self.name, self.width, self.height)
    }

    /// Render URL on the server at `base_url`.
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        match self.kind {
            ImageType::Icon => format!(
                "{base_url}/image/{}/{}?width={}&height={}&filled={}",
                self.endpoint,
                self.name,
                self.width,
                self.height,
                u8::from(self.filled)
            ),
            ImageType::AlbumArt => format!(
                "{base_url}/image/{}/?width={}&height={}",
                self.endpoint, self.width, self.height
            ),
            ImageType::Url => format!(
                "{base_url}/image/{}/{}?width={}&height={}",
                self.endpoint, self.name, self.width, self.height
            ),
        }
    }
}

/// Provider of bitmaps for image elements.
pub trait ImageSource {
    /// Load the bitmap described by `request`.
    fn load(
        &mut self,
        request: &ImageRequest<'_>,
    ) -> impl core::future::Future<Output = Result<Bitmap, ImageError>>;
}

/// Source with no images at all; every load fails with `Unavailable`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoImages;

impl ImageSource for NoImages {
    async fn load(&mut self, _request: &ImageRequest<'_>) -> Result<Bitmap, ImageError> {
        Err(ImageError::Unavailable)
    }
}

/// Bitmap failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImageError {
    /// Network or source not available
    Unavailable,
    /// Server answered with a non-200 status
    Status(u16),
    /// Fewer than 8 header bytes
    Truncated,
    /// Header dimensions differ from the request
    DimensionMismatch,
    /// Body length differs from `width * height / 2`
    SizeMismatch,
    /// Zero width or height
    InvalidSize,
    /// Placement rectangle leaves the display
    OutOfBounds,
}

#[cfg(feature = "std")]
impl std::error::Error for ImageError {}

impl core::fmt::Display for ImageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "image source unavailable"),
            Self::Status(code) => write!(f, "image request failed with HTTP {code}"),
            Self::Truncated => write!(f, "image header truncated"),
            Self::DimensionMismatch => write!(f, "image header dimensions differ from request"),
            Self::SizeMismatch => write!(f, "image body size mismatch"),
            Self::InvalidSize => write!(f, "image has zero width or height"),
            Self::OutOfBounds => write!(f, "image placement outside the display"),
        }
    }
}

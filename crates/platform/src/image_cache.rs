//! Persistent image cache abstraction
//!
//! Rendered bitmaps are expensive to fetch over Wi-Fi, so the device keeps a
//! copy of every image it has drawn on the SD card. Entries are flat files
//! named `{name}_{width}x{height}.bin`, each holding the same 8-byte header
//! and packed body the server sends.

use alloc::vec::Vec;

/// Key/value store for cached image files.
pub trait ImageCache {
    /// Read the whole entry, or `Ok(None)` on a miss.
    fn read(
        &mut self,
        file_name: &str,
    ) -> impl core::future::Future<Output = Result<Option<Vec<u8>>, CacheError>>;

    /// Create or replace an entry.
    fn write(
        &mut self,
        file_name: &str,
        bytes: &[u8],
    ) -> impl core::future::Future<Output = Result<(), CacheError>>;
}

/// Cache failures. A miss is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CacheError {
    /// No card (or no cache directory) available
    Unavailable,
    /// Read or write failed part way
    Io,
    /// Entry name is not a plain file name
    InvalidName,
}

#[cfg(feature = "std")]
impl std::error::Error for CacheError {}

impl core::fmt::Display for CacheError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "image cache unavailable"),
            Self::Io => write!(f, "image cache I/O error"),
            Self::InvalidName => write!(f, "invalid image cache entry name"),
        }
    }
}

/// Cache that never holds anything. Used when no card is mounted.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCache;

impl ImageCache for NoCache {
    async fn read(&mut self, _file_name: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(None)
    }

    async fn write(&mut self, _file_name: &str, _bytes: &[u8]) -> Result<(), CacheError> {
        Err(CacheError::Unavailable)
    }
}

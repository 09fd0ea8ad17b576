//! Local filesystem image cache for the desktop emulator.
//!
//! `LocalImageCache` implements `platform::ImageCache` using `std::fs`.
//! Used when the `std` feature is enabled (emulator builds only).
//! All entries are resolved relative to the root provided at construction.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use alloc::vec::Vec;

use crate::image_cache::{CacheError, ImageCache};

/// An `ImageCache` backed by a directory on the host.
///
/// # Example
/// ```no_run
/// # async fn example() {
/// use platform::image_cache_local::LocalImageCache;
/// use platform::ImageCache;
/// let mut cache = LocalImageCache::new("/tmp/server-display/images");
/// let hit = cache.read("bell_64x64.bin").await.unwrap();
/// # }
/// ```
pub struct LocalImageCache {
    root: PathBuf,
}

impl LocalImageCache {
    /// Create a cache rooted at `root`. The directory is created on first write.
    #[must_use]
    pub fn new(root: &str) -> Self {
        Self { root: PathBuf::from(root) }
    }

    /// Create from the `IMAGE_CACHE` environment variable.
    ///
    /// Returns `None` if `IMAGE_CACHE` is not set or is not valid UTF-8.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        std::env::var("IMAGE_CACHE").ok().map(|p| Self::new(&p))
    }

    fn resolve(&self, file_name: &str) -> Result<PathBuf, CacheError> {
        let plain = !file_name.is_empty()
            && !file_name.contains(|c: char| c == '/' || c == '\\')
            && file_name != "."
            && file_name != "..";
        if plain {
            Ok(self.root.join(file_name))
        } else {
            Err(CacheError::InvalidName)
        }
    }
}

impl ImageCache for LocalImageCache {
    async fn read(&mut self, file_name: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let path = self.resolve(file_name)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(_) => Err(CacheError::Io),
        }
    }

    async fn write(&mut self, file_name: &str, bytes: &[u8]) -> Result<(), CacheError> {
        let path = self.resolve(file_name)?;
        fs::create_dir_all(&self.root).map_err(|_| CacheError::Unavailable)?;
        fs::write(path, bytes).map_err(|_| CacheError::Io)
    }
}

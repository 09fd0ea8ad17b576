//! Image loading: SD cache first, layout server second
//!
//! Every bitmap the server renders is stored in the cache under
//! `{name}_{width}x{height}.bin`. A cache entry that fails to decode is
//! treated as a miss and overwritten by the fresh download. Cache write
//! failures are logged and otherwise ignored.

use tracing::{debug, warn};

use platform::config::IMAGE_FETCH_TIMEOUT_MS;
use platform::{HttpClient, ImageCache};
use ui::{Bitmap, ImageError, ImageRequest, ImageSource};

/// [`ImageSource`] backed by an [`ImageCache`] and the layout server.
pub struct RemoteImageSource<H, C> {
    http: H,
    cache: C,
    base_url: &'static str,
}

impl<H: HttpClient, C: ImageCache> RemoteImageSource<H, C> {
    /// Source fetching from the server at `base_url`.
    pub fn new(http: H, cache: C, base_url: &'static str) -> Self {
        Self { http, cache, base_url }
    }

    /// HTTP client
    pub fn http(&self) -> &H {
        &self.http
    }

    /// Image cache
    pub fn cache(&self) -> &C {
        &self.cache
    }

    async fn from_cache(&mut self, file_name: &str, request: &ImageRequest<'_>) -> Option<Bitmap> {
        match self.cache.read(file_name).await {
            Ok(Some(bytes)) => match Bitmap::decode(&bytes, request.width, request.height) {
                Ok(bitmap) => {
                    debug!(file_name, "image cache hit");
                    Some(bitmap)
                }
                Err(e) => {
                    warn!(file_name, error = %e, "discarding bad cache entry");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(file_name, error = %e, "image cache unavailable");
                None
            }
        }
    }
}

impl<H: HttpClient, C: ImageCache> ImageSource for RemoteImageSource<H, C> {
    async fn load(&mut self, request: &ImageRequest<'_>) -> Result<Bitmap, ImageError> {
        let file_name = request.cache_file_name();
        if let Some(bitmap) = self.from_cache(&file_name, request).await {
            return Ok(bitmap);
        }

        let url = request.url(self.base_url);
        let response = self.http.get(&url, IMAGE_FETCH_TIMEOUT_MS).await.map_err(|e| {
            warn!(%url, error = %e, "image fetch failed");
            ImageError::Unavailable
        })?;
        if !response.is_ok() {
            warn!(%url, status = response.status, "image fetch rejected");
            return Err(ImageError::Status(response.status));
        }
        let bitmap = Bitmap::decode(&response.body, request.width, request.height).map_err(|e| {
            warn!(%url, error = %e, bytes = response.body.len(), "image body rejected");
            e
        })?;

        if let Err(e) = self.cache.write(&file_name, &response.body).await {
            warn!(file_name, error = %e, "image cache write failed");
        }
        debug!(%url, "image fetched");
        Ok(bitmap)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use platform::mocks::{MockCache, MockHttp};
    use platform::{HttpError, NoCache};
    use ui::ImageType;

    const BASE: &str = "http://srv";

    fn request() -> ImageRequest<'static> {
        ImageRequest { name: "bell", endpoint: "icon", width: 4, height: 2, filled: true, kind: ImageType::Icon }
    }

    fn body() -> Vec<u8> {
        Bitmap::new(4, 2, vec![0x0F, 0xF0, 0x55, 0xAA]).unwrap().encode()
    }

    const URL: &str = "http://srv/image/icon/bell?width=4&height=2&filled=1";

    #[tokio::test]
    async fn cache_hit_skips_network() {
        let mut cache = MockCache::new();
        cache.insert("bell_4x2.bin", &body());
        let mut source = RemoteImageSource::new(MockHttp::new(), cache, BASE);
        let bitmap = source.load(&request()).await.unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (4, 2));
        assert!(source.http().gets().is_empty());
    }

    #[tokio::test]
    async fn miss_fetches_and_writes_back() {
        let mut http = MockHttp::new();
        http.serve(URL, &body());
        let mut source = RemoteImageSource::new(http, MockCache::new(), BASE);
        source.load(&request()).await.unwrap();
        assert_eq!(source.http().gets(), [URL]);
        assert!(source.cache().contains("bell_4x2.bin"));
        assert_eq!(source.cache().writes(), 1);
    }

    #[tokio::test]
    async fn corrupt_cache_entry_is_refetched() {
        let mut cache = MockCache::new();
        cache.insert("bell_4x2.bin", &[1, 2, 3]);
        let mut http = MockHttp::new();
        http.serve(URL, &body());
        let mut source = RemoteImageSource::new(http, cache, BASE);
        source.load(&request()).await.unwrap();
        assert_eq!(source.cache().writes(), 1);
    }

    #[tokio::test]
    async fn short_body_is_rejected_and_not_cached() {
        let mut http = MockHttp::new();
        let mut short = body();
        short.pop();
        http.serve(URL, &short);
        let mut source = RemoteImageSource::new(http, MockCache::new(), BASE);
        assert_eq!(source.load(&request()).await.unwrap_err(), ImageError::SizeMismatch);
        assert_eq!(source.cache().writes(), 0);
    }

    #[tokio::test]
    async fn status_and_transport_errors_surface() {
        let mut source = RemoteImageSource::new(MockHttp::new(), NoCache, BASE);
        assert_eq!(source.load(&request()).await.unwrap_err(), ImageError::Status(404));

        let mut http = MockHttp::new();
        http.respond(URL, Err(HttpError::Timeout));
        let mut source = RemoteImageSource::new(http, NoCache, BASE);
        assert_eq!(source.load(&request()).await.unwrap_err(), ImageError::Unavailable);
    }

    #[tokio::test]
    async fn unwritable_cache_still_returns_bitmap() {
        let mut http = MockHttp::new();
        http.serve(URL, &body());
        let mut source = RemoteImageSource::new(http, NoCache, BASE);
        assert!(source.load(&request()).await.is_ok());
    }
}

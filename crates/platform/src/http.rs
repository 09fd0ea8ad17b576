//! HTTP client abstraction
//!
//! The device only ever talks to its own layout server: a GET for page
//! descriptions and image bitmaps, and an empty-body POST for element
//! callbacks. The transport (Wi-Fi stack, TLS, sockets) lives behind
//! [`HttpClient`].

use alloc::vec::Vec;

/// HTTP 200.
pub const STATUS_OK: u16 = 200;

/// Response to a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code returned by the server
    pub status: u16,
    /// Response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// `true` for HTTP 200.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// HTTP client used by the firmware.
pub trait HttpClient {
    /// Fetch `url`, waiting at most `timeout_ms` for the response.
    fn get(
        &mut self,
        url: &str,
        timeout_ms: u32,
    ) -> impl core::future::Future<Output = Result<HttpResponse, HttpError>>;

    /// POST `body` to `url` and return the status code.
    fn post(
        &mut self,
        url: &str,
        body: &[u8],
    ) -> impl core::future::Future<Output = Result<u16, HttpError>>;
}

impl<T: HttpClient + ?Sized> HttpClient for &mut T {
    async fn get(&mut self, url: &str, timeout_ms: u32) -> Result<HttpResponse, HttpError> {
        (**self).get(url, timeout_ms).await
    }

    async fn post(&mut self, url: &str, body: &[u8]) -> Result<u16, HttpError> {
        (**self).post(url, body).await
    }
}

/// Transport-level failures. Non-200 statuses are not errors here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HttpError {
    /// No network link
    NotConnected,
    /// The server refused the connection
    ConnectionRefused,
    /// The connection dropped mid-transfer
    ConnectionLost,
    /// No response within the timeout
    Timeout,
    /// Response larger than the client can buffer
    TooLarge,
}

#[cfg(feature = "std")]
impl std::error::Error for HttpError {}

impl core::fmt::Display for HttpError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotConnected => write!(f, "network not connected"),
            Self::ConnectionRefused => write!(f, "connection refused"),
            Self::ConnectionLost => write!(f, "connection lost"),
            Self::Timeout => write!(f, "read timeout"),
            Self::TooLarge => write!(f, "response too large"),
        }
    }
}

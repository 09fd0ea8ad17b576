//! Device configuration and constants
//!
//! Central compile-time values shared by every crate. Anything that may be
//! tuned per deployment at runtime lives in the firmware's `ControllerConfig`
//! instead.

/// Default layout server. Callback paths and page paths are appended as-is.
pub const BASE_URL: &str = "http://display-server.local:8000";

/// Panel width in pixels (ED047TC1, 4.7")
pub const DISPLAY_WIDTH: i32 = 960;

/// Panel height in pixels
pub const DISPLAY_HEIGHT: i32 = 540;

/// Bytes in a packed 4bpp full-screen framebuffer.
#[allow(clippy::cast_sign_loss)] // both extents are positive constants
pub const FRAMEBUFFER_LEN: usize = (DISPLAY_WIDTH as usize) * (DISPLAY_HEIGHT as usize) / 2;

/// Maximum number of live elements on screen.
pub const MAX_ELEMENTS: usize = 50;

/// Largest page description the device will accept, in bytes.
pub const MAX_JSON_SIZE: usize = 8192;

/// Timeout for page and callback requests.
pub const API_TIMEOUT_MS: u32 = 5_000;

/// Timeout for image fetches.
pub const IMAGE_FETCH_TIMEOUT_MS: u32 = 10_000;

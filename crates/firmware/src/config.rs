//! Controller configuration
//!
//! Compile-time device constants live in [`platform::config`]; this module
//! holds the values an application may tune when it builds the controller.

use platform::config::{API_TIMEOUT_MS, BASE_URL};
use ui::{AutoRefreshIntervals, Page};

/// Render-loop period in milliseconds.
pub const TICK_MS: u64 = 20;

/// Touch sensor poll period in milliseconds.
pub const TOUCH_POLL_MS: u64 = 30;

/// Minimum spacing between two accepted presses in milliseconds.
pub const TOUCH_DEBOUNCE_MS: u64 = 250;

/// Wait after a failed page pass before the request is re-armed.
pub const RETRY_BACKOFF_MS: u64 = 5_000;

/// Runtime settings for [`crate::ApplicationController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Layout server root, without a trailing slash
    pub base_url: &'static str,
    /// Page fetched on every pass
    pub page: Page,
    /// Render-loop period
    pub tick_ms: u64,
    /// Touch poll period
    pub touch_poll_ms: u64,
    /// Touch debounce window
    pub touch_debounce_ms: u64,
    /// Page request timeout
    pub api_timeout_ms: u32,
    /// Delay before a failed page pass is retried
    pub retry_backoff_ms: u64,
    /// Periodic whole-screen refresh thresholds
    pub intervals: AutoRefreshIntervals,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL,
            page: Page::Home,
            tick_ms: TICK_MS,
            touch_poll_ms: TOUCH_POLL_MS,
            touch_debounce_ms: TOUCH_DEBOUNCE_MS,
            api_timeout_ms: API_TIMEOUT_MS,
            retry_backoff_ms: RETRY_BACKOFF_MS,
            intervals: AutoRefreshIntervals::default(),
        }
    }
}

impl ControllerConfig {
    /// Same settings, different page.
    #[must_use]
    pub const fn with_page(mut self, page: Page) -> Self {
        self.page = page;
        self
    }

    /// Same settings, different server.
    #[must_use]
    pub const fn with_base_url(mut self, base_url: &'static str) -> Self {
        self.base_url = base_url;
        self
    }
}

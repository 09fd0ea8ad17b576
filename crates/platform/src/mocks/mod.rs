//! Mock implementations for testing
//!
//! This module provides mock implementations of all platform traits
//! for use in unit and integration tests.

#![cfg(any(test, feature = "std"))]

use std::collections::{HashMap, VecDeque};
use std::string::{String, ToString};
use std::vec::Vec;

use embedded_graphics::primitives::Rectangle;

use crate::*;

/// One operation recorded by [`MockPanel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelOp {
    /// Rails powered on
    PowerOn,
    /// Rails powered off
    PowerOff,
    /// A single push
    Push {
        /// Pushed area
        area: Rectangle,
        /// Pushed polarity
        color: PanelColor,
    },
    /// A framebuffer blit
    Draw {
        /// Updated area
        area: Rectangle,
    },
}

/// Mock panel that records every operation.
#[derive(Default)]
pub struct MockPanel {
    ops: Vec<PanelOp>,
    last_frame: Option<Vec<u8>>,
    fail_draws: bool,
}

impl MockPanel {
    /// Create new mock panel
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent blit fail with `DisplayError::Communication`.
    pub fn fail_draws(&mut self) {
        self.fail_draws = true;
    }

    /// All recorded operations, oldest first
    pub fn ops(&self) -> &[PanelOp] {
        &self.ops
    }

    /// Number of framebuffer blits
    pub fn draw_count(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, PanelOp::Draw { .. })).count()
    }

    /// Number of individual pushes
    pub fn push_count(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, PanelOp::Push { .. })).count()
    }

    /// Framebuffer passed to the most recent blit
    pub fn last_frame(&self) -> Option<&[u8]> {
        self.last_frame.as_deref()
    }

    /// Forget recorded operations
    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl EpdPanel for MockPanel {
    type Error = DisplayError;

    async fn power_on(&mut self) -> Result<(), Self::Error> {
        self.ops.push(PanelOp::PowerOn);
        Ok(())
    }

    async fn power_off(&mut self) -> Result<(), Self::Error> {
        self.ops.push(PanelOp::PowerOff);
        Ok(())
    }

    async fn push_pixels(
        &mut self,
        area: Rectangle,
        _duration_ms: u16,
        color: PanelColor,
    ) -> Result<(), Self::Error> {
        self.ops.push(PanelOp::Push { area, color });
        Ok(())
    }

    async fn draw_grayscale(&mut self, area: Rectangle, framebuffer: &[u8]) -> Result<(), Self::Error> {
        if self.fail_draws {
            return Err(DisplayError::Communication);
        }
        self.ops.push(PanelOp::Draw { area });
        self.last_frame = Some(framebuffer.to_vec());
        Ok(())
    }
}

/// Mock touch sensor replaying a scripted sample sequence.
///
/// Each call to `sample` consumes one entry; an exhausted script reads as
/// "not touched".
#[derive(Default)]
pub struct MockTouch {
    samples: VecDeque<Option<TouchPoint>>,
}

impl MockTouch {
    /// Create new mock touch sensor
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next sample
    pub fn push_sample(&mut self, sample: Option<TouchPoint>) {
        self.samples.push_back(sample);
    }
}

impl TouchSensor for MockTouch {
    async fn sample(&mut self) -> Option<TouchPoint> {
        self.samples.pop_front().flatten()
    }
}

/// Mock HTTP client with canned responses keyed by URL.
#[derive(Default)]
pub struct MockHttp {
    responses: HashMap<String, Result<HttpResponse, HttpError>>,
    post_status: HashMap<String, u16>,
    gets: Vec<String>,
    posts: Vec<String>,
}

impl MockHttp {
    /// Create new mock client with no routes
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` with status 200 for GETs of `url`.
    pub fn serve(&mut self, url: &str, body: &[u8]) {
        self.respond(url, Ok(HttpResponse { status: STATUS_OK, body: body.to_vec() }));
    }

    /// Serve an arbitrary result for GETs of `url`.
    pub fn respond(&mut self, url: &str, response: Result<HttpResponse, HttpError>) {
        self.responses.insert(url.to_string(), response);
    }

    /// Status returned for POSTs to `url` (default 200).
    pub fn post_status(&mut self, url: &str, status: u16) {
        self.post_status.insert(url.to_string(), status);
    }

    /// URLs fetched so far, oldest first
    pub fn gets(&self) -> &[String] {
        &self.gets
    }

    /// URLs posted to so far, oldest first
    pub fn posts(&self) -> &[String] {
        &self.posts
    }
}

impl HttpClient for MockHttp {
    async fn get(&mut self, url: &str, _timeout_ms: u32) -> Result<HttpResponse, HttpError> {
        self.gets.push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .unwrap_or(Ok(HttpResponse { status: 404, body: Vec::new() }))
    }

    async fn post(&mut self, url: &str, _body: &[u8]) -> Result<u16, HttpError> {
        self.posts.push(url.to_string());
        Ok(self.post_status.get(url).copied().unwrap_or(STATUS_OK))
    }
}

/// In-memory image cache.
#[derive(Default)]
pub struct MockCache {
    entries: HashMap<String, Vec<u8>>,
    writes: usize,
}

impl MockCache {
    /// Create new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-load an entry
    pub fn insert(&mut self, file_name: &str, bytes: &[u8]) {
        self.entries.insert(file_name.to_string(), bytes.to_vec());
    }

    /// `true` if an entry exists
    pub fn contains(&self, file_name: &str) -> bool {
        self.entries.contains_key(file_name)
    }

    /// Number of writes performed through the trait
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ImageCache for MockCache {
    async fn read(&mut self, file_name: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.entries.get(file_name).cloned())
    }

    async fn write(&mut self, file_name: &str, bytes: &[u8]) -> Result<(), CacheError> {
        self.writes = self.writes.saturating_add(1);
        self.entries.insert(file_name.to_string(), bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use embedded_graphics::prelude::*;

    #[tokio::test]
    async fn flash_pushes_foreground_then_background_per_cycle() {
        let mut panel = MockPanel::new();
        let area = Rectangle::new(Point::new(0, 0), Size::new(10, 10));
        panel.flash(area, 2, PanelColor::White).await.unwrap();

        assert_eq!(panel.push_count(), 16);
        let colors: Vec<PanelColor> = panel
            .ops()
            .iter()
            .filter_map(|op| match op {
                PanelOp::Push { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(colors.first(), Some(&PanelColor::Black));
        assert_eq!(colors.get(4), Some(&PanelColor::White));
        assert_eq!(colors.last(), Some(&PanelColor::White));
    }

    #[tokio::test]
    async fn zero_cycles_pushes_nothing() {
        let mut panel = MockPanel::new();
        let area = Rectangle::new(Point::new(0, 0), Size::new(1, 1));
        panel.flash(area, 0, PanelColor::Black).await.unwrap();
        assert!(panel.ops().is_empty());
    }

    #[tokio::test]
    async fn mock_panel_keeps_last_frame() {
        let mut panel = MockPanel::new();
        let area = Rectangle::new(Point::zero(), Size::new(2, 1));
        panel.draw_grayscale(area, &[0xAB]).await.unwrap();
        assert_eq!(panel.draw_count(), 1);
        assert_eq!(panel.last_frame(), Some(&[0xAB][..]));
    }

    #[tokio::test]
    async fn mock_touch_replays_script() {
        let mut touch = MockTouch::new();
        touch.push_sample(Some(TouchPoint::new(5, 6)));
        touch.push_sample(None);
        assert_eq!(touch.sample().await, Some(TouchPoint::new(5, 6)));
        assert_eq!(touch.sample().await, None);
        assert_eq!(touch.sample().await, None);
    }

    #[tokio::test]
    async fn mock_http_unknown_url_is_404() {
        let mut http = MockHttp::new();
        let response = http.get("http://x/none", 1000).await.unwrap();
        assert_eq!(response.status, 404);
        assert_eq!(http.gets().len(), 1);
    }

    #[tokio::test]
    async fn mock_http_records_posts() {
        let mut http = MockHttp::new();
        http.post_status("http://x/fail", 500);
        assert_eq!(http.post("http://x/ok", &[]).await.unwrap(), 200);
        assert_eq!(http.post("http://x/fail", &[]).await.unwrap(), 500);
        assert_eq!(http.posts().len(), 2);
    }

    #[tokio::test]
    async fn mock_cache_round_trips_entries() {
        let mut cache = MockCache::new();
        assert_eq!(cache.read("a.bin").await.unwrap(), None);
        cache.write("a.bin", &[1, 2, 3]).await.unwrap();
        assert_eq!(cache.read("a.bin").await.unwrap(), Some(vec![1, 2, 3]));
        assert_eq!(cache.writes(), 1);
    }
}

//! Application controller: the render loop
//!
//! One [`tick`](ApplicationController::tick) does, in order:
//!
//! 1. drain debounced presses from the touch task, run their callbacks and
//!    blit the pressed state, then queue the restore draws;
//! 2. let the [`AutoRefreshPolicy`] escalate idle time into a whole-screen
//!    refresh request;
//! 3. take the pending [`RefreshType`]; if anything is pending, fetch the
//!    page and reconcile it into the [`ElementStore`];
//! 4. repaint the whole screen when the request, the page's `clear` flag or
//!    a display-mode change asks for it;
//! 5. flush the action queue (one blit).
//!
//! The store, framebuffer and display mode are owned here and never leave
//! the render context.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Receiver;
use embassy_time::{Instant, Timer};
use tracing::{debug, error, info, warn};

use platform::{EpdPanel, HttpClient, HttpError, TouchPoint};
use ui::{
    parse_page, AutoRefreshPolicy, CallbackDispatcher, DisplayMode, DrainReport, ElementStore, Framebuffer,
    ImageSource, PageDocument, PageError, ReconcileReport, Rect, RefreshRequest, RefreshTier, RefreshType,
};

use crate::config::ControllerConfig;

/// Refresh slot shared by the touch task, the control endpoints and the
/// render loop. Starts with a complete refresh pending so the first tick
/// paints the screen.
pub static REFRESH: RefreshRequest = RefreshRequest::new(RefreshType::DisplayComplete);

/// Why a tick could not complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerError<E> {
    /// Page request failed in transport
    Http(HttpError),
    /// Page request answered with a non-200 status
    Status(u16),
    /// Page body rejected
    Page(PageError),
    /// Panel operation failed
    Panel(E),
}

impl<E> From<PageError> for ControllerError<E> {
    fn from(e: PageError) -> Self {
        Self::Page(e)
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for ControllerError<E> {}

impl<E: core::fmt::Debug> core::fmt::Display for ControllerError<E> {
    #[allow(clippy::use_debug)] // panel errors only promise Debug
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Http(e) => write!(f, "page request failed: {e}"),
            Self::Status(status) => write!(f, "page request returned HTTP {status}"),
            Self::Page(e) => write!(f, "page rejected: {e}"),
            Self::Panel(e) => write!(f, "panel error: {e:?}"),
        }
    }
}

/// What one tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Presses that hit an element
    pub touches: usize,
    /// Request taken for this tick
    pub kind: Option<RefreshType>,
    /// Reconciliation outcome, if a page was fetched
    pub reconcile: Option<ReconcileReport>,
    /// Whole-screen repaint tier, if one ran
    pub repaint: Option<RefreshTier>,
    /// Final queue drain
    pub drain: DrainReport,
}

/// Owns the screen state and drives it from the layout server.
pub struct ApplicationController<'a, P, H, I, D, M: RawMutex, const N: usize> {
    config: ControllerConfig,
    panel: P,
    http: H,
    images: I,
    dispatcher: D,
    store: ElementStore,
    fb: Framebuffer,
    mode: DisplayMode,
    refresh: &'a RefreshRequest,
    touches: Receiver<'a, M, TouchPoint, N>,
    policy: AutoRefreshPolicy,
    mode_dirty: bool,
    /// Request held back after a failed pass, and when it may re-arm
    retry: Option<(RefreshType, u64)>,
}

impl<'a, P, H, I, D, M, const N: usize> ApplicationController<'a, P, H, I, D, M, N>
where
    P: EpdPanel,
    H: HttpClient,
    I: ImageSource,
    D: CallbackDispatcher,
    M: RawMutex,
{
    /// Build a controller with an empty screen in the light palette.
    ///
    /// Auto-refresh clocks start at time zero.
    pub fn new(
        config: ControllerConfig,
        panel: P,
        http: H,
        images: I,
        dispatcher: D,
        refresh: &'a RefreshRequest,
        touches: Receiver<'a, M, TouchPoint, N>,
    ) -> Self {
        let mode = DisplayMode::default();
        Self {
            policy: AutoRefreshPolicy::new(config.intervals, 0),
            config,
            panel,
            http,
            images,
            dispatcher,
            store: ElementStore::new(),
            fb: Framebuffer::new(mode.background()),
            mode,
            refresh,
            touches,
            mode_dirty: false,
            retry: None,
        }
    }

    /// Live elements
    pub fn store(&self) -> &ElementStore {
        &self.store
    }

    /// Framebuffer as last rendered
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.fb
    }

    /// Current palette
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Panel driver
    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// Panel driver, mutable (test hooks)
    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    /// Page HTTP client
    pub fn http(&self) -> &H {
        &self.http
    }

    /// Page HTTP client, mutable
    pub fn http_mut(&mut self) -> &mut H {
        &mut self.http
    }

    /// Image source
    pub fn images(&self) -> &I {
        &self.images
    }

    /// Callback dispatcher
    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Request waiting out the retry backoff, if a pass failed
    pub fn pending_retry(&self) -> Option<RefreshType> {
        self.retry.map(|(kind, _)| kind)
    }

    /// Run one render pass at `now_ms`.
    ///
    /// A failed page fetch still lets the pass repaint and flush whatever
    /// is queued and returns the error. The request is held back for
    /// `config.retry_backoff_ms` and then re-armed, minus its whole-screen
    /// flash, which already ran.
    pub async fn tick(&mut self, now_ms: u64) -> Result<TickReport, ControllerError<P::Error>> {
        let touches = self.handle_touches().await.map_err(ControllerError::Panel)?;
        let mut report = TickReport { touches, ..TickReport::default() };

        let auto = self.policy.check(now_ms);
        if auto.is_pending() {
            info!(kind = auto.as_str(), now_ms, "auto refresh due");
            self.refresh.request(auto);
        }
        if let Some((held, due_ms)) = self.retry {
            if now_ms >= due_ms {
                debug!(kind = held.as_str(), now_ms, "retrying failed pass");
                self.refresh.request(held);
                self.retry = None;
            }
        }

        let kind = self.refresh.take();
        let mut failure = None;
        let mut clear_requested = false;
        if kind.is_pending() {
            report.kind = Some(kind);
            match self.fetch_page().await {
                Ok(page) => {
                    let reconcile = self.store.process_elements(&page.elements, kind.element_tier());
                    info!(
                        kind = kind.as_str(),
                        added = reconcile.added,
                        replaced = reconcile.replaced,
                        removed = reconcile.removed,
                        unchanged = reconcile.unchanged,
                        "page reconciled"
                    );
                    clear_requested = page.clear;
                    report.reconcile = Some(reconcile);
                    self.retry = None;
                }
                Err(e) => {
                    let held = self.retry.map_or(retry_kind(kind), |(prev, _)| prev.max(retry_kind(kind)));
                    let due_ms = now_ms.saturating_add(self.config.retry_backoff_ms);
                    error!(kind = kind.as_str(), error = %e, retry_at_ms = due_ms, "page pass failed");
                    self.retry = Some((held, due_ms));
                    failure = Some(e);
                }
            }
        }

        let mut tier = kind.display_tier();
        if clear_requested || self.mode_dirty {
            tier = tier.max(RefreshTier::Partial);
        }
        if tier > RefreshTier::NoRefresh {
            self.repaint(tier).await.map_err(ControllerError::Panel)?;
            report.repaint = Some(tier);
        }

        report.drain = self.flush().await?;
        match failure {
            Some(e) => Err(e),
            None => Ok(report),
        }
    }

    /// Tick every `config.tick_ms` forever.
    pub async fn run(&mut self) -> ! {
        info!(page = self.config.page.path(), base_url = self.config.base_url, "render loop started");
        loop {
            if let Err(e) = self.tick(Instant::now().as_millis()).await {
                warn!(error = %e, "tick failed");
            }
            Timer::after_millis(self.config.tick_ms).await;
        }
    }

    /// Route queued presses, show the pressed state, then queue the restore.
    async fn handle_touches(&mut self) -> Result<usize, P::Error> {
        let mut hits = 0_usize;
        while let Ok(point) = self.touches.try_receive() {
            let was_dark = self.mode.is_dark();
            let Some(hit) = self.store.handle_touch(point, &mut self.mode, &mut self.dispatcher) else {
                debug!(x = point.x, y = point.y, "press hit nothing");
                continue;
            };
            hits = hits.saturating_add(1);
            self.refresh.request(RefreshType::RefetchElements);
            if self.mode.is_dark() != was_dark {
                info!(id = hit.id, dark = self.mode.is_dark(), "display mode changed");
                self.mode_dirty = true;
            }
        }
        if hits == 0 {
            return Ok(0);
        }

        // A mode change repaints everything later in the tick anyway.
        let feedback = if self.mode_dirty {
            Ok(DrainReport::default())
        } else {
            self.store.flush(&mut self.fb, &self.mode, &mut self.panel, &mut self.images).await
        };
        self.store.release_touched();
        feedback.map(|_| hits)
    }

    async fn fetch_page(&mut self) -> Result<PageDocument, ControllerError<P::Error>> {
        let url = self.config.page.url(self.config.base_url);
        let response = self.http.get(&url, self.config.api_timeout_ms).await.map_err(ControllerError::Http)?;
        if !response.is_ok() {
            return Err(ControllerError::Status(response.status));
        }
        debug!(%url, bytes = response.body.len(), "page fetched");
        Ok(parse_page(&response.body)?)
    }

    /// Flash the whole panel with `tier` cycles and queue a full redraw.
    async fn repaint(&mut self, tier: RefreshTier) -> Result<(), P::Error> {
        info!(tier = tier.as_str(), dark = self.mode.is_dark(), "repainting screen");
        self.fb.fill(self.mode.background());
        self.panel.power_on().await?;
        let flashed = self
            .panel
            .flash(Rect::full_screen().into(), tier.cycles(), self.mode.background_polarity())
            .await;
        let powered_off = self.panel.power_off().await;
        flashed?;
        powered_off?;
        self.store.redraw_all();
        self.mode_dirty = false;
        Ok(())
    }

    async fn flush(&mut self) -> Result<DrainReport, ControllerError<P::Error>> {
        self.store
            .flush(&mut self.fb, &self.mode, &mut self.panel, &mut self.images)
            .await
            .map_err(|e| {
                error!(error = ?e, "panel error, screen will be rebuilt");
                ControllerError::Panel(e)
            })
    }
}

/// Request to re-arm after a failed fetch. The whole-screen flash has run.
const fn retry_kind(kind: RefreshType) -> RefreshType {
    match kind {
        RefreshType::DisplayFast | RefreshType::DisplayPartial | RefreshType::DisplayComplete => {
            RefreshType::RefetchElements
        }
        other => other,
    }
}

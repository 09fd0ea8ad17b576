//! Refresh cost model
//!
//! E-paper pixels are bistable: every update leaves a faint trace of the
//! previous content ("ghosting"). Driving an area through flash cycles
//! (push the foreground polarity, then the background polarity) erases the
//! trace at the cost of time and power. [`RefreshTier`] is the number of
//! cycles spent on one area; [`RefreshType`] is a request for the next
//! render tick, shared between the touch, control and render contexts
//! through [`RefreshRequest`].

use core::sync::atomic::{AtomicU8, Ordering};

/// How aggressively one area is flashed before it is redrawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RefreshTier {
    /// Framebuffer-only; nothing is pushed to the glass.
    #[default]
    NoRefresh,
    /// One cycle. Cheap, may leave faint ghosting.
    Fast,
    /// Two cycles. Default for replaced and removed elements.
    Partial,
    /// Four cycles. Periodic whole-screen degrade prevention.
    Complete,
}

impl RefreshTier {
    /// Flash cycles spent at this tier.
    #[must_use]
    pub const fn cycles(self) -> u8 {
        match self {
            Self::NoRefresh => 0,
            Self::Fast => 1,
            Self::Partial => 2,
            Self::Complete => 4,
        }
    }

    /// Short name for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoRefresh => "none",
            Self::Fast => "fast",
            Self::Partial => "partial",
            Self::Complete => "complete",
        }
    }
}

/// Pending work for the next render tick, ordered by priority.
///
/// When several contexts request a refresh before the tick observes it,
/// the highest variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum RefreshType {
    /// Nothing pending
    NoRefresh = 0,
    /// Refetch and reconcile; no extra flashing
    RefetchElements = 1,
    /// Refetch; element clears use at least the fast tier
    ElementFast = 2,
    /// Refetch; element clears use at least the partial tier
    ElementPartial = 3,
    /// Refetch; element clears use the complete tier
    ElementComplete = 4,
    /// Flash the whole screen once (fast) then refetch
    DisplayFast = 5,
    /// Flash the whole screen twice then refetch
    DisplayPartial = 6,
    /// Flash the whole screen four times then refetch
    DisplayComplete = 7,
}

impl RefreshType {
    /// Decode a stored discriminant. Unknown values read as `NoRefresh`.
    #[must_use]
    pub const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::RefetchElements,
            2 => Self::ElementFast,
            3 => Self::ElementPartial,
            4 => Self::ElementComplete,
            5 => Self::DisplayFast,
            6 => Self::DisplayPartial,
            7 => Self::DisplayComplete,
            _ => Self::NoRefresh,
        }
    }

    /// `true` if anything is pending.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        !matches!(self, Self::NoRefresh)
    }

    /// Minimum tier for element clears in the coming pass.
    #[must_use]
    pub const fn element_tier(self) -> RefreshTier {
        match self {
            Self::ElementFast => RefreshTier::Fast,
            Self::ElementPartial => RefreshTier::Partial,
            Self::ElementComplete => RefreshTier::Complete,
            _ => RefreshTier::NoRefresh,
        }
    }

    /// Tier for the whole-screen flash before the coming pass.
    #[must_use]
    pub const fn display_tier(self) -> RefreshTier {
        match self {
            Self::DisplayFast => RefreshTier::Fast,
            Self::DisplayPartial => RefreshTier::Partial,
            Self::DisplayComplete => RefreshTier::Complete,
            _ => RefreshTier::NoRefresh,
        }
    }

    /// Short name for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoRefresh => "no-refresh",
            Self::RefetchElements => "refetch",
            Self::ElementFast => "element-fast",
            Self::ElementPartial => "element-partial",
            Self::ElementComplete => "element-complete",
            Self::DisplayFast => "display-fast",
            Self::DisplayPartial => "display-partial",
            Self::DisplayComplete => "display-complete",
        }
    }
}

/// Lock-free slot holding the highest pending [`RefreshType`].
///
/// Safe to share between the touch poller, the control endpoint handler
/// and the render loop (e.g. as a `static`).
pub struct RefreshRequest {
    pending: AtomicU8,
}

impl RefreshRequest {
    /// Create a slot with `initial` already pending.
    #[must_use]
    pub const fn new(initial: RefreshType) -> Self {
        Self { pending: AtomicU8::new(initial as u8) }
    }

    /// Request `kind`; a higher pending request is kept.
    pub fn request(&self, kind: RefreshType) {
        self.pending.fetch_max(kind as u8, Ordering::AcqRel);
    }

    /// Take the pending request, leaving `NoRefresh`.
    pub fn take(&self) -> RefreshType {
        RefreshType::from_u8(self.pending.swap(RefreshType::NoRefresh as u8, Ordering::AcqRel))
    }

    /// Read the pending request without consuming it.
    pub fn peek(&self) -> RefreshType {
        RefreshType::from_u8(self.pending.load(Ordering::Acquire))
    }
}

impl Default for RefreshRequest {
    fn default() -> Self {
        Self::new(RefreshType::NoRefresh)
    }
}

/// Idle thresholds for the periodic refresh, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoRefreshIntervals {
    /// Idle time before a fast whole-screen refresh
    pub fast_ms: u64,
    /// Idle time before a partial whole-screen refresh
    pub partial_ms: u64,
    /// Idle time before a complete whole-screen refresh
    pub complete_ms: u64,
}

impl Default for AutoRefreshIntervals {
    fn default() -> Self {
        Self {
            fast_ms: 60_000,
            partial_ms: 300_000,
            complete_ms: 1_800_000,
        }
    }
}

/// Escalates elapsed time into periodic whole-screen refresh requests.
///
/// Each tier keeps its own clock so that frequent fast refreshes never
/// starve the partial and complete ones. Firing a tier restarts its clock
/// and the clocks of every cheaper tier.
pub struct AutoRefreshPolicy {
    intervals: AutoRefreshIntervals,
    last_fast_ms: u64,
    last_partial_ms: u64,
    last_complete_ms: u64,
}

impl AutoRefreshPolicy {
    /// Start all clocks at `now_ms`.
    #[must_use]
    pub const fn new(intervals: AutoRefreshIntervals, now_ms: u64) -> Self {
        Self {
            intervals,
            last_fast_ms: now_ms,
            last_partial_ms: now_ms,
            last_complete_ms: now_ms,
        }
    }

    /// Configured thresholds
    #[must_use]
    pub const fn intervals(&self) -> AutoRefreshIntervals {
        self.intervals
    }

    /// Check the clocks at `now_ms`, longest interval first.
    pub fn check(&mut self, now_ms: u64) -> RefreshType {
        let due = |last: u64, interval: u64| now_ms.saturating_sub(last) >= interval;
        if due(self.last_complete_ms, self.intervals.complete_ms) {
            self.last_complete_ms = now_ms;
            self.last_partial_ms = now_ms;
            self.last_fast_ms = now_ms;
            RefreshType::DisplayComplete
        } else if due(self.last_partial_ms, self.intervals.partial_ms) {
            self.last_partial_ms = now_ms;
            self.last_fast_ms = now_ms;
            RefreshType::DisplayPartial
        } else if due(self.last_fast_ms, self.intervals.fast_ms) {
            self.last_fast_ms = now_ms;
            RefreshType::DisplayFast
        } else {
            RefreshType::NoRefresh
        }
    }
}

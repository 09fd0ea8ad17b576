//! Touch input edge detection and callback dispatch

use platform::TouchPoint;

/// Sink for element callbacks that are not handled on the device itself.
///
/// Implementations usually queue the path for a worker that POSTs it to the
/// layout server, so the touch path never waits on the network.
pub trait CallbackDispatcher {
    /// Hand `callback` off. Returns `false` if it was dropped.
    fn dispatch(&mut self, callback: &str) -> bool;
}

/// Dispatcher that drops every callback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCallbacks;

impl CallbackDispatcher for NoCallbacks {
    fn dispatch(&mut self, _callback: &str) -> bool {
        false
    }
}

/// Outcome of a touch that landed on an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchHit {
    /// Element that was hit
    pub id: u16,
    /// Callback reported success (or asked for a refresh)
    pub callback_ok: bool,
}

/// Turns raw sensor samples into debounced press events.
///
/// A press is reported on the rising edge only (no touch, then touch) and
/// only if at least `debounce_ms` passed since the last reported press.
/// The very first press is always reported.
#[derive(Debug, Clone)]
pub struct TouchDebouncer {
    debounce_ms: u64,
    pressed: bool,
    last_accepted_ms: Option<u64>,
}

impl TouchDebouncer {
    /// Create a debouncer with the given minimum spacing between presses.
    #[must_use]
    pub const fn new(debounce_ms: u64) -> Self {
        Self { debounce_ms, pressed: false, last_accepted_ms: None }
    }

    /// Feed one sample taken at `now_ms`.
    pub fn update(&mut self, sample: Option<TouchPoint>, now_ms: u64) -> Option<TouchPoint> {
        let was_pressed = core::mem::replace(&mut self.pressed, sample.is_some());
        let point = sample?;
        if was_pressed {
            return None;
        }
        if let Some(last) = self.last_accepted_ms {
            if now_ms.saturating_sub(last) < self.debounce_ms {
                return None;
            }
        }
        self.last_accepted_ms = Some(now_ms);
        Some(point)
    }
}

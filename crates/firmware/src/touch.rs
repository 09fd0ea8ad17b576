//! Touch polling task
//!
//! Samples the touch controller at a fixed cadence, independent of the
//! render loop, and forwards debounced presses through a channel. The render
//! loop drains the channel on its next tick; hit-testing and callbacks happen
//! there so the element store is only ever touched from one context.

use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use embassy_sync::channel::{Channel, Sender};
use embassy_time::{Instant, Timer};
use tracing::{debug, warn};

use platform::{TouchPoint, TouchSensor};
use ui::TouchDebouncer;

use crate::config::ControllerConfig;

/// Depth of the press channel.
pub const TOUCH_DEPTH: usize = 4;

/// Global press channel shared between the touch task and the render loop.
pub static TOUCH_CHANNEL: Channel<CriticalSectionRawMutex, TouchPoint, TOUCH_DEPTH> = Channel::new();

/// Take one sample at `now_ms` and forward it if it is a new press.
///
/// Returns the forwarded press. A full channel drops the press.
pub async fn poll_once<T: TouchSensor, M: RawMutex, const N: usize>(
    sensor: &mut T,
    debouncer: &mut TouchDebouncer,
    now_ms: u64,
    tx: &Sender<'_, M, TouchPoint, N>,
) -> Option<TouchPoint> {
    let point = debouncer.update(sensor.sample().await, now_ms)?;
    if tx.try_send(point).is_err() {
        warn!(x = point.x, y = point.y, "touch channel full, press dropped");
        return None;
    }
    debug!(x = point.x, y = point.y, "press");
    Some(point)
}

/// Poll `sensor` every `config.touch_poll_ms` forever, debouncing with
/// `config.touch_debounce_ms`.
pub async fn touch_task<T: TouchSensor, M: RawMutex, const N: usize>(
    mut sensor: T,
    config: ControllerConfig,
    tx: Sender<'_, M, TouchPoint, N>,
) -> ! {
    let mut debouncer = TouchDebouncer::new(config.touch_debounce_ms);
    loop {
        poll_once(&mut sensor, &mut debouncer, Instant::now().as_millis(), &tx).await;
        Timer::after_millis(config.touch_poll_ms).await;
    }
}

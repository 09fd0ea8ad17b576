//! Element callback worker
//!
//! Touch handling runs on the render loop and must never wait on the
//! network. Callbacks that the device does not handle itself are pushed
//! into a small channel with [`try_send`](Sender::try_send); a separate
//! [`callback_worker`] task drains the channel and POSTs each path to the
//! layout server.
//!
//! # Overflow handling
//!
//! If the worker is stuck on a slow request and the channel fills up, new
//! callbacks are dropped with a warning rather than blocking the render
//! loop. [`CALLBACK_DEPTH`] controls how many may queue.

use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use embassy_sync::channel::{Channel, Receiver, Sender};
use tracing::{debug, warn};

use platform::{HttpClient, STATUS_OK};
use ui::element::Callback;
use ui::CallbackDispatcher;

/// Depth of the callback channel.
pub const CALLBACK_DEPTH: usize = 4;

/// Global callback channel shared between the render loop and the worker.
pub static CALLBACK_CHANNEL: Channel<CriticalSectionRawMutex, Callback, CALLBACK_DEPTH> = Channel::new();

/// [`CallbackDispatcher`] that queues paths for [`callback_worker`].
pub struct ChannelDispatcher<'a, M: RawMutex, const N: usize> {
    tx: Sender<'a, M, Callback, N>,
}

impl ChannelDispatcher<'static, CriticalSectionRawMutex, CALLBACK_DEPTH> {
    /// Dispatcher feeding [`CALLBACK_CHANNEL`].
    pub fn global() -> Self {
        Self::new(CALLBACK_CHANNEL.sender())
    }
}

impl<'a, M: RawMutex, const N: usize> ChannelDispatcher<'a, M, N> {
    /// Dispatcher feeding an arbitrary channel.
    pub fn new(tx: Sender<'a, M, Callback, N>) -> Self {
        Self { tx }
    }
}

impl<M: RawMutex, const N: usize> CallbackDispatcher for ChannelDispatcher<'_, M, N> {
    fn dispatch(&mut self, callback: &str) -> bool {
        let Ok(path) = Callback::try_from(callback) else {
            warn!(callback, "callback path too long, dropped");
            return false;
        };
        match self.tx.try_send(path) {
            Ok(()) => true,
            Err(_) => {
                warn!(callback, depth = N, "callback channel full, dropped");
                false
            }
        }
    }
}

/// POST `{base_url}{path}` with an empty body. `true` on HTTP 200.
pub async fn post_callback<H: HttpClient>(http: &mut H, base_url: &str, path: &str) -> bool {
    let url = alloc::format!("{base_url}{path}");
    match http.post(&url, &[]).await {
        Ok(STATUS_OK) => {
            debug!(%url, "callback delivered");
            true
        }
        Ok(status) => {
            warn!(%url, status, "callback rejected");
            false
        }
        Err(e) => {
            warn!(%url, error = %e, "callback failed");
            false
        }
    }
}

/// Deliver callbacks from `rx` forever.
///
/// Pass `&mut client` to keep ownership of the client outside the task.
pub async fn callback_worker<H: HttpClient, M: RawMutex, const N: usize>(
    mut http: H,
    base_url: &str,
    rx: Receiver<'_, M, Callback, N>,
) -> ! {
    loop {
        let path = rx.receive().await;
        post_callback(&mut http, base_url, &path).await;
    }
}

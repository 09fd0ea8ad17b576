//! Server-driven e-paper display firmware
//!
//! Glue between the rendering engine in `ui` and the capability traits in
//! `platform`: the render loop, the touch poller, the callback worker,
//! remote image loading and the refresh control endpoints.
//!
//! # Architecture
//!
//! ```text
//! touch_task ──TOUCH_CHANNEL──▶ ApplicationController::tick ──▶ EpdPanel
//!                                   │        ▲
//!                      CALLBACK_CHANNEL      │ REFRESH (atomic)
//!                                   ▼        │
//!                           callback_worker  control::handle
//! ```
//!
//! Three execution contexts share two bounded channels and one atomic
//! refresh slot. The element store is only ever touched by the render loop.
//!
//! # Features
//!
//! - `std` - host builds and tests (embassy-time std driver)
//! - `emulator` - headless panel PNG snapshots and the `replay` binary
//! - `defmt` - defmt formatting on plain-data types
//!
//! # Emulator
//!
//! ```bash
//! cargo run -p firmware --bin replay --features emulator -- out/ page1.json page2.json
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Critical correctness: deny these
#![deny(clippy::await_holding_lock)] // holding a blocking Mutex across .await is a bug
#![deny(unsafe_op_in_unsafe_fn)]
// Logging discipline
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![warn(clippy::dbg_macro)]
// Intentional allows for this codebase:
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::too_many_arguments)] // controller wiring takes every collaborator
#![allow(async_fn_in_trait)]

extern crate alloc;

pub mod callbacks;
pub mod config;
pub mod control;
pub mod controller;
pub mod display;
pub mod images;
pub mod touch;

pub use callbacks::{callback_worker, post_callback, ChannelDispatcher, CALLBACK_CHANNEL, CALLBACK_DEPTH};
pub use config::ControllerConfig;
pub use control::{ControlError, ControlResponse};
pub use controller::{ApplicationController, ControllerError, TickReport, REFRESH};
pub use display::HeadlessPanel;
pub use images::RemoteImageSource;
pub use touch::{touch_task, TOUCH_CHANNEL, TOUCH_DEPTH};

//! Hardware Abstraction Layer (HAL) for the server-driven e-paper display
//!
//! This crate provides trait-based abstractions for every collaborator the
//! rendering engine depends on, enabling development and testing without
//! the physical board.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (firmware crate)
//!         ↓
//! Rendering engine (ui crate)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! Board support (panel waveforms, GT911, Wi-Fi, SD card)
//! ```
//!
//! # Abstractions
//!
//! - [`EpdPanel`] - E-paper pushes and framebuffer blits
//! - [`TouchSensor`] - Capacitive touch sampling
//! - [`HttpClient`] - Layout server requests
//! - [`ImageCache`] - Persistent bitmap cache
//!
//! # Features
//!
//! - `std`: Enable standard library support (mocks, filesystem cache)
//! - `defmt`: Enable defmt formatting on all plain-data types
//!
//! # Example
//!
//! ```no_run
//! use embedded_graphics::{prelude::*, primitives::Rectangle};
//! use platform::{EpdPanel, PanelColor};
//!
//! async fn erase<P: EpdPanel>(panel: &mut P) {
//!     let area = Rectangle::new(Point::zero(), Size::new(960, 540));
//!     panel.flash(area, 4, PanelColor::White).await.unwrap();
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)] // unsafe fn body is not implicitly unsafe block
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)] // accessors: callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(async_fn_in_trait)] // Embassy no_std: single-threaded, Send bounds not needed

extern crate alloc;

pub mod config;
pub mod display;
pub mod http;
pub mod image_cache;
#[cfg(any(test, feature = "std"))]
pub mod image_cache_local;
pub mod input;
pub mod mocks;

// Re-export main high-level traits
pub use display::{DisplayError, EpdPanel, PanelColor};
pub use http::{HttpClient, HttpError, HttpResponse, STATUS_OK};
pub use image_cache::{CacheError, ImageCache, NoCache};
pub use input::{TouchPoint, TouchSensor};

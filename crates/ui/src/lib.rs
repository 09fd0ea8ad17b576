//! Rendering and reconciliation engine for a server-driven e-paper display.
//!
//! The layout server describes a page as a JSON array of elements (text,
//! buttons, images). This crate turns successive descriptions into the
//! smallest amount of panel work:
//!
//! - [`page`] decodes a page response into element descriptions
//! - [`store::ElementStore`] diffs them against what is on screen and
//!   queues clear/draw [`store::Action`]s
//! - [`store::ElementStore::flush`] executes the queue against the packed
//!   [`framebuffer::Framebuffer`] and blits it once
//! - [`refresh`] models what a refresh costs and carries requests between
//!   the touch, control and render contexts
//! - [`touch`] turns sensor samples into presses and routes callbacks
//!
//! This crate is `no_std` + `alloc`; drawing goes through `embedded-graphics`.

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)]
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(async_fn_in_trait)] // single-threaded executor, Send bounds not needed

extern crate alloc;

pub mod bitmap;
pub mod display_mode;
pub mod element;
pub mod framebuffer;
pub mod geometry;
pub mod page;
pub mod refresh;
pub mod store;
pub mod touch;

pub use bitmap::{Bitmap, ImageError, ImageRequest, ImageSource, ImageType, NoImages};
pub use display_mode::{DisplayMode, FontProperties};
pub use element::{Anchor, Element, ElementError, ElementKind};
pub use framebuffer::Framebuffer;
pub use geometry::Rect;
pub use page::{parse_page, Page, PageDocument, PageError};
pub use refresh::{AutoRefreshIntervals, AutoRefreshPolicy, RefreshRequest, RefreshTier, RefreshType};
pub use store::{Action, DrainReport, ElementStore, ReconcileReport};
pub use touch::{CallbackDispatcher, NoCallbacks, TouchDebouncer, TouchHit};

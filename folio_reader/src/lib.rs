// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=folio_reader --heading-base-level=0

//! Folio Reader: a gesture-driven engine for reading one page at a time.
//!
//! A [`ReaderEngine`] binds a single viewport. It owns the page's
//! [`ViewportTransform`], routes pinch/pan/tap input through the
//! [`folio_gesture::Arbiter`], and talks to the outside world through three
//! injected collaborators:
//!
//! - [`ReaderHost`]: page-change, close, chrome-toggle and haptic side effects.
//! - [`PageSource`]: page count, per-page image availability, retry.
//! - [`LifecycleNotifier`]: foreground/background changes; losing focus
//!   cancels gestures in flight.
//!
//! The engine is single-threaded and allocation-light; the host calls
//! [`ReaderEngine::advance`] from its frame callback while it returns `true`.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use folio_reader::{
//!     GestureEvent, GesturePhase, NoLifecycle, PageContent, PageSource, ReaderConfig,
//!     ReaderEngine, ReaderHost,
//! };
//!
//! struct Pages(usize);
//! impl PageSource for Pages {
//!     type Image = usize;
//!     fn page_count(&self) -> usize { self.0 }
//!     fn page(&self, index: usize) -> PageContent<usize> { PageContent::Ready(index) }
//! }
//!
//! #[derive(Default)]
//! struct Host { pages: Vec<usize> }
//! impl ReaderHost for Host {
//!     fn on_page_change(&mut self, index: usize) { self.pages.push(index); }
//! }
//!
//! let mut reader = ReaderEngine::new(
//!     ReaderConfig::default(),
//!     Size::new(375.0, 667.0),
//!     Pages(3),
//!     Host::default(),
//!     NoLifecycle,
//! );
//!
//! // Zoom in on the top-left corner, then turn the page.
//! let focal = Point::new(50.0, 50.0);
//! reader.handle_event(GestureEvent::pinch(GesturePhase::Began, focal, 1.0, 0));
//! reader.handle_event(GestureEvent::pinch(GesturePhase::Active, focal, 2.0, 16));
//! reader.handle_event(GestureEvent::pinch(GesturePhase::Ended, focal, 2.0, 32));
//! assert_eq!(reader.transform().scale, 2.0);
//!
//! assert!(reader.go_to_next());
//! assert!(reader.transform().is_identity());
//! assert_eq!(reader.host().pages, [1]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod engine;
mod host;
mod page;

pub use config::{ConfigError, ReaderConfig};
pub use engine::ReaderEngine;
pub use host::{
    AppLifecycle, HapticIntensity, LifecycleNotifier, NoLifecycle, PageSource, ReaderHost,
};
pub use page::{PageContent, PageCursor, PageView};

pub use folio_gesture::{
    GestureEvent, GestureKind, GesturePhase, GestureSet, TapConfig, TouchPhase, TouchPoint,
};
pub use folio_view::{
    Boundary, SpringConfig, TransformUpdate, Transition, ViewportTransform, ZoomLimits,
};

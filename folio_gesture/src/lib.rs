// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=folio_gesture --heading-base-level=0

//! Folio Gesture: gesture recognizers and arbitration for zoomable pages.
//!
//! This crate turns a stream of gesture input into committed transform
//! changes and discrete recognitions. Each recognizer is a small state
//! machine (`Idle → Began → Active → Ended | Cancelled`):
//!
//! - [`PinchRecognizer`]: focal-point scaling against a snapshotted base.
//! - [`PanRecognizer`]: incremental translation deltas.
//! - [`SingleTapRecognizer`] / [`DoubleTapRecognizer`]: press/release timing
//!   and distance tolerances.
//!
//! Recognizers only *propose* values. The [`Arbiter`] owns them, applies the
//! static [`POLICY`] table (pinch and pan together; single tap waits for the
//! double tap to fail), and commits proposals into a
//! [`folio_view::TransformState`], which clamps everything it stores.
//!
//! Hosts without a native gesture system can synthesize the input from raw
//! contacts with a [`TouchTracker`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use folio_gesture::{Arbiter, GestureEvent, GesturePhase, Recognized};
//! use folio_view::{SpringConfig, TransformState, ZoomLimits};
//!
//! let mut view = TransformState::new(
//!     Size::new(375.0, 667.0),
//!     ZoomLimits::default(),
//!     SpringConfig::default(),
//! );
//! let mut arbiter = Arbiter::default();
//!
//! let focal = Point::new(200.0, 300.0);
//! arbiter.handle(&GestureEvent::pinch(GesturePhase::Began, focal, 1.0, 0), &mut view);
//! arbiter.handle(&GestureEvent::pinch(GesturePhase::Active, focal, 5.0, 16), &mut view);
//! let done = arbiter.handle(&GestureEvent::pinch(GesturePhase::Ended, focal, 5.0, 32), &mut view);
//!
//! // The ratio is clamped to the maximum zoom.
//! assert_eq!(view.transform().scale, 4.0);
//! assert!(matches!(done[0], Recognized::PinchEnded(_)));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod arbiter;
mod event;
mod pan;
mod pinch;
mod tap;
mod touch;

pub use arbiter::{
    Arbiter, GestureSet, POLICY, PolicyRule, Recognized, RecognizedBatch, can_run_simultaneously,
    dispatch_order, required_failure,
};
pub use event::{
    GestureEvent, GestureKind, GesturePhase, PanEvent, PinchEvent, RecognizerState, TapEvent,
};
pub use pan::{PanOutput, PanRecognizer, PanSession};
pub use pinch::{PinchOutput, PinchRecognizer, PinchSession};
pub use tap::{DoubleTapOutput, DoubleTapRecognizer, SingleTapRecognizer, TapConfig};
pub use touch::{TouchEvents, TouchPhase, TouchPoint, TouchTracker};

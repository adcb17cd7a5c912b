// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=folio_view --heading-base-level=0

//! Folio View: zoom/pan transform state for a single page viewport.
//!
//! This crate provides the continuous-state core of a zoomable page viewer.
//! It focuses on:
//! - The transform value itself ([`ViewportTransform`]: uniform scale plus
//!   translation about the viewport center).
//! - The translation range that keeps a scaled image from leaving the view
//!   ([`compute_boundary`], [`Boundary`]).
//! - An authoritative store that clamps every committed value
//!   ([`TransformState`]).
//! - Spring-damped settling for animated changes ([`SpringConfig`],
//!   [`TransformAnimation`]).
//!
//! It does **not** interpret input. Gesture recognition lives in
//! `folio_gesture`, and the engine that binds the two to page navigation
//! lives in `folio_reader`.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Size, Vec2};
//! use folio_view::{SpringConfig, TransformState, TransformUpdate, Transition, ZoomLimits};
//!
//! let mut state = TransformState::new(
//!     Size::new(375.0, 667.0),
//!     ZoomLimits::default(),
//!     SpringConfig::default(),
//! );
//!
//! // Zoom in and pan far to the right; translation is clamped to the boundary.
//! let committed = state.set_transform(
//!     TransformUpdate::none().with_scale(2.0).with_translate(Vec2::new(10_000.0, 0.0)),
//!     Transition::Immediate,
//! );
//! assert_eq!(committed.translate.x, state.boundary().max_x);
//!
//! // Animate back to identity, one frame at a time.
//! state.reset(Transition::Animated);
//! while state.advance(1.0 / 60.0) {}
//! assert!(state.transform().is_identity());
//! ```
//!
//! ## Design notes
//!
//! - Zoom is uniform and scales about the viewport center.
//! - Clamping is hard: there is no overshoot or rubber-banding at the edges.
//! - Time is supplied by the caller; nothing here reads a clock.
//!
//! This crate is `no_std`.

#![no_std]

mod boundary;
mod spring;
mod state;
mod transform;

pub use boundary::{Boundary, compute_boundary};
pub use spring::{Spring, SpringConfig, TransformAnimation};
pub use state::{TransformState, Transition};
pub use transform::{TransformUpdate, ViewportTransform, ZoomLimits};

// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pinch recognizer: focal-point scaling against a snapshotted base.
//!
//! On `Began` the recognizer snapshots the committed transform and the focal
//! point. Every later update is computed from that snapshot, never from the
//! previous update, so rounding does not accumulate:
//!
//! - `scale = clamp(base.scale * ratio, min_zoom, max_zoom)`
//! - `delta = (focal - base_focal) * (1 - scale)`
//! - `translate = clamp(base.translate + delta + pan_offset, boundary(scale))`
//!
//! `pan_offset` is the translation contributed by a concurrent pan during
//! this pinch (see [`PinchRecognizer::add_pan`]).

use folio_view::{TransformState, ViewportTransform};
use kurbo::{Point, Vec2};

use crate::event::{GesturePhase, PinchEvent, RecognizerState};

/// Ephemeral data for one pinch gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchSession {
    /// Transform committed when the gesture began.
    pub base: ViewportTransform,
    /// Focal point when the gesture began.
    pub base_focal: Point,
    /// Most recent focal point.
    pub focal: Point,
    /// Most recent scale ratio relative to gesture start.
    pub ratio: f64,
    /// Translation added by a concurrent pan since the pinch began.
    pub pan_offset: Vec2,
    /// Time the gesture began, in milliseconds.
    pub started_at_ms: u64,
}

impl PinchSession {
    fn project(&self, view: &TransformState) -> ViewportTransform {
        let scale = view.limits().clamp(self.base.scale * self.ratio);
        let delta = (self.focal - self.base_focal) * (1.0 - scale);
        view.clamp(ViewportTransform {
            scale,
            translate: self.base.translate + delta + self.pan_offset,
        })
    }
}

/// What a pinch event asks the caller to do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PinchOutput {
    /// Nothing to commit.
    None,
    /// Commit this in-gesture value.
    Update(ViewportTransform),
    /// The gesture ended; commit this value. It becomes the base for the next gesture.
    Ended(ViewportTransform),
    /// The gesture was cancelled; restore this base value.
    Cancelled(ViewportTransform),
}

/// Pinch gesture state machine.
#[derive(Clone, Copy, Debug, Default)]
pub struct PinchRecognizer {
    state: RecognizerState,
    session: Option<PinchSession>,
}

impl PinchRecognizer {
    /// Creates an idle recognizer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current recognizer state.
    #[must_use]
    pub fn state(&self) -> RecognizerState {
        self.state
    }

    /// The in-flight session, if a pinch is in progress.
    #[must_use]
    pub fn session(&self) -> Option<&PinchSession> {
        self.session.as_ref()
    }

    /// Returns `true` while a pinch is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.is_in_progress()
    }

    /// Feeds one pinch event.
    ///
    /// `view` supplies the committed transform (snapshotted on `Began`) and
    /// the clamping rules. The recognizer never writes to it.
    ///
    /// A non-finite focal point or a NaN ratio is dropped on `Began` and
    /// `Active`. `Ended` and `Cancelled` always finish the session and only
    /// use values already recorded in it.
    pub fn handle(&mut self, event: &PinchEvent, view: &TransformState) -> PinchOutput {
        let usable = event.focal.is_finite() && !event.scale.is_nan();
        match event.phase {
            GesturePhase::Began => {
                if usable {
                    self.begin(event, view.transform());
                }
                PinchOutput::None
            }
            GesturePhase::Active => {
                if !usable {
                    return PinchOutput::None;
                }
                if !self.is_active() {
                    // Missed the begin; start from what is committed now.
                    self.begin(event, view.transform());
                }
                let Some(session) = self.session.as_mut() else {
                    return PinchOutput::None;
                };
                session.focal = event.focal;
                session.ratio = event.scale;
                self.state = RecognizerState::Active;
                PinchOutput::Update(session.project(view))
            }
            GesturePhase::Ended => self.end(view),
            GesturePhase::Cancelled => self.cancel(),
        }
    }

    /// Adds a concurrent pan's incremental delta and re-projects.
    ///
    /// Returns the value to commit, or `None` if no pinch is in progress.
    pub fn add_pan(&mut self, delta: Vec2, view: &TransformState) -> Option<ViewportTransform> {
        if !self.is_active() {
            return None;
        }
        let session = self.session.as_mut()?;
        session.pan_offset += delta;
        Some(session.project(view))
    }

    /// Drops the pan contribution (a concurrent pan was cancelled) and re-projects.
    pub fn clear_pan(&mut self, view: &TransformState) -> Option<ViewportTransform> {
        if !self.is_active() {
            return None;
        }
        let session = self.session.as_mut()?;
        session.pan_offset = Vec2::ZERO;
        Some(session.project(view))
    }

    /// Ends an in-progress pinch with the last recorded focal point and ratio.
    ///
    /// A pinch that never reached `Active` scaled nothing; it ends silently.
    fn end(&mut self, view: &TransformState) -> PinchOutput {
        let state = self.state;
        let session = self.session.take();
        match (state, session) {
            (RecognizerState::Active, Some(session)) => {
                self.state = RecognizerState::Ended;
                PinchOutput::Ended(session.project(view))
            }
            (RecognizerState::Began, Some(_)) => {
                self.state = RecognizerState::Ended;
                PinchOutput::None
            }
            _ => {
                self.state = RecognizerState::Idle;
                PinchOutput::None
            }
        }
    }

    /// Cancels an in-progress pinch, returning the base to restore.
    pub fn cancel(&mut self) -> PinchOutput {
        let was_active = self.is_active();
        match self.session.take() {
            Some(session) if was_active => {
                self.state = RecognizerState::Cancelled;
                PinchOutput::Cancelled(session.base)
            }
            _ => PinchOutput::None,
        }
    }

    /// Discards any session without producing output.
    pub fn reset(&mut self) {
        self.state = RecognizerState::Idle;
        self.session = None;
    }

    fn begin(&mut self, event: &PinchEvent, base: ViewportTransform) {
        self.state = RecognizerState::Began;
        self.session = Some(PinchSession {
            base,
            base_focal: event.focal,
            focal: event.focal,
            ratio: 1.0,
            pan_offset: Vec2::ZERO,
            started_at_ms: event.time_ms,
        });
    }
}

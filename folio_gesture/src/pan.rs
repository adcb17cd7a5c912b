// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan recognizer: incremental translation deltas from pointer movement.
//!
//! The recognizer only reports how far the pointer centroid moved since the
//! previous event; the caller applies the delta against the boundary of the
//! scale committed at that moment. When the number of contributing pointers
//! changes (a second finger lands or lifts) the centroid jumps, so the
//! recognizer re-anchors on that event instead of reporting a delta.

use folio_view::ViewportTransform;
use kurbo::{Point, Vec2};

use crate::event::{GesturePhase, PanEvent, RecognizerState};

/// Ephemeral data for one pan gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanSession {
    /// Transform committed when the gesture began.
    pub base: ViewportTransform,
    /// Centroid when the gesture began.
    pub start_pos: Point,
    /// Centroid at the previous event.
    pub last_pos: Point,
    /// Pointer count at the previous event.
    pub pointer_count: u8,
    /// Sum of all reported deltas.
    pub total: Vec2,
    /// Time the gesture began, in milliseconds.
    pub started_at_ms: u64,
}

/// What a pan event asks the caller to do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanOutput {
    /// Nothing to apply.
    None,
    /// Apply this translation delta.
    Delta(Vec2),
    /// The gesture ended.
    Ended,
    /// The gesture was cancelled; restore this base value.
    Cancelled(ViewportTransform),
}

/// Pan gesture state machine.
#[derive(Clone, Copy, Debug, Default)]
pub struct PanRecognizer {
    state: RecognizerState,
    session: Option<PanSession>,
}

impl PanRecognizer {
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

    /// The in-flight session, if a pan is in progress.
    #[must_use]
    pub fn session(&self) -> Option<&PanSession> {
        self.session.as_ref()
    }

    /// Returns `true` while a pan is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.is_in_progress()
    }

    /// Feeds one pan event. `committed` is snapshotted as the base on `Began`.
    ///
    /// A non-finite position is dropped on `Began` and `Active`; `Ended` and
    /// `Cancelled` finish the session regardless.
    pub fn handle(&mut self, event: &PanEvent, committed: ViewportTransform) -> PanOutput {
        match event.phase {
            GesturePhase::Began => {
                if event.position.is_finite() {
                    self.begin(event, committed);
                }
                PanOutput::None
            }
            GesturePhase::Active => {
                if !event.position.is_finite() {
                    return PanOutput::None;
                }
                if !self.is_active() {
                    self.begin(event, committed);
                    return PanOutput::None;
                }
                let Some(session) = self.session.as_mut() else {
                    return PanOutput::None;
                };
                self.state = RecognizerState::Active;
                if session.pointer_count != event.pointer_count {
                    session.pointer_count = event.pointer_count;
                    session.last_pos = event.position;
                    return PanOutput::None;
                }
                let delta = event.position - session.last_pos;
                session.last_pos = event.position;
                session.total += delta;
                PanOutput::Delta(delta)
            }
            GesturePhase::Ended => {
                let was_active = self.is_active();
                self.session = None;
                if was_active {
                    self.state = RecognizerState::Ended;
                    PanOutput::Ended
                } else {
                    self.state = RecognizerState::Idle;
                    PanOutput::None
                }
            }
            GesturePhase::Cancelled => self.cancel(),
        }
    }

    /// Cancels an in-progress pan, returning the base to restore.
    pub fn cancel(&mut self) -> PanOutput {
        let was_active = self.is_active();
        match self.session.take() {
            Some(session) if was_active => {
                self.state = RecognizerState::Cancelled;
                PanOutput::Cancelled(session.base)
            }
            _ => PanOutput::None,
        }
    }

    /// Discards any session without producing output.
    pub fn reset(&mut self) {
        self.state = RecognizerState::Idle;
        self.session = None;
    }

    fn begin(&mut self, event: &PanEvent, base: ViewportTransform) {
        self.state = RecognizerState::Began;
        self.session = Some(PanSession {
            base,
            start_pos: event.position,
            last_pos: event.position,
            pointer_count: event.pointer_count,
            total: Vec2::ZERO,
            started_at_ms: event.time_ms,
        });
    }
}

#[cfg(test)]
mod tests {
    use folio_view::ViewportTransform;
    use kurbo::{Point, Vec2};

    use super::{PanOutput, PanRecognizer};
    use crate::event::{GesturePhase, PanEvent, RecognizerState};

    fn ev(phase: GesturePhase, x: f64, y: f64, pointers: u8) -> PanEvent {
        PanEvent {
            phase,
            position: Point::new(x, y),
            pointer_count: pointers,
            time_ms: 0,
        }
    }

    #[test]
    fn reports_incremental_deltas() {
        let mut pan = PanRecognizer::new();
        let base = ViewportTransform::IDENTITY;
        assert_eq!(pan.handle(&ev(GesturePhase::Began, 0.0, 0.0, 1), base), PanOutput::None);
        assert_eq!(
            pan.handle(&ev(GesturePhase::Active, 5.0, 3.0, 1), base),
            PanOutput::Delta(Vec2::new(5.0, 3.0))
        );
        assert_eq!(
            pan.handle(&ev(GesturePhase::Active, 8.0, 7.0, 1), base),
            PanOutput::Delta(Vec2::new(3.0, 4.0))
        );
        assert_eq!(pan.session().unwrap().total, Vec2::new(8.0, 7.0));
        assert_eq!(pan.handle(&ev(GesturePhase::Ended, 8.0, 7.0, 1), base), PanOutput::Ended);
        assert_eq!(pan.state(), RecognizerState::Ended);
    }

    #[test]
    fn pointer_count_change_reanchors() {
        let mut pan = PanRecognizer::new();
        let base = ViewportTransform::IDENTITY;
        pan.handle(&ev(GesturePhase::Began, 0.0, 0.0, 1), base);
        pan.handle(&ev(GesturePhase::Active, 10.0, 0.0, 1), base);
        // Second finger lands far away; the centroid jump is not a movement.
        assert_eq!(
            pan.handle(&ev(GesturePhase::Active, 100.0, 50.0, 2), base),
            PanOutput::None
        );
        assert_eq!(
            pan.handle(&ev(GesturePhase::Active, 104.0, 50.0, 2), base),
            PanOutput::Delta(Vec2::new(4.0, 0.0))
        );
    }

    #[test]
    fn cancel_returns_base() {
        let mut pan = PanRecognizer::new();
        let base = ViewportTransform::new(2.0, 12.0, -4.0);
        pan.handle(&ev(GesturePhase::Began, 0.0, 0.0, 1), base);
        pan.handle(&ev(GesturePhase::Active, 40.0, 0.0, 1), base);
        assert_eq!(
            pan.handle(&ev(GesturePhase::Cancelled, 40.0, 0.0, 1), base),
            PanOutput::Cancelled(base)
        );
        assert!(!pan.is_active());
    }

    #[test]
    fn active_without_begin_starts_a_session() {
        let mut pan = PanRecognizer::new();
        let base = ViewportTransform::IDENTITY;
        assert_eq!(pan.handle(&ev(GesturePhase::Active, 3.0, 3.0, 1), base), PanOutput::None);
        assert!(pan.is_active());
        assert_eq!(
            pan.handle(&ev(GesturePhase::Active, 4.0, 3.0, 1), base),
            PanOutput::Delta(Vec2::new(1.0, 0.0))
        );
    }

    #[test]
    fn non_finite_position_is_ignored() {
        let mut pan = PanRecognizer::new();
        let base = ViewportTransform::IDENTITY;
        pan.handle(&ev(GesturePhase::Began, 0.0, 0.0, 1), base);
        assert_eq!(
            pan.handle(&ev(GesturePhase::Active, f64::NAN, 0.0, 1), base),
            PanOutput::None
        );
        assert_eq!(
            pan.handle(&ev(GesturePhase::Active, 2.0, 0.0, 1), base),
            PanOutput::Delta(Vec2::new(2.0, 0.0))
        );
    }

    #[test]
    fn non_finite_end_and_cancel_still_finish() {
        let mut pan = PanRecognizer::new();
        let base = ViewportTransform::new(2.0, 15.0, -5.0);
        pan.handle(&ev(GesturePhase::Began, 0.0, 0.0, 1), base);
        pan.handle(&ev(GesturePhase::Active, 9.0, 9.0, 1), base);
        assert_eq!(
            pan.handle(&ev(GesturePhase::Cancelled, f64::INFINITY, 0.0, 1), base),
            PanOutput::Cancelled(base)
        );
        assert!(!pan.is_active());

        pan.handle(&ev(GesturePhase::Began, 0.0, 0.0, 1), base);
        assert_eq!(
            pan.handle(&ev(GesturePhase::Ended, f64::NAN, f64::NAN, 1), base),
            PanOutput::Ended
        );
        assert!(!pan.is_active());
    }
}

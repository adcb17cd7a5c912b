// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture arbitration: which recognizers may run together, and in what order.
//!
//! The policy is a static table ([`POLICY`]):
//!
//! - Pinch and pan run simultaneously. Within one frame pinch is dispatched
//!   first, so a concurrent pan's delta is added on top of the pinch result
//!   and clamped against the post-pinch boundary.
//! - A single tap waits for the double tap to fail. A completed single tap
//!   is held back until the double-tap window closes (see
//!   [`Arbiter::poll`]) and dropped if a double tap is recognized instead.
//! - Continuous gestures (pinch, pan) pre-empt taps: one beginning fails any
//!   undecided tap sequence, and tap input is ignored while one is running.
//!
//! The [`Arbiter`] owns the four recognizers and is the only place that
//! commits their proposals into a [`TransformState`].

use bitflags::bitflags;
use folio_view::{TransformState, TransformUpdate, Transition, ViewportTransform};
use kurbo::Point;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::event::{GestureEvent, GestureKind, GesturePhase, PanEvent, PinchEvent, TapEvent};
use crate::pan::{PanOutput, PanRecognizer};
use crate::pinch::{PinchOutput, PinchRecognizer};
use crate::tap::{DoubleTapOutput, DoubleTapRecognizer, SingleTapRecognizer, TapConfig};

bitflags! {
    /// A set of [`GestureKind`]s.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct GestureSet: u8 {
        /// Pinch.
        const PINCH = 1;
        /// Pan.
        const PAN = 1 << 1;
        /// Single tap.
        const SINGLE_TAP = 1 << 2;
        /// Double tap.
        const DOUBLE_TAP = 1 << 3;
        /// Gestures that track continuous input.
        const CONTINUOUS = Self::PINCH.bits() | Self::PAN.bits();
        /// Gestures recognized from discrete taps.
        const DISCRETE = Self::SINGLE_TAP.bits() | Self::DOUBLE_TAP.bits();
    }
}

impl From<GestureKind> for GestureSet {
    fn from(kind: GestureKind) -> Self {
        match kind {
            GestureKind::Pinch => Self::PINCH,
            GestureKind::Pan => Self::PAN,
            GestureKind::SingleTap => Self::SINGLE_TAP,
            GestureKind::DoubleTap => Self::DOUBLE_TAP,
        }
    }
}

/// One entry of the arbitration table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyRule {
    /// Both gestures may be in progress at the same time.
    Simultaneous(GestureKind, GestureKind),
    /// `waiting` may only fire after `on` has failed.
    RequireFailure {
        /// The gesture that is deferred.
        waiting: GestureKind,
        /// The gesture that must fail first.
        on: GestureKind,
    },
}

/// The arbitration table.
pub const POLICY: &[PolicyRule] = &[
    PolicyRule::Simultaneous(GestureKind::Pinch, GestureKind::Pan),
    PolicyRule::RequireFailure {
        waiting: GestureKind::SingleTap,
        on: GestureKind::DoubleTap,
    },
];

/// Returns `true` if `a` and `b` may be in progress together.
#[must_use]
pub fn can_run_simultaneously(a: GestureKind, b: GestureKind) -> bool {
    a == b
        || POLICY.iter().any(|rule| match *rule {
            PolicyRule::Simultaneous(x, y) => (x == a && y == b) || (x == b && y == a),
            PolicyRule::RequireFailure { .. } => false,
        })
}

/// The gesture that must fail before `kind` may fire, if any.
#[must_use]
pub fn required_failure(kind: GestureKind) -> Option<GestureKind> {
    POLICY.iter().find_map(|rule| match *rule {
        PolicyRule::RequireFailure { waiting, on } if waiting == kind => Some(on),
        _ => None,
    })
}

/// Dispatch order within a frame; lower runs first.
#[must_use]
pub fn dispatch_order(kind: GestureKind) -> u8 {
    match kind {
        GestureKind::Pinch => 0,
        GestureKind::Pan => 1,
        GestureKind::DoubleTap => 2,
        GestureKind::SingleTap => 3,
    }
}

/// A discrete result of arbitration that the caller should react to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Recognized {
    /// A pinch ended; its final value is committed and becomes the next base.
    PinchEnded(ViewportTransform),
    /// A pan ended.
    PanEnded,
    /// A single tap survived the double-tap window.
    SingleTap(Point),
    /// A double tap, located at the first tap.
    DoubleTap(Point),
    /// A gesture was cancelled and its base restored.
    Cancelled(GestureKind),
}

/// Results produced by one call into the arbiter.
pub type RecognizedBatch = SmallVec<[Recognized; 2]>;

/// Owns the recognizers and applies the arbitration policy.
#[derive(Clone, Debug)]
pub struct Arbiter {
    pinch: PinchRecognizer,
    pan: PanRecognizer,
    single_tap: SingleTapRecognizer,
    double_tap: DoubleTapRecognizer,
    pending_single: Option<Point>,
}

impl Arbiter {
    /// Creates an arbiter with idle recognizers.
    #[must_use]
    pub fn new(taps: TapConfig) -> Self {
        Self {
            pinch: PinchRecognizer::new(),
            pan: PanRecognizer::new(),
            single_tap: SingleTapRecognizer::new(taps),
            double_tap: DoubleTapRecognizer::new(taps),
            pending_single: None,
        }
    }

    /// The gestures currently in progress.
    #[must_use]
    pub fn active(&self) -> GestureSet {
        let mut set = GestureSet::empty();
        set.set(GestureSet::PINCH, self.pinch.is_active());
        set.set(GestureSet::PAN, self.pan.is_active());
        set.set(GestureSet::SINGLE_TAP, self.single_tap.state().is_in_progress());
        set.set(GestureSet::DOUBLE_TAP, self.double_tap.is_possible());
        set
    }

    /// The pinch recognizer.
    #[must_use]
    pub fn pinch(&self) -> &PinchRecognizer {
        &self.pinch
    }

    /// The pan recognizer.
    #[must_use]
    pub fn pan(&self) -> &PanRecognizer {
        &self.pan
    }

    /// Returns `true` while a completed single tap waits for the double tap to fail.
    #[must_use]
    pub fn has_pending_single_tap(&self) -> bool {
        self.pending_single.is_some()
    }

    /// Dispatches one event, committing any transform proposal into `view`.
    pub fn handle(&mut self, event: &GestureEvent, view: &mut TransformState) -> RecognizedBatch {
        let mut out = RecognizedBatch::new();
        match event {
            GestureEvent::Pinch(e) => self.handle_pinch(e, view, &mut out),
            GestureEvent::Pan(e) => self.handle_pan(e, view, &mut out),
            GestureEvent::Tap(e) => self.handle_tap(e, &mut out),
        }
        out
    }

    /// Orders and dispatches all events of one frame.
    pub fn handle_frame<I>(&mut self, events: I, view: &mut TransformState) -> RecognizedBatch
    where
        I: IntoIterator<Item = GestureEvent>,
    {
        let mut out = RecognizedBatch::new();
        for event in Self::order_frame(events) {
            out.extend(self.handle(&event, view));
        }
        out
    }

    /// Stably orders a frame's events by [`dispatch_order`].
    #[must_use]
    pub fn order_frame<I>(events: I) -> SmallVec<[GestureEvent; 8]>
    where
        I: IntoIterator<Item = GestureEvent>,
    {
        let mut frame: SmallVec<[GestureEvent; 8]> = events.into_iter().collect();
        frame.sort_by_key(|e| dispatch_order(e.kind()));
        frame
    }

    /// Advances tap timing. Fires a deferred single tap once the double-tap
    /// window has closed.
    pub fn poll(&mut self, now_ms: u64) -> Option<Recognized> {
        if self.double_tap.poll(now_ms) == DoubleTapOutput::Failed {
            return self.flush_single();
        }
        None
    }

    /// Cancels every in-progress gesture, restoring their bases, and drops
    /// undecided taps.
    pub fn cancel_all(&mut self, view: &mut TransformState) -> RecognizedBatch {
        let mut out = RecognizedBatch::new();
        // Pan first: its contribution to a running pinch is dropped, then the
        // pinch restores the base it snapshotted.
        let pan = self.pan.cancel();
        self.apply_pan_cancel(pan, view, &mut out);
        let pinch = self.pinch.cancel();
        self.apply_pinch(pinch, view, &mut out);
        self.fail_taps();
        out
    }

    /// Discards all gesture sessions without touching the transform.
    pub fn reset(&mut self) {
        self.pinch.reset();
        self.pan.reset();
        self.single_tap.reset();
        self.double_tap.reset();
        self.pending_single = None;
    }

    fn handle_pinch(
        &mut self,
        e: &PinchEvent,
        view: &mut TransformState,
        out: &mut RecognizedBatch,
    ) {
        let starting = matches!(e.phase, GesturePhase::Began | GesturePhase::Active);
        if starting && !self.pinch.is_active() {
            self.begin_continuous(view);
        }
        let output = self.pinch.handle(e, view);
        self.apply_pinch(output, view, out);
    }

    fn handle_pan(&mut self, e: &PanEvent, view: &mut TransformState, out: &mut RecognizedBatch) {
        let starting = matches!(e.phase, GesturePhase::Began | GesturePhase::Active);
        if starting && !self.pan.is_active() {
            self.begin_continuous(view);
        }
        match self.pan.handle(e, view.transform()) {
            PanOutput::None => {}
            PanOutput::Delta(delta) => {
                // Pinch has already been applied this frame; pan rides on top of it.
                let update = match self.pinch.add_pan(delta, view) {
                    Some(t) => TransformUpdate::to(t),
                    None => {
                        TransformUpdate::none().with_translate(view.transform().translate + delta)
                    }
                };
                let committed = view.set_transform(update, Transition::Immediate);
                trace!(?delta, ?committed, "pan");
            }
            PanOutput::Ended => out.push(Recognized::PanEnded),
            cancelled @ PanOutput::Cancelled(_) => self.apply_pan_cancel(cancelled, view, out),
        }
    }

    fn handle_tap(&mut self, e: &TapEvent, out: &mut RecognizedBatch) {
        if self.pinch.is_active() || self.pan.is_active() {
            return;
        }
        let single = self.single_tap.handle(e);
        match self.double_tap.handle(e) {
            DoubleTapOutput::Recognized(at) => {
                self.pending_single = None;
                debug!(?at, "double tap recognized");
                out.push(Recognized::DoubleTap(at));
                return;
            }
            DoubleTapOutput::Failed => out.extend(self.flush_single()),
            DoubleTapOutput::Pending => {}
        }
        if let Some(at) = single {
            if self.double_tap.is_waiting_for_second_tap() {
                trace!(?at, "single tap deferred until the double tap fails");
                self.pending_single = Some(at);
            } else {
                debug!(?at, "single tap recognized");
                out.push(Recognized::SingleTap(at));
            }
        }
    }

    fn begin_continuous(&mut self, view: &mut TransformState) {
        // An animation in flight hands over its interpolated value as the new base.
        view.interrupt();
        if self.double_tap.is_possible() || self.pending_single.is_some() {
            debug!("continuous gesture began; undecided taps fail");
        }
        self.fail_taps();
    }

    fn fail_taps(&mut self) {
        self.single_tap.fail();
        self.double_tap.fail();
        self.pending_single = None;
    }

    fn flush_single(&mut self) -> Option<Recognized> {
        let at = self.pending_single.take()?;
        debug!(?at, "single tap recognized after double-tap window");
        Some(Recognized::SingleTap(at))
    }

    fn apply_pinch(
        &mut self,
        output: PinchOutput,
        view: &mut TransformState,
        out: &mut RecognizedBatch,
    ) {
        match output {
            PinchOutput::None => {}
            PinchOutput::Update(t) => {
                let committed = view.set_transform(TransformUpdate::to(t), Transition::Immediate);
                trace!(?committed, "pinch");
            }
            PinchOutput::Ended(t) => {
                let committed = view.set_transform(TransformUpdate::to(t), Transition::Immediate);
                debug!(?committed, "pinch ended");
                out.push(Recognized::PinchEnded(committed));
            }
            PinchOutput::Cancelled(base) => {
                view.set_transform(TransformUpdate::to(base), Transition::Immediate);
                debug!(?base, "pinch cancelled; base restored");
                out.push(Recognized::Cancelled(GestureKind::Pinch));
            }
        }
    }

    fn apply_pan_cancel(
        &mut self,
        output: PanOutput,
        view: &mut TransformState,
        out: &mut RecognizedBatch,
    ) {
        let PanOutput::Cancelled(base) = output else {
            return;
        };
        let update = match self.pinch.clear_pan(view) {
            Some(t) => TransformUpdate::to(t),
            None => TransformUpdate::none().with_translate(base.translate),
        };
        view.set_transform(update, Transition::Immediate);
        debug!(?base, "pan cancelled; base restored");
        out.push(Recognized::Cancelled(GestureKind::Pan));
    }
}

impl Default for Arbiter {
    fn default() -> Self {
        Self::new(TapConfig::default())
    }
}

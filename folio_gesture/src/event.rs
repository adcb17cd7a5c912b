// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

/// Phase of a gesture event as reported by the host's gesture system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// The gesture started.
    Began,
    /// The gesture moved or changed.
    Active,
    /// The gesture finished normally.
    Ended,
    /// The gesture was interrupted (for example by the operating system).
    Cancelled,
}

/// Lifecycle of a single recognizer.
///
/// Recognizers move `Idle → Began → Active → (Ended | Cancelled)` and return
/// to `Idle` when the next gesture begins or when they are reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum RecognizerState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A gesture started; the base values are snapshotted.
    Began,
    /// The gesture is tracking input.
    Active,
    /// The gesture finished and its result was committed.
    Ended,
    /// The gesture was cancelled or failed.
    Cancelled,
}

impl RecognizerState {
    /// Returns `true` for `Began` and `Active`.
    #[must_use]
    pub fn is_in_progress(self) -> bool {
        matches!(self, Self::Began | Self::Active)
    }
}

/// The kinds of gesture the arbiter knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureKind {
    /// Two-finger scale gesture.
    Pinch,
    /// One- or two-finger translation gesture.
    Pan,
    /// A single tap.
    SingleTap,
    /// Two taps in quick succession.
    DoubleTap,
}

/// Pinch update: scale ratio relative to the start of the gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchEvent {
    /// Event phase.
    pub phase: GesturePhase,
    /// Midpoint of the two contacts in view coordinates.
    pub focal: Point,
    /// Current finger distance divided by the distance at gesture start.
    pub scale: f64,
    /// Event time in milliseconds.
    pub time_ms: u64,
}

/// Pan update carrying the pointer centroid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanEvent {
    /// Event phase.
    pub phase: GesturePhase,
    /// Centroid of the participating pointers in view coordinates.
    pub position: Point,
    /// Number of pointers contributing to `position`.
    pub pointer_count: u8,
    /// Event time in milliseconds.
    pub time_ms: u64,
}

/// Tap input: `Began` is the press, `Active` a move while pressed, `Ended`
/// the release and `Cancelled` an aborted press.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TapEvent {
    /// Event phase.
    pub phase: GesturePhase,
    /// Pointer position in view coordinates.
    pub position: Point,
    /// Event time in milliseconds.
    pub time_ms: u64,
}

/// One event delivered to the gesture layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// Pinch input.
    Pinch(PinchEvent),
    /// Pan input.
    Pan(PanEvent),
    /// Tap input.
    Tap(TapEvent),
}

impl GestureEvent {
    /// Pinch event shorthand.
    #[must_use]
    pub fn pinch(phase: GesturePhase, focal: Point, scale: f64, time_ms: u64) -> Self {
        Self::Pinch(PinchEvent {
            phase,
            focal,
            scale,
            time_ms,
        })
    }

    /// Pan event shorthand.
    #[must_use]
    pub fn pan(phase: GesturePhase, position: Point, pointer_count: u8, time_ms: u64) -> Self {
        Self::Pan(PanEvent {
            phase,
            position,
            pointer_count,
            time_ms,
        })
    }

    /// Tap event shorthand.
    #[must_use]
    pub fn tap(phase: GesturePhase, position: Point, time_ms: u64) -> Self {
        Self::Tap(TapEvent {
            phase,
            position,
            time_ms,
        })
    }

    /// The recognizer family this event feeds. Tap input feeds both tap
    /// recognizers and is reported as [`GestureKind::SingleTap`].
    #[must_use]
    pub fn kind(&self) -> GestureKind {
        match self {
            Self::Pinch(_) => GestureKind::Pinch,
            Self::Pan(_) => GestureKind::Pan,
            Self::Tap(_) => GestureKind::SingleTap,
        }
    }

    /// Event phase.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        match self {
            Self::Pinch(e) => e.phase,
            Self::Pan(e) => e.phase,
            Self::Tap(e) => e.phase,
        }
    }

    /// Event time in milliseconds.
    #[must_use]
    pub fn time_ms(&self) -> u64 {
        match self {
            Self::Pinch(e) => e.time_ms,
            Self::Pan(e) => e.time_ms,
            Self::Tap(e) => e.time_ms,
        }
    }
}


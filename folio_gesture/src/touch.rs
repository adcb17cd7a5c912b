// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw touch tracking: turn individual contacts into gesture events.
//!
//! Hosts with their own gesture system feed [`GestureEvent`]s straight into
//! the arbiter. Hosts that only see raw touches (web `TouchEvent`s, winit
//! `Touch`) can route them through a [`TouchTracker`] instead:
//!
//! - One contact that lifts without leaving the touch slop is a tap.
//! - One contact that leaves the slop becomes a pan.
//! - Two contacts form a pinch (distance ratio, midpoint focal point) and a
//!   concurrent two-finger pan (centroid).
//! - Contacts beyond the second are ignored.
//! - A cancelled contact cancels every gesture it takes part in.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use folio_gesture::{GestureEvent, GesturePhase, TouchPhase, TouchPoint, TouchTracker};
//!
//! let mut touches = TouchTracker::new(8.0);
//! touches.handle(&TouchPoint::new(1, TouchPhase::Down, Point::new(100.0, 100.0), 0));
//! touches.handle(&TouchPoint::new(2, TouchPhase::Down, Point::new(200.0, 100.0), 5));
//!
//! // Fingers spread to twice the distance: a pinch with ratio 2.
//! let spread = TouchPoint::new(2, TouchPhase::Move, Point::new(300.0, 100.0), 20);
//! let events = touches.handle(&spread);
//! assert!(matches!(
//!     events[0],
//!     GestureEvent::Pinch(p) if p.phase == GesturePhase::Active && p.scale == 2.0
//! ));
//! ```

use kurbo::Point;
use smallvec::SmallVec;

use crate::event::{GestureEvent, GesturePhase};

/// Distances below this are treated as coincident contacts when computing
/// a pinch ratio.
const MIN_PINCH_DISTANCE: f64 = 1.0;

/// Phase of one raw contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// Contact started.
    Down,
    /// Contact moved.
    Move,
    /// Contact lifted.
    Up,
    /// Contact was interrupted.
    Cancel,
}

/// One raw contact update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    /// Host-assigned contact identifier, stable for the contact's lifetime.
    pub id: u64,
    /// Contact phase.
    pub phase: TouchPhase,
    /// Contact position in view coordinates.
    pub position: Point,
    /// Event time in milliseconds.
    pub time_ms: u64,
}

impl TouchPoint {
    /// Creates a contact update.
    #[must_use]
    pub fn new(id: u64, phase: TouchPhase, position: Point, time_ms: u64) -> Self {
        Self {
            id,
            phase,
            position,
            time_ms,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Contact {
    id: u64,
    start: Point,
    current: Point,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Mode {
    Idle,
    /// One contact that has not left the slop yet.
    TapCandidate,
    /// One or two contacts driving a pan, without a pinch.
    Panning,
    /// Two contacts driving a pinch and a pan.
    Pinching { initial_distance: f64 },
}

/// Gesture events produced by one touch update.
pub type TouchEvents = SmallVec<[GestureEvent; 3]>;

/// Synthesizes pinch, pan and tap events from raw contacts.
#[derive(Clone, Debug)]
pub struct TouchTracker {
    slop: f64,
    contacts: SmallVec<[Contact; 2]>,
    mode: Mode,
}

impl TouchTracker {
    /// Creates a tracker; `slop` is the travel (in logical pixels) after
    /// which a single contact stops being a tap candidate and starts a pan.
    #[must_use]
    pub fn new(slop: f64) -> Self {
        Self {
            slop: if slop.is_finite() { slop.max(0.0) } else { 0.0 },
            contacts: SmallVec::new(),
            mode: Mode::Idle,
        }
    }

    /// Number of tracked contacts (at most two).
    #[must_use]
    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    /// Feeds one contact update and returns the resulting gesture events in
    /// dispatch order.
    ///
    /// `Down` and `Move` at a non-finite position are dropped. `Up` and
    /// `Cancel` always take effect; a lift at a non-finite position is
    /// treated as a lift at the contact's last known position.
    pub fn handle(&mut self, touch: &TouchPoint) -> TouchEvents {
        let mut out = TouchEvents::new();
        let terminal = matches!(touch.phase, TouchPhase::Up | TouchPhase::Cancel);
        if !touch.position.is_finite() && !terminal {
            return out;
        }
        let t = touch.time_ms;
        match touch.phase {
            TouchPhase::Down => self.on_down(touch, &mut out),
            TouchPhase::Move => self.on_move(touch, &mut out),
            TouchPhase::Up => self.on_up(touch, &mut out),
            TouchPhase::Cancel => {
                if self.index_of(touch.id).is_some() {
                    self.cancel_all(t, &mut out);
                }
            }
        }
        out
    }

    /// Drops every contact, cancelling gestures in progress.
    pub fn cancel(&mut self, time_ms: u64) -> TouchEvents {
        let mut out = TouchEvents::new();
        self.cancel_all(time_ms, &mut out);
        out
    }

    fn index_of(&self, id: u64) -> Option<usize> {
        self.contacts.iter().position(|c| c.id == id)
    }

    fn centroid(&self) -> Point {
        match self.contacts.as_slice() {
            [a] => a.current,
            [a, b] => a.current.midpoint(b.current),
            _ => Point::ZERO,
        }
    }

    fn distance(&self) -> f64 {
        match self.contacts.as_slice() {
            [a, b] => (b.current - a.current).hypot(),
            _ => 0.0,
        }
    }

    fn pointer_count(&self) -> u8 {
        // At most two contacts are tracked.
        if self.contacts.len() >= 2 { 2 } else { 1 }
    }

    fn pan_event(&self, phase: GesturePhase, t: u64) -> GestureEvent {
        GestureEvent::pan(phase, self.centroid(), self.pointer_count(), t)
    }

    fn on_down(&mut self, touch: &TouchPoint, out: &mut TouchEvents) {
        if self.contacts.len() >= 2 || self.index_of(touch.id).is_some() {
            return;
        }
        let t = touch.time_ms;
        self.contacts.push(Contact {
            id: touch.id,
            start: touch.position,
            current: touch.position,
        });
        match self.mode {
            Mode::Idle => {
                self.mode = Mode::TapCandidate;
                out.push(GestureEvent::tap(GesturePhase::Began, touch.position, t));
            }
            Mode::TapCandidate | Mode::Panning => {
                let was_panning = self.mode == Mode::Panning;
                if !was_panning {
                    let first = self.contacts[0].current;
                    out.push(GestureEvent::tap(GesturePhase::Cancelled, first, t));
                }
                let initial_distance = self.distance();
                self.mode = Mode::Pinching { initial_distance };
                out.push(GestureEvent::pinch(GesturePhase::Began, self.centroid(), 1.0, t));
                let pan_phase = if was_panning {
                    GesturePhase::Active
                } else {
                    GesturePhase::Began
                };
                out.push(self.pan_event(pan_phase, t));
            }
            Mode::Pinching { .. } => {}
        }
    }

    fn on_move(&mut self, touch: &TouchPoint, out: &mut TouchEvents) {
        let Some(i) = self.index_of(touch.id) else {
            return;
        };
        let t = touch.time_ms;
        self.contacts[i].current = touch.position;
        match self.mode {
            Mode::Idle => {}
            Mode::TapCandidate => {
                let contact = self.contacts[i];
                if (contact.current - contact.start).hypot2() > self.slop * self.slop {
                    self.mode = Mode::Panning;
                    out.push(GestureEvent::tap(GesturePhase::Cancelled, contact.current, t));
                    out.push(GestureEvent::pan(GesturePhase::Began, contact.start, 1, t));
                    out.push(GestureEvent::pan(GesturePhase::Active, contact.current, 1, t));
                } else {
                    out.push(GestureEvent::tap(GesturePhase::Active, contact.current, t));
                }
            }
            Mode::Panning => out.push(self.pan_event(GesturePhase::Active, t)),
            Mode::Pinching { initial_distance } => {
                let scale = if initial_distance < MIN_PINCH_DISTANCE {
                    1.0
                } else {
                    self.distance() / initial_distance
                };
                out.push(GestureEvent::pinch(GesturePhase::Active, self.centroid(), scale, t));
                out.push(self.pan_event(GesturePhase::Active, t));
            }
        }
    }

    fn on_up(&mut self, touch: &TouchPoint, out: &mut TouchEvents) {
        let Some(i) = self.index_of(touch.id) else {
            return;
        };
        let t = touch.time_ms;
        if touch.position.is_finite() {
            self.contacts[i].current = touch.position;
        }
        match self.mode {
            Mode::Idle => {}
            Mode::TapCandidate => {
                out.push(GestureEvent::tap(GesturePhase::Ended, self.contacts[i].current, t));
                self.mode = Mode::Idle;
            }
            Mode::Panning => {
                if self.contacts.len() == 1 {
                    out.push(self.pan_event(GesturePhase::Ended, t));
                    self.mode = Mode::Idle;
                }
            }
            Mode::Pinching { .. } => {
                out.push(GestureEvent::pinch(
                    GesturePhase::Ended,
                    self.centroid(),
                    self.current_scale(),
                    t,
                ));
                self.mode = Mode::Panning;
            }
        }
        self.contacts.remove(i);
        // The remaining finger keeps panning; the pointer count change re-anchors it.
        if self.mode == Mode::Panning && !self.contacts.is_empty() {
            out.push(self.pan_event(GesturePhase::Active, t));
        }
    }

    fn current_scale(&self) -> f64 {
        match self.mode {
            Mode::Pinching { initial_distance } if initial_distance >= MIN_PINCH_DISTANCE => {
                self.distance() / initial_distance
            }
            _ => 1.0,
        }
    }

    fn cancel_all(&mut self, t: u64, out: &mut TouchEvents) {
        match self.mode {
            Mode::Idle => {}
            Mode::TapCandidate => {
                out.push(GestureEvent::tap(GesturePhase::Cancelled, self.centroid(), t));
            }
            Mode::Panning => out.push(self.pan_event(GesturePhase::Cancelled, t)),
            Mode::Pinching { .. } => {
                out.push(GestureEvent::pinch(
                    GesturePhase::Cancelled,
                    self.centroid(),
                    self.current_scale(),
                    t,
                ));
                out.push(self.pan_event(GesturePhase::Cancelled, t));
            }
        }
        self.contacts.clear();
        self.mode = Mode::Idle;
    }
}

impl Default for TouchTracker {
    fn default() -> Self {
        Self::new(8.0)
    }
}

// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single- and double-tap recognizers.
//!
//! A *tap* is a press followed by a release within
//! [`TapConfig::max_tap_duration_ms`] without the pointer travelling further
//! than [`TapConfig::tap_slop`]. A *double tap* is two taps whose second
//! press lands within [`TapConfig::double_tap_window_ms`] of the first
//! release and within `tap_slop` of the first tap.
//!
//! These recognizers are independent; deferring a single tap until the
//! double tap has failed is the arbiter's job.

use kurbo::Point;

use crate::event::{GesturePhase, RecognizerState, TapEvent};

/// Tap timing and distance tolerances.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TapConfig {
    /// Maximum time between the first release and the second press.
    pub double_tap_window_ms: u64,
    /// Maximum time between press and release of one tap.
    pub max_tap_duration_ms: u64,
    /// Maximum pointer travel within a tap, and between the two taps of a
    /// double tap, in logical pixels.
    pub tap_slop: f64,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            double_tap_window_ms: 300,
            max_tap_duration_ms: 250,
            tap_slop: 20.0,
        }
    }
}

/// Press bookkeeping shared by both recognizers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Press {
    position: Point,
    time_ms: u64,
}

fn within(a: Point, b: Point, slop: f64) -> bool {
    (a - b).hypot2() <= slop * slop
}

/// Recognizes one tap per press/release pair.
#[derive(Clone, Copy, Debug, Default)]
pub struct SingleTapRecognizer {
    config: TapConfig,
    state: RecognizerState,
    press: Option<Press>,
}

impl SingleTapRecognizer {
    /// Creates an idle recognizer.
    #[must_use]
    pub fn new(config: TapConfig) -> Self {
        Self {
            config,
            state: RecognizerState::Idle,
            press: None,
        }
    }

    /// Current recognizer state.
    #[must_use]
    pub fn state(&self) -> RecognizerState {
        self.state
    }

    /// Feeds one tap event. Returns the tap position when a tap completes.
    ///
    /// A release at a non-finite position cannot be checked against the
    /// slop, so it fails the tap.
    pub fn handle(&mut self, event: &TapEvent) -> Option<Point> {
        if !event.position.is_finite() {
            if matches!(event.phase, GesturePhase::Ended | GesturePhase::Cancelled) {
                self.fail();
            }
            return None;
        }
        match event.phase {
            GesturePhase::Began => {
                self.state = RecognizerState::Began;
                self.press = Some(Press {
                    position: event.position,
                    time_ms: event.time_ms,
                });
                None
            }
            GesturePhase::Active => {
                if let Some(press) = self.press {
                    if within(press.position, event.position, self.config.tap_slop) {
                        self.state = RecognizerState::Active;
                    } else {
                        self.fail();
                    }
                }
                None
            }
            GesturePhase::Ended => {
                let press = self.press.take()?;
                let held = event.time_ms.saturating_sub(press.time_ms);
                if held <= self.config.max_tap_duration_ms
                    && within(press.position, event.position, self.config.tap_slop)
                {
                    self.state = RecognizerState::Ended;
                    Some(press.position)
                } else {
                    self.state = RecognizerState::Cancelled;
                    None
                }
            }
            GesturePhase::Cancelled => {
                self.fail();
                None
            }
        }
    }

    /// Abandons the current press.
    pub fn fail(&mut self) {
        if self.press.take().is_some() {
            self.state = RecognizerState::Cancelled;
        }
    }

    /// Returns to idle.
    pub fn reset(&mut self) {
        self.state = RecognizerState::Idle;
        self.press = None;
    }
}

/// Outcome of feeding the double-tap recognizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DoubleTapOutput {
    /// Still deciding, or idle.
    Pending,
    /// Two taps completed; carries the position of the first tap.
    Recognized(Point),
    /// The sequence in progress can no longer become a double tap.
    Failed,
}

/// Recognizes two taps in quick succession.
///
/// State mapping: `Began` after the first press, `Active` while waiting for
/// or tracking the second tap, `Ended` on recognition, `Cancelled` on
/// failure.
#[derive(Clone, Copy, Debug, Default)]
pub struct DoubleTapRecognizer {
    config: TapConfig,
    state: RecognizerState,
    press: Option<Press>,
    first_tap: Option<Press>,
}

impl DoubleTapRecognizer {
    /// Creates an idle recognizer.
    #[must_use]
    pub fn new(config: TapConfig) -> Self {
        Self {
            config,
            state: RecognizerState::Idle,
            press: None,
            first_tap: None,
        }
    }

    /// Current recognizer state.
    #[must_use]
    pub fn state(&self) -> RecognizerState {
        self.state
    }

    /// Returns `true` once a first tap completed and a second may still follow.
    #[must_use]
    pub fn is_waiting_for_second_tap(&self) -> bool {
        self.first_tap.is_some()
    }

    /// Returns `true` while the recognizer could still succeed.
    #[must_use]
    pub fn is_possible(&self) -> bool {
        self.press.is_some() || self.first_tap.is_some()
    }

    /// Feeds one tap event. A release or cancel at a non-finite position
    /// fails the sequence.
    pub fn handle(&mut self, event: &TapEvent) -> DoubleTapOutput {
        if !event.position.is_finite() {
            return match event.phase {
                GesturePhase::Ended | GesturePhase::Cancelled => self.fail_output(),
                GesturePhase::Began | GesturePhase::Active => DoubleTapOutput::Pending,
            };
        }
        match event.phase {
            GesturePhase::Began => {
                if let Some(first) = self.first_tap {
                    let late = event.time_ms.saturating_sub(first.time_ms)
                        > self.config.double_tap_window_ms;
                    if late || !within(first.position, event.position, self.config.tap_slop) {
                        // This press cannot complete the old sequence; it may start a new one.
                        self.first_tap = None;
                        self.start_press(event);
                        return DoubleTapOutput::Failed;
                    }
                    self.state = RecognizerState::Active;
                    self.press = Some(Press {
                        position: event.position,
                        time_ms: event.time_ms,
                    });
                    return DoubleTapOutput::Pending;
                }
                self.start_press(event);
                DoubleTapOutput::Pending
            }
            GesturePhase::Active => match self.press {
                Some(press) if !within(press.position, event.position, self.config.tap_slop) => {
                    self.fail_output()
                }
                _ => DoubleTapOutput::Pending,
            },
            GesturePhase::Ended => {
                let Some(press) = self.press.take() else {
                    return DoubleTapOutput::Pending;
                };
                let held = event.time_ms.saturating_sub(press.time_ms);
                if held > self.config.max_tap_duration_ms
                    || !within(press.position, event.position, self.config.tap_slop)
                {
                    return self.fail_output();
                }
                match self.first_tap.take() {
                    Some(first) => {
                        self.state = RecognizerState::Ended;
                        DoubleTapOutput::Recognized(first.position)
                    }
                    None => {
                        self.state = RecognizerState::Active;
                        self.first_tap = Some(Press {
                            position: press.position,
                            time_ms: event.time_ms,
                        });
                        DoubleTapOutput::Pending
                    }
                }
            }
            GesturePhase::Cancelled => self.fail_output(),
        }
    }

    /// Checks the double-tap window against `now_ms`.
    ///
    /// Returns [`DoubleTapOutput::Failed`] once the window after the first
    /// release elapses without a second press.
    pub fn poll(&mut self, now_ms: u64) -> DoubleTapOutput {
        match self.first_tap {
            Some(first)
                if self.press.is_none()
                    && now_ms.saturating_sub(first.time_ms) > self.config.double_tap_window_ms =>
            {
                self.fail_output()
            }
            _ => DoubleTapOutput::Pending,
        }
    }

    /// Abandons any sequence in progress.
    pub fn fail(&mut self) {
        if self.is_possible() {
            self.state = RecognizerState::Cancelled;
        }
        self.press = None;
        self.first_tap = None;
    }

    /// Returns to idle.
    pub fn reset(&mut self) {
        self.state = RecognizerState::Idle;
        self.press = None;
        self.first_tap = None;
    }

    fn start_press(&mut self, event: &TapEvent) {
        self.state = RecognizerState::Began;
        self.press = Some(Press {
            position: event.position,
            time_ms: event.time_ms,
        });
    }

    fn fail_output(&mut self) -> DoubleTapOutput {
        let was_possible = self.is_possible();
        self.fail();
        if was_possible {
            DoubleTapOutput::Failed
        } else {
            DoubleTapOutput::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::{DoubleTapOutput, DoubleTapRecognizer, SingleTapRecognizer, TapConfig};
    use crate::event::{GesturePhase, RecognizerState, TapEvent};

    fn ev(phase: GesturePhase, x: f64, y: f64, t: u64) -> TapEvent {
        TapEvent {
            phase,
            position: Point::new(x, y),
            time_ms: t,
        }
    }

    #[test]
    fn quick_press_release_is_a_tap() {
        let mut tap = SingleTapRecognizer::new(TapConfig::default());
        assert_eq!(tap.handle(&ev(GesturePhase::Began, 10.0, 10.0, 0)), None);
        assert_eq!(
            tap.handle(&ev(GesturePhase::Ended, 12.0, 11.0, 80)),
            Some(Point::new(10.0, 10.0))
        );
        assert_eq!(tap.state(), RecognizerState::Ended);
    }

    #[test]
    fn long_press_is_not_a_tap() {
        let mut tap = SingleTapRecognizer::new(TapConfig::default());
        tap.handle(&ev(GesturePhase::Began, 10.0, 10.0, 0));
        assert_eq!(tap.handle(&ev(GesturePhase::Ended, 10.0, 10.0, 900)), None);
        assert_eq!(tap.state(), RecognizerState::Cancelled);
    }

    #[test]
    fn moving_beyond_slop_fails_the_tap() {
        let mut tap = SingleTapRecognizer::new(TapConfig::default());
        tap.handle(&ev(GesturePhase::Began, 0.0, 0.0, 0));
        tap.handle(&ev(GesturePhase::Active, 50.0, 0.0, 20));
        assert_eq!(tap.state(), RecognizerState::Cancelled);
        assert_eq!(tap.handle(&ev(GesturePhase::Ended, 0.0, 0.0, 40)), None);
    }

    #[test]
    fn two_quick_taps_are_recognized() {
        let mut dbl = DoubleTapRecognizer::new(TapConfig::default());
        assert_eq!(
            dbl.handle(&ev(GesturePhase::Began, 100.0, 100.0, 0)),
            DoubleTapOutput::Pending
        );
        assert_eq!(
            dbl.handle(&ev(GesturePhase::Ended, 100.0, 100.0, 60)),
            DoubleTapOutput::Pending
        );
        assert!(dbl.is_waiting_for_second_tap());
        assert_eq!(dbl.poll(200), DoubleTapOutput::Pending);
        dbl.handle(&ev(GesturePhase::Began, 104.0, 98.0, 200));
        assert_eq!(
            dbl.handle(&ev(GesturePhase::Ended, 104.0, 98.0, 250)),
            DoubleTapOutput::Recognized(Point::new(100.0, 100.0))
        );
        assert_eq!(dbl.state(), RecognizerState::Ended);
        assert!(!dbl.is_possible());
    }

    #[test]
    fn window_expiry_fails() {
        let mut dbl = DoubleTapRecognizer::new(TapConfig::default());
        dbl.handle(&ev(GesturePhase::Began, 0.0, 0.0, 0));
        dbl.handle(&ev(GesturePhase::Ended, 0.0, 0.0, 50));
        assert_eq!(dbl.poll(350), DoubleTapOutput::Pending);
        assert_eq!(dbl.poll(351), DoubleTapOutput::Failed);
        assert_eq!(dbl.state(), RecognizerState::Cancelled);
        assert_eq!(dbl.poll(1_000), DoubleTapOutput::Pending);
    }

    #[test]
    fn distant_second_press_fails_and_restarts() {
        let mut dbl = DoubleTapRecognizer::new(TapConfig::default());
        dbl.handle(&ev(GesturePhase::Began, 0.0, 0.0, 0));
        dbl.handle(&ev(GesturePhase::Ended, 0.0, 0.0, 50));
        assert_eq!(
            dbl.handle(&ev(GesturePhase::Began, 200.0, 0.0, 100)),
            DoubleTapOutput::Failed
        );
        // The distant press is the first tap of a fresh sequence.
        dbl.handle(&ev(GesturePhase::Ended, 200.0, 0.0, 150));
        dbl.handle(&ev(GesturePhase::Began, 201.0, 0.0, 250));
        assert_eq!(
            dbl.handle(&ev(GesturePhase::Ended, 201.0, 0.0, 300)),
            DoubleTapOutput::Recognized(Point::new(200.0, 0.0))
        );
    }

    #[test]
    fn non_finite_release_fails_both_recognizers() {
        let mut tap = SingleTapRecognizer::new(TapConfig::default());
        let mut dbl = DoubleTapRecognizer::new(TapConfig::default());
        let press = ev(GesturePhase::Began, 10.0, 10.0, 0);
        let release = ev(GesturePhase::Ended, f64::NAN, 10.0, 40);
        tap.handle(&press);
        dbl.handle(&press);
        assert_eq!(tap.handle(&release), None);
        assert_eq!(tap.state(), RecognizerState::Cancelled);
        assert_eq!(dbl.handle(&release), DoubleTapOutput::Failed);
        assert!(!dbl.is_possible());
    }
}

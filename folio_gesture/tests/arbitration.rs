// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `folio_gesture` crate.
//!
//! These feed event streams through an [`Arbiter`] (directly, or via a
//! [`TouchTracker`]) and check what ends up committed and recognized.

use folio_gesture::{
    Arbiter, GestureEvent, GesturePhase, GestureSet, Recognized, TouchPhase, TouchPoint,
    TouchTracker,
};
use folio_view::{
    SpringConfig, TransformState, TransformUpdate, Transition, ViewportTransform, ZoomLimits,
    compute_boundary,
};
use kurbo::{Point, Size, Vec2};
use proptest::prelude::*;

fn view() -> TransformState {
    TransformState::new(
        Size::new(375.0, 667.0),
        ZoomLimits::default(),
        SpringConfig::default(),
    )
}

fn count(results: &[Recognized], pred: impl Fn(&Recognized) -> bool) -> usize {
    results.iter().filter(|r| pred(r)).count()
}

#[test]
fn tap_tap_is_one_double_and_no_single() {
    let mut arbiter = Arbiter::default();
    let mut view = view();
    let p = Point::new(100.0, 100.0);
    let mut seen = Vec::new();
    for (phase, t) in [
        (GesturePhase::Began, 0),
        (GesturePhase::Ended, 60),
        (GesturePhase::Began, 180),
        (GesturePhase::Ended, 240),
    ] {
        seen.extend(arbiter.handle(&GestureEvent::tap(phase, p, t), &mut view));
        seen.extend(arbiter.poll(t + 10));
    }
    seen.extend(arbiter.poll(10_000));

    assert_eq!(count(&seen, |r| matches!(r, Recognized::DoubleTap(_))), 1);
    assert_eq!(count(&seen, |r| matches!(r, Recognized::SingleTap(_))), 0);
}

#[test]
fn distant_second_tap_is_two_singles() {
    let mut arbiter = Arbiter::default();
    let mut view = view();
    let mut seen = Vec::new();
    let a = Point::new(50.0, 50.0);
    let b = Point::new(300.0, 600.0);
    for (phase, at, t) in [
        (GesturePhase::Began, a, 0),
        (GesturePhase::Ended, a, 60),
        (GesturePhase::Began, b, 180),
        (GesturePhase::Ended, b, 240),
    ] {
        seen.extend(arbiter.handle(&GestureEvent::tap(phase, at, t), &mut view));
    }
    seen.extend(arbiter.poll(10_000));
    assert_eq!(seen, [Recognized::SingleTap(a), Recognized::SingleTap(b)]);
}

#[test]
fn pan_during_first_tap_window_drops_the_tap() {
    let mut arbiter = Arbiter::default();
    let mut view = view();
    let p = Point::new(100.0, 100.0);
    arbiter.handle(&GestureEvent::tap(GesturePhase::Began, p, 0), &mut view);
    arbiter.handle(&GestureEvent::tap(GesturePhase::Ended, p, 50), &mut view);
    assert!(arbiter.has_pending_single_tap());

    arbiter.handle(&GestureEvent::pan(GesturePhase::Began, p, 1, 100), &mut view);
    assert!(!arbiter.has_pending_single_tap());
    assert_eq!(arbiter.active(), GestureSet::PAN);
    assert_eq!(arbiter.poll(1_000), None);
}

#[test]
fn touch_tracker_drag_pans_when_zoomed() {
    let mut tracker = TouchTracker::default();
    let mut arbiter = Arbiter::default();
    let mut view = view();
    view.set_transform(
        TransformUpdate::to(ViewportTransform::new(2.0, 0.0, 0.0)),
        Transition::Immediate,
    );
    let mut feed = |touch: TouchPoint, view: &mut TransformState| {
        let events = tracker.handle(&touch);
        arbiter.handle_frame(events, view)
    };
    let touch = |phase, x, y, t| TouchPoint::new(1, phase, Point::new(x, y), t);

    feed(touch(TouchPhase::Down, 100.0, 300.0, 0), &mut view);
    // Within slop: still a tap candidate.
    feed(touch(TouchPhase::Move, 104.0, 300.0, 8), &mut view);
    assert_eq!(view.transform().translate, Vec2::ZERO);

    feed(touch(TouchPhase::Move, 130.0, 300.0, 16), &mut view);
    assert_eq!(view.transform().translate, Vec2::new(30.0, 0.0));
    feed(touch(TouchPhase::Move, 150.0, 320.0, 32), &mut view);
    assert_eq!(view.transform().translate, Vec2::new(50.0, 20.0));

    let done = feed(touch(TouchPhase::Up, 150.0, 320.0, 48), &mut view);
    assert_eq!(done.as_slice(), [Recognized::PanEnded]);
    assert_eq!(view.transform().scale, 2.0);
}

#[derive(Clone, Debug)]
enum Step {
    Pinch(u8, f64, f64, f64),
    Pan(u8, f64, f64, u8),
}

fn phase(code: u8) -> GesturePhase {
    match code % 5 {
        0 => GesturePhase::Began,
        1 | 2 => GesturePhase::Active,
        3 => GesturePhase::Ended,
        _ => GesturePhase::Cancelled,
    }
}

/// Mostly ordinary values, sometimes NaN or an infinity.
fn value(range: core::ops::Range<f64>) -> impl Strategy<Value = f64> {
    prop_oneof![
        12 => range,
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
        1 => Just(f64::NEG_INFINITY),
    ]
}

fn step() -> impl Strategy<Value = Step> {
    let coord = || value(-1000.0..1500.0);
    prop_oneof![
        (any::<u8>(), coord(), coord(), value(0.0..50.0))
            .prop_map(|(p, x, y, s)| Step::Pinch(p, x, y, s)),
        (any::<u8>(), coord(), coord(), 1_u8..3).prop_map(|(p, x, y, n)| Step::Pan(p, x, y, n)),
    ]
}

proptest! {
    #[test]
    fn arbitrary_pinch_pan_streams_stay_in_bounds(
        frames in prop::collection::vec(prop::collection::vec(step(), 1..4), 1..60),
    ) {
        let mut arbiter = Arbiter::default();
        let mut view = view();
        for (i, frame) in frames.into_iter().enumerate() {
            let t = i as u64 * 16;
            let events = frame.into_iter().map(|s| match s {
                Step::Pinch(p, x, y, s) => GestureEvent::pinch(phase(p), Point::new(x, y), s, t),
                Step::Pan(p, x, y, n) => GestureEvent::pan(phase(p), Point::new(x, y), n, t),
            });
            arbiter.handle_frame(events, &mut view);
            let v = view.transform();
            prop_assert!((0.8..=4.0).contains(&v.scale), "scale {}", v.scale);
            prop_assert!(compute_boundary(v.scale, view.viewport()).contains(v.translate));
        }

        // Terminal phases finish gestures even when their values are unusable.
        let nan = Point::new(f64::NAN, f64::NAN);
        let t = 10_000;
        arbiter.handle(&GestureEvent::pan(GesturePhase::Cancelled, nan, 1, t), &mut view);
        arbiter.handle(&GestureEvent::pinch(GesturePhase::Ended, nan, f64::NAN, t), &mut view);
        arbiter.handle(&GestureEvent::tap(GesturePhase::Cancelled, nan, t), &mut view);
        prop_assert!(arbiter.active().is_empty(), "left active: {:?}", arbiter.active());
        let v = view.transform();
        prop_assert!((0.8..=4.0).contains(&v.scale));
        prop_assert!(compute_boundary(v.scale, view.viewport()).contains(v.translate));
    }

    #[test]
    fn cancelling_everything_restores_the_starting_transform(
        scale in 0.8..4.0_f64,
        steps in prop::collection::vec(step(), 1..30),
        via_events in any::<bool>(),
    ) {
        let mut arbiter = Arbiter::default();
        let mut view = view();
        let start = view.set_transform(
            TransformUpdate::none().with_scale(scale),
            Transition::Immediate,
        );
        let focal = Point::new(187.5, 333.5);
        arbiter.handle(&GestureEvent::pinch(GesturePhase::Began, focal, 1.0, 0), &mut view);
        arbiter.handle(&GestureEvent::pan(GesturePhase::Began, focal, 2, 0), &mut view);
        for s in steps {
            // Only in-gesture updates; no ends or cancels mid-stream.
            let event = match s {
                Step::Pinch(_, x, y, s) => {
                    GestureEvent::pinch(GesturePhase::Active, Point::new(x, y), s, 16)
                }
                Step::Pan(_, x, y, _) => {
                    GestureEvent::pan(GesturePhase::Active, Point::new(x, y), 2, 16)
                }
            };
            arbiter.handle(&event, &mut view);
        }
        if via_events {
            let nan = Point::new(f64::NAN, f64::INFINITY);
            let pan = GestureEvent::pan(GesturePhase::Cancelled, nan, 2, 32);
            let pinch = GestureEvent::pinch(GesturePhase::Cancelled, nan, f64::NAN, 32);
            arbiter.handle(&pan, &mut view);
            arbiter.handle(&pinch, &mut view);
        } else {
            arbiter.cancel_all(&mut view);
        }
        prop_assert_eq!(view.transform(), start);
        prop_assert!(arbiter.active().is_empty());
    }
}

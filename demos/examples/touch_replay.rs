// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw touch replay.
//!
//! Feeds individual contacts through the engine's touch tracker: a
//! two-finger spread (pinch), a one-finger drag (pan), and an interruption
//! by the app moving to the background mid-gesture.
//!
//! Run:
//! - `cargo run -p folio_demos --example touch_replay`

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use folio_demos::{Book, LoggingHost, init_tracing};
use folio_reader::{
    AppLifecycle, LifecycleNotifier, ReaderConfig, ReaderEngine, TouchPhase, TouchPoint,
};
use kurbo::{Point, Size};

/// Lifecycle changes posted by the "platform" (here: the script below).
#[derive(Clone, Debug, Default)]
struct Lifecycle(Rc<RefCell<VecDeque<AppLifecycle>>>);

impl LifecycleNotifier for Lifecycle {
    fn next_change(&mut self) -> Option<AppLifecycle> {
        self.0.borrow_mut().pop_front()
    }
}

fn touch(id: u64, phase: TouchPhase, x: f64, y: f64, t: u64) -> TouchPoint {
    TouchPoint::new(id, phase, Point::new(x, y), t)
}

fn main() {
    init_tracing();

    let lifecycle = Lifecycle::default();
    let mut reader = ReaderEngine::new(
        ReaderConfig::default(),
        Size::new(375.0, 667.0),
        Book::with_pages(1),
        LoggingHost::default(),
        lifecycle.clone(),
    );

    // Spread two fingers from 100 px apart to 250 px apart.
    reader.handle_touch(&touch(1, TouchPhase::Down, 137.5, 333.5, 0));
    reader.handle_touch(&touch(2, TouchPhase::Down, 237.5, 333.5, 0));
    for step in 1..=5_u32 {
        let half = 50.0 + 15.0 * f64::from(step);
        let t = u64::from(step) * 16;
        reader.handle_touch(&touch(1, TouchPhase::Move, 187.5 - half, 333.5, t));
        reader.handle_touch(&touch(2, TouchPhase::Move, 187.5 + half, 333.5, t));
        println!("spread {:>3.0}px: {:?}", half * 2.0, reader.transform());
    }
    reader.handle_touch(&touch(2, TouchPhase::Up, 312.5, 333.5, 100));

    // The remaining finger keeps panning.
    for step in 1..=4_u32 {
        let t = 100 + u64::from(step) * 16;
        let y = 333.5 - 40.0 * f64::from(step);
        reader.handle_touch(&touch(1, TouchPhase::Move, 62.5, y, t));
    }
    reader.handle_touch(&touch(1, TouchPhase::Up, 62.5, 173.5, 200));
    println!("after drag: {:?}", reader.transform());
    let settled = reader.transform();

    // A new drag is interrupted by the app going to the background.
    reader.handle_touch(&touch(3, TouchPhase::Down, 200.0, 200.0, 400));
    reader.handle_touch(&touch(3, TouchPhase::Move, 260.0, 260.0, 416));
    println!("mid drag: {:?}", reader.transform());
    lifecycle.0.borrow_mut().push_back(AppLifecycle::Background);
    reader.advance(432);
    println!("after background: {:?}", reader.transform());
    assert_eq!(reader.transform(), settled);
}

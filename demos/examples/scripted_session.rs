// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted reader session.
//!
//! Replays a short gesture script against a `ReaderEngine` and prints the
//! committed transform after each step: pinch past the zoom limit, pan into
//! the edge, double tap, a lone tap, then turn pages.
//!
//! Run:
//! - `cargo run -p folio_demos --example scripted_session`
//! - `RUST_LOG=trace cargo run -p folio_demos --example scripted_session` for per-frame detail

use folio_demos::{Book, LoggingHost, init_tracing};
use folio_reader::{
    GestureEvent, GesturePhase, NoLifecycle, PageContent, ReaderConfig, ReaderEngine,
};
use kurbo::{Point, Size};

/// Partial config: the rest falls back to defaults.
const CONFIG: &str = r#"{ "max_zoom": 3.0, "double_tap_zoom": 2.0 }"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config: ReaderConfig = serde_json::from_str(CONFIG)?;
    let mut book = Book::with_pages(3);
    book.set_page(
        2,
        PageContent::Failed {
            message: "network unreachable".into(),
        },
    );
    let mut reader = ReaderEngine::try_new(
        config,
        Size::new(375.0, 667.0),
        book,
        LoggingHost::default(),
        NoLifecycle,
    )?;

    let focal = Point::new(200.0, 300.0);
    reader.handle_event(GestureEvent::pinch(GesturePhase::Began, focal, 1.0, 0));
    for (i, ratio) in [1.5, 2.5, 4.0, 5.0].into_iter().enumerate() {
        let t = 16 * (i as u64 + 1);
        reader.handle_event(GestureEvent::pinch(GesturePhase::Active, focal, ratio, t));
        println!("pinch ratio {ratio}: {:?}", reader.transform());
    }
    reader.handle_event(GestureEvent::pinch(GesturePhase::Ended, focal, 5.0, 100));

    reader.handle_event(GestureEvent::pan(GesturePhase::Began, Point::ZERO, 1, 200));
    reader.handle_event(GestureEvent::pan(GesturePhase::Active, Point::new(900.0, 900.0), 1, 216));
    reader.handle_event(GestureEvent::pan(GesturePhase::Ended, Point::new(900.0, 900.0), 1, 232));
    println!("pan into the corner: {:?}", reader.transform());

    // Already zoomed past the reset threshold: the double tap springs back.
    let mut t = 1_000;
    for press in [t, t + 120] {
        reader.handle_event(GestureEvent::tap(GesturePhase::Began, focal, press));
        reader.handle_event(GestureEvent::tap(GesturePhase::Ended, focal, press + 40));
    }
    t += 200;
    let mut frames = 0;
    while reader.advance(t) {
        t += 16;
        frames += 1;
    }
    println!("double tap settled after {frames} frames: {:?}", reader.transform());

    // A lone tap waits out the double-tap window, then toggles chrome.
    t += 500;
    reader.handle_event(GestureEvent::tap(GesturePhase::Began, focal, t));
    reader.handle_event(GestureEvent::tap(GesturePhase::Ended, focal, t + 40));
    while reader.advance(t) {
        t += 16;
    }
    println!("chrome toggles: {}", reader.host().chrome_toggles);

    while reader.go_to_next() {
        println!("page {}: {:?}", reader.current_page(), reader.page_view());
    }
    reader.dismiss_error();
    println!("after dismiss: {:?}", reader.page_view());
    reader.retry();
    println!("after retry: {:?}", reader.page_view());

    reader.close();
    Ok(())
}

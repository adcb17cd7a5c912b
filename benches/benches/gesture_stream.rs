// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use folio_gesture::{Arbiter, GestureEvent, GesturePhase, TouchPhase, TouchPoint, TouchTracker};
use folio_reader::{NoLifecycle, PageContent, PageSource, ReaderConfig, ReaderEngine, ReaderHost};
use folio_view::{SpringConfig, TransformState, ZoomLimits};
use kurbo::{Point, Size, Vec2};

const VIEWPORT: Size = Size::new(375.0, 667.0);

struct Pages;

impl PageSource for Pages {
    type Image = u32;

    fn page_count(&self) -> usize {
        16
    }

    fn page(&self, index: usize) -> PageContent<u32> {
        PageContent::Ready(index as u32)
    }
}

struct Host;

impl ReaderHost for Host {
    fn on_page_change(&mut self, index: usize) {
        black_box(index);
    }
}

/// One frame of a two-finger pinch that also drifts: a pinch and a pan event.
fn pinch_pan_frames(len: usize) -> Vec<[GestureEvent; 2]> {
    let start = Point::new(180.0, 320.0);
    (0..len)
        .map(|i| {
            let f = i as f64 / len as f64;
            let focal = start + Vec2::new(40.0 * f, -25.0 * f);
            let t = i as u64 * 16;
            [
                GestureEvent::pan(GesturePhase::Active, focal, 2, t),
                GestureEvent::pinch(GesturePhase::Active, focal, 1.0 + 4.0 * f, t),
            ]
        })
        .collect()
}

fn bench_arbiter(c: &mut Criterion) {
    let mut group = c.benchmark_group("arbiter/pinch_pan_frames");

    for len in [60_usize, 600, 6_000] {
        let frames = pinch_pan_frames(len);
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::from_parameter(len), &frames, |b, frames| {
            b.iter_batched(
                || {
                    let view = TransformState::new(
                        VIEWPORT,
                        ZoomLimits::default(),
                        SpringConfig::default(),
                    );
                    (Arbiter::default(), view)
                },
                |(mut arbiter, mut view)| {
                    let focal = Point::new(180.0, 320.0);
                    let began = [
                        GestureEvent::pinch(GesturePhase::Began, focal, 1.0, 0),
                        GestureEvent::pan(GesturePhase::Began, focal, 2, 0),
                    ];
                    arbiter.handle_frame(began, &mut view);
                    for frame in frames {
                        black_box(arbiter.handle_frame(frame.iter().copied(), &mut view));
                    }
                    black_box(view.transform());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_touch_tracker(c: &mut Criterion) {
    let mut group = c.benchmark_group("touch_tracker/two_finger");

    for len in [60_usize, 600] {
        let touches: Vec<TouchPoint> = (0..len)
            .flat_map(|i| {
                let spread = 50.0 + i as f64;
                let t = i as u64 * 16;
                [
                    TouchPoint::new(1, TouchPhase::Move, Point::new(187.0 - spread, 333.0), t),
                    TouchPoint::new(2, TouchPhase::Move, Point::new(187.0 + spread, 333.0), t),
                ]
            })
            .collect();
        group.throughput(Throughput::Elements(touches.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(len), &touches, |b, touches| {
            b.iter_batched(
                || {
                    let mut tracker = TouchTracker::default();
                    for (id, x) in [(1, 137.0), (2, 237.0)] {
                        let down = Point::new(x, 333.0);
                        tracker.handle(&TouchPoint::new(id, TouchPhase::Down, down, 0));
                    }
                    tracker
                },
                |mut tracker| {
                    for touch in touches {
                        black_box(tracker.handle(touch));
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_engine_session(c: &mut Criterion) {
    let frames = pinch_pan_frames(120);
    c.bench_function("engine/pinch_then_double_tap", |b| {
        b.iter_batched(
            || ReaderEngine::new(ReaderConfig::default(), VIEWPORT, Pages, Host, NoLifecycle),
            |mut reader| {
                let focal = Point::new(180.0, 320.0);
                reader.handle_event(GestureEvent::pinch(GesturePhase::Began, focal, 1.0, 0));
                for frame in &frames {
                    reader.handle_frame(frame.iter().copied());
                }
                reader.handle_event(GestureEvent::pinch(GesturePhase::Ended, focal, 5.0, 2_000));

                let mut t = 3_000;
                for press in [t, t + 120] {
                    reader.handle_event(GestureEvent::tap(GesturePhase::Began, focal, press));
                    reader.handle_event(GestureEvent::tap(GesturePhase::Ended, focal, press + 40));
                }
                while reader.advance(t) {
                    t += 16;
                }
                black_box(reader.transform());
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_arbiter, bench_touch_tracker, bench_engine_session);
criterion_main!(benches);

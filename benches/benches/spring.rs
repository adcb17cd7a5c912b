// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use folio_view::{
    SpringConfig, TransformState, TransformUpdate, Transition, ViewportTransform, ZoomLimits,
};
use kurbo::Size;

fn bench_settle(c: &mut Criterion) {
    let mut group = c.benchmark_group("spring/settle");

    // Long frames subdivide into more integration steps.
    for frame_ms in [8_u32, 16, 33, 100] {
        let dt = f64::from(frame_ms) / 1000.0;
        group.bench_with_input(BenchmarkId::from_parameter(frame_ms), &dt, |b, &dt| {
            b.iter_batched(
                || {
                    let mut view = TransformState::new(
                        Size::new(375.0, 667.0),
                        ZoomLimits::default(),
                        SpringConfig::default(),
                    );
                    view.set_transform(
                        TransformUpdate::to(ViewportTransform::new(2.5, 120.0, -200.0)),
                        Transition::Animated,
                    );
                    view
                },
                |mut view| {
                    while view.advance(dt) {}
                    black_box(view.transform());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_settle);
criterion_main!(benches);

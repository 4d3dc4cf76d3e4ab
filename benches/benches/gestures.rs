// Copyright 2025 the Kintree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport controller throughput on long drag, pinch, and wheel streams.

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kintree_view::{InputEvent, TouchPhase, TreeViewController, ViewConfig};
use kurbo::Point;
use smallvec::smallvec;

fn drag_stream(steps: u32) -> Vec<InputEvent> {
    let mut events = vec![InputEvent::PointerDown {
        position: Point::new(100.0, 100.0),
    }];
    for i in 0..steps {
        let t = f64::from(i);
        events.push(InputEvent::PointerMove {
            position: Point::new(100.0 + t, 100.0 + 0.5 * t),
        });
    }
    events.push(InputEvent::PointerUp {
        position: Point::new(100.0 + f64::from(steps), 100.0),
    });
    events
}

fn pinch_stream(steps: u32) -> Vec<InputEvent> {
    let mut events = vec![InputEvent::Touch {
        phase: TouchPhase::Start,
        contacts: smallvec![Point::new(400.0, 300.0), Point::new(500.0, 300.0)],
    }];
    for i in 0..steps {
        let spread = 50.0 + f64::from(i % 200);
        events.push(InputEvent::Touch {
            phase: TouchPhase::Move,
            contacts: smallvec![
                Point::new(450.0 - spread, 300.0),
                Point::new(450.0 + spread, 300.0)
            ],
        });
    }
    events.push(InputEvent::Touch {
        phase: TouchPhase::End,
        contacts: smallvec![],
    });
    events
}

fn wheel_stream(steps: u32) -> Vec<InputEvent> {
    (0..steps)
        .map(|i| InputEvent::Wheel {
            position: Point::new(300.0 + f64::from(i % 100), 200.0),
            delta_y: if i % 3 == 0 { 1.0 } else { -1.0 },
        })
        .collect()
}

fn bench_gestures(c: &mut Criterion) {
    let mut group = c.benchmark_group("kintree_view");
    for (name, events) in [
        ("drag", drag_stream(1000)),
        ("pinch", pinch_stream(1000)),
        ("wheel", wheel_stream(1000)),
    ] {
        group.bench_function(format!("{name}(events={})", events.len()), |b| {
            b.iter_batched(
                || TreeViewController::new(ViewConfig::default()),
                |mut ctl| {
                    for event in &events {
                        black_box(ctl.handle(event));
                    }
                    ctl
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_gestures);
criterion_main!(benches);

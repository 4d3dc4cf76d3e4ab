// Copyright 2025 the Kintree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout, scene construction, and tap resolution on synthetic family trees.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kintree_layout::{LayoutConfig, compute_layout};
use kintree_record::{BirthDate, PersonNode};
use kintree_scene::{Scene, SceneConfig};
use kurbo::Point;

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn next_u32(&mut self) -> u32 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn below(&mut self, upper_exclusive: u32) -> u32 {
        if upper_exclusive == 0 {
            return 0;
        }
        self.next_u32() % upper_exclusive
    }

    fn unit(&mut self) -> f64 {
        f64::from(self.next_u32()) / f64::from(u32::MAX)
    }
}

/// A tree `depth` generations deep where each person has up to `max_children`
/// children and about half of them have a partner.
fn family(rng: &mut Lcg, depth: u32, max_children: u32, next_id: &mut u32) -> PersonNode {
    let id = *next_id;
    *next_id += 1;
    let mut person = PersonNode::new(format!("p{id}"), format!("Person {id}"));
    if rng.below(2) == 0 {
        person = person.with_partner(format!("Partner {id}"));
    }
    if depth > 0 {
        for _ in 0..rng.below(max_children + 1) {
            person = person.with_child(family(rng, depth - 1, max_children, next_id));
        }
    }
    person
}

fn bench_layout(c: &mut Criterion) {
    let config = LayoutConfig::default();
    let scene_config = SceneConfig::default();
    let today = BirthDate::new(2025, 6, 1).unwrap();

    let mut group = c.benchmark_group("kintree_layout");
    for (depth, max_children) in [(3, 4), (5, 4), (7, 3)] {
        let mut next_id = 0;
        let tree = family(&mut Lcg(0x5eed), depth, max_children, &mut next_id);
        let n = tree.node_count();

        group.bench_function(format!("compute_layout(n={n})"), |b| {
            b.iter(|| black_box(compute_layout(black_box(&tree), &config)));
        });

        let layout = compute_layout(&tree, &config);
        group.bench_function(format!("scene_build(n={n})"), |b| {
            b.iter(|| black_box(Scene::build(black_box(&layout), &scene_config, today)));
        });

        let scene = Scene::build(&layout, &scene_config, today);
        let bounds = scene.bounds();
        let mut rng = Lcg(7);
        let taps: Vec<Point> = (0..256)
            .map(|_| {
                Point::new(
                    bounds.x0 + rng.unit() * bounds.width(),
                    bounds.y0 + rng.unit() * bounds.height(),
                )
            })
            .collect();
        group.bench_function(format!("card_at_x256(n={n})"), |b| {
            b.iter(|| {
                let mut hits = 0_usize;
                for &pt in &taps {
                    hits += usize::from(scene.card_at(black_box(pt)).is_some());
                }
                black_box(hits)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use minesweep_core::*;

const TIERS: [(&str, GameConfig); 3] = [
    ("beginner", GameConfig::BEGINNER),
    ("intermediate", GameConfig::INTERMEDIATE),
    ("expert", GameConfig::EXPERT),
];

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (name, config) in TIERS {
        let mut generator = RandomBoardGenerator::seeded(0x5eed);
        group.bench_function(name, |b| {
            b.iter(|| generator.generate(black_box(config)));
        });
    }
    group.finish();
}

fn bench_flood(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood");
    for side in [16, 64, 256] {
        let truth = TruthGrid::from_mine_coords((side, side), &[(side - 1, side - 1)])
            .expect("single corner mine fits");
        group.bench_function(format!("{side}x{side}"), |b| {
            b.iter(|| {
                let mut engine = RevealEngine::new(truth.clone());
                engine.reveal_at(black_box((0, 0)))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate, bench_flood);
criterion_main!(benches);

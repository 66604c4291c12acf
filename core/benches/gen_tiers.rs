use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use moyun_core::*;

fn grid_fill(c: &mut Criterion) {
    let table = DifficultyTable::default();
    let payload = GridFillPayload {
        target_word: "国泰民安".into(),
    };
    let mut group = c.benchmark_group("grid_fill");
    for tier in DifficultyTier::ALL {
        let Some(geometry) = table.geometry(GameKind::GridFill, tier) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::from_parameter(tier), &geometry, |b, &geometry| {
            let mut generator = RandomPuzzleGenerator::new(0);
            b.iter(|| generator.grid_fill(black_box(&payload), geometry));
        });
    }
    group.finish();
}

fn matrix_difference(c: &mut Criterion) {
    let table = DifficultyTable::default();
    let payload = MatrixDifferencePayload {
        base_glyph: "己".into(),
        variant_glyph: "已".into(),
        preset: None,
    };
    let mut group = c.benchmark_group("matrix_difference");
    for tier in DifficultyTier::ALL {
        let Some(geometry) = table.geometry(GameKind::MatrixDifference, tier) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::from_parameter(tier), &geometry, |b, &geometry| {
            let mut generator = RandomPuzzleGenerator::new(0);
            b.iter(|| generator.matrix_difference(black_box(&payload), geometry));
        });
    }
    group.finish();
}

fn pair_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("pair_matching");
    for pairs in [3u32, 5, 8] {
        let payload = PairMatchingPayload {
            items: (0..pairs)
                .flat_map(|i| {
                    [
                        PairItem {
                            id: i * 2 + 1,
                            text: format!("上句{}", i),
                            role: ItemRole::Upper,
                        },
                        PairItem {
                            id: i * 2 + 2,
                            text: format!("下句{}", i),
                            role: ItemRole::Lower,
                        },
                    ]
                })
                .collect(),
            correct_pairs: (0..pairs).map(|i| (i * 2 + 1, i * 2 + 2)).collect(),
        };
        group.bench_with_input(BenchmarkId::from_parameter(pairs), &payload, |b, payload| {
            let mut generator = RandomPuzzleGenerator::new(0);
            b.iter(|| generator.pair_matching(black_box(payload)));
        });
    }
    group.finish();
}

criterion_group!(benches, grid_fill, matrix_difference, pair_matching);
criterion_main!(benches);

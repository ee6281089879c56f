use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use sweepgrid_core::*;

fn first_reveal(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_reveal");

    for difficulty in Difficulty::ALL {
        let config = difficulty.config();
        let center = (config.width() / 2, config.height() / 2);

        group.bench_with_input(BenchmarkId::from_parameter(difficulty), &config, |b, &config| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                let mut grid = Grid::new(config, seed);
                black_box(grid.reveal(black_box(center)))
            });
        });
    }

    group.finish();
}

fn open_empty_grid(c: &mut Criterion) {
    let config = GameConfig::new_unchecked((Coord::MAX, Coord::MAX), 0);

    c.bench_function("flood_fill_full_grid", |b| {
        b.iter(|| {
            let mut grid = Grid::new(config, 0);
            black_box(grid.reveal(black_box((0, 0))))
        });
    });
}

criterion_group!(benches, first_reveal, open_empty_grid);
criterion_main!(benches);

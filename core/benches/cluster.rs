use std::hint::black_box;

use blockpop_core::*;
use criterion::{Criterion, criterion_group, criterion_main};

fn uniform_grid(size: Coord2) -> Grid {
    let kinds = ndarray::Array2::from_elem(size.to_nd_index(), BlockType(0));
    Grid::from_kinds(kinds, BlockFactory::from_seed(4, 0).unwrap()).unwrap()
}

fn bench_find_cluster(c: &mut Criterion) {
    let grid = uniform_grid((255, 255));
    c.bench_function("find_cluster 255x255 uniform", |b| {
        b.iter(|| grid.find_cluster(black_box((127, 127))).unwrap())
    });

    let grid = Grid::new(GridConfig::new_unchecked((64, 64), 3), {
        use rand::SeedableRng;
        rand::rngs::SmallRng::seed_from_u64(7)
    })
    .unwrap();
    c.bench_function("find_cluster 64x64 random", |b| {
        b.iter(|| grid.find_cluster(black_box((32, 32))).unwrap())
    });
}

fn bench_clear_and_refill(c: &mut Criterion) {
    c.bench_function("tap + refill 128x128 uniform", |b| {
        b.iter_batched(
            || uniform_grid((128, 128)),
            |mut grid| {
                grid.tap((0, 0)).unwrap();
                grid.compact_and_refill()
            },
            criterion::BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_find_cluster, bench_clear_and_refill);
criterion_main!(benches);

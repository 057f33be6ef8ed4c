use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gmaze::{
    generate::{
        algorithms::{DepthFirstSearch, Kruskals, Wilson},
        GenOptions, MazeAlgorithm,
    },
    graph::Maze,
    topology::OrthogonalGrid,
    Generator,
};

const SIZE: (i32, i32) = (30, 30);

fn generate(algorithm: impl MazeAlgorithm) -> Maze {
    let maze = Maze::new(&OrthogonalGrid::new(SIZE.0, SIZE.1));
    Generator::new(black_box(maze), algorithm, GenOptions::seeded(42))
        .unwrap()
        .generate()
        .unwrap()
}

pub fn kruskals(c: &mut Criterion) {
    c.bench_function("kruskals_30x30", |b| b.iter(|| generate(Kruskals::new())));
}

pub fn depth_first_search(c: &mut Criterion) {
    c.bench_function("dfs_30x30", |b| b.iter(|| generate(DepthFirstSearch::new())));
}

pub fn wilson(c: &mut Criterion) {
    c.bench_function("wilson_30x30", |b| b.iter(|| generate(Wilson::new())));
}

criterion_group! {name = benches; config = Criterion::default().sample_size(10); targets = kruskals, depth_first_search, wilson}
criterion_main!(benches);

//! Benchmarks for the search algorithms.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use traverso_algorithms::{AStarSearch, bfs, dfs, dijkstra};
use traverso_core::{Graph, GridSpec};

fn bench_grid() -> Graph {
    Graph::from_grid(&GridSpec {
        rows: 20,
        cols: 20,
        blocked: (2..18).map(|row| (row, 10)).collect(),
        start: (0, 0),
        end: (19, 19),
    })
}

fn bench_traversal(c: &mut Criterion) {
    let graph = bench_grid();
    let start = graph.start().unwrap();

    c.bench_function("dfs_grid_20x20", |b| {
        b.iter(|| black_box(dfs(&graph, start, None).unwrap()));
    });

    c.bench_function("bfs_grid_20x20", |b| {
        b.iter(|| black_box(bfs(&graph, start, None).unwrap()));
    });
}

fn bench_shortest_path(c: &mut Criterion) {
    let graph = bench_grid();
    let start = graph.start().unwrap();
    let end = graph.end().unwrap();

    c.bench_function("dijkstra_grid_20x20", |b| {
        b.iter(|| black_box(dijkstra(&graph, start, Some(end)).unwrap()));
    });

    c.bench_function("astar_grid_20x20", |b| {
        b.iter(|| {
            let search = AStarSearch::new(&graph, start, end).unwrap();
            black_box(search.run())
        });
    });
}

criterion_group!(benches, bench_traversal, bench_shortest_path);
criterion_main!(benches);

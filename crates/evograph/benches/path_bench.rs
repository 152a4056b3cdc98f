use criterion::{black_box, criterion_group, criterion_main, Criterion};
use evograph::{EvolvingGraph, TemporalBfsConfig};

/// A ring of `n` nodes where only one edge of the ring fires per timestamp.
fn rotating_ring(n: u32, timestamps: u32) -> EvolvingGraph<u32, u32> {
    let (nodes, steps) = (n as usize, timestamps as usize);
    let mut g = EvolvingGraph::with_capacity(true, nodes, steps, steps);
    for t in 0..timestamps {
        let i = t % n;
        g.add_edge(i, (i + 1) % n, t).unwrap();
    }
    g
}

fn bench_shortest_path(c: &mut Criterion) {
    let g = rotating_ring(1000, 10_000);

    c.bench_function("temporal_path_ring_1000x10000", |b| {
        b.iter(|| {
            g.shortest_temporal_distance(black_box((&0, &0)), black_box((&999, &9_999)))
                .unwrap()
        })
    });
}

fn bench_bfs(c: &mut Criterion) {
    let g = rotating_ring(100, 1_000);
    let source = g.state(&0, &0).unwrap();
    let config = TemporalBfsConfig::default().with_max_distance(500);

    c.bench_function("temporal_bfs_ring_100x1000", |b| {
        b.iter(|| g.temporal_bfs(black_box(source), black_box(config)).unwrap())
    });
}

criterion_group!(benches, bench_shortest_path, bench_bfs);
criterion_main!(benches);

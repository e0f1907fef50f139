//! Compares the three frontier matchers against the unidirectional baseline
//! on a random graph and a barbell graph.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pathmeet_core::{unidirectional_path, BidirectionalSearch, DenseGraph, Graph, MatchStrategy};

struct FastRng(u64);

impl FastRng {
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
}

fn random_graph(nodes: u64, edges: u64) -> Graph {
    let mut rng = FastRng(54321);
    let mut g = Graph::with_capacity(nodes as usize);
    for i in 0..nodes {
        g.add_node(i);
    }
    for _ in 0..edges {
        let (a, b) = (rng.next(nodes), rng.next(nodes));
        if a != b {
            g.add_edge(a, b);
        }
    }
    g
}

fn barbell(clique: u64, bridge: u64) -> Graph {
    let mut g = Graph::new();
    let mut rng = FastRng(99999);
    let b_start = clique + bridge;
    for base in [0, b_start] {
        for i in 0..clique {
            for _ in 0..10 {
                let j = rng.next(clique);
                if j != i {
                    g.add_edge(base + i, base + j);
                }
            }
        }
    }
    g.add_edge(clique - 1, clique);
    for i in clique..b_start {
        g.add_edge(i, i + 1);
    }
    g
}

fn bench_strategies(c: &mut Criterion) {
    let graphs = [
        ("random-20k", random_graph(20_000, 60_000), 0u64, 19_999u64),
        ("barbell-10k", barbell(5_000, 10), 0, 10_009),
    ];

    for (name, graph, root, target) in &graphs {
        let dense = DenseGraph::from_graph(graph);
        let mut group = c.benchmark_group(*name);

        group.bench_function("unidirectional", |b| {
            b.iter(|| black_box(unidirectional_path(graph, *root, *target).unwrap()))
        });

        for strategy in MatchStrategy::ALL {
            let mut engine = BidirectionalSearch::new(&dense, strategy).unwrap();
            group.bench_with_input(BenchmarkId::new("bidirectional", strategy), &strategy, |b, _| {
                b.iter(|| black_box(engine.shortest_path(*root, *target).unwrap()))
            });
        }
        group.finish();
    }
}

criterion_group!(benches, bench_strategies);
criterion_main!(benches);

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use sql_toposort::graph::DependencyGraph;
use std::hint::black_box;

/// Build a layered schema: each table references a handful of tables in the
/// previous layer, roughly what a large relational schema looks like.
fn generate_layered_deps(tables: usize) -> Vec<(String, Vec<String>)> {
    let layer_size = 10;
    (0..tables)
        .map(|i| {
            let name = format!("table_{}", i);
            let deps = if i >= layer_size {
                let base = (i / layer_size - 1) * layer_size;
                (0..3).map(|k| format!("table_{}", base + (i + k) % layer_size)).collect()
            } else {
                Vec::new()
            };
            (name, deps)
        })
        .collect()
}

fn bench_topo_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("topo_sort");

    for &tables in &[100usize, 1_000, 5_000] {
        let deps = generate_layered_deps(tables);
        let entries: Vec<(&str, Vec<&str>)> = deps
            .iter()
            .map(|(n, d)| (n.as_str(), d.iter().map(|s| s.as_str()).collect()))
            .collect();
        let graph = DependencyGraph::from_deps(entries.clone());

        group.bench_with_input(BenchmarkId::new("sort", tables), &graph, |b, g| {
            b.iter(|| black_box(g.topo_sort().unwrap()))
        });

        group.bench_with_input(BenchmarkId::new("build_and_sort", tables), &entries, |b, e| {
            b.iter(|| {
                let g = DependencyGraph::from_deps(e.clone());
                black_box(g.topo_sort().unwrap())
            })
        });
    }

    group.finish();
}

fn bench_cycle_detection(c: &mut Criterion) {
    let deps = generate_layered_deps(5_000);
    let entries: Vec<(&str, Vec<&str>)> = deps
        .iter()
        .map(|(n, d)| (n.as_str(), d.iter().map(|s| s.as_str()).collect()))
        .collect();
    let graph = DependencyGraph::from_deps(entries);

    c.bench_function("has_cycle_5000", |b| {
        b.iter(|| black_box(graph.has_cycle()))
    });
}

criterion_group!(benches, bench_topo_sort, bench_cycle_detection);

criterion_main!(benches);

//! Benchmarks for constraint-graph construction and topological ordering.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use recon_temporal::{
    build_trees_with_temporal_order, topological_order, EdgeDescriptor, EdgeTree, Event,
    MappingPair, Reconciliation, TemporalGraph, TreeKind, TOP_NODE,
};

/// Caterpillar tree with `n` internal nodes: each internal node has one
/// leaf child and one internal child, except the last, which has two
/// leaves.
fn caterpillar(kind: TreeKind, prefix: &str, n: usize) -> EdgeTree {
    fn spine(prefix: &str, parent: String, depth: usize, n: usize) -> EdgeDescriptor {
        let name = format!("{prefix}{depth}");
        let leaf = EdgeDescriptor::leaf(name.clone(), format!("{prefix}{depth}x"));
        if depth + 1 == n {
            let last = EdgeDescriptor::leaf(name.clone(), format!("{prefix}{depth}y"));
            EdgeDescriptor {
                parent,
                child: name,
                left: Some(Box::new(leaf)),
                right: Some(Box::new(last)),
            }
        } else {
            let next = spine(prefix, name.clone(), depth + 1, n);
            EdgeDescriptor {
                parent,
                child: name,
                left: Some(Box::new(leaf)),
                right: Some(Box::new(next)),
            }
        }
    }

    let mut tree = EdgeTree::new(kind);
    let root = spine(prefix, TOP_NODE.to_string(), 0, n);

    // Register every edge under its child name.
    let mut pending = vec![&root];
    let mut edges = Vec::new();
    while let Some(descriptor) = pending.pop() {
        edges.push((descriptor.child.clone(), descriptor.clone()));
        if let Some((left, right)) = descriptor.children() {
            pending.push(left);
            pending.push(right);
        }
    }
    for (name, descriptor) in edges {
        tree.insert(name, descriptor);
    }
    tree
}

/// Parasite spine duplicating down the host spine, one mapping per level.
fn spine_reconciliation(n: usize) -> Reconciliation {
    let mut recon = Reconciliation::new();
    for depth in 0..n {
        recon.insert(
            MappingPair::new(format!("p{depth}"), format!("h{depth}")),
            vec![Event::Duplication],
        );
    }
    recon
}

fn bench_build_graph(c: &mut Criterion) {
    let host = caterpillar(TreeKind::Host, "h", 200);
    let parasite = caterpillar(TreeKind::Parasite, "p", 200);
    let recon = spine_reconciliation(200);

    c.bench_function("build_temporal_graph_200", |b| {
        b.iter(|| {
            TemporalGraph::build(black_box(&host), black_box(&parasite), black_box(&recon))
                .unwrap()
        })
    });
}

fn bench_topological_order(c: &mut Criterion) {
    let host = caterpillar(TreeKind::Host, "h", 200);
    let parasite = caterpillar(TreeKind::Parasite, "p", 200);
    let recon = spine_reconciliation(200);
    let graph = TemporalGraph::build(&host, &parasite, &recon).unwrap();

    c.bench_function("topological_order_200", |b| {
        b.iter(|| topological_order(black_box(&graph)).unwrap())
    });
}

fn bench_end_to_end(c: &mut Criterion) {
    let host = caterpillar(TreeKind::Host, "h", 100);
    let parasite = caterpillar(TreeKind::Parasite, "p", 100);
    let recon = spine_reconciliation(100);

    c.bench_function("build_trees_with_temporal_order_100", |b| {
        b.iter(|| {
            build_trees_with_temporal_order(
                black_box(&host),
                black_box(&parasite),
                black_box(&recon),
            )
            .unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_build_graph,
    bench_topological_order,
    bench_end_to_end
);
criterion_main!(benches);

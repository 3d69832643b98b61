use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use shardkit::ring::Ring;

fn populated_ring(nodes: usize) -> Ring<String> {
    let ring = Ring::new(50).unwrap();
    for i in 0..nodes {
        ring.add(format!("node-{}", i));
    }
    ring
}

fn bench_get(c: &mut Criterion) {
    for nodes in [8usize, 32, 128] {
        c.bench_function(&format!("ring_get_{}_nodes", nodes), |b| {
            let ring = populated_ring(nodes);
            let mut i = 0u64;
            b.iter(|| {
                i = i.wrapping_add(1);
                std::hint::black_box(ring.get(&std::hint::black_box(i).to_string()))
            })
        });
    }
}

fn bench_membership_churn(c: &mut Criterion) {
    c.bench_function("ring_add_remove", |b| {
        b.iter_batched(
            || populated_ring(32),
            |ring| {
                for i in 0..16 {
                    ring.add(format!("churn-{}", i));
                }
                for i in 0..16 {
                    ring.remove(&format!("churn-{}", i));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_get, bench_membership_churn);
criterion_main!(benches);

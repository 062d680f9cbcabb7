use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use memberdiff_core::{Comparable, CompareConfig, MemberWalker, Members};

#[derive(Clone, Debug, PartialEq)]
struct Line {
    sku: u32,
    quantity: u16,
    label: String,
}

impl Comparable for Line {
    fn describe(members: &mut Members<Self>) {
        members.scalar("sku", |l| &l.sku);
        members.scalar("quantity", |l| &l.quantity);
        members.scalar("label", |l| &l.label);
    }
}

fn lines(n: u32) -> Vec<Line> {
    (0..n)
        .map(|i| Line {
            sku: i % 64,
            quantity: (i % 7) as u16,
            label: format!("item-{}", i % 64),
        })
        .collect()
}

fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");
    for size in [16u32, 128, 512] {
        let left = lines(size);
        let mut reversed = left.clone();
        reversed.reverse();
        let mut shifted = reversed.clone();
        if let Some(first) = shifted.first_mut() {
            first.quantity += 1;
        }

        group.bench_with_input(BenchmarkId::new("equal", size), &left, |b, left| {
            b.iter(|| {
                MemberWalker::new(CompareConfig::default())
                    .reconcile(black_box(left), black_box(left))
            })
        });
        group.bench_with_input(BenchmarkId::new("reversed", size), &reversed, |b, right| {
            b.iter(|| {
                MemberWalker::new(CompareConfig::default())
                    .reconcile(black_box(&left), black_box(right))
            })
        });
        group.bench_with_input(BenchmarkId::new("one_changed", size), &shifted, |b, right| {
            b.iter(|| {
                MemberWalker::new(CompareConfig::default())
                    .reconcile(black_box(&left), black_box(right))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_reconcile);
criterion_main!(benches);

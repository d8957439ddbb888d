use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use triage_core::traits::IExampleStore;
use triage_core::{ExampleSource, NewExample};
use triage_embeddings::TfIdfFallback;
use triage_storage::ExampleStore;

fn populated(n: usize) -> ExampleStore {
    let store = ExampleStore::open_in_memory(Arc::new(TfIdfFallback::new(1024))).unwrap();
    for i in 0..n {
        let ex = NewExample::new(
            format!("report number {i} about equipment and villains"),
            "Neutral",
            "Public Relations",
            ExampleSource::Interaction,
        )
        .unwrap();
        store.add(&ex).unwrap();
    }
    store
}

fn bench_query_similar(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_similar");
    for n in [100, 1_000] {
        let store = populated(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &store, |b, store| {
            b.iter(|| store.query_similar("my equipment broke", 90).unwrap())
        });
    }
    group.finish();
}

fn bench_add(c: &mut Criterion) {
    let store = populated(0);
    c.bench_function("add_example", |b| {
        b.iter(|| {
            let ex = NewExample::new("the lair alarm keeps ringing", "Anxious", "Base Operations", ExampleSource::Interaction)
                .unwrap();
            store.add(&ex).unwrap()
        })
    });
}

criterion_group!(benches, bench_query_similar, bench_add);
criterion_main!(benches);

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use verbdrill_core::ledger::ReviewLedger;
use verbdrill_core::model::Exercise;
use verbdrill_core::{PresetCatalog, RoundSelector};

fn make_preset(n: usize) -> Vec<Exercise> {
    (0..n)
        .map(|i| {
            Exercise::new(
                format!("verb{i}"),
                format!("Satz {i} ____."),
                format!("Sentence {i}."),
                format!("form{i}"),
            )
        })
        .collect()
}

fn make_selector(n: usize, missed_every: usize) -> RoundSelector {
    let preset = make_preset(n);
    let catalog = Arc::new(PresetCatalog::new());
    catalog.create_or_replace("bench", preset.clone());
    let ledger = Arc::new(ReviewLedger::new());
    for (i, ex) in preset.iter().enumerate() {
        ledger.record_outcome("bench-user", ex, i % missed_every != 0);
    }
    RoundSelector::new(catalog, ledger)
}

fn bench_build_round(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_round");

    for n in [10, 100, 1000] {
        let selector = make_selector(n, 7);
        group.bench_function(format!("preset={n}"), |b| {
            b.iter(|| selector.build_round(black_box("bench-user"), black_box("bench")))
        });
    }

    let selector = make_selector(100, 7);
    group.bench_function("fresh identity", |b| {
        b.iter(|| selector.build_round(black_box("nobody"), black_box("bench")))
    });

    group.finish();
}

criterion_group!(benches, bench_build_round);
criterion_main!(benches);

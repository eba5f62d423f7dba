use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use guestboard::{core::store::GuestStore, import, types::ViewMode, view};

fn roster_json(n: usize) -> String {
    let guests: Vec<String> = (0..n)
        .map(|i| {
            format!(
                r#"{{"name":"Guest {i}","email":"g{i}@example.com","company":"Company {}","partySize":{}}}"#,
                i % 50,
                i % 4 + 1
            )
        })
        .collect();
    format!(r#"{{"guests":[{}]}}"#, guests.join(","))
}

fn bench_import(c: &mut Criterion) {
    let raw = roster_json(10_000);
    c.bench_function("decode_replace_10k", |b| {
        b.iter(|| {
            let mut store = GuestStore::new();
            let drafts = import::decode(&raw).expect("decode");
            store.replace_all(drafts).expect("replace");
        });
    });
}

fn bench_render(c: &mut Criterion) {
    let mut store = GuestStore::new();
    store
        .replace_all(import::decode(&roster_json(10_000)).expect("decode"))
        .expect("replace");
    let ids: Vec<String> = store.all().iter().map(|r| r.id.clone()).collect();
    for id in ids.iter().step_by(2) {
        store.check_in(id);
    }

    let mut group = c.benchmark_group("render_10k");
    for term in ["", "guest 42", "company 7"] {
        let label = if term.is_empty() { "no-term" } else { term };
        group.bench_with_input(BenchmarkId::from_parameter(label), &term, |b, term| {
            b.iter(|| view::render(&store.all(), ViewMode::Pending, term));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_import, bench_render);
criterion_main!(benches);

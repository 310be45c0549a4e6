//! Benchmarks for site loading and lookups.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use docset_site::{Site, SiteOptions};
use docset_storage::MockStorage;

/// Build a storage holding one chain of `count` documents, each with a redirect.
fn chained_storage(count: usize) -> MockStorage {
    let mut storage = MockStorage::new();
    for i in 0..count {
        let prev = if i > 0 {
            format!("prev: doc-{}\n", i - 1)
        } else {
            String::new()
        };
        let next = if i + 1 < count {
            format!("next: doc-{}\n", i + 1)
        } else {
            String::new()
        };
        let content = format!(
            "---\nid: doc-{i}\ntitle: Document {i}\npermalink: docs/doc-{i}.html\n\
             redirect_from:\n  - legacy/doc-{i}.html\n{prev}{next}---\n\n\
             # Document {i}\n\nSome body text.\n"
        );
        storage = storage.with_document(format!("doc-{i:05}.md"), content);
    }
    storage
}

fn bench_site_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("site_load");

    for count in [10, 100, 1000] {
        let storage = chained_storage(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("documents", count), &storage, |b, storage| {
            b.iter(|| Site::load(storage, &SiteOptions::default()).unwrap());
        });
    }

    group.finish();
}

fn bench_site_lookup(c: &mut Criterion) {
    let storage = chained_storage(1000);
    let site = Site::load(&storage, &SiteOptions::default()).unwrap();

    let mut group = c.benchmark_group("site_lookup");

    group.bench_function("get_hit", |b| b.iter(|| site.store().get("doc-500")));
    group.bench_function("get_miss", |b| b.iter(|| site.store().get("missing")));

    group.bench_function("resolve_redirect", |b| {
        b.iter(|| site.redirects().resolve("legacy/doc-500.html"));
    });

    group.bench_function("next_of", |b| {
        b.iter(|| site.navigation().next_of("doc-500"));
    });

    group.finish();
}

criterion_group!(benches, bench_site_load, bench_site_lookup);
criterion_main!(benches);

/*!
# Parse Benchmarks

Throughput of the query-string parsers.

## Usage

```bash
# Run all benchmarks
cargo bench --bench parse_benchmarks

# Quick benchmark with fewer samples
cargo bench --bench parse_benchmarks -- --quick
```

HTML reports are generated in `target/criterion/report/index.html`.
*/

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use querypage::{PageOptions, QueryValues, read_page, read_string_filters, read_string_page};
use std::hint::black_box;

fn filter_query(count: usize) -> String {
    (0..count)
        .map(|i| format!("filter=field{i}+not+like+value%20{i},other"))
        .collect::<Vec<_>>()
        .join("&")
}

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("Filters");
    let options = querypage::FilterOptions::default();

    for count in [1, 10, 100] {
        let query = filter_query(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &query, |b, query| {
            b.iter(|| read_string_filters(black_box(query), &options));
        });
    }

    group.finish();
}

fn bench_page(c: &mut Criterion) {
    let query = "limit=25&page=4&filter=title+eq+Spaghetti&filter=serves+gte+4\
                 &sort=title+asc&sort=serves+desc&join=author&join=ingredient";
    let options = PageOptions::default();
    let values = QueryValues::parse(query).unwrap();

    let mut group = c.benchmark_group("Page");
    group.bench_function("decode and parse", |b| {
        b.iter(|| read_string_page(black_box(query), &options));
    });
    group.bench_function("parse decoded values", |b| {
        b.iter(|| read_page(black_box(&values), &options));
    });
    group.finish();
}

criterion_group!(benches, bench_filters, bench_page);
criterion_main!(benches);

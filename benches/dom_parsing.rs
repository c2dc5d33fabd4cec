use criterion::{criterion_group, criterion_main, Criterion};
use sift_json::dom::Parser;

macro_rules! build_parse_benchmark {
    ($func : tt, $filename : expr) => {
        fn $func() {
            let parser = Parser::default();
            let _ = parser.parse_file(format!("fixtures/json/valid/{}.json", $filename));
        }
    };
}

build_parse_benchmark!(bookstore, "bookstore");
build_parse_benchmark!(events, "events");
build_parse_benchmark!(simple_structure, "simple_structure");

fn benchmark_bookstore(c: &mut Criterion) {
    c.bench_function("parse of bookstore", |b| b.iter(bookstore));
}

fn benchmark_events(c: &mut Criterion) {
    c.bench_function("parse of events", |b| b.iter(events));
}

fn benchmark_simple_structure(c: &mut Criterion) {
    c.bench_function("parse of simple_structure", |b| b.iter(simple_structure));
}

criterion_group!(
    benches,
    benchmark_bookstore,
    benchmark_events,
    benchmark_simple_structure
);
criterion_main!(benches);

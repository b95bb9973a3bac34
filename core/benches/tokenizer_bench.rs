use criterion::{criterion_group, criterion_main, Criterion};
use hotelsearch_core::tokenizer::tokenize;
use hotelsearch_core::wordcount::count_frequencies;

fn bench_tokenize(c: &mut Criterion) {
    let text = "The rooms were spotless and the staff went out of their way; \
                top-notch breakfast, great location, great value. "
        .repeat(64);
    c.bench_function("tokenize_review", |b| {
        b.iter(|| tokenize(&text).count())
    });
    c.bench_function("count_frequencies_review", |b| {
        b.iter(|| count_frequencies(tokenize(&text)))
    });
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);

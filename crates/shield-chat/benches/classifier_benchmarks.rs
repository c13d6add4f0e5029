//! Classifier throughput over a mix of matching and non-matching messages.

use std::time::Duration;

use criterion::{criterion_group, criterion_main, Criterion};
use shield_chat::MessageClassifier;

const MESSAGES: &[&str] = &[
    "hello",
    "How much for a scratch repair?",
    "my bumper has a crack in it",
    "do you come to my office in apple valley?",
    "what payment methods do you take",
    "is it cheaper than going through my insurance deductible",
    "asdkjfh",
    "I'd like to talk about something totally unrelated to cars",
];

fn bench_classify(c: &mut Criterion) {
    let classifier = MessageClassifier::new();

    let mut group = c.benchmark_group("classifier");
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("single_message", |b| {
        let mut idx = 0usize;
        b.iter(|| {
            let reply = classifier.classify(MESSAGES[idx % MESSAGES.len()]);
            idx += 1;
            reply
        });
    });

    // Worst case: every rule is tested before the fallback
    group.bench_function("fallback_message", |b| {
        b.iter(|| classifier.classify("qwerty zxcvb asdfg"));
    });

    group.finish();
}

fn bench_compile(c: &mut Criterion) {
    c.bench_function("classifier_compile", |b| b.iter(MessageClassifier::new));
}

criterion_group!(benches, bench_classify, bench_compile);
criterion_main!(benches);

//! Criterion benchmark: question sampling and evaluator response parsing.
//! Run with: cargo bench --bench question_sampling

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use interviewer::services::evaluation_service::parse_evaluation;
use interviewer::{Question, QuestionBank};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bank(size: u32) -> QuestionBank {
    let questions = (1..=size)
        .map(|id| Question::free_text(id, format!("Excel question {id}"), format!("Answer {id}")))
        .collect();
    QuestionBank::new(questions).unwrap()
}

fn bench_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample_25");
    for size in [25u32, 100, 1_000, 10_000] {
        let bank = bank(size);
        let mut rng = StdRng::seed_from_u64(7);
        group.bench_with_input(BenchmarkId::from_parameter(size), &bank, |b, bank| {
            b.iter(|| bank.sample_with_rng(black_box(25), &mut rng).unwrap());
        });
    }
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let bank = bank(10_000);
    c.bench_function("lookup_text", |b| {
        b.iter(|| bank.lookup_text(black_box(4_321)).unwrap());
    });
}

fn bench_parse_evaluation(c: &mut Criterion) {
    let plain = r#"{"score": 3, "remarks": "Mostly correct, mention absolute references."}"#;
    let fenced = "Sure! Here is the evaluation:\n```json\n{\"score\": \"4\", \"remarks\": \"Correct\"}\n```";

    c.bench_function("parse_evaluation/plain", |b| {
        b.iter(|| parse_evaluation(black_box(plain)).unwrap());
    });
    c.bench_function("parse_evaluation/fenced", |b| {
        b.iter(|| parse_evaluation(black_box(fenced)).unwrap());
    });
}

criterion_group!(benches, bench_sample, bench_lookup, bench_parse_evaluation);
criterion_main!(benches);

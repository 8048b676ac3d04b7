use criterion::{black_box, criterion_group, criterion_main, Criterion};

use exograde_core::answers::{extract, SubmittedFields};
use exograde_core::config::{BlankMatching, GradingConfig};
use exograde_core::model::{BlankContent, ExerciseContent, QcmContent, Question};
use exograde_core::scoring::score;
use exograde_core::zones;

fn blank_exercise(n: usize) -> (ExerciseContent, SubmittedFields) {
    let content = ExerciseContent::FillInBlanks(BlankContent {
        sentences: (0..n).map(|i| format!("Phrase {i} : le ___ et la ___")).collect(),
        words: (0..n * 2).map(|i| format!("mot{i}")).collect(),
        image: None,
    });
    // Every third answer is wrong.
    let fields = (0..n * 2)
        .map(|i| {
            let word = if i % 3 == 0 { "faux".to_string() } else { format!("Mot{i}") };
            (format!("answer_{i}"), word)
        })
        .collect();
    (content, fields)
}

fn bench_score_blanks(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_blanks");
    let (content, fields) = blank_exercise(100);
    let positional = GradingConfig::default();
    let any_order = GradingConfig {
        blank_matching: BlankMatching::AnyOrder,
        ..GradingConfig::default()
    };

    group.bench_function("positional_200", |b| {
        b.iter(|| {
            let answers = extract(&content, black_box(&fields));
            score(&content, &answers, &positional)
        })
    });

    group.bench_function("any_order_200", |b| {
        b.iter(|| {
            let answers = extract(&content, black_box(&fields));
            score(&content, &answers, &any_order)
        })
    });

    group.finish();
}

fn bench_score_qcm(c: &mut Criterion) {
    let content = ExerciseContent::Qcm(QcmContent {
        questions: (0..100)
            .map(|i| Question {
                text: format!("Question {i}"),
                choices: vec!["a".into(), "b".into(), "c".into()],
                correct: i % 3,
            })
            .collect(),
        image: None,
    });
    let fields: SubmittedFields = (0..100)
        .map(|i| (format!("answer_{i}"), (i % 2).to_string()))
        .collect();
    let config = GradingConfig::default();

    c.bench_function("score_qcm_100", |b| {
        b.iter(|| {
            let answers = extract(&content, black_box(&fields));
            score(&content, &answers, &config)
        })
    });
}

fn bench_zone_resolution(c: &mut Criterion) {
    // Sparse indices, as left behind by repeated delete/re-add in the editor.
    let fields: SubmittedFields = (0..200u32)
        .filter(|i| i % 7 != 0)
        .flat_map(|i| {
            let n = i * 5 + 2;
            [
                (format!("zone_{n}_x"), format!("{i}.5")),
                (format!("zone_{n}_y"), format!("{}", i * 2)),
                (format!("zone_{n}_legend"), format!("label {i}")),
            ]
        })
        .collect();

    c.bench_function("resolve_zones_sparse", |b| {
        b.iter(|| zones::resolve(black_box(&fields)))
    });
}

criterion_group!(
    benches,
    bench_score_blanks,
    bench_score_qcm,
    bench_zone_resolution
);
criterion_main!(benches);

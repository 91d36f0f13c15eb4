use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizgrade_core::model::{Answer, Question};
use quizgrade_core::{grade, QuestionBank};

fn large_bank(n: i64) -> QuestionBank {
    let questions = (0..n)
        .map(|i| match i % 3 {
            0 => Question::single_choice(i, "Pick one", &["a", "b", "c", "d"], 2),
            1 => Question::multi_choice(i, "Pick some", &["a", "b", "c", "d"], &[0, 1, 3]),
            _ => Question::text(i, "Say it", "Central Processing Unit"),
        })
        .collect();
    QuestionBank::new(questions).expect("valid bank")
}

fn answers_for(n: i64) -> Vec<Answer> {
    (0..n)
        .map(|i| match i % 3 {
            0 => Answer::new(i, 2i64),
            1 => Answer::new(i, vec![3i64, 1, 0]),
            _ => Answer::new(i, "  central processing UNIT "),
        })
        .collect()
}

fn bench_grade(c: &mut Criterion) {
    let mut group = c.benchmark_group("grade");

    let builtin = QuestionBank::builtin();
    let builtin_answers = vec![
        Answer::new(1, 2i64),
        Answer::new(2, vec![2i64, 0]),
        Answer::new(3, "central processing unit"),
        Answer::new(9999, 0i64),
    ];
    group.bench_function("builtin", |b| {
        b.iter(|| grade(black_box(&builtin_answers), black_box(&builtin)))
    });

    let bank = large_bank(1_000);
    let answers = answers_for(1_000);
    group.bench_function("1000_questions", |b| {
        b.iter(|| grade(black_box(&answers), black_box(&bank)))
    });

    group.finish();
}

fn bench_parse_answers(c: &mut Criterion) {
    let payload = serde_json::to_string(&answers_for(1_000)).expect("serializable");
    c.bench_function("parse_answers_1000", |b| {
        b.iter(|| serde_json::from_str::<Vec<Answer>>(black_box(&payload)))
    });
}

criterion_group!(benches, bench_grade, bench_parse_answers);
criterion_main!(benches);

//! Full-match throughput: a host loop ticking a 4-player match to the end.

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quiz_engine::core::{Color, PlayerProfile, QuizConfig};
use quiz_engine::questions::Question;
use quiz_engine::session::{Phase, SessionController};

fn bank(size: usize) -> Vec<Question> {
    (0..size)
        .map(|i| {
            Question::new(format!("q{i}"), 10.0 * (1 + i % 5) as f64, 15.0)
                .with_correct("right")
                .with_wrong("a")
                .with_wrong("b")
                .with_wrong("c")
        })
        .collect()
}

fn roster() -> Vec<PlayerProfile> {
    ["Ada", "Bo", "Cy", "Di"]
        .into_iter()
        .map(|name| PlayerProfile::new(name, Color::default()))
        .collect()
}

/// Alternate one wrong and one right answer per question, 60 frames a second.
fn run_match(roster: &[PlayerProfile], questions: &[Question], seed: u64) -> usize {
    let config = QuizConfig::default()
        .with_maximum_mistakes(3)
        .with_presentation_delay(0.25)
        .with_seed(seed);
    let mut session = match SessionController::start_match(roster, questions, config) {
        Ok(session) => session,
        Err(_) => return 0,
    };

    let frame = Duration::from_millis(16);
    let mut wrong_next = true;
    while !session.phase().is_terminal() {
        if session.phase() == Phase::AwaitingAnswer {
            let wanted = !wrong_next;
            let pick = session.current_question().and_then(|q| {
                session
                    .available_answers()
                    .into_iter()
                    .find(|&i| q.answers[i].is_correct == wanted)
            });
            if let Some(answer) = pick {
                session.queue_answer(answer);
            }
            wrong_next = !wrong_next;
        }
        session.tick(frame);
    }
    session.progress().asked
}

fn bench_match(c: &mut Criterion) {
    let roster = roster();
    let mut group = c.benchmark_group("full_match");
    for size in [20, 100, 500] {
        let questions = bank(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &questions, |b, questions| {
            b.iter(|| run_match(black_box(&roster), black_box(questions), 42))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_match);
criterion_main!(benches);

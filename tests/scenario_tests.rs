//! End-to-end match scenarios.
//!
//! These tests drive `SessionController` the way a host would: start a
//! match, submit answers or let the clock run, advance between questions,
//! and check the final standings.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use quiz_engine::core::{Color, PlayerId, PlayerProfile, QuizConfig, SessionError};
use quiz_engine::questions::Question;
use quiz_engine::scoring::{MissReason, Outcome, Player, Verdict};
use quiz_engine::session::{
    MatchOutcome, MatchSummary, MemoryScoreRecorder, Phase, Resolution, SessionController,
    SessionListener,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn roster(names: &[&str]) -> Vec<PlayerProfile> {
    names
        .iter()
        .map(|name| PlayerProfile::new(*name, Color::default()))
        .collect()
}

/// A question whose correct answer sits at index 0.
fn question(text: &str, bonus: f64) -> Question {
    Question::new(text, bonus, 10.0)
        .with_correct("right")
        .with_wrong("wrong a")
        .with_wrong("wrong b")
}

/// Answer correctly and move on until the match ends.
fn answer_everything(session: &mut SessionController) {
    while !session.phase().is_terminal() {
        match session.phase() {
            Phase::AwaitingAnswer => {
                session.submit_answer(0).unwrap();
            }
            Phase::Resolving => session.advance().unwrap(),
            phase => panic!("unexpected phase {phase}"),
        }
    }
}

// =============================================================================
// Scenarios
// =============================================================================

/// Four questions in two groups, one player, all correct.
#[test]
fn test_single_player_clears_every_group() {
    init_tracing();
    let questions = [
        question("b1", 20.0),
        question("a1", 10.0),
        question("b2", 20.0),
        question("a2", 10.0),
    ];
    let config = QuizConfig::solo().with_questions_per_group(2);
    let mut session = SessionController::start_match(&roster(&["Ada"]), &questions, config).unwrap();

    let mut served = Vec::new();
    while !session.phase().is_terminal() {
        if session.phase() == Phase::AwaitingAnswer {
            served.push(session.current_question().unwrap().text.clone());
            session.submit_answer(0).unwrap();
        } else {
            session.advance().unwrap();
        }
    }

    assert_eq!(served, ["a1", "a2", "b1", "b2"]);
    let summary = session.summary().unwrap();
    assert_eq!(summary.outcome, MatchOutcome::Victory);
    assert_eq!(summary.ranking.players[0].score, 60.0);
    assert_eq!(summary.correct_answers, 4);
}

/// Two wrong answers exhaust the mistake budget.
#[test]
fn test_mistake_limit_costs_a_life() {
    let questions = [question("only", 40.0)];
    let config = QuizConfig::solo().with_maximum_mistakes(2);
    let mut session = SessionController::start_match(&roster(&["Ada"]), &questions, config).unwrap();

    assert_eq!(
        session.submit_answer(1).unwrap(),
        Verdict::Pending { bonus_remaining: 20.0, mistakes_left: 1 }
    );
    assert_eq!(
        session.submit_answer(2).unwrap(),
        Verdict::Resolved(Outcome::Incorrect(MissReason::MistakeLimit))
    );

    assert_eq!(session.current_bonus(), 0.0);
    let player = &session.players()[PlayerId::new(0)];
    assert_eq!(player.lives, 2);
    assert_eq!(player.score, 0.0);
    assert_eq!(session.phase(), Phase::Victory);
}

/// Same as above, but the lost life was the last one.
#[test]
fn test_mistake_limit_on_last_life_is_game_over() {
    let questions = [question("one", 40.0), question("two", 40.0)];
    let config = QuizConfig::solo().with_maximum_mistakes(2).with_lives(1);
    let mut session = SessionController::start_match(&roster(&["Ada"]), &questions, config).unwrap();

    session.submit_answer(1).unwrap();
    session.submit_answer(2).unwrap();

    assert_eq!(session.phase(), Phase::GameOver);
    let summary = session.summary().unwrap();
    assert_eq!(summary.outcome, MatchOutcome::GameOver);
    assert_eq!(summary.questions_asked, 1);
}

/// Two players alternate: a correct answer, then a timeout.
#[test]
fn test_two_players_correct_then_timeout() {
    let questions = [question("q1", 10.0), question("q2", 10.0), question("q3", 10.0)];
    let config = QuizConfig::solo().with_players(2).with_question_limit(2);
    let mut session =
        SessionController::start_match(&roster(&["Ada", "Bo"]), &questions, config).unwrap();

    assert_eq!(session.current_player().id, PlayerId::new(0));
    session.submit_answer(0).unwrap();
    assert_eq!(session.scoreboard().current(), PlayerId::new(1));
    session.advance().unwrap();

    assert_eq!(session.current_player().id, PlayerId::new(1));
    let report = session.tick(Duration::from_secs(10));
    assert!(report.expired);
    assert_eq!(session.players()[PlayerId::new(1)].lives, 2);

    let summary = session.summary().unwrap();
    assert_eq!(summary.outcome, MatchOutcome::Victory);
    assert_eq!(summary.ranking.players[0].name, "Ada");
    assert!(summary.ranking.players[0].score > 0.0);
    assert_eq!(summary.ranking.players[1].score, 0.0);
    assert_eq!(summary.ranking.result_text(), "Ada wins with 10 points!");
}

/// Tied top scores are a draw; the runner-up is not a winner.
#[test]
fn test_three_players_tied_at_the_top() {
    let questions = [question("x", 50.0), question("y", 50.0), question("z", 30.0)];
    let config = QuizConfig::solo().with_players(3);
    let mut session =
        SessionController::start_match(&roster(&["Ada", "Bo", "Cy"]), &questions, config).unwrap();

    answer_everything(&mut session);

    let scores: Vec<f64> = session.players().values().map(|p| p.score).collect();
    assert_eq!(scores, [30.0, 50.0, 50.0]);

    let ranking = &session.summary().unwrap().ranking;
    assert!(ranking.is_draw());
    assert_eq!(ranking.winner_count, 2);
    assert_eq!(
        ranking.result_text(),
        "It's a draw between Bo and Cy, each with 50 points!"
    );
}

// =============================================================================
// Turns and elimination
// =============================================================================

/// An eliminated player is skipped; the match goes on until nobody is left.
#[test]
fn test_eliminated_player_is_skipped() {
    let questions: Vec<_> = (0..6).map(|i| question(&format!("q{i}"), 10.0)).collect();
    let config = QuizConfig::solo().with_players(2).with_lives(1).with_questions_per_group(3);
    let mut session =
        SessionController::start_match(&roster(&["Ada", "Bo"]), &questions, config).unwrap();

    // Ada times out and is out of the game.
    session.on_timer_expire().unwrap();
    assert!(session.players()[PlayerId::new(0)].is_eliminated());
    assert_eq!(session.phase(), Phase::Resolving);
    session.advance().unwrap();

    // Bo answers every remaining question.
    for _ in 0..2 {
        assert_eq!(session.current_player().name, "Bo");
        session.submit_answer(0).unwrap();
        session.advance().unwrap();
    }

    assert_eq!(session.current_player().name, "Bo");
    session.on_timer_expire().unwrap();
    assert_eq!(session.phase(), Phase::GameOver);
}

/// Without turns only the answering player matters.
#[test]
fn test_no_turns_game_over_when_answering_player_is_out() {
    let questions = [question("q1", 10.0), question("q2", 10.0)];
    let config = QuizConfig::solo().with_players(2).with_turns(false).with_lives(1);
    let mut session =
        SessionController::start_match(&roster(&["Ada", "Bo"]), &questions, config).unwrap();

    session.on_timer_expire().unwrap();
    assert_eq!(session.phase(), Phase::GameOver);
    assert_eq!(session.players()[PlayerId::new(1)].lives, 1);
}

/// Only the first `number_of_players` seats of the roster play.
#[test]
fn test_roster_beyond_player_count_is_benched() {
    let config = QuizConfig::solo().with_players(2);
    let session = SessionController::start_match(
        &roster(&["Ada", "Bo", "Cy", "Di"]),
        &[question("q", 10.0)],
        config,
    )
    .unwrap();

    assert_eq!(session.players().player_count(), 2);
    let benched: Vec<&str> = session
        .scoreboard()
        .benched()
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(benched, ["Cy", "Di"]);
}

// =============================================================================
// Rejections
// =============================================================================

#[test]
fn test_answers_rejected_outside_awaiting() {
    let mut session =
        SessionController::new(&roster(&["Ada"]), &[question("q", 10.0)], QuizConfig::solo())
            .unwrap();

    assert_eq!(
        session.submit_answer(0),
        Err(SessionError::InvalidStateTransition {
            operation: "submit_answer",
            phase: Phase::Idle
        })
    );

    session.start().unwrap();
    session.submit_answer(0).unwrap();
    assert_eq!(session.phase(), Phase::Victory);

    let before = session.state();
    assert!(session.submit_answer(0).is_err());
    assert!(session.on_timer_expire().is_err());
    assert_eq!(session.state(), before);
}

#[test]
fn test_zero_players_rejected() {
    let result = SessionController::start_match(&[], &[question("q", 10.0)], QuizConfig::solo());
    assert!(matches!(result, Err(SessionError::Configuration(_))));

    let result = SessionController::start_match(
        &roster(&["Ada"]),
        &[question("q", 10.0)],
        QuizConfig::solo().with_players(0),
    );
    assert!(matches!(result, Err(SessionError::Configuration(_))));
}

#[test]
fn test_question_without_correct_answer_rejected() {
    let broken = Question::new("trick", 10.0, 5.0).with_wrong("a").with_wrong("b");
    let result =
        SessionController::start_match(&roster(&["Ada"]), &[question("ok", 10.0), broken], QuizConfig::solo());
    assert!(matches!(result, Err(SessionError::Configuration(_))));
}

// =============================================================================
// Limits and offsets
// =============================================================================

#[test]
fn test_question_limit_larger_than_bank_is_clamped() {
    let questions = [question("q1", 10.0), question("q2", 10.0)];
    let config = QuizConfig::solo().with_question_limit(50);
    let mut session = SessionController::start_match(&roster(&["Ada"]), &questions, config).unwrap();

    assert_eq!(session.progress().limit, 2);
    answer_everything(&mut session);
    assert_eq!(session.summary().unwrap().progress_text(), "2/2");
}

#[test]
fn test_first_question_offset() {
    let questions = [question("q1", 10.0), question("q2", 20.0), question("q3", 30.0)];
    let config = QuizConfig::solo().with_first_question(2);
    let mut session = SessionController::start_match(&roster(&["Ada"]), &questions, config).unwrap();

    assert_eq!(session.current_question().unwrap().text, "q2");
    answer_everything(&mut session);
    assert_eq!(session.summary().unwrap().questions_asked, 2);
}

#[test]
fn test_first_question_past_end_wins_at_once() {
    let config = QuizConfig::solo().with_first_question(5);
    let session =
        SessionController::start_match(&roster(&["Ada"]), &[question("q", 10.0)], config).unwrap();
    assert_eq!(session.phase(), Phase::Victory);
}

// =============================================================================
// Timing
// =============================================================================

/// A wrong answer pauses the clock, then it continues with what was left.
#[test]
fn test_wrong_answer_keeps_remaining_time() {
    let config = QuizConfig::solo().with_maximum_mistakes(3);
    let mut session =
        SessionController::start_match(&roster(&["Ada"]), &[question("q", 10.0)], config).unwrap();

    session.tick(Duration::from_secs(3));
    session.submit_answer(1).unwrap();
    assert_eq!(session.time_remaining(), Duration::from_secs(7));
    assert!(session.timer().is_running());

    let report = session.tick(Duration::from_secs(7));
    assert!(report.expired);
    assert_eq!(
        session.last_resolution().unwrap().outcome,
        Outcome::Incorrect(MissReason::Timeout)
    );
}

/// Timeout and answer in the same frame: the timeout wins.
#[test]
fn test_same_tick_timeout_beats_answer() {
    let mut session = SessionController::start_match(
        &roster(&["Ada"]),
        &[question("q1", 10.0), question("q2", 10.0)],
        QuizConfig::solo(),
    )
    .unwrap();

    session.queue_answer(0);
    let report = session.tick(Duration::from_secs(11));

    assert!(report.expired);
    assert!(report.answers[0].1.is_err());
    assert_eq!(session.players()[PlayerId::new(0)].score, 0.0);
    assert_eq!(session.players()[PlayerId::new(0)].lives, 2);
}

/// The presentation delay is waited out by `tick`.
#[test]
fn test_full_match_driven_by_tick() {
    let questions: Vec<_> = (0..4).map(|i| question(&format!("q{i}"), 10.0)).collect();
    let config = QuizConfig::solo().with_questions_per_group(4).with_presentation_delay(0.5);
    let mut session = SessionController::start_match(&roster(&["Ada"]), &questions, config).unwrap();

    let frame = Duration::from_millis(100);
    let mut frames = 0;
    while !session.phase().is_terminal() {
        if session.phase() == Phase::AwaitingAnswer {
            session.queue_answer(0);
        }
        session.tick(frame);
        frames += 1;
        assert!(frames < 1_000, "match did not finish");
    }

    assert_eq!(session.summary().unwrap().correct_answers, 4);
}

// =============================================================================
// Collaborators
// =============================================================================

#[derive(Default)]
struct EventLog {
    events: Vec<String>,
}

impl SessionListener for EventLog {
    fn on_question_presented(&mut self, index: usize, _question: &Question, player: &Player) {
        self.events.push(format!("present {index} to {}", player.name));
    }

    fn on_answer_evaluated(&mut self, answer: usize, verdict: &Verdict) {
        let kind = if matches!(verdict, Verdict::Pending { .. }) { "retry" } else { "final" };
        self.events.push(format!("answer {answer} {kind}"));
    }

    fn on_question_resolved(&mut self, resolution: &Resolution) {
        self.events.push(format!("resolved {}", resolution.question_index));
    }

    fn on_match_ended(&mut self, summary: &MatchSummary) {
        self.events.push(format!("ended {:?}", summary.outcome));
    }
}

#[test]
fn test_listener_sees_every_step() {
    let log = Rc::new(RefCell::new(EventLog::default()));
    let config = QuizConfig::solo().with_maximum_mistakes(3);
    let mut session = SessionController::new(
        &roster(&["Ada"]),
        &[question("q1", 10.0), question("q2", 10.0)],
        config,
    )
    .unwrap()
    .with_listener(Rc::clone(&log));

    session.start().unwrap();
    session.submit_answer(2).unwrap();
    session.submit_answer(0).unwrap();
    session.advance().unwrap();
    session.skip_question().unwrap();

    assert_eq!(
        log.borrow().events,
        [
            "present 0 to Ada",
            "answer 2 retry",
            "answer 0 final",
            "resolved 0",
            "present 1 to Ada",
            "resolved 1",
            "ended Victory",
        ]
    );
}

#[test]
fn test_recorder_receives_final_scores() {
    let recorder = Rc::new(RefCell::new(MemoryScoreRecorder::new()));
    let config = QuizConfig::solo().with_players(2).with_seed(77);
    let mut session = SessionController::new(
        &roster(&["Ada", "Bo"]),
        &[question("q1", 12.4), question("q2", 12.4)],
        config,
    )
    .unwrap()
    .with_recorder(Rc::clone(&recorder));

    session.start().unwrap();
    answer_everything(&mut session);

    let recorder = recorder.borrow();
    assert_eq!(recorder.entries().len(), 2);
    assert!(recorder.entries().iter().all(|e| e.match_seed == 77));
    assert_eq!(recorder.high_score("Ada"), Some(12));
    assert_eq!(recorder.high_score("Bo"), Some(12));
}

/// Same seed, same bank, same config: the same question order.
#[test]
fn test_seeded_matches_repeat() {
    let questions: Vec<_> = (0..8).map(|i| question(&format!("q{i}"), f64::from(i % 3) * 10.0)).collect();
    let order = |seed: u64| {
        let config = QuizConfig::default().with_players(1).with_seed(seed);
        let mut session = SessionController::start_match(&roster(&["Ada"]), &questions, config).unwrap();
        let mut served = Vec::new();
        while !session.phase().is_terminal() {
            if session.phase() == Phase::Resolving {
                session.advance().unwrap();
                continue;
            }
            let question = session.current_question().unwrap();
            served.push(question.text.clone());
            let correct = question.answers.iter().position(|a| a.is_correct).unwrap();
            session.submit_answer(correct).unwrap();
        }
        served
    };

    assert_eq!(order(5), order(5));
}

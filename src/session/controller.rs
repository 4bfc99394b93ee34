//! The match state machine.
//!
//! `SessionController` owns the bank, the scoreboard, the group sequencer
//! and the answer timer, and is the only thing that mutates them. It never
//! blocks: the host drives it with `tick` from its update loop plus the
//! event entry points (`submit_answer`, `on_timer_expire`, `skip_question`,
//! `advance`).
//!
//! ## Lifecycle
//!
//! ```text
//! Idle --start--> AwaitingAnswer --answer/timeout--> Resolving --advance--> AwaitingAnswer
//!                                                        |
//!                                                        +--> Victory | GameOver
//! ```
//!
//! Terminal checks run the moment a question resolves, in this order:
//! nobody left who can answer (GameOver), then the question limit or the
//! last group exhausted (Victory). Otherwise the turn rotates and the
//! controller waits in `Resolving` for the presentation delay.
//!
//! ## Timer expiry
//!
//! `tick` calls `on_timer_expire` itself when the answer window runs out,
//! so hosts normally never call it directly. Answers queued with
//! `queue_answer` are applied during the next `tick`, *after* the expiry
//! check: an answer that arrives in the same frame as the timeout loses.
//!
//! ## Example
//!
//! ```
//! use quiz_engine::core::{Color, PlayerProfile, QuizConfig};
//! use quiz_engine::questions::Question;
//! use quiz_engine::session::{Phase, SessionController};
//!
//! let roster = [PlayerProfile::new("Ada", Color::default())];
//! let questions = [Question::new("1 + 1?", 10.0, 10.0).with_wrong("3").with_correct("2")];
//!
//! let mut session = SessionController::start_match(&roster, &questions, QuizConfig::solo()).unwrap();
//! assert_eq!(session.phase(), Phase::AwaitingAnswer);
//!
//! session.submit_answer(1).unwrap();
//! assert_eq!(session.phase(), Phase::Victory);
//! assert_eq!(session.summary().unwrap().ranking.players[0].score, 10.0);
//! ```

use smallvec::SmallVec;
use std::time::Duration;
use tracing::{debug, info, instrument};

use super::listener::{NoopListener, ScoreRecorder, SessionListener};
use super::sequencer::{GroupSequencer, Step};
use super::state::{Phase, Progress, Resolution, SessionState};
use super::summary::{MatchOutcome, MatchSummary};
use super::timer::Timer;
use crate::core::{PlayerMap, PlayerProfile, QuizConfig, QuizRng, SessionError};
use crate::questions::{Question, QuestionBank};
use crate::scoring::{MissReason, Outcome, Player, ScoreBoard, Verdict};

/// What happened during one `tick`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// The answer window ran out this tick.
    pub expired: bool,
    /// Queued answers applied this tick, with their results.
    pub answers: Vec<(usize, Result<Verdict, SessionError>)>,
    /// The presentation delay ran out and the next question was asked.
    pub advanced: bool,
    /// Phase after the tick.
    pub phase: Phase,
}

/// Drives one match from the first question to Victory or GameOver.
pub struct SessionController {
    config: QuizConfig,
    bank: QuestionBank,
    board: ScoreBoard,
    sequencer: GroupSequencer,
    timer: Timer,
    answer_rng: QuizRng,
    phase: Phase,
    current: Option<usize>,
    eliminated: SmallVec<[usize; 4]>,
    questions_asked: usize,
    correct_answers: usize,
    question_limit: usize,
    delay_remaining: Duration,
    awaiting_continue: bool,
    queued: Vec<usize>,
    last_resolution: Option<Resolution>,
    summary: Option<MatchSummary>,
    listener: Box<dyn SessionListener>,
    recorder: Option<Box<dyn ScoreRecorder>>,
}

impl SessionController {
    /// Validate everything and build a controller in `Idle`.
    ///
    /// The first `config.number_of_players` profiles of `roster` play; the
    /// rest are benched. Nothing is created if any check fails.
    pub fn new(
        roster: &[PlayerProfile],
        questions: &[Question],
        config: QuizConfig,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        let bank = QuestionBank::load(questions)?;
        let board = ScoreBoard::new(
            roster,
            config.number_of_players,
            config.starting_lives,
            config.bonus_loss_factor,
            config.maximum_mistakes,
        )?;
        let sequencer = GroupSequencer::new(
            config.questions_per_group,
            board.player_count(),
            config.sort_questions,
            bank.len(),
            config.first_question,
        );
        let question_limit = config.question_limit.min(bank.len());
        let answer_rng = QuizRng::new(config.seed).for_context("answers");

        Ok(Self {
            config,
            bank,
            board,
            sequencer,
            timer: Timer::new(),
            answer_rng,
            phase: Phase::Idle,
            current: None,
            eliminated: SmallVec::new(),
            questions_asked: 0,
            correct_answers: 0,
            question_limit,
            delay_remaining: Duration::ZERO,
            awaiting_continue: false,
            queued: Vec::new(),
            last_resolution: None,
            summary: None,
            listener: Box::new(NoopListener),
            recorder: None,
        })
    }

    /// Build and immediately start a match.
    pub fn start_match(
        roster: &[PlayerProfile],
        questions: &[Question],
        config: QuizConfig,
    ) -> Result<Self, SessionError> {
        let mut session = Self::new(roster, questions, config)?;
        session.start()?;
        Ok(session)
    }

    /// Attach presentation callbacks.
    #[must_use]
    pub fn with_listener(mut self, listener: impl SessionListener + 'static) -> Self {
        self.listener = Box::new(listener);
        self
    }

    /// Attach a high-score store, fed when the match ends.
    #[must_use]
    pub fn with_recorder(mut self, recorder: impl ScoreRecorder + 'static) -> Self {
        self.recorder = Some(Box::new(recorder));
        self
    }

    /// Prepare the bank and ask the first question.
    ///
    /// An empty bank (or a first question past its end) wins immediately.
    #[instrument(level = "debug", skip(self))]
    pub fn start(&mut self) -> Result<(), SessionError> {
        self.require(Phase::Idle, "start")?;

        let rng = QuizRng::new(self.config.seed);
        if self.config.randomize_questions {
            self.bank.shuffle(&mut rng.for_context("questions"));
        }
        if self.config.sort_questions {
            self.bank.sort_by_bonus_ascending();
        }

        info!(
            seed = self.config.seed,
            players = self.board.player_count(),
            questions = self.bank.len(),
            per_group = self.sequencer.questions_per_group(),
            limit = self.question_limit,
            "match started"
        );
        self.present_next();
        Ok(())
    }

    /// Evaluate the answer at `index` for the player whose turn it is.
    ///
    /// A wrong answer within the mistake budget disables that option and
    /// keeps the same question and player; the timer keeps its remaining
    /// time.
    #[instrument(level = "debug", skip(self))]
    pub fn submit_answer(&mut self, index: usize) -> Result<Verdict, SessionError> {
        let question_index = self.awaiting("submit_answer")?;
        let question = &self.bank[question_index];
        let count = question.answers.len();
        if index >= count {
            return Err(SessionError::OutOfRangeAnswer { index, count });
        }
        if self.eliminated.contains(&index) {
            return Err(SessionError::AnswerAlreadyEliminated { index });
        }
        let correct = question.is_correct(index);

        self.timer.stop();
        let player = self.board.current();
        let verdict = if correct {
            self.correct_answers += 1;
            self.board.record_correct(player)
        } else {
            self.eliminated.push(index);
            self.board.record_wrong(player)
        };
        debug!(%player, answer = index, correct, ?verdict, "answer evaluated");
        self.listener.on_answer_evaluated(index, &verdict);

        match verdict {
            Verdict::Pending { .. } => self.timer.resume(),
            Verdict::Resolved(outcome) => self.resolve(question_index, outcome),
        }
        Ok(verdict)
    }

    /// Apply an answer on the next `tick`, after the timer has been checked.
    pub fn queue_answer(&mut self, index: usize) {
        self.queued.push(index);
    }

    /// The answer window ran out: the question is lost and costs a life.
    ///
    /// `tick` calls this itself; hosts that run their own clock may call it
    /// directly instead.
    #[instrument(level = "debug", skip(self))]
    pub fn on_timer_expire(&mut self) -> Result<Outcome, SessionError> {
        let question_index = self.awaiting("on_timer_expire")?;
        Ok(self.expire(question_index))
    }

    /// Resolve the current question without touching score or lives.
    pub fn skip_question(&mut self) -> Result<(), SessionError> {
        let question_index = self.awaiting("skip_question")?;
        self.timer.stop();
        debug!(question = question_index, "question skipped");
        self.resolve(question_index, Outcome::Skipped);
        Ok(())
    }

    /// Leave `Resolving` and ask the next question.
    ///
    /// Required after a question with follow-up text; otherwise optional,
    /// since `tick` advances on its own once the presentation delay is over.
    #[instrument(level = "debug", skip(self))]
    pub fn advance(&mut self) -> Result<(), SessionError> {
        self.require(Phase::Resolving, "advance")?;
        self.present_next();
        Ok(())
    }

    /// Advance the clock by `elapsed`.
    ///
    /// Order within one tick: timer expiry, then queued answers, then the
    /// presentation delay of a question that was already resolved before
    /// this tick began.
    pub fn tick(&mut self, elapsed: Duration) -> TickReport {
        let mut report = TickReport::default();
        let was_resolving = self.phase == Phase::Resolving;
        let queued = std::mem::take(&mut self.queued);

        if self.phase == Phase::AwaitingAnswer && self.timer.tick(elapsed) {
            if let Some(question_index) = self.current {
                self.expire(question_index);
                report.expired = true;
            }
        }

        for index in queued {
            let result = self.submit_answer(index);
            report.answers.push((index, result));
        }

        if was_resolving && self.phase == Phase::Resolving && !self.awaiting_continue {
            self.delay_remaining = self.delay_remaining.saturating_sub(elapsed);
            if self.delay_remaining.is_zero() {
                self.present_next();
                report.advanced = true;
            }
        }

        report.phase = self.phase;
        report
    }

    // === Read-only views ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    /// The prepared bank (shuffled/sorted once the match has started).
    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// The question on screen, while one is being asked or resolved.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            Phase::AwaitingAnswer | Phase::Resolving => self.current.map(|i| &self.bank[i]),
            _ => None,
        }
    }

    /// Answer indices still selectable for the current question.
    #[must_use]
    pub fn available_answers(&self) -> Vec<usize> {
        match (self.phase, self.current_question()) {
            (Phase::AwaitingAnswer, Some(question)) => (0..question.answers.len())
                .filter(|i| !self.eliminated.contains(i))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> &Player {
        self.board.player(self.board.current())
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        self.board.players()
    }

    #[must_use]
    pub fn scoreboard(&self) -> &ScoreBoard {
        &self.board
    }

    /// Bonus still on offer for the current question.
    #[must_use]
    pub fn current_bonus(&self) -> f64 {
        self.board.current_bonus()
    }

    #[must_use]
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    #[must_use]
    pub fn time_remaining(&self) -> Duration {
        self.timer.remaining()
    }

    /// Presentation delay left before `tick` asks the next question.
    #[must_use]
    pub fn delay_remaining(&self) -> Duration {
        self.delay_remaining
    }

    #[must_use]
    pub fn last_resolution(&self) -> Option<&Resolution> {
        self.last_resolution.as_ref()
    }

    /// Final summary; only available once the match is over.
    #[must_use]
    pub fn summary(&self) -> Option<&MatchSummary> {
        self.summary.as_ref()
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress {
            asked: self.questions_asked,
            limit: self.question_limit,
            correct: self.correct_answers,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        SessionState {
            current_question_index: self.current,
            current_group_bonus: self.sequencer.group_bonus(),
            questions_answered_in_group: self.sequencer.completed_in_group(),
            current_player_index: self.board.current().index(),
            current_bonus_value: self.board.nominal_bonus(),
            questions_asked_total: self.questions_asked,
            correct_answers_total: self.correct_answers,
            is_game_over: self.phase.is_terminal(),
        }
    }

    // === Transitions ===

    fn require(&self, expected: Phase, operation: &'static str) -> Result<(), SessionError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidStateTransition {
                operation,
                phase: self.phase,
            })
        }
    }

    /// Index of the question being asked, or the rejection for `operation`.
    fn awaiting(&self, operation: &'static str) -> Result<usize, SessionError> {
        self.require(Phase::AwaitingAnswer, operation)?;
        self.current.ok_or(SessionError::InvalidStateTransition {
            operation,
            phase: self.phase,
        })
    }

    fn present_next(&mut self) {
        match self.sequencer.advance(&self.bank) {
            Step::Serve(index) => self.present(index),
            Step::Done => self.finish(MatchOutcome::Victory),
        }
    }

    fn present(&mut self, index: usize) {
        if self.config.randomize_answers {
            self.bank.shuffle_answers(index, &mut self.answer_rng);
        }
        let question = &self.bank[index];

        self.board.begin_question(question.bonus);
        self.current = Some(index);
        self.eliminated.clear();
        self.questions_asked += 1;
        self.last_resolution = None;
        self.timer.start(question.time_limit());
        self.phase = Phase::AwaitingAnswer;

        let player = self.board.player(self.board.current());
        debug!(
            question = index,
            bonus = question.bonus,
            player = %player.id,
            asked = self.questions_asked,
            "question presented"
        );
        self.listener.on_question_presented(index, question, player);
    }

    fn expire(&mut self, question_index: usize) -> Outcome {
        self.timer.stop();
        let player = self.board.current();
        self.board.record_timeout(player);
        info!(%player, question = question_index, "answer window expired");

        let outcome = Outcome::Incorrect(MissReason::Timeout);
        self.resolve(question_index, outcome);
        outcome
    }

    fn resolve(&mut self, question_index: usize, outcome: Outcome) {
        self.sequencer.record_completed();

        let resolution = Resolution {
            question_index,
            player: self.board.current(),
            outcome,
            followup: self.bank[question_index].followup_text().map(str::to_owned),
            delay: self.config.presentation_delay(),
        };
        self.awaiting_continue = resolution.followup.is_some();
        self.delay_remaining = resolution.delay;
        self.phase = Phase::Resolving;
        debug!(question = question_index, ?outcome, "question resolved");
        self.listener.on_question_resolved(&resolution);
        self.last_resolution = Some(resolution);

        if !self.board.can_continue(self.config.play_in_turns) {
            self.finish(MatchOutcome::GameOver);
        } else if self.limit_reached() || self.sequencer.peek(&self.bank) == Step::Done {
            self.finish(MatchOutcome::Victory);
        } else {
            let next = self.board.next_turn(self.config.play_in_turns);
            debug!(player = %next, "turn passed");
        }
    }

    fn limit_reached(&self) -> bool {
        self.question_limit > 0 && self.questions_asked >= self.question_limit
    }

    fn finish(&mut self, outcome: MatchOutcome) {
        self.timer.stop();
        self.phase = match outcome {
            MatchOutcome::Victory => Phase::Victory,
            MatchOutcome::GameOver => Phase::GameOver,
        };

        let summary = MatchSummary {
            outcome,
            ranking: self.board.rank_players(),
            correct_answers: self.correct_answers,
            questions_asked: self.questions_asked,
            question_limit: self.question_limit,
            seed: self.config.seed,
        };
        info!(
            ?outcome,
            correct = summary.correct_answers,
            asked = summary.questions_asked,
            result = %summary.ranking.result_text(),
            "match ended"
        );

        if let Some(recorder) = self.recorder.as_mut() {
            for player in &summary.ranking.players {
                recorder.record(summary.seed, &player.name, player.display_score());
            }
        }
        self.listener.on_match_ended(&summary);
        self.summary = Some(summary);
    }
}

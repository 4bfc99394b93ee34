//! Match flow: timer, group sequencing and the session state machine.
//!
//! [`SessionController`] is the entry point. The other types are the parts
//! it is built from, exposed for hosts that want to show more than the
//! controller's own views (group progress, raw timer state).

pub mod controller;
pub mod listener;
pub mod sequencer;
pub mod state;
pub mod summary;
pub mod timer;

pub use controller::{SessionController, TickReport};
pub use listener::{MemoryScoreRecorder, NoopListener, ScoreEntry, ScoreRecorder, SessionListener};
pub use sequencer::{GroupSequencer, Step};
pub use state::{Phase, Progress, Resolution, SessionState};
pub use summary::{MatchOutcome, MatchSummary};
pub use timer::Timer;

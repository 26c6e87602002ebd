use crate::model::Candidate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod engine;

pub use engine::{count, instant_runoff, plurality};

#[derive(Debug, thiserror::Error)]
pub enum TallyError {
    #[error("no candidates remain in play; cannot elect a winner")]
    NoWinner,
}

pub type TallyResult<T> = std::result::Result<T, TallyError>;

/// First-choice vote counts, keyed in ascending candidate order.
///
/// Candidates nobody currently ranks first are absent, not present with a
/// zero count; callers that need the full roster must union with the
/// candidate list themselves.
pub type Tally = BTreeMap<Candidate, u64>;

/// One instant-runoff round: the standing tally and who was eliminated.
///
/// `eliminated` is `None` only for the final round, where a candidate
/// reached a majority instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round: u32,
    pub tally: Tally,
    pub eliminated: Option<Candidate>,
}

/// Outcome of an instant-runoff tabulation, round trace included.
///
/// The trace is diagnostic only; the winner is the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrvReport {
    pub winner: Candidate,
    #[serde(rename = "totalBallots")]
    pub total_ballots: u64,
    pub rounds: Vec<RoundResult>,
}

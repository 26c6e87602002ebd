pub mod election;

pub use election::{Ballot, BallotSet, Candidate};

#[derive(Debug, thiserror::Error)]
pub enum BallotError {
    #[error("ballot set has no rankings")]
    EmptyBallotSet,
    #[error("ranking has {found} candidates, expected {expected}")]
    RankingLength { expected: usize, found: usize },
    #[error("candidate {0} appears more than once in a ranking")]
    DuplicateCandidate(Candidate),
    #[error("ranking does not cover the same candidates as the rest of the ballot set")]
    RosterMismatch,
    #[error("ranking multiplicity must be positive")]
    ZeroMultiplicity,
}

pub type Result<T> = std::result::Result<T, BallotError>;

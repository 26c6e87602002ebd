use crate::model::{BallotError, BallotSet, Candidate};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid ballots: {0}")]
    Ballot(#[from] BallotError),
}

/// One line of a ballot file: a full ranking and how many voters cast it.
#[derive(Debug, Serialize, Deserialize)]
pub struct RankingRecord {
    pub ranking: Vec<String>,
    pub count: u64,
}

/// On-disk ballot file shape.
#[derive(Debug, Serialize, Deserialize)]
pub struct BallotFile {
    pub rankings: Vec<RankingRecord>,
}

/// Read a JSON ballot file into a validated [`BallotSet`].
pub fn read_ballot_file(path: &Path) -> Result<BallotSet, FormatError> {
    let file = File::open(path)?;
    let ballot_file: BallotFile = serde_json::from_reader(BufReader::new(file))?;

    let rankings = ballot_file.rankings.into_iter().map(|record| {
        let ranking = record.ranking.into_iter().map(Candidate::new).collect();
        (ranking, record.count)
    });

    Ok(BallotSet::new(rankings)?)
}

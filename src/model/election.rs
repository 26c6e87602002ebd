use super::{BallotError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A candidate label. Candidates have no structure beyond their label;
/// they compare, hash and sort by it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Candidate(String);

impl Candidate {
    pub fn new<S: Into<String>>(label: S) -> Candidate {
        Candidate(label.into())
    }

    pub fn label(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Candidate {
    fn from(label: &str) -> Candidate {
        Candidate::new(label)
    }
}

/// One voter's complete ranking, most-preferred candidate first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ballot {
    ranking: Vec<Candidate>,
}

impl Ballot {
    pub fn new(ranking: Vec<Candidate>) -> Ballot {
        Ballot { ranking }
    }

    /// The most-preferred candidate still on this ballot, if any remain.
    pub fn first_choice(&self) -> Option<&Candidate> {
        self.ranking.first()
    }

    pub fn ranking(&self) -> &[Candidate] {
        &self.ranking
    }

    pub fn len(&self) -> usize {
        self.ranking.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranking.is_empty()
    }

    /// Copy of this ballot with `candidate` struck out, preserving the
    /// relative order of everyone else.
    fn without_candidate(&self, candidate: &Candidate) -> Ballot {
        Ballot {
            ranking: self
                .ranking
                .iter()
                .filter(|c| *c != candidate)
                .cloned()
                .collect(),
        }
    }
}

/// The full set of cast ballots, expanded from `{ranking: multiplicity}`.
///
/// Immutable once built: elimination produces reduced copies via
/// [`BallotSet::with_candidate_removed`], so the original can still be
/// queried under other rules afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BallotSet {
    ballots: Vec<Ballot>,
    roster: Vec<Candidate>,
}

impl BallotSet {
    /// Expand `(ranking, multiplicity)` pairs into individual ballots.
    ///
    /// Every ranking must be a permutation of the same candidate set and
    /// every multiplicity must be positive; anything else is rejected here
    /// so the tally loop never sees a malformed ballot.
    pub fn new<I>(rankings: I) -> Result<BallotSet>
    where
        I: IntoIterator<Item = (Vec<Candidate>, u64)>,
    {
        let mut ballots = Vec::new();
        let mut roster: Option<BTreeSet<Candidate>> = None;

        for (ranking, multiplicity) in rankings {
            let mut seen = BTreeSet::new();
            for candidate in &ranking {
                if !seen.insert(candidate.clone()) {
                    return Err(BallotError::DuplicateCandidate(candidate.clone()));
                }
            }

            match &roster {
                None => roster = Some(seen),
                Some(roster) => {
                    if ranking.len() != roster.len() {
                        return Err(BallotError::RankingLength {
                            expected: roster.len(),
                            found: ranking.len(),
                        });
                    }
                    if seen != *roster {
                        return Err(BallotError::RosterMismatch);
                    }
                }
            }

            if multiplicity == 0 {
                return Err(BallotError::ZeroMultiplicity);
            }

            let ballot = Ballot::new(ranking);
            for _ in 1..multiplicity {
                ballots.push(ballot.clone());
            }
            ballots.push(ballot);
        }

        let roster = roster.ok_or(BallotError::EmptyBallotSet)?;
        Ok(BallotSet {
            ballots,
            roster: roster.into_iter().collect(),
        })
    }

    pub fn num_ballots(&self) -> usize {
        self.ballots.len()
    }

    pub fn num_candidates(&self) -> usize {
        self.roster.len()
    }

    /// Candidate roster in ascending label order.
    pub fn candidates(&self) -> &[Candidate] {
        &self.roster
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ballot> + '_ {
        self.ballots.iter()
    }

    /// The first remaining choice of every ballot that still ranks someone.
    ///
    /// Re-derived from the stored ballots on every call, so the sequence is
    /// restartable and never consumes the set.
    pub fn first_choices(&self) -> impl Iterator<Item = &Candidate> + '_ {
        self.ballots.iter().filter_map(Ballot::first_choice)
    }

    /// New set with `candidate` struck from every ballot and from the
    /// roster. Removing a candidate nobody ranks is a silent no-op.
    pub fn with_candidate_removed(&self, candidate: &Candidate) -> BallotSet {
        BallotSet {
            ballots: self
                .ballots
                .iter()
                .map(|ballot| ballot.without_candidate(candidate))
                .collect(),
            roster: self
                .roster
                .iter()
                .filter(|c| *c != candidate)
                .cloned()
                .collect(),
        }
    }
}

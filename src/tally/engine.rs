use super::{IrvReport, RoundResult, Tally, TallyError, TallyResult};
use crate::model::{BallotSet, Candidate};
use itertools::Itertools;
use std::collections::BTreeSet;

/// Count the first remaining choice of every ballot.
pub fn count(ballots: &BallotSet) -> Tally {
    let mut tally = Tally::new();
    for choice in ballots.first_choices() {
        *tally.entry(choice.clone()).or_insert(0) += 1;
    }
    tally
}

/// Rank candidates by first-choice votes, most votes first.
///
/// Equal counts fall back to ascending candidate order, so the ranking is
/// total and reproducible across runs. `limit` keeps only the top entries.
/// No winner is declared: plurality means most votes, not a majority.
pub fn plurality(ballots: &BallotSet, limit: Option<usize>) -> Vec<(Candidate, u64)> {
    let ranked = count(ballots)
        .into_iter()
        .sorted_by(|(a, a_votes), (b, b_votes)| b_votes.cmp(a_votes).then_with(|| a.cmp(b)));

    match limit {
        Some(n) => ranked.take(n).collect(),
        None => ranked.collect(),
    }
}

/// Eliminate trailing candidates round by round until one holds a strict
/// majority of the ballots still in play.
///
/// Each round re-tallies first choices from scratch over the remaining
/// ballots, with every still-active candidate present in the tally even at
/// zero votes. A candidate wins on `votes >= total / 2 + 1`; exactly half
/// is not a majority. With no winner, the candidate with the fewest votes
/// is struck from every ballot, ties for fewest going to the candidate
/// earliest in ascending label order. The input set is never mutated.
///
/// Fails with [`TallyError::NoWinner`] only when elimination runs out of
/// candidates entirely, which a validated [`BallotSet`] cannot produce.
pub fn instant_runoff(ballots: &BallotSet) -> TallyResult<IrvReport> {
    let total_ballots = ballots.num_ballots() as u64;
    let mut remaining = ballots.clone();
    let mut active: BTreeSet<Candidate> = ballots.candidates().iter().cloned().collect();
    let mut rounds = Vec::new();
    let mut round = 1;

    loop {
        let mut tally = count(&remaining);
        // A zero-vote candidate is still in play until formally eliminated.
        for candidate in &active {
            tally.entry(candidate.clone()).or_insert(0);
        }

        let total: u64 = tally.values().sum();
        if total == 0 {
            return Err(TallyError::NoWinner);
        }

        let threshold = total / 2 + 1;
        let winner = tally
            .iter()
            .find(|&(_, &votes)| votes >= threshold)
            .map(|(candidate, _)| candidate.clone());
        if let Some(winner) = winner {
            rounds.push(RoundResult {
                round,
                tally,
                eliminated: None,
            });
            return Ok(IrvReport {
                winner,
                total_ballots,
                rounds,
            });
        }

        let loser = match tally.iter().min_by_key(|&(_, &votes)| votes) {
            Some((candidate, _)) => candidate.clone(),
            None => return Err(TallyError::NoWinner),
        };

        remaining = remaining.with_candidate_removed(&loser);
        active.remove(&loser);
        rounds.push(RoundResult {
            round,
            tally,
            eliminated: Some(loser),
        });
        round += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BallotSet;

    fn ranking(labels: &[&str]) -> Vec<Candidate> {
        labels.iter().map(|label| Candidate::new(*label)).collect()
    }

    fn pair(label: &str, votes: u64) -> (Candidate, u64) {
        (Candidate::new(label), votes)
    }

    /// 1002 ballots over four candidates; nobody holds a first-choice
    /// majority.
    fn four_way() -> BallotSet {
        BallotSet::new(vec![
            (ranking(&["A", "B", "D", "C"]), 400),
            (ranking(&["D", "C", "B", "A"]), 300),
            (ranking(&["B", "D", "C", "A"]), 200),
            (ranking(&["C", "A", "B", "D"]), 100),
            (ranking(&["C", "D", "A", "B"]), 2),
        ])
        .unwrap()
    }

    /// 1000 ballots where the plurality leader loses once the smallest
    /// candidate's votes transfer.
    fn squeeze_three() -> BallotSet {
        BallotSet::new(vec![
            (ranking(&["A", "B", "C"]), 499),
            (ranking(&["B", "C", "A"]), 3),
            (ranking(&["C", "B", "A"]), 498),
        ])
        .unwrap()
    }

    #[test]
    fn every_ballot_contributes_one_first_choice() {
        let ballots = four_way();
        let tally = count(&ballots);
        let total: u64 = tally.values().sum();
        assert_eq!(total, ballots.num_ballots() as u64);
    }

    #[test]
    fn count_omits_candidates_with_no_first_choice_votes() {
        let ballots = BallotSet::new(vec![
            (ranking(&["A", "B", "C"]), 2),
            (ranking(&["C", "A", "B"]), 1),
        ])
        .unwrap();

        let tally = count(&ballots);
        assert!(!tally.contains_key(&Candidate::new("B")));
        assert_eq!(tally.len(), 2);
    }

    #[test]
    fn plurality_ranks_by_descending_count() {
        let result = plurality(&four_way(), None);
        assert_eq!(
            result,
            vec![pair("A", 400), pair("D", 300), pair("B", 200), pair("C", 102)]
        );

        let total: u64 = result.iter().map(|(_, votes)| votes).sum();
        assert_eq!(total, 1002);
    }

    #[test]
    fn plurality_limit_truncates() {
        let result = plurality(&four_way(), Some(2));
        assert_eq!(result, vec![pair("A", 400), pair("D", 300)]);
    }

    #[test]
    fn plurality_breaks_ties_by_label() {
        let ballots = BallotSet::new(vec![
            (ranking(&["B", "A"]), 1),
            (ranking(&["A", "B"]), 1),
        ])
        .unwrap();

        assert_eq!(plurality(&ballots, None), vec![pair("A", 1), pair("B", 1)]);
    }

    #[test]
    fn majority_short_circuits_without_elimination() {
        let ballots = BallotSet::new(vec![
            (ranking(&["A", "B"]), 3),
            (ranking(&["B", "A"]), 1),
        ])
        .unwrap();

        let report = instant_runoff(&ballots).unwrap();
        assert_eq!(report.winner, Candidate::new("A"));
        assert_eq!(report.rounds.len(), 1);
        assert_eq!(report.rounds[0].eliminated, None);
    }

    #[test]
    fn exactly_half_is_not_a_majority() {
        let ballots = BallotSet::new(vec![
            (ranking(&["A", "B"]), 2),
            (ranking(&["B", "A"]), 2),
        ])
        .unwrap();

        // 2 of 4 votes must not win outright; A falls to the label
        // tie-break and B takes the second round with all four votes.
        let report = instant_runoff(&ballots).unwrap();
        assert_eq!(report.rounds.len(), 2);
        assert_eq!(report.rounds[0].eliminated, Some(Candidate::new("A")));
        assert_eq!(report.winner, Candidate::new("B"));
    }

    #[test]
    fn elimination_transfers_votes_to_later_choices() {
        // A leads on first choices with 499 of 1000, short of a majority.
        // B is eliminated first and B's ballots fall through to C, who
        // passes the threshold with 501. The plurality leader must lose.
        let report = instant_runoff(&squeeze_three()).unwrap();
        assert_eq!(report.rounds[0].eliminated, Some(Candidate::new("B")));
        assert_eq!(report.winner, Candidate::new("C"));

        let final_tally = &report.rounds.last().unwrap().tally;
        assert_eq!(final_tally.get(&Candidate::new("C")), Some(&501));
        assert_eq!(final_tally.get(&Candidate::new("A")), Some(&499));
    }

    #[test]
    fn four_way_race_runs_multiple_rounds() {
        let report = instant_runoff(&four_way()).unwrap();

        let eliminated: Vec<_> = report
            .rounds
            .iter()
            .filter_map(|round| round.eliminated.clone())
            .collect();
        assert_eq!(eliminated, ranking(&["C", "B"]));
        assert_eq!(report.winner, Candidate::new("D"));
        assert_eq!(report.rounds.len(), 3);
    }

    #[test]
    fn rounds_are_bounded_by_the_candidate_count() {
        let ballots = four_way();
        let report = instant_runoff(&ballots).unwrap();
        assert!(report.rounds.len() <= ballots.num_candidates());
    }

    #[test]
    fn tabulation_is_idempotent() {
        let ballots = squeeze_three();

        let first = instant_runoff(&ballots).unwrap();
        let second = instant_runoff(&ballots).unwrap();
        assert_eq!(first, second);

        assert_eq!(plurality(&ballots, None), plurality(&ballots, None));
        assert_eq!(ballots.num_ballots(), 1000);
    }

    #[test]
    fn exhausted_ballot_set_yields_no_winner() {
        let ballots = BallotSet::new(vec![(ranking(&["A", "B"]), 1)]).unwrap();
        let emptied = ballots
            .with_candidate_removed(&Candidate::new("A"))
            .with_candidate_removed(&Candidate::new("B"));

        assert!(matches!(
            instant_runoff(&emptied),
            Err(TallyError::NoWinner)
        ));
    }
}

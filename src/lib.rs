//! Tallying of preferential (ranked-choice) ballots.
//!
//! [`model::BallotSet`] expands a compact `{ranking: multiplicity}`
//! specification into individual ballots; [`tally`] computes election
//! outcomes from it under simple plurality or instant-runoff voting.

pub mod formats;
pub mod model;
pub mod tally;

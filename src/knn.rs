//! k-nearest-neighbour vote over the three class populations.
//!
//! ```text
//! for each class: distances to every reference point, sorted ascending,
//!                 padded with the sentinel (100.0) up to k (10) entries
//! repeat k times: winner = round_winner(head_i, head_e, head_l)
//!                 votes[winner] += 1; pop winner's head
//! ictal = 1 - votes_i / k        early = votes_e / k      (one decimal)
//! ```
//!
//! A class with no reference points is an all-sentinel list and can still
//! win rounds once the other lists are exhausted.
use crate::config::ClassifierConfig;
use crate::features::FeatureVector;
use crate::store::{PointClass, ReferencePopulation};
use std::collections::VecDeque;

/// Winner of one voting round given the three current head distances.
///
/// Interictal and early are compared first: interictal is the candidate only
/// if strictly closer, so a tie goes to early. The candidate then faces
/// late and must again be strictly closer, so a tie goes to late.
///
/// | heads (i, e, l)  | winner     |
/// |------------------|------------|
/// | (1, 2, 3)        | interictal |
/// | (1, 1, 3)        | early      |
/// | (1, 2, 1)        | late       |
/// | (100, 100, 100)  | late       |
pub fn round_winner(interictal: f64, early: f64, late: f64) -> PointClass {
    let (candidate, head) = if interictal < early {
        (PointClass::Interictal, interictal)
    } else {
        (PointClass::EarlyIctal, early)
    };
    if head < late {
        candidate
    } else {
        PointClass::LateIctal
    }
}

/// Ascending distances from `query` to `points`, padded with `sentinel` to
/// at least `k` entries.
pub fn sorted_distances(query: &FeatureVector, points: &[FeatureVector], k: usize, sentinel: f64) -> VecDeque<f64> {
    let mut d: Vec<f64> = points.iter().map(|p| query.distance(p)).collect();
    d.sort_by(f64::total_cmp);
    if d.len() < k {
        d.resize(k, sentinel);
    }
    d.into()
}

/// Per-class vote counts after `k` rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Votes {
    pub interictal: usize,
    pub early: usize,
    pub late: usize,
}

impl Votes {
    fn add(&mut self, class: PointClass) {
        match class {
            PointClass::Interictal => self.interictal += 1,
            PointClass::EarlyIctal => self.early += 1,
            PointClass::LateIctal => self.late += 1,
        }
    }
}

/// Run the `k` voting rounds.
pub fn vote(query: &FeatureVector, population: &ReferencePopulation, cfg: &ClassifierConfig) -> Votes {
    let mut heads = PointClass::ALL
        .map(|c| sorted_distances(query, population.class(c), cfg.k, cfg.sentinel));
    let mut votes = Votes::default();

    for _ in 0..cfg.k {
        let front = |q: &VecDeque<f64>| q.front().copied().unwrap_or(cfg.sentinel);
        let winner = round_winner(front(&heads[0]), front(&heads[1]), front(&heads[2]));
        votes.add(winner);
        let idx = match winner {
            PointClass::Interictal => 0,
            PointClass::EarlyIctal => 1,
            PointClass::LateIctal => 2,
        };
        heads[idx].pop_front();
    }
    votes
}

/// Continuous scores derived from the votes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scores {
    /// `1 - interictal_votes / k`, one decimal.
    pub ictal: f64,
    /// `early_votes / k`, one decimal.
    pub early: f64,
}

impl Scores {
    pub fn from_votes(votes: &Votes, k: usize) -> Self {
        let k = k as f64;
        Self {
            ictal: round1(1.0 - votes.interictal as f64 / k),
            early: round1(votes.early as f64 / k),
        }
    }
}

/// Score `query` against one patient's population.
pub fn classify(query: &FeatureVector, population: &ReferencePopulation, cfg: &ClassifierConfig) -> Scores {
    Scores::from_votes(&vote(query, population, cfg), cfg.k)
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

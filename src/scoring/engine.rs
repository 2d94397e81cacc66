use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::error::RankingError;
use super::factors::{clamp_score, score_factor, Factor};
use super::weights::WeightVector;
use crate::colleges::College;

/// A college with its per-factor scores, overall score and rank.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCollege {
    #[serde(flatten)]
    pub college: College,
    pub detailed_scores: BTreeMap<Factor, f64>,
    pub overall_score: u32,
    /// 1-based
    pub rank: usize,
}

impl RankedCollege {
    pub fn score(&self, factor: Factor) -> f64 {
        self.detailed_scores.get(&factor).copied().unwrap_or(0.0)
    }
}

/// Result of ranking: the ordered colleges plus any records that were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranking {
    pub ranked: Vec<RankedCollege>,
    /// Always `RankingError::MalformedRecord`
    pub skipped: Vec<RankingError>,
}

impl Ranking {
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    /// Look up by 1-based rank
    pub fn at_rank(&self, rank: usize) -> Option<&RankedCollege> {
        rank.checked_sub(1).and_then(|i| self.ranked.get(i))
    }

    pub fn find(&self, id: &str) -> Option<&RankedCollege> {
        self.ranked.iter().find(|r| r.college.id == id)
    }
}

/// Score all 8 factors for one college
pub fn detailed_scores(college: &College) -> BTreeMap<Factor, f64> {
    Factor::ALL
        .into_iter()
        .map(|f| (f, score_factor(college, f)))
        .collect()
}

/// Weighted average of the factor scores, rounded to an integer in [0, 100].
pub fn score_overall(college: &College, weights: &WeightVector) -> Result<u32, RankingError> {
    weighted_average(&detailed_scores(college), weights)
}

fn weighted_average(
    scores: &BTreeMap<Factor, f64>,
    weights: &WeightVector,
) -> Result<u32, RankingError> {
    let total = weights.total();
    if total == 0 {
        return Err(RankingError::InvalidWeights);
    }
    let weighted: f64 = weights
        .entries()
        .map(|(f, w)| scores.get(&f).copied().unwrap_or(0.0) * f64::from(w))
        .sum();
    Ok(clamp_score((weighted / total as f64).round()) as u32)
}

/// Rank colleges by overall score, highest first.
///
/// Ties keep input order. Records missing an id or name are left out of the
/// ranking and reported in `Ranking::skipped`. An empty input yields an
/// empty ranking regardless of the weights.
pub fn rank(colleges: &[College], weights: &WeightVector) -> Result<Ranking, RankingError> {
    if colleges.is_empty() {
        return Ok(Ranking::default());
    }
    if weights.total() == 0 {
        return Err(RankingError::InvalidWeights);
    }

    let mut skipped = Vec::new();
    let mut ranked = Vec::with_capacity(colleges.len());

    for (index, college) in colleges.iter().enumerate() {
        if let Some(reason) = college.missing_identity() {
            warn!(index, reason, "Skipping malformed college record");
            skipped.push(RankingError::MalformedRecord {
                index,
                reason: reason.to_string(),
            });
            continue;
        }

        let detailed = detailed_scores(college);
        let overall = weighted_average(&detailed, weights)?;
        debug!(id = %college.id, overall, "Scored college");

        ranked.push(RankedCollege {
            college: college.clone(),
            detailed_scores: detailed,
            overall_score: overall,
            rank: 0,
        });
    }

    // sort_by is stable, so equal scores keep input order
    ranked.sort_by(|a, b| b.overall_score.cmp(&a.overall_score));
    for (i, entry) in ranked.iter_mut().enumerate() {
        entry.rank = i + 1;
    }

    Ok(Ranking { ranked, skipped })
}

use super::engine::{RankedCollege, Ranking};
use super::error::RankingError;
use super::factors::Factor;

/// Side-by-side view of several ranked colleges.
#[derive(Debug, Clone)]
pub struct Comparison<'a> {
    pub colleges: Vec<&'a RankedCollege>,
    pub rows: Vec<FactorRow>,
}

/// One factor across all compared colleges.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorRow {
    pub factor: Factor,
    /// In the same order as `Comparison::colleges`
    pub scores: Vec<f64>,
    /// Index of the best score; `None` when everyone ties
    pub leader: Option<usize>,
}

/// Compare colleges from a ranking by id.
///
/// Colleges keep the order the ids were given in. Unknown ids fail.
pub fn compare<'a, S: AsRef<str>>(
    ranking: &'a Ranking,
    ids: &[S],
) -> Result<Comparison<'a>, RankingError> {
    let colleges = ids
        .iter()
        .map(|id| {
            let id = id.as_ref();
            ranking
                .find(id)
                .ok_or_else(|| RankingError::UnknownCollege(id.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let rows = Factor::ALL
        .into_iter()
        .map(|factor| {
            let scores: Vec<f64> = colleges.iter().map(|c| c.score(factor)).collect();
            FactorRow {
                factor,
                leader: leader(&scores),
                scores,
            }
        })
        .collect();

    Ok(Comparison { colleges, rows })
}

fn leader(scores: &[f64]) -> Option<usize> {
    let (best, max) = scores
        .iter()
        .copied()
        .enumerate()
        .fold(None, |acc: Option<(usize, f64)>, (i, s)| match acc {
            Some((_, m)) if m >= s => acc,
            _ => Some((i, s)),
        })?;
    let tied = scores.iter().filter(|&&s| s == max).count();
    (tied < scores.len()).then_some(best)
}

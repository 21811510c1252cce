use crate::metrics::stats::{mean, median, negative_mean, std_dev};
use crate::metrics::{ScoreBoard, ScoreError, Scorer, sort_points_by_rank};
use crate::model::{Series, Table};

/// Fallback spread when no rank position has a nonzero standard deviation.
const STD_FALLBACK: f64 = 1.0;

#[derive(Debug, Clone)]
struct RankBaseline {
    mean_by_rank: Vec<f64>,
    std_by_rank: Option<Vec<f64>>,
}

/// Scores a ranking by how far the realized points at each rank fall below the
/// historical average for that rank.
#[derive(Debug, Clone)]
pub struct DifferenceScorer {
    k: Option<usize>,
    standardize: bool,
    fitted: Option<RankBaseline>,
}

impl DifferenceScorer {
    pub fn new(k: Option<usize>, standardize: bool) -> Self {
        Self {
            k: k.filter(|&k| k > 0),
            standardize,
            fitted: None,
        }
    }

    /// Builds the per-rank baseline from a points-by-period table. Each column is
    /// sorted descending on its own, so row `r` holds the `r`-th best outcome of
    /// every period that had at least `r + 1` observed values.
    pub fn fit(&mut self, points_by_period: &Table) -> Result<&mut Self, ScoreError> {
        let sorted_periods = points_by_period
            .columns()
            .iter()
            .map(|column| {
                let mut values = column
                    .values
                    .iter()
                    .flatten()
                    .copied()
                    .filter(|v| !v.is_nan())
                    .collect::<Vec<_>>();
                values.sort_by(|a, b| b.total_cmp(a));
                values
            })
            .collect::<Vec<_>>();

        let depth = sorted_periods.iter().map(Vec::len).max().unwrap_or(0);
        let mut mean_by_rank = Vec::with_capacity(depth);
        let mut std_by_rank = Vec::with_capacity(depth);
        for r in 0..depth {
            let at_rank = sorted_periods
                .iter()
                .filter_map(|period| period.get(r).copied())
                .collect::<Vec<_>>();
            mean_by_rank.push(mean(&at_rank).unwrap_or(0.0));
            std_by_rank.push(std_dev(&at_rank).unwrap_or(0.0));
        }

        let std_by_rank = self.standardize.then(|| backfill_zero_std(std_by_rank));

        tracing::debug!(
            n_periods = points_by_period.n_columns(),
            n_fitted = depth,
            standardize = self.standardize,
            "fitted difference scorer"
        );
        self.fitted = Some(RankBaseline {
            mean_by_rank,
            std_by_rank,
        });
        Ok(self)
    }

    pub fn n_fitted(&self) -> usize {
        self.fitted.as_ref().map_or(0, |f| f.mean_by_rank.len())
    }

    pub fn mean_by_rank(&self) -> Option<&[f64]> {
        self.fitted.as_ref().map(|f| f.mean_by_rank.as_slice())
    }

    pub fn std_by_rank(&self) -> Option<&[f64]> {
        self.fitted.as_ref().and_then(|f| f.std_by_rank.as_deref())
    }

    /// Mean shortfall over the ranks that fell below their historical average.
    /// Returns 0.0 when no rank underperformed, including when nothing overlaps.
    pub fn score_ranking(&self, ranks: &Series, actual: &Series) -> Result<f64, ScoreError> {
        let fitted = self.fitted.as_ref().ok_or(ScoreError::NotFitted)?;
        let points_by_rank = sort_points_by_rank(ranks, actual);
        let max_idx = points_by_rank
            .len()
            .min(fitted.mean_by_rank.len())
            .min(self.k.unwrap_or(usize::MAX));

        let differences = (0..max_idx)
            .map(|r| {
                let diff = points_by_rank[r] - fitted.mean_by_rank[r];
                match &fitted.std_by_rank {
                    Some(std) => diff / std[r],
                    None => diff,
                }
            })
            .collect::<Vec<_>>();

        match negative_mean(&differences) {
            Some(score) => Ok(score),
            None => {
                tracing::debug!(
                    source = ranks.name(),
                    n_compared = max_idx,
                    "no underperforming ranks"
                );
                Ok(0.0)
            }
        }
    }

    pub fn score_table(&self, ranks: &Table, actual: &Series) -> Result<ScoreBoard, ScoreError> {
        Scorer::score(self, ranks, Some(actual))
    }
}

impl Scorer for DifferenceScorer {
    fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    fn metric(&self, ranks: &Series, actual: Option<&Series>) -> Result<f64, ScoreError> {
        let actual = actual.ok_or(ScoreError::MissingActual)?;
        self.score_ranking(ranks, actual)
    }
}

/// Replaces zero entries with the median of the nonzero ones.
fn backfill_zero_std(mut std_by_rank: Vec<f64>) -> Vec<f64> {
    let nonzero = std_by_rank
        .iter()
        .copied()
        .filter(|&s| s > 0.0)
        .collect::<Vec<_>>();
    let fill = median(&nonzero).unwrap_or(STD_FALLBACK);
    for s in std_by_rank.iter_mut() {
        if *s == 0.0 {
            *s = fill;
        }
    }
    std_by_rank
}

#[cfg(test)]
#[path = "../../tests/src_inline/metrics/difference.rs"]
mod tests;

//! DCG scorer: fit once on realized points, then score many candidate rankings.

use crate::metrics::dcg::{Numerator, cutoff, dcg};
use crate::metrics::{Points, ScoreBoard, ScoreError, Scorer, sort_points_by_rank};
use crate::model::{Series, Table};

#[derive(Debug, Clone)]
struct FittedPoints {
    points: Series,
    max_score: Option<f64>,
}

/// DCG of each ranking against a fitted set of realized points.
#[derive(Debug, Clone)]
pub struct DcgScorer {
    k: Option<usize>,
    numerator: Numerator,
    normalize: bool,
    fitted: Option<FittedPoints>,
}

impl DcgScorer {
    pub fn new(k: Option<usize>, numerator: Numerator, normalize: bool) -> Self {
        Self {
            k: k.filter(|&k| k > 0),
            numerator,
            normalize,
            fitted: None,
        }
    }

    pub fn from_name(k: Option<usize>, numerator: &str, normalize: bool) -> Result<Self, ScoreError> {
        Ok(Self::new(k, numerator.parse()?, normalize))
    }

    /// Stores the ground truth, replacing any earlier fit. With normalization,
    /// also computes the score of the perfect ordering, which must be positive and
    /// finite.
    pub fn fit<'a>(&mut self, points: impl Into<Points<'a>>) -> Result<&mut Self, ScoreError> {
        self.fitted = None;
        let points = points.into().into_series()?;

        let max_score = if self.normalize {
            let ideal = points.sorted_desc();
            let max_score = dcg(&ideal, self.k, self.numerator, false);
            if !max_score.is_finite() || max_score <= 0.0 {
                return Err(ScoreError::NonPositiveIdeal(max_score));
            }
            Some(max_score)
        } else {
            None
        };

        tracing::debug!(
            n_items = points.len(),
            max_score = ?max_score,
            "fitted DCG scorer"
        );
        self.fitted = Some(FittedPoints { points, max_score });
        Ok(self)
    }

    pub fn ideal_score(&self) -> Option<f64> {
        self.fitted.as_ref().and_then(|f| f.max_score)
    }

    pub fn depth(&self) -> Option<usize> {
        self.k
    }

    /// Number of ranked items that contribute for a ranking of `n` matched items.
    pub fn effective_depth(&self, n: usize) -> usize {
        cutoff(self.k, n)
    }

    pub fn score_ranking(&self, ranks: &Series) -> Result<f64, ScoreError> {
        let fitted = self.fitted.as_ref().ok_or(ScoreError::NotFitted)?;
        let points_by_rank = sort_points_by_rank(ranks, &fitted.points);
        if points_by_rank.is_empty() {
            tracing::warn!(source = ranks.name(), "no ranked items overlap the fitted points");
        }
        let score = dcg(&points_by_rank, self.k, self.numerator, false);
        Ok(match fitted.max_score {
            Some(max_score) => score / max_score,
            None => score,
        })
    }

    pub fn score_table(&self, ranks: &Table) -> Result<ScoreBoard, ScoreError> {
        Scorer::score(self, ranks, None)
    }
}

impl Scorer for DcgScorer {
    fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    fn metric(&self, ranks: &Series, _actual: Option<&Series>) -> Result<f64, ScoreError> {
        self.score_ranking(ranks)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/metrics/dcg_scorer.rs"]
mod tests;

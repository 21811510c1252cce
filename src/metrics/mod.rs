pub mod composite;
pub mod dcg;
pub mod dcg_scorer;
pub mod difference;
pub mod stats;

use crate::model::{Series, Table};

pub use dcg_scorer::DcgScorer;
pub use difference::DifferenceScorer;

#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("unsupported numerator `{0}` (use `rel` or `exp`)")]
    UnsupportedNumerator(String),
    #[error("normalization not possible with provided input (ideal score {0} must be positive and finite)")]
    NonPositiveIdeal(f64),
    #[error("input must have at most {max} value column(s), got {got}")]
    Shape { max: usize, got: usize },
    #[error("scorer must be fit before scoring")]
    NotFitted,
    #[error("difference scoring requires realized points for the scored period")]
    MissingActual,
}

/// Scores in the order the ranking sources were presented.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct ScoreBoard {
    pub entries: Vec<(String, f64)>,
}

impl ScoreBoard {
    pub fn get(&self, source: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == source)
            .map(|(_, score)| *score)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Ground-truth input for fitting: a single series or a single-column table.
#[derive(Debug, Clone, Copy)]
pub enum Points<'a> {
    Series(&'a Series),
    Table(&'a Table),
}

impl<'a> From<&'a Series> for Points<'a> {
    fn from(value: &'a Series) -> Self {
        Points::Series(value)
    }
}

impl<'a> From<&'a Table> for Points<'a> {
    fn from(value: &'a Table) -> Self {
        Points::Table(value)
    }
}

impl Points<'_> {
    /// Canonical "points" series. Missing cells of a table column are dropped.
    pub fn into_series(self) -> Result<Series, ScoreError> {
        match self {
            Points::Series(s) => Ok(s.clone().rename("points")),
            Points::Table(t) => match t.n_columns() {
                0 => Ok(Series::new("points")),
                1 => Ok(t.column_at(0).rename("points")),
                got => Err(ScoreError::Shape { max: 1, got }),
            },
        }
    }
}

/// Shared fit/score contract: `metric` scores one ranking, `score` applies it to
/// every column of a rankings table.
pub trait Scorer {
    fn is_fitted(&self) -> bool;

    fn metric(&self, ranks: &Series, actual: Option<&Series>) -> Result<f64, ScoreError>;

    fn score(&self, ranks: &Table, actual: Option<&Series>) -> Result<ScoreBoard, ScoreError> {
        if !self.is_fitted() {
            return Err(ScoreError::NotFitted);
        }
        let mut entries = Vec::with_capacity(ranks.n_columns());
        for idx in 0..ranks.n_columns() {
            let column = ranks.column_at(idx);
            let score = self.metric(&column, actual)?;
            entries.push((column.name().to_string(), score));
        }
        Ok(ScoreBoard { entries })
    }
}

/// Values of `points` in the order given by `ranks` (ascending, stable). Items
/// missing from either side are dropped.
pub fn sort_points_by_rank(ranks: &Series, points: &Series) -> Vec<f64> {
    ranks
        .ranked_items()
        .into_iter()
        .filter_map(|item| points.get(item))
        .filter(|v| !v.is_nan())
        .collect()
}

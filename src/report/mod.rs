pub mod json;
pub mod text;

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary {
    pub depth: Option<usize>,
    pub numerator: String,
    pub normalize: bool,
    pub standardize: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceSummary {
    pub source: String,
    pub overlap: usize,
    pub dcg: f64,
    pub difference: f64,
    pub dcg_rank: usize,
    pub difference_rank: usize,
    pub composite: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool: String,
    pub version: String,
    pub period: String,
    pub profile: ProfileSummary,
    pub n_periods: usize,
    pub n_scored_items: usize,
    pub ideal_dcg: Option<f64>,
    pub n_fitted_ranks: usize,
    /// Best composite first.
    pub sources: Vec<SourceSummary>,
}

pub fn format_f64_6(v: f64) -> String {
    if v.is_nan() {
        return "NA".to_string();
    }
    format!("{:.6}", v)
}

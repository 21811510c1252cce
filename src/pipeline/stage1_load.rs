use std::path::Path;

use crate::input::{LoadOptions, load_table};
use crate::model::{Series, Table};
use crate::pipeline::PipelineError;

#[derive(Debug, Clone)]
pub struct Stage1Params<'a> {
    pub points_path: &'a Path,
    pub ranks_path: &'a Path,
    pub period: Option<&'a str>,
    pub points_options: LoadOptions,
    pub ranks_options: LoadOptions,
}

#[derive(Debug)]
pub struct Stage1Output {
    /// Points by period, one column per period.
    pub history: Table,
    /// Ranks by source, one column per source.
    pub ranks: Table,
    pub period: String,
    /// Realized points for the scored period.
    pub actual: Series,
}

pub fn run_stage1(params: &Stage1Params<'_>) -> Result<Stage1Output, PipelineError> {
    let history = load_table(params.points_path, &params.points_options)?;
    let ranks = load_table(params.ranks_path, &params.ranks_options)?;
    if ranks.n_columns() == 0 {
        return Err(PipelineError::InvalidInput(format!(
            "no ranking sources found in {}",
            params.ranks_path.display()
        )));
    }

    let period = resolve_period(&history, params.period)?;
    let actual = history
        .column(&period)
        .ok_or_else(|| PipelineError::InvalidInput(format!("period `{period}` not found")))?;

    tracing::info!(
        period = %period,
        n_periods = history.n_columns(),
        n_sources = ranks.n_columns(),
        n_scored_items = actual.len(),
        "stage1 inputs ready"
    );

    Ok(Stage1Output {
        history,
        ranks,
        period,
        actual,
    })
}

/// The requested period, or the last column of the points table.
pub fn resolve_period(history: &Table, requested: Option<&str>) -> Result<String, PipelineError> {
    let names = history.column_names();
    match requested {
        Some(name) if names.contains(&name) => Ok(name.to_string()),
        Some(name) => Err(PipelineError::InvalidInput(format!(
            "period `{}` not found (available: {})",
            name,
            names.join(", ")
        ))),
        None => names
            .last()
            .map(|name| name.to_string())
            .ok_or_else(|| PipelineError::InvalidInput("points table has no periods".to_string())),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_load.rs"]
mod tests;

use crate::metrics::{DcgScorer, DifferenceScorer};
use crate::model::profile::ScoringProfile;
use crate::pipeline::PipelineError;
use crate::pipeline::stage1_load::Stage1Output;

#[derive(Debug)]
pub struct Stage2Output {
    pub dcg: DcgScorer,
    pub difference: DifferenceScorer,
}

/// DCG is fit on the scored period only; the difference baseline uses every period.
pub fn run_stage2(
    stage1: &Stage1Output,
    profile: &ScoringProfile,
) -> Result<Stage2Output, PipelineError> {
    let mut dcg = DcgScorer::new(profile.depth, profile.numerator, profile.normalize);
    dcg.fit(&stage1.actual)?;

    let mut difference = DifferenceScorer::new(profile.depth, profile.standardize);
    difference.fit(&stage1.history)?;

    tracing::info!(
        ideal_dcg = ?dcg.ideal_score(),
        n_fitted_ranks = difference.n_fitted(),
        "stage2 scorers fitted"
    );

    Ok(Stage2Output { dcg, difference })
}

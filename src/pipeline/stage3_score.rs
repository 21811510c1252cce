use crate::metrics::{ScoreBoard, sort_points_by_rank};
use crate::pipeline::PipelineError;
use crate::pipeline::stage1_load::Stage1Output;
use crate::pipeline::stage2_fit::Stage2Output;

#[derive(Debug)]
pub struct Stage3Output {
    pub dcg: ScoreBoard,
    pub difference: ScoreBoard,
    /// Ranked items per source that also have realized points.
    pub overlap: Vec<(String, usize)>,
}

pub fn run_stage3(stage1: &Stage1Output, stage2: &Stage2Output) -> Result<Stage3Output, PipelineError> {
    let dcg = stage2.dcg.score_table(&stage1.ranks)?;
    let difference = stage2.difference.score_table(&stage1.ranks, &stage1.actual)?;

    let overlap = (0..stage1.ranks.n_columns())
        .map(|idx| {
            let ranks = stage1.ranks.column_at(idx);
            let n = sort_points_by_rank(&ranks, &stage1.actual).len();
            if n < ranks.len() {
                tracing::debug!(
                    source = ranks.name(),
                    ranked = ranks.len(),
                    matched = n,
                    "ranked items without realized points were excluded"
                );
            }
            (ranks.name().to_string(), n)
        })
        .collect();

    Ok(Stage3Output {
        dcg,
        difference,
        overlap,
    })
}

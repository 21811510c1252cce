use crate::metrics::composite::{CompositeRow, composite};
use crate::pipeline::stage3_score::Stage3Output;

pub fn run_stage4(stage3: &Stage3Output) -> Vec<CompositeRow> {
    let rows = composite(&stage3.dcg, &stage3.difference);
    if let Some(best) = rows.first() {
        tracing::info!(
            source = %best.source,
            composite = best.composite,
            "stage4 best ranking source"
        );
    }
    rows
}

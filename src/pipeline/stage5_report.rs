use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::metrics::composite::CompositeRow;
use crate::model::profile::ScoringProfile;
use crate::pipeline::PipelineError;
use crate::pipeline::stage1_load::Stage1Output;
use crate::pipeline::stage2_fit::Stage2Output;
use crate::pipeline::stage3_score::Stage3Output;
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{ProfileSummary, SourceSummary, SummaryData, format_f64_6};

#[derive(Debug, Clone)]
pub struct Stage5Input<'a> {
    pub stage1: &'a Stage1Output,
    pub stage2: &'a Stage2Output,
    pub stage3: &'a Stage3Output,
    pub rows: &'a [CompositeRow],
    pub profile: &'a ScoringProfile,
    pub tool_version: String,
}

pub fn build_summary(input: &Stage5Input<'_>) -> SummaryData {
    let sources = input
        .rows
        .iter()
        .map(|row| SourceSummary {
            source: row.source.clone(),
            overlap: input
                .stage3
                .overlap
                .iter()
                .find(|(name, _)| *name == row.source)
                .map_or(0, |(_, n)| *n),
            dcg: row.dcg,
            difference: row.difference,
            dcg_rank: row.dcg_rank,
            difference_rank: row.difference_rank,
            composite: row.composite,
        })
        .collect();

    SummaryData {
        tool: "yafsa".to_string(),
        version: input.tool_version.clone(),
        period: input.stage1.period.clone(),
        profile: ProfileSummary {
            depth: input.profile.depth,
            numerator: input.profile.numerator.as_str().to_string(),
            normalize: input.profile.normalize,
            standardize: input.profile.standardize,
        },
        n_periods: input.stage1.history.n_columns(),
        n_scored_items: input.stage1.actual.len(),
        ideal_dcg: input.stage2.dcg.ideal_score(),
        n_fitted_ranks: input.stage2.difference.n_fitted(),
        sources,
    }
}

/// Writes `scores.tsv`, `summary.json` and `report.txt` into `out_dir`.
pub fn write_reports(summary: &SummaryData, out_dir: &Path) -> Result<(), PipelineError> {
    fs::create_dir_all(out_dir)?;

    write_scores_tsv(summary, &out_dir.join("scores.tsv"))?;

    let json = render_summary_json(summary)?;
    write_text(&out_dir.join("summary.json"), &json)?;

    let report = render_report_text(summary);
    write_text(&out_dir.join("report.txt"), &report)?;

    tracing::info!(out_dir = %out_dir.display(), "stage5 reports written");
    Ok(())
}

fn write_scores_tsv(summary: &SummaryData, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let header = [
        "source",
        "overlap",
        "dcg",
        "difference",
        "dcg_rank",
        "difference_rank",
        "composite",
    ]
    .join("\t");
    writeln!(w, "{}", header)?;

    for s in &summary.sources {
        let row = [
            s.source.clone(),
            s.overlap.to_string(),
            format_f64_6(s.dcg),
            format_f64_6(s.difference),
            s.dcg_rank.to_string(),
            s.difference_rank.to_string(),
            s.composite.to_string(),
        ]
        .join("\t");
        writeln!(w, "{}", row)?;
    }
    w.flush()
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_report.rs"]
mod tests;

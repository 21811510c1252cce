mod input;
mod logging;
mod metrics;
mod model;
mod pipeline;
mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::input::LoadOptions;
use crate::metrics::dcg::Numerator;
use crate::model::profile::{ProfileName, ScoringProfile};
use crate::pipeline::PipelineError;
use crate::pipeline::stage1_load::{Stage1Params, run_stage1};
use crate::pipeline::stage2_fit::run_stage2;
use crate::pipeline::stage3_score::run_stage3;
use crate::pipeline::stage4_composite::run_stage4;
use crate::pipeline::stage5_report::{Stage5Input, build_summary, write_reports};
use crate::report::text::render_report_text;

/// Scores fantasy football ranking sources against realized weekly points.
#[derive(Debug, Parser)]
#[command(name = "yafsa", version, about)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fit both scorers and rank every source in a rankings table
    Run(RunArgs),
}

#[derive(Debug, Clone, Args)]
struct RunArgs {
    /// Points by period (one column per week), TSV/CSV/JSON, optionally .gz
    #[arg(long)]
    points: PathBuf,

    /// Points column(s) to keep, e.g. `FPTS` (repeatable; all numeric columns when omitted)
    #[arg(long = "points-column")]
    points_columns: Vec<String>,

    /// Ranks by source (one column per ranking source)
    #[arg(long)]
    ranks: PathBuf,

    /// Period column to score; defaults to the last column of --points
    #[arg(long)]
    period: Option<String>,

    /// Preset scoring configuration
    #[arg(long, value_enum, default_value = "default")]
    profile: ProfileName,

    /// Number of top ranks to score (0 = all)
    #[arg(long)]
    depth: Option<usize>,

    /// DCG numerator: `rel` or `exp`
    #[arg(long)]
    numerator: Option<Numerator>,

    /// Report raw DCG instead of dividing by the ideal score
    #[arg(long)]
    no_normalize: bool,

    /// Divide rank differences by the historical standard deviation
    #[arg(long, conflicts_with = "no_standardize")]
    standardize: bool,

    #[arg(long)]
    no_standardize: bool,

    /// Item column of --points (defaults to `player` or the first column)
    #[arg(long)]
    id_column: Option<String>,

    /// Item column of --ranks; defaults to --id-column
    #[arg(long)]
    ranks_id_column: Option<String>,

    /// Ranks column to ignore, e.g. a consensus rank or matchup text (repeatable)
    #[arg(long = "drop-column")]
    drop_columns: Vec<String>,

    /// Output directory; the text report goes to stdout when omitted
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(err) = run(cli.command) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), PipelineError> {
    match command {
        Command::Run(args) => run_evaluation(&args),
    }
}

fn run_evaluation(args: &RunArgs) -> Result<(), PipelineError> {
    let profile = resolve_profile(args);
    tracing::info!(profile = %profile.label(), "scoring profile");

    let stage1 = run_stage1(&Stage1Params {
        points_path: &args.points,
        ranks_path: &args.ranks,
        period: args.period.as_deref(),
        points_options: LoadOptions {
            id_column: args.id_column.clone(),
            select: args.points_columns.clone(),
            ..LoadOptions::default()
        },
        ranks_options: LoadOptions {
            id_column: args.ranks_id_column.clone().or_else(|| args.id_column.clone()),
            drop: args.drop_columns.clone(),
            ..LoadOptions::default()
        },
    })?;
    let stage2 = run_stage2(&stage1, &profile)?;
    let stage3 = run_stage3(&stage1, &stage2)?;
    let rows = run_stage4(&stage3);

    let summary = build_summary(&Stage5Input {
        stage1: &stage1,
        stage2: &stage2,
        stage3: &stage3,
        rows: &rows,
        profile: &profile,
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    });

    match &args.out {
        Some(out_dir) => write_reports(&summary, out_dir)?,
        None => print!("{}", render_report_text(&summary)),
    }
    Ok(())
}

fn resolve_profile(args: &RunArgs) -> ScoringProfile {
    let mut profile = ScoringProfile::named(args.profile);
    if let Some(depth) = args.depth {
        profile = profile.with_depth(depth);
    }
    if let Some(numerator) = args.numerator {
        profile.numerator = numerator;
    }
    if args.no_normalize {
        profile.normalize = false;
    }
    if args.standardize {
        profile.standardize = true;
    }
    if args.no_standardize {
        profile.standardize = false;
    }
    profile
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;

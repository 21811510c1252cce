use super::*;

use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("yafsa_main_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn parse(args: &[&str]) -> RunArgs {
    let mut argv = vec!["yafsa", "run", "--points", "points.tsv", "--ranks", "ranks.tsv"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    match cli.command {
        Command::Run(args) => args,
    }
}

#[test]
fn test_parse_args_default_profile() {
    let args = parse(&[]);
    assert_eq!(args.profile, ProfileName::Default);
    assert_eq!(resolve_profile(&args), ScoringProfile::default_v1());
    assert!(args.out.is_none());
}

#[test]
fn test_parse_args_overrides() {
    let args = parse(&[
        "--profile",
        "rel30",
        "--depth",
        "10",
        "--numerator",
        "exp",
        "--no-normalize",
        "--standardize",
        "--drop-column",
        "Rank",
        "--drop-column",
        "Consensus",
    ]);
    let profile = resolve_profile(&args);
    assert_eq!(profile.depth, Some(10));
    assert_eq!(profile.numerator, Numerator::Exp);
    assert!(!profile.normalize);
    assert!(profile.standardize);
    assert_eq!(args.drop_columns, vec!["Rank", "Consensus"]);
}

#[test]
fn test_parse_args_rejects_unknown_numerator() {
    let argv = [
        "yafsa", "run", "--points", "p.tsv", "--ranks", "r.tsv", "--numerator", "log",
    ];
    assert!(Cli::try_parse_from(argv).is_err());
}

#[test]
fn test_parse_args_standardize_conflict() {
    let argv = [
        "yafsa",
        "run",
        "--points",
        "p.tsv",
        "--ranks",
        "r.tsv",
        "--standardize",
        "--no-standardize",
    ];
    assert!(Cli::try_parse_from(argv).is_err());
}

#[test]
fn test_run_writes_reports() {
    let dir = make_temp_dir();
    let points = dir.join("points.tsv");
    let ranks = dir.join("ranks.tsv");
    fs::write(
        &points,
        "PLAYER\tWeek 1\tWeek 2\nA\t10\t8\nB\t5\t6\nC\t1\t2\n",
    )
    .unwrap();
    fs::write(
        &ranks,
        "Rank\tPlayer (matchup)\tExpert 1\tExpert 2\n1\tA\t1\t3\n2\tB\t2\t2\n3\tC\t3\t1\n",
    )
    .unwrap();
    let out = dir.join("out");

    let args = RunArgs {
        points,
        points_columns: Vec::new(),
        ranks,
        period: Some("Week 2".to_string()),
        profile: ProfileName::Rel30,
        depth: None,
        numerator: None,
        no_normalize: false,
        standardize: false,
        no_standardize: false,
        id_column: None,
        ranks_id_column: Some("Player (matchup)".to_string()),
        drop_columns: vec!["Rank".to_string()],
        out: Some(out.clone()),
    };
    run_evaluation(&args).unwrap();

    let tsv = fs::read_to_string(out.join("scores.tsv")).unwrap();
    let mut lines = tsv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "source\toverlap\tdcg\tdifference\tdcg_rank\tdifference_rank\tcomposite"
    );
    assert!(lines.next().unwrap().starts_with("Expert 1\t3\t1.000000\t"));
    assert!(lines.next().unwrap().starts_with("Expert 2\t3\t"));
    assert!(out.join("summary.json").exists());
    assert!(out.join("report.txt").exists());
}

#[test]
fn test_run_skips_text_columns() {
    let dir = make_temp_dir();
    let points = dir.join("points.csv");
    let ranks = dir.join("ranks.csv");
    fs::write(
        &points,
        "Player,Team,FPTS\n\"Beckham Jr., Odell\",CLE,12\nA,PIT,8\nB,KC,2\n",
    )
    .unwrap();
    fs::write(
        &ranks,
        "Player,Matchup,Expert 1\n\"Beckham Jr., Odell\",vs PIT,1\nA,@ CLE,2\nB,vs LV,3\n",
    )
    .unwrap();
    let out = dir.join("out");

    let mut args = parse(&[
        "--points-column",
        "FPTS",
        "--drop-column",
        "Matchup",
        "--profile",
        "rel30",
    ]);
    args.points = points;
    args.ranks = ranks;
    args.out = Some(out.clone());
    assert_eq!(args.points_columns, vec!["FPTS"]);
    run_evaluation(&args).unwrap();

    let tsv = fs::read_to_string(out.join("scores.tsv")).unwrap();
    assert!(tsv.lines().nth(1).unwrap().starts_with("Expert 1\t3\t1.000000\t"));
}

#[test]
fn test_run_missing_period_fails() {
    let dir = make_temp_dir();
    let points = dir.join("points.tsv");
    let ranks = dir.join("ranks.tsv");
    fs::write(&points, "Player\tWeek 1\nA\t10\n").unwrap();
    fs::write(&ranks, "Player\tExpert 1\nA\t1\n").unwrap();

    let mut args = parse(&["--period", "Week 9"]);
    args.points = points;
    args.ranks = ranks;
    let err = run_evaluation(&args).unwrap_err();
    assert!(matches!(err, PipelineError::InvalidInput(_)));
}

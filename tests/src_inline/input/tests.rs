use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::Compression;
use flate2::write::GzEncoder;

use super::*;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("yafsa_input_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(path: &Path, contents: &str) {
    let mut f = BufWriter::new(File::create(path).unwrap());
    f.write_all(contents.as_bytes()).unwrap();
}

fn write_gz(path: &Path, contents: &str) {
    let mut enc = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    enc.write_all(contents.as_bytes()).unwrap();
    enc.finish().unwrap();
}

#[test]
fn test_detect_format() {
    assert_eq!(detect_format(Path::new("a/stats.tsv")), TableFormat::Tsv);
    assert_eq!(detect_format(Path::new("a/stats.csv.gz")), TableFormat::Csv);
    assert_eq!(detect_format(Path::new("a/RANKS.JSON")), TableFormat::Json);
    assert_eq!(detect_format(Path::new("a/stats.txt")), TableFormat::Tsv);
}

#[test]
fn test_load_tsv_with_missing_cells() {
    let dir = make_temp_dir();
    let path = dir.join("stats.tsv");
    write_file(
        &path,
        "Rank\tPlayer\tWeek 1\tWeek 2\n1\tA\t10\t8\n2\tB\t5\t\n\n3\tC\tNA\t-\n",
    );

    let table = load_table(&path, &LoadOptions::default()).unwrap();
    assert_eq!(table.index(), &["A", "B", "C"]);
    assert_eq!(table.column_names(), vec!["Rank", "Week 1", "Week 2"]);
    assert_eq!(table.cell("B", 1), Some(5.0));
    assert_eq!(table.cell("B", 2), None);
    assert_eq!(table.cell("C", 1), None);
    assert_eq!(table.cell("C", 2), None);
}

#[test]
fn test_load_csv_gz_with_drop() {
    let dir = make_temp_dir();
    let path = dir.join("ranks.csv.gz");
    write_gz(
        &path,
        "player,Rank,Expert 1,Expert 2\n\"A\",1,1,2\nB,2,2,1\n",
    );

    let options = LoadOptions {
        drop: vec!["Rank".to_string()],
        ..LoadOptions::default()
    };
    let table = load_table(&path, &options).unwrap();
    assert_eq!(table.column_names(), vec!["Expert 1", "Expert 2"]);
    assert_eq!(table.column("Expert 2").unwrap().ranked_items(), vec!["B", "A"]);
}

#[test]
fn test_explicit_id_column_and_select() {
    let dir = make_temp_dir();
    let path = dir.join("stats.tsv");
    write_file(&path, "FPTS\tName\tYDS\n12.5\tA\t100\n3\tB\t20\n");

    let options = LoadOptions {
        id_column: Some("Name".to_string()),
        select: vec!["FPTS".to_string()],
        drop: Vec::new(),
    };
    let table = load_table(&path, &options).unwrap();
    assert_eq!(table.column_names(), vec!["FPTS"]);
    assert_eq!(table.cell("A", 0), Some(12.5));

    let bad = LoadOptions {
        select: vec!["PTS".to_string()],
        ..options.clone()
    };
    assert!(matches!(load_table(&path, &bad), Err(InputError::InvalidInput(_))));

    let bad_id = LoadOptions {
        id_column: Some("Player".to_string()),
        ..LoadOptions::default()
    };
    assert!(matches!(load_table(&path, &bad_id), Err(InputError::InvalidInput(_))));
}

#[test]
fn test_csv_quoted_delimiter_in_item() {
    let dir = make_temp_dir();
    let path = dir.join("points.csv");
    write_file(
        &path,
        "Player,Week 1\n\"Beckham Jr., Odell\",12.5\n\"Adams, Davante\",\"9\"\n",
    );

    let table = load_table(&path, &LoadOptions::default()).unwrap();
    assert_eq!(table.index(), &["Beckham Jr., Odell", "Adams, Davante"]);
    assert_eq!(table.cell("Beckham Jr., Odell", 0), Some(12.5));
    assert_eq!(table.cell("Adams, Davante", 0), Some(9.0));
}

#[test]
fn test_short_rows_are_missing_cells() {
    let dir = make_temp_dir();
    let path = dir.join("stats.tsv");
    write_file(&path, "Player\tWeek 1\tWeek 2\nA\t10\nB\t5\t6\n");
    let table = load_table(&path, &LoadOptions::default()).unwrap();
    assert_eq!(table.cell("A", 1), None);
    assert_eq!(table.cell("B", 1), Some(6.0));
}

#[test]
fn test_text_columns_skipped_when_not_kept() {
    let dir = make_temp_dir();
    let path = dir.join("stats.tsv");
    write_file(
        &path,
        "Player\tTeam\tPos\tFPTS\nA\tPIT\tWR\t10\nB\tKC\tTE\t4.5\n",
    );

    let dropped = LoadOptions {
        drop: vec!["Team".to_string(), "Pos".to_string()],
        ..LoadOptions::default()
    };
    let table = load_table(&path, &dropped).unwrap();
    assert_eq!(table.column_names(), vec!["FPTS"]);
    assert_eq!(table.cell("B", 0), Some(4.5));

    let selected = LoadOptions {
        select: vec!["FPTS".to_string()],
        ..LoadOptions::default()
    };
    let table = load_table(&path, &selected).unwrap();
    assert_eq!(table.column_names(), vec!["FPTS"]);

    let err = load_table(&path, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, InputError::Parse(msg) if msg.contains("Team")));
}

#[test]
fn test_json_records_skip_dropped_text_column() {
    let dir = make_temp_dir();
    let path = dir.join("ranks.json");
    write_file(
        &path,
        r#"[{"Player": "A", "Matchup": "vs KC", "Expert 1": 1}, {"Player": "B", "Matchup": "@ PIT", "Expert 1": 2}]"#,
    );
    let options = LoadOptions {
        drop: vec!["Matchup".to_string()],
        ..LoadOptions::default()
    };
    let table = load_table(&path, &options).unwrap();
    assert_eq!(table.column_names(), vec!["Expert 1"]);
    assert_eq!(table.n_rows(), 2);
}

#[test]
fn test_value_columns() {
    let headers = ["Player", "Team", "W1", "W2"].map(String::from);
    let all = LoadOptions::default();
    assert_eq!(all.value_columns(&headers, Some(0)).unwrap(), vec![1, 2, 3]);

    let narrowed = LoadOptions {
        select: vec!["W2".to_string(), "W1".to_string()],
        drop: vec!["W1".to_string()],
        ..LoadOptions::default()
    };
    assert_eq!(narrowed.value_columns(&headers, Some(0)).unwrap(), vec![3]);

    let id_selected = LoadOptions {
        select: vec!["Player".to_string()],
        ..LoadOptions::default()
    };
    assert!(id_selected.value_columns(&headers, Some(0)).is_err());
    assert!(id_selected.value_columns(&headers, None).is_ok());
}

#[test]
fn test_duplicate_items_keep_first() {
    let dir = make_temp_dir();
    let path = dir.join("stats.tsv");
    write_file(&path, "Player\tFPTS\nA\t1\nA\t9\nB\t2\n");
    let table = load_table(&path, &LoadOptions::default()).unwrap();
    assert_eq!(table.n_rows(), 2);
    assert_eq!(table.cell("A", 0), Some(1.0));
}

#[test]
fn test_non_numeric_cell_is_parse_error() {
    let dir = make_temp_dir();
    let path = dir.join("stats.tsv");
    write_file(&path, "Player\tFPTS\nA\tten\n");
    let err = load_table(&path, &LoadOptions::default()).unwrap_err();
    match err {
        InputError::Parse(msg) => {
            assert!(msg.contains("line 2"));
            assert!(msg.contains("FPTS"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_empty_and_missing_files() {
    let dir = make_temp_dir();
    let path = dir.join("empty.tsv");
    write_file(&path, "");
    assert!(matches!(
        load_table(&path, &LoadOptions::default()),
        Err(InputError::Parse(_))
    ));
    assert!(matches!(
        load_table(&dir.join("nope.tsv"), &LoadOptions::default()),
        Err(InputError::MissingInput(_))
    ));
}

#[test]
fn test_load_json_columns() {
    let dir = make_temp_dir();
    let path = dir.join("stats.json");
    write_file(
        &path,
        r#"{"Week 2": {"B": 6, "A": 8}, "Week 1": {"A": 10, "B": null, "C": "4.5"}}"#,
    );
    let table = load_table(&path, &LoadOptions::default()).unwrap();
    assert_eq!(table.column_names(), vec!["Week 2", "Week 1"]);
    assert_eq!(table.index(), &["B", "A", "C"]);
    assert_eq!(table.cell("B", 1), None);
    assert_eq!(table.cell("C", 1), Some(4.5));
}

#[test]
fn test_load_json_records() {
    let dir = make_temp_dir();
    let path = dir.join("ranks.json");
    write_file(
        &path,
        r#"[
            {"Rank": 1, "Player (matchup)": "A", "Expert 1": 1, "Expert 2": ""},
            {"Rank": 2, "Player (matchup)": "B", "Expert 1": 2, "Expert 2": "1"}
        ]"#,
    );
    let options = LoadOptions {
        id_column: Some("Player (matchup)".to_string()),
        drop: vec!["Rank".to_string()],
        ..LoadOptions::default()
    };
    let table = load_table(&path, &options).unwrap();
    assert_eq!(table.column_names(), vec!["Expert 1", "Expert 2"]);
    assert_eq!(table.column("Expert 1").unwrap().len(), 2);
    assert_eq!(table.column("Expert 2").unwrap().len(), 1);
}

#[test]
fn test_json_rejects_nested_values() {
    let dir = make_temp_dir();
    let path = dir.join("bad.json");
    write_file(&path, r#"{"Week 1": {"A": [1, 2]}}"#);
    assert!(matches!(
        load_table(&path, &LoadOptions::default()),
        Err(InputError::Parse(_))
    ));

    write_file(&path, "[1, 2]");
    assert!(matches!(
        load_table(&path, &LoadOptions::default()),
        Err(InputError::Parse(_))
    ));
}

#[test]
fn test_parse_cell() {
    assert_eq!(parse_cell(" 3.5 "), Ok(Some(3.5)));
    assert_eq!(parse_cell(""), Ok(None));
    assert_eq!(parse_cell("NaN"), Ok(None));
    assert_eq!(parse_cell("null"), Ok(None));
    assert!(parse_cell("abc").is_err());
}

use std::path::Path;

pub mod delimited;
pub mod json;
pub mod reader;

use crate::model::{Table, TableError};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("table error: {0}")]
    Table(#[from] TableError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Tsv,
    Csv,
    Json,
}

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Column holding the item identifier; defaults to `player` or the first column.
    pub id_column: Option<String>,
    /// Keep only these value columns (all when empty).
    pub select: Vec<String>,
    pub drop: Vec<String>,
}

impl LoadOptions {
    /// Positions of the value columns to parse: every header except the id
    /// column, narrowed to `select` when given, minus `drop`.
    pub(crate) fn value_columns(
        &self,
        headers: &[String],
        id_col: Option<usize>,
    ) -> Result<Vec<usize>, InputError> {
        let is_value = |i: usize| Some(i) != id_col;
        for name in &self.select {
            if !headers.iter().enumerate().any(|(i, h)| is_value(i) && h == name) {
                return Err(InputError::InvalidInput(format!("column `{name}` not found")));
            }
        }
        Ok((0..headers.len())
            .filter(|&i| is_value(i) && self.keeps(&headers[i]))
            .collect())
    }

    fn keeps(&self, column: &str) -> bool {
        let selected = self.select.is_empty() || self.select.iter().any(|s| s == column);
        selected && !self.drop.iter().any(|d| d == column)
    }
}

pub fn detect_format(path: &Path) -> TableFormat {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    if name.ends_with(".json") {
        TableFormat::Json
    } else if name.ends_with(".csv") {
        TableFormat::Csv
    } else {
        TableFormat::Tsv
    }
}

pub fn load_table(path: &Path, options: &LoadOptions) -> Result<Table, InputError> {
    if !path.exists() {
        return Err(InputError::MissingInput(path.display().to_string()));
    }
    let format = detect_format(path);
    let reader = reader::open_maybe_gz(path)?;
    let table = match format {
        TableFormat::Tsv => delimited::read_delimited(reader, b'\t', options)?,
        TableFormat::Csv => delimited::read_delimited(reader, b',', options)?,
        TableFormat::Json => json::read_json(reader, options)?,
    };

    tracing::info!(
        path = %path.display(),
        ?format,
        n_items = table.n_rows(),
        n_columns = table.n_columns(),
        "loaded table"
    );
    Ok(table)
}

/// Item column: the requested one, else a `player` header, else the first column.
pub(crate) fn resolve_id_column(
    headers: &[String],
    requested: Option<&str>,
) -> Result<usize, InputError> {
    if let Some(name) = requested {
        return headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| InputError::InvalidInput(format!("id column `{name}` not found")));
    }
    if headers.is_empty() {
        return Err(InputError::Parse("table header is empty".to_string()));
    }
    Ok(headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case("player"))
        .unwrap_or(0))
}

/// Numeric cell; blank and common missing markers map to `None`.
pub(crate) fn parse_cell(raw: &str) -> Result<Option<f64>, String> {
    let s = raw.trim();
    let missing = ["na", "nan", "null"];
    if s.is_empty() || s == "-" || missing.iter().any(|m| s.eq_ignore_ascii_case(m)) {
        return Ok(None);
    }
    s.parse::<f64>()
        .map(Some)
        .map_err(|_| format!("non-numeric value `{s}`"))
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;

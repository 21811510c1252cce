use std::collections::HashSet;
use std::io::Read;

use csv::{ReaderBuilder, Trim};

use crate::input::{InputError, LoadOptions, parse_cell, resolve_id_column};
use crate::model::{Column, Table};

/// Reads a delimited table with a header row. Only the id column and the value
/// columns kept by `options` are parsed; other columns may hold any text.
pub fn read_delimited(
    reader: impl Read,
    delimiter: u8,
    options: &LoadOptions,
) -> Result<Table, InputError> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()?
        .iter()
        .map(str::to_string)
        .collect::<Vec<_>>();
    let id_col = resolve_id_column(&headers, options.id_column.as_deref())?;
    let value_cols = options.value_columns(&headers, Some(id_col))?;

    let mut index = Vec::new();
    let mut seen = HashSet::new();
    let mut values: Vec<Vec<Option<f64>>> = vec![Vec::new(); value_cols.len()];

    for result in rdr.records() {
        let record = result?;
        let line_no = record.position().map_or(0, |p| p.line());
        if record.iter().all(str::is_empty) {
            continue;
        }
        let item = record.get(id_col).unwrap_or("");
        if item.is_empty() {
            tracing::warn!(line = line_no, "row has empty item id; skipping");
            continue;
        }
        if !seen.insert(item.to_string()) {
            tracing::warn!(line = line_no, item, "duplicate item; keeping first");
            continue;
        }

        for (slot, &col) in value_cols.iter().enumerate() {
            let raw = record.get(col).unwrap_or("");
            let value = parse_cell(raw).map_err(|msg| {
                InputError::Parse(format!("{} (line {}, column `{}`)", msg, line_no, headers[col]))
            })?;
            values[slot].push(value);
        }
        index.push(item.to_string());
    }

    let columns = value_cols
        .iter()
        .zip(values)
        .map(|(&col, values)| Column {
            name: headers[col].clone(),
            values,
        })
        .collect();

    Ok(Table::from_columns(index, columns)?)
}

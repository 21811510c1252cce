use std::collections::HashSet;
use std::io::Read;

use serde_json::{Map, Value};

use crate::input::{InputError, LoadOptions, parse_cell, resolve_id_column};
use crate::model::{Series, Table};

/// Reads a column-oriented object (`{"Week 1": {"A": 10.0}}`) or an array of
/// records (`[{"Player": "A", "FPTS": 10.0}]`). Columns not kept by `options`
/// are skipped without being parsed.
pub fn read_json(mut reader: impl Read, options: &LoadOptions) -> Result<Table, InputError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let root: Value = serde_json::from_str(&text)?;
    match root {
        Value::Object(columns) => read_columns(columns, options),
        Value::Array(records) => read_records(records, options),
        _ => Err(InputError::Parse(
            "expected a JSON object of columns or an array of records".to_string(),
        )),
    }
}

fn read_columns(columns: Map<String, Value>, options: &LoadOptions) -> Result<Table, InputError> {
    let names = columns.keys().cloned().collect::<Vec<_>>();
    let kept = options
        .value_columns(&names, None)?
        .into_iter()
        .collect::<HashSet<_>>();

    let mut series = Vec::with_capacity(kept.len());
    for (idx, (name, cells)) in columns.into_iter().enumerate() {
        if !kept.contains(&idx) {
            continue;
        }
        let Value::Object(cells) = cells else {
            return Err(InputError::Parse(format!(
                "column `{name}` must map items to values"
            )));
        };
        let mut s = Series::new(name.clone());
        for (item, cell) in cells {
            if let Some(v) = cell_value(&cell).map_err(|msg| column_error(&name, &msg))? {
                s.insert(item, v);
            }
        }
        series.push(s);
    }
    let table = Table::concat(&series)?;
    Ok(table)
}

fn read_records(records: Vec<Value>, options: &LoadOptions) -> Result<Table, InputError> {
    let mut headers: Vec<String> = Vec::new();
    let mut rows: Vec<Map<String, Value>> = Vec::with_capacity(records.len());
    for record in records {
        let Value::Object(row) = record else {
            return Err(InputError::Parse("every record must be a JSON object".to_string()));
        };
        for key in row.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
        rows.push(row);
    }
    if rows.is_empty() {
        return Ok(Table::default());
    }

    let id_col = resolve_id_column(&headers, options.id_column.as_deref())?;
    let id_name = headers[id_col].clone();
    let mut series = options
        .value_columns(&headers, Some(id_col))?
        .into_iter()
        .map(|i| Series::new(headers[i].clone()))
        .collect::<Vec<_>>();

    let mut seen = HashSet::new();
    for (row_no, row) in rows.iter().enumerate() {
        let item = match row.get(&id_name) {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            _ => {
                tracing::warn!(record = row_no, "record has no item id; skipping");
                continue;
            }
        };
        if !seen.insert(item.clone()) {
            tracing::warn!(record = row_no, item = %item, "duplicate item; keeping first");
            continue;
        }
        for s in series.iter_mut() {
            let cell = row.get(s.name()).unwrap_or(&Value::Null);
            let value = cell_value(cell).map_err(|msg| column_error(s.name(), &msg))?;
            if let Some(v) = value {
                s.insert(item.clone(), v);
            }
        }
    }

    Ok(Table::concat(&series)?)
}

fn cell_value(cell: &Value) -> Result<Option<f64>, String> {
    match cell {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_f64()),
        Value::String(s) => parse_cell(s),
        other => Err(format!("unsupported value `{other}`")),
    }
}

fn column_error(column: &str, msg: &str) -> InputError {
    InputError::Parse(format!("{msg} (column `{column}`)"))
}

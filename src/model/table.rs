use std::collections::{HashMap, HashSet};

use crate::model::series::Series;

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("column `{column}` has {got} values, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        got: usize,
    },
    #[error("duplicate item `{0}` in table index")]
    DuplicateItem(String),
    #[error("duplicate column `{0}`")]
    DuplicateColumn(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// Items (rows) by named columns, with missing cells.
///
/// A rankings table has one column per ranking source; a points table has one
/// column per period.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    index: Vec<String>,
    positions: HashMap<String, usize>,
    columns: Vec<Column>,
}

impl Table {
    pub fn from_columns(index: Vec<String>, columns: Vec<Column>) -> Result<Self, TableError> {
        let mut positions = HashMap::with_capacity(index.len());
        for (idx, item) in index.iter().enumerate() {
            if positions.insert(item.clone(), idx).is_some() {
                return Err(TableError::DuplicateItem(item.clone()));
            }
        }
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if column.values.len() != index.len() {
                return Err(TableError::LengthMismatch {
                    column: column.name.clone(),
                    expected: index.len(),
                    got: column.values.len(),
                });
            }
            if !seen.insert(column.name.as_str()) {
                return Err(TableError::DuplicateColumn(column.name.clone()));
            }
        }
        Ok(Self {
            index,
            positions,
            columns,
        })
    }

    /// Outer join of several series on item. Items appear in first-seen order.
    pub fn concat(series: &[Series]) -> Result<Self, TableError> {
        let mut index: Vec<String> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        for s in series {
            for item in s.items() {
                if !positions.contains_key(item) {
                    positions.insert(item.clone(), index.len());
                    index.push(item.clone());
                }
            }
        }

        let columns = series
            .iter()
            .map(|s| {
                let mut values = vec![None; index.len()];
                for (item, value) in s.iter() {
                    values[positions[item]] = Some(value);
                }
                Column {
                    name: s.name().to_string(),
                    values,
                }
            })
            .collect();

        Self::from_columns(index, columns)
    }

    pub fn n_rows(&self) -> usize {
        self.index.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn index(&self) -> &[String] {
        &self.index
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn cell(&self, item: &str, column: usize) -> Option<f64> {
        let row = *self.positions.get(item)?;
        self.columns.get(column)?.values[row]
    }

    pub fn column(&self, name: &str) -> Option<Series> {
        let idx = self.columns.iter().position(|c| c.name == name)?;
        Some(self.column_at(idx))
    }

    /// Column as a series; missing cells are dropped.
    pub fn column_at(&self, idx: usize) -> Series {
        let column = &self.columns[idx];
        let mut series = Series::new(column.name.clone());
        for (item, value) in self.index.iter().zip(column.values.iter()) {
            if let Some(v) = value {
                series.insert(item.clone(), *v);
            }
        }
        series
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/table.rs"]
mod tests;

use std::collections::HashMap;

/// Named, insertion-ordered association from item (player) to value.
///
/// Used both for ground-truth points and for a single source's ranks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    name: String,
    items: Vec<String>,
    values: Vec<f64>,
    positions: HashMap<String, usize>,
}

impl Series {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn from_pairs<I, S>(name: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut series = Self::new(name);
        for (item, value) in pairs {
            series.insert(item, value);
        }
        series
    }

    /// Returns false (and leaves the series untouched) when the item is already present.
    pub fn insert(&mut self, item: impl Into<String>, value: f64) -> bool {
        let item = item.into();
        if self.positions.contains_key(&item) {
            return false;
        }
        self.positions.insert(item.clone(), self.items.len());
        self.items.push(item);
        self.values.push(value);
        true
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, item: &str) -> Option<f64> {
        self.positions.get(item).map(|&idx| self.values[idx])
    }

    pub fn contains(&self, item: &str) -> bool {
        self.positions.contains_key(item)
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.items
            .iter()
            .zip(self.values.iter())
            .map(|(item, &value)| (item.as_str(), value))
    }

    /// Values ordered best-first. NaN values are excluded.
    pub fn sorted_desc(&self) -> Vec<f64> {
        let mut out = self
            .values
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .collect::<Vec<_>>();
        out.sort_by(|a, b| b.total_cmp(a));
        out
    }

    /// Items ordered by ascending value. The sort is stable, so equal values keep
    /// insertion order. Items with a NaN value are excluded.
    pub fn ranked_items(&self) -> Vec<&str> {
        let mut order = (0..self.items.len())
            .filter(|&idx| !self.values[idx].is_nan())
            .collect::<Vec<_>>();
        order.sort_by(|&a, &b| self.values[a].total_cmp(&self.values[b]));
        order
            .into_iter()
            .map(|idx| self.items[idx].as_str())
            .collect()
    }
}

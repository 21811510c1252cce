use serde::Serialize;

use crate::metrics::ScoreBoard;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeRow {
    pub source: String,
    pub dcg: f64,
    pub difference: f64,
    pub dcg_rank: usize,
    pub difference_rank: usize,
    pub composite: usize,
}

/// 1-based order ranks, highest score first. Ties keep board order; NaN ranks last.
pub fn order_rank(board: &ScoreBoard) -> Vec<(String, usize)> {
    let mut order = (0..board.entries.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| {
        let sa = board.entries[a].1;
        let sb = board.entries[b].1;
        match (sa.is_nan(), sb.is_nan()) {
            (false, false) => sb.total_cmp(&sa),
            (a_nan, b_nan) => a_nan.cmp(&b_nan),
        }
    });

    let mut ranks = vec![0usize; board.entries.len()];
    for (position, idx) in order.into_iter().enumerate() {
        ranks[idx] = position + 1;
    }
    board
        .entries
        .iter()
        .zip(ranks)
        .map(|((source, _), rank)| (source.clone(), rank))
        .collect()
}

/// Sum of the two order ranks per source, best (lowest) composite first.
pub fn composite(dcg: &ScoreBoard, difference: &ScoreBoard) -> Vec<CompositeRow> {
    let dcg_ranks = order_rank(dcg);
    let diff_ranks = order_rank(difference);

    let mut rows = Vec::with_capacity(dcg_ranks.len());
    for ((source, dcg_rank), (_, dcg_score)) in dcg_ranks.iter().zip(dcg.entries.iter()) {
        let Some(pos) = difference.entries.iter().position(|(s, _)| s == source) else {
            tracing::warn!(source = %source, "source missing from difference scores; dropped from composite");
            continue;
        };
        let difference_rank = diff_ranks[pos].1;
        rows.push(CompositeRow {
            source: source.clone(),
            dcg: *dcg_score,
            difference: difference.entries[pos].1,
            dcg_rank: *dcg_rank,
            difference_rank,
            composite: dcg_rank + difference_rank,
        });
    }
    for (source, _) in &difference.entries {
        if dcg.get(source).is_none() {
            tracing::warn!(source = %source, "source missing from DCG scores; dropped from composite");
        }
    }

    rows.sort_by_key(|row| row.composite);
    rows
}

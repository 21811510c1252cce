//! Discounted cumulative gain.
//!
//! `DCG@k = sum_{i=1..k} gain(rel_i) / log2(i + 1)`, with `gain` either the raw
//! relevance or `2^rel - 1`.

use std::str::FromStr;

use crate::metrics::ScoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Numerator {
    /// Raw relevance.
    Rel,
    /// Exponential gain, `2^rel - 1`. Overflows to infinity from `rel >= 1024`.
    Exp,
}

impl Numerator {
    pub fn gain(self, x: f64) -> f64 {
        match self {
            Numerator::Rel => x,
            Numerator::Exp => x.exp2() - 1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Numerator::Rel => "rel",
            Numerator::Exp => "exp",
        }
    }
}

impl FromStr for Numerator {
    type Err = ScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rel" => Ok(Numerator::Rel),
            "exp" => Ok(Numerator::Exp),
            other => Err(ScoreError::UnsupportedNumerator(other.to_string())),
        }
    }
}

/// Effective cutoff: `k` unset (or 0) means the whole sequence; never longer than it.
pub fn cutoff(k: Option<usize>, len: usize) -> usize {
    match k {
        Some(k) if k > 0 => k.min(len),
        _ => len,
    }
}

/// DCG of `relevance`, already ordered best-first by the ranking under evaluation.
///
/// When `normalized`, divides by the DCG of the same values sorted descending.
/// An ideal sum that is not positive yields 0.0.
pub fn dcg(relevance: &[f64], k: Option<usize>, numerator: Numerator, normalized: bool) -> f64 {
    let k = cutoff(k, relevance.len());
    let score = relevance[..k]
        .iter()
        .enumerate()
        .map(|(i, &rel)| numerator.gain(rel) / ((i + 2) as f64).log2())
        .sum::<f64>();

    if !normalized {
        return score;
    }

    let mut ideal = relevance.to_vec();
    ideal.sort_by(|a, b| b.total_cmp(a));
    let max_score = dcg(&ideal, Some(k), numerator, false);
    if max_score > 0.0 { score / max_score } else { 0.0 }
}

#[cfg(test)]
#[path = "../../tests/src_inline/metrics/dcg.rs"]
mod tests;

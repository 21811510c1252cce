use crate::report::{SourceSummary, SummaryData, format_f64_6};

pub fn render_report_text(data: &SummaryData) -> String {
    let mut out = String::new();

    out.push_str("Ranking Source Evaluation Report\n");
    out.push_str("================================\n\n");

    out.push_str("1. Inputs\n");
    out.push_str(&format!("Scored period: {}\n", data.period));
    out.push_str(&format!("Periods in history: {}\n", data.n_periods));
    out.push_str(&format!("Players with points: {}\n", data.n_scored_items));
    out.push_str(&format!("Ranking sources: {}\n\n", data.sources.len()));

    out.push_str("2. Scoring\n");
    let depth = match data.profile.depth {
        Some(k) => k.to_string(),
        None => "all".to_string(),
    };
    out.push_str(&format!(
        "DCG: depth={}, numerator={}, normalize={}\n",
        depth, data.profile.numerator, data.profile.normalize
    ));
    if let Some(ideal) = data.ideal_dcg {
        out.push_str(&format!("Ideal DCG: {}\n", format_f64_6(ideal)));
    }
    out.push_str(&format!(
        "Difference: depth={}, standardize={}, fitted ranks={}\n\n",
        depth, data.profile.standardize, data.n_fitted_ranks
    ));

    out.push_str("3. Sources (best composite first)\n");
    out.push_str(&format!(
        "{:<4} {:<28} {:>8} {:>12} {:>12} {:>5} {:>5} {:>5}\n",
        "#", "source", "overlap", "dcg", "difference", "r_dcg", "r_dif", "comp"
    ));
    for (i, s) in data.sources.iter().enumerate() {
        out.push_str(&format!(
            "{:<4} {:<28} {:>8} {:>12} {:>12} {:>5} {:>5} {:>5}\n",
            i + 1,
            s.source,
            s.overlap,
            format_f64_6(s.dcg),
            format_f64_6(s.difference),
            s.dcg_rank,
            s.difference_rank,
            s.composite
        ));
    }
    out.push('\n');

    out.push_str("4. Conclusion\n");
    out.push_str(&format!("{}\n", conclusion(&data.sources)));

    out
}

fn conclusion(sources: &[SourceSummary]) -> String {
    let Some(best) = sources.first() else {
        return "No ranking source could be scored.".to_string();
    };
    let tied = sources
        .iter()
        .skip(1)
        .filter(|s| s.composite == best.composite)
        .count();
    if tied > 0 {
        format!(
            "{} leads with composite {} (tied with {} other source(s)).",
            best.source, best.composite, tied
        )
    } else if best.dcg_rank == 1 && best.difference_rank == 1 {
        format!("{} ranks first on both metrics.", best.source)
    } else {
        format!(
            "{} leads with composite {} (DCG rank {}, difference rank {}).",
            best.source, best.composite, best.dcg_rank, best.difference_rank
        )
    }
}

use crate::report::SummaryData;

pub fn render_summary_json(data: &SummaryData) -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(data)?;
    json.push('\n');
    Ok(json)
}

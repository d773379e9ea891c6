// Result export: the full result as JSON, or one CSV row per document pair.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::analysis::AnalysisResult;

pub const CSV_HEADER: &str =
    "Document A,Document B,Max Similarity,Average Similarity,Algorithms,Status";

/// Write the whole result as pretty-printed JSON.
pub fn write_json(result: &AnalysisResult, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(result).context("Failed to serialize result")?;
    write_file(path, &json)?;
    info!(path = %path.display(), "Exported JSON");
    Ok(())
}

/// Write the pair table as CSV, flagging pairs at or above `threshold`.
pub fn write_csv(result: &AnalysisResult, path: &Path, threshold: f64) -> Result<()> {
    write_file(path, &render_csv(result, threshold))?;
    info!(path = %path.display(), "Exported CSV");
    Ok(())
}

/// CSV text for `result`: pairs sorted by max similarity, highest first.
pub fn render_csv(result: &AnalysisResult, threshold: f64) -> String {
    let mut pairs = result.pair_summaries();
    pairs.sort_by(|a, b| b.max_similarity.total_cmp(&a.max_similarity));

    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    for pair in &pairs {
        let algorithms: Vec<String> = pair
            .scores
            .iter()
            .map(|(kind, score)| format!("{kind}:{}", csv_percent(*score)))
            .collect();
        let status = if pair.exceeds(threshold) {
            "POTENTIAL_PLAGIARISM"
        } else {
            "OK"
        };

        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            quote(&pair.document_a_name),
            quote(&pair.document_b_name),
            csv_percent(pair.max_similarity),
            csv_percent(pair.avg_similarity),
            quote(&algorithms.join(";")),
            status,
        ));
    }

    out
}

fn csv_percent(score: f64) -> String {
    format!("{:.2}%", score * 100.0)
}

/// Quote a CSV field, doubling any embedded quotes.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_doubles_embedded_quotes() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn percent_has_two_decimals() {
        assert_eq!(csv_percent(0.5), "50.00%");
        assert_eq!(csv_percent(1.0 / 3.0), "33.33%");
    }
}

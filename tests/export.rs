// Export tests: JSON shape and CSV rows for a small analysis.

use std::fs;

use plagcheck::analysis::{Analyzer, Document};
use plagcheck::output::export::{render_csv, write_csv, write_json, CSV_HEADER};
use plagcheck::output::{percent, truncate_chars};
use plagcheck::similarity::AlgorithmKind;

fn small_result() -> plagcheck::analysis::AnalysisResult {
    let docs = vec![
        Document::new("alpha.txt", "The cat sat on the mat."),
        Document::new("beta \"quoted\".txt", "The cat sat on the mat!"),
        Document::new("gamma.txt", "Completely different subject matter entirely."),
    ];
    Analyzer::default()
        .analyze(
            &docs,
            &[AlgorithmKind::CosineSimilarity, AlgorithmKind::NGram],
            None,
        )
        .unwrap()
}

// ============================================================
// CSV
// ============================================================

#[test]
fn csv_has_header_and_one_row_per_pair() {
    let csv = render_csv(&small_result(), 0.3);
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines[0], CSV_HEADER);
    assert_eq!(lines.len(), 4);
}

#[test]
fn csv_rows_are_sorted_and_flagged() {
    let csv = render_csv(&small_result(), 0.3);
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(
        lines[1],
        "\"alpha.txt\",\"beta \"\"quoted\"\".txt\",100.00%,100.00%,\
         \"CosineSimilarity:100.00%;NGram:100.00%\",POTENTIAL_PLAGIARISM"
    );
    assert!(lines[2].ends_with(",OK"));
    assert!(lines[3].ends_with(",OK"));
}

#[test]
fn csv_threshold_of_zero_flags_everything() {
    let csv = render_csv(&small_result(), 0.0);
    assert!(csv.lines().skip(1).all(|l| l.ends_with("POTENTIAL_PLAGIARISM")));
}

#[test]
fn write_csv_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reports").join("run.csv");
    write_csv(&small_result(), &path, 0.3).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with(CSV_HEADER));
}

// ============================================================
// JSON
// ============================================================

#[test]
fn json_contains_documents_and_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.json");
    let result = small_result();
    write_json(&result, &path).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["id"], result.id().to_string());
    assert_eq!(value["documents"].as_array().unwrap().len(), 3);
    assert_eq!(value["comparison_results"].as_array().unwrap().len(), 6);
    assert_eq!(value["comparison_results"][0]["algorithm"], "CosineSimilarity");
    assert!(value["comparison_results"][0]["similarity_score"].is_f64());
}

// ============================================================
// Formatting helpers
// ============================================================

#[test]
fn percent_has_one_decimal() {
    assert_eq!(percent(0.0), "0.0%");
    assert_eq!(percent(0.4567), "45.7%");
    assert_eq!(percent(1.0), "100.0%");
}

#[test]
fn truncate_respects_char_boundaries() {
    assert_eq!(truncate_chars("short", 10), "short");
    assert_eq!(truncate_chars("привет мир", 6), "привет...");
}

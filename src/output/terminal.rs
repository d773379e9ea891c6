// Colored terminal output for analysis results.
//
// Everything printed by the `analyze` and `compare` commands is formatted
// here; main.rs only decides what to show.

use colored::{ColoredString, Colorize};
use uuid::Uuid;

use super::{percent, truncate_chars};
use crate::analysis::{AnalysisResult, PairSummary};
use crate::similarity::AlgorithmKind;

const NAME_WIDTH: usize = 28;
const MATRIX_LABEL_WIDTH: usize = 12;
/// Label column of the pair detail view; fits every algorithm name
const DETAIL_LABEL_WIDTH: usize = 28;

/// Print the run header and every pair at or above `threshold`.
pub fn display_summary(result: &AnalysisResult, threshold: f64) {
    let documents = result.documents().len();
    let pairs = result.pair_summaries();

    println!("\n{}", "=== Plagiarism Analysis ===".bold());
    println!("  Run:         {}", result.id().to_string().dimmed());
    println!("  Finished:    {}", result.timestamp().format("%Y-%m-%d %H:%M:%S UTC"));
    println!("  Documents:   {documents}");
    println!("  Pairs:       {}", pairs.len());
    println!("  Comparisons: {}", result.comparison_results().len());
    println!("  Threshold:   {}", percent(threshold));

    let flagged = result.flagged_pairs(threshold);
    if flagged.is_empty() {
        println!(
            "\n  {} No pairs at or above {}",
            "ok".green().bold(),
            percent(threshold)
        );
        return;
    }

    println!(
        "\n{}",
        format!("=== Potential Plagiarism ({} pairs) ===", flagged.len()).bold()
    );
    println!();
    display_pair_table(&flagged, threshold);
}

/// Print a ranked table of pairs with each algorithm's score.
pub fn display_pair_table(pairs: &[PairSummary], threshold: f64) {
    println!(
        "  {:>4}  {:<w$} {:<w$} {:>7}  {:>7}",
        "Rank".dimmed(),
        "Document A".dimmed(),
        "Document B".dimmed(),
        "Max".dimmed(),
        "Avg".dimmed(),
        w = NAME_WIDTH,
    );
    println!("  {}", "-".repeat(NAME_WIDTH * 2 + 26).dimmed());

    for (i, pair) in pairs.iter().enumerate() {
        println!(
            "  {:>4}. {:<w$} {:<w$} {:>7}  {:>7}",
            i + 1,
            truncate_chars(&pair.document_a_name, NAME_WIDTH - 3),
            truncate_chars(&pair.document_b_name, NAME_WIDTH - 3),
            colorize_score(pair.max_similarity, threshold),
            percent(pair.avg_similarity),
            w = NAME_WIDTH,
        );
        let breakdown: Vec<String> = pair
            .scores
            .iter()
            .map(|(kind, score)| format!("{}: {}", kind.as_str(), percent(*score)))
            .collect();
        println!("        {}", breakdown.join("  ").dimmed());
    }
    println!();
}

/// Print every algorithm's score for a single pair (the `compare` command).
pub fn display_pair_detail(pair: &PairSummary, threshold: f64) {
    println!(
        "\n{}",
        format!(
            "=== {} vs {} ===",
            pair.document_a_name, pair.document_b_name
        )
        .bold()
    );
    for (kind, score) in &pair.scores {
        println!(
            "  {:<w$} {}",
            kind.as_str(),
            colorize_score(*score, threshold),
            w = DETAIL_LABEL_WIDTH
        );
    }
    println!(
        "  {:<w$} {}",
        "Maximum",
        colorize_score(pair.max_similarity, threshold),
        w = DETAIL_LABEL_WIDTH
    );
    println!(
        "  {:<w$} {}",
        "Average",
        percent(pair.avg_similarity),
        w = DETAIL_LABEL_WIDTH
    );

    if pair.exceeds(threshold) {
        println!("\n  {} Potential plagiarism", "!!".red().bold());
    } else {
        println!("\n  {} Below threshold", "ok".green());
    }
}

/// Print the document-by-document matrix of best scores.
///
/// Documents are sorted by name. Above `max_documents` the matrix would not
/// fit a terminal, so only a notice is printed.
pub fn display_matrix(result: &AnalysisResult, threshold: f64, max_documents: usize) {
    let mut documents: Vec<(Uuid, &str)> = result
        .documents()
        .iter()
        .map(|d| (d.id, d.name.as_str()))
        .collect();
    documents.sort_by(|a, b| a.1.cmp(b.1));

    if documents.len() < 2 {
        return;
    }
    if documents.len() > max_documents {
        println!(
            "\n  {}",
            format!(
                "Similarity matrix skipped: {} documents (limit {max_documents})",
                documents.len()
            )
            .dimmed()
        );
        return;
    }

    println!("\n{}", "=== Similarity Matrix ===".bold());
    println!();

    print!("  {:<w$}", "", w = MATRIX_LABEL_WIDTH + 4);
    for (i, _) in documents.iter().enumerate() {
        print!("{:>7}", format!("[{}]", i + 1));
    }
    println!();

    for (i, (row_id, row_name)) in documents.iter().enumerate() {
        print!(
            "  {:<4}{:<w$}",
            format!("[{}]", i + 1),
            truncate_chars(row_name, MATRIX_LABEL_WIDTH - 3),
            w = MATRIX_LABEL_WIDTH
        );
        for (j, (col_id, _)) in documents.iter().enumerate() {
            if i == j {
                print!("{:>7}", "-".dimmed());
                continue;
            }
            // Records are stored in load order, so look both ways
            let score = result
                .get_similarity(*row_id, *col_id)
                .max(result.get_similarity(*col_id, *row_id));
            let cell = format!("{:>7}", percent(score));
            print!("{}", colorize_band(&cell, score, threshold));
        }
        println!();
    }

    println!();
    println!(
        "  Legend: {}  {}  {}  {}",
        format!(">= {}", percent(threshold)).red().bold(),
        format!(">= {}", percent(threshold * 0.5)).bright_red(),
        format!(">= {}", percent(threshold * 0.3)).yellow(),
        "lower".green(),
    );
}

/// List the available algorithms (the `algorithms` command).
pub fn display_algorithms() {
    println!("\n{}", "=== Available Algorithms ===".bold());
    for kind in AlgorithmKind::ALL {
        println!("  {:<28} {}", kind.as_str().bold(), kind.description().dimmed());
    }
}

fn colorize_score(score: f64, threshold: f64) -> ColoredString {
    colorize_band(&percent(score), score, threshold)
}

/// Color bands relative to the threshold: at or above it, above half of
/// it, above 30% of it, and everything lower.
fn colorize_band(text: &str, score: f64, threshold: f64) -> ColoredString {
    if score >= threshold {
        text.red().bold()
    } else if score >= threshold * 0.5 {
        text.bright_red()
    } else if score >= threshold * 0.3 {
        text.yellow()
    } else {
        text.green()
    }
}

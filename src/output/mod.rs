// Output formatting: terminal display and result export.

pub mod export;
pub mod terminal;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing (`&name[..20]`), this respects UTF-8 character boundaries
/// and will never panic on multi-byte characters in document names.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Render a score in [0, 1] as a percentage with one decimal, e.g. "42.5%".
pub fn percent(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

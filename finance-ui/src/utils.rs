/// Normalizes field text for numeric parsing.
fn normalize_number_input(s: &str) -> &str {
    s.trim()
}

/// Parses persisted field text into a number.
///
/// Returns `None` for empty or whitespace-only input, or when parsing fails
/// (logs a warning on parse failure). Used when restoring the last session,
/// where a bad value should leave the model at its default rather than stop
/// the screen from loading.
pub fn parse_optional_number(s: &str) -> Option<f64> {
    let normalized = normalize_number_input(s);
    if normalized.is_empty() {
        None
    } else {
        normalized.parse().map_or_else(
            |e| {
                tracing::warn!(input = %s, "invalid stored number: {}", e);
                None
            },
            Some,
        )
    }
}

/// Renders `text` with a caret at character position `cursor`.
pub fn with_caret(
    text: &str,
    cursor: usize,
) -> String {
    let mut rendered: String = text.chars().take(cursor).collect();
    rendered.push('|');
    rendered.extend(text.chars().skip(cursor));
    rendered
}

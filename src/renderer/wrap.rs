use crate::schema_analyzer::text_width;

/// Greedily pack the space-separated words of `text` into lines of at most
/// `width`.
///
/// Only single spaces are break points; runs of spaces inside quoted
/// identifiers survive as empty words. A word longer than `width` gets a
/// line of its own. Joining the result with single spaces gives back `text`.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut current: Option<String> = None;

    for word in text.split(' ') {
        current = match current.take() {
            None => Some(word.to_string()),
            Some(mut line) if text_width(&line) + 1 + text_width(word) <= width => {
                line.push(' ');
                line.push_str(word);
                Some(line)
            }
            Some(line) => {
                lines.push(line);
                Some(word.to_string())
            }
        };
    }

    lines.extend(current);
    lines
}

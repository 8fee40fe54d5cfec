//! Text sanitization for scraped pages and search-agent output.

/// Normalizes text before it is spliced into a prompt: every run of
/// characters outside the printable ASCII range becomes a single space,
/// whitespace runs collapse to single spaces, and the ends are trimmed.
///
/// Pure and total — empty input returns an empty string.
pub fn clean_text(text: &str) -> String {
    let ascii: String = text
        .chars()
        .map(|c| if (' '..='~').contains(&c) { c } else { ' ' })
        .collect();

    ascii.split_whitespace().collect::<Vec<_>>().join(" ")
}

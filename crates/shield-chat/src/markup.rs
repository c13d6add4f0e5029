//! Lightweight reply markup: `**bold**` spans and `\n` line breaks.

use std::sync::LazyLock;

use regex::Regex;

static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("Invalid bold regex"));

/// Render reply text as an HTML fragment.
///
/// Escapes `&`, `<` and `>` first, so user text cannot inject tags.
pub fn render_html(text: &str) -> String {
    let escaped = text
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    BOLD_RE
        .replace_all(&escaped, "<strong>$1</strong>")
        .replace('\n', "<br>")
}

/// Render reply text for a terminal: bold markers are dropped.
pub fn render_plain(text: &str) -> String {
    BOLD_RE.replace_all(text, "$1").into_owned()
}

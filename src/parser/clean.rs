use std::sync::LazyLock;

use regex::Regex;

/// Bullet (`-`, `*`, `+`, `•`, ...) or numbered (`1.`, `2)`) list marker followed by whitespace.
static LIST_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-*+•◦▪▫]|\d+[.)])\s+").unwrap());
/// Marker on a continuation line: bullets may hug their text, numbers need a space.
static CONTINUATION_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-*+•◦▪▫]\s*|\d+[.)]\s+)").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Normalize one piece of extracted content.
///
/// Drops backticks and `**`/`__` delimiters, drops lone `*`/`_` that are not
/// inside a word (`snake_case` survives), collapses whitespace and finally
/// strips leading list markers. Applying it twice gives the same result as
/// applying it once.
pub fn clean_content(line: &str) -> String {
    let text = line.replace('`', "").replace("**", "").replace("__", "");
    let text = strip_loose_emphasis(&text);
    let mut text = WHITESPACE_RE.replace_all(&text, " ").trim().to_string();

    while let Some(m) = LIST_MARKER_RE.find(&text) {
        text = text[m.end()..].trim_start().to_string();
    }
    text
}

/// Strip the bullet/number marker a continuation line starts with, if any.
pub fn strip_continuation_marker(line: &str) -> &str {
    match CONTINUATION_MARKER_RE.find(line) {
        Some(m) => line[m.end()..].trim(),
        None => line,
    }
}

fn strip_loose_emphasis(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let is_word = |i: Option<usize>| i.and_then(|i| chars.get(i)).is_some_and(|c| c.is_alphanumeric());

    chars
        .iter()
        .enumerate()
        .filter(|&(i, &c)| {
            if c != '*' && c != '_' {
                return true;
            }
            is_word(i.checked_sub(1)) && is_word(Some(i + 1))
        })
        .map(|(_, &c)| c)
        .collect()
}

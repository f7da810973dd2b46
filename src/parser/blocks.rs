use std::sync::LazyLock;

use regex::Regex;

static SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-{3,}$").unwrap());
static PLAIN_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^TC\d+\s*[-–—:]\s*\S").unwrap());

const H4_MARKER: &str = "#### ";
const H3_MARKER: &str = "### ";

/// Shape of one trimmed line in a Markdown/BDD document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    /// `---` rule, dropped without touching parser state.
    Separator,
    /// `### BLOCK ...` grouping header, dropped like a separator.
    BlockHeader,
    /// Opens a new test case; carries the raw heading text.
    Heading(&'a str),
    Text(&'a str),
}

impl Line<'_> {
    pub fn is_discarded(&self) -> bool {
        matches!(self, Line::Separator | Line::BlockHeader)
    }
}

/// Classify a trimmed line.
///
/// `#### TC01 — Title — P1` yields the text after the marker; a bare
/// `TC01 - Title` line yields the whole line so the ID can be split off later.
pub fn classify_line(line: &str) -> Line<'_> {
    if line.is_empty() {
        return Line::Blank;
    }
    if SEPARATOR_RE.is_match(line) {
        return Line::Separator;
    }
    if let Some(rest) = line.strip_prefix(H4_MARKER) {
        return Line::Heading(rest.trim());
    }
    if line.starts_with(H3_MARKER) {
        return Line::BlockHeader;
    }
    if PLAIN_HEADING_RE.is_match(line) {
        return Line::Heading(line);
    }
    Line::Text(line)
}

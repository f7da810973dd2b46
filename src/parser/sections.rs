use std::sync::LazyLock;

use regex::Regex;

use super::clean::{clean_content, strip_continuation_marker};

static EMPHASIZED_KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\*\*\s*(given|when|then|and|actual\s+results)\s*:?\s*\*\*\s*:?\s*(.*)$").unwrap()
});
static BARE_KEYWORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(given|when|then|and):?\s+(.+)$").unwrap());
static LOOSE_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:given(?: ?\(?preconditions\)?)?|when|steps(?: ?\(?when\)?)?|then|expected results?(?: ?\(?then\)?)?|actual results?)$",
    )
    .unwrap()
});
static HASH_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#{1,4}\s*").unwrap());
static SPACES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Standalone header lines accepted by the Markdown/BDD pipeline.
const HEADER_ALIASES: &[(&str, SectionKind)] = &[
    ("given (preconditions)", SectionKind::Given),
    ("given", SectionKind::Given),
    ("steps (when)", SectionKind::Steps),
    ("when", SectionKind::Steps),
    ("expected results (then)", SectionKind::ExpectedResults),
    ("then", SectionKind::ExpectedResults),
    ("actual results", SectionKind::ActualResults),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Given,
    Steps,
    ExpectedResults,
    ActualResults,
}

impl SectionKind {
    /// Narrative order, also the order sections are written out in.
    pub const ALL: [SectionKind; 4] = [
        SectionKind::Given,
        SectionKind::Steps,
        SectionKind::ExpectedResults,
        SectionKind::ActualResults,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SectionKind::Given => "Given",
            SectionKind::Steps => "Steps",
            SectionKind::ExpectedResults => "Expected Results",
            SectionKind::ActualResults => "Actual Results",
        }
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        let keyword = SPACES_RE.replace_all(&keyword.to_lowercase(), " ").into_owned();
        match keyword.as_str() {
            "given" => Some(SectionKind::Given),
            "when" => Some(SectionKind::Steps),
            "then" => Some(SectionKind::ExpectedResults),
            "actual results" => Some(SectionKind::ActualResults),
            _ => None,
        }
    }
}

/// Which section, if any, subsequent content lines belong to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SectionState {
    #[default]
    Closed,
    Open(SectionKind),
}

impl SectionState {
    pub fn kind(self) -> Option<SectionKind> {
        match self {
            SectionState::Closed => None,
            SectionState::Open(kind) => Some(kind),
        }
    }
}

/// Result of classifying one non-blank line of a test case body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    /// Section the line opened, when it carried a keyword or header.
    pub opened: Option<SectionKind>,
    /// Section the content belongs to and the cleaned content itself.
    pub content: Option<(SectionKind, String)>,
}

impl Classified {
    fn ignored() -> Self {
        Self {
            opened: None,
            content: None,
        }
    }

    fn open(kind: SectionKind, content: &str) -> Self {
        Self {
            opened: Some(kind),
            content: Some((kind, clean_content(content))).filter(|(_, c)| !c.is_empty()),
        }
    }

    fn continuation(kind: SectionKind, content: &str) -> Self {
        Self {
            opened: None,
            content: Some((kind, clean_content(content))).filter(|(_, c)| !c.is_empty()),
        }
    }

    /// State to carry into the next line.
    pub fn next_state(&self, current: SectionState) -> SectionState {
        match self.opened {
            Some(kind) => SectionState::Open(kind),
            None => current,
        }
    }
}

/// Decide which section a trimmed, non-blank body line belongs to.
///
/// First match wins: `**Keyword**` emphasis, header aliases (alone or as
/// `alias: text`), bare `Given/When/Then/And` keywords, then continuation of
/// the open section.
pub fn classify_section_line(line: &str, current: SectionState) -> Classified {
    if let Some(caps) = EMPHASIZED_KEYWORD_RE.captures(line) {
        if let Some(kind) = keyword_section(&caps[1], current) {
            return Classified::open(kind, &caps[2]);
        }
    }

    if let Some((kind, inline)) = match_header_alias(line) {
        return Classified::open(kind, inline.unwrap_or_default());
    }

    if let Some(caps) = BARE_KEYWORD_RE.captures(line) {
        if let Some(kind) = keyword_section(&caps[1], current) {
            return Classified::open(kind, &caps[2]);
        }
    }

    match current {
        SectionState::Open(kind) => Classified::continuation(kind, strip_continuation_marker(line)),
        SectionState::Closed => Classified::ignored(),
    }
}

fn keyword_section(keyword: &str, current: SectionState) -> Option<SectionKind> {
    if keyword.eq_ignore_ascii_case("and") {
        // A dangling `And` most often follows an implicit `Then`.
        return Some(current.kind().unwrap_or(SectionKind::ExpectedResults));
    }
    SectionKind::from_keyword(keyword)
}

/// Match `Given (Preconditions)`, `**Then**:`, `Actual Results: text` and friends.
///
/// Returns the section plus any inline text after an `alias:` prefix.
fn match_header_alias(line: &str) -> Option<(SectionKind, Option<&str>)> {
    let unemphasized = line.replace("**", "").replace("__", "");
    let normalized = SPACES_RE
        .replace_all(unemphasized.trim().trim_end_matches(':').trim(), " ")
        .to_lowercase();

    if let Some(&(_, kind)) = HEADER_ALIASES.iter().find(|(alias, _)| normalized == *alias) {
        return Some((kind, None));
    }

    let (head, inline) = line.split_once(':')?;
    let head = SPACES_RE
        .replace_all(head.replace("**", "").replace("__", "").trim(), " ")
        .to_lowercase();
    HEADER_ALIASES
        .iter()
        .find(|(alias, _)| head == *alias)
        .map(|&(_, kind)| (kind, Some(inline.trim_start_matches('*').trim())))
}

/// Looser header matcher for the title/blank-line dialect.
///
/// Accepts up to four leading `#`, emphasis, trailing colons and the
/// `Given (Preconditions)` / `Expected Result` / `Steps(When)` spellings.
pub fn match_loose_header(line: &str) -> Option<SectionKind> {
    let text = HASH_PREFIX_RE.replace(line.trim(), "");
    let text = text.replace(['*', '_'], "");
    let text = text.trim().trim_end_matches(':').trim();
    let normalized = SPACES_RE.replace_all(text, " ").to_lowercase();

    if !LOOSE_HEADER_RE.is_match(&normalized) {
        return None;
    }

    if normalized.contains("given") {
        Some(SectionKind::Given)
    } else if normalized.contains("steps") || normalized.contains("when") {
        Some(SectionKind::Steps)
    } else if normalized.contains("expected") || normalized.contains("then") {
        Some(SectionKind::ExpectedResults)
    } else if normalized.contains("actual") {
        Some(SectionKind::ActualResults)
    } else {
        None
    }
}

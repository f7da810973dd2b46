use std::sync::LazyLock;

use regex::Regex;

use crate::record::DEFAULT_PRIORITY;

static BRACKET_PRIORITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*\[\s*priority\s*:\s*(p\d+)\s*\]\s*").unwrap());
static SUFFIX_PRIORITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*[-–—]\s*(p\d+)\s*$").unwrap());
static ID_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(TC\d+)\s*[—–\-:]\s*(.+)$").unwrap());
static ID_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(TC[A-Za-z0-9_-]+)\s*[—–\-:]\s*(.+)$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub id: String,
    pub title: String,
    pub priority: String,
}

/// Split raw heading text into `(id, title, priority)`.
///
/// Priority tags are removed first so a trailing `— P1` never ends up in the
/// title. A `[Priority: Pn]` tag wins over a dash suffix when both are present;
/// the suffix is still stripped.
pub fn parse_heading(raw: &str) -> Heading {
    let mut heading = raw.trim().to_string();
    let mut priority = None;

    if let Some(caps) = BRACKET_PRIORITY_RE.captures(&heading) {
        priority = Some(caps[1].to_uppercase());
        heading = BRACKET_PRIORITY_RE.replace(&heading, " ").trim().to_string();
    }

    if let Some(caps) = SUFFIX_PRIORITY_RE.captures(&heading) {
        let suffix = caps[1].to_uppercase();
        priority.get_or_insert(suffix);
        heading = SUFFIX_PRIORITY_RE.replace(&heading, "").trim().to_string();
    }

    let priority = priority.unwrap_or_else(|| DEFAULT_PRIORITY.to_string());

    // `TC01-Login - x` keeps `TC01` as the id; only non-numeric ids take the wider form.
    let caps = ID_DIGITS_RE
        .captures(&heading)
        .or_else(|| ID_TITLE_RE.captures(&heading));
    match caps {
        Some(caps) => Heading {
            id: caps[1].to_uppercase(),
            title: caps[2].trim().to_string(),
            priority,
        },
        None => Heading {
            id: String::new(),
            title: heading,
            priority,
        },
    }
}

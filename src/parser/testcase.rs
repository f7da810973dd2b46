use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::clean::clean_content;
use super::ids::assign_missing_ids;
use super::sections::{match_loose_header, SectionState};
use crate::record::TestCase;

static CASE_SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-=]{10,}$").unwrap());
static RULE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-=]{3,}$").unwrap());

#[derive(Default)]
struct TitleAccumulator {
    cases: Vec<TestCase>,
    open: Option<TestCase>,
    section: SectionState,
    /// Set after a blank line or a case separator: the next plain line is a title.
    at_break: bool,
}

impl TitleAccumulator {
    fn seal(&mut self) {
        if let Some(case) = self.open.take() {
            debug!(title = %case.title, "sealed test case");
            self.cases.push(case);
        }
        self.section = SectionState::Closed;
    }

    fn start(&mut self, title: String) {
        self.seal();
        let mut case = TestCase::untitled();
        case.title = title;
        self.open = Some(case);
    }

    fn feed(&mut self, line: &str) {
        if line.is_empty() {
            self.at_break = true;
            return;
        }
        if CASE_SEPARATOR_RE.is_match(line) {
            self.seal();
            self.at_break = true;
            return;
        }
        if RULE_RE.is_match(line) {
            return;
        }

        if let Some(kind) = match_loose_header(line) {
            if self.open.is_none() {
                self.start(String::new());
            }
            self.section = SectionState::Open(kind);
            self.at_break = false;
            return;
        }

        if self.at_break || self.open.is_none() {
            self.start(clean_content(line));
            self.at_break = false;
            return;
        }

        let Some(case) = self.open.as_mut() else {
            return;
        };
        match self.section {
            SectionState::Open(kind) => case.push(kind, line.to_string()),
            SectionState::Closed => {
                // No section header yet: treat the line as part of a wrapped title.
                let more = clean_content(line);
                if case.title.is_empty() {
                    case.title = more;
                } else if !more.is_empty() {
                    case.title = format!("{} {}", case.title, more);
                }
            }
        }
    }

    fn finish(mut self) -> Vec<TestCase> {
        self.seal();
        assign_missing_ids(&mut self.cases);
        self.cases
    }
}

/// Parse a "test case" dump: a title line, then `Given` / `When` / `Then` /
/// `Actual Results` section headers each followed by their lines.
///
/// Cases are split by a blank line followed by a new title, or by a rule of
/// ten or more `-`/`=`. Section content is kept verbatim.
pub fn parse_testcases(text: &str) -> Vec<TestCase> {
    let mut acc = TitleAccumulator {
        at_break: true,
        ..Default::default()
    };
    for raw in text.lines() {
        acc.feed(raw.trim());
    }
    acc.finish()
}

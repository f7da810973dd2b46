use serde::Serialize;

use crate::parser::sections::SectionKind;

pub const DEFAULT_PRIORITY: &str = "P1";

/// One extracted test case. Built while its block is open, read-only once sealed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub id: String,
    pub title: String,
    pub priority: String,
    pub given: Vec<String>,
    pub steps: Vec<String>,
    pub expected_results: Vec<String>,
    pub actual_results: Vec<String>,
}

impl TestCase {
    pub fn new(id: String, title: String, priority: String) -> Self {
        Self {
            id,
            title,
            priority,
            ..Default::default()
        }
    }

    pub fn untitled() -> Self {
        Self::new(String::new(), String::new(), DEFAULT_PRIORITY.to_string())
    }

    pub fn section(&self, kind: SectionKind) -> &[String] {
        match kind {
            SectionKind::Given => &self.given,
            SectionKind::Steps => &self.steps,
            SectionKind::ExpectedResults => &self.expected_results,
            SectionKind::ActualResults => &self.actual_results,
        }
    }

    pub fn push(&mut self, kind: SectionKind, line: String) {
        match kind {
            SectionKind::Given => self.given.push(line),
            SectionKind::Steps => self.steps.push(line),
            SectionKind::ExpectedResults => self.expected_results.push(line),
            SectionKind::ActualResults => self.actual_results.push(line),
        }
    }

    /// True when any of the four sections came out empty.
    pub fn is_incomplete(&self) -> bool {
        SectionKind::ALL.iter().any(|&k| self.section(k).is_empty())
    }
}

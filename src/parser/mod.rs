pub mod blocks;
pub mod clean;
pub mod heading;
pub mod ids;
pub mod markdown;
pub mod sections;
pub mod testcase;

use std::fmt;

use serde::Deserialize;

use crate::record::TestCase;

/// Input dialect, chosen by the caller. Each has its own pipeline and CSV shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// `#### TC01 — Title — P1` headings with Given/When/Then bodies.
    #[default]
    Markdown,
    /// Title lines followed by Given/When/Then/Actual Results section headers.
    Testcase,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Markdown => f.write_str("markdown"),
            Dialect::Testcase => f.write_str("testcase"),
        }
    }
}

/// Single pass over `text`: lines → test cases, in document order, IDs filled.
pub fn parse(text: &str, dialect: Dialect) -> Vec<TestCase> {
    match dialect {
        Dialect::Markdown => markdown::parse_markdown(text),
        Dialect::Testcase => testcase::parse_testcases(text),
    }
}

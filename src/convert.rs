use std::fmt;
use std::panic;

use tracing::info;

use crate::error::ConvertError;
use crate::export;
use crate::parser::{self, Dialect};
use crate::record::TestCase;

/// Everything one conversion produces. Owned by the caller.
#[derive(Debug)]
pub struct Conversion {
    pub records: Vec<TestCase>,
    pub csv: String,
    pub summary: Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub parsed: usize,
    /// Records missing at least one of the four sections.
    pub incomplete: usize,
}

impl Summary {
    pub fn of(records: &[TestCase]) -> Self {
        Self {
            parsed: records.len(),
            incomplete: records.iter().filter(|c| c.is_incomplete()).count(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parsed {} successfully.", plural(self.parsed, "test case"))?;
        if self.incomplete > 0 {
            write!(f, "\n{} had missing sections.", plural(self.incomplete, "test case"))?;
        }
        Ok(())
    }
}

fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{} {}", n, noun)
    } else {
        format!("{} {}s", n, noun)
    }
}

/// Parse `input` in the given dialect and render it as CSV.
///
/// A panic inside the parse pass is reported as [`ConvertError::Unexpected`]
/// and affects only this call.
pub fn convert(input: &str, dialect: Dialect) -> Result<Conversion, ConvertError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ConvertError::EmptyInput);
    }

    let records = panic::catch_unwind(|| parser::parse(input, dialect))
        .map_err(|payload| ConvertError::Unexpected(panic_message(payload.as_ref())))?;
    if records.is_empty() {
        return Err(ConvertError::NoRecordsFound { dialect });
    }

    let csv = export::write_csv(&records, dialect)?;
    let summary = Summary::of(&records);
    info!(%dialect, parsed = summary.parsed, incomplete = summary.incomplete, "converted");

    Ok(Conversion {
        records,
        csv,
        summary,
    })
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        assert!(matches!(convert("  \n\t ", Dialect::Markdown), Err(ConvertError::EmptyInput)));
    }

    #[test]
    fn no_records_is_distinct_from_empty() {
        let text = "Given the cart has one item\nWhen the user removes it\nThen the cart is empty\nAnd a confirmation is shown";
        let err = convert(text, Dialect::Markdown).unwrap_err();
        assert!(matches!(err, ConvertError::NoRecordsFound { dialect: Dialect::Markdown }));
    }

    #[test]
    fn one_line_per_record_plus_header() {
        let text = std::fs::read_to_string("tests/fixtures/profile_suite.md").unwrap();
        let out = convert(&text, Dialect::Markdown).unwrap();
        assert_eq!(out.records.len(), 4);
        // Each record's Test Steps cell spans one line per populated Given/When/Then section.
        let embedded: usize = out
            .records
            .iter()
            .map(|c| {
                [&c.given, &c.steps, &c.expected_results]
                    .iter()
                    .filter(|s| !s.is_empty())
                    .count()
                    .saturating_sub(1)
            })
            .sum();
        assert_eq!(out.csv.lines().count(), out.records.len() + 1 + embedded);
        assert!(out.csv.starts_with("\"Test Case ID\",\"Title\""));
        assert!(!out.csv.ends_with('\n'));
    }

    #[test]
    fn summary_counts_incomplete_records() {
        let text = std::fs::read_to_string("tests/fixtures/profile_suite.md").unwrap();
        let out = convert(&text, Dialect::Markdown).unwrap();
        assert_eq!(out.summary, Summary { parsed: 4, incomplete: 3 });
        assert_eq!(
            out.summary.to_string(),
            "Parsed 4 test cases successfully.\n3 test cases had missing sections."
        );
    }

    #[test]
    fn summary_singular() {
        let summary = Summary { parsed: 1, incomplete: 1 };
        assert_eq!(
            summary.to_string(),
            "Parsed 1 test case successfully.\n1 test case had missing sections."
        );
        let clean = Summary { parsed: 2, incomplete: 0 };
        assert_eq!(clean.to_string(), "Parsed 2 test cases successfully.");
    }

    #[test]
    fn testcase_dialect_uses_title_description_shape() {
        let text = std::fs::read_to_string("tests/fixtures/checkout_testcases.txt").unwrap();
        let out = convert(&text, Dialect::Testcase).unwrap();
        assert!(out.csv.starts_with("\"Title\",\"Description\"\n\"Guest checkout with card\",\"##Given\n- Cart contains 2 items"));
        assert_eq!(out.summary.parsed, 3);
    }

    #[test]
    fn repeated_conversions_are_independent() {
        let text = "#### TC01 - A\nGiven x";
        let first = convert(text, Dialect::Markdown).unwrap();
        let _ = convert("", Dialect::Markdown);
        let second = convert(text, Dialect::Markdown).unwrap();
        assert_eq!(first.csv, second.csv);
    }
}

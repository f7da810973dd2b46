pub mod csv;

use crate::error::ConvertError;
use crate::parser::sections::SectionKind;
use crate::parser::Dialect;
use crate::record::{TestCase, DEFAULT_PRIORITY};

use self::csv::{to_csv, Row};

pub const FULL_HEADERS: [&str; 6] = [
    "Test Case ID",
    "Title",
    "Test Steps",
    "Actual Results",
    "Priority",
    "Tags",
];
pub const TITLE_DESCRIPTION_HEADERS: [&str; 2] = ["Title", "Description"];

/// Serialize records in the CSV shape that belongs to their dialect.
pub fn write_csv(cases: &[TestCase], dialect: Dialect) -> Result<String, ConvertError> {
    match dialect {
        Dialect::Markdown => {
            let rows: Vec<Row> = cases.iter().map(full_row).collect();
            to_csv(&rows, &FULL_HEADERS)
        }
        Dialect::Testcase => {
            let rows: Vec<Row> = cases.iter().map(title_description_row).collect();
            to_csv(&rows, &TITLE_DESCRIPTION_HEADERS)
        }
    }
}

/// `Test Steps` packs Given/When/Then into one cell, one labelled line each.
pub fn full_row(case: &TestCase) -> Row {
    let steps: Vec<String> = [
        ("Given", &case.given),
        ("When", &case.steps),
        ("Then", &case.expected_results),
    ]
    .into_iter()
    .filter(|(_, lines)| !lines.is_empty())
    .map(|(label, lines)| format!("{}: {}", label, lines.join("; ")))
    .collect();

    let priority = if case.priority.is_empty() {
        DEFAULT_PRIORITY.to_string()
    } else {
        case.priority.clone()
    };

    Row::from([
        ("Test Case ID", case.id.clone()),
        ("Title", case.title.clone()),
        ("Test Steps", steps.join("\n")),
        ("Actual Results", case.actual_results.join("; ")),
        ("Priority", priority),
        ("Tags", String::new()),
    ])
}

pub fn title_description_row(case: &TestCase) -> Row {
    Row::from([
        ("Title", case.title.clone()),
        ("Description", describe(case)),
    ])
}

/// `##Label` then the section's lines, sections separated by one blank line.
fn describe(case: &TestCase) -> String {
    SectionKind::ALL
        .iter()
        .filter(|&&kind| !case.section(kind).is_empty())
        .map(|&kind| {
            let mut block = vec![format!("##{}", kind.label())];
            block.extend(case.section(kind).iter().cloned());
            block.join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

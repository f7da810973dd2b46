use tracing::debug;

use super::blocks::{classify_line, Line};
use super::heading::parse_heading;
use super::ids::assign_missing_ids;
use super::sections::{classify_section_line, SectionState};
use crate::record::TestCase;

/// The case currently being accumulated and the section its lines feed.
struct OpenCase {
    case: TestCase,
    section: SectionState,
}

/// Parse a Markdown/BDD document driven by `####` or bare `TC01 - ...` headings.
///
/// Lines before the first heading are ignored, so a document with no heading
/// yields no records.
pub fn parse_markdown(text: &str) -> Vec<TestCase> {
    let mut cases = Vec::new();
    let mut open: Option<OpenCase> = None;

    for (lineno, raw) in text.lines().enumerate() {
        let line = classify_line(raw.trim());
        if line.is_discarded() {
            continue;
        }

        match line {
            Line::Heading(heading) => {
                if let Some(done) = open.take() {
                    seal(&mut cases, done.case);
                }
                let parsed = parse_heading(heading);
                debug!(line = lineno + 1, id = %parsed.id, title = %parsed.title, "heading");
                open = Some(OpenCase {
                    case: TestCase::new(parsed.id, parsed.title, parsed.priority),
                    section: SectionState::Closed,
                });
            }
            Line::Blank => {
                if let Some(current) = open.as_mut() {
                    current.section = SectionState::Closed;
                }
            }
            Line::Text(body) => {
                let Some(current) = open.as_mut() else {
                    continue;
                };
                let classified = classify_section_line(body, current.section);
                current.section = classified.next_state(current.section);
                if let Some((kind, content)) = classified.content {
                    current.case.push(kind, content);
                }
            }
            Line::Separator | Line::BlockHeader => {}
        }
    }

    if let Some(done) = open {
        seal(&mut cases, done.case);
    }

    assign_missing_ids(&mut cases);
    cases
}

fn seal(cases: &mut Vec<TestCase>, case: TestCase) {
    debug!(
        id = %case.id,
        given = case.given.len(),
        steps = case.steps.len(),
        expected = case.expected_results.len(),
        actual = case.actual_results.len(),
        "sealed test case"
    );
    cases.push(case);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_markdown_case() {
        let md = "#### TC01 — Login — P1\n**Given** user on login page\n**When** user submits valid credentials\n**Then** user is redirected to dashboard";
        let cases = parse_markdown(md);
        assert_eq!(cases.len(), 1);
        let tc = &cases[0];
        assert_eq!(tc.id, "TC01");
        assert_eq!(tc.title, "Login");
        assert_eq!(tc.priority, "P1");
        assert_eq!(tc.given, vec!["user on login page"]);
        assert_eq!(tc.steps, vec!["user submits valid credentials"]);
        assert_eq!(tc.expected_results, vec!["user is redirected to dashboard"]);
        assert!(tc.actual_results.is_empty());
    }

    #[test]
    fn no_heading_no_records() {
        let md = "Given the cart has one item\nWhen the user removes it\nThen the cart is empty\nAnd a confirmation is shown";
        assert!(parse_markdown(md).is_empty());
    }

    #[test]
    fn plain_heading_with_bracket_priority() {
        let md = "TC02 - Update Name - Happy Path [Priority: P0]\nGiven a profile\nWhen the name changes\nThen it is saved\nAnd a toast appears";
        let cases = parse_markdown(md);
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].id, "TC02");
        assert_eq!(cases[0].title, "Update Name - Happy Path");
        assert_eq!(cases[0].priority, "P0");
        assert_eq!(cases[0].expected_results, vec!["it is saved", "a toast appears"]);
    }

    #[test]
    fn dash_joined_title_keeps_numeric_id() {
        let md = "TC01-Login - Happy path\nGiven (Preconditions): user logged in\nWhen the user signs in";
        let cases = parse_markdown(md);
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].id, "TC01");
        assert_eq!(cases[0].title, "Login - Happy path");
        assert_eq!(cases[0].given, vec!["user logged in"]);
        assert_eq!(cases[0].steps, vec!["the user signs in"]);
    }

    #[test]
    fn blank_line_closes_section() {
        let md = "#### TC01 - Blank lines\nGiven:\n- first\n\n- orphan bullet\nThen:\n- shown";
        let cases = parse_markdown(md);
        assert_eq!(cases[0].given, vec!["first"]);
        assert_eq!(cases[0].expected_results, vec!["shown"]);
    }

    #[test]
    fn separators_and_block_headers_keep_section_open() {
        let md = "### BLOCK A\n#### TC01 - Sep\nWhen:\n- one\n---\n### BLOCK B\n- two";
        let cases = parse_markdown(md);
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].steps, vec!["one", "two"]);
    }

    #[test]
    fn missing_ids_are_generated_in_order() {
        let md = "#### First untitled\n#### TC05 - Explicit\n#### Second untitled";
        let ids: Vec<_> = parse_markdown(md).into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["TC01", "TC05", "TC02"]);
    }

    #[test]
    fn preamble_before_first_heading_is_ignored() {
        let md = "# Suite\nGiven stray text\n#### TC01 - Only\nGiven real";
        let cases = parse_markdown(md);
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].given, vec!["real"]);
    }

    #[test]
    fn markdown_fixture() {
        let md = std::fs::read_to_string("tests/fixtures/profile_suite.md").unwrap();
        let cases = parse_markdown(&md);
        assert_eq!(cases.len(), 4);

        let ids: Vec<&str> = cases.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["TC01", "TC02", "TC03", "TC01"]);

        let first = &cases[0];
        assert_eq!(first.title, "Update Name (Happy Path)");
        assert_eq!(first.priority, "P1");
        assert_eq!(first.given, vec!["User is logged in", "User is on the Profile page"]);
        assert_eq!(first.steps, vec!["User edits the name field", "User clicks Save"]);
        assert_eq!(first.expected_results, vec!["Name is updated", "Success toast is shown"]);
        assert_eq!(first.actual_results, vec!["As expected"]);

        let second = &cases[1];
        assert_eq!(second.priority, "P2");
        assert_eq!(second.given, vec!["User is logged in"]);
        assert_eq!(second.steps, vec!["User clears the name field", "User clicks Save"]);
        assert_eq!(second.expected_results, vec!["Validation error \"Name is required\" is shown"]);
        assert!(second.actual_results.is_empty());

        let third = &cases[2];
        assert_eq!(third.title, "Update Avatar - Oversized File");
        assert_eq!(third.priority, "P0");
        assert_eq!(third.given, vec!["User is on the Profile page"]);
        assert_eq!(third.steps, vec!["User uploads a 25 MB image"]);
        assert_eq!(third.expected_results, vec!["Upload is rejected", "File size hint is displayed"]);

        let untitled = &cases[3];
        assert_eq!(untitled.title, "Delete Account");
        assert_eq!(untitled.priority, "P3");
        assert_eq!(untitled.steps, vec!["Open settings", "Choose delete account"]);
    }
}

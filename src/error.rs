use thiserror::Error;

use crate::parser::Dialect;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Please enter or paste markdown content first.")]
    EmptyInput,

    #[error("{}", no_records_hint(.dialect))]
    NoRecordsFound { dialect: Dialect },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error parsing input: {0}")]
    Unexpected(String),
}

fn no_records_hint(dialect: &Dialect) -> &'static str {
    match dialect {
        Dialect::Markdown => {
            "No test cases found. Make sure your markdown contains headings starting with \"#### \" (H4) or plain \"TC01 - Title\" lines."
        }
        Dialect::Testcase => {
            "No test cases found. Make sure each test case starts with a title line followed by Given/When/Then section headers."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_user_facing() {
        assert_eq!(
            ConvertError::EmptyInput.to_string(),
            "Please enter or paste markdown content first."
        );
        let md = ConvertError::NoRecordsFound { dialect: Dialect::Markdown }.to_string();
        assert!(md.contains("\"#### \" (H4)"));
        let tc = ConvertError::NoRecordsFound { dialect: Dialect::Testcase }.to_string();
        assert!(tc.contains("title line"));
        assert_eq!(
            ConvertError::Unexpected("boom".into()).to_string(),
            "Error parsing input: boom"
        );
    }
}

use std::collections::HashMap;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::ConvertError;

/// One output row keyed by column name. Missing columns are written empty.
pub type Row = HashMap<&'static str, String>;

/// Render `rows` under `headers`: every field quoted, `"` doubled, rows joined
/// with `\n`, no trailing newline.
pub fn to_csv(rows: &[Row], headers: &[&'static str]) -> Result<String, ConvertError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(headers.iter().map(|h| row.get(h).map(String::as_str).unwrap_or("")))?;
    }

    let bytes = writer.into_inner().map_err(|e| ConvertError::Io(e.into_error()))?;
    let mut out = String::from_utf8(bytes).map_err(|e| ConvertError::Unexpected(e.to_string()))?;
    if out.ends_with('\n') {
        out.pop();
    }
    Ok(out)
}

//! CSV Export
//!
//! Every cell trimmed and quoted, inner quotes doubled, rows joined by
//! `\n` with no trailing newline.

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::CsvExportError;

/// Default download name when the trigger names none
pub const DEFAULT_EXPORT_FILENAME: &str = "export.csv";

/// MIME type of the downloaded blob
pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8;";

/// Encode rows of cell text. Rows may have different lengths.
pub fn encode_csv<R, C>(rows: R) -> Result<String, CsvExportError>
where
    R: IntoIterator,
    R::Item: IntoIterator<Item = C>,
    C: AsRef<str>,
{
    let lines = rows
        .into_iter()
        .map(encode_record)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(lines.join("\n"))
}

fn encode_record<I, C>(cells: I) -> Result<String, CsvExportError>
where
    I: IntoIterator<Item = C>,
    C: AsRef<str>,
{
    let cells: Vec<String> = cells.into_iter().map(|c| c.as_ref().trim().to_string()).collect();
    // A record without cells is an empty line
    if cells.is_empty() {
        return Ok(String::new());
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(Vec::new());
    writer.write_record(&cells)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| CsvExportError::Io(e.into_error()))?;

    let mut line = String::from_utf8(bytes)?;
    if line.ends_with('\n') {
        line.pop();
    }
    Ok(line)
}

/// Download name from an optional trigger attribute
pub fn export_filename(requested: Option<&str>, fallback: &str) -> String {
    match requested.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ if !fallback.trim().is_empty() => fallback.trim().to_string(),
        _ => DEFAULT_EXPORT_FILENAME.to_string(),
    }
}

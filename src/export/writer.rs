//! CSV writer.
//!
//! Every field is quoted, with embedded quotes doubled. Lines are joined by
//! `\n` with no trailing newline.

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::export::ExportError;

/// A finished export: suggested filename plus CSV text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDocument {
    /// Attachment filename, e.g. `shopify_variants.csv`.
    pub filename: &'static str,
    /// CSV text.
    pub body: String,
}

/// Serializes `header` followed by `rows`.
///
/// # Errors
///
/// Returns [`ExportError::Csv`] if a row's length differs from the header's.
///
/// # Example
///
/// ```rust
/// use shopify_catalog_export::export::to_csv;
///
/// let text = to_csv(
///     &["id", "quote"],
///     &[vec!["1".to_string(), r#"He said "hi""#.to_string()]],
/// )
/// .unwrap();
///
/// assert_eq!(text, "\"id\",\"quote\"\n\"1\",\"He said \"\"hi\"\"\"");
/// ```
pub fn to_csv(header: &[&str], rows: &[Vec<String>]) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    let mut text = String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| (*f).to_string()).collect()
    }

    #[test]
    fn test_every_field_is_quoted() {
        let text = to_csv(&["a", "b"], &[row(&["1", "plain"])]).unwrap();
        assert_eq!(text, "\"a\",\"b\"\n\"1\",\"plain\"");
    }

    #[test]
    fn test_quotes_are_doubled() {
        let text = to_csv(&["q"], &[row(&[r#"He said "hi""#])]).unwrap();
        assert_eq!(text.lines().nth(1), Some(r#""He said ""hi""""#));
    }

    #[test]
    fn test_empty_field_is_empty_quotes() {
        let text = to_csv(&["a", "b"], &[row(&["", "x"])]).unwrap();
        assert_eq!(text.lines().nth(1), Some(r#""","x""#));
    }

    #[test]
    fn test_embedded_newline_and_comma_stay_in_field() {
        let text = to_csv(&["a"], &[row(&["one,\ntwo"])]).unwrap();
        assert_eq!(text, "\"a\"\n\"one,\ntwo\"");
    }

    #[test]
    fn test_header_only_has_no_trailing_newline() {
        let text = to_csv(&["a", "b"], &[]).unwrap();
        assert_eq!(text, "\"a\",\"b\"");
    }

    #[test]
    fn test_rows_joined_with_newline() {
        let text = to_csv(&["a"], &[row(&["1"]), row(&["2"])]).unwrap();
        assert_eq!(text, "\"a\"\n\"1\"\n\"2\"");
    }

    #[test]
    fn test_width_mismatch_is_rejected() {
        let result = to_csv(&["a", "b"], &[row(&["only-one"])]);
        assert!(matches!(result, Err(ExportError::Csv(_))));
    }
}

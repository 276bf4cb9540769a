//! Flat, versioned text snapshot of a budget.
//!
//! ```text
//! XODIA_BUDGET_VERSION,4
//! Show Title,Warehouse Rave
//! Show Date,2025-03-01
//! ID:numHeadliners,1
//! ID:headliner_name_1,"Doe, Jane"
//! ...
//! ```
//!
//! The first line carries the format version, the show title and date follow as semantic
//! rows, and every other live field is written as `ID:<fieldId>,<value>` in registry order.

use tracing::{debug, warn};

use showbudget_domain::{live_fields, FieldId, FieldStore, ScalarField};

use crate::error::CoreError;
use crate::labels::EXPLICIT_ID_PREFIX;

pub const FORMAT_KEY: &str = "XODIA_BUDGET_VERSION";
/// Short version key accepted on decode.
pub const SHORT_FORMAT_KEY: &str = "V";
pub const SNAPSHOT_VERSION: u32 = 4;
/// Version assumed for snapshots written before the header existed.
pub const UNVERSIONED: u32 = 1;

/// Ordered `(label, value)` rows of a snapshot plus its format version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSnapshot {
    pub version: u32,
    pub pairs: Vec<(String, String)>,
}

pub fn encode(store: &FieldStore) -> String {
    let mut out = String::new();
    push_row(&mut out, FORMAT_KEY, &SNAPSHOT_VERSION.to_string());
    for header in [ScalarField::ShowTitle, ScalarField::ShowDate] {
        push_row(&mut out, header.label(), store.scalar(header));
    }
    for id in live_fields(store) {
        if matches!(
            id,
            FieldId::Scalar(ScalarField::ShowTitle | ScalarField::ShowDate)
        ) {
            continue;
        }
        let value = store.get(&id).unwrap_or_default();
        push_row(&mut out, &format!("{EXPLICIT_ID_PREFIX}{id}"), value);
    }
    out
}

fn push_row(out: &mut String, label: &str, value: &str) {
    out.push_str(label);
    out.push(',');
    out.push_str(&csv_escape(value));
    out.push('\n');
}

/// Quotes values containing a comma, double quote, CR or LF and doubles embedded quotes.
pub fn csv_escape(value: &str) -> String {
    if value.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub fn decode(text: &str) -> Result<DecodedSnapshot, CoreError> {
    let mut version = None;
    let mut pairs = Vec::new();

    for (position, record) in split_records(text).into_iter().enumerate() {
        let mut columns = record.into_iter();
        let label = columns.next().unwrap_or_default().trim().to_string();
        let value = columns.collect::<Vec<_>>().join(",");

        if position == 0 && (label == FORMAT_KEY || label == SHORT_FORMAT_KEY) {
            version = Some(value.trim().parse::<u32>().unwrap_or_else(|_| {
                warn!(raw = %value, "unreadable snapshot version, assuming {UNVERSIONED}");
                UNVERSIONED
            }));
            continue;
        }
        pairs.push((label, value));
    }

    if pairs.is_empty() {
        return Err(CoreError::EmptySnapshot);
    }
    let version = version.unwrap_or(UNVERSIONED);
    if version > SNAPSHOT_VERSION {
        warn!(
            version,
            supported = SNAPSHOT_VERSION,
            "snapshot written by a newer format version"
        );
    }
    debug!(version, rows = pairs.len(), "snapshot decoded");
    Ok(DecodedSnapshot { version, pairs })
}

/// Splits text into records of columns. Line breaks end a record only outside quotes. A quote
/// opens a quoted section only at the start of a column, where leading spaces and tabs are
/// dropped. Unquoted columns keep their whitespace. Blank records are dropped.
fn split_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut column = String::new();
    let mut column_started = false;
    let mut leading_blank = true;
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    column.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                column.push(ch);
            }
            continue;
        }
        match ch {
            '"' if leading_blank => {
                column.clear();
                in_quotes = true;
                column_started = true;
                leading_blank = false;
            }
            ',' => {
                record.push(std::mem::take(&mut column));
                column_started = false;
                leading_blank = true;
            }
            '\r' | '\n' => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                record.push(std::mem::take(&mut column));
                column_started = false;
                leading_blank = true;
                finish_record(&mut records, std::mem::take(&mut record));
            }
            _ => {
                column.push(ch);
                column_started = true;
                leading_blank &= ch == ' ' || ch == '\t';
            }
        }
    }
    if column_started || !column.is_empty() || !record.is_empty() {
        record.push(column);
        finish_record(&mut records, record);
    }
    records
}

fn finish_record(records: &mut Vec<Vec<String>>, record: Vec<String>) {
    let blank = record.len() == 1 && record[0].trim().is_empty();
    if !blank {
        records.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_quotes_only_when_needed() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_escape("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn decode_handles_mixed_line_endings_and_blanks() {
        let decoded = decode("V,4\r\nShow Title,Test\r\n\r\nVenue,200\rLights\n").expect("decode");
        assert_eq!(decoded.version, 4);
        assert_eq!(
            decoded.pairs,
            vec![
                ("Show Title".to_string(), "Test".to_string()),
                ("Venue".to_string(), "200".to_string()),
                ("Lights".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn quoted_values_keep_commas_quotes_and_newlines() {
        let decoded =
            decode("ID:headliner_name_1,\"Doe, \"\"DJ\"\" Jane\nline two\"\n").expect("decode");
        assert_eq!(decoded.version, UNVERSIONED);
        assert_eq!(decoded.pairs[0].1, "Doe, \"DJ\" Jane\nline two");
    }

    #[test]
    fn extra_columns_are_rejoined_into_the_value() {
        let decoded = decode("Venue,1,200\n").expect("decode");
        assert_eq!(decoded.pairs[0].1, "1,200");
    }

    #[test]
    fn quoted_value_after_leading_space_is_unwrapped() {
        let decoded = decode("Venue, \"1,200\"\nDirect Support Fee,\t\"5\"\n").expect("decode");
        assert_eq!(decoded.pairs[0], ("Venue".to_string(), "1,200".to_string()));
        assert_eq!(decoded.pairs[1].1, "5");
    }

    #[test]
    fn unquoted_values_keep_their_whitespace() {
        let decoded = decode("Venue, 200 \nLights,say \"hi\"\n").expect("decode");
        assert_eq!(decoded.pairs[0].1, " 200 ");
        assert_eq!(decoded.pairs[1].1, "say \"hi\"");
    }

    #[test]
    fn whitespace_only_text_is_empty() {
        assert!(matches!(decode("  \n\r\n"), Err(CoreError::EmptySnapshot)));
        assert!(matches!(decode("V,4\n"), Err(CoreError::EmptySnapshot)));
    }
}

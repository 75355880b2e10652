use csv::ByteRecord;
use simdutf8::basic::from_utf8;

use crate::error::{Error, Result, Section};
use crate::value::{MissingLabel, Value};

/// Default substring that marks a value field as a missing reading.
pub const DEFAULT_MISSING_MARKER: &str = "Missing";

/// Configures delimiter and missing-marker recognition for series parsing.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    delimiter: u8,
    missing_marker: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            delimiter: b'\t',
            missing_marker: DEFAULT_MISSING_MARKER.to_owned(),
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_missing_marker(mut self, marker: impl Into<String>) -> Self {
        self.missing_marker = marker.into();
        self
    }

    pub(crate) const fn delimiter(&self) -> u8 {
        self.delimiter
    }

    pub(crate) fn missing_marker(&self) -> &str {
        &self.missing_marker
    }
}

pub(super) fn decode_record(
    record: &ByteRecord,
    index: u64,
    options: &ParseOptions,
) -> Result<(String, Value)> {
    if record.len() != 2 {
        return Err(Error::MalformedRecord {
            section: Section::Record { index },
            details: format!("expected 2 delimited fields, found {}", record.len()).into(),
        });
    }
    let timestamp = decode_field(&record[0], index)?;
    let token = decode_field(&record[1], index)?;
    let value = classify_value(token, index, options)?;
    Ok((timestamp.to_owned(), value))
}

fn decode_field(bytes: &[u8], record: u64) -> Result<&str> {
    from_utf8(bytes).map_err(|_| Error::MalformedRecord {
        section: Section::Record { index: record },
        details: "field is not valid UTF-8".into(),
    })
}

/// Classifies a value token as either a missing marker or a finite number.
///
/// The full token becomes the missing label when it contains the configured
/// marker substring, matching how upstream producers tag absent readings.
///
/// # Errors
///
/// Returns [`Error::MalformedValue`] when the token is neither a marker nor
/// parseable as a finite number.
pub fn classify_value(token: &str, record: u64, options: &ParseOptions) -> Result<Value> {
    let token = token.trim();
    if token.contains(options.missing_marker()) {
        return Ok(Value::Missing(MissingLabel::new(token)));
    }
    let number: f64 = token.parse().map_err(|_| Error::MalformedValue {
        section: Section::value_field(record),
        details: format!("'{token}' is neither a missing marker nor a number").into(),
    })?;
    if !number.is_finite() {
        return Err(Error::MalformedValue {
            section: Section::value_field(record),
            details: format!("'{token}' is not a finite number").into(),
        });
    }
    Ok(Value::Present(number))
}

mod record;

use std::io::Read;

use csv::ReaderBuilder;

use crate::error::Result;
use crate::series::Series;

pub use record::{DEFAULT_MISSING_MARKER, ParseOptions, classify_value};

/// Parses a delimited timestamp/value stream into a [`Series`].
///
/// One record per line, two fields: an opaque timestamp and a value token.
/// Blank lines are skipped. Field order defines the reading positions.
///
/// # Errors
///
/// Returns an error if a record has the wrong shape, if a value token is
/// neither a missing marker nor a finite number, or if the underlying reader
/// fails.
#[cfg_attr(feature = "hotpath", hotpath::measure)]
pub fn parse_series<R: Read>(reader: R, options: &ParseOptions) -> Result<Series> {
    let mut rows = ReaderBuilder::new()
        .delimiter(options.delimiter())
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut series = Series::new();
    let mut record = csv::ByteRecord::new();
    while rows.read_byte_record(&mut record)? {
        let index = series.len() as u64;
        let (timestamp, value) = record::decode_record(&record, index, options)?;
        series.push(timestamp, value);
    }
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::value::Value;

    #[test]
    fn parse_tab_separated_readings() {
        let input = b"2023-01-01 12:00\t26.4\n2023-01-02 12:00\tMissing_1\n";
        let series = parse_series(&input[..], &ParseOptions::default()).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.readings()[0].timestamp, "2023-01-01 12:00");
        assert_eq!(series.readings()[0].value, Value::Present(26.4));
        assert!(series.readings()[1].value.is_missing());
        assert_eq!(series.readings()[1].index, 1);
    }

    #[test]
    fn parse_empty_input_yields_empty_series() {
        let series = parse_series(&b""[..], &ParseOptions::default()).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn parse_skips_blank_lines() {
        let input = b"2023-01-01 12:00\t26.4\n\n2023-01-02 12:00\t27.0\n";
        let series = parse_series(&input[..], &ParseOptions::default()).unwrap();
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn parse_rejects_wrong_field_count() {
        let input = b"2023-01-01 12:00\t26.4\textra\n";
        let err = parse_series(&input[..], &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { .. }));
    }

    #[test]
    fn parse_reports_offending_record_position() {
        let input = b"2023-01-01 12:00\t26.4\n2023-01-02 12:00\tbogus\n";
        let err = parse_series(&input[..], &ParseOptions::default()).unwrap_err();
        assert!(err.to_string().contains("record 1"));
    }

    #[test]
    fn parse_with_comma_delimiter() {
        let input = b"2023-01-01 12:00,26.4\n2023-01-02 12:00,Missing_1\n";
        let options = ParseOptions::new().with_delimiter(b',');
        let series = parse_series(&input[..], &options).unwrap();
        assert_eq!(series.len(), 2);
        assert!(series.readings()[1].value.is_missing());
    }
}

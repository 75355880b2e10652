use std::borrow::Cow;
use std::fmt;
use std::io;

/// Result type used across the series reader and gap-filling implementation.
pub type Result<T> = std::result::Result<T, Error>;

/// High-level error type surfaced by the series reader and interpolator.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O failure while reading from or writing to the underlying stream.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A value field is neither a recognized missing marker nor a finite number.
    #[error("malformed value in {section}: {details}")]
    MalformedValue {
        section: Section,
        details: Cow<'static, str>,
    },

    /// A record does not have the expected timestamp/value shape.
    #[error("malformed record in {section}: {details}")]
    MalformedRecord {
        section: Section,
        details: Cow<'static, str>,
    },

    /// The series contains missing readings but no present value to anchor them.
    #[error("no present value in the series to anchor '{label}'")]
    NoAnchor { label: String },

    /// Failure surfaced by the underlying delimited reader or writer.
    #[error("delimited record handling failed: {details}")]
    Delimited { details: Cow<'static, str> },
}

/// Logical location within the input used for diagnostic reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    Record { index: u64 },
    ValueField { record: u64 },
}

impl Section {
    /// Helper constructor for the value field of a known record.
    #[must_use]
    pub const fn value_field(record: u64) -> Self {
        Self::ValueField { record }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Self::Delimited {
            details: Cow::Owned(err.to_string()),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Record { index } => write!(f, "record {index}"),
            Self::ValueField { record } => write!(f, "value field of record {record}"),
        }
    }
}

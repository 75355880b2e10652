use std::borrow::Cow;
use std::io::Write;

use csv::WriterBuilder;
use ryu::Buffer as RyuBuffer;

use crate::error::{Error, Result};
use crate::series::Reading;
use crate::sinks::{SeriesSink, SinkContext};
use crate::value::Value;

/// Writes the filled series back out as timestamp/value records.
///
/// Present values are rendered with `ryu`; a reading that is still missing
/// (possible only if the series was not filled first) keeps its label.
pub struct TsvSink<W: Write> {
    writer: csv::Writer<W>,
    ryu: RyuBuffer,
}

impl<W: Write> TsvSink<W> {
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_delimiter(writer, b'\t')
    }

    #[must_use]
    pub fn with_delimiter(writer: W, delimiter: u8) -> Self {
        Self {
            writer: WriterBuilder::new().delimiter(delimiter).from_writer(writer),
            ryu: RyuBuffer::new(),
        }
    }

    /// Flushes and returns the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the final flush fails.
    pub fn into_inner(self) -> Result<W> {
        self.writer.into_inner().map_err(|err| Error::Delimited {
            details: Cow::Owned(err.to_string()),
        })
    }
}

impl<W: Write> SeriesSink for TsvSink<W> {
    fn begin(&mut self, _context: SinkContext<'_>) -> Result<()> {
        Ok(())
    }

    fn write_reading(&mut self, reading: &Reading) -> Result<()> {
        let value = match &reading.value {
            Value::Present(number) => self.ryu.format(*number),
            Value::Missing(label) => label.as_str(),
        };
        self.writer
            .write_record([reading.timestamp.as_str(), value])?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

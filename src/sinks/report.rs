use std::io::Write;

use crate::error::Result;
use crate::interpolate::Resolution;
use crate::sinks::{SeriesSink, SinkContext};

/// Writes one `<label>: <value>` line per resolved missing reading.
///
/// Values are rendered with fixed six-decimal precision, in the order the
/// labels were first encountered in the input.
pub struct ReportSink<W: Write> {
    writer: W,
}

impl<W: Write> ReportSink<W> {
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SeriesSink for ReportSink<W> {
    fn begin(&mut self, _context: SinkContext<'_>) -> Result<()> {
        Ok(())
    }

    fn write_resolution(&mut self, resolution: &Resolution) -> Result<()> {
        writeln!(self.writer, "{}: {:.6}", resolution.label, resolution.value)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

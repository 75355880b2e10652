use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::Result;
use crate::interpolate::{Resolutions, fill_missing};
use crate::parser::{ParseOptions, parse_series};
use crate::series::{Series, SeriesSummary};
use crate::sinks::{SeriesSink, SinkContext};

/// High-level handle over a parsed sensor series.
pub struct SeriesFile {
    series: Series,
}

impl SeriesFile {
    /// Opens a delimited series file from disk with default options.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, &ParseOptions::default())
    }

    /// Opens a delimited series file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader_with_options(file, options)
    }

    /// Builds a series from any `Read` implementor with default options.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, &ParseOptions::default())
    }

    /// Builds a series from any `Read` implementor.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn from_reader_with_options<R: Read>(reader: R, options: &ParseOptions) -> Result<Self> {
        let series = parse_series(reader, options)?;
        Ok(Self { series })
    }

    #[must_use]
    pub const fn series(&self) -> &Series {
        &self.series
    }

    #[must_use]
    pub fn summary(&self) -> SeriesSummary {
        self.series.summary()
    }

    /// Resolves every missing reading in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the series has missing readings but no present
    /// value to anchor them.
    pub fn fill(&mut self) -> Result<Resolutions> {
        fill_missing(&mut self.series)
    }

    /// Fills the series and streams it into a sink implementation.
    ///
    /// The sink receives the pre-fill summary, then every reading in input
    /// order, then every resolution in first-seen order.
    ///
    /// # Errors
    ///
    /// Returns an error if filling fails or if the sink reports a failure.
    pub fn fill_into_sink<S: SeriesSink>(&mut self, sink: &mut S) -> Result<Resolutions> {
        let summary = self.series.summary();
        let resolutions = fill_missing(&mut self.series)?;
        sink.begin(SinkContext { summary: &summary })?;
        for reading in self.series.readings() {
            sink.write_reading(reading)?;
        }
        for resolution in &resolutions {
            sink.write_resolution(resolution)?;
        }
        sink.finish()?;
        Ok(resolutions)
    }

    #[must_use]
    pub fn into_series(self) -> Series {
        self.series
    }
}

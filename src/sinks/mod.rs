mod report;
mod tsv;

pub use report::ReportSink;
pub use tsv::TsvSink;

use crate::error::Result;
use crate::interpolate::Resolution;
use crate::series::{Reading, SeriesSummary};

/// Provides series-level information to sinks during initialisation.
///
/// The summary reflects the series before gap filling, so sinks can see how
/// many readings were originally missing.
pub struct SinkContext<'a> {
    pub summary: &'a SeriesSummary,
}

/// Trait implemented by sinks that consume a filled series.
pub trait SeriesSink {
    /// Called before any output is written.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink cannot initialise its output.
    fn begin(&mut self, context: SinkContext<'_>) -> Result<()>;

    /// Invoked for every reading in input order after gap filling.
    ///
    /// # Errors
    ///
    /// Returns an error if the reading cannot be written.
    fn write_reading(&mut self, _reading: &Reading) -> Result<()> {
        Ok(())
    }

    /// Invoked for every resolved missing label in first-seen order.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolution cannot be written.
    fn write_resolution(&mut self, _resolution: &Resolution) -> Result<()> {
        Ok(())
    }

    /// Called once all readings and resolutions have been forwarded.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails to flush its output.
    fn finish(&mut self) -> Result<()>;
}

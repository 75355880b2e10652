pub mod api;
pub mod error;
pub mod interpolate;
pub mod logger;
pub mod parser;
pub mod series;
pub mod sinks;
pub mod value;

pub use crate::error::{Error, Result};
pub use api::SeriesFile;
pub use interpolate::{Resolution, Resolutions, fill_missing};
pub use parser::ParseOptions;
pub use series::{Reading, Series, SeriesSummary};
pub use sinks::{ReportSink, SeriesSink, SinkContext, TsvSink};
pub use value::{MissingLabel, Value};

/// Parses a series and resolves every missing reading in one call.
///
/// # Errors
///
/// Returns an error if a record is malformed or if the series has missing
/// readings without any present value to anchor them.
pub fn fill_from_reader<R: std::io::Read>(reader: R) -> Result<(Series, Resolutions)> {
    let mut file = SeriesFile::from_reader(reader)?;
    let resolutions = file.fill()?;
    Ok((file.into_series(), resolutions))
}

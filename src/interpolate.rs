use serde::Serialize;

use crate::error::{Error, Result};
use crate::series::Series;
use crate::value::Value;

/// One resolved missing reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    /// Label of the missing marker, e.g. `Missing_3`.
    pub label: String,
    /// Position of the reading in the series.
    pub index: usize,
    /// Full-precision resolved value.
    pub value: f64,
}

/// Ordered mapping from missing label to resolved value, in the order the
/// labels were first encountered while scanning the series left to right.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Resolutions {
    entries: Vec<Resolution>,
}

impl Resolutions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Resolution> {
        self.entries.iter()
    }

    /// Looks up the resolved value for a missing label.
    #[must_use]
    pub fn value_of(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.value)
    }

    fn push(&mut self, entry: Resolution) {
        self.entries.push(entry);
    }
}

impl<'a> IntoIterator for &'a Resolutions {
    type Item = &'a Resolution;
    type IntoIter = std::slice::Iter<'a, Resolution>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Resolves every missing reading in the series in place.
///
/// Interpolation is linear between the nearest originally present readings on
/// either side, weighted by index distance. A missing reading with an anchor
/// on only one side copies that anchor's value. Anchor search consults a
/// snapshot of the values that were present before any filling, so present
/// readings are never altered and the outcome does not depend on the order
/// gaps are resolved in.
///
/// # Errors
///
/// Returns [`Error::NoAnchor`] when the series contains missing readings but
/// no present value at all.
#[cfg_attr(feature = "hotpath", hotpath::measure)]
pub fn fill_missing(series: &mut Series) -> Result<Resolutions> {
    let anchors: Vec<Option<f64>> = series
        .readings()
        .iter()
        .map(|reading| reading.value.as_present())
        .collect();

    let mut resolutions = Resolutions::new();
    for i in 0..anchors.len() {
        let label = match &series.readings()[i].value {
            Value::Missing(label) => label.as_str().to_owned(),
            Value::Present(_) => continue,
        };

        let value = match (nearest_before(&anchors, i), nearest_after(&anchors, i)) {
            (Some((p, before)), Some((q, after))) => {
                let ratio = (i - p) as f64 / (q - p) as f64;
                before + (after - before) * ratio
            }
            (Some((_, before)), None) => before,
            (None, Some((_, after))) => after,
            (None, None) => return Err(Error::NoAnchor { label }),
        };

        series.readings_mut()[i].value = Value::Present(value);
        resolutions.push(Resolution {
            label,
            index: i,
            value,
        });
    }
    Ok(resolutions)
}

fn nearest_before(anchors: &[Option<f64>], index: usize) -> Option<(usize, f64)> {
    anchors[..index]
        .iter()
        .copied()
        .enumerate()
        .rev()
        .find_map(|(p, anchor)| anchor.map(|value| (p, value)))
}

fn nearest_after(anchors: &[Option<f64>], index: usize) -> Option<(usize, f64)> {
    anchors
        .iter()
        .copied()
        .enumerate()
        .skip(index + 1)
        .find_map(|(q, anchor)| anchor.map(|value| (q, value)))
}

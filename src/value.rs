use std::fmt;

/// Represents a single reading value produced by the series parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Finite measurement present in the input.
    Present(f64),
    /// Placeholder for a measurement absent from the input.
    Missing(MissingLabel),
}

impl Value {
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing(_))
    }

    /// Returns the measurement when the value is present.
    #[must_use]
    pub const fn as_present(&self) -> Option<f64> {
        match self {
            Self::Present(value) => Some(*value),
            Self::Missing(_) => None,
        }
    }
}

/// Label carried by a missing reading, e.g. `Missing_3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MissingLabel(String);

impl MissingLabel {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MissingLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MissingLabel {
    fn from(label: &str) -> Self {
        Self(label.to_owned())
    }
}

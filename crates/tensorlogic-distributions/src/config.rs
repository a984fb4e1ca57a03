//! Construction options for distributions.

use crate::dtype::SampleDtype;
use serde::{Deserialize, Serialize};

/// Options shared by every Bernoulli constructor.
///
/// Missing fields fall back to their defaults when deserialized, so a config file
/// only needs to mention what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BernoulliConfig {
    /// Element type of samples and of the mode
    pub sample_dtype: SampleDtype,
    /// Reject probabilities outside `[0, 1]` at construction
    pub strict: bool,
    /// Fail statistics that are undefined for some batch member instead of
    /// returning NaN for that member
    pub strict_statistics: bool,
    /// Display name, used in log messages only
    pub name: String,
}

impl Default for BernoulliConfig {
    fn default() -> Self {
        Self {
            sample_dtype: SampleDtype::Int32,
            strict: true,
            strict_statistics: true,
            name: "Bernoulli".to_string(),
        }
    }
}

impl BernoulliConfig {
    /// Create a config that skips range validation of probabilities.
    ///
    /// Out-of-range inputs then surface as NaN in derived quantities.
    pub fn permissive() -> Self {
        Self {
            strict: false,
            ..Default::default()
        }
    }

    /// Set the sample dtype
    pub fn with_sample_dtype(mut self, dtype: SampleDtype) -> Self {
        self.sample_dtype = dtype;
        self
    }

    /// Enable or disable probability range validation
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_strict_statistics(mut self, strict_statistics: bool) -> Self {
        self.strict_statistics = strict_statistics;
        self
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

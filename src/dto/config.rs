//! Construction options

use serde::Deserialize;

/// Default bound on nested record casting
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Options applied by a [`Registry`](super::Registry) to every construction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DtoConfig {
    /// Maximum nesting of records cast from plain data.
    pub max_depth: usize,
    /// Whether integer values satisfy `float`/`double` declarations.
    pub integers_as_floats: bool,
}

impl Default for DtoConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            integers_as_floats: false, // strict kinds by default
        }
    }
}

impl DtoConfig {
    /// Set the maximum casting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Allow integers where floats are declared.
    pub fn with_integers_as_floats(mut self, enabled: bool) -> Self {
        self.integers_as_floats = enabled;
        self
    }

    /// Parse a config from JSON; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

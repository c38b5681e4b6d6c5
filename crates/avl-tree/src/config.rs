//! Tree configuration.
//!
//! The configuration is plain data so it can be embedded in a caller's own
//! settings file, e.g.:
//!
//! ```toml
//! duplicates = "ignore"
//! ```

use serde::{Deserialize, Serialize};

use crate::error::AvlError;

/// What [`crate::AvlTree`] does with a key that compares equal to one
/// already stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Equal keys route right and each occupies its own node. Search stops
    /// at the first equal node on the order-walk.
    #[default]
    Keep,
    /// Set semantics: inserting an existing key is a no-op.
    Ignore,
    /// `try_insert` fails with [`AvlError::DuplicateKey`].
    Reject,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct AvlConfig {
    pub duplicates: DuplicatePolicy,
}

impl AvlConfig {
    pub fn new(duplicates: DuplicatePolicy) -> Self {
        Self { duplicates }
    }

    /// Parses a TOML document. Missing fields take their defaults.
    pub fn from_toml_str(src: &str) -> Result<Self, AvlError> {
        toml::from_str(src).map_err(|e| AvlError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, AvlError> {
        toml::to_string(self).map_err(|e| AvlError::Config(e.to_string()))
    }
}

//! Runtime configuration.
//!
//! [`RuntimeConfig`] carries the knobs a [`Runtime`](crate::runtime::Runtime)
//! consults while printing and while choosing map representations.
//!
//! # Examples
//!
//! ```rust
//! use persistent_runtime::config::RuntimeConfig;
//!
//! let config = RuntimeConfig::default()
//!     .with_print_length(Some(10))
//!     .with_hash_map_threshold(8);
//! assert_eq!(config.print_length, Some(10));
//! assert_eq!(config.hash_map_threshold, 8);
//! ```

use std::env;

/// Environment variable overriding [`RuntimeConfig::print_length`].
pub const PRINT_LENGTH_VARIABLE: &str = "PERSISTENT_RUNTIME_PRINT_LENGTH";

/// Environment variable overriding [`RuntimeConfig::hash_map_threshold`].
pub const HASH_MAP_THRESHOLD_VARIABLE: &str = "PERSISTENT_RUNTIME_HASH_MAP_THRESHOLD";

/// Default number of keys an `ObjMap` may hold before it is promoted.
pub const DEFAULT_HASH_MAP_THRESHOLD: usize = 32;

/// Settings shared by every operation of a runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RuntimeConfig {
    /// Maximum number of elements printed per collection; `None` prints all.
    pub print_length: Option<usize>,
    /// Number of keys above which a flat `ObjMap` is promoted to a hashed map.
    pub hash_map_threshold: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            print_length: None,
            hash_map_threshold: DEFAULT_HASH_MAP_THRESHOLD,
        }
    }
}

impl RuntimeConfig {
    /// Returns a copy with `print_length` replaced.
    #[must_use]
    pub const fn with_print_length(mut self, print_length: Option<usize>) -> Self {
        self.print_length = print_length;
        self
    }

    /// Returns a copy with `hash_map_threshold` replaced.
    #[must_use]
    pub const fn with_hash_map_threshold(mut self, threshold: usize) -> Self {
        self.hash_map_threshold = threshold;
        self
    }

    /// Builds a configuration from the process environment.
    ///
    /// Unset or unparsable variables keep their default value.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(PRINT_LENGTH_VARIABLE) {
            match raw.trim().parse::<usize>() {
                Ok(length) => config.print_length = Some(length),
                Err(_) => tracing::debug!(variable = PRINT_LENGTH_VARIABLE, %raw, "ignoring unparsable value"),
            }
        }
        if let Some(raw) = lookup(HASH_MAP_THRESHOLD_VARIABLE) {
            match raw.trim().parse::<usize>() {
                Ok(threshold) => config.hash_map_threshold = threshold,
                Err(_) => tracing::debug!(variable = HASH_MAP_THRESHOLD_VARIABLE, %raw, "ignoring unparsable value"),
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_default_values() {
        let config = RuntimeConfig::default();
        assert_eq!(config.print_length, None);
        assert_eq!(config.hash_map_threshold, DEFAULT_HASH_MAP_THRESHOLD);
    }

    #[rstest]
    fn test_from_lookup_reads_both_variables() {
        let config = RuntimeConfig::from_lookup(|name| match name {
            PRINT_LENGTH_VARIABLE => Some("5".to_string()),
            HASH_MAP_THRESHOLD_VARIABLE => Some(" 4 ".to_string()),
            _ => None,
        });
        assert_eq!(config.print_length, Some(5));
        assert_eq!(config.hash_map_threshold, 4);
    }

    #[rstest]
    fn test_from_lookup_ignores_garbage() {
        let config = RuntimeConfig::from_lookup(|_| Some("many".to_string()));
        assert_eq!(config, RuntimeConfig::default());
    }
}

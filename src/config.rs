use std::env;

use serde::{Deserialize, Serialize};

use crate::key::{FalsyPolicy, DEFAULT_SENTINEL};
use crate::order::Comparison;

pub const SENTINEL_VAR: &str = "FIELD_ORDER_SENTINEL";
pub const COMPARISON_VAR: &str = "FIELD_ORDER_COMPARISON";
pub const FALSY_VAR: &str = "FIELD_ORDER_FALSY";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid sentinel {value:?}, expected a finite number")]
    InvalidSentinel { value: String },
    #[error("unknown comparison {0:?}, expected one of: subtractive, typed")]
    UnknownComparison(String),
    #[error("unknown falsy policy {0:?}, expected one of: sentinel, missing-only")]
    UnknownFalsyPolicy(String),
    #[error("malformed order config")]
    Json(#[from] serde_json::Error),
}

/// Tunes how `order::order_by_field_with` turns field values into keys and compares them.
///
/// The default reproduces the behavior the display layer was built against: sentinel 999, every
/// falsy value counts as unset, keys compared by subtraction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrderConfig {
    pub sentinel: f64,
    pub comparison: Comparison,
    pub falsy: FalsyPolicy,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            sentinel: DEFAULT_SENTINEL,
            comparison: Comparison::default(),
            falsy: FalsyPolicy::default(),
        }
    }
}

impl OrderConfig {
    /// Reads `FIELD_ORDER_SENTINEL`, `FIELD_ORDER_COMPARISON` and `FIELD_ORDER_FALSY`.
    /// Unset variables keep their default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validated()
    }

    pub(crate) fn from_lookup<F>(mut lookup: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(SENTINEL_VAR) {
            config.sentinel = value
                .trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidSentinel {
                    value: value.clone(),
                })?;
        }

        if let Some(value) = lookup(COMPARISON_VAR) {
            config.comparison = match value.trim().to_ascii_lowercase().as_str() {
                "subtractive" => Comparison::Subtractive,
                "typed" => Comparison::Typed,
                _ => return Err(ConfigError::UnknownComparison(value)),
            };
        }

        if let Some(value) = lookup(FALSY_VAR) {
            config.falsy = match value.trim().to_ascii_lowercase().as_str() {
                "sentinel" => FalsyPolicy::Sentinel,
                "missing-only" | "missing_only" => FalsyPolicy::MissingOnly,
                _ => return Err(ConfigError::UnknownFalsyPolicy(value)),
            };
        }

        tracing::debug!(?config, "loaded order config from environment");

        config.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if !self.sentinel.is_finite() {
            return Err(ConfigError::InvalidSentinel {
                value: self.sentinel.to_string(),
            });
        }

        Ok(self)
    }
}

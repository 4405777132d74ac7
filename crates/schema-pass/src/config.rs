//! Pass-wide configuration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use schema_model::ModelDefaults;
use schema_reflect::{AccessMode, AccessOrder};

/// Defaults applied when neither a type nor its scope carries an explicit
/// policy marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassConfig {
    pub default_access_mode: AccessMode,
    pub default_access_order: AccessOrder,
    /// Tolerate element names missing from an explicit order instead of
    /// failing the type.
    pub tolerate_partial_order: bool,
}

impl PassConfig {
    /// Read overrides from the environment:
    /// `SCHEMA_ACCESS_MODE` (PUBLIC_MEMBER | FIELD | PROPERTY | NONE),
    /// `SCHEMA_ACCESS_ORDER` (DECLARATION | ALPHABETICAL),
    /// `SCHEMA_TOLERATE_PARTIAL_ORDER` (truthy flag).
    pub fn from_env() -> Self {
        PassConfig {
            default_access_mode: env_var_or("SCHEMA_ACCESS_MODE", AccessMode::default()),
            default_access_order: env_var_or("SCHEMA_ACCESS_ORDER", AccessOrder::default()),
            tolerate_partial_order: env_bool("SCHEMA_TOLERATE_PARTIAL_ORDER"),
        }
    }

    /// The per-build defaults handed to the engine.
    pub fn model_defaults(&self) -> ModelDefaults {
        ModelDefaults {
            access_mode: self.default_access_mode,
            access_order: self.default_access_order,
            tolerate_partial_order: self.tolerate_partial_order,
        }
    }
}

/// Parse an environment variable with a default value. Returns the default
/// if the variable is not set or cannot be parsed.
fn env_var_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Whether an environment variable is set to a truthy value ("1", "true",
/// "yes", "on", case-insensitive).
fn env_bool(key: &str) -> bool {
    std::env::var(key)
        .ok()
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

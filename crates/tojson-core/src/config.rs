//! Process-wide conversion settings.
//!
//! Settings are fixed once at startup with [`init`] and read-only afterwards.
//! Code that needs different settings builds its own
//! [`Converter`](crate::Converter) instead of touching the global.

use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Environment variable enabling strategy tracing (`1`, `true`, `yes`, `on`).
pub const TRACE_ENV: &str = "TOJSON_TRACE";

/// Environment variable selecting the [`MapKeyPolicy`] (`stringify` or `strict`).
pub const MAP_KEYS_ENV: &str = "TOJSON_MAP_KEYS";

static GLOBAL: OnceLock<ConvertConfig> = OnceLock::new();

/// What to do with mapping keys that are not strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapKeyPolicy {
    /// Render the key with its `Display` impl. Colliding keys: last one wins.
    #[default]
    Stringify,
    /// Reject the mapping with `ConversionError::UnsupportedKind`.
    Strict,
}

impl FromStr for MapKeyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stringify" => Ok(MapKeyPolicy::Stringify),
            "strict" => Ok(MapKeyPolicy::Strict),
            other => Err(format!(
                "unknown map key policy '{}', expected 'stringify' or 'strict'",
                other
            )),
        }
    }
}

/// Conversion settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Emit a `tracing` event for every strategy decision.
    pub trace: bool,
    /// Handling of non-string mapping keys.
    pub map_keys: MapKeyPolicy,
}

impl ConvertConfig {
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn with_map_keys(mut self, map_keys: MapKeyPolicy) -> Self {
        self.map_keys = map_keys;
        self
    }

    /// Read settings from [`TRACE_ENV`] and [`MAP_KEYS_ENV`]. Unset or
    /// unparseable variables keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConvertConfig::default();

        if let Some(raw) = lookup(TRACE_ENV) {
            config.trace = parse_flag(&raw);
        }

        if let Some(raw) = lookup(MAP_KEYS_ENV) {
            match raw.parse() {
                Ok(policy) => config.map_keys = policy,
                Err(message) => tracing::warn!(variable = MAP_KEYS_ENV, "{}", message),
            }
        }

        config
    }
}

/// Whether an environment flag value means "on" (`1`, `true`, `yes`, `on`,
/// any case).
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Install the process-wide settings. Only the first call wins; later calls
/// get their config handed back in `Err`.
pub fn init(config: ConvertConfig) -> Result<(), ConvertConfig> {
    GLOBAL.set(config)
}

/// The process-wide settings, or the defaults if [`init`] was never called.
pub fn global() -> ConvertConfig {
    GLOBAL.get().copied().unwrap_or_default()
}

//! Drill settings.

use crate::cooldown::{SubmitCooldown, DEFAULT_COOLDOWN_MS};
use crate::error::SettingsError;
use crate::filter::SessionFilter;
use serde::{Deserialize, Serialize};

/// Settings for a trainer. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrillSettings {
    /// Window after a submission during which judgment keys are ignored.
    pub submit_cooldown_ms: u64,
    /// Seed for reproducible shuffles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rng_seed: Option<u64>,
    pub filter: SessionFilter,
}

impl Default for DrillSettings {
    fn default() -> Self {
        Self {
            submit_cooldown_ms: DEFAULT_COOLDOWN_MS,
            rng_seed: None,
            filter: SessionFilter::default(),
        }
    }
}

impl DrillSettings {
    /// Parse settings from JSON.
    pub fn from_json(content: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn cooldown(&self) -> SubmitCooldown {
        SubmitCooldown::new(self.submit_cooldown_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_gives_defaults() {
        assert_eq!(DrillSettings::from_json("{}").unwrap(), DrillSettings::default());
    }

    #[test]
    fn partial_settings_keep_other_defaults() {
        let settings = DrillSettings::from_json(
            r#"{"rng_seed": 42, "filter": {"excluded_columns": ["OC"]}}"#,
        )
        .unwrap();
        assert_eq!(settings.rng_seed, Some(42));
        assert_eq!(settings.submit_cooldown_ms, DEFAULT_COOLDOWN_MS);
        assert!(settings.filter.excluded_columns.contains("OC"));
    }

    #[test]
    fn invalid_json_is_rejected() {
        assert!(matches!(
            DrillSettings::from_json("{\"submit_cooldown_ms\": \"soon\"}"),
            Err(SettingsError::Json(_))
        ));
    }
}

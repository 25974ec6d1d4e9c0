use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::goal_path::ScheduleConfig;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

/// Tunable constants of the sequencer.
///
/// Every field has a default, so a config file only needs the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    pub config_version: u32,
    pub pain_floor: f64,
    pub pain_ceiling: f64,
    pub schedule: ScheduleConfig,
    /// Chance that an eligible muscle grade rebounds one grade.
    pub bounce_probability: f64,
    /// Fraction of the short-term phase that must pass before rebounds.
    pub bounce_window_ratio: f64,
    /// Visits a pain label may repeat before the plateau breaker fires.
    pub plateau_tolerance_acute: u32,
    pub plateau_tolerance_chronic: u32,
    /// Half-width of the per-visit pain jitter.
    pub pain_noise: f64,
    /// Half-width of the per-visit progress jitter.
    pub progress_noise: f64,
    /// Progress past which any positive evidence reads as improvement.
    pub late_improvement_progress: f64,
    /// Progress past which an ADL drop pulls severity one extra band.
    pub severity_adl_progress: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            pain_floor: 1.0,
            pain_ceiling: 10.0,
            schedule: ScheduleConfig::default(),
            bounce_probability: 0.25,
            bounce_window_ratio: 0.6,
            plateau_tolerance_acute: 3,
            plateau_tolerance_chronic: 4,
            pain_noise: 0.25,
            progress_noise: 0.02,
            late_improvement_progress: 0.7,
            severity_adl_progress: 0.3,
        }
    }
}

impl EngineConfig {
    /// Parse a config document, migrating older versions first.
    pub fn from_json_str(contents: &str) -> Result<Self, EngineError> {
        // Parse as raw JSON so we can run migrations before deserializing.
        let json: serde_json::Value = serde_json::from_str(contents)?;
        let on_disk_version = json
            .get("config_version")
            .and_then(|v| v.as_u64())
            .unwrap_or(0) as u32;

        let migrated = migrate(json, on_disk_version)?;
        let config: EngineConfig = serde_json::from_value(migrated)?;
        config.check()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        tracing::info!(path = %path.display(), "engine config loaded");
        Ok(config)
    }

    pub fn plateau_tolerance(&self, chronic: bool) -> u32 {
        if chronic {
            self.plateau_tolerance_chronic
        } else {
            self.plateau_tolerance_acute
        }
    }

    /// Reject values no run could honor. Merely unusual values are clamped
    /// by the sequencer instead.
    fn check(&self) -> Result<(), EngineError> {
        if !(self.pain_floor >= 0.0 && self.pain_floor < self.pain_ceiling) {
            return Err(EngineError::Config(format!(
                "pain_floor {} must be non-negative and below pain_ceiling {}",
                self.pain_floor, self.pain_ceiling
            )));
        }
        if !(0.0..=1.0).contains(&self.bounce_probability) {
            return Err(EngineError::Config(format!(
                "bounce_probability {} is outside [0, 1]",
                self.bounce_probability
            )));
        }
        if !(0.0..=1.0).contains(&self.schedule.st_boundary_ratio) {
            return Err(EngineError::Config(format!(
                "st_boundary_ratio {} is outside [0, 1]",
                self.schedule.st_boundary_ratio
            )));
        }
        if self.schedule.max_changes_per_visit == 0 {
            return Err(EngineError::Config(
                "max_changes_per_visit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
fn migrate(
    mut json: serde_json::Value,
    from_version: u32,
) -> Result<serde_json::Value, EngineError> {
    if from_version > CURRENT_VERSION {
        return Err(EngineError::Config(format!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION})"
        )));
    }

    // v0 → v1: single plateau_tolerance split into acute/chronic; chronic
    // courses tolerate one extra repeated visit.
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| EngineError::Config("config is not a JSON object".to_string()))?;
        if let Some(tolerance) = obj.remove("plateau_tolerance") {
            let acute = tolerance.as_u64().ok_or_else(|| {
                EngineError::Config("plateau_tolerance must be a non-negative integer".to_string())
            })?;
            obj.entry("plateau_tolerance_acute")
                .or_insert(serde_json::Value::Number(acute.into()));
            obj.entry("plateau_tolerance_chronic")
                .or_insert(serde_json::Value::Number((acute + 1).into()));
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated engine config v0 → v1 (split plateau_tolerance)");
    }

    Ok(json)
}

use chrono::{Duration, Weekday};
use fitnols_domain::{
    DEFAULT_PROGRESS_DAYS, Defaults, LogOrder, Reps, RepsError, Sets, SetsError, Steps, Unit,
    UnitChange, Weight, WeightError,
};
use serde::{Deserialize, Serialize};

/// Longest progress strip, one year.
pub const MAX_PROGRESS_DAYS: u32 = 366;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    #[serde(with = "LogOrderDef")]
    pub log_order: LogOrder,
    #[serde(with = "UnitChangeDef")]
    pub unit_change: UnitChange,
    pub default_sets: u32,
    pub default_reps: u32,
    pub default_weight: f32,
    #[serde(with = "UnitDef")]
    pub default_unit: Unit,
    pub initial_muscle_group: String,
    pub progress_days: u32,
    pub first_weekday: Weekday,
    pub hold_to_delete_ms: u32,
    pub sets_step: u32,
    pub reps_step: u32,
    /// Fixed weight step, the step of the current unit if absent.
    pub weight_step: Option<f32>,
}

impl Settings {
    /// Reads settings from JSON. Missing fields take their default value.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn defaults(&self) -> Result<Defaults, SettingsError> {
        Ok(Defaults {
            sets: Sets::new(self.default_sets)?,
            reps: Reps::new(self.default_reps)?,
            weight: Weight::new(self.default_weight)?,
            unit: self.default_unit,
        })
    }

    pub fn steps(&self) -> Result<Steps, SettingsError> {
        if self.sets_step == 0 {
            return Err(SettingsError::InvalidStep("sets"));
        }
        if self.reps_step == 0 {
            return Err(SettingsError::InvalidStep("reps"));
        }
        if self
            .weight_step
            .is_some_and(|step| step <= 0.0 || Weight::new(step).is_err())
        {
            return Err(SettingsError::InvalidStep("weight"));
        }

        Ok(Steps {
            sets: self.sets_step,
            reps: self.reps_step,
            weight: self.weight_step,
        })
    }

    pub fn progress_days(&self) -> Result<u32, SettingsError> {
        if !(1..=MAX_PROGRESS_DAYS).contains(&self.progress_days) {
            return Err(SettingsError::InvalidProgressDays(self.progress_days));
        }
        Ok(self.progress_days)
    }

    #[must_use]
    pub fn hold_duration(&self) -> Duration {
        Duration::milliseconds(i64::from(self.hold_to_delete_ms))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_order: LogOrder::NewestFirst,
            unit_change: UnitChange::KeepValue,
            default_sets: 3,
            default_reps: 10,
            default_weight: 60.0,
            default_unit: Unit::Kg,
            initial_muscle_group: String::from("Legs"),
            progress_days: DEFAULT_PROGRESS_DAYS,
            first_weekday: Weekday::Sun,
            hold_to_delete_ms: 600,
            sets_step: 1,
            reps_step: 1,
            weight_step: None,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("Invalid settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid default: {0}")]
    Sets(#[from] SetsError),
    #[error("Invalid default: {0}")]
    Reps(#[from] RepsError),
    #[error("Invalid default: {0}")]
    Weight(#[from] WeightError),
    #[error("The {0} step must be a positive multiple of 0.1 within the allowed range")]
    InvalidStep(&'static str),
    #[error("Progress days must be in the range 1 to 366 ({0})")]
    InvalidProgressDays(u32),
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "LogOrder", rename_all = "snake_case")]
enum LogOrderDef {
    NewestFirst,
    OldestFirst,
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "UnitChange", rename_all = "snake_case")]
enum UnitChangeDef {
    KeepValue,
    Convert,
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "Unit", rename_all = "snake_case")]
enum UnitDef {
    Kg,
    Lb,
}

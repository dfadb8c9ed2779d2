use derive_more::{Display, Into};
use strum::EnumString;

const KG_TO_LB: f32 = 2.204_62;

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Sets(u32);

impl Sets {
    pub const MIN: Sets = Sets(1);
    pub const MAX: Sets = Sets(999);

    pub fn new(value: u32) -> Result<Self, SetsError> {
        if !(Self::MIN.0..=Self::MAX.0).contains(&value) {
            return Err(SetsError::OutOfRange);
        }

        Ok(Self(value))
    }

    /// Moves the value by `delta`, clamping at the bounds instead of failing.
    #[must_use]
    pub fn saturating_add(self, delta: i64) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Self((i64::from(self.0) + delta).clamp(i64::from(Self::MIN.0), i64::from(Self::MAX.0)) as u32)
    }
}

impl TryFrom<&str> for Sets {
    type Error = SetsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Sets::new(parsed_value),
            Err(_) => Err(SetsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SetsError {
    #[error("Sets must be in the range 1 to 999")]
    OutOfRange,
    #[error("Sets must be an integer")]
    ParseError,
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(u32);

impl Reps {
    pub const MIN: Reps = Reps(1);
    pub const MAX: Reps = Reps(999);

    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(Self::MIN.0..=Self::MAX.0).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn saturating_add(self, delta: i64) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Self((i64::from(self.0) + delta).clamp(i64::from(Self::MIN.0), i64::from(Self::MAX.0)) as u32)
    }

    /// Rounded arithmetic mean, `None` for an empty slice.
    #[must_use]
    pub fn mean(values: &[Reps]) -> Option<Reps> {
        if values.is_empty() {
            return None;
        }
        let total = values.iter().map(|r| u64::from(r.0)).sum::<u64>();
        let len = values.len() as u64;
        #[allow(clippy::cast_possible_truncation)]
        Some(Reps(((total + len / 2) / len) as u32))
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RepsError {
    #[error("Reps must be in the range 1 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub const ZERO: Weight = Weight(0.0);
    pub const MAX: Weight = Weight(999.9);

    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !(Self::ZERO.0..=Self::MAX.0).contains(&value) {
            return Err(WeightError::OutOfRange);
        }

        if ((value * 10.0).round() - value * 10.0).abs() > 1e-3 {
            return Err(WeightError::InvalidResolution);
        }

        Ok(Self(round_to_resolution(value)))
    }

    #[must_use]
    pub fn saturating_add(self, delta: f32) -> Self {
        Self(round_to_resolution(self.0 + delta).clamp(Self::ZERO.0, Self::MAX.0))
    }

    /// Same load expressed in another unit, rounded to 0.1.
    #[must_use]
    pub fn convert(self, from: Unit, to: Unit) -> Self {
        let value = match (from, to) {
            (Unit::Kg, Unit::Lb) => self.0 * KG_TO_LB,
            (Unit::Lb, Unit::Kg) => self.0 / KG_TO_LB,
            (Unit::Kg, Unit::Kg) | (Unit::Lb, Unit::Lb) => self.0,
        };
        Self(round_to_resolution(value).clamp(Self::ZERO.0, Self::MAX.0))
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.replace(',', ".").trim().parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

fn round_to_resolution(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WeightError {
    #[error("Weight must be in the range 0.0 to 999.9")]
    OutOfRange,
    #[error("Weight must be a multiple of 0.1")]
    InvalidResolution,
    #[error("Weight must be a decimal")]
    ParseError,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, strum::Display, EnumString)]
pub enum Unit {
    #[default]
    #[strum(serialize = "kg")]
    Kg,
    #[strum(serialize = "lb")]
    Lb,
}

impl Unit {
    /// Fixed weight increment shown next to the weight picker.
    #[must_use]
    pub fn step(self) -> f32 {
        match self {
            Unit::Kg => 2.5,
            Unit::Lb => 5.0,
        }
    }
}

/// Baseline the transient selection fields return to after a commit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Defaults {
    pub sets: Sets,
    pub reps: Reps,
    pub weight: Weight,
    pub unit: Unit,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            sets: Sets(3),
            reps: Reps(10),
            weight: Weight(60.0),
            unit: Unit::Kg,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steps {
    pub sets: u32,
    pub reps: u32,
    /// Overrides the unit dependent weight step.
    pub weight: Option<f32>,
}

impl Steps {
    #[must_use]
    pub fn weight(&self, unit: Unit) -> f32 {
        self.weight.unwrap_or(unit.step())
    }
}

impl Default for Steps {
    fn default() -> Self {
        Self {
            sets: 1,
            reps: 1,
            weight: None,
        }
    }
}

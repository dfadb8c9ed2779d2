use log::debug;

use crate::{
    Defaults, Name, Reps, RepsError, Sets, SetsError, Steps, Taxonomy, Unit, Weight, WeightError,
};

/// Current choice of muscle group and exercise together with the values of the next entry.
///
/// The exercise is always a member of the selected group's exercises. It is only absent if
/// the group has no exercises.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    muscle_group: Name,
    exercise: Option<Name>,
    unit: Unit,
    pub sets: Sets,
    pub reps: Reps,
    pub weight: Weight,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Sets,
    Reps,
    Weight,
}

/// Whether changing the unit converts the current weight.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum UnitChange {
    #[default]
    KeepValue,
    Convert,
}

impl Selection {
    /// Starts on `preferred` if the taxonomy contains it, otherwise on the first group.
    pub fn new(
        taxonomy: &Taxonomy,
        preferred: Option<&str>,
        defaults: &Defaults,
    ) -> Result<Self, SelectionError> {
        let muscle_group = preferred
            .and_then(|group| taxonomy.group(group))
            .or_else(|| taxonomy.first_group())
            .ok_or(SelectionError::NoMuscleGroup)?
            .clone();
        let exercise = taxonomy.first_exercise(&muscle_group).cloned();

        Ok(Self {
            muscle_group,
            exercise,
            unit: defaults.unit,
            sets: defaults.sets,
            reps: defaults.reps,
            weight: defaults.weight,
            notes: String::new(),
        })
    }

    #[must_use]
    pub fn muscle_group(&self) -> &Name {
        &self.muscle_group
    }

    #[must_use]
    pub fn exercise(&self) -> Option<&Name> {
        self.exercise.as_ref()
    }

    #[must_use]
    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn select_group(&mut self, taxonomy: &Taxonomy, group: &Name) -> Result<(), SelectionError> {
        if !taxonomy.contains_group(group) {
            return Err(SelectionError::UnknownGroup(group.clone()));
        }

        self.muscle_group = group.clone();
        self.exercise = taxonomy.first_exercise(group).cloned();

        Ok(())
    }

    pub fn select_exercise(
        &mut self,
        taxonomy: &Taxonomy,
        exercise: &Name,
    ) -> Result<(), SelectionError> {
        if !taxonomy.contains_exercise(&self.muscle_group, exercise) {
            return Err(SelectionError::UnknownExercise(
                self.muscle_group.clone(),
                exercise.clone(),
            ));
        }

        self.exercise = Some(exercise.clone());

        Ok(())
    }

    /// Restores the membership invariant after the taxonomy has changed.
    ///
    /// A vanished group is replaced by the first group, a vanished exercise by the first
    /// exercise of the group.
    pub fn reconcile(&mut self, taxonomy: &Taxonomy) -> Result<(), SelectionError> {
        if !taxonomy.contains_group(&self.muscle_group) {
            let first = taxonomy
                .first_group()
                .ok_or(SelectionError::NoMuscleGroup)?
                .clone();
            debug!("reassigning selection from {} to {first}", self.muscle_group);
            return self.select_group(taxonomy, &first);
        }

        let consistent = match &self.exercise {
            Some(exercise) => taxonomy.contains_exercise(&self.muscle_group, exercise),
            None => taxonomy.first_exercise(&self.muscle_group).is_none(),
        };

        if !consistent {
            self.exercise = taxonomy.first_exercise(&self.muscle_group).cloned();
            debug!(
                "reassigning exercise of {} to {:?}",
                self.muscle_group, self.exercise
            );
        }

        Ok(())
    }

    #[must_use]
    pub fn is_consistent(&self, taxonomy: &Taxonomy) -> bool {
        match &self.exercise {
            Some(exercise) => taxonomy.contains_exercise(&self.muscle_group, exercise),
            None => {
                taxonomy.contains_group(&self.muscle_group)
                    && taxonomy.first_exercise(&self.muscle_group).is_none()
            }
        }
    }

    pub fn increase(&mut self, field: Field, steps: &Steps) {
        self.adjust(field, steps, 1);
    }

    /// Lowers the field by one step, stopping at its floor.
    pub fn decrease(&mut self, field: Field, steps: &Steps) {
        self.adjust(field, steps, -1);
    }

    fn adjust(&mut self, field: Field, steps: &Steps, sign: i8) {
        match field {
            Field::Sets => {
                self.sets = self
                    .sets
                    .saturating_add(i64::from(sign) * i64::from(steps.sets));
            }
            Field::Reps => {
                self.reps = self
                    .reps
                    .saturating_add(i64::from(sign) * i64::from(steps.reps));
            }
            Field::Weight => {
                self.weight = self
                    .weight
                    .saturating_add(f32::from(sign) * steps.weight(self.unit));
            }
        }
    }

    /// Applies text input, keeping the prior value if it cannot be parsed.
    pub fn set_field(&mut self, field: Field, input: &str) -> Result<(), SelectionError> {
        match field {
            Field::Sets => self.sets = Sets::try_from(input)?,
            Field::Reps => self.reps = Reps::try_from(input)?,
            Field::Weight => self.weight = Weight::try_from(input)?,
        }
        Ok(())
    }

    pub fn set_unit(&mut self, unit: Unit, unit_change: UnitChange) {
        if unit_change == UnitChange::Convert {
            self.weight = self.weight.convert(self.unit, unit);
        }
        self.unit = unit;
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Returns sets, reps, weight and notes to the baseline. Group, exercise and unit stay.
    pub fn reset(&mut self, defaults: &Defaults) {
        self.sets = defaults.sets;
        self.reps = defaults.reps;
        self.weight = defaults.weight;
        self.notes.clear();
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("No muscle group available")]
    NoMuscleGroup,
    #[error("Unknown muscle group \"{0}\"")]
    UnknownGroup(Name),
    #[error("Exercise \"{1}\" does not belong to {0}")]
    UnknownExercise(Name, Name),
    #[error(transparent)]
    Sets(#[from] SetsError),
    #[error(transparent)]
    Reps(#[from] RepsError),
    #[error(transparent)]
    Weight(#[from] WeightError),
}

use indexmap::IndexMap;
use log::debug;

use crate::{Name, NameError};

/// Exercise a newly added muscle group starts with.
pub const PLACEHOLDER_EXERCISE: &str = "New Exercise";

const DEFAULT_GROUPS: [(&str, &[&str]); 7] = [
    ("Chest", &["Bench Press", "Incline DB Press", "Cable Fly"]),
    ("Back", &["Deadlift", "Lat Pulldown", "Row"]),
    ("Legs", &["Squat", "Leg Press", "Leg Curl", "Calf Raise"]),
    ("Shoulders", &["OHP", "Lateral Raise", "Rear Delt Fly"]),
    ("Arms", &["Barbell Curl", "Tricep Pushdown", "Hammer Curl"]),
    ("Core", &["Hanging Leg Raise", "Plank", "Cable Crunch"]),
    (
        "Full Body",
        &["Clean & Press", "Farmer Carry", "Kettlebell Swing"],
    ),
];

/// Muscle groups with their exercises, both in display order.
///
/// A taxonomy always contains at least one group. Groups created or edited through
/// [`Taxonomy::add_group`], [`Taxonomy::add_exercise`] and [`Taxonomy::delete_exercise`]
/// keep at least one exercise. Only [`Taxonomy::new`] may introduce a group without
/// exercises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    groups: IndexMap<Name, Vec<Name>>,
}

impl Taxonomy {
    pub fn new(groups: impl IntoIterator<Item = (Name, Vec<Name>)>) -> Result<Self, TaxonomyError> {
        let mut taxonomy: IndexMap<Name, Vec<Name>> = IndexMap::new();

        for (group, exercises) in groups {
            if taxonomy.contains_key(&group) {
                return Err(TaxonomyError::DuplicateGroup(group));
            }
            let mut list: Vec<Name> = Vec::with_capacity(exercises.len());
            for exercise in exercises {
                if list.contains(&exercise) {
                    return Err(TaxonomyError::DuplicateExercise(group, exercise));
                }
                list.push(exercise);
            }
            taxonomy.insert(group, list);
        }

        if taxonomy.is_empty() {
            return Err(TaxonomyError::Empty);
        }

        Ok(Self { groups: taxonomy })
    }

    pub fn groups(&self) -> impl Iterator<Item = &Name> {
        self.groups.keys()
    }

    #[must_use]
    pub fn exercises(&self, group: &Name) -> Option<&[Name]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    /// Looks up a group by its label.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&Name> {
        self.groups.get_key_value(name).map(|(group, _)| group)
    }

    #[must_use]
    pub fn first_group(&self) -> Option<&Name> {
        self.groups.keys().next()
    }

    #[must_use]
    pub fn first_exercise(&self, group: &Name) -> Option<&Name> {
        self.groups.get(group).and_then(|exercises| exercises.first())
    }

    #[must_use]
    pub fn contains_group(&self, group: &Name) -> bool {
        self.groups.contains_key(group)
    }

    #[must_use]
    pub fn contains_exercise(&self, group: &Name, exercise: &Name) -> bool {
        self.groups
            .get(group)
            .is_some_and(|exercises| exercises.contains(exercise))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn add_group(&mut self, name: &str) -> Result<Name, TaxonomyError> {
        let name = Name::new(name)?;

        if self.groups.contains_key(&name) {
            return Err(TaxonomyError::DuplicateGroup(name));
        }

        self.groups
            .insert(name.clone(), vec![Name::new(PLACEHOLDER_EXERCISE)?]);
        debug!("added muscle group {name}");

        Ok(name)
    }

    pub fn add_exercise(&mut self, group: &Name, name: &str) -> Result<Name, TaxonomyError> {
        let name = Name::new(name)?;

        let Some(exercises) = self.groups.get_mut(group) else {
            return Err(TaxonomyError::UnknownGroup(group.clone()));
        };

        if exercises.contains(&name) {
            return Err(TaxonomyError::DuplicateExercise(group.clone(), name));
        }

        exercises.push(name.clone());
        debug!("added exercise {name} to {group}");

        Ok(name)
    }

    /// Removes a group and returns its exercises.
    pub fn delete_group(&mut self, name: &Name) -> Result<Vec<Name>, TaxonomyError> {
        if !self.groups.contains_key(name) {
            return Err(TaxonomyError::UnknownGroup(name.clone()));
        }

        if self.groups.len() <= 1 {
            return Err(TaxonomyError::LastGroup(name.clone()));
        }

        let exercises = self
            .groups
            .shift_remove(name)
            .ok_or_else(|| TaxonomyError::UnknownGroup(name.clone()))?;
        debug!("deleted muscle group {name}");

        Ok(exercises)
    }

    pub fn delete_exercise(&mut self, group: &Name, name: &Name) -> Result<(), TaxonomyError> {
        let Some(exercises) = self.groups.get_mut(group) else {
            return Err(TaxonomyError::UnknownGroup(group.clone()));
        };

        let Some(position) = exercises.iter().position(|e| e == name) else {
            return Err(TaxonomyError::UnknownExercise(group.clone(), name.clone()));
        };

        if exercises.len() <= 1 {
            return Err(TaxonomyError::LastExercise(group.clone(), name.clone()));
        }

        exercises.remove(position);
        debug!("deleted exercise {name} from {group}");

        Ok(())
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self {
            groups: DEFAULT_GROUPS
                .iter()
                .filter_map(|(group, exercises)| {
                    Some((
                        Name::new(group).ok()?,
                        exercises
                            .iter()
                            .filter_map(|exercise| Name::new(exercise).ok())
                            .collect(),
                    ))
                })
                .collect(),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TaxonomyError {
    #[error("{0}")]
    InvalidName(#[from] NameError),
    #[error("At least one muscle group is required")]
    Empty,
    #[error("Muscle group \"{0}\" already exists")]
    DuplicateGroup(Name),
    #[error("Exercise \"{1}\" already exists in {0}")]
    DuplicateExercise(Name, Name),
    #[error("Unknown muscle group \"{0}\"")]
    UnknownGroup(Name),
    #[error("Unknown exercise \"{1}\" in {0}")]
    UnknownExercise(Name, Name),
    #[error("Cannot delete \"{0}\", the last muscle group")]
    LastGroup(Name),
    #[error("Cannot delete \"{1}\", the last exercise of {0}")]
    LastExercise(Name, Name),
}

use std::collections::VecDeque;

use chrono::NaiveDate;
use derive_more::{Deref, Display};
use log::debug;
use uuid::Uuid;

use crate::{Defaults, Name, Reps, Selection, Sets, Unit, Weight};

/// One recorded exercise. Entries are never modified after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub id: EntryID,
    pub date: NaiveDate,
    pub muscle_group: Name,
    pub exercise: Name,
    pub sets: Sets,
    pub reps: Reps,
    pub weight: Weight,
    pub unit: Unit,
    pub notes: String,
    /// Reps of each individual set if the entry was recorded live.
    pub rep_counts: Vec<Reps>,
}

impl LogEntry {
    pub fn from_selection(selection: &Selection, date: NaiveDate) -> Result<Self, CommitError> {
        let exercise = selection
            .exercise()
            .ok_or_else(|| CommitError::NoExercise(selection.muscle_group().clone()))?;

        Ok(Self {
            id: EntryID::random(),
            date,
            muscle_group: selection.muscle_group().clone(),
            exercise: exercise.clone(),
            sets: selection.sets,
            reps: selection.reps,
            weight: selection.weight,
            unit: selection.unit(),
            notes: selection.notes.clone(),
            rep_counts: vec![],
        })
    }
}

#[derive(Deref, Display, Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct EntryID(Uuid);

impl EntryID {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for EntryID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for EntryID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Position at which new entries are inserted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LogOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

/// Entries recorded during the running session.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SessionLog {
    entries: VecDeque<LogEntry>,
    order: LogOrder,
}

impl SessionLog {
    #[must_use]
    pub fn new(order: LogOrder) -> Self {
        Self {
            entries: VecDeque::new(),
            order,
        }
    }

    #[must_use]
    pub fn order(&self) -> LogOrder {
        self.order
    }

    pub fn insert(&mut self, entry: LogEntry) -> EntryID {
        let id = entry.id;
        debug!(
            "logging {} {}x{} {} {} on {}",
            entry.exercise, entry.sets, entry.reps, entry.weight, entry.unit, entry.date
        );
        match self.order {
            LogOrder::NewestFirst => self.entries.push_front(entry),
            LogOrder::OldestFirst => self.entries.push_back(entry),
        }
        id
    }

    /// Records the selection for `date` and returns the selection to the baseline values.
    pub fn commit(
        &mut self,
        selection: &mut Selection,
        defaults: &Defaults,
        date: NaiveDate,
    ) -> Result<EntryID, CommitError> {
        let entry = LogEntry::from_selection(selection, date)?;
        let id = self.insert(entry);
        selection.reset(defaults);
        Ok(id)
    }

    pub fn remove(&mut self, id: EntryID) -> Result<LogEntry, SessionLogError> {
        let position = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(SessionLogError::UnknownEntry(id))?;
        self.entries
            .remove(position)
            .ok_or(SessionLogError::UnknownEntry(id))
    }

    #[must_use]
    pub fn get(&self, id: EntryID) -> Option<&LogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LogEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a SessionLog {
    type Item = &'a LogEntry;
    type IntoIter = std::collections::vec_deque::Iter<'a, LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CommitError {
    #[error("No exercise selected for {0}")]
    NoExercise(Name),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionLogError {
    #[error("Unknown log entry {0}")]
    UnknownEntry(EntryID),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{Field, Taxonomy, UnitChange};

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn name(value: &str) -> Name {
        Name::new(value).unwrap()
    }

    fn selection(taxonomy: &Taxonomy) -> Selection {
        Selection::new(taxonomy, Some("Legs"), &Defaults::default()).unwrap()
    }

    #[test]
    fn test_commit() {
        let taxonomy = Taxonomy::default();
        let mut selection = selection(&taxonomy);
        selection.set_field(Field::Sets, "3").unwrap();
        selection.set_field(Field::Reps, "8").unwrap();
        selection.set_field(Field::Weight, "140").unwrap();
        selection.set_notes("Strong");
        let mut log = SessionLog::default();

        let id = log
            .commit(&mut selection, &Defaults::default(), date(2026, 10, 17))
            .unwrap();

        assert_eq!(
            log.iter().collect::<Vec<_>>(),
            vec![&LogEntry {
                id,
                date: date(2026, 10, 17),
                muscle_group: name("Legs"),
                exercise: name("Squat"),
                sets: Sets::new(3).unwrap(),
                reps: Reps::new(8).unwrap(),
                weight: Weight::new(140.0).unwrap(),
                unit: Unit::Kg,
                notes: "Strong".to_string(),
                rep_counts: vec![],
            }]
        );
        assert_eq!(selection.sets, Sets::new(3).unwrap());
        assert_eq!(selection.reps, Reps::new(10).unwrap());
        assert_eq!(selection.weight, Weight::new(60.0).unwrap());
        assert_eq!(selection.notes, "");
        assert_eq!(selection.exercise(), Some(&name("Squat")));
    }

    #[test]
    fn test_commit_twice_creates_distinct_entries() {
        let taxonomy = Taxonomy::default();
        let mut selection = selection(&taxonomy);
        let mut log = SessionLog::default();

        let first = log
            .commit(&mut selection, &Defaults::default(), date(2026, 10, 17))
            .unwrap();
        let second = log
            .commit(&mut selection, &Defaults::default(), date(2026, 10, 17))
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(log.len(), 2);
        let entries = log.iter().collect::<Vec<_>>();
        assert_eq!(
            LogEntry {
                id: first,
                ..entries[0].clone()
            },
            *entries[1]
        );
    }

    #[test]
    fn test_commit_without_exercise() {
        let taxonomy = Taxonomy::new([(name("Cardio"), vec![])]).unwrap();
        let mut selection = Selection::new(&taxonomy, None, &Defaults::default()).unwrap();
        selection.set_notes("Rowing");
        let before = selection.clone();
        let mut log = SessionLog::default();

        assert_eq!(
            log.commit(&mut selection, &Defaults::default(), date(2026, 10, 17)),
            Err(CommitError::NoExercise(name("Cardio")))
        );
        assert!(log.is_empty());
        assert_eq!(selection, before);
    }

    #[rstest]
    #[case::newest_first(LogOrder::NewestFirst, &["Deadlift", "Squat"])]
    #[case::oldest_first(LogOrder::OldestFirst, &["Squat", "Deadlift"])]
    fn test_order(#[case] order: LogOrder, #[case] expected: &[&str]) {
        let taxonomy = Taxonomy::default();
        let mut selection = selection(&taxonomy);
        let mut log = SessionLog::new(order);

        log.commit(&mut selection, &Defaults::default(), date(2026, 10, 16))
            .unwrap();
        selection.select_group(&taxonomy, &name("Back")).unwrap();
        log.commit(&mut selection, &Defaults::default(), date(2026, 10, 17))
            .unwrap();

        assert_eq!(
            log.iter().map(|e| e.exercise.as_str()).collect::<Vec<_>>(),
            expected
        );
    }

    #[test]
    fn test_remove() {
        let taxonomy = Taxonomy::default();
        let mut selection = selection(&taxonomy);
        selection.set_unit(Unit::Lb, UnitChange::KeepValue);
        let mut log = SessionLog::default();
        let first = log
            .commit(&mut selection, &Defaults::default(), date(2026, 10, 17))
            .unwrap();
        let second = log
            .commit(&mut selection, &Defaults::default(), date(2026, 10, 17))
            .unwrap();

        assert_eq!(log.remove(first).map(|e| e.id), Ok(first));
        assert_eq!(log.get(first), None);
        assert_eq!(log.get(second).map(|e| e.unit), Some(Unit::Lb));
        assert_eq!(
            log.remove(first),
            Err(SessionLogError::UnknownEntry(first))
        );
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_entry_id_from_u128() {
        assert_eq!(
            EntryID::from(1).to_string(),
            "00000000-0000-0000-0000-000000000001"
        );
    }
}

use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::debug;

use crate::{
    CommitError, Defaults, EntryID, LogEntry, Name, Reps, Selection, SessionLog, Sets, SetsError,
    Taxonomy,
};

/// Rep counts recorded set by set, kept per exercise until they are folded into a log entry.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LiveLog {
    reps: BTreeMap<(Name, Name), Vec<Reps>>,
}

impl LiveLog {
    pub fn append(&mut self, muscle_group: &Name, exercise: &Name, reps: Reps) {
        debug!("recording {reps} reps of {exercise}");
        self.reps
            .entry((muscle_group.clone(), exercise.clone()))
            .or_default()
            .push(reps);
    }

    #[must_use]
    pub fn reps(&self, muscle_group: &Name, exercise: &Name) -> &[Reps] {
        self.reps
            .get(&(muscle_group.clone(), exercise.clone()))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn discard(&mut self, muscle_group: &Name, exercise: &Name) -> Vec<Reps> {
        self.reps
            .remove(&(muscle_group.clone(), exercise.clone()))
            .unwrap_or_default()
    }

    /// Drops recordings of exercises that are no longer part of the taxonomy.
    pub fn prune(&mut self, taxonomy: &Taxonomy) {
        self.reps
            .retain(|(group, exercise), _| taxonomy.contains_exercise(group, exercise));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reps.is_empty()
    }

    /// Turns the recordings of the selected exercise into one log entry.
    ///
    /// The entry has one set per recording and the rounded mean as reps. Weight, unit and
    /// notes are taken from the selection, which is reset afterwards.
    pub fn fold(
        &mut self,
        selection: &mut Selection,
        log: &mut SessionLog,
        defaults: &Defaults,
        date: NaiveDate,
    ) -> Result<EntryID, LiveLogError> {
        let mut entry = LogEntry::from_selection(selection, date)?;
        let key = (entry.muscle_group.clone(), entry.exercise.clone());

        let rep_counts = self.reps.get(&key).cloned().unwrap_or_default();
        let Some(mean) = Reps::mean(&rep_counts) else {
            return Err(LiveLogError::NothingRecorded(entry.exercise));
        };
        entry.sets = Sets::new(u32::try_from(rep_counts.len()).unwrap_or(u32::MAX))?;
        entry.reps = mean;
        entry.rep_counts = rep_counts;

        self.reps.remove(&key);
        let id = log.insert(entry);
        selection.reset(defaults);

        Ok(id)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LiveLogError {
    #[error(transparent)]
    Commit(#[from] CommitError),
    #[error("No sets recorded for {0}")]
    NothingRecorded(Name),
    #[error(transparent)]
    Sets(#[from] SetsError),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{Field, Weight};

    use super::*;

    fn name(value: &str) -> Name {
        Name::new(value).unwrap()
    }

    fn reps(value: u32) -> Reps {
        Reps::new(value).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    #[test]
    fn test_append_does_not_touch_log() {
        let mut live = LiveLog::default();

        live.append(&name("Legs"), &name("Squat"), reps(8));
        live.append(&name("Legs"), &name("Squat"), reps(6));
        live.append(&name("Back"), &name("Row"), reps(12));

        assert_eq!(live.reps(&name("Legs"), &name("Squat")), &[reps(8), reps(6)]);
        assert_eq!(live.reps(&name("Back"), &name("Row")), &[reps(12)]);
        assert!(live.reps(&name("Back"), &name("Deadlift")).is_empty());
    }

    #[test]
    fn test_fold() {
        let taxonomy = Taxonomy::default();
        let mut selection =
            Selection::new(&taxonomy, Some("Legs"), &Defaults::default()).unwrap();
        selection.set_field(Field::Weight, "100").unwrap();
        selection.set_notes("Paused");
        let mut live = LiveLog::default();
        let mut log = SessionLog::default();
        live.append(&name("Legs"), &name("Squat"), reps(10));
        live.append(&name("Legs"), &name("Squat"), reps(8));
        live.append(&name("Legs"), &name("Squat"), reps(7));
        live.append(&name("Legs"), &name("Leg Press"), reps(12));

        let id = live
            .fold(&mut selection, &mut log, &Defaults::default(), today())
            .unwrap();

        let entry = log.get(id).unwrap();
        assert_eq!(entry.exercise, name("Squat"));
        assert_eq!(entry.sets, Sets::new(3).unwrap());
        assert_eq!(entry.reps, reps(8));
        assert_eq!(entry.rep_counts, vec![reps(10), reps(8), reps(7)]);
        assert_eq!(entry.weight, Weight::new(100.0).unwrap());
        assert_eq!(entry.notes, "Paused");
        assert!(live.reps(&name("Legs"), &name("Squat")).is_empty());
        assert_eq!(live.reps(&name("Legs"), &name("Leg Press")), &[reps(12)]);
        assert_eq!(selection.weight, Weight::new(60.0).unwrap());
        assert_eq!(selection.notes, "");
    }

    #[test]
    fn test_fold_without_recordings() {
        let taxonomy = Taxonomy::default();
        let mut selection =
            Selection::new(&taxonomy, Some("Legs"), &Defaults::default()).unwrap();
        let mut live = LiveLog::default();
        let mut log = SessionLog::default();
        live.append(&name("Back"), &name("Row"), reps(12));

        assert_eq!(
            live.fold(&mut selection, &mut log, &Defaults::default(), today()),
            Err(LiveLogError::NothingRecorded(name("Squat")))
        );
        assert!(log.is_empty());
        assert_eq!(live.reps(&name("Back"), &name("Row")), &[reps(12)]);
    }

    #[test]
    fn test_discard_and_prune() {
        let mut taxonomy = Taxonomy::default();
        let mut live = LiveLog::default();
        live.append(&name("Legs"), &name("Squat"), reps(5));
        live.append(&name("Back"), &name("Row"), reps(12));
        live.append(&name("Core"), &name("Plank"), reps(1));

        assert_eq!(live.discard(&name("Legs"), &name("Squat")), vec![reps(5)]);
        assert!(live.discard(&name("Legs"), &name("Squat")).is_empty());

        taxonomy.delete_group(&name("Back")).unwrap();
        live.prune(&taxonomy);

        assert!(live.reps(&name("Back"), &name("Row")).is_empty());
        assert_eq!(live.reps(&name("Core"), &name("Plank")), &[reps(1)]);
    }
}

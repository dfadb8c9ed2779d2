use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Local, NaiveDate, Utc};
use fitnols_domain::{
    CalendarError, CommitError, DateGroup, Defaults, EntryID, Field, LiveLog, LiveLogError,
    LogEntry, MonthCalendar, Name, Press, ProgressCell, Reps, Selection, SelectionError,
    SessionLog, SessionLogError, Steps, Taxonomy, TaxonomyError, Unit, entries_by_date,
    filled_dates, progress_strip, todays_entries,
};
use log::{debug, warn};

use crate::{Avatar, Settings, SettingsError};

// ------ ------
//     Model
// ------ ------

/// State of one workout logging session.
///
/// All mutations go through [`update`]. The selection always refers to an exercise of the
/// selected muscle group, unless that group has no exercises.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    settings: Settings,
    defaults: Defaults,
    steps: Steps,
    taxonomy: Taxonomy,
    selection: Selection,
    session_log: SessionLog,
    live_log: LiveLog,
    presses: BTreeMap<Chip, Press>,
    notices: Vec<String>,
    avatar: Option<Avatar>,
}

/// A removable label in one of the chip rows.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Chip {
    MuscleGroup(Name),
    Exercise(Name, Name),
}

impl Model {
    /// Starts with the built-in muscle groups and exercises.
    pub fn new(settings: Settings) -> Result<Self, Error> {
        Self::with_taxonomy(settings, Taxonomy::default())
    }

    pub fn with_taxonomy(settings: Settings, taxonomy: Taxonomy) -> Result<Self, Error> {
        let defaults = settings.defaults()?;
        let steps = settings.steps()?;
        settings.progress_days()?;
        let selection = Selection::new(
            &taxonomy,
            Some(&settings.initial_muscle_group),
            &defaults,
        )?;
        let session_log = SessionLog::new(settings.log_order);

        Ok(Self {
            settings,
            defaults,
            steps,
            taxonomy,
            selection,
            session_log,
            live_log: LiveLog::default(),
            presses: BTreeMap::new(),
            notices: vec![],
            avatar: None,
        })
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn session_log(&self) -> &SessionLog {
        &self.session_log
    }

    #[must_use]
    pub fn live_log(&self) -> &LiveLog {
        &self.live_log
    }

    /// Messages about rejected actions, oldest first.
    #[must_use]
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    #[must_use]
    pub fn avatar(&self) -> Option<&Avatar> {
        self.avatar.as_ref()
    }

    #[must_use]
    pub fn weight_step(&self) -> f32 {
        self.steps.weight(self.selection.unit())
    }

    #[must_use]
    pub fn filled_dates(&self) -> BTreeSet<NaiveDate> {
        filled_dates(&self.session_log)
    }

    pub fn month_calendar(&self, today: NaiveDate) -> Result<MonthCalendar, CalendarError> {
        MonthCalendar::containing(today, self.settings.first_weekday, &self.filled_dates())
    }

    #[must_use]
    pub fn progress_strip(&self, today: NaiveDate) -> Vec<ProgressCell> {
        progress_strip(today, self.settings.progress_days, &self.filled_dates())
    }

    #[must_use]
    pub fn todays_entries(&self, today: NaiveDate) -> Vec<&LogEntry> {
        todays_entries(&self.session_log, today)
    }

    #[must_use]
    pub fn entries_by_date(&self) -> Vec<DateGroup<'_>> {
        entries_by_date(&self.session_log)
    }

    /// Reps recorded live for the selected exercise.
    #[must_use]
    pub fn live_reps(&self) -> &[Reps] {
        match self.selection.exercise() {
            Some(exercise) => self
                .live_log
                .reps(self.selection.muscle_group(), exercise),
            None => &[],
        }
    }

    #[must_use]
    pub fn is_delete_revealed(&self, chip: &Chip) -> bool {
        self.presses.get(chip).is_some_and(Press::is_revealed)
    }

    fn contains_chip(&self, chip: &Chip) -> bool {
        match chip {
            Chip::MuscleGroup(group) => self.taxonomy.contains_group(group),
            Chip::Exercise(group, exercise) => self.taxonomy.contains_exercise(group, exercise),
        }
    }

    fn taxonomy_changed(&mut self) -> Result<(), Error> {
        self.selection.reconcile(&self.taxonomy)?;
        self.live_log.prune(&self.taxonomy);
        let taxonomy = &self.taxonomy;
        self.presses.retain(|chip, _| match chip {
            Chip::MuscleGroup(group) => taxonomy.contains_group(group),
            Chip::Exercise(group, exercise) => taxonomy.contains_exercise(group, exercise),
        });
        Ok(())
    }

    fn selected_exercise(&self) -> Result<(Name, Name), Error> {
        let group = self.selection.muscle_group().clone();
        match self.selection.exercise() {
            Some(exercise) => Ok((group, exercise.clone())),
            None => Err(CommitError::NoExercise(group).into()),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Taxonomy(#[from] TaxonomyError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Commit(#[from] CommitError),
    #[error(transparent)]
    LiveLog(#[from] LiveLogError),
    #[error(transparent)]
    SessionLog(#[from] SessionLogError),
}

// ------ ------
//    Update
// ------ ------

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    SelectMuscleGroup(Name),
    SelectExercise(Name),
    AddMuscleGroup(String),
    AddExercise { muscle_group: Name, name: String },
    DeleteMuscleGroup(Name),
    DeleteExercise { muscle_group: Name, exercise: Name },

    Increase(Field),
    Decrease(Field),
    FieldChanged(Field, String),
    UnitChanged(Unit),
    NotesChanged(String),
    WeightStepChanged(String),

    Commit,
    AppendLiveReps,
    FoldLiveReps,
    DiscardLiveReps,
    DeleteEntry(EntryID),

    ChipPressed(Chip),
    ChipReleased(Chip),
    ChipLeft(Chip),
    Tick,
    DismissDeleteAffordance(Chip),

    AvatarPicked { mime_type: String, bytes: Vec<u8> },
    AvatarCleared,

    DismissNotice(usize),
    ClearNotices,
}

/// Applies `msg` to the model. A rejected action leaves the model unchanged apart from a new
/// notice.
pub fn update(msg: Msg, model: &mut Model, now: DateTime<Local>) {
    if let Err(err) = apply(msg, model, now) {
        warn!("rejected: {err}");
        model.notices.push(err.to_string());
    }
}

fn apply(msg: Msg, model: &mut Model, now: DateTime<Local>) -> Result<(), Error> {
    let today = now.date_naive();

    match msg {
        Msg::SelectMuscleGroup(group) => {
            model.selection.select_group(&model.taxonomy, &group)?;
        }
        Msg::SelectExercise(exercise) => {
            model.selection.select_exercise(&model.taxonomy, &exercise)?;
        }
        Msg::AddMuscleGroup(name) => {
            model.taxonomy.add_group(&name)?;
        }
        Msg::AddExercise { muscle_group, name } => {
            model.taxonomy.add_exercise(&muscle_group, &name)?;
            model.taxonomy_changed()?;
        }
        Msg::DeleteMuscleGroup(group) => {
            model.taxonomy.delete_group(&group)?;
            model.taxonomy_changed()?;
        }
        Msg::DeleteExercise {
            muscle_group,
            exercise,
        } => {
            model.taxonomy.delete_exercise(&muscle_group, &exercise)?;
            model.taxonomy_changed()?;
        }

        Msg::Increase(field) => model.selection.increase(field, &model.steps),
        Msg::Decrease(field) => model.selection.decrease(field, &model.steps),
        Msg::FieldChanged(field, input) => {
            model.selection.set_field(field, &input)?;
        }
        Msg::UnitChanged(unit) => {
            model.selection.set_unit(unit, model.settings.unit_change);
        }
        Msg::NotesChanged(notes) => model.selection.set_notes(notes),
        Msg::WeightStepChanged(input) => {
            let input = input.trim();
            let weight_step = if input.is_empty() {
                None
            } else {
                Some(
                    input
                        .replace(',', ".")
                        .parse::<f32>()
                        .map_err(|_| SettingsError::InvalidStep("weight"))?,
                )
            };
            let settings = Settings {
                weight_step,
                ..model.settings.clone()
            };
            model.steps = settings.steps()?;
            model.settings = settings;
        }

        Msg::Commit => {
            model
                .session_log
                .commit(&mut model.selection, &model.defaults, today)?;
        }
        Msg::AppendLiveReps => {
            let (group, exercise) = model.selected_exercise()?;
            model
                .live_log
                .append(&group, &exercise, model.selection.reps);
        }
        Msg::FoldLiveReps => {
            model.live_log.fold(
                &mut model.selection,
                &mut model.session_log,
                &model.defaults,
                today,
            )?;
        }
        Msg::DiscardLiveReps => {
            let (group, exercise) = model.selected_exercise()?;
            model.live_log.discard(&group, &exercise);
        }
        Msg::DeleteEntry(id) => {
            model.session_log.remove(id)?;
        }

        Msg::ChipPressed(chip) => {
            if model.contains_chip(&chip) {
                model
                    .presses
                    .entry(chip)
                    .or_default()
                    .press(now.with_timezone(&Utc), model.settings.hold_duration());
            }
        }
        Msg::ChipReleased(chip) | Msg::ChipLeft(chip) => {
            if let Some(press) = model.presses.get_mut(&chip) {
                press.release();
            }
            model.presses.retain(|_, press| !press.is_idle());
        }
        Msg::Tick => {
            let now = now.with_timezone(&Utc);
            for (chip, press) in &mut model.presses {
                if press.tick(now) {
                    debug!("revealed delete button of {chip:?}");
                }
            }
        }
        Msg::DismissDeleteAffordance(chip) => {
            model.presses.remove(&chip);
        }

        Msg::AvatarPicked { mime_type, bytes } => {
            model.avatar = Some(Avatar::new(mime_type, bytes));
        }
        Msg::AvatarCleared => model.avatar = None,

        Msg::DismissNotice(index) => {
            if index < model.notices.len() {
                model.notices.remove(index);
            }
        }
        Msg::ClearNotices => model.notices.clear(),
    }

    Ok(())
}

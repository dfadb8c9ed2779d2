#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod calendar;
mod live;
mod name;
mod press;
mod selection;
mod session_log;
mod taxonomy;
mod training;

pub use calendar::{
    CALENDAR_CELLS, CalendarCell, CalendarError, DEFAULT_PROGRESS_DAYS, DateGroup, MonthCalendar,
    ProgressCell, entries_by_date, filled_dates, progress_strip, todays_entries,
};
pub use live::{LiveLog, LiveLogError};
pub use name::{Name, NameError};
pub use press::{DEFAULT_HOLD, Press};
pub use selection::{Field, Selection, SelectionError, UnitChange};
pub use session_log::{CommitError, EntryID, LogEntry, LogOrder, SessionLog, SessionLogError};
pub use taxonomy::{PLACEHOLDER_EXERCISE, Taxonomy, TaxonomyError};
pub use training::{
    Defaults, Reps, RepsError, Sets, SetsError, Steps, Unit, Weight, WeightError,
};

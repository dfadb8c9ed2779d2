use std::collections::BTreeSet;

use chrono::{Datelike, Days, Month, NaiveDate, Weekday};
use indexmap::IndexMap;

use crate::{LogEntry, SessionLog};

/// Six weeks, enough for every month regardless of its first weekday.
pub const CALENDAR_CELLS: usize = 42;

pub const DEFAULT_PROGRESS_DAYS: u32 = 14;

#[must_use]
pub fn filled_dates(log: &SessionLog) -> BTreeSet<NaiveDate> {
    log.iter().map(|entry| entry.date).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarCell {
    Blank,
    Day { date: NaiveDate, filled: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: Month,
    pub first_weekday: Weekday,
    pub cells: Vec<CalendarCell>,
}

impl MonthCalendar {
    pub fn new(
        year: i32,
        month: u32,
        first_weekday: Weekday,
        filled: &BTreeSet<NaiveDate>,
    ) -> Result<Self, CalendarError> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(CalendarError::InvalidMonth { year, month })?;
        let month_name = u8::try_from(month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .ok_or(CalendarError::InvalidMonth { year, month })?;

        let offset = (first.weekday().num_days_from_monday() + 7
            - first_weekday.num_days_from_monday())
            % 7;

        let mut cells = vec![CalendarCell::Blank; offset as usize];
        cells.extend(
            first
                .iter_days()
                .take_while(|date| date.month() == month)
                .map(|date| CalendarCell::Day {
                    date,
                    filled: filled.contains(&date),
                }),
        );
        cells.resize(CALENDAR_CELLS, CalendarCell::Blank);

        Ok(Self {
            year,
            month: month_name,
            first_weekday,
            cells,
        })
    }

    /// Calendar of the month `date` lies in.
    pub fn containing(
        date: NaiveDate,
        first_weekday: Weekday,
        filled: &BTreeSet<NaiveDate>,
    ) -> Result<Self, CalendarError> {
        Self::new(date.year(), date.month(), first_weekday, filled)
    }

    #[must_use]
    pub fn title(&self) -> String {
        format!("{} {}", self.month.name(), self.year)
    }

    /// Column headers, starting with the first weekday.
    #[must_use]
    pub fn weekdays(&self) -> Vec<Weekday> {
        std::iter::successors(Some(self.first_weekday), |d| Some(d.succ()))
            .take(7)
            .collect()
    }

    pub fn filled_days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.cells.iter().filter_map(|cell| match cell {
            CalendarCell::Day { date, filled: true } => Some(*date),
            CalendarCell::Day { filled: false, .. } | CalendarCell::Blank => None,
        })
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Invalid month {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressCell {
    pub date: NaiveDate,
    pub filled: bool,
}

/// The last `days` days up to and including `today`, oldest first.
#[must_use]
pub fn progress_strip(
    today: NaiveDate,
    days: u32,
    filled: &BTreeSet<NaiveDate>,
) -> Vec<ProgressCell> {
    (0..days)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(u64::from(offset))))
        .map(|date| ProgressCell {
            date,
            filled: filled.contains(&date),
        })
        .collect()
}

#[must_use]
pub fn todays_entries(log: &SessionLog, today: NaiveDate) -> Vec<&LogEntry> {
    log.iter().filter(|entry| entry.date == today).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateGroup<'a> {
    pub date: NaiveDate,
    pub entries: Vec<&'a LogEntry>,
}

impl DateGroup<'_> {
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }
}

/// Partitions the log by date. Groups follow the first occurrence of their date in the log,
/// entries keep their log order.
#[must_use]
pub fn entries_by_date(log: &SessionLog) -> Vec<DateGroup<'_>> {
    let mut groups: IndexMap<NaiveDate, Vec<&LogEntry>> = IndexMap::new();
    for entry in log {
        groups.entry(entry.date).or_default().push(entry);
    }
    groups
        .into_iter()
        .map(|(date, entries)| DateGroup { date, entries })
        .collect()
}

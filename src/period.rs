use crate::model::{ShiftType, Slot};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PeriodError {
    #[error("invalid month: {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },
    #[error("date out of range")]
    DateOverflow,
    #[error("invalid period `{0}` (expected YYYY-MM-DD or YYYY-MM)")]
    Parse(String),
}

/// Premier jour d'une semaine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    /// Premier jour de la semaine contenant `date`.
    pub fn start_of_week(self, date: NaiveDate) -> Result<NaiveDate, PeriodError> {
        let back = (date.weekday().num_days_from_monday() + 7
            - self.weekday().num_days_from_monday())
            % 7;
        date.checked_sub_signed(Duration::days(i64::from(back)))
            .ok_or(PeriodError::DateOverflow)
    }
}

impl FromStr for WeekStart {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            "monday" | "mon" => Ok(WeekStart::Monday),
            other => Err(PeriodError::Parse(other.to_string())),
        }
    }
}

/// Période planifiable : une semaine de 7 jours ou un mois civil.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Week { start: NaiveDate },
    Month { first: NaiveDate, last: NaiveDate },
}

impl Period {
    pub fn week(start: NaiveDate) -> Self {
        Period::Week { start }
    }

    /// Semaine contenant `date` ; `DateOverflow` si elle déborde du calendrier.
    pub fn week_containing(date: NaiveDate, week_start: WeekStart) -> Result<Self, PeriodError> {
        let start = week_start.start_of_week(date)?;
        start
            .checked_add_signed(Duration::days(6))
            .ok_or(PeriodError::DateOverflow)?;
        Ok(Period::Week { start })
    }

    pub fn month(year: i32, month: u32) -> Result<Self, PeriodError> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(PeriodError::InvalidMonth { year, month })?;
        let (ny, nm) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
        let last = NaiveDate::from_ymd_opt(ny, nm, 1)
            .and_then(|d| d.pred_opt())
            .ok_or(PeriodError::DateOverflow)?;
        Ok(Period::Month { first, last })
    }

    /// `YYYY-MM-DD` → semaine contenant la date, `YYYY-MM` → mois.
    pub fn parse(raw: &str, week_start: WeekStart) -> Result<Self, PeriodError> {
        let raw = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Self::week_containing(date, week_start);
        }
        let (y, m) = raw
            .split_once('-')
            .ok_or_else(|| PeriodError::Parse(raw.to_string()))?;
        let year: i32 = y.parse().map_err(|_| PeriodError::Parse(raw.to_string()))?;
        let month: u32 = m.parse().map_err(|_| PeriodError::Parse(raw.to_string()))?;
        Self::month(year, month)
    }

    pub fn first_day(&self) -> NaiveDate {
        match *self {
            Period::Week { start } => start,
            Period::Month { first, .. } => first,
        }
    }

    pub fn last_day(&self) -> NaiveDate {
        match *self {
            // tronquée en fin de calendrier
            Period::Week { start } => start
                .checked_add_signed(Duration::days(6))
                .unwrap_or(NaiveDate::MAX),
            Period::Month { last, .. } => last,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first_day() <= date && date <= self.last_day()
    }

    /// Énumère chaque créneau une seule fois, par date puis par poste.
    /// L'itérateur est paresseux ; rappeler `slots()` recommence du début.
    pub fn slots(&self) -> SlotIter {
        SlotIter {
            next_date: Some(self.first_day()),
            last: self.last_day(),
            shift: 0,
        }
    }

    pub fn slot_count(&self) -> usize {
        let days = (self.last_day() - self.first_day()).num_days() + 1;
        days as usize * ShiftType::ALL.len()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Week { start } => write!(f, "week of {start}"),
            Period::Month { first, .. } => write!(f, "{}", first.format("%Y-%m")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SlotIter {
    next_date: Option<NaiveDate>,
    last: NaiveDate,
    shift: usize,
}

impl Iterator for SlotIter {
    type Item = Slot;

    fn next(&mut self) -> Option<Slot> {
        let date = self.next_date.filter(|d| *d <= self.last)?;
        let slot = Slot::new(date, ShiftType::ALL[self.shift]);
        self.shift += 1;
        if self.shift == ShiftType::ALL.len() {
            self.shift = 0;
            self.next_date = date.succ_opt();
        }
        Some(slot)
    }
}

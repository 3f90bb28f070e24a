//! Optional task deadlines with minute-resolution time of day.
//!
//! Canonical text form is `YYYY-MM-DD`, optionally followed by a space and
//! `HH:MM`. The command grammar and persistence both use this form.

use super::TaskDomainError;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize, de, ser};
use std::fmt;
use std::str::FromStr;

/// A task deadline: a date, optionally with a time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Deadline {
    date: NaiveDate,
    time: Option<NaiveTime>,
}

impl Deadline {
    /// Creates a deadline from parts.
    #[must_use]
    pub const fn new(date: NaiveDate, time: Option<NaiveTime>) -> Self {
        Self { date, time }
    }

    /// Returns the deadline date.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.date
    }

    /// Returns the deadline time of day, if any.
    #[must_use]
    pub const fn time(self) -> Option<NaiveTime> {
        self.time
    }

    /// Parses a command token of the exact form `YYYY-MM-DD`.
    #[must_use]
    pub fn parse_date_token(token: &str) -> Option<NaiveDate> {
        if token.len() != 10 {
            return None;
        }
        NaiveDate::parse_from_str(token, "%Y-%m-%d").ok()
    }

    /// Parses a command token of the form `H:MM` or `HH:MM`.
    #[must_use]
    pub fn parse_time_token(token: &str) -> Option<NaiveTime> {
        if token.len() < 4 || token.len() > 5 || !token.contains(':') {
            return None;
        }
        NaiveTime::parse_from_str(token, "%H:%M").ok()
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date.format("%Y-%m-%d"))?;
        if let Some(time) = self.time {
            write!(f, " {}", time.format("%H:%M"))?;
        }
        Ok(())
    }
}

impl FromStr for Deadline {
    type Err = TaskDomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let invalid = || TaskDomainError::InvalidDeadline(value.to_owned());
        match trimmed.split_once(' ') {
            None => {
                let date = Self::parse_date_token(trimmed).ok_or_else(invalid)?;
                Ok(Self::new(date, None))
            }
            Some((date_part, time_part)) => {
                let date = Self::parse_date_token(date_part).ok_or_else(invalid)?;
                let time = Self::parse_time_token(time_part.trim()).ok_or_else(invalid)?;
                Ok(Self::new(date, Some(time)))
            }
        }
    }
}

impl Serialize for Deadline {
    fn serialize<S: ser::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Deadline {
    fn deserialize<D: de::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

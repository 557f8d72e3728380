use std::fmt;

use chrono::{DateTime, TimeZone};

/// Shown in place of a missing date
pub const NO_DATE: &str = "No data";

/// Date layouts a user can pick in their profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DatePattern {
    /// `%d.%m.%Y`
    #[default]
    DayMonthYear,
    /// `%Y.%m.%d`
    YearMonthDay,
    /// `%m/%d/%Y`
    MonthDayYear,
}

impl DatePattern {
    pub const ALL: [DatePattern; 3] =
        [DatePattern::DayMonthYear, DatePattern::YearMonthDay, DatePattern::MonthDayYear];

    /// The pattern string as stored in the profile
    pub fn as_str(&self) -> &'static str {
        match self {
            DatePattern::DayMonthYear => "%d.%m.%Y",
            DatePattern::YearMonthDay => "%Y.%m.%d",
            DatePattern::MonthDayYear => "%m/%d/%Y",
        }
    }

    /// Parse a profile pattern; anything unrecognized means the default
    pub fn from_profile(pattern: &str) -> Self {
        let pattern = pattern.trim();
        Self::ALL.into_iter().find(|p| p.as_str() == pattern).unwrap_or_default()
    }

    fn chrono_format(&self) -> &'static str {
        match self {
            DatePattern::DayMonthYear => "%d.%m.%Y %H:%M",
            DatePattern::YearMonthDay => "%Y.%m.%d %H:%M",
            DatePattern::MonthDayYear => "%m/%d/%Y %H:%M",
        }
    }
}

impl fmt::Display for DatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render a date with its time of day in the given layout
pub fn format_date<Tz>(date: &DateTime<Tz>, pattern: DatePattern) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    date.format(pattern.chrono_format()).to_string()
}

pub fn format_optional_date<Tz>(date: Option<&DateTime<Tz>>, pattern: DatePattern) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    match date {
        Some(date) => format_date(date, pattern),
        None => NO_DATE.to_string(),
    }
}

//! Reporting periods and their calendar ranges.

use std::fmt;

use chrono::{DateTime, Datelike, Duration, NaiveDate};

/// Named calendar ranges used to filter expenses for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
}

impl Period {
    /// Parses a period keyword, case-insensitively. Unrecognized input yields
    /// `None`, which callers treat as "no filter" rather than an error.
    pub fn parse(input: &str) -> Option<Period> {
        match input.trim().to_ascii_lowercase().as_str() {
            "day" => Some(Period::Day),
            "week" => Some(Period::Week),
            "month" => Some(Period::Month),
            "year" => Some(Period::Year),
            _ => None,
        }
    }

    /// Returns the calendar range containing `reference`, inclusive on both
    /// ends. Weeks run Monday through Sunday.
    pub fn range_containing(self, reference: NaiveDate) -> DateRange {
        match self {
            Period::Day => DateRange {
                start: reference,
                end: reference,
            },
            Period::Week => {
                let monday =
                    reference - Duration::days(reference.weekday().num_days_from_monday() as i64);
                DateRange {
                    start: monday,
                    end: monday + Duration::days(6),
                }
            }
            Period::Month => {
                let first = reference.with_day(1).unwrap();
                DateRange {
                    start: first,
                    end: last_day_of_month(reference.year(), reference.month()),
                }
            }
            Period::Year => DateRange {
                start: NaiveDate::from_ymd_opt(reference.year(), 1, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(reference.year(), 12, 31).unwrap(),
            },
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        };
        f.write_str(label)
    }
}

/// An inclusive calendar-day range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Every day of the range in order.
    pub fn days(&self) -> Vec<NaiveDate> {
        let mut days = Vec::new();
        let mut cursor = self.start;
        while cursor <= self.end {
            days.push(cursor);
            cursor += Duration::days(1);
        }
        days
    }
}

/// Parses an ingestion date: either a bare `YYYY-MM-DD` or a full RFC 3339
/// timestamp whose calendar day is taken. This is the single normalization
/// point for the two representations accepted at the edges.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|stamp| stamp.date_naive())
        })
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1).unwrap() - Duration::days(1)
}

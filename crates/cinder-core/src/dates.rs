//! Calendar-date utilities for burn records
//!
//! Burn records are keyed by calendar day. Inputs arrive as raw strings
//! from the HTTP layer and are normalized to a [`NaiveDate`] before any
//! storage or comparison happens.

use chrono::{DateTime, NaiveDate};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DateError {
    #[error("Unrecognized date format: '{0}'")]
    UnparseableDate(String),

    #[error("Month must be between 1 and 12, got {0}")]
    MonthOutOfRange(u32),

    #[error("Invalid year/month combination: {year}-{month}")]
    InvalidYearMonth { year: i32, month: u32 },
}

/// Normalize a raw date string into the canonical calendar-date form.
///
/// Accepts plain `YYYY-MM-DD`, full RFC 3339 timestamps (the date part is
/// kept, the time-of-day is dropped), and `YYYY/MM/DD`.
pub fn normalize_date(raw: &str) -> Result<NaiveDate, DateError> {
    let trimmed = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(datetime.date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y/%m/%d") {
        return Ok(date);
    }

    Err(DateError::UnparseableDate(trimmed.to_string()))
}

/// Compute the half-open range `[first-of-month, first-of-next-month)`
/// covering one calendar month.
///
/// Months outside 1-12 are rejected rather than rolled over into the next
/// year. December's end bound is January 1st of the following year.
pub fn month_range(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), DateError> {
    if !(1..=12).contains(&month) {
        return Err(DateError::MonthOutOfRange(month));
    }

    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(DateError::InvalidYearMonth { year, month })?;
    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or(DateError::InvalidYearMonth { year, month })?;

    Ok((start, end))
}

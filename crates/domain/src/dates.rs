// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Date conversion between the entry format and the storage format.
//!
//! Staff enter dates as `MM/DD/YYYY`. The store keeps dates as `YYYY-MM-DD`
//! and timestamps as `YYYY-MM-DD HH:MM:SS` (UTC), so lexical comparison of
//! stored values matches chronological order.

use time::format_description::BorrowedFormatItem;
use time::macros::{format_description, time};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

use crate::error::DomainError;

/// Entry format for calendar dates.
const ENTRY_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[month padding:none]/[day padding:none]/[year]");

/// Storage format for calendar dates.
const DB_DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Storage format for timestamps.
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// The last whole second of a day; stored timestamps carry no fractions.
const LAST_SECOND: Time = time!(23:59:59);

fn invalid(input: &str, reason: impl Into<String>) -> DomainError {
    DomainError::InvalidDateFormat {
        input: input.to_string(),
        reason: reason.into(),
    }
}

/// Parses an entry-format date (`MM/DD/YYYY`) into a calendar date.
///
/// Month and day may be one or two digits. The year must be four digits.
///
/// # Errors
///
/// Returns `DomainError::InvalidDateFormat` if the input does not match the
/// pattern or names a date that does not exist.
pub fn parse_entry_date(input: &str) -> Result<Date, DomainError> {
    Date::parse(input.trim(), ENTRY_DATE_FORMAT).map_err(|e| invalid(input, e.to_string()))
}

/// Converts an entry-format date into a date/time value at midnight.
///
/// # Errors
///
/// Returns `DomainError::InvalidDateFormat` if the input is malformed.
pub fn convert_to_date(input: &str) -> Result<PrimitiveDateTime, DomainError> {
    Ok(PrimitiveDateTime::new(parse_entry_date(input)?, Time::MIDNIGHT))
}

/// Converts an entry-format date into the storage format (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns `DomainError::InvalidDateFormat` if the input is malformed.
pub fn convert_to_db_date(input: &str) -> Result<String, DomainError> {
    format_db_date(parse_entry_date(input)?)
}

/// Renders a calendar date in storage format.
///
/// # Errors
///
/// Returns `DomainError::DateFormatting` if the date cannot be rendered.
pub fn format_db_date(date: Date) -> Result<String, DomainError> {
    date.format(DB_DATE_FORMAT)
        .map_err(|e| DomainError::DateFormatting {
            reason: e.to_string(),
        })
}

/// Renders a timestamp in storage format, normalized to UTC.
///
/// # Errors
///
/// Returns `DomainError::DateFormatting` if the timestamp cannot be rendered.
pub fn format_timestamp(timestamp: OffsetDateTime) -> Result<String, DomainError> {
    timestamp
        .to_offset(time::UtcOffset::UTC)
        .format(TIMESTAMP_FORMAT)
        .map_err(|e| DomainError::DateFormatting {
            reason: e.to_string(),
        })
}

/// An inclusive range of calendar days used to filter redemptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    /// Creates a range covering `start` through `end`, both inclusive.
    #[must_use]
    pub const fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    /// Parses both bounds from entry format.
    ///
    /// A start after the end is accepted; such a range is empty.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateFormat` if either bound is malformed.
    pub fn from_entry(start: &str, end: &str) -> Result<Self, DomainError> {
        Ok(Self::new(parse_entry_date(start)?, parse_entry_date(end)?))
    }

    /// The first day of the range.
    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    /// The last day of the range.
    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Returns whether no day falls within the range.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Lower timestamp bound in storage format (inclusive).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateFormatting` if the bound cannot be rendered.
    pub fn storage_start(&self) -> Result<String, DomainError> {
        format_db_date(self.start)
    }

    /// Upper timestamp bound in storage format (inclusive): the last
    /// second of `end`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateFormatting` if the bound cannot be rendered.
    pub fn storage_end(&self) -> Result<String, DomainError> {
        format_timestamp(PrimitiveDateTime::new(self.end, LAST_SECOND).assume_utc())
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Statistics reporting.
//!
//! All reports are read-only. Date bounds arrive in entry format
//! (`MM/DD/YYYY`) and both are inclusive; a range whose start is after its
//! end is empty rather than an error.

use ekip_domain::{DateRange, RedeemedTicket, RegionTickets, group_by_region};
use ekip_persistence::Persistence;
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;

/// Everything the statistics page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatisticsSummary {
    /// Tickets redeemed at least once.
    pub tickets_exchanged: i64,
    /// Tickets redeemed more than once.
    pub tickets_exchanged_more_than_once: i64,
    /// The date-range report, when a range was requested.
    pub range: Option<RangeReport>,
}

/// Tickets first redeemed within a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeReport {
    /// The start bound as entered.
    pub start_date: String,
    /// The end bound as entered.
    pub end_date: String,
    /// Matching tickets, ordered by redemption time.
    pub tickets: Vec<RedeemedTicket>,
    /// The same tickets grouped by region.
    pub regions: Vec<RegionTickets>,
}

/// Counts tickets that have been redeemed at least once.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn num_tickets_exchanged(persistence: &mut Persistence) -> Result<i64, ApiError> {
    Ok(persistence.count_tickets_exchanged()?)
}

/// Counts tickets that have been redeemed more than once.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn num_tickets_exchanged_more_than_once(
    persistence: &mut Persistence,
) -> Result<i64, ApiError> {
    Ok(persistence.count_tickets_exchanged_more_than_once()?)
}

fn tickets_in_range(
    persistence: &mut Persistence,
    range: DateRange,
) -> Result<Vec<RedeemedTicket>, ApiError> {
    if range.is_empty() {
        debug!(start = %range.start(), end = %range.end(), "Empty date range");
        return Ok(Vec::new());
    }
    Ok(persistence
        .list_redeemed_tickets_between(&range.storage_start()?, &range.storage_end()?)?)
}

/// Lists tickets first redeemed between `start_date` and `end_date`, inclusive.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if either bound is not a valid
/// `MM/DD/YYYY` date, or an error if the store cannot be read.
pub fn tickets_by_dates(
    persistence: &mut Persistence,
    start_date: &str,
    end_date: &str,
) -> Result<Vec<RedeemedTicket>, ApiError> {
    let range: DateRange = DateRange::from_entry(start_date, end_date)?;
    tickets_in_range(persistence, range)
}

/// Lists tickets first redeemed in the range, grouped by the region of
/// the site where they were redeemed.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if either bound is not a valid
/// `MM/DD/YYYY` date, or an error if the store cannot be read.
pub fn tickets_by_states(
    persistence: &mut Persistence,
    start_date: &str,
    end_date: &str,
) -> Result<Vec<RegionTickets>, ApiError> {
    Ok(group_by_region(tickets_by_dates(
        persistence,
        start_date,
        end_date,
    )?))
}

/// Builds the statistics page data.
///
/// Both bounds must be given for a range report; supplying only one is
/// invalid input.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for a malformed or half-specified
/// range, or an error if the store cannot be read.
pub fn statistics_summary(
    persistence: &mut Persistence,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<StatisticsSummary, ApiError> {
    let range: Option<RangeReport> = match (non_blank(start_date), non_blank(end_date)) {
        (None, None) => None,
        (Some(start), Some(end)) => {
            let tickets: Vec<RedeemedTicket> = tickets_by_dates(persistence, start, end)?;
            Some(RangeReport {
                start_date: start.to_string(),
                end_date: end.to_string(),
                regions: group_by_region(tickets.clone()),
                tickets,
            })
        }
        (None, Some(_)) => return Err(missing_bound("start_date")),
        (Some(_), None) => return Err(missing_bound("end_date")),
    };

    Ok(StatisticsSummary {
        tickets_exchanged: num_tickets_exchanged(persistence)?,
        tickets_exchanged_more_than_once: num_tickets_exchanged_more_than_once(persistence)?,
        range,
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn missing_bound(field: &str) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message: String::from("Both start_date and end_date are required for a date range"),
    }
}

/// Renders the tickets first redeemed in the range as CSV.
///
/// Columns: `record_locator,redeemed_at,site_slug,site_name,state`.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if either bound is malformed, or
/// `ApiError::Internal` if the CSV cannot be written.
pub fn export_tickets_csv(
    persistence: &mut Persistence,
    start_date: &str,
    end_date: &str,
) -> Result<String, ApiError> {
    let tickets: Vec<RedeemedTicket> = tickets_by_dates(persistence, start_date, end_date)?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([
            "record_locator",
            "redeemed_at",
            "site_slug",
            "site_name",
            "state",
        ])
        .map_err(csv_error)?;
    for ticket in &tickets {
        writer
            .write_record([
                ticket.record_locator.value(),
                ticket.redeemed_at.as_str(),
                ticket.site.slug.as_str(),
                ticket.site.name.as_str(),
                ticket.site.state.code(),
            ])
            .map_err(csv_error)?;
    }

    let bytes: Vec<u8> = writer.into_inner().map_err(|e| ApiError::Internal {
        message: format!("Failed to finish CSV export: {e}"),
    })?;
    String::from_utf8(bytes).map_err(|e| ApiError::Internal {
        message: format!("CSV export is not valid UTF-8: {e}"),
    })
}

fn csv_error(err: csv::Error) -> ApiError {
    ApiError::Internal {
        message: format!("Failed to write CSV: {err}"),
    }
}

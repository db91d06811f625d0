// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Redemption statistics.
//!
//! All statistics are read-only. An empty store yields zero counts and
//! empty listings.

use diesel::SqliteConnection;
use diesel::prelude::*;
use ekip_domain::{RecordLocator, RedeemedTicket};
use tracing::debug;

use crate::data_models::SiteRow;
use crate::diesel_schema::{additional_redemptions, federal_sites, redemption_entries, tickets};
use crate::error::PersistenceError;

/// Counts tickets that have been redeemed at least once.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_tickets_exchanged(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    let count: i64 = tickets::table
        .filter(tickets::is_redeemed.eq(1))
        .filter(tickets::redemption_entry_id.is_not_null())
        .count()
        .get_result(conn)?;

    debug!("Tickets exchanged: {}", count);
    Ok(count)
}

/// Counts distinct tickets with at least one additional redemption.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_tickets_exchanged_more_than_once(
    conn: &mut SqliteConnection,
) -> Result<i64, PersistenceError> {
    let count: i64 = additional_redemptions::table
        .select(diesel::dsl::count(additional_redemptions::ticket_id).aggregate_distinct())
        .first(conn)?;

    debug!("Tickets exchanged more than once: {}", count);
    Ok(count)
}

/// Lists tickets whose first redemption falls in `[start, end]`.
///
/// Both bounds are storage-format strings; timestamps compare lexically.
/// Results are ordered by redemption time, then record locator.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored row is invalid.
pub fn list_redeemed_tickets_between(
    conn: &mut SqliteConnection,
    start: &str,
    end: &str,
) -> Result<Vec<RedeemedTicket>, PersistenceError> {
    debug!(
        "Listing tickets redeemed between {} and {} (inclusive)",
        start, end
    );

    let rows: Vec<(String, String, SiteRow)> = tickets::table
        .inner_join(redemption_entries::table.inner_join(federal_sites::table))
        .filter(redemption_entries::redeemed_at.ge(start))
        .filter(redemption_entries::redeemed_at.le(end))
        .order((
            redemption_entries::redeemed_at.asc(),
            tickets::record_locator.asc(),
        ))
        .select((
            tickets::record_locator,
            redemption_entries::redeemed_at,
            SiteRow::as_select(),
        ))
        .load(conn)?;

    rows.into_iter()
        .map(|(locator, redeemed_at, site)| {
            Ok(RedeemedTicket {
                record_locator: RecordLocator::parse(&locator)?,
                redeemed_at,
                site: site.into_site()?,
            })
        })
        .collect()
}

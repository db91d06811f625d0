// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket queries.
//!
//! Tickets are reconstructed together with their redemption entry, so
//! callers always see the redeemed state and the entry that backs it.

use diesel::prelude::*;
use diesel::SqliteConnection;
use ekip_domain::{
    AdditionalRedemption, RecordLocator, RedemptionEntry, RedemptionStatus, Ticket,
};
use tracing::debug;

use crate::data_models::{EntryRow, SiteRow, TicketRow};
use crate::diesel_schema::{additional_redemptions, federal_sites, redemption_entries, tickets};
use crate::error::PersistenceError;

/// Retrieves a ticket row by record locator.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) fn find_ticket_row(
    conn: &mut SqliteConnection,
    record_locator: &RecordLocator,
) -> Result<Option<TicketRow>, PersistenceError> {
    Ok(tickets::table
        .filter(tickets::record_locator.eq(record_locator.value()))
        .select(TicketRow::as_select())
        .first(conn)
        .optional()?)
}

/// Loads the redemption entry (and its site) with the given ID.
fn load_entry(
    conn: &mut SqliteConnection,
    entry_id: i64,
) -> Result<RedemptionEntry, PersistenceError> {
    let (entry, site): (EntryRow, SiteRow) = redemption_entries::table
        .inner_join(federal_sites::table)
        .filter(redemption_entries::entry_id.eq(entry_id))
        .select((EntryRow::as_select(), SiteRow::as_select()))
        .first(conn)?;

    Ok(RedemptionEntry {
        entry_id: entry.entry_id,
        redeemed_at: entry.redeemed_at,
        site: site.into_site()?,
    })
}

/// Turns a ticket row into a domain ticket.
///
/// The redeemed flag and the entry link must agree; a row where they
/// disagree is reported as a reconstruction error.
pub(crate) fn ticket_from_row(
    conn: &mut SqliteConnection,
    row: TicketRow,
) -> Result<Ticket, PersistenceError> {
    let status: RedemptionStatus = match (row.is_redeemed, row.redemption_entry_id) {
        (0, None) => RedemptionStatus::Unredeemed,
        (1, Some(entry_id)) => RedemptionStatus::Redeemed(load_entry(conn, entry_id)?),
        (flag, link) => {
            return Err(PersistenceError::ReconstructionError(format!(
                "Ticket {} has is_redeemed={flag} but redemption_entry_id={link:?}",
                row.record_locator
            )));
        }
    };

    Ok(Ticket {
        ticket_id: row.ticket_id,
        record_locator: RecordLocator::parse(&row.record_locator)?,
        zip_code: row.zip_code,
        created_at: row.created_at,
        status,
    })
}

/// Retrieves a ticket by record locator.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored row is invalid.
/// Returns `Ok(None)` if no ticket carries the record locator.
pub fn get_ticket_by_record_locator(
    conn: &mut SqliteConnection,
    record_locator: &RecordLocator,
) -> Result<Option<Ticket>, PersistenceError> {
    debug!("Looking up ticket by record locator: {}", record_locator);

    find_ticket_row(conn, record_locator)?
        .map(|row| ticket_from_row(conn, row))
        .transpose()
}

/// Retrieves a ticket by ID.
///
/// # Errors
///
/// Returns an error if the ticket does not exist or cannot be reconstructed.
pub(crate) fn get_ticket_by_id(
    conn: &mut SqliteConnection,
    ticket_id: i64,
) -> Result<Ticket, PersistenceError> {
    let row: TicketRow = tickets::table
        .filter(tickets::ticket_id.eq(ticket_id))
        .select(TicketRow::as_select())
        .first(conn)?;
    ticket_from_row(conn, row)
}

/// Lists the additional redemptions recorded for a ticket, oldest first.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored row is invalid.
/// An unknown record locator yields an empty list.
pub fn list_additional_redemptions(
    conn: &mut SqliteConnection,
    record_locator: &RecordLocator,
) -> Result<Vec<AdditionalRedemption>, PersistenceError> {
    debug!(
        "Listing additional redemptions for record locator: {}",
        record_locator
    );

    let rows: Vec<(i64, i64, String, String, SiteRow)> = additional_redemptions::table
        .inner_join(tickets::table)
        .inner_join(federal_sites::table)
        .filter(tickets::record_locator.eq(record_locator.value()))
        .order((
            additional_redemptions::redeemed_at.asc(),
            additional_redemptions::additional_redemption_id.asc(),
        ))
        .select((
            additional_redemptions::additional_redemption_id,
            additional_redemptions::ticket_id,
            tickets::record_locator,
            additional_redemptions::redeemed_at,
            SiteRow::as_select(),
        ))
        .load(conn)?;

    rows.into_iter()
        .map(
            |(additional_redemption_id, ticket_id, locator, redeemed_at, site)| {
                Ok(AdditionalRedemption {
                    additional_redemption_id,
                    ticket_id,
                    record_locator: RecordLocator::parse(&locator)?,
                    redeemed_at,
                    site: site.into_site()?,
                })
            },
        )
        .collect()
}

/// Counts all tickets.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_tickets(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(tickets::table.count().get_result(conn)?)
}

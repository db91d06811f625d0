// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Voucher redemption.
//!
//! A redemption is one read-modify-write against the store: read the
//! ticket, branch on its redeemed flag, write. It runs inside an immediate
//! transaction so the write lock is held from the read onward and two
//! redemptions of the same voucher cannot both take the first-redemption
//! branch.

use diesel::SqliteConnection;
use diesel::prelude::*;
use ekip_domain::{AdditionalRedemption, FederalSite, RecordLocator, RedemptionOutcome, Ticket};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::TicketRow;
use crate::diesel_schema::{additional_redemptions, redemption_entries, tickets};
use crate::error::PersistenceError;
use crate::queries::sites::get_site_by_slug;
use crate::queries::tickets::{find_ticket_row, get_ticket_by_id};

/// Redeems a voucher at a site.
///
/// If the ticket has never been redeemed, a redemption entry is created and
/// linked to it. Otherwise an additional redemption is appended and the
/// ticket and its entry are left untouched.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `record_locator` - The voucher code
/// * `site_slug` - The slug of the site where the voucher is exchanged
/// * `redeemed_at` - The redemption timestamp in storage format
///
/// # Errors
///
/// Returns `PersistenceError::TicketNotFound`, then `PersistenceError::SiteNotFound`,
/// if a lookup fails; nothing is written in that case.
/// Returns an error if any database operation fails; the transaction is
/// rolled back.
pub fn redeem_ticket(
    conn: &mut SqliteConnection,
    record_locator: &RecordLocator,
    site_slug: &str,
    redeemed_at: &str,
) -> Result<RedemptionOutcome, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let row: TicketRow = find_ticket_row(conn, record_locator)?
            .ok_or_else(|| PersistenceError::TicketNotFound(record_locator.to_string()))?;

        let site: FederalSite = get_site_by_slug(conn, site_slug)?
            .ok_or_else(|| PersistenceError::SiteNotFound(site_slug.to_string()))?;
        let site_id: i64 = site.site_id.ok_or_else(|| {
            PersistenceError::ReconstructionError(format!("Site '{site_slug}' has no ID"))
        })?;

        if row.is_redeemed == 0 {
            record_first_redemption(conn, &row, site_id, redeemed_at)?;
            let ticket: Ticket = get_ticket_by_id(conn, row.ticket_id)?;
            info!(
                record_locator = %record_locator,
                site = %site_slug,
                "Recorded first redemption"
            );
            Ok(RedemptionOutcome::FirstRedemption(ticket))
        } else {
            let additional: AdditionalRedemption =
                record_additional_redemption(conn, &row, site, redeemed_at)?;
            let ticket: Ticket = get_ticket_by_id(conn, row.ticket_id)?;
            info!(
                record_locator = %record_locator,
                site = %site_slug,
                additional_redemption_id = additional.additional_redemption_id,
                "Recorded additional redemption"
            );
            Ok(RedemptionOutcome::RepeatRedemption { ticket, additional })
        }
    })
}

/// Creates the redemption entry and links it to the ticket.
fn record_first_redemption(
    conn: &mut SqliteConnection,
    row: &TicketRow,
    site_id: i64,
    redeemed_at: &str,
) -> Result<(), PersistenceError> {
    diesel::insert_into(redemption_entries::table)
        .values((
            redemption_entries::site_id.eq(site_id),
            redemption_entries::redeemed_at.eq(redeemed_at),
        ))
        .execute(conn)?;

    let entry_id: i64 = conn.get_last_insert_rowid()?;
    debug!(entry_id, ticket_id = row.ticket_id, "Created redemption entry");

    // The is_redeemed guard makes the update a no-op if another writer got here first.
    let updated: usize = diesel::update(tickets::table)
        .filter(tickets::ticket_id.eq(row.ticket_id))
        .filter(tickets::is_redeemed.eq(0))
        .set((
            tickets::is_redeemed.eq(1),
            tickets::redemption_entry_id.eq(Some(entry_id)),
        ))
        .execute(conn)?;

    if updated != 1 {
        return Err(PersistenceError::QueryFailed(format!(
            "Ticket {} was redeemed concurrently",
            row.record_locator
        )));
    }

    Ok(())
}

/// Appends an additional redemption for an already-redeemed ticket.
fn record_additional_redemption(
    conn: &mut SqliteConnection,
    row: &TicketRow,
    site: FederalSite,
    redeemed_at: &str,
) -> Result<AdditionalRedemption, PersistenceError> {
    let site_id: i64 = site.site_id.ok_or_else(|| {
        PersistenceError::ReconstructionError(format!("Site '{}' has no ID", site.slug))
    })?;

    diesel::insert_into(additional_redemptions::table)
        .values((
            additional_redemptions::ticket_id.eq(row.ticket_id),
            additional_redemptions::site_id.eq(site_id),
            additional_redemptions::redeemed_at.eq(redeemed_at),
        ))
        .execute(conn)?;

    let additional_redemption_id: i64 = conn.get_last_insert_rowid()?;

    Ok(AdditionalRedemption {
        additional_redemption_id,
        ticket_id: row.ticket_id,
        record_locator: RecordLocator::parse(&row.record_locator)?,
        redeemed_at: redeemed_at.to_string(),
        site,
    })
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference data import.
//!
//! Each import runs in one transaction: a duplicate slug or record locator
//! rejects the whole batch.

use diesel::SqliteConnection;
use diesel::prelude::*;
use ekip_domain::FederalSite;
use tracing::info;

use crate::data_models::NewTicket;
use crate::diesel_schema::{federal_sites, tickets};
use crate::error::PersistenceError;

/// Inserts federal sites.
///
/// # Errors
///
/// Returns `PersistenceError::DuplicateRecord` if a slug already exists.
/// Returns an error if any insert fails; nothing is written in that case.
pub fn insert_federal_sites(
    conn: &mut SqliteConnection,
    sites: &[FederalSite],
) -> Result<usize, PersistenceError> {
    conn.transaction(|conn| {
        let mut inserted: usize = 0;
        for site in sites {
            inserted += diesel::insert_into(federal_sites::table)
                .values((
                    federal_sites::slug.eq(&site.slug),
                    federal_sites::name.eq(&site.name),
                    federal_sites::city.eq(site.city.as_deref()),
                    federal_sites::state.eq(site.state.code()),
                    federal_sites::site_type.eq(site.site_type.as_str()),
                ))
                .execute(conn)?;
        }
        info!(count = inserted, "Imported federal sites");
        Ok(inserted)
    })
}

/// Inserts unredeemed tickets.
///
/// # Errors
///
/// Returns `PersistenceError::DuplicateRecord` if a record locator already exists.
/// Returns an error if any insert fails; nothing is written in that case.
pub fn insert_tickets(
    conn: &mut SqliteConnection,
    new_tickets: &[NewTicket],
) -> Result<usize, PersistenceError> {
    conn.transaction(|conn| {
        let mut inserted: usize = 0;
        for ticket in new_tickets {
            inserted += diesel::insert_into(tickets::table)
                .values((
                    tickets::record_locator.eq(ticket.record_locator.value()),
                    tickets::zip_code.eq(ticket.zip_code.as_deref()),
                ))
                .execute(conn)?;
        }
        info!(count = inserted, "Imported tickets");
        Ok(inserted)
    })
}

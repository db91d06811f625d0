// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Federal site queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use ekip_domain::FederalSite;
use tracing::debug;

use crate::data_models::SiteRow;
use crate::diesel_schema::federal_sites;
use crate::error::PersistenceError;

/// Retrieves a federal site by slug.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored row is invalid.
/// Returns `Ok(None)` if no site carries the slug.
pub fn get_site_by_slug(
    conn: &mut SqliteConnection,
    slug: &str,
) -> Result<Option<FederalSite>, PersistenceError> {
    debug!("Looking up federal site by slug: {}", slug);

    federal_sites::table
        .filter(federal_sites::slug.eq(slug))
        .select(SiteRow::as_select())
        .first(conn)
        .optional()?
        .map(SiteRow::into_site)
        .transpose()
}

/// Lists the federal sites located in a region.
///
/// The code is compared as stored (uppercase). Sites are ordered by name,
/// then slug, so the listing is stable.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored row is invalid.
pub fn list_sites_by_state(
    conn: &mut SqliteConnection,
    state_code: &str,
) -> Result<Vec<FederalSite>, PersistenceError> {
    debug!("Listing federal sites for state: {}", state_code);

    let rows: Vec<SiteRow> = federal_sites::table
        .filter(federal_sites::state.eq(state_code))
        .order((federal_sites::name.asc(), federal_sites::slug.asc()))
        .select(SiteRow::as_select())
        .load(conn)?;

    rows.into_iter().map(SiteRow::into_site).collect()
}

/// Counts all federal sites.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_sites(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(federal_sites::table.count().get_result(conn)?)
}

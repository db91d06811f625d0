// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use ekip_domain::{FederalSite, RecordLocator, SiteType, StateCode};
use std::str::FromStr;

use crate::diesel_schema::{federal_sites, redemption_entries, tickets};
use crate::error::PersistenceError;

/// Operator account data as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorData {
    pub operator_id: i64,
    pub login_name: String,
    pub email: String,
    pub password_hash: String,
    pub is_disabled: bool,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

/// Session data as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub operator_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}

/// A ticket to be created by fixture import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    pub record_locator: RecordLocator,
    pub zip_code: Option<String>,
}

/// Diesel row for `federal_sites`.
#[derive(Queryable, Selectable)]
#[diesel(table_name = federal_sites)]
pub(crate) struct SiteRow {
    pub site_id: i64,
    pub slug: String,
    pub name: String,
    pub city: Option<String>,
    pub state: String,
    pub site_type: String,
}

impl SiteRow {
    /// Converts the row into a domain site, validating stored codes.
    pub fn into_site(self) -> Result<FederalSite, PersistenceError> {
        let state: StateCode = StateCode::parse(&self.state)?;
        let site_type: SiteType = SiteType::from_str(&self.site_type)?;
        Ok(FederalSite::new(self.slug, self.name, self.city, state, site_type)
            .with_site_id(self.site_id))
    }
}

/// Diesel row for `tickets`.
#[derive(Queryable, Selectable)]
#[diesel(table_name = tickets)]
pub(crate) struct TicketRow {
    pub ticket_id: i64,
    pub record_locator: String,
    pub zip_code: Option<String>,
    pub is_redeemed: i32,
    pub redemption_entry_id: Option<i64>,
    pub created_at: String,
}

/// Diesel row for `redemption_entries`.
#[derive(Queryable, Selectable)]
#[diesel(table_name = redemption_entries)]
pub(crate) struct EntryRow {
    pub entry_id: i64,
    pub redeemed_at: String,
}

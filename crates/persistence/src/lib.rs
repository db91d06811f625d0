// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the EKIP voucher redemption system.
//!
//! This crate stores federal sites, tickets, redemption records, operators
//! and sessions in `SQLite` through Diesel.
//!
//! ## Storage Conventions
//!
//! - Calendar dates are stored as `YYYY-MM-DD` and timestamps as
//!   `YYYY-MM-DD HH:MM:SS` (UTC), so range filters compare text.
//! - Migrations are embedded in the binary and run on every open.
//! - Foreign key enforcement is verified at startup; a connection without
//!   it is rejected.
//!
//! ## Testing
//!
//! `Persistence::new_in_memory()` gives every caller its own shared-cache
//! in-memory database, so tests never observe each other's writes.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use ekip_domain::{
    AdditionalRedemption, FederalSite, RecordLocator, RedeemedTicket, RedemptionOutcome, Ticket,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{NewTicket, OperatorData, SessionData};
pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:ekip_memdb_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Federal Sites
    // ========================================================================

    /// Lists the federal sites in a region, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_sites_by_state(
        &mut self,
        state_code: &str,
    ) -> Result<Vec<FederalSite>, PersistenceError> {
        queries::sites::list_sites_by_state(&mut self.conn, state_code)
    }

    /// Retrieves a federal site by slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_site_by_slug(&mut self, slug: &str) -> Result<Option<FederalSite>, PersistenceError> {
        queries::sites::get_site_by_slug(&mut self.conn, slug)
    }

    /// Counts all federal sites.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_sites(&mut self) -> Result<i64, PersistenceError> {
        queries::sites::count_sites(&mut self.conn)
    }

    /// Inserts federal sites in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any site cannot be inserted.
    pub fn insert_federal_sites(&mut self, sites: &[FederalSite]) -> Result<usize, PersistenceError> {
        mutations::fixtures::insert_federal_sites(&mut self.conn, sites)
    }

    // ========================================================================
    // Tickets & Redemption
    // ========================================================================

    /// Retrieves a ticket, with its redemption entry, by record locator.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_ticket_by_record_locator(
        &mut self,
        record_locator: &RecordLocator,
    ) -> Result<Option<Ticket>, PersistenceError> {
        queries::tickets::get_ticket_by_record_locator(&mut self.conn, record_locator)
    }

    /// Redeems a voucher at a site.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::TicketNotFound` or `PersistenceError::SiteNotFound`
    /// if either lookup fails, or an error if the transaction fails.
    pub fn redeem_ticket(
        &mut self,
        record_locator: &RecordLocator,
        site_slug: &str,
        redeemed_at: &str,
    ) -> Result<RedemptionOutcome, PersistenceError> {
        mutations::redemption::redeem_ticket(&mut self.conn, record_locator, site_slug, redeemed_at)
    }

    /// Lists the additional redemptions of a ticket, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_additional_redemptions(
        &mut self,
        record_locator: &RecordLocator,
    ) -> Result<Vec<AdditionalRedemption>, PersistenceError> {
        queries::tickets::list_additional_redemptions(&mut self.conn, record_locator)
    }

    /// Counts all tickets.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_tickets(&mut self) -> Result<i64, PersistenceError> {
        queries::tickets::count_tickets(&mut self.conn)
    }

    /// Inserts unredeemed tickets in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any ticket cannot be inserted.
    pub fn insert_tickets(&mut self, tickets: &[NewTicket]) -> Result<usize, PersistenceError> {
        mutations::fixtures::insert_tickets(&mut self.conn, tickets)
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Counts tickets that have been redeemed at least once.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_tickets_exchanged(&mut self) -> Result<i64, PersistenceError> {
        queries::statistics::count_tickets_exchanged(&mut self.conn)
    }

    /// Counts tickets that have at least one additional redemption.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_tickets_exchanged_more_than_once(&mut self) -> Result<i64, PersistenceError> {
        queries::statistics::count_tickets_exchanged_more_than_once(&mut self.conn)
    }

    /// Lists tickets first redeemed in `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_redeemed_tickets_between(
        &mut self,
        start: &str,
        end: &str,
    ) -> Result<Vec<RedeemedTicket>, PersistenceError> {
        queries::statistics::list_redeemed_tickets_between(&mut self.conn, start, end)
    }

    // ========================================================================
    // Operators & Sessions
    // ========================================================================

    /// Creates a new operator.
    ///
    /// # Errors
    ///
    /// Returns an error if the login name already exists or hashing fails.
    pub fn create_operator(
        &mut self,
        login_name: &str,
        email: &str,
        password: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::operators::create_operator(&mut self.conn, login_name, email, password)
    }

    /// Retrieves an operator by login name (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_operator_by_login(
        &mut self,
        login_name: &str,
    ) -> Result<Option<OperatorData>, PersistenceError> {
        queries::operators::get_operator_by_login(&mut self.conn, login_name)
    }

    /// Retrieves an operator by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_operator_by_id(
        &mut self,
        operator_id: i64,
    ) -> Result<Option<OperatorData>, PersistenceError> {
        queries::operators::get_operator_by_id(&mut self.conn, operator_id)
    }

    /// Counts all operators.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_operators(&mut self) -> Result<i64, PersistenceError> {
        queries::operators::count_operators(&mut self.conn)
    }

    /// Records a successful login.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn update_last_login(&mut self, operator_id: i64) -> Result<(), PersistenceError> {
        mutations::operators::update_last_login(&mut self.conn, operator_id)
    }

    /// Disables an operator.
    ///
    /// # Errors
    ///
    /// Returns an error if the operator does not exist or the update fails.
    pub fn disable_operator(&mut self, operator_id: i64) -> Result<(), PersistenceError> {
        mutations::operators::set_operator_disabled(&mut self.conn, operator_id, true)
    }

    /// Re-enables a disabled operator.
    ///
    /// # Errors
    ///
    /// Returns an error if the operator does not exist or the update fails.
    pub fn enable_operator(&mut self, operator_id: i64) -> Result<(), PersistenceError> {
        mutations::operators::set_operator_disabled(&mut self.conn, operator_id, false)
    }

    /// Verifies a password against a stored bcrypt hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored hash cannot be parsed.
    pub fn verify_password(
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PersistenceError> {
        queries::operators::verify_password(password, password_hash)
    }

    /// Creates a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be created.
    pub fn create_session(
        &mut self,
        session_token: &str,
        operator_id: i64,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::operators::create_session(&mut self.conn, session_token, operator_id, expires_at)
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::operators::get_session_by_token(&mut self.conn, session_token)
    }

    /// Touches a session's last activity timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn update_session_activity(&mut self, session_id: i64) -> Result<(), PersistenceError> {
        mutations::operators::update_session_activity(&mut self.conn, session_id)
    }

    /// Deletes a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::operators::delete_session(&mut self.conn, session_token)
    }

    /// Deletes sessions that expired before `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_expired_sessions(&mut self, now: &str) -> Result<usize, PersistenceError> {
        mutations::operators::delete_expired_sessions(&mut self.conn, now)
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application services for the EKIP voucher redemption system.
//!
//! Each service takes the persistence adapter explicitly, so site lookup,
//! redemption and reporting can be exercised without an HTTP server.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod fixtures;
mod redemption;
mod sites;
mod statistics;

#[cfg(test)]
mod tests;

pub use auth::{
    AuthenticationService, DEFAULT_LOGIN_REDIRECT, LOGIN_PATH, login_url, safe_next,
};
pub use error::{ApiError, AuthError, translate_domain_error, translate_persistence_error};
pub use fixtures::{
    FixtureError, FixtureSummary, SITES_FIXTURE, TICKETS_FIXTURE, load_fixtures,
    load_sites_fixture, parse_sites_fixture, parse_tickets_fixture,
};
pub use redemption::{
    additional_redemptions_for, redeem_voucher, redeem_voucher_at_site, redeem_voucher_at_time,
    ticket_by_record_locator,
};
pub use sites::{SiteListing, site_listing, sites_for_state};
pub use statistics::{
    RangeReport, StatisticsSummary, export_tickets_csv, num_tickets_exchanged,
    num_tickets_exchanged_more_than_once, statistics_summary, tickets_by_dates, tickets_by_states,
};

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod dates;
mod error;
mod states;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use dates::{
    DateRange, convert_to_date, convert_to_db_date, format_db_date, format_timestamp,
    parse_entry_date,
};
pub use error::DomainError;
pub use states::{StateCode, state_name, states};
pub use types::{
    AdditionalRedemption, FederalSite, RecordLocator, RedeemedTicket, RedemptionEntry,
    RedemptionOutcome, RedemptionStatus, RegionTickets, SiteType, Ticket, group_by_region,
};
pub use validation::{validate_site_name, validate_slug};

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Voucher redemption.
//!
//! The first redemption of a ticket creates its redemption entry. Every
//! later redemption appends an additional redemption and leaves the ticket
//! as it was. Repeat redemption is never an error.

use ekip_domain::{
    AdditionalRedemption, FederalSite, RecordLocator, RedemptionOutcome, Ticket, format_timestamp,
};
use ekip_persistence::Persistence;
use time::OffsetDateTime;

use crate::error::ApiError;

/// Redeems a voucher at a site, timestamped now.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for a malformed record locator and
/// `ApiError::ResourceNotFound` if the ticket or site does not exist. No
/// rows are written in either case.
pub fn redeem_voucher(
    persistence: &mut Persistence,
    record_locator: &str,
    site: &FederalSite,
) -> Result<RedemptionOutcome, ApiError> {
    redeem_voucher_at_site(persistence, record_locator, &site.slug)
}

/// Redeems a voucher at the site with the given slug, timestamped now.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for a malformed record locator and
/// `ApiError::ResourceNotFound` if the ticket or site does not exist.
pub fn redeem_voucher_at_site(
    persistence: &mut Persistence,
    record_locator: &str,
    site_slug: &str,
) -> Result<RedemptionOutcome, ApiError> {
    redeem_voucher_at_time(
        persistence,
        record_locator,
        site_slug,
        OffsetDateTime::now_utc(),
    )
}

/// Redeems a voucher at a site with an explicit redemption time.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for a malformed record locator and
/// `ApiError::ResourceNotFound` if the ticket or site does not exist.
pub fn redeem_voucher_at_time(
    persistence: &mut Persistence,
    record_locator: &str,
    site_slug: &str,
    redeemed_at: OffsetDateTime,
) -> Result<RedemptionOutcome, ApiError> {
    let locator: RecordLocator = RecordLocator::parse(record_locator)?;
    let timestamp: String = format_timestamp(redeemed_at)?;
    Ok(persistence.redeem_ticket(&locator, site_slug.trim(), &timestamp)?)
}

/// Retrieves a ticket, with its redemption entry, by record locator.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if no ticket carries the code.
pub fn ticket_by_record_locator(
    persistence: &mut Persistence,
    record_locator: &str,
) -> Result<Ticket, ApiError> {
    let locator: RecordLocator = RecordLocator::parse(record_locator)?;
    persistence
        .get_ticket_by_record_locator(&locator)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Ticket"),
            message: format!("No ticket with record locator '{locator}'"),
        })
}

/// Lists the additional redemptions of a ticket, oldest first.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for a malformed record locator, or an
/// error if the store cannot be read.
pub fn additional_redemptions_for(
    persistence: &mut Persistence,
    record_locator: &str,
) -> Result<Vec<AdditionalRedemption>, ApiError> {
    let locator: RecordLocator = RecordLocator::parse(record_locator)?;
    Ok(persistence.list_additional_redemptions(&locator)?)
}

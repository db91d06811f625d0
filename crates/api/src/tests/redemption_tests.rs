// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{RAINBOW_BRIDGE, TALLADEGA, create_fixture_persistence};
use crate::{
    ApiError, additional_redemptions_for, redeem_voucher, redeem_voucher_at_site,
    ticket_by_record_locator,
};
use ekip_domain::{FederalSite, RedemptionOutcome};

#[test]
fn test_redeem_voucher() {
    let mut persistence = create_fixture_persistence();
    let site: FederalSite = persistence.get_site_by_slug(TALLADEGA).unwrap().unwrap();

    let outcome: RedemptionOutcome = redeem_voucher(&mut persistence, "6PZDJ7TP", &site).unwrap();

    let ticket = outcome.ticket();
    assert_eq!(ticket.record_locator.value(), "6PZDJ7TP");
    let entry = ticket.redemption_entry().unwrap();
    assert_eq!(entry.site.slug, TALLADEGA);
    assert!(!outcome.is_repeat());
}

#[test]
fn test_multiple_redemptions() {
    let mut persistence = create_fixture_persistence();
    let site: FederalSite = persistence.get_site_by_slug(TALLADEGA).unwrap().unwrap();

    let first = redeem_voucher(&mut persistence, "XZ6HGDXR", &site).unwrap();
    assert_eq!(first.ticket().record_locator.value(), "XZ6HGDXR");
    assert!(first.ticket().redemption_entry().is_some());
    assert!(
        additional_redemptions_for(&mut persistence, "XZ6HGDXR")
            .unwrap()
            .is_empty()
    );

    let second = redeem_voucher(&mut persistence, "XZ6HGDXR", &site).unwrap();
    assert!(second.is_repeat());
    assert_eq!(
        second.ticket().redemption_entry(),
        first.ticket().redemption_entry()
    );

    let additional = additional_redemptions_for(&mut persistence, "XZ6HGDXR").unwrap();
    assert_eq!(additional.len(), 1);
    assert_eq!(additional[0].record_locator.value(), "XZ6HGDXR");
    assert_eq!(additional[0].ticket_id, first.ticket().ticket_id);
}

#[test]
fn test_repeat_redemption_at_different_site_is_recorded() {
    let mut persistence = create_fixture_persistence();

    redeem_voucher_at_site(&mut persistence, "XZ6HGDXR", TALLADEGA).unwrap();
    let outcome = redeem_voucher_at_site(&mut persistence, "XZ6HGDXR", RAINBOW_BRIDGE).unwrap();

    let RedemptionOutcome::RepeatRedemption { ticket, additional } = outcome else {
        panic!("expected repeat redemption");
    };
    assert_eq!(ticket.redemption_entry().unwrap().site.slug, TALLADEGA);
    assert_eq!(additional.site.slug, RAINBOW_BRIDGE);
}

#[test]
fn test_record_locator_is_case_insensitive() {
    let mut persistence = create_fixture_persistence();

    let outcome = redeem_voucher_at_site(&mut persistence, " 6pzdj7tp ", TALLADEGA).unwrap();

    assert_eq!(outcome.ticket().record_locator.value(), "6PZDJ7TP");
}

#[test]
fn test_unknown_voucher_is_not_found_and_writes_nothing() {
    let mut persistence = create_fixture_persistence();

    let result = redeem_voucher_at_site(&mut persistence, "ZZZZZZZZ", TALLADEGA);

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
    assert_eq!(persistence.count_tickets_exchanged().unwrap(), 0);
}

#[test]
fn test_unknown_site_is_not_found() {
    let mut persistence = create_fixture_persistence();

    let result = redeem_voucher_at_site(&mut persistence, "6PZDJ7TP", "nps-nowhere");

    let Err(ApiError::ResourceNotFound { resource_type, .. }) = result else {
        panic!("expected site not found");
    };
    assert_eq!(resource_type, "Federal site");
    assert!(
        !ticket_by_record_locator(&mut persistence, "6PZDJ7TP")
            .unwrap()
            .is_redeemed()
    );
}

#[test]
fn test_malformed_record_locator_is_invalid_input() {
    let mut persistence = create_fixture_persistence();

    let result = redeem_voucher_at_site(&mut persistence, "6PZ-DJ7", TALLADEGA);

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "record_locator"
    ));
}

#[test]
fn test_ticket_lookup_for_unknown_voucher() {
    let mut persistence = create_fixture_persistence();

    assert!(matches!(
        ticket_by_record_locator(&mut persistence, "ZZZZZZZZ"),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

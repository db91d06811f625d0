// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{CABO_ROJO, RAINBOW_BRIDGE, TALLADEGA, create_fixture_persistence, sept};
use crate::{
    ApiError, export_tickets_csv, num_tickets_exchanged, num_tickets_exchanged_more_than_once,
    redeem_voucher_at_site, redeem_voucher_at_time, statistics_summary, tickets_by_dates,
    tickets_by_states,
};
use ekip_persistence::Persistence;

/// Redeems three tickets on three days in September 2015, one of them twice.
fn create_redeemed_persistence() -> Persistence {
    let mut persistence = create_fixture_persistence();
    redeem_voucher_at_time(&mut persistence, "6PZDJ7TP", TALLADEGA, sept(1, 9)).unwrap();
    redeem_voucher_at_time(&mut persistence, "XZ6HGDXR", RAINBOW_BRIDGE, sept(2, 23)).unwrap();
    redeem_voucher_at_time(&mut persistence, "K2M8QW4R", CABO_ROJO, sept(3, 0)).unwrap();
    redeem_voucher_at_time(&mut persistence, "6PZDJ7TP", RAINBOW_BRIDGE, sept(4, 12)).unwrap();
    persistence
}

#[test]
fn test_paper_exchanged() {
    let mut persistence = create_fixture_persistence();
    let before = num_tickets_exchanged(&mut persistence).unwrap();

    redeem_voucher_at_site(&mut persistence, "6PZDJ7TP", TALLADEGA).unwrap();

    let after = num_tickets_exchanged(&mut persistence).unwrap();
    assert!(after >= 1);
    assert!(after > before);
}

#[test]
fn test_multiple_redemptions_statistics() {
    let mut persistence = create_fixture_persistence();
    let before = num_tickets_exchanged_more_than_once(&mut persistence).unwrap();

    redeem_voucher_at_site(&mut persistence, "XZ6HGDXR", TALLADEGA).unwrap();
    assert_eq!(
        num_tickets_exchanged_more_than_once(&mut persistence).unwrap(),
        before
    );
    redeem_voucher_at_site(&mut persistence, "XZ6HGDXR", TALLADEGA).unwrap();

    let after = num_tickets_exchanged_more_than_once(&mut persistence).unwrap();
    assert!(after > before);
}

#[test]
fn test_get_tickets_by_dates() {
    let mut persistence = create_fixture_persistence();
    assert!(tickets_by_dates(&mut persistence, "01/01/2014", "01/01/2017").is_ok());
}

#[test]
fn test_get_tickets_by_states() {
    let mut persistence = create_fixture_persistence();
    assert!(tickets_by_states(&mut persistence, "01/01/2014", "01/01/2017").is_ok());
}

#[test]
fn test_tickets_by_dates_end_day_is_inclusive() {
    let mut persistence = create_redeemed_persistence();

    let codes: Vec<String> = tickets_by_dates(&mut persistence, "09/01/2015", "09/02/2015")
        .unwrap()
        .into_iter()
        .map(|t| t.record_locator.to_string())
        .collect();

    assert_eq!(codes, vec!["6PZDJ7TP", "XZ6HGDXR"]);
}

#[test]
fn test_single_day_range() {
    let mut persistence = create_redeemed_persistence();

    let tickets = tickets_by_dates(&mut persistence, "09/03/2015", "09/03/2015").unwrap();

    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].record_locator.value(), "K2M8QW4R");
}

#[test]
fn test_range_ending_on_last_representable_day() {
    let mut persistence = create_redeemed_persistence();

    let tickets = tickets_by_dates(&mut persistence, "01/01/2014", "12/31/9999").unwrap();
    assert_eq!(tickets.len(), 3);

    let summary = statistics_summary(&mut persistence, Some("01/01/2014"), Some("12/31/9999"))
        .unwrap();
    assert_eq!(summary.range.unwrap().tickets.len(), 3);
}

#[test]
fn test_repeat_redemption_does_not_move_ticket_in_range() {
    let mut persistence = create_redeemed_persistence();

    // 6PZDJ7TP was redeemed again on the 4th; only its first redemption counts.
    assert!(
        tickets_by_dates(&mut persistence, "09/04/2015", "09/30/2015")
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_inverted_range_is_empty() {
    let mut persistence = create_redeemed_persistence();
    assert!(
        tickets_by_dates(&mut persistence, "12/31/2015", "01/01/2015")
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_malformed_bound_is_invalid_input() {
    let mut persistence = create_redeemed_persistence();

    for (start, end) in [("2015-09-01", "09/30/2015"), ("09/01/2015", "13/01/2015")] {
        assert!(matches!(
            tickets_by_dates(&mut persistence, start, end),
            Err(ApiError::InvalidInput { .. })
        ));
    }
}

#[test]
fn test_tickets_by_states_groups_by_region() {
    let mut persistence = create_redeemed_persistence();

    let regions = tickets_by_states(&mut persistence, "09/01/2015", "09/30/2015").unwrap();

    let summary: Vec<(&str, &str, usize)> = regions
        .iter()
        .map(|r| (r.state.code(), r.state_name, r.tickets.len()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("AL", "Alabama", 1),
            ("AZ", "Arizona", 1),
            ("PR", "Puerto Rico", 1),
        ]
    );
}

#[test]
fn test_statistics_summary_without_range() {
    let mut persistence = create_redeemed_persistence();

    let summary = statistics_summary(&mut persistence, None, Some("  ")).unwrap();

    assert_eq!(summary.tickets_exchanged, 3);
    assert_eq!(summary.tickets_exchanged_more_than_once, 1);
    assert!(summary.range.is_none());
}

#[test]
fn test_statistics_summary_with_range() {
    let mut persistence = create_redeemed_persistence();

    let summary =
        statistics_summary(&mut persistence, Some("09/01/2015"), Some("09/02/2015")).unwrap();

    let range = summary.range.unwrap();
    assert_eq!(range.start_date, "09/01/2015");
    assert_eq!(range.tickets.len(), 2);
    assert_eq!(range.regions.len(), 2);
}

#[test]
fn test_statistics_summary_with_half_range_is_invalid() {
    let mut persistence = create_redeemed_persistence();

    let result = statistics_summary(&mut persistence, Some("09/01/2015"), None);

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "end_date"
    ));
}

#[test]
fn test_export_tickets_csv() {
    let mut persistence = create_redeemed_persistence();

    let csv = export_tickets_csv(&mut persistence, "09/01/2015", "09/02/2015").unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(
        lines,
        vec![
            "record_locator,redeemed_at,site_slug,site_name,state",
            "6PZDJ7TP,2015-09-01 09:00:00,nf-talladega-talladega-ranger,Talladega National Forest - Talladega Ranger District,AL",
            "XZ6HGDXR,2015-09-02 23:00:00,nps-rainbow-bridge,Rainbow Bridge National Monument,AZ",
        ]
    );
}

#[test]
fn test_export_for_empty_range_has_only_header() {
    let mut persistence = create_fixture_persistence();

    let csv = export_tickets_csv(&mut persistence, "01/01/2014", "01/01/2014").unwrap();

    assert_eq!(csv, "record_locator,redeemed_at,site_slug,site_name,state\n");
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_seeded_persistence, locator};
use crate::Persistence;
use ekip_domain::RedeemedTicket;

fn redeem(persistence: &mut Persistence, code: &str, slug: &str, at: &str) {
    persistence.redeem_ticket(&locator(code), slug, at).unwrap();
}

#[test]
fn test_counts_on_empty_database_are_zero() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert_eq!(persistence.count_tickets_exchanged().unwrap(), 0);
    assert_eq!(
        persistence.count_tickets_exchanged_more_than_once().unwrap(),
        0
    );
}

#[test]
fn test_exchange_counts() {
    let mut persistence = create_seeded_persistence();

    redeem(&mut persistence, "6PZDJ7TP", "nps-rainbow-bridge", "2015-09-01 10:00:00");
    redeem(&mut persistence, "XZ6HGDXR", "blm-aqua-fria", "2015-09-01 11:00:00");
    redeem(&mut persistence, "XZ6HGDXR", "blm-aqua-fria", "2015-09-02 11:00:00");
    redeem(&mut persistence, "XZ6HGDXR", "nps-rainbow-bridge", "2015-09-03 11:00:00");

    assert_eq!(persistence.count_tickets_exchanged().unwrap(), 2);
    assert_eq!(
        persistence.count_tickets_exchanged_more_than_once().unwrap(),
        1
    );
}

#[test]
fn test_range_includes_whole_end_day() {
    let mut persistence = create_seeded_persistence();

    redeem(&mut persistence, "6PZDJ7TP", "nps-rainbow-bridge", "2015-09-01 00:00:00");
    redeem(&mut persistence, "XZ6HGDXR", "nf-talladega-ranger", "2015-09-03 23:59:59");
    redeem(&mut persistence, "QWERTY12", "blm-aqua-fria", "2015-09-04 00:00:00");

    let tickets: Vec<RedeemedTicket> = persistence
        .list_redeemed_tickets_between("2015-09-01", "2015-09-03 23:59:59")
        .unwrap();
    let codes: Vec<&str> = tickets.iter().map(|t| t.record_locator.value()).collect();

    assert_eq!(codes, vec!["6PZDJ7TP", "XZ6HGDXR"]);
    assert_eq!(tickets[1].site.state.code(), "AL");
}

#[test]
fn test_range_uses_first_redemption_only() {
    let mut persistence = create_seeded_persistence();

    redeem(&mut persistence, "6PZDJ7TP", "nps-rainbow-bridge", "2015-08-01 10:00:00");
    redeem(&mut persistence, "6PZDJ7TP", "blm-aqua-fria", "2015-09-02 10:00:00");

    assert!(
        persistence
            .list_redeemed_tickets_between("2015-09-01", "2015-09-30 23:59:59")
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_inverted_range_is_empty() {
    let mut persistence = create_seeded_persistence();
    redeem(&mut persistence, "6PZDJ7TP", "nps-rainbow-bridge", "2015-09-02 10:00:00");

    assert!(
        persistence
            .list_redeemed_tickets_between("2015-09-05", "2015-09-01")
            .unwrap()
            .is_empty()
    );
}

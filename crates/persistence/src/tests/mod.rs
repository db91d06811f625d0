// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod initialization_tests;
mod statistics_tests;

use crate::{NewTicket, Persistence};
use ekip_domain::{FederalSite, RecordLocator, SiteType, StateCode};

pub fn create_test_site(slug: &str, name: &str, state: &str) -> FederalSite {
    FederalSite::new(
        slug.to_string(),
        name.to_string(),
        None,
        StateCode::parse(state).unwrap(),
        SiteType::NationalForest,
    )
}

pub fn create_test_ticket(record_locator: &str) -> NewTicket {
    NewTicket {
        record_locator: RecordLocator::parse(record_locator).unwrap(),
        zip_code: None,
    }
}

pub fn locator(value: &str) -> RecordLocator {
    RecordLocator::parse(value).unwrap()
}

/// Creates a database holding two Arizona sites, one Alabama site and
/// three unredeemed tickets.
pub fn create_seeded_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence
        .insert_federal_sites(&[
            create_test_site("nf-talladega-ranger", "Talladega Ranger District", "AL"),
            create_test_site("nps-rainbow-bridge", "Rainbow Bridge", "AZ"),
            create_test_site("blm-aqua-fria", "Aqua Fria", "AZ"),
        ])
        .unwrap();
    persistence
        .insert_tickets(&[
            create_test_ticket("6PZDJ7TP"),
            create_test_ticket("XZ6HGDXR"),
            create_test_ticket("QWERTY12"),
        ])
        .unwrap();
    persistence
}

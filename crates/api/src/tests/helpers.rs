// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use ekip_persistence::Persistence;
use std::path::PathBuf;
use time::OffsetDateTime;
use time::macros::datetime;

use crate::load_fixtures;

pub const TALLADEGA: &str = "nf-talladega-talladega-ranger";
pub const RAINBOW_BRIDGE: &str = "nps-rainbow-bridge";
pub const CABO_ROJO: &str = "fws-cabo-rojo";

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Creates an in-memory store loaded with the bundled fixtures.
pub fn create_fixture_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    load_fixtures(&mut persistence, &fixtures_dir()).unwrap();
    persistence
}

pub fn sept(day: u8, hour: u8) -> OffsetDateTime {
    datetime!(2015-09-01 00:00 UTC)
        .replace_day(day)
        .unwrap()
        .replace_hour(hour)
        .unwrap()
}

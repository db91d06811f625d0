// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Site lookup.

use ekip_domain::{FederalSite, state_name};
use ekip_persistence::Persistence;
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;

/// The federal sites of one region, as shown on the site listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteListing {
    /// The normalized region code that was requested.
    pub state_code: String,
    /// The region's full name, if the code is in the state directory.
    pub state_name: Option<&'static str>,
    /// Sites in the region, ordered by name.
    pub sites: Vec<FederalSite>,
}

/// Lists the federal sites located in a region.
///
/// The code is normalized to uppercase. An unrecognized code is not an
/// error; it simply matches no sites.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn sites_for_state(
    persistence: &mut Persistence,
    region_code: &str,
) -> Result<Vec<FederalSite>, ApiError> {
    let normalized: String = region_code.trim().to_uppercase();
    let sites: Vec<FederalSite> = persistence.list_sites_by_state(&normalized)?;
    debug!(state = %normalized, count = sites.len(), "Listed federal sites");
    Ok(sites)
}

/// Lists the federal sites of a region together with the region's name.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn site_listing(
    persistence: &mut Persistence,
    region_code: &str,
) -> Result<SiteListing, ApiError> {
    let state_code: String = region_code.trim().to_uppercase();
    let sites: Vec<FederalSite> = sites_for_state(persistence, &state_code)?;
    Ok(SiteListing {
        state_name: state_name(&state_code),
        state_code,
        sites,
    })
}

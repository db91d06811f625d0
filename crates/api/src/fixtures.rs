// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference data fixtures.
//!
//! Fixtures are JSON arrays of `{"model": ..., "pk": ..., "fields": {...}}`
//! records. `federalsites.json` holds federal sites and `tickets.json`
//! holds unredeemed tickets. Every record is validated before anything is
//! written.

use ekip_domain::{
    DomainError, FederalSite, RecordLocator, SiteType, StateCode, validate_site_name,
    validate_slug,
};
use ekip_persistence::{NewTicket, Persistence, PersistenceError};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

/// File name of the federal site fixture.
pub const SITES_FIXTURE: &str = "federalsites.json";

/// File name of the ticket fixture.
pub const TICKETS_FIXTURE: &str = "tickets.json";

/// Fixture loading errors.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The fixture file could not be read.
    #[error("Failed to read fixture {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The fixture is not valid JSON of the expected shape.
    #[error("Failed to parse fixture {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// A record failed validation.
    #[error("Invalid record {pk:?} in {name}: {source}")]
    InvalidRecord {
        name: String,
        pk: Option<i64>,
        #[source]
        source: DomainError,
    },

    /// The store rejected the import.
    #[error("Failed to store fixture data: {0}")]
    Persistence(#[from] PersistenceError),
}

/// How many records each fixture contributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixtureSummary {
    /// Federal sites inserted.
    pub sites: usize,
    /// Tickets inserted.
    pub tickets: usize,
}

#[derive(Debug, Deserialize)]
struct FixtureRecord<T> {
    #[serde(default)]
    pk: Option<i64>,
    fields: T,
}

#[derive(Debug, Deserialize)]
struct SiteFields {
    slug: String,
    name: String,
    #[serde(default)]
    city: Option<String>,
    state: String,
    #[serde(default)]
    site_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TicketFields {
    record_locator: String,
    #[serde(default)]
    zip: Option<String>,
}

fn parse_records<T: DeserializeOwned>(
    name: &str,
    json: &str,
) -> Result<Vec<FixtureRecord<T>>, FixtureError> {
    serde_json::from_str(json).map_err(|source| FixtureError::Parse {
        name: name.to_string(),
        source,
    })
}

fn site_from_fields(fields: SiteFields) -> Result<FederalSite, DomainError> {
    validate_slug(&fields.slug)?;
    validate_site_name(&fields.slug, &fields.name)?;
    let state: StateCode = StateCode::parse(&fields.state)?;
    let site_type: SiteType = fields
        .site_type
        .as_deref()
        .map(SiteType::from_str)
        .transpose()?
        .unwrap_or_default();
    let city: Option<String> = fields
        .city
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());
    Ok(FederalSite::new(
        fields.slug,
        fields.name.trim().to_string(),
        city,
        state,
        site_type,
    ))
}

/// Parses and validates a federal site fixture.
///
/// # Errors
///
/// Returns `FixtureError::Parse` for malformed JSON and
/// `FixtureError::InvalidRecord` for a site with a bad slug, an empty name,
/// a region code outside the state directory, or an unknown site type.
pub fn parse_sites_fixture(json: &str) -> Result<Vec<FederalSite>, FixtureError> {
    parse_records::<SiteFields>(SITES_FIXTURE, json)?
        .into_iter()
        .map(|record| {
            site_from_fields(record.fields).map_err(|source| FixtureError::InvalidRecord {
                name: SITES_FIXTURE.to_string(),
                pk: record.pk,
                source,
            })
        })
        .collect()
}

/// Parses and validates a ticket fixture.
///
/// # Errors
///
/// Returns `FixtureError::Parse` for malformed JSON and
/// `FixtureError::InvalidRecord` for an invalid record locator.
pub fn parse_tickets_fixture(json: &str) -> Result<Vec<NewTicket>, FixtureError> {
    parse_records::<TicketFields>(TICKETS_FIXTURE, json)?
        .into_iter()
        .map(|record| {
            let record_locator: RecordLocator =
                RecordLocator::parse(&record.fields.record_locator).map_err(|source| {
                    FixtureError::InvalidRecord {
                        name: TICKETS_FIXTURE.to_string(),
                        pk: record.pk,
                        source,
                    }
                })?;
            Ok(NewTicket {
                record_locator,
                zip_code: record.fields.zip.filter(|z| !z.trim().is_empty()),
            })
        })
        .collect()
}

fn read_fixture(path: &Path) -> Result<String, FixtureError> {
    std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads `federalsites.json` and `tickets.json` from a directory.
///
/// Sites are stored before tickets. Each file is imported in its own
/// transaction, so a duplicate slug or record locator rejects that file.
///
/// # Errors
///
/// Returns an error if either file cannot be read, parsed, validated or
/// stored.
pub fn load_fixtures(
    persistence: &mut Persistence,
    dir: &Path,
) -> Result<FixtureSummary, FixtureError> {
    let sites: Vec<FederalSite> = parse_sites_fixture(&read_fixture(&dir.join(SITES_FIXTURE))?)?;
    let tickets: Vec<NewTicket> =
        parse_tickets_fixture(&read_fixture(&dir.join(TICKETS_FIXTURE))?)?;

    let summary: FixtureSummary = FixtureSummary {
        sites: persistence.insert_federal_sites(&sites)?,
        tickets: persistence.insert_tickets(&tickets)?,
    };

    info!(
        dir = %dir.display(),
        sites = summary.sites,
        tickets = summary.tickets,
        "Loaded fixtures"
    );
    Ok(summary)
}

/// Loads only `federalsites.json` from a directory.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, validated or stored.
pub fn load_sites_fixture(
    persistence: &mut Persistence,
    dir: &Path,
) -> Result<usize, FixtureError> {
    let sites: Vec<FederalSite> = parse_sites_fixture(&read_fixture(&dir.join(SITES_FIXTURE))?)?;
    Ok(persistence.insert_federal_sites(&sites)?)
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::states::StateCode;
use serde::{Deserialize, Serialize, Serializer};
use std::str::FromStr;

impl Serialize for StateCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// The agency that manages a federal site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SiteType {
    /// National Park Service.
    #[serde(rename = "NPS")]
    NationalPark,
    /// USDA Forest Service.
    #[serde(rename = "NF")]
    NationalForest,
    /// U.S. Fish and Wildlife Service.
    #[serde(rename = "FWS")]
    FishAndWildlife,
    /// Bureau of Land Management.
    #[serde(rename = "BLM")]
    LandManagement,
    /// Bureau of Reclamation.
    #[serde(rename = "BOR")]
    Reclamation,
    /// U.S. Army Corps of Engineers.
    #[serde(rename = "USACE")]
    ArmyCorps,
    /// National Oceanic and Atmospheric Administration.
    #[serde(rename = "NOAA")]
    MarineSanctuary,
    /// Any other managing agency.
    #[serde(rename = "OTHER")]
    #[default]
    Other,
}

impl SiteType {
    /// Returns the agency code stored in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NationalPark => "NPS",
            Self::NationalForest => "NF",
            Self::FishAndWildlife => "FWS",
            Self::LandManagement => "BLM",
            Self::Reclamation => "BOR",
            Self::ArmyCorps => "USACE",
            Self::MarineSanctuary => "NOAA",
            Self::Other => "OTHER",
        }
    }
}

impl FromStr for SiteType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NPS" => Ok(Self::NationalPark),
            "NF" => Ok(Self::NationalForest),
            "FWS" => Ok(Self::FishAndWildlife),
            "BLM" => Ok(Self::LandManagement),
            "BOR" => Ok(Self::Reclamation),
            "USACE" => Ok(Self::ArmyCorps),
            "NOAA" => Ok(Self::MarineSanctuary),
            "OTHER" => Ok(Self::Other),
            _ => Err(DomainError::InvalidSiteType(s.to_string())),
        }
    }
}

impl std::fmt::Display for SiteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A federal recreation site where vouchers can be redeemed.
///
/// Sites are reference data loaded from fixtures and never modified
/// by the redemption workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FederalSite {
    /// The database identifier. `None` until persisted.
    pub site_id: Option<i64>,
    /// Unique, URL-safe identifier (e.g., `nf-talladega-talladega-ranger`).
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Nearest city, when known.
    pub city: Option<String>,
    /// The region the site is located in.
    pub state: StateCode,
    /// The managing agency.
    pub site_type: SiteType,
}

impl FederalSite {
    /// Creates a new, unpersisted federal site.
    #[must_use]
    pub const fn new(
        slug: String,
        name: String,
        city: Option<String>,
        state: StateCode,
        site_type: SiteType,
    ) -> Self {
        Self {
            site_id: None,
            slug,
            name,
            city,
            state,
            site_type,
        }
    }

    /// Returns a copy of this site carrying its database identifier.
    #[must_use]
    pub fn with_site_id(mut self, site_id: i64) -> Self {
        self.site_id = Some(site_id);
        self
    }
}

/// The code printed on a paper voucher.
///
/// Record locators are normalized to uppercase so lookups are
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordLocator {
    value: String,
}

impl RecordLocator {
    /// Parses and normalizes a record locator.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRecordLocator` if the value is empty or
    /// contains anything other than ASCII letters and digits.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let normalized: String = value.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(DomainError::InvalidRecordLocator(String::from(
                "Record locator cannot be empty",
            )));
        }
        if !normalized.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::InvalidRecordLocator(format!(
                "'{value}' must contain only letters and digits"
            )));
        }
        Ok(Self { value: normalized })
    }

    /// Returns the normalized value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl TryFrom<String> for RecordLocator {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RecordLocator> for String {
    fn from(locator: RecordLocator) -> Self {
        locator.value
    }
}

impl std::fmt::Display for RecordLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// The primary redemption record of a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedemptionEntry {
    /// The database identifier.
    pub entry_id: i64,
    /// When the voucher was first exchanged (storage timestamp, UTC).
    pub redeemed_at: String,
    /// Where the voucher was first exchanged.
    pub site: FederalSite,
}

/// A redemption of a ticket that had already been redeemed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdditionalRedemption {
    /// The database identifier.
    pub additional_redemption_id: i64,
    /// The ticket this redemption belongs to.
    pub ticket_id: i64,
    /// The ticket's record locator.
    pub record_locator: RecordLocator,
    /// When the repeat exchange happened (storage timestamp, UTC).
    pub redeemed_at: String,
    /// Where the repeat exchange happened.
    pub site: FederalSite,
}

/// Whether a ticket has been exchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(tag = "status", content = "entry")]
pub enum RedemptionStatus {
    /// Never exchanged.
    #[default]
    Unredeemed,
    /// Exchanged at least once; carries the first exchange.
    Redeemed(RedemptionEntry),
}

/// A ticket issued for a paper voucher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ticket {
    /// The database identifier.
    pub ticket_id: i64,
    /// The voucher code.
    pub record_locator: RecordLocator,
    /// ZIP code supplied at issuance, when known.
    pub zip_code: Option<String>,
    /// When the ticket was issued (storage timestamp, UTC).
    pub created_at: String,
    /// Redemption state.
    pub status: RedemptionStatus,
}

impl Ticket {
    /// Returns the primary redemption entry, if the ticket has been redeemed.
    #[must_use]
    pub const fn redemption_entry(&self) -> Option<&RedemptionEntry> {
        match &self.status {
            RedemptionStatus::Unredeemed => None,
            RedemptionStatus::Redeemed(entry) => Some(entry),
        }
    }

    /// Returns whether the ticket has been redeemed.
    #[must_use]
    pub const fn is_redeemed(&self) -> bool {
        matches!(self.status, RedemptionStatus::Redeemed(_))
    }
}

/// The result of redeeming a voucher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedemptionOutcome {
    /// The ticket had not been redeemed; its redemption entry was created.
    FirstRedemption(Ticket),
    /// The ticket was already redeemed; an additional redemption was recorded.
    RepeatRedemption {
        /// The ticket, with its original redemption entry.
        ticket: Ticket,
        /// The newly recorded redemption.
        additional: AdditionalRedemption,
    },
}

impl RedemptionOutcome {
    /// Returns the redeemed ticket.
    #[must_use]
    pub const fn ticket(&self) -> &Ticket {
        match self {
            Self::FirstRedemption(ticket) | Self::RepeatRedemption { ticket, .. } => ticket,
        }
    }

    /// Consumes the outcome, returning the redeemed ticket.
    #[must_use]
    pub fn into_ticket(self) -> Ticket {
        match self {
            Self::FirstRedemption(ticket) | Self::RepeatRedemption { ticket, .. } => ticket,
        }
    }

    /// Returns whether this was a repeat redemption.
    #[must_use]
    pub const fn is_repeat(&self) -> bool {
        matches!(self, Self::RepeatRedemption { .. })
    }
}

/// A ticket listed in a statistics report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedeemedTicket {
    /// The voucher code.
    pub record_locator: RecordLocator,
    /// When the voucher was first exchanged (storage timestamp, UTC).
    pub redeemed_at: String,
    /// Where the voucher was first exchanged.
    pub site: FederalSite,
}

/// Redeemed tickets grouped under the region of their redemption site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionTickets {
    /// The region.
    pub state: StateCode,
    /// The region's full name.
    pub state_name: &'static str,
    /// Tickets first redeemed at a site in the region.
    pub tickets: Vec<RedeemedTicket>,
}

impl RegionTickets {
    /// Creates an empty group for a region.
    #[must_use]
    pub const fn new(state: StateCode) -> Self {
        Self {
            state,
            state_name: state.name(),
            tickets: Vec::new(),
        }
    }
}

/// Groups redeemed tickets by the region of their redemption site.
///
/// Groups are ordered by region code. Within a group, tickets keep the
/// order they were supplied in.
#[must_use]
pub fn group_by_region(tickets: Vec<RedeemedTicket>) -> Vec<RegionTickets> {
    let mut groups: std::collections::BTreeMap<StateCode, RegionTickets> =
        std::collections::BTreeMap::new();
    for ticket in tickets {
        let state: StateCode = ticket.site.state;
        groups
            .entry(state)
            .or_insert_with(|| RegionTickets::new(state))
            .tickets
            .push(ticket);
    }
    groups.into_values().collect()
}

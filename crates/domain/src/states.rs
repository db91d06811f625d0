// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State directory.
//!
//! A fixed table mapping two-letter region codes (the 50 states, the
//! District of Columbia and the inhabited territories) to their full names.
//! The table is sorted by code so lookups can binary search it.

use crate::error::DomainError;

/// Region codes and names, sorted by code.
static STATES: [(&str, &str); 56] = [
    ("AK", "Alaska"),
    ("AL", "Alabama"),
    ("AR", "Arkansas"),
    ("AS", "American Samoa"),
    ("AZ", "Arizona"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DC", "District of Columbia"),
    ("DE", "Delaware"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("GU", "Guam"),
    ("HI", "Hawaii"),
    ("IA", "Iowa"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("MA", "Massachusetts"),
    ("MD", "Maryland"),
    ("ME", "Maine"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MO", "Missouri"),
    ("MP", "Northern Mariana Islands"),
    ("MS", "Mississippi"),
    ("MT", "Montana"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("NE", "Nebraska"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NV", "Nevada"),
    ("NY", "New York"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("PR", "Puerto Rico"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VA", "Virginia"),
    ("VI", "Virgin Islands"),
    ("VT", "Vermont"),
    ("WA", "Washington"),
    ("WI", "Wisconsin"),
    ("WV", "West Virginia"),
    ("WY", "Wyoming"),
];

/// Returns every `(code, name)` pair, ordered by code.
#[must_use]
pub fn states() -> &'static [(&'static str, &'static str)] {
    &STATES
}

/// Looks up the full name for a region code.
///
/// The lookup is case-insensitive and ignores surrounding whitespace.
/// Returns `None` for codes outside the directory.
#[must_use]
pub fn state_name(code: &str) -> Option<&'static str> {
    find(code).map(|index| STATES[index].1)
}

fn find(code: &str) -> Option<usize> {
    let normalized: String = code.trim().to_uppercase();
    STATES
        .binary_search_by(|(candidate, _)| (*candidate).cmp(normalized.as_str()))
        .ok()
}

/// A validated region code drawn from the state directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateCode {
    code: &'static str,
    name: &'static str,
}

impl StateCode {
    /// Parses a region code against the state directory.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStateCode` if the code is not in the directory.
    pub fn parse(code: &str) -> Result<Self, DomainError> {
        let index: usize =
            find(code).ok_or_else(|| DomainError::InvalidStateCode(code.to_string()))?;
        let (code, name) = STATES[index];
        Ok(Self { code, name })
    }

    /// The two-letter code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }

    /// The full region name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl std::fmt::Display for StateCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code)
    }
}

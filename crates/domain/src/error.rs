// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A date string did not match `MM/DD/YYYY` or named an impossible date.
    InvalidDateFormat {
        /// The rejected input.
        input: String,
        /// Why the input was rejected.
        reason: String,
    },
    /// A date could not be rendered in storage format.
    DateFormatting {
        /// The formatter error message.
        reason: String,
    },
    /// Region code is not part of the state directory.
    InvalidStateCode(String),
    /// Site type code is not recognized.
    InvalidSiteType(String),
    /// Record locator is empty or contains invalid characters.
    InvalidRecordLocator(String),
    /// Site slug is empty or contains invalid characters.
    InvalidSlug(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDateFormat { input, reason } => {
                write!(
                    f,
                    "Invalid date '{input}': {reason}. Expected format MM/DD/YYYY"
                )
            }
            Self::DateFormatting { reason } => write!(f, "Failed to format date: {reason}"),
            Self::InvalidStateCode(code) => write!(f, "Unknown state code: '{code}'"),
            Self::InvalidSiteType(code) => write!(f, "Unknown site type: '{code}'"),
            Self::InvalidRecordLocator(msg) => write!(f, "Invalid record locator: {msg}"),
            Self::InvalidSlug(msg) => write!(f, "Invalid site slug: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}

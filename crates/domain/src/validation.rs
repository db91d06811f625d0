// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Validates a site slug.
///
/// Slugs are lowercase ASCII letters, digits and single hyphens, and may
/// not start or end with a hyphen.
///
/// # Errors
///
/// Returns `DomainError::InvalidSlug` if the slug breaks any of these rules.
pub fn validate_slug(slug: &str) -> Result<(), DomainError> {
    if slug.is_empty() {
        return Err(DomainError::InvalidSlug(String::from(
            "Slug cannot be empty",
        )));
    }

    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(DomainError::InvalidSlug(format!(
            "'{slug}' may only contain lowercase letters, digits and hyphens"
        )));
    }

    if slug.starts_with('-') || slug.ends_with('-') || slug.contains("--") {
        return Err(DomainError::InvalidSlug(format!(
            "'{slug}' has a leading, trailing or doubled hyphen"
        )));
    }

    Ok(())
}

/// Validates a site display name.
///
/// # Errors
///
/// Returns `DomainError::InvalidSlug` naming the site if the display name is blank.
pub fn validate_site_name(slug: &str, name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidSlug(format!(
            "Site '{slug}' has an empty name"
        )));
    }
    Ok(())
}

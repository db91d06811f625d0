// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session-based authentication for operators.

use ekip_domain::format_timestamp;
use ekip_persistence::{OperatorData, Persistence, PersistenceError, SessionData};
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::error::AuthError;

/// Where a login with no usable `next` target lands.
pub const DEFAULT_LOGIN_REDIRECT: &str = "/redeem/";

/// The login page path.
pub const LOGIN_PATH: &str = "/accounts/login/";

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session lifetime.
    pub const DEFAULT_SESSION_LIFETIME: Duration = Duration::days(14);

    /// Authenticates an operator and creates a session.
    ///
    /// Unknown login names and wrong passwords produce the same error so
    /// the response does not reveal which accounts exist.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `login_name` - The operator login name (case-insensitive)
    /// * `password` - The plain-text password
    /// * `session_lifetime` - How long the new session stays valid
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `operator_data`)
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are wrong, the operator is
    /// disabled, or the session cannot be stored.
    pub fn login(
        persistence: &mut Persistence,
        login_name: &str,
        password: &str,
        session_lifetime: Duration,
    ) -> Result<(String, OperatorData), AuthError> {
        let invalid_credentials = || AuthError::AuthenticationFailed {
            reason: String::from("Invalid login name or password"),
        };

        let operator: OperatorData = persistence
            .get_operator_by_login(login_name)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| {
                debug!(login_name, "Login attempt for unknown operator");
                invalid_credentials()
            })?;

        let password_ok: bool = Persistence::verify_password(password, &operator.password_hash)
            .map_err(Self::map_persistence_error)?;
        if !password_ok {
            warn!(login_name = %operator.login_name, "Login rejected: wrong password");
            return Err(invalid_credentials());
        }

        if operator.is_disabled {
            warn!(login_name = %operator.login_name, "Login rejected: operator disabled");
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Operator is disabled"),
            });
        }

        let session_token: String = Self::generate_session_token();
        let expires_at: String = format_timestamp(OffsetDateTime::now_utc() + session_lifetime)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to format expiration time: {e}"),
            })?;

        persistence
            .create_session(&session_token, operator.operator_id, &expires_at)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;

        persistence
            .update_last_login(operator.operator_id)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to update last login: {e}"),
            })?;

        info!(login_name = %operator.login_name, "Operator logged in");
        Ok((session_token, operator))
    }

    /// Validates a session token and returns the operator it belongs to.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is unknown or expired, or the
    /// operator has been disabled since it was created.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<OperatorData, AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        // Storage timestamps compare lexically.
        let now: String = format_timestamp(OffsetDateTime::now_utc()).map_err(|e| {
            AuthError::AuthenticationFailed {
                reason: format!("Failed to format current time: {e}"),
            }
        })?;
        if session.expires_at <= now {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let operator: OperatorData = persistence
            .get_operator_by_id(session.operator_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Operator not found"),
            })?;

        if operator.is_disabled {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Operator is disabled"),
            });
        }

        persistence
            .update_session_activity(session.session_id)
            .map_err(Self::map_persistence_error)?;

        Ok(operator)
    }

    /// Logs out by deleting the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the logout fails.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })?;

        Ok(())
    }

    /// Generates an opaque 256-bit session token.
    fn generate_session_token() -> String {
        format!(
            "{:032x}{:032x}",
            rand::random::<u128>(),
            rand::random::<u128>()
        )
    }

    /// Maps persistence errors to authentication errors.
    fn map_persistence_error(err: PersistenceError) -> AuthError {
        AuthError::AuthenticationFailed {
            reason: format!("Database error: {err}"),
        }
    }
}

/// Builds the login URL that returns the caller to `path_and_query` afterwards.
///
/// Each path segment is percent-encoded on its own, so the slashes of the
/// original path survive while `?`, `=` and `&` are escaped:
/// `/redeem/sites/?state=AZ` becomes
/// `/accounts/login/?next=/redeem/sites/%3Fstate%3DAZ`.
#[must_use]
pub fn login_url(path_and_query: &str) -> String {
    let encoded: Vec<String> = path_and_query
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();
    format!("{LOGIN_PATH}?next={}", encoded.join("/"))
}

/// Returns the post-login redirect target for a requested `next` value.
///
/// Only local absolute paths made of visible ASCII are honoured. Anything
/// that could leave the site (a scheme, a protocol-relative `//host`, a
/// backslash) falls back to the redemption page.
#[must_use]
pub fn safe_next(next: Option<&str>) -> String {
    match next.map(str::trim) {
        Some(target)
            if target.starts_with('/')
                && !target.starts_with("//")
                && !target.contains('\\')
                && target.bytes().all(|b| b.is_ascii_graphic()) =>
        {
            target.to_string()
        }
        _ => String::from(DEFAULT_LOGIN_REDIRECT),
    }
}

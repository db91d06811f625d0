// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction and authentication for the server.
//!
//! Pages behind authentication take a `SessionOperator` argument. A request
//! without a valid `sessionid` cookie is redirected to the login page with
//! its original path and query in `next`.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, HeaderValue, StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use ekip_api::{AuthenticationService, login_url};
use ekip_persistence::OperatorData;
use time::Duration;
use tracing::{debug, warn};

use crate::AppState;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "sessionid";

/// Extractor for authenticated operators.
///
/// # Authentication Flow
///
/// 1. Read the `sessionid` cookie
/// 2. Validate it via `AuthenticationService::validate_session`
/// 3. Return the operator, or redirect to the login page
pub struct SessionOperator(pub OperatorData);

impl FromRequestParts<AppState> for SessionOperator {
    type Rejection = LoginRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let original: &str = parts
            .uri
            .path_and_query()
            .map_or_else(|| parts.uri.path(), |pq| pq.as_str());
        let redirect = || LoginRedirect {
            location: login_url(original),
        };

        let Some(token) = session_token(&parts.headers) else {
            debug!(path = %original, "No session cookie, redirecting to login");
            return Err(redirect());
        };

        let mut persistence = state.persistence.lock().await;
        let operator: OperatorData = AuthenticationService::validate_session(&mut persistence, &token)
            .map_err(|e| {
                warn!(error = %e, "Session validation failed");
                redirect()
            })?;

        debug!(login_name = %operator.login_name, "Session validated");
        Ok(Self(operator))
    }
}

/// Rejection sending the caller to the login page.
#[derive(Debug)]
pub struct LoginRedirect {
    /// The login URL, carrying the original request in `next`.
    pub location: String,
}

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        found(&self.location)
    }
}

/// Builds a `302 Found` redirect.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

/// Returns the session token from the request's cookies, if any.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Builds the `Set-Cookie` value that stores a session token.
///
/// # Errors
///
/// Returns an error if the token contains bytes not allowed in a header.
pub fn session_cookie(
    token: &str,
    lifetime: Duration,
) -> Result<HeaderValue, header::InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        lifetime.whole_seconds()
    ))
}

/// Builds the `Set-Cookie` value that removes the session cookie.
pub const fn cleared_session_cookie() -> HeaderValue {
    HeaderValue::from_static("sessionid=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use ekip_api::{ApiError, AuthError};
use minijinja::context;
use tracing::{error, warn};

use crate::pages::render_string;

/// HTTP error wrapper that implements `IntoResponse`.
///
/// Errors render as an HTML page carrying the status code.
#[derive(Debug)]
pub struct HttpError {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error message.
    pub message: String,
}

impl HttpError {
    pub const fn new(status: StatusCode, message: String) -> Self {
        Self { status, message }
    }

    pub const fn internal(message: String) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    fn title(&self) -> &'static str {
        match self.status {
            StatusCode::BAD_REQUEST => "Invalid request",
            StatusCode::UNAUTHORIZED => "Not signed in",
            StatusCode::NOT_FOUND => "Not found",
            _ => "Something went wrong",
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let page = render_string(
            "error.html",
            context! { title => self.title(), message => &self.message },
        );
        match page {
            Ok(body) => (self.status, Html(body)).into_response(),
            Err(e) => {
                error!(error = %e, "Failed to render error page");
                (self.status, self.message).into_response()
            }
        }
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(error = %err, "Request failed");
        } else {
            warn!(error = %err, "Request rejected");
        }
        Self::new(status, err.to_string())
    }
}

impl From<AuthError> for HttpError {
    fn from(err: AuthError) -> Self {
        Self::from(ApiError::from(err))
    }
}

//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for the HTTP surface. Route handlers
//! convert service errors into `AppError` and attach the notices the
//! operation produced, so a failed request still carries its toast.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use tidepool_core::{PageTarget, Username};

use crate::notify::Notice;
use crate::services::{AuthError, CartError, ContactError};

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Account operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Cart or purchase operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Contact form submission failed.
    #[error("Contact error: {0}")]
    Contact(#[from] ContactError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON body of an error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    notices: Vec<Notice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect: Option<PageTarget>,
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Auth(err) => match err {
                AuthError::MissingFields => StatusCode::BAD_REQUEST,
                AuthError::DuplicateAccount(_) => StatusCode::CONFLICT,
                AuthError::AccountNotFound => StatusCode::NOT_FOUND,
                AuthError::BadCredentials => StatusCode::UNAUTHORIZED,
                AuthError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Cart(err) => match err {
                CartError::AuthRequired => StatusCode::UNAUTHORIZED,
                CartError::EmptyCart | CartError::TotalTooLarge(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                CartError::NoSuchLine { .. } => StatusCode::NOT_FOUND,
                CartError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Contact(err) => match err {
                ContactError::MissingFields => StatusCode::BAD_REQUEST,
                ContactError::Rejected { .. } | ContactError::Http(_) => StatusCode::BAD_GATEWAY,
                ContactError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Where the client should go next, if anywhere.
    #[must_use]
    pub fn redirect(&self) -> Option<PageTarget> {
        matches!(self, Self::Cart(CartError::AuthRequired)).then(PageTarget::login)
    }

    /// Build the response, carrying the notices shown during the request.
    #[must_use]
    pub fn with_notices(self, notices: Vec<Notice>) -> Response {
        let status = self.status_code();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let error = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorBody {
            error,
            notices,
            redirect: self.redirect(),
        };

        (status, Json(body)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.with_notices(Vec::new())
    }
}

/// Set the Sentry user context after a successful login.
pub fn set_sentry_user(username: &Username) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            username: Some(username.to_string()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

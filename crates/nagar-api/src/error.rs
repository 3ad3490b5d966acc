use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Request failures, rendered as `{"error": "<message>"}` with the
/// matching status code. Unknown-user and wrong-password logins must
/// stay indistinguishable, hence the generic credential messages.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("All fields are required.")]
    MissingFields,

    #[error("Username must be at least 3 characters.")]
    UsernameTooShort,

    #[error("Password must be at least 6 characters.")]
    PasswordTooShort,

    #[error("This username is reserved.")]
    ReservedUsername,

    #[error("Username already exists.")]
    UsernameTaken,

    #[error("Email already registered.")]
    EmailTaken,

    #[error("Username and password are required.")]
    MissingCredentials,

    #[error("Invalid credentials.")]
    InvalidCredentials,

    #[error("Invalid username or password.")]
    InvalidUsernameOrPassword,

    #[error("Invalid or expired session.")]
    InvalidSession,

    #[error("Administrator access required.")]
    AdminOnly,

    #[error("Title, description, division, district, and category are required.")]
    MissingReportFields,

    #[error("Report #{0} not found.")]
    ReportNotFound(u64),

    #[error("Internal server error.")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::MissingFields
            | Self::UsernameTooShort
            | Self::PasswordTooShort
            | Self::ReservedUsername
            | Self::MissingCredentials
            | Self::MissingReportFields => StatusCode::BAD_REQUEST,
            Self::UsernameTaken | Self::EmailTaken => StatusCode::CONFLICT,
            Self::InvalidCredentials | Self::InvalidUsernameOrPassword | Self::InvalidSession => {
                StatusCode::UNAUTHORIZED
            }
            Self::AdminOnly => StatusCode::FORBIDDEN,
            Self::ReportNotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(e) = &self {
            error!("Internal error: {:#}", e);
        }
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

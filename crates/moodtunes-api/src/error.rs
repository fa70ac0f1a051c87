use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use moodtunes_types::api::ErrorBody;

/// Identity-provider failures, reported with `auth/*` codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorCode {
    InvalidEmail,
    WeakPassword,
    EmailAlreadyInUse,
    UserNotFound,
    WrongPassword,
    UserDisabled,
    TooManyRequests,
    InvalidCredential,
}

impl AuthErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidEmail => "auth/invalid-email",
            Self::WeakPassword => "auth/weak-password",
            Self::EmailAlreadyInUse => "auth/email-already-in-use",
            Self::UserNotFound => "auth/user-not-found",
            Self::WrongPassword => "auth/wrong-password",
            Self::UserDisabled => "auth/user-disabled",
            Self::TooManyRequests => "auth/too-many-requests",
            Self::InvalidCredential => "auth/invalid-credential",
        }
    }

    fn message(self) -> &'static str {
        match self {
            Self::InvalidEmail => "The email address is badly formatted.",
            Self::WeakPassword => "Password should be at least 6 characters.",
            Self::EmailAlreadyInUse => "The email address is already in use by another account.",
            Self::UserNotFound => "There is no user record corresponding to this identifier.",
            Self::WrongPassword => "The password is invalid.",
            Self::UserDisabled => "The user account has been disabled.",
            Self::TooManyRequests => "Too many unsuccessful login attempts. Try again later.",
            Self::InvalidCredential => "The supplied credential is malformed.",
        }
    }

    fn status(self) -> StatusCode {
        match self {
            Self::InvalidEmail | Self::WeakPassword => StatusCode::BAD_REQUEST,
            Self::EmailAlreadyInUse => StatusCode::CONFLICT,
            Self::UserNotFound | Self::WrongPassword | Self::InvalidCredential => {
                StatusCode::UNAUTHORIZED
            }
            Self::UserDisabled => StatusCode::FORBIDDEN,
            Self::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{}", .0.message())]
    Auth(AuthErrorCode),

    #[error("Missing or insufficient permissions.")]
    PermissionDenied,

    #[error("Missing or invalid session token.")]
    Unauthenticated,

    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Auth(code) => code.as_str(),
            Self::PermissionDenied => "permission-denied",
            Self::Unauthenticated => "unauthenticated",
            Self::InvalidArgument(_) => "invalid-argument",
            Self::NotFound(_) => "not-found",
            Self::Internal(_) => "internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Auth(code) => code.status(),
            Self::PermissionDenied => StatusCode::FORBIDDEN,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AuthErrorCode> for ApiError {
    fn from(code: AuthErrorCode) -> Self {
        Self::Auth(code)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(e) = &self {
            error!("Internal error: {:#}", e);
        }
        let body = ErrorBody {
            code: self.code().to_string(),
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Run blocking DB work off the async runtime.
pub(crate) async fn blocking<F, T>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal(anyhow::anyhow!("blocking task failed"))
        })?
        .map_err(ApiError::Internal)
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Accounts service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum AccountsServiceError {
    #[error("{reason}")]
    Validation {
        field: &'static str,
        reason: &'static str,
    },
    #[error("account with this email does not exist")]
    AccountNotFound,
    #[error("no code has been issued for this account")]
    NoCodeIssued,
    #[error("invalid code")]
    CodeMismatch,
    #[error("code has already been used")]
    CodeAlreadyUsed,
    #[error("code has expired, request a new one")]
    CodeExpired,
    #[error("unable to authenticate with provided credentials")]
    InvalidCredentials,
    #[error("new password cannot be the same as old password")]
    PasswordUnchanged,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AccountsServiceError {
    pub fn validation(field: &'static str, reason: &'static str) -> Self {
        Self::Validation { field, reason }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION",
            Self::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Self::NoCodeIssued => "NO_CODE_ISSUED",
            Self::CodeMismatch => "CODE_MISMATCH",
            Self::CodeAlreadyUsed => "CODE_ALREADY_USED",
            Self::CodeExpired => "CODE_EXPIRED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::PasswordUnchanged => "PASSWORD_UNCHANGED",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Request field the error refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            Self::AccountNotFound => Some("email"),
            _ => None,
        }
    }
}

impl IntoResponse for AccountsServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation { .. }
            | Self::NoCodeIssued
            | Self::CodeMismatch
            | Self::CodeAlreadyUsed
            | Self::CodeExpired
            | Self::PasswordUnchanged => StatusCode::BAD_REQUEST,
            Self::AccountNotFound => StatusCode::NOT_FOUND,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        if let Some(field) = self.field() {
            body["field"] = field.into();
        }
        (status, axum::Json(body)).into_response()
    }
}

/// Why a notification could not be handed to the mail provider.
///
/// Kept apart from `AccountsServiceError`: a failed delivery never fails the
/// code request that triggered it.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("email delivery is not configured")]
    Disabled,
    #[error("mail provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("mail provider rejected the message with status {status}")]
    Rejected { status: u16 },
    #[error("mail provider did not answer within {0:?}")]
    TimedOut(std::time::Duration),
}

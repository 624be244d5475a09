use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AccountsServiceError;
use crate::state::AppState;
use crate::usecase::otp::{
    RequestCodeInput, RequestCodeUseCase, ResetPasswordInput, ResetPasswordUseCase,
};

// ── POST /user/reset-password-otp ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RequestCodeRequest {
    pub email: String,
}

/// Never carries the code itself.
#[derive(Serialize)]
pub struct RequestCodeResponse {
    pub message: &'static str,
    pub email: String,
    pub delivered: bool,
    #[serde(serialize_with = "elevate_core::serde::to_rfc3339_ms")]
    pub expires_at: DateTime<Utc>,
}

pub async fn request_code(
    State(state): State<AppState>,
    Json(body): Json<RequestCodeRequest>,
) -> Result<(StatusCode, Json<RequestCodeResponse>), AccountsServiceError> {
    let usecase = RequestCodeUseCase {
        accounts: state.account_directory(),
        codes: state.one_time_code_repo(),
        notifier: state.notifier.clone(),
        delivery_timeout: state.delivery_timeout,
    };
    let out = usecase
        .execute(RequestCodeInput { email: body.email })
        .await?;
    let response = RequestCodeResponse {
        message: out.message(),
        email: out.email,
        delivered: out.delivered,
        expires_at: out.expires_at,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

// ── POST /user/reset-password ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AccountsServiceError> {
    let usecase = ResetPasswordUseCase {
        accounts: state.account_directory(),
        codes: state.one_time_code_repo(),
    };
    usecase
        .execute(ResetPasswordInput {
            email: body.email,
            code: body.code,
            new_password: body.new_password,
        })
        .await?;
    Ok(Json(MessageResponse {
        message: "Password reset successfully.",
    }))
}

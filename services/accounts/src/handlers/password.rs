use axum::{Json, extract::State};
use serde::Deserialize;

use elevate_auth_types::identity::IdentityHeaders;

use crate::error::AccountsServiceError;
use crate::handlers::otp::MessageResponse;
use crate::state::AppState;
use crate::usecase::password::{ChangePasswordInput, ChangePasswordUseCase};

// ── PATCH /user/change-password ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

pub async fn change_password(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, AccountsServiceError> {
    let usecase = ChangePasswordUseCase {
        accounts: state.account_directory(),
    };
    usecase
        .execute(ChangePasswordInput {
            account_id: identity.account_id,
            old_password: body.old_password,
            new_password: body.new_password,
        })
        .await?;
    Ok(Json(MessageResponse {
        message: "Password changed successfully.",
    }))
}

use tracing::info;
use uuid::Uuid;

use crate::domain::repository::AccountDirectory;
use crate::domain::validation::{validate_changed_password, validate_current_password};
use crate::error::AccountsServiceError;

pub struct ChangePasswordInput {
    pub account_id: Uuid,
    pub old_password: String,
    pub new_password: String,
}

/// Authenticated password change: proves the current password, then replaces it.
pub struct ChangePasswordUseCase<A: AccountDirectory> {
    pub accounts: A,
}

impl<A: AccountDirectory> ChangePasswordUseCase<A> {
    pub async fn execute(&self, input: ChangePasswordInput) -> Result<(), AccountsServiceError> {
        validate_current_password(&input.old_password)?;
        validate_changed_password(&input.new_password)?;

        let account = self
            .accounts
            .find_by_id(input.account_id)
            .await?
            .ok_or(AccountsServiceError::AccountNotFound)?;

        if !self
            .accounts
            .verify_credentials(&account.email, &input.old_password)
            .await?
        {
            return Err(AccountsServiceError::InvalidCredentials);
        }

        if input.old_password == input.new_password {
            return Err(AccountsServiceError::PasswordUnchanged);
        }

        self.accounts
            .set_password(&account, &input.new_password)
            .await?;

        info!(account_id = %account.id, "password changed");
        Ok(())
    }
}

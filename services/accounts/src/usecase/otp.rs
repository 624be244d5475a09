use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::RngExt;
use tracing::{info, warn};

use crate::domain::repository::{AccountDirectory, Notifier, OneTimeCodeRepository};
use crate::domain::types::NewOneTimeCode;
use crate::domain::validation::{validate_code, validate_email, validate_new_password};
use crate::error::{AccountsServiceError, DeliveryError};

/// Upper bound on a single notifier call.
pub const DEFAULT_DELIVERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Uniform in [0, 999999], zero-padded to six digits.
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    format!("{:06}", rng.random_range(0..=999_999u32))
}

// ── RequestCode ──────────────────────────────────────────────────────────────

pub struct RequestCodeInput {
    pub email: String,
}

#[derive(Debug)]
pub struct RequestCodeOutput {
    pub email: String,
    pub delivered: bool,
    pub expires_at: DateTime<Utc>,
}

impl RequestCodeOutput {
    pub fn message(&self) -> &'static str {
        if self.delivered {
            "OTP sent successfully"
        } else {
            "Failed to send OTP"
        }
    }
}

pub struct RequestCodeUseCase<A, C, N>
where
    A: AccountDirectory,
    C: OneTimeCodeRepository,
    N: Notifier,
{
    pub accounts: A,
    pub codes: C,
    pub notifier: N,
    pub delivery_timeout: Duration,
}

impl<A, C, N> RequestCodeUseCase<A, C, N>
where
    A: AccountDirectory,
    C: OneTimeCodeRepository,
    N: Notifier,
{
    pub async fn execute(
        &self,
        input: RequestCodeInput,
    ) -> Result<RequestCodeOutput, AccountsServiceError> {
        self.execute_at(input, Utc::now()).await
    }

    pub async fn execute_at(
        &self,
        input: RequestCodeInput,
        now: DateTime<Utc>,
    ) -> Result<RequestCodeOutput, AccountsServiceError> {
        validate_email(&input.email)?;

        let account = self
            .accounts
            .find_by_email(&input.email)
            .await?
            .ok_or(AccountsServiceError::AccountNotFound)?;

        let code = NewOneTimeCode::new(account.id, generate_code(), now);
        let stored = self.codes.create_superseding(&code).await?;
        info!(account_id = %account.id, code_id = stored.id, "reset code issued");

        // The code stays valid whatever happens to the email.
        let delivery = tokio::time::timeout(
            self.delivery_timeout,
            self.notifier.send_code(&account.email, &stored.code),
        )
        .await
        .unwrap_or(Err(DeliveryError::TimedOut(self.delivery_timeout)));

        let delivered = match delivery {
            Ok(()) => true,
            Err(e) => {
                warn!(account_id = %account.id, code_id = stored.id, error = %e, "reset code delivery failed");
                false
            }
        };

        Ok(RequestCodeOutput {
            email: input.email,
            delivered,
            expires_at: stored.expires_at,
        })
    }
}

// ── ResetPassword ────────────────────────────────────────────────────────────

pub struct ResetPasswordInput {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

pub struct ResetPasswordUseCase<A, C>
where
    A: AccountDirectory,
    C: OneTimeCodeRepository,
{
    pub accounts: A,
    pub codes: C,
}

impl<A, C> ResetPasswordUseCase<A, C>
where
    A: AccountDirectory,
    C: OneTimeCodeRepository,
{
    pub async fn execute(&self, input: ResetPasswordInput) -> Result<(), AccountsServiceError> {
        self.execute_at(input, Utc::now()).await
    }

    pub async fn execute_at(
        &self,
        input: ResetPasswordInput,
        now: DateTime<Utc>,
    ) -> Result<(), AccountsServiceError> {
        validate_email(&input.email)?;
        validate_code(&input.code)?;
        validate_new_password(&input.new_password)?;

        let account = self
            .accounts
            .find_by_email(&input.email)
            .await?
            .ok_or(AccountsServiceError::AccountNotFound)?;

        // Only the newest code is ever checked; older ones are superseded.
        let latest = self
            .codes
            .find_latest(account.id)
            .await?
            .ok_or(AccountsServiceError::NoCodeIssued)?;

        latest.verify(&input.code, now)?;

        if !self.codes.redeem(&latest, &input.new_password, now).await? {
            return Err(AccountsServiceError::CodeAlreadyUsed);
        }

        info!(account_id = %account.id, code_id = latest.id, "password reset");
        Ok(())
    }
}

#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::types::{Account, NewOneTimeCode, OneTimeCode};
use crate::error::{AccountsServiceError, DeliveryError};

/// Account storage and credentials. Implementations hash passwords one-way.
pub trait AccountDirectory: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountsServiceError>;

    async fn exists(&self, email: &str) -> Result<bool, AccountsServiceError> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountsServiceError>;

    /// `Ok(false)` for an unknown email or a wrong password.
    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<bool, AccountsServiceError>;

    async fn set_password(
        &self,
        account: &Account,
        new_password: &str,
    ) -> Result<(), AccountsServiceError>;
}

/// Repository for password-reset codes.
pub trait OneTimeCodeRepository: Send + Sync {
    /// Insert a code and, in the same transaction, expire the account's older
    /// unconsumed codes as of the new code's `created_at`.
    async fn create_superseding(
        &self,
        code: &NewOneTimeCode,
    ) -> Result<OneTimeCode, AccountsServiceError>;

    /// Most recent code for the account (`created_at` desc, then `id` desc).
    async fn find_latest(
        &self,
        account_id: Uuid,
    ) -> Result<Option<OneTimeCode>, AccountsServiceError>;

    /// Atomically mark `code` used and set the owner's password.
    ///
    /// Returns `false` without touching the password when the code was
    /// consumed concurrently.
    async fn redeem(
        &self,
        code: &OneTimeCode,
        new_password: &str,
        used_at: DateTime<Utc>,
    ) -> Result<bool, AccountsServiceError>;
}

/// Outbound delivery of reset codes.
pub trait Notifier: Send + Sync {
    async fn send_code(&self, email: &str, code: &str) -> Result<(), DeliveryError>;
}

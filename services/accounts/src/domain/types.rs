use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::error::AccountsServiceError;

/// Account data the password flows need. The hash never leaves the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
}

/// A code about to be persisted; the store assigns its sequence id.
#[derive(Debug, Clone)]
pub struct NewOneTimeCode {
    pub account_id: Uuid,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl NewOneTimeCode {
    pub fn new(account_id: Uuid, code: String, now: DateTime<Utc>) -> Self {
        Self {
            account_id,
            code,
            created_at: now,
            expires_at: now + Duration::seconds(CODE_TTL_SECS),
        }
    }
}

/// Persisted password-reset code.
///
/// Only `used_at` is stored; "expired" is derived from the clock, so a code
/// can be both past its expiry and unused without contradiction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneTimeCode {
    /// Monotonic sequence; orders codes sharing a `created_at`.
    pub id: i64,
    pub account_id: Uuid,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeState {
    Active,
    Used,
    Expired,
}

impl OneTimeCode {
    /// The expiry instant itself is still valid.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn state_at(&self, now: DateTime<Utc>) -> CodeState {
        if self.used_at.is_some() {
            CodeState::Used
        } else if self.is_expired_at(now) {
            CodeState::Expired
        } else {
            CodeState::Active
        }
    }

    /// Checks a submitted code: mismatch, then already used, then expired.
    pub fn verify(&self, submitted: &str, now: DateTime<Utc>) -> Result<(), AccountsServiceError> {
        if self.code != submitted {
            return Err(AccountsServiceError::CodeMismatch);
        }
        match self.state_at(now) {
            CodeState::Active => Ok(()),
            CodeState::Used => Err(AccountsServiceError::CodeAlreadyUsed),
            CodeState::Expired => Err(AccountsServiceError::CodeExpired),
        }
    }
}

/// Number of digits in a reset code.
pub const CODE_LEN: usize = 6;

/// Reset code time-to-live in seconds (10 minutes).
pub const CODE_TTL_SECS: i64 = 600;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_PASSWORD_LEN: usize = 128;

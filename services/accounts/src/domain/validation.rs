//! Request field checks shared by the password flows.

use email_address::EmailAddress;

use crate::domain::types::{CODE_LEN, MAX_PASSWORD_LEN, MIN_PASSWORD_LEN};
use crate::error::AccountsServiceError;

pub fn validate_email(email: &str) -> Result<(), AccountsServiceError> {
    if EmailAddress::is_valid(email) {
        Ok(())
    } else {
        Err(AccountsServiceError::validation(
            "email",
            "enter a valid email address",
        ))
    }
}

/// A code is exactly `CODE_LEN` ASCII digits.
pub fn validate_code(code: &str) -> Result<(), AccountsServiceError> {
    if code.len() == CODE_LEN && code.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(AccountsServiceError::validation(
            "code",
            "code must be 6 digits",
        ))
    }
}

pub fn validate_new_password(password: &str) -> Result<(), AccountsServiceError> {
    let len = password.chars().count();
    if (MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
        Ok(())
    } else {
        Err(AccountsServiceError::validation(
            "new_password",
            "password must be between 6 and 128 characters",
        ))
    }
}

pub fn validate_current_password(password: &str) -> Result<(), AccountsServiceError> {
    validate_present_password("old_password", password)
}

/// A password change only bounds the new password from above.
pub fn validate_changed_password(password: &str) -> Result<(), AccountsServiceError> {
    validate_present_password("new_password", password)
}

fn validate_present_password(
    field: &'static str,
    password: &str,
) -> Result<(), AccountsServiceError> {
    if password.is_empty() || password.chars().count() > MAX_PASSWORD_LEN {
        Err(AccountsServiceError::validation(
            field,
            "password must be between 1 and 128 characters",
        ))
    } else {
        Ok(())
    }
}

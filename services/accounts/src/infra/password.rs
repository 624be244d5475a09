//! bcrypt hashing, run off the async workers.

use anyhow::Context as _;
use bcrypt::DEFAULT_COST;

pub async fn hash_password(password: &str) -> anyhow::Result<String> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, DEFAULT_COST))
        .await
        .context("join password hashing task")?
        .context("hash password")
}

/// A malformed stored hash counts as a mismatch.
pub async fn verify_password(password: &str, hash: &str) -> anyhow::Result<bool> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .context("join password verification task")?;
    Ok(verified.unwrap_or(false))
}

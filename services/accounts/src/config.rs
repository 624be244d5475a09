use std::time::Duration;

use serde::Deserialize;

use elevate_core::config::Config;

use crate::infra::notifier::SENDGRID_MAIL_SEND_URL;

/// Accounts service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct AccountsConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port to listen on (default 3112). Env var: `ACCOUNTS_PORT`.
    #[serde(default = "default_port")]
    pub accounts_port: u16,
    /// SendGrid API key. Without it, reset codes are stored but never emailed.
    #[serde(default)]
    pub sendgrid_api_key: Option<String>,
    #[serde(default = "default_sender")]
    pub sendgrid_sender_email: String,
    #[serde(default = "default_sendgrid_url")]
    pub sendgrid_api_url: String,
    /// Upper bound for one delivery attempt, in milliseconds (default 5000).
    #[serde(default = "default_notifier_timeout_ms")]
    pub notifier_timeout_ms: u64,
}

impl Config for AccountsConfig {}

impl AccountsConfig {
    pub fn notifier_timeout(&self) -> Duration {
        Duration::from_millis(self.notifier_timeout_ms)
    }
}

fn default_port() -> u16 {
    3112
}

fn default_sender() -> String {
    "no-reply@elevate.local".to_owned()
}

fn default_sendgrid_url() -> String {
    SENDGRID_MAIL_SEND_URL.to_owned()
}

fn default_notifier_timeout_ms() -> u64 {
    5000
}

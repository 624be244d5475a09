use anyhow::Context as _;
use sea_orm::Database;
use tracing::{info, warn};

use elevate_accounts::config::AccountsConfig;
use elevate_accounts::infra::notifier::{EmailNotifier, SendGridNotifier};
use elevate_accounts::router::build_router;
use elevate_accounts::state::AppState;
use elevate_core::config::Config;
use elevate_core::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AccountsConfig::try_from_env().context("load accounts config")?;

    let db = Database::connect(&config.database_url)
        .await
        .context("connect to database")?;

    let notifier = match config.sendgrid_api_key.clone() {
        Some(api_key) => EmailNotifier::SendGrid(
            SendGridNotifier::new(
                config.sendgrid_api_url.clone(),
                api_key,
                config.sendgrid_sender_email.clone(),
                config.notifier_timeout(),
            )
            .context("build SendGrid client")?,
        ),
        None => {
            warn!("SENDGRID_API_KEY not set, reset codes will not be emailed");
            EmailNotifier::Disabled
        }
    };

    let state = AppState {
        db,
        notifier,
        delivery_timeout: config.notifier_timeout(),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.accounts_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {addr}"))?;

    info!("accounts service listening on {addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}

use std::time::Duration;

use sea_orm::DatabaseConnection;

use crate::infra::db::{DbAccountDirectory, DbOneTimeCodeRepository};
use crate::infra::notifier::EmailNotifier;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub notifier: EmailNotifier,
    pub delivery_timeout: Duration,
}

impl AppState {
    pub fn account_directory(&self) -> DbAccountDirectory {
        DbAccountDirectory {
            db: self.db.clone(),
        }
    }

    pub fn one_time_code_repo(&self) -> DbOneTimeCodeRepository {
        DbOneTimeCodeRepository {
            db: self.db.clone(),
        }
    }
}

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use elevate_accounts_schema::{accounts, one_time_codes};

use crate::domain::repository::{AccountDirectory, OneTimeCodeRepository};
use crate::domain::types::{Account, NewOneTimeCode, OneTimeCode};
use crate::error::AccountsServiceError;
use crate::infra::password::{hash_password, verify_password};

// ── Account directory ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccountDirectory {
    pub db: DatabaseConnection,
}

impl DbAccountDirectory {
    async fn find_model_by_email(
        &self,
        email: &str,
    ) -> Result<Option<accounts::Model>, AccountsServiceError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find account by email")?;
        Ok(model)
    }
}

impl AccountDirectory for DbAccountDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountsServiceError> {
        Ok(self.find_model_by_email(email).await?.map(account_from_model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountsServiceError> {
        let model = accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find account by id")?;
        Ok(model.map(account_from_model))
    }

    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<bool, AccountsServiceError> {
        let Some(model) = self.find_model_by_email(email).await? else {
            return Ok(false);
        };
        Ok(verify_password(password, &model.password_hash).await?)
    }

    async fn set_password(
        &self,
        account: &Account,
        new_password: &str,
    ) -> Result<(), AccountsServiceError> {
        password_update(account.id, new_password, Utc::now())
            .await?
            .update(&self.db)
            .await
            .context("set account password")?;
        Ok(())
    }
}

/// Hashes `new_password` into an update touching only the credential columns.
async fn password_update(
    account_id: Uuid,
    new_password: &str,
    updated_at: DateTime<Utc>,
) -> anyhow::Result<accounts::ActiveModel> {
    let password_hash = hash_password(new_password).await?;
    Ok(accounts::ActiveModel {
        id: Set(account_id),
        password_hash: Set(password_hash),
        updated_at: Set(updated_at),
        ..Default::default()
    })
}

fn account_from_model(model: accounts::Model) -> Account {
    Account {
        id: model.id,
        email: model.email,
    }
}

// ── One-time code repository ─────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOneTimeCodeRepository {
    pub db: DatabaseConnection,
}

impl OneTimeCodeRepository for DbOneTimeCodeRepository {
    async fn create_superseding(
        &self,
        code: &NewOneTimeCode,
    ) -> Result<OneTimeCode, AccountsServiceError> {
        let code = code.clone();
        let model = self
            .db
            .transaction::<_, one_time_codes::Model, sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    one_time_codes::Entity::update_many()
                        .col_expr(one_time_codes::Column::ExpiresAt, Expr::value(code.created_at))
                        .filter(one_time_codes::Column::AccountId.eq(code.account_id))
                        .filter(one_time_codes::Column::UsedAt.is_null())
                        .filter(one_time_codes::Column::ExpiresAt.gt(code.created_at))
                        .exec(txn)
                        .await?;

                    one_time_codes::ActiveModel {
                        id: NotSet,
                        account_id: Set(code.account_id),
                        code: Set(code.code),
                        expires_at: Set(code.expires_at),
                        used_at: Set(None),
                        created_at: Set(code.created_at),
                    }
                    .insert(txn)
                    .await
                })
            })
            .await
            .context("create one-time code")?;
        Ok(code_from_model(model))
    }

    async fn find_latest(
        &self,
        account_id: Uuid,
    ) -> Result<Option<OneTimeCode>, AccountsServiceError> {
        let model = one_time_codes::Entity::find()
            .filter(one_time_codes::Column::AccountId.eq(account_id))
            .order_by_desc(one_time_codes::Column::CreatedAt)
            .order_by_desc(one_time_codes::Column::Id)
            .one(&self.db)
            .await
            .context("find latest one-time code")?;
        Ok(model.map(code_from_model))
    }

    async fn redeem(
        &self,
        code: &OneTimeCode,
        new_password: &str,
        used_at: DateTime<Utc>,
    ) -> Result<bool, AccountsServiceError> {
        // bcrypt runs outside the transaction.
        let update = password_update(code.account_id, new_password, used_at).await?;
        let code_id = code.id;

        let redeemed = self
            .db
            .transaction::<_, bool, sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    // Compare-and-set: only an unconsumed row can be claimed.
                    let claimed = one_time_codes::Entity::update_many()
                        .col_expr(one_time_codes::Column::UsedAt, Expr::value(used_at))
                        .filter(one_time_codes::Column::Id.eq(code_id))
                        .filter(one_time_codes::Column::UsedAt.is_null())
                        .exec(txn)
                        .await?;
                    if claimed.rows_affected == 0 {
                        return Ok(false);
                    }

                    update.update(txn).await?;
                    Ok(true)
                })
            })
            .await
            .context("redeem one-time code")?;
        Ok(redeemed)
    }
}

fn code_from_model(model: one_time_codes::Model) -> OneTimeCode {
    OneTimeCode {
        id: model.id,
        account_id: model.account_id,
        code: model.code,
        created_at: model.created_at,
        expires_at: model.expires_at,
        used_at: model.used_at,
    }
}

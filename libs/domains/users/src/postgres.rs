use async_trait::async_trait;
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, SqlErr, TransactionTrait,
};

use crate::{
    entity::{authority, user},
    error::{UserError, UserResult},
    models::Principal,
    repository::CredentialStore,
};

/// CredentialStore over the `users` and `authorities` tables
#[derive(Clone)]
pub struct PostgresCredentialStore {
    db: DatabaseConnection,
}

impl PostgresCredentialStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn insert_authorities<C: ConnectionTrait>(
        conn: &C,
        principal: &Principal,
    ) -> UserResult<()> {
        let rows = principal.authority_rows();
        if rows.is_empty() {
            return Ok(());
        }

        authority::Entity::insert_many(rows)
            .exec_without_returning(conn)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn exists(&self, username: &str) -> UserResult<bool> {
        let found = user::Entity::find_by_id(username.to_string())
            .one(&self.db)
            .await?;

        Ok(found.is_some())
    }

    async fn load(&self, username: &str) -> UserResult<Principal> {
        let model = user::Entity::find_by_id(username.to_string())
            .one(&self.db)
            .await?
            .ok_or_else(|| UserError::NotFound(username.to_string()))?;

        let authorities = authority::Entity::find()
            .filter(authority::Column::Username.eq(username))
            .all(&self.db)
            .await?;

        Ok(Principal::from_rows(model, authorities))
    }

    async fn create(&self, principal: Principal) -> UserResult<()> {
        let txn = self.db.begin().await?;
        let now = chrono::Utc::now();

        let row = user::ActiveModel {
            username: Set(principal.username.clone()),
            password: Set(principal.password_hash.clone()),
            enabled: Set(principal.enabled),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        // The primary key settles races between concurrent creates
        if let Err(e) = row.insert(&txn).await {
            return Err(match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    UserError::Conflict(principal.username)
                }
                _ => e.into(),
            });
        }

        Self::insert_authorities(&txn, &principal).await?;
        txn.commit().await?;

        tracing::info!(username = %principal.username, "Created principal");
        Ok(())
    }

    async fn update(&self, principal: Principal) -> UserResult<()> {
        let txn = self.db.begin().await?;

        let row = user::ActiveModel {
            username: Unchanged(principal.username.clone()),
            password: Set(principal.password_hash.clone()),
            enabled: Set(principal.enabled),
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        match row.update(&txn).await {
            Ok(_) => {}
            Err(DbErr::RecordNotUpdated) => return Err(UserError::NotFound(principal.username)),
            Err(e) => return Err(e.into()),
        }

        authority::Entity::delete_many()
            .filter(authority::Column::Username.eq(principal.username.as_str()))
            .exec(&txn)
            .await?;

        Self::insert_authorities(&txn, &principal).await?;
        txn.commit().await?;

        tracing::info!(username = %principal.username, "Updated principal");
        Ok(())
    }

    async fn delete(&self, username: &str) -> UserResult<()> {
        let txn = self.db.begin().await?;

        authority::Entity::delete_many()
            .filter(authority::Column::Username.eq(username))
            .exec(&txn)
            .await?;

        let result = user::Entity::delete_by_id(username.to_string())
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(UserError::NotFound(username.to_string()));
        }

        txn.commit().await?;

        tracing::info!(username = %username, "Deleted principal");
        Ok(())
    }

    async fn list_all(&self) -> UserResult<Vec<Principal>> {
        let rows = user::Entity::find()
            .find_with_related(authority::Entity)
            .order_by_asc(user::Column::Username)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(model, authorities)| Principal::from_rows(model, authorities))
            .collect())
    }
}

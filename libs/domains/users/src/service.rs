use std::sync::Arc;

use crate::error::{UserError, UserResult};
use crate::mapper;
use crate::models::{AuthenticatedUser, Principal, UserRecord};
use crate::password::{Argon2Hasher, PasswordHasher};
use crate::repository::CredentialStore;
use crate::validation::validate;

/// Account management use cases over a [`CredentialStore`]
#[derive(Clone)]
pub struct UserService<S: CredentialStore> {
    store: Arc<S>,
    hasher: Arc<dyn PasswordHasher>,
}

impl<S: CredentialStore> UserService<S> {
    /// Service hashing with [`Argon2Hasher::new`]
    pub fn new(store: S) -> Self {
        Self::with_hasher(store, Argon2Hasher::new())
    }

    pub fn with_hasher(store: S, hasher: impl PasswordHasher + 'static) -> Self {
        Self {
            store: Arc::new(store),
            hasher: Arc::new(hasher),
        }
    }

    /// Hash on the blocking pool; Argon2 is deliberately slow
    async fn hash_password(&self, plaintext: &str) -> UserResult<String> {
        let hasher = Arc::clone(&self.hasher);
        let plaintext = plaintext.to_string();

        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| UserError::Internal(format!("hashing task failed: {}", e)))?
    }

    async fn verify_password(&self, plaintext: &str, hash: &str) -> UserResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        let plaintext = plaintext.to_string();
        let hash = hash.to_string();

        tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &hash))
            .await
            .map_err(|e| UserError::Internal(format!("verification task failed: {}", e)))?
    }

    async fn store_record(&self, record: &UserRecord) -> UserResult<Principal> {
        // validate() guarantees the password is present
        let password = record.password.as_deref().unwrap_or_default();
        let hash = self.hash_password(password).await?;
        Ok(mapper::to_principal(record, hash))
    }

    pub async fn create_user(&self, record: UserRecord) -> UserResult<UserRecord> {
        validate(&record)?;

        if self.store.exists(&record.username).await? {
            return Err(UserError::Conflict(record.username));
        }

        let principal = self.store_record(&record).await?;
        self.store.create(principal).await?;

        tracing::info!(username = %record.username, "Created user");
        self.get_user(&record.username).await
    }

    pub async fn get_user(&self, username: &str) -> UserResult<UserRecord> {
        Ok(self.store.load(username).await?.into())
    }

    pub async fn list_users(&self) -> UserResult<Vec<UserRecord>> {
        let principals = self.store.list_all().await?;
        Ok(principals.into_iter().map(UserRecord::from).collect())
    }

    /// Replace password, enabled flag and roles of `username`.
    ///
    /// The body must repeat the path username: accounts cannot be renamed.
    pub async fn update_user(&self, username: &str, record: UserRecord) -> UserResult<UserRecord> {
        self.store.load(username).await?;

        if record.username != username {
            return Err(UserError::InvalidUser(format!(
                "Username {} cannot be changed",
                username
            )));
        }

        validate(&record)?;

        let principal = self.store_record(&record).await?;
        self.store.update(principal).await?;

        tracing::info!(username = %username, "Updated user");
        self.get_user(username).await
    }

    pub async fn delete_user(&self, username: &str) -> UserResult<()> {
        if !self.store.exists(username).await? {
            return Err(UserError::NotFound(username.to_string()));
        }

        self.store.delete(username).await?;

        tracing::info!(username = %username, "Deleted user");
        Ok(())
    }

    /// Create an enabled account unless `username` already exists.
    ///
    /// Returns whether an account was created. Existing accounts are left untouched.
    pub async fn ensure_user(
        &self,
        username: &str,
        password: &str,
        roles: &[&str],
    ) -> UserResult<bool> {
        if self.store.exists(username).await? {
            tracing::debug!(username = %username, "Account already present");
            return Ok(false);
        }

        let record = UserRecord::new(username, password, true, roles.iter().copied());
        match self.create_user(record).await {
            Ok(_) => Ok(true),
            // Lost a race with another instance seeding the same account
            Err(UserError::Conflict(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Check Basic credentials; every failure collapses into `Unauthorized`
    /// except backend errors.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> UserResult<AuthenticatedUser> {
        let principal = match self.store.load(username).await {
            Ok(principal) => principal,
            Err(UserError::NotFound(_)) => return Err(UserError::Unauthorized),
            Err(e) => return Err(e),
        };

        if !principal.enabled {
            tracing::info!(username = %username, "Rejected login for disabled account");
            return Err(UserError::Unauthorized);
        }

        if !self.verify_password(password, &principal.password_hash).await? {
            return Err(UserError::Unauthorized);
        }

        Ok(AuthenticatedUser {
            roles: mapper::to_roles(&principal.authorities),
            username: principal.username,
        })
    }
}

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::Principal;

/// Persistence of principals keyed by username
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn exists(&self, username: &str) -> UserResult<bool>;

    /// `NotFound` when the username is absent
    async fn load(&self, username: &str) -> UserResult<Principal>;

    /// `Conflict` when the username is already taken
    async fn create(&self, principal: Principal) -> UserResult<()>;

    /// Replace password, enabled flag and the whole authority set.
    /// `NotFound` when the username is absent.
    async fn update(&self, principal: Principal) -> UserResult<()>;

    /// Remove the principal with its authorities; `NotFound` when absent
    async fn delete(&self, username: &str) -> UserResult<()>;

    /// Every principal, ordered by username
    async fn list_all(&self) -> UserResult<Vec<Principal>>;
}

/// In-memory implementation of CredentialStore (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCredentialStore {
    principals: Arc<RwLock<BTreeMap<String, Principal>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn exists(&self, username: &str) -> UserResult<bool> {
        Ok(self.principals.read().await.contains_key(username))
    }

    async fn load(&self, username: &str) -> UserResult<Principal> {
        self.principals
            .read()
            .await
            .get(username)
            .cloned()
            .ok_or_else(|| UserError::NotFound(username.to_string()))
    }

    async fn create(&self, principal: Principal) -> UserResult<()> {
        let mut principals = self.principals.write().await;

        if principals.contains_key(&principal.username) {
            return Err(UserError::Conflict(principal.username));
        }

        tracing::debug!(username = %principal.username, "Inserted principal");
        principals.insert(principal.username.clone(), principal);
        Ok(())
    }

    async fn update(&self, principal: Principal) -> UserResult<()> {
        let mut principals = self.principals.write().await;

        match principals.get_mut(&principal.username) {
            Some(existing) => {
                *existing = principal;
                Ok(())
            }
            None => Err(UserError::NotFound(principal.username)),
        }
    }

    async fn delete(&self, username: &str) -> UserResult<()> {
        self.principals
            .write()
            .await
            .remove(username)
            .map(|_| ())
            .ok_or_else(|| UserError::NotFound(username.to_string()))
    }

    async fn list_all(&self) -> UserResult<Vec<Principal>> {
        Ok(self.principals.read().await.values().cloned().collect())
    }
}

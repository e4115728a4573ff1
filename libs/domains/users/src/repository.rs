use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User};

/// User persistence.
///
/// `insert` commits before returning and fails with [`UserError::Duplicate`]
/// when the email or username is already taken, leaving nothing behind.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: NewUser) -> UserResult<User>;

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;
}

#[derive(Debug, Default)]
struct Store {
    last_id: i32,
    rows: BTreeMap<i32, User>,
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.store.read().await.rows.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: NewUser) -> UserResult<User> {
        let mut store = self.store.write().await;

        let taken = store
            .rows
            .values()
            .any(|u| u.email == user.email || u.username == user.username);
        if taken {
            return Err(UserError::Duplicate);
        }

        let id = store
            .last_id
            .checked_add(1)
            .ok_or_else(|| UserError::Internal("user id sequence exhausted".to_string()))?;
        store.last_id = id;

        let user = User {
            id,
            email: user.email,
            username: user.username,
            password_hash: user.password_hash,
        };
        store.rows.insert(id, user.clone());

        tracing::info!(user_id = id, "Registered user");
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store.rows.values().find(|u| u.email == email).cloned())
    }
}

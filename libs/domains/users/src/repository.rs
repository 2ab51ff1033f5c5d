use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::User;

/// Repository trait for User persistence
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user
    async fn insert(&self, user: User) -> UserResult<User>;

    /// Get a user by ID
    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Get a user by username (exact, case-sensitive match)
    async fn find_by_username(&self, username: &str) -> UserResult<Option<User>>;

    /// List all users
    async fn find_all(&self) -> UserResult<Vec<User>>;

    /// Overwrite an existing user
    async fn update(&self, user: User) -> UserResult<User>;

    /// Hard-delete a user by ID; returns whether a row was removed
    async fn delete(&self, id: Uuid) -> UserResult<bool>;

    /// Check if a username is already taken
    async fn username_exists(&self, username: &str) -> UserResult<bool>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        // Mirrors the store's unique index: exact, case-sensitive match
        let username_taken = users.values().any(|u| u.username == user.username);
        if username_taken {
            return Err(UserError::DuplicateUsername(user.username));
        }

        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, username = %user.username, "Created user");
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_all(&self) -> UserResult<Vec<User>> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users.values().cloned().collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        Ok(result)
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(UserError::NotFound(format!("id:{}", user.id)));
        }

        // Username uniqueness is deliberately not re-checked here; update
        // overwrites whatever the caller sent.
        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, "Updated user");
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> UserResult<bool> {
        let mut users = self.users.write().await;

        if users.remove(&id).is_some() {
            tracing::info!(user_id = %id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn username_exists(&self, username: &str) -> UserResult<bool> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.username == username))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(username: &str) -> User {
        User::new(
            username.to_string(),
            "hashed_password".to_string(),
            "Tokyo".to_string(),
        )
    }

    #[tokio::test]
    async fn test_insert_and_find_by_id() {
        let repo = InMemoryUserRepository::new();

        let created = repo.insert(sample_user("alice01")).await.unwrap();
        assert_eq!(created.username, "alice01");

        let fetched = repo.find_by_id(created.id).await.unwrap();
        assert!(fetched.is_some());
        assert_eq!(fetched.unwrap().id, created.id);
    }

    #[tokio::test]
    async fn test_find_by_username_is_case_sensitive() {
        let repo = InMemoryUserRepository::new();
        repo.insert(sample_user("alice01")).await.unwrap();

        let fetched = repo.find_by_username("alice01").await.unwrap();
        assert!(fetched.is_some());

        let fetched = repo.find_by_username("ALICE01").await.unwrap();
        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_error() {
        let repo = InMemoryUserRepository::new();

        repo.insert(sample_user("alice01")).await.unwrap();

        let result = repo.insert(sample_user("alice01")).await;
        assert!(matches!(result, Err(UserError::DuplicateUsername(_))));
    }

    #[tokio::test]
    async fn test_find_all_empty_store() {
        let repo = InMemoryUserRepository::new();
        let all = repo.find_all().await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn test_delete_returns_false_for_missing_id() {
        let repo = InMemoryUserRepository::new();

        let created = repo.insert(sample_user("alice01")).await.unwrap();
        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_does_not_recheck_uniqueness() {
        let repo = InMemoryUserRepository::new();

        let alice = repo.insert(sample_user("alice01")).await.unwrap();
        repo.insert(sample_user("bobby01")).await.unwrap();

        // Renaming alice to bobby01 is accepted by this layer; collision
        // detection on update is a known gap in the contract.
        let mut renamed = alice.clone();
        renamed.username = "bobby01".to_string();
        let result = repo.update(renamed).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_missing_user_is_not_found() {
        let repo = InMemoryUserRepository::new();

        let result = repo.update(sample_user("ghosty1")).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }
}

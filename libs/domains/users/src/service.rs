use std::sync::Arc;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, SanitizedUser, UpdateUser, User};
use crate::password;
use crate::repository::UserRepository;

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new user with password hashing.
    ///
    /// Fails with `DuplicateUsername` when the username is already taken
    /// (exact match) and with `Validation` when either field breaks the
    /// schema.
    pub async fn create_user(&self, input: CreateUser) -> UserResult<SanitizedUser> {
        validate_input(&input)?;

        // The required rules above guarantee both fields are present
        let username = input.username.unwrap_or_default();
        let password = input.password.unwrap_or_default();

        if self.repository.username_exists(&username).await? {
            return Err(UserError::DuplicateUsername(username));
        }

        let password_hash = password::hash(&password)?;
        let user = User::new(username, password_hash, input.address);

        let created = self.repository.insert(user).await?;
        Ok(created.into())
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: Uuid) -> UserResult<SanitizedUser> {
        let user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UserError::NotFound(format!("id:{}", id)))?;

        Ok(user.into())
    }

    /// List all users; an empty store yields an empty list
    pub async fn list_users(&self) -> UserResult<Vec<SanitizedUser>> {
        let users = self.repository.find_all().await?;
        Ok(users.into_iter().map(|u| u.into()).collect())
    }

    /// Update a user, overwriting username, password and address.
    ///
    /// The supplied password is re-hashed unconditionally, even when the
    /// caller intends no change; resend the current password to keep it.
    /// Username uniqueness is not re-checked here (known contract gap).
    pub async fn update_user(&self, id: Uuid, input: UpdateUser) -> UserResult<SanitizedUser> {
        validate_input(&input)?;

        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UserError::NotFound(format!("id:{}", id)))?;

        // The required rules above guarantee both fields are present
        let username = input.username.unwrap_or_default();
        let password = input.password.unwrap_or_default();

        let password_hash = password::hash(&password)?;
        user.apply_update(username, password_hash, input.address);

        let updated = self.repository.update(user).await?;
        Ok(updated.into())
    }

    /// Hard-delete a user
    pub async fn delete_user(&self, id: Uuid) -> UserResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(UserError::NotFound(format!("id:{}", id)));
        }

        Ok(())
    }

    /// Check a password for an existing username.
    ///
    /// Fails with `NotFound` when the username is absent; a wrong password
    /// is `Ok(false)`, never an error.
    pub async fn pass_check(&self, username: &str, candidate: &str) -> UserResult<bool> {
        let user = self
            .repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| UserError::NotFound(username.to_string()))?;

        password::verify(candidate, &user.password_hash)
    }
}

/// Run schema validation, aggregating every violated rule into one error.
fn validate_input<T: Validate>(input: &T) -> UserResult<()> {
    input
        .validate()
        .map_err(|errors| UserError::Validation(aggregate_violations(&errors)))
}

fn aggregate_violations(errors: &ValidationErrors) -> String {
    let mut violations: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{}: {}", field, e.code),
            })
        })
        .collect();

    violations.sort();
    violations.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryUserRepository;

    fn service() -> UserService<InMemoryUserRepository> {
        UserService::new(InMemoryUserRepository::new())
    }

    fn create_input(username: &str, password: &str, address: &str) -> CreateUser {
        CreateUser {
            username: Some(username.to_string()),
            password: Some(password.to_string()),
            address: address.to_string(),
        }
    }

    fn update_input(username: &str, password: &str, address: &str) -> UpdateUser {
        UpdateUser {
            username: Some(username.to_string()),
            password: Some(password.to_string()),
            address: address.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_returns_sanitized_view() {
        let service = service();

        let created = service
            .create_user(create_input("alice01", "Passw0rd", "Tokyo"))
            .await
            .unwrap();

        assert!(!created.id.is_nil());
        assert_eq!(created.username, "alice01");
        assert_eq!(created.address, "Tokyo");

        let fetched = service.get_user(created.id).await.unwrap();
        assert_eq!(fetched.username, "alice01");
        assert_eq!(fetched.address, "Tokyo");
    }

    #[tokio::test]
    async fn test_duplicate_username_fails_regardless_of_other_fields() {
        let service = service();

        service
            .create_user(create_input("alice01", "Passw0rd", "Tokyo"))
            .await
            .unwrap();

        let result = service
            .create_user(create_input("alice01", "Other_pass1", "Osaka"))
            .await;

        assert!(matches!(result, Err(UserError::DuplicateUsername(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_bad_schema_with_aggregate() {
        let service = service();

        let result = service.create_user(create_input("ab", "short", "")).await;

        match result {
            Err(UserError::Validation(msg)) => {
                assert!(msg.contains("username"));
                assert!(msg.contains("password"));
            }
            other => panic!("expected validation error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_pass_check_semantics() {
        let service = service();

        service
            .create_user(create_input("alice01", "Passw0rd", "Tokyo"))
            .await
            .unwrap();

        assert!(service.pass_check("alice01", "Passw0rd").await.unwrap());
        assert!(!service.pass_check("alice01", "WrongPass1").await.unwrap());

        let missing = service.pass_check("nobody99", "Passw0rd").await;
        assert!(matches!(missing, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_rehashes_password_and_overwrites_fields() {
        let service = service();

        let created = service
            .create_user(create_input("alice01", "Passw0rd", "Tokyo"))
            .await
            .unwrap();

        // Resending the same password keeps it working after the update
        let updated = service
            .update_user(created.id, update_input("alice01", "Passw0rd", "Osaka"))
            .await
            .unwrap();
        assert_eq!(updated.address, "Osaka");
        assert!(service.pass_check("alice01", "Passw0rd").await.unwrap());

        // Sending a different password changes future checks
        service
            .update_user(created.id, update_input("alice01", "NewPass_99", "Osaka"))
            .await
            .unwrap();
        assert!(!service.pass_check("alice01", "Passw0rd").await.unwrap());
        assert!(service.pass_check("alice01", "NewPass_99").await.unwrap());
    }

    #[tokio::test]
    async fn test_update_missing_id_is_not_found() {
        let service = service();

        let result = service
            .update_user(Uuid::now_v7(), update_input("alice01", "Passw0rd", "Tokyo"))
            .await;

        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_without_credentials_is_a_validation_error() {
        let service = service();

        let result = service
            .create_user(CreateUser {
                username: None,
                password: None,
                address: "Tokyo".to_string(),
            })
            .await;

        match result {
            Err(UserError::Validation(msg)) => {
                assert!(msg.contains("username is required"));
                assert!(msg.contains("password is required"));
            }
            other => panic!("expected validation error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_delete_then_read_is_not_found() {
        let service = service();

        let created = service
            .create_user(create_input("alice01", "Passw0rd", "Tokyo"))
            .await
            .unwrap();

        service.delete_user(created.id).await.unwrap();

        let read = service.get_user(created.id).await;
        assert!(matches!(read, Err(UserError::NotFound(_))));

        let delete_again = service.delete_user(created.id).await;
        assert!(matches!(delete_again, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_users_reflects_creates() {
        let service = service();

        assert!(service.list_users().await.unwrap().is_empty());

        service
            .create_user(create_input("alice01", "Passw0rd", "Tokyo"))
            .await
            .unwrap();
        service
            .create_user(create_input("bobby01", "Other_pass1", "Osaka"))
            .await
            .unwrap();

        let all = service.list_users().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().any(|u| u.username == "alice01"));
        assert!(all.iter().any(|u| u.username == "bobby01"));
    }
}

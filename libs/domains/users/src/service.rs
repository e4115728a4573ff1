//! User Service - registration

use axum::http::StatusCode;
use axum_helpers::{Payload, Violations};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::hasher::{Argon2Hasher, PasswordHashing};
use crate::models::{NewUser, RegisterUser};
use crate::repository::UserRepository;
use crate::rules::REGISTRATION_RULES;

pub const REGISTERED_MESSAGE: &str = "User registered successfully";

pub struct UserService<R: UserRepository, H: PasswordHashing = Argon2Hasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self::with_hasher(repository, Argon2Hasher)
    }
}

impl<R: UserRepository, H: PasswordHashing> UserService<R, H> {
    pub fn with_hasher(repository: R, hasher: H) -> Self {
        Self {
            repository: Arc::new(repository),
            hasher: Arc::new(hasher),
        }
    }

    pub fn validate(&self, input: &Map<String, Value>) -> Violations {
        parse(input).err().unwrap_or_default()
    }

    /// Hash the password and persist the user.
    ///
    /// Invalid input is rejected before hashing; a taken email or username
    /// yields [`UserError::Duplicate`].
    #[instrument(skip(self, input))]
    pub async fn register(&self, input: &Map<String, Value>) -> UserResult<Payload<()>> {
        let input = parse(input).map_err(UserError::Invalid)?;
        let password_hash = self.hasher.hash(&input.password)?;

        self.repository
            .insert(NewUser {
                email: input.email,
                username: input.username,
                password_hash,
            })
            .await?;

        Ok(Payload::message_only(StatusCode::CREATED, REGISTERED_MESSAGE))
    }
}

fn parse(input: &Map<String, Value>) -> Result<RegisterUser, Violations> {
    REGISTRATION_RULES.validate(input).into_result(())?;
    RegisterUser::from_fields(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::MockPasswordHashing;
    use crate::models::User;
    use crate::repository::MockUserRepository;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn alice() -> Map<String, Value> {
        body(json!({
            "email": "alice@example.com",
            "username": "alice",
            "password": "correct horse"
        }))
    }

    #[tokio::test]
    async fn test_register_stores_hash_not_plaintext() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_insert()
            .withf(|user| {
                user.email == "alice@example.com"
                    && user.username == "alice"
                    && user.password_hash != "correct horse"
                    && user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|user| {
                Ok(User {
                    id: 1,
                    email: user.email,
                    username: user.username,
                    password_hash: user.password_hash,
                })
            });

        let service = UserService::new(mock_repo);
        let payload = service.register(&alice()).await.unwrap();

        assert_eq!(payload.status(), StatusCode::CREATED);
        assert_eq!(payload.message(), Some(REGISTERED_MESSAGE));
    }

    #[tokio::test]
    async fn test_register_duplicate_propagates() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_insert()
            .returning(|_| Err(UserError::Duplicate));

        let service = UserService::new(mock_repo);
        assert!(matches!(
            service.register(&alice()).await,
            Err(UserError::Duplicate)
        ));
    }

    #[tokio::test]
    async fn test_register_invalid_input_skips_hashing() {
        let mut mock_hasher = MockPasswordHashing::new();
        mock_hasher.expect_hash().never();
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_insert().never();

        let service = UserService::with_hasher(mock_repo, mock_hasher);
        let result = service
            .register(&body(json!({"email": "nope", "username": "al", "password": "short"})))
            .await;

        match result {
            Err(UserError::Invalid(violations)) => assert_eq!(violations.len(), 3),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_hash_failure_persists_nothing() {
        let mut mock_hasher = MockPasswordHashing::new();
        mock_hasher
            .expect_hash()
            .returning(|_| Err(UserError::PasswordHash("out of memory".into())));
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_insert().never();

        let service = UserService::with_hasher(mock_repo, mock_hasher);
        assert!(matches!(
            service.register(&alice()).await,
            Err(UserError::PasswordHash(_))
        ));
    }

    #[test]
    fn test_validate_messages() {
        let service = UserService::new(MockUserRepository::new());
        let violations = service.validate(&body(json!({
            "email": "not-an-email",
            "username": "",
            "password": "correct horse"
        })));

        assert_eq!(
            violations.messages_for("email"),
            vec!["This value is not a valid email address."]
        );
        assert_eq!(
            violations.messages_for("username"),
            vec![
                "This value is too short. It should have 4 characters or more.",
                "This value should not be blank."
            ]
        );
        assert!(violations.messages_for("password").is_empty());
    }
}

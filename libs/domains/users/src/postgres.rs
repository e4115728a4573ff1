use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, SqlErr,
};

use crate::{
    entity,
    error::{UserError, UserResult},
    models::{NewUser, User},
    repository::UserRepository,
};

/// PostgreSQL implementation of UserRepository
///
/// Uniqueness is enforced by the `users` table constraints.
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn map_insert_error(err: DbErr) -> UserError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::info!(%detail, "Rejected duplicate user");
            UserError::Duplicate
        }
        _ => UserError::Database(err),
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert(&self, user: NewUser) -> UserResult<User> {
        let active_model: entity::ActiveModel = user.into();
        let model = active_model
            .insert(&self.db)
            .await
            .map_err(map_insert_error)?;

        tracing::info!(user_id = model.id, "Registered user");
        Ok(model.into())
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(model.map(User::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_insert_returns_stored_user() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![entity::Model {
                id: 1,
                email: "alice@example.com".into(),
                username: "alice".into(),
                password_hash: "$argon2id$stub".into(),
            }]])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let user = repo
            .insert(NewUser {
                email: "alice@example.com".into(),
                username: "alice".into(),
                password_hash: "$argon2id$stub".into(),
            })
            .await
            .unwrap();

        assert_eq!(user.id, 1);
    }

    #[test]
    fn test_other_errors_are_database_errors() {
        assert!(matches!(
            map_insert_error(DbErr::Custom("connection reset".into())),
            UserError::Database(_)
        ));
    }
}

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DbBackend, FromQueryResult, Statement};
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::User;
use crate::repository::UserRepository;

/// PostgreSQL implementation of UserRepository using SeaORM
#[derive(Clone)]
pub struct PostgresUserRepository {
    db: sea_orm::DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: sea_orm::DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create the users table if it does not exist yet.
    ///
    /// The service carries no migration tooling; the schema is fixed and
    /// established once at startup.
    pub async fn ensure_schema(&self) -> UserResult<()> {
        let sql = r#"
            CREATE TABLE IF NOT EXISTS users (
                id UUID PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                address TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            )
        "#;

        self.db
            .execute_raw(Statement::from_string(DbBackend::Postgres, sql))
            .await
            .map_err(|e| UserError::Database(e.to_string()))?;

        Ok(())
    }
}

/// Helper struct for deserializing user rows from the database
#[derive(Debug, FromQueryResult)]
struct UserRow {
    id: Uuid,
    username: String,
    password_hash: String,
    address: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            address: row.address,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, user: User) -> UserResult<User> {
        let sql = r#"
            INSERT INTO users (id, username, password_hash, address, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
        "#;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                user.id.into(),
                user.username.clone().into(),
                user.password_hash.clone().into(),
                user.address.clone().into(),
                user.created_at.into(),
                user.updated_at.into(),
            ],
        );

        let row = UserRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| {
                let err_str = e.to_string();
                if err_str.contains("duplicate key") || err_str.contains("unique constraint") {
                    UserError::DuplicateUsername(user.username.clone())
                } else {
                    UserError::Database(err_str)
                }
            })?
            .ok_or_else(|| UserError::Database("Failed to create user".to_string()))?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let sql = "SELECT * FROM users WHERE id = $1";

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [id.into()]);

        let row = UserRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| UserError::Database(e.to_string()))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_username(&self, username: &str) -> UserResult<Option<User>> {
        let sql = "SELECT * FROM users WHERE username = $1";

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [username.into()]);

        let row = UserRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| UserError::Database(e.to_string()))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_all(&self) -> UserResult<Vec<User>> {
        let sql = "SELECT * FROM users ORDER BY created_at";

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, []);

        let rows = UserRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(|e| UserError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn update(&self, user: User) -> UserResult<User> {
        // Username uniqueness is deliberately not re-checked on update; a
        // collision still trips the unique index and surfaces as a
        // database error.
        let sql = r#"
            UPDATE users
            SET username = $2, password_hash = $3, address = $4, updated_at = $5
            WHERE id = $1
            RETURNING *
        "#;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                user.id.into(),
                user.username.clone().into(),
                user.password_hash.clone().into(),
                user.address.clone().into(),
                user.updated_at.into(),
            ],
        );

        let row = UserRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| UserError::Database(e.to_string()))?
            .ok_or_else(|| UserError::NotFound(format!("id:{}", user.id)))?;

        Ok(row.into())
    }

    async fn delete(&self, id: Uuid) -> UserResult<bool> {
        let sql = "DELETE FROM users WHERE id = $1";

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [id.into()]);

        let result = self
            .db
            .execute_raw(stmt)
            .await
            .map_err(|e| UserError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn username_exists(&self, username: &str) -> UserResult<bool> {
        let sql = "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1) AS taken";

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [username.into()]);

        #[derive(FromQueryResult)]
        struct Taken {
            taken: bool,
        }

        let row = Taken::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| UserError::Database(e.to_string()))?;

        Ok(row.map(|r| r.taken).unwrap_or(false))
    }
}

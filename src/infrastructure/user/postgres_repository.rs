//! PostgreSQL user repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::user::{PublicUser, Role, User, UserId, UserRepository};
use crate::domain::DomainError;

const PUBLIC_COLUMNS: &str = "id, name, email, role, created_at";
const CREDENTIAL_COLUMNS: &str = "id, name, email, password_hash, role, created_at";

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the users table if it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL DEFAULT 'user',
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create users table: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<PublicUser>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = $1", PUBLIC_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        row.as_ref().map(row_to_public_user).transpose()
    }

    async fn find_credentials_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE email = $1", CREDENTIAL_COLUMNS);

        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get user by email: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn create(&self, user: User) -> Result<PublicUser, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, role, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id().as_str())
        .bind(user.name())
        .bind(user.email())
        .bind(user.password_hash())
        .bind(user.role().as_str())
        .bind(user.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let unique_violation = e
                .as_database_error()
                .map(|db| db.is_unique_violation())
                .unwrap_or(false);

            if unique_violation {
                DomainError::conflict(format!("Email '{}' is already registered", user.email()))
            } else {
                DomainError::storage(format!("Failed to create user: {}", e))
            }
        })?;

        Ok(user.into_public())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete user: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count users: {}", e)))?;

        Ok(count as usize)
    }
}

struct StoredFields {
    id: UserId,
    name: String,
    email: String,
    role: Role,
    created_at: DateTime<Utc>,
}

fn read_common(row: &sqlx::postgres::PgRow) -> Result<StoredFields, DomainError> {
    let id: String = read_column(row, "id")?;
    let role: String = read_column(row, "role")?;

    Ok(StoredFields {
        id: UserId::new(&id)
            .map_err(|e| DomainError::storage(format!("Invalid user ID in database: {}", e)))?,
        name: read_column(row, "name")?,
        email: read_column(row, "email")?,
        role: role
            .parse()
            .map_err(|e| DomainError::storage(format!("Invalid role in database: {}", e)))?,
        created_at: read_column(row, "created_at")?,
    })
}

fn read_column<'r, T>(row: &'r sqlx::postgres::PgRow, column: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column)
        .map_err(|e| DomainError::storage(format!("Failed to read column '{}': {}", column, e)))
}

fn row_to_public_user(row: &sqlx::postgres::PgRow) -> Result<PublicUser, DomainError> {
    let fields = read_common(row)?;
    Ok(PublicUser::new(
        fields.id,
        fields.name,
        fields.email,
        fields.role,
        fields.created_at,
    ))
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> Result<User, DomainError> {
    let fields = read_common(row)?;
    let password_hash: String = read_column(row, "password_hash")?;

    Ok(User::from_parts(
        fields.id,
        fields.name,
        fields.email,
        password_hash,
        fields.role,
        fields.created_at,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_columns_exclude_password_hash() {
        assert!(!PUBLIC_COLUMNS.contains("password_hash"));
        assert!(CREDENTIAL_COLUMNS.contains("password_hash"));
    }

    #[test]
    fn test_role_roundtrip_through_storage_text() {
        for role in [Role::User, Role::Publisher] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }
}

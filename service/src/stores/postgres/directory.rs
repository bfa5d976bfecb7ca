//! PostgreSQL directory repository.

use super::{db_error, user_from_row};
use crate::error::Result;
use crate::model::{NewUser, Part, PartId, User, UserId};
use crate::providers::DirectoryRepository;
use sqlx::PgPool;

/// PostgreSQL directory store.
#[derive(Debug, Clone)]
pub struct PgDirectory {
    pool: PgPool,
}

impl PgDirectory {
    /// Create a directory store over a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run database migrations.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if migrations fail.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| {
                crate::error::ServiceError::Internal(format!("migration failed: {e}"))
            })?;
        Ok(())
    }
}

impl DirectoryRepository for PgDirectory {
    async fn find_user(&self, id: UserId) -> Result<Option<User>> {
        let row = sqlx::query(
            "SELECT id, full_name, phone, login, password_hash, role \
             FROM users WHERE id = $1",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find user", e))?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_user_by_login(&self, login: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            "SELECT id, full_name, phone, login, password_hash, role \
             FROM users WHERE login = $1",
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find user by login", e))?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn create_user(&self, user: NewUser) -> Result<User> {
        let row = sqlx::query(
            "INSERT INTO users (full_name, phone, login, password_hash, role) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, full_name, phone, login, password_hash, role",
        )
        .bind(&user.full_name)
        .bind(&user.phone)
        .bind(&user.login)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("create user", e))?;

        user_from_row(&row)
    }

    async fn upsert_part(&self, name: &str) -> Result<Part> {
        // DO UPDATE instead of DO NOTHING so RETURNING always yields the
        // surviving row.
        let row = sqlx::query(
            "INSERT INTO parts (name) VALUES ($1) \
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
             RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("upsert part", e))?;

        Ok(Part {
            id: PartId(super::read(&row, "id")?),
            name: super::read(&row, "name")?,
        })
    }
}

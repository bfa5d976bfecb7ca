//! PostgreSQL request repository.

use super::{db_error, read, request_from_row};
use crate::error::{Result, ServiceError};
use crate::model::{
    Comment, NewRequest, Part, RepairRequest, RequestId, RequestStatus, UserId,
};
use crate::providers::RequestRepository;
use sqlx::PgPool;

const REQUEST_COLUMNS: &str = "id, start_date, equipment_type, equipment_model, \
     problem_description, status, client_id, master_id, completion_date, \
     due_date, extended_due_date";

/// PostgreSQL request store.
#[derive(Debug, Clone)]
pub struct PgRequests {
    pool: PgPool,
}

impl PgRequests {
    /// Create a request store over a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl RequestRepository for PgRequests {
    async fn insert(&self, request: NewRequest) -> Result<RepairRequest> {
        let row = sqlx::query(&format!(
            "INSERT INTO requests \
                 (start_date, equipment_type, equipment_model, \
                  problem_description, status, client_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {REQUEST_COLUMNS}"
        ))
        .bind(request.start_date)
        .bind(&request.equipment_type)
        .bind(&request.equipment_model)
        .bind(&request.problem_description)
        .bind(RequestStatus::Open.as_str())
        .bind(request.client_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("insert request", e))?;

        request_from_row(&row)
    }

    async fn get(&self, id: RequestId) -> Result<Option<RepairRequest>> {
        let row = sqlx::query(&format!(
            "SELECT {REQUEST_COLUMNS} FROM requests WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("get request", e))?;

        row.as_ref().map(request_from_row).transpose()
    }

    async fn update(&self, request: &RepairRequest) -> Result<()> {
        let result = sqlx::query(
            "UPDATE requests SET \
                 problem_description = $2, status = $3, master_id = $4, \
                 completion_date = $5, extended_due_date = $6 \
             WHERE id = $1",
        )
        .bind(request.id.0)
        .bind(&request.problem_description)
        .bind(request.status.as_str())
        .bind(request.master_id.map(|m| m.0))
        .bind(request.completion_date)
        .bind(request.extended_due_date)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update request", e))?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::NotFound {
                what: "request",
                id: request.id.0,
            });
        }
        Ok(())
    }

    async fn list(&self, owner: Option<UserId>) -> Result<Vec<RepairRequest>> {
        let rows = match owner {
            Some(owner) => {
                sqlx::query(&format!(
                    "SELECT {REQUEST_COLUMNS} FROM requests \
                     WHERE client_id = $1 ORDER BY id ASC"
                ))
                .bind(owner.0)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(&format!(
                    "SELECT {REQUEST_COLUMNS} FROM requests ORDER BY id ASC"
                ))
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| db_error("list requests", e))?;

        rows.iter().map(request_from_row).collect()
    }

    async fn add_comment(
        &self,
        request_id: RequestId,
        author_id: UserId,
        message: &str,
    ) -> Result<Comment> {
        let row = sqlx::query(
            "INSERT INTO comments (request_id, author_id, message) \
             VALUES ($1, $2, $3) \
             RETURNING id, request_id, author_id, message, created_at",
        )
        .bind(request_id.0)
        .bind(author_id.0)
        .bind(message)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            // Foreign key failure means the request is gone.
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                ServiceError::NotFound {
                    what: "request",
                    id: request_id.0,
                }
            }
            _ => db_error("add comment", e),
        })?;

        Ok(Comment {
            id: read(&row, "id")?,
            request_id: RequestId(read(&row, "request_id")?),
            author_id: UserId(read(&row, "author_id")?),
            message: read(&row, "message")?,
            created_at: read(&row, "created_at")?,
        })
    }

    async fn comments(&self, request_id: RequestId) -> Result<Vec<Comment>> {
        let rows = sqlx::query(
            "SELECT id, request_id, author_id, message, created_at \
             FROM comments WHERE request_id = $1 ORDER BY id ASC",
        )
        .bind(request_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list comments", e))?;

        rows.iter()
            .map(|row| {
                Ok(Comment {
                    id: read(row, "id")?,
                    request_id: RequestId(read(row, "request_id")?),
                    author_id: UserId(read(row, "author_id")?),
                    message: read(row, "message")?,
                    created_at: read(row, "created_at")?,
                })
            })
            .collect()
    }

    async fn replace_parts(&self, request_id: RequestId, parts: &[Part]) -> Result<()> {
        // Delete-then-reinsert in one transaction: other readers see the
        // old set or the new set, never a partial one.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("replace parts", e))?;

        let exists = sqlx::query("SELECT 1 FROM requests WHERE id = $1")
            .bind(request_id.0)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| db_error("replace parts", e))?;
        if exists.is_none() {
            return Err(ServiceError::NotFound {
                what: "request",
                id: request_id.0,
            });
        }

        sqlx::query("DELETE FROM request_parts WHERE request_id = $1")
            .bind(request_id.0)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("replace parts", e))?;

        for part in parts {
            sqlx::query("INSERT INTO request_parts (request_id, part_id) VALUES ($1, $2)")
                .bind(request_id.0)
                .bind(part.id.0)
                .execute(&mut *tx)
                .await
                .map_err(|e| db_error("replace parts", e))?;
        }

        tx.commit().await.map_err(|e| db_error("replace parts", e))
    }

    async fn parts(&self, request_id: RequestId) -> Result<Vec<Part>> {
        let rows = sqlx::query(
            "SELECT p.id, p.name FROM parts p \
             JOIN request_parts rp ON rp.part_id = p.id \
             WHERE rp.request_id = $1 ORDER BY p.name ASC",
        )
        .bind(request_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list parts", e))?;

        rows.iter()
            .map(|row| {
                Ok(Part {
                    id: crate::model::PartId(read(row, "id")?),
                    name: read(row, "name")?,
                })
            })
            .collect()
    }
}

//! PostgreSQL repository implementations.
//!
//! One pool-backed struct per repository trait. Mutating operations run
//! inside a single transaction so a parts replacement or a combined
//! status + completion-date update is never observed half-applied.
//!
//! # Example
//!
//! ```no_run
//! use repairdesk_service::stores::postgres::{PgDirectory, PgRequests};
//! use sqlx::PgPool;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = PgPool::connect("postgresql://localhost/repairdesk").await?;
//! let directory = PgDirectory::new(pool.clone());
//! directory.migrate().await?;
//! let requests = PgRequests::new(pool);
//! # Ok(())
//! # }
//! ```

mod directory;
mod requests;

pub use directory::PgDirectory;
pub use requests::PgRequests;

use crate::error::ServiceError;
use crate::model::{RepairRequest, RequestId, RequestStatus, Role, User, UserId};
use sqlx::Row;
use sqlx::postgres::PgRow;

/// Map a store failure, folding unique violations into `Conflict`.
fn db_error(context: &str, error: sqlx::Error) -> ServiceError {
    if let sqlx::Error::Database(db_err) = &error {
        if db_err.is_unique_violation() {
            return ServiceError::Conflict(format!("{context}: already exists"));
        }
    }
    ServiceError::Internal(format!("{context}: {error}"))
}

fn user_from_row(row: &PgRow) -> Result<User, ServiceError> {
    Ok(User {
        id: UserId(read(row, "id")?),
        full_name: read(row, "full_name")?,
        phone: read(row, "phone")?,
        login: read(row, "login")?,
        password_hash: read(row, "password_hash")?,
        // Unrecognized legacy role text degrades to client.
        role: Role::parse_lossy(&read::<String>(row, "role")?),
    })
}

fn request_from_row(row: &PgRow) -> Result<RepairRequest, ServiceError> {
    let status_name: String = read(row, "status")?;
    let status = RequestStatus::parse(&status_name).ok_or_else(|| {
        ServiceError::Internal(format!("corrupt status in store: {status_name}"))
    })?;

    Ok(RepairRequest {
        id: RequestId(read(row, "id")?),
        start_date: read(row, "start_date")?,
        equipment_type: read(row, "equipment_type")?,
        equipment_model: read(row, "equipment_model")?,
        problem_description: read(row, "problem_description")?,
        status,
        client_id: UserId(read(row, "client_id")?),
        master_id: read::<Option<i64>>(row, "master_id")?.map(UserId),
        completion_date: read(row, "completion_date")?,
        due_date: read(row, "due_date")?,
        extended_due_date: read(row, "extended_due_date")?,
    })
}

fn read<'r, T>(row: &'r PgRow, column: &str) -> Result<T, ServiceError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column)
        .map_err(|e| ServiceError::Internal(format!("column {column}: {e}")))
}

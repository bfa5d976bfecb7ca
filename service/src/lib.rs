//! # Repairdesk Service Core
//!
//! Request lifecycle and role-permission engine for a repair request
//! tracking service: clients submit equipment repair requests, staff
//! (operators, specialists, managers) triage, assign, comment on, and
//! resolve them, and managers view aggregate statistics.
//!
//! ## Architecture
//!
//! Business logic lives in [`RequestService`], generic over two repository
//! traits so it can run against PostgreSQL in production and in-memory
//! stores in tests:
//!
//! ```text
//! Caller id ──▶ Directory lookup ──▶ Permission check ──▶ Lifecycle rule
//!                                                              │
//!                                                              ▼
//!                                                       Request store
//! ```
//!
//! - [`permissions`] — pure role/ownership checks, exhaustive over [`Role`]
//! - [`service`] — the lifecycle controller applying create/update rules
//! - [`stats`] — point-in-time aggregation over a request snapshot
//! - [`providers`] — repository traits (the storage seam)
//! - [`mocks`] — in-memory repositories (feature `test-utils`, default on)
//! - [`stores`] — PostgreSQL repositories (feature `postgres`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use repairdesk_service::{RequestService, mocks::{MockDirectory, MockRequests}};
//!
//! let service = RequestService::new(MockDirectory::new(), MockRequests::new());
//! let user = service.register("Ivan Petrov", Some("+7900"), "ivan", "secret").await?;
//! let id = service.create_request(user.id, "AC", "X100", "not cooling").await?;
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod error;
pub mod model;
pub mod password;
pub mod permissions;
pub mod providers;
pub mod service;
pub mod stats;

#[cfg(feature = "test-utils")]
pub mod mocks;

#[cfg(feature = "postgres")]
pub mod stores;

// Re-export main types for convenience
pub use error::{Result, ServiceError};
pub use model::{
    Comment, Part, PartId, RepairRequest, RequestId, RequestPatch, RequestRecord, RequestStatus,
    Role, StatsReport, User, UserId,
};
pub use service::RequestService;

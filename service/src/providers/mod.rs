//! Repository traits: the seam between the lifecycle engine and storage.
//!
//! Two stores back the system:
//!
//! - the **directory** holds users and the part catalog — reference data
//!   with low mutation frequency;
//! - the **request store** holds requests, their comments, and their part
//!   associations — the mutable transactional data.
//!
//! Implementations: [`crate::stores::postgres`] for production (feature
//! `postgres`) and [`crate::mocks`] for tests and local runs.

mod directory;
mod requests;

pub use directory::DirectoryRepository;
pub use requests::RequestRepository;

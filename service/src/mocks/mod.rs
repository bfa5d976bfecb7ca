//! In-memory repositories for testing and local runs.
//!
//! These run the full lifecycle engine at memory speed with no external
//! services. Compiled under the `test-utils` feature (on by default).

mod directory;
mod requests;

pub use directory::MockDirectory;
pub use requests::MockRequests;

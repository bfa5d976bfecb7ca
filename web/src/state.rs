//! Application state for Axum handlers.

use repairdesk_service::RequestService;
use repairdesk_service::providers::{DirectoryRepository, RequestRepository};
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Holds the lifecycle service behind an `Arc`; cloning the state is a
/// pointer copy, which is what Axum does per request.
pub struct AppState<D, R> {
    /// The request lifecycle service.
    pub service: Arc<RequestService<D, R>>,
}

// Manual impl: `derive(Clone)` would needlessly require `D: Clone + R: Clone`.
impl<D, R> Clone for AppState<D, R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

impl<D, R> AppState<D, R>
where
    D: DirectoryRepository,
    R: RequestRepository,
{
    /// Wrap a service into shareable state.
    #[must_use]
    pub fn new(service: RequestService<D, R>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

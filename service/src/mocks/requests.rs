//! In-memory request repository.

use crate::error::{Result, ServiceError};
use crate::model::{
    Comment, NewRequest, Part, RepairRequest, RequestId, RequestStatus, UserId,
};
use crate::providers::RequestRepository;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::sync::{Arc, Mutex};

/// In-memory request store.
///
/// Requests live in a `BTreeMap` so listing is naturally ordered by
/// ascending id. Each trait method takes the lock once, so mutations are
/// atomic with respect to concurrent readers.
#[derive(Debug, Clone, Default)]
pub struct MockRequests {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    requests: BTreeMap<RequestId, RepairRequest>,
    comments: HashMap<RequestId, Vec<Comment>>,
    parts: HashMap<RequestId, Vec<Part>>,
    next_comment_id: i64,
}

impl MockRequests {
    /// Create an empty request store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> ServiceError {
    ServiceError::Internal("request store lock poisoned".to_string())
}

fn missing(id: RequestId) -> ServiceError {
    ServiceError::NotFound {
        what: "request",
        id: id.0,
    }
}

impl RequestRepository for MockRequests {
    fn insert(&self, request: NewRequest) -> impl Future<Output = Result<RepairRequest>> + Send {
        let inner = Arc::clone(&self.inner);

        async move {
            let mut guard = inner.lock().map_err(|_| poisoned())?;

            let id = RequestId(guard.requests.keys().map(|r| r.0).max().unwrap_or(0) + 1);
            let request = RepairRequest {
                id,
                start_date: request.start_date,
                equipment_type: request.equipment_type,
                equipment_model: request.equipment_model,
                problem_description: request.problem_description,
                status: RequestStatus::Open,
                client_id: request.client_id,
                master_id: None,
                completion_date: None,
                due_date: None,
                extended_due_date: None,
            };
            guard.requests.insert(id, request.clone());
            Ok(request)
        }
    }

    fn get(&self, id: RequestId) -> impl Future<Output = Result<Option<RepairRequest>>> + Send {
        let inner = Arc::clone(&self.inner);

        async move {
            Ok(inner
                .lock()
                .map_err(|_| poisoned())?
                .requests
                .get(&id)
                .cloned())
        }
    }

    fn update(&self, request: &RepairRequest) -> impl Future<Output = Result<()>> + Send {
        let inner = Arc::clone(&self.inner);
        let request = request.clone();

        async move {
            let mut guard = inner.lock().map_err(|_| poisoned())?;

            if !guard.requests.contains_key(&request.id) {
                return Err(missing(request.id));
            }
            guard.requests.insert(request.id, request);
            Ok(())
        }
    }

    fn list(
        &self,
        owner: Option<UserId>,
    ) -> impl Future<Output = Result<Vec<RepairRequest>>> + Send {
        let inner = Arc::clone(&self.inner);

        async move {
            let guard = inner.lock().map_err(|_| poisoned())?;

            // BTreeMap iteration order is ascending id.
            Ok(guard
                .requests
                .values()
                .filter(|r| owner.is_none_or(|o| r.client_id == o))
                .cloned()
                .collect())
        }
    }

    fn add_comment(
        &self,
        request_id: RequestId,
        author_id: UserId,
        message: &str,
    ) -> impl Future<Output = Result<Comment>> + Send {
        let inner = Arc::clone(&self.inner);
        let message = message.to_string();

        async move {
            let mut guard = inner.lock().map_err(|_| poisoned())?;

            if !guard.requests.contains_key(&request_id) {
                return Err(missing(request_id));
            }

            guard.next_comment_id += 1;
            let comment = Comment {
                id: guard.next_comment_id,
                request_id,
                author_id,
                message,
                created_at: Utc::now(),
            };
            guard
                .comments
                .entry(request_id)
                .or_default()
                .push(comment.clone());
            Ok(comment)
        }
    }

    fn comments(&self, request_id: RequestId) -> impl Future<Output = Result<Vec<Comment>>> + Send {
        let inner = Arc::clone(&self.inner);

        async move {
            Ok(inner
                .lock()
                .map_err(|_| poisoned())?
                .comments
                .get(&request_id)
                .cloned()
                .unwrap_or_default())
        }
    }

    fn replace_parts(
        &self,
        request_id: RequestId,
        parts: &[Part],
    ) -> impl Future<Output = Result<()>> + Send {
        let inner = Arc::clone(&self.inner);
        let parts = parts.to_vec();

        async move {
            let mut guard = inner.lock().map_err(|_| poisoned())?;

            if !guard.requests.contains_key(&request_id) {
                return Err(missing(request_id));
            }
            // Full replacement under one lock: readers never observe a
            // half-updated set.
            guard.parts.insert(request_id, parts);
            Ok(())
        }
    }

    fn parts(&self, request_id: RequestId) -> impl Future<Output = Result<Vec<Part>>> + Send {
        let inner = Arc::clone(&self.inner);

        async move {
            Ok(inner
                .lock()
                .map_err(|_| poisoned())?
                .parts
                .get(&request_id)
                .cloned()
                .unwrap_or_default())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::PartId;
    use chrono::NaiveDate;

    fn new_request(client: i64) -> NewRequest {
        NewRequest {
            start_date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            equipment_type: "AC".to_string(),
            equipment_model: "X100".to_string(),
            problem_description: "broken".to_string(),
            client_id: UserId(client),
        }
    }

    #[tokio::test]
    async fn insert_allocates_monotonic_ids_with_defaults() {
        let store = MockRequests::new();
        let first = store.insert(new_request(1)).await.unwrap();
        let second = store.insert(new_request(1)).await.unwrap();

        assert_eq!(first.id, RequestId(1));
        assert_eq!(second.id, RequestId(2));
        assert_eq!(first.status, RequestStatus::Open);
        assert_eq!(first.master_id, None);
        assert_eq!(first.completion_date, None);
    }

    #[tokio::test]
    async fn list_filters_by_owner_and_orders_by_id() {
        let store = MockRequests::new();
        store.insert(new_request(1)).await.unwrap();
        store.insert(new_request(2)).await.unwrap();
        store.insert(new_request(1)).await.unwrap();

        let all = store.list(None).await.unwrap();
        let ids: Vec<i64> = all.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let mine = store.list(Some(UserId(1))).await.unwrap();
        let ids: Vec<i64> = mine.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn replace_parts_does_not_accumulate() {
        let store = MockRequests::new();
        let request = store.insert(new_request(1)).await.unwrap();

        let filter = Part {
            id: PartId(1),
            name: "filter".to_string(),
        };
        let compressor = Part {
            id: PartId(2),
            name: "compressor".to_string(),
        };

        store
            .replace_parts(request.id, &[filter.clone(), compressor])
            .await
            .unwrap();
        store.replace_parts(request.id, &[filter]).await.unwrap();

        let parts = store.parts(request.id).await.unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].name, "filter");
    }

    #[tokio::test]
    async fn comment_on_missing_request_is_not_found() {
        let store = MockRequests::new();
        let err = store
            .add_comment(RequestId(9), UserId(1), "hello")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }
}

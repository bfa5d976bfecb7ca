//! In-memory directory repository.

use crate::error::{Result, ServiceError};
use crate::model::{NewUser, Part, PartId, User, UserId};
use crate::providers::DirectoryRepository;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// In-memory directory store.
///
/// Uses `Arc<Mutex<HashMap>>` so clones share state, like a connection
/// pool would.
#[derive(Debug, Clone, Default)]
pub struct MockDirectory {
    users: Arc<Mutex<HashMap<UserId, User>>>,
    parts: Arc<Mutex<HashMap<String, Part>>>,
}

impl MockDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> ServiceError {
    ServiceError::Internal("directory lock poisoned".to_string())
}

impl DirectoryRepository for MockDirectory {
    fn find_user(&self, id: UserId) -> impl Future<Output = Result<Option<User>>> + Send {
        let users = Arc::clone(&self.users);

        async move { Ok(users.lock().map_err(|_| poisoned())?.get(&id).cloned()) }
    }

    fn find_user_by_login(
        &self,
        login: &str,
    ) -> impl Future<Output = Result<Option<User>>> + Send {
        let users = Arc::clone(&self.users);
        let login = login.to_string();

        async move {
            Ok(users
                .lock()
                .map_err(|_| poisoned())?
                .values()
                .find(|u| u.login == login)
                .cloned())
        }
    }

    fn create_user(&self, user: NewUser) -> impl Future<Output = Result<User>> + Send {
        let users = Arc::clone(&self.users);

        async move {
            let mut guard = users.lock().map_err(|_| poisoned())?;

            if guard.values().any(|u| u.login == user.login) {
                return Err(ServiceError::Conflict(format!(
                    "login already taken: {}",
                    user.login
                )));
            }

            let id = UserId(guard.keys().map(|u| u.0).max().unwrap_or(0) + 1);
            let user = User {
                id,
                full_name: user.full_name,
                phone: user.phone,
                login: user.login,
                password_hash: user.password_hash,
                role: user.role,
            };
            guard.insert(id, user.clone());
            Ok(user)
        }
    }

    fn upsert_part(&self, name: &str) -> impl Future<Output = Result<Part>> + Send {
        let parts = Arc::clone(&self.parts);
        let name = name.to_string();

        async move {
            let mut guard = parts.lock().map_err(|_| poisoned())?;

            if let Some(part) = guard.get(&name) {
                return Ok(part.clone());
            }

            let id = PartId(guard.values().map(|p| p.id.0).max().unwrap_or(0) + 1);
            let part = Part {
                id,
                name: name.clone(),
            };
            guard.insert(name, part.clone());
            Ok(part)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::Role;

    fn new_user(login: &str) -> NewUser {
        NewUser {
            full_name: "Test User".to_string(),
            phone: None,
            login: login.to_string(),
            password_hash: "salt$hash".to_string(),
            role: Role::Client,
        }
    }

    #[tokio::test]
    async fn duplicate_login_is_a_conflict() {
        let directory = MockDirectory::new();
        directory.create_user(new_user("ivan")).await.unwrap();

        let err = directory.create_user(new_user("ivan")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn part_upsert_is_idempotent() {
        let directory = MockDirectory::new();
        let first = directory.upsert_part("filter").await.unwrap();
        let second = directory.upsert_part("filter").await.unwrap();
        let other = directory.upsert_part("compressor").await.unwrap();

        assert_eq!(first.id, second.id);
        assert_ne!(first.id, other.id);
    }
}

//! Integration tests for role-based denials: every boundary operation
//! rejects callers outside its permitted role set, and specialist
//! assignment constraints hold for comments and parts.

#![allow(clippy::expect_used)]

use repairdesk_service::mocks::{MockDirectory, MockRequests};
use repairdesk_service::model::NewUser;
use repairdesk_service::password::hash_password;
use repairdesk_service::providers::DirectoryRepository;
use repairdesk_service::{
    RequestId, RequestPatch, RequestService, Role, ServiceError, User,
};

type Service = RequestService<MockDirectory, MockRequests>;

fn service() -> (Service, MockDirectory) {
    let directory = MockDirectory::new();
    let requests = MockRequests::new();
    (
        RequestService::new(directory.clone(), requests),
        directory,
    )
}

async fn seed_user(directory: &MockDirectory, login: &str, role: Role) -> User {
    directory
        .create_user(NewUser {
            full_name: format!("{login} {role}"),
            phone: None,
            login: login.to_string(),
            password_hash: hash_password("pw"),
            role,
        })
        .await
        .expect("seed user")
}

fn assert_denied(result: Result<(), ServiceError>, role: Role) {
    assert_eq!(
        result.expect_err("should be denied"),
        ServiceError::Forbidden {
            role: role.as_str().to_string()
        }
    );
}

#[tokio::test]
async fn specialist_cannot_create_requests() {
    let (service, directory) = service();
    let specialist = seed_user(&directory, "spec", Role::Specialist).await;

    assert_denied(
        service
            .create_request(specialist.id, "AC", "X100", "broken")
            .await
            .map(drop),
        Role::Specialist,
    );
}

#[tokio::test]
async fn specialist_and_client_cannot_view_statistics() {
    let (service, directory) = service();
    let specialist = seed_user(&directory, "spec", Role::Specialist).await;
    let client = seed_user(&directory, "ivan", Role::Client).await;

    assert_denied(
        service.get_statistics(specialist.id).await.map(drop),
        Role::Specialist,
    );
    assert_denied(
        service.get_statistics(client.id).await.map(drop),
        Role::Client,
    );
}

#[tokio::test]
async fn client_cannot_comment_or_set_parts() {
    let (service, directory) = service();
    let client = seed_user(&directory, "ivan", Role::Client).await;
    let id = service
        .create_request(client.id, "AC", "X100", "broken")
        .await
        .expect("create");

    assert_denied(
        service.add_comment(client.id, id, "me too").await.map(drop),
        Role::Client,
    );
    assert_denied(
        service.set_parts(client.id, id, "filter").await,
        Role::Client,
    );
}

#[tokio::test]
async fn specialist_cannot_touch_unassigned_requests() {
    let (service, directory) = service();
    let client = seed_user(&directory, "ivan", Role::Client).await;
    let operator = seed_user(&directory, "op", Role::Operator).await;
    let assigned = seed_user(&directory, "spec1", Role::Specialist).await;
    let outsider = seed_user(&directory, "spec2", Role::Specialist).await;

    let id = service
        .create_request(client.id, "AC", "X100", "broken")
        .await
        .expect("create");
    service
        .update_request(
            operator.id,
            id,
            RequestPatch {
                master_id: Some(assigned.id),
                ..RequestPatch::default()
            },
        )
        .await
        .expect("assign");

    // The assigned specialist may annotate.
    service
        .add_comment(assigned.id, id, "on it")
        .await
        .expect("assigned comment");
    service
        .set_parts(assigned.id, id, "filter")
        .await
        .expect("assigned parts");

    // Any other specialist is denied, for both actions.
    assert_denied(
        service.add_comment(outsider.id, id, "hi").await.map(drop),
        Role::Specialist,
    );
    assert_denied(
        service.set_parts(outsider.id, id, "fan").await,
        Role::Specialist,
    );
}

#[tokio::test]
async fn only_managers_and_admins_extend_deadlines() {
    let (service, directory) = service();
    let client = seed_user(&directory, "ivan", Role::Client).await;
    let operator = seed_user(&directory, "op", Role::Operator).await;
    let specialist = seed_user(&directory, "spec", Role::Specialist).await;

    let id = service
        .create_request(client.id, "AC", "X100", "broken")
        .await
        .expect("create");
    let date = chrono::NaiveDate::from_ymd_opt(2026, 9, 1).expect("date");

    assert_denied(
        service.extend_deadline(operator.id, id, date).await,
        Role::Operator,
    );
    assert_denied(
        service.extend_deadline(specialist.id, id, date).await,
        Role::Specialist,
    );
    assert_denied(
        service.extend_deadline(client.id, id, date).await,
        Role::Client,
    );
}

#[tokio::test]
async fn specialist_cannot_use_the_staff_update_path() {
    let (service, directory) = service();
    let client = seed_user(&directory, "ivan", Role::Client).await;
    let specialist = seed_user(&directory, "spec", Role::Specialist).await;

    let id = service
        .create_request(client.id, "AC", "X100", "broken")
        .await
        .expect("create");

    assert_denied(
        service
            .update_request(
                specialist.id,
                id,
                RequestPatch {
                    status: Some("done".to_string()),
                    ..RequestPatch::default()
                },
            )
            .await,
        Role::Specialist,
    );
}

#[tokio::test]
async fn missing_request_is_not_found_for_authorized_staff() {
    let (service, directory) = service();
    let operator = seed_user(&directory, "op", Role::Operator).await;

    let err = service
        .update_request(operator.id, RequestId(99), RequestPatch::default())
        .await
        .expect_err("missing request");
    assert_eq!(
        err,
        ServiceError::NotFound {
            what: "request",
            id: 99
        }
    );
}

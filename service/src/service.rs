//! Request lifecycle controller.
//!
//! [`RequestService`] is the single entry point for every boundary
//! operation: it resolves the caller through the directory, runs the
//! [`crate::permissions`] checks, and applies the lifecycle rules against
//! the request store. Repositories are generic so the same logic runs
//! against PostgreSQL in production and in-memory stores in tests.

use crate::error::{Result, ServiceError};
use crate::model::{
    Comment, NewRequest, NewUser, Part, RepairRequest, RequestId, RequestPatch, RequestRecord,
    RequestStatus, Role, StatsReport, User, UserId,
};
use crate::password;
use crate::permissions;
use crate::providers::{DirectoryRepository, RequestRepository};
use crate::stats;
use chrono::{NaiveDate, Utc};

/// The request lifecycle and role-permission engine.
#[derive(Debug, Clone)]
pub struct RequestService<D, R> {
    directory: D,
    requests: R,
}

impl<D, R> RequestService<D, R>
where
    D: DirectoryRepository,
    R: RequestRepository,
{
    /// Create a service over the given repositories.
    pub const fn new(directory: D, requests: R) -> Self {
        Self {
            directory,
            requests,
        }
    }

    // ═══════════════════════════════════════════════════════════
    // Accounts
    // ═══════════════════════════════════════════════════════════

    /// Register a new client account.
    ///
    /// The password is stored as a salted hash, never clear text.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the login is already taken
    /// - `Internal` on store failure
    pub async fn register(
        &self,
        full_name: &str,
        phone: Option<&str>,
        login: &str,
        plain_password: &str,
    ) -> Result<User> {
        if self.directory.find_user_by_login(login).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "login already taken: {login}"
            )));
        }

        let user = self
            .directory
            .create_user(NewUser {
                full_name: full_name.to_string(),
                phone: phone.map(str::to_string),
                login: login.to_string(),
                password_hash: password::hash_password(plain_password),
                role: Role::Client,
            })
            .await?;

        tracing::info!(user_id = %user.id, login, "registered client account");
        Ok(user)
    }

    /// Authenticate by login and password.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` on unknown login or password mismatch; the two
    /// cases are indistinguishable to the caller.
    pub async fn login(&self, login: &str, plain_password: &str) -> Result<User> {
        let user = self.directory.find_user_by_login(login).await?;
        let verified = user
            .as_ref()
            .is_some_and(|u| password::verify_password(plain_password, &u.password_hash));

        if let (Some(user), true) = (user, verified) {
            tracing::info!(user_id = %user.id, "login succeeded");
            Ok(user)
        } else {
            tracing::warn!(login, "login failed");
            Err(ServiceError::Unauthenticated(
                "invalid login or password".to_string(),
            ))
        }
    }

    // ═══════════════════════════════════════════════════════════
    // Request lifecycle
    // ═══════════════════════════════════════════════════════════

    /// Create a request on behalf of the caller.
    ///
    /// Defaults: status `open`, start date today, no master, no
    /// completion date.
    ///
    /// # Errors
    ///
    /// - `Unauthenticated` if the caller id does not resolve
    /// - `Forbidden` unless the caller is a client, operator, or admin
    pub async fn create_request(
        &self,
        caller: UserId,
        equipment_type: &str,
        equipment_model: &str,
        problem_description: &str,
    ) -> Result<RequestId> {
        let user = self.resolve_caller(caller).await?;
        if !permissions::can_create_request(user.role) {
            return Err(permissions::denied(user.role));
        }

        let request = self
            .requests
            .insert(NewRequest {
                start_date: Utc::now().date_naive(),
                equipment_type: equipment_type.to_string(),
                equipment_model: equipment_model.to_string(),
                problem_description: problem_description.to_string(),
                client_id: user.id,
            })
            .await?;

        tracing::info!(request_id = %request.id, client_id = %user.id, "request created");
        Ok(request.id)
    }

    /// Update a request.
    ///
    /// Client path: the owner may replace the problem description, and
    /// nothing else; a payload that also carries `status` or `master_id`
    /// is rejected whole, leaving the request unchanged.
    ///
    /// Staff path (operator/manager/admin): applies, independently, any
    /// subset of description, master assignment, status by name, and
    /// explicit completion date. Transitioning to `done` fills in today's
    /// date as completion date only when none is present; an explicit
    /// completion date in the same payload wins regardless of status.
    ///
    /// # Errors
    ///
    /// - `Unauthenticated` / `Forbidden` per the rules above
    /// - `NotFound` if the request does not exist
    /// - `Validation` for an unknown status name
    pub async fn update_request(
        &self,
        caller: UserId,
        id: RequestId,
        patch: RequestPatch,
    ) -> Result<()> {
        let user = self.resolve_caller(caller).await?;
        let mut request = self.get_request(id).await?;

        if user.role == Role::Client {
            if request.client_id != user.id {
                tracing::warn!(request_id = %id, caller = %user.id, "client update on foreign request denied");
                return Err(permissions::denied(user.role));
            }
            // Clients may touch the description and only the description.
            if patch.problem_description.is_none()
                || patch.status.is_some()
                || patch.master_id.is_some()
            {
                return Err(permissions::denied(user.role));
            }
            if let Some(description) = patch.problem_description {
                request.problem_description = description;
            }
            self.requests.update(&request).await?;
            tracing::info!(request_id = %id, "client updated problem description");
            return Ok(());
        }

        if !permissions::can_edit_requests(user.role) {
            return Err(permissions::denied(user.role));
        }

        if let Some(description) = patch.problem_description {
            request.problem_description = description;
        }
        if let Some(master_id) = patch.master_id {
            // Deliberately no check that the assignee is a specialist.
            request.master_id = Some(master_id);
        }
        if let Some(status_name) = patch.status {
            let status = RequestStatus::parse(&status_name).ok_or_else(|| {
                ServiceError::Validation(format!("unknown status: {status_name}"))
            })?;
            request.status = status;
            if status == RequestStatus::Done && request.completion_date.is_none() {
                request.completion_date = Some(Utc::now().date_naive());
            }
        }
        if let Some(completion_date) = patch.completion_date {
            request.completion_date = Some(completion_date);
        }

        self.requests.update(&request).await?;
        tracing::info!(request_id = %id, editor = %user.id, "request updated");
        Ok(())
    }

    /// Extend a request's deadline. Manager/admin only.
    ///
    /// The new date is stored unconditionally; there is no ordering check
    /// against the start date or a previous extension.
    ///
    /// # Errors
    ///
    /// - `Unauthenticated` / `Forbidden` per the role table
    /// - `NotFound` if the request does not exist
    pub async fn extend_deadline(
        &self,
        caller: UserId,
        id: RequestId,
        new_date: NaiveDate,
    ) -> Result<()> {
        let user = self.resolve_caller(caller).await?;
        if !permissions::can_extend_deadline(user.role) {
            return Err(permissions::denied(user.role));
        }

        let mut request = self.get_request(id).await?;
        request.extended_due_date = Some(new_date);
        self.requests.update(&request).await?;

        tracing::info!(request_id = %id, %new_date, "deadline extended");
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════
    // Comments & parts
    // ═══════════════════════════════════════════════════════════

    /// Append a comment to a request.
    ///
    /// Staff only; a specialist must be the request's assigned master.
    ///
    /// # Errors
    ///
    /// - `Unauthenticated` / `Forbidden` per the role and assignment rules
    /// - `NotFound` if the request does not exist
    pub async fn add_comment(
        &self,
        caller: UserId,
        id: RequestId,
        message: &str,
    ) -> Result<Comment> {
        let user = self.resolve_caller(caller).await?;
        if !permissions::can_annotate(user.role) {
            return Err(permissions::denied(user.role));
        }

        let request = self.get_request(id).await?;
        if !permissions::is_assigned_or_unrestricted(user.role, user.id, &request) {
            tracing::warn!(request_id = %id, caller = %user.id, "comment on unassigned request denied");
            return Err(permissions::denied(user.role));
        }

        let comment = self.requests.add_comment(id, user.id, message).await?;
        tracing::info!(request_id = %id, author = %user.id, "comment added");
        Ok(comment)
    }

    /// Replace the parts consumed by a request from a comma-separated
    /// list of part names.
    ///
    /// Unknown names create catalog rows; empty and whitespace-only
    /// entries are discarded; repeated names collapse to one entry. The
    /// replacement is atomic, never leaving a partially-updated set
    /// visible.
    ///
    /// # Errors
    ///
    /// - `Unauthenticated` / `Forbidden` per the role and assignment rules
    /// - `NotFound` if the request does not exist
    pub async fn set_parts(&self, caller: UserId, id: RequestId, parts_csv: &str) -> Result<()> {
        let user = self.resolve_caller(caller).await?;
        if !permissions::can_annotate(user.role) {
            return Err(permissions::denied(user.role));
        }

        let request = self.get_request(id).await?;
        if !permissions::is_assigned_or_unrestricted(user.role, user.id, &request) {
            tracing::warn!(request_id = %id, caller = %user.id, "parts update on unassigned request denied");
            return Err(permissions::denied(user.role));
        }

        let mut parts: Vec<Part> = Vec::new();
        for name in parts_csv.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            let part = self.directory.upsert_part(name).await?;
            if !parts.iter().any(|p| p.id == part.id) {
                parts.push(part);
            }
        }

        self.requests.replace_parts(id, &parts).await?;
        tracing::info!(request_id = %id, count = parts.len(), "parts replaced");
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════
    // Queries
    // ═══════════════════════════════════════════════════════════

    /// List requests visible to the caller, ordered by ascending id.
    /// Clients see only their own.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` if the caller id does not resolve.
    pub async fn list_requests(&self, caller: UserId) -> Result<Vec<RequestRecord>> {
        let user = self.resolve_caller(caller).await?;
        let owner = (!permissions::sees_all_requests(user.role)).then_some(user.id);

        let rows = self.requests.list(owner).await?;
        self.to_records(rows).await
    }

    /// Search requests visible to the caller by case-insensitive substring
    /// over equipment type, model, description, or the id's decimal form.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` if the caller id does not resolve.
    pub async fn search_requests(&self, caller: UserId, query: &str) -> Result<Vec<RequestRecord>> {
        let user = self.resolve_caller(caller).await?;
        let owner = (!permissions::sees_all_requests(user.role)).then_some(user.id);

        let rows = self.requests.list(owner).await?;
        let matching = rows.into_iter().filter(|r| r.matches(query)).collect();
        self.to_records(matching).await
    }

    /// Comments for a request, oldest first. Visible to any caller that
    /// can see the request (clients: own requests only).
    ///
    /// # Errors
    ///
    /// - `Unauthenticated` / `Forbidden` per the visibility rules
    /// - `NotFound` if the request does not exist
    pub async fn list_comments(&self, caller: UserId, id: RequestId) -> Result<Vec<Comment>> {
        let user = self.resolve_caller(caller).await?;
        let request = self.get_request(id).await?;
        if !permissions::sees_all_requests(user.role) && request.client_id != user.id {
            return Err(permissions::denied(user.role));
        }
        self.requests.comments(id).await
    }

    /// Aggregate statistics. Operator/manager/admin only.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` / `Forbidden` per the role table.
    pub async fn get_statistics(&self, caller: UserId) -> Result<StatsReport> {
        let user = self.resolve_caller(caller).await?;
        if !permissions::can_view_statistics(user.role) {
            return Err(permissions::denied(user.role));
        }

        let snapshot = self.requests.list(None).await?;
        Ok(stats::compute(&snapshot))
    }

    // ═══════════════════════════════════════════════════════════
    // Internals
    // ═══════════════════════════════════════════════════════════

    /// Resolve the out-of-band caller identity to a user, before any role
    /// check runs.
    async fn resolve_caller(&self, caller: UserId) -> Result<User> {
        self.directory.find_user(caller).await?.ok_or_else(|| {
            ServiceError::Unauthenticated(format!("unknown caller id: {caller}"))
        })
    }

    async fn get_request(&self, id: RequestId) -> Result<RepairRequest> {
        self.requests.get(id).await?.ok_or(ServiceError::NotFound {
            what: "request",
            id: id.0,
        })
    }

    /// Resolve related names for the read model, one row at a time.
    async fn to_records(&self, rows: Vec<RepairRequest>) -> Result<Vec<RequestRecord>> {
        let mut records = Vec::with_capacity(rows.len());
        for request in rows {
            let client = self.directory.find_user(request.client_id).await?;
            let master = match request.master_id {
                Some(master_id) => self.directory.find_user(master_id).await?,
                None => None,
            };
            let parts = self
                .requests
                .parts(request.id)
                .await?
                .into_iter()
                .map(|p| p.name)
                .collect();

            let (client_name, client_phone) = match client {
                Some(c) => (c.full_name, c.phone),
                None => ("—".to_string(), None),
            };

            records.push(RequestRecord {
                id: request.id,
                start_date: request.start_date,
                equipment_type: request.equipment_type,
                equipment_model: request.equipment_model,
                problem_description: request.problem_description,
                status: request.status,
                client_name,
                client_phone,
                master_name: master.map(|m| m.full_name),
                completion_date: request.completion_date,
                extended_due_date: request.extended_due_date,
                parts,
            });
        }
        Ok(records)
    }
}

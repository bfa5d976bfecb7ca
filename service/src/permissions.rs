//! Authorization engine: pure role and ownership checks.
//!
//! Every check is a total function over [`Role`], so adding a role forces
//! every permission rule to be revisited at compile time. Ownership and
//! assignment constraints (a client may touch only their own request, a
//! specialist only their assigned ones) take the relevant ids as inputs;
//! nothing here performs I/O.

use crate::error::ServiceError;
use crate::model::{RepairRequest, Role, UserId};

/// Roles allowed to create a request.
#[must_use]
pub const fn can_create_request(role: Role) -> bool {
    matches!(role, Role::Client | Role::Operator | Role::Admin)
}

/// Roles allowed the staff update path (description, master, status,
/// completion date).
#[must_use]
pub const fn can_edit_requests(role: Role) -> bool {
    matches!(role, Role::Operator | Role::Manager | Role::Admin)
}

/// Roles allowed to add comments and record parts.
///
/// Specialists additionally require assignment; see
/// [`is_assigned_or_unrestricted`].
#[must_use]
pub const fn can_annotate(role: Role) -> bool {
    matches!(
        role,
        Role::Specialist | Role::Operator | Role::Manager | Role::Admin
    )
}

/// Roles allowed to extend a request's deadline.
#[must_use]
pub const fn can_extend_deadline(role: Role) -> bool {
    matches!(role, Role::Manager | Role::Admin)
}

/// Roles allowed to view aggregate statistics.
#[must_use]
pub const fn can_view_statistics(role: Role) -> bool {
    matches!(role, Role::Operator | Role::Manager | Role::Admin)
}

/// Whether a role sees the unfiltered request set. Clients see only
/// requests they own.
#[must_use]
pub const fn sees_all_requests(role: Role) -> bool {
    !matches!(role, Role::Client)
}

/// Assignment constraint for annotation actions: a specialist must be the
/// request's current master; every other annotating role is unrestricted.
#[must_use]
pub fn is_assigned_or_unrestricted(role: Role, caller: UserId, request: &RepairRequest) -> bool {
    match role {
        Role::Specialist => request.master_id == Some(caller),
        _ => true,
    }
}

/// Build the denial error for a caller, carrying the resolved role name.
#[must_use]
pub fn denied(role: Role) -> ServiceError {
    ServiceError::Forbidden {
        role: role.as_str().to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{RequestId, RequestStatus};
    use chrono::NaiveDate;

    const ALL_ROLES: [Role; 5] = [
        Role::Client,
        Role::Operator,
        Role::Specialist,
        Role::Manager,
        Role::Admin,
    ];

    fn request_with_master(master: Option<UserId>) -> RepairRequest {
        RepairRequest {
            id: RequestId(1),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            equipment_type: "AC".to_string(),
            equipment_model: "X100".to_string(),
            problem_description: "broken".to_string(),
            status: RequestStatus::Open,
            client_id: UserId(1),
            master_id: master,
            completion_date: None,
            due_date: None,
            extended_due_date: None,
        }
    }

    #[test]
    fn create_request_roles() {
        let allowed: Vec<Role> = ALL_ROLES
            .into_iter()
            .filter(|r| can_create_request(*r))
            .collect();
        assert_eq!(allowed, vec![Role::Client, Role::Operator, Role::Admin]);
    }

    #[test]
    fn staff_edit_roles() {
        assert!(!can_edit_requests(Role::Client));
        assert!(!can_edit_requests(Role::Specialist));
        assert!(can_edit_requests(Role::Operator));
        assert!(can_edit_requests(Role::Manager));
        assert!(can_edit_requests(Role::Admin));
    }

    #[test]
    fn annotate_roles() {
        assert!(!can_annotate(Role::Client));
        assert!(can_annotate(Role::Specialist));
        assert!(can_annotate(Role::Operator));
        assert!(can_annotate(Role::Manager));
        assert!(can_annotate(Role::Admin));
    }

    #[test]
    fn deadline_and_statistics_roles() {
        assert!(!can_extend_deadline(Role::Operator));
        assert!(!can_extend_deadline(Role::Specialist));
        assert!(can_extend_deadline(Role::Manager));
        assert!(can_extend_deadline(Role::Admin));

        assert!(!can_view_statistics(Role::Client));
        assert!(!can_view_statistics(Role::Specialist));
        assert!(can_view_statistics(Role::Operator));
        assert!(can_view_statistics(Role::Manager));
        assert!(can_view_statistics(Role::Admin));
    }

    #[test]
    fn only_clients_are_filtered() {
        assert!(!sees_all_requests(Role::Client));
        for role in [Role::Operator, Role::Specialist, Role::Manager, Role::Admin] {
            assert!(sees_all_requests(role));
        }
    }

    #[test]
    fn specialist_needs_assignment() {
        let assigned = request_with_master(Some(UserId(7)));
        let unassigned = request_with_master(None);

        assert!(is_assigned_or_unrestricted(
            Role::Specialist,
            UserId(7),
            &assigned
        ));
        assert!(!is_assigned_or_unrestricted(
            Role::Specialist,
            UserId(8),
            &assigned
        ));
        assert!(!is_assigned_or_unrestricted(
            Role::Specialist,
            UserId(7),
            &unassigned
        ));

        // Non-specialist annotators are never constrained by assignment.
        assert!(is_assigned_or_unrestricted(
            Role::Operator,
            UserId(99),
            &assigned
        ));
    }

    #[test]
    fn denial_reports_role_name() {
        assert_eq!(
            denied(Role::Manager),
            ServiceError::Forbidden {
                role: "manager".to_string()
            }
        );
    }
}

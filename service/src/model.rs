//! Domain model: identifiers, roles, statuses, entities, and read models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// User identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Repair request identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RequestId(pub i64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Part catalog identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PartId(pub i64);

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User role.
///
/// A closed enum so permission checks are exhaustive at compile time.
/// The administrative role is referenced by authorization checks but is
/// never assigned through registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Submits requests and may edit their own problem descriptions.
    Client,
    /// Front-desk staff: creates and edits requests, views statistics.
    Operator,
    /// Repair specialist: comments and records parts on assigned requests.
    Specialist,
    /// Manages deadlines and request state, views statistics.
    Manager,
    /// Administrative override with every staff permission.
    Admin,
}

impl Role {
    /// Storage/wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Operator => "operator",
            Self::Specialist => "specialist",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }

    /// Parse a stored role name, falling back to `Client` for
    /// unrecognized legacy values.
    #[must_use]
    pub fn parse_lossy(name: &str) -> Self {
        match name {
            "operator" => Self::Operator,
            "specialist" => Self::Specialist,
            "manager" => Self::Manager,
            "admin" => Self::Admin,
            _ => Self::Client,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a repair request.
///
/// Transitions are unrestricted: any staff update may set any target
/// status regardless of the current one, and `Done` is not terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Newly created, not yet picked up.
    Open,
    /// A specialist is working on it.
    InProgress,
    /// Blocked on replacement parts.
    WaitingParts,
    /// Repair finished.
    Done,
}

impl RequestStatus {
    /// Storage/wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::WaitingParts => "waiting_parts",
            Self::Done => "done",
        }
    }

    /// Parse a status by wire name. Returns `None` for unknown names.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "open" => Some(Self::Open),
            "in_progress" => Some(Self::InProgress),
            "waiting_parts" => Some(Self::WaitingParts),
            "done" => Some(Self::Done),
            _ => None,
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique identifier.
    pub id: UserId,
    /// Full name.
    pub full_name: String,
    /// Contact phone, if supplied.
    pub phone: Option<String>,
    /// Unique login.
    pub login: String,
    /// Salted password hash (see [`crate::password`]). Never clear text.
    pub password_hash: String,
    /// Role; never changes in-flow.
    pub role: Role,
}

/// Data for creating a user; the store allocates the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Full name.
    pub full_name: String,
    /// Contact phone, if supplied.
    pub phone: Option<String>,
    /// Unique login.
    pub login: String,
    /// Salted password hash.
    pub password_hash: String,
    /// Role to assign.
    pub role: Role,
}

/// A repair request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairRequest {
    /// Unique identifier, allocated monotonically by the store.
    pub id: RequestId,
    /// Date the request was opened.
    pub start_date: NaiveDate,
    /// Kind of equipment under repair.
    pub equipment_type: String,
    /// Equipment model.
    pub equipment_model: String,
    /// Free-text problem description.
    pub problem_description: String,
    /// Current status.
    pub status: RequestStatus,
    /// Owning client.
    pub client_id: UserId,
    /// Assigned master, if any. Assignment is not validated against the
    /// assignee's role; any user id is accepted.
    pub master_id: Option<UserId>,
    /// Set when the request transitions to `Done`, or explicitly by staff.
    pub completion_date: Option<NaiveDate>,
    /// Original due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Extended due date, set by a manager.
    pub extended_due_date: Option<NaiveDate>,
}

impl RepairRequest {
    /// Case-insensitive search match over equipment type, model, problem
    /// description, or the decimal form of the identifier.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.equipment_type.to_lowercase().contains(&q)
            || self.equipment_model.to_lowercase().contains(&q)
            || self.problem_description.to_lowercase().contains(&q)
            || self.id.0.to_string().contains(&q)
    }
}

/// Data for creating a request; the store allocates the id.
///
/// Status, master, and completion date start at their defaults
/// (`Open`, none, none).
#[derive(Debug, Clone)]
pub struct NewRequest {
    /// Date the request was opened.
    pub start_date: NaiveDate,
    /// Kind of equipment under repair.
    pub equipment_type: String,
    /// Equipment model.
    pub equipment_model: String,
    /// Free-text problem description.
    pub problem_description: String,
    /// Owning client.
    pub client_id: UserId,
}

/// Partial update payload for a request.
///
/// Staff may set any subset of the fields independently. Clients may set
/// `problem_description` only; a client payload that also carries `status`
/// or `master_id` is rejected outright.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestPatch {
    /// Replacement problem description.
    pub problem_description: Option<String>,
    /// Master to assign.
    pub master_id: Option<UserId>,
    /// Target status, by wire name.
    pub status: Option<String>,
    /// Explicit completion date; takes precedence over the date derived
    /// from a transition to `done`.
    pub completion_date: Option<NaiveDate>,
}

/// A comment attached to a request. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    /// Unique identifier.
    pub id: i64,
    /// Request this comment belongs to.
    pub request_id: RequestId,
    /// Author of the comment.
    pub author_id: UserId,
    /// Message body.
    pub message: String,
    /// Server-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A part catalog entry, created on first use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Part {
    /// Unique identifier.
    pub id: PartId,
    /// Unique name.
    pub name: String,
}

/// Read model for list/search results: a request with its related names
/// resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestRecord {
    /// Request identifier.
    pub id: RequestId,
    /// Date the request was opened.
    pub start_date: NaiveDate,
    /// Kind of equipment under repair.
    pub equipment_type: String,
    /// Equipment model.
    pub equipment_model: String,
    /// Free-text problem description.
    pub problem_description: String,
    /// Current status.
    pub status: RequestStatus,
    /// Owning client's full name.
    pub client_name: String,
    /// Owning client's phone, if any.
    pub client_phone: Option<String>,
    /// Assigned master's full name, if any.
    pub master_name: Option<String>,
    /// Completion date, if set.
    pub completion_date: Option<NaiveDate>,
    /// Extended due date, if set.
    pub extended_due_date: Option<NaiveDate>,
    /// Names of parts consumed by this request.
    pub parts: Vec<String>,
}

/// One bucket of the equipment-type ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquipmentCount {
    /// Equipment type.
    pub name: String,
    /// Number of requests with that type.
    pub count: u64,
}

/// One bucket of the problem-keyword ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    /// First word of the problem description.
    pub keyword: String,
    /// Number of requests whose description starts with that word.
    pub count: u64,
}

/// Aggregate statistics over the request store. Point-in-time snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    /// Count of requests with status `done`.
    pub done_count: u64,
    /// Average elapsed days between start and completion over requests
    /// with a completion date; 0 when none have one.
    pub avg_days: f64,
    /// Top-10 equipment types by request count, descending.
    pub by_equipment_type: Vec<EquipmentCount>,
    /// Top-10 first words of problem descriptions by frequency, descending.
    pub by_problem_keywords: Vec<KeywordCount>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request(id: i64) -> RepairRequest {
        RepairRequest {
            id: RequestId(id),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            equipment_type: "Air Conditioner".to_string(),
            equipment_model: "X100".to_string(),
            problem_description: "Not cooling at all".to_string(),
            status: RequestStatus::Open,
            client_id: UserId(1),
            master_id: None,
            completion_date: None,
            due_date: None,
            extended_due_date: None,
        }
    }

    #[test]
    fn role_round_trips_and_falls_back() {
        for role in [
            Role::Client,
            Role::Operator,
            Role::Specialist,
            Role::Manager,
            Role::Admin,
        ] {
            assert_eq!(Role::parse_lossy(role.as_str()), role);
        }
        assert_eq!(Role::parse_lossy("superuser"), Role::Client);
        assert_eq!(Role::parse_lossy(""), Role::Client);
    }

    #[test]
    fn status_parse_rejects_unknown_names() {
        assert_eq!(RequestStatus::parse("open"), Some(RequestStatus::Open));
        assert_eq!(
            RequestStatus::parse("waiting_parts"),
            Some(RequestStatus::WaitingParts)
        );
        assert_eq!(RequestStatus::parse("closed"), None);
        assert_eq!(RequestStatus::parse("DONE"), None);
    }

    #[test]
    fn search_match_is_case_insensitive() {
        let r = request(17);
        assert!(r.matches("air"));
        assert!(r.matches("COOLING"));
        assert!(r.matches("x100"));
        assert!(!r.matches("fridge"));
    }

    #[test]
    fn search_matches_identifier_text() {
        let r = request(173);
        assert!(r.matches("17"));
        assert!(r.matches("173"));
        assert!(!r.matches("174"));
    }
}

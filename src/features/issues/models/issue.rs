use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;

use crate::features::users::models::UserRole;

/// Issue type enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "issue_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    Water,
    Electricity,
    Road,
    Garbage,
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueType::Water => write!(f, "water"),
            IssueType::Electricity => write!(f, "electricity"),
            IssueType::Road => write!(f, "road"),
            IssueType::Garbage => write!(f, "garbage"),
        }
    }
}

impl std::str::FromStr for IssueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "water" => Ok(IssueType::Water),
            "electricity" => Ok(IssueType::Electricity),
            "road" => Ok(IssueType::Road),
            "garbage" => Ok(IssueType::Garbage),
            other => Err(format!("Unknown issue type '{}'", other)),
        }
    }
}

/// Issue lifecycle status, in strict forward order:
///
/// 1. reported - citizen has submitted
/// 2. assigned - auto-bound to the locality's representative at creation
/// 3. representative_acknowledged - representative confirms the problem is real
/// 4. pwd_working - crew has started remediation
/// 5. pwd_completed - crew has finished; completion fields populated
/// 6. representative_reviewed - representative confirms the fix (terminal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "issue_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    Reported,
    Assigned,
    RepresentativeAcknowledged,
    PwdWorking,
    PwdCompleted,
    RepresentativeReviewed,
}

impl IssueStatus {
    /// The only legal successor in the lifecycle, if any.
    /// No skipping, no implicit reverse transitions.
    pub fn next(self) -> Option<IssueStatus> {
        match self {
            IssueStatus::Reported => Some(IssueStatus::Assigned),
            IssueStatus::Assigned => Some(IssueStatus::RepresentativeAcknowledged),
            IssueStatus::RepresentativeAcknowledged => Some(IssueStatus::PwdWorking),
            IssueStatus::PwdWorking => Some(IssueStatus::PwdCompleted),
            IssueStatus::PwdCompleted => Some(IssueStatus::RepresentativeReviewed),
            IssueStatus::RepresentativeReviewed => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Role allowed to drive a transition INTO this status.
    /// `None` means the status is only ever set by the system (creation
    /// and auto-assignment), never through the transition endpoint.
    pub fn required_role(self) -> Option<UserRole> {
        match self {
            IssueStatus::Reported | IssueStatus::Assigned => None,
            IssueStatus::RepresentativeAcknowledged => Some(UserRole::Representative),
            IssueStatus::PwdWorking | IssueStatus::PwdCompleted => Some(UserRole::PwdWorker),
            IssueStatus::RepresentativeReviewed => Some(UserRole::Representative),
        }
    }

    /// Whether the transition into this status must be performed by the
    /// representative the issue is assigned to (not just any representative).
    pub fn requires_assigned_representative(self) -> bool {
        matches!(
            self,
            IssueStatus::RepresentativeAcknowledged | IssueStatus::RepresentativeReviewed
        )
    }
}

impl std::fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueStatus::Reported => write!(f, "reported"),
            IssueStatus::Assigned => write!(f, "assigned"),
            IssueStatus::RepresentativeAcknowledged => write!(f, "representative_acknowledged"),
            IssueStatus::PwdWorking => write!(f, "pwd_working"),
            IssueStatus::PwdCompleted => write!(f, "pwd_completed"),
            IssueStatus::RepresentativeReviewed => write!(f, "representative_reviewed"),
        }
    }
}

impl std::str::FromStr for IssueStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reported" => Ok(IssueStatus::Reported),
            "assigned" => Ok(IssueStatus::Assigned),
            "representative_acknowledged" => Ok(IssueStatus::RepresentativeAcknowledged),
            "pwd_working" => Ok(IssueStatus::PwdWorking),
            "pwd_completed" => Ok(IssueStatus::PwdCompleted),
            "representative_reviewed" => Ok(IssueStatus::RepresentativeReviewed),
            other => Err(format!("Unknown issue status '{}'", other)),
        }
    }
}

/// Database model for a citizen-filed issue
#[derive(Debug, Clone, FromRow)]
pub struct Issue {
    pub id: i64,
    pub issue_type: IssueType,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub locality_id: Option<i64>,
    pub status: IssueStatus,
    pub reporter_id: Option<i64>,
    pub assigned_parshad_id: Option<i64>,
    pub assignment_notes: Option<String>,
    pub progress_notes: Option<String>,
    pub completion_description: Option<String>,
    pub completion_photo_key: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub completed_by_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_lifecycle_is_a_strict_chain() {
        let order = [
            IssueStatus::Reported,
            IssueStatus::Assigned,
            IssueStatus::RepresentativeAcknowledged,
            IssueStatus::PwdWorking,
            IssueStatus::PwdCompleted,
            IssueStatus::RepresentativeReviewed,
        ];

        for pair in order.windows(2) {
            assert_eq!(pair[0].next(), Some(pair[1]));
        }
        assert_eq!(IssueStatus::RepresentativeReviewed.next(), None);
    }

    #[test]
    fn test_terminal_state() {
        assert!(IssueStatus::RepresentativeReviewed.is_terminal());
        assert!(!IssueStatus::PwdCompleted.is_terminal());
        assert!(!IssueStatus::Reported.is_terminal());
    }

    #[test]
    fn test_transition_roles() {
        use crate::features::users::models::UserRole;

        // Creation-time statuses are never reachable through the endpoint
        assert_eq!(IssueStatus::Reported.required_role(), None);
        assert_eq!(IssueStatus::Assigned.required_role(), None);

        assert_eq!(
            IssueStatus::RepresentativeAcknowledged.required_role(),
            Some(UserRole::Representative)
        );
        assert_eq!(
            IssueStatus::PwdWorking.required_role(),
            Some(UserRole::PwdWorker)
        );
        assert_eq!(
            IssueStatus::PwdCompleted.required_role(),
            Some(UserRole::PwdWorker)
        );
        assert_eq!(
            IssueStatus::RepresentativeReviewed.required_role(),
            Some(UserRole::Representative)
        );
    }

    #[test]
    fn test_assigned_representative_gate() {
        assert!(IssueStatus::RepresentativeAcknowledged.requires_assigned_representative());
        assert!(IssueStatus::RepresentativeReviewed.requires_assigned_representative());
        assert!(!IssueStatus::PwdWorking.requires_assigned_representative());
        assert!(!IssueStatus::PwdCompleted.requires_assigned_representative());
    }

    #[test]
    fn test_status_round_trips_through_strings() {
        for status in [
            IssueStatus::Reported,
            IssueStatus::Assigned,
            IssueStatus::RepresentativeAcknowledged,
            IssueStatus::PwdWorking,
            IssueStatus::PwdCompleted,
            IssueStatus::RepresentativeReviewed,
        ] {
            assert_eq!(IssueStatus::from_str(&status.to_string()), Ok(status));
        }
        assert!(IssueStatus::from_str("resolved").is_err());
    }

    #[test]
    fn test_issue_type_round_trips_through_strings() {
        for issue_type in [
            IssueType::Water,
            IssueType::Electricity,
            IssueType::Road,
            IssueType::Garbage,
        ] {
            assert_eq!(IssueType::from_str(&issue_type.to_string()), Ok(issue_type));
        }
        assert!(IssueType::from_str("potholes").is_err());
    }
}

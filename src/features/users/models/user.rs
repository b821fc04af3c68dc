use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;

/// User role enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Citizen who reports issues
    Citizen,
    /// Local head (Parshad for a ward, Pradhan for a village)
    Representative,
    /// PWD crew member who works on issues
    PwdWorker,
    /// Administrator who manages localities and staff
    Admin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Citizen => write!(f, "citizen"),
            UserRole::Representative => write!(f, "representative"),
            UserRole::PwdWorker => write!(f, "pwd_worker"),
            UserRole::Admin => write!(f, "admin"),
        }
    }
}

/// Database model for users
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub mobile_number: String,
    pub role: UserRole,
    pub is_active: bool,
    pub is_verified: bool,
    pub locality_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

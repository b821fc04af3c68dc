use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;

/// Locality type enum matching database enum.
/// Determines the representative's title: Parshad (ward) or Pradhan (village).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "locality_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LocalityType {
    /// Urban area
    Ward,
    /// Rural area
    Village,
}

impl LocalityType {
    /// Title used for the locality's elected representative
    pub fn representative_title(&self) -> &'static str {
        match self {
            LocalityType::Ward => "Parshad",
            LocalityType::Village => "Pradhan",
        }
    }
}

impl std::fmt::Display for LocalityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocalityType::Ward => write!(f, "ward"),
            LocalityType::Village => write!(f, "village"),
        }
    }
}

/// Database model for localities (wards and villages)
#[derive(Debug, Clone, FromRow)]
pub struct Locality {
    pub id: i64,
    pub name: String,
    #[sqlx(rename = "type")]
    pub locality_type: LocalityType,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_representative_title_by_type() {
        assert_eq!(LocalityType::Ward.representative_title(), "Parshad");
        assert_eq!(LocalityType::Village.representative_title(), "Pradhan");
    }
}

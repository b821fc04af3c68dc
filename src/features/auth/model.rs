use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::users::models::{User, UserRole};

/// The acting user for the current request, loaded by the auth middleware
/// from the subject of a gateway-verified access token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CurrentUser {
    pub id: i64,
    pub name: String,
    pub mobile_number: String,
    pub role: UserRole,
    /// Locality the user is responsible for (representatives only)
    pub locality_id: Option<i64>,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn is_representative(&self) -> bool {
        self.role == UserRole::Representative
    }

    pub fn is_pwd_worker(&self) -> bool {
        self.role == UserRole::PwdWorker
    }
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            mobile_number: user.mobile_number,
            role: user.role,
            locality_id: user.locality_id,
        }
    }
}

#[cfg(test)]
use axum::Router;

#[cfg(test)]
use crate::features::auth::model::CurrentUser;
#[cfg(test)]
use crate::features::users::models::UserRole;

#[cfg(test)]
#[allow(dead_code)]
pub fn create_test_user(id: i64, role: UserRole) -> CurrentUser {
    CurrentUser {
        id,
        name: format!("test-user-{}", id),
        mobile_number: "+919876543210".to_string(),
        role,
        locality_id: None,
    }
}

#[cfg(test)]
#[allow(dead_code)]
pub fn with_user_auth(router: Router, user: CurrentUser) -> Router {
    router.layer(axum::Extension(user))
}

use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::users::models::User;

/// Resolves the active representative responsible for a locality.
///
/// Read-only; safe to call concurrently and repeatedly. Does not re-validate
/// locality activation - that check belongs to whichever path created the
/// locality reference.
pub struct RepresentativeResolver {
    pool: PgPool,
}

impl RepresentativeResolver {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the active representative for the given locality.
    ///
    /// Returns `None` when no locality is given, or when the locality has no
    /// active representative. When several active representatives share one
    /// locality, the lowest user id wins (deterministic tie-break).
    pub async fn resolve(&self, locality_id: Option<i64>) -> Result<Option<User>> {
        let Some(locality_id) = locality_id else {
            return Ok(None);
        };

        let representative = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, mobile_number, role, is_active, is_verified, locality_id,
                   created_at, updated_at
            FROM users
            WHERE role = 'representative' AND locality_id = $1 AND is_active = TRUE
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(locality_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to resolve representative for locality {}: {:?}",
                locality_id,
                e
            );
            AppError::Database(e)
        })?;

        Ok(representative)
    }
}

use sqlx::PgPool;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::admin::dtos::{
    AdminLocalityDto, AdminLocalityListDto, AdminLocalityQuery, AdminUserDto, AdminUserListDto,
    AdminUserQuery, CreateLocalityDto, CreateStaffDto, UpdateLocalityDto, UpdateUserDto,
};
use crate::features::localities::models::Locality;
use crate::features::users::models::{User, UserRole};
use crate::shared::types::PaginationQuery;
use crate::shared::validation::normalize_mobile_number;

const USER_COLUMNS: &str = "id, name, mobile_number, role, is_active, is_verified, locality_id, \
     created_at, updated_at";

/// Administrative management of localities and staff
pub struct AdminService {
    pool: PgPool,
}

impl AdminService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ==================== Locality Management ====================

    pub async fn create_locality(&self, dto: CreateLocalityDto) -> Result<AdminLocalityDto> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM localities WHERE name = $1 AND type = $2",
        )
        .bind(&dto.name)
        .bind(dto.locality_type)
        .fetch_one(&self.pool)
        .await?;

        if existing > 0 {
            return Err(AppError::Conflict(format!(
                "A {} with this name already exists",
                dto.locality_type
            )));
        }

        let locality = sqlx::query_as::<_, Locality>(
            r#"
            INSERT INTO localities (name, type, is_active)
            VALUES ($1, $2, TRUE)
            RETURNING id, name, type, is_active, created_at, updated_at
            "#,
        )
        .bind(&dto.name)
        .bind(dto.locality_type)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create locality: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Locality created: id={}, name={}, type={}",
            locality.id,
            locality.name,
            locality.locality_type
        );

        self.build_locality_dto(locality).await
    }

    pub async fn list_localities(
        &self,
        query: &AdminLocalityQuery,
        pagination: &PaginationQuery,
    ) -> Result<AdminLocalityListDto> {
        let search_pattern = query
            .search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s.to_lowercase()));

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM localities
            WHERE ($1::locality_type IS NULL OR type = $1)
              AND ($2::boolean IS NULL OR is_active = $2)
              AND ($3::text IS NULL OR LOWER(name) LIKE $3)
            "#,
        )
        .bind(query.locality_type)
        .bind(query.is_active)
        .bind(search_pattern.as_deref())
        .fetch_one(&self.pool)
        .await?;

        let localities = sqlx::query_as::<_, Locality>(
            r#"
            SELECT id, name, type, is_active, created_at, updated_at
            FROM localities
            WHERE ($1::locality_type IS NULL OR type = $1)
              AND ($2::boolean IS NULL OR is_active = $2)
              AND ($3::text IS NULL OR LOWER(name) LIKE $3)
            ORDER BY name ASC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(query.locality_type)
        .bind(query.is_active)
        .bind(search_pattern.as_deref())
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await?;

        let mut items = Vec::with_capacity(localities.len());
        for locality in localities {
            items.push(self.build_locality_dto(locality).await?);
        }

        Ok(AdminLocalityListDto {
            items,
            total,
            page: pagination.page,
            page_size: pagination.limit(),
            total_pages: pagination.total_pages(total),
        })
    }

    pub async fn get_locality(&self, id: i64) -> Result<AdminLocalityDto> {
        let locality = self.require_locality(id).await?;
        self.build_locality_dto(locality).await
    }

    pub async fn update_locality(&self, id: i64, dto: UpdateLocalityDto) -> Result<AdminLocalityDto> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let locality = self.require_locality(id).await?;

        if let Some(new_name) = &dto.name {
            let duplicate = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM localities WHERE name = $1 AND type = $2 AND id != $3",
            )
            .bind(new_name)
            .bind(locality.locality_type)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

            if duplicate > 0 {
                return Err(AppError::Conflict(format!(
                    "A {} with this name already exists",
                    locality.locality_type
                )));
            }
        }

        let updated = sqlx::query_as::<_, Locality>(
            r#"
            UPDATE localities
            SET name = COALESCE($2, name),
                is_active = COALESCE($3, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, type, is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(dto.name.as_deref())
        .bind(dto.is_active)
        .fetch_one(&self.pool)
        .await?;

        self.build_locality_dto(updated).await
    }

    /// Delete a locality. Refused while issues or users still reference it;
    /// deactivation is the path for retiring a locality in use.
    pub async fn delete_locality(&self, id: i64) -> Result<()> {
        self.require_locality(id).await?;

        let issue_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM issues WHERE locality_id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        if issue_count > 0 {
            return Err(AppError::Conflict(format!(
                "Cannot delete locality with {} issues. Deactivate it instead.",
                issue_count
            )));
        }

        let user_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE locality_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        if user_count > 0 {
            return Err(AppError::Conflict(format!(
                "Cannot delete locality with {} assigned users. Reassign them first.",
                user_count
            )));
        }

        sqlx::query("DELETE FROM localities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::info!("Locality {} deleted", id);
        Ok(())
    }

    // ==================== Staff Management ====================

    pub async fn create_staff(&self, dto: CreateStaffDto) -> Result<AdminUserDto> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        // Citizens register themselves through the public flow
        if dto.role == UserRole::Citizen {
            return Err(AppError::BadRequest(
                "Citizens register themselves. Use this API for representatives, PWD workers, or admins."
                    .to_string(),
            ));
        }

        if dto.role == UserRole::Representative && dto.locality_id.is_none() {
            return Err(AppError::Validation(
                "Representatives must be assigned to a locality".to_string(),
            ));
        }

        if let Some(locality_id) = dto.locality_id {
            let locality = self.require_locality(locality_id).await?;
            if !locality.is_active {
                return Err(AppError::BadRequest(
                    "Cannot assign user to inactive locality".to_string(),
                ));
            }
        }

        let mobile_number = normalize_mobile_number(&dto.mobile_number);

        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE mobile_number = $1");
        let existing = sqlx::query_as::<_, User>(&sql)
            .bind(&mobile_number)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(existing) = existing {
            if existing.role == dto.role {
                return Err(AppError::Conflict(format!(
                    "A {} with this mobile number already exists",
                    dto.role
                )));
            }

            // Upgrade the existing account to the new role
            let sql = format!(
                "UPDATE users \
                 SET role = $2, is_verified = TRUE, \
                     locality_id = COALESCE($3, locality_id), updated_at = NOW() \
                 WHERE id = $1 \
                 RETURNING {USER_COLUMNS}"
            );
            let upgraded = sqlx::query_as::<_, User>(&sql)
                .bind(existing.id)
                .bind(dto.role)
                .bind(dto.locality_id)
                .fetch_one(&self.pool)
                .await?;

            tracing::info!("User {} upgraded to role '{}'", upgraded.id, upgraded.role);
            return self.build_user_dto(upgraded).await;
        }

        let sql = format!(
            "INSERT INTO users (name, mobile_number, role, is_active, is_verified, locality_id) \
             VALUES ($1, $2, $3, TRUE, TRUE, $4) \
             RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&dto.name)
            .bind(&mobile_number)
            .bind(dto.role)
            .bind(dto.locality_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create user: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("User created: id={}, role={}", user.id, user.role);
        self.build_user_dto(user).await
    }

    pub async fn list_users(
        &self,
        query: &AdminUserQuery,
        pagination: &PaginationQuery,
    ) -> Result<AdminUserListDto> {
        let search_pattern = query
            .search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s.to_lowercase()));

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM users
            WHERE ($1::user_role IS NULL OR role = $1)
              AND ($2::bigint IS NULL OR locality_id = $2)
              AND ($3::boolean IS NULL OR is_active = $3)
              AND ($4::text IS NULL OR LOWER(name) LIKE $4 OR mobile_number LIKE $4)
            "#,
        )
        .bind(query.role)
        .bind(query.locality_id)
        .bind(query.is_active)
        .bind(search_pattern.as_deref())
        .fetch_one(&self.pool)
        .await?;

        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE ($1::user_role IS NULL OR role = $1) \
               AND ($2::bigint IS NULL OR locality_id = $2) \
               AND ($3::boolean IS NULL OR is_active = $3) \
               AND ($4::text IS NULL OR LOWER(name) LIKE $4 OR mobile_number LIKE $4) \
             ORDER BY created_at DESC \
             LIMIT $5 OFFSET $6"
        );

        let users = sqlx::query_as::<_, User>(&sql)
            .bind(query.role)
            .bind(query.locality_id)
            .bind(query.is_active)
            .bind(search_pattern.as_deref())
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await?;

        let mut items = Vec::with_capacity(users.len());
        for user in users {
            items.push(self.build_user_dto(user).await?);
        }

        Ok(AdminUserListDto {
            items,
            total,
            page: pagination.page,
            page_size: pagination.limit(),
            total_pages: pagination.total_pages(total),
        })
    }

    pub async fn get_user(&self, id: i64) -> Result<AdminUserDto> {
        let user = self.require_user(id).await?;
        self.build_user_dto(user).await
    }

    pub async fn update_user(
        &self,
        acting_admin_id: i64,
        user_id: i64,
        dto: UpdateUserDto,
    ) -> Result<AdminUserDto> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let user = self.require_user(user_id).await?;

        // Admins cannot demote themselves
        if user.id == acting_admin_id {
            if let Some(new_role) = dto.role {
                if new_role != UserRole::Admin {
                    return Err(AppError::BadRequest(
                        "Cannot change your own role".to_string(),
                    ));
                }
            }
        }

        if let Some(locality_id) = dto.locality_id {
            self.require_locality(locality_id).await?;
        }

        let sql = format!(
            "UPDATE users \
             SET name = COALESCE($2, name), \
                 role = COALESCE($3, role), \
                 is_active = COALESCE($4, is_active), \
                 locality_id = COALESCE($5, locality_id), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        );

        let updated = sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .bind(dto.name.as_deref())
            .bind(dto.role)
            .bind(dto.is_active)
            .bind(dto.locality_id)
            .fetch_one(&self.pool)
            .await?;

        self.build_user_dto(updated).await
    }

    /// Deactivate a user (soft delete)
    pub async fn deactivate_user(&self, acting_admin_id: i64, user_id: i64) -> Result<()> {
        let user = self.require_user(user_id).await?;

        if user.id == acting_admin_id {
            return Err(AppError::BadRequest(
                "Cannot deactivate yourself".to_string(),
            ));
        }

        sqlx::query("UPDATE users SET is_active = FALSE, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        tracing::info!("User {} deactivated", user_id);
        Ok(())
    }

    // ==================== Helpers ====================

    async fn require_locality(&self, id: i64) -> Result<Locality> {
        sqlx::query_as::<_, Locality>(
            "SELECT id, name, type, is_active, created_at, updated_at FROM localities WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Locality not found".to_string()))
    }

    async fn require_user(&self, id: i64) -> Result<User> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    async fn build_locality_dto(&self, locality: Locality) -> Result<AdminLocalityDto> {
        let representative_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE locality_id = $1 AND role = 'representative'",
        )
        .bind(locality.id)
        .fetch_one(&self.pool)
        .await?;

        let issue_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM issues WHERE locality_id = $1")
                .bind(locality.id)
                .fetch_one(&self.pool)
                .await?;

        Ok(AdminLocalityDto {
            id: locality.id,
            name: locality.name,
            locality_type: locality.locality_type,
            is_active: locality.is_active,
            created_at: locality.created_at,
            updated_at: locality.updated_at,
            representative_count,
            issue_count,
        })
    }

    async fn build_user_dto(&self, user: User) -> Result<AdminUserDto> {
        let (locality_name, locality_type) = match user.locality_id {
            Some(locality_id) => {
                let locality = sqlx::query_as::<_, Locality>(
                    "SELECT id, name, type, is_active, created_at, updated_at FROM localities WHERE id = $1",
                )
                .bind(locality_id)
                .fetch_optional(&self.pool)
                .await?;
                match locality {
                    Some(l) => (Some(l.name), Some(l.locality_type)),
                    None => (None, None),
                }
            }
            None => (None, None),
        };

        let total_reports =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM issues WHERE reporter_id = $1")
                .bind(user.id)
                .fetch_one(&self.pool)
                .await?;

        let assigned_issues = if user.role == UserRole::Representative {
            sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM issues WHERE assigned_parshad_id = $1",
            )
            .bind(user.id)
            .fetch_one(&self.pool)
            .await?
        } else {
            0
        };

        Ok(AdminUserDto {
            id: user.id,
            name: user.name,
            mobile_number: user.mobile_number,
            role: user.role,
            is_active: user.is_active,
            is_verified: user.is_verified,
            locality_id: user.locality_id,
            locality_name,
            locality_type,
            created_at: user.created_at,
            updated_at: user.updated_at,
            total_reports,
            assigned_issues,
        })
    }
}

use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::localities::dtos::{
    LocalityDirectoryDto, LocalityDirectoryQuery, RepresentativeInfoDto,
};
use crate::features::localities::models::Locality;
use crate::features::users::models::User;

/// Public read side of the locality directory
pub struct LocalityService {
    pool: PgPool,
}

impl LocalityService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a locality row by id, active or not
    pub async fn get_by_id(&self, id: i64) -> Result<Locality> {
        sqlx::query_as::<_, Locality>(
            r#"
            SELECT id, name, type, is_active, created_at, updated_at
            FROM localities
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch locality {}: {:?}", id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Locality {} not found", id)))
    }

    /// List all active localities with their active representatives
    pub async fn list_active(&self, query: &LocalityDirectoryQuery) -> Result<Vec<LocalityDirectoryDto>> {
        let search_pattern = query
            .search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s.to_lowercase()));

        let localities = sqlx::query_as::<_, Locality>(
            r#"
            SELECT id, name, type, is_active, created_at, updated_at
            FROM localities
            WHERE is_active = TRUE
              AND ($1::locality_type IS NULL OR type = $1)
              AND ($2::text IS NULL OR LOWER(name) LIKE $2)
            ORDER BY name ASC
            "#,
        )
        .bind(query.locality_type)
        .bind(search_pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list localities: {:?}", e);
            AppError::Database(e)
        })?;

        let mut items = Vec::with_capacity(localities.len());
        for locality in localities {
            let representatives = self.active_representatives(locality.id).await?;
            items.push(LocalityDirectoryDto {
                id: locality.id,
                name: locality.name,
                locality_type: locality.locality_type,
                representatives,
            });
        }

        Ok(items)
    }

    /// Get one active locality with its active representatives
    pub async fn get_active(&self, id: i64) -> Result<LocalityDirectoryDto> {
        let locality = self.get_by_id(id).await?;

        if !locality.is_active {
            return Err(AppError::NotFound(format!("Locality {} not found", id)));
        }

        let representatives = self.active_representatives(locality.id).await?;

        Ok(LocalityDirectoryDto {
            id: locality.id,
            name: locality.name,
            locality_type: locality.locality_type,
            representatives,
        })
    }

    async fn active_representatives(&self, locality_id: i64) -> Result<Vec<RepresentativeInfoDto>> {
        let representatives = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, mobile_number, role, is_active, is_verified, locality_id,
                   created_at, updated_at
            FROM users
            WHERE role = 'representative' AND locality_id = $1 AND is_active = TRUE
            ORDER BY id ASC
            "#,
        )
        .bind(locality_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to fetch representatives for locality {}: {:?}",
                locality_id,
                e
            );
            AppError::Database(e)
        })?;

        Ok(representatives
            .into_iter()
            .map(|r| RepresentativeInfoDto {
                id: r.id,
                name: r.name,
            })
            .collect())
    }
}

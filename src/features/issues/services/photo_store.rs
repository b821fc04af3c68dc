use sqlx::{PgPool, Postgres, Transaction};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::core::config::UploadConfig;
use crate::core::error::{AppError, Result};
use crate::features::issues::dtos::IssuePhotoDto;
use crate::features::issues::models::IssuePhoto;
use crate::modules::storage::MinIOClient;

/// A photo received from a multipart upload, not yet persisted anywhere
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub data: Vec<u8>,
    pub filename: String,
    pub content_type: String,
}

/// A blob written to object storage, not yet referenced by the database
#[derive(Debug, Clone)]
pub struct StoredPhoto {
    pub object_key: String,
    pub filename: String,
    pub file_size: i64,
    pub content_type: String,
}

/// Upload limits. Passed in explicitly at construction so the store can be
/// exercised in isolation, rather than read from ambient globals.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_photos_per_issue: usize,
    pub max_photo_bytes: usize,
    pub allowed_content_types: Vec<String>,
}

impl From<UploadConfig> for UploadPolicy {
    fn from(config: UploadConfig) -> Self {
        Self {
            max_photos_per_issue: config.max_photos_per_issue,
            max_photo_bytes: config.max_photo_bytes,
            allowed_content_types: config.allowed_content_types,
        }
    }
}

impl UploadPolicy {
    /// Validate a whole batch before any upload or persistence begins.
    /// A violation anywhere aborts the call with nothing created.
    pub fn validate_batch(&self, photos: &[PhotoUpload]) -> Result<()> {
        if photos.len() > self.max_photos_per_issue {
            return Err(AppError::Validation(format!(
                "Maximum {} photos allowed, got {}",
                self.max_photos_per_issue,
                photos.len()
            )));
        }

        for photo in photos {
            self.validate_one(photo)?;
        }

        Ok(())
    }

    pub fn validate_one(&self, photo: &PhotoUpload) -> Result<()> {
        if !self
            .allowed_content_types
            .iter()
            .any(|t| t == &photo.content_type)
        {
            return Err(AppError::Validation(format!(
                "Invalid file type '{}'. Allowed types: {}",
                photo.content_type,
                self.allowed_content_types.join(", ")
            )));
        }

        if photo.data.len() > self.max_photo_bytes {
            return Err(AppError::Validation(format!(
                "File '{}' exceeds maximum size of {} bytes",
                photo.filename, self.max_photo_bytes
            )));
        }

        Ok(())
    }
}

/// Photo attachment manager: moves uploaded photos into object storage and
/// links them to issues with all-or-nothing semantics.
///
/// The blob store cannot join the database transaction, so this is the
/// compensating-action boundary: blobs go in first, rows last, and blobs
/// uploaded by a call that ultimately fails are deleted again. An orphaned
/// blob that survives a failed compensation is tolerable; a photo row
/// pointing at a missing blob is not.
pub struct PhotoStore {
    pool: PgPool,
    storage: Arc<MinIOClient>,
    policy: UploadPolicy,
}

impl PhotoStore {
    pub fn new(pool: PgPool, storage: Arc<MinIOClient>, policy: UploadPolicy) -> Self {
        Self {
            pool,
            storage,
            policy,
        }
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Upload a validated batch. If any upload fails part-way, every blob
    /// already uploaded by this call is deleted and a single aggregate
    /// failure is returned.
    pub async fn upload_batch(&self, photos: &[PhotoUpload]) -> Result<Vec<StoredPhoto>> {
        let mut stored: Vec<StoredPhoto> = Vec::with_capacity(photos.len());

        for photo in photos {
            match self.upload_one(photo).await {
                Ok(s) => stored.push(s),
                Err(e) => {
                    warn!(
                        "Photo upload failed after {} of {} succeeded, compensating",
                        stored.len(),
                        photos.len()
                    );
                    self.discard(&stored).await;
                    return Err(AppError::UploadFailure(format!(
                        "upload of '{}' failed: {}",
                        photo.filename, e
                    )));
                }
            }
        }

        Ok(stored)
    }

    /// Upload a single photo under a fresh object key
    pub async fn upload_one(&self, photo: &PhotoUpload) -> Result<StoredPhoto> {
        let object_key = Self::generate_key(&photo.filename, &photo.content_type);

        self.storage
            .upload(&object_key, photo.data.clone(), &photo.content_type)
            .await?;

        debug!("Photo uploaded: {}", object_key);

        Ok(StoredPhoto {
            object_key,
            filename: photo.filename.clone(),
            file_size: photo.data.len() as i64,
            content_type: photo.content_type.clone(),
        })
    }

    /// Best-effort removal of blobs whose database linkage never happened.
    /// Failures are logged, not surfaced: the blob store has no transactions
    /// and a leftover object is acceptable where a dangling row is not.
    pub async fn discard(&self, stored: &[StoredPhoto]) {
        for photo in stored {
            self.discard_key(&photo.object_key).await;
        }
    }

    /// Best-effort removal of blobs by object key (issue deletion)
    pub async fn discard_keys(&self, object_keys: &[String]) {
        for key in object_keys {
            self.discard_key(key).await;
        }
    }

    async fn discard_key(&self, object_key: &str) {
        if let Err(e) = self.storage.delete(object_key).await {
            warn!("Failed to delete orphaned blob '{}': {}", object_key, e);
        }
    }

    /// Insert photo rows for uploaded blobs inside the caller's transaction
    pub async fn insert_rows(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        issue_id: i64,
        stored: &[StoredPhoto],
    ) -> Result<Vec<IssuePhoto>> {
        let mut rows = Vec::with_capacity(stored.len());

        for photo in stored {
            let row = sqlx::query_as::<_, IssuePhoto>(
                r#"
                INSERT INTO issue_photos (issue_id, object_key, filename, file_size, content_type)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, issue_id, object_key, filename, file_size, content_type, created_at
                "#,
            )
            .bind(issue_id)
            .bind(&photo.object_key)
            .bind(&photo.filename)
            .bind(photo.file_size)
            .bind(&photo.content_type)
            .fetch_one(&mut **tx)
            .await
            .map_err(|e| {
                AppError::UploadFailure(format!(
                    "failed to record photo '{}': {}",
                    photo.filename, e
                ))
            })?;

            rows.push(row);
        }

        Ok(rows)
    }

    /// Load the photos of an issue
    pub async fn list_for_issue(&self, issue_id: i64) -> Result<Vec<IssuePhoto>> {
        let photos = sqlx::query_as::<_, IssuePhoto>(
            r#"
            SELECT id, issue_id, object_key, filename, file_size, content_type, created_at
            FROM issue_photos
            WHERE issue_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(issue_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch photos for issue {}: {:?}", issue_id, e);
            AppError::Database(e)
        })?;

        Ok(photos)
    }

    /// Translate stored photos to response DTOs with presigned URLs.
    /// Raw object keys never reach callers.
    pub async fn to_dtos(&self, photos: Vec<IssuePhoto>) -> Result<Vec<IssuePhotoDto>> {
        let mut dtos = Vec::with_capacity(photos.len());

        for photo in photos {
            let photo_url = self.storage.get_presigned_url(&photo.object_key).await?;
            dtos.push(IssuePhotoDto {
                id: photo.id,
                photo_url,
                filename: photo.filename,
                file_size: photo.file_size,
                content_type: photo.content_type,
                created_at: photo.created_at,
            });
        }

        Ok(dtos)
    }

    /// Presign an arbitrary stored object key (completion photos)
    pub async fn presign(&self, object_key: &str) -> Result<String> {
        self.storage.get_presigned_url(object_key).await
    }

    /// Generate a fresh object key: issues/{uuid}.{ext}
    fn generate_key(filename: &str, content_type: &str) -> String {
        let extension = extension_for(content_type)
            .unwrap_or_else(|| filename.rsplit('.').next().unwrap_or("bin"));
        format!("issues/{}.{}", Uuid::new_v4(), extension)
    }
}

/// Get file extension from content type
fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> UploadPolicy {
        UploadPolicy {
            max_photos_per_issue: 3,
            max_photo_bytes: 1024,
            allowed_content_types: vec!["image/jpeg".to_string(), "image/png".to_string()],
        }
    }

    fn photo(filename: &str, content_type: &str, size: usize) -> PhotoUpload {
        PhotoUpload {
            data: vec![0u8; size],
            filename: filename.to_string(),
            content_type: content_type.to_string(),
        }
    }

    #[test]
    fn test_batch_within_limits_passes() {
        let photos = vec![
            photo("a.jpg", "image/jpeg", 100),
            photo("b.png", "image/png", 1024),
        ];
        assert!(policy().validate_batch(&photos).is_ok());
    }

    #[test]
    fn test_empty_batch_passes() {
        assert!(policy().validate_batch(&[]).is_ok());
    }

    #[test]
    fn test_batch_over_count_rejected() {
        let photos = vec![
            photo("a.jpg", "image/jpeg", 10),
            photo("b.jpg", "image/jpeg", 10),
            photo("c.jpg", "image/jpeg", 10),
            photo("d.jpg", "image/jpeg", 10),
        ];
        let err = policy().validate_batch(&photos).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_disallowed_content_type_rejected() {
        let photos = vec![photo("a.gif", "image/gif", 10)];
        let err = policy().validate_batch(&photos).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_oversized_photo_rejected() {
        let photos = vec![photo("a.jpg", "image/jpeg", 1025)];
        let err = policy().validate_batch(&photos).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_one_bad_photo_fails_whole_batch() {
        let photos = vec![
            photo("a.jpg", "image/jpeg", 10),
            photo("b.bmp", "image/bmp", 10),
        ];
        assert!(policy().validate_batch(&photos).is_err());
    }

    #[test]
    fn test_extension_for_known_and_unknown_types() {
        assert_eq!(extension_for("image/jpeg"), Some("jpg"));
        assert_eq!(extension_for("image/png"), Some("png"));
        assert_eq!(extension_for("image/webp"), Some("webp"));
        assert_eq!(extension_for("application/pdf"), None);
    }
}

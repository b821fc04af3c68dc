use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for a photo attached to an issue.
///
/// Created only as part of issue creation or a completion update; never
/// independently mutated; removed only by cascading issue deletion.
#[derive(Debug, Clone, FromRow)]
pub struct IssuePhoto {
    pub id: i64,
    pub issue_id: i64,
    /// Opaque storage key; translated to a presigned URL on the read side
    pub object_key: String,
    pub filename: String,
    pub file_size: i64,
    pub content_type: String,
    pub created_at: DateTime<Utc>,
}

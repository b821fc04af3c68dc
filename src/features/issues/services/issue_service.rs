use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::CurrentUser;
use crate::features::issues::dtos::{
    CreateIssueDto, IssueFilterQuery, IssueListDto, IssueMapDto, IssueResponseDto,
};
use crate::features::issues::models::{Issue, IssuePhoto, IssueStatus, IssueType};
use crate::features::localities::models::Locality;
use crate::features::localities::services::RepresentativeResolver;
use crate::shared::types::PaginationQuery;

use super::photo_store::{PhotoStore, PhotoUpload, StoredPhoto};

/// Earth's radius in kilometers (for Haversine formula)
const EARTH_RADIUS_KM: f64 = 6371.0;

const ISSUE_COLUMNS: &str = "id, issue_type, description, latitude, longitude, locality_id, \
     status, reporter_id, assigned_parshad_id, assignment_notes, progress_notes, \
     completion_description, completion_photo_key, completed_at, completed_by_id, \
     created_at, updated_at";

/// Calculate Haversine distance between two points in kilometers
pub fn haversine_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// The source state a transition into `target` requires.
/// Derived from the single `next()` lookup so the two can never disagree.
fn required_source(target: IssueStatus) -> Option<IssueStatus> {
    const ALL: [IssueStatus; 6] = [
        IssueStatus::Reported,
        IssueStatus::Assigned,
        IssueStatus::RepresentativeAcknowledged,
        IssueStatus::PwdWorking,
        IssueStatus::PwdCompleted,
        IssueStatus::RepresentativeReviewed,
    ];
    ALL.into_iter().find(|s| s.next() == Some(target))
}

/// Check that `actor` may move an issue in `current` status to `target`,
/// returning the source state the conditional update must match.
///
/// Pure precondition check: the stored row is only touched by the
/// conditional update that follows, so a rejected call has no effect and
/// repeating it yields the same error.
fn authorize_transition(
    actor: &CurrentUser,
    current: IssueStatus,
    assigned_parshad_id: Option<i64>,
    target: IssueStatus,
) -> Result<IssueStatus> {
    let required_role = target.required_role().ok_or_else(|| {
        AppError::Forbidden(format!(
            "Status '{}' is set by the system and cannot be requested",
            target
        ))
    })?;

    if actor.role != required_role {
        return Err(AppError::Forbidden(format!(
            "Only a {} can move an issue to '{}'",
            required_role, target
        )));
    }

    if target.requires_assigned_representative() && assigned_parshad_id != Some(actor.id) {
        return Err(AppError::Forbidden(
            "Only the representative assigned to this issue can perform this step".to_string(),
        ));
    }

    // `required_role` is Some for every endpoint-reachable target, and all
    // of those have a predecessor in the chain
    let expected = required_source(target).ok_or_else(|| {
        AppError::Forbidden(format!("Status '{}' cannot be transitioned into", target))
    })?;

    if current != expected {
        return Err(AppError::InvalidTransition {
            expected: expected.to_string(),
            actual: current.to_string(),
        });
    }

    Ok(expected)
}

/// A status-change request against the lifecycle engine
#[derive(Debug)]
pub struct TransitionRequest {
    pub target_status: IssueStatus,
    pub progress_notes: Option<String>,
    pub completion_description: Option<String>,
    pub completion_photo: Option<PhotoUpload>,
}

/// Map query parameters after handler-side validation
#[derive(Debug, Clone)]
pub struct NearbyQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
    pub issue_type: Option<IssueType>,
    pub status: Option<IssueStatus>,
}

/// Lightweight row for map pins
#[derive(Debug, sqlx::FromRow)]
struct IssuePin {
    id: i64,
    issue_type: IssueType,
    latitude: f64,
    longitude: f64,
    status: IssueStatus,
}

/// Issue lifecycle engine.
///
/// Owns the status field of every issue: creation (with auto-assignment to
/// the locality's representative) and every later status change go through
/// here. Status changes use a conditional update on the stored status, so
/// of two concurrent callers racing on the same source state exactly one
/// succeeds and the other fails its precondition check.
pub struct IssueService {
    pool: PgPool,
    photo_store: Arc<PhotoStore>,
    resolver: Arc<RepresentativeResolver>,
}

impl IssueService {
    pub fn new(
        pool: PgPool,
        photo_store: Arc<PhotoStore>,
        resolver: Arc<RepresentativeResolver>,
    ) -> Self {
        Self {
            pool,
            photo_store,
            resolver,
        }
    }

    /// Create a new issue with its photo batch.
    ///
    /// Photos are pre-validated before anything is persisted, then uploaded
    /// to the blob store, then the issue row and photo rows are written in
    /// one transaction. The issue is persisted already in its final initial
    /// status (reported or assigned); it is never observable mid-transition.
    /// If the transaction fails, blobs uploaded by this call are deleted.
    pub async fn create(
        &self,
        reporter: &CurrentUser,
        dto: CreateIssueDto,
        photos: Vec<PhotoUpload>,
    ) -> Result<IssueResponseDto> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        // Fail fast on the whole batch before any upload begins
        self.photo_store.policy().validate_batch(&photos)?;

        let locality = match dto.locality_id {
            Some(id) => Some(self.require_locality(id).await?),
            None => None,
        };

        // Auto-assignment: bind the new issue to the active representative
        // of its locality, if one exists
        let representative = self.resolver.resolve(dto.locality_id).await?;

        let (initial_status, assigned_parshad_id, assignment_message) = match (&locality, &representative) {
            (Some(loc), Some(rep)) => (
                IssueStatus::Assigned,
                Some(rep.id),
                Some(format!(
                    "Auto-assigned to {} {} of {}",
                    loc.locality_type.representative_title(),
                    rep.name,
                    loc.name
                )),
            ),
            (Some(loc), None) => (
                IssueStatus::Reported,
                None,
                Some(format!(
                    "No {} assigned to {}. Issue is unassigned.",
                    loc.locality_type.representative_title(),
                    loc.name
                )),
            ),
            _ => (IssueStatus::Reported, None, None),
        };

        // Blobs first, rows last: the blob store has no transactions, so the
        // database write is the commit point and blob deletes compensate
        let stored = self.photo_store.upload_batch(&photos).await?;

        let (issue, photo_rows) = match self
            .persist_new_issue(
                &dto,
                reporter.id,
                initial_status,
                assigned_parshad_id,
                assignment_message.as_deref(),
                &stored,
            )
            .await
        {
            Ok(pair) => pair,
            Err(e) => {
                self.photo_store.discard(&stored).await;
                return Err(e);
            }
        };

        tracing::info!(
            "Issue {} created with status '{}' ({} photos)",
            issue.id,
            issue.status,
            photo_rows.len()
        );

        self.build_response(issue, photo_rows, locality, assignment_message)
            .await
    }

    async fn persist_new_issue(
        &self,
        dto: &CreateIssueDto,
        reporter_id: i64,
        status: IssueStatus,
        assigned_parshad_id: Option<i64>,
        assignment_notes: Option<&str>,
        stored: &[StoredPhoto],
    ) -> Result<(Issue, Vec<IssuePhoto>)> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "INSERT INTO issues (issue_type, description, latitude, longitude, locality_id, \
             status, reporter_id, assigned_parshad_id, assignment_notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {ISSUE_COLUMNS}"
        );

        let issue = sqlx::query_as::<_, Issue>(&sql)
            .bind(dto.issue_type)
            .bind(&dto.description)
            .bind(dto.latitude)
            .bind(dto.longitude)
            .bind(dto.locality_id)
            .bind(status)
            .bind(reporter_id)
            .bind(assigned_parshad_id)
            .bind(assignment_notes)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create issue: {:?}", e);
                AppError::Database(e)
            })?;

        let photo_rows = self
            .photo_store
            .insert_rows(&mut tx, issue.id, stored)
            .await?;

        tx.commit().await?;

        Ok((issue, photo_rows))
    }

    /// Apply a status transition on behalf of `actor`.
    ///
    /// The target must be the immediate successor of the issue's current
    /// status and the actor must carry the role the transition requires;
    /// representative steps additionally require the assigned representative.
    /// A mismatched source state fails with no partial write, and a second
    /// call with the same bad target fails identically.
    pub async fn transition(
        &self,
        actor: &CurrentUser,
        issue_id: i64,
        request: TransitionRequest,
    ) -> Result<IssueResponseDto> {
        let issue = self.get_issue_row(issue_id).await?;
        let target = request.target_status;

        let expected = authorize_transition(
            actor,
            issue.status,
            issue.assigned_parshad_id,
            target,
        )?;

        let updated = if target == IssueStatus::PwdCompleted {
            self.complete_issue(actor, &issue, expected, &request).await?
        } else {
            self.apply_transition(issue.id, expected, target, request.progress_notes.as_deref())
                .await?
        };

        tracing::info!(
            "Issue {} moved from '{}' to '{}' by user {}",
            updated.id,
            expected,
            updated.status,
            actor.id
        );

        let photos = self.photo_store.list_for_issue(updated.id).await?;
        let locality = self.locality_for(updated.locality_id).await?;
        self.build_response(updated, photos, locality, None).await
    }

    /// Conditional update for transitions that only move the status
    /// (and optionally carry progress notes)
    async fn apply_transition(
        &self,
        issue_id: i64,
        from: IssueStatus,
        to: IssueStatus,
        progress_notes: Option<&str>,
    ) -> Result<Issue> {
        let sql = format!(
            "UPDATE issues \
             SET status = $3, progress_notes = COALESCE($4, progress_notes), updated_at = NOW() \
             WHERE id = $1 AND status = $2 \
             RETURNING {ISSUE_COLUMNS}"
        );

        let updated = sqlx::query_as::<_, Issue>(&sql)
            .bind(issue_id)
            .bind(from)
            .bind(to)
            .bind(progress_notes)
            .fetch_optional(&self.pool)
            .await?;

        match updated {
            Some(issue) => Ok(issue),
            None => Err(self.stale_transition_error(issue_id, from).await),
        }
    }

    /// The pwd_completed arm: the only transition that writes the completion
    /// fields, and it writes all of them together, exactly once.
    async fn complete_issue(
        &self,
        actor: &CurrentUser,
        issue: &Issue,
        from: IssueStatus,
        request: &TransitionRequest,
    ) -> Result<Issue> {
        let description = request
            .completion_description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| {
                AppError::Validation(
                    "completion_description is required to mark work complete".to_string(),
                )
            })?;

        if description.len() > 2000 {
            return Err(AppError::Validation(
                "completion_description must not exceed 2000 characters".to_string(),
            ));
        }

        let completion_photo = match &request.completion_photo {
            Some(photo) => {
                self.photo_store.policy().validate_one(photo)?;
                Some(self.photo_store.upload_one(photo).await?)
            }
            None => None,
        };
        let completion_photo_key = completion_photo.as_ref().map(|p| p.object_key.clone());

        let sql = format!(
            "UPDATE issues \
             SET status = $3, completion_description = $4, completion_photo_key = $5, \
                 completed_at = NOW(), completed_by_id = $6, updated_at = NOW() \
             WHERE id = $1 AND status = $2 \
             RETURNING {ISSUE_COLUMNS}"
        );

        let updated = sqlx::query_as::<_, Issue>(&sql)
            .bind(issue.id)
            .bind(from)
            .bind(IssueStatus::PwdCompleted)
            .bind(description)
            .bind(completion_photo_key.as_deref())
            .bind(actor.id)
            .fetch_optional(&self.pool)
            .await;

        match updated {
            Ok(Some(row)) => Ok(row),
            Ok(None) => {
                // Lost the race; the uploaded completion photo has no row
                if let Some(stored) = completion_photo {
                    self.photo_store.discard(std::slice::from_ref(&stored)).await;
                }
                Err(self.stale_transition_error(issue.id, from).await)
            }
            Err(e) => {
                if let Some(stored) = completion_photo {
                    self.photo_store.discard(std::slice::from_ref(&stored)).await;
                }
                Err(AppError::Database(e))
            }
        }
    }

    /// A conditional update matched no row: either the issue vanished or a
    /// concurrent transition changed its status first
    async fn stale_transition_error(&self, issue_id: i64, expected: IssueStatus) -> AppError {
        match self.get_issue_row(issue_id).await {
            Ok(current) => AppError::InvalidTransition {
                expected: expected.to_string(),
                actual: current.status.to_string(),
            },
            Err(e) => e,
        }
    }

    /// Get a single issue with photos and locality context
    pub async fn get(&self, issue_id: i64) -> Result<IssueResponseDto> {
        let issue = self.get_issue_row(issue_id).await?;
        let photos = self.photo_store.list_for_issue(issue.id).await?;
        let locality = self.locality_for(issue.locality_id).await?;
        self.build_response(issue, photos, locality, None).await
    }

    /// Paginated listing of the reporter's own issues, newest first
    pub async fn list_by_reporter(
        &self,
        reporter_id: i64,
        filter: &IssueFilterQuery,
        pagination: &PaginationQuery,
    ) -> Result<IssueListDto> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM issues
            WHERE reporter_id = $1
              AND ($2::issue_type IS NULL OR issue_type = $2)
              AND ($3::issue_status IS NULL OR status = $3)
            "#,
        )
        .bind(reporter_id)
        .bind(filter.issue_type)
        .bind(filter.status)
        .fetch_one(&self.pool)
        .await?;

        let sql = format!(
            "SELECT {ISSUE_COLUMNS} FROM issues \
             WHERE reporter_id = $1 \
               AND ($2::issue_type IS NULL OR issue_type = $2) \
               AND ($3::issue_status IS NULL OR status = $3) \
             ORDER BY created_at DESC \
             LIMIT $4 OFFSET $5"
        );

        let issues = sqlx::query_as::<_, Issue>(&sql)
            .bind(reporter_id)
            .bind(filter.issue_type)
            .bind(filter.status)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await?;

        let mut items = Vec::with_capacity(issues.len());
        for issue in issues {
            let photos = self.photo_store.list_for_issue(issue.id).await?;
            let locality = self.locality_for(issue.locality_id).await?;
            items.push(self.build_response(issue, photos, locality, None).await?);
        }

        Ok(IssueListDto {
            items,
            total,
            page: pagination.page,
            page_size: pagination.limit(),
            total_pages: pagination.total_pages(total),
        })
    }

    /// Issues within `radius_km` of a center point, for map display.
    ///
    /// Equality filters run in SQL; the distance check is a full scan with
    /// in-process Haversine. Correctness over efficiency: fine at small
    /// scale, swap in a spatial index before production volumes while
    /// keeping these exact distance semantics.
    pub async fn nearby(&self, query: &NearbyQuery) -> Result<Vec<IssueMapDto>> {
        let pins = sqlx::query_as::<_, IssuePin>(
            r#"
            SELECT id, issue_type, latitude, longitude, status
            FROM issues
            WHERE ($1::issue_type IS NULL OR issue_type = $1)
              AND ($2::issue_status IS NULL OR status = $2)
            "#,
        )
        .bind(query.issue_type)
        .bind(query.status)
        .fetch_all(&self.pool)
        .await?;

        let nearby = pins
            .into_iter()
            .filter(|pin| {
                haversine_distance_km(query.latitude, query.longitude, pin.latitude, pin.longitude)
                    <= query.radius_km
            })
            .map(|pin| IssueMapDto {
                id: pin.id,
                issue_type: pin.issue_type,
                latitude: pin.latitude,
                longitude: pin.longitude,
                status: pin.status,
            })
            .collect();

        Ok(nearby)
    }

    /// Delete an issue. Photo rows go with it in the same transaction
    /// (cascade); blobs are removed best-effort afterwards.
    pub async fn delete(&self, issue_id: i64) -> Result<()> {
        let issue = self.get_issue_row(issue_id).await?;
        let photos = self.photo_store.list_for_issue(issue_id).await?;

        let mut object_keys: Vec<String> = photos.into_iter().map(|p| p.object_key).collect();
        if let Some(key) = issue.completion_photo_key {
            object_keys.push(key);
        }

        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM issues WHERE id = $1")
            .bind(issue_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        self.photo_store.discard_keys(&object_keys).await;

        tracing::info!(
            "Issue {} deleted ({} blobs scheduled for removal)",
            issue_id,
            object_keys.len()
        );

        Ok(())
    }

    async fn get_issue_row(&self, issue_id: i64) -> Result<Issue> {
        let sql = format!("SELECT {ISSUE_COLUMNS} FROM issues WHERE id = $1");

        sqlx::query_as::<_, Issue>(&sql)
            .bind(issue_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Issue {} not found", issue_id)))
    }

    async fn require_locality(&self, locality_id: i64) -> Result<Locality> {
        self.locality_for(Some(locality_id))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Locality {} not found", locality_id)))
    }

    async fn locality_for(&self, locality_id: Option<i64>) -> Result<Option<Locality>> {
        let Some(locality_id) = locality_id else {
            return Ok(None);
        };

        let locality = sqlx::query_as::<_, Locality>(
            r#"
            SELECT id, name, type, is_active, created_at, updated_at
            FROM localities
            WHERE id = $1
            "#,
        )
        .bind(locality_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(locality)
    }

    async fn build_response(
        &self,
        issue: Issue,
        photos: Vec<IssuePhoto>,
        locality: Option<Locality>,
        assignment_message: Option<String>,
    ) -> Result<IssueResponseDto> {
        let photo_dtos = self.photo_store.to_dtos(photos).await?;

        let completion_photo_url = match &issue.completion_photo_key {
            Some(key) => Some(self.photo_store.presign(key).await?),
            None => None,
        };

        Ok(IssueResponseDto {
            id: issue.id,
            issue_type: issue.issue_type,
            description: issue.description,
            latitude: issue.latitude,
            longitude: issue.longitude,
            locality_id: issue.locality_id,
            locality_name: locality.as_ref().map(|l| l.name.clone()),
            locality_type: locality.as_ref().map(|l| l.locality_type),
            status: issue.status,
            reporter_id: issue.reporter_id,
            assigned_parshad_id: issue.assigned_parshad_id,
            assignment_message,
            progress_notes: issue.progress_notes,
            completion_description: issue.completion_description,
            completion_photo_url,
            completed_at: issue.completed_at,
            completed_by_id: issue.completed_by_id,
            created_at: issue.created_at,
            updated_at: issue.updated_at,
            photos: photo_dtos,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_zero_distance() {
        assert!(haversine_distance_km(12.9716, 77.5946, 12.9716, 77.5946) < 1e-9);
    }

    #[test]
    fn test_haversine_is_symmetric() {
        let d1 = haversine_distance_km(0.0, 0.0, 1.0, 1.0);
        let d2 = haversine_distance_km(1.0, 1.0, 0.0, 0.0);
        assert!((d1 - d2).abs() < 1e-9);
    }

    #[test]
    fn test_haversine_near_origin_is_within_one_km() {
        // (0.001 deg, 0.001 deg) is roughly 157 m from the origin
        let d = haversine_distance_km(0.0, 0.0, 0.001, 0.001);
        assert!(d > 0.1 && d < 0.2, "expected ~0.157 km, got {}", d);
    }

    #[test]
    fn test_haversine_one_degree_is_far_outside_one_km() {
        // (1 deg, 1 deg) is roughly 157 km from the origin
        let d = haversine_distance_km(0.0, 0.0, 1.0, 1.0);
        assert!(d > 150.0 && d < 165.0, "expected ~157 km, got {}", d);
    }

    use crate::features::users::models::UserRole;

    fn actor(id: i64, role: UserRole) -> CurrentUser {
        CurrentUser {
            id,
            name: format!("user-{}", id),
            mobile_number: "+919876543210".to_string(),
            role,
            locality_id: None,
        }
    }

    #[test]
    fn test_assigned_representative_may_acknowledge() {
        let rep = actor(42, UserRole::Representative);
        let expected = authorize_transition(
            &rep,
            IssueStatus::Assigned,
            Some(42),
            IssueStatus::RepresentativeAcknowledged,
        )
        .unwrap();
        assert_eq!(expected, IssueStatus::Assigned);
    }

    #[test]
    fn test_other_representative_may_not_acknowledge() {
        let rep = actor(7, UserRole::Representative);
        let err = authorize_transition(
            &rep,
            IssueStatus::Assigned,
            Some(42),
            IssueStatus::RepresentativeAcknowledged,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_wrong_role_is_rejected() {
        let citizen = actor(1, UserRole::Citizen);
        let err = authorize_transition(
            &citizen,
            IssueStatus::RepresentativeAcknowledged,
            Some(42),
            IssueStatus::PwdWorking,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let worker = actor(9, UserRole::PwdWorker);
        assert!(authorize_transition(
            &worker,
            IssueStatus::RepresentativeAcknowledged,
            Some(42),
            IssueStatus::PwdWorking,
        )
        .is_ok());
    }

    #[test]
    fn test_skipping_a_stage_is_an_invalid_transition() {
        let worker = actor(9, UserRole::PwdWorker);
        let err = authorize_transition(
            &worker,
            IssueStatus::Assigned,
            Some(42),
            IssueStatus::PwdWorking,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition { .. }));
    }

    #[test]
    fn test_reverse_transition_is_rejected() {
        let worker = actor(9, UserRole::PwdWorker);
        let err = authorize_transition(
            &worker,
            IssueStatus::PwdCompleted,
            Some(42),
            IssueStatus::PwdWorking,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition { .. }));
    }

    #[test]
    fn test_rejection_is_idempotent() {
        // Two identical calls with a bad target produce the same error
        let worker = actor(9, UserRole::PwdWorker);
        for _ in 0..2 {
            let err = authorize_transition(
                &worker,
                IssueStatus::Reported,
                None,
                IssueStatus::PwdWorking,
            )
            .unwrap_err();
            match err {
                AppError::InvalidTransition { expected, actual } => {
                    assert_eq!(expected, "representative_acknowledged");
                    assert_eq!(actual, "reported");
                }
                other => panic!("unexpected error: {:?}", other),
            }
        }
    }

    #[test]
    fn test_system_statuses_cannot_be_requested() {
        let admin = actor(1, UserRole::Admin);
        for target in [IssueStatus::Reported, IssueStatus::Assigned] {
            let err = authorize_transition(&admin, IssueStatus::Reported, None, target)
                .unwrap_err();
            assert!(matches!(err, AppError::Forbidden(_)));
        }
    }

    #[test]
    fn test_terminal_state_allows_nothing_further() {
        let rep = actor(42, UserRole::Representative);
        let err = authorize_transition(
            &rep,
            IssueStatus::RepresentativeReviewed,
            Some(42),
            IssueStatus::RepresentativeAcknowledged,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition { .. }));
    }

    #[test]
    fn test_required_source_follows_the_chain() {
        assert_eq!(
            required_source(IssueStatus::Assigned),
            Some(IssueStatus::Reported)
        );
        assert_eq!(
            required_source(IssueStatus::RepresentativeAcknowledged),
            Some(IssueStatus::Assigned)
        );
        assert_eq!(
            required_source(IssueStatus::PwdWorking),
            Some(IssueStatus::RepresentativeAcknowledged)
        );
        assert_eq!(
            required_source(IssueStatus::PwdCompleted),
            Some(IssueStatus::PwdWorking)
        );
        assert_eq!(
            required_source(IssueStatus::RepresentativeReviewed),
            Some(IssueStatus::PwdCompleted)
        );
        // Nothing transitions into the initial state
        assert_eq!(required_source(IssueStatus::Reported), None);
    }
}

//! Issue handlers
//!
//! Users report problems from the mobile client (photo mandatory, like a
//! return); admins triage them and can push the referenced bike into
//! maintenance — unless it is mid-rental, in which case the bike action is
//! silently skipped (the original console behaves the same way).

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use shared::AppState;
use shared::models::{AppNotification, Bike, BikeAction, BikeStatus, IssueReport, IssueStatus, IssueUpdate, PublicUser, Rental};
use shared::util::{now_millis, prefixed_id};

use crate::auth::CurrentAdmin;
use crate::core::ServerState;
use crate::utils::validation::{MAX_NOTE_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

/// Issue joined with its user, bike and rental for the admin console
#[derive(Debug, Serialize)]
pub struct EnrichedIssue {
    #[serde(flatten)]
    pub issue: IssueReport,
    pub user: Option<PublicUser>,
    pub bike: Option<Bike>,
    pub rental: Option<Rental>,
}

fn enrich(state: &AppState, issue: &IssueReport) -> EnrichedIssue {
    EnrichedIssue {
        issue: issue.clone(),
        user: state.user(&issue.user_id).map(PublicUser::from),
        bike: issue.bike_id.as_deref().and_then(|id| state.bike(id)).cloned(),
        rental: issue
            .rental_id
            .as_deref()
            .and_then(|id| state.rental(id))
            .cloned(),
    }
}

/// GET /api/issues - all issues, newest first
pub async fn list(
    State(state): State<ServerState>,
    _admin: CurrentAdmin,
) -> AppResult<Json<Vec<EnrichedIssue>>> {
    let mut issues = state
        .store
        .read(|s| s.issues.iter().map(|i| enrich(s, i)).collect::<Vec<_>>());
    issues.sort_by_key(|i| std::cmp::Reverse(i.issue.created_at));
    Ok(Json(issues))
}

/// GET /api/issues/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    _admin: CurrentAdmin,
    Path(id): Path<String>,
) -> AppResult<Json<EnrichedIssue>> {
    state
        .store
        .read(|s| s.issues.iter().find(|i| i.id == id).map(|i| enrich(s, i)))
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Issue not found: {id}")))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportIssueRequest {
    pub user_id: String,
    pub description: String,
    #[serde(rename = "photoUri")]
    pub photo: String,
    pub bike_id: Option<String>,
    pub rental_id: Option<String>,
}

/// POST /api/issues - user reports a problem
pub async fn report(
    State(state): State<ServerState>,
    Json(payload): Json<ReportIssueRequest>,
) -> AppResult<Json<IssueReport>> {
    validate_required_text(&payload.description, "description", MAX_NOTE_LEN)?;
    if payload.photo.trim().is_empty() {
        return Err(AppError::validation("A photo is required"));
    }

    let issue = state.store.commit(|s| {
        if s.user(&payload.user_id).is_none() {
            return Err(AppError::not_found(format!(
                "User not found: {}",
                payload.user_id
            )));
        }

        let issue = IssueReport {
            id: prefixed_id("iss"),
            user_id: payload.user_id.clone(),
            bike_id: payload.bike_id.clone(),
            rental_id: payload.rental_id.clone(),
            created_at: now_millis(),
            description: payload.description.trim().to_string(),
            photo: payload.photo.clone(),
            status: IssueStatus::Open,
            admin_note: None,
            resolved_at: None,
            resolved_by: None,
        };
        s.issues.insert(0, issue.clone());

        s.notifications.insert(
            0,
            AppNotification {
                id: prefixed_id("not"),
                user_id: payload.user_id.clone(),
                created_at: now_millis(),
                title: "Prijava problema poslata".to_string(),
                message: "Vaša prijava problema je uspešno poslata administratoru.".to_string(),
                related_rental_id: None,
            },
        );

        Ok(issue)
    })?;

    tracing::info!(issue_id = %issue.id, user_id = %issue.user_id, "Issue reported");
    Ok(Json(issue))
}

/// PUT /api/issues/{id} - admin triage
pub async fn update(
    State(state): State<ServerState>,
    admin: CurrentAdmin,
    Path(id): Path<String>,
    Json(payload): Json<IssueUpdate>,
) -> AppResult<Json<EnrichedIssue>> {
    if let Some(note) = &payload.admin_note
        && note.len() > MAX_NOTE_LEN
    {
        return Err(AppError::validation("admin note is too long"));
    }

    let enriched = state.store.commit(|s| {
        let issue = s
            .issues
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| AppError::not_found(format!("Issue not found: {id}")))?;

        if let Some(status) = payload.status {
            issue.status = status;
            if matches!(status, IssueStatus::Resolved | IssueStatus::Rejected) {
                issue.resolved_at = Some(now_millis());
                issue.resolved_by = Some(admin.id.clone());
            }
        }
        if let Some(note) = &payload.admin_note {
            issue.admin_note = Some(note.clone());
        }
        let bike_id = issue.bike_id.clone();
        let issue = issue.clone();

        // Optional fleet follow-up, skipped while the bike is mid-rental
        if let (Some(action), Some(bike_id)) = (payload.bike_action, bike_id)
            && !s.bike_actively_rented(&bike_id)
            && let Some(bike) = s.bike_mut(&bike_id)
        {
            bike.status = match action {
                BikeAction::Maintenance => BikeStatus::Maintenance,
                BikeAction::Disable => BikeStatus::Disabled,
                BikeAction::Available => BikeStatus::Available,
            };
            bike.updated_at = now_millis();
        }

        Ok::<_, AppError>(enrich(s, &issue))
    })?;

    Ok(Json(enriched))
}

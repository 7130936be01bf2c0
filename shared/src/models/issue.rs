//! Issue Report Model

use serde::{Deserialize, Serialize};

/// Issue triage status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueStatus {
    #[serde(rename = "open")]
    Open,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "resolved")]
    Resolved,
    #[serde(rename = "rejected")]
    Rejected,
}

fn default_status() -> IssueStatus {
    // Reports written before triage existed carry no status
    IssueStatus::Open
}

/// User-reported problem with a bike or rental
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueReport {
    pub id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bike_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rental_id: Option<String>,
    pub created_at: i64,
    pub description: String,
    #[serde(rename = "photoUri")]
    pub photo: String,
    #[serde(default = "default_status")]
    pub status: IssueStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_by: Option<String>,
}

/// Admin triage payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueUpdate {
    pub status: Option<IssueStatus>,
    pub admin_note: Option<String>,
    /// Optional follow-up on the referenced bike; skipped while it is rented
    pub bike_action: Option<BikeAction>,
}

/// Fleet follow-up actions available from issue triage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BikeAction {
    Maintenance,
    Disable,
    Available,
}

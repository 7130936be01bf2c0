//! Notification Model

use serde::{Deserialize, Serialize};

/// In-app notification record, newest first in the state collection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppNotification {
    pub id: String,
    pub user_id: String,
    pub created_at: i64,
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_rental_id: Option<String>,
}

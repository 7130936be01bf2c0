//! SyncService — HTTP client for the upstream state authority

use std::path::Path;
use std::time::Duration;

use reqwest::Client;
use shared::AppState;

use crate::utils::AppError;

/// Response of the upstream upload endpoint
#[derive(Debug, serde::Deserialize)]
struct UploadResponse {
    url: String,
}

/// HTTP client for the upstream sync API
///
/// The upstream speaks the same protocol this server exposes (`/api/state`,
/// `/api/upload`), so a fleet of offline-capable nodes can chain to one
/// authority.
pub struct SyncService {
    client: Client,
    base_url: String,
}

impl SyncService {
    /// Create a new SyncService against `base_url` (e.g. "https://ops.example.com").
    pub fn new(base_url: String) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Pull the full upstream state.
    pub async fn pull_state(&self) -> Result<AppState, AppError> {
        let url = format!("{}/api/state", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::internal(format!("State pull request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::internal(format!(
                "State pull failed with status {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::internal(format!("Failed to parse upstream state: {e}")))
    }

    /// Push the full state upstream (last-write-wins on their side).
    pub async fn push_state(&self, state: &AppState) -> Result<(), AppError> {
        let url = format!("{}/api/state", self.base_url);
        let response = self
            .client
            .put(&url)
            .json(state)
            .send()
            .await
            .map_err(|e| AppError::internal(format!("State push request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::internal(format!(
                "State push failed with status {status}: {body}"
            )));
        }

        Ok(())
    }

    /// Upload a local photo and return the remote URL.
    ///
    /// `kind` buckets the file upstream ("rental", "issue"). Refs that are
    /// already URLs are returned unchanged — nothing to mirror.
    pub async fn upload_photo(&self, local_ref: &str, kind: &str) -> Result<String, AppError> {
        if local_ref.starts_with("http://") || local_ref.starts_with("https://") {
            return Ok(local_ref.to_string());
        }

        let path = Path::new(local_ref);
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| AppError::internal(format!("Failed to read photo {local_ref}: {e}")))?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("{kind}.jpg"));
        let mime = mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string();

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(&mime)
            .map_err(|e| AppError::internal(format!("Invalid photo mime type: {e}")))?;
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("kind", kind.to_string());

        let url = format!("{}/api/upload", self.base_url);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::internal(format!("Photo upload request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::internal(format!(
                "Photo upload failed with status {}",
                response.status()
            )));
        }

        let upload: UploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::internal(format!("Failed to parse upload response: {e}")))?;

        Ok(upload.url)
    }
}

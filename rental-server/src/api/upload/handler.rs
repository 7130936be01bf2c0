//! Photo upload handler

use axum::{
    Json,
    extract::{Multipart, State},
    http::HeaderMap,
};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// POST /api/upload - multipart photo upload
///
/// Fields: `file` (the image) and `kind` ("rental" | "issue"). Responds with
/// an absolute URL the admin console can open directly.
pub async fn upload(
    State(state): State<ServerState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> AppResult<Json<serde_json::Value>> {
    let mut kind = "general".to_string();
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("file") => {
                let name = field.file_name().unwrap_or("upload.jpg").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?;
                file = Some((name, data.to_vec()));
            }
            Some("kind") => {
                kind = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?;
            }
            _ => {}
        }
    }

    let (name, data) = file.ok_or_else(|| AppError::validation("No file uploaded"))?;
    let stored = state.photos.store(&kind, &name, &data).await?;

    // Build an absolute URL from the request headers, like the original
    // server: the mobile app hands this URL to the admin console as-is.
    let host = headers
        .get(http::header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| format!("localhost:{}", state.config.http_port));
    let protocol = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");

    let url = format!("{protocol}://{host}/uploads/{}", stored.relative_path);
    Ok(Json(serde_json::json!({ "url": url })))
}

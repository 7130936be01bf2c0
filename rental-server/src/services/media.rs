//! Photo storage
//!
//! Persists uploaded photos under `<work_dir>/uploads/<kind>/` and hands
//! back the relative path used to build the public URL. Local persistence is
//! the hard precondition for closing a rental; the upstream mirror is
//! best-effort and happens later.

use std::path::{Path, PathBuf};

use crate::utils::AppError;

/// Upload buckets we accept; anything else lands in "general"
const KNOWN_KINDS: &[&str] = &["rental", "issue"];

#[derive(Debug, Clone)]
pub struct StoredPhoto {
    /// Path relative to the uploads root, e.g. `rental/return_ab12.jpg`
    pub relative_path: String,
}

pub struct PhotoStore {
    root: PathBuf,
}

impl PhotoStore {
    /// Create the store rooted at `<work_dir>/uploads`.
    pub fn open(work_dir: &Path) -> Result<Self, std::io::Error> {
        let root = work_dir.join("uploads");
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist uploaded bytes into the kind bucket.
    ///
    /// The stored name is freshly generated; only the extension survives
    /// from the client-provided filename (and only when it looks like an
    /// image extension).
    pub async fn store(
        &self,
        kind: &str,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<StoredPhoto, AppError> {
        if bytes.is_empty() {
            return Err(AppError::validation("No file uploaded"));
        }

        let kind = if KNOWN_KINDS.contains(&kind) {
            kind
        } else {
            "general"
        };

        let ext = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| matches!(e.to_ascii_lowercase().as_str(), "jpg" | "jpeg" | "png"))
            .unwrap_or("jpg");

        let file_name = format!("{}_{}.{}", kind, uuid::Uuid::new_v4().simple(), ext);

        let kind_dir = self.root.join(kind);
        tokio::fs::create_dir_all(&kind_dir)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create upload dir: {e}")))?;

        let dest = kind_dir.join(&file_name);
        tokio::fs::write(&dest, bytes)
            .await
            .map_err(|e| AppError::internal(format!("Failed to store upload: {e}")))?;

        tracing::info!(path = %dest.display(), size = bytes.len(), "Stored photo");

        Ok(StoredPhoto {
            relative_path: format!("{kind}/{file_name}"),
        })
    }
}

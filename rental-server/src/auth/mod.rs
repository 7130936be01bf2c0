//! Admin authentication
//!
//! Deliberately minimal: the console token is `base64(adminId:issuedAtMs)`
//! validated against the admin registry with a TTL. Passwords are salted
//! SHA-256, the same scheme the mobile client uses for user credentials.
//! Real token cryptography is out of scope for this system.

use std::fs;
use std::path::{Path, PathBuf};

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use parking_lot::RwLock;
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use shared::util::{now_millis, prefixed_id};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// Console administrator record, persisted in `<data_dir>/admins.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub password_salt: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: i64,
}

/// Admin projection without credentials, for login/profile responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminInfo {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: i64,
}

impl From<&Admin> for AdminInfo {
    fn from(a: &Admin) -> Self {
        Self {
            id: a.id.clone(),
            username: a.username.clone(),
            first_name: a.first_name.clone(),
            last_name: a.last_name.clone(),
            created_at: a.created_at,
        }
    }
}

/// The authenticated admin; extracting it is what guards a route
#[derive(Debug, Clone)]
pub struct CurrentAdmin {
    pub id: String,
    pub username: String,
}

/// Salted SHA-256, matching the mobile client's credential scheme.
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{salt}:{password}").as_bytes());
    hex::encode(hasher.finalize())
}

pub fn random_salt() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

pub struct AdminRegistry {
    admins: RwLock<Vec<Admin>>,
    /// `None` for in-memory registries (tests)
    file: Option<PathBuf>,
    token_ttl_ms: i64,
}

impl AdminRegistry {
    /// Load `admins.json` from the data directory, seeding the default
    /// `admin`/`admin123` account on first run.
    pub fn open(data_dir: &Path, token_ttl_ms: i64) -> Result<Self, std::io::Error> {
        fs::create_dir_all(data_dir)?;
        let file = data_dir.join("admins.json");

        let admins = if file.exists() {
            match fs::read_to_string(&file)
                .ok()
                .and_then(|raw| serde_json::from_str::<Vec<Admin>>(&raw).ok())
            {
                Some(admins) => admins,
                None => {
                    tracing::error!("admins.json is not parseable, reseeding default admin");
                    Self::default_admins()
                }
            }
        } else {
            Self::default_admins()
        };

        let registry = Self {
            admins: RwLock::new(admins),
            file: Some(file),
            token_ttl_ms,
        };
        registry.save();
        Ok(registry)
    }

    /// Registry with no file backing (for testing).
    pub fn in_memory(token_ttl_ms: i64) -> Self {
        Self {
            admins: RwLock::new(Self::default_admins()),
            file: None,
            token_ttl_ms,
        }
    }

    fn default_admins() -> Vec<Admin> {
        let salt = random_salt();
        vec![Admin {
            id: prefixed_id("admin"),
            username: "admin".to_string(),
            password_hash: hash_password("admin123", &salt),
            password_salt: salt,
            first_name: "System".to_string(),
            last_name: "Administrator".to_string(),
            created_at: now_millis(),
        }]
    }

    fn save(&self) {
        let Some(path) = &self.file else {
            return;
        };
        let admins = self.admins.read();
        match serde_json::to_string_pretty(&*admins) {
            Ok(json) => {
                if let Err(e) = fs::write(path, json) {
                    tracing::error!(error = %e, "Failed to save admins.json");
                }
            }
            Err(e) => tracing::error!(error = %e, "Failed to serialize admins"),
        }
    }

    /// Verify a username/password pair; `None` on any mismatch.
    pub fn verify_login(&self, username: &str, password: &str) -> Option<Admin> {
        let admins = self.admins.read();
        let admin = admins
            .iter()
            .find(|a| a.username.eq_ignore_ascii_case(username))?;
        let hash = hash_password(password, &admin.password_salt);
        (hash == admin.password_hash).then(|| admin.clone())
    }

    /// Issue a bearer token for an authenticated admin.
    pub fn issue_token(&self, admin: &Admin) -> String {
        BASE64.encode(format!("{}:{}", admin.id, now_millis()))
    }

    /// Decode and validate a bearer token.
    pub fn verify_token(&self, token: &str) -> AppResult<CurrentAdmin> {
        let decoded = BASE64
            .decode(token)
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .ok_or(AppError::InvalidToken)?;

        let (admin_id, issued_at) = decoded.split_once(':').ok_or(AppError::InvalidToken)?;
        let issued_at: i64 = issued_at.parse().map_err(|_| AppError::InvalidToken)?;

        if now_millis() - issued_at > self.token_ttl_ms {
            return Err(AppError::InvalidToken);
        }

        let admins = self.admins.read();
        let admin = admins
            .iter()
            .find(|a| a.id == admin_id)
            .ok_or(AppError::InvalidToken)?;

        Ok(CurrentAdmin {
            id: admin.id.clone(),
            username: admin.username.clone(),
        })
    }

    /// Change the authenticated admin's password.
    pub fn change_password(
        &self,
        admin_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let mut admins = self.admins.write();
        let admin = admins
            .iter_mut()
            .find(|a| a.id == admin_id)
            .ok_or_else(|| AppError::not_found("Administrator not found"))?;

        if hash_password(current_password, &admin.password_salt) != admin.password_hash {
            return Err(AppError::validation("Current password is not correct"));
        }

        let salt = random_salt();
        admin.password_hash = hash_password(new_password, &salt);
        admin.password_salt = salt;
        drop(admins);
        self.save();
        Ok(())
    }

    /// Change the authenticated admin's username (unique, password-guarded).
    pub fn change_username(
        &self,
        admin_id: &str,
        new_username: &str,
        password: &str,
    ) -> AppResult<AdminInfo> {
        let mut admins = self.admins.write();

        if admins
            .iter()
            .any(|a| a.id != admin_id && a.username.eq_ignore_ascii_case(new_username))
        {
            return Err(AppError::conflict("Username is already taken"));
        }

        let admin = admins
            .iter_mut()
            .find(|a| a.id == admin_id)
            .ok_or_else(|| AppError::not_found("Administrator not found"))?;

        if hash_password(password, &admin.password_salt) != admin.password_hash {
            return Err(AppError::validation("Password is not correct"));
        }

        admin.username = new_username.to_string();
        let info = AdminInfo::from(&*admin);
        drop(admins);
        self.save();
        Ok(info)
    }
}

/// Extractor guarding admin routes: handlers that take a [`CurrentAdmin`]
/// argument only run with a valid Bearer token.
impl FromRequestParts<ServerState> for CurrentAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(AppError::Unauthorized)?;

        state.admins.verify_token(token)
    }
}

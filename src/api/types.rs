//! Request and response types for the SecureVault backend API.
//!
//! The backend speaks snake_case JSON, so no field renaming is needed.

use serde::{Deserialize, Serialize};

/// Registration request body sent to POST /auth/register.
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Login request body sent to POST /auth/login.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response from POST /auth/login.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

/// Generic `{"message": ...}` acknowledgement body.
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Password body sent to POST /vault/decrypt/{id}.
#[derive(Debug, Serialize)]
pub struct DecryptRequest {
    pub password: String,
}

/// One vault entry, as returned by GET /vault/files and POST /vault/encrypt.
///
/// `encrypted_at` is the backend's ISO-8601 timestamp, kept as a string
/// because the backend may emit it without a timezone.
#[derive(Debug, Clone, Deserialize)]
pub struct FileEntry {
    pub file_id: String,
    pub original_name: String,
    pub size: u64,
    pub encrypted_at: String,
}

/// One user record, as returned by GET /admin/users.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    pub role: String,
    pub status: String,
    pub created_at: String,
}

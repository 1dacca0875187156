//! Persisted login session: bearer token plus a small user profile.
//!
//! The CLI equivalent of the web client's local storage. The token lives in
//! the platform keychain (see `api::auth`); the profile (`username`, `role`)
//! is a JSON file under the user's config directory. A session exists only
//! when both halves are present.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::auth::{self, KeychainError};

/// Directory name under the platform config dir.
const APP_DIR: &str = "securevault";

/// Profile file name inside [`APP_DIR`].
const PROFILE_FILE: &str = "session.json";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Keychain(#[from] KeychainError),
    #[error("Session file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Session file is corrupt: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("No config directory available on this platform")]
    NoConfigDir,
}

/// The non-secret half of the session, mirrored to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub role: String,
}

impl UserProfile {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// A loaded login session: token present implies authenticated.
#[derive(Debug)]
pub struct Session {
    pub token: String,
    pub profile: UserProfile,
}

/// Load the current session, if any.
///
/// Returns `None` when no user has logged in, or when the profile and the
/// keychain token have fallen out of step (e.g. the keychain entry was
/// removed externally).
pub fn load() -> Result<Option<Session>, SessionError> {
    let Some(username) = auth::get_last_user()? else {
        return Ok(None);
    };

    let path = profile_path()?;
    let profile: UserProfile = match std::fs::read_to_string(&path) {
        Ok(raw) => serde_json::from_str(&raw)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let Some(token) = auth::get_token(&username)? else {
        log::warn!("Profile exists but keychain token is missing for {}", username);
        return Ok(None);
    };

    Ok(Some(Session { token, profile }))
}

/// Persist a fresh session after login.
pub fn save(profile: &UserProfile, token: &str) -> Result<(), SessionError> {
    auth::store_token(&profile.username, token)?;
    auth::store_last_user(&profile.username)?;

    let path = profile_path()?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(&path, serde_json::to_string_pretty(profile)?)?;
    Ok(())
}

/// Remove the stored session. Idempotent.
pub fn clear() -> Result<(), SessionError> {
    if let Some(username) = auth::get_last_user()? {
        auth::delete_token(&username)?;
    }
    auth::delete_last_user()?;

    let path = profile_path()?;
    match std::fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Require a logged-in session, failing with a user-facing message otherwise.
///
/// The CLI analog of redirecting an unauthenticated visitor to the login
/// page: authenticated commands call this before touching the network.
pub fn require_session() -> Result<Session, String> {
    match load() {
        Ok(Some(session)) => Ok(session),
        Ok(None) => Err("Not logged in. Run `securevault login <username>` first.".to_string()),
        Err(e) => Err(format!("Failed to load session: {}", e)),
    }
}

/// Require the admin role on an already-loaded session.
///
/// Advisory only -- the backend enforces the role on every /admin call.
pub fn ensure_admin(profile: &UserProfile) -> Result<(), String> {
    if profile.is_admin() {
        Ok(())
    } else {
        Err("Access denied: admin privileges required.".to_string())
    }
}

/// Read a claim from a JWT access token without verifying it.
///
/// The server already validated the token; we only peek at the payload for
/// display-level fields like `role`. Returns `None` for malformed tokens or
/// absent claims.
pub fn claim_from_token(token: &str, claim: &str) -> Option<String> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    // Payload is base64url without padding; re-pad before decoding.
    let payload = parts[1];
    let padded = match payload.len() % 4 {
        2 => format!("{}==", payload),
        3 => format!("{}=", payload),
        _ => payload.to_string(),
    };
    let standard = padded.replace('-', "+").replace('_', "/");

    let decoded =
        base64::Engine::decode(&base64::engine::general_purpose::STANDARD, &standard).ok()?;
    let json: serde_json::Value = serde_json::from_slice(&decoded).ok()?;

    json.get(claim).and_then(|v| v.as_str()).map(|s| s.to_string())
}

fn profile_path() -> Result<PathBuf, SessionError> {
    let base = dirs::config_dir().ok_or(SessionError::NoConfigDir)?;
    Ok(base.join(APP_DIR).join(PROFILE_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_token(payload: &[u8]) -> String {
        let header = base64::Engine::encode(
            &base64::engine::general_purpose::URL_SAFE_NO_PAD,
            b"{\"alg\":\"HS256\",\"typ\":\"JWT\"}",
        );
        let payload = base64::Engine::encode(
            &base64::engine::general_purpose::URL_SAFE_NO_PAD,
            payload,
        );
        format!("{}.{}.fake-signature", header, payload)
    }

    #[test]
    fn test_claim_from_token_present() {
        let token = make_token(b"{\"sub\":\"user-123\",\"role\":\"admin\"}");
        assert_eq!(claim_from_token(&token, "role").as_deref(), Some("admin"));
        assert_eq!(claim_from_token(&token, "sub").as_deref(), Some("user-123"));
    }

    #[test]
    fn test_claim_from_token_missing_claim() {
        let token = make_token(b"{\"sub\":\"user-123\"}");
        assert_eq!(claim_from_token(&token, "role"), None);
    }

    #[test]
    fn test_claim_from_token_malformed() {
        assert_eq!(claim_from_token("not-a-jwt", "role"), None);
        assert_eq!(claim_from_token("a.b.c", "role"), None);
    }

    #[test]
    fn test_ensure_admin_accepts_admin() {
        let profile = UserProfile {
            username: "alice".to_string(),
            role: "admin".to_string(),
        };
        assert!(ensure_admin(&profile).is_ok());
    }

    #[test]
    fn test_ensure_admin_rejects_user() {
        let profile = UserProfile {
            username: "bob".to_string(),
            role: "user".to_string(),
        };
        let err = ensure_admin(&profile).unwrap_err();
        assert!(err.contains("admin"));
    }

    #[test]
    fn test_profile_round_trips_through_json() {
        let profile = UserProfile {
            username: "carol".to_string(),
            role: "user".to_string(),
        };
        let raw = serde_json::to_string(&profile).unwrap();
        let back: UserProfile = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.username, "carol");
        assert!(!back.is_admin());
    }
}

//! Account commands: register, login, logout, status, delete-account.

use zeroize::Zeroize;

use crate::api::client::ApiClient;
use crate::api::error::ApiError;
use crate::api::types::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
use crate::session::{self, UserProfile};

/// Create a new account.
///
/// Prompts for the password twice; a mismatch is a local error and no
/// request is sent.
pub async fn run_register(api: &ApiClient, username: &str) -> Result<(), String> {
    let mut password = super::prompt_password("Choose a password: ")?;
    let mut repeat = super::prompt_password("Confirm password: ")?;

    if password != repeat {
        password.zeroize();
        repeat.zeroize();
        return Err("Passwords do not match.".to_string());
    }
    repeat.zeroize();

    let req = RegisterRequest {
        username: username.to_string(),
        password,
    };

    let resp = api
        .post("/auth/register", &req)
        .await
        .map_err(|e| format!("Registration request failed: {}", e))?;

    if !resp.status().is_success() {
        return Err(ApiError::from_response(resp).await.to_string());
    }

    let body: MessageResponse = resp
        .json()
        .await
        .map_err(|e| format!("Failed to parse registration response: {}", e))?;

    println!("{}", body.message);
    Ok(())
}

/// Log in and persist the session.
///
/// The profile role comes from the access token's `role` claim when the
/// server includes one, defaulting to a regular user.
pub async fn run_login(api: &ApiClient, username: &str) -> Result<(), String> {
    let password = super::prompt_password("Password: ")?;

    let req = LoginRequest {
        username: username.to_string(),
        password,
    };

    let resp = api
        .post("/auth/login", &req)
        .await
        .map_err(|e| format!("Login request failed: {}", e))?;

    if !resp.status().is_success() {
        return Err(ApiError::from_response(resp).await.to_string());
    }

    let login: LoginResponse = resp
        .json()
        .await
        .map_err(|e| format!("Failed to parse login response: {}", e))?;

    let role = session::claim_from_token(&login.access_token, "role")
        .unwrap_or_else(|| "user".to_string());
    let profile = UserProfile {
        username: username.to_string(),
        role,
    };

    session::save(&profile, &login.access_token)
        .map_err(|e| format!("Failed to store session: {}", e))?;

    log::info!("Login complete for {}", profile.username);
    println!("Logged in as {} ({}).", profile.username, profile.role);
    Ok(())
}

/// Log out: notify the backend, then clear the stored session.
///
/// The server call is best-effort; local cleanup happens even when the
/// backend is unreachable.
pub async fn run_logout(api: &ApiClient) -> Result<(), String> {
    if let Ok(Some(sess)) = session::load() {
        api.set_access_token(sess.token).await;
        match api.authenticated_post("/auth/logout", &()).await {
            Ok(resp) if !resp.status().is_success() => {
                log::warn!("Logout rejected by server (status {})", resp.status());
            }
            Ok(_) => {}
            Err(e) => {
                log::warn!("Logout request failed (will continue local cleanup): {}", e);
            }
        }
        api.clear_access_token().await;
    }

    session::clear().map_err(|e| format!("Failed to clear session: {}", e))?;
    println!("Logged out.");
    Ok(())
}

/// Show who is currently logged in.
pub fn run_status() -> Result<(), String> {
    match session::load() {
        Ok(Some(sess)) => {
            println!(
                "Logged in as {} ({}).",
                sess.profile.username, sess.profile.role
            );
            Ok(())
        }
        Ok(None) => {
            println!("Not logged in.");
            Ok(())
        }
        Err(e) => Err(format!("Failed to load session: {}", e)),
    }
}

/// Delete the logged-in account, then clear the local session.
pub async fn run_delete_account(api: &ApiClient, yes: bool) -> Result<(), String> {
    let sess = session::require_session()?;

    let question = format!(
        "Are you sure you want to delete account \"{}\" and all its files?",
        sess.profile.username
    );
    if !yes && !super::confirm(&question)? {
        println!("Aborted.");
        return Ok(());
    }

    api.set_access_token(sess.token.clone()).await;

    let resp = api
        .authenticated_delete("/auth/account")
        .await
        .map_err(|e| format!("Account deletion request failed: {}", e))?;

    if !resp.status().is_success() {
        return Err(ApiError::from_response(resp).await.to_string());
    }

    session::clear().map_err(|e| format!("Failed to clear session: {}", e))?;
    println!("Account deleted successfully.");
    Ok(())
}

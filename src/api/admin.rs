//! User management operations, admin role required.
//!
//! The local admin check is advisory; the backend re-verifies the role on
//! every `/admin/*` call and answers 403 otherwise.

use super::client::ApiClient;
use super::error::ApiError;
use super::types::UserRecord;

/// Fetch all user accounts.
///
/// GET /admin/users.
pub async fn list_users(client: &ApiClient) -> Result<Vec<UserRecord>, ApiError> {
    let resp = client.authenticated_get("/admin/users").await?;

    if !resp.status().is_success() {
        return Err(ApiError::from_response(resp).await);
    }

    resp.json::<Vec<UserRecord>>()
        .await
        .map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

/// Re-enable a deactivated account.
pub async fn activate_user(client: &ApiClient, user_id: &str) -> Result<(), ApiError> {
    user_action(client, user_id, "activate").await
}

/// Disable an account.
pub async fn deactivate_user(client: &ApiClient, user_id: &str) -> Result<(), ApiError> {
    user_action(client, user_id, "deactivate").await
}

/// Grant the admin role.
pub async fn promote_user(client: &ApiClient, user_id: &str) -> Result<(), ApiError> {
    user_action(client, user_id, "promote").await
}

/// Revoke the admin role.
pub async fn demote_user(client: &ApiClient, user_id: &str) -> Result<(), ApiError> {
    user_action(client, user_id, "demote").await
}

/// POST /admin/user/{id}/{action} with an empty body.
async fn user_action(client: &ApiClient, user_id: &str, action: &str) -> Result<(), ApiError> {
    let path = format!(
        "/admin/user/{}/{}",
        urlencoding::encode(user_id),
        action
    );

    let resp = client.authenticated_post(&path, &()).await?;

    if !resp.status().is_success() {
        return Err(ApiError::from_response(resp).await);
    }
    Ok(())
}

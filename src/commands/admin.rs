//! Admin commands: user listing and account management.
//!
//! All of these check the stored profile's role before calling the backend,
//! so a regular user gets an immediate access-denied error instead of a
//! round-trip 403. The backend still enforces the role on every call.

use crate::api::admin;
use crate::api::client::ApiClient;
use crate::session;

/// Admin action on a single user account.
#[derive(Debug, Clone, Copy)]
pub enum UserAction {
    Activate,
    Deactivate,
    Promote,
    Demote,
}

impl UserAction {
    fn confirm_message(&self, username: &str) -> String {
        match self {
            UserAction::Activate => {
                format!("Are you sure you want to activate user \"{}\"?", username)
            }
            UserAction::Deactivate => {
                format!("Are you sure you want to deactivate user \"{}\"?", username)
            }
            UserAction::Promote => format!(
                "Are you sure you want to promote user \"{}\" to admin?",
                username
            ),
            UserAction::Demote => format!(
                "Are you sure you want to demote admin \"{}\" to regular user?",
                username
            ),
        }
    }

    fn success_message(&self, username: &str) -> String {
        match self {
            UserAction::Activate => format!("User \"{}\" activated successfully!", username),
            UserAction::Deactivate => format!("User \"{}\" deactivated successfully!", username),
            UserAction::Promote => format!("User \"{}\" promoted to admin successfully!", username),
            UserAction::Demote => format!("Admin \"{}\" demoted to user successfully!", username),
        }
    }
}

/// List all user accounts.
pub async fn run_users(api: &ApiClient) -> Result<(), String> {
    let sess = session::require_session()?;
    session::ensure_admin(&sess.profile)?;
    api.set_access_token(sess.token.clone()).await;

    let users = admin::list_users(api).await.map_err(|e| e.to_string())?;

    if users.is_empty() {
        println!("No users found.");
        return Ok(());
    }

    println!(
        "{:<24} {:<8} {:<10} {:<19}  {}",
        "USERNAME", "ROLE", "STATUS", "CREATED", "USER_ID"
    );
    println!("{}", "-".repeat(100));
    for u in &users {
        println!(
            "{:<24} {:<8} {:<10} {:<19}  {}",
            u.username,
            u.role,
            u.status,
            super::vault::format_timestamp(&u.created_at),
            u.id
        );
    }
    Ok(())
}

/// Apply an admin action to a user after confirmation.
pub async fn run_user_action(
    api: &ApiClient,
    user_id: &str,
    action: UserAction,
    yes: bool,
) -> Result<(), String> {
    let sess = session::require_session()?;
    session::ensure_admin(&sess.profile)?;
    api.set_access_token(sess.token.clone()).await;

    // Resolve the username so prompts and messages name the account, not the id.
    let users = admin::list_users(api).await.map_err(|e| e.to_string())?;
    let target = users
        .iter()
        .find(|u| u.id == user_id)
        .ok_or_else(|| format!("User not found: {}", user_id))?;

    if !yes && !super::confirm(&action.confirm_message(&target.username))? {
        println!("Aborted.");
        return Ok(());
    }

    match action {
        UserAction::Activate => admin::activate_user(api, user_id).await,
        UserAction::Deactivate => admin::deactivate_user(api, user_id).await,
        UserAction::Promote => admin::promote_user(api, user_id).await,
        UserAction::Demote => admin::demote_user(api, user_id).await,
    }
    .map_err(|e| e.to_string())?;

    println!("{}", action.success_message(&target.username));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_messages_name_the_account() {
        assert_eq!(
            UserAction::Promote.confirm_message("alice"),
            "Are you sure you want to promote user \"alice\" to admin?"
        );
        assert_eq!(
            UserAction::Demote.confirm_message("bob"),
            "Are you sure you want to demote admin \"bob\" to regular user?"
        );
    }

    #[test]
    fn test_success_messages() {
        assert_eq!(
            UserAction::Activate.success_message("carol"),
            "User \"carol\" activated successfully!"
        );
        assert_eq!(
            UserAction::Deactivate.success_message("dave"),
            "User \"dave\" deactivated successfully!"
        );
        assert_eq!(
            UserAction::Promote.success_message("erin"),
            "User \"erin\" promoted to admin successfully!"
        );
    }
}

//! Keychain operations for access token storage.
//!
//! Uses the `keyring` crate so the bearer token lands in the platform
//! credential store (macOS Keychain, Windows Credential Manager, Linux
//! keyutils) instead of a plaintext file.

use keyring::Entry;
use thiserror::Error;

/// Keychain service name for all SecureVault CLI entries.
const SERVICE_NAME: &str = "com.securevault.cli";

/// Special username for storing the last logged-in user.
const LAST_USER_KEY: &str = "last_user";

#[derive(Debug, Error)]
pub enum KeychainError {
    #[error("Keychain operation failed: {0}")]
    OperationFailed(String),
}

impl From<keyring::Error> for KeychainError {
    fn from(err: keyring::Error) -> Self {
        KeychainError::OperationFailed(err.to_string())
    }
}

/// Store the access token for the given username.
pub fn store_token(username: &str, token: &str) -> Result<(), KeychainError> {
    let entry = Entry::new(SERVICE_NAME, username)?;
    entry.set_password(token)?;
    Ok(())
}

/// Retrieve the access token for the given username.
///
/// Returns `None` if no entry exists (user never logged in or was logged out).
pub fn get_token(username: &str) -> Result<Option<String>, KeychainError> {
    let entry = Entry::new(SERVICE_NAME, username)?;
    match entry.get_password() {
        Ok(token) => Ok(Some(token)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(KeychainError::from(e)),
    }
}

/// Delete the stored access token for the given username.
///
/// Idempotent: ignores `NoEntry` (already deleted or never stored).
pub fn delete_token(username: &str) -> Result<(), KeychainError> {
    let entry = Entry::new(SERVICE_NAME, username)?;
    match entry.delete_credential() {
        Ok(()) => Ok(()),
        Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(KeychainError::from(e)),
    }
}

/// Store the username so the next invocation can find its Keychain entry.
pub fn store_last_user(username: &str) -> Result<(), KeychainError> {
    let entry = Entry::new(SERVICE_NAME, LAST_USER_KEY)?;
    entry.set_password(username)?;
    Ok(())
}

/// Retrieve the last logged-in username.
///
/// Returns `None` if no user has logged in before.
pub fn get_last_user() -> Result<Option<String>, KeychainError> {
    let entry = Entry::new(SERVICE_NAME, LAST_USER_KEY)?;
    match entry.get_password() {
        Ok(name) => Ok(Some(name)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(KeychainError::from(e)),
    }
}

/// Delete the last-user pointer. Idempotent.
pub fn delete_last_user() -> Result<(), KeychainError> {
    let entry = Entry::new(SERVICE_NAME, LAST_USER_KEY)?;
    match entry.delete_credential() {
        Ok(()) => Ok(()),
        Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(KeychainError::from(e)),
    }
}

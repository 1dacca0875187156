//! Vault file operations against the SecureVault backend.
//!
//! Encryption and decryption happen server-side; this module only moves
//! bytes and metadata over the `/vault/*` endpoints.

use reqwest::multipart;

use super::client::ApiClient;
use super::error::ApiError;
use super::types::{DecryptRequest, FileEntry};

/// Fallback name when the backend omits a `Content-Disposition` filename.
const DEFAULT_DECRYPTED_NAME: &str = "decrypted_file";

/// Upload a file for server-side encryption.
///
/// POST /vault/encrypt with multipart `file` and `password` fields.
/// Returns the stored entry's metadata.
pub async fn encrypt(
    client: &ApiClient,
    file_name: &str,
    data: Vec<u8>,
    mime: &str,
    password: &str,
) -> Result<FileEntry, ApiError> {
    let part = multipart::Part::bytes(data)
        .file_name(file_name.to_string())
        .mime_str(mime)
        .map_err(|e| ApiError::InvalidResponse(format!("invalid MIME type: {}", e)))?;

    let form = multipart::Form::new()
        .part("file", part)
        .text("password", password.to_string());

    let resp = client
        .authenticated_multipart_post("/vault/encrypt", form)
        .await?;

    if !resp.status().is_success() {
        return Err(ApiError::from_response(resp).await);
    }

    resp.json::<FileEntry>()
        .await
        .map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

/// List the authenticated user's vault entries.
pub async fn list_files(client: &ApiClient) -> Result<Vec<FileEntry>, ApiError> {
    let resp = client.authenticated_get("/vault/files").await?;

    if !resp.status().is_success() {
        return Err(ApiError::from_response(resp).await);
    }

    resp.json::<Vec<FileEntry>>()
        .await
        .map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

/// Decrypt a stored file server-side and return the plaintext bytes.
///
/// POST /vault/decrypt/{id} with the decryption password.
pub async fn decrypt(
    client: &ApiClient,
    file_id: &str,
    password: &str,
) -> Result<Vec<u8>, ApiError> {
    let path = format!("/vault/decrypt/{}", urlencoding::encode(file_id));
    let body = DecryptRequest {
        password: password.to_string(),
    };

    let resp = client.authenticated_post(&path, &body).await?;

    if !resp.status().is_success() {
        return Err(ApiError::from_response(resp).await);
    }

    let bytes = resp.bytes().await.map_err(ApiError::Network)?;
    Ok(bytes.to_vec())
}

/// Download a stored file's ciphertext without decrypting it.
///
/// GET /vault/download-encrypted/{id} returns the raw `.enc` stream.
pub async fn download_encrypted(
    client: &ApiClient,
    file_id: &str,
) -> Result<Vec<u8>, ApiError> {
    let path = format!(
        "/vault/download-encrypted/{}",
        urlencoding::encode(file_id)
    );

    let resp = client.authenticated_get(&path).await?;

    if !resp.status().is_success() {
        return Err(ApiError::from_response(resp).await);
    }

    let bytes = resp.bytes().await.map_err(ApiError::Network)?;
    Ok(bytes.to_vec())
}

/// Decrypt a locally held `.enc` file server-side.
///
/// POST /vault/decrypt-local with multipart `file` and `password`.
/// Returns the original filename (recovered from `Content-Disposition`)
/// and the plaintext bytes.
pub async fn decrypt_local(
    client: &ApiClient,
    file_name: &str,
    data: Vec<u8>,
    password: &str,
) -> Result<(String, Vec<u8>), ApiError> {
    let part = multipart::Part::bytes(data)
        .file_name(file_name.to_string())
        .mime_str("application/octet-stream")
        .map_err(|e| ApiError::InvalidResponse(format!("invalid MIME type: {}", e)))?;

    let form = multipart::Form::new()
        .part("file", part)
        .text("password", password.to_string());

    let resp = client
        .authenticated_multipart_post("/vault/decrypt-local", form)
        .await?;

    if !resp.status().is_success() {
        return Err(ApiError::from_response(resp).await);
    }

    let original_name = resp
        .headers()
        .get(reqwest::header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .and_then(filename_from_disposition)
        .unwrap_or_else(|| DEFAULT_DECRYPTED_NAME.to_string());

    let bytes = resp.bytes().await.map_err(ApiError::Network)?;
    Ok((original_name, bytes.to_vec()))
}

/// Delete a stored file.
///
/// DELETE /vault/file/{id}.
pub async fn delete_file(client: &ApiClient, file_id: &str) -> Result<(), ApiError> {
    let path = format!("/vault/file/{}", urlencoding::encode(file_id));

    let resp = client.authenticated_delete(&path).await?;

    if !resp.status().is_success() {
        return Err(ApiError::from_response(resp).await);
    }
    Ok(())
}

/// Pull the filename out of a `Content-Disposition` header value.
///
/// Handles both `filename="name.txt"` and bare `filename=name.txt` forms.
fn filename_from_disposition(value: &str) -> Option<String> {
    let idx = value.find("filename=")?;
    let raw = &value[idx + "filename=".len()..];
    let raw = raw.split(';').next().unwrap_or(raw).trim();
    let name = raw.trim_matches('"').to_string();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_from_disposition_quoted() {
        let name = filename_from_disposition("attachment; filename=\"report.pdf\"");
        assert_eq!(name.as_deref(), Some("report.pdf"));
    }

    #[test]
    fn test_filename_from_disposition_unquoted() {
        let name = filename_from_disposition("attachment; filename=notes.txt");
        assert_eq!(name.as_deref(), Some("notes.txt"));
    }

    #[test]
    fn test_filename_from_disposition_with_trailing_param() {
        let name = filename_from_disposition("attachment; filename=\"a.zip\"; size=42");
        assert_eq!(name.as_deref(), Some("a.zip"));
    }

    #[test]
    fn test_filename_from_disposition_absent() {
        assert_eq!(filename_from_disposition("attachment"), None);
    }

    #[test]
    fn test_filename_from_disposition_empty_value() {
        assert_eq!(filename_from_disposition("attachment; filename=\"\""), None);
    }
}

//! Vault commands: upload, files, download, preview, decrypt-local, delete.

use std::path::{Path, PathBuf};

use zeroize::Zeroize;

use crate::api::client::ApiClient;
use crate::api::types::FileEntry;
use crate::api::vault;
use crate::session;
use crate::validate::{self, PreviewKind};

/// Encrypt and store one or more files.
///
/// Every candidate is validated before anything is sent; rejected files are
/// reported and skipped without a request. The encryption password is
/// prompted once and applied to each upload.
pub async fn run_upload(api: &ApiClient, files: &[PathBuf]) -> Result<(), String> {
    let sess = session::require_session()?;
    api.set_access_token(sess.token.clone()).await;

    let mut valid = Vec::new();
    let mut rejected = 0usize;
    for path in files {
        match tokio::fs::metadata(path).await {
            Ok(meta) => match validate::check_upload(path, meta.len()) {
                Ok(mime) => valid.push((path.clone(), mime)),
                Err(e) => {
                    eprintln!("{}", e);
                    rejected += 1;
                }
            },
            Err(e) => {
                eprintln!("Cannot read {}: {}", path.display(), e);
                rejected += 1;
            }
        }
    }

    if valid.is_empty() {
        return Err("No valid files to upload.".to_string());
    }

    let mut password = super::prompt_password("Encryption password: ")?;

    let mut failed = 0usize;
    for (path, mime) in &valid {
        let name = file_name_of(path);
        let data = match tokio::fs::read(path).await {
            Ok(d) => d,
            Err(e) => {
                eprintln!("Cannot read {}: {}", path.display(), e);
                failed += 1;
                continue;
            }
        };

        match vault::encrypt(api, &name, data, mime, &password).await {
            Ok(entry) => println!("File \"{}\" encrypted successfully!", entry.original_name),
            Err(e) => {
                eprintln!("Upload failed for \"{}\": {}", name, e);
                failed += 1;
            }
        }
    }
    password.zeroize();

    let skipped = rejected + failed;
    if skipped > 0 {
        Err(format!("{} file(s) were not uploaded.", skipped))
    } else {
        Ok(())
    }
}

/// List the vault contents.
pub async fn run_files(api: &ApiClient) -> Result<(), String> {
    let sess = session::require_session()?;
    api.set_access_token(sess.token.clone()).await;

    let files = vault::list_files(api).await.map_err(|e| e.to_string())?;

    if files.is_empty() {
        println!("No files yet. Upload your first encrypted file with `securevault upload <FILE>`.");
        return Ok(());
    }

    println!(
        "{:<36} {:>10}  {:<19}  {}",
        "FILENAME", "SIZE", "ENCRYPTED AT", "FILE_ID"
    );
    println!("{}", "-".repeat(100));
    for f in &files {
        println!(
            "{:<36} {:>10}  {:<19}  {}",
            f.original_name,
            format_size(f.size),
            format_timestamp(&f.encrypted_at),
            f.file_id
        );
    }
    Ok(())
}

/// Decrypt a stored file and save the original.
pub async fn run_download(
    api: &ApiClient,
    file_id: &str,
    output: Option<PathBuf>,
) -> Result<(), String> {
    let sess = session::require_session()?;
    api.set_access_token(sess.token.clone()).await;

    let entry = find_entry(api, file_id).await?;

    let mut password = super::prompt_password("Decryption password: ")?;
    let result = vault::decrypt(api, file_id, &password).await;
    password.zeroize();
    let data = result.map_err(|e| e.to_string())?;

    let out = output.unwrap_or_else(|| PathBuf::from(&entry.original_name));
    tokio::fs::write(&out, &data)
        .await
        .map_err(|e| format!("Failed to write {}: {}", out.display(), e))?;

    println!("File \"{}\" downloaded successfully!", out.display());
    Ok(())
}

/// Download a stored file's ciphertext as-is.
pub async fn run_download_encrypted(
    api: &ApiClient,
    file_id: &str,
    output: Option<PathBuf>,
) -> Result<(), String> {
    let sess = session::require_session()?;
    api.set_access_token(sess.token.clone()).await;

    let entry = find_entry(api, file_id).await?;

    let data = vault::download_encrypted(api, file_id)
        .await
        .map_err(|e| e.to_string())?;

    let out = output.unwrap_or_else(|| PathBuf::from(format!("{}.enc", entry.original_name)));
    tokio::fs::write(&out, &data)
        .await
        .map_err(|e| format!("Failed to write {}: {}", out.display(), e))?;

    println!("Encrypted file \"{}\" downloaded successfully!", out.display());
    Ok(())
}

/// Preview a stored file.
///
/// Text-like files are decrypted and printed. Types that need a viewer are
/// pointed at `download` instead, without issuing a decrypt request.
pub async fn run_preview(api: &ApiClient, file_id: &str) -> Result<(), String> {
    let sess = session::require_session()?;
    api.set_access_token(sess.token.clone()).await;

    let entry = find_entry(api, file_id).await?;

    match validate::preview_kind(&entry.original_name) {
        PreviewKind::Text => {
            let mut password = super::prompt_password("Decryption password: ")?;
            let result = vault::decrypt(api, file_id, &password).await;
            password.zeroize();
            let data = result.map_err(|e| e.to_string())?;

            print!("{}", String::from_utf8_lossy(&data));
            Ok(())
        }
        PreviewKind::Image | PreviewKind::Pdf => {
            println!(
                "\"{}\" cannot be shown in the terminal. Run `securevault download {}` to view it.",
                entry.original_name, entry.file_id
            );
            Ok(())
        }
        PreviewKind::Unsupported => {
            println!("{}", unsupported_preview_message(&entry.original_name));
            Ok(())
        }
    }
}

/// Decrypt a locally held `.enc` file through the backend.
pub async fn run_decrypt_local(
    api: &ApiClient,
    file: &Path,
    output: Option<PathBuf>,
) -> Result<(), String> {
    let sess = session::require_session()?;
    api.set_access_token(sess.token.clone()).await;

    let meta = tokio::fs::metadata(file)
        .await
        .map_err(|e| format!("Cannot read {}: {}", file.display(), e))?;
    validate::check_encrypted_file(file, meta.len()).map_err(|e| e.to_string())?;

    let data = tokio::fs::read(file)
        .await
        .map_err(|e| format!("Cannot read {}: {}", file.display(), e))?;

    let mut password = super::prompt_password("Decryption password: ")?;
    let result = vault::decrypt_local(api, &file_name_of(file), data, &password).await;
    password.zeroize();
    let (original_name, plain) = result.map_err(|e| e.to_string())?;

    let out = output.unwrap_or_else(|| PathBuf::from(&original_name));
    tokio::fs::write(&out, &plain)
        .await
        .map_err(|e| format!("Failed to write {}: {}", out.display(), e))?;

    println!("File decrypted successfully! Saved as \"{}\".", out.display());
    Ok(())
}

/// Delete a stored file after confirmation.
pub async fn run_delete(api: &ApiClient, file_id: &str, yes: bool) -> Result<(), String> {
    let sess = session::require_session()?;
    api.set_access_token(sess.token.clone()).await;

    let entry = find_entry(api, file_id).await?;

    let question = format!("Are you sure you want to delete \"{}\"?", entry.original_name);
    if !yes && !super::confirm(&question)? {
        println!("Aborted.");
        return Ok(());
    }

    vault::delete_file(api, file_id)
        .await
        .map_err(|e| e.to_string())?;

    println!("File \"{}\" deleted successfully!", entry.original_name);
    Ok(())
}

/// Resolve a file id against the vault listing.
async fn find_entry(api: &ApiClient, file_id: &str) -> Result<FileEntry, String> {
    let files = vault::list_files(api).await.map_err(|e| e.to_string())?;
    files
        .into_iter()
        .find(|f| f.file_id == file_id)
        .ok_or_else(|| format!("File not found: {}", file_id))
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Humanize a byte count the way the dashboard did (base 1024, two decimals,
/// trailing zeros trimmed).
fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let exp = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exp = exp.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exp as i32);
    let formatted = format!("{:.2}", value);
    let formatted = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", formatted, UNITS[exp])
}

/// Render the backend's ISO-8601 timestamp for a listing; the raw string
/// is shown if it doesn't parse.
pub(crate) fn format_timestamp(raw: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d %H:%M:%S").to_string();
    }
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format("%Y-%m-%d %H:%M:%S").to_string();
    }
    raw.to_string()
}

fn unsupported_preview_message(name: &str) -> String {
    match name.rsplit('.').next().filter(|ext| *ext != name) {
        Some(ext) => format!(
            "Preview not available for {} files. Please download to view.",
            ext.to_uppercase()
        ),
        None => "Preview not available for this file. Please download to view.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_zero() {
        assert_eq!(format_size(0), "0 Bytes");
    }

    #[test]
    fn test_format_size_exact_units() {
        assert_eq!(format_size(1024), "1 KB");
        assert_eq!(format_size(1024 * 1024), "1 MB");
        assert_eq!(format_size(1024 * 1024 * 1024), "1 GB");
    }

    #[test]
    fn test_format_size_trims_trailing_zeros() {
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(500), "500 Bytes");
        assert_eq!(format_size(2_621_440), "2.5 MB");
    }

    #[test]
    fn test_format_size_two_decimals() {
        // 1259 / 1024 = 1.2294... -> rounded to 1.23
        assert_eq!(format_size(1259), "1.23 KB");
    }

    #[test]
    fn test_format_timestamp_rfc3339() {
        assert_eq!(
            format_timestamp("2024-05-01T12:30:45+00:00"),
            "2024-05-01 12:30:45"
        );
    }

    #[test]
    fn test_format_timestamp_naive() {
        // FastAPI's datetime.isoformat() omits the timezone.
        assert_eq!(
            format_timestamp("2024-05-01T12:30:45.123456"),
            "2024-05-01 12:30:45"
        );
    }

    #[test]
    fn test_format_timestamp_unparseable_passthrough() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn test_unsupported_preview_message() {
        assert_eq!(
            unsupported_preview_message("backup.zip"),
            "Preview not available for ZIP files. Please download to view."
        );
        assert_eq!(
            unsupported_preview_message("noextension"),
            "Preview not available for this file. Please download to view."
        );
    }
}

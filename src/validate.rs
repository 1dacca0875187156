//! Advisory client-side file checks, mirrored from the web dashboard.
//!
//! These run before any network call so a bad pick never costs a request.
//! They are not a security boundary; the backend re-validates everything.

use std::path::Path;

use thiserror::Error;

/// Maximum accepted file size for uploads and local decryption: 10 MB.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

#[derive(Debug, Error, PartialEq)]
pub enum ValidateError {
    #[error("File type not supported: {name}. Only JPEG, PNG, PDF, ZIP, and TXT files are allowed.")]
    UnsupportedType { name: String },

    #[error("File too large: {name}. Maximum size is 10MB.")]
    TooLarge { name: String },

    #[error("Invalid file: {name}. Only .enc files can be decrypted.")]
    NotEncrypted { name: String },
}

/// How a vault entry can be previewed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PreviewKind {
    /// Decrypt and print to the terminal.
    Text,
    /// Viewable only in a graphical context.
    Image,
    /// Viewable only in a graphical context.
    Pdf,
    /// No preview at all.
    Unsupported,
}

/// Map an upload candidate to its MIME type, if it is on the allow-list.
///
/// The browser client filtered on the file's reported MIME type; here the
/// extension stands in for it.
pub fn allowed_mime_type(name: &str) -> Option<&'static str> {
    match extension(name).as_deref() {
        Some("jpg") | Some("jpeg") => Some("image/jpeg"),
        Some("png") => Some("image/png"),
        Some("pdf") => Some("application/pdf"),
        Some("zip") => Some("application/zip"),
        Some("txt") | Some("text") => Some("text/plain"),
        _ => None,
    }
}

/// Validate an upload candidate; returns its MIME type on success.
pub fn check_upload(path: &Path, size: u64) -> Result<&'static str, ValidateError> {
    let name = display_name(path);

    let mime = allowed_mime_type(&name).ok_or_else(|| ValidateError::UnsupportedType {
        name: name.clone(),
    })?;

    if size > MAX_FILE_SIZE {
        return Err(ValidateError::TooLarge { name });
    }

    Ok(mime)
}

/// Validate a local ciphertext file for `decrypt-local`.
///
/// Only `.enc`-suffixed files up to the size cap are accepted.
pub fn check_encrypted_file(path: &Path, size: u64) -> Result<(), ValidateError> {
    let name = display_name(path);

    if !name.to_lowercase().ends_with(".enc") {
        return Err(ValidateError::NotEncrypted { name });
    }

    if size > MAX_FILE_SIZE {
        return Err(ValidateError::TooLarge { name });
    }

    Ok(())
}

/// Classify a vault entry by how the dashboard would preview it.
pub fn preview_kind(name: &str) -> PreviewKind {
    match extension(name).as_deref() {
        Some("txt") | Some("text") | Some("md") | Some("csv") => PreviewKind::Text,
        Some("jpg") | Some("jpeg") | Some("png") | Some("gif") | Some("bmp")
        | Some("webp") => PreviewKind::Image,
        Some("pdf") => PreviewKind::Pdf,
        _ => PreviewKind::Unsupported,
    }
}

fn extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_allowed_mime_types() {
        assert_eq!(allowed_mime_type("photo.JPG"), Some("image/jpeg"));
        assert_eq!(allowed_mime_type("photo.jpeg"), Some("image/jpeg"));
        assert_eq!(allowed_mime_type("icon.png"), Some("image/png"));
        assert_eq!(allowed_mime_type("doc.pdf"), Some("application/pdf"));
        assert_eq!(allowed_mime_type("backup.zip"), Some("application/zip"));
        assert_eq!(allowed_mime_type("notes.txt"), Some("text/plain"));
    }

    #[test]
    fn test_disallowed_extensions_rejected() {
        assert_eq!(allowed_mime_type("movie.mp4"), None);
        assert_eq!(allowed_mime_type("script.sh"), None);
        assert_eq!(allowed_mime_type("noextension"), None);
    }

    #[test]
    fn test_check_upload_rejects_bad_type_with_message() {
        let err = check_upload(&PathBuf::from("movie.mp4"), 100).unwrap_err();
        assert_eq!(
            err.to_string(),
            "File type not supported: movie.mp4. Only JPEG, PNG, PDF, ZIP, and TXT files are allowed."
        );
    }

    #[test]
    fn test_check_upload_size_boundary() {
        // Exactly 10 MB is allowed; one byte more is not.
        let path = PathBuf::from("big.zip");
        assert_eq!(check_upload(&path, MAX_FILE_SIZE), Ok("application/zip"));

        let err = check_upload(&path, MAX_FILE_SIZE + 1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "File too large: big.zip. Maximum size is 10MB."
        );
    }

    #[test]
    fn test_check_encrypted_file_requires_enc_suffix() {
        assert!(check_encrypted_file(&PathBuf::from("report.pdf.enc"), 100).is_ok());
        assert!(check_encrypted_file(&PathBuf::from("REPORT.ENC"), 100).is_ok());

        let err = check_encrypted_file(&PathBuf::from("report.pdf"), 100).unwrap_err();
        assert_eq!(
            err,
            ValidateError::NotEncrypted {
                name: "report.pdf".to_string()
            }
        );
    }

    #[test]
    fn test_check_encrypted_file_size_cap() {
        let err = check_encrypted_file(&PathBuf::from("big.enc"), MAX_FILE_SIZE + 1).unwrap_err();
        assert_eq!(
            err,
            ValidateError::TooLarge {
                name: "big.enc".to_string()
            }
        );
    }

    #[test]
    fn test_preview_kinds() {
        assert_eq!(preview_kind("notes.txt"), PreviewKind::Text);
        assert_eq!(preview_kind("data.csv"), PreviewKind::Text);
        assert_eq!(preview_kind("README.md"), PreviewKind::Text);
        assert_eq!(preview_kind("photo.jpeg"), PreviewKind::Image);
        assert_eq!(preview_kind("scan.webp"), PreviewKind::Image);
        assert_eq!(preview_kind("doc.PDF"), PreviewKind::Pdf);
        assert_eq!(preview_kind("backup.zip"), PreviewKind::Unsupported);
        assert_eq!(preview_kind("noextension"), PreviewKind::Unsupported);
    }
}

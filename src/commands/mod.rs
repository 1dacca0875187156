//! Command handlers for the CLI surface.
//!
//! Each handler loads the stored session when it needs one, talks to the
//! backend through `api`, and reports the outcome on stdout/stderr. Failures
//! bubble up as display-ready strings for `main` to print.

pub mod admin;
pub mod auth;
pub mod vault;

use std::io::Write;

/// Prompt for a password without echoing it.
pub(crate) fn prompt_password(prompt: &str) -> Result<String, String> {
    rpassword::prompt_password(prompt).map_err(|e| format!("Failed to read password: {}", e))
}

/// Ask a yes/no question; anything but y/yes counts as no.
pub(crate) fn confirm(question: &str) -> Result<bool, String> {
    print!("{} [y/N] ", question);
    std::io::stdout()
        .flush()
        .map_err(|e| format!("Failed to flush stdout: {}", e))?;

    let mut answer = String::new();
    std::io::stdin()
        .read_line(&mut answer)
        .map_err(|e| format!("Failed to read input: {}", e))?;

    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

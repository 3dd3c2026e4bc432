use anyhow::Context;
use inquire::{Password, PasswordDisplayMode};

/// Read the API password from the terminal without echoing it.
pub fn prompt_password() -> anyhow::Result<String> {
    Password::new("Password:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Hidden)
        .prompt()
        .context("Failed to read the API password")
}

/// Use the password given on the command line, or ask for one.
///
/// An empty password counts as missing.
pub fn resolve_password<F>(given: Option<String>, prompt: F) -> anyhow::Result<String>
where
    F: FnOnce() -> anyhow::Result<String>,
{
    match given.filter(|password| !password.is_empty()) {
        Some(password) => Ok(password),
        None => prompt(),
    }
}

//! Password hashing for administrator provisioning.
//!
//! The password is read from stdin so it never appears in shell history or
//! the process list. A single trailing newline is stripped.

use std::io::{self, Read, Write};

use serde::Serialize;
use thiserror::Error;

use qwinnet_core::{AdminRole, Email, EmailError};
use qwinnet_server::services::auth::hash_password;

#[derive(Debug, Error)]
pub enum HashPasswordError {
    #[error("Failed to read password from stdin: {0}")]
    Io(#[from] io::Error),

    #[error("Password must not be empty")]
    EmptyPassword,

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Password hashing failed")]
    Hash,

    #[error("Failed to render YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// One entry of `ADMIN_USERS_FILE`.
#[derive(Debug, Serialize)]
struct AdminEntry {
    email: Email,
    password_hash: String,
    role: AdminRole,
}

/// Strip exactly one trailing line ending.
fn trim_line_ending(input: &str) -> &str {
    input
        .strip_suffix("\r\n")
        .or_else(|| input.strip_suffix('\n'))
        .unwrap_or(input)
}

/// Render the output for a hash: the bare PHC string, or a YAML list entry
/// when an email is given.
fn render(hash: String, email: Option<&str>) -> Result<String, HashPasswordError> {
    let Some(email) = email else {
        return Ok(format!("{hash}\n"));
    };

    let entry = AdminEntry {
        email: Email::parse(email)?,
        password_hash: hash,
        role: AdminRole::Admin,
    };
    Ok(serde_yaml::to_string(&[entry])?)
}

/// Hash the password on stdin and print it.
///
/// # Errors
///
/// Returns an error if stdin cannot be read, the password is empty, the
/// email is invalid, or hashing fails.
pub fn run(email: Option<&str>) -> Result<(), HashPasswordError> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;

    let password = trim_line_ending(&input);
    if password.is_empty() {
        return Err(HashPasswordError::EmptyPassword);
    }

    let hash = hash_password(password).map_err(|_| HashPasswordError::Hash)?;
    let output = render(hash, email)?;

    io::stdout().write_all(output.as_bytes())?;
    Ok(())
}

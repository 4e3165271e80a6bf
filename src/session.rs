use crate::config::config_dir;
use crate::constants::SESSION_FILE_NAME;
use crate::error::{KiranaError, Result};
use std::fs;
use std::path::PathBuf;

/// Marker-file session gate for admin commands.
///
/// Mirrors the original client-side behavior: a shared static password is
/// compared locally and success is remembered until logout. This grants
/// access to anyone who can read the config; it is deliberately not a real
/// access control system.
pub fn login(password: &str, expected: &str) -> Result<()> {
    if password != expected {
        return Err(KiranaError::WrongPassword);
    }
    let path = session_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|_| KiranaError::DirectoryCreationFailed(parent.to_path_buf()))?;
    }
    fs::write(&path, "authenticated\n")?;
    Ok(())
}

pub fn logout() -> Result<bool> {
    let path = session_path()?;
    if path.exists() {
        fs::remove_file(&path)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

pub fn is_logged_in() -> bool {
    session_path().map(|p| p.exists()).unwrap_or(false)
}

pub fn require_login() -> Result<()> {
    if is_logged_in() {
        Ok(())
    } else {
        Err(KiranaError::NotLoggedIn)
    }
}

fn session_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(SESSION_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_password_is_rejected() {
        let result = login("guess", "actual");
        assert!(matches!(result, Err(KiranaError::WrongPassword)));
    }
}

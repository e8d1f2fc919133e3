//! Single-user authentication gate.
//!
//! Credentials are a fixed pair from configuration. The session flag survives restarts
//! as `true`/`false` text in a small file.

use crate::config::AuthConfig;
use std::path::PathBuf;
use tracing::{info, warn};

/// Shown when the credentials do not match.
pub const LOGIN_FAILED_MESSAGE: &str = "အသုံးပြုသူအမည် သို့မဟုတ် စကားဝှက် မှားယွင်းနေပါသည်";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("{}", LOGIN_FAILED_MESSAGE)]
    AuthenticationFailed,
}

/// Login state plus the last error message for the login screen.
#[derive(Debug)]
pub struct AuthSession {
    username: String,
    password: String,
    flag_path: PathBuf,
    authenticated: bool,
    last_error: Option<String>,
}

impl AuthSession {
    /// Restores the persisted flag. An unreadable or absent flag means logged out.
    pub fn restore(config: &AuthConfig) -> Self {
        let authenticated = match std::fs::read_to_string(&config.session_flag_path) {
            Ok(text) => text.trim() == "true",
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
            Err(e) => {
                warn!(error = %e, "Could not read session flag");
                false
            }
        };
        info!(authenticated, "Session restored");
        Self {
            username: config.username.clone(),
            password: config.password.clone(),
            flag_path: config.session_flag_path.clone(),
            authenticated,
            last_error: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Compares against the configured pair. Failure leaves the session logged out.
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        if username == self.username && password == self.password {
            self.authenticated = true;
            self.last_error = None;
            self.persist();
            info!(%username, "Logged in");
            Ok(())
        } else {
            self.last_error = Some(LOGIN_FAILED_MESSAGE.to_string());
            warn!(%username, "Login rejected");
            Err(AuthError::AuthenticationFailed)
        }
    }

    pub fn logout(&mut self) {
        self.authenticated = false;
        self.last_error = None;
        self.persist();
        info!("Logged out");
    }

    // Write failures are logged; the in-memory flag stays authoritative.
    fn persist(&self) {
        if let Some(parent) = self.flag_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!(error = %e, "Could not create session directory");
                return;
            }
        }
        let text = if self.authenticated { "true" } else { "false" };
        if let Err(e) = std::fs::write(&self.flag_path, text) {
            warn!(error = %e, "Could not persist session flag");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(dir: &tempfile::TempDir) -> AuthConfig {
        AuthConfig {
            session_flag_path: dir.path().join("session/is_auth"),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn wrong_password_is_rejected_with_message() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = AuthSession::restore(&config(&dir));

        assert_eq!(session.login("aa", "0000"), Err(AuthError::AuthenticationFailed));
        assert!(!session.is_authenticated());
        assert_eq!(session.last_error(), Some(LOGIN_FAILED_MESSAGE));
    }

    #[test]
    fn login_survives_restart_until_logout() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);

        let mut session = AuthSession::restore(&config);
        assert!(!session.is_authenticated());
        session.login("aa", "1234").unwrap();
        assert_eq!(
            std::fs::read_to_string(&config.session_flag_path).unwrap(),
            "true"
        );

        let mut restored = AuthSession::restore(&config);
        assert!(restored.is_authenticated());

        restored.logout();
        assert!(!AuthSession::restore(&config).is_authenticated());
    }

    #[test]
    fn successful_login_clears_previous_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = AuthSession::restore(&config(&dir));
        let _ = session.login("bb", "1234");
        session.login("aa", "1234").unwrap();
        assert_eq!(session.last_error(), None);
    }
}

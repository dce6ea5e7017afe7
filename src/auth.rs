//! Auth
//!
//! Plaintext user directory and the current-user session. Passwords are
//! stored in clear in process memory and compared exactly; nothing is
//! persisted across runs.

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, info};

/// Errors related to signup and login.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The username is already taken.
    #[error("User {0} already exists")]
    AlreadyExists(String),

    /// The username is unknown or the password does not match.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The username was empty.
    #[error("Username must not be empty")]
    EmptyUsername,
}

/// In-memory username to password mapping.
///
/// Usernames are case-sensitive and stored exactly as given, whitespace
/// included. Accounts are never deleted.
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: FxHashMap<String, String>,
}

impl UserDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new user.
    ///
    /// A rejected signup leaves the directory untouched.
    ///
    /// # Errors
    ///
    /// - [`AuthError::EmptyUsername`]: the username was empty.
    /// - [`AuthError::AlreadyExists`]: the username is already a key.
    pub fn signup(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        if username.is_empty() {
            return Err(AuthError::EmptyUsername);
        }

        if self.users.contains_key(username) {
            return Err(AuthError::AlreadyExists(username.to_string()));
        }

        self.users.insert(username.to_string(), password.to_string());

        info!(username, "user signed up");

        Ok(())
    }

    /// Check a username and password pair.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the username is absent
    /// or the stored password differs.
    pub fn verify(&self, username: &str, password: &str) -> Result<(), AuthError> {
        match self.users.get(username) {
            Some(stored) if stored == password => Ok(()),
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    /// Check whether a username is registered.
    #[must_use]
    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    /// Get the number of registered users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Check if no users are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// Tracks which user, if any, is currently authenticated.
///
/// Initialized to no user; re-settable any number of times.
#[derive(Debug, Default)]
pub struct Session {
    current: Option<String>,
}

impl Session {
    /// Create a session with no authenticated user.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Authenticate against the directory and set the current user.
    ///
    /// A failed login leaves the session untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when verification fails.
    pub fn login(
        &mut self,
        directory: &UserDirectory,
        username: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        directory.verify(username, password)?;

        self.current = Some(username.to_string());

        info!(username, "user logged in");

        Ok(())
    }

    /// Clear the current user. Idempotent.
    pub fn logout(&mut self) {
        self.current = None;

        debug!("session cleared");
    }

    /// The current username, if a user is logged in.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Check whether a user is logged in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn signup_then_login_succeeds() -> TestResult {
        let mut users = UserDirectory::new();
        let mut session = Session::new();

        users.signup("asha", "secret")?;
        session.login(&users, "asha", "secret")?;

        assert_eq!(session.current(), Some("asha"));
        assert!(session.is_authenticated());

        Ok(())
    }

    #[test]
    fn duplicate_signup_errors() -> TestResult {
        let mut users = UserDirectory::new();

        users.signup("asha", "secret")?;
        let result = users.signup("asha", "other");

        assert_eq!(result, Err(AuthError::AlreadyExists("asha".to_string())));
        assert_eq!(users.len(), 1);

        Ok(())
    }

    #[test]
    fn empty_username_signup_errors() {
        let mut users = UserDirectory::new();

        assert_eq!(users.signup("", "secret"), Err(AuthError::EmptyUsername));
        assert!(users.is_empty());
    }

    #[test]
    fn login_with_wrong_password_errors() -> TestResult {
        let mut users = UserDirectory::new();
        let mut session = Session::new();

        users.signup("asha", "secret")?;
        let result = session.login(&users, "asha", "wrong");

        assert_eq!(result, Err(AuthError::InvalidCredentials));
        assert!(!session.is_authenticated());

        Ok(())
    }

    #[test]
    fn login_with_unknown_user_errors() {
        let users = UserDirectory::new();
        let mut session = Session::new();

        let result = session.login(&users, "nobody", "secret");

        assert_eq!(result, Err(AuthError::InvalidCredentials));
    }

    #[test]
    fn credentials_are_case_sensitive_and_keep_whitespace() -> TestResult {
        let mut users = UserDirectory::new();

        users.signup("Asha ", "secret")?;

        assert!(users.verify("asha", "secret").is_err());
        assert!(users.verify("Asha", "secret").is_err());
        assert!(users.verify("Asha ", "secret").is_ok());

        Ok(())
    }

    #[test]
    fn logout_is_idempotent() -> TestResult {
        let mut users = UserDirectory::new();
        let mut session = Session::new();

        users.signup("asha", "secret")?;
        session.login(&users, "asha", "secret")?;

        session.logout();
        session.logout();

        assert_eq!(session.current(), None);

        Ok(())
    }

    #[test]
    fn relogin_replaces_the_current_user() -> TestResult {
        let mut users = UserDirectory::new();
        let mut session = Session::new();

        users.signup("asha", "secret")?;
        users.signup("ravi", "hunter2")?;

        session.login(&users, "asha", "secret")?;
        session.login(&users, "ravi", "hunter2")?;

        assert_eq!(session.current(), Some("ravi"));

        Ok(())
    }
}

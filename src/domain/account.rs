/// A registered account as stored in the users file.
///
/// `is_admin` is always false for accounts created through registration; the
/// flag only exists because the file format carries it. The superuser is not
/// an account record at all, see [`crate::actors::AccountDirectory`].
#[derive(Debug, Clone, PartialEq)]
pub struct UserAccount {
    pub username: String,
    pub password: String,
    pub is_admin: bool,
}

impl UserAccount {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            is_admin: false,
        }
    }
}

/// Outcome of an authentication attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Login {
    Superuser,
    Registered,
    Rejected,
}

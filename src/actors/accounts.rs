use tokio::sync::mpsc;
use tracing::{info, instrument, warn};

use crate::clients::AccountClient;
use crate::config::SuperuserCredentials;
use crate::domain::{Login, UserAccount};
use crate::error::AccountError;
use crate::messages::AccountRequest;

/// Registered accounts plus the injected superuser credential pair.
///
/// The superuser is checked before the account list and is never stored in
/// it; it cannot be registered over, altered, or persisted.
pub struct AccountDirectory {
    accounts: Vec<UserAccount>,
    capacity: usize,
    superuser: SuperuserCredentials,
}

impl AccountDirectory {
    pub fn new(superuser: SuperuserCredentials, capacity: usize) -> Self {
        Self::seed(Vec::new(), superuser, capacity)
    }

    pub fn seed(
        accounts: Vec<UserAccount>,
        superuser: SuperuserCredentials,
        capacity: usize,
    ) -> Self {
        Self {
            accounts,
            capacity,
            superuser,
        }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn snapshot(&self) -> Vec<UserAccount> {
        self.accounts.clone()
    }

    pub fn register(&mut self, username: String, password: String) -> Result<(), AccountError> {
        if self.accounts.len() >= self.capacity {
            return Err(AccountError::CapacityExceeded(self.capacity));
        }
        if self.accounts.iter().any(|a| a.username == username) {
            return Err(AccountError::DuplicateUsername(username));
        }
        self.accounts.push(UserAccount::new(username, password));
        Ok(())
    }

    /// Case-sensitive exact match, superuser first.
    pub fn authenticate(&self, username: &str, password: &str) -> Login {
        if username == self.superuser.username && password == self.superuser.password {
            return Login::Superuser;
        }
        let registered = self
            .accounts
            .iter()
            .any(|a| a.username == username && a.password == password);
        if registered {
            Login::Registered
        } else {
            Login::Rejected
        }
    }
}

/// Actor wrapping an [`AccountDirectory`] behind a message channel.
pub struct AccountActor {
    receiver: mpsc::Receiver<AccountRequest>,
    directory: AccountDirectory,
}

impl AccountActor {
    pub fn new(buffer_size: usize, directory: AccountDirectory) -> (Self, AccountClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        (
            Self {
                receiver,
                directory,
            },
            AccountClient::new(sender),
        )
    }

    #[instrument(name = "account_service", skip(self))]
    pub async fn run(mut self) {
        info!("AccountActor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                AccountRequest::Register {
                    username,
                    password,
                    respond_to,
                } => {
                    let name = username.clone();
                    let result = self.directory.register(username, password);
                    match &result {
                        Ok(()) => info!(user = %name, "User registered"),
                        Err(e) => warn!(user = %name, error = %e, "Registration rejected"),
                    }
                    let _ = respond_to.send(result);
                }
                AccountRequest::Authenticate {
                    username,
                    password,
                    respond_to,
                } => {
                    let outcome = self.directory.authenticate(&username, &password);
                    match outcome {
                        Login::Rejected => warn!(user = %username, "Login rejected"),
                        _ => info!(user = %username, ?outcome, "Login accepted"),
                    }
                    let _ = respond_to.send(Ok(outcome));
                }
                AccountRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(Ok(self.directory.snapshot()));
                }
                AccountRequest::Shutdown => {
                    info!("AccountActor shutting down");
                    break;
                }
            }
        }
        info!("AccountActor stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn superuser() -> SuperuserCredentials {
        SuperuserCredentials {
            username: "root".into(),
            password: "hunter2".into(),
        }
    }

    #[test]
    fn register_rejects_duplicates_case_sensitively() {
        let mut dir = AccountDirectory::new(superuser(), 100);
        dir.register("alice".into(), "pw".into()).unwrap();

        assert_eq!(
            dir.register("alice".into(), "other".into()),
            Err(AccountError::DuplicateUsername("alice".into()))
        );
        // Different case is a different username.
        dir.register("Alice".into(), "pw".into()).unwrap();
        assert_eq!(dir.len(), 2);
    }

    #[test]
    fn register_enforces_capacity() {
        let mut dir = AccountDirectory::new(superuser(), 1);
        dir.register("a".into(), "pw".into()).unwrap();
        assert_eq!(
            dir.register("b".into(), "pw".into()),
            Err(AccountError::CapacityExceeded(1))
        );
    }

    #[test]
    fn authenticate_distinguishes_superuser_registered_and_rejected() {
        let mut dir = AccountDirectory::new(superuser(), 100);
        dir.register("alice".into(), "pw".into()).unwrap();

        assert_eq!(dir.authenticate("root", "hunter2"), Login::Superuser);
        assert_eq!(dir.authenticate("alice", "pw"), Login::Registered);
        assert_eq!(dir.authenticate("alice", "wrong"), Login::Rejected);
        assert_eq!(dir.authenticate("root", "wrong"), Login::Rejected);
        assert_eq!(dir.authenticate("nobody", "pw"), Login::Rejected);
    }

    #[test]
    fn superuser_is_not_a_stored_account() {
        let dir = AccountDirectory::new(superuser(), 100);
        assert!(dir.is_empty());
        assert!(dir.snapshot().is_empty());
    }
}

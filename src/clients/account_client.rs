use tokio::sync::mpsc;

use crate::client_method;
use crate::domain::{Login, UserAccount};
use crate::error::AccountError;
use crate::messages::AccountRequest;

/// Client for the account actor.
#[derive(Clone)]
pub struct AccountClient {
    sender: mpsc::Sender<AccountRequest>,
}

impl AccountClient {
    pub fn new(sender: mpsc::Sender<AccountRequest>) -> Self {
        Self { sender }
    }

    pub async fn shutdown(&self) {
        let _ = self.sender.send(AccountRequest::Shutdown).await;
    }
}

client_method!(AccountClient => fn register(username: String, password: String) -> () as AccountRequest::Register, Error = AccountError);
client_method!(AccountClient => fn authenticate(username: String, password: String) -> Login as AccountRequest::Authenticate, Error = AccountError);
client_method!(AccountClient => fn snapshot() -> Vec<UserAccount> as AccountRequest::Snapshot, Error = AccountError);

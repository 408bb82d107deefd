use tracing::{error, info};

use crate::actors::{AccountActor, AccountDirectory, CatalogActor, CatalogStore, LedgerActor, LedgerStore};
use crate::clients::{AccountClient, CatalogClient, LedgerClient};
use crate::config::{StoreConfig, SuperuserCredentials};
use crate::domain::{Order, Product, UserAccount};

const ACTOR_BUFFER: usize = 32;

/// State recovered from disk that the actors start from.
#[derive(Debug, Default)]
pub struct StoreSeed {
    pub users: Vec<UserAccount>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub watermark: u64,
}

/// The main application system that owns all actors.
///
/// Responsible for starting the actors, wiring the clients together, and
/// handling shutdown. Each actor exclusively owns its collection, so the
/// clients here are the only write paths into store state.
pub struct StoreSystem {
    pub catalog_client: CatalogClient,
    pub ledger_client: LedgerClient,
    pub account_client: AccountClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StoreSystem {
    pub fn start(seed: StoreSeed, config: &StoreConfig, superuser: SuperuserCredentials) -> Self {
        // 1. Catalog service
        let store = CatalogStore::seed(seed.products, config.max_products);
        info!(products = store.len(), "Catalog seeded");
        let (catalog_actor, catalog_client) = CatalogActor::new(ACTOR_BUFFER, store);
        let catalog_handle = tokio::spawn(catalog_actor.run());

        // 2. Ledger service; its client drives the catalog at checkout
        let store = LedgerStore::seed(seed.orders, seed.watermark, config.max_orders);
        info!(
            orders = store.len(),
            last_order_id = store.last_order_id(),
            watermark = store.watermark(),
            "Ledger seeded"
        );
        let (ledger_actor, ledger_sender) = LedgerActor::new(ACTOR_BUFFER, store);
        let ledger_client = LedgerClient::new(ledger_sender, catalog_client.clone());
        let ledger_handle = tokio::spawn(ledger_actor.run());

        // 3. Account service
        let directory = AccountDirectory::seed(seed.users, superuser, config.max_users);
        info!(users = directory.len(), "Account directory seeded");
        let (account_actor, account_client) = AccountActor::new(ACTOR_BUFFER, directory);
        let account_handle = tokio::spawn(account_actor.run());

        Self {
            catalog_client,
            ledger_client,
            account_client,
            handles: vec![catalog_handle, ledger_handle, account_handle],
        }
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        self.ledger_client.shutdown().await;
        self.catalog_client.shutdown().await;
        self.account_client.shutdown().await;

        // Drop clients so the channels close even if a Shutdown was not seen.
        drop(self.ledger_client);
        drop(self.catalog_client);
        drop(self.account_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

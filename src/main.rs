mod actors;
mod app_system;
mod clients;
mod config;
mod domain;
mod error;
mod messages;
mod persist;
mod session;

#[cfg(test)]
mod mock_framework;

use tracing::{error, info};

use crate::app_system::{setup_tracing, StoreSeed, StoreSystem};
use crate::config::SuperuserCredentials;
use crate::persist::{HistoryLog, RecordFiles};
use crate::session::{Console, Session};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    dotenvy::dotenv().ok();

    let config = config::load_config("storefront.toml").map_err(|e| e.to_string())?;
    let superuser = SuperuserCredentials::from_env();

    tokio::fs::create_dir_all(&config.data_dir)
        .await
        .map_err(|e| format!("Failed to create data dir: {e}"))?;
    let files = RecordFiles::new(&config.data_dir);
    let history = HistoryLog::new(&config.data_dir);

    let seed = StoreSeed {
        users: files.load_users().await.map_err(|e| e.to_string())?,
        products: files.load_products().await.map_err(|e| e.to_string())?,
        orders: files.load_orders().await.map_err(|e| e.to_string())?,
        watermark: history.recover_watermark().await.map_err(|e| e.to_string())?,
    };
    info!(
        users = seed.users.len(),
        products = seed.products.len(),
        orders = seed.orders.len(),
        watermark = seed.watermark,
        "Persisted state loaded"
    );

    let system = StoreSystem::start(seed, &config, superuser);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let console = Console::new(stdin.lock(), stdout.lock());
    let mut session = Session::new(
        console,
        system.catalog_client.clone(),
        system.ledger_client.clone(),
        system.account_client.clone(),
        files,
        history,
    );

    match session.run().await {
        Ok(()) => info!("Session ended"),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            info!("Console input closed")
        }
        Err(e) => error!(error = %e, "Session failed"),
    }
    drop(session);

    system.shutdown().await?;
    Ok(())
}

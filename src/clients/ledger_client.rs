use tokio::sync::mpsc;
use tracing::{error, info, instrument, warn};

use crate::client_method;
use crate::clients::CatalogClient;
use crate::domain::{Order, OrderDraft, PaymentMethod};
use crate::error::LedgerError;
use crate::messages::{LedgerRequest, StockOutcome};
use crate::persist::HistoryLog;

/// Client for the ledger actor.
///
/// This client handles cross-resource orchestration: placing an order
/// consults the catalog for price and stock, and finalizing payment drives
/// the stock deduction that checkout owes the catalog.
#[derive(Clone)]
pub struct LedgerClient {
    sender: mpsc::Sender<LedgerRequest>,
    catalog: CatalogClient,
}

impl LedgerClient {
    pub fn new(sender: mpsc::Sender<LedgerRequest>, catalog: CatalogClient) -> Self {
        Self { sender, catalog }
    }

    pub async fn shutdown(&self) {
        let _ = self.sender.send(LedgerRequest::Shutdown).await;
    }

    /// Places a pending order for `username`.
    ///
    /// Stock is checked here, once; it is only actually deducted when the
    /// order is finalized at checkout. The total price is computed from the
    /// product's current price and discount and frozen into the order.
    #[instrument(skip(self, address))]
    pub async fn place_order(
        &self,
        username: &str,
        product_name: &str,
        quantity: u32,
        address: String,
    ) -> Result<u64, LedgerError> {
        info!("Processing place_order request");

        let product = match self.catalog.find(product_name.to_string()).await {
            Ok(Some(product)) => product,
            Ok(None) => {
                error!("Product not found");
                return Err(LedgerError::UnknownProduct(product_name.to_string()));
            }
            Err(e) => {
                error!(error = %e, "Product lookup failed");
                return Err(LedgerError::ActorCommunicationError(e.to_string()));
            }
        };

        if quantity > product.stock {
            warn!(
                requested = quantity,
                available = product.stock,
                "Insufficient stock"
            );
            return Err(LedgerError::InsufficientStock {
                requested: quantity,
                available: product.stock,
            });
        }

        let draft = OrderDraft {
            username: username.to_string(),
            product_name: product.name.clone(),
            quantity,
            total_price: product.discounted_price() * f64::from(quantity),
            address,
        };
        let id = self.place(draft).await?;
        info!(order_id = id, "Order placed as Pending");
        Ok(id)
    }

    /// Finalizes every pending order of `username` with `method`, then
    /// deducts stock for each finalized order. Orders are processed
    /// independently: a product that has vanished from the catalog is
    /// logged and skipped, the remaining deductions still run.
    #[instrument(skip(self))]
    pub async fn finalize_payment(
        &self,
        username: &str,
        method: PaymentMethod,
    ) -> Result<Vec<Order>, LedgerError> {
        let finalized = self.finalize_pending(username.to_string(), method).await?;
        for order in &finalized {
            match self
                .catalog
                .deduct_stock(order.product_name.clone(), order.quantity)
                .await
            {
                Ok(StockOutcome::Missing) => {
                    warn!(
                        order_id = order.id,
                        product = %order.product_name,
                        "Finalized order references a product no longer in the catalog"
                    );
                }
                Ok(_) => {}
                Err(e) => {
                    error!(
                        order_id = order.id,
                        error = %e,
                        "Stock deduction failed, continuing with remaining orders"
                    );
                }
            }
        }
        Ok(finalized)
    }

    /// Appends every order past the history watermark to the log, then
    /// advances the watermark. Safe to call repeatedly: once synced, an
    /// order is never appended again.
    #[instrument(skip(self, history))]
    pub async fn sync_history(&self, history: &HistoryLog) -> Result<usize, LedgerError> {
        let unsynced = self.unsynced().await?;
        if unsynced.is_empty() {
            return Ok(0);
        }

        let mut appended_up_to = 0;
        for order in &unsynced {
            if let Err(e) = history.append(order).await {
                error!(order_id = order.id, error = %e, "History append failed");
                // Keep what did make it to disk out of the next sync.
                if appended_up_to > 0 {
                    self.mark_synced(appended_up_to).await?;
                }
                return Err(LedgerError::History(e.to_string()));
            }
            appended_up_to = appended_up_to.max(order.id);
        }

        self.mark_synced(appended_up_to).await?;
        info!(count = unsynced.len(), watermark = appended_up_to, "History synced");
        Ok(unsynced.len())
    }
}

client_method!(LedgerClient => fn place(draft: OrderDraft) -> u64 as LedgerRequest::Place, Error = LedgerError);
client_method!(LedgerClient => fn orders_for(username: String) -> Vec<Order> as LedgerRequest::OrdersFor, Error = LedgerError);
client_method!(LedgerClient => fn pending_for(username: String) -> Vec<Order> as LedgerRequest::PendingFor, Error = LedgerError);
client_method!(LedgerClient => fn finalize_pending(username: String, method: PaymentMethod) -> Vec<Order> as LedgerRequest::FinalizePending, Error = LedgerError);
client_method!(LedgerClient => fn unsynced() -> Vec<Order> as LedgerRequest::Unsynced, Error = LedgerError);
client_method!(LedgerClient => fn mark_synced(up_to: u64) -> () as LedgerRequest::MarkSynced, Error = LedgerError);
client_method!(LedgerClient => fn snapshot() -> Vec<Order> as LedgerRequest::Snapshot, Error = LedgerError);

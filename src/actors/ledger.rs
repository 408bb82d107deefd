use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::domain::{Order, OrderDraft, PaymentMethod};
use crate::error::LedgerError;
use crate::messages::LedgerRequest;

/// The ordered order collection.
///
/// Orders are append-only: finalized orders stay in the ledger forever. Two
/// counters ride along — `last_order_id` for monotonic id assignment and
/// `watermark` for the highest id already written to the history log.
pub struct LedgerStore {
    orders: Vec<Order>,
    capacity: usize,
    last_order_id: u64,
    watermark: u64,
}

impl LedgerStore {
    pub fn new(capacity: usize) -> Self {
        Self::seed(Vec::new(), 0, capacity)
    }

    /// Rebuilds the ledger from persisted orders and the recovered history
    /// watermark. The id counter resumes past the highest id seen in either
    /// source, so ids are never reused across restarts.
    pub fn seed(orders: Vec<Order>, watermark: u64, capacity: usize) -> Self {
        let max_loaded = orders.iter().map(|o| o.id).max().unwrap_or(0);
        Self {
            orders,
            capacity,
            last_order_id: max_loaded.max(watermark),
            watermark,
        }
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn snapshot(&self) -> Vec<Order> {
        self.orders.clone()
    }

    pub fn place(&mut self, draft: OrderDraft) -> Result<u64, LedgerError> {
        if self.orders.len() >= self.capacity {
            return Err(LedgerError::CapacityExceeded(self.capacity));
        }
        self.last_order_id += 1;
        let id = self.last_order_id;
        self.orders.push(Order::from_draft(id, draft));
        Ok(id)
    }

    pub fn orders_for(&self, username: &str) -> Vec<Order> {
        self.orders
            .iter()
            .filter(|o| o.username == username)
            .cloned()
            .collect()
    }

    pub fn pending_for(&self, username: &str) -> Vec<Order> {
        self.orders
            .iter()
            .filter(|o| o.username == username && o.is_pending())
            .cloned()
            .collect()
    }

    /// Moves every pending order of `username` to `method` and returns the
    /// finalized orders. A second call finds nothing pending and returns
    /// an empty vec, which is what makes checkout idempotent.
    pub fn finalize_pending(&mut self, username: &str, method: PaymentMethod) -> Vec<Order> {
        let mut finalized = Vec::new();
        for order in &mut self.orders {
            if order.username == username && order.is_pending() {
                order.payment_method = method;
                finalized.push(order.clone());
            }
        }
        finalized
    }

    /// Orders not yet written to the history log, in ledger order.
    pub fn unsynced(&self) -> Vec<Order> {
        self.orders
            .iter()
            .filter(|o| o.id > self.watermark)
            .cloned()
            .collect()
    }

    /// Advances the history watermark. Never moves backwards.
    pub fn mark_synced(&mut self, up_to: u64) {
        self.watermark = self.watermark.max(up_to);
    }

    pub fn watermark(&self) -> u64 {
        self.watermark
    }

    pub fn last_order_id(&self) -> u64 {
        self.last_order_id
    }
}

/// Actor wrapping a [`LedgerStore`] behind a message channel.
///
/// Cross-resource work (stock deduction, history appends) is orchestrated by
/// [`crate::clients::LedgerClient`], not here; the actor only mutates its own
/// collection.
pub struct LedgerActor {
    receiver: mpsc::Receiver<LedgerRequest>,
    store: LedgerStore,
}

impl LedgerActor {
    pub fn new(buffer_size: usize, store: LedgerStore) -> (Self, mpsc::Sender<LedgerRequest>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        (Self { receiver, store }, sender)
    }

    #[instrument(name = "ledger_service", skip(self))]
    pub async fn run(mut self) {
        info!("LedgerActor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                LedgerRequest::Place { draft, respond_to } => {
                    let result = self.store.place(draft);
                    if let Ok(id) = &result {
                        info!(order_id = id, "Order placed");
                    }
                    let _ = respond_to.send(result);
                }
                LedgerRequest::OrdersFor {
                    username,
                    respond_to,
                } => {
                    let _ = respond_to.send(Ok(self.store.orders_for(&username)));
                }
                LedgerRequest::PendingFor {
                    username,
                    respond_to,
                } => {
                    let _ = respond_to.send(Ok(self.store.pending_for(&username)));
                }
                LedgerRequest::FinalizePending {
                    username,
                    method,
                    respond_to,
                } => {
                    let finalized = self.store.finalize_pending(&username, method);
                    info!(
                        user = %username,
                        method = %method,
                        count = finalized.len(),
                        "Pending orders finalized"
                    );
                    let _ = respond_to.send(Ok(finalized));
                }
                LedgerRequest::Unsynced { respond_to } => {
                    let unsynced = self.store.unsynced();
                    debug!(count = unsynced.len(), "Unsynced orders requested");
                    let _ = respond_to.send(Ok(unsynced));
                }
                LedgerRequest::MarkSynced { up_to, respond_to } => {
                    self.store.mark_synced(up_to);
                    debug!(watermark = self.store.watermark(), "Watermark advanced");
                    let _ = respond_to.send(Ok(()));
                }
                LedgerRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.snapshot()));
                }
                LedgerRequest::Shutdown => {
                    info!("LedgerActor shutting down");
                    break;
                }
            }
        }
        info!("LedgerActor stopped");
    }
}

//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Instead of spinning up a real actor, a mock client sends its requests to a
//! channel the test controls. The test inspects each request, asserts it is
//! the expected one, and answers through the carried oneshot — which lets it
//! simulate success, failure, and missing data deterministically.

use tokio::sync::{mpsc, oneshot};

use crate::clients::{CatalogClient, LedgerClient};
use crate::domain::{Order, OrderDraft, PaymentMethod, Product};
use crate::error::{CatalogError, LedgerError};
use crate::messages::{CatalogRequest, LedgerRequest, StockOutcome};

pub fn mock_catalog_client(
    buffer_size: usize,
) -> (CatalogClient, mpsc::Receiver<CatalogRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CatalogClient::new(sender), receiver)
}

/// The ledger client needs a catalog client for its orchestration; pass in a
/// mock one so both sides of a flow can be scripted.
pub fn mock_ledger_client(
    buffer_size: usize,
    catalog: CatalogClient,
) -> (LedgerClient, mpsc::Receiver<LedgerRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (LedgerClient::new(sender, catalog), receiver)
}

type Responder<T, E> = oneshot::Sender<Result<T, E>>;

/// Helper to verify that the next catalog message is a Find request.
pub async fn expect_find(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(String, Responder<Option<Product>, CatalogError>)> {
    match receiver.recv().await {
        Some(CatalogRequest::Find { name, respond_to }) => Some((name, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next catalog message is a DeductStock request.
pub async fn expect_deduct_stock(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(String, u32, Responder<StockOutcome, CatalogError>)> {
    match receiver.recv().await {
        Some(CatalogRequest::DeductStock {
            name,
            quantity,
            respond_to,
        }) => Some((name, quantity, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next ledger message is a Place request.
pub async fn expect_place(
    receiver: &mut mpsc::Receiver<LedgerRequest>,
) -> Option<(OrderDraft, Responder<u64, LedgerError>)> {
    match receiver.recv().await {
        Some(LedgerRequest::Place { draft, respond_to }) => Some((draft, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next ledger message is a FinalizePending request.
pub async fn expect_finalize_pending(
    receiver: &mut mpsc::Receiver<LedgerRequest>,
) -> Option<(String, PaymentMethod, Responder<Vec<Order>, LedgerError>)> {
    match receiver.recv().await {
        Some(LedgerRequest::FinalizePending {
            username,
            method,
            respond_to,
        }) => Some((username, method, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_client_round_trips_a_request() {
        let (client, mut receiver) = mock_catalog_client(10);

        let find_task = tokio::spawn(async move { client.find("Shirt".to_string()).await });

        let (name, responder) = expect_find(&mut receiver).await.expect("Expected Find");
        assert_eq!(name, "Shirt");
        responder.send(Ok(None)).unwrap();

        assert_eq!(find_task.await.unwrap(), Ok(None));
    }
}

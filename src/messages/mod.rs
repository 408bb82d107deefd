use tokio::sync::oneshot;

use crate::domain::{Login, Order, OrderDraft, PaymentMethod, Product, ProductSpec, SearchFilter, UserAccount};
use crate::error::{AccountError, CatalogError, LedgerError};

/// Generic type aliases for service communication.
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Outcome of a stock deduction.
///
/// A miss is deliberately not an error: the original behavior is a silent
/// no-op, so the caller only gets a value it can choose to log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockOutcome {
    /// Stock reduced, product still listed.
    Deducted { remaining: u32 },
    /// Stock hit zero and the product was evicted from the catalog.
    Depleted,
    /// No product with that name; nothing changed.
    Missing,
}

/// Typed message enums for actor communication. Each variant carries its
/// parameters and a oneshot channel for the response.

#[derive(Debug)]
pub enum CatalogRequest {
    List {
        respond_to: ServiceResponse<Vec<Product>, CatalogError>,
    },
    Get {
        serial: usize,
        respond_to: ServiceResponse<Option<Product>, CatalogError>,
    },
    Find {
        name: String,
        respond_to: ServiceResponse<Option<Product>, CatalogError>,
    },
    Search {
        filter: SearchFilter,
        respond_to: ServiceResponse<Vec<(usize, Product)>, CatalogError>,
    },
    Add {
        spec: ProductSpec,
        respond_to: ServiceResponse<(), CatalogError>,
    },
    RemoveAt {
        serial: usize,
        respond_to: ServiceResponse<String, CatalogError>,
    },
    UpdateDiscount {
        serial: usize,
        discount: f64,
        respond_to: ServiceResponse<(), CatalogError>,
    },
    DeductStock {
        name: String,
        quantity: u32,
        respond_to: ServiceResponse<StockOutcome, CatalogError>,
    },
    UpdateReview {
        name: String,
        rating: f64,
        review: String,
        respond_to: ServiceResponse<bool, CatalogError>,
    },
    Shutdown,
}

#[derive(Debug)]
pub enum LedgerRequest {
    Place {
        draft: OrderDraft,
        respond_to: ServiceResponse<u64, LedgerError>,
    },
    OrdersFor {
        username: String,
        respond_to: ServiceResponse<Vec<Order>, LedgerError>,
    },
    PendingFor {
        username: String,
        respond_to: ServiceResponse<Vec<Order>, LedgerError>,
    },
    FinalizePending {
        username: String,
        method: PaymentMethod,
        respond_to: ServiceResponse<Vec<Order>, LedgerError>,
    },
    Unsynced {
        respond_to: ServiceResponse<Vec<Order>, LedgerError>,
    },
    MarkSynced {
        up_to: u64,
        respond_to: ServiceResponse<(), LedgerError>,
    },
    Snapshot {
        respond_to: ServiceResponse<Vec<Order>, LedgerError>,
    },
    Shutdown,
}

#[derive(Debug)]
pub enum AccountRequest {
    Register {
        username: String,
        password: String,
        respond_to: ServiceResponse<(), AccountError>,
    },
    Authenticate {
        username: String,
        password: String,
        respond_to: ServiceResponse<Login, AccountError>,
    },
    Snapshot {
        respond_to: ServiceResponse<Vec<UserAccount>, AccountError>,
    },
    Shutdown,
}

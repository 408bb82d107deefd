use tokio::sync::mpsc;

use crate::client_method;
use crate::domain::{Product, ProductSpec, SearchFilter};
use crate::error::CatalogError;
use crate::messages::{CatalogRequest, StockOutcome};

/// Client for the catalog actor.
#[derive(Clone)]
pub struct CatalogClient {
    sender: mpsc::Sender<CatalogRequest>,
}

impl CatalogClient {
    pub fn new(sender: mpsc::Sender<CatalogRequest>) -> Self {
        Self { sender }
    }

    pub async fn shutdown(&self) {
        let _ = self.sender.send(CatalogRequest::Shutdown).await;
    }
}

client_method!(CatalogClient => fn list() -> Vec<Product> as CatalogRequest::List, Error = CatalogError);
client_method!(CatalogClient => fn get(serial: usize) -> Option<Product> as CatalogRequest::Get, Error = CatalogError);
client_method!(CatalogClient => fn find(name: String) -> Option<Product> as CatalogRequest::Find, Error = CatalogError);
client_method!(CatalogClient => fn search(filter: SearchFilter) -> Vec<(usize, Product)> as CatalogRequest::Search, Error = CatalogError);
client_method!(CatalogClient => fn add(spec: ProductSpec) -> () as CatalogRequest::Add, Error = CatalogError);
client_method!(CatalogClient => fn remove_at(serial: usize) -> String as CatalogRequest::RemoveAt, Error = CatalogError);
client_method!(CatalogClient => fn update_discount(serial: usize, discount: f64) -> () as CatalogRequest::UpdateDiscount, Error = CatalogError);
client_method!(CatalogClient => fn deduct_stock(name: String, quantity: u32) -> StockOutcome as CatalogRequest::DeductStock, Error = CatalogError);
client_method!(CatalogClient => fn update_review(name: String, rating: f64, review: String) -> bool as CatalogRequest::UpdateReview, Error = CatalogError);

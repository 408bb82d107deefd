use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::clients::CatalogClient;
use crate::domain::{Product, ProductSpec, SearchFilter};
use crate::error::CatalogError;
use crate::messages::{CatalogRequest, StockOutcome};

/// The ordered product collection.
///
/// Products keep their insertion order; removal shifts later entries down so
/// display serials stay dense. Serials are 1-based positions into this order.
pub struct CatalogStore {
    items: Vec<Product>,
    capacity: usize,
}

impl CatalogStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
        }
    }

    pub fn seed(items: Vec<Product>, capacity: usize) -> Self {
        Self { items, capacity }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn snapshot(&self) -> Vec<Product> {
        self.items.clone()
    }

    /// Resolves a 1-based display serial to a product.
    pub fn get(&self, serial: usize) -> Option<&Product> {
        if serial == 0 {
            return None;
        }
        self.items.get(serial - 1)
    }

    /// Linear lookup by exact name match.
    pub fn find(&self, name: &str) -> Option<&Product> {
        self.items.iter().find(|p| p.name == name)
    }

    pub fn add(&mut self, spec: ProductSpec) -> Result<(), CatalogError> {
        if self.items.len() >= self.capacity {
            return Err(CatalogError::CapacityExceeded(self.capacity));
        }
        self.items.push(Product::from_spec(spec));
        Ok(())
    }

    /// Removes the product at a 1-based serial, preserving relative order.
    /// Returns the removed product's name.
    pub fn remove_at(&mut self, serial: usize) -> Result<String, CatalogError> {
        self.check_serial(serial)?;
        let removed = self.items.remove(serial - 1);
        Ok(removed.name)
    }

    /// Overwrites the discount at a 1-based serial. The percentage has
    /// already been validated as 0–100 at the prompt; it is stored verbatim.
    pub fn update_discount(&mut self, serial: usize, discount: f64) -> Result<(), CatalogError> {
        self.check_serial(serial)?;
        self.items[serial - 1].discount = discount;
        Ok(())
    }

    /// Reduces stock for the named product. A miss is a no-op; a product
    /// whose stock reaches zero is evicted on the spot.
    pub fn deduct_stock(&mut self, name: &str, quantity: u32) -> StockOutcome {
        let Some(pos) = self.items.iter().position(|p| p.name == name) else {
            return StockOutcome::Missing;
        };
        let remaining = self.items[pos].stock.saturating_sub(quantity);
        if remaining == 0 {
            self.items.remove(pos);
            StockOutcome::Depleted
        } else {
            self.items[pos].stock = remaining;
            StockOutcome::Deducted { remaining }
        }
    }

    /// Overwrites rating and review text for the named product.
    /// Returns false on a miss, which the original treats as a no-op.
    pub fn update_review(&mut self, name: &str, rating: f64, review: String) -> bool {
        match self.items.iter_mut().find(|p| p.name == name) {
            Some(product) => {
                product.rating = rating;
                product.reviews = review;
                true
            }
            None => false,
        }
    }

    /// Snapshot of matching products with their 1-based catalog positions.
    pub fn search(&self, filter: &SearchFilter) -> Vec<(usize, Product)> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, p)| filter.matches(p))
            .map(|(i, p)| (i + 1, p.clone()))
            .collect()
    }

    fn check_serial(&self, serial: usize) -> Result<(), CatalogError> {
        if serial < 1 || serial > self.items.len() {
            return Err(CatalogError::InvalidIndex {
                given: serial,
                count: self.items.len(),
            });
        }
        Ok(())
    }
}

/// Actor wrapping a [`CatalogStore`] behind a message channel.
pub struct CatalogActor {
    receiver: mpsc::Receiver<CatalogRequest>,
    store: CatalogStore,
}

impl CatalogActor {
    pub fn new(buffer_size: usize, store: CatalogStore) -> (Self, CatalogClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        (Self { receiver, store }, CatalogClient::new(sender))
    }

    #[instrument(name = "catalog_service", skip(self))]
    pub async fn run(mut self) {
        info!("CatalogActor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CatalogRequest::List { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.snapshot()));
                }
                CatalogRequest::Get { serial, respond_to } => {
                    let _ = respond_to.send(Ok(self.store.get(serial).cloned()));
                }
                CatalogRequest::Find { name, respond_to } => {
                    let _ = respond_to.send(Ok(self.store.find(&name).cloned()));
                }
                CatalogRequest::Search { filter, respond_to } => {
                    let matches = self.store.search(&filter);
                    debug!(count = matches.len(), "Search completed");
                    let _ = respond_to.send(Ok(matches));
                }
                CatalogRequest::Add { spec, respond_to } => {
                    let name = spec.name.clone();
                    let result = self.store.add(spec);
                    match &result {
                        Ok(()) => info!(product = %name, "Product added"),
                        Err(e) => warn!(product = %name, error = %e, "Add rejected"),
                    }
                    let _ = respond_to.send(result);
                }
                CatalogRequest::RemoveAt { serial, respond_to } => {
                    let result = self.store.remove_at(serial);
                    if let Ok(name) = &result {
                        info!(product = %name, "Product removed");
                    }
                    let _ = respond_to.send(result);
                }
                CatalogRequest::UpdateDiscount {
                    serial,
                    discount,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.store.update_discount(serial, discount));
                }
                CatalogRequest::DeductStock {
                    name,
                    quantity,
                    respond_to,
                } => {
                    let outcome = self.store.deduct_stock(&name, quantity);
                    match outcome {
                        StockOutcome::Depleted => {
                            info!(product = %name, "Stock depleted, product evicted")
                        }
                        StockOutcome::Missing => {
                            warn!(product = %name, "Stock deduction for unknown product")
                        }
                        StockOutcome::Deducted { remaining } => {
                            debug!(product = %name, remaining, "Stock deducted")
                        }
                    }
                    let _ = respond_to.send(Ok(outcome));
                }
                CatalogRequest::UpdateReview {
                    name,
                    rating,
                    review,
                    respond_to,
                } => {
                    let found = self.store.update_review(&name, rating, review);
                    if !found {
                        warn!(product = %name, "Review for unknown product ignored");
                    }
                    let _ = respond_to.send(Ok(found));
                }
                CatalogRequest::Shutdown => {
                    info!("CatalogActor shutting down");
                    break;
                }
            }
        }
        info!("CatalogActor stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, category: &str, price: f64, stock: u32, discount: f64) -> ProductSpec {
        ProductSpec {
            name: name.into(),
            category: category.into(),
            price,
            stock,
            discount,
        }
    }

    #[test]
    fn add_then_search_by_exact_name_finds_fresh_product() {
        let mut store = CatalogStore::new(100);
        store.add(spec("Shirt", "Apparel", 20.0, 10, 10.0)).unwrap();

        let hits = store.search(&SearchFilter::Category("Apparel".into()));
        assert_eq!(hits.len(), 1);
        let (serial, product) = &hits[0];
        assert_eq!(*serial, 1);
        assert_eq!(product.name, "Shirt");
        assert_eq!(product.rating, 0.0);
        assert_eq!(product.reviews, crate::domain::DEFAULT_REVIEW);
    }

    #[test]
    fn capacity_is_enforced() {
        let mut store = CatalogStore::new(1);
        store.add(spec("A", "X", 1.0, 1, 0.0)).unwrap();
        assert_eq!(
            store.add(spec("B", "X", 1.0, 1, 0.0)),
            Err(CatalogError::CapacityExceeded(1))
        );
    }

    #[test]
    fn remove_at_shifts_later_entries_down() {
        let mut store = CatalogStore::new(100);
        store.add(spec("A", "X", 1.0, 1, 0.0)).unwrap();
        store.add(spec("B", "X", 1.0, 1, 0.0)).unwrap();
        store.add(spec("C", "X", 1.0, 1, 0.0)).unwrap();

        assert_eq!(store.remove_at(2).unwrap(), "B");
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1).unwrap().name, "A");
        assert_eq!(store.get(2).unwrap().name, "C");
    }

    #[test]
    fn remove_at_rejects_out_of_range_serials() {
        let mut store = CatalogStore::new(100);
        store.add(spec("A", "X", 1.0, 1, 0.0)).unwrap();

        assert!(matches!(
            store.remove_at(0),
            Err(CatalogError::InvalidIndex { given: 0, count: 1 })
        ));
        assert!(matches!(
            store.remove_at(2),
            Err(CatalogError::InvalidIndex { given: 2, count: 1 })
        ));
    }

    #[test]
    fn deducting_full_stock_evicts_the_product() {
        let mut store = CatalogStore::new(100);
        store.add(spec("X", "Y", 5.0, 1, 0.0)).unwrap();

        assert_eq!(store.deduct_stock("X", 1), StockOutcome::Depleted);
        assert!(store.is_empty());
        assert!(store.search(&SearchFilter::Category("Y".into())).is_empty());
    }

    #[test]
    fn partial_deduction_leaves_remaining_stock() {
        let mut store = CatalogStore::new(100);
        store.add(spec("Shirt", "Apparel", 20.0, 10, 10.0)).unwrap();

        assert_eq!(
            store.deduct_stock("Shirt", 2),
            StockOutcome::Deducted { remaining: 8 }
        );
        assert_eq!(store.get(1).unwrap().stock, 8);
    }

    #[test]
    fn deducting_unknown_product_is_a_noop() {
        let mut store = CatalogStore::new(100);
        store.add(spec("A", "X", 1.0, 3, 0.0)).unwrap();

        assert_eq!(store.deduct_stock("Ghost", 1), StockOutcome::Missing);
        assert_eq!(store.get(1).unwrap().stock, 3);
    }

    #[test]
    fn review_overwrites_rating_and_text() {
        let mut store = CatalogStore::new(100);
        store.add(spec("A", "X", 1.0, 3, 0.0)).unwrap();

        assert!(store.update_review("A", 4.5, "Great".into()));
        let product = store.get(1).unwrap();
        assert_eq!(product.rating, 4.5);
        assert_eq!(product.reviews, "Great");

        assert!(!store.update_review("Ghost", 1.0, "meh".into()));
    }

    #[test]
    fn search_filters_combine_category_and_price() {
        let mut store = CatalogStore::new(100);
        store.add(spec("A", "Apparel", 10.0, 1, 0.0)).unwrap();
        store.add(spec("B", "Apparel", 50.0, 1, 0.0)).unwrap();
        store.add(spec("C", "Food", 10.0, 1, 0.0)).unwrap();

        let hits = store.search(&SearchFilter::CategoryAndPrice {
            category: "Apparel".into(),
            min: 5.0,
            max: 20.0,
        });
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].1.name, "A");

        let hits = store.search(&SearchFilter::PriceRange { min: 5.0, max: 20.0 });
        assert_eq!(hits.len(), 2);
        // Serials are positions in the full catalog, not the result set.
        assert_eq!(hits[0].0, 1);
        assert_eq!(hits[1].0, 3);
    }
}

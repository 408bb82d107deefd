/// A product in the catalog.
///
/// `name` doubles as the lookup key for stock deduction and reviews, so it is
/// expected to be unique within a catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: u32,
    /// Discount percentage in the range 0–100.
    pub discount: f64,
    pub rating: f64,
    pub reviews: String,
}

pub const DEFAULT_REVIEW: &str = "No reviews yet.";

/// Payload for adding a new product to the catalog.
///
/// Rating and review text are not part of the payload; new products always
/// start unrated.
#[derive(Debug, Clone)]
pub struct ProductSpec {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: u32,
    pub discount: f64,
}

impl Product {
    pub fn from_spec(spec: ProductSpec) -> Self {
        Self {
            name: spec.name,
            category: spec.category,
            price: spec.price,
            stock: spec.stock,
            discount: spec.discount,
            rating: 0.0,
            reviews: DEFAULT_REVIEW.to_string(),
        }
    }

    /// Unit price after the percentage discount is applied.
    pub fn discounted_price(&self) -> f64 {
        self.price * (1.0 - self.discount / 100.0)
    }
}

/// Catalog search criteria.
#[derive(Debug, Clone)]
pub enum SearchFilter {
    Category(String),
    PriceRange { min: f64, max: f64 },
    CategoryAndPrice { category: String, min: f64, max: f64 },
}

impl SearchFilter {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            SearchFilter::Category(category) => product.category == *category,
            SearchFilter::PriceRange { min, max } => {
                product.price >= *min && product.price <= *max
            }
            SearchFilter::CategoryAndPrice { category, min, max } => {
                product.category == *category && product.price >= *min && product.price <= *max
            }
        }
    }
}

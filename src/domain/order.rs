use std::fmt;

/// A customer order.
///
/// `product_name` and `total_price` are frozen at add-to-cart time; later
/// catalog changes (price, discount, even removal) do not touch an existing
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: u64,
    pub username: String,
    pub product_name: String,
    pub quantity: u32,
    pub total_price: f64,
    pub payment_method: PaymentMethod,
    pub address: String,
}

/// Payload for placing a new order.
///
/// The ledger assigns the id and starts the order in [`PaymentMethod::Pending`].
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub username: String,
    pub product_name: String,
    pub quantity: u32,
    pub total_price: f64,
    pub address: String,
}

impl Order {
    pub fn from_draft(id: u64, draft: OrderDraft) -> Self {
        Self {
            id,
            username: draft.username,
            product_name: draft.product_name,
            quantity: draft.quantity,
            total_price: draft.total_price,
            payment_method: PaymentMethod::Pending,
            address: draft.address,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.payment_method == PaymentMethod::Pending
    }
}

/// Payment state of an order. `Pending` is the only non-terminal value.
///
/// The `Display` strings are also the on-disk tokens in the orders file, so
/// they must stay exactly as the files expect them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Pending,
    VisaMastercard,
    Bkash,
    Nagad,
    CashOnDelivery,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Pending,
        PaymentMethod::VisaMastercard,
        PaymentMethod::Bkash,
        PaymentMethod::Nagad,
        PaymentMethod::CashOnDelivery,
    ];

    /// Splits a payment method off the front of `s`, returning it with the
    /// rest of the string (whitespace-trimmed). Method tokens may contain
    /// spaces ("Cash on Delivery"), so this matches greedily against the
    /// known wire strings instead of splitting on whitespace.
    pub fn split_leading(s: &str) -> Option<(PaymentMethod, &str)> {
        for method in PaymentMethod::ALL {
            if let Some(rest) = s.strip_prefix(method.as_str()) {
                if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                    return Some((method, rest.trim_start()));
                }
            }
        }
        None
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Pending => "Pending",
            PaymentMethod::VisaMastercard => "Visa/Mastercard",
            PaymentMethod::Bkash => "Bkash",
            PaymentMethod::Nagad => "Nagad",
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

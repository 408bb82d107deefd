use std::path::{Path, PathBuf};

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::domain::Order;
use crate::error::PersistError;

/// The append-only order history log.
///
/// Lines are human-readable and are never rewritten. The only thing ever
/// parsed back out is the leading `Order ID: {n}` of each line, which is how
/// the sync watermark survives restarts.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("order_history.txt"),
        }
    }

    pub async fn append(&self, order: &Order) -> Result<(), PersistError> {
        let line = format!(
            "Order ID: {}, User: {}, Product: {}, Qty: {}, Total: {:.2}, Method: {}, Address: {}\n",
            order.id,
            order.username,
            order.product_name,
            order.quantity,
            order.total_price,
            order.payment_method,
            order.address
        );
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .await
            .map_err(|source| self.io_err(source))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|source| self.io_err(source))?;
        Ok(())
    }

    /// Highest order id recorded in the log; 0 when the log is missing or
    /// holds no parsable `Order ID:` lines.
    pub async fn recover_watermark(&self) -> Result<u64, PersistError> {
        let contents = self.read_all().await?;
        let watermark = contents
            .lines()
            .filter_map(parse_order_id)
            .max()
            .unwrap_or(0);
        debug!(watermark, "History watermark recovered");
        Ok(watermark)
    }

    /// Full raw contents, for the admin history view. Missing log reads as
    /// empty.
    pub async fn read_all(&self) -> Result<String, PersistError> {
        match fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(source) => Err(self.io_err(source)),
        }
    }

    fn io_err(&self, source: std::io::Error) -> PersistError {
        PersistError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

fn parse_order_id(line: &str) -> Option<u64> {
    let rest = line.strip_prefix("Order ID: ")?;
    let digits = rest.split(',').next()?.trim();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PaymentMethod;
    use tempfile::tempdir;

    fn order(id: u64) -> Order {
        Order {
            id,
            username: "alice".to_string(),
            product_name: "Shirt".to_string(),
            quantity: 2,
            total_price: 36.0,
            payment_method: PaymentMethod::CashOnDelivery,
            address: "addr".to_string(),
        }
    }

    #[tokio::test]
    async fn append_writes_the_documented_line_format() {
        let dir = tempdir().unwrap();
        let log = HistoryLog::new(dir.path());
        log.append(&order(1)).await.unwrap();

        let contents = log.read_all().await.unwrap();
        assert_eq!(
            contents,
            "Order ID: 1, User: alice, Product: Shirt, Qty: 2, Total: 36.00, Method: Cash on Delivery, Address: addr\n"
        );
    }

    #[tokio::test]
    async fn watermark_is_the_highest_recorded_id() {
        let dir = tempdir().unwrap();
        let log = HistoryLog::new(dir.path());
        assert_eq!(log.recover_watermark().await.unwrap(), 0);

        log.append(&order(3)).await.unwrap();
        log.append(&order(7)).await.unwrap();
        log.append(&order(5)).await.unwrap();
        assert_eq!(log.recover_watermark().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn lines_without_an_order_id_prefix_are_ignored() {
        let dir = tempdir().unwrap();
        let log = HistoryLog::new(dir.path());
        tokio::fs::write(
            dir.path().join("order_history.txt"),
            "User: old, Product: Legacy, Qty: 1\nOrder ID: 4, User: a, Product: P, Qty: 1, Total: 1.00, Method: Bkash, Address: x\n",
        )
        .await
        .unwrap();

        assert_eq!(log.recover_watermark().await.unwrap(), 4);
    }
}

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use crate::domain::{Order, PaymentMethod, Product, UserAccount};
use crate::error::PersistError;

/// Paths of the three overwrite-on-save record files.
#[derive(Debug, Clone)]
pub struct RecordFiles {
    users: PathBuf,
    products: PathBuf,
    orders: PathBuf,
}

impl RecordFiles {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            users: data_dir.join("users.txt"),
            products: data_dir.join("products.txt"),
            orders: data_dir.join("orders.txt"),
        }
    }

    pub async fn load_users(&self) -> Result<Vec<UserAccount>, PersistError> {
        load_records(&self.users, parse_user).await
    }

    pub async fn save_users(&self, users: &[UserAccount]) -> Result<(), PersistError> {
        let mut out = String::new();
        for user in users {
            let _ = writeln!(
                out,
                "{} {} {}",
                user.username,
                user.password,
                i32::from(user.is_admin)
            );
        }
        write_file(&self.users, out).await
    }

    pub async fn load_products(&self) -> Result<Vec<Product>, PersistError> {
        load_records(&self.products, parse_product).await
    }

    pub async fn save_products(&self, products: &[Product]) -> Result<(), PersistError> {
        let mut out = String::new();
        for p in products {
            let _ = writeln!(
                out,
                "{} {} {:.2} {} {:.2} {:.2} {}",
                p.name, p.category, p.price, p.stock, p.discount, p.rating, p.reviews
            );
        }
        write_file(&self.products, out).await
    }

    pub async fn load_orders(&self) -> Result<Vec<Order>, PersistError> {
        load_records(&self.orders, parse_order).await
    }

    pub async fn save_orders(&self, orders: &[Order]) -> Result<(), PersistError> {
        let mut out = String::new();
        for o in orders {
            let _ = writeln!(
                out,
                "{} {} {} {} {:.2} {} {}",
                o.id,
                o.username,
                o.product_name,
                o.quantity,
                o.total_price,
                o.payment_method,
                o.address
            );
        }
        write_file(&self.orders, out).await
    }
}

async fn load_records<T>(
    path: &Path,
    parse: fn(&str) -> Result<T, String>,
) -> Result<Vec<T>, PersistError> {
    let contents = match fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No data file, starting empty");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(PersistError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let mut records = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record = parse(line).map_err(|reason| PersistError::Malformed {
            path: path.to_path_buf(),
            line: idx + 1,
            reason,
        })?;
        records.push(record);
    }
    Ok(records)
}

async fn write_file(path: &Path, contents: String) -> Result<(), PersistError> {
    fs::write(path, contents)
        .await
        .map_err(|source| PersistError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Takes `n` whitespace-delimited fields off the front of `line`, returning
/// them with the (trimmed) remainder of the line.
fn take_fields(line: &str, n: usize) -> Result<(Vec<&str>, &str), String> {
    let mut fields = Vec::with_capacity(n);
    let mut rest = line.trim_start();
    for i in 0..n {
        if rest.is_empty() {
            return Err(format!("expected at least {n} fields, got {i}"));
        }
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        fields.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }
    Ok((fields, rest))
}

fn parse_user(line: &str) -> Result<UserAccount, String> {
    let (fields, rest) = take_fields(line, 3)?;
    if !rest.is_empty() {
        return Err("trailing data after user record".to_string());
    }
    let is_admin: i32 = fields[2]
        .parse()
        .map_err(|_| format!("bad isAdmin flag: {}", fields[2]))?;
    Ok(UserAccount {
        username: fields[0].to_string(),
        password: fields[1].to_string(),
        is_admin: is_admin != 0,
    })
}

fn parse_product(line: &str) -> Result<Product, String> {
    let (fields, reviews) = take_fields(line, 6)?;
    Ok(Product {
        name: fields[0].to_string(),
        category: fields[1].to_string(),
        price: parse_num(fields[2], "price")?,
        stock: parse_num(fields[3], "stock")?,
        discount: parse_num(fields[4], "discount")?,
        rating: parse_num(fields[5], "rating")?,
        reviews: reviews.to_string(),
    })
}

fn parse_order(line: &str) -> Result<Order, String> {
    let (fields, rest) = take_fields(line, 5)?;
    let (payment_method, address) = PaymentMethod::split_leading(rest)
        .ok_or_else(|| format!("unknown payment method in: {rest}"))?;
    Ok(Order {
        id: parse_num(fields[0], "orderId")?,
        username: fields[1].to_string(),
        product_name: fields[2].to_string(),
        quantity: parse_num(fields[3], "quantity")?,
        total_price: parse_num(fields[4], "totalPrice")?,
        payment_method,
        address: address.to_string(),
    })
}

fn parse_num<T: std::str::FromStr>(field: &str, what: &str) -> Result<T, String> {
    field.parse().map_err(|_| format!("bad {what}: {field}"))
}

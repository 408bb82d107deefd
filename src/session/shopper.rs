use std::io::{self, BufRead, Write};

use crate::domain::{PaymentMethod, SearchFilter};
use crate::error::LedgerError;
use crate::session::Session;

const VALID_MOBILE_PREFIXES: [&str; 7] = ["018", "019", "017", "013", "014", "015", "016"];

/// Checks an 11-digit mobile number with a recognized operator prefix.
/// Returns the complaint to show the user when the number is malformed.
pub fn validate_mobile_number(number: &str) -> Result<(), &'static str> {
    if number.len() != 11 || !number.bytes().all(|b| b.is_ascii_digit()) {
        return Err("Mobile number must be 11 digits.");
    }
    if !VALID_MOBILE_PREFIXES.iter().any(|p| number.starts_with(p)) {
        return Err("Mobile number must start with 018, 019, 017, 013, 014, 015, or 016.");
    }
    Ok(())
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub(crate) async fn shopper_menu(&mut self, username: &str) -> io::Result<()> {
        loop {
            self.console.say("\nUser Panel")?;
            self.console.say("1. View Products")?;
            self.console.say("2. Search Products")?;
            self.console.say("3. Add to Cart")?;
            self.console.say("4. Checkout")?;
            self.console.say("5. Review Products")?;
            self.console.say("6. Logout")?;
            match self.console.menu_choice("Enter your choice: ", 1, 6)? {
                1 => {
                    self.show_products().await?;
                }
                2 => self.search_products().await?,
                3 => self.add_to_cart(username).await?,
                4 => self.checkout(username).await?,
                5 => self.review_product().await?,
                _ => {
                    self.console.say("Logged out.")?;
                    return Ok(());
                }
            }
        }
    }

    async fn search_products(&mut self) -> io::Result<()> {
        self.console.say("Search by:")?;
        self.console.say("1. Category")?;
        self.console.say("2. Price Range")?;
        self.console.say("3. Both Category and Price Range")?;
        let filter = match self.console.menu_choice("Enter your choice: ", 1, 3)? {
            1 => {
                let category = self.console.read_token("Enter category to search: ")?;
                SearchFilter::Category(category)
            }
            2 => {
                let min = self.console.read_f64("Enter minimum price: ", 0.0, f64::MAX)?;
                let max = self.console.read_f64("Enter maximum price: ", min, f64::MAX)?;
                SearchFilter::PriceRange { min, max }
            }
            _ => {
                let category = self.console.read_token("Enter category to search: ")?;
                let min = self.console.read_f64("Enter minimum price: ", 0.0, f64::MAX)?;
                let max = self.console.read_f64("Enter maximum price: ", min, f64::MAX)?;
                SearchFilter::CategoryAndPrice { category, min, max }
            }
        };

        match self.catalog.search(filter).await {
            Ok(matches) if matches.is_empty() => {
                self.console.say("No matching products found.")?;
            }
            Ok(matches) => {
                self.console.say("\nMatching products:")?;
                for (serial, product) in matches {
                    self.console.say(&format!("Serial: {serial}"))?;
                    self.print_product(&product)?;
                }
            }
            Err(e) => self.console.say(&e.to_string())?,
        }
        Ok(())
    }

    async fn add_to_cart(&mut self, username: &str) -> io::Result<()> {
        let products = self.show_products().await?;
        if products.is_empty() {
            return Ok(());
        }
        let serial = self.console.read_u32(
            "Enter the serial number of the product to add to cart: ",
            1,
            u32::MAX,
        )?;
        let quantity = self.console.read_u32("Enter quantity: ", 1, u32::MAX)?;

        // Translate the display serial to the product name before mutating
        // anything; the name is the stable identifier.
        let product = match self.catalog.get(serial as usize).await {
            Ok(Some(product)) => product,
            Ok(None) => {
                self.console.say("Invalid serial number.")?;
                return Ok(());
            }
            Err(e) => {
                self.console.say(&e.to_string())?;
                return Ok(());
            }
        };

        let address = self.console.read_line("Enter your address: ")?;
        match self
            .ledger
            .place_order(username, &product.name, quantity, address)
            .await
        {
            Ok(_) => {
                self.save_orders().await?;
                self.console.say("Product added to cart successfully!")?;
            }
            Err(LedgerError::InsufficientStock { .. }) => {
                self.console.say("Insufficient stock.")?;
            }
            Err(e) => self.console.say(&e.to_string())?,
        }
        Ok(())
    }

    async fn checkout(&mut self, username: &str) -> io::Result<()> {
        let pending = match self.ledger.pending_for(username.to_string()).await {
            Ok(pending) => pending,
            Err(e) => {
                self.console.say(&e.to_string())?;
                return Ok(());
            }
        };

        self.console.say("\nYour Cart:")?;
        let mut total = 0.0;
        for order in &pending {
            self.console.say(&format!(
                "Product: {}, Quantity: {}, Total Price: {:.2}",
                order.product_name, order.quantity, order.total_price
            ))?;
            total += order.total_price;
        }
        self.console.say(&format!("Total Amount: {total:.2}"))?;

        if pending.is_empty() {
            self.console.say("Your cart is empty. No payment required.")?;
            return Ok(());
        }

        self.console.say("Choose payment method:")?;
        self.console.say("1. Visa/Mastercard")?;
        self.console.say("2. Mobile Banking (Bkash/Nagad)")?;
        self.console.say("3. Cash on Delivery")?;
        self.console.say("4. Back to Main Menu")?;
        let method = match self.console.read_u32("Enter your choice: ", 1, u32::MAX)? {
            1 => {
                // Details are prompted for realism and deliberately discarded.
                let _account = self.console.read_token("Enter your account number: ")?;
                let _pin = self.console.read_token("Enter your PIN: ")?;
                self.console.say("Processing payment...")?;
                self.console.say("Payment Succeed!")?;
                self.console.say(&format!("Your {total:.2} Taka Paid"))?;
                PaymentMethod::VisaMastercard
            }
            2 => {
                self.console.say("Choose mobile banking service:")?;
                self.console.say("1. Bkash")?;
                self.console.say("2. Nagad")?;
                let service = self.console.menu_choice("Enter your choice: ", 1, 2)?;
                loop {
                    let number = self
                        .console
                        .read_token("Enter your mobile number (11 digits): ")?;
                    match validate_mobile_number(&number) {
                        Ok(()) => break,
                        Err(complaint) => self.console.say(complaint)?,
                    }
                }
                let _pin = self.console.read_token("Enter your PIN: ")?;
                self.console.say("Processing payment...")?;
                self.console.say("Payment Succeed!")?;
                self.console.say(&format!("Your {total:.2} Taka Paid"))?;
                if service == 1 {
                    PaymentMethod::Bkash
                } else {
                    PaymentMethod::Nagad
                }
            }
            3 => {
                self.console
                    .say("You have chosen Cash on Delivery. Payment will be made upon delivery.")?;
                PaymentMethod::CashOnDelivery
            }
            4 => {
                self.console.say("Returning to the main menu...")?;
                return Ok(());
            }
            _ => {
                self.console
                    .say("Invalid choice. Defaulting to Cash on Delivery.")?;
                PaymentMethod::CashOnDelivery
            }
        };

        match self.ledger.finalize_payment(username, method).await {
            Ok(_) => {
                // Stock moved at finalization, so both collections changed.
                self.save_products().await?;
                self.save_orders().await?;
                if let Err(e) = self.ledger.sync_history(&self.history).await {
                    self.console.say(&e.to_string())?;
                }
                self.console.say("Thank you for your purchase!")?;
            }
            Err(e) => self.console.say(&e.to_string())?,
        }
        Ok(())
    }

    async fn review_product(&mut self) -> io::Result<()> {
        let products = self.show_products().await?;
        if products.is_empty() {
            return Ok(());
        }
        let serial = self.console.read_u32(
            "Enter the serial number of the product to review (or 0 to go back): ",
            0,
            u32::MAX,
        )?;
        if serial == 0 {
            self.console.say("Returning to the user menu...")?;
            return Ok(());
        }

        let product = match self.catalog.get(serial as usize).await {
            Ok(Some(product)) => product,
            Ok(None) => {
                self.console.say("Invalid serial number.")?;
                return Ok(());
            }
            Err(e) => {
                self.console.say(&e.to_string())?;
                return Ok(());
            }
        };

        let rating = self.console.read_f64("Enter your rating (0-5): ", 0.0, 5.0)?;
        let review = self.console.read_line("Enter your review: ")?;
        match self
            .catalog
            .update_review(product.name.clone(), rating, review)
            .await
        {
            Ok(_) => {
                self.save_products().await?;
                self.console.say("Thank you for your feedback!")?;
            }
            Err(e) => self.console.say(&e.to_string())?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_numbers() {
        for prefix in VALID_MOBILE_PREFIXES {
            assert_eq!(validate_mobile_number(&format!("{prefix}12345678")), Ok(()));
        }
    }

    #[test]
    fn rejects_wrong_lengths_and_non_digits() {
        assert!(validate_mobile_number("01712345").is_err());
        assert!(validate_mobile_number("017123456789").is_err());
        assert!(validate_mobile_number("0171234567a").is_err());
        assert!(validate_mobile_number("").is_err());
    }

    #[test]
    fn rejects_unknown_prefixes() {
        let err = validate_mobile_number("01212345678").unwrap_err();
        assert!(err.contains("must start with"));
    }
}

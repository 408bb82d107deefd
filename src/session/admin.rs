use std::io::{self, BufRead, Write};

use crate::domain::ProductSpec;
use crate::error::CatalogError;
use crate::session::Session;

impl<R: BufRead, W: Write> Session<R, W> {
    pub(crate) async fn admin_menu(&mut self) -> io::Result<()> {
        loop {
            self.console.say("\nAdmin Panel")?;
            self.console.say("1. Add Product")?;
            self.console.say("2. Remove Product")?;
            self.console.say("3. Update Discount")?;
            self.console.say("4. View Order History")?;
            self.console.say("5. View Products")?;
            self.console.say("6. Logout")?;
            match self.console.menu_choice("Enter your choice: ", 1, 6)? {
                1 => self.add_product().await?,
                2 => self.remove_product().await?,
                3 => self.update_discount().await?,
                4 => self.view_order_history().await?,
                5 => {
                    self.show_products().await?;
                }
                _ => {
                    self.console.say("Logged out.")?;
                    return Ok(());
                }
            }
        }
    }

    async fn add_product(&mut self) -> io::Result<()> {
        let name = self.console.read_token("Enter product name: ")?;
        let category = self.console.read_token("Enter product category: ")?;
        let price = self.console.read_f64("Enter product price: ", 0.01, f64::MAX)?;
        let stock = self.console.read_u32("Enter product stock: ", 1, u32::MAX)?;
        let discount = self.console.read_f64("Enter product discount (%): ", 0.0, 100.0)?;

        let spec = ProductSpec {
            name,
            category,
            price,
            stock,
            discount,
        };
        match self.catalog.add(spec).await {
            Ok(()) => {
                self.save_products().await?;
                self.console.say("Product added successfully!")?;
            }
            Err(e) => self.console.say(&e.to_string())?,
        }
        Ok(())
    }

    async fn remove_product(&mut self) -> io::Result<()> {
        let serial = self.console.read_u32(
            "Enter the serial number of the product to delete: ",
            1,
            u32::MAX,
        )?;
        match self.catalog.remove_at(serial as usize).await {
            Ok(_) => {
                self.save_products().await?;
                self.console.say("Product deleted successfully.")?;
            }
            Err(CatalogError::InvalidIndex { .. }) => {
                self.console.say("Invalid serial number.")?;
            }
            Err(e) => self.console.say(&e.to_string())?,
        }
        Ok(())
    }

    async fn update_discount(&mut self) -> io::Result<()> {
        let serial = self.console.read_u32(
            "Enter the serial number of the product to update discount: ",
            1,
            u32::MAX,
        )?;
        // The store does not re-validate the percentage; the prompt does.
        let discount = self.console.read_f64("Enter new discount (%): ", 0.0, 100.0)?;
        match self.catalog.update_discount(serial as usize, discount).await {
            Ok(()) => {
                self.save_products().await?;
                self.console.say("Discount updated successfully!")?;
            }
            Err(CatalogError::InvalidIndex { .. }) => {
                self.console.say("Invalid serial number.")?;
            }
            Err(e) => self.console.say(&e.to_string())?,
        }
        Ok(())
    }

    async fn view_order_history(&mut self) -> io::Result<()> {
        self.console.say("\nOrder History:")?;
        match self.history.read_all().await {
            Ok(contents) if contents.is_empty() => {
                self.console.say("No order history found.")?;
            }
            Ok(contents) => {
                for line in contents.lines() {
                    self.console.say(line)?;
                }
            }
            Err(e) => self.console.say(&e.to_string())?,
        }
        Ok(())
    }
}

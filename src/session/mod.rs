//! The interactive console session.
//!
//! One `Session` is one process run: an unauthenticated top menu leading into
//! either the admin panel or the shopper panel, and back out on logout. Every
//! error is recovered here — reported to the console, loop continues — except
//! exhausted input, which ends the run.

mod admin;
mod console;
mod shopper;

pub use console::Console;

use std::io::{self, BufRead, Write};

use tracing::error;

use crate::clients::{AccountClient, CatalogClient, LedgerClient};
use crate::domain::{Login, Product};
use crate::persist::{HistoryLog, RecordFiles};

pub struct Session<R, W> {
    console: Console<R, W>,
    catalog: CatalogClient,
    ledger: LedgerClient,
    accounts: AccountClient,
    files: RecordFiles,
    history: HistoryLog,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(
        console: Console<R, W>,
        catalog: CatalogClient,
        ledger: LedgerClient,
        accounts: AccountClient,
        files: RecordFiles,
        history: HistoryLog,
    ) -> Self {
        Self {
            console,
            catalog,
            ledger,
            accounts,
            files,
            history,
        }
    }

    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            self.console.say("\nE-Commerce Management System")?;
            self.console.say("1. Register")?;
            self.console.say("2. Login")?;
            self.console.say("3. Exit")?;
            match self.console.menu_choice("Enter your choice: ", 1, 3)? {
                1 => self.register().await?,
                2 => self.login().await?,
                _ => {
                    self.console.say("Exiting...")?;
                    return Ok(());
                }
            }
        }
    }

    async fn register(&mut self) -> io::Result<()> {
        let username = self.console.read_token("Enter username: ")?;
        let password = self.console.read_token("Enter password: ")?;
        match self.accounts.register(username, password).await {
            Ok(()) => {
                self.save_users().await?;
                self.console.say("User registered successfully!")?;
            }
            Err(e) => self.console.say(&e.to_string())?,
        }
        Ok(())
    }

    async fn login(&mut self) -> io::Result<()> {
        let username = self.console.read_token("Enter username: ")?;
        let password = self.console.read_token("Enter password: ")?;
        match self.accounts.authenticate(username.clone(), password).await {
            Ok(Login::Superuser) => {
                self.console.say("Admin login successful!")?;
                self.admin_menu().await?;
            }
            Ok(Login::Registered) => {
                self.console.say("Login successful!")?;
                self.shopper_menu(&username).await?;
            }
            Ok(Login::Rejected) => {
                self.console.say("Invalid username or password.")?;
            }
            Err(e) => self.console.say(&e.to_string())?,
        }
        Ok(())
    }

    /// Shared product listing used by both panels. Serials shown here are
    /// what every by-serial prompt refers to.
    pub(crate) async fn show_products(&mut self) -> io::Result<Vec<Product>> {
        let products = match self.catalog.list().await {
            Ok(products) => products,
            Err(e) => {
                self.console.say(&e.to_string())?;
                return Ok(Vec::new());
            }
        };
        if products.is_empty() {
            self.console.say("No products available.")?;
            return Ok(products);
        }
        self.console.say("\nProduct List:")?;
        for (i, p) in products.iter().enumerate() {
            self.console.say(&format!("Serial: {}", i + 1))?;
            self.print_product(p)?;
        }
        Ok(products)
    }

    pub(crate) fn print_product(&mut self, p: &Product) -> io::Result<()> {
        self.console.say(&format!("Name: {}", p.name))?;
        self.console.say(&format!("Category: {}", p.category))?;
        self.console.say(&format!("Price: {:.2}", p.price))?;
        self.console.say(&format!("Discount: {:.2}%", p.discount))?;
        self.console.say(&format!("Stock: {}", p.stock))?;
        self.console.say(&format!("Rating: {:.2}", p.rating))?;
        self.console.say(&format!("Reviews: {}", p.reviews))?;
        self.console.say("------------------------")
    }

    // Save helpers. A failure is reported and otherwise ignored: the
    // in-memory state keeps the mutation, only durability is lost.

    pub(crate) async fn save_users(&mut self) -> io::Result<()> {
        let snapshot = match self.accounts.snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!(error = %e, "User snapshot failed");
                return self.console.say("Error saving user data.");
            }
        };
        if let Err(e) = self.files.save_users(&snapshot).await {
            error!(error = %e, "Saving users failed");
            return self.console.say("Error saving user data.");
        }
        Ok(())
    }

    pub(crate) async fn save_products(&mut self) -> io::Result<()> {
        let snapshot = match self.catalog.list().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!(error = %e, "Catalog snapshot failed");
                return self.console.say("Error saving product data.");
            }
        };
        if let Err(e) = self.files.save_products(&snapshot).await {
            error!(error = %e, "Saving products failed");
            return self.console.say("Error saving product data.");
        }
        Ok(())
    }

    pub(crate) async fn save_orders(&mut self) -> io::Result<()> {
        let snapshot = match self.ledger.snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!(error = %e, "Ledger snapshot failed");
                return self.console.say("Error saving order data.");
            }
        };
        if let Err(e) = self.files.save_orders(&snapshot).await {
            error!(error = %e, "Saving orders failed");
            return self.console.say("Error saving order data.");
        }
        Ok(())
    }
}

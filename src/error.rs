use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Catalog is full: capacity {0} reached")]
    CapacityExceeded(usize),
    #[error("Invalid serial number: {given} (catalog holds {count})")]
    InvalidIndex { given: usize, count: usize },
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LedgerError {
    #[error("Order ledger is full: capacity {0} reached")]
    CapacityExceeded(usize),
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },
    #[error("Unknown product: {0}")]
    UnknownProduct(String),
    #[error("History write failed: {0}")]
    History(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AccountError {
    #[error("Username already taken: {0}")]
    DuplicateUsername(String),
    #[error("User limit reached: capacity {0}")]
    CapacityExceeded(usize),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed record in {path} at line {line}: {reason}")]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    Read(PathBuf, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    Parse(PathBuf, toml::de::Error),
}

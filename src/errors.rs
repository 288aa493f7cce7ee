//! Unified error types and result handling.

use thiserror::Error;

/// Crate-wide error type covering configuration, store, and validation failures.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Store error: {message}")]
    Store { message: String },

    #[error("Unknown item: no menu item with id {item_id}")]
    UnknownItem { item_id: u64 },

    #[error("Invalid rating: {rating} (must be 1-5)")]
    InvalidRating { rating: u8 },

    #[error("Order has no items")]
    EmptyOrder,

    #[error("View state error: {message}")]
    State { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

//! Signaled failures from the domain core.
//!
//! The core uses two failure idioms. Contract violations (bad quantities,
//! unknown products, unknown orders) and checkout-boundary rejections are
//! signaled through [`ShopError`]. Expected business-rule rejections inside
//! validation flows (empty cart, stale stock, bad discount code) are tagged
//! results the caller branches on - see [`crate::cart::CartValidation`] and
//! [`crate::discount::CodeValidation`]. The checkout orchestrator converts
//! the latter into [`ShopError::Rejected`] so a single failure channel
//! reaches the transport layer.

use thiserror::Error;

/// Error type for all signaled failures in the core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShopError {
    /// A caller-supplied argument violated the operation's contract.
    #[error("{0}")]
    InvalidArgument(String),

    /// A referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The requested quantity exceeds what the catalog currently has.
    #[error("Insufficient stock for {name}. Available: {available}")]
    InsufficientStock {
        /// Product name, as shown to the shopper.
        name: String,
        /// Units currently in stock.
        available: u32,
    },

    /// A validation flow rejected the operation; the message is the
    /// validation's own, propagated as-is.
    #[error("{0}")]
    Rejected(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, ShopError>;

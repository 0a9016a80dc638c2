//! Cartwheel Core - domain logic for the demo shop.
//!
//! This crate holds everything the HTTP layer calls into: the product
//! catalog, per-user carts, the discount registry, the order ledger, and the
//! checkout workflow that ties them together. It contains no I/O, no async,
//! and no globals - all state lives in a [`Shop`] value that the caller owns
//! and passes around by `&mut` handle.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs
//! - [`money`] - Two-decimal currency rounding
//! - [`catalog`] - Products and stock
//! - [`cart`] - Cart store and cart operations
//! - [`discount`] - Discount codes and the nth-order reward rule
//! - [`orders`] - The append-only order ledger
//! - [`checkout`] - The checkout orchestrator
//! - [`stats`] - On-demand store statistics
//!
//! # Concurrency
//!
//! The core is deliberately lock-free: each public operation takes `&mut
//! Shop` and runs to completion, so no other operation can observe partial
//! state. A multi-threaded host must serialize operations itself (the server
//! crate wraps the whole [`Shop`] in a mutex held across each call). Without
//! that, two concurrent checkouts of the same product could both pass stock
//! validation before either decrements stock.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod discount;
pub mod error;
pub mod money;
pub mod orders;
pub mod shop;
pub mod stats;
pub mod types;

pub use cart::{Cart, CartItem, CartValidation, CartView};
pub use catalog::{Catalog, Product};
pub use checkout::CheckoutReceipt;
pub use discount::{CodeValidation, DiscountCode, DiscountConfig, DiscountRegistry};
pub use error::{Result, ShopError};
pub use orders::{Order, OrderLedger, OrderStatus};
pub use shop::Shop;
pub use stats::{DiscountCodeStats, StoreStats};
pub use types::{OrderId, ProductId, UserId};

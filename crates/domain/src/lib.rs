//! Domain layer for the Gift List backend.
//!
//! This crate contains:
//! - Domain models (GiftList, GiftItem, PurchaseRecord, unlock requests)
//! - Business logic services, most notably the claim ledger arithmetic
//! - Domain error types

pub mod models;
pub mod services;

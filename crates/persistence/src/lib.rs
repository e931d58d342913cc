//! Persistence layer for the Gift List backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations, including the transactional claim
//!   ledger operations

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;

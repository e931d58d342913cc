//! Shared utilities and common types for the Gift List backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Share-slug generation
//! - Password hashing with Argon2id (password-protected lists)
//! - Cursor-based pagination for purchase history
//! - Common validation logic

pub mod pagination;
pub mod password;
pub mod slug;
pub mod validation;

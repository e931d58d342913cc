//! HTTP route handlers.

pub mod claims;
pub mod health;
pub mod items;
pub mod lists;
pub mod purchases;
pub mod unlock_requests;

//! External service integrations.

pub mod push;

pub use push::{build_notifier, ExpoPushService};

//! Business logic services.

pub mod claims;
pub mod notification;

pub use claims::{
    apply_claim, available, grant_purchase, override_claimed, ClaimError, ClaimOutcome,
    PurchaseGrant,
};
pub use notification::{
    MockNotificationService, NotificationResult, NotificationService, NotificationType,
    UnlockRequestedPayload, UnlockResponsePayload,
};

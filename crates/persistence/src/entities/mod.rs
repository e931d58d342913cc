//! Database entity definitions (row mappings).

pub mod gift_item;
pub mod gift_list;
pub mod purchase_record;
pub mod unlock_request;

pub use gift_item::{GiftItemEntity, GiftItemStatusDb};
pub use gift_list::{GiftListEntity, ListVisibilityDb};
pub use purchase_record::{DeliveryTargetDb, PurchaseRecordEntity};
pub use unlock_request::{UnlockRequestEntity, UnlockRequestStatusDb};

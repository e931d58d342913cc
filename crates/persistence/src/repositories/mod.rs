//! Repository implementations.

pub mod gift_item;
pub mod gift_list;
pub mod purchase_record;
pub mod unlock_request;

pub use gift_item::{GiftItemRepository, QuantityUpdate};
pub use gift_list::GiftListRepository;
pub use purchase_record::{PurchaseMeta, PurchaseOutcome, PurchaseRecordRepository};
pub use unlock_request::UnlockRequestRepository;

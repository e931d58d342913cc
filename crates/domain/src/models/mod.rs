//! Domain models and request/response DTOs.

pub mod gift_item;
pub mod gift_list;
pub mod purchase;
pub mod unlock_request;

pub use gift_item::{CreateItemRequest, GiftItem, GiftItemResponse, GiftItemStatus, UpdateItemRequest};
pub use gift_list::{
    CreateListRequest, GiftList, GiftListResponse, ListVisibility, OpenSharedListRequest,
    UpdateListRequest,
};
pub use purchase::{
    AddClaimRequest, ClaimResponse, DeliveryTarget, ListPurchasesQuery, ListPurchasesResponse,
    PurchaseRecordItem, PurchaseRequest, PurchaseResponse, SetClaimRequest,
};
pub use unlock_request::{
    CreateUnlockRequestRequest, ListUnlockRequestsQuery, RespondToUnlockRequestRequest,
    UnlockRequestResponse, UnlockRequestStatus,
};

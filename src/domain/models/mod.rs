pub mod listing;
pub mod offer;
pub mod swap;
pub mod transaction;
pub mod user;

pub use listing::{Listing, ListingDraft, ListingFilters, ListingOverrides, ListingPatch, Seller, SortKey};
pub use offer::{
    LatestOffer, LastMessage, ListingSnapshot, OfferFilters, OfferMessage, OfferOverrides,
    OfferRecord, OfferThread, Participants, Party, Role, ThreadStatus,
};
pub use swap::{Swap, SwapFilters, SwapOverrides, SwapSide, SwapStatus};
pub use transaction::{
    CheckoutRequest, CheckoutSession, Transaction, TransactionFilters, TransactionOverrides,
    TransactionStatus,
};
pub use user::{RegisterPayload, UserProfile};

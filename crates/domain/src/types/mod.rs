//! Domain types and models

pub mod building;
pub mod catalog;
pub mod order;
pub mod promotion;

pub use building::{AddressQuery, Building, Infrastructure};
pub use catalog::{RouterOption, Tariff};
pub use order::{ConsentRecord, CustomerDetails, Order, Quote, Selection};
pub use promotion::{
    AppliedPromoCode, Discount, DiscountKind, DiscountTarget, Promotion, PromotionSnapshot,
};

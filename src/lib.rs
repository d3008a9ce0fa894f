//! Marketplace domain types and logic for Plaza.
//!
//! The in-memory core of a mobile marketplace app. Everything hangs off a
//! single [`MarketStore`] owned by the host application's composition root:
//!
//! - **Catalog**: merchants, items, priced option groups, filtered queries
//! - **Cart**: one in-progress cart pinned to a merchant, with option
//!   selections snapshotted by value
//! - **Orders**: immutable checkout snapshots driven through a fulfillment
//!   state machine, with an independent payment lifecycle
//! - **Discounts**: guarded promotional codes with usage counters
//! - **Addresses**: per-user saved addresses with a single default
//! - **Analytics**: read-only dashboard aggregates
//!
//! The store is synchronous and single-threaded; every operation completes
//! atomically with respect to the shared state, and all pricing math runs
//! inside the mutating call. Serializing the store captures derived fields,
//! so persistence is just a snapshot of the whole value.
//!
//! # Example
//!
//! ```rust,ignore
//! use plaza::prelude::*;
//!
//! let mut store = MarketStore::new();
//! store.seed_sample_data();
//!
//! let merchants = store.merchants(&MerchantFilter::default());
//! let menu = store.items(&ItemFilter {
//!     merchant_id: Some(merchants[0].id.clone()),
//!     ..ItemFilter::default()
//! });
//!
//! store.add_to_cart(&menu[0].id, 2, &selections, None)?;
//! let order_id = store.create_order(CheckoutRequest::pickup())?;
//! ```

pub mod address;
pub mod analytics;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod discount;
pub mod error;
pub mod ids;
pub mod money;
pub mod order;
pub mod store;

mod seed;

pub use error::MarketError;
pub use money::Money;
pub use store::MarketStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::MarketError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    pub use crate::address::DeliveryAddress;
    pub use crate::analytics::{DailyRevenue, DashboardStats, MerchantRevenue, TopItem};
    pub use crate::cart::{Cart, CartItem, CartLinePatch, CartTotals, SelectedOption};
    pub use crate::catalog::{
        Choice, DeliveryConfig, ItemFilter, ItemPatch, ItemSort, ItemSortKey, Merchant,
        MerchantFilter, MerchantItem, OperatingHours, OptionGroup, SelectionType, SortDirection,
    };
    pub use crate::config::StoreConfig;
    pub use crate::discount::{Discount, DiscountOutcome, DiscountValue};
    pub use crate::order::{
        CheckoutRequest, DeliveryType, Order, OrderItem, OrderStatus, PaymentStatus,
    };
    pub use crate::store::MarketStore;
}

//! Merchant and item catalog.
//!
//! Contains types for merchants, their items, priced option groups, and
//! the filters used by storefront queries.

mod item;
mod merchant;
mod options;
mod query;

pub use item::{ItemPatch, MerchantItem};
pub use merchant::{DeliveryConfig, Merchant, OperatingHours};
pub use options::{Choice, OptionGroup, SelectionType};
pub use query::{ItemFilter, ItemSort, ItemSortKey, MerchantFilter, SortDirection};

pub(crate) use query::collate;

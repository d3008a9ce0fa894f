//! Catalog query filters and sorting.

use crate::catalog::{Merchant, MerchantItem};
use crate::ids::MerchantId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Predicates applied to merchant queries.
///
/// An empty filter matches every merchant; the store additionally excludes
/// inactive merchants from all query results.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MerchantFilter {
    pub category: Option<String>,
    pub open_only: bool,
    pub min_rating: Option<f64>,
    pub delivery_only: bool,
    /// Case-insensitive substring match over name and description.
    pub text: Option<String>,
}

impl MerchantFilter {
    pub fn matches(&self, merchant: &Merchant) -> bool {
        if let Some(category) = &self.category {
            if !merchant.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if self.open_only && !merchant.is_open {
            return false;
        }
        if let Some(min) = self.min_rating {
            if merchant.rating < min {
                return false;
            }
        }
        if self.delivery_only && !merchant.delivery.supports_delivery {
            return false;
        }
        if let Some(text) = &self.text {
            if !text_matches(text, &merchant.name, &merchant.description) {
                return false;
            }
        }
        true
    }
}

/// Predicates and ordering for item queries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ItemFilter {
    pub merchant_id: Option<MerchantId>,
    pub category: Option<String>,
    pub available_only: bool,
    pub featured_only: bool,
    /// Case-insensitive substring match over name and description.
    pub text: Option<String>,
    #[serde(default)]
    pub sort: ItemSort,
}

impl ItemFilter {
    pub fn matches(&self, item: &MerchantItem) -> bool {
        if let Some(merchant_id) = &self.merchant_id {
            if &item.merchant_id != merchant_id {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if !item.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if self.available_only && !item.available {
            return false;
        }
        if self.featured_only && !item.featured {
            return false;
        }
        if let Some(text) = &self.text {
            if !text_matches(text, &item.name, &item.description) {
                return false;
            }
        }
        true
    }
}

/// Sort key for item listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ItemSortKey {
    Name,
    Price,
    UnitsSold,
    #[default]
    SortOrder,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Ordering applied to item query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ItemSort {
    pub key: ItemSortKey,
    pub direction: SortDirection,
}

impl ItemSort {
    pub fn ascending(key: ItemSortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: ItemSortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Descending,
        }
    }

    pub(crate) fn compare(&self, a: &MerchantItem, b: &MerchantItem) -> Ordering {
        let ordering = match self.key {
            ItemSortKey::Name => collate(&a.name, &b.name),
            ItemSortKey::Price => a.price.cmp(&b.price),
            ItemSortKey::UnitsSold => a.units_sold.cmp(&b.units_sold),
            ItemSortKey::SortOrder => a.sort_order.cmp(&b.sort_order),
        };
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Case-folded comparison used for name sorts.
pub(crate) fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn text_matches(needle: &str, name: &str, description: &str) -> bool {
    let needle = needle.to_lowercase();
    name.to_lowercase().contains(&needle) || description.to_lowercase().contains(&needle)
}

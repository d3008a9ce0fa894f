//! Catalog item types.

use crate::catalog::OptionGroup;
use crate::ids::{ItemId, MerchantId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// An item on a merchant's menu or shelf.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MerchantItem {
    pub id: ItemId,
    pub merchant_id: MerchantId,
    pub name: String,
    pub description: String,
    /// Base price before option deltas.
    pub price: Money,
    /// Category tag within the merchant's menu, e.g. "Mains".
    pub category: String,
    pub available: bool,
    pub featured: bool,
    /// Manual position within a menu section.
    pub sort_order: i32,
    /// Option groups presented when the item is added to a cart.
    pub option_groups: Vec<OptionGroup>,
    /// Lifetime units sold. Moves only through order creation.
    pub units_sold: i64,
    /// Lifetime revenue. Moves only through order creation.
    pub revenue: Money,
}

impl MerchantItem {
    /// Create an available, unfeatured item.
    pub fn new(merchant_id: MerchantId, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: ItemId::generate(),
            merchant_id,
            name: name.into(),
            description: String::new(),
            price,
            category: String::new(),
            available: true,
            featured: false,
            sort_order: 0,
            option_groups: Vec::new(),
            units_sold: 0,
            revenue: Money::ZERO,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_option_group(mut self, group: OptionGroup) -> Self {
        self.option_groups.push(group);
        self
    }

    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    /// Fold a completed sale into the lifetime counters.
    pub(crate) fn record_sale(&mut self, quantity: i64, line_total: Money) {
        self.units_sold += quantity;
        self.revenue += line_total;
    }

    /// Apply a partial admin edit.
    pub(crate) fn apply_patch(&mut self, patch: &ItemPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(available) = patch.available {
            self.available = available;
        }
        if let Some(featured) = patch.featured {
            self.featured = featured;
        }
        if let Some(sort_order) = patch.sort_order {
            self.sort_order = sort_order;
        }
    }
}

/// Partial update applied by admin edits and bulk operations.
///
/// Sales counters are not patchable; they move only through order creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Money>,
    pub category: Option<String>,
    pub available: Option<bool>,
    pub featured: Option<bool>,
    pub sort_order: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> MerchantItem {
        MerchantItem::new(MerchantId::new("mer-1"), "Margherita", Money::from_cents(1299))
    }

    #[test]
    fn test_record_sale_accumulates() {
        let mut item = item();
        item.record_sale(2, Money::from_cents(4098));
        item.record_sale(1, Money::from_cents(1299));
        assert_eq!(item.units_sold, 3);
        assert_eq!(item.revenue.cents(), 5397);
    }

    #[test]
    fn test_patch_applies_only_set_fields() {
        let mut item = item().with_category("Mains");
        item.apply_patch(&ItemPatch {
            price: Some(Money::from_cents(1399)),
            available: Some(false),
            ..ItemPatch::default()
        });

        assert_eq!(item.price.cents(), 1399);
        assert!(!item.available);
        assert_eq!(item.name, "Margherita");
        assert_eq!(item.category, "Mains");
    }
}

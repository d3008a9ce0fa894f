//! Cart and cart line types.

use crate::cart::{options_delta, SelectedOption};
use crate::ids::{CartLineId, ChoiceId, ItemId, MerchantId, OptionGroupId};
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Totals summary for checkout and badge displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CartTotals {
    pub subtotal: Money,
    /// Sum of line quantities, not the number of lines.
    pub item_count: i64,
}

/// A line in the cart.
///
/// `line_total` is maintained inside every mutating operation, never left
/// for callers to recompute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    pub id: CartLineId,
    pub item_id: ItemId,
    /// Item name at add time.
    pub name: String,
    /// Base price at add time, before option deltas.
    pub base_price: Money,
    pub selected_options: Vec<SelectedOption>,
    pub quantity: i64,
    pub notes: Option<String>,
    /// `(base_price + Σ option deltas) × quantity`.
    pub line_total: Money,
}

impl CartItem {
    pub(crate) fn new(
        item_id: ItemId,
        name: impl Into<String>,
        base_price: Money,
        selected_options: Vec<SelectedOption>,
        quantity: i64,
        notes: Option<String>,
    ) -> Self {
        let mut line = Self {
            id: CartLineId::generate(),
            item_id,
            name: name.into(),
            base_price,
            selected_options,
            quantity,
            notes,
            line_total: Money::ZERO,
        };
        line.reprice();
        line
    }

    /// Unit price including option deltas.
    pub fn unit_price(&self) -> Money {
        self.base_price + options_delta(&self.selected_options)
    }

    pub(crate) fn reprice(&mut self) {
        self.line_total = self.unit_price() * self.quantity;
    }
}

/// Partial update for a cart line. Unset fields are left alone.
#[derive(Debug, Clone, Default)]
pub struct CartLinePatch {
    pub quantity: Option<i64>,
    pub notes: Option<Option<String>>,
    /// Requested `(group, choice)` pairs, re-resolved against the catalog.
    pub selections: Option<Vec<(OptionGroupId, ChoiceId)>>,
}

/// The single in-progress cart, pinned to one merchant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    pub merchant_id: MerchantId,
    pub items: Vec<CartItem>,
    /// Σ line totals, maintained inside every mutating operation.
    pub subtotal: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    pub(crate) fn new(merchant_id: MerchantId) -> Self {
        let now = Utc::now();
        Self {
            merchant_id,
            items: Vec::new(),
            subtotal: Money::ZERO,
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a line and refresh the subtotal.
    pub(crate) fn push_line(&mut self, line: CartItem) -> CartLineId {
        let id = line.id.clone();
        self.items.push(line);
        self.recompute();
        id
    }

    /// Drop a line; returns whether anything was removed.
    pub(crate) fn remove_line(&mut self, line_id: &CartLineId) -> bool {
        let before = self.items.len();
        self.items.retain(|line| &line.id != line_id);
        let removed = self.items.len() < before;
        if removed {
            self.recompute();
        }
        removed
    }

    /// Look up a line by id.
    pub fn line(&self, line_id: &CartLineId) -> Option<&CartItem> {
        self.items.iter().find(|line| &line.id == line_id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of line quantities.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals {
            subtotal: self.subtotal,
            item_count: self.item_count(),
        }
    }

    pub(crate) fn recompute(&mut self) {
        self.subtotal = self.items.iter().map(|line| line.line_total).sum();
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str, cents: i64, quantity: i64) -> CartItem {
        CartItem::new(
            ItemId::generate(),
            name,
            Money::from_cents(cents),
            Vec::new(),
            quantity,
            None,
        )
    }

    fn option(cents: i64) -> SelectedOption {
        SelectedOption {
            group_id: crate::ids::OptionGroupId::generate(),
            choice_id: crate::ids::ChoiceId::generate(),
            group_name: "Size".to_string(),
            choice_name: "Large".to_string(),
            price_delta: Money::from_cents(cents),
        }
    }

    #[test]
    fn test_line_total_includes_option_deltas() {
        // $12.99 base, +$6.00 size, +$1.50 extra, quantity 2 -> $40.98.
        let mut line = line("Margherita", 1299, 2);
        line.selected_options = vec![option(600), option(150)];
        line.reprice();

        assert_eq!(line.unit_price().cents(), 2049);
        assert_eq!(line.line_total.cents(), 4098);
    }

    #[test]
    fn test_subtotal_tracks_lines() {
        let mut cart = Cart::new(MerchantId::new("mer-1"));
        cart.push_line(line("Margherita", 1299, 2));
        let soda = cart.push_line(line("Soda", 250, 1));

        assert_eq!(cart.subtotal.cents(), 2 * 1299 + 250);
        assert_eq!(cart.item_count(), 3);

        assert!(cart.remove_line(&soda));
        assert_eq!(cart.subtotal.cents(), 2 * 1299);
    }

    #[test]
    fn test_remove_missing_line_is_noop() {
        let mut cart = Cart::new(MerchantId::new("mer-1"));
        cart.push_line(line("Margherita", 1299, 1));
        assert!(!cart.remove_line(&CartLineId::new("missing")));
        assert_eq!(cart.items.len(), 1);
    }

    #[test]
    fn test_totals_sum_quantities_not_lines() {
        let mut cart = Cart::new(MerchantId::new("mer-1"));
        cart.push_line(line("Tacos", 350, 4));
        let totals = cart.totals();
        assert_eq!(totals.item_count, 4);
        assert_eq!(totals.subtotal.cents(), 1400);
    }
}

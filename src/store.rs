//! The marketplace domain state and its operations.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::address::DeliveryAddress;
use crate::analytics::{compute_dashboard, DashboardStats};
use crate::cart::{resolve_selections, Cart, CartItem, CartLinePatch, CartTotals};
use crate::catalog::{
    collate, ItemFilter, ItemPatch, Merchant, MerchantFilter, MerchantItem,
};
use crate::config::StoreConfig;
use crate::discount::{Discount, DiscountOutcome};
use crate::error::MarketError;
use crate::ids::{
    AddressId, CartLineId, ChoiceId, DiscountId, ItemId, MerchantId, OptionGroupId, OrderId,
    UserId,
};
use crate::money::Money;
use crate::order::{CheckoutRequest, DeliveryType, Order, OrderItem, OrderStatus, PaymentStatus};

/// The marketplace domain state.
///
/// One `MarketStore` is owned by the application's composition root and
/// handed to collaborating screens; every mutation goes through a method
/// here so the pricing, counter, and default-address invariants hold.
/// Serializing the whole store captures derived fields (line totals,
/// subtotals, counters, the order-number sequence), so a deserialized
/// snapshot needs no recompute pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketStore {
    #[serde(default)]
    pub config: StoreConfig,
    merchants: HashMap<MerchantId, Merchant>,
    items: HashMap<ItemId, MerchantItem>,
    cart: Option<Cart>,
    orders: Vec<Order>,
    discounts: HashMap<DiscountId, Discount>,
    addresses: Vec<DeliveryAddress>,
    next_order_number: u64,
}

impl Default for MarketStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketStore {
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config,
            merchants: HashMap::new(),
            items: HashMap::new(),
            cart: None,
            orders: Vec::new(),
            discounts: HashMap::new(),
            addresses: Vec::new(),
            next_order_number: 1001,
        }
    }

    // ----- catalog: merchants -----

    pub fn add_merchant(&mut self, merchant: Merchant) -> MerchantId {
        let id = merchant.id.clone();
        debug!(merchant = %id, name = %merchant.name, "merchant added");
        self.merchants.insert(id.clone(), merchant);
        id
    }

    /// Replace a merchant wholesale. Unknown ids are a silent no-op.
    pub fn update_merchant(&mut self, merchant: Merchant) {
        if let Some(existing) = self.merchants.get_mut(&merchant.id) {
            *existing = merchant;
        }
    }

    /// Delete a merchant and all of its items. Unknown ids are a silent no-op.
    pub fn delete_merchant(&mut self, merchant_id: &MerchantId) {
        if self.merchants.remove(merchant_id).is_some() {
            self.items.retain(|_, item| &item.merchant_id != merchant_id);
            debug!(merchant = %merchant_id, "merchant deleted with items");
        }
    }

    pub fn merchant(&self, merchant_id: &MerchantId) -> Option<&Merchant> {
        self.merchants.get(merchant_id)
    }

    pub fn merchant_count(&self) -> usize {
        self.merchants.len()
    }

    /// Query merchants; inactive merchants never appear in results.
    pub fn merchants(&self, filter: &MerchantFilter) -> Vec<&Merchant> {
        let mut matched: Vec<&Merchant> = self
            .merchants
            .values()
            .filter(|merchant| merchant.is_active && filter.matches(merchant))
            .collect();
        matched.sort_by(|a, b| collate(&a.name, &b.name));
        matched
    }

    // ----- catalog: items -----

    /// Add an item to its merchant's catalog. Returns `None` when the
    /// merchant is unknown.
    pub fn add_item(&mut self, item: MerchantItem) -> Option<ItemId> {
        if !self.merchants.contains_key(&item.merchant_id) {
            return None;
        }
        let id = item.id.clone();
        self.items.insert(id.clone(), item);
        Some(id)
    }

    /// Replace an item wholesale. Unknown ids are a silent no-op.
    /// Sales counters always come from the stored record.
    pub fn update_item(&mut self, item: MerchantItem) {
        if let Some(existing) = self.items.get_mut(&item.id) {
            let mut item = item;
            item.units_sold = existing.units_sold;
            item.revenue = existing.revenue;
            *existing = item;
        }
    }

    /// Delete an item. Unknown ids are a silent no-op.
    pub fn delete_item(&mut self, item_id: &ItemId) {
        self.items.remove(item_id);
    }

    pub fn item(&self, item_id: &ItemId) -> Option<&MerchantItem> {
        self.items.get(item_id)
    }

    /// Query items; items of inactive merchants never appear in results.
    pub fn items(&self, filter: &ItemFilter) -> Vec<&MerchantItem> {
        let mut matched: Vec<&MerchantItem> = self
            .items
            .values()
            .filter(|item| self.merchant_is_listed(&item.merchant_id))
            .filter(|item| filter.matches(item))
            .collect();
        matched.sort_by(|a, b| filter.sort.compare(a, b));
        matched
    }

    /// Apply one partial patch to every item in `ids` as a single unit.
    /// Unknown ids are skipped silently.
    pub fn bulk_update_items(&mut self, ids: &[ItemId], patch: &ItemPatch) {
        for id in ids {
            if let Some(item) = self.items.get_mut(id) {
                item.apply_patch(patch);
            }
        }
    }

    /// Delete every item in `ids` as a single unit.
    pub fn bulk_delete_items(&mut self, ids: &[ItemId]) {
        for id in ids {
            self.items.remove(id);
        }
    }

    fn merchant_is_listed(&self, merchant_id: &MerchantId) -> bool {
        self.merchants
            .get(merchant_id)
            .map(|merchant| merchant.is_active)
            .unwrap_or(false)
    }

    // ----- cart -----

    pub fn cart(&self) -> Option<&Cart> {
        self.cart.as_ref()
    }

    pub fn cart_totals(&self) -> CartTotals {
        self.cart.as_ref().map(Cart::totals).unwrap_or_default()
    }

    /// Discard the cart, e.g. when the caller chooses to switch merchants.
    pub fn clear_cart(&mut self) {
        self.cart = None;
    }

    /// Add an item to the cart, creating the cart lazily on first add.
    ///
    /// Fails without touching the cart when the item is unknown or
    /// unavailable, the quantity is not positive, a required option group
    /// is left unselected, or the cart is pinned to a different merchant.
    pub fn add_to_cart(
        &mut self,
        item_id: &ItemId,
        quantity: i64,
        selections: &[(OptionGroupId, ChoiceId)],
        notes: Option<String>,
    ) -> Result<CartLineId, MarketError> {
        if quantity <= 0 {
            return Err(MarketError::InvalidQuantity(quantity));
        }
        let item = self
            .items
            .get(item_id)
            .ok_or_else(|| MarketError::ItemNotFound(item_id.clone()))?;
        if !item.available {
            return Err(MarketError::ItemUnavailable(item_id.clone()));
        }
        if let Some(cart) = &self.cart {
            if cart.merchant_id != item.merchant_id {
                return Err(MarketError::MerchantMismatch {
                    in_cart: cart.merchant_id.clone(),
                    requested: item.merchant_id.clone(),
                });
            }
        }

        let selected = resolve_selections(item, selections)?;
        let line = CartItem::new(
            item.id.clone(),
            item.name.clone(),
            item.price,
            selected,
            quantity,
            notes,
        );
        let merchant_id = item.merchant_id.clone();
        let cart = self.cart.get_or_insert_with(|| Cart::new(merchant_id));
        let line_id = cart.push_line(line);
        debug!(line = %line_id, item = %item_id, "cart line added");
        Ok(line_id)
    }

    /// Partially update a cart line. Unknown line ids return `Ok(false)`.
    ///
    /// A quantity of zero or less removes the line; removing the last line
    /// discards the cart.
    pub fn update_cart_line(
        &mut self,
        line_id: &CartLineId,
        patch: CartLinePatch,
    ) -> Result<bool, MarketError> {
        // Re-resolve any requested selections against the catalog before
        // taking the cart apart; a failed resolution leaves the cart as-is.
        let resolved = match &patch.selections {
            Some(selections) => {
                let Some(line) = self.cart.as_ref().and_then(|cart| cart.line(line_id)) else {
                    return Ok(false);
                };
                match self.items.get(&line.item_id) {
                    Some(item) => Some(resolve_selections(item, selections)?),
                    // Item since removed from the catalog: keep the
                    // snapshotted options.
                    None => None,
                }
            }
            None => None,
        };

        let Some(cart) = self.cart.as_mut() else {
            return Ok(false);
        };
        if !cart.items.iter().any(|line| &line.id == line_id) {
            return Ok(false);
        }

        if matches!(patch.quantity, Some(quantity) if quantity <= 0) {
            cart.remove_line(line_id);
            if cart.is_empty() {
                self.cart = None;
            }
            return Ok(true);
        }

        if let Some(line) = cart.items.iter_mut().find(|line| &line.id == line_id) {
            if let Some(quantity) = patch.quantity {
                line.quantity = quantity;
            }
            if let Some(notes) = patch.notes {
                line.notes = notes;
            }
            if let Some(options) = resolved {
                line.selected_options = options;
            }
            line.reprice();
        }
        cart.recompute();
        Ok(true)
    }

    /// Drop a cart line; removing the last line discards the cart.
    pub fn remove_from_cart(&mut self, line_id: &CartLineId) -> bool {
        let Some(cart) = self.cart.as_mut() else {
            return false;
        };
        let removed = cart.remove_line(line_id);
        if removed && cart.is_empty() {
            self.cart = None;
        }
        removed
    }

    // ----- orders -----

    /// Convert the cart into an immutable order snapshot.
    ///
    /// Sales counters, the order-number sequence, and the cart reset all
    /// move in the same logical transaction.
    pub fn create_order(&mut self, request: CheckoutRequest) -> Result<OrderId, MarketError> {
        let (merchant_id, subtotal, lines) = match &self.cart {
            Some(cart) if !cart.is_empty() => {
                (cart.merchant_id.clone(), cart.subtotal, cart.items.clone())
            }
            _ => return Err(MarketError::EmptyCart),
        };
        let merchant = self
            .merchants
            .get(&merchant_id)
            .ok_or_else(|| MarketError::MerchantNotFound(merchant_id.clone()))?;
        let merchant_name = merchant.name.clone();
        let delivery_fee = match request.delivery_type {
            DeliveryType::Delivery => merchant.delivery.fee,
            DeliveryType::Pickup => Money::ZERO,
        };

        let tax = subtotal.percent(self.config.tax_rate_percent);
        let total = subtotal + tax + delivery_fee + request.tip - request.discount;

        let items: Vec<OrderItem> = lines
            .iter()
            .map(|line| OrderItem {
                item_id: line.item_id.clone(),
                name: line.name.clone(),
                unit_price: line.unit_price(),
                selected_options: line.selected_options.clone(),
                quantity: line.quantity,
                notes: line.notes.clone(),
                line_total: line.line_total,
            })
            .collect();

        for line in &items {
            if let Some(item) = self.items.get_mut(&line.item_id) {
                item.record_sale(line.quantity, line.line_total);
            }
        }

        let order_number = format!(
            "{}-{}",
            self.config.order_number_prefix, self.next_order_number
        );
        self.next_order_number += 1;

        let order = Order {
            id: OrderId::generate(),
            order_number,
            merchant_id,
            merchant_name,
            items,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            delivery_type: request.delivery_type,
            address: request.address,
            subtotal,
            tax,
            delivery_fee,
            tip: request.tip,
            discount: request.discount,
            discount_code: request.discount_code,
            total,
            placed_at: Utc::now(),
            confirmed_at: None,
            completed_at: None,
            cancelled_at: None,
            cancel_reason: None,
        };

        self.cart = None;
        info!(order = %order.order_number, total = %order.total, "order placed");
        let id = order.id.clone();
        self.orders.push(order);
        Ok(id)
    }

    pub fn order(&self, order_id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| &order.id == order_id)
    }

    /// All orders, oldest first.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn orders_for_merchant(&self, merchant_id: &MerchantId) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|order| &order.merchant_id == merchant_id)
            .collect()
    }

    /// Advance fulfillment one step along the flow for the order's
    /// delivery type. `Cancelled`/`Refunded` targets are rejected here;
    /// use [`MarketStore::cancel_order`] / [`MarketStore::refund_order`].
    pub fn update_order_status(
        &mut self,
        order_id: &OrderId,
        next: OrderStatus,
    ) -> Result<(), MarketError> {
        let order = self.order_mut(order_id)?;
        order.advance_to(next)?;
        info!(order = %order.order_number, status = %next, "order status updated");
        Ok(())
    }

    /// Cancel with a mandatory reason.
    pub fn cancel_order(&mut self, order_id: &OrderId, reason: &str) -> Result<(), MarketError> {
        let order = self.order_mut(order_id)?;
        order.cancel(reason)?;
        info!(order = %order.order_number, reason, "order cancelled");
        Ok(())
    }

    /// Refund: sets `payment_status` and `status` to refunded together.
    pub fn refund_order(&mut self, order_id: &OrderId) -> Result<(), MarketError> {
        let order = self.order_mut(order_id)?;
        order.refund()?;
        info!(order = %order.order_number, "order refunded");
        Ok(())
    }

    /// Move the payment lifecycle, independent of fulfillment.
    pub fn update_payment_status(
        &mut self,
        order_id: &OrderId,
        next: PaymentStatus,
    ) -> Result<(), MarketError> {
        let order = self.order_mut(order_id)?;
        order.set_payment_status(next)?;
        debug!(order = %order.order_number, payment = %next, "payment status updated");
        Ok(())
    }

    fn order_mut(&mut self, order_id: &OrderId) -> Result<&mut Order, MarketError> {
        self.orders
            .iter_mut()
            .find(|order| &order.id == order_id)
            .ok_or_else(|| MarketError::OrderNotFound(order_id.clone()))
    }

    // ----- discounts -----

    pub fn add_discount(&mut self, discount: Discount) -> DiscountId {
        let id = discount.id.clone();
        self.discounts.insert(id.clone(), discount);
        id
    }

    /// Replace a discount wholesale. Unknown ids are a silent no-op.
    /// The usage counter always comes from the stored record.
    pub fn update_discount(&mut self, discount: Discount) {
        if let Some(existing) = self.discounts.get_mut(&discount.id) {
            let mut discount = discount;
            discount.usage_count = existing.usage_count;
            *existing = discount;
        }
    }

    /// Delete a discount. Unknown ids are a silent no-op.
    pub fn delete_discount(&mut self, discount_id: &DiscountId) {
        self.discounts.remove(discount_id);
    }

    pub fn discount(&self, discount_id: &DiscountId) -> Option<&Discount> {
        self.discounts.get(discount_id)
    }

    pub fn discounts(&self) -> Vec<&Discount> {
        let mut all: Vec<&Discount> = self.discounts.values().collect();
        all.sort_by(|a, b| collate(&a.name, &b.name));
        all
    }

    /// Evaluate a code against a subtotal; a successful application
    /// increments the code's usage counter in the same call.
    pub fn apply_discount(&mut self, code: &str, subtotal: Money) -> DiscountOutcome {
        let found = self.discounts.values_mut().find(|discount| {
            discount
                .code
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(code))
        });
        let Some(discount) = found else {
            return DiscountOutcome::rejected("Invalid discount code");
        };
        let outcome = discount.evaluate(subtotal, Utc::now());
        if outcome.valid {
            discount.record_usage();
            debug!(code, amount = %outcome.amount, "discount applied");
        }
        outcome
    }

    // ----- addresses -----

    /// Save an address; a default address clears the user's previous
    /// default first.
    pub fn add_address(&mut self, address: DeliveryAddress) -> AddressId {
        if address.is_default {
            self.clear_default_for(&address.user_id);
        }
        let id = address.id.clone();
        self.addresses.push(address);
        id
    }

    /// Replace an address wholesale, re-asserting the single-default
    /// invariant. Unknown ids are a silent no-op.
    pub fn update_address(&mut self, address: DeliveryAddress) {
        let Some(index) = self.addresses.iter().position(|a| a.id == address.id) else {
            return;
        };
        if address.is_default {
            self.clear_default_for(&address.user_id);
        }
        self.addresses[index] = address;
    }

    /// Delete an address. Unknown ids are a silent no-op.
    pub fn delete_address(&mut self, address_id: &AddressId) {
        self.addresses.retain(|a| &a.id != address_id);
    }

    /// Atomically clear the user's previous default and set a new one.
    /// Unknown or foreign ids are a silent no-op.
    pub fn set_default_address(&mut self, user_id: &UserId, address_id: &AddressId) {
        let owned = self
            .addresses
            .iter()
            .any(|a| &a.id == address_id && &a.user_id == user_id);
        if !owned {
            return;
        }
        self.clear_default_for(user_id);
        if let Some(address) = self.addresses.iter_mut().find(|a| &a.id == address_id) {
            address.is_default = true;
        }
    }

    pub fn addresses_for(&self, user_id: &UserId) -> Vec<&DeliveryAddress> {
        self.addresses
            .iter()
            .filter(|a| &a.user_id == user_id)
            .collect()
    }

    pub fn default_address(&self, user_id: &UserId) -> Option<&DeliveryAddress> {
        self.addresses
            .iter()
            .find(|a| &a.user_id == user_id && a.is_default)
    }

    fn clear_default_for(&mut self, user_id: &UserId) {
        for address in self
            .addresses
            .iter_mut()
            .filter(|a| &a.user_id == user_id)
        {
            address.is_default = false;
        }
    }

    // ----- analytics -----

    /// Dashboard statistics over the configured trailing window.
    pub fn dashboard(&self) -> DashboardStats {
        self.dashboard_at(Utc::now())
    }

    /// Dashboard statistics with an explicit "now", for deterministic use.
    pub fn dashboard_at(&self, now: DateTime<Utc>) -> DashboardStats {
        compute_dashboard(
            &self.orders,
            &self.items,
            now,
            self.config.analytics_window_days,
            self.config.leaderboard_size,
        )
    }
}

//! Order snapshot types.

use crate::address::DeliveryAddress;
use crate::cart::SelectedOption;
use crate::error::MarketError;
use crate::ids::{ItemId, MerchantId, OrderId};
use crate::money::Money;
use crate::order::{DeliveryType, OrderStatus, PaymentStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A line captured into an order at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub item_id: ItemId,
    /// Item name at checkout time.
    pub name: String,
    /// Unit price including option deltas, at checkout time.
    pub unit_price: Money,
    pub selected_options: Vec<SelectedOption>,
    pub quantity: i64,
    pub notes: Option<String>,
    pub line_total: Money,
}

/// Checkout parameters supplied by the caller.
///
/// The discount amount comes from the discount engine at the call site;
/// it defaults to zero when no code was applied.
#[derive(Debug, Clone, Default)]
pub struct CheckoutRequest {
    pub delivery_type: DeliveryType,
    /// Destination; meaningful for delivery orders.
    pub address: Option<DeliveryAddress>,
    pub tip: Money,
    pub discount: Money,
    pub discount_code: Option<String>,
}

impl CheckoutRequest {
    pub fn delivery(address: DeliveryAddress) -> Self {
        Self {
            delivery_type: DeliveryType::Delivery,
            address: Some(address),
            ..Self::default()
        }
    }

    pub fn pickup() -> Self {
        Self {
            delivery_type: DeliveryType::Pickup,
            ..Self::default()
        }
    }

    pub fn with_tip(mut self, tip: Money) -> Self {
        self.tip = tip;
        self
    }

    pub fn with_discount(mut self, amount: Money, code: impl Into<String>) -> Self {
        self.discount = amount;
        self.discount_code = Some(code.into());
        self
    }
}

/// An immutable checkout snapshot with its own lifecycle.
///
/// Item names, prices, and options are copied from the cart so later
/// catalog edits never alter order history. Orders are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: OrderId,
    /// Human-readable sequential number, e.g. "ORD-1004".
    pub order_number: String,
    pub merchant_id: MerchantId,
    /// Merchant name at checkout time.
    pub merchant_name: String,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub delivery_type: DeliveryType,
    pub address: Option<DeliveryAddress>,
    pub subtotal: Money,
    pub tax: Money,
    pub delivery_fee: Money,
    pub tip: Money,
    pub discount: Money,
    pub discount_code: Option<String>,
    pub total: Money,
    pub placed_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancel_reason: Option<String>,
}

impl Order {
    /// Sum of line quantities.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }

    /// Move one step along the fulfillment flow.
    ///
    /// `Cancelled` and `Refunded` are rejected here; they are reached only
    /// through [`Order::cancel`] and [`Order::refund`].
    pub(crate) fn advance_to(&mut self, next: OrderStatus) -> Result<(), MarketError> {
        let off_flow = matches!(next, OrderStatus::Cancelled | OrderStatus::Refunded);
        if off_flow || !self.status.can_advance_to(next, self.delivery_type) {
            return Err(MarketError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        match next {
            OrderStatus::Confirmed => self.confirmed_at = Some(Utc::now()),
            OrderStatus::Delivered | OrderStatus::Completed => {
                self.completed_at = Some(Utc::now());
            }
            _ => {}
        }
        Ok(())
    }

    /// Cancel with a mandatory reason; allowed from any non-terminal state.
    pub(crate) fn cancel(&mut self, reason: &str) -> Result<(), MarketError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(MarketError::CancelReasonRequired);
        }
        if self.status.is_terminal() {
            return Err(MarketError::InvalidTransition {
                from: self.status,
                to: OrderStatus::Cancelled,
            });
        }
        self.status = OrderStatus::Cancelled;
        self.cancelled_at = Some(Utc::now());
        self.cancel_reason = Some(reason.to_string());
        Ok(())
    }

    /// Refund: sets payment and fulfillment status together so the two
    /// fields cannot drift.
    pub(crate) fn refund(&mut self) -> Result<(), MarketError> {
        if self.status.is_terminal() {
            return Err(MarketError::InvalidTransition {
                from: self.status,
                to: OrderStatus::Refunded,
            });
        }
        self.status = OrderStatus::Refunded;
        self.payment_status = PaymentStatus::Refunded;
        Ok(())
    }

    pub(crate) fn set_payment_status(&mut self, next: PaymentStatus) -> Result<(), MarketError> {
        if !self.payment_status.can_become(next) {
            return Err(MarketError::InvalidPaymentTransition {
                from: self.payment_status,
                to: next,
            });
        }
        self.payment_status = next;
        Ok(())
    }
}

//! Marketplace error types.

use crate::ids::{ItemId, MerchantId, OrderId};
use crate::order::{OrderStatus, PaymentStatus};
use thiserror::Error;

/// Errors surfaced by marketplace operations.
///
/// These are business rejections with well-defined reasons. Admin CRUD
/// against an unknown id is a silent no-op by design and never reaches this
/// type; discount evaluation reports through [`crate::discount::DiscountOutcome`]
/// instead of the error channel.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketError {
    /// Merchant not found.
    #[error("merchant not found: {0}")]
    MerchantNotFound(MerchantId),

    /// Item not found.
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    /// Item exists but cannot currently be ordered.
    #[error("item is unavailable: {0}")]
    ItemUnavailable(ItemId),

    /// The cart is pinned to a different merchant.
    #[error("cart holds items from merchant {in_cart}; cannot add items from {requested}")]
    MerchantMismatch {
        in_cart: MerchantId,
        requested: MerchantId,
    },

    /// Quantity must be positive.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// A required option group has no selection.
    #[error("option group \"{0}\" requires a selection")]
    RequiredOptionMissing(String),

    /// Checkout requires a non-empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Order not found.
    #[error("order not found: {0}")]
    OrderNotFound(OrderId),

    /// The requested fulfillment transition is not legal.
    #[error("cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// The requested payment transition is not legal.
    #[error("cannot change payment from {from} to {to}")]
    InvalidPaymentTransition {
        from: PaymentStatus,
        to: PaymentStatus,
    },

    /// Cancelling an order requires a reason.
    #[error("a cancellation reason is required")]
    CancelReasonRequired,
}

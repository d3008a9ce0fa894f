//! Orders and their lifecycles.
//!
//! An order is an immutable checkout snapshot with two independent
//! lifecycles: a fulfillment state machine and a payment status.

mod order;
mod status;

pub use order::{CheckoutRequest, Order, OrderItem};
pub use status::{DeliveryType, OrderStatus, PaymentStatus};

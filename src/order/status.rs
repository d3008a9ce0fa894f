//! Order status state machines.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How an order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DeliveryType {
    #[default]
    Delivery,
    Pickup,
}

impl DeliveryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryType::Delivery => "delivery",
            DeliveryType::Pickup => "pickup",
        }
    }
}

/// Fulfillment status of an order.
///
/// Delivery orders progress `Pending → Confirmed → Preparing → Ready →
/// OutForDelivery → Delivered`; pickup orders end `Ready → Completed`.
/// `Cancelled` and `Refunded` sit outside the linear progression and are
/// reached only through the dedicated cancel/refund operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    Ready,
    OutForDelivery,
    Delivered,
    Completed,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
            OrderStatus::OutForDelivery => "Out for delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Refunded => "Refunded",
        }
    }

    /// Whether no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered
                | OrderStatus::Completed
                | OrderStatus::Cancelled
                | OrderStatus::Refunded
        )
    }

    /// The next step in the linear flow for the given delivery type.
    pub fn next(&self, delivery_type: DeliveryType) -> Option<OrderStatus> {
        match (self, delivery_type) {
            (OrderStatus::Pending, _) => Some(OrderStatus::Confirmed),
            (OrderStatus::Confirmed, _) => Some(OrderStatus::Preparing),
            (OrderStatus::Preparing, _) => Some(OrderStatus::Ready),
            (OrderStatus::Ready, DeliveryType::Delivery) => Some(OrderStatus::OutForDelivery),
            (OrderStatus::Ready, DeliveryType::Pickup) => Some(OrderStatus::Completed),
            (OrderStatus::OutForDelivery, DeliveryType::Delivery) => Some(OrderStatus::Delivered),
            _ => None,
        }
    }

    /// Whether `next` is a legal linear step from here.
    pub fn can_advance_to(&self, next: OrderStatus, delivery_type: DeliveryType) -> bool {
        self.next(delivery_type) == Some(next)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment status, tracked independently of fulfillment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Refunded => "refunded",
        }
    }

    /// Whether the payment lifecycle permits moving to `next`.
    pub fn can_become(&self, next: PaymentStatus) -> bool {
        matches!(
            (self, next),
            (PaymentStatus::Pending, PaymentStatus::Paid)
                | (PaymentStatus::Pending, PaymentStatus::Refunded)
                | (PaymentStatus::Paid, PaymentStatus::Refunded)
        )
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_flow() {
        let mut status = OrderStatus::Pending;
        let expected = [
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
        ];
        for step in expected {
            status = status.next(DeliveryType::Delivery).unwrap();
            assert_eq!(status, step);
        }
        assert!(status.next(DeliveryType::Delivery).is_none());
    }

    #[test]
    fn test_pickup_flow_ends_in_completed() {
        assert_eq!(
            OrderStatus::Ready.next(DeliveryType::Pickup),
            Some(OrderStatus::Completed)
        );
        assert!(!OrderStatus::Ready.can_advance_to(OrderStatus::OutForDelivery, DeliveryType::Pickup));
    }

    #[test]
    fn test_no_skipping_states() {
        assert!(!OrderStatus::Pending.can_advance_to(OrderStatus::Preparing, DeliveryType::Delivery));
        assert!(!OrderStatus::Confirmed.can_advance_to(OrderStatus::Ready, DeliveryType::Delivery));
    }

    #[test]
    fn test_terminal_states() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(OrderStatus::Refunded.is_terminal());
        assert!(!OrderStatus::OutForDelivery.is_terminal());
    }

    #[test]
    fn test_payment_lifecycle() {
        assert!(PaymentStatus::Pending.can_become(PaymentStatus::Paid));
        assert!(PaymentStatus::Paid.can_become(PaymentStatus::Refunded));
        assert!(PaymentStatus::Pending.can_become(PaymentStatus::Refunded));
        assert!(!PaymentStatus::Paid.can_become(PaymentStatus::Pending));
        assert!(!PaymentStatus::Refunded.can_become(PaymentStatus::Paid));
    }
}
